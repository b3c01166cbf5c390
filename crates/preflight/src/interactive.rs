//! Interactive facet selection.
//!
//! Presents each facet's options as a numbered menu on stdout and reads the
//! choice from stdin. Empty or invalid input falls back to the first option,
//! so pressing enter three times accepts the defaults.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::facet::{FacetCatalog, FacetOption, Selection};

const RULE: &str = "============================================================";

/// Prompt for all three facets on the process's stdin/stdout.
///
/// # Errors
///
/// Returns an error if reading or writing the terminal fails, or if the
/// catalog has an empty facet.
pub fn prompt_selection(catalog: &FacetCatalog) -> Result<Selection> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    prompt_selection_from(catalog, &mut stdin.lock(), &mut stdout.lock())
}

/// Prompt for all three facets on the given reader and writer.
pub fn prompt_selection_from<R: BufRead, W: Write>(
    catalog: &FacetCatalog,
    input: &mut R,
    output: &mut W,
) -> Result<Selection> {
    writeln!(output, "{RULE}")?;
    writeln!(output, "  Drone Operations Checklist Generator")?;
    writeln!(output, "{RULE}")?;
    writeln!(output)?;

    let operation = prompt_facet(
        input,
        output,
        "Operation Types",
        "operation type",
        &catalog.operation_types,
    )?;
    writeln!(output)?;
    let platform = prompt_facet(
        input,
        output,
        "Drone Platforms",
        "drone platform",
        &catalog.drone_platforms,
    )?;
    writeln!(output)?;
    let count = prompt_facet(
        input,
        output,
        "Number of Drones",
        "number of drones",
        &catalog.drone_counts,
    )?;

    writeln!(output)?;
    writeln!(output, "{RULE}")?;
    writeln!(output, "Generating checklists for:")?;
    writeln!(output, "  Operation: {operation}")?;
    writeln!(output, "  Drone: {platform}")?;
    writeln!(output, "  Count: {count}")?;
    writeln!(output, "{RULE}")?;
    writeln!(output)?;

    Ok(Selection::new(operation, platform, count))
}

/// Show one numbered facet menu and read the chosen code.
fn prompt_facet<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    heading: &str,
    noun: &str,
    options: &[FacetOption],
) -> Result<String> {
    let first = options
        .first()
        .ok_or_else(|| Error::config_validation(format!("no {noun} options available")))?;

    writeln!(output, "{heading}:")?;
    for (index, option) in options.iter().enumerate() {
        writeln!(output, "  {}. {:<15} - {}", index + 1, option.code, option.label)?;
    }
    writeln!(output)?;
    write!(output, "Select {noun} (1-{}) [1]: ", options.len())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let chosen = line
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| options.get(index))
        .unwrap_or(first);
    Ok(chosen.code.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> (Selection, String) {
        let catalog = FacetCatalog::default();
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let selection = prompt_selection_from(&catalog, &mut reader, &mut output).unwrap();
        (selection, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_numeric_choices_resolve_to_codes() {
        let (selection, _) = prompt("3\n2\n2\n");
        assert_eq!(selection.operation, "BVLOS_VO");
        assert_eq!(selection.platform, "EBEE");
        assert_eq!(selection.count, "MULTIPLE");
    }

    #[test]
    fn test_empty_input_accepts_defaults() {
        let (selection, _) = prompt("\n\n\n");
        assert_eq!(selection, Selection::new("VLOS", "DJI", "SINGLE"));
    }

    #[test]
    fn test_invalid_input_falls_back_to_first_option() {
        let (selection, _) = prompt("banana\n99\n0\n");
        assert_eq!(selection, Selection::new("VLOS", "DJI", "SINGLE"));
    }

    #[test]
    fn test_menus_list_codes_and_labels() {
        let (_, output) = prompt("\n\n\n");
        assert!(output.contains("Operation Types:"));
        assert!(output.contains("BVLOS_NO_VO"));
        assert!(output.contains("BVLOS 1km (No Observer)"));
        assert!(output.contains("Select drone platform (1-6) [1]:"));
    }

    #[test]
    fn test_summary_echoes_selection() {
        let (_, output) = prompt("4\n6\n3\n");
        assert!(output.contains("  Operation: NIGHT_VLOS"));
        assert!(output.contains("  Drone: PARROT"));
        assert!(output.contains("  Count: SWARM"));
    }

    #[test]
    fn test_empty_facet_is_an_error() {
        let mut catalog = FacetCatalog::default();
        catalog.operation_types.clear();
        let mut reader = Cursor::new(b"\n\n\n".to_vec());
        let mut output = Vec::new();
        let result = prompt_selection_from(&catalog, &mut reader, &mut output);
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }
}

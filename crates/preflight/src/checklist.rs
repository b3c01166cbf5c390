//! Checklist documents and the procedure filter.
//!
//! This module defines the checklist data model loaded from the JSON data
//! directory and the pure facet filter that selects the procedures
//! applicable to a [`Selection`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::facet::{Selection, WILDCARD};

/// An RGB color triple, as stored in checklist documents.
pub type Rgb = [u8; 3];

/// A single procedure within a checklist section.
///
/// Each procedure carries a short checklist entry, a longer description for
/// the procedure manual, and the set of facet codes it applies to. A facet
/// set containing [`WILDCARD`] matches every selection value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    /// Short text shown on the compact checklist.
    #[serde(rename = "checklist_entry")]
    pub entry: String,

    /// Long-form text shown in the procedure manual.
    #[serde(rename = "procedure_description")]
    pub description: String,

    /// Operation type codes this procedure applies to.
    pub operation_types: Vec<String>,

    /// Drone platform codes this procedure applies to.
    pub drone_platforms: Vec<String>,

    /// Drone count codes this procedure applies to.
    #[serde(rename = "number_of_drones")]
    pub drone_counts: Vec<String>,
}

impl Procedure {
    /// Check whether this procedure applies to the given selection.
    ///
    /// True iff, for each facet, the procedure's set contains the selection
    /// code or the wildcard.
    #[must_use]
    pub fn applies_to(&self, selection: &Selection) -> bool {
        facet_matches(&self.operation_types, &selection.operation)
            && facet_matches(&self.drone_platforms, &selection.platform)
            && facet_matches(&self.drone_counts, &selection.count)
    }
}

fn facet_matches(set: &[String], code: &str) -> bool {
    set.iter().any(|value| value == code || value == WILDCARD)
}

/// A titled group of procedures within a checklist document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title, drawn in the colored header bar.
    #[serde(rename = "section")]
    pub name: String,

    /// Procedures in this section, in document order.
    pub procedures: Vec<Procedure>,
}

/// A checklist document loaded from one JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    /// Document title, shown in the page banner.
    pub title: String,

    /// Accent color used for section headers and the page edge band.
    /// Defaults to black when the document doesn't specify one.
    #[serde(default)]
    pub color: Rgb,

    /// Ordered sections of the document.
    #[serde(rename = "items")]
    pub sections: Vec<Section>,
}

/// Select the procedures applicable to all three facets of the selection.
///
/// Pure and order-preserving; an empty result is valid.
#[must_use]
pub fn filter<'a>(procedures: &'a [Procedure], selection: &Selection) -> Vec<&'a Procedure> {
    procedures
        .iter()
        .filter(|procedure| procedure.applies_to(selection))
        .collect()
}

/// Load every checklist document from a data directory.
///
/// Files are read in lexicographic filename order so that numbered files
/// (`01_preflight.json`, `02_flight.json`, ...) keep their intended order.
/// Only `*.json` files are considered. A file that disappears between
/// listing and reading is logged and skipped.
///
/// # Errors
///
/// Returns an error if the directory does not exist, contains no checklist
/// files, or a present file cannot be read or parsed.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<Checklist>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::DataDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(Error::NoChecklists {
            path: dir.to_path_buf(),
        });
    }

    let mut checklists = Vec::with_capacity(paths.len());
    for path in &paths {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!("checklist file not found, skipping: {}", path.display());
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let checklist: Checklist =
            serde_json::from_str(&raw).map_err(|source| Error::ChecklistParse {
                path: path.clone(),
                source,
            })?;
        debug!(
            "loaded checklist '{}' ({} sections) from {}",
            checklist.title,
            checklist.sections.len(),
            path.display()
        );
        checklists.push(checklist);
    }

    info!("loaded {} checklists from {}", checklists.len(), dir.display());
    Ok(checklists)
}

//! Facet enumerations and operator selection.
//!
//! A generation run is parameterized by three independent facets: the
//! operation type, the drone platform, and the number of drones. The valid
//! values for each facet are loaded from a constants JSON file at startup,
//! with hardcoded defaults when the file is absent.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// The wildcard code that matches every selection value for a facet.
pub const WILDCARD: &str = "ALL";

/// One selectable value of a facet: a short code plus a display label.
///
/// Serialized as a two-element array (`["VLOS", "VLOS"]`), the format used
/// by the constants file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct FacetOption {
    /// The short code used on the command line and in checklist files.
    pub code: String,
    /// The human-readable label shown in listings and document metadata.
    pub label: String,
}

impl FacetOption {
    /// Create a new facet option.
    #[must_use]
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

impl From<(String, String)> for FacetOption {
    fn from((code, label): (String, String)) -> Self {
        Self { code, label }
    }
}

impl From<FacetOption> for (String, String) {
    fn from(option: FacetOption) -> Self {
        (option.code, option.label)
    }
}

/// The three facet codes a generation run is filtered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Operation type code (e.g. `VLOS`).
    pub operation: String,
    /// Drone platform code (e.g. `DJI`).
    pub platform: String,
    /// Drone count code (e.g. `SINGLE`).
    pub count: String,
}

impl Selection {
    /// Create a selection from the three facet codes.
    #[must_use]
    pub fn new(
        operation: impl Into<String>,
        platform: impl Into<String>,
        count: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            platform: platform.into(),
            count: count.into(),
        }
    }
}

/// The ordered enumerations for all three facets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCatalog {
    /// Valid operation types, in display order.
    pub operation_types: Vec<FacetOption>,
    /// Valid drone platforms, in display order.
    pub drone_platforms: Vec<FacetOption>,
    /// Valid drone counts, in display order.
    #[serde(rename = "number_of_drones")]
    pub drone_counts: Vec<FacetOption>,
}

impl Default for FacetCatalog {
    fn default() -> Self {
        Self {
            operation_types: vec![
                FacetOption::new("VLOS", "VLOS"),
                FacetOption::new("BVLOS_NO_VO", "BVLOS 1km (No Observer)"),
                FacetOption::new("BVLOS_VO", "BVLOS 2km (Observer)"),
                FacetOption::new("NIGHT_VLOS", "Night VLOS"),
                FacetOption::new("NIGHT_BVLOS", "Night BVLOS"),
            ],
            drone_platforms: vec![
                FacetOption::new("DJI", "DJI"),
                FacetOption::new("EBEE", "Ebee X"),
                FacetOption::new("UOB_GLIDER", "UoB Glider"),
                FacetOption::new("SMURF", "Papa Smurf"),
                FacetOption::new("CODRONE", "CoDrone"),
                FacetOption::new("PARROT", "Parrot Anafi"),
            ],
            drone_counts: vec![
                FacetOption::new("SINGLE", "Single Drone"),
                FacetOption::new("MULTIPLE", "Multiple Drones"),
                FacetOption::new("SWARM", "Swarm of Drones"),
            ],
        }
    }
}

impl FacetCatalog {
    /// Load the catalog from a constants JSON file.
    ///
    /// A missing file is not an error: the built-in default enumerations are
    /// used instead (with a warning). A file that exists but cannot be
    /// parsed is a hard error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                "constants file {} not found, using built-in defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let catalog = serde_json::from_str(&raw).map_err(|source| Error::ConstantsParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded facet catalog from {}", path.display());
        Ok(catalog)
    }

    /// Validate that every code in the selection exists in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFacetCode`] naming the first offending facet.
    pub fn validate(&self, selection: &Selection) -> Result<()> {
        if !Self::contains(&self.operation_types, &selection.operation) {
            return Err(Error::unknown_code("operation type", &selection.operation));
        }
        if !Self::contains(&self.drone_platforms, &selection.platform) {
            return Err(Error::unknown_code("drone platform", &selection.platform));
        }
        if !Self::contains(&self.drone_counts, &selection.count) {
            return Err(Error::unknown_code("drone count", &selection.count));
        }
        Ok(())
    }

    /// Resolve an operation type code to its display label.
    ///
    /// Unknown codes fall back to the code itself.
    #[must_use]
    pub fn operation_label<'a>(&'a self, code: &'a str) -> &'a str {
        Self::label_in(&self.operation_types, code)
    }

    /// Resolve a drone platform code to its display label.
    #[must_use]
    pub fn platform_label<'a>(&'a self, code: &'a str) -> &'a str {
        Self::label_in(&self.drone_platforms, code)
    }

    /// Resolve a drone count code to its display label.
    #[must_use]
    pub fn count_label<'a>(&'a self, code: &'a str) -> &'a str {
        Self::label_in(&self.drone_counts, code)
    }

    fn contains(options: &[FacetOption], code: &str) -> bool {
        options.iter().any(|option| option.code == code)
    }

    fn label_in<'a>(options: &'a [FacetOption], code: &'a str) -> &'a str {
        options
            .iter()
            .find(|option| option.code == code)
            .map_or(code, |option| option.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog_enumerations() {
        let catalog = FacetCatalog::default();
        assert_eq!(catalog.operation_types.len(), 5);
        assert_eq!(catalog.drone_platforms.len(), 6);
        assert_eq!(catalog.drone_counts.len(), 3);
        assert_eq!(catalog.operation_types[0].code, "VLOS");
        assert_eq!(catalog.drone_counts[2].label, "Swarm of Drones");
    }

    #[test]
    fn test_facet_option_from_tuple() {
        let option: FacetOption = ("EBEE".to_string(), "Ebee X".to_string()).into();
        assert_eq!(option.code, "EBEE");
        assert_eq!(option.label, "Ebee X");
    }

    #[test]
    fn test_facet_option_deserializes_from_pair_array() {
        let option: FacetOption = serde_json::from_str(r#"["DJI", "DJI"]"#).unwrap();
        assert_eq!(option, FacetOption::new("DJI", "DJI"));
    }

    #[test]
    fn test_catalog_deserializes_constants_format() {
        let json = r#"{
            "operation_types": [["VLOS", "VLOS"], ["EVLOS", "Extended VLOS"]],
            "drone_platforms": [["DJI", "DJI"]],
            "number_of_drones": [["SINGLE", "Single Drone"]]
        }"#;
        let catalog: FacetCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.operation_types.len(), 2);
        assert_eq!(catalog.operation_types[1].label, "Extended VLOS");
        assert_eq!(catalog.drone_counts.len(), 1);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let catalog = FacetCatalog::load("/nonexistent/constants.json").unwrap();
        assert_eq!(catalog, FacetCatalog::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "operation_types": [["VLOS", "VLOS"]],
                "drone_platforms": [["DJI", "DJI"]],
                "number_of_drones": [["SINGLE", "Single Drone"]]
            }}"#
        )
        .unwrap();

        let catalog = FacetCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.operation_types.len(), 1);
    }

    #[test]
    fn test_load_malformed_file_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = FacetCatalog::load(file.path());
        assert!(matches!(result, Err(Error::ConstantsParse { .. })));
    }

    #[test]
    fn test_validate_known_selection() {
        let catalog = FacetCatalog::default();
        let selection = Selection::new("VLOS", "DJI", "SINGLE");
        assert!(catalog.validate(&selection).is_ok());
    }

    #[test]
    fn test_validate_unknown_operation() {
        let catalog = FacetCatalog::default();
        let selection = Selection::new("WARP", "DJI", "SINGLE");
        let err = catalog.validate(&selection).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownFacetCode {
                facet: "operation type",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_unknown_platform() {
        let catalog = FacetCatalog::default();
        let selection = Selection::new("VLOS", "HOVERBOARD", "SINGLE");
        assert!(catalog.validate(&selection).is_err());
    }

    #[test]
    fn test_validate_unknown_count() {
        let catalog = FacetCatalog::default();
        let selection = Selection::new("VLOS", "DJI", "FLEET");
        assert!(catalog.validate(&selection).is_err());
    }

    #[test]
    fn test_label_lookup() {
        let catalog = FacetCatalog::default();
        assert_eq!(catalog.operation_label("BVLOS_VO"), "BVLOS 2km (Observer)");
        assert_eq!(catalog.platform_label("EBEE"), "Ebee X");
        assert_eq!(catalog.count_label("MULTIPLE"), "Multiple Drones");
    }

    #[test]
    fn test_label_lookup_falls_back_to_code() {
        let catalog = FacetCatalog::default();
        assert_eq!(catalog.operation_label("MYSTERY"), "MYSTERY");
    }

    #[test]
    fn test_selection_new() {
        let selection = Selection::new("NIGHT_VLOS", "PARROT", "SWARM");
        assert_eq!(selection.operation, "NIGHT_VLOS");
        assert_eq!(selection.platform, "PARROT");
        assert_eq!(selection.count, "SWARM");
    }

    #[test]
    fn test_catalog_round_trips_through_json() {
        let catalog = FacetCatalog::default();
        let json = serde_json::to_string(&catalog).unwrap();
        // Serializes back to the pair-array constants format
        assert!(json.contains(r#"["VLOS","VLOS"]"#));
        let parsed: FacetCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }
}

//! Output archival.
//!
//! Before a generation run writes new documents, every artifact left in the
//! output directory from previous runs (timestamped folders and loose PDF
//! files) is moved into the archive directory. Name collisions in the
//! archive are resolved by appending the run timestamp, so archiving the
//! same folder name twice yields two distinct entries.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::facet::Selection;

/// Format a timestamp suitable for folder names and archive suffixes.
#[must_use]
pub fn run_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Move previous output artifacts into the archive directory.
///
/// Directories and `*.pdf` files directly under `output_dir` are moved;
/// everything else (including the archive directory itself) is left alone.
/// Returns the paths the artifacts were moved to. A missing output
/// directory is not an error.
///
/// # Errors
///
/// Returns an error if the archive directory cannot be created or an
/// artifact cannot be moved.
pub fn archive_existing(
    output_dir: &Path,
    archive_dir: &Path,
    timestamp: &str,
) -> Result<Vec<PathBuf>> {
    let mut moved = Vec::new();
    if !output_dir.is_dir() {
        debug!("output directory {} absent, nothing to archive", output_dir.display());
        return Ok(moved);
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(output_dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    for path in entries {
        if path == archive_dir {
            continue;
        }
        let is_pdf = path.extension().is_some_and(|ext| ext == "pdf");
        if !path.is_dir() && !is_pdf {
            continue;
        }

        std::fs::create_dir_all(archive_dir).map_err(|source| Error::DirectoryCreate {
            path: archive_dir.to_path_buf(),
            source,
        })?;

        let file_name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
        let mut target = archive_dir.join(&file_name);
        if target.exists() {
            let stem = file_name.to_string_lossy();
            target = archive_dir.join(format!("{stem}_{timestamp}"));
        }

        std::fs::rename(&path, &target).map_err(|source| Error::Archive {
            path: path.clone(),
            source,
        })?;
        info!(
            "archived {} -> {}",
            file_name.to_string_lossy(),
            target.display()
        );
        moved.push(target);
    }

    Ok(moved)
}

/// Create the timestamped folder the current run's documents are written to.
///
/// The folder is named `{operation}_{platform}_{count}_{timestamp}`.
///
/// # Errors
///
/// Returns an error if the folder cannot be created.
pub fn create_output_folder(
    output_dir: &Path,
    selection: &Selection,
    timestamp: &str,
) -> Result<PathBuf> {
    let folder_name = format!(
        "{}_{}_{}_{}",
        selection.operation, selection.platform, selection.count, timestamp
    );
    let folder = output_dir.join(folder_name);
    std::fs::create_dir_all(&folder).map_err(|source| Error::DirectoryCreate {
        path: folder.clone(),
        source,
    })?;
    Ok(folder)
}

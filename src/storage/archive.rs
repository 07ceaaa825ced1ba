//! Archive reader for historical report documents
//!
//! Every `*.json` file in the archive directory holds either one report object
//! or an array of reports. Files are read in file-name order.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::{MomentumEntry, Report};
use crate::utils::error::ArchiveError;

#[derive(Deserialize)]
#[serde(untagged)]
enum ArchiveDocument {
    Many(Vec<Report>),
    One(Box<Report>),
}

/// Load every report document from an archive directory
///
/// # Errors
///
/// Returns `ArchiveError` when the directory or a file cannot be read, or a
/// file is not a report document.
pub fn load_archive(dir: &Path) -> Result<Vec<Report>, ArchiveError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ArchiveError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut reports = Vec::new();
    for path in files {
        match read_document(&path)? {
            ArchiveDocument::Many(batch) => reports.extend(batch),
            ArchiveDocument::One(report) => reports.push(*report),
        }
    }

    tracing::info!(dir = %dir.display(), count = reports.len(), "Loaded report archive");
    Ok(reports)
}

/// Load a JSON array of momentum history rows
///
/// # Errors
///
/// Returns `ArchiveError` when the file cannot be read or parsed.
pub fn load_momentum_history(path: &Path) -> Result<Vec<MomentumEntry>, ArchiveError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArchiveError::File {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ArchiveError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn read_document(path: &Path) -> Result<ArchiveDocument, ArchiveError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArchiveError::File {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ArchiveError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

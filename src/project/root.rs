//! Project root detection
//!
//! Walks up the directory tree looking for project markers:
//! 1. `tannhauser-tasks.toml` (explicit config - highest precedence)
//! 2. `pyproject.toml`
//! 3. `setup.py`

use crate::error::Result;
use crate::project::config::CONFIG_FILE;
use std::path::{Path, PathBuf};

/// Markers that indicate a project root, in precedence order.
/// The first marker found determines the project root.
const PROJECT_MARKERS: &[&str] = &[CONFIG_FILE, "pyproject.toml", "setup.py"];

/// Information about a detected project root
#[derive(Debug, Clone)]
pub struct ProjectRoot {
    /// The path to the project root directory
    pub path: PathBuf,
    /// The marker that was found
    pub marker: String,
}

/// Find project root by walking up from the given directory.
///
/// Returns the first directory containing any marker, or None if no project found.
pub fn find_project_root(start_dir: &Path) -> Result<Option<ProjectRoot>> {
    // Canonicalize the start directory to resolve symlinks and get absolute path
    let mut current = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    loop {
        if let Some(marker) = find_marker_in_dir(&current) {
            return Ok(Some(ProjectRoot {
                path: current,
                marker: marker.to_string(),
            }));
        }

        match current.parent() {
            Some(parent) => {
                if parent == current {
                    break;
                }
                current = parent.to_path_buf();
            }
            None => break,
        }
    }

    Ok(None)
}

/// Check if a directory contains any project marker.
/// Returns the first marker found (in precedence order), or None.
fn find_marker_in_dir(dir: &Path) -> Option<&'static str> {
    PROJECT_MARKERS
        .iter()
        .copied()
        .find(|marker| dir.join(marker).exists())
}

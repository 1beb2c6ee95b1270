// src/discovery.rs
//! Finds BPMN documents under the paths given on the command line.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{BpmnError, Result};

/// File name suffixes treated as BPMN documents (case-insensitive).
pub const BPMN_SUFFIXES: &[&str] = &[".bpmn", ".bpmn20.xml", ".xml"];

const PRUNED_DIRS: &[&str] = &["target", "node_modules", "build", "dist"];

/// Expands `paths` into a sorted, deduplicated list of documents.
///
/// Files named explicitly are always kept; directories are walked for files
/// with a [`BPMN_SUFFIXES`] suffix, skipping hidden and build directories.
///
/// # Errors
/// Returns an error if a named path does not exist.
pub fn discover(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for root in paths {
        let meta = fs::metadata(root).map_err(|source| BpmnError::Io {
            source,
            path: root.clone(),
        })?;
        if meta.is_file() {
            found.push(root.clone());
        } else {
            found.extend(walk(root));
        }
    }
    found.sort();
    found.dedup();
    debug!(count = found.len(), "documents discovered");
    Ok(found)
}

fn walk(root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_prune(&e.file_name().to_string_lossy()));

    let mut paths = Vec::new();
    let mut errors = 0usize;
    for item in walker {
        match item {
            Ok(entry) if entry.file_type().is_file() && is_bpmn_file(entry.path()) => {
                paths.push(entry.into_path());
            }
            Ok(_) => {}
            Err(_) => errors += 1,
        }
    }
    if errors > 0 {
        warn!(root = %root.display(), errors, "entries skipped during directory walk");
    }
    paths
}

fn should_prune(name: &str) -> bool {
    name.starts_with('.') || PRUNED_DIRS.contains(&name)
}

#[must_use]
pub fn is_bpmn_file(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_ascii_lowercase();
    BPMN_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes() {
        assert!(is_bpmn_file(Path::new("a/order.bpmn")));
        assert!(is_bpmn_file(Path::new("Order.BPMN")));
        assert!(is_bpmn_file(Path::new("x/order.bpmn20.xml")));
        assert!(is_bpmn_file(Path::new("diagram.xml")));
        assert!(!is_bpmn_file(Path::new("notes.txt")));
        assert!(!is_bpmn_file(Path::new("bpmn")));
    }

    #[test]
    fn prunes_hidden_and_build_dirs() {
        assert!(should_prune(".git"));
        assert!(should_prune("target"));
        assert!(!should_prune("processes"));
    }
}

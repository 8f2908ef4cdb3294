//! Input file discovery.
//!
//! Paths given on the command line may name files or directories.
//! Directories are walked recursively without following symlinks.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ToolError;

/// Extension of Gherkin feature files.
pub const FEATURE_EXTENSION: &str = "feature";
/// Extension of Dart source files.
pub const DART_EXTENSION: &str = "dart";

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

fn convert_walkdir_error(err: walkdir::Error) -> Option<ToolError> {
    if err.loop_ancestor().is_some() {
        return None;
    }

    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let err_str = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(err_str));
    Some(ToolError::Read { path, source })
}

fn walk(base: &Path, extension: &str, files: &mut BTreeSet<PathBuf>) -> Result<(), ToolError> {
    for next in WalkDir::new(base).follow_links(false) {
        match next {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                    files.insert(entry.into_path());
                }
            }
            Err(err) => {
                if let Some(err) = convert_walkdir_error(err) {
                    return Err(err);
                }
            }
        }
    }
    Ok(())
}

/// Collect files with `extension` from `paths`, sorted and deduplicated.
///
/// A path naming a file is taken as given, whatever its extension.
///
/// # Errors
///
/// Returns [`ToolError::Read`] when a path does not exist or a directory
/// cannot be read.
pub fn collect_files(paths: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>, ToolError> {
    let mut files = BTreeSet::new();
    for path in paths {
        let metadata = std::fs::metadata(path).map_err(|source| ToolError::Read {
            path: path.clone(),
            source,
        })?;
        if metadata.is_file() {
            files.insert(path.clone());
        } else {
            walk(path, extension, &mut files)?;
        }
    }
    tracing::debug!(count = files.len(), extension, "collected input files");
    Ok(files.into_iter().collect())
}

//! Content directory discovery.

use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::slug::CONTENT_EXTENSIONS;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Content directory not found: {0}")]
    DirectoryNotFound(PathBuf),
}

/// Recursively collect article files (`.md`/`.mdx`) under `root`.
///
/// Symbolic links are not followed and anything that is not a regular file
/// is skipped. Entries that cannot be read are logged and skipped. The
/// returned paths are sorted, but callers should not rely on that.
pub fn scan_content_dir(root: &Path, ignore: &[Regex]) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("Skipping unreadable entry under {:?}: {}", root, err);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_content_file(entry.path()) {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        if ignore.iter().any(|re| re.is_match(&rel)) {
            tracing::debug!("Ignoring {} due to ignore_patterns", rel);
            continue;
        }

        files.push(entry.into_path());
    }

    Ok(files)
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

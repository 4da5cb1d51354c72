//! Snapshot loading and the process-lifetime index cache.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

use crate::models::{SearchIndex, SnapshotRecord};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Snapshot not found at {0:?}")]
    Missing(PathBuf),

    #[error("Failed to read snapshot {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<SearchIndex, LoadError> {
    let data = fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::Missing(path.to_path_buf())
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let records: Vec<SnapshotRecord> =
        serde_json::from_slice(&data).map_err(|source| LoadError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(SearchIndex::from(records))
}

/// Lazily loaded, never invalidated view of a snapshot.
///
/// The first successful [`IndexCache::get`] populates the cache; later calls
/// never touch the disk. Concurrent first calls may each read the file, and
/// whichever finishes first wins. A failed load is logged and answered with
/// an empty index without populating the cache.
#[derive(Debug)]
pub struct IndexCache {
    path: PathBuf,
    index: OnceLock<Arc<SearchIndex>>,
}

impl IndexCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            index: OnceLock::new(),
        }
    }

    /// A cache that is already populated
    pub fn preloaded(path: impl Into<PathBuf>, index: SearchIndex) -> Self {
        let cache = Self::new(path);
        let _ = cache.index.set(Arc::new(index));
        cache
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a snapshot has been loaded
    pub fn is_loaded(&self) -> bool {
        self.index.get().is_some()
    }

    /// All records, loading the snapshot on first use.
    pub fn get(&self) -> Arc<SearchIndex> {
        if let Some(index) = self.index.get() {
            return index.clone();
        }

        match load_snapshot(&self.path) {
            Ok(index) => {
                tracing::info!("Loaded {} articles from {:?}", index.len(), self.path);
                // Losing the race is fine: the other loader read the same file.
                let _ = self.index.set(Arc::new(index));
                self.index.get().cloned().unwrap_or_default()
            }
            Err(err) => {
                tracing::error!(
                    "Could not load search index ({}). Did the build step run?",
                    err
                );
                Arc::new(SearchIndex::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::write_snapshot;
    use crate::models::ArticleRecord;
    use tempfile::tempdir;

    fn sample_index() -> SearchIndex {
        SearchIndex::new(vec![ArticleRecord {
            id: "hello".into(),
            slug: "hello".into(),
            title: "Hello".into(),
            date: "2024-01-01".into(),
            overview: "first post".into(),
            tags: vec!["CSS".into()],
            reading_time: 2,
            color: "#264de4".into(),
            content: "body".into(),
        }])
    }

    #[test]
    fn test_load_snapshot_roundtrip_blanks_body() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        write_snapshot(&sample_index(), &path).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.articles[0].tags, vec!["CSS"]);
        assert_eq!(loaded.articles[0].content, "");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_snapshot(&missing), Err(LoadError::Missing(_))));

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "{ not json").unwrap();
        assert!(matches!(
            load_snapshot(&corrupt),
            Err(LoadError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_cache_reads_disk_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        write_snapshot(&sample_index(), &path).unwrap();

        let cache = IndexCache::new(&path);
        assert!(!cache.is_loaded());
        assert_eq!(cache.get().len(), 1);
        assert!(cache.is_loaded());

        // Later calls are served from memory.
        fs::remove_file(&path).unwrap();
        assert_eq!(cache.get().len(), 1);
    }

    #[test]
    fn test_cache_soft_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");

        let cache = IndexCache::new(&path);
        assert!(cache.get().is_empty());
        assert!(!cache.is_loaded());

        fs::write(&path, "garbage").unwrap();
        assert!(cache.get().is_empty());

        // A snapshot that shows up later is picked up.
        write_snapshot(&sample_index(), &path).unwrap();
        assert_eq!(cache.get().len(), 1);
    }

    #[test]
    fn test_concurrent_first_access() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        write_snapshot(&sample_index(), &path).unwrap();

        let cache = Arc::new(IndexCache::new(&path));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.get().len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert!(cache.is_loaded());
    }
}

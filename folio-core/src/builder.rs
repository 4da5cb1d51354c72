//! Index building - orchestrates scanning, parsing, and snapshot output.

use crate::{
    config::{Config, ConfigError},
    models::{ArticleRecord, SearchIndex},
    parser::{ArticleParser, ParseError},
    scanner::{scan_content_dir, ScanError},
};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error writing {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An article left out of the index and why
#[derive(Debug)]
pub struct SkippedArticle {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a full corpus pass
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Indexed articles, bodies still present
    pub index: SearchIndex,
    pub skipped: Vec<SkippedArticle>,
    /// Where the snapshot was written, if it was
    pub snapshot_path: Option<PathBuf>,
}

/// Builds the article index for one content root
pub struct IndexBuilder {
    config: Config,
}

impl IndexBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scan and parse the whole corpus, then write the snapshot.
    ///
    /// A missing content root is fatal; individual articles that fail to
    /// parse are logged and reported in [`BuildReport::skipped`].
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let mut report = self.collect()?;
        let path = self.config.snapshot_path();
        write_snapshot(&report.index, &path)?;
        tracing::info!(
            "Wrote {} articles to {:?}",
            report.index.len(),
            path
        );
        report.snapshot_path = Some(path);
        Ok(report)
    }

    /// Scan and parse the corpus without writing anything.
    ///
    /// Records keep their body text, so content queries against the
    /// returned index see the full article.
    pub fn collect(&self) -> Result<BuildReport, BuildError> {
        let root = self.config.content_dir();
        let ignore = self.config.compile_ignore_patterns()?;
        let files = scan_content_dir(&root, &ignore)?;

        tracing::info!("Found {} article files in {:?}", files.len(), root);

        let parser = ArticleParser::new(&root, &self.config);
        let parsed: Vec<(PathBuf, Result<ArticleRecord, ParseError>)> = files
            .into_par_iter()
            .map(|path| {
                let result = parser.parse_file(&path);
                (path, result)
            })
            .collect();

        let mut articles = Vec::with_capacity(parsed.len());
        let mut skipped = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (path, result) in parsed {
            match result {
                Ok(article) => {
                    if !seen.insert(article.slug.clone()) {
                        tracing::warn!("Duplicate slug '{}' in {:?}; skipping", article.slug, path);
                        skipped.push(SkippedArticle {
                            reason: format!("duplicate slug '{}'", article.slug),
                            path,
                        });
                        continue;
                    }
                    articles.push(article);
                }
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {}", path, e);
                    skipped.push(SkippedArticle {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        sort_articles(&mut articles);

        tracing::info!(
            "Indexed {} articles ({} skipped)",
            articles.len(),
            skipped.len()
        );

        Ok(BuildReport {
            index: SearchIndex::new(articles),
            skipped,
            snapshot_path: None,
        })
    }
}

/// Newest first by `date`, then by slug, so output does not depend on
/// traversal or completion order.
pub fn sort_articles(articles: &mut [ArticleRecord]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
}

/// Serialize `index` to `path` with every body blanked.
///
/// Parent directories are created as needed. The file is written beside
/// the target and renamed into place so readers never see a partial
/// snapshot.
pub fn write_snapshot(index: &SearchIndex, path: &Path) -> Result<(), BuildError> {
    let io_err = |source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_vec_pretty(&index.to_snapshot())?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json).map_err(io_err)?;
    if let Err(err) = fs::rename(&tmp, path) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            tracing::warn!("Could not remove {:?}: {}", tmp, cleanup);
        }
        return Err(io_err(err));
    }
    Ok(())
}

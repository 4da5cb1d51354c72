//! Turning one article file into an [`ArticleRecord`].

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;
use crate::frontmatter::{parse_frontmatter, FrontmatterError};
use crate::models::ArticleRecord;
use crate::slug::resolve_slug;

/// Reading speed used for `reading_time`
pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
}

/// Estimated minutes to read `body`: whitespace-delimited tokens over
/// [`WORDS_PER_MINUTE`], rounded up, never below one.
///
/// ```
/// use folio_core::parser::reading_time;
///
/// let body = vec!["word"; 450].join(" ");
/// assert_eq!(reading_time(&body), 3);
/// assert_eq!(reading_time(""), 1);
/// ```
pub fn reading_time(body: &str) -> u32 {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Parses articles relative to one content root.
pub struct ArticleParser<'a> {
    root: &'a Path,
    config: &'a Config,
}

impl<'a> ArticleParser<'a> {
    pub fn new(root: &'a Path, config: &'a Config) -> Self {
        Self { root, config }
    }

    /// Read and parse a single article file
    pub fn parse_file(&self, path: &Path) -> Result<ArticleRecord, ParseError> {
        let source = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(path, &source)
    }

    /// Parse article text that was read from `path`.
    ///
    /// `title` is required. `tags` is required unless `build.require_tags`
    /// is off, in which case a missing field means no tags. `date` and
    /// `overview` default to empty strings.
    pub fn parse_str(&self, path: &Path, source: &str) -> Result<ArticleRecord, ParseError> {
        let (frontmatter, body) = parse_frontmatter(source)?;

        let title = frontmatter
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| FrontmatterError::MissingField("title".to_string()))?
            .to_string();

        let tags = match &frontmatter.tags {
            Some(raw) => raw.split(),
            None if self.config.build.require_tags => {
                return Err(FrontmatterError::MissingField("tags".to_string()).into());
            }
            None => Vec::new(),
        };

        let slug = resolve_slug(frontmatter.slug.as_deref(), self.root, path);
        let color = tags
            .first()
            .map(|tag| self.config.tag_color(tag))
            .unwrap_or(crate::models::DEFAULT_TAG_COLOR)
            .to_string();

        Ok(ArticleRecord {
            id: slug.clone(),
            slug,
            title,
            date: frontmatter.date.unwrap_or_default().trim().to_string(),
            overview: frontmatter.overview.unwrap_or_default(),
            tags,
            reading_time: reading_time(&body),
            color,
            content: body,
        })
    }
}

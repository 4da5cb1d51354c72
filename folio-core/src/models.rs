//! Content model structs for articles and the search index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Color used when an article's primary tag has no configured color.
pub const DEFAULT_TAG_COLOR: &str = "var(--accent-color)";

/// Front matter metadata from article files.
///
/// Every field is optional at this layer; the article parser decides which
/// ones are required and what the defaults are.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub overview: Option<String>,

    #[serde(default)]
    pub tags: Option<RawTags>,

    /// Explicit slug override
    #[serde(default)]
    pub slug: Option<String>,
}

/// Tags as written in front matter: either `tags: A, B` or a YAML list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawTags {
    Joined(String),
    List(Vec<String>),
}

impl RawTags {
    /// Split into trimmed, non-empty tag names, keeping their order.
    pub fn split(&self) -> Vec<String> {
        match self {
            RawTags::Joined(s) => split_tags(s),
            RawTags::List(items) => items
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Split a comma-joined tag string.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// A single indexed article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Same value as `slug`
    pub id: String,

    /// URL identifier (e.g., "frontend/learning-next")
    pub slug: String,

    pub title: String,

    /// `YYYY-MM-DD`, kept as written
    pub date: String,

    pub overview: String,

    /// Tags in front matter order
    pub tags: Vec<String>,

    /// Minutes, always >= 1
    pub reading_time: u32,

    /// Color of the primary tag
    pub color: String,

    /// Body text. Only populated during a build; blank in snapshots.
    pub content: String,
}

impl ArticleRecord {
    /// First tag, used for the card color
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// Tags joined back into the comma form used on disk
    pub fn joined_tags(&self) -> String {
        self.tags.join(",")
    }

    /// Month bucket (`YYYY-MM`) derived from the date prefix
    pub fn month(&self) -> Option<&str> {
        let month = self.date.get(..7)?;
        let bytes = month.as_bytes();
        let well_formed = bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        well_formed.then_some(month)
    }
}

/// On-disk form of an [`ArticleRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub content: String,
    pub metadata: SnapshotMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default = "default_reading_time")]
    pub reading_time: u32,
}

fn default_reading_time() -> u32 {
    1
}

impl From<&ArticleRecord> for SnapshotRecord {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            id: record.id.clone(),
            slug: record.slug.clone(),
            title: record.title.clone(),
            color: record.color.clone(),
            content: String::new(),
            metadata: SnapshotMetadata {
                title: record.title.clone(),
                date: record.date.clone(),
                overview: record.overview.clone(),
                tags: record.joined_tags(),
                reading_time: record.reading_time,
            },
        }
    }
}

impl From<SnapshotRecord> for ArticleRecord {
    fn from(record: SnapshotRecord) -> Self {
        Self {
            tags: split_tags(&record.metadata.tags),
            id: record.id,
            slug: record.slug,
            title: record.title,
            date: record.metadata.date,
            overview: record.metadata.overview,
            reading_time: record.metadata.reading_time.max(1),
            color: record.color,
            content: record.content,
        }
    }
}

/// The ordered article collection queries run against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    pub articles: Vec<ArticleRecord>,
}

impl SearchIndex {
    pub fn new(articles: Vec<ArticleRecord>) -> Self {
        Self { articles }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Find an article by slug
    pub fn find_by_slug(&self, slug: &str) -> Option<&ArticleRecord> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    /// The first `n` articles in stored order (newest first after a build)
    pub fn recent(&self, n: usize) -> &[ArticleRecord] {
        &self.articles[..n.min(self.articles.len())]
    }

    /// Group articles by `YYYY-MM`, newest month first.
    ///
    /// Articles whose date has no month prefix are left out.
    pub fn by_month(&self) -> Vec<(String, Vec<&ArticleRecord>)> {
        let mut months: BTreeMap<&str, Vec<&ArticleRecord>> = BTreeMap::new();
        for article in &self.articles {
            if let Some(month) = article.month() {
                months.entry(month).or_default().push(article);
            }
        }
        months
            .into_iter()
            .rev()
            .map(|(month, articles)| (month.to_string(), articles))
            .collect()
    }

    /// Convert to the on-disk representation, blanking bodies.
    pub fn to_snapshot(&self) -> Vec<SnapshotRecord> {
        self.articles.iter().map(SnapshotRecord::from).collect()
    }
}

impl From<Vec<SnapshotRecord>> for SearchIndex {
    fn from(records: Vec<SnapshotRecord>) -> Self {
        Self::new(records.into_iter().map(ArticleRecord::from).collect())
    }
}

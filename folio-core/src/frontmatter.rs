//! Front matter parsing from article files.

use crate::models::Frontmatter;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Unterminated front matter block")]
    Unterminated,

    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();
static OPENING_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)^\x{FEFF}?---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n(.*))?\z")
            .expect("front matter regex is valid")
    })
}

fn opening_regex() -> &'static Regex {
    OPENING_REGEX
        .get_or_init(|| Regex::new(r"^\x{FEFF}?---[ \t]*\r?\n").expect("opening regex is valid"))
}

/// Split a file into its front matter and body.
///
/// Returns a tuple of (frontmatter, body). If the file has no front matter
/// block, the default (all fields absent) is returned with the full content
/// as body; required fields are checked later by the article parser.
///
/// # Example
///
/// ```
/// use folio_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: My Post\ndate: 2025-01-01\ntags: Rust, CLI\n---\n# Hello World\n";
///
/// let (fm, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(fm.title.as_deref(), Some("My Post"));
/// assert_eq!(fm.date.as_deref(), Some("2025-01-01"));
/// assert!(body.trim().starts_with("# Hello World"));
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(Frontmatter, String), FrontmatterError> {
    let Some(captures) = frontmatter_regex().captures(content) else {
        if opening_regex().is_match(content) {
            return Err(FrontmatterError::Unterminated);
        }
        return Ok((Frontmatter::default(), content.to_string()));
    };

    let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let body = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

    // An empty block is well-formed; serde_yaml rejects an empty document.
    let frontmatter = if yaml.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    Ok((frontmatter, body.to_string()))
}

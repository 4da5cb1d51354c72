//! Article slugs and URL-safe tag names.

use regex::Regex;
use std::path::{Component, Path};
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// File extensions recognized as articles
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Derive an article slug from its path relative to the content root.
///
/// Separators become `/` and the `.md`/`.mdx` extension is dropped; nothing
/// else is rewritten, so the slug is a pure function of the relative path.
///
/// # Examples
///
/// ```
/// use folio_core::slug::path_slug;
/// use std::path::Path;
///
/// let root = Path::new("posts");
/// assert_eq!(path_slug(root, Path::new("posts/frontend/next-intro.mdx")), "frontend/next-intro");
/// assert_eq!(path_slug(root, Path::new("posts/hello.md")), "hello");
/// ```
pub fn path_slug(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let joined = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    strip_content_extension(&joined).to_string()
}

/// Resolve the slug for an article: the front matter override when present,
/// otherwise the path-derived slug.
pub fn resolve_slug(slug_override: Option<&str>, root: &Path, path: &Path) -> String {
    match slug_override.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => path_slug(root, path),
    }
}

fn strip_content_extension(name: &str) -> &str {
    for ext in CONTENT_EXTENSIONS {
        if let Some(stem) = name
            .strip_suffix(ext)
            .and_then(|rest| rest.strip_suffix('.'))
        {
            return stem;
        }
    }
    name
}

static HYPHEN_RUNS: OnceLock<Regex> = OnceLock::new();

/// Convert a string to a URL-safe slug
///
/// Rules:
/// - Lowercase
/// - Replace whitespace with hyphens
/// - Remove special characters (except hyphens)
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use folio_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Node.js"), "nodejs");
/// assert_eq!(slugify("浏览器"), "浏览器");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();

    let cleaned = lowercased
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_whitespace() || c == '_' {
                Some("-")
            } else if c.is_ascii_alphanumeric() || c == '-' || c.is_alphabetic() {
                Some(g)
            } else {
                None
            }
        })
        .collect::<String>();

    let re = HYPHEN_RUNS.get_or_init(|| Regex::new(r"-+").expect("hyphen regex is valid"));
    let collapsed = re.replace_all(&cleaned, "-");

    collapsed.trim_matches('-').to_string()
}

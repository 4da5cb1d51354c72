//! Free-text and tag queries over a [`SearchIndex`].
//!
//! Matching is plain case-insensitive substring or exact-tag comparison.
//! There is no ranking: hits come back in the index's stored order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::models::{ArticleRecord, SearchIndex};

/// Field(s) a query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    All,
    Title,
    Tag,
    Content,
}

impl SearchMode {
    /// Lenient parse for request parameters: anything unrecognized, or no
    /// value at all, means [`SearchMode::All`].
    pub fn from_param(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::All => "all",
            SearchMode::Title => "title",
            SearchMode::Tag => "tag",
            SearchMode::Content => "content",
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(SearchMode::All),
            "title" => Ok(SearchMode::Title),
            "tag" | "tags" => Ok(SearchMode::Tag),
            "content" => Ok(SearchMode::Content),
            other => Err(format!("unknown search mode '{}'", other)),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule selected the results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The query named a known tag, so the requested mode was overridden
    ExactTag,
    Title,
    Content,
    Tag,
    All,
}

/// Fields of one record that contain the query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchedFields {
    pub title: bool,
    pub overview: bool,
    pub content: bool,
    pub tags: bool,
}

#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub article: &'a ArticleRecord,
    pub matched: MatchedFields,
}

#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    pub strategy: Strategy,
    pub hits: Vec<SearchHit<'a>>,
}

impl<'a> SearchResults<'a> {
    fn empty(strategy: Strategy) -> Self {
        Self {
            strategy,
            hits: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn articles(&self) -> impl Iterator<Item = &'a ArticleRecord> + '_ {
        self.hits.iter().map(|hit| hit.article)
    }
}

/// Run `query` against `index`.
///
/// Rules, in order:
/// 1. An empty (or all-whitespace) query matches nothing.
/// 2. A query equal, ignoring case, to a tag used anywhere in the index
///    returns the articles carrying that tag, whatever `mode` says.
/// 3. `Title`: title contains the query.
/// 4. `Content`: overview or body contains the query. Bodies are blank in
///    loaded snapshots, so at serve time this is an overview search.
/// 5. `Tag`: some tag equals the query, ignoring case.
/// 6. `All`: title or overview contains the query. Tags are not
///    substring-matched here.
///
/// Comparisons ignore case; the query is trimmed first.
pub fn search<'a>(index: &'a SearchIndex, query: &str, mode: SearchMode) -> SearchResults<'a> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchResults::empty(Strategy::All);
    }

    let strategy = if known_tags(index).contains(needle.as_str()) {
        Strategy::ExactTag
    } else {
        match mode {
            SearchMode::Title => Strategy::Title,
            SearchMode::Content => Strategy::Content,
            SearchMode::Tag => Strategy::Tag,
            SearchMode::All => Strategy::All,
        }
    };

    let hits = index
        .articles
        .iter()
        .filter_map(|article| {
            let matched = match_fields(article, &needle);
            let selected = match strategy {
                Strategy::ExactTag | Strategy::Tag => matched.tags,
                Strategy::Title => matched.title,
                Strategy::Content => matched.overview || matched.content,
                Strategy::All => matched.title || matched.overview,
            };
            selected.then_some(SearchHit { article, matched })
        })
        .collect();

    SearchResults { strategy, hits }
}

fn known_tags(index: &SearchIndex) -> HashSet<String> {
    index
        .articles
        .iter()
        .flat_map(|a| a.tags.iter())
        .map(|t| t.to_lowercase())
        .collect()
}

fn match_fields(article: &ArticleRecord, needle: &str) -> MatchedFields {
    MatchedFields {
        title: contains_ci(&article.title, needle),
        overview: contains_ci(&article.overview, needle),
        content: contains_ci(&article.content, needle),
        tags: article.tags.iter().any(|t| t.to_lowercase() == needle),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(slug: &str, title: &str, tags: &[&str], overview: &str) -> ArticleRecord {
        ArticleRecord {
            id: slug.into(),
            slug: slug.into(),
            title: title.into(),
            date: String::new(),
            overview: overview.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reading_time: 1,
            color: String::new(),
            content: String::new(),
        }
    }

    fn slugs<'a>(results: &SearchResults<'a>) -> Vec<&'a str> {
        results.articles().map(|a| a.slug.as_str()).collect()
    }

    fn corpus() -> SearchIndex {
        SearchIndex::new(vec![
            article("a", "Learning Next.js", &["Next", "React"], "intro"),
            article("b", "CSS Tricks", &["CSS"], "flex and grid"),
        ])
    }

    #[test]
    fn test_end_to_end_queries() {
        let index = corpus();

        let css = search(&index, "css", SearchMode::All);
        assert_eq!(slugs(&css), vec!["b"]);
        assert_eq!(css.strategy, Strategy::ExactTag);

        let react = search(&index, "React", SearchMode::All);
        assert_eq!(slugs(&react), vec!["a"]);
        assert_eq!(react.strategy, Strategy::ExactTag);

        let grid = search(&index, "grid", SearchMode::Content);
        assert_eq!(slugs(&grid), vec!["b"]);
        assert!(grid.hits[0].matched.overview);

        assert!(search(&index, "python", SearchMode::All).is_empty());
    }

    #[test]
    fn test_exact_tag_beats_substring_title() {
        let index = SearchIndex::new(vec![
            article("reactive", "Reactive Streams", &["Rx"], ""),
            article("hooks", "Hooks in depth", &["React"], ""),
        ]);

        let results = search(&index, "React", SearchMode::All);
        assert_eq!(results.strategy, Strategy::ExactTag);
        assert_eq!(slugs(&results), vec!["hooks"]);

        // Without a matching tag the title substring rule applies.
        let results = search(&index, "reac", SearchMode::All);
        assert_eq!(results.strategy, Strategy::All);
        assert_eq!(slugs(&results), vec!["reactive"]);
    }

    #[test]
    fn test_exact_tag_overrides_requested_mode() {
        let index = corpus();
        for mode in [SearchMode::Title, SearchMode::Content, SearchMode::Tag] {
            let results = search(&index, "next", mode);
            assert_eq!(results.strategy, Strategy::ExactTag);
            assert_eq!(slugs(&results), vec!["a"]);
        }
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let index = corpus();
        for mode in [
            SearchMode::All,
            SearchMode::Title,
            SearchMode::Tag,
            SearchMode::Content,
        ] {
            assert!(search(&index, "", mode).is_empty());
            assert!(search(&index, "   ", mode).is_empty());
        }
    }

    #[test]
    fn test_title_mode() {
        let index = corpus();
        assert_eq!(slugs(&search(&index, "tricks", SearchMode::Title)), vec!["b"]);
        assert!(search(&index, "intro", SearchMode::Title).is_empty());
    }

    #[test]
    fn test_all_mode_ignores_tag_substrings() {
        let index = corpus();
        // "rea" is a substring of the React tag but not of any title/overview.
        assert!(search(&index, "rea", SearchMode::All).is_empty());
        assert_eq!(slugs(&search(&index, "INTRO", SearchMode::All)), vec!["a"]);
    }

    #[test]
    fn test_tag_mode_requires_whole_tag() {
        let index = corpus();
        assert!(search(&index, "Reac", SearchMode::Tag).is_empty());
    }

    #[test]
    fn test_content_mode_sees_bodies_before_blanking() {
        let mut index = corpus();
        index.articles[0].content = "We talk about hydration here".into();

        let results = search(&index, "hydration", SearchMode::Content);
        assert_eq!(slugs(&results), vec!["a"]);
        assert!(results.hits[0].matched.content);
        assert!(!results.hits[0].matched.overview);

        // Default mode does not look at bodies.
        assert!(search(&index, "hydration", SearchMode::All).is_empty());
    }

    #[test]
    fn test_results_keep_index_order() {
        let index = SearchIndex::new(vec![
            article("z", "Rust one", &[], ""),
            article("a", "Rust two", &[], ""),
            article("m", "Rust three", &[], ""),
        ]);
        assert_eq!(
            slugs(&search(&index, "rust", SearchMode::Title)),
            vec!["z", "a", "m"]
        );
    }

    #[test]
    fn test_non_ascii_tags() {
        let index = SearchIndex::new(vec![article("b", "Browsers", &["浏览器"], "")]);
        let results = search(&index, "浏览器", SearchMode::All);
        assert_eq!(results.strategy, Strategy::ExactTag);
        assert_eq!(slugs(&results), vec!["b"]);
    }

    #[test]
    fn test_mode_parsing_is_lenient() {
        assert_eq!(SearchMode::from_param(Some("title")), SearchMode::Title);
        assert_eq!(SearchMode::from_param(Some("TAG")), SearchMode::Tag);
        assert_eq!(SearchMode::from_param(Some("content")), SearchMode::Content);
        assert_eq!(SearchMode::from_param(Some("bogus")), SearchMode::All);
        assert_eq!(SearchMode::from_param(None), SearchMode::All);
    }
}

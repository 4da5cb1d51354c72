//! Tag catalog derived from an index.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::Config;
use crate::models::SearchIndex;
use crate::slug::slugify;

/// One distinct tag and how often it is used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    pub name: String,
    pub slug: String,
    pub count: usize,
    pub color: String,
}

/// Distinct tags in first-seen order.
///
/// Tags that differ only by case are one entry, named by their first
/// spelling in the index.
pub fn tag_catalog(index: &SearchIndex, config: &Config) -> Vec<TagSummary> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut summaries: Vec<TagSummary> = Vec::new();

    for tag in index.articles.iter().flat_map(|a| a.tags.iter()) {
        let key = tag.to_lowercase();
        match positions.get(&key) {
            Some(&pos) => summaries[pos].count += 1,
            None => {
                positions.insert(key, summaries.len());
                summaries.push(TagSummary {
                    name: tag.clone(),
                    slug: slugify(tag),
                    count: 1,
                    color: config.tag_color(tag).to_string(),
                });
            }
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleRecord, DEFAULT_TAG_COLOR};

    fn tagged(slug: &str, tags: &[&str]) -> ArticleRecord {
        ArticleRecord {
            id: slug.into(),
            slug: slug.into(),
            title: slug.into(),
            date: String::new(),
            overview: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reading_time: 1,
            color: String::new(),
            content: String::new(),
        }
    }

    #[test]
    fn test_first_seen_order_and_counts() {
        let index = SearchIndex::new(vec![
            tagged("a", &["Next", "React"]),
            tagged("b", &["CSS", "react"]),
            tagged("c", &["Next"]),
        ]);
        let catalog = tag_catalog(&index, &Config::default());

        let names: Vec<(&str, usize)> = catalog
            .iter()
            .map(|t| (t.name.as_str(), t.count))
            .collect();
        assert_eq!(names, vec![("Next", 2), ("React", 2), ("CSS", 1)]);
        assert_eq!(catalog[0].color, "#8256d5");
        assert_eq!(catalog[0].slug, "next");
    }

    #[test]
    fn test_unknown_tag_gets_default_color() {
        let index = SearchIndex::new(vec![tagged("a", &["Type Theory"])]);
        let catalog = tag_catalog(&index, &Config::default());
        assert_eq!(catalog[0].color, DEFAULT_TAG_COLOR);
        assert_eq!(catalog[0].slug, "type-theory");
    }

    #[test]
    fn test_empty_index() {
        assert!(tag_catalog(&SearchIndex::default(), &Config::default()).is_empty());
    }
}

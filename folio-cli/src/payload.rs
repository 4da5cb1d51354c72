//! JSON shapes printed by `--json` commands.

use chrono::NaiveDate;
use folio_core::{ArticleRecord, MatchedFields, SearchHit, TagSummary};
use serde::Serialize;

pub const SCHEMA_VERSION: &str = "folio-v1";

/// Standard envelope for machine-consumable output.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub schema_version: &'static str,
    pub kind: &'static str,
    pub data: T,
}

pub fn envelope<T>(kind: &'static str, data: T) -> Envelope<T> {
    Envelope {
        schema_version: SCHEMA_VERSION,
        kind,
        data,
    }
}

#[derive(Serialize)]
pub struct ArticleData {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub date: String,
    pub overview: String,
    pub tags: Vec<String>,
    pub reading_time: u32,
    pub color: String,
}

#[derive(Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub article: ArticleData,
    pub matched: MatchedFields,
}

#[derive(Serialize)]
pub struct SearchData {
    pub query: String,
    pub mode: String,
    pub strategy: folio_core::Strategy,
    pub limit: usize,
    pub total: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Serialize)]
pub struct TagsData {
    pub total: usize,
    pub tags: Vec<TagSummary>,
}

pub fn article_to_payload(article: &ArticleRecord) -> ArticleData {
    ArticleData {
        id: article.id.clone(),
        slug: article.slug.clone(),
        title: article.title.clone(),
        date: article.date.clone(),
        overview: article.overview.clone(),
        tags: article.tags.clone(),
        reading_time: article.reading_time,
        color: article.color.clone(),
    }
}

pub fn hit_to_payload(hit: &SearchHit<'_>) -> SearchResult {
    SearchResult {
        article: article_to_payload(hit.article),
        matched: hit.matched,
    }
}

/// Human-readable form of a `YYYY-MM-DD` date; anything else is shown as is.
pub fn display_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

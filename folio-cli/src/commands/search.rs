//! Search command implementation

use super::load_config;
use crate::payload;
use anyhow::Result;
use folio_core::{search, IndexCache, SearchHit, SearchMode};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub mode: SearchMode,
    pub limit: usize,
    pub json: bool,
}

/// Search the built snapshot
pub fn search_articles(config_path: &Path, query: &str, opts: SearchOptions) -> Result<()> {
    let config = load_config(config_path)?;
    let cache = IndexCache::new(config.snapshot_path());
    let index = cache.get();

    let results = search(&index, query, opts.mode);

    if opts.json {
        let payload = payload::envelope(
            "search.results",
            payload::SearchData {
                query: query.to_string(),
                mode: opts.mode.to_string(),
                strategy: results.strategy,
                limit: opts.limit,
                total: results.len(),
                results: results
                    .hits
                    .iter()
                    .take(opts.limit)
                    .map(payload::hit_to_payload)
                    .collect(),
            },
        );
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }

    println!("\n🔍 Found {} results for '{}':\n", results.len(), query);

    for hit in results.hits.iter().take(opts.limit) {
        print_search_result(hit);
    }

    if results.len() > opts.limit {
        println!("\n  ... and {} more results", results.len() - opts.limit);
    }

    Ok(())
}

fn print_search_result(hit: &SearchHit<'_>) {
    // [CSS, Layout] CSS Tricks
    //   css-tricks · Mar 1, 2024 · 3 min read
    //   flex and grid
    let article = hit.article;
    println!("[{}] {}", article.tags.join(", "), article.title);

    let mut meta = vec![article.slug.clone()];
    if !article.date.is_empty() {
        meta.push(payload::display_date(&article.date));
    }
    meta.push(format!("{} min read", article.reading_time));
    println!("  {}", meta.join(" · "));

    if !article.overview.is_empty() {
        println!("  {}", article.overview);
    }
    println!();
}

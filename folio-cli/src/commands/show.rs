//! Fetch a single article from the snapshot.

use super::load_config;
use crate::payload;
use anyhow::{Context, Result};
use folio_core::IndexCache;
use std::path::Path;

pub fn show_article(config_path: &Path, slug: &str, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let index = IndexCache::new(config.snapshot_path()).get();

    let slug = slug.trim().trim_matches('/');
    let article = index
        .find_by_slug(slug)
        .with_context(|| format!("Article '{}' not found", slug))?;

    if json {
        let payload = payload::envelope("article", payload::article_to_payload(article));
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}", article.title);
    println!("  slug:    {}", article.slug);
    if !article.date.is_empty() {
        println!("  date:    {}", payload::display_date(&article.date));
    }
    println!("  tags:    {}", article.tags.join(", "));
    println!("  reading: {} min", article.reading_time);
    if !article.overview.is_empty() {
        println!();
        println!("{}", article.overview);
    }

    Ok(())
}

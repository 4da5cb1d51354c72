//! List the tags used across the snapshot.

use super::load_config;
use crate::payload;
use anyhow::Result;
use folio_core::{tag_catalog, IndexCache};
use std::path::Path;

pub fn list_tags(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let index = IndexCache::new(config.snapshot_path()).get();
    let tags = tag_catalog(&index, &config);

    if json {
        let payload = payload::envelope(
            "tags",
            payload::TagsData {
                total: tags.len(),
                tags,
            },
        );
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if tags.is_empty() {
        println!("No tags found");
        return Ok(());
    }

    for tag in &tags {
        println!("{:<20} {:>3}  {}", tag.name, tag.count, tag.color);
    }

    Ok(())
}

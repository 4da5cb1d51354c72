//! Build command implementation.

use super::load_config;
use anyhow::{Context, Result};
use folio_core::IndexBuilder;
use std::path::{Path, PathBuf};

/// Scan the content root and write the search snapshot.
///
/// Skipped articles are reported but do not fail the build. A missing
/// content root does.
pub fn build_index(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(output) = output {
        let output = std::env::current_dir()
            .context("Failed to resolve current directory")?
            .join(output);
        config.set_snapshot_path(output);
    }

    if let Some(title) = &config.site.title {
        tracing::info!("Building search index for {}", title);
    }

    let report = IndexBuilder::new(config)
        .build()
        .context("Failed to build search index")?;

    println!(
        "✅ Indexed {} articles ({} skipped)",
        report.index.len(),
        report.skipped.len()
    );
    if let Some(path) = &report.snapshot_path {
        println!("   Snapshot: {}", path.display());
    }
    for skipped in &report.skipped {
        println!("   ⚠️  {}: {}", skipped.path.display(), skipped.reason);
    }

    Ok(())
}

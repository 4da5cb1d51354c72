//! CLI command implementations.

pub mod build;
pub mod search;
pub mod serve;
pub mod show;
pub mod tags;

pub use build::build_index;
pub use search::{search_articles, SearchOptions};
pub use serve::serve;
pub use show::show_article;
pub use tags::list_tags;

use anyhow::{Context, Result};
use folio_core::Config;
use std::path::Path;

/// Load `folio.yml`, or the built-in defaults when it does not exist.
pub(crate) fn load_config(config_path: &Path) -> Result<Config> {
    tracing::debug!("Loading config from {:?}", config_path);
    Config::from_file_or_default(config_path).context("Failed to load configuration")
}

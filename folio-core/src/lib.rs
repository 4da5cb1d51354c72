//! # folio-core
//!
//! Core library for the folio blog search pipeline.
//!
//! This crate scans a directory of markdown articles, parses their front
//! matter into [`ArticleRecord`]s, persists a body-free snapshot, and answers
//! title, tag, and overview queries against it.

pub mod builder;
pub mod config;
pub mod frontmatter;
pub mod loader;
pub mod models;
pub mod parser;
pub mod query;
pub mod scanner;
pub mod slug;
pub mod tags;

pub use builder::{BuildError, BuildReport, IndexBuilder};
pub use config::Config;
pub use loader::{load_snapshot, IndexCache, LoadError};
pub use models::{ArticleRecord, Frontmatter, SearchIndex, SnapshotRecord};
pub use query::{search, MatchedFields, SearchHit, SearchMode, SearchResults, Strategy};
pub use slug::slugify;
pub use tags::{tag_catalog, TagSummary};

//! Configuration parsing and management.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::DEFAULT_TAG_COLOR;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Main configuration struct matching the folio.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub build: BuildConfig,

    /// Regexes matched against content-relative paths
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default = "default_tag_colors")]
    pub tag_colors: HashMap<String, String>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_content_dir")]
    pub content: PathBuf,

    #[serde(default = "default_snapshot_path")]
    pub snapshot: PathBuf,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("posts")
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("public/search-index.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout for the search API
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    8000
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Skip articles without a `tags` field instead of indexing them untagged
    #[serde(default = "default_true")]
    pub require_tags: bool,
}

fn default_true() -> bool {
    true
}

fn default_tag_colors() -> HashMap<String, String> {
    [
        ("JavaScript", "#f0db4f"),
        ("React", "#58c4dc"),
        ("Next", "#8256d5"),
        ("Vue", "#41b883"),
        ("浏览器", "#4a90e2"),
        ("Tailwind", "#38b2ac"),
        ("HTML", "#e44d26"),
        ("CSS", "#264de4"),
    ]
    .into_iter()
    .map(|(tag, color)| (tag.to_string(), color.to_string()))
    .collect()
}

impl Default for Config {
    /// Built-in defaults with the standard tag palette, rooted at the
    /// current directory.
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            paths: PathsConfig::default(),
            server: ServerConfig::default(),
            build: BuildConfig::default(),
            ignore_patterns: Vec::new(),
            tag_colors: default_tag_colors(),
            config_path: None,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: default_content_dir(),
            snapshot: default_snapshot_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            require_tags: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;
        config.compile_ignore_patterns()?;

        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Load the file when it exists, otherwise fall back to defaults.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {:?}; using defaults", path);
            Ok(Self::default())
        }
    }

    /// Content root, resolved relative to the config file
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content)
    }

    /// Snapshot file, resolved relative to the config file
    pub fn snapshot_path(&self) -> PathBuf {
        self.resolve_path(&self.paths.snapshot)
    }

    /// Override the snapshot location (e.g. `folio build --output`)
    pub fn set_snapshot_path(&mut self, path: PathBuf) {
        self.paths.snapshot = path;
    }

    /// Color for a tag, falling back to the accent color
    pub fn tag_color(&self, tag: &str) -> &str {
        self.tag_colors
            .get(tag)
            .map(String::as_str)
            .unwrap_or(DEFAULT_TAG_COLOR)
    }

    /// Compiled `ignore_patterns`
    pub fn compile_ignore_patterns(&self) -> Result<Vec<Regex>, ConfigError> {
        self.ignore_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.config_path.as_ref().and_then(|p| p.parent()) {
            parent.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

//! Site configuration.
//!
//! Configuration is a flat JSON object of string values, normally
//! `config.json` in the project directory:
//!
//! ```json
//! {
//!   "pagesPath": "pages",
//!   "resourcesPath": "resources",
//!   "buildPath": "output",
//!   "mainFile": "main.html",
//!   "indexFile": "index.md",
//!   "404File": "404.md",
//!   "title": "My Site",
//!   "base": "https://example.com/",
//!   "pageOrder": "listing"
//! }
//! ```
//!
//! Paths are relative to the project directory. `pageOrder` is optional.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::tree::PageOrder;

/// Configuration key names.
pub mod keys {
    pub const PAGES_PATH: &str = "pagesPath";
    pub const RESOURCES_PATH: &str = "resourcesPath";
    pub const BUILD_PATH: &str = "buildPath";
    pub const MAIN_FILE: &str = "mainFile";
    pub const INDEX_FILE: &str = "indexFile";
    pub const NOT_FOUND_FILE: &str = "404File";
    pub const TITLE: &str = "title";
    pub const BASE: &str = "base";
    pub const PAGE_ORDER: &str = "pageOrder";
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {path} is not a JSON object of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing config value '{0}'")]
    Missing(String),

    #[error("Invalid value '{value}' for config '{key}'")]
    InvalidValue { key: String, value: String },
}

/// Raw configuration values, as read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ConfigValues(HashMap<String, String>);

impl ConfigValues {
    /// Load values from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Look up a required value.
    pub fn get(&self, key: &str) -> Result<&str, ConfigError> {
        self.0
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    /// Look up an optional value.
    pub fn get_optional(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Resolved configuration for a site build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Page sources
    pub pages_dir: PathBuf,
    /// Resources directory, copied verbatim
    pub resources_dir: PathBuf,
    /// Where the resources directory is copied to
    pub resources_output_dir: PathBuf,
    /// Build output root
    pub build_dir: PathBuf,
    /// Site template
    pub main_file: PathBuf,
    pub index_file: PathBuf,
    pub not_found_file: PathBuf,
    pub title: String,
    /// Base URL of the deployed site
    pub base: String,
    pub page_order: PageOrder,
}

impl SiteConfig {
    /// Resolve `values` against the project directory.
    pub fn from_values(values: &ConfigValues, project_dir: &Path) -> Result<Self, ConfigError> {
        let path = |key: &str| values.get(key).map(|value| project_dir.join(value));

        let build_dir = path(keys::BUILD_PATH)?;
        let resources = values.get(keys::RESOURCES_PATH)?;

        let page_order = match values.get_optional(keys::PAGE_ORDER) {
            Some(value) => value.parse::<PageOrder>().map_err(|value| ConfigError::InvalidValue {
                key: keys::PAGE_ORDER.to_string(),
                value,
            })?,
            None => PageOrder::default(),
        };

        Ok(Self {
            pages_dir: path(keys::PAGES_PATH)?,
            resources_dir: project_dir.join(resources),
            resources_output_dir: build_dir.join(resources),
            build_dir,
            main_file: path(keys::MAIN_FILE)?,
            index_file: path(keys::INDEX_FILE)?,
            not_found_file: path(keys::NOT_FOUND_FILE)?,
            title: values.get(keys::TITLE)?.to_string(),
            base: values.get(keys::BASE)?.to_string(),
            page_order,
        })
    }

    /// Variables available to `{{var:...}}` markers.
    pub fn variables(&self) -> HashMap<String, String> {
        HashMap::from([
            (keys::TITLE.to_string(), self.title.clone()),
            (keys::BASE.to_string(), self.base.clone()),
        ])
    }
}

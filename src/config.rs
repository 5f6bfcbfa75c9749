// projectinfo/src/config.rs
//! Run configuration. Defaults live here; a TOML file and CLI flags layer on top.

use serde::{
    Deserialize,
    Serialize
};
use std::{
    fs,
    path::Path
};
use crate::error::ConfigError;

/// Default soft cap on estimated tokens per emitted chunk.
pub const DEFAULT_MAX_TOKENS_PER_CHUNK: usize = 250_000;

/// Ignore files read from the scanned root, in order.
pub const DEFAULT_IGNORE_FILES: [&str; 2] = [".ignore", ".gitignore"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_tokens_per_chunk: usize,
    /// Relative entries resolve against the scanned root.
    pub ignore_files: Vec<String>,
    /// Look up per-file and repository-wide contributors through git.
    pub contributors: bool,
    pub include_source: bool,
    pub include_docs: bool,
    /// Strip redundant whitespace from file contents before chunking.
    pub compact: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_tokens_per_chunk: DEFAULT_MAX_TOKENS_PER_CHUNK,
            ignore_files: DEFAULT_IGNORE_FILES.iter().map(|s| (*s).to_string()).collect(),
            contributors: true,
            include_source: true,
            include_docs: true,
            compact: false,
        }
    }
}

impl Config {
    /// Load a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens_per_chunk == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        if !self.include_source && !self.include_docs {
            return Err(ConfigError::NothingIncluded);
        }
        Ok(())
    }
}

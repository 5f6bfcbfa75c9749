// projectinfo/src/error.rs
//! Error types for the library surface. The CLI wraps these in `anyhow`.

use std::{
    io,
    path::PathBuf
};
use thiserror::Error;

/// Traversal failures that stop a collection pass.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Project name resolution failures.
#[derive(Error, Debug)]
pub enum NameError {
    #[error("no recognized manifest with a project name in {}", .0.display())]
    NotFound(PathBuf),

    #[error("{manifest}: no project name declared")]
    Missing { manifest: &'static str },

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("parsing {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures talking to git or reading its configuration.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run git in {}: {source}", dir.display())]
    Spawn {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("git exited with {status} in {}: {stderr}", dir.display())]
    Failed {
        dir: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("reading {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no remote origin url found in {}", .0.display())]
    NoRemote(PathBuf),
}

#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("serializing chunk {index}: {source}")]
    Serialize {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("max_tokens_per_chunk must be at least 1")]
    ZeroBudget,

    #[error("nothing to emit: both include_source and include_docs are off")]
    NothingIncluded,

    #[error("reading config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// projectinfo/src/lib.rs
#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod config;
pub mod util;

pub mod ignores;
pub mod language;
pub mod normalize;
pub mod compact;
pub mod file_record;
pub mod scan;
pub mod chunker;

pub mod git;
pub mod project_name;
pub mod api_server;
pub mod project;

pub mod commands;

pub use chunker::{chunk_files, estimate_tokens};
pub use config::Config;
pub use file_record::FileRecord;
pub use ignores::IgnoreSet;
pub use normalize::to_valid_text;
pub use project::ProjectInfo;

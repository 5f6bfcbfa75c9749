// projectinfo/src/file_record.rs
//! One admitted file: what it is, how big it is, who touched it.
//!
//! Serialized field names are the wire format of emitted chunks. Empty optional
//! fields are left out.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FileRecord {
    pub path: String,
    pub language: String,
    /// Local mtime, `YYYY-MM-DD HH:MM:SS`. Informational only.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_modified: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contents: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub line_count: usize,
    /// Zero until the chunker fills it in.
    pub token_count: usize,
    /// Most commits first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<String>,
}

impl FileRecord {
    /// First record whose path contains `needle`.
    pub fn find<'a>(files: &'a [FileRecord], needle: &str) -> Option<&'a FileRecord> {
        files.iter().find(|f| f.path.contains(needle))
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(n: &usize) -> bool {
    *n == 0
}

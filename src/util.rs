// projectinfo/src/util.rs

use chrono::{
    DateTime,
    Local
};
use std::{
    fs::Metadata,
    path::Path
};

/// Modified time as local `YYYY-MM-DD HH:MM:SS`. Empty if the platform has no mtime.
pub fn format_mtime(meta: &Metadata) -> String {
    meta.modified()
        .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// `path` relative to `root`, with `/` separators.
pub fn normalize_rel(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

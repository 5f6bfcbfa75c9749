// projectinfo/src/language.rs
//! Extension-based language labels and admission classes.
//!
//! A file is either *source* or *documentation/configuration*, never both, and
//! the class depends only on its name. Collection therefore runs one pass per
//! class (`want_doc_and_config = false`, then `true`).

use std::{
    collections::HashMap,
    path::Path
};
use crate::file_record::FileRecord;

/// Label for anything outside the tables. Never admitted.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Project type when there are no source files.
pub const UNRECOGNIZED_PROJECT: &str = "Unrecognized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdmissionClass {
    Source,
    DocOrConfig,
}

impl AdmissionClass {
    pub fn from_pass(want_doc_and_config: bool) -> Self {
        if want_doc_and_config { Self::DocOrConfig } else { Self::Source }
    }
}

/// Outcome of classifying one path for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub language: &'static str,
    pub admitted: bool,
}

/// Language label and class for a lower-cased extension (without the dot).
pub fn lookup_extension(ext: &str) -> Option<(&'static str, AdmissionClass)> {
    use AdmissionClass::{DocOrConfig, Source};
    let hit = match ext {
        // source
        "c" => ("C", Source),
        "cc" | "cpp" => ("C++", Source),
        "cs" => ("C#", Source),
        "go" => ("Go", Source),
        "h" | "hpp" => ("C/C++ Header", Source),
        "hs" => ("Haskell", Source),
        "java" => ("Java", Source),
        "js" | "jsx" => ("JavaScript", Source),
        "kt" => ("Kotlin", Source),
        "py" => ("Python", Source),
        "rs" => ("Rust", Source),
        "ts" | "tsx" => ("TypeScript", Source),
        "sql" => ("SQL", Source),
        // docs / config
        "adoc" => ("ASCIIDoc", DocOrConfig),
        "md" => ("Markdown", DocOrConfig),
        "properties" => ("Properties", DocOrConfig),
        "rst" => ("reStructuredText", DocOrConfig),
        "txt" => ("Plain text", DocOrConfig),
        "yml" | "yaml" => ("YAML", DocOrConfig),
        _ => return None,
    };
    Some(hit)
}

/// Extension-less names (compared lower-cased) admitted with the docs/config pass.
pub fn lookup_filename(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "copying" | "license" | "notice" | "readme" => Some("Plain text"),
        "makefile" => Some("Makefile"),
        _ => None,
    }
}

/// Classify `path` for one collection pass.
pub fn classify(path: &Path, want_doc_and_config: bool) -> Classification {
    let wanted = AdmissionClass::from_pass(want_doc_and_config);

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            match lookup_extension(&ext) {
                Some((language, class)) => Classification { language, admitted: class == wanted },
                None => Classification { language: UNKNOWN_LANGUAGE, admitted: false },
            }
        }
        None => {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            match lookup_filename(name) {
                Some(language) => Classification {
                    language,
                    admitted: wanted == AdmissionClass::DocOrConfig,
                },
                None => Classification { language: UNKNOWN_LANGUAGE, admitted: false },
            }
        }
    }
}

/// Most frequent language among `files`; ties go to the label seen first.
pub fn detect_project_type(files: &[FileRecord]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for f in files {
        let n = counts.entry(f.language.as_str()).or_insert(0);
        if *n == 0 {
            order.push(f.language.as_str());
        }
        *n += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for lang in order {
        let n = counts[lang];
        if best.map_or(true, |(_, max)| n > max) {
            best = Some((lang, n));
        }
    }
    best.map_or_else(|| UNRECOGNIZED_PROJECT.to_string(), |(lang, _)| lang.to_string())
}

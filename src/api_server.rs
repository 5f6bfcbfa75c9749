// projectinfo/src/api_server.rs
//! Guess whether a tree is an HTTP API server from framework keywords.

use std::{
    fs,
    path::Path
};
use walkdir::WalkDir;
use crate::normalize;

/// Keyword signatures per extension (without the dot). A substring hit on
/// any line of a matching file is enough.
pub fn signatures(ext: &str) -> Option<&'static [&'static str]> {
    let sigs: &'static [&'static str] = match ext {
        "go" => &["ListenAndServe", "HandleFunc", "echo.New()", "gin.Default()", "mux.NewRouter()"],
        "c" => &["#include <mongoose.h>"],
        "cpp" => &["#include <cpprest/http_listener.h>"],
        "hs" => &["Scotty", "Spock"],
        "js" => &["express()", "require('koa')", "fastify()"],
        "ts" => &["@nestjs", "express()", "import 'koa'"],
        "kt" => &["ktor.application"],
        "java" => &["@RestController", "@GetMapping", "@PostMapping"],
        _ => return None,
    };
    Some(sigs)
}

/// True on the first file line containing a signature for its extension.
/// Any walk or read error makes the answer `true`: when unsure, assume a server.
pub fn possibly_api_server(dir: &Path) -> bool {
    for dent in WalkDir::new(dir).sort_by_file_name() {
        let dent = match dent {
            Ok(d) => d,
            Err(e) => {
                tracing::debug!("api scan aborted, assuming server: {e}");
                return true;
            }
        };
        if !dent.file_type().is_file() {
            continue;
        }
        let Some(sigs) = dent.path().extension().and_then(|e| e.to_str()).and_then(signatures) else {
            continue;
        };

        let bytes = match fs::read(dent.path()) {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("api scan cannot read {}, assuming server: {e}", dent.path().display());
                return true;
            }
        };
        let text = normalize::to_valid_text(&bytes);
        if text.lines().any(|line| sigs.iter().any(|s| line.contains(s))) {
            tracing::debug!("api signature found in {}", dent.path().display());
            return true;
        }
    }
    false
}

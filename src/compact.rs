// projectinfo/src/compact.rs
//! Whitespace compaction for file contents headed into token-budgeted chunks.

use std::path::Path;

/// Extensions whose leading indentation carries meaning.
const INDENT_SIGNIFICANT: [&str; 2] = ["py", "hs"];

/// Normalize `\r\n` to `\n`, strip trailing whitespace from every line (and
/// leading whitespace too unless the file is indentation-sensitive), then
/// collapse each run of blank lines into one.
pub fn compact_code(source: &str, path: &Path) -> String {
    let keep_indent = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| INDENT_SIGNIFICANT.contains(&e));

    let normalized = source.replace("\r\n", "\n");
    let mut out: Vec<&str> = Vec::new();
    let mut last_blank = false;

    for line in normalized.split('\n') {
        let line = if keep_indent { line.trim_end() } else { line.trim() };
        if line.is_empty() {
            if last_blank {
                continue;
            }
            last_blank = true;
        } else {
            last_blank = false;
        }
        out.push(line);
    }
    out.join("\n")
}

// projectinfo/src/ignores.rs
//! Ignore patterns: base-name globs and path prefixes merged from ignore files
//! plus a fixed deny-list that is always present.

use globset::{
    GlobBuilder,
    GlobMatcher
};
use std::{
    collections::HashSet,
    fs,
    io,
    path::Path
};

/// Always ignored: VCS metadata, vendored deps, build output, scratch dirs.
pub const BUILTIN_IGNORES: [&str; 9] = [
    "vendor",
    "test",
    "tmp",
    "backup",
    "node_modules",
    "target",
    ".mvn",
    ".gradle",
    ".git",
];

#[derive(Debug, Clone)]
struct Pattern {
    raw: String,
    /// `None` when the pattern is not a valid glob; it still works as a prefix.
    glob: Option<GlobMatcher>,
}

impl Pattern {
    fn new(raw: &str) -> Self {
        let glob = GlobBuilder::new(raw)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map(|g| g.compile_matcher())
            .map_err(|e| tracing::debug!("ignore pattern {raw:?} is not a glob: {e}"))
            .ok();
        Self { raw: raw.to_string(), glob }
    }
}

/// Set of ignore patterns. Membership alone decides skipping; order is irrelevant.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    patterns: Vec<Pattern>,
    seen: HashSet<String>,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl IgnoreSet {
    /// Only the built-in deny-list.
    pub fn builtin() -> Self {
        let mut set = Self { patterns: Vec::new(), seen: HashSet::new() };
        for p in BUILTIN_IGNORES {
            set.insert(p);
        }
        set
    }

    /// Built-ins plus every pattern found in `files`. Relative file names are
    /// resolved against `root`; missing files are skipped without complaint.
    pub fn load<P: AsRef<Path>>(root: &Path, files: &[P]) -> Self {
        let mut set = Self::builtin();
        for file in files {
            let path = root.join(file.as_ref());
            match fs::read_to_string(&path) {
                Ok(text) => set.extend_from_str(&text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::trace!("no ignore file at {}", path.display());
                }
                Err(e) => {
                    tracing::warn!("could not read ignore file {}: {e}", path.display());
                }
            }
        }
        set
    }

    /// Add one pattern per non-blank, non-comment line.
    pub fn extend_from_str(&mut self, text: &str) {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.insert(line);
        }
    }

    /// Add a single pattern. A leading or trailing `/` is dropped, so `/dist`
    /// and `build/` behave like `dist` and `build`.
    pub fn insert(&mut self, pattern: &str) {
        let normalized = pattern.trim_start_matches('/').trim_end_matches('/');
        let normalized = if normalized.is_empty() { pattern } else { normalized };
        if self.seen.insert(normalized.to_string()) {
            self.patterns.push(Pattern::new(normalized));
        }
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.seen.contains(pattern)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.raw.as_str())
    }

    /// True if the base name of `path` matches a pattern as a shell glob, or if
    /// the path starts with `pattern/`. Paths are compared with `/` separators.
    pub fn should_skip(&self, path: &Path) -> bool {
        let base = path.file_name().map(|s| s.to_string_lossy());
        let full = normalize_separators(path);
        let full = full.strip_prefix("./").unwrap_or(&full);

        self.patterns.iter().any(|p| {
            if let (Some(glob), Some(base)) = (&p.glob, &base) {
                if glob.is_match(&**base) {
                    return true;
                }
            }
            full.strip_prefix(p.raw.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

// projectinfo/src/scan.rs
//! File collector: walk a tree, prune ignored paths, classify, read, normalize.

use std::{
    collections::HashMap,
    fs,
    io,
    path::{
        Path,
        PathBuf
    },
};
use walkdir::WalkDir;
use crate::{
    error::ScanError,
    file_record::FileRecord,
    git::ContributorSource,
    ignores::IgnoreSet,
    language,
    normalize,
    util
};

/// Records from one pass. `error` is set when the walk stopped early; `files`
/// then holds everything collected before that point.
#[derive(Debug, Default)]
pub struct Collection {
    pub files: Vec<FileRecord>,
    pub error: Option<ScanError>,
}

impl Collection {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Files if the walk finished, the error otherwise (dropping partial files).
    pub fn into_result(self) -> Result<Vec<FileRecord>, ScanError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.files),
        }
    }
}

/// Walk `root` depth-first in file-name order and build a record for every
/// file admitted by the `want_doc_and_config` pass.
///
/// Ignored directories are pruned with their whole subtree. Per-entry failures
/// (permission denied, unreadable file, failed contributor lookup) are logged
/// and never stop the walk. When `contributors` is given, each file gets the
/// contributor list of its directory; lookups are cached per directory.
pub fn collect_files(
    root: &Path,
    ignores: &IgnoreSet,
    want_doc_and_config: bool,
    contributors: Option<&dyn ContributorSource>,
) -> Collection {
    let mut out = Collection::default();

    if !root.is_dir() {
        out.error = Some(ScanError::NotADirectory(root.to_path_buf()));
        return out;
    }

    let mut contributor_cache: HashMap<PathBuf, Vec<String>> = HashMap::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !ignores.should_skip(Path::new(&util::normalize_rel(root, e.path())))
        });

    for dent in walker {
        let dent = match dent {
            Ok(d) => d,
            Err(e) if e.depth() == 0 => {
                out.error = Some(ScanError::Walk { path: root.to_path_buf(), source: e });
                return out;
            }
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        let path = dent.path();
        tracing::trace!("visiting {}", path.display());

        if dent.file_type().is_dir() {
            continue;
        }
        if dent.path_is_symlink() && !path.is_file() {
            continue;
        }

        let class = language::classify(path, want_doc_and_config);
        if !class.admitted {
            continue;
        }

        let mut record = read_record(path, class.language);

        if let Some(source) = contributors {
            let dir = path.parent().unwrap_or(root).to_path_buf();
            record.contributors = contributor_cache
                .entry(dir)
                .or_insert_with_key(|dir| match source.contributors(dir) {
                    Ok(names) => names,
                    Err(e) => {
                        tracing::warn!("no contributors for {}: {e}", dir.display());
                        Vec::new()
                    }
                })
                .clone();
        }

        out.files.push(record);
    }

    tracing::debug!(
        "collected {} {} file(s) under {}",
        out.files.len(),
        if want_doc_and_config { "doc/config" } else { "source" },
        root.display()
    );
    out
}

/// Lines in `text`: one per `\n`, plus one for a non-empty unterminated tail.
pub fn count_lines(text: &str) -> usize {
    let bytes = text.as_bytes();
    let newlines = memchr::memchr_iter(b'\n', bytes).count();
    let tail = match memchr::memrchr(b'\n', bytes) {
        Some(last) => last + 1 < bytes.len(),
        None => !bytes.is_empty(),
    };
    newlines + usize::from(tail)
}

/// Read, normalize and count the lines of a single file.
pub fn count_lines_in_file(path: &Path) -> io::Result<usize> {
    let bytes = fs::read(path)?;
    Ok(count_lines(&normalize::to_valid_text(&bytes)))
}

/* ----------------------------- helpers ----------------------------- */

fn read_record(path: &Path, language: &str) -> FileRecord {
    let last_modified = match fs::metadata(path) {
        Ok(meta) => util::format_mtime(&meta),
        Err(e) => {
            tracing::warn!("cannot stat {}: {e}", path.display());
            String::new()
        }
    };

    let contents = match fs::read(path) {
        Ok(bytes) => normalize::into_valid_text(bytes),
        Err(e) => {
            tracing::warn!("cannot read {}: {e}", path.display());
            String::new()
        }
    };

    FileRecord {
        path: path.to_string_lossy().into_owned(),
        language: language.to_string(),
        last_modified,
        line_count: count_lines(&contents),
        contents,
        token_count: 0,
        contributors: Vec::new(),
    }
}

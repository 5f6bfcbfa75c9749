// projectinfo/src/git.rs
//! The bits of git we need: contributor lists and the origin URL.
//!
//! Contributors come from the `git` binary through [`ContributorSource`], so
//! callers (and tests) can swap in something that doesn't spawn processes.

use std::{
    fs,
    io::{
        BufRead,
        BufReader
    },
    path::{
        Path,
        PathBuf
    },
    process::{
        Command,
        Stdio
    },
};
use crate::error::GitError;

/// Lists contributor display names for a directory, most commits first.
pub trait ContributorSource {
    fn contributors(&self, dir: &Path) -> Result<Vec<String>, GitError>;
}

/// `git shortlog -sn --all --no-merges -- .`, run with `dir` as working
/// directory, so only commits touching `dir` are counted.
#[derive(Debug, Clone)]
pub struct GitShortlog {
    program: PathBuf,
}

impl Default for GitShortlog {
    fn default() -> Self {
        Self { program: PathBuf::from("git") }
    }
}

impl GitShortlog {
    /// Use a specific git executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }
}

impl ContributorSource for GitShortlog {
    fn contributors(&self, dir: &Path) -> Result<Vec<String>, GitError> {
        let output = Command::new(&self.program)
            .args(["shortlog", "-sn", "--all", "--no-merges", "--", "."])
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn { dir: dir.to_path_buf(), source })?;

        if !output.status.success() {
            return Err(GitError::Failed {
                dir: dir.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().filter_map(parse_contributor).collect())
    }
}

/// Name from one `git shortlog -sn` line (`  42\tAda Lovelace`).
pub fn parse_contributor(line: &str) -> Option<String> {
    let (_, name) = line.split_once('\t')?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// URL of `[remote "origin"]` in a git config file.
pub fn url_from_git_config(config_path: &Path) -> Result<String, GitError> {
    let file = fs::File::open(config_path).map_err(|source| GitError::Config {
        path: config_path.to_path_buf(),
        source,
    })?;

    let mut in_origin = false;
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| GitError::Config {
            path: config_path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();

        if trimmed.starts_with('[') {
            if in_origin {
                break;
            }
            in_origin = trimmed == r#"[remote "origin"]"#;
            continue;
        }
        if !in_origin {
            continue;
        }
        if trimmed.is_empty() {
            break;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            if key.trim() == "url" {
                let url = value.trim();
                if !url.is_empty() {
                    return Ok(url.to_string());
                }
            }
        }
    }
    Err(GitError::NoRemote(config_path.to_path_buf()))
}

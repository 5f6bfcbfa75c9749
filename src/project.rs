// projectinfo/src/project.rs
//! Whole-project view: identity, both file catalogs, contributors, heuristics.

use serde::{
    Deserialize,
    Serialize
};
use std::path::Path;
use crate::{
    api_server,
    chunker,
    compact,
    config::Config,
    error::ChunkError,
    file_record::FileRecord,
    git::{self, ContributorSource},
    ignores::IgnoreSet,
    language,
    project_name,
    scan
};

/// Name used when no manifest declares one.
pub const UNTITLED: &str = "Untitled";

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ProjectInfo {
    pub name: String,
    #[serde(rename = "repositoryURL")]
    pub repository_url: String,
    #[serde(rename = "sourceFiles")]
    pub source_files: Vec<FileRecord>,
    #[serde(rename = "confAndDocFiles")]
    pub conf_and_doc_files: Vec<FileRecord>,
    /// Most common source language, or `Unrecognized`.
    #[serde(rename = "type")]
    pub project_type: String,
    /// Repository-wide contributors joined with `", "`. Not deduplicated.
    pub contributors: String,
    #[serde(rename = "apiServer")]
    pub api_server: bool,
}

impl ProjectInfo {
    /// Gather everything about `dir`. Each step that fails is logged and left
    /// at its default; this never fails as a whole. With `contributors` set,
    /// per-file and repository-wide contributor lists are filled in. With
    /// `cfg.compact`, contents are compacted; `line_count` still describes the
    /// file on disk.
    pub fn scan(dir: &Path, cfg: &Config, contributors: Option<&dyn ContributorSource>) -> Self {
        let name = project_name::read_project_name(dir).unwrap_or_else(|e| {
            tracing::warn!("could not find project name, using {UNTITLED:?}: {e}");
            UNTITLED.to_string()
        });

        let repository_url = git::url_from_git_config(&dir.join(".git").join("config"))
            .unwrap_or_else(|e| {
                tracing::warn!("could not find git url from git config: {e}");
                String::new()
            });

        let ignores = IgnoreSet::load(dir, &cfg.ignore_files);

        let mut source_files = collect_pass(dir, &ignores, false, contributors);
        let mut conf_and_doc_files = collect_pass(dir, &ignores, true, contributors);
        if cfg.compact {
            for f in source_files.iter_mut().chain(conf_and_doc_files.iter_mut()) {
                f.contents = compact::compact_code(&f.contents, Path::new(&f.path));
            }
        }

        let contributors = contributors
            .map(|source| match source.contributors(dir) {
                Ok(names) => names.join(", "),
                Err(e) => {
                    tracing::warn!("could not collect contributor names from git: {e}");
                    String::new()
                }
            })
            .unwrap_or_default();

        let project_type = language::detect_project_type(&source_files);
        let api_server = api_server::possibly_api_server(dir);

        Self {
            name,
            repository_url,
            source_files,
            conf_and_doc_files,
            project_type,
            contributors,
            api_server,
        }
    }

    /// Source files, then documentation/configuration files.
    pub fn all_files(&self) -> impl Iterator<Item = &FileRecord> {
        self.source_files.iter().chain(self.conf_and_doc_files.iter())
    }

    /// Serialize the selected catalogs (source first) into JSON chunks of at
    /// most `max_tokens` estimated tokens. Fills in every `token_count`.
    pub fn chunk(
        &mut self,
        include_source: bool,
        include_docs: bool,
        max_tokens: usize,
    ) -> Result<Vec<String>, ChunkError> {
        let source: &mut [FileRecord] = if include_source { &mut self.source_files } else { &mut [] };
        let docs: &mut [FileRecord] = if include_docs { &mut self.conf_and_doc_files } else { &mut [] };
        chunker::chunk_files(source.iter_mut().chain(docs.iter_mut()), max_tokens)
    }
}

fn collect_pass(
    dir: &Path,
    ignores: &IgnoreSet,
    want_doc_and_config: bool,
    contributors: Option<&dyn ContributorSource>,
) -> Vec<FileRecord> {
    let collected = scan::collect_files(dir, ignores, want_doc_and_config, contributors);
    if let Some(e) = &collected.error {
        let what = if want_doc_and_config { "documentation and config" } else { "source" };
        tracing::warn!("could not collect all {what} files (kept {}): {e}", collected.files.len());
    }
    collected.files
}

// projectinfo/src/commands.rs

use anyhow::{
    Context,
    Result
};
use clap::{
    Parser,
    Subcommand
};
use std::{
    io::{
        self,
        Write
    },
    path::{
        Path,
        PathBuf
    }
};
use tracing_subscriber::EnvFilter;
use crate::{
    config::Config,
    git::{
        ContributorSource,
        GitShortlog
    },
    ignores::IgnoreSet,
    project::ProjectInfo,
    project_name,
    scan
};

#[derive(Parser, Debug)]
#[command(name = "projectinfo", version, about = "Summarize a source repository as token-bounded JSON chunks")]
pub struct Cli {
    /// Print warnings and progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Line count of a file, or of every source file under a directory
    CountLines {
        path: PathBuf,
    },
    /// Scan a directory and print one JSON chunk of file records per line
    Info {
        dir: PathBuf,
        /// Soft cap on estimated tokens per chunk
        #[arg(long, env = "PROJECTINFO_MAX_TOKENS")]
        max_tokens: Option<usize>,
        /// TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Skip git contributor lookups
        #[arg(long)]
        no_contributors: bool,
        /// Only emit source files
        #[arg(long, conflicts_with = "docs_only")]
        source_only: bool,
        /// Only emit documentation and configuration files
        #[arg(long)]
        docs_only: bool,
        /// Trim whitespace and collapse blank lines in file contents
        #[arg(long)]
        compact: bool,
    },
    /// Print the project name declared by the directory's build manifest
    Name {
        dir: PathBuf,
    },
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::CountLines { path } => count_lines(&path),
        Command::Info { dir, max_tokens, config, no_contributors, source_only, docs_only, compact } => {
            let mut cfg = match config {
                Some(path) => Config::from_file(&path)?,
                None => Config::default(),
            };
            if let Some(n) = max_tokens {
                cfg.max_tokens_per_chunk = n;
            }
            if no_contributors {
                cfg.contributors = false;
            }
            if source_only {
                cfg.include_docs = false;
            }
            if docs_only {
                cfg.include_source = false;
            }
            if compact {
                cfg.compact = true;
            }
            cfg.validate()?;
            output_chunks(&dir, &cfg)
        }
        Command::Name { dir } => print_name(&dir),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "projectinfo=debug,warn" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn count_lines(path: &Path) -> Result<()> {
    let count = if path.is_dir() {
        let ignores = IgnoreSet::load(path, &Config::default().ignore_files);
        scan::collect_files(path, &ignores, false, None)
            .into_result()
            .with_context(|| format!("counting lines under {}", path.display()))?
            .iter()
            .map(|f| f.line_count)
            .sum::<usize>()
    } else {
        scan::count_lines_in_file(path)
            .with_context(|| format!("failed to count lines in {}", path.display()))?
    };
    let mut out = io::stdout().lock();
    writeln!(out, "{count}")?;
    Ok(())
}

/// Scan `dir` and write each chunk on its own line.
pub fn output_chunks(dir: &Path, cfg: &Config) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }
    let git = GitShortlog::default();
    let contributors: Option<&dyn ContributorSource> = if cfg.contributors { Some(&git) } else { None };

    let mut project = ProjectInfo::scan(dir, cfg, contributors);
    let chunks = project
        .chunk(cfg.include_source, cfg.include_docs, cfg.max_tokens_per_chunk)
        .context("failed to output project chunks")?;

    let mut out = io::stdout().lock();
    for chunk in &chunks {
        writeln!(out, "{chunk}")?;
    }
    out.flush()?;
    Ok(())
}

fn print_name(dir: &Path) -> Result<()> {
    let name = project_name::read_project_name(dir).context("failed to read project name")?;
    let mut out = io::stdout().lock();
    writeln!(out, "Project name: {name}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_info_flags() {
        let cli = Cli::try_parse_from(["projectinfo", "-v", "info", ".", "--max-tokens", "900", "--docs-only", "--compact"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Info { max_tokens, docs_only, source_only, compact, .. } => {
                assert_eq!(max_tokens, Some(900));
                assert!(docs_only);
                assert!(!source_only);
                assert!(compact);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn source_and_docs_only_conflict() {
        let res = Cli::try_parse_from(["projectinfo", "info", ".", "--source-only", "--docs-only"]);
        assert!(res.is_err());
    }
}

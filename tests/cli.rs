// projectinfo/tests/cli.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("projectinfo").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("PROJECTINFO_MAX_TOKENS");
    cmd
}

fn sample_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("node_modules/dep")).unwrap();
    fs::write(root.join("package.json"), r#"{"name": "widget", "version": "1.0.0"}"#).unwrap();
    fs::write(root.join("index.js"), "const app = express();\napp.listen(3000);\n").unwrap();
    fs::write(root.join("util.js"), "module.exports = {};\n").unwrap();
    fs::write(root.join("node_modules/dep/index.js"), "junk\n").unwrap();
    fs::write(root.join("README.md"), "# widget\n\nA thing.\n").unwrap();
    dir
}

fn parse_lines(stdout: &[u8]) -> Vec<Vec<serde_json::Value>> {
    String::from_utf8(stdout.to_vec())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn name_prints_manifest_name() {
    let dir = sample_project();
    bin()
        .args(["name"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout("Project name: widget\n");
}

#[test]
fn name_fails_without_manifest() {
    let dir = tempfile::tempdir().unwrap();
    bin()
        .arg("name")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read project name"));
}

#[test]
fn count_lines_of_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let f = dir.path().join("x.txt");
    fs::write(&f, "a\nb\nc\n").unwrap();
    bin().arg("count-lines").arg(&f).assert().success().stdout("3\n");
}

#[test]
fn count_lines_of_a_directory_sums_source_files() {
    let dir = sample_project();
    bin().arg("count-lines").arg(dir.path()).assert().success().stdout("3\n");
}

#[test]
fn count_lines_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    bin()
        .arg("count-lines")
        .arg(dir.path().join("missing.rs"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to count lines"));
}

#[test]
fn info_emits_one_json_chunk_per_line() {
    let dir = sample_project();
    let out = bin()
        .args(["info", "--no-contributors"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let chunks = parse_lines(&out);
    assert_eq!(chunks.len(), 1);
    let paths: Vec<&str> = chunks[0].iter().map(|f| f["path"].as_str().unwrap()).collect();
    assert_eq!(paths.len(), 3);
    assert!(paths[0].ends_with("index.js"));
    assert!(paths[1].ends_with("util.js"));
    assert!(paths[2].ends_with("README.md"));
    assert!(paths.iter().all(|p| !p.contains("node_modules")));
    assert_eq!(chunks[0][2]["language"], "Markdown");
}

#[test]
fn info_budget_splits_chunks() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..4 {
        fs::write(dir.path().join(format!("f{i}.rs")), "x".repeat(4000)).unwrap();
    }
    let out = bin()
        .args(["info", "--no-contributors", "--source-only", "--max-tokens", "2500"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let chunks = parse_lines(&out);
    let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 2]);
    assert!(chunks.iter().flatten().all(|f| f["token_count"] == 1000));
}

#[test]
fn info_budget_from_env() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..3 {
        fs::write(dir.path().join(format!("f{i}.go")), "y".repeat(400)).unwrap();
    }
    let out = bin()
        .env("PROJECTINFO_MAX_TOKENS", "100")
        .args(["info", "--no-contributors", "--source-only"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(parse_lines(&out).len(), 3);
}

#[test]
fn info_compact_trims_contents() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.go"), "package main\n\n\n\n   func main() {}   \n").unwrap();
    let out = bin()
        .args(["info", "--no-contributors", "--source-only", "--compact"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let chunks = parse_lines(&out);
    assert_eq!(chunks[0][0]["contents"], "package main\n\nfunc main() {}\n");
    assert_eq!(chunks[0][0]["line_count"], 5);
}

#[test]
fn info_reads_config_file() {
    let dir = sample_project();
    let cfg = dir.path().join("projectinfo.toml");
    fs::write(&cfg, "contributors = false\ninclude_source = false\n").unwrap();
    let out = bin()
        .arg("info")
        .arg(dir.path())
        .arg("--config")
        .arg(&cfg)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let chunks = parse_lines(&out);
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].iter().all(|f| f["language"] == "Markdown"));
}

#[test]
fn info_rejects_zero_budget() {
    let dir = sample_project();
    bin()
        .args(["info", "--max-tokens", "0"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn info_on_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    bin()
        .arg("info")
        .arg(dir.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn info_of_empty_dir_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    bin()
        .args(["info", "--no-contributors"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn verbose_warnings_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.rs"), "fn a() {}\n").unwrap();
    bin()
        .args(["-v", "info", "--no-contributors"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("could not find project name"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    bin().assert().failure().code(2);
}

// projectinfo/src/project_name.rs
//! Project name from whichever build manifest the directory carries.
//!
//! Each manifest format is a [`NameExtractor`]. [`read_project_name`] tries
//! them in priority order and returns the first name found.

use quick_xml::{
    events::Event,
    Reader
};
use regex::Regex;
use std::{
    fs,
    path::{
        Path,
        PathBuf
    },
    sync::OnceLock,
};
use crate::error::NameError;

pub trait NameExtractor {
    /// Manifest this extractor reads, for diagnostics.
    fn manifest(&self) -> &'static str;
    fn try_extract(&self, dir: &Path) -> Result<String, NameError>;
}

/// Extractors in priority order.
pub fn default_extractors() -> Vec<Box<dyn NameExtractor>> {
    vec![
        Box::new(PackageJson),
        Box::new(PomXml),
        Box::new(Gradle),
        Box::new(GoMod),
        Box::new(CargoToml),
        Box::new(SetupPy),
        Box::new(Cabal),
        Box::new(CsProj),
    ]
}

pub fn read_project_name(dir: &Path) -> Result<String, NameError> {
    read_project_name_with(dir, &default_extractors())
}

pub fn read_project_name_with(
    dir: &Path,
    extractors: &[Box<dyn NameExtractor>],
) -> Result<String, NameError> {
    for ex in extractors {
        match ex.try_extract(dir) {
            Ok(name) => {
                tracing::debug!("project name {name:?} from {}", ex.manifest());
                return Ok(name);
            }
            Err(e) => tracing::trace!("{}: {e}", ex.manifest()),
        }
    }
    Err(NameError::NotFound(dir.to_path_buf()))
}

/* ============================== Extractors ============================== */

pub struct PackageJson;

impl NameExtractor for PackageJson {
    fn manifest(&self) -> &'static str {
        "package.json"
    }

    fn try_extract(&self, dir: &Path) -> Result<String, NameError> {
        let path = dir.join("package.json");
        let raw = read_manifest(&path)?;
        let v: serde_json::Value =
            serde_json::from_str(&raw).map_err(|source| NameError::Json { path, source })?;
        v.get("name")
            .and_then(serde_json::Value::as_str)
            .and_then(non_empty)
            .ok_or(NameError::Missing { manifest: self.manifest() })
    }
}

pub struct PomXml;

impl NameExtractor for PomXml {
    fn manifest(&self) -> &'static str {
        "pom.xml"
    }

    fn try_extract(&self, dir: &Path) -> Result<String, NameError> {
        let raw = read_manifest(&dir.join("pom.xml"))?;
        xml_text_at(&raw, &["project", "name"])
            .ok_or(NameError::Missing { manifest: self.manifest() })
    }
}

/// `rootProject.name = '...'` in any of the usual Gradle scripts.
pub struct Gradle;

const GRADLE_FILES: [&str; 4] = [
    "build.gradle",
    "build.gradle.kts",
    "settings.gradle",
    "settings.gradle.kts",
];

impl NameExtractor for Gradle {
    fn manifest(&self) -> &'static str {
        "build.gradle"
    }

    fn try_extract(&self, dir: &Path) -> Result<String, NameError> {
        let mut last_err = NameError::Missing { manifest: self.manifest() };
        for file in GRADLE_FILES {
            let raw = match read_manifest(&dir.join(file)) {
                Ok(raw) => raw,
                Err(e) => {
                    last_err = e;
                    continue;
                }
            };
            let found = raw.lines().map(str::trim).find_map(|line| {
                let rest = line.strip_prefix("rootProject.name")?;
                let (_, value) = rest.split_once('=')?;
                non_empty(value.trim().trim_matches(|c| c == '\'' || c == '"'))
            });
            if let Some(name) = found {
                return Ok(name);
            }
            last_err = NameError::Missing { manifest: file };
        }
        Err(last_err)
    }
}

pub struct GoMod;

impl NameExtractor for GoMod {
    fn manifest(&self) -> &'static str {
        "go.mod"
    }

    fn try_extract(&self, dir: &Path) -> Result<String, NameError> {
        let raw = read_manifest(&dir.join("go.mod"))?;
        raw.lines()
            .find_map(|line| {
                let rest = line.strip_prefix("module ")?;
                let module = rest.split_whitespace().next()?;
                non_empty(module.trim_matches('"'))
            })
            .ok_or(NameError::Missing { manifest: self.manifest() })
    }
}

/// `[package].name`, or a bare top-level `name` key.
pub struct CargoToml;

impl NameExtractor for CargoToml {
    fn manifest(&self) -> &'static str {
        "Cargo.toml"
    }

    fn try_extract(&self, dir: &Path) -> Result<String, NameError> {
        let path = dir.join("Cargo.toml");
        let raw = read_manifest(&path)?;
        let table: toml::Table =
            toml::from_str(&raw).map_err(|source| NameError::Toml { path, source })?;
        table
            .get("package")
            .and_then(|p| p.get("name"))
            .or_else(|| table.get("name"))
            .and_then(toml::Value::as_str)
            .and_then(non_empty)
            .ok_or(NameError::Missing { manifest: self.manifest() })
    }
}

/// `name='...'` / `name="..."` anywhere in `setup.py`.
pub struct SetupPy;

impl NameExtractor for SetupPy {
    fn manifest(&self) -> &'static str {
        "setup.py"
    }

    fn try_extract(&self, dir: &Path) -> Result<String, NameError> {
        static NAME_ARG: OnceLock<Regex> = OnceLock::new();
        let re = NAME_ARG.get_or_init(|| {
            Regex::new(r#"\bname\s*=\s*['"]([^'"]+)['"]"#).expect("static regex")
        });
        let raw = read_manifest(&dir.join("setup.py"))?;
        re.captures(&raw)
            .and_then(|c| non_empty(c[1].trim()))
            .ok_or(NameError::Missing { manifest: self.manifest() })
    }
}

/// `name:` field of the first `*.cabal` file.
pub struct Cabal;

impl NameExtractor for Cabal {
    fn manifest(&self) -> &'static str {
        "*.cabal"
    }

    fn try_extract(&self, dir: &Path) -> Result<String, NameError> {
        let path = first_with_extension(dir, "cabal")
            .ok_or(NameError::Missing { manifest: self.manifest() })?;
        let raw = read_manifest(&path)?;
        raw.lines()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                if key.trim().eq_ignore_ascii_case("name") && !line.starts_with(char::is_whitespace) {
                    non_empty(value.trim())
                } else {
                    None
                }
            })
            .ok_or(NameError::Missing { manifest: self.manifest() })
    }
}

/// First `<AssemblyName>` in a `PropertyGroup` of the first `*.csproj` file.
pub struct CsProj;

impl NameExtractor for CsProj {
    fn manifest(&self) -> &'static str {
        "*.csproj"
    }

    fn try_extract(&self, dir: &Path) -> Result<String, NameError> {
        let path = first_with_extension(dir, "csproj")
            .ok_or(NameError::Missing { manifest: self.manifest() })?;
        let raw = read_manifest(&path)?;
        xml_text_at(&raw, &["Project", "PropertyGroup", "AssemblyName"])
            .ok_or(NameError::Missing { manifest: self.manifest() })
    }
}

/* ============================== Helpers ============================== */

fn read_manifest(path: &Path) -> Result<String, NameError> {
    fs::read_to_string(path).map_err(|source| NameError::Io { path: path.to_path_buf(), source })
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Lexically first regular file in `dir` with extension `ext`.
fn first_with_extension(dir: &Path, ext: &str) -> Option<PathBuf> {
    let mut hits: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == ext))
        .collect();
    hits.sort();
    hits.into_iter().next()
}

/// Trimmed text of the first non-empty element reached by the exact tag path
/// `path` from the document root. Namespace prefixes and attributes are
/// ignored; text and CDATA sections directly inside the element are joined.
fn xml_text_at(xml: &str, path: &[&str]) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<String> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => {
                stack.push(String::from_utf8_lossy(tag.local_name().as_ref()).into_owned());
            }
            Ok(Event::End(_)) => {
                if at_path(&stack, path) {
                    if let Some(found) = non_empty(text.trim()) {
                        return Some(found);
                    }
                    text.clear();
                }
                stack.pop();
            }
            Ok(Event::Text(t)) if at_path(&stack, path) => match t.unescape() {
                Ok(s) => text.push_str(&s),
                Err(e) => {
                    tracing::debug!("bad escape in <{}>: {e}", path.join("><"));
                    return None;
                }
            },
            Ok(Event::CData(c)) if at_path(&stack, path) => {
                text.push_str(&String::from_utf8_lossy(&c));
            }
            Ok(Event::Eof) => return None,
            Err(e) => {
                tracing::debug!("malformed XML at byte {}: {e}", reader.buffer_position());
                return None;
            }
            Ok(_) => {}
        }
    }
}

fn at_path(stack: &[String], path: &[&str]) -> bool {
    stack.len() == path.len() && stack.iter().zip(path).all(|(have, want)| have == want)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_from(file: &str, content: &str) -> Result<String, NameError> {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(file), content).unwrap();
        read_project_name(dir.path())
    }

    #[test]
    fn each_manifest_format() {
        let cases = [
            ("package.json", r#"{"name": "widget"}"#, "widget"),
            ("pom.xml", "<project><name>JavaProject</name></project>", "JavaProject"),
            (
                "project.csproj",
                "<Project><PropertyGroup><AssemblyName>CSharpProject</AssemblyName></PropertyGroup></Project>",
                "CSharpProject",
            ),
            ("build.gradle", "rootProject.name='GradleProject'", "GradleProject"),
            ("settings.gradle.kts", "rootProject.name = \"KtsProject\"", "KtsProject"),
            ("go.mod", "module github.com/example/goProject\n\ngo 1.22\n", "github.com/example/goProject"),
            ("Cargo.toml", "name = \"RustProject\"", "RustProject"),
            ("setup.py", "setup(\n    name='PythonProject',\n)", "PythonProject"),
            ("project.cabal", "name: HaskellProject\nversion: 0.1\n", "HaskellProject"),
        ];
        for (file, content, want) in cases {
            assert_eq!(name_from(file, content).unwrap(), want, "{file}");
        }
    }

    #[test]
    fn nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read_project_name(dir.path()), Err(NameError::NotFound(_))));
    }

    #[test]
    fn priority_order_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"crate-name\"\n").unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "js-name"}"#).unwrap();
        assert_eq!(read_project_name(dir.path()).unwrap(), "js-name");
    }

    #[test]
    fn falls_through_unusable_manifests() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"version": "1.0.0"}"#).unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"real\"\nversion = \"0.1.0\"\n").unwrap();
        assert_eq!(read_project_name(dir.path()).unwrap(), "real");
    }

    #[test]
    fn pom_ignores_nested_names() {
        let pom = r#"<?xml version="1.0"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <!-- <name>commented</name> -->
  <parent><name>parent-name</name></parent>
  <name>Tom &amp; Jerry</name>
</project>"#;
        assert_eq!(name_from("pom.xml", pom).unwrap(), "Tom & Jerry");
    }

    #[test]
    fn pom_name_in_cdata() {
        let pom = "<project><name><![CDATA[Widget]]></name></project>";
        assert_eq!(name_from("pom.xml", pom).unwrap(), "Widget");
    }

    #[test]
    fn pom_tolerates_markup_in_attributes_and_char_refs() {
        let pom = r#"<project xmlns:m="urn:x" filter="a > b">
  <m:name lang="en">Caf&#233; &lt;Core&gt;</m:name>
</project>"#;
        assert_eq!(name_from("pom.xml", pom).unwrap(), "Caf\u{e9} <Core>");
    }

    #[test]
    fn empty_pom_name_keeps_looking() {
        let pom = "<project><name/><name>  </name><name>second</name></project>";
        assert_eq!(name_from("pom.xml", pom).unwrap(), "second");
    }

    #[test]
    fn malformed_pom_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("pom.xml"), "<project><name>x</nope></project>").unwrap();
        let err = PomXml.try_extract(dir.path()).unwrap_err();
        assert!(matches!(err, NameError::Missing { manifest: "pom.xml" }));
    }

    #[test]
    fn csproj_takes_first_assembly_name() {
        let proj = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup><TargetFramework>net8.0</TargetFramework></PropertyGroup>
  <PropertyGroup><AssemblyName>First</AssemblyName></PropertyGroup>
  <PropertyGroup><AssemblyName>Second</AssemblyName></PropertyGroup>
</Project>"#;
        assert_eq!(name_from("app.csproj", proj).unwrap(), "First");
    }

    #[test]
    fn cargo_workspace_without_package_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[workspace]\nmembers = [\"a\"]\n").unwrap();
        let err = CargoToml.try_extract(dir.path()).unwrap_err();
        assert!(matches!(err, NameError::Missing { manifest: "Cargo.toml" }));
    }

    #[test]
    fn custom_extractor_list() {
        struct Fixed;
        impl NameExtractor for Fixed {
            fn manifest(&self) -> &'static str {
                "fixed"
            }
            fn try_extract(&self, _dir: &Path) -> Result<String, NameError> {
                Ok("fixed-name".into())
            }
        }
        let dir = tempfile::tempdir().unwrap();
        let list: Vec<Box<dyn NameExtractor>> = vec![Box::new(Fixed)];
        assert_eq!(read_project_name_with(dir.path(), &list).unwrap(), "fixed-name");
    }
}

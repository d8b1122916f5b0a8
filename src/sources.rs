//! Loading the override and project-local property sources.
//!
//! The local store is either a Java `.properties` file (usually
//! `gradle.properties`) or a TOML file whose tables flatten to dotted keys.
//! Overrides come from repeated `-D key=value` flags.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use nbh_properties::{LocalSource, LocalValue, OverrideSource};
use tracing::debug;

/// Default local store file name inside the project directory.
pub const DEFAULT_PROPERTIES_FILE: &str = "gradle.properties";

/// Source loading errors
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML in {}: {message}", path.display())]
    Toml { path: PathBuf, message: String },

    #[error("invalid define '{0}': key must not be empty")]
    InvalidDefine(String),
}

/// Project-local property store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalProperties {
    values: BTreeMap<String, LocalValue>,
    path: Option<PathBuf>,
}

impl LocalProperties {
    /// Load from `path`. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no local property file");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SourceError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let values = if is_toml {
            let table: toml::Table = toml::from_str(&content).map_err(|e| SourceError::Toml {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            flatten_toml(&table)
        } else {
            parse_properties(&content)
                .into_iter()
                .map(|(k, v)| (k, LocalValue::Text(v)))
                .collect()
        };

        debug!(path = %path.display(), count = values.len(), "loaded local properties");
        Ok(Self {
            values,
            path: Some(path.to_path_buf()),
        })
    }

    /// Default location, `<project>/gradle.properties`.
    pub fn default_path(project_dir: &Path) -> PathBuf {
        project_dir.join(DEFAULT_PROPERTIES_FILE)
    }

    /// File the values were read from, if one existed.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&LocalValue> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<LocalValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl LocalSource for LocalProperties {
    fn local_value(&self, key: &str) -> Option<LocalValue> {
        self.values.get(key).cloned()
    }
}

/// Override channel built from `-D` flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideProperties {
    values: BTreeMap<String, String>,
}

impl OverrideProperties {
    /// Parse `key=value` defines. A bare `key` is defined as the empty string;
    /// later defines win.
    pub fn from_defines(defines: &[String]) -> Result<Self, SourceError> {
        let mut values = BTreeMap::new();
        for define in defines {
            let (key, value) = define.split_once('=').unwrap_or((define.as_str(), ""));
            let key = key.trim();
            if key.is_empty() {
                return Err(SourceError::InvalidDefine(define.clone()));
            }
            values.insert(key.to_string(), value.to_string());
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OverrideSource for OverrideProperties {
    fn override_value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

fn flatten_toml(table: &toml::Table) -> BTreeMap<String, LocalValue> {
    let mut out = BTreeMap::new();
    flatten_into(table, "", &mut out);
    out
}

fn flatten_into(table: &toml::Table, prefix: &str, out: &mut BTreeMap<String, LocalValue>) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(inner) => flatten_into(inner, &path, out),
            toml::Value::Boolean(b) => {
                out.insert(path, LocalValue::Bool(*b));
            }
            other => {
                out.insert(path, LocalValue::Text(toml_text(other)));
            }
        }
    }
}

fn toml_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items.iter().map(toml_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// Parse Java `.properties` content into key/value pairs, last one wins.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let mut logical = line.trim_start().to_string();
        if logical.is_empty() || logical.starts_with('#') || logical.starts_with('!') {
            continue;
        }

        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_property(&logical);
        out.insert(unescape(key), unescape(value));
    }

    out
}

/// Odd number of trailing backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_property(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || c.is_whitespace() {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (key, rest.trim_start())
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_properties_separators() {
        let props = parse_properties(
            "a=1\nb: 2\nc 3\nd   =   spaced value\ne=\n# comment\n! also comment\n\n",
        );
        assert_eq!(props.get("a").map(String::as_str), Some("1"));
        assert_eq!(props.get("b").map(String::as_str), Some("2"));
        assert_eq!(props.get("c").map(String::as_str), Some("3"));
        assert_eq!(props.get("d").map(String::as_str), Some("spaced value"));
        assert_eq!(props.get("e").map(String::as_str), Some(""));
        assert_eq!(props.len(), 5);
    }

    #[test]
    fn test_parse_properties_continuation() {
        let props = parse_properties(
            "quarkus.native.additional-build-args=--verbose,\\\n    -H:+ReportExceptionStackTraces\nnext=x\n",
        );
        assert_eq!(
            props.get("quarkus.native.additional-build-args").map(String::as_str),
            Some("--verbose,-H:+ReportExceptionStackTraces")
        );
        assert_eq!(props.get("next").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_parse_properties_escapes() {
        let props = parse_properties("path=C:\\\\tools\nkey\\=with\\=eq=v\nuni=caf\\u00e9\n");
        assert_eq!(props.get("path").map(String::as_str), Some("C:\\tools"));
        assert_eq!(props.get("key=with=eq").map(String::as_str), Some("v"));
        assert_eq!(props.get("uni").map(String::as_str), Some("café"));
    }

    #[test]
    fn test_parse_properties_last_wins() {
        let props = parse_properties("k=1\nk=2\n");
        assert_eq!(props.get("k").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_load_properties_file() {
        let dir = TempDir::new().unwrap();
        let path = LocalProperties::default_path(dir.path());
        fs::write(&path, "quarkus.native.enabled=true\nversion=1.0.0\n").unwrap();

        let local = LocalProperties::load(&path).unwrap();
        assert_eq!(local.len(), 2);
        assert_eq!(local.path(), Some(path.as_path()));
        assert_eq!(
            local.local_value("quarkus.native.enabled"),
            Some(LocalValue::Text("true".to_string()))
        );
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let local = LocalProperties::load(&dir.path().join("gradle.properties")).unwrap();
        assert!(local.is_empty());
        assert!(local.path().is_none());
    }

    #[test]
    fn test_load_toml_flattens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build.toml");
        fs::write(
            &path,
            r#"
version = "2.1.0"

[quarkus.native]
enabled = true
container-build = false
native-image-xmx = "6g"
additional-build-args = ["--verbose", "-J-Xss4m"]
threads = 4

[quarkus.package.jar]
enabled = false
"#,
        )
        .unwrap();

        let local = LocalProperties::load(&path).unwrap();
        assert_eq!(local.get("quarkus.native.enabled"), Some(&LocalValue::Bool(true)));
        assert_eq!(
            local.get("quarkus.native.container-build"),
            Some(&LocalValue::Bool(false))
        );
        assert_eq!(
            local.get("quarkus.native.native-image-xmx"),
            Some(&LocalValue::Text("6g".to_string()))
        );
        assert_eq!(
            local.get("quarkus.native.additional-build-args"),
            Some(&LocalValue::Text("--verbose,-J-Xss4m".to_string()))
        );
        assert_eq!(
            local.get("quarkus.native.threads"),
            Some(&LocalValue::Text("4".to_string()))
        );
        assert_eq!(
            local.get("quarkus.package.jar.enabled"),
            Some(&LocalValue::Bool(false))
        );
        assert_eq!(local.get("version"), Some(&LocalValue::Text("2.1.0".to_string())));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build.toml");
        fs::write(&path, "[quarkus").unwrap();

        let err = LocalProperties::load(&path).unwrap_err();
        assert!(matches!(err, SourceError::Toml { .. }));
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalProperties::load(dir.path()).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_from_defines() {
        let overrides = OverrideProperties::from_defines(&[
            "quarkus.native.enabled=true".to_string(),
            "quarkus.native.builder-image".to_string(),
            "a=b=c".to_string(),
            "quarkus.native.enabled=false".to_string(),
        ])
        .unwrap();

        assert_eq!(overrides.len(), 3);
        assert_eq!(
            overrides.override_value("quarkus.native.enabled").as_deref(),
            Some("false")
        );
        assert_eq!(overrides.get("quarkus.native.builder-image"), Some(""));
        assert_eq!(overrides.get("a"), Some("b=c"));
    }

    #[test]
    fn test_from_defines_empty_key() {
        for bad in ["=value", "", "  =x"] {
            let err = OverrideProperties::from_defines(&[bad.to_string()]).unwrap_err();
            assert!(matches!(err, SourceError::InvalidDefine(_)));
        }
    }
}

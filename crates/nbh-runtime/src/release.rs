//! Parser for the JDK `release` file.
//!
//! The file is a list of `KEY="value"` lines, e.g.
//!
//! ```text
//! IMPLEMENTOR="GraalVM Community"
//! JAVA_VERSION="21.0.2"
//! GRAALVM_VERSION="23.1.2"
//! ```

/// Keys worth surfacing in reports, in display order.
pub const HIGHLIGHT_KEYS: &[&str] = &[
    "IMPLEMENTOR",
    "IMPLEMENTOR_VERSION",
    "JAVA_VERSION",
    "GRAALVM_VERSION",
    "JAVA_RUNTIME_VERSION",
];

/// Parsed `release` file entries, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseFile {
    entries: Vec<(String, String)>,
}

impl ReleaseFile {
    /// Parse release file content. Malformed lines are skipped.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let (key, value) = line.split_once('=')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                Some((key.to_string(), value.to_string()))
            })
            .collect();

        Self { entries }
    }

    /// Value for `key`, first occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Entries for [`HIGHLIGHT_KEYS`] that are present.
    pub fn highlights(&self) -> Vec<(&'static str, &str)> {
        HIGHLIGHT_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|v| (*key, v)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Runtime classification and snapshot types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder used when the installation has no `release` file.
pub const NO_RELEASE_FILE: &str = "No release file found";

/// Kind of native-capable runtime detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuntimeClassification {
    #[serde(rename = "GraalVM")]
    GraalVm,
    Mandrel,
    Unknown,
}

impl RuntimeClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeClassification::GraalVm => "GraalVM",
            RuntimeClassification::Mandrel => "Mandrel",
            RuntimeClassification::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RuntimeClassification::Unknown)
    }
}

impl fmt::Display for RuntimeClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the runtime's identification, taken once per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeInfo {
    pub vendor: Option<String>,
    pub runtime_name: Option<String>,
    pub vm_name: Option<String>,
    pub vm_version: Option<String>,
    pub java_version: Option<String>,
    /// Installation root (`java.home`)
    pub java_home: Option<String>,
    /// Whether the installation root path mentions Mandrel
    pub mandrel_in_path: bool,
    /// Raw `release` file content, or a placeholder explaining its absence
    pub release_content: String,
}

/// Display form of an optional runtime field.
pub(crate) fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("(not set)")
}

impl RuntimeInfo {
    /// The six raw runtime properties as `(label, value)` pairs.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Java Vendor", field(&self.vendor)),
            ("Java Runtime", field(&self.runtime_name)),
            ("Java VM Name", field(&self.vm_name)),
            ("Java VM Version", field(&self.vm_version)),
            ("Java Version", field(&self.java_version)),
            ("Java Home", field(&self.java_home)),
        ]
    }
}

/// Results of the four detection predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResults {
    pub graalvm: bool,
    pub mandrel: bool,
    pub native_capable: bool,
    pub image_tool_available: bool,
}

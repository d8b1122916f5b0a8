//! Post-build check for the native runner executable.
//!
//! A native build leaves `build/<name>-<version>-runner` in the project
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use nbh_properties::LocalSource;
use serde::Serialize;
use tracing::debug;

use crate::report::{banner, footer};

/// Local property holding the project version.
pub const VERSION_KEY: &str = "version";

/// Version used when the project declares none.
pub const UNSPECIFIED_VERSION: &str = "unspecified";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, Serialize)]
pub struct RunnerCheck {
    pub name: String,
    pub version: String,
    pub path: PathBuf,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// `<project>/build/<name>-<version>-runner`
pub fn runner_path(project_dir: &Path, name: &str, version: &str) -> PathBuf {
    project_dir
        .join("build")
        .join(format!("{}-{}-runner", name, version))
}

fn absolute(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}

/// Project name derived from its directory.
pub fn project_name(project_dir: &Path) -> String {
    fs::canonicalize(project_dir)
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .or_else(|| project_dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
}

impl RunnerCheck {
    /// Look for the runner. `name` and `version` fall back to the directory
    /// name and the local `version` property.
    pub fn check<L: LocalSource + ?Sized>(
        project_dir: &Path,
        name: Option<&str>,
        version: Option<&str>,
        local: &L,
    ) -> Self {
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| project_name(project_dir));
        let version = version
            .map(str::to_string)
            .or_else(|| local.local_value(VERSION_KEY).map(|v| v.to_text()))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNSPECIFIED_VERSION.to_string());

        let path = runner_path(&absolute(project_dir), &name, &version);
        let size_bytes = fs::metadata(&path)
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.len());
        debug!(path = %path.display(), found = size_bytes.is_some(), "runner lookup");

        Self {
            name,
            version,
            found: size_bytes.is_some(),
            path,
            size_bytes,
        }
    }

    pub fn size_mb(&self) -> Option<f64> {
        self.size_bytes.map(|b| b as f64 / BYTES_PER_MB)
    }

    pub fn run_hint(&self) -> String {
        let path = self.path.display();
        format!("chmod +x {} && {}", path, path)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&serde_json::json!({
            "name": self.name,
            "version": self.version,
            "path": self.path,
            "found": self.found,
            "size_mb": self.size_mb().map(|mb| format!("{:.2}", mb)),
            "run_hint": self.found.then(|| self.run_hint()),
        }))
    }

    pub fn to_human(&self) -> String {
        let mut output = String::new();
        banner(&mut output, "QUARKUS BUILD - THE FINISH");
        if let Some(mb) = self.size_mb() {
            output.push_str("Native executable created successfully:\n");
            output.push_str(&format!("  Location: {}\n", self.path.display()));
            output.push_str(&format!("  Size: {:.2} MB\n", mb));
            output.push_str(&format!("  Run with: {}\n", self.run_hint()));
        } else {
            output.push_str("Native executable not found at expected location\n");
            output.push_str(&format!("Missing: {}\n", self.path.display()));
        }
        footer(&mut output);
        output
    }
}

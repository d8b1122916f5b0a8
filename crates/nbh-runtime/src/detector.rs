//! Native-capable runtime detection.
//!
//! Each heuristic is independently sufficient. GraalVM is recognised from
//! the identification strings alone; Mandrel also looks at the installation
//! root, its `release` file, and the name of the directory holding it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::info::{DetectionResults, RuntimeClassification, RuntimeInfo, NO_RELEASE_FILE};
use crate::reader::{
    is_windows, path_separator, EnvironmentReader, JAVA_HOME, JAVA_RUNTIME_NAME, JAVA_VENDOR,
    JAVA_VERSION, JAVA_VM_NAME, JAVA_VM_VERSION,
};
use crate::tool::{find_in_dirs, image_tool_name, is_executable_file, ImageToolInfo};

/// Marker token identifying GraalVM distributions.
pub const GRAALVM_MARKER: &str = "graalvm";

/// Marker token identifying Mandrel distributions.
pub const MANDREL_MARKER: &str = "mandrel";

fn contains_marker(value: Option<&str>, marker: &str) -> bool {
    value.is_some_and(|v| v.to_lowercase().contains(marker))
}

/// Classifies the runtime described by an [`EnvironmentReader`].
///
/// Every operation reads the environment afresh and never fails.
pub struct RuntimeDetector<E> {
    env: E,
}

impl<E: EnvironmentReader> RuntimeDetector<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    pub fn reader(&self) -> &E {
        &self.env
    }

    fn java_home(&self) -> Option<String> {
        self.env.property(JAVA_HOME).filter(|home| !home.is_empty())
    }

    fn any_property_contains(&self, keys: &[&str], marker: &str) -> bool {
        keys.iter()
            .any(|key| contains_marker(self.env.property(key).as_deref(), marker))
    }

    /// True if vendor, runtime name or VM name mentions GraalVM.
    pub fn is_graalvm(&self) -> bool {
        self.any_property_contains(&[JAVA_VENDOR, JAVA_RUNTIME_NAME, JAVA_VM_NAME], GRAALVM_MARKER)
    }

    /// True if any Mandrel signal matches. Signals are checked in order and
    /// the first positive one wins.
    pub fn is_mandrel(&self) -> bool {
        if self.any_property_contains(
            &[JAVA_VENDOR, JAVA_RUNTIME_NAME, JAVA_VM_NAME, JAVA_VM_VERSION],
            MANDREL_MARKER,
        ) {
            debug!("mandrel detected from runtime properties");
            return true;
        }

        let Some(home) = self.java_home() else {
            return false;
        };

        if contains_marker(Some(home.as_str()), MANDREL_MARKER) {
            debug!(%home, "mandrel detected from installation path");
            return true;
        }

        let home = Path::new(&home);

        let release = home.join("release");
        if release.exists() {
            match fs::read_to_string(&release) {
                Ok(content) if contains_marker(Some(content.as_str()), MANDREL_MARKER) => {
                    debug!(path = %release.display(), "mandrel detected from release file");
                    return true;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(path = %release.display(), error = %e, "could not read release file");
                }
            }
        }

        if home.join("lib").join("modules").exists() {
            let parent_name = home
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned());
            if contains_marker(parent_name.as_deref(), MANDREL_MARKER) {
                debug!(?parent_name, "mandrel detected from parent directory");
                return true;
            }
        }

        false
    }

    pub fn is_native_capable(&self) -> bool {
        self.is_graalvm() || self.is_mandrel()
    }

    /// GraalVM wins over Mandrel when both match.
    pub fn classify(&self) -> RuntimeClassification {
        if self.is_graalvm() {
            RuntimeClassification::GraalVm
        } else if self.is_mandrel() {
            RuntimeClassification::Mandrel
        } else {
            RuntimeClassification::Unknown
        }
    }

    /// Executable name of the image tool for this OS.
    pub fn image_tool_name(&self) -> String {
        image_tool_name(is_windows(&self.env.os_name()))
    }

    /// Find the image tool under `<java.home>/bin`, then on `PATH`.
    pub fn locate_image_tool(&self) -> Option<PathBuf> {
        let exe = self.image_tool_name();

        if let Some(home) = self.java_home() {
            let candidate = Path::new(&home).join("bin").join(&exe);
            if is_executable_file(&candidate) {
                debug!(path = %candidate.display(), "image tool found in java home");
                return Some(candidate);
            }
        }

        let path_var = self.env.env_var("PATH")?;
        let separator = path_separator(&self.env.os_name());
        let found = find_in_dirs(path_var.split(separator), &exe);
        if let Some(ref path) = found {
            debug!(path = %path.display(), "image tool found on PATH");
        }
        found
    }

    pub fn is_image_tool_available(&self) -> bool {
        self.locate_image_tool().is_some()
    }

    /// Image tool location plus the version it reports.
    pub fn image_tool_info(&self) -> ImageToolInfo {
        let path = self.locate_image_tool();
        let version = path
            .as_deref()
            .and_then(|p| self.env.first_output_line(p, &["--version"]));

        ImageToolInfo {
            available: path.is_some(),
            path,
            version,
        }
    }

    /// Capture the runtime's identification for reporting.
    pub fn snapshot(&self) -> RuntimeInfo {
        let java_home = self.java_home();

        let release_content = match java_home.as_deref().map(|h| Path::new(h).join("release")) {
            Some(release) if release.exists() => match fs::read_to_string(&release) {
                Ok(content) => content,
                Err(e) => format!("Could not read release file: {}", e),
            },
            _ => NO_RELEASE_FILE.to_string(),
        };

        RuntimeInfo {
            vendor: self.env.property(JAVA_VENDOR),
            runtime_name: self.env.property(JAVA_RUNTIME_NAME),
            vm_name: self.env.property(JAVA_VM_NAME),
            vm_version: self.env.property(JAVA_VM_VERSION),
            java_version: self.env.property(JAVA_VERSION),
            mandrel_in_path: contains_marker(java_home.as_deref(), MANDREL_MARKER),
            java_home,
            release_content,
        }
    }

    pub fn detection_results(&self) -> DetectionResults {
        DetectionResults {
            graalvm: self.is_graalvm(),
            mandrel: self.is_mandrel(),
            native_capable: self.is_native_capable(),
            image_tool_available: self.is_image_tool_available(),
        }
    }
}

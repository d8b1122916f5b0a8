//! The live environment, probed from a `java` launcher.
//!
//! Runtime properties are captured once from
//! `java -XshowSettings:properties -version`, which prints every system
//! property to stderr as indented `key = value` lines.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::reader::{EnvironmentReader, JAVA_HOME, OS_NAME};

/// Indentation of a property line in the settings dump. Deeper lines
/// continue a multi-valued property.
const PROPERTY_INDENT: &str = "    ";

/// Parse the output of `java -XshowSettings:properties`.
pub fn parse_settings_output(output: &str) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();

    for line in output.lines() {
        let Some(rest) = line.strip_prefix(PROPERTY_INDENT) else {
            continue;
        };
        if rest.starts_with(char::is_whitespace) {
            continue;
        }
        let Some((key, value)) = rest.split_once(" = ").or_else(|| {
            rest.strip_suffix(" =").map(|key| (key, ""))
        }) else {
            continue;
        };
        properties.insert(key.trim().to_string(), value.trim().to_string());
    }

    properties
}

/// Real process environment plus runtime properties from a probed JVM.
#[derive(Debug, Clone, Default)]
pub struct SystemEnvironment {
    properties: BTreeMap<String, String>,
}

impl SystemEnvironment {
    /// Probe the runtime reachable from `java_home`, `JAVA_HOME`, or `PATH`.
    ///
    /// A launcher that cannot be run leaves the property map empty, except
    /// for `java.home` when a home directory is known.
    pub fn probe(java_home: Option<&Path>) -> Self {
        let home = java_home
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("JAVA_HOME").map(PathBuf::from))
            .filter(|home| !home.as_os_str().is_empty());

        let launcher = match home {
            Some(ref home) => home.join("bin").join(java_launcher_name()),
            None => PathBuf::from(java_launcher_name()),
        };

        let mut properties = match Command::new(&launcher)
            .args(["-XshowSettings:properties", "-version"])
            .output()
        {
            Ok(output) => {
                let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stdout));
                let properties = parse_settings_output(&text);
                debug!(
                    launcher = %launcher.display(),
                    count = properties.len(),
                    "captured runtime properties"
                );
                properties
            }
            Err(e) => {
                warn!(launcher = %launcher.display(), error = %e, "could not run java launcher");
                BTreeMap::new()
            }
        };

        if let Some(home) = home {
            properties
                .entry(JAVA_HOME.to_string())
                .or_insert_with(|| home.to_string_lossy().into_owned());
        }

        Self { properties }
    }

    /// Use an already captured property map.
    pub fn from_properties(properties: BTreeMap<String, String>) -> Self {
        Self { properties }
    }
}

fn java_launcher_name() -> &'static str {
    if cfg!(windows) {
        "java.exe"
    } else {
        "java"
    }
}

impl EnvironmentReader for SystemEnvironment {
    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn os_name(&self) -> String {
        self.properties
            .get(OS_NAME)
            .cloned()
            .unwrap_or_else(|| std::env::consts::OS.to_string())
    }

    fn first_output_line(&self, program: &Path, args: &[&str]) -> Option<String> {
        let output = Command::new(program).args(args).output().ok()?;
        if !output.status.success() {
            debug!(program = %program.display(), status = %output.status, "command failed");
            return None;
        }

        let first_line = |bytes: &[u8]| {
            String::from_utf8_lossy(bytes)
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
        };
        first_line(&output.stdout).or_else(|| first_line(&output.stderr))
    }
}

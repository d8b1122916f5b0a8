//! Environment reader port.
//!
//! Detection never touches process-wide state directly. Runtime properties,
//! environment variables and subprocess output all come through an
//! [`EnvironmentReader`], so tests can describe an environment without
//! mutating the real one.

use std::collections::BTreeMap;
use std::path::Path;

/// `java.vendor`
pub const JAVA_VENDOR: &str = "java.vendor";
/// `java.runtime.name`
pub const JAVA_RUNTIME_NAME: &str = "java.runtime.name";
/// `java.vm.name`
pub const JAVA_VM_NAME: &str = "java.vm.name";
/// `java.vm.version`
pub const JAVA_VM_VERSION: &str = "java.vm.version";
/// `java.version`
pub const JAVA_VERSION: &str = "java.version";
/// `java.home`, the installation root.
pub const JAVA_HOME: &str = "java.home";
/// `os.name`
pub const OS_NAME: &str = "os.name";

/// Read-only view of the execution environment.
pub trait EnvironmentReader {
    /// Runtime identification property such as [`JAVA_VENDOR`].
    fn property(&self, key: &str) -> Option<String>;

    /// Environment variable lookup.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Operating system name.
    fn os_name(&self) -> String;

    /// Run `program` with `args` and return the first non-empty output line.
    ///
    /// Best-effort: any failure is `None`.
    fn first_output_line(&self, program: &Path, args: &[&str]) -> Option<String>;
}

impl<T: EnvironmentReader + ?Sized> EnvironmentReader for &T {
    fn property(&self, key: &str) -> Option<String> {
        (**self).property(key)
    }

    fn env_var(&self, name: &str) -> Option<String> {
        (**self).env_var(name)
    }

    fn os_name(&self) -> String {
        (**self).os_name()
    }

    fn first_output_line(&self, program: &Path, args: &[&str]) -> Option<String> {
        (**self).first_output_line(program, args)
    }
}

/// Whether an OS name denotes a Windows-class system.
pub fn is_windows(os_name: &str) -> bool {
    os_name.to_lowercase().contains("windows")
}

/// Separator between `PATH` entries for the given OS.
pub fn path_separator(os_name: &str) -> char {
    if is_windows(os_name) {
        ';'
    } else {
        ':'
    }
}

/// A fixed environment described up front.
///
/// Useful for replaying a captured environment and for tests. Subprocess
/// output is canned per program path.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    properties: BTreeMap<String, String>,
    env: BTreeMap<String, String>,
    os_name: Option<String>,
    outputs: BTreeMap<String, String>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    pub fn with_os_name(mut self, os_name: impl Into<String>) -> Self {
        self.os_name = Some(os_name.into());
        self
    }

    /// Canned first output line for `program`.
    pub fn with_output(mut self, program: impl AsRef<Path>, line: impl Into<String>) -> Self {
        self.outputs.insert(
            program.as_ref().to_string_lossy().into_owned(),
            line.into(),
        );
        self
    }
}

impl EnvironmentReader for StaticEnvironment {
    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }

    fn os_name(&self) -> String {
        self.os_name
            .clone()
            .or_else(|| self.properties.get(OS_NAME).cloned())
            .unwrap_or_else(|| "Linux".to_string())
    }

    fn first_output_line(&self, program: &Path, _args: &[&str]) -> Option<String> {
        self.outputs
            .get(program.to_string_lossy().as_ref())
            .cloned()
    }
}

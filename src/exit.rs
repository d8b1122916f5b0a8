//! Stable process exit codes for `nbh`.

use crate::config::ConfigError;
use crate::sources::SourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// Bad flags or defines
    Usage = 2,
    /// Settings or property files could not be loaded
    Config = 3,
    /// The runtime cannot build native images
    RequirementsNotMet = 10,
    /// The expected runner executable is absent
    RunnerMissing = 20,
}

impl ExitCode {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

impl From<&SourceError> for ExitCode {
    fn from(err: &SourceError) -> Self {
        match err {
            SourceError::InvalidDefine(_) => ExitCode::Usage,
            SourceError::Io { .. } | SourceError::Toml { .. } => ExitCode::Config,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_: &ConfigError) -> Self {
        ExitCode::Config
    }
}

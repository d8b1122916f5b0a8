//! Locating the `native-image` tool.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Base name of the image tool.
pub const IMAGE_TOOL: &str = "native-image";

/// Where the image tool was found and what it reports about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageToolInfo {
    pub available: bool,
    pub path: Option<PathBuf>,
    /// First line of `native-image --version`
    pub version: Option<String>,
}

/// Platform-specific executable name for the image tool.
pub fn image_tool_name(windows: bool) -> String {
    if windows {
        format!("{}.exe", IMAGE_TOOL)
    } else {
        IMAGE_TOOL.to_string()
    }
}

/// Whether `path` is a regular file that can be executed.
///
/// On Unix at least one execute bit must be set. Elsewhere a regular file is
/// enough.
pub fn is_executable_file(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

/// Search `dirs` in order for an executable named `exe`.
pub fn find_in_dirs<'a, I>(dirs: I, exe: &str) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a str>,
{
    dirs.into_iter()
        .filter(|dir| !dir.is_empty())
        .map(|dir| Path::new(dir).join(exe))
        .find(|candidate| is_executable_file(candidate))
}

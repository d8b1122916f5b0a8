//! Effective helper settings with provenance
//!
//! Captures the merged settings plus where each contributing layer came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;

/// File name of a helper settings layer
pub const SETTINGS_FILE: &str = "helper.toml";

/// Origin of a settings layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    User,
    Project,
    Cli,
}

impl ConfigOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigOrigin::Builtin => "builtin",
            ConfigOrigin::User => "user",
            ConfigOrigin::Project => "project",
            ConfigOrigin::Cli => "cli",
        }
    }
}

/// A contributing settings layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// `[native]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeSettings {
    pub enabled: bool,
    pub container_build: bool,
    pub remote_container_build: bool,
    pub native_only: bool,
    pub builder_image: String,
    pub image_xmx: String,
}

/// `[validation]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    pub validate_native_environment: bool,
}

/// Typed view of the merged settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperSettings {
    pub native: NativeSettings,
    pub validation: ValidationSettings,
}

/// Effective settings with full provenance
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    /// When these settings were computed
    pub created_at: DateTime<Utc>,

    pub settings: HelperSettings,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

/// Default user-level settings file, `~/.config/nbh/helper.toml`.
pub fn user_settings_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("nbh")
                .join(SETTINGS_FILE)
        })
}

/// Default project-level settings file, `<project>/.nbh/helper.toml`.
pub fn project_settings_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".nbh").join(SETTINGS_FILE)
}

/// Build the CLI layer from `dotted.key=value` pairs.
///
/// `true`/`false` become booleans; anything else is kept as a string, so
/// `native.image_xmx=1024` stays a size string.
pub fn cli_layer(pairs: &[String]) -> Result<toml::Value, ConfigError> {
    let mut root = toml::Table::new();

    for pair in pairs {
        let (path, raw) = pair.split_once('=').ok_or_else(|| {
            ConfigError::ParseError(format!("expected key=value, got '{}'", pair))
        })?;
        let parts: Vec<&str> = path.trim().split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::ParseError(format!(
                "invalid settings key '{}'",
                path
            )));
        }

        let value = match raw {
            "true" => toml::Value::Boolean(true),
            "false" => toml::Value::Boolean(false),
            _ => toml::Value::String(raw.to_string()),
        };

        let (leaf, parents) = parts.split_last().ok_or_else(|| {
            ConfigError::ParseError(format!("invalid settings key '{}'", path))
        })?;
        let mut table = &mut root;
        for part in parents {
            let entry = table
                .entry(part.to_string())
                .or_insert_with(|| toml::Value::Table(toml::Table::new()));
            table = match entry {
                toml::Value::Table(t) => t,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "settings key '{}' conflicts with a scalar",
                        path
                    )))
                }
            };
        }
        table.insert(leaf.to_string(), value);
    }

    Ok(toml::Value::Table(root))
}

impl EffectiveSettings {
    /// Build effective settings from layers. Missing files are skipped.
    pub fn build(
        user_path: Option<&Path>,
        project_path: Option<&Path>,
        cli_overrides: Option<toml::Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        }];

        for (origin, path) in [
            (ConfigOrigin::User, user_path),
            (ConfigOrigin::Project, project_path),
        ] {
            let Some(path) = path.filter(|p| p.exists()) else {
                continue;
            };
            let (value, digest) = Self::load_toml_file(path)?;
            debug!(?origin, path = %path.display(), "loaded settings layer");
            layers.push(value);
            sources.push(ConfigSource {
                origin,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let settings: HelperSettings = merge_layers(layers)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError(e.to_string()))?;

        Self::validate_settings(&settings)?;

        Ok(Self {
            created_at: Utc::now(),
            settings,
            sources,
        })
    }

    fn load_toml_file(path: &Path) -> Result<(toml::Value, String), ConfigError> {
        let bytes = fs::read(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let digest = hex::encode(Sha256::digest(&bytes));

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

        let table: toml::Table = toml::from_str(&contents).map_err(|e| {
            ConfigError::ParseError(format!("{}: TOML parse error: {}", path.display(), e))
        })?;

        Ok((toml::Value::Table(table), digest))
    }

    fn validate_settings(settings: &HelperSettings) -> Result<(), ConfigError> {
        let native = &settings.native;

        if !is_valid_xmx(&native.image_xmx) {
            return Err(ConfigError::ValidationError(format!(
                "native.image_xmx must be a size like 4g, 512m or 1048576k, got '{}'",
                native.image_xmx
            )));
        }

        if native.builder_image.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "native.builder_image must not be empty".to_string(),
            ));
        }

        if native.native_only && !native.enabled {
            return Err(ConfigError::ValidationError(
                "native.native_only requires native.enabled".to_string(),
            ));
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_human(&self) -> String {
        let s = &self.settings;
        let mut output = String::new();
        output.push_str("Helper Settings\n");
        output.push_str(&format!("  native.enabled: {}\n", s.native.enabled));
        output.push_str(&format!(
            "  native.container_build: {}\n",
            s.native.container_build
        ));
        output.push_str(&format!(
            "  native.remote_container_build: {}\n",
            s.native.remote_container_build
        ));
        output.push_str(&format!("  native.native_only: {}\n", s.native.native_only));
        output.push_str(&format!(
            "  native.builder_image: {}\n",
            s.native.builder_image
        ));
        output.push_str(&format!("  native.image_xmx: {}\n", s.native.image_xmx));
        output.push_str(&format!(
            "  validation.validate_native_environment: {}\n",
            s.validation.validate_native_environment
        ));
        output.push_str("\nSources (lowest precedence first)\n");
        for source in &self.sources {
            let origin = source.origin.as_str();
            match (&source.path, &source.digest) {
                (Some(path), Some(digest)) => output.push_str(&format!(
                    "  {}: {} (sha256 {})\n",
                    origin,
                    path,
                    &digest[..12.min(digest.len())]
                )),
                _ => output.push_str(&format!("  {}\n", origin)),
            }
        }
        output
    }
}

/// Digits followed by an optional `k`, `m` or `g` unit.
fn is_valid_xmx(value: &str) -> bool {
    let digits = value
        .strip_suffix(|c: char| matches!(c.to_ascii_lowercase(), 'k' | 'm' | 'g'))
        .unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

//! Everything a subcommand needs about the project, loaded once.

use std::path::{Path, PathBuf};

use nbh_properties::PropertyResolver;

use crate::config::{
    cli_layer, project_settings_path, user_settings_path, ConfigError, EffectiveSettings,
};
use crate::exit::ExitCode;
use crate::sources::{LocalProperties, OverrideProperties, SourceError};

/// Where to find the project's inputs.
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    pub project_dir: PathBuf,
    /// Local property file; defaults to `<project>/gradle.properties`
    pub properties: Option<PathBuf>,
    /// `-D key=value` overrides
    pub defines: Vec<String>,
    /// Project settings file; defaults to `<project>/.nbh/helper.toml`
    pub config: Option<PathBuf>,
    /// User settings file; defaults to `~/.config/nbh/helper.toml`
    pub user_config: Option<PathBuf>,
    /// `--set dotted.key=value` settings overrides
    pub settings: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ContextError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ContextError::Source(e) => ExitCode::from(e),
            ContextError::Config(e) => ExitCode::from(e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub project_dir: PathBuf,
    pub overrides: OverrideProperties,
    pub local: LocalProperties,
    pub settings: EffectiveSettings,
}

impl ProjectContext {
    pub fn load(options: &ContextOptions) -> Result<Self, ContextError> {
        let overrides = OverrideProperties::from_defines(&options.defines)?;

        let properties_path = options
            .properties
            .clone()
            .unwrap_or_else(|| LocalProperties::default_path(&options.project_dir));
        let local = LocalProperties::load(&properties_path)?;

        let user_path = options.user_config.clone().or_else(user_settings_path);
        let project_path = options
            .config
            .clone()
            .unwrap_or_else(|| project_settings_path(&options.project_dir));
        let cli = if options.settings.is_empty() {
            None
        } else {
            Some(cli_layer(&options.settings)?)
        };
        let settings =
            EffectiveSettings::build(user_path.as_deref(), Some(&project_path), cli)?;

        tracing::info!(
            project = %options.project_dir.display(),
            overrides = overrides.len(),
            local = local.len(),
            "project context loaded"
        );

        Ok(Self {
            project_dir: options.project_dir.clone(),
            overrides,
            local,
            settings,
        })
    }

    pub fn resolver(&self) -> PropertyResolver<'_, OverrideProperties, LocalProperties> {
        PropertyResolver::new(&self.overrides, &self.local)
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Whether native builds should be gated on the environment check.
    pub fn validation_enabled(&self) -> bool {
        self.settings.settings.validation.validate_native_environment
    }
}

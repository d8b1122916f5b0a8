//! Helper settings
//!
//! Layered in precedence order:
//! 1. Built-in defaults
//! 2. User file (~/.config/nbh/helper.toml)
//! 3. Project file (<project>/.nbh/helper.toml)
//! 4. CLI flags

mod defaults;
mod effective;
mod merge;

pub use defaults::{BuiltinDefaults, DEFAULT_BUILDER_IMAGE};
pub use effective::{
    cli_layer, project_settings_path, user_settings_path, ConfigError, ConfigOrigin,
    ConfigSource, EffectiveSettings, HelperSettings, NativeSettings, ValidationSettings,
    SETTINGS_FILE,
};
pub use merge::{deep_merge, merge_layers};

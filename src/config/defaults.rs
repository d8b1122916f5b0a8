//! Built-in helper defaults (layer 1)

use serde::{Deserialize, Serialize};

/// Builder image used when none is configured.
pub const DEFAULT_BUILDER_IMAGE: &str = "quay.io/quarkus/ubi-quarkus-native-image:22.0.1-java17";

/// Built-in default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Native build enabled (default: true)
    pub native_enabled: bool,

    /// Build inside a container (default: false)
    pub container_build: bool,

    /// Build inside a remote container (default: false)
    pub remote_container_build: bool,

    /// Skip the JAR package and build only the native image (default: false)
    pub native_only: bool,

    /// Container image used for container builds
    pub builder_image: String,

    /// Maximum heap for the image builder (default: "4g")
    pub image_xmx: String,

    /// Gate native builds on a capable runtime (default: true)
    pub validate_native_environment: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            native_enabled: true,
            container_build: false,
            remote_container_build: false,
            native_only: false,
            builder_image: DEFAULT_BUILDER_IMAGE.to_string(),
            image_xmx: "4g".to_string(),
            validate_native_environment: true,
        }
    }
}

impl BuiltinDefaults {
    /// Layered table form, as it would appear in `helper.toml`
    pub fn to_value(&self) -> toml::Value {
        let mut native = toml::Table::new();
        native.insert("enabled".into(), self.native_enabled.into());
        native.insert("container_build".into(), self.container_build.into());
        native.insert(
            "remote_container_build".into(),
            self.remote_container_build.into(),
        );
        native.insert("native_only".into(), self.native_only.into());
        native.insert("builder_image".into(), self.builder_image.clone().into());
        native.insert("image_xmx".into(), self.image_xmx.clone().into());

        let mut validation = toml::Table::new();
        validation.insert(
            "validate_native_environment".into(),
            self.validate_native_environment.into(),
        );

        let mut root = toml::Table::new();
        root.insert("native".into(), toml::Value::Table(native));
        root.insert("validation".into(), toml::Value::Table(validation));
        toml::Value::Table(root)
    }
}

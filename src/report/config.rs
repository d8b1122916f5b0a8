//! Native build configuration: effective helper settings and their sources.

use chrono::{DateTime, Utc};
use nbh_runtime::{EnvironmentReader, RuntimeClassification, RuntimeDetector};
use serde::Serialize;

use super::{banner, footer};
use crate::config::{ConfigSource, EffectiveSettings, HelperSettings};

#[derive(Debug, Clone, Serialize)]
pub struct NativeBuildConfig {
    pub settings: HelperSettings,
    pub native_type: RuntimeClassification,
    pub image_tool_available: bool,
    pub sources: Vec<ConfigSource>,
    pub created_at: DateTime<Utc>,
}

impl NativeBuildConfig {
    pub fn collect<E: EnvironmentReader>(
        effective: &EffectiveSettings,
        detector: &RuntimeDetector<E>,
    ) -> Self {
        Self {
            settings: effective.settings.clone(),
            native_type: detector.classify(),
            image_tool_available: detector.is_image_tool_available(),
            sources: effective.sources.clone(),
            created_at: effective.created_at,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_human(&self) -> String {
        let native = &self.settings.native;
        let mut output = String::new();
        banner(&mut output, "QUARKUS NATIVE BUILD CONFIGURATION");
        output.push_str(&format!("Native Build Enabled: {}\n", native.enabled));
        output.push_str(&format!("Container Build: {}\n", native.container_build));
        output.push_str(&format!(
            "Remote Container Build: {}\n",
            native.remote_container_build
        ));
        output.push_str(&format!("Builder Image: {}\n", native.builder_image));
        output.push_str(&format!("Native Image Memory: {}\n", native.image_xmx));
        output.push_str(&format!("Native Only (No JAR): {}\n", native.native_only));
        output.push_str(&format!(
            "Validate Native Environment: {}\n",
            self.settings.validation.validate_native_environment
        ));
        output.push_str(&format!("Native JVM Type: {}\n", self.native_type));
        output.push_str(&format!(
            "Native Image Available: {}\n",
            self.image_tool_available
        ));
        footer(&mut output);

        output.push_str("Sources (lowest precedence first):\n");
        for source in &self.sources {
            match source.path {
                Some(ref path) => {
                    output.push_str(&format!("  {}: {}\n", source.origin.as_str(), path))
                }
                None => output.push_str(&format!("  {}\n", source.origin.as_str())),
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli_layer;
    use nbh_runtime::{StaticEnvironment, JAVA_VM_VERSION};

    #[test]
    fn test_native_build_config() {
        let cli = cli_layer(&["native.container_build=true".to_string()]).unwrap();
        let effective = EffectiveSettings::build(None, None, Some(cli)).unwrap();
        let detector = RuntimeDetector::new(
            StaticEnvironment::new().with_property(JAVA_VM_VERSION, "21.0.2+13-mandrel"),
        );

        let config = NativeBuildConfig::collect(&effective, &detector);
        assert_eq!(config.native_type, RuntimeClassification::Mandrel);
        assert!(!config.image_tool_available);
        assert_eq!(config.sources.len(), 2);

        let human = config.to_human();
        assert!(human.contains("QUARKUS NATIVE BUILD CONFIGURATION"));
        assert!(human.contains("Container Build: true"));
        assert!(human.contains("Native JVM Type: Mandrel"));
        assert!(human.contains("  builtin\n  cli\n"));

        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(json["settings"]["native"]["container_build"], true);
        assert_eq!(json["native_type"], "Mandrel");
    }
}

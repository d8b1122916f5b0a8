//! Build detail: toolchain locations, every tracked property, helper settings
//! and the environment verdict.

use std::path::{Path, PathBuf};

use nbh_properties::{LocalSource, OverrideSource, PropertyResolver, ResolvedProperty};
use nbh_runtime::{
    is_executable_file, is_windows, EnvironmentReader, EnvironmentValidator, ImageToolInfo,
    RuntimeClassification, JAVA_HOME,
};
use serde::Serialize;

use super::{banner, footer, verdict};
use crate::config::HelperSettings;

#[derive(Debug, Clone, Serialize)]
pub struct BuildDetail {
    pub java_home: Option<String>,
    /// `<java_home>/bin/java`, when it exists
    pub java_binary: Option<PathBuf>,
    pub image_tool: ImageToolInfo,
    pub properties: Vec<ResolvedProperty>,
    pub settings: HelperSettings,
    pub environment_valid: bool,
    pub native_type: RuntimeClassification,
}

impl BuildDetail {
    pub fn collect<O, L, E>(
        resolver: &PropertyResolver<'_, O, L>,
        validator: &EnvironmentValidator<E>,
        settings: &HelperSettings,
    ) -> Self
    where
        O: OverrideSource + ?Sized,
        L: LocalSource + ?Sized,
        E: EnvironmentReader,
    {
        let detector = validator.detector();
        let env = detector.reader();
        let java_home = env.property(JAVA_HOME).filter(|h| !h.is_empty());

        let launcher = if is_windows(&env.os_name()) {
            "java.exe"
        } else {
            "java"
        };
        let java_binary = java_home
            .as_deref()
            .map(|home| Path::new(home).join("bin").join(launcher))
            .filter(|path| is_executable_file(path));

        Self {
            java_home,
            java_binary,
            image_tool: detector.image_tool_info(),
            properties: resolver.resolve_catalog(),
            settings: settings.clone(),
            environment_valid: validator.evaluate().is_valid(),
            native_type: detector.classify(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_human(&self) -> String {
        let mut output = String::new();
        banner(&mut output, "QUARKUS BUILD - DETAIL");

        let not_found = "not found".to_string();
        output.push_str(&format!(
            "Java Home: {}\n",
            self.java_home.as_deref().unwrap_or("(not set)")
        ));
        output.push_str(&format!(
            "Java JDK Binary: {}\n",
            self.java_binary
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| not_found.clone())
        ));
        output.push_str(&format!(
            "Native Image Binary: {}\n",
            self.image_tool
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or(not_found)
        ));
        output.push('\n');

        for property in &self.properties {
            output.push_str(&format!("{}: {}\n", property.label, property.status));
        }
        output.push('\n');

        let native = &self.settings.native;
        output.push_str(&format!("Native Only (No JAR): {}\n", native.native_only));
        output.push_str(&format!("Helper Builder Image: {}\n", native.builder_image));
        output.push_str(&format!("Helper Native Image Memory: {}\n", native.image_xmx));
        output.push_str(&format!(
            "Validate Native Environment: {}\n",
            verdict(self.environment_valid, "Valid", "Invalid")
        ));
        output.push_str(&format!("Native JVM Type: {}\n", self.native_type));
        output.push_str(&format!(
            "Native Image Available: {}\n",
            verdict(self.image_tool.available, "Valid", "Invalid")
        ));
        footer(&mut output);
        output
    }
}

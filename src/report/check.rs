//! Native build environment check.

use nbh_runtime::{
    DetectionResults, EnvironmentReader, ImageToolInfo, ReleaseFile, RuntimeClassification,
    RuntimeDetector, RuntimeInfo, REMEDIATION,
};
use serde::Serialize;

use super::verdict;

/// A notable entry from the installation's `release` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseHighlight {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentCheck {
    pub info: RuntimeInfo,
    pub detection: DetectionResults,
    pub classification: RuntimeClassification,
    pub image_tool: ImageToolInfo,
    pub release_highlights: Vec<ReleaseHighlight>,
    pub ready: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remediation: Vec<String>,
}

impl EnvironmentCheck {
    pub fn collect<E: EnvironmentReader>(detector: &RuntimeDetector<E>) -> Self {
        let info = detector.snapshot();
        let detection = detector.detection_results();
        let ready = detection.native_capable && detection.image_tool_available;

        let release_highlights = ReleaseFile::parse(&info.release_content)
            .highlights()
            .into_iter()
            .map(|(key, value)| ReleaseHighlight {
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect();

        let remediation = if ready {
            Vec::new()
        } else {
            REMEDIATION.iter().map(|s| s.to_string()).collect()
        };

        Self {
            classification: detector.classify(),
            image_tool: detector.image_tool_info(),
            info,
            detection,
            release_highlights,
            ready,
            remediation,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_human(&self) -> String {
        let mut output = String::new();
        let info = &self.info;
        let fields = info.fields();

        output.push_str("Native Build Environment Check:\n");
        output.push_str(&format!(
            "  Current JVM: {} {}\n",
            fields[0].1, fields[4].1
        ));
        output.push_str(&format!("  Runtime Name: {}\n", fields[1].1));
        output.push_str(&format!("  VM Name: {}\n", fields[2].1));
        output.push_str(&format!("  VM Version: {}\n", fields[3].1));
        output.push_str(&format!("  Java Home: {}\n", fields[5].1));
        output.push_str(&format!("  Mandrel in Path: {}\n", info.mandrel_in_path));
        output.push_str(&format!(
            "  GraalVM: {}\n",
            verdict(self.detection.graalvm, "Detected", "Not detected")
        ));
        output.push_str(&format!(
            "  Mandrel: {}\n",
            verdict(self.detection.mandrel, "Detected", "Not detected")
        ));
        output.push_str(&format!(
            "  Native Capable: {}\n",
            verdict(
                self.detection.native_capable,
                self.classification.as_str(),
                "Not detected"
            )
        ));
        output.push_str(&format!(
            "  Native Image: {}\n",
            verdict(self.image_tool.available, "Available", "Not available")
        ));
        if let Some(ref path) = self.image_tool.path {
            output.push_str(&format!("    Path: {}\n", path.display()));
        }
        if let Some(ref version) = self.image_tool.version {
            output.push_str(&format!("    Version: {}\n", version));
        }

        output.push_str("\nRelease File Content:\n");
        output.push_str(info.release_content.trim_end());
        output.push('\n');

        if !self.release_highlights.is_empty() {
            output.push_str("\nRelease Highlights:\n");
            for highlight in &self.release_highlights {
                output.push_str(&format!("  {}: {}\n", highlight.key, highlight.value));
            }
        }

        if self.ready {
            output.push_str(&format!(
                "\nNative build environment is ready with {}.\n",
                self.classification
            ));
        } else {
            output.push_str("\nTo enable native builds:\n");
            for step in &self.remediation {
                output.push_str(&format!("  {}\n", step));
            }
            output.push_str(
                "\nThis project requires GraalVM or Mandrel with native-image for building.\n",
            );
        }

        output
    }
}

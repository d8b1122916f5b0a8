//! Native build environment gate.

use serde::{Deserialize, Serialize};

use crate::detector::RuntimeDetector;
use crate::info::{DetectionResults, RuntimeClassification, RuntimeInfo};
use crate::reader::EnvironmentReader;

/// Remediation steps shown with every failure.
pub const REMEDIATION: &[&str] = &[
    "1. Install GraalVM from https://www.graalvm.org/downloads/",
    "   OR",
    "   Install Mandrel from https://github.com/graalvm/mandrel/releases",
    "2. Set JAVA_HOME to point to the GraalVM/Mandrel installation",
    "3. Install native-image: gu install native-image (GraalVM) or use the bundled one (Mandrel)",
    "4. Verify with: native-image --version",
];

/// Everything known about an environment that failed the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidEnvironment {
    pub classification: RuntimeClassification,
    pub native_capable: bool,
    pub image_tool_available: bool,
    pub info: RuntimeInfo,
    pub detection: DetectionResults,
}

/// Result of evaluating the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ValidationOutcome {
    Valid,
    Invalid(Box<InvalidEnvironment>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// Errors raised by [`EnvironmentValidator::validate`].
#[derive(Debug, thiserror::Error)]
pub enum NativeEnvironmentError {
    #[error("{}", render_failure(.0))]
    RequirementsNotMet(Box<InvalidEnvironment>),
}

impl NativeEnvironmentError {
    /// Structured payload behind the message.
    pub fn payload(&self) -> &InvalidEnvironment {
        match self {
            NativeEnvironmentError::RequirementsNotMet(env) => env,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.payload())
    }
}

/// Gates native builds on a native-capable runtime with the image tool present.
pub struct EnvironmentValidator<E> {
    detector: RuntimeDetector<E>,
}

impl<E: EnvironmentReader> EnvironmentValidator<E> {
    pub fn new(env: E) -> Self {
        Self {
            detector: RuntimeDetector::new(env),
        }
    }

    pub fn detector(&self) -> &RuntimeDetector<E> {
        &self.detector
    }

    /// Evaluate the gate without failing.
    pub fn evaluate(&self) -> ValidationOutcome {
        let native_capable = self.detector.is_native_capable();
        let image_tool_available = self.detector.is_image_tool_available();

        if native_capable && image_tool_available {
            return ValidationOutcome::Valid;
        }

        ValidationOutcome::Invalid(Box::new(InvalidEnvironment {
            classification: self.detector.classify(),
            native_capable,
            image_tool_available,
            info: self.detector.snapshot(),
            detection: DetectionResults {
                graalvm: self.detector.is_graalvm(),
                mandrel: self.detector.is_mandrel(),
                native_capable,
                image_tool_available,
            },
        }))
    }

    /// Fail with the full diagnostic when the environment cannot build natively.
    pub fn validate(&self) -> Result<(), NativeEnvironmentError> {
        match self.evaluate() {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(env) => {
                tracing::warn!(
                    classification = %env.classification,
                    native_capable = env.native_capable,
                    image_tool_available = env.image_tool_available,
                    "native build requirements not met"
                );
                Err(NativeEnvironmentError::RequirementsNotMet(env))
            }
        }
    }
}

fn render_failure(env: &InvalidEnvironment) -> String {
    let mut output = String::new();
    output.push_str("NATIVE BUILD REQUIREMENTS NOT MET\n\n");
    output.push_str("This project is configured for native builds and requires:\n");
    if env.native_capable {
        output.push_str(&format!(
            "  [ok]   Native-capable JVM: {} detected\n",
            env.classification
        ));
    } else {
        output.push_str("  [fail] Native-capable JVM: Not detected\n");
    }
    if env.image_tool_available {
        output.push_str("  [ok]   Native Image: Available\n");
    } else {
        output.push_str("  [fail] Native Image: Not available\n");
    }
    output.push('\n');

    output.push_str("Current Environment:\n");
    for (label, value) in env.info.fields() {
        output.push_str(&format!("  - {}: {}\n", label, value));
    }
    output.push_str(&format!(
        "  - Mandrel in Path: {}\n\n",
        env.info.mandrel_in_path
    ));

    output.push_str("Release File Content:\n");
    for line in env.info.release_content.lines() {
        output.push_str(&format!("  {}\n", line));
    }
    output.push('\n');

    output.push_str("Detection Results:\n");
    output.push_str(&format!("  - is_graalvm: {}\n", env.detection.graalvm));
    output.push_str(&format!("  - is_mandrel: {}\n", env.detection.mandrel));
    output.push_str(&format!(
        "  - is_native_capable: {}\n",
        env.detection.native_capable
    ));
    output.push_str(&format!(
        "  - is_image_tool_available: {}\n\n",
        env.detection.image_tool_available
    ));

    output.push_str("To fix this:\n");
    for step in REMEDIATION {
        output.push_str(&format!("  {}\n", step));
    }
    output
}

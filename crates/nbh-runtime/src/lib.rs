//! GraalVM/Mandrel detection and native build environment validation.
//!
//! All lookups go through an [`EnvironmentReader`]. [`SystemEnvironment`]
//! reads the real machine; [`StaticEnvironment`] describes one up front.
//!
//! ```
//! use nbh_runtime::{EnvironmentValidator, RuntimeClassification, StaticEnvironment, JAVA_VENDOR};
//!
//! let env = StaticEnvironment::new().with_property(JAVA_VENDOR, "GraalVM Community");
//! let validator = EnvironmentValidator::new(env);
//! assert_eq!(validator.detector().classify(), RuntimeClassification::GraalVm);
//! // No native-image anywhere, so the gate still fails.
//! assert!(validator.validate().is_err());
//! ```

mod detector;
mod info;
mod reader;
mod release;
mod system;
mod tool;
mod validator;

pub use detector::{RuntimeDetector, GRAALVM_MARKER, MANDREL_MARKER};
pub use info::{DetectionResults, RuntimeClassification, RuntimeInfo, NO_RELEASE_FILE};
pub use reader::{
    is_windows, path_separator, EnvironmentReader, StaticEnvironment, JAVA_HOME,
    JAVA_RUNTIME_NAME, JAVA_VENDOR, JAVA_VERSION, JAVA_VM_NAME, JAVA_VM_VERSION, OS_NAME,
};
pub use release::{ReleaseFile, HIGHLIGHT_KEYS};
pub use system::{parse_settings_output, SystemEnvironment};
pub use tool::{image_tool_name, is_executable_file, ImageToolInfo, IMAGE_TOOL};
pub use validator::{
    EnvironmentValidator, InvalidEnvironment, NativeEnvironmentError, ValidationOutcome,
    REMEDIATION,
};

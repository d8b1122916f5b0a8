//! Native Build Helper - diagnostics for Quarkus native builds
//!
//! Reconciles build properties set through `-D` overrides and the project's
//! local property file, and checks whether the installed runtime (GraalVM or
//! Mandrel) can produce a native executable.

pub mod config;
pub mod context;
pub mod exit;
pub mod report;
pub mod runner;
pub mod sources;

pub use config::{ConfigError, EffectiveSettings, HelperSettings};
pub use context::{ContextError, ContextOptions, ProjectContext};
pub use exit::ExitCode;
pub use report::{BuildDetail, BuildOverview, EnvironmentCheck, NativeBuildConfig};
pub use runner::RunnerCheck;
pub use sources::{LocalProperties, OverrideProperties, SourceError};

pub use nbh_properties as properties;
pub use nbh_runtime as runtime;

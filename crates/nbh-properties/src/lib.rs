//! Two-source property reconciliation.
//!
//! A property can be set through an override channel (process-level
//! `-D key=value` flags) and through the project-local store
//! (`gradle.properties` or a TOML equivalent). The resolver reads both,
//! and reports the effective value or a mismatch between them.

mod catalog;
mod resolver;
mod source;
mod status;

pub use catalog::{
    KeyKind, PropertyStatus, ResolvedProperty, TrackedKey, ADDITIONAL_BUILD_ARGS, BUILDER_IMAGE,
    NATIVE_CONTAINER_BUILD, NATIVE_ENABLED, NATIVE_IMAGE_XMX, NATIVE_REMOTE_CONTAINER_BUILD,
    PACKAGE_JAR_ENABLED, TRACKED_KEYS,
};
pub use resolver::PropertyResolver;
pub use source::{LocalSource, LocalValue, OverrideSource};
pub use status::{format_bool, BooleanPropertyStatus, StringPropertyStatus, NOT_SET};

/// Parse a boolean the way the JVM's `Boolean.parseBoolean` does.
///
/// Only a case-insensitive `"true"` is true. Surrounding whitespace is not
/// stripped, so `" true"` is false.
pub fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

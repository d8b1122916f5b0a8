//! Catalog of the build properties the helper reports on.

use std::fmt;

use serde::Serialize;

use crate::resolver::PropertyResolver;
use crate::source::{LocalSource, OverrideSource};
use crate::status::{BooleanPropertyStatus, StringPropertyStatus};

/// How a tracked key is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    Boolean,
    String,
}

/// A property key the reports track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedKey {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: KeyKind,
}

pub const NATIVE_ENABLED: TrackedKey = TrackedKey {
    key: "quarkus.native.enabled",
    label: "Native Build Enabled",
    kind: KeyKind::Boolean,
};

pub const NATIVE_CONTAINER_BUILD: TrackedKey = TrackedKey {
    key: "quarkus.native.container-build",
    label: "Container Build",
    kind: KeyKind::Boolean,
};

pub const PACKAGE_JAR_ENABLED: TrackedKey = TrackedKey {
    key: "quarkus.package.jar.enabled",
    label: "JAR Build Enabled",
    kind: KeyKind::Boolean,
};

pub const NATIVE_REMOTE_CONTAINER_BUILD: TrackedKey = TrackedKey {
    key: "quarkus.native.remote-container-build",
    label: "Remote Container Build",
    kind: KeyKind::Boolean,
};

pub const BUILDER_IMAGE: TrackedKey = TrackedKey {
    key: "quarkus.native.builder-image",
    label: "Builder Image",
    kind: KeyKind::String,
};

pub const NATIVE_IMAGE_XMX: TrackedKey = TrackedKey {
    key: "quarkus.native.native-image-xmx",
    label: "Native Image Memory",
    kind: KeyKind::String,
};

pub const ADDITIONAL_BUILD_ARGS: TrackedKey = TrackedKey {
    key: "quarkus.native.additional-build-args",
    label: "Additional Build Args",
    kind: KeyKind::String,
};

/// All tracked keys, in report order.
pub const TRACKED_KEYS: &[TrackedKey] = &[
    NATIVE_ENABLED,
    PACKAGE_JAR_ENABLED,
    NATIVE_CONTAINER_BUILD,
    NATIVE_REMOTE_CONTAINER_BUILD,
    BUILDER_IMAGE,
    NATIVE_IMAGE_XMX,
    ADDITIONAL_BUILD_ARGS,
];

/// Resolution of a tracked key, whichever kind it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyStatus {
    Boolean(BooleanPropertyStatus),
    String(StringPropertyStatus),
}

impl PropertyStatus {
    pub fn kind(&self) -> KeyKind {
        match self {
            PropertyStatus::Boolean(_) => KeyKind::Boolean,
            PropertyStatus::String(_) => KeyKind::String,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        match self {
            PropertyStatus::Boolean(s) => s.is_mismatch(),
            PropertyStatus::String(s) => s.is_mismatch(),
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyStatus::Boolean(s) => s.fmt(f),
            PropertyStatus::String(s) => s.fmt(f),
        }
    }
}

/// A tracked key together with its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProperty {
    pub key: &'static str,
    pub label: &'static str,
    pub status: PropertyStatus,
}

impl<'a, O, L> PropertyResolver<'a, O, L>
where
    O: OverrideSource + ?Sized,
    L: LocalSource + ?Sized,
{
    /// Resolve a tracked key according to its kind.
    pub fn resolve_tracked(&self, tracked: &TrackedKey) -> PropertyStatus {
        match tracked.kind {
            KeyKind::Boolean => PropertyStatus::Boolean(self.resolve_bool(tracked.key)),
            KeyKind::String => PropertyStatus::String(self.resolve_string(tracked.key)),
        }
    }

    /// Resolve every key in [`TRACKED_KEYS`].
    pub fn resolve_catalog(&self) -> Vec<ResolvedProperty> {
        TRACKED_KEYS
            .iter()
            .map(|tracked| ResolvedProperty {
                key: tracked.key,
                label: tracked.label,
                status: self.resolve_tracked(tracked),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LocalValue;
    use std::collections::BTreeMap;

    #[test]
    fn test_catalog_keys_unique() {
        let mut keys: Vec<_> = TRACKED_KEYS.iter().map(|k| k.key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), TRACKED_KEYS.len());
    }

    #[test]
    fn test_resolve_tracked_by_kind() {
        let overrides: BTreeMap<String, String> = BTreeMap::new();
        let mut local = BTreeMap::new();
        local.insert(NATIVE_ENABLED.key.to_string(), LocalValue::Bool(true));
        local.insert(NATIVE_IMAGE_XMX.key.to_string(), LocalValue::from("6g"));

        let resolver = PropertyResolver::new(&overrides, &local);

        assert_eq!(
            resolver.resolve_tracked(&NATIVE_ENABLED),
            PropertyStatus::Boolean(BooleanPropertyStatus::Enabled)
        );
        assert_eq!(
            resolver.resolve_tracked(&NATIVE_IMAGE_XMX),
            PropertyStatus::String(StringPropertyStatus::Value("6g".to_string()))
        );
        assert_eq!(
            resolver.resolve_tracked(&BUILDER_IMAGE).to_string(),
            "not set"
        );
    }

    #[test]
    fn test_resolve_catalog_order_and_mismatch() {
        let mut overrides = BTreeMap::new();
        overrides.insert(NATIVE_CONTAINER_BUILD.key.to_string(), "true".to_string());
        let local: BTreeMap<String, LocalValue> = BTreeMap::new();

        let resolver = PropertyResolver::new(&overrides, &local);
        let resolved = resolver.resolve_catalog();

        assert_eq!(resolved.len(), TRACKED_KEYS.len());
        assert_eq!(resolved[0].key, NATIVE_ENABLED.key);

        let mismatched: Vec<_> = resolved
            .iter()
            .filter(|r| r.status.is_mismatch())
            .map(|r| r.key)
            .collect();
        assert_eq!(mismatched, vec![NATIVE_CONTAINER_BUILD.key]);
    }
}

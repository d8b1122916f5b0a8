//! Build overview: the packaging switches and the builder image.

use nbh_properties::{
    KeyKind, LocalSource, OverrideSource, PropertyResolver, ResolvedProperty, TrackedKey,
    BUILDER_IMAGE, NATIVE_CONTAINER_BUILD, NATIVE_ENABLED, NATIVE_REMOTE_CONTAINER_BUILD,
    PACKAGE_JAR_ENABLED,
};
use serde::Serialize;

use super::{banner, footer};

/// Keys shown in the overview, in display order.
pub const OVERVIEW_KEYS: [TrackedKey; 5] = [
    NATIVE_ENABLED,
    NATIVE_CONTAINER_BUILD,
    PACKAGE_JAR_ENABLED,
    NATIVE_REMOTE_CONTAINER_BUILD,
    BUILDER_IMAGE,
];

#[derive(Debug, Clone, Serialize)]
pub struct BuildOverview {
    pub properties: Vec<ResolvedProperty>,
}

impl BuildOverview {
    pub fn collect<O, L>(resolver: &PropertyResolver<'_, O, L>) -> Self
    where
        O: OverrideSource + ?Sized,
        L: LocalSource + ?Sized,
    {
        let properties = OVERVIEW_KEYS
            .iter()
            .map(|tracked| ResolvedProperty {
                key: tracked.key,
                label: tracked.label,
                status: resolver.resolve_tracked(tracked),
            })
            .collect();
        Self { properties }
    }

    /// Whether any key disagrees between the two sources.
    pub fn has_mismatch(&self) -> bool {
        self.properties.iter().any(|p| p.status.is_mismatch())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_human(&self) -> String {
        let mut output = String::new();
        banner(&mut output, "QUARKUS BUILD - OVERVIEW");
        for property in &self.properties {
            let name = match property.status.kind() {
                KeyKind::Boolean => property.key,
                KeyKind::String => property.label,
            };
            output.push_str(&format!("{}: {}\n", name, property.status));
        }
        footer(&mut output);
        output
    }
}

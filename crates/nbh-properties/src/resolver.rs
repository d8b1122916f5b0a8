//! Property resolution across the override and local sources.

use tracing::debug;

use crate::parse_bool;
use crate::source::{LocalSource, OverrideSource};
use crate::status::{BooleanPropertyStatus, StringPropertyStatus};

/// Resolves properties against an override source and a local source.
///
/// Both sources are borrowed read-only; every call reads them afresh.
pub struct PropertyResolver<'a, O: ?Sized, L: ?Sized> {
    overrides: &'a O,
    local: &'a L,
}

impl<'a, O, L> PropertyResolver<'a, O, L>
where
    O: OverrideSource + ?Sized,
    L: LocalSource + ?Sized,
{
    pub fn new(overrides: &'a O, local: &'a L) -> Self {
        Self { overrides, local }
    }

    /// Override value parsed as a boolean, or `None` when undefined.
    pub fn system_bool(&self, key: &str) -> Option<bool> {
        self.overrides.override_value(key).map(|v| parse_bool(&v))
    }

    /// Local value parsed as a boolean. Undefined is `false`.
    pub fn local_bool(&self, key: &str) -> bool {
        self.local
            .local_value(key)
            .map(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// Local value as text, or `None` when undefined.
    pub fn local_string(&self, key: &str) -> Option<String> {
        self.local.local_value(key).map(|v| v.to_text())
    }

    /// Resolve a boolean property.
    ///
    /// An undefined override defers to the local value and can never
    /// produce a mismatch.
    pub fn resolve_bool(&self, key: &str) -> BooleanPropertyStatus {
        let local_value = self.local_bool(key);

        let Some(system_value) = self.system_bool(key) else {
            return BooleanPropertyStatus::from_value(local_value);
        };

        if system_value == local_value {
            BooleanPropertyStatus::from_value(system_value)
        } else {
            debug!(key, system_value, local_value, "boolean property mismatch");
            BooleanPropertyStatus::Mismatch {
                system_value,
                local_value,
            }
        }
    }

    /// Resolve a string property.
    ///
    /// An empty override is treated the same as an undefined one.
    pub fn resolve_string(&self, key: &str) -> StringPropertyStatus {
        let local_value = self.local_string(key);

        let system_value = match self.overrides.override_value(key) {
            Some(v) if !v.is_empty() => v,
            _ => {
                return match local_value {
                    Some(v) => StringPropertyStatus::Value(v),
                    None => StringPropertyStatus::NotSet,
                }
            }
        };

        if local_value.as_deref() == Some(system_value.as_str()) {
            StringPropertyStatus::Value(system_value)
        } else {
            debug!(key, %system_value, ?local_value, "string property mismatch");
            StringPropertyStatus::Mismatch {
                system_value,
                local_value,
            }
        }
    }
}

//! Resolution results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder shown for a string property with no value.
pub const NOT_SET: &str = "not set";

/// Render a boolean as `enabled` / `disabled`.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "enabled"
    } else {
        "disabled"
    }
}

/// Effective state of a boolean property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BooleanPropertyStatus {
    Enabled,
    Disabled,
    /// Both sources define the key and disagree.
    Mismatch { system_value: bool, local_value: bool },
}

impl BooleanPropertyStatus {
    pub(crate) fn from_value(value: bool) -> Self {
        if value {
            BooleanPropertyStatus::Enabled
        } else {
            BooleanPropertyStatus::Disabled
        }
    }

    /// The agreed value, or `None` on mismatch.
    pub fn value(&self) -> Option<bool> {
        match self {
            BooleanPropertyStatus::Enabled => Some(true),
            BooleanPropertyStatus::Disabled => Some(false),
            BooleanPropertyStatus::Mismatch { .. } => None,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, BooleanPropertyStatus::Mismatch { .. })
    }
}

impl fmt::Display for BooleanPropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanPropertyStatus::Enabled => f.write_str("Enabled"),
            BooleanPropertyStatus::Disabled => f.write_str("Disabled"),
            BooleanPropertyStatus::Mismatch {
                system_value,
                local_value,
            } => write!(
                f,
                "Mismatch: System={}, Local={}",
                format_bool(*system_value),
                format_bool(*local_value)
            ),
        }
    }
}

/// Effective state of a string property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum StringPropertyStatus {
    Value(String),
    NotSet,
    /// The override is set and differs from the local value.
    ///
    /// `local_value` is `None` when the local store does not define the key.
    Mismatch {
        system_value: String,
        local_value: Option<String>,
    },
}

impl StringPropertyStatus {
    /// The agreed value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            StringPropertyStatus::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, StringPropertyStatus::Mismatch { .. })
    }
}

impl fmt::Display for StringPropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringPropertyStatus::Value(v) => f.write_str(v),
            StringPropertyStatus::NotSet => f.write_str(NOT_SET),
            StringPropertyStatus::Mismatch {
                system_value,
                local_value,
            } => write!(
                f,
                "Mismatch: System={}, Local={}",
                system_value,
                local_value.as_deref().unwrap_or(NOT_SET)
            ),
        }
    }
}

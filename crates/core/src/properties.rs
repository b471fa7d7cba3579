//! Widget property validation and configuration staging.
//!
//! Property values are stored as strings; each definition declares a
//! [`PropertyKind`] that decides how the raw string is validated. The
//! functions here are purely functional: [`validate_value`] checks one
//! value, [`stage_configuration`] evaluates a full submitted property
//! set against every definition (no early exit) and returns what should
//! be persisted. Whether the staged values or the error map win is the
//! repository's business.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Property metadata
// ---------------------------------------------------------------------------

/// The declared type of a widget property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Boolean,
    Integer,
    Float,
    Text,
}

impl PropertyKind {
    /// Storage name for the `widget_properties.value_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Boolean => "boolean",
            PropertyKind::Integer => "integer",
            PropertyKind::Float => "float",
            PropertyKind::Text => "text",
        }
    }
}

/// Externally supplied metadata for one configurable widget property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetPropertyDefinition {
    pub key: String,
    #[serde(default)]
    pub default_value: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub required: bool,
}

// ---------------------------------------------------------------------------
// Single-value validation
// ---------------------------------------------------------------------------

/// Validate one raw value against its definition.
///
/// An empty or absent raw value is replaced by the definition default.
/// If the result is still empty and the kind is boolean it coerces to
/// the literal `"false"` (an unchecked checkbox submits nothing). The
/// `Ok` value is the resolved string to persist; `Err` carries the
/// validation messages for this key.
pub fn validate_value(
    def: &WidgetPropertyDefinition,
    raw: Option<&str>,
) -> Result<String, Vec<String>> {
    let mut value = match raw {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => def.default_value.clone(),
    };
    if value.is_empty() && def.kind == PropertyKind::Boolean {
        value = "false".to_string();
    }

    let mut errors = Vec::new();

    if value.is_empty() {
        if def.required {
            errors.push(format!("Property '{}' is required", def.key));
        }
        // An empty optional value has nothing left to type-check.
        return if errors.is_empty() { Ok(value) } else { Err(errors) };
    }

    match def.kind {
        PropertyKind::Boolean => {
            if value != "true" && value != "false" {
                errors.push(format!(
                    "Property '{}' must be 'true' or 'false', got '{value}'",
                    def.key
                ));
            }
        }
        PropertyKind::Integer => {
            if value.parse::<i64>().is_err() {
                errors.push(format!(
                    "Property '{}' must be an integer, got '{value}'",
                    def.key
                ));
            }
        }
        PropertyKind::Float => {
            if value.parse::<f64>().is_err() {
                errors.push(format!(
                    "Property '{}' must be a number, got '{value}'",
                    def.key
                ));
            }
        }
        PropertyKind::Text => {}
    }

    if errors.is_empty() { Ok(value) } else { Err(errors) }
}

// ---------------------------------------------------------------------------
// Full-set staging
// ---------------------------------------------------------------------------

/// One validated value ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedValue {
    pub key: String,
    pub value: String,
    pub kind: PropertyKind,
}

/// Outcome of evaluating a submitted property set against every
/// definition of a widget.
///
/// `values` holds the keys that validated individually; `errors_by_key`
/// holds the messages for the ones that did not. Whether `values` gets
/// persisted is decided by the whole set: any entry in `errors_by_key`
/// routes *all* keys to the unset branch.
#[derive(Debug, Default)]
pub struct ConfigurationStaging {
    pub values: Vec<StagedValue>,
    pub errors_by_key: BTreeMap<String, Vec<String>>,
}

impl ConfigurationStaging {
    /// True when every property validated and the staged values may be
    /// persisted.
    pub fn is_valid(&self) -> bool {
        self.errors_by_key.is_empty()
    }
}

/// Evaluate `submitted` against every definition in `defs`.
///
/// Every definition is visited, not just submitted keys, because the
/// final `configured` flag depends on the full error set. Keys absent
/// from `submitted` fall back to their defaults via [`validate_value`].
pub fn stage_configuration(
    defs: &[WidgetPropertyDefinition],
    submitted: &BTreeMap<String, String>,
) -> ConfigurationStaging {
    let mut staging = ConfigurationStaging::default();
    for def in defs {
        let raw = submitted.get(&def.key).map(String::as_str);
        match validate_value(def, raw) {
            Ok(value) => staging.values.push(StagedValue {
                key: def.key.clone(),
                value,
                kind: def.kind,
            }),
            Err(errors) => {
                staging.errors_by_key.insert(def.key.clone(), errors);
            }
        }
    }
    staging
}

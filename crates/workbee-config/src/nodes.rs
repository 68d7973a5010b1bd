//! Helpers for extracting values from KDL nodes.

use kdl::{KdlNode, KdlValue};

use crate::{ConfigError, ConfigResult};

pub(crate) fn first_arg(node: &KdlNode) -> Option<&KdlValue> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .map(|e| e.value())
}

pub(crate) fn get_first_string_arg(node: &KdlNode) -> Option<String> {
    first_arg(node)
        .and_then(|v| v.as_string())
        .map(|s| s.to_string())
}

pub(crate) fn get_all_string_args(node: &KdlNode) -> Vec<String> {
    node.entries()
        .iter()
        .filter(|e| e.name().is_none())
        .filter_map(|e| e.value().as_string())
        .map(|s| s.to_string())
        .collect()
}

pub(crate) fn get_string_prop(node: &KdlNode, name: &str) -> Option<String> {
    node.get(name)
        .and_then(|v| v.as_string())
        .map(|s| s.to_string())
}

/// First argument as a non-negative integer.
pub(crate) fn get_u64_arg(node: &KdlNode, field: &str) -> ConfigResult<u64> {
    let value = first_arg(node).ok_or_else(|| ConfigError::MissingField(field.to_string()))?;
    as_u64(value, field)
}

pub(crate) fn get_u64_prop(node: &KdlNode, name: &str) -> ConfigResult<Option<u64>> {
    node.get(name).map(|v| as_u64(v, name)).transpose()
}

/// Property as a number; integers and decimals are both accepted.
pub(crate) fn get_number_prop(node: &KdlNode, name: &str) -> ConfigResult<Option<f64>> {
    match node.get(name) {
        None => Ok(None),
        Some(v) => {
            if let Some(f) = v.as_float() {
                Ok(Some(f))
            } else if let Some(i) = v.as_integer() {
                Ok(Some(i as f64))
            } else {
                Err(ConfigError::InvalidValue {
                    field: name.to_string(),
                    message: format!("expected a number, got {}", v),
                })
            }
        }
    }
}

fn as_u64(value: &KdlValue, field: &str) -> ConfigResult<u64> {
    value
        .as_integer()
        .and_then(|i| u64::try_from(i).ok())
        .ok_or_else(|| ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("expected a non-negative integer, got {}", value),
        })
}

//! Raw attribute value shapes and normalization.
//!
//! Authors may write a file-pattern attribute as a single string, a list of
//! strings, or a mapping from group name to either of those (resource bundles
//! keyed by bundle name). Everything funnels through one normalization point
//! so the rest of the crate never inspects raw JSON shapes.

use std::collections::BTreeMap;

use serde_json::Value;

/// Raised when a raw value does not have the shape its attribute requires.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ShapeError(pub String);

/// Normalized value of a file-pattern attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patterns {
    /// An ordered sequence of path-glob patterns.
    Flat(Vec<String>),
    /// Per-group sequences, e.g. resource bundles keyed by bundle name.
    Grouped(BTreeMap<String, Vec<String>>),
}

impl Default for Patterns {
    fn default() -> Self {
        Patterns::Flat(Vec::new())
    }
}

impl Patterns {
    /// Normalize a raw value: a string is a one-element list, a list of
    /// strings stays flat, a string-keyed mapping becomes grouped.
    pub fn from_value(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::String(s) => Ok(Patterns::Flat(vec![s.clone()])),
            Value::Array(_) => Ok(Patterns::Flat(string_list(value)?)),
            Value::Object(map) => {
                let mut groups = BTreeMap::new();
                for (group, raw) in map {
                    groups.insert(group.clone(), string_list(raw)?);
                }
                Ok(Patterns::Grouped(groups))
            }
            other => Err(ShapeError(format!(
                "expected a pattern, a list of patterns, or a group mapping, got {other}"
            ))),
        }
    }

    /// Number of patterns across all groups.
    pub fn len(&self) -> usize {
        match self {
            Patterns::Flat(list) => list.len(),
            Patterns::Grouped(groups) => groups.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a single sequence: group order first, within-group order
    /// second. Completeness matters here, ordering does not.
    pub fn iter_flat(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Patterns::Flat(list) => Box::new(list.iter().map(String::as_str)),
            Patterns::Grouped(groups) => Box::new(
                groups
                    .values()
                    .flat_map(|list| list.iter().map(String::as_str)),
            ),
        }
    }

    /// Merge a more specific declaration (`other`) into this one. Flat lists
    /// concatenate, grouped mappings union per key; when the two declarations
    /// disagree on shape the more specific one replaces the base.
    pub fn merge(self, other: Patterns) -> Patterns {
        match (self, other) {
            (Patterns::Flat(mut base), Patterns::Flat(extra)) => {
                base.extend(extra);
                Patterns::Flat(base)
            }
            (Patterns::Grouped(mut base), Patterns::Grouped(extra)) => {
                for (group, list) in extra {
                    base.entry(group).or_default().extend(list);
                }
                Patterns::Grouped(base)
            }
            (_, other) => other,
        }
    }
}

/// Normalize a string-or-list-of-strings value.
pub fn string_list(value: &Value) -> Result<Vec<String>, ShapeError> {
    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(ShapeError(format!("expected a string, got {other}"))),
            })
            .collect(),
        other => Err(ShapeError(format!(
            "expected a string or a list of strings, got {other}"
        ))),
    }
}

/// Normalize a dependency declaration: a mapping from dependency name to a
/// requirement string or list of requirement strings (possibly empty).
pub fn dependency_map(value: &Value) -> Result<BTreeMap<String, Vec<String>>, ShapeError> {
    let map = value.as_object().ok_or_else(|| {
        ShapeError(format!(
            "expected a mapping from dependency name to requirements, got {value}"
        ))
    })?;
    let mut deps = BTreeMap::new();
    for (name, raw) in map {
        let requirements = match raw {
            Value::Null => Vec::new(),
            other => string_list(other)?,
        };
        deps.insert(name.clone(), requirements);
    }
    Ok(deps)
}

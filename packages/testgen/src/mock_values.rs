//! Mock value heuristics
//!
//! Placeholder literals for parameters, inputs and return values. Rules are
//! checked in a fixed order:
//!
//! 1. name hints, a case-insensitive substring of the parameter name, first
//!    match wins whatever the declared type;
//! 2. type shape: arrays, Observable-like and Promise-like types;
//! 3. the exact type table;
//! 4. [`FALLBACK_VALUE`].

use crate::type_names;

pub const FALLBACK_VALUE: &str = "{}";

#[derive(Debug, Clone, Copy)]
pub struct NameHint {
    pub patterns: &'static [&'static str],
    pub value: &'static str,
}

pub const NAME_HINTS: &[NameHint] = &[
    NameHint {
        patterns: &["email"],
        value: "'test@example.com'",
    },
    NameHint {
        patterns: &["url", "link"],
        value: "'https://example.com'",
    },
    NameHint {
        patterns: &["name", "title"],
        value: "'Test Name'",
    },
    NameHint {
        patterns: &["id"],
        value: "1",
    },
    NameHint {
        patterns: &["count", "size", "length"],
        value: "10",
    },
];

pub const TYPE_DEFAULTS: &[(&str, &str)] = &[
    ("string", "'test-value'"),
    ("number", "42"),
    ("boolean", "true"),
    ("any", "{}"),
    ("object", "{}"),
    ("unknown", "{}"),
    ("void", "undefined"),
    ("undefined", "undefined"),
    ("null", "null"),
    ("Date", "new Date()"),
    ("Array", "[]"),
];

pub const ARRAY_VALUE: &str = "[]";
pub const OBSERVABLE_VALUE: &str = "of({})";
pub const PROMISE_VALUE: &str = "Promise.resolve({})";

/// Placeholder literal for a value of `type_name`, optionally named `name`.
pub fn mock_value(type_name: &str, name: Option<&str>) -> &'static str {
    let ty = type_names::primary_type(type_name);

    if let Some(hint) = name.and_then(name_hint) {
        return hint;
    }
    if let Some(shaped) = shape_value(ty) {
        return shaped;
    }
    TYPE_DEFAULTS
        .iter()
        .find(|(known, _)| *known == ty)
        .map(|(_, value)| *value)
        .unwrap_or(FALLBACK_VALUE)
}

/// Whether the literal for this type needs `of` from rxjs.
pub fn needs_rxjs(value: &str) -> bool {
    value.starts_with("of(")
}

fn name_hint(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    NAME_HINTS
        .iter()
        .find(|hint| hint.patterns.iter().any(|pattern| lower.contains(pattern)))
        .map(|hint| hint.value)
}

fn shape_value(type_name: &str) -> Option<&'static str> {
    if type_names::is_array_type(type_name) {
        Some(ARRAY_VALUE)
    } else if type_names::is_observable_like(type_name) {
        Some(OBSERVABLE_VALUE)
    } else if type_names::is_promise_like(type_name) {
        Some(PROMISE_VALUE)
    } else {
        None
    }
}

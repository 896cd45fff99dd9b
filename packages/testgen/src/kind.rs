//! Class kind classification
//!
//! A class is classified by the Angular decorator attached to it and nothing
//! else: no inheritance or type analysis takes place.

use serde::Serialize;
use std::fmt;

/// The closed set of classes a spec can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Component,
    Service,
    Pipe,
    Directive,
    Unknown,
}

impl ClassKind {
    /// Order in which decorators are checked when a class carries several.
    pub const PRECEDENCE: [ClassKind; 4] = [
        ClassKind::Component,
        ClassKind::Service,
        ClassKind::Pipe,
        ClassKind::Directive,
    ];

    /// Decorator marking this kind, `None` for `Unknown`.
    pub fn decorator_name(self) -> Option<&'static str> {
        match self {
            ClassKind::Component => Some("Component"),
            ClassKind::Service => Some("Injectable"),
            ClassKind::Pipe => Some("Pipe"),
            ClassKind::Directive => Some("Directive"),
            ClassKind::Unknown => None,
        }
    }

    /// Classify a class from the names of its decorators.
    pub fn classify<'n, I>(decorator_names: I) -> ClassKind
    where
        I: IntoIterator<Item = &'n str>,
    {
        let names: Vec<&str> = decorator_names.into_iter().collect();
        Self::PRECEDENCE
            .into_iter()
            .find(|kind| {
                kind.decorator_name()
                    .is_some_and(|marker| names.iter().any(|name| *name == marker))
            })
            .unwrap_or(ClassKind::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClassKind::Component => "component",
            ClassKind::Service => "service",
            ClassKind::Pipe => "pipe",
            ClassKind::Directive => "directive",
            ClassKind::Unknown => "unknown",
        }
    }

    pub fn is_supported(self) -> bool {
        self != ClassKind::Unknown
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

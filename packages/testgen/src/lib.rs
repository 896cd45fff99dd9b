#![deny(clippy::all)]

/**
 * ng-testgen - Jest spec generation for Angular classes
 *
 * Pure building blocks: the class description model, kind classification,
 * mock value heuristics, the spec emitter, the formatter and the per-kind
 * templates. Nothing in this crate touches the file system.
 */

// Model
pub mod class_description;
pub mod kind;
pub mod type_names;

// Code generation
pub mod emitter;
mod error;
pub mod formatter;
pub mod import_set;
pub mod mock_providers;
pub mod mock_values;
pub mod templates;

// Re-exports
pub use class_description::{
    ClassDescription, Dependency, HostBindingInfo, ImportInfo, ImportKind, InputBinding,
    MethodInfo, OutputBinding, ParameterInfo, PropertyInfo, ReactiveKind, TypeParameterInfo,
    ViewChildQuery, Visibility,
};
pub use error::GenerateError;
pub use formatter::Formatter;
pub use kind::ClassKind;
pub use templates::{GeneratorOptions, TestGenerator};

use thiserror::Error;

use crate::kind::ClassKind;

/// Errors raised while turning a class description into spec text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The class carries no recognized Angular decorator
    #[error("no spec template for class '{class_name}' of kind {kind}")]
    UnsupportedKind { class_name: String, kind: ClassKind },
}

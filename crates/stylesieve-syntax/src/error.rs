//! Errors raised while re-reading an already parsed component value span.

use thiserror::Error;

/// Why a component value span could not be read as a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The span held nothing but whitespace.
    #[error("expected a declaration, found nothing")]
    Empty,
    /// The first value was not an `<ident-token>`.
    #[error("expected a property name, found `{0}`")]
    ExpectedIdent(String),
    /// The property name was not followed by a `<colon-token>`.
    #[error("expected `:` after property `{0}`")]
    ExpectedColon(String),
}

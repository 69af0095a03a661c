//! Grammar construction and semantic-check errors.
//!
//! "No match" is not an error anywhere in this crate: a matcher that cannot
//! match simply yields nothing.

use stylesieve_syntax::SyntaxError;
use thiserror::Error;

/// Errors from building matchers or from semantic checks run inside a
/// [`CheckedMatcher`](crate::CheckedMatcher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A counted quantifier whose minimum exceeds its maximum.
    #[error("invalid quantifier bounds {{{min},{max}}}")]
    InvalidQuantifierBounds {
        /// Requested minimum repetitions.
        min: usize,
        /// Requested maximum repetitions.
        max: usize,
    },

    /// A span that was expected to hold a declaration did not.
    #[error("malformed declaration: {0}")]
    Declaration(#[from] SyntaxError),

    /// A declaration sanitizer refused a declaration.
    #[error("declaration `{property}` rejected: {reason}")]
    DeclarationRejected {
        /// The property name of the rejected declaration.
        property: String,
        /// Why the sanitizer refused it.
        reason: String,
    },
}

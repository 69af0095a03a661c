//! Syntactic matches filtered by a semantic check.

use std::fmt;
use std::sync::Arc;

use stylesieve_syntax::{ComponentValue, Declaration, parse_declaration};
use tracing::trace;

use crate::anything::AnythingMatcher;
use crate::error::GrammarError;
use crate::grammar_match::GrammarMatch;
use crate::matcher::{MatchOptions, Matcher, MatcherRef, Matches};

/// A semantic check over a syntactic match.
///
/// Receives the list the match was made against and the match itself.
/// `Ok(false)` and `Err(_)` both reject the match.
pub type Check =
    Arc<dyn Fn(&[ComponentValue], &GrammarMatch) -> Result<bool, GrammarError> + Send + Sync>;

/// Decides whether a single declaration is acceptable.
///
/// This is the seam to a property sanitizer: the grammar engine only knows
/// that `(name: value)` is declaration-shaped, not whether `name` is a known
/// property or `value` valid for it.
pub trait DeclarationSanitizer: Send + Sync {
    /// Accept `declaration`, or say why not.
    ///
    /// # Errors
    ///
    /// Returns an error describing why the declaration is rejected.
    fn sanitize(&self, declaration: &Declaration) -> Result<(), GrammarError>;
}

impl<F> DeclarationSanitizer for F
where
    F: Fn(&Declaration) -> Result<(), GrammarError> + Send + Sync,
{
    fn sanitize(&self, declaration: &Declaration) -> Result<(), GrammarError> {
        self(declaration)
    }
}

/// Runs a matcher, then keeps only the matches a [`Check`] accepts.
///
/// A rejected match is simply dropped; matching continues with the next
/// candidate of the wrapped matcher and, beyond that, with whatever
/// alternatives the enclosing grammar has.
#[derive(Clone)]
pub struct CheckedMatcher {
    matcher: MatcherRef,
    check: Check,
}

impl CheckedMatcher {
    /// Filter the matches of `matcher` through `check`.
    #[must_use]
    pub fn new(
        matcher: MatcherRef,
        check: impl Fn(&[ComponentValue], &GrammarMatch) -> Result<bool, GrammarError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            matcher,
            check: Arc::new(check),
        }
    }

    /// Grab one or more arbitrary values, read them as a declaration, and
    /// accept the span only if `sanitizer` accepts that declaration.
    #[must_use]
    pub fn declaration(sanitizer: Arc<dyn DeclarationSanitizer>) -> Self {
        Self::new(Arc::new(AnythingMatcher::plus()), move |values, found| {
            let declaration = parse_declaration(&values[found.range()])?;
            sanitizer.sanitize(&declaration)?;
            Ok(true)
        })
    }
}

impl fmt::Debug for CheckedMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedMatcher")
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl Matcher for CheckedMatcher {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        Box::new(
            self.matcher
                .generate_matches(values, start, options)
                .filter(move |found| match (self.check)(values, found) {
                    Ok(accepted) => {
                        if !accepted {
                            trace!(start = found.start(), end = found.end(), "check refused match");
                        }
                        accepted
                    }
                    Err(err) => {
                        trace!(start = found.start(), end = found.end(), %err, "check rejected match");
                        false
                    }
                }),
        )
    }
}

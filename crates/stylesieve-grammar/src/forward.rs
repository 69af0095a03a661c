//! Forward references for self-referential productions.
//!
//! A production such as `<calc-sum>` contains itself. The graph is built
//! around a [`Forward`] handle that stands in for the production, and the
//! real definition is installed afterwards through the matching
//! [`ForwardSlot`]. Every node that embedded the handle sees the definition
//! from then on.

use std::fmt;
use std::iter;
use std::sync::{Arc, OnceLock};

use stylesieve_syntax::ComponentValue;

use crate::matcher::{MatchOptions, Matcher, MatcherRef, Matches};

/// A matcher whose definition is supplied after it has been embedded.
///
/// Until defined it behaves as [`NothingMatcher`](crate::NothingMatcher): it yields no matches at
/// all, so an unfinished production can never be vacuously satisfied.
pub struct Forward {
    target: OnceLock<MatcherRef>,
}

/// The one-shot right to define a [`Forward`].
///
/// Consumed by [`ForwardSlot::define`], so a forward reference can be
/// defined at most once.
#[must_use = "a forward reference that is never defined matches nothing"]
pub struct ForwardSlot {
    forward: Arc<Forward>,
}

impl Forward {
    /// Create an undefined forward reference: the handle to embed, and the
    /// slot that later defines it.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (MatcherRef, ForwardSlot) {
        let forward = Arc::new(Self {
            target: OnceLock::new(),
        });
        let handle: MatcherRef = forward.clone();
        (handle, ForwardSlot { forward })
    }

    /// Returns true once the definition has been installed.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.target.get().is_some()
    }
}

impl ForwardSlot {
    /// Install the definition.
    pub fn define(self, matcher: MatcherRef) {
        // The slot is unique and consumed here, so the cell is still empty.
        let _ = self.forward.target.set(matcher);
    }
}

impl fmt::Debug for Forward {
    // The target usually contains this node again.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_defined() { "defined" } else { "pending" };
        write!(f, "Forward({state})")
    }
}

impl fmt::Debug for ForwardSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ForwardSlot").field(&self.forward).finish()
    }
}

impl Matcher for Forward {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        match self.target.get() {
            Some(target) => target.generate_matches(values, start, options),
            None => Box::new(iter::empty()),
        }
    }
}

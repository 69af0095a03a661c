//! [§ 2.2 Component value combinators](https://www.w3.org/TR/css-values-4/#component-combinators)
//!
//! "A bar (|) separates two or more alternatives: exactly one of them must occur."

use stylesieve_syntax::ComponentValue;

use crate::matcher::{MatchOptions, Matcher, MatcherRef, Matches};

/// Tries each member at the same position and yields every match of every
/// member, in declaration order.
///
/// Later members are still tried after an earlier one succeeds, because an
/// enclosing sequence may need to backtrack into them.
#[derive(Debug, Clone)]
pub struct Alternative {
    matchers: Vec<MatcherRef>,
}

impl Alternative {
    /// Choose between `matchers`.
    #[must_use]
    pub fn new(matchers: Vec<MatcherRef>) -> Self {
        Self { matchers }
    }
}

impl Matcher for Alternative {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        Box::new(
            self.matchers
                .iter()
                .flat_map(move |m| m.generate_matches(values, start, options)),
        )
    }
}

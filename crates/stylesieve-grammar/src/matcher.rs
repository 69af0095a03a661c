//! The matcher contract shared by every grammar node.

use std::fmt;
use std::sync::Arc;

use stylesieve_syntax::ComponentValue;

use crate::grammar_match::GrammarMatch;

/// A lazy sequence of candidate matches, in the matcher's preference order.
pub type Matches<'a> = Box<dyn Iterator<Item = GrammarMatch> + 'a>;

/// A shared, immutable matcher graph node.
pub type MatcherRef = Arc<dyn Matcher>;

/// Options threaded through a matching pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Skip `<whitespace-token>`s between matched items.
    ///
    /// Selector grammars turn this off because whitespace there is the
    /// descendant combinator.
    pub skip_whitespace: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            skip_whitespace: true,
        }
    }
}

impl MatchOptions {
    /// Options with whitespace skipping disabled.
    #[must_use]
    pub const fn significant_whitespace() -> Self {
        Self {
            skip_whitespace: false,
        }
    }
}

/// A grammar production that can be matched against component values.
///
/// Matchers are stateless: one instance may be matched any number of times,
/// from any start position, and from several threads. A matcher never fails
/// with an error for input it does not accept; it yields no matches.
///
/// Matching cost is bounded only by the grammar. Ambiguous grammars can
/// backtrack exponentially on adversarial input, so callers that match
/// untrusted CSS should stop pulling from [`Matches`] after a fixed number of
/// candidates (for example with [`Iterator::take`]).
pub trait Matcher: fmt::Debug + Send + Sync {
    /// Lazily generate every match starting at `start`.
    ///
    /// `start` is the index of the first value to examine; any whitespace
    /// the options say to skip has already been skipped by the caller.
    /// Matches are produced in preference order (greedy quantifiers first)
    /// and pulling more of them resumes the search where it paused.
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a>;

    /// Match the whole of `values`.
    ///
    /// Leading whitespace is skipped when the options allow it; the first
    /// candidate that reaches the end of the list is returned.
    fn match_against(
        &self,
        values: &[ComponentValue],
        options: MatchOptions,
    ) -> Option<GrammarMatch> {
        let start = next_position(values, 0, options);
        self.generate_matches(values, start, options)
            .find(|m| m.next() == values.len())
    }
}

/// The position after `position`, skipping whitespace if allowed.
#[must_use]
pub fn next_position(values: &[ComponentValue], position: usize, options: MatchOptions) -> usize {
    if !options.skip_whitespace {
        return position;
    }
    values[position.min(values.len())..]
        .iter()
        .position(|v| !v.is_whitespace())
        .map_or(values.len(), |offset| position + offset)
}

/// A match of `start..end`, continuing after any skippable whitespace.
///
/// Zero-length matches never skip: they continue exactly where they are.
#[must_use]
pub fn make_match(
    values: &[ComponentValue],
    start: usize,
    end: usize,
    options: MatchOptions,
) -> GrammarMatch {
    let next = if end > start {
        next_position(values, end, options)
    } else {
        end
    };
    GrammarMatch::new(start, end, next)
}

/// Position after a `,` list separator at `position`, if there is one.
///
/// Whitespace around the comma is allowed whether or not the options skip
/// whitespace.
pub(crate) fn comma_separator(values: &[ComponentValue], position: usize) -> Option<usize> {
    let lenient = MatchOptions::default();
    let comma = next_position(values, position, lenient);
    match values.get(comma)? {
        ComponentValue::Token(stylesieve_syntax::CSSToken::Comma) => {
            Some(next_position(values, comma + 1, lenient))
        }
        _ => None,
    }
}

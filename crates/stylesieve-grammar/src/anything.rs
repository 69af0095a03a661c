//! Matchers that ignore what they match: nothing, and anything.

use std::iter;

use stylesieve_syntax::{CSSToken, ComponentValue};

use crate::grammar_match::GrammarMatch;
use crate::matcher::{MatchOptions, Matcher, Matches, next_position};

/// Matches nothing at all: it never yields a match, not even an empty one.
///
/// This is the behavior of an unfinished forward reference, so a recursive
/// production that is used before it is defined fails instead of being
/// vacuously satisfied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NothingMatcher;

impl Matcher for NothingMatcher {
    fn generate_matches<'a>(
        &'a self,
        _values: &'a [ComponentValue],
        _start: usize,
        _options: MatchOptions,
    ) -> Matches<'a> {
        Box::new(iter::empty())
    }
}

/// [§ 2.2 `<any-value>`](https://www.w3.org/TR/css-syntax-3/#any-value)
///
/// Matches between `min` and `max` arbitrary component values, longest
/// first. Bad strings, bad urls, unmatched closing brackets and top-level
/// semicolons are never matched.
#[derive(Debug, Clone, Copy)]
pub struct AnythingMatcher {
    min: usize,
    max: usize,
}

impl AnythingMatcher {
    /// Exactly one value.
    #[must_use]
    pub const fn single() -> Self {
        Self { min: 1, max: 1 }
    }

    /// Any number of values, including none.
    #[must_use]
    pub const fn star() -> Self {
        Self {
            min: 0,
            max: usize::MAX,
        }
    }

    /// At least one value.
    #[must_use]
    pub const fn plus() -> Self {
        Self {
            min: 1,
            max: usize::MAX,
        }
    }

    fn accepts(value: &ComponentValue) -> bool {
        !matches!(
            value,
            ComponentValue::Token(
                CSSToken::BadString
                    | CSSToken::BadUrl
                    | CSSToken::RightParen
                    | CSSToken::RightBracket
                    | CSSToken::RightBrace
                    | CSSToken::Semicolon
            )
        )
    }
}

impl Matcher for AnythingMatcher {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        // (end, next) after each additional value.
        let mut steps = Vec::new();
        let mut position = start;
        while steps.len() < self.max {
            match values.get(position) {
                Some(value) if Self::accepts(value) => {
                    let next = next_position(values, position + 1, options);
                    steps.push((position + 1, next));
                    position = next;
                }
                _ => break,
            }
        }

        let min = self.min;
        let longest_first = steps
            .into_iter()
            .enumerate()
            .rev()
            .filter(move |(i, _)| i + 1 >= min)
            .map(move |(_, (end, next))| GrammarMatch::new(start, end, next));
        if min == 0 {
            Box::new(longest_first.chain(iter::once(GrammarMatch::empty(start))))
        } else {
            Box::new(longest_first)
        }
    }
}

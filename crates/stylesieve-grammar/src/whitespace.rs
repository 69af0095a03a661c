//! Whitespace-sensitive matchers.
//!
//! These only matter where a grammar cares whether whitespace appeared
//! between two items. With whitespace skipping on, the preceding match has
//! already swallowed the whitespace, so both matchers also look one value
//! back.

use std::iter;

use stylesieve_syntax::ComponentValue;

use crate::matcher::{MatchOptions, Matcher, Matches, make_match};

fn preceded_by_whitespace(values: &[ComponentValue], start: usize) -> bool {
    start
        .checked_sub(1)
        .and_then(|i| values.get(i))
        .is_some_and(ComponentValue::is_whitespace)
}

/// Matches a run of whitespace.
///
/// A significant matcher requires whitespace (at `start` or just before it);
/// an insignificant one also matches nothing.
#[derive(Debug, Clone, Copy)]
pub struct WhitespaceMatcher {
    significant: bool,
}

impl WhitespaceMatcher {
    /// Optional whitespace.
    #[must_use]
    pub const fn optional() -> Self {
        Self { significant: false }
    }

    /// Required whitespace.
    #[must_use]
    pub const fn significant() -> Self {
        Self { significant: true }
    }
}

impl Matcher for WhitespaceMatcher {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        let end = values[start.min(values.len())..]
            .iter()
            .position(|v| !v.is_whitespace())
            .map_or(values.len(), |offset| start + offset);

        if self.significant && end == start && !preceded_by_whitespace(values, start) {
            return Box::new(iter::empty());
        }
        Box::new(iter::once(make_match(values, start, end, options)))
    }
}

/// Matches nothing, provided no whitespace separates it from what came before.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWhitespace;

impl Matcher for NoWhitespace {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        _options: MatchOptions,
    ) -> Matches<'a> {
        if preceded_by_whitespace(values, start)
            || values.get(start).is_some_and(ComponentValue::is_whitespace)
        {
            Box::new(iter::empty())
        } else {
            Box::new(iter::once(crate::GrammarMatch::empty(start)))
        }
    }
}

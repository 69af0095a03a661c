//! Wrappers that change how a matcher's results are reported, and the
//! builder methods used to assemble grammars from them.

use std::sync::Arc;

use stylesieve_syntax::ComponentValue;

use crate::grammar_match::GrammarMatch;
use crate::matcher::{MatchOptions, Matcher, MatcherRef, Matches, next_position};
use crate::quantifier::Quantifier;

/// Names every match of the wrapped matcher.
#[derive(Debug, Clone)]
pub struct Captured {
    matcher: MatcherRef,
    name: Arc<str>,
}

impl Captured {
    /// Capture matches of `matcher` as `name`.
    #[must_use]
    pub fn new(matcher: MatcherRef, name: &str) -> Self {
        Self {
            matcher,
            name: Arc::from(name),
        }
    }
}

impl Matcher for Captured {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        Box::new(
            self.matcher
                .generate_matches(values, start, options)
                .map(|found| found.named(Arc::clone(&self.name))),
        )
    }
}

/// Runs the wrapped matcher with whitespace skipping forced on or off.
///
/// The trailing whitespace of each match is then re-evaluated under the
/// caller's options, so a significant-whitespace sub-grammar embedded in an
/// ordinary one still lets the following item start past the whitespace.
#[derive(Debug, Clone)]
pub struct SkipWhitespace {
    matcher: MatcherRef,
    skip: bool,
}

impl SkipWhitespace {
    /// Match `matcher` with `skip_whitespace` set to `skip`.
    #[must_use]
    pub const fn new(matcher: MatcherRef, skip: bool) -> Self {
        Self { matcher, skip }
    }
}

impl Matcher for SkipWhitespace {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        let inner = MatchOptions {
            skip_whitespace: self.skip,
        };
        Box::new(
            self.matcher
                .generate_matches(values, start, inner)
                .map(move |found| {
                    if found.is_empty() {
                        found
                    } else {
                        let next = next_position(values, found.end(), options);
                        found.with_next(next)
                    }
                }),
        )
    }

    fn match_against(
        &self,
        values: &[ComponentValue],
        options: MatchOptions,
    ) -> Option<GrammarMatch> {
        // Leading whitespace belongs to the inner grammar's rules.
        let inner = MatchOptions {
            skip_whitespace: self.skip,
        };
        let start = next_position(values, 0, inner);
        self.generate_matches(values, start, options)
            .find(|m| m.next() == values.len())
    }
}

/// Drops the empty matches of the wrapped matcher.
#[derive(Debug, Clone)]
pub struct NonEmpty {
    matcher: MatcherRef,
}

impl NonEmpty {
    /// Keep only the matches of `matcher` that consume something.
    #[must_use]
    pub const fn new(matcher: MatcherRef) -> Self {
        Self { matcher }
    }
}

impl Matcher for NonEmpty {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        Box::new(
            self.matcher
                .generate_matches(values, start, options)
                .filter(|found| !found.is_empty()),
        )
    }
}

/// Builder methods for composing shared matchers.
///
/// ```
/// use std::sync::Arc;
/// use stylesieve_grammar::{KeywordMatcher, MatcherExt, MatcherRef};
///
/// let side: MatcherRef = Arc::new(KeywordMatcher::new(["top", "bottom"]));
/// let sides = side.capture("side").hash();
/// # let _ = sides;
/// ```
pub trait MatcherExt {
    /// Name every match.
    #[must_use]
    fn capture(&self, name: &str) -> MatcherRef;

    /// Zero or one occurrence (`?`).
    #[must_use]
    fn optional(&self) -> MatcherRef;

    /// Zero or more occurrences (`*`).
    #[must_use]
    fn star(&self) -> MatcherRef;

    /// One or more occurrences (`+`).
    #[must_use]
    fn plus(&self) -> MatcherRef;

    /// One or more comma-separated occurrences (`#`).
    #[must_use]
    fn hash(&self) -> MatcherRef;

    /// Between `min` and `max` occurrences (`{min,max}`).
    ///
    /// # Panics
    ///
    /// Panics if `min > max`; see [`Quantifier::count`].
    #[must_use]
    fn count(&self, min: usize, max: usize) -> MatcherRef;

    /// Force whitespace skipping on or off inside this matcher.
    #[must_use]
    fn skip_whitespace(&self, skip: bool) -> MatcherRef;

    /// Drop empty matches.
    #[must_use]
    fn non_empty(&self) -> MatcherRef;
}

impl MatcherExt for MatcherRef {
    fn capture(&self, name: &str) -> MatcherRef {
        Arc::new(Captured::new(Arc::clone(self), name))
    }

    fn optional(&self) -> MatcherRef {
        Arc::new(Quantifier::optional(Arc::clone(self)))
    }

    fn star(&self) -> MatcherRef {
        Arc::new(Quantifier::star(Arc::clone(self)))
    }

    fn plus(&self) -> MatcherRef {
        Arc::new(Quantifier::plus(Arc::clone(self)))
    }

    fn hash(&self) -> MatcherRef {
        Arc::new(Quantifier::hash(Arc::clone(self)))
    }

    fn count(&self, min: usize, max: usize) -> MatcherRef {
        Arc::new(Quantifier::count(Arc::clone(self), min, max))
    }

    fn skip_whitespace(&self, skip: bool) -> MatcherRef {
        Arc::new(SkipWhitespace::new(Arc::clone(self), skip))
    }

    fn non_empty(&self) -> MatcherRef {
        Arc::new(NonEmpty::new(Arc::clone(self)))
    }
}

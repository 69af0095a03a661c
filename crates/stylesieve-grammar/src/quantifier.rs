//! [§ 2.1 Component value multipliers](https://www.w3.org/TR/css-values-4/#component-multipliers)

use std::collections::HashSet;
use std::iter;

use stylesieve_syntax::ComponentValue;

use crate::error::GrammarError;
use crate::grammar_match::GrammarMatch;
use crate::matcher::{MatchOptions, Matcher, MatcherRef, Matches, comma_separator};

/// Repeats a matcher between `min` and `max` times.
///
/// Longer repetitions are yielded first ("greedy"), but every shorter one
/// that satisfies the bounds follows, so an enclosing grammar can give
/// repetitions back. A repetition that matches nothing is never counted;
/// otherwise `*` over an optional member would loop forever.
#[derive(Debug, Clone)]
pub struct Quantifier {
    matcher: MatcherRef,
    min: usize,
    max: usize,
    commas: bool,
}

impl Quantifier {
    /// Upper bound meaning "no limit".
    pub const UNBOUNDED: usize = usize::MAX;

    /// "A question mark (?) indicates that the preceding type, word, or group is optional."
    #[must_use]
    pub fn optional(matcher: MatcherRef) -> Self {
        Self::count(matcher, 0, 1)
    }

    /// "An asterisk (*) indicates that the preceding type, word, or group occurs zero or more times."
    #[must_use]
    pub fn star(matcher: MatcherRef) -> Self {
        Self::count(matcher, 0, Self::UNBOUNDED)
    }

    /// "A plus (+) indicates that the preceding type, word, or group occurs one or more times."
    #[must_use]
    pub fn plus(matcher: MatcherRef) -> Self {
        Self::count(matcher, 1, Self::UNBOUNDED)
    }

    /// "A hash mark (#) indicates that the preceding type, word, or group
    /// occurs one or more times, separated by comma tokens."
    #[must_use]
    pub fn hash(matcher: MatcherRef) -> Self {
        Self::hash_count(matcher, 1, Self::UNBOUNDED)
    }

    /// A comma-separated list of `min` to `max` items, as in `#{1,4}`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    #[must_use]
    pub fn hash_count(matcher: MatcherRef, min: usize, max: usize) -> Self {
        Self {
            commas: true,
            ..Self::count(matcher, min, max)
        }
    }

    /// "A comma-separated pair of numbers in curly braces ({A,B}) indicates
    /// that the preceding type, word, or group occurs at least A and at most B times."
    ///
    /// # Panics
    ///
    /// Panics if `min > max`. Grammar definitions are fixed at build time, so
    /// this is a bug in the grammar rather than in the input; use
    /// [`Quantifier::try_count`] for bounds that come from elsewhere.
    #[must_use]
    pub fn count(matcher: MatcherRef, min: usize, max: usize) -> Self {
        match Self::try_count(matcher, min, max) {
            Ok(quantifier) => quantifier,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`Quantifier::count`], reporting bad bounds as an error.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidQuantifierBounds`] if `min > max`.
    pub fn try_count(matcher: MatcherRef, min: usize, max: usize) -> Result<Self, GrammarError> {
        if min > max {
            return Err(GrammarError::InvalidQuantifierBounds { min, max });
        }
        Ok(Self {
            matcher,
            min,
            max,
            commas: false,
        })
    }
}

impl Matcher for Quantifier {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        Box::new(QuantifierMatches {
            quantifier: self,
            values,
            start,
            options,
            stack: vec![Frame {
                repetition: None,
                candidates: self.matcher.generate_matches(values, start, options),
            }],
            used: HashSet::new(),
        })
    }
}

struct Frame<'a> {
    /// The repetition that led to this frame; `None` for the root.
    repetition: Option<GrammarMatch>,
    /// Candidates for the next repetition.
    candidates: Matches<'a>,
}

/// `stack.len() - 1` repetitions are currently chosen.
struct QuantifierMatches<'a> {
    quantifier: &'a Quantifier,
    values: &'a [ComponentValue],
    start: usize,
    options: MatchOptions,
    stack: Vec<Frame<'a>>,
    used: HashSet<GrammarMatch>,
}

impl Iterator for QuantifierMatches<'_> {
    type Item = GrammarMatch;

    fn next(&mut self) -> Option<GrammarMatch> {
        let quantifier = self.quantifier;
        loop {
            let top = self.stack.last_mut()?;

            if let Some(found) = top.candidates.next() {
                if found.is_empty() {
                    continue;
                }
                let depth = self.stack.len();
                let candidates: Matches<'_> = if depth < quantifier.max {
                    let next_start = if quantifier.commas {
                        comma_separator(self.values, found.next())
                    } else {
                        Some(found.next())
                    };
                    match next_start {
                        Some(at) => quantifier.matcher.generate_matches(self.values, at, self.options),
                        None => Box::new(iter::empty()),
                    }
                } else {
                    Box::new(iter::empty())
                };
                self.stack.push(Frame {
                    repetition: Some(found),
                    candidates,
                });
                continue;
            }

            // No further repetition from here: this chain is a candidate.
            let repetitions = self.stack.len() - 1;
            let combined = (repetitions >= quantifier.min).then(|| {
                GrammarMatch::sequence(
                    self.start,
                    self.stack.iter().filter_map(|f| f.repetition.as_ref()),
                )
            });
            let _ = self.stack.pop();
            if let Some(combined) = combined {
                if self.used.insert(combined.clone()) {
                    return Some(combined);
                }
            }
        }
    }
}

//! [§ 2.2 Component value combinators](https://www.w3.org/TR/css-values-4/#component-combinators)
//!
//! "Juxtaposing components means that all of them must occur, in the given order."

use std::collections::HashSet;
use std::iter;

use stylesieve_syntax::ComponentValue;

use crate::grammar_match::GrammarMatch;
use crate::matcher::{MatchOptions, Matcher, MatcherRef, Matches, comma_separator};

/// Matches a fixed sequence of matchers back to back.
///
/// Every decomposition of the input is reachable: if a later member cannot
/// continue from some match of an earlier one, the search backtracks into
/// the earlier member's next candidate.
#[derive(Debug, Clone)]
pub struct Juxtaposition {
    matchers: Vec<MatcherRef>,
    commas: bool,
}

impl Juxtaposition {
    /// Members matched in order.
    #[must_use]
    pub fn new(matchers: Vec<MatcherRef>) -> Self {
        Self {
            matchers,
            commas: false,
        }
    }

    /// Members matched in order, with a comma between any two that both
    /// matched something.
    #[must_use]
    pub fn with_commas(matchers: Vec<MatcherRef>) -> Self {
        Self {
            matchers,
            commas: true,
        }
    }
}

impl Matcher for Juxtaposition {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        if self.matchers.is_empty() {
            return Box::new(iter::once(GrammarMatch::empty(start)));
        }
        Box::new(JuxtapositionMatches {
            juxtaposition: self,
            values,
            start,
            options,
            stack: Vec::new(),
            started: false,
            used: HashSet::new(),
        })
    }
}

struct Frame<'a> {
    candidates: Matches<'a>,
    chosen: Option<GrammarMatch>,
}

/// Depth-first search over the members; `stack[i]` holds member `i`'s
/// remaining candidates and the candidate currently being extended.
struct JuxtapositionMatches<'a> {
    juxtaposition: &'a Juxtaposition,
    values: &'a [ComponentValue],
    start: usize,
    options: MatchOptions,
    stack: Vec<Frame<'a>>,
    started: bool,
    used: HashSet<GrammarMatch>,
}

impl<'a> JuxtapositionMatches<'a> {
    fn candidates(&self, depth: usize) -> Matches<'a> {
        let matcher = &self.juxtaposition.matchers[depth];
        let previous: Vec<&GrammarMatch> =
            self.stack.iter().filter_map(|f| f.chosen.as_ref()).collect();
        let position = previous.last().map_or(self.start, |m| m.next());

        let (values, options) = (self.values, self.options);
        let needs_comma = self.juxtaposition.commas && previous.iter().any(|m| !m.is_empty());
        if !needs_comma {
            return matcher.generate_matches(values, position, options);
        }

        // An empty member needs no comma; a non-empty one must follow one.
        let without_comma = matcher
            .generate_matches(values, position, options)
            .filter(GrammarMatch::is_empty);
        match comma_separator(values, position) {
            Some(after_comma) => Box::new(
                without_comma.chain(
                    matcher
                        .generate_matches(values, after_comma, options)
                        .filter(|m| !m.is_empty()),
                ),
            ),
            None => Box::new(without_comma),
        }
    }
}

impl Iterator for JuxtapositionMatches<'_> {
    type Item = GrammarMatch;

    fn next(&mut self) -> Option<GrammarMatch> {
        loop {
            if self.stack.is_empty() {
                if self.started {
                    return None;
                }
                self.started = true;
                let candidates = self.candidates(0);
                self.stack.push(Frame {
                    candidates,
                    chosen: None,
                });
            }

            let depth = self.stack.len() - 1;
            let Some(found) = self.stack[depth].candidates.next() else {
                // Exhausted: backtrack into the previous member.
                let _ = self.stack.pop();
                continue;
            };

            if depth + 1 < self.juxtaposition.matchers.len() {
                self.stack[depth].chosen = Some(found);
                let candidates = self.candidates(depth + 1);
                self.stack.push(Frame {
                    candidates,
                    chosen: None,
                });
                continue;
            }

            let parts = self.stack[..depth]
                .iter()
                .filter_map(|f| f.chosen.as_ref())
                .chain(iter::once(&found));
            let combined = GrammarMatch::sequence(self.start, parts);
            if self.used.insert(combined.clone()) {
                return Some(combined);
            }
        }
    }
}

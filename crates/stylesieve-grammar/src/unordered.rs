//! [§ 2.2 Component value combinators](https://www.w3.org/TR/css-values-4/#component-combinators)
//!
//! "A double ampersand (&&) separates two or more components, all of which
//! must occur, in any order."
//!
//! "A double bar (||) separates two or more options: one or more of them
//! must occur, in any order."

use std::collections::HashSet;
use std::iter;

use stylesieve_syntax::ComponentValue;

use crate::grammar_match::GrammarMatch;
use crate::matcher::{MatchOptions, Matcher, MatcherRef, Matches};

/// Matches members in any order, each at most once.
///
/// The search tries every unused member at each step, so it is factorial in
/// the number of members. CSS only uses this for small groups (shorthand
/// components, position keywords); do not build large groups with it.
#[derive(Debug, Clone)]
pub struct UnorderedGroup {
    matchers: Vec<MatcherRef>,
    required: usize,
}

impl UnorderedGroup {
    /// `a && b && ...`: every member exactly once.
    #[must_use]
    pub fn all_of(matchers: Vec<MatcherRef>) -> Self {
        let required = matchers.len();
        Self { matchers, required }
    }

    /// `a || b || ...`: at least one member, each at most once.
    #[must_use]
    pub fn some_of(matchers: Vec<MatcherRef>) -> Self {
        Self {
            required: 1.min(matchers.len()),
            matchers,
        }
    }
}

impl Matcher for UnorderedGroup {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        Box::new(UnorderedMatches {
            group: self,
            values,
            start,
            options,
            stack: vec![Frame::new(None, (0..self.matchers.len()).collect())],
            used: HashSet::new(),
        })
    }
}

struct Frame<'a> {
    /// The member match that led to this frame; `None` for the root.
    matched: Option<GrammarMatch>,
    /// Members not yet used on this path.
    remaining: Vec<usize>,
    /// Next index into `remaining` to try.
    cursor: usize,
    /// Member whose candidates are being drawn, and those candidates.
    current: Option<usize>,
    candidates: Matches<'a>,
}

impl Frame<'_> {
    fn new(matched: Option<GrammarMatch>, remaining: Vec<usize>) -> Self {
        Self {
            matched,
            remaining,
            cursor: 0,
            current: None,
            candidates: Box::new(iter::empty()),
        }
    }
}

/// `stack.len() - 1` members are currently matched.
struct UnorderedMatches<'a> {
    group: &'a UnorderedGroup,
    values: &'a [ComponentValue],
    start: usize,
    options: MatchOptions,
    stack: Vec<Frame<'a>>,
    used: HashSet<GrammarMatch>,
}

impl Iterator for UnorderedMatches<'_> {
    type Item = GrammarMatch;

    fn next(&mut self) -> Option<GrammarMatch> {
        let group = self.group;
        loop {
            let top = self.stack.last_mut()?;

            // Descend with the next candidate of the current member.
            if let Some(found) = top.candidates.next() {
                let member = top.current.unwrap_or_default();
                let remaining = top
                    .remaining
                    .iter()
                    .copied()
                    .filter(|&m| m != member)
                    .collect();
                self.stack.push(Frame::new(Some(found), remaining));
                continue;
            }

            // Move on to the next unused member.
            if top.cursor < top.remaining.len() {
                let member = top.remaining[top.cursor];
                top.cursor += 1;
                let position = top.matched.as_ref().map_or(self.start, GrammarMatch::next);
                top.current = Some(member);
                top.candidates =
                    group.matchers[member].generate_matches(self.values, position, self.options);
                continue;
            }

            // Every extension has been explored: this path is a candidate.
            let members = self.stack.len() - 1;
            let satisfied =
                members >= group.required && (members > 0 || group.matchers.is_empty());
            let combined = satisfied.then(|| {
                GrammarMatch::sequence(
                    self.start,
                    self.stack.iter().filter_map(|f| f.matched.as_ref()),
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

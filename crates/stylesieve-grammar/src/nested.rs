//! Matchers that descend into functions and simple blocks.
//!
//! The contents are matched as a complete sub-grammar over the nested list,
//! never over the outer one. Captures made inside are re-scoped so that
//! [`GrammarMatch::values`](crate::GrammarMatch::values) still finds them
//! from the outer list. Each distinct capture assignment of the contents is a
//! separate candidate, so an enclosing grammar can backtrack into it.

use std::collections::HashSet;
use std::fmt;
use std::iter;
use std::sync::Arc;

use stylesieve_syntax::ComponentValue;

use crate::matcher::{MatchOptions, Matcher, MatcherRef, Matches, make_match, next_position};

/// How a [`FunctionMatcher`] recognizes the function name.
#[derive(Clone)]
pub enum FunctionName {
    /// One name, compared ASCII case-insensitively.
    Exact(String),
    /// Any name accepted by the predicate.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl FunctionName {
    fn accepts(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => expected.eq_ignore_ascii_case(name),
            Self::Predicate(predicate) => predicate(name),
        }
    }
}

impl fmt::Debug for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => write!(f, "{name:?}"),
            Self::Predicate(_) => f.write_str("<predicate>"),
        }
    }
}

impl From<&str> for FunctionName {
    fn from(name: &str) -> Self {
        Self::Exact(name.to_owned())
    }
}

/// Matches a function whose arguments are entirely matched by a sub-grammar.
#[derive(Debug, Clone)]
pub struct FunctionMatcher {
    name: FunctionName,
    arguments: MatcherRef,
}

impl FunctionMatcher {
    /// Match a function named `name` whose arguments match `arguments`.
    #[must_use]
    pub fn new(name: impl Into<FunctionName>, arguments: MatcherRef) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Match any function whose name passes `predicate`.
    #[must_use]
    pub fn with_name_predicate(
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
        arguments: MatcherRef,
    ) -> Self {
        Self {
            name: FunctionName::Predicate(Arc::new(predicate)),
            arguments,
        }
    }
}

impl Matcher for FunctionMatcher {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        let Some(ComponentValue::Function { name, value }) = values.get(start) else {
            return Box::new(iter::empty());
        };
        if !self.name.accepts(name) {
            return Box::new(iter::empty());
        }
        nested_match(&self.arguments, values, start, value, options)
    }
}

/// Matches a simple block whose contents are entirely matched by a sub-grammar.
#[derive(Debug, Clone)]
pub struct BlockMatcher {
    token: char,
    contents: MatcherRef,
}

impl BlockMatcher {
    /// Match a block opened by `token` (`(`, `[` or `{`).
    #[must_use]
    pub fn new(token: char, contents: MatcherRef) -> Self {
        Self { token, contents }
    }
}

impl Matcher for BlockMatcher {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        match values.get(start) {
            Some(ComponentValue::Block { token, value }) if *token == self.token => {
                nested_match(&self.contents, values, start, value, options)
            }
            _ => Box::new(iter::empty()),
        }
    }
}

/// Every way the inner grammar consumes the whole nested list, as a match
/// of the single value at `start`.
///
/// Inner matches that differ in nothing but position bookkeeping collapse
/// into one outer match, so an unambiguous argument grammar yields once.
fn nested_match<'a>(
    inner: &'a MatcherRef,
    values: &'a [ComponentValue],
    start: usize,
    nested: &'a [ComponentValue],
    options: MatchOptions,
) -> Matches<'a> {
    let mut seen = HashSet::new();
    let first = next_position(nested, 0, options);
    Box::new(
        inner
            .generate_matches(nested, first, options)
            .filter(move |found| found.next() == nested.len())
            .map(move |found| found.nest_captures(start))
            .filter(move |captures| seen.insert(captures.clone()))
            .map(move |captures| {
                make_match(values, start, start + 1, options).with_captures(captures)
            }),
    )
}

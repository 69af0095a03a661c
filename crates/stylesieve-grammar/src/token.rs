//! Single-token matchers.

use std::fmt;
use std::iter;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use stylesieve_syntax::{CSSToken, ComponentValue, TokenKind};

use crate::matcher::{MatchOptions, Matcher, Matches, make_match};

/// A predicate over a token's payload.
pub type TokenPredicate = Arc<dyn Fn(&CSSToken) -> bool + Send + Sync>;

/// Yield a single one-value match if the value at `start` passes `accept`.
fn single<'a>(
    values: &'a [ComponentValue],
    start: usize,
    options: MatchOptions,
    accept: impl FnOnce(&CSSToken) -> bool,
) -> Matches<'a> {
    match values.get(start) {
        Some(ComponentValue::Token(token)) if accept(token) => {
            Box::new(iter::once(make_match(values, start, start + 1, options)))
        }
        _ => Box::new(iter::empty()),
    }
}

/// Matches one token of a given kind, optionally filtered by a predicate.
#[derive(Clone)]
pub struct TokenMatcher {
    kind: TokenKind,
    predicate: Option<TokenPredicate>,
}

impl TokenMatcher {
    /// Match any token of `kind`.
    #[must_use]
    pub const fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            predicate: None,
        }
    }

    /// Match tokens of `kind` that also satisfy `predicate`.
    #[must_use]
    pub fn with_predicate(
        kind: TokenKind,
        predicate: impl Fn(&CSSToken) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            predicate: Some(Arc::new(predicate)),
        }
    }
}

impl fmt::Debug for TokenMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenMatcher")
            .field("kind", &self.kind)
            .field("filtered", &self.predicate.is_some())
            .finish()
    }
}

impl Matcher for TokenMatcher {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        single(values, start, options, |token| {
            token.kind() == self.kind && self.predicate.as_ref().is_none_or(|p| p(token))
        })
    }
}

/// Matches one `<ident-token>` from a set of keywords, ASCII case-insensitively.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Match any of `keywords`.
    #[must_use]
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }
}

impl Matcher for KeywordMatcher {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        single(values, start, options, |token| match token {
            CSSToken::Ident(name) => self.keywords.iter().any(|k| k.eq_ignore_ascii_case(name)),
            _ => false,
        })
    }
}

/// Matches one `<delim-token>` from a set of characters.
#[derive(Debug, Clone)]
pub struct DelimMatcher {
    delims: Vec<char>,
}

impl DelimMatcher {
    /// Match any of `delims`.
    #[must_use]
    pub fn new(delims: impl IntoIterator<Item = char>) -> Self {
        Self {
            delims: delims.into_iter().collect(),
        }
    }
}

impl Matcher for DelimMatcher {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        single(values, start, options, |token| {
            matches!(token, CSSToken::Delim(c) if self.delims.contains(c))
        })
    }
}

/// [§ 2 Defining Custom Properties](https://www.w3.org/TR/css-variables-1/#defining-variables)
///
/// Matches an `<ident-token>` naming a custom property. Only the
/// conservative ASCII form `--letter[letters, digits, hyphens]` is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomPropertyMatcher;

static CUSTOM_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^--[A-Za-z][A-Za-z0-9-]*$").expect("custom property pattern is valid")
});

impl CustomPropertyMatcher {
    /// Returns true if `name` is an acceptable custom property name.
    #[must_use]
    pub fn is_custom_property(name: &str) -> bool {
        CUSTOM_PROPERTY.is_match(name)
    }
}

impl Matcher for CustomPropertyMatcher {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        single(values, start, options, |token| {
            matches!(token, CSSToken::Ident(name) if Self::is_custom_property(name))
        })
    }
}

#[cfg(test)]
mod tests {
    use stylesieve_syntax::parse_component_values;

    use super::*;

    #[test]
    fn keyword_is_case_insensitive() {
        let values = parse_component_values("EASE");
        let matcher = KeywordMatcher::new(["ease", "linear"]);
        let found: Vec<_> = matcher
            .generate_matches(&values, 0, MatchOptions::default())
            .collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].consumed(), 1);
    }

    #[test]
    fn token_predicate_filters_payload() {
        let values = parse_component_values("10px 10deg");
        let px = TokenMatcher::with_predicate(TokenKind::Dimension, |t| t.unit() == Some("px"));
        let options = MatchOptions::default();
        assert_eq!(px.generate_matches(&values, 0, options).count(), 1);
        assert_eq!(px.generate_matches(&values, 2, options).count(), 0);
    }

    #[test]
    fn custom_property_names() {
        assert!(CustomPropertyMatcher::is_custom_property("--main-color"));
        assert!(!CustomPropertyMatcher::is_custom_property("-main-color"));
        assert!(!CustomPropertyMatcher::is_custom_property("--1st"));
    }
}

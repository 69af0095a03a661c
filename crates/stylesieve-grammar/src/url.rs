//! [§ 4.5 Resource Locators](https://www.w3.org/TR/css-values-4/#urls)

use std::fmt;
use std::iter;
use std::sync::Arc;

use stylesieve_syntax::{CSSToken, ComponentValue};

use crate::matcher::{MatchOptions, Matcher, MatcherRef, Matches, make_match};

/// Decides whether a URL may be used for a kind of resource.
///
/// The grammar only recognizes URL syntax; what a URL may point at is the
/// caller's policy. `resource_type` is whatever the grammar was built with
/// (`"image"`, `"font"`, ...).
pub trait UrlValidator: Send + Sync {
    /// Returns true if `url` is acceptable for `resource_type`.
    fn validate(&self, url: &str, resource_type: &str) -> bool;
}

impl<F> UrlValidator for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn validate(&self, url: &str, resource_type: &str) -> bool {
        self(url, resource_type)
    }
}

/// A validator that accepts every URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllUrls;

impl UrlValidator for AllowAllUrls {
    fn validate(&self, _url: &str, _resource_type: &str) -> bool {
        true
    }
}

/// "`<url> = url( <string> <url-modifier>* ) | <url-token>`"
///
/// Matches an unquoted `<url-token>` or a `url()` function holding a
/// string, and hands the URL to a [`UrlValidator`].
#[derive(Clone)]
pub struct UrlMatcher {
    resource_type: String,
    validator: Arc<dyn UrlValidator>,
    modifiers: Option<MatcherRef>,
}

impl UrlMatcher {
    /// Match URLs for `resource_type`, validated by `validator`.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, validator: Arc<dyn UrlValidator>) -> Self {
        Self {
            resource_type: resource_type.into(),
            validator,
            modifiers: None,
        }
    }

    /// Also accept `<url-modifier>`s after a quoted URL, matched by `modifiers`.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: MatcherRef) -> Self {
        self.modifiers = Some(modifiers);
        self
    }

    /// The URL text of a value this matcher would match syntactically.
    #[must_use]
    pub fn url_of(value: &ComponentValue) -> Option<&str> {
        match value {
            ComponentValue::Token(CSSToken::Url(url)) => Some(url),
            ComponentValue::Function { name, value } if name.eq_ignore_ascii_case("url") => {
                match stylesieve_syntax::trim_whitespace(value).first() {
                    Some(ComponentValue::Token(CSSToken::String(url))) => Some(url),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn modifiers_match(&self, value: &ComponentValue, options: MatchOptions) -> bool {
        let ComponentValue::Function { value: args, .. } = value else {
            // A <url-token> cannot carry modifiers.
            return true;
        };
        let args = stylesieve_syntax::trim_whitespace(args);
        let rest = &args[1.min(args.len())..];
        if stylesieve_syntax::trim_whitespace(rest).is_empty() {
            return true;
        }
        self.modifiers
            .as_ref()
            .is_some_and(|m| m.match_against(rest, options).is_some())
    }
}

impl fmt::Debug for UrlMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlMatcher")
            .field("resource_type", &self.resource_type)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}

impl Matcher for UrlMatcher {
    fn generate_matches<'a>(
        &'a self,
        values: &'a [ComponentValue],
        start: usize,
        options: MatchOptions,
    ) -> Matches<'a> {
        let accepted = values.get(start).is_some_and(|value| {
            Self::url_of(value).is_some_and(|url| {
                self.modifiers_match(value, options)
                    && self.validator.validate(url, &self.resource_type)
            })
        });
        if accepted {
            Box::new(iter::once(make_match(values, start, start + 1, options)))
        } else {
            Box::new(iter::empty())
        }
    }
}

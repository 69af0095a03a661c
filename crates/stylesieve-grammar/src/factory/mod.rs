//! [CSS Values 4](https://www.w3.org/TR/css-values-4/) and friends, as
//! matcher graphs.
//!
//! Every production is built at most once per factory and cached under a key
//! that includes its parameters. Asking for the same production twice returns
//! the same [`MatcherRef`], which recursive productions depend on: all
//! self-references must point at one shared forward cell.
//!
//! # Recursive productions
//!
//! `<calc-sum>`, `<media-condition>`, `<supports-condition>` and
//! `<complex-selector>` refer to themselves. They are built by
//! [`MatcherFactory::recursive`]:
//!
//! 1. a [`Forward`] cell stands in for the self-referring part,
//! 2. the outer graph is built around the cell and cached,
//! 3. the definition is built, and may ask the factory for the outer graph
//!    again, receiving the cached one,
//! 4. the cell is defined and every embedding sees the final grammar.

mod color;
mod counter_style;
mod image;
mod math;
mod media;
mod position;
mod selectors;
mod supports;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use stylesieve_syntax::{CSSToken, NumericType, TokenKind};
use tracing::debug;

use crate::alternative::Alternative;
use crate::anything::AnythingMatcher;
use crate::ext::MatcherExt;
use crate::forward::Forward;
use crate::juxtaposition::Juxtaposition;
use crate::matcher::MatcherRef;
use crate::nested::{BlockMatcher, FunctionMatcher};
use crate::token::{CustomPropertyMatcher, DelimMatcher, KeywordMatcher, TokenMatcher};
use crate::url::{AllowAllUrls, UrlMatcher, UrlValidator};
use crate::whitespace::WhitespaceMatcher;

/// [§ 7.3 CSS-wide keywords](https://www.w3.org/TR/css-values-4/#common-keywords)
pub const CSS_WIDE_KEYWORDS: [&str; 5] = ["initial", "inherit", "unset", "revert", "revert-layer"];

const LENGTH_UNITS: &[&str] = &[
    // Font-relative
    "em", "rem", "ex", "rex", "cap", "rcap", "ch", "rch", "ic", "ric", "lh", "rlh",
    // Viewport-percentage
    "vw", "vh", "vi", "vb", "vmin", "vmax", "svw", "svh", "svi", "svb", "svmin", "svmax", "lvw",
    "lvh", "lvi", "lvb", "lvmin", "lvmax", "dvw", "dvh", "dvi", "dvb", "dvmin", "dvmax",
    // Container query
    "cqw", "cqh", "cqi", "cqb", "cqmin", "cqmax",
    // Absolute
    "cm", "mm", "q", "in", "pt", "pc", "px",
];
const ANGLE_UNITS: &[&str] = &["deg", "grad", "rad", "turn"];
const TIME_UNITS: &[&str] = &["s", "ms"];
const FREQUENCY_UNITS: &[&str] = &["hz", "khz"];
const RESOLUTION_UNITS: &[&str] = &["dpi", "dpcm", "dppx", "x"];

/// Builds and caches CSS grammar productions.
///
/// The factory is single-threaded; the matchers it returns are `Send + Sync`
/// and can be shared freely once built.
///
/// Recursive productions form reference cycles through their forward cells,
/// so their graphs are never freed. Keep one factory for the lifetime of the
/// program rather than building grammars repeatedly.
pub struct MatcherFactory {
    cache: RefCell<HashMap<String, MatcherRef>>,
    url_validator: Arc<dyn UrlValidator>,
}

impl fmt::Debug for MatcherFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherFactory")
            .field("productions", &self.cache.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Default for MatcherFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MatcherFactory {
    /// A factory whose URL productions accept every URL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_url_validator(Arc::new(AllowAllUrls))
    }

    /// A factory whose URL productions consult `validator`.
    #[must_use]
    pub fn with_url_validator(validator: Arc<dyn UrlValidator>) -> Self {
        Self {
            cache: RefCell::new(HashMap::new()),
            url_validator: validator,
        }
    }

    /// Number of productions built so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Returns true if nothing has been built yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    fn lookup(&self, key: &str) -> Option<MatcherRef> {
        self.cache.borrow().get(key).cloned()
    }

    /// The production cached under `key`, building it with `build` on first
    /// use.
    ///
    /// `build` may request other productions. It must not request `key`
    /// itself; self-reference goes through [`recursive`](Self::recursive).
    pub fn cached(&self, key: &str, build: impl FnOnce() -> MatcherRef) -> MatcherRef {
        if let Some(hit) = self.lookup(key) {
            return hit;
        }
        let built = build();
        debug!(production = key, "built grammar production");
        Arc::clone(
            self.cache
                .borrow_mut()
                .entry(key.to_owned())
                .or_insert(built),
        )
    }

    /// A self-referential production cached under `key`.
    ///
    /// `outer` receives a forward cell and builds the production around it.
    /// That graph is cached before `inner` runs, so `inner` (and anything it
    /// asks the factory for) can refer back to the production. `inner`
    /// receives the outer graph and returns the definition of the cell.
    pub fn recursive(
        &self,
        key: &str,
        outer: impl FnOnce(&MatcherRef) -> MatcherRef,
        inner: impl FnOnce(&MatcherRef) -> MatcherRef,
    ) -> MatcherRef {
        if let Some(hit) = self.lookup(key) {
            return hit;
        }
        let (cell, slot) = Forward::new();
        let production = outer(&cell);
        let _ = self
            .cache
            .borrow_mut()
            .insert(key.to_owned(), Arc::clone(&production));
        debug!(production = key, "cached recursive production before definition");

        slot.define(inner(&production));
        debug!(production = key, "defined recursive production");
        production
    }

    // Whitespace and punctuation

    /// Any amount of whitespace, including none.
    pub fn optional_whitespace(&self) -> MatcherRef {
        self.cached("optional-whitespace", || Arc::new(WhitespaceMatcher::optional()))
    }

    /// At least one whitespace token.
    pub fn significant_whitespace(&self) -> MatcherRef {
        self.cached("significant-whitespace", || {
            Arc::new(WhitespaceMatcher::significant())
        })
    }

    /// A `<comma-token>`.
    pub fn comma(&self) -> MatcherRef {
        self.cached("comma", || token(TokenKind::Comma))
    }

    // Basic values

    /// `<ident>`
    pub fn ident(&self) -> MatcherRef {
        self.cached("ident", || token(TokenKind::Ident))
    }

    /// [`<custom-ident>`](https://www.w3.org/TR/css-values-4/#custom-idents)
    ///
    /// Any identifier except the CSS-wide keywords, `default`, and the
    /// words in `exclude` (all compared ASCII case-insensitively).
    pub fn custom_ident<S: AsRef<str>>(&self, exclude: &[S]) -> MatcherRef {
        let mut excluded: Vec<String> = CSS_WIDE_KEYWORDS
            .iter()
            .copied()
            .chain(["default"])
            .chain(exclude.iter().map(AsRef::as_ref))
            .map(str::to_ascii_lowercase)
            .collect();
        excluded.sort_unstable();
        excluded.dedup();

        self.cached(&format!("custom-ident:{}", excluded.join(",")), move || {
            Arc::new(TokenMatcher::with_predicate(TokenKind::Ident, move |t| {
                t.text()
                    .is_some_and(|name| !excluded.iter().any(|e| e.eq_ignore_ascii_case(name)))
            }))
        })
    }

    /// `initial | inherit | unset | revert | revert-layer`
    pub fn css_wide_keywords(&self) -> MatcherRef {
        self.cached("css-wide-keywords", || keywords(&CSS_WIDE_KEYWORDS))
    }

    /// `<string>`
    pub fn string(&self) -> MatcherRef {
        self.cached("string", || token(TokenKind::String))
    }

    /// `<url>` for a kind of resource, checked by the factory's URL validator.
    pub fn url(&self, resource_type: &str) -> MatcherRef {
        self.cached(&format!("url:{resource_type}"), || {
            let any_function: MatcherRef = Arc::new(FunctionMatcher::with_name_predicate(
                |_| true,
                Arc::new(AnythingMatcher::star()),
            ));
            let modifier = alt(vec![self.ident(), any_function]);
            Arc::new(
                UrlMatcher::new(resource_type, Arc::clone(&self.url_validator))
                    .with_modifiers(modifier.plus()),
            )
        })
    }

    /// A `<string>` holding a URL, as accepted by `@import`, checked by the
    /// factory's URL validator.
    pub fn url_string(&self, resource_type: &str) -> MatcherRef {
        self.cached(&format!("url-string:{resource_type}"), || {
            let validator = Arc::clone(&self.url_validator);
            let resource_type = resource_type.to_owned();
            Arc::new(TokenMatcher::with_predicate(TokenKind::String, move |t| {
                t.text()
                    .is_some_and(|url| validator.validate(url, &resource_type))
            }))
        })
    }

    /// A custom property name, `--like-this`.
    pub fn custom_property(&self) -> MatcherRef {
        self.cached("custom-property", || Arc::new(CustomPropertyMatcher))
    }

    // Numbers

    /// `<number-token>`, without math functions.
    pub fn raw_number(&self) -> MatcherRef {
        self.cached("raw-number", || token(TokenKind::Number))
    }

    /// [`<number>`](https://www.w3.org/TR/css-values-4/#numbers)
    pub fn number(&self) -> MatcherRef {
        self.math_function("number", self.raw_number())
    }

    /// An integer `<number-token>`, without math functions.
    pub fn raw_integer(&self) -> MatcherRef {
        self.cached("raw-integer", || {
            Arc::new(TokenMatcher::with_predicate(TokenKind::Number, |t| {
                t.numeric_type() == Some(NumericType::Integer)
            }))
        })
    }

    /// [`<integer>`](https://www.w3.org/TR/css-values-4/#integers)
    pub fn integer(&self) -> MatcherRef {
        self.math_function("integer", self.raw_integer())
    }

    /// `<percentage-token>`, without math functions.
    pub fn raw_percentage(&self) -> MatcherRef {
        self.cached("raw-percentage", || token(TokenKind::Percentage))
    }

    /// [`<percentage>`](https://www.w3.org/TR/css-values-4/#percentages)
    pub fn percentage(&self) -> MatcherRef {
        self.math_function("percentage", self.raw_percentage())
    }

    /// A literal unitless `0`.
    pub fn zero(&self) -> MatcherRef {
        self.cached("zero", || {
            Arc::new(TokenMatcher::with_predicate(TokenKind::Number, |t| {
                t.numeric_value() == Some(0.0)
            }))
        })
    }

    /// `<number> | <percentage>`
    pub fn number_percentage(&self) -> MatcherRef {
        let raw = self.cached("raw-number-percentage", || {
            alt(vec![self.raw_number(), self.raw_percentage()])
        });
        self.math_function("number-percentage", raw)
    }

    /// [`<ratio>`](https://www.w3.org/TR/css-values-4/#ratios): `<number> [ / <number> ]?`
    pub fn ratio(&self) -> MatcherRef {
        self.cached("ratio", || {
            juxt(vec![
                self.number(),
                juxt(vec![delim('/'), self.number()]).optional(),
            ])
        })
    }

    // Dimensions

    /// A length dimension or unitless zero, without math functions.
    pub fn raw_length(&self) -> MatcherRef {
        self.cached("raw-length", || {
            alt(vec![dimension(LENGTH_UNITS), self.zero()])
        })
    }

    /// [`<length>`](https://www.w3.org/TR/css-values-4/#lengths)
    pub fn length(&self) -> MatcherRef {
        self.math_function("length", self.raw_length())
    }

    /// `<length-percentage>`
    pub fn length_percentage(&self) -> MatcherRef {
        let raw = self.cached("raw-length-percentage", || {
            alt(vec![self.raw_length(), self.raw_percentage()])
        });
        self.math_function("length-percentage", raw)
    }

    /// An angle dimension, without math functions.
    pub fn raw_angle(&self) -> MatcherRef {
        self.cached("raw-angle", || dimension(ANGLE_UNITS))
    }

    /// [`<angle>`](https://www.w3.org/TR/css-values-4/#angles)
    pub fn angle(&self) -> MatcherRef {
        self.math_function("angle", self.raw_angle())
    }

    /// `<angle-percentage>`
    pub fn angle_percentage(&self) -> MatcherRef {
        let raw = self.cached("raw-angle-percentage", || {
            alt(vec![self.raw_angle(), self.raw_percentage()])
        });
        self.math_function("angle-percentage", raw)
    }

    /// A time dimension, without math functions.
    pub fn raw_time(&self) -> MatcherRef {
        self.cached("raw-time", || dimension(TIME_UNITS))
    }

    /// [`<time>`](https://www.w3.org/TR/css-values-4/#time)
    pub fn time(&self) -> MatcherRef {
        self.math_function("time", self.raw_time())
    }

    /// `<time-percentage>`
    pub fn time_percentage(&self) -> MatcherRef {
        let raw = self.cached("raw-time-percentage", || {
            alt(vec![self.raw_time(), self.raw_percentage()])
        });
        self.math_function("time-percentage", raw)
    }

    /// A frequency dimension, without math functions.
    pub fn raw_frequency(&self) -> MatcherRef {
        self.cached("raw-frequency", || dimension(FREQUENCY_UNITS))
    }

    /// [`<frequency>`](https://www.w3.org/TR/css-values-4/#frequency)
    pub fn frequency(&self) -> MatcherRef {
        self.math_function("frequency", self.raw_frequency())
    }

    /// `<frequency-percentage>`
    pub fn frequency_percentage(&self) -> MatcherRef {
        let raw = self.cached("raw-frequency-percentage", || {
            alt(vec![self.raw_frequency(), self.raw_percentage()])
        });
        self.math_function("frequency-percentage", raw)
    }

    /// [`<resolution>`](https://www.w3.org/TR/css-values-4/#resolution)
    pub fn resolution(&self) -> MatcherRef {
        let raw = self.cached("raw-resolution", || dimension(RESOLUTION_UNITS));
        self.math_function("resolution", raw)
    }
}

// Graph-building shorthands shared by the production modules.

fn token(kind: TokenKind) -> MatcherRef {
    Arc::new(TokenMatcher::new(kind))
}

fn keywords(words: &[&str]) -> MatcherRef {
    Arc::new(KeywordMatcher::new(words.iter().copied()))
}

fn delim(c: char) -> MatcherRef {
    Arc::new(DelimMatcher::new([c]))
}

fn delims(chars: &str) -> MatcherRef {
    Arc::new(DelimMatcher::new(chars.chars()))
}

fn juxt(matchers: Vec<MatcherRef>) -> MatcherRef {
    Arc::new(Juxtaposition::new(matchers))
}

fn alt(matchers: Vec<MatcherRef>) -> MatcherRef {
    Arc::new(Alternative::new(matchers))
}

fn function(name: &str, arguments: MatcherRef) -> MatcherRef {
    Arc::new(FunctionMatcher::new(name, arguments))
}

fn block(token: char, contents: MatcherRef) -> MatcherRef {
    Arc::new(BlockMatcher::new(token, contents))
}

fn dimension(units: &'static [&'static str]) -> MatcherRef {
    Arc::new(TokenMatcher::with_predicate(TokenKind::Dimension, move |t| {
        t.unit()
            .is_some_and(|unit| units.iter().any(|u| u.eq_ignore_ascii_case(unit)))
    }))
}

/// An `<ident-token>` whose text satisfies `accept`.
fn ident_where(accept: impl Fn(&str) -> bool + Send + Sync + 'static) -> MatcherRef {
    Arc::new(TokenMatcher::with_predicate(TokenKind::Ident, move |t| {
        matches!(t, CSSToken::Ident(name) if accept(name))
    }))
}

/// `<general-enclosed>`: any function, or any parenthesized block, kept
/// for forward compatibility with syntax this grammar does not know yet.
fn general_enclosed() -> MatcherRef {
    let anything: MatcherRef = Arc::new(AnythingMatcher::star());
    let any_function: MatcherRef = Arc::new(FunctionMatcher::with_name_predicate(
        |_| true,
        Arc::clone(&anything),
    ));
    alt(vec![any_function, block('(', anything)])
}

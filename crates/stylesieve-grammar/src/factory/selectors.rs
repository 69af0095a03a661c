//! [Selectors Level 3 § 10 The grammar of Selectors](https://www.w3.org/TR/selectors-3/#w3cselgrammar)
//!
//! Whitespace is the descendant combinator here, so every production in this
//! module matches with whitespace skipping turned off.
//!
//! Captures:
//!
//! | Name | Span |
//! |------|------|
//! | `selector` | one complex selector of a list |
//! | `element` | type or universal selector, with namespace prefix |
//! | `id` | `#id` |
//! | `class` | `.class` |
//! | `attribute`, `test`, `value` | parts of `[attr=value]` |
//! | `pseudo` | pseudo-class or pseudo-element, with its colons |
//! | `negation` | `:not(...)` |
//! | `combinator` | `+`, `>`, `~`, or descendant whitespace |

use std::sync::{Arc, LazyLock};

use regex::Regex;
use stylesieve_syntax::{CSSToken, HashType, NumericType, TokenKind};

use crate::ext::MatcherExt;
use crate::matcher::MatcherRef;
use crate::nested::FunctionMatcher;
use crate::token::TokenMatcher;

use super::{
    MatcherFactory, alt, block, delim, delims, function, ident_where, juxt, keywords, token,
};

/// The `n` part of an `An+B` dimension unit, possibly carrying `-B`.
static AN_PLUS_B_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^n(?:-[0-9]*)?$").expect("An+B unit pattern is valid"));

/// An `An+B` identifier: `n`, `-n`, `n-`, `-n-3`, ...
static AN_PLUS_B_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^-?n(?:-[0-9]*)?$").expect("An+B ident pattern is valid"));

const NTH_PSEUDO_CLASSES: [&str; 4] =
    ["nth-child", "nth-last-child", "nth-of-type", "nth-last-of-type"];

fn is_nth_pseudo_class(name: &str) -> bool {
    NTH_PSEUDO_CLASSES
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
}

impl MatcherFactory {
    /// `selectors_group : selector [ COMMA S* selector ]*`
    ///
    /// Each selector is captured as `selector`.
    pub fn css_selector_list(&self) -> MatcherRef {
        self.cached("css-selector-list", || {
            let ows = self.optional_whitespace();
            juxt(vec![
                Arc::clone(&ows),
                self.css_selector().capture("selector").hash(),
                ows,
            ])
            .skip_whitespace(false)
        })
    }

    /// `selector : simple_selector_sequence [ combinator simple_selector_sequence ]*`
    ///
    /// Built right-recursively: a sequence, then optionally a combinator and
    /// another selector.
    pub fn css_selector(&self) -> MatcherRef {
        self.recursive(
            "css-selector",
            |selector| {
                juxt(vec![
                    self.css_simple_selector_seq(),
                    juxt(vec![self.css_combinator(), Arc::clone(selector)]).optional(),
                ])
                .skip_whitespace(false)
            },
            |selector| Arc::clone(selector),
        )
    }

    /// `combinator : PLUS S* | GREATER S* | TILDE S* | S+`
    pub fn css_combinator(&self) -> MatcherRef {
        self.cached("css-combinator", || {
            let ows = self.optional_whitespace();
            alt(vec![
                juxt(vec![
                    Arc::clone(&ows),
                    delims("+>~").capture("combinator"),
                    ows,
                ]),
                self.significant_whitespace().capture("combinator"),
            ])
            .skip_whitespace(false)
        })
    }

    /// ```text
    /// simple_selector_sequence
    ///   : [ type_selector | universal ]
    ///     [ HASH | class | attrib | pseudo | negation ]*
    ///   | [ HASH | class | attrib | pseudo | negation ]+
    /// ```
    pub fn css_simple_selector_seq(&self) -> MatcherRef {
        self.cached("css-simple-selector-seq", || {
            let modifier = alt(vec![
                self.css_id(),
                self.css_class(),
                self.css_attrib(),
                self.css_negation(),
                self.css_pseudo(),
            ]);
            alt(vec![
                juxt(vec![
                    alt(vec![self.css_type_selector(), self.css_universal()]),
                    modifier.star(),
                ]),
                modifier.plus(),
            ])
            .skip_whitespace(false)
        })
    }

    /// `namespace_prefix : [ IDENT | '*' ]? '|'`
    fn css_namespace_prefix(&self) -> MatcherRef {
        self.cached("css-namespace-prefix", || {
            juxt(vec![
                alt(vec![self.ident(), delim('*')]).optional(),
                delim('|'),
            ])
            .skip_whitespace(false)
        })
    }

    /// `type_selector : [ namespace_prefix ]? element_name`, captured as `element`.
    pub fn css_type_selector(&self) -> MatcherRef {
        self.cached("css-type-selector", || {
            juxt(vec![self.css_namespace_prefix().optional(), self.ident()])
                .capture("element")
                .skip_whitespace(false)
        })
    }

    /// `universal : [ namespace_prefix ]? '*'`, captured as `element`.
    pub fn css_universal(&self) -> MatcherRef {
        self.cached("css-universal", || {
            juxt(vec![self.css_namespace_prefix().optional(), delim('*')])
                .capture("element")
                .skip_whitespace(false)
        })
    }

    /// An id-type `<hash-token>`, captured as `id`.
    pub fn css_id(&self) -> MatcherRef {
        self.cached("css-id", || {
            let id: MatcherRef = Arc::new(TokenMatcher::with_predicate(TokenKind::Hash, |t| {
                matches!(t, CSSToken::Hash { hash_type: HashType::Id, .. })
            }));
            id.capture("id")
        })
    }

    /// `class : '.' IDENT`, captured as `class`.
    pub fn css_class(&self) -> MatcherRef {
        self.cached("css-class", || {
            juxt(vec![delim('.'), self.ident()])
                .capture("class")
                .skip_whitespace(false)
        })
    }

    /// ```text
    /// attrib
    ///   : '[' S* [ namespace_prefix ]? IDENT S*
    ///         [ [ PREFIXMATCH | SUFFIXMATCH | SUBSTRINGMATCH | '=' | INCLUDES | DASHMATCH ] S*
    ///           [ IDENT | STRING ] S*
    ///         ]? ']'
    /// ```
    ///
    /// The name is captured as `attribute`, the operator as `test` and the
    /// operand as `value`.
    pub fn css_attrib(&self) -> MatcherRef {
        self.cached("css-attrib", || {
            let ows = self.optional_whitespace();
            let test = alt(vec![juxt(vec![delims("^$*~|"), delim('=')]), delim('=')]);
            let name = juxt(vec![self.css_namespace_prefix().optional(), self.ident()]);
            let operand = alt(vec![self.ident(), self.string()]);
            block(
                '[',
                juxt(vec![
                    Arc::clone(&ows),
                    name.capture("attribute"),
                    Arc::clone(&ows),
                    juxt(vec![
                        test.capture("test"),
                        Arc::clone(&ows),
                        operand.capture("value"),
                        ows,
                    ])
                    .optional(),
                ]),
            )
            .skip_whitespace(false)
        })
    }

    /// ```text
    /// pseudo : ':' ':'? [ IDENT | functional_pseudo ]
    /// functional_pseudo : FUNCTION S* expression ')'
    /// expression : [ [ PLUS | '-' | DIMENSION | NUMBER | STRING | IDENT ] S* ]+
    /// ```
    ///
    /// Captured as `pseudo`. `:not()` is [`css_negation`](Self::css_negation),
    /// and the `nth-*` pseudo-classes take [`css_an_plus_b`](Self::css_an_plus_b).
    pub fn css_pseudo(&self) -> MatcherRef {
        self.cached("css-pseudo", || {
            let ows = self.optional_whitespace();
            let colon = token(TokenKind::Colon);
            let term = alt(vec![
                delims("+-"),
                token(TokenKind::Dimension),
                token(TokenKind::Number),
                self.string(),
                self.ident(),
            ]);
            let expression = juxt(vec![
                Arc::clone(&ows),
                juxt(vec![term, Arc::clone(&ows)]).plus(),
            ]);
            let functional: MatcherRef = Arc::new(FunctionMatcher::with_name_predicate(
                |name| !name.eq_ignore_ascii_case("not") && !is_nth_pseudo_class(name),
                expression,
            ));
            let nth: MatcherRef = Arc::new(FunctionMatcher::with_name_predicate(
                is_nth_pseudo_class,
                juxt(vec![Arc::clone(&ows), self.css_an_plus_b(), ows]),
            ));
            juxt(vec![
                Arc::clone(&colon),
                colon.optional(),
                alt(vec![self.ident(), nth, functional]),
            ])
            .capture("pseudo")
            .skip_whitespace(false)
        })
    }

    /// ```text
    /// negation : NOT S* negation_arg S* ')'
    /// negation_arg : type_selector | universal | HASH | class | attrib | pseudo
    /// ```
    ///
    /// Captured as `negation`.
    pub fn css_negation(&self) -> MatcherRef {
        self.cached("css-negation", || {
            let ows = self.optional_whitespace();
            let argument = alt(vec![
                self.css_type_selector(),
                self.css_universal(),
                self.css_id(),
                self.css_class(),
                self.css_attrib(),
                self.css_pseudo(),
            ]);
            juxt(vec![
                token(TokenKind::Colon),
                function("not", juxt(vec![Arc::clone(&ows), argument, ows])),
            ])
            .capture("negation")
            .skip_whitespace(false)
        })
    }

    /// [`An+B`](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax) as
    /// used by the `nth-*` pseudo-classes.
    ///
    /// Accepts `odd`, `even`, `B`, and `An`, `An+B`, `An-B` in their usual
    /// spellings. Whether `B` carried an explicit sign is not checked, so a
    /// few spellings the microsyntax rejects (`2n 1`) are accepted.
    pub fn css_an_plus_b(&self) -> MatcherRef {
        self.cached("css-an-plus-b", || {
            let ows = self.optional_whitespace();
            let n_dimension: MatcherRef =
                Arc::new(TokenMatcher::with_predicate(TokenKind::Dimension, |t| {
                    t.numeric_type() == Some(NumericType::Integer)
                        && t.unit().is_some_and(|unit| AN_PLUS_B_UNIT.is_match(unit))
                }));
            let n_ident = ident_where(|name| AN_PLUS_B_IDENT.is_match(name));
            let a = alt(vec![
                n_dimension,
                Arc::clone(&n_ident),
                juxt(vec![delim('+'), n_ident]),
            ]);
            let b = alt(vec![
                self.raw_integer(),
                juxt(vec![delims("+-"), Arc::clone(&ows), self.raw_integer()]),
            ]);
            alt(vec![
                keywords(&["odd", "even"]),
                self.raw_integer(),
                juxt(vec![a, juxt(vec![ows, b]).optional()]),
            ])
            .skip_whitespace(false)
        })
    }
}

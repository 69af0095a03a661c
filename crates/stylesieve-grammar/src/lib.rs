//! Lazy backtracking grammar matching over CSS component values.
//!
//! # Scope
//!
//! - **Value definition syntax** ([CSS Values 4 § 2](https://www.w3.org/TR/css-values-4/#value-defs))
//!   - Juxtaposition, `|`, `&&`, `||`, and the `? * + # {A,B}` multipliers
//!   - Functions and simple blocks as nested sub-grammars
//! - **Matching**
//!   - [`Matcher::generate_matches`] yields every way a grammar matches from
//!     a position, lazily, in preference order
//!   - [`Matcher::match_against`] is the whole-value entry point
//!   - Named captures, resolvable through nested functions and blocks
//! - **CSS grammars** ([`MatcherFactory`])
//!   - Numbers, dimensions and math functions, colors, images, positions
//!   - Media queries, supports conditions, Selectors Level 3, counter styles
//!
//! # Not implemented
//!
//! - Type checking of math expressions (`calc(1px + 1s)` is accepted)
//! - Value computation of any kind: matching only says *whether* and *how*
//!   a list conforms to a grammar
//!
//! # Cost
//!
//! Matching is bounded only by the grammar. A caller matching untrusted
//! input should cap how many candidates it pulls (`.take(n)`).

/// Single-value wildcards.
pub mod anything;
/// Choice between alternatives.
pub mod alternative;
/// Matches filtered by a semantic check.
pub mod checked;
/// Grammar construction and check errors.
pub mod error;
/// Capture, whitespace, and non-empty wrappers.
pub mod ext;
/// The CSS grammar factory.
pub mod factory;
/// Forward references for recursive productions.
pub mod forward;
/// Match results.
pub mod grammar_match;
/// Ordered sequences.
pub mod juxtaposition;
/// The matcher trait and options.
pub mod matcher;
/// Functions and simple blocks.
pub mod nested;
/// Repetition.
pub mod quantifier;
/// Single-token matchers.
pub mod token;
/// Any-order groups.
pub mod unordered;
/// URLs.
pub mod url;
/// Whitespace-sensitive matchers.
pub mod whitespace;

pub use alternative::Alternative;
pub use anything::{AnythingMatcher, NothingMatcher};
pub use checked::{Check, CheckedMatcher, DeclarationSanitizer};
pub use error::GrammarError;
pub use ext::{Captured, MatcherExt, NonEmpty, SkipWhitespace};
pub use factory::MatcherFactory;
pub use forward::{Forward, ForwardSlot};
pub use grammar_match::GrammarMatch;
pub use juxtaposition::Juxtaposition;
pub use matcher::{MatchOptions, Matcher, MatcherRef, Matches, make_match, next_position};
pub use nested::{BlockMatcher, FunctionMatcher, FunctionName};
pub use quantifier::Quantifier;
pub use token::{
    CustomPropertyMatcher, DelimMatcher, KeywordMatcher, TokenMatcher, TokenPredicate,
};
pub use unordered::UnorderedGroup;
pub use url::{AllowAllUrls, UrlMatcher, UrlValidator};
pub use whitespace::{NoWhitespace, WhitespaceMatcher};

//! CSS component values for the stylesieve grammar engine.
//!
//! # Scope
//!
//! - **Token model** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Preserved tokens only, with a field-less [`TokenKind`] discriminant
//! - **Component values** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Tokens, functions, and simple blocks
//!   - [`parse_component_values`] for turning CSS text into a list
//!   - [`parse_declaration`] for re-reading a span as `name: value`
//!
//! The grammar engine only ever reads these lists; nothing here is mutated
//! after parsing.

/// Component values and declarations.
pub mod component;
/// Errors from re-reading component value spans.
pub mod error;
/// CSS text to component values.
pub mod parser;
/// Preserved CSS tokens.
pub mod token;

pub use component::{
    ComponentValue, ComponentValueList, Declaration, to_css_string, trim_whitespace,
};
pub use error::SyntaxError;
pub use parser::{parse_component_values, parse_declaration};
pub use token::{CSSToken, HashType, NumericType, TokenKind};

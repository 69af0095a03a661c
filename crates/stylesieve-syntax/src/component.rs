//! Component values per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).

use core::fmt;

use serde::Serialize;

use crate::token::CSSToken;

/// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
///
/// "A component value is one of the preserved tokens, a function, or a simple block."
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ComponentValue {
    /// A preserved token.
    Token(CSSToken),
    /// A function with its contents.
    Function {
        /// The function name.
        name: String,
        /// The function arguments.
        value: ComponentValueList,
    },
    /// A simple block.
    Block {
        /// The opening token character: `(`, `[` or `{`.
        token: char,
        /// The block contents.
        value: ComponentValueList,
    },
}

/// An ordered sequence of component values.
///
/// Indices into a list stay valid for as long as the list is borrowed, which
/// is what lets grammar matches refer to positions instead of copying values.
pub type ComponentValueList = Vec<ComponentValue>;

impl ComponentValue {
    /// The token, if this is a preserved token.
    #[must_use]
    pub const fn as_token(&self) -> Option<&CSSToken> {
        match self {
            Self::Token(token) => Some(token),
            _ => None,
        }
    }

    /// Returns true if this is a `<whitespace-token>`.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Token(CSSToken::Whitespace))
    }

    /// The nested values of a function or simple block.
    #[must_use]
    pub fn nested(&self) -> Option<&[ComponentValue]> {
        match self {
            Self::Function { value, .. } | Self::Block { value, .. } => Some(value),
            Self::Token(_) => None,
        }
    }

    /// The closing character for a simple block's opening character.
    #[must_use]
    pub const fn mirror(open: char) -> char {
        match open {
            '(' => ')',
            '[' => ']',
            '{' => '}',
            other => other,
        }
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => write!(f, "{token}"),
            Self::Function { name, value } => {
                write!(f, "{name}(")?;
                write_list(f, value)?;
                write!(f, ")")
            }
            Self::Block { token, value } => {
                write!(f, "{token}")?;
                write_list(f, value)?;
                write!(f, "{}", Self::mirror(*token))
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[ComponentValue]) -> fmt::Result {
    values.iter().try_for_each(|v| write!(f, "{v}"))
}

/// Serialize a slice of component values back to CSS text.
///
/// Whitespace runs collapse to a single space; comments are already gone.
#[must_use]
pub fn to_css_string(values: &[ComponentValue]) -> String {
    values.iter().map(ToString::to_string).collect()
}

/// Remove leading and trailing `<whitespace-token>`s from a slice.
#[must_use]
pub fn trim_whitespace(values: &[ComponentValue]) -> &[ComponentValue] {
    let start = values
        .iter()
        .position(|v| !v.is_whitespace())
        .unwrap_or(values.len());
    let end = values
        .iter()
        .rposition(|v| !v.is_whitespace())
        .map_or(start, |i| i + 1);
    &values[start..end]
}

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// A CSS declaration (e.g., `color: red`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    /// The property name.
    pub name: String,
    /// The property value as component values.
    pub value: ComponentValueList,
    /// Whether the declaration has `!important`.
    pub important: bool,
}

//! Preserved CSS tokens per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! Only the tokens that survive [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
//! appear here. `<function-token>` and the opening bracket tokens never reach
//! a component value list: the parser folds them into
//! [`ComponentValue::Function`](crate::ComponentValue::Function) and
//! [`ComponentValue::Block`](crate::ComponentValue::Block).

use core::fmt;

use cssparser::serialize_string;
use serde::Serialize;
use strum_macros::EnumDiscriminants;

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<hash-token>` with the type flag set to 'id'... or 'unrestricted'."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HashType {
    /// "id" - the hash token's value is a valid identifier
    Id,
    /// "unrestricted" - the hash token's value is not a valid identifier
    Unrestricted,
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<number-token>` has a type flag set to either 'integer' or 'number'."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumericType {
    /// "integer" - the number is an integer
    Integer,
    /// "number" - the number has a decimal point or exponent
    Number,
}

impl NumericType {
    /// "integer" exactly when the tokenizer produced an integer value.
    #[must_use]
    pub const fn for_int_value(int_value: Option<i64>) -> Self {
        if int_value.is_some() {
            Self::Integer
        } else {
            Self::Number
        }
    }
}

/// A preserved token inside a component value list.
///
/// [`TokenKind`] is the field-less discriminant of this enum and is what
/// grammar matchers dispatch on.
#[derive(Debug, Clone, PartialEq, Serialize, EnumDiscriminants)]
#[strum_discriminants(name(TokenKind), derive(Hash, Serialize, strum_macros::Display))]
pub enum CSSToken {
    /// "`<ident-token>`"
    Ident(String),

    /// "`<at-keyword-token>`"
    AtKeyword(String),

    /// "`<hash-token>`"
    /// "has a type flag set to either 'id' or 'unrestricted'"
    Hash {
        /// "a value composed of one or more code points"
        value: String,
        /// "a type flag set to either 'id' or 'unrestricted'"
        hash_type: HashType,
    },

    /// "`<string-token>`"
    String(String),

    /// "`<bad-string-token>`"
    BadString,

    /// "`<url-token>`", only produced for unquoted `url(...)`.
    Url(String),

    /// "`<bad-url-token>`"
    BadUrl,

    /// "`<delim-token>`"
    /// "has a value composed of a single code point"
    Delim(char),

    /// "`<number-token>`"
    Number {
        /// "a numeric value"
        value: f64,
        /// The integer value if this is an integer type.
        int_value: Option<i64>,
        /// "a type flag set to either 'integer' or 'number'"
        numeric_type: NumericType,
    },

    /// "`<percentage-token>`"
    Percentage {
        /// "a numeric value", in percent (`50%` has value `50.0`)
        value: f64,
        /// The integer value if this is an integer type.
        int_value: Option<i64>,
        /// "a type flag set to either 'integer' or 'number'"
        numeric_type: NumericType,
    },

    /// "`<dimension-token>`"
    Dimension {
        /// "a numeric value"
        value: f64,
        /// The integer value if this is an integer type.
        int_value: Option<i64>,
        /// "a type flag set to either 'integer' or 'number'"
        numeric_type: NumericType,
        /// "a unit"
        unit: String,
    },

    /// "`<whitespace-token>`"
    Whitespace,

    /// "`<CDO-token>`"
    CDO,

    /// "`<CDC-token>`"
    CDC,

    /// "`<colon-token>`"
    Colon,

    /// "`<semicolon-token>`"
    Semicolon,

    /// "`<comma-token>`"
    Comma,

    /// A `<]-token>` with no matching opener.
    RightBracket,

    /// A `<)-token>` with no matching opener.
    RightParen,

    /// A `<}-token>` with no matching opener.
    RightBrace,
}

impl CSSToken {
    /// Create a new ident token.
    #[must_use]
    pub fn ident(value: impl Into<String>) -> Self {
        Self::Ident(value.into())
    }

    /// Create a new hash token with id type.
    #[must_use]
    pub fn hash_id(value: impl Into<String>) -> Self {
        Self::Hash {
            value: value.into(),
            hash_type: HashType::Id,
        }
    }

    /// Create a new hash token with unrestricted type.
    #[must_use]
    pub fn hash_unrestricted(value: impl Into<String>) -> Self {
        Self::Hash {
            value: value.into(),
            hash_type: HashType::Unrestricted,
        }
    }

    /// Create a new string token.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create a new number token; the type flag follows `int_value`.
    #[must_use]
    pub const fn number(value: f64, int_value: Option<i64>) -> Self {
        Self::Number {
            value,
            int_value,
            numeric_type: NumericType::for_int_value(int_value),
        }
    }

    /// Create a new percentage token, with `value` in percent.
    #[must_use]
    pub const fn percentage(value: f64, int_value: Option<i64>) -> Self {
        Self::Percentage {
            value,
            int_value,
            numeric_type: NumericType::for_int_value(int_value),
        }
    }

    /// Create a new dimension token.
    #[must_use]
    pub fn dimension(value: f64, int_value: Option<i64>, unit: impl Into<String>) -> Self {
        Self::Dimension {
            value,
            int_value,
            numeric_type: NumericType::for_int_value(int_value),
            unit: unit.into(),
        }
    }

    /// Create a new URL token.
    #[must_use]
    pub fn url(value: impl Into<String>) -> Self {
        Self::Url(value.into())
    }

    /// The discriminant of this token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        TokenKind::from(self)
    }

    /// Returns true if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// The numeric value of a number, percentage, or dimension token.
    #[must_use]
    pub const fn numeric_value(&self) -> Option<f64> {
        match self {
            Self::Number { value, .. }
            | Self::Percentage { value, .. }
            | Self::Dimension { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// The type flag of a number, percentage, or dimension token.
    #[must_use]
    pub const fn numeric_type(&self) -> Option<NumericType> {
        match self {
            Self::Number { numeric_type, .. }
            | Self::Percentage { numeric_type, .. }
            | Self::Dimension { numeric_type, .. } => Some(*numeric_type),
            _ => None,
        }
    }

    /// The unit of a dimension token.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        match self {
            Self::Dimension { unit, .. } => Some(unit),
            _ => None,
        }
    }

    /// The string payload of ident, at-keyword, hash, string, and url tokens.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Ident(v) | Self::AtKeyword(v) | Self::String(v) | Self::Url(v) => Some(v),
            Self::Hash { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for CSSToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(v) => write!(f, "{v}"),
            Self::AtKeyword(v) => write!(f, "@{v}"),
            Self::Hash { value, .. } => write!(f, "#{value}"),
            Self::String(v) => serialize_string(v, f),
            Self::BadString => write!(f, "<bad-string>"),
            Self::Url(v) => write!(f, "url({v})"),
            Self::BadUrl => write!(f, "<bad-url>"),
            Self::Delim(c) => write!(f, "{c}"),
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Percentage { value, .. } => write!(f, "{value}%"),
            Self::Dimension { value, unit, .. } => write!(f, "{value}{unit}"),
            Self::Whitespace => write!(f, " "),
            Self::CDO => write!(f, "<!--"),
            Self::CDC => write!(f, "-->"),
            Self::Colon => write!(f, ":"),
            Self::Semicolon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::RightBracket => write!(f, "]"),
            Self::RightParen => write!(f, ")"),
            Self::RightBrace => write!(f, "}}"),
        }
    }
}

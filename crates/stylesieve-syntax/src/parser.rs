//! CSS text to component values per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! Tokenization is delegated to [`cssparser`]; this module folds its token
//! stream into the crate's [`ComponentValue`] tree and re-reads spans of
//! that tree as declarations.

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::component::{ComponentValue, ComponentValueList, Declaration};
use crate::error::SyntaxError;
use crate::token::CSSToken;

/// [§ 5.3.10 Parse a list of component values](https://www.w3.org/TR/css-syntax-3/#parse-list-of-component-values)
///
/// "Repeatedly consume a component value from input until an `<EOF-token>`
/// is returned, appending the returned values (except the final `<EOF-token>`)
/// into a list. Return the list."
///
/// Whitespace is preserved; comments are dropped.
#[must_use]
pub fn parse_component_values(css: &str) -> ComponentValueList {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    consume_list(&mut parser)
}

fn consume_list(parser: &mut Parser<'_, '_>) -> ComponentValueList {
    let mut values = Vec::new();
    loop {
        // "<EOF-token>": return the list.
        let Ok(token) = parser.next_including_whitespace().cloned() else {
            return values;
        };

        match token {
            // "<function-token>": consume a function.
            Token::Function(name) => values.push(ComponentValue::Function {
                name: name.to_string(),
                value: consume_nested(parser),
            }),
            // "<{-token>, <[-token>, or <(-token>": consume a simple block.
            Token::ParenthesisBlock => values.push(block('(', parser)),
            Token::SquareBracketBlock => values.push(block('[', parser)),
            Token::CurlyBracketBlock => values.push(block('{', parser)),
            other => values.extend(preserved(&other).into_iter().map(ComponentValue::Token)),
        }
    }
}

fn block(token: char, parser: &mut Parser<'_, '_>) -> ComponentValue {
    ComponentValue::Block {
        token,
        value: consume_nested(parser),
    }
}

fn consume_nested<'i>(parser: &mut Parser<'i, '_>) -> ComponentValueList {
    parser
        .parse_nested_block(|inner| Ok::<_, ParseError<'i, ()>>(consume_list(inner)))
        .unwrap_or_default()
}

/// Map a non-block token onto the preserved tokens of CSS Syntax Level 3.
///
/// The attribute-matching tokens of CSS 2.1 (`~=`, `|=`, ...) no longer
/// exist in Level 3; they are two `<delim-token>`s.
fn preserved(token: &Token<'_>) -> Vec<CSSToken> {
    let single = match token {
        Token::Ident(v) => CSSToken::ident(v.to_string()),
        Token::AtKeyword(v) => CSSToken::AtKeyword(v.to_string()),
        Token::Hash(v) => CSSToken::hash_unrestricted(v.to_string()),
        Token::IDHash(v) => CSSToken::hash_id(v.to_string()),
        Token::QuotedString(v) => CSSToken::string(v.to_string()),
        Token::UnquotedUrl(v) => CSSToken::url(v.to_string()),
        Token::Delim(c) => CSSToken::Delim(*c),
        Token::Number {
            value, int_value, ..
        } => CSSToken::number(f64::from(*value), int_value.map(i64::from)),
        Token::Percentage {
            unit_value,
            int_value,
            ..
        } => CSSToken::percentage(percent(*unit_value, *int_value), int_value.map(i64::from)),
        Token::Dimension {
            value,
            int_value,
            unit,
            ..
        } => CSSToken::dimension(f64::from(*value), int_value.map(i64::from), unit.to_string()),
        Token::WhiteSpace(_) => CSSToken::Whitespace,
        Token::Comment(_) => return Vec::new(),
        Token::Colon => CSSToken::Colon,
        Token::Semicolon => CSSToken::Semicolon,
        Token::Comma => CSSToken::Comma,
        Token::IncludeMatch => return vec![CSSToken::Delim('~'), CSSToken::Delim('=')],
        Token::DashMatch => return vec![CSSToken::Delim('|'), CSSToken::Delim('=')],
        Token::PrefixMatch => return vec![CSSToken::Delim('^'), CSSToken::Delim('=')],
        Token::SuffixMatch => return vec![CSSToken::Delim('$'), CSSToken::Delim('=')],
        Token::SubstringMatch => return vec![CSSToken::Delim('*'), CSSToken::Delim('=')],
        Token::CDO => CSSToken::CDO,
        Token::CDC => CSSToken::CDC,
        Token::BadUrl(_) => CSSToken::BadUrl,
        Token::BadString(_) => CSSToken::BadString,
        Token::CloseParenthesis => CSSToken::RightParen,
        Token::CloseSquareBracket => CSSToken::RightBracket,
        Token::CloseCurlyBracket => CSSToken::RightBrace,
        // Handled by `consume_list`.
        Token::Function(_)
        | Token::ParenthesisBlock
        | Token::SquareBracketBlock
        | Token::CurlyBracketBlock => return Vec::new(),
    };
    vec![single]
}

/// `cssparser` stores percentages as a fraction; the token model keeps percent.
fn percent(unit_value: f32, int_value: Option<i32>) -> f64 {
    int_value.map_or_else(|| f64::from(unit_value) * 100.0, f64::from)
}

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// Re-reads an already parsed span (such as the contents of a `(...)` block
/// in `@supports`) as a single declaration.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the span does not start with an ident, or if
/// the ident is not followed by a colon.
pub fn parse_declaration(values: &[ComponentValue]) -> Result<Declaration, SyntaxError> {
    let mut iter = values.iter().skip_while(|v| v.is_whitespace()).peekable();

    // "Consume the next input token."
    let name = match iter.next() {
        Some(ComponentValue::Token(CSSToken::Ident(name))) => name.clone(),
        Some(other) => return Err(SyntaxError::ExpectedIdent(other.to_string())),
        None => return Err(SyntaxError::Empty),
    };

    // "While the next input token is a <whitespace-token>, consume the next input token."
    while iter.peek().is_some_and(|v| v.is_whitespace()) {
        let _ = iter.next();
    }

    // "If the next input token is anything other than a <colon-token>, this is a parse error.
    // Return nothing."
    if !matches!(iter.next(), Some(ComponentValue::Token(CSSToken::Colon))) {
        return Err(SyntaxError::ExpectedColon(name));
    }

    // "While the next input token is a <whitespace-token>, consume the next input token."
    while iter.peek().is_some_and(|v| v.is_whitespace()) {
        let _ = iter.next();
    }

    // "As long as the next input token is anything other than an <EOF-token>, consume a
    // component value and append it to the declaration's value."
    let value: ComponentValueList = iter.cloned().collect();
    let important = check_important(&value);
    let value = trim_important(value);

    Ok(Declaration {
        name,
        value,
        important,
    })
}

/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// "If the last two non-<whitespace-token>s in the declaration's value are a
/// <delim-token> with the value "!" followed by an <ident-token> with a value
/// that is an ASCII case-insensitive match for "important"..."
fn check_important(value: &[ComponentValue]) -> bool {
    let mut iter = value.iter().rev().filter(|v| !v.is_whitespace());
    matches!(
        iter.next(),
        Some(ComponentValue::Token(CSSToken::Ident(s))) if s.eq_ignore_ascii_case("important")
    ) && matches!(iter.next(), Some(ComponentValue::Token(CSSToken::Delim('!'))))
}

/// Remove trailing whitespace and `!important` from a declaration value.
fn trim_important(mut value: ComponentValueList) -> ComponentValueList {
    let strip_whitespace = |value: &mut ComponentValueList| {
        while value.last().is_some_and(ComponentValue::is_whitespace) {
            let _ = value.pop();
        }
    };

    strip_whitespace(&mut value);
    if check_important(&value) {
        let _ = value.pop(); // important
        strip_whitespace(&mut value);
        let _ = value.pop(); // !
    }
    strip_whitespace(&mut value);
    value
}

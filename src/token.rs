//! Defines the `Token` and `TokenType` enums.
//!
//! These are the intermediate representation between the `Scanner` and
//! the `Parser`. String payloads borrow straight from the source.

use crate::value::JsonNumber;

/// The specific type of a `Token`.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType<'a> {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// A string, e.g. `"hello"`, without its quotes.
    String(&'a str),
    /// A number, e.g. `123` or `-0.5`
    Number(JsonNumber),
    /// `true` or `false`
    Boolean(bool),
    /// The `null` literal
    Null,
    /// End of input. Always the last token of a scan.
    Eof,
}

impl TokenType<'_> {
    /// A short description used in parser error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenType::LeftBrace => "'{'".to_string(),
            TokenType::RightBrace => "'}'".to_string(),
            TokenType::LeftBracket => "'['".to_string(),
            TokenType::RightBracket => "']'".to_string(),
            TokenType::Colon => "':'".to_string(),
            TokenType::Comma => "','".to_string(),
            TokenType::String(s) => format!("string \"{}\"", s),
            TokenType::Number(n) => format!("number {}", n),
            TokenType::Boolean(b) => format!("boolean {}", b),
            TokenType::Null => "null".to_string(),
            TokenType::Eof => "end of input".to_string(),
        }
    }
}

/// A single token produced by the `Scanner`.
#[derive(Debug, PartialEq, Clone)]
pub struct Token<'a> {
    /// The type (and payload) of the token.
    pub kind: TokenType<'a>,
    /// The 1-indexed line on which the token started.
    pub line: usize,
}

impl<'a> Token<'a> {
    pub(crate) fn new(kind: TokenType<'a>, line: usize) -> Self {
        Token { kind, line }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(TokenType::Comma.describe(), "','");
        assert_eq!(TokenType::String("k").describe(), "string \"k\"");
        assert_eq!(
            TokenType::Number(JsonNumber::F64(2.5)).describe(),
            "number 2.5"
        );
        assert_eq!(TokenType::Eof.describe(), "end of input");
    }
}

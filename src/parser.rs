//! Contains the recursive-descent `Parser`.
//!
//! The parser walks the scanner's token list once, left to right, and
//! builds the `JsonValue` tree. Nesting is bounded by `max_depth` so a
//! hostile input like `[[[[...` cannot exhaust the call stack.

use crate::error::{ErrorKind, ParseError};
use crate::token::{Token, TokenType};
use crate::value::JsonValue;
use std::collections::BTreeMap;

/// Builds a `JsonValue` out of an `Eof`-terminated token list.
pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    /// Index of the next token to hand out.
    current: usize,
    /// Current nesting depth of objects and arrays.
    depth: usize,
    max_depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    /// Creates a parser over `tokens`, as produced by [`crate::Scanner::scan`].
    pub fn new(tokens: &'t [Token<'a>], max_depth: usize) -> Self {
        Parser {
            tokens,
            current: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Parses one value starting at the first token.
    ///
    /// Tokens after the end of that value are left unread: `1 2` parses
    /// as `1`.
    ///
    /// # Errors
    /// Returns the first grammar violation. There is no recovery.
    pub fn parse(&mut self) -> Result<JsonValue, ParseError> {
        let token = self.advance();
        self.parse_from_token(token)
    }

    /// Index of the first token not consumed so far.
    pub fn position(&self) -> usize {
        self.current
    }

    /// Returns the token at the cursor without moving.
    ///
    /// Past the end (or on an empty list) this is a synthetic `Eof`.
    fn peek(&self) -> Token<'a> {
        match self.tokens.get(self.current) {
            Some(token) => token.clone(),
            None => {
                let line = self.tokens.last().map_or(1, |token| token.line);
                Token::new(TokenType::Eof, line)
            }
        }
    }

    /// Returns the token at the cursor and moves past it. Never moves past `Eof`.
    fn advance(&mut self) -> Token<'a> {
        let token = self.peek();
        if token.kind != TokenType::Eof {
            self.current += 1;
        }
        token
    }

    fn error_from_token(&self, kind: ErrorKind, message: String, token: &Token<'a>) -> ParseError {
        ParseError::at_line(kind, message, token.line)
    }

    fn parse_from_token(&mut self, token: Token<'a>) -> Result<JsonValue, ParseError> {
        match token.kind {
            TokenType::String(s) => Ok(JsonValue::String(s.to_string())),
            TokenType::Number(n) => Ok(JsonValue::Number(n)),
            TokenType::Boolean(b) => Ok(JsonValue::Boolean(b)),
            TokenType::Null => Ok(JsonValue::Null),
            TokenType::LeftBrace => {
                self.enter(&token)?;
                let object = self.parse_object()?;
                self.depth -= 1;
                Ok(object)
            }
            TokenType::LeftBracket => {
                self.enter(&token)?;
                let array = self.parse_array()?;
                self.depth -= 1;
                Ok(array)
            }
            _ => Err(self.error_from_token(
                ErrorKind::UnexpectedToken,
                format!("Unexpected {}", token.kind.describe()),
                &token,
            )),
        }
    }

    fn enter(&mut self, token: &Token<'a>) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.error_from_token(
                ErrorKind::DepthLimitExceeded,
                "Maximum nesting depth exceeded".to_string(),
                token,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// The `{` has been consumed.
    fn parse_object(&mut self) -> Result<JsonValue, ParseError> {
        let mut object = BTreeMap::new();

        let mut key_token = self.advance();
        loop {
            let key = match &key_token.kind {
                TokenType::RightBrace => break,
                TokenType::Eof => {
                    return Err(self.unterminated(TokenType::RightBrace, &key_token))
                }
                TokenType::String(key) => *key,
                other => {
                    return Err(self.error_from_token(
                        ErrorKind::KeyNotString,
                        format!(
                            "JSON object fields must begin with a \"key\", found {}",
                            other.describe()
                        ),
                        &key_token,
                    ))
                }
            };

            self.consume(
                TokenType::Colon,
                ErrorKind::MissingColon,
                "Key: values must be colon separated",
            )?;

            let value_token = self.advance();
            let value = self.parse_from_token(value_token)?;
            // Last writer wins.
            object.insert(key.to_string(), value);

            self.consume_comma_unless(TokenType::RightBrace)?;
            key_token = self.advance();
        }

        Ok(JsonValue::Object(object))
    }

    /// The `[` has been consumed.
    fn parse_array(&mut self) -> Result<JsonValue, ParseError> {
        let mut array = Vec::new();

        let mut token = self.advance();
        loop {
            match token.kind {
                TokenType::RightBracket => break,
                TokenType::Eof => {
                    return Err(self.unterminated(TokenType::RightBracket, &token))
                }
                _ => array.push(self.parse_from_token(token)?),
            }

            self.consume_comma_unless(TokenType::RightBracket)?;
            token = self.advance();
        }

        Ok(JsonValue::Array(array))
    }

    fn consume(
        &mut self,
        expected: TokenType<'a>,
        kind: ErrorKind,
        message: &str,
    ) -> Result<(), ParseError> {
        let token = self.peek();
        if token.kind != expected {
            return Err(self.error_from_token(
                kind,
                format!("{}, found {}", message, token.kind.describe()),
                &token,
            ));
        }
        self.advance();
        Ok(())
    }

    /// After an element: a `,` is always consumed, which is what lets a
    /// trailing comma through. Otherwise the closer must come next; it is
    /// left for the caller's loop to read. Running out of tokens here means
    /// the container was never closed.
    fn consume_comma_unless(&mut self, closer: TokenType<'a>) -> Result<(), ParseError> {
        let token = self.peek();
        match &token.kind {
            TokenType::Comma => {
                self.advance();
                Ok(())
            }
            kind if *kind == closer => Ok(()),
            TokenType::Eof => Err(self.unterminated(closer, &token)),
            kind => Err(self.error_from_token(
                ErrorKind::MissingComma,
                format!(
                    "Missing comma: expected ',' or {}, found {}",
                    closer.describe(),
                    kind.describe()
                ),
                &token,
            )),
        }
    }

    fn unterminated(&self, closer: TokenType<'a>, token: &Token<'a>) -> ParseError {
        if closer == TokenType::RightBrace {
            self.error_from_token(
                ErrorKind::UnterminatedObject,
                "Unterminated JSON object".to_string(),
                token,
            )
        } else {
            self.error_from_token(
                ErrorKind::UnterminatedArray,
                "Unterminated JSON array".to_string(),
                token,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;
    use crate::value::JsonNumber;

    fn parse_with_depth(input: &str, max_depth: usize) -> Result<JsonValue, ParseError> {
        let tokens = Scanner::new(input).scan()?;
        Parser::new(&tokens, max_depth).parse()
    }

    fn parse(input: &str) -> Result<JsonValue, ParseError> {
        parse_with_depth(input, 64)
    }

    fn int(n: i64) -> JsonValue {
        JsonValue::Number(JsonNumber::I64(n))
    }

    #[test]
    fn test_parser_scalars() {
        assert_eq!(parse("\"x\"").unwrap(), JsonValue::String("x".to_string()));
        assert_eq!(parse("-42").unwrap(), int(-42));
        assert_eq!(
            parse("2.5").unwrap(),
            JsonValue::Number(JsonNumber::F64(2.5))
        );
        assert_eq!(parse("true").unwrap(), JsonValue::Boolean(true));
        assert_eq!(parse("null").unwrap(), JsonValue::Null);
    }

    #[test]
    fn test_parser_empty_containers() {
        assert_eq!(parse("[]").unwrap(), JsonValue::Array(vec![]));
        assert_eq!(parse("{}").unwrap(), JsonValue::Object(BTreeMap::new()));
        assert_eq!(
            parse("[{}, []]").unwrap(),
            JsonValue::Array(vec![
                JsonValue::Object(BTreeMap::new()),
                JsonValue::Array(vec![])
            ])
        );
    }

    #[test]
    fn test_parser_trailing_commas() {
        assert_eq!(parse("[1,2,]").unwrap(), parse("[1,2]").unwrap());
        assert_eq!(parse("{\"a\":1,}").unwrap(), parse("{\"a\":1}").unwrap());
    }

    #[test]
    fn test_parser_duplicate_keys() {
        let value = parse(r#"{"a": 1, "a": 2}"#).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("a".to_string(), int(2));
        assert_eq!(value, JsonValue::Object(expected));
    }

    #[test]
    fn test_parser_leaves_trailing_tokens() {
        let tokens = Scanner::new("1 2").scan().unwrap();
        let mut parser = Parser::new(&tokens, 64);
        assert_eq!(parser.parse().unwrap(), int(1));
        assert_eq!(parser.position(), 1);

        assert_eq!(parse("[] {").unwrap(), JsonValue::Array(vec![]));
    }

    #[test]
    fn test_parser_object_errors() {
        let err = parse("{\"a\": 1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedObject);
        assert_eq!(err.message, "Unterminated JSON object");

        let err = parse("{").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedObject);

        let err = parse("{1: \"x\"}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::KeyNotString);
        assert_eq!(
            err.message,
            "JSON object fields must begin with a \"key\", found number 1"
        );

        let err = parse("{\"key\" 1}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingColon);
        assert_eq!(
            err.message,
            "Key: values must be colon separated, found number 1"
        );

        let err = parse("{\"a\": 1 \"b\": 2}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingComma);
        assert_eq!(
            err.message,
            "Missing comma: expected ',' or '}', found string \"b\""
        );

        // A trailing comma is fine, but not two in a row.
        let err = parse("{\"a\": 1,,}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::KeyNotString);

        let err = parse("{\"a\": }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.message, "Unexpected '}'");
    }

    #[test]
    fn test_parser_array_errors() {
        let err = parse("[1 2]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingComma);
        assert_eq!(
            err.message,
            "Missing comma: expected ',' or ']', found number 2"
        );

        let err = parse("[1,").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedArray);
        assert_eq!(err.message, "Unterminated JSON array");

        let err = parse("[1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedArray);

        let err = parse("[[1, 2]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedArray);

        let err = parse("[,]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.message, "Unexpected ','");

        let err = parse("[1,,]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);

        let err = parse("[1}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingComma);
    }

    #[test]
    fn test_parser_top_level_errors() {
        let err = parse("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.message, "Unexpected end of input");

        let err = parse("]").unwrap_err();
        assert_eq!(err.message, "Unexpected ']'");

        let err = parse(":").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_parser_error_lines() {
        let err = parse("[\n1,\n2\n3]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingComma);
        assert_eq!(err.line, Some(4));

        let err = parse("{\n\"a\": 1,\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedObject);
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn test_parser_empty_token_slice() {
        let err = Parser::new(&[], 64).parse().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn test_parser_depth_limit() {
        let evil_input = "[".repeat(11) + &"]".repeat(11);
        let err = parse_with_depth(&evil_input, 10).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DepthLimitExceeded);
        assert_eq!(err.message, "Maximum nesting depth exceeded");

        let ok_input = "[".repeat(10) + &"]".repeat(10);
        assert!(parse_with_depth(&ok_input, 10).is_ok());

        // Depth is released on the way out, so siblings do not accumulate.
        let siblings = format!("[{}]", vec!["[[]]"; 20].join(","));
        assert!(parse_with_depth(&siblings, 3).is_ok());

        let err = parse_with_depth("{\"a\": {\"b\": {}}}", 2).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DepthLimitExceeded);
    }
}

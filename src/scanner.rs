//! The byte-based scanner (lexer).
//!
//! Consumes the whole source left to right and produces the complete
//! token list, terminated by a single `Eof` token. Dispatch goes through
//! a 256-entry class table; string bodies are located with `memchr`.

use crate::error::{ErrorKind, ParseError};
use crate::token::{Token, TokenType};
use crate::value::JsonNumber;
use memchr::memchr;
use num_bigint::BigInt;

// --- The Lookup Table (LUT) ---
// One class per byte. Class 0 is "cannot start a token".
const W: u8 = 1; // Whitespace (space and newline only)
const S: u8 = 2; // Structural
const Q: u8 = 3; // Quote
const D: u8 = 4; // Digit
const M: u8 = 5; // Minus
const A: u8 = 6; // ASCII letter

static BYTE_CLASS: [u8; 256] = {
    let mut table = [0; 256];
    table[b' ' as usize] = W;
    table[b'\n' as usize] = W;

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b'"' as usize] = Q;
    table[b'-' as usize] = M;

    let mut b = b'0';
    while b <= b'9' {
        table[b as usize] = D;
        b += 1;
    }
    let mut b = b'a';
    while b <= b'z' {
        table[b as usize] = A;
        table[(b - b'a' + b'A') as usize] = A;
        b += 1;
    }
    table
};

/// `peek` returns `None` past the end, which is never a digit.
#[inline]
fn is_digit(byte: Option<u8>) -> bool {
    matches!(byte, Some(b'0'..=b'9'))
}

#[inline]
fn is_alpha(byte: Option<u8>) -> bool {
    matches!(byte, Some(b) if b.is_ascii_alphabetic())
}

/// Turns a source string into a token list.
pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    /// Start of the lexeme being scanned.
    start: usize,
    /// Next byte to read.
    current: usize,
    /// 1-indexed line counter.
    line: usize,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            bytes: source.as_bytes(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    /// Scans the entire source.
    ///
    /// On success the last token is always `TokenType::Eof`, and it is
    /// the only `Eof` in the list.
    ///
    /// # Errors
    /// Returns the first lexical error found; nothing after it is scanned.
    pub fn scan(mut self) -> Result<Vec<Token<'a>>, ParseError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }
        self.tokens.push(Token::new(TokenType::Eof, self.line));
        Ok(self.tokens)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.bytes.len()
    }

    /// Returns the byte at the cursor and moves past it.
    /// Assumes the cursor is not at the end.
    #[inline]
    fn advance(&mut self) -> u8 {
        let byte = self.bytes[self.current];
        self.current += 1;
        byte
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.current).copied()
    }

    #[inline]
    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.current + 1).copied()
    }

    fn add_token(&mut self, kind: TokenType<'a>) {
        self.tokens.push(Token::new(kind, self.line));
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::at_line(kind, message, self.line)
    }

    fn scan_token(&mut self) -> Result<(), ParseError> {
        let byte = self.advance();
        match BYTE_CLASS[byte as usize] {
            S => {
                let kind = match byte {
                    b'{' => TokenType::LeftBrace,
                    b'}' => TokenType::RightBrace,
                    b'[' => TokenType::LeftBracket,
                    b']' => TokenType::RightBracket,
                    b':' => TokenType::Colon,
                    b',' => TokenType::Comma,
                    _ => unreachable!(), // LUT guarantees this
                };
                self.add_token(kind);
                Ok(())
            }
            W => {
                if byte == b'\n' {
                    self.line += 1;
                }
                Ok(())
            }
            Q => self.scan_string(),
            D => self.scan_number(),
            M => {
                if !is_digit(self.peek()) {
                    return Err(self.error(
                        ErrorKind::MinusWithoutDigit,
                        "'-' must be followed by a number",
                    ));
                }
                self.advance();
                self.scan_number()
            }
            A => self.scan_keyword(),
            _ => {
                // `start` is always on a char boundary, so this names the whole
                // character even when it is multi-byte.
                let c = self.source[self.start..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                Err(self.error(
                    ErrorKind::UnexpectedCharacter,
                    format!("Unexpected character '{}'", c.escape_debug()),
                ))
            }
        }
    }

    /// The opening quote has been consumed. The first `"` after it closes
    /// the string; there are no escapes.
    fn scan_string(&mut self) -> Result<(), ParseError> {
        let source = self.source;
        let rest = &self.bytes[self.current..];
        let Some(offset) = memchr(b'"', rest) else {
            return Err(self.error(ErrorKind::UnterminatedString, "Unterminated string"));
        };

        // Both quotes are ASCII, so these offsets are char boundaries.
        let content = &source[self.current..self.current + offset];
        self.current += offset + 1; // Past the closing quote

        // Newlines inside the quotes do not advance the line counter.
        self.add_token(TokenType::String(content));
        Ok(())
    }

    /// The first digit (and a leading `-`) has been consumed.
    fn scan_number(&mut self) -> Result<(), ParseError> {
        while is_digit(self.peek()) {
            self.advance();
        }

        let mut has_fraction = false;
        if self.peek() == Some(b'.') {
            if !is_digit(self.peek_next()) {
                return Err(self.error(
                    ErrorKind::MissingFractionDigit,
                    "Expected digit after '.'",
                ));
            }
            self.advance(); // Consume the '.'
            while is_digit(self.peek()) {
                self.advance();
            }
            has_fraction = true;
        }

        let source = self.source;
        let lexeme = &source[self.start..self.current];
        let number = if has_fraction {
            // `-?[0-9]+\.[0-9]+` always parses as f64.
            lexeme.parse::<f64>().map(JsonNumber::F64).map_err(|_| {
                self.error(
                    ErrorKind::InvalidNumber,
                    format!("Invalid number '{}'", lexeme),
                )
            })?
        } else {
            self.parse_integer(lexeme)?
        };
        self.add_token(TokenType::Number(number));
        Ok(())
    }

    /// Narrowest of `i64`, `u64` and `BigInt` that holds the lexeme exactly.
    fn parse_integer(&self, lexeme: &str) -> Result<JsonNumber, ParseError> {
        if let Ok(n) = lexeme.parse::<i64>() {
            return Ok(JsonNumber::I64(n));
        }
        if let Ok(n) = lexeme.parse::<u64>() {
            return Ok(JsonNumber::U64(n));
        }
        lexeme.parse::<BigInt>().map(JsonNumber::Big).map_err(|_| {
            self.error(
                ErrorKind::InvalidNumber,
                format!("Invalid number '{}'", lexeme),
            )
        })
    }

    /// The first letter has been consumed.
    fn scan_keyword(&mut self) -> Result<(), ParseError> {
        while is_alpha(self.peek()) {
            self.advance();
        }

        let source = self.source;
        let kind = match &source[self.start..self.current] {
            "true" => TokenType::Boolean(true),
            "false" => TokenType::Boolean(false),
            "null" => TokenType::Null,
            keyword => {
                return Err(self.error(
                    ErrorKind::UnknownKeyword,
                    format!("Unknown keyword '{}'", keyword),
                ))
            }
        };
        self.add_token(kind);
        Ok(())
    }
}

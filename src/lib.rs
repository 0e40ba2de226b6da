//! # descent-json
//!
//! `descent-json` decodes a lenient subset of JSON into a `JsonValue` tree.
//!
//! Decoding is a two-stage pipeline: a byte-based [`Scanner`] turns the
//! whole source into a token list ending in a single `Eof` token, then a
//! recursive-descent [`Parser`] assembles that list into the value tree.
//!
//! ## What the grammar accepts
//!
//! * Objects, arrays, strings, numbers, `true`, `false` and `null`, at the
//!   top level too.
//! * **Trailing commas:** `[1, 2,]` and `{"a": 1,}` are accepted.
//! * **Numbers:** `-?[0-9]+(\.[0-9]+)?`. A lexeme without a `.` is an
//!   integer, with one it is a float. No exponents, no leading `+`.
//! * **Strings:** everything up to the next `"`, taken verbatim. There are
//!   no escape sequences; a backslash is just a backslash.
//! * **Whitespace:** only space and newline. A tab is an error.
//!
//! Anything after the first complete top-level value is not checked:
//! `1 2` decodes as `1`. Scanning still runs over the whole input, so a
//! lexical error anywhere fails the call.
//!
//! ## Quick Start
//!
//! ```
//! use descent_json::{parse, JsonValue};
//!
//! let value = parse(r#"{"name": "Alice", "age": 30, "tags": ["a", "b",]}"#).unwrap();
//! assert_eq!(value.get("name").and_then(JsonValue::as_str), Some("Alice"));
//! assert_eq!(value.get("age").and_then(JsonValue::as_i64), Some(30));
//! assert_eq!(value.get("tags").and_then(JsonValue::as_array).map(Vec::len), Some(2));
//! ```

/// Contains the `ParseError` type and its `ErrorKind`.
pub mod error;
/// Contains the recursive-descent `Parser`.
pub mod parser;
/// Contains the byte-based `Scanner`.
pub mod scanner;
/// Contains the `Token` and `TokenType` types shared by both stages.
pub mod token;
/// Contains the `JsonValue` tree and `JsonNumber`.
pub mod value;

pub use error::{ErrorKind, ParseError};
pub use parser::Parser;
pub use scanner::Scanner;
pub use token::{Token, TokenType};
pub use value::{JsonNumber, JsonValue};

// --- Limits ---
/// The default maximum nesting depth (e.g., `[[[]]]`) to prevent stack overflows.
pub const DEFAULT_MAX_DEPTH: usize = 128;
/// The maximum accepted size of a source string (16 MiB).
pub const MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Runs the scanner stage over the whole source.
///
/// The returned list always ends with exactly one `TokenType::Eof`.
///
/// # Errors
/// Returns a `ParseError` if the source exceeds [`MAX_INPUT_BYTES`] or
/// contains a lexical error. Scanner errors always carry a line number.
///
/// # Examples
/// ```
/// use descent_json::{scan, JsonNumber, TokenType};
///
/// let kinds: Vec<TokenType> = scan("[1, \"a\"]").unwrap().into_iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenType::LeftBracket,
///         TokenType::Number(JsonNumber::I64(1)),
///         TokenType::Comma,
///         TokenType::String("a"),
///         TokenType::RightBracket,
///         TokenType::Eof,
///     ]
/// );
/// ```
pub fn scan(source: &str) -> Result<Vec<Token<'_>>, ParseError> {
    if source.len() > MAX_INPUT_BYTES {
        tracing::debug!(len = source.len(), "rejecting oversized input");
        return Err(ParseError::new(
            ErrorKind::InputTooLarge,
            "Input exceeds maximum size limit",
            None,
        ));
    }
    Scanner::new(source).scan().map_err(|e| {
        tracing::debug!(kind = ?e.kind, line = ?e.line, "scan failed: {}", e.message);
        e
    })
}

/// Decodes `source` into a `JsonValue`.
///
/// Scans the full input eagerly, then parses it with [`DEFAULT_MAX_DEPTH`].
///
/// # Errors
/// Returns the first lexical or grammatical error. No partial value is
/// ever returned.
///
/// # Examples
/// ```
/// use descent_json::{parse, ErrorKind, JsonNumber, JsonValue};
///
/// assert_eq!(parse("-42").unwrap(), JsonValue::Number(JsonNumber::I64(-42)));
/// assert_eq!(parse("[1 2]").unwrap_err().kind, ErrorKind::MissingComma);
/// ```
pub fn parse(source: &str) -> Result<JsonValue, ParseError> {
    parse_with_max_depth(source, DEFAULT_MAX_DEPTH)
}

/// Like [`parse`], with a caller-chosen nesting limit.
///
/// # Errors
/// As [`parse`], plus `ErrorKind::DepthLimitExceeded` when objects and
/// arrays nest deeper than `max_depth`.
pub fn parse_with_max_depth(source: &str, max_depth: usize) -> Result<JsonValue, ParseError> {
    let _span = tracing::debug_span!("parse", len = source.len(), max_depth).entered();

    let tokens = scan(source)?;
    tracing::trace!(tokens = tokens.len(), "scanned source");

    let mut parser = Parser::new(&tokens, max_depth);
    let value = parser.parse().map_err(|e| {
        tracing::debug!(kind = ?e.kind, line = ?e.line, "parse failed: {}", e.message);
        e
    })?;

    // The last token is always Eof.
    let unread = (tokens.len() - 1).saturating_sub(parser.position());
    if unread > 0 {
        tracing::trace!(unread, "ignoring tokens after the top-level value");
    }
    Ok(value)
}

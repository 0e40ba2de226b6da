//! Contains the `ParseError` type shared by the scanner and the parser.
use std::fmt;

/// The condition that stopped a `parse` call.
///
/// Scanner conditions come first, parser conditions after.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    /// A character that cannot start any token (tab, `?`, `+`, ...).
    UnexpectedCharacter,
    /// A `-` that is not followed by a digit.
    MinusWithoutDigit,
    /// A `.` inside a number that is not followed by a digit.
    MissingFractionDigit,
    /// End of input reached before the closing `"`.
    UnterminatedString,
    /// An alphabetic run other than `true`, `false` or `null`.
    UnknownKeyword,
    /// A number lexeme that its numeric type refused to parse.
    InvalidNumber,
    /// A token that cannot start a value.
    UnexpectedToken,
    /// An object field that does not start with a string key.
    KeyNotString,
    /// A key that is not followed by `:`.
    MissingColon,
    /// Two elements that are not separated by `,`.
    MissingComma,
    /// End of input inside an object.
    UnterminatedObject,
    /// End of input inside an array.
    UnterminatedArray,
    /// Objects and arrays nested deeper than the configured limit.
    DepthLimitExceeded,
    /// The source was rejected before scanning started.
    InputTooLarge,
}

/// The error type for all decoding operations.
///
/// Carries a human-readable message and, where one is known, the
/// 1-indexed line of the scanner's line counter.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseError {
    /// Which condition was hit.
    pub kind: ErrorKind,
    /// A description of what went wrong.
    pub message: String,
    /// The line number (1-indexed) where the error was detected, if any.
    pub line: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>, line: Option<usize>) -> Self {
        ParseError {
            kind,
            message: message.into(),
            line,
        }
    }

    pub(crate) fn at_line(kind: ErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self::new(kind, message, Some(line))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Error: {} at line {}.", self.message, line),
            None => write!(f, "Error: {}.", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

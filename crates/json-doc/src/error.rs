//! Parse and serialize error types.

use std::fmt;

use thiserror::Error;

/// 1-based line and column of the byte where a parse error was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.line, self.column)
    }
}

/// Reasons a byte buffer is not a JSON document.
///
/// The first error detected aborts the parse; no partial value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is empty or whitespace only.
    #[error("Empty document")]
    EmptyDocument,
    #[error("Unexpected token at {0}")]
    UnexpectedToken(Position),
    #[error("Unclosed array")]
    UnclosedArray,
    #[error("Unclosed object")]
    UnclosedObject,
    /// End of input inside a string, including inside a multi-byte sequence.
    #[error("Unclosed string")]
    UnclosedString,
    /// A raw control byte or a malformed UTF-8 sequence inside a string.
    #[error("Invalid character at {0}")]
    InvalidCharacter(Position),
    /// A `\u` surrogate escape without its partner. Positioned at the
    /// backslash of the escape left unpaired.
    #[error("Unpaired escaped surrogate at {0}")]
    UnpairedSurrogate(Position),
    #[error("Invalid number syntax at {0}")]
    NumberSyntax(Position),
    #[error("Invalid escape syntax at {0}")]
    EscapeSyntax(Position),
}

impl ParseError {
    /// Position of the offending byte, for the kinds that carry one.
    pub fn position(&self) -> Option<Position> {
        match *self {
            ParseError::UnexpectedToken(p)
            | ParseError::InvalidCharacter(p)
            | ParseError::UnpairedSurrogate(p)
            | ParseError::NumberSyntax(p)
            | ParseError::EscapeSyntax(p) => Some(p),
            ParseError::EmptyDocument
            | ParseError::UnclosedArray
            | ParseError::UnclosedObject
            | ParseError::UnclosedString => None,
        }
    }
}

/// Serialization failure. Nothing is emitted when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// A node has no JSON representation (non-finite number, out-of-range
    /// host integer, non-string map key, ...).
    #[error("Invalid JSON value: {0}")]
    InvalidValue(String),
}

impl SerializeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SerializeError::InvalidValue(reason.into())
    }
}

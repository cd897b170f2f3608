//! Error types for literal parsing.

use thiserror::Error;

/// Errors produced while tokenizing or parsing a literal.
///
/// Every variant is recoverable: callers decide whether a failure skips a
/// line or aborts. Offsets are byte offsets into the parsed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// Input ended while a token or group was still open.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A character that cannot start any token.
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    /// A quoted literal without its closing quote.
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    /// A `\x` or `\u` escape with missing or invalid hex digits.
    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    /// Byte literals may only contain ASCII characters.
    #[error("non-ASCII character in byte literal at offset {offset}")]
    NonAsciiBytes { offset: usize },

    /// A numeric token that does not parse as a float.
    #[error("invalid number '{text}'")]
    InvalidNumber { text: String },

    /// The parser found a different token or value kind than required.
    #[error("expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
    },

    /// Well-formed literal followed by extra tokens.
    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },

    /// A sequence with the wrong number of elements.
    #[error("expected {expected} elements, found {found}")]
    Arity { expected: usize, found: usize },
}

impl LiteralError {
    pub(crate) fn expected(expected: &'static str, found: impl Into<String>) -> Self {
        Self::Expected {
            expected,
            found: found.into(),
        }
    }
}

/// Result type for literal operations.
pub type Result<T> = std::result::Result<T, LiteralError>;

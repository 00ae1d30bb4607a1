//! Parse error types for title-formatting templates.

use thiserror::Error;

/// A structural error that makes a whole template unusable.
///
/// Every variant records the absolute char `position` and byte `offset` of
/// the offending character in the outermost template, even when the failure
/// happens inside a function argument or a conditional block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `'` literal block was never closed.
    #[error("unterminated literal: quote at position {position} is never closed")]
    UnterminatedLiteral { position: usize, offset: usize },

    /// A `%` variable reference was never closed.
    #[error(
        "unterminated variable: '%' at position {position} is never closed{}",
        .invalid.map(|c| format!(" (unexpected character '{c}' in name)")).unwrap_or_default()
    )]
    UnterminatedVariable {
        position: usize,
        offset: usize,
        /// First character seen in the name that is not a valid name character.
        invalid: Option<char>,
    },

    /// A `$name(` call was never closed, or the name never reached its `(`.
    #[error("unterminated function: '$' at position {position} ('{name}') is never closed")]
    UnterminatedFunction {
        name: String,
        position: usize,
        offset: usize,
    },

    /// A `[` conditional block was never closed.
    #[error("unterminated conditional: '[' at position {position} is never closed")]
    UnterminatedConditional { position: usize, offset: usize },

    /// A `]` appeared without a matching `[`.
    #[error("unmatched ']' at position {position}")]
    UnmatchedBracket { position: usize, offset: usize },

    /// A function name contained a character other than a letter, digit or `_`.
    #[error("invalid character '{character}' in function name at position {position}")]
    InvalidFunctionName {
        character: char,
        position: usize,
        offset: usize,
    },

    /// Conditionals and function arguments were nested too deeply.
    #[error("nesting deeper than {max_depth} levels at position {position}")]
    DepthExceeded {
        character: char,
        max_depth: usize,
        position: usize,
        offset: usize,
    },
}

impl ParseError {
    /// Absolute char position of the offending character.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnterminatedLiteral { position, .. }
            | ParseError::UnterminatedVariable { position, .. }
            | ParseError::UnterminatedFunction { position, .. }
            | ParseError::UnterminatedConditional { position, .. }
            | ParseError::UnmatchedBracket { position, .. }
            | ParseError::InvalidFunctionName { position, .. }
            | ParseError::DepthExceeded { position, .. } => *position,
        }
    }

    /// Absolute byte offset of the offending character.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnterminatedLiteral { offset, .. }
            | ParseError::UnterminatedVariable { offset, .. }
            | ParseError::UnterminatedFunction { offset, .. }
            | ParseError::UnterminatedConditional { offset, .. }
            | ParseError::UnmatchedBracket { offset, .. }
            | ParseError::InvalidFunctionName { offset, .. }
            | ParseError::DepthExceeded { offset, .. } => *offset,
        }
    }

    /// The offending character.
    pub fn character(&self) -> char {
        match self {
            ParseError::UnterminatedLiteral { .. } => '\'',
            ParseError::UnterminatedVariable { .. } => '%',
            ParseError::UnterminatedFunction { .. } => '$',
            ParseError::UnterminatedConditional { .. } => '[',
            ParseError::UnmatchedBracket { .. } => ']',
            ParseError::InvalidFunctionName { character, .. }
            | ParseError::DepthExceeded { character, .. } => *character,
        }
    }
}

//! Miette diagnostic wrapper for template parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use titlefmt::ParseError;

/// A miette-compatible diagnostic pointing at the offending character of a
/// template.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(titlefmt::syntax))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a ParseError with its template as context.
    pub fn from_parse_error(name: &str, template: &str, err: &ParseError) -> Self {
        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = err.offset().min(template.len());
        let width = template[offset..].chars().next().map_or(0, char::len_utf8);

        TemplateDiagnostic {
            src: NamedSource::new(name, template.to_string()),
            span: (offset, width).into(),
            message: err.to_string(),
            help: help_for(err),
        }
    }
}

fn help_for(err: &ParseError) -> Option<String> {
    let help = match err {
        ParseError::UnterminatedLiteral { .. } => {
            "close the quote with another ', or write '' for a literal quote"
        }
        ParseError::UnterminatedVariable { .. } => {
            "close the field name with another %, or quote it as '%'"
        }
        ParseError::UnterminatedFunction { .. } => {
            "function calls are written $name(arg,...) with balanced parentheses"
        }
        ParseError::UnterminatedConditional { .. } => "close the block with ]",
        ParseError::UnmatchedBracket { .. } => "write ']' to print a literal bracket",
        ParseError::InvalidFunctionName { .. } => {
            "function names use letters, digits, and underscores only"
        }
        ParseError::DepthExceeded { .. } => return None,
    };
    Some(help.to_string())
}

//! Title-formatting template parser.
//!
//! This module turns template strings into a tree that can be evaluated
//! against any number of tracks, linted, or inspected by external tooling.

pub mod ast;
pub mod error;
mod template;

pub use ast::*;
pub use error::ParseError;
pub use template::{DEFAULT_MAX_DEPTH, parse_template, parse_template_with_depth};

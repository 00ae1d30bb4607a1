//! Title-formatting interpreter.
//!
//! This module evaluates parsed templates against track metadata. It
//! resolves field references through the fallback table, dispatches built-in
//! functions by name and arity, and combines everything into an [`Atom`].

mod atom;
mod compiled;
mod context;
pub mod encoding;
mod error;
mod evaluator;
pub mod functions;
mod lint;
pub mod magic;
pub mod numeric;
mod resolver;

pub use atom::Atom;
pub use compiled::{CompiledTemplate, TemplateCache};
pub use context::{EvalContext, Options};
pub use error::{LintWarning, Marker, compute_suggestions};
pub use evaluator::eval_template;
pub use functions::{Arg, Arity, Builtin, FUNCTIONS, Family, FunctionEntry, Source};
pub use lint::{lint_source, lint_template};
pub use resolver::resolve;

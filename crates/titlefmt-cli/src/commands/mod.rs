//! CLI command implementations.

mod check;
mod eval;
mod format;
mod functions;

pub use check::{run_check, CheckArgs};
pub use eval::{run_eval, EvalArgs};
pub use format::{run_format, FormatArgs};
pub use functions::{run_functions, FunctionsArgs};

//! Non-fatal evaluation problems and lint findings.

use strsim::levenshtein;
use thiserror::Error;

/// A semantic problem that is rendered inline instead of failing the template.
///
/// The `Display` form is the exact text substituted into the output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Marker {
    /// No built-in accepts this name with this many arguments.
    #[error("[UNKNOWN FUNCTION]")]
    UnknownFunction { name: String, arity: usize },

    /// A control-flow function was called with an arity it does not support.
    ///
    /// `function` is the upper-cased function name, e.g. `IF2`.
    #[error("[INVALID ${function} SYNTAX]")]
    InvalidSyntax { function: &'static str, arity: usize },
}

/// A problem found by [`lint_template`](crate::interpreter::lint_template)
/// without evaluating anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// A call names no built-in function.
    #[error(
        "unknown function '${name}' at position {position}{}",
        format_suggestions(.suggestions)
    )]
    UnknownFunction {
        name: String,
        position: usize,
        suggestions: Vec<String>,
    },

    /// A call names a built-in but passes an unsupported number of arguments.
    #[error("'${name}' does not take {got} argument(s) at position {position}, expected {expected}")]
    ArgumentCount {
        name: String,
        position: usize,
        got: usize,
        expected: String,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        let names: Vec<String> = suggestions.iter().map(|s| format!("${s}")).collect();
        format!(" (did you mean {}?)", names.join(", "))
    }
}

/// Returns up to three names from `available` within a small edit distance of
/// `key`, closest first.
///
/// Keys of three characters or fewer allow a distance of 1, longer keys 2.
pub fn compute_suggestions<S: AsRef<str>>(key: &str, available: &[S]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &str)> = available
        .iter()
        .map(AsRef::as_ref)
        .map(|name| (levenshtein(key, name), name))
        .filter(|&(distance, _)| distance <= max_distance)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.to_string())
        .collect()
}

//! Static checks over parsed templates.
//!
//! Finds calls that would render a marker at evaluation time, without
//! needing a track.

use crate::interpreter::error::{LintWarning, compute_suggestions};
use crate::interpreter::functions::{self, FUNCTIONS};
use crate::parser::ast::Template;
use crate::parser::{ParseError, parse_template};

/// Control-flow functions accept any arity at dispatch and render an
/// invalid-syntax marker themselves; these are the arities they support.
const CONTROL_ARITIES: &[(&str, &[usize])] = &[
    ("if", &[2, 3]),
    ("if2", &[2]),
    ("ifequal", &[4]),
    ("ifgreater", &[4]),
    ("iflonger", &[4]),
];

/// Runs lint checks over a parsed template, returning warnings in source
/// order.
pub fn lint_template(template: &Template) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    template.walk_calls(&mut |name, args, position| {
        let lowered = name.to_ascii_lowercase();
        if !functions::is_known(&lowered) {
            let available: Vec<&str> = functions::names().collect();
            warnings.push(LintWarning::UnknownFunction {
                name: name.to_string(),
                position,
                suggestions: compute_suggestions(&lowered, &available),
            });
            return;
        }

        let got = args.len();
        let expected = match CONTROL_ARITIES.iter().find(|(n, _)| *n == lowered) {
            Some((_, counts)) if !counts.contains(&got) => Some(
                counts
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" or "),
            ),
            Some(_) => None,
            None if functions::lookup(&lowered, got).is_none() => Some(
                FUNCTIONS
                    .iter()
                    .filter(|e| e.name == lowered)
                    .map(|e| e.arity.to_string())
                    .collect::<Vec<_>>()
                    .join(" or "),
            ),
            None => None,
        };
        if let Some(expected) = expected {
            warnings.push(LintWarning::ArgumentCount {
                name: name.to_string(),
                position,
                got,
                expected,
            });
        }
    });
    warnings
}

/// Parse and lint a template string.
pub fn lint_source(source: &str) -> Result<Vec<LintWarning>, ParseError> {
    Ok(lint_template(&parse_template(source)?))
}

//! Tests for static template lints.

use titlefmt::parser::parse_template;
use titlefmt::{LintWarning, compute_suggestions, lint_source, lint_template};

fn lint(source: &str) -> Vec<LintWarning> {
    lint_template(&parse_template(source).unwrap())
}

// =========================================================================
// Clean templates
// =========================================================================

#[test]
fn clean_template_has_no_warnings() {
    assert!(lint("[%artist% - ]$if2(%title%,$upper(%filename%))").is_empty());
    assert!(lint("plain").is_empty());
}

#[test]
fn function_names_ignore_case() {
    assert!(lint("$UPPER(x)").is_empty());
}

// =========================================================================
// Unknown functions
// =========================================================================

#[test]
fn unknown_function_with_suggestion() {
    let warnings = lint("$uper(%title%)");
    assert_eq!(warnings.len(), 1);
    let LintWarning::UnknownFunction {
        name,
        position,
        suggestions,
    } = &warnings[0]
    else {
        panic!("expected unknown function, got {warnings:?}");
    };
    assert_eq!(name, "uper");
    assert_eq!(*position, 0);
    assert_eq!(suggestions.first().map(String::as_str), Some("upper"));
    assert!(warnings[0].to_string().contains("did you mean $upper"));
}

#[test]
fn unknown_function_without_suggestion() {
    let warnings = lint("$frobnicate()");
    assert_eq!(
        warnings,
        vec![LintWarning::UnknownFunction {
            name: "frobnicate".into(),
            position: 0,
            suggestions: vec![],
        }]
    );
    assert_eq!(
        warnings[0].to_string(),
        "unknown function '$frobnicate' at position 0"
    );
}

#[test]
fn nested_unknown_functions_are_all_reported() {
    let warnings = lint("[$foo($barr())]");
    let positions: Vec<usize> = warnings
        .iter()
        .map(|w| match w {
            LintWarning::UnknownFunction { position, .. }
            | LintWarning::ArgumentCount { position, .. } => *position,
        })
        .collect();
    assert_eq!(positions, vec![1, 6]);
}

// =========================================================================
// Argument counts
// =========================================================================

#[test]
fn wrong_arity_for_fixed_function() {
    assert_eq!(
        lint("$len(a,b)"),
        vec![LintWarning::ArgumentCount {
            name: "len".into(),
            position: 0,
            got: 2,
            expected: "1".into(),
        }]
    );
}

#[test]
fn wrong_arity_for_range_function() {
    let warnings = lint("$pad(a)");
    assert!(matches!(
        &warnings[..],
        [LintWarning::ArgumentCount { expected, .. }] if expected == "2-3"
    ));
}

#[test]
fn wrong_arity_for_control_flow() {
    let warnings = lint("$if(x)");
    assert!(matches!(
        &warnings[..],
        [LintWarning::ArgumentCount { expected, got: 1, .. }] if expected == "2 or 3"
    ));
    assert!(lint("$if(x,y)").is_empty());
    assert!(lint("$if3(a,b,c,d,e)").is_empty());
}

// =========================================================================
// Sources and suggestions
// =========================================================================

#[test]
fn lint_source_reports_parse_errors() {
    assert!(lint_source("[abc").is_err());
    assert_eq!(lint_source("$lenn(x)").unwrap().len(), 1);
}

#[test]
fn suggestions_are_closest_first_and_limited() {
    let names = ["left", "lef", "len", "lower", "right"];
    assert_eq!(compute_suggestions("lefr", &names), vec!["lef", "left", "len"]);
    assert!(compute_suggestions("zzzzzz", &names).is_empty());
}

#[test]
fn short_keys_allow_one_edit() {
    let names = ["add", "and", "mod"];
    assert_eq!(compute_suggestions("ad", &names), vec!["add", "and"]);
    assert!(compute_suggestions("xy", &names).is_empty());
}

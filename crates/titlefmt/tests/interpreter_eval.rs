//! Integration tests for template evaluation.

use titlefmt::{Atom, Formatter, Marker, TrackFields, fields};

fn track() -> TrackFields {
    fields! { "ARTIST" => "Collective Soul", "TITLE" => "This" }
}

fn eval(template: &str, track: &TrackFields) -> Atom {
    titlefmt::format(template, track).unwrap()
}

fn text(template: &str) -> String {
    eval(template, &track()).into_string()
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn eval_artist_and_title() {
    let atom = eval("%artist% - %title%", &track());
    assert_eq!(atom.as_str(), "Collective Soul - This");
    assert!(atom.truth);
}

#[test]
fn eval_conditional_prefix_for_missing_field() {
    assert_eq!(text("[%missing% - ]%title%"), "This");
}

#[test]
fn eval_ifgreater_picks_literal_branch() {
    let atom = eval("$ifgreater(2,1,yes,no)", &track());
    assert_eq!(atom.as_str(), "yes");
    assert!(!atom.truth);
}

#[test]
fn eval_muldiv_rounds() {
    assert_eq!(text("$muldiv(5,3,2)"), "7");
    assert_eq!(text("$muldiv(1,1,2)"), "0");
    assert_eq!(text("$muldiv(-5,3,2)"), "-7");
}

// =============================================================================
// Literal text
// =============================================================================

#[test]
fn eval_literal_text_passes_through() {
    for template in ["Hello", "Song (Live)", "a, b, c", "1 + 2 = 3", "日本語"] {
        let atom = eval(template, &track());
        assert_eq!(atom.as_str(), template);
        assert!(!atom.truth, "{template} should be false");
    }
}

#[test]
fn eval_doubled_quote_round_trip() {
    assert_eq!(text("'a'''b"), "a'b");
    assert_eq!(text("it''s"), "it's");
}

#[test]
fn eval_quoted_text_is_not_interpreted() {
    assert_eq!(text("'%title% [$x]'"), "%title% [$x]");
}

#[test]
fn eval_empty_template() {
    let atom = eval("", &track());
    assert_eq!(atom, Atom::literal(""));
}

// =============================================================================
// Variables and truth
// =============================================================================

#[test]
fn eval_missing_field_is_absent() {
    let atom = eval("%missing%", &track());
    assert_eq!(atom, Atom::absent());
}

#[test]
fn eval_empty_field_is_present_and_true() {
    let track = fields! { "COMMENT" => "" };
    let atom = eval("%comment%", &track);
    assert_eq!(atom, Atom::found(""));
}

#[test]
fn eval_sequence_truth_is_any_segment() {
    let atom = eval("x%missing%", &track());
    assert_eq!(atom.as_str(), "x");
    assert!(!atom.truth);

    let atom = eval("x%title%", &track());
    assert!(atom.truth);
}

#[test]
fn eval_sequence_of_missing_fields_is_absent() {
    assert_eq!(eval("%a%%b%", &track()), Atom::absent());
}

#[test]
fn eval_field_names_ignore_case() {
    assert_eq!(text("%TiTlE%"), "This");
    assert_eq!(text("%Genre%"), "");
    let track = fields! { "GENRE" => "Rock" };
    assert_eq!(eval("%genre%", &track).as_str(), "Rock");
}

// =============================================================================
// Conditional suppression
// =============================================================================

#[test]
fn eval_conditional_with_missing_field_is_suppressed() {
    let atom = eval("*[%missing% - ]*", &track());
    assert_eq!(atom.as_str(), "**");
    assert!(!atom.truth);
}

#[test]
fn eval_conditional_with_only_literal_text_is_suppressed() {
    assert_eq!(text("[abc]"), "");
    assert_eq!(text("a[]b"), "ab");
}

#[test]
fn eval_conditional_keeps_empty_field() {
    let track = fields! { "COMMENT" => "" };
    let atom = eval("[(%comment%)]", &track);
    assert_eq!(atom.as_str(), "()");
    assert!(atom.truth);
}

#[test]
fn eval_nested_conditionals() {
    assert_eq!(text("[a[%title%]]"), "aThis");
    assert_eq!(text("[a[%missing%]]"), "");
    assert_eq!(text("[%title%[ %missing%]]"), "This");
}

#[test]
fn eval_conditional_around_function() {
    assert_eq!(text("[x$len(%missing%)]"), "");
    assert_eq!(text("[x$len(%title%)]"), "x4");
}

#[test]
fn eval_false_boolean_does_not_keep_conditional() {
    assert_eq!(text("[$not(%title%)x]"), "");
    assert_eq!(text("[$not(%missing%)x]"), "x");
}

// =============================================================================
// Function calls
// =============================================================================

#[test]
fn eval_nested_add() {
    assert_eq!(text("$add(1,$add(1,$add(1,$add(1))))"), "4");
}

#[test]
fn eval_function_names_ignore_case() {
    assert_eq!(text("$UPPER(%title%)"), "THIS");
}

#[test]
fn eval_sign_before_call() {
    assert_eq!(text("$add(-$add(2,3),1)"), "-4");
    assert_eq!(text("$add(-$sub(0,5),0)"), "-5");
}

#[test]
fn eval_quoted_argument_is_never_negative() {
    assert_eq!(text("$add('-5',1)"), "6");
    assert_eq!(text("$add(-5,1)"), "-4");
}

#[test]
fn eval_muldiv_by_zero_is_minus_one() {
    let atom = eval("$muldiv(128,5,0)", &track());
    assert_eq!(atom, Atom::found("-1"));
}

#[test]
fn eval_hex_wraps_to_32_bits() {
    assert_eq!(text("$hex(-1,)"), "FFFFFFFF");
    assert_eq!(text("$hex(4294967296,)"), "0");
    assert_eq!(text("$hex(99999999999999999999)"), "630FFFFF");
    assert_eq!(text("$hex(-99999999999999999999)"), "9CF00001");
}

#[test]
fn eval_encoding_substitutes_question_marks() {
    assert_eq!(text("$ansi('2814 - 新しい日の誕生)')"), "2814 - ???????)");
    assert_eq!(text("$ascii('2814 - 新しい日の誕生)')"), "2814 - ???????)");
}

// =============================================================================
// Inline markers
// =============================================================================

#[test]
fn eval_unknown_function_keeps_surrounding_text() {
    assert_eq!(text("before $nope(1) after"), "before [UNKNOWN FUNCTION] after");
}

#[test]
fn eval_wrong_arity_is_unknown_function() {
    assert_eq!(text("$len(a,b)"), "[UNKNOWN FUNCTION]");
}

#[test]
fn eval_invalid_control_flow_syntax() {
    assert_eq!(text("$if(x)"), "[INVALID $IF SYNTAX]");
    assert_eq!(text("$if2(a,b,c)"), "[INVALID $IF2 SYNTAX]");
    assert_eq!(text("$ifequal(1,1,x)"), "[INVALID $IFEQUAL SYNTAX]");
    assert_eq!(text("$ifgreater(1)"), "[INVALID $IFGREATER SYNTAX]");
    assert_eq!(text("$iflonger()"), "[INVALID $IFLONGER SYNTAX]");
}

#[test]
fn eval_markers_are_collected() {
    let formatter = Formatter::new();
    let (atom, markers) = formatter
        .format_collecting("$nope(1)-$if(x)", &track())
        .unwrap();
    assert_eq!(atom.as_str(), "[UNKNOWN FUNCTION]-[INVALID $IF SYNTAX]");
    assert_eq!(
        markers,
        vec![
            Marker::UnknownFunction {
                name: "nope".into(),
                arity: 1
            },
            Marker::InvalidSyntax {
                function: "IF",
                arity: 1
            },
        ]
    );
}

#[test]
fn eval_marker_inside_conditional_counts_as_output() {
    assert_eq!(text("[$nope()]"), "[UNKNOWN FUNCTION]");
}

#[test]
fn eval_markers_in_untaken_branches_are_not_collected() {
    let formatter = Formatter::new();
    let templates = [
        "$if(%title%,ok,$nope())",
        "$if(%missing%,$nope(),ok)",
        "$if2(%title%,$if(x))",
        "$select(1,ok,$nope())",
        "$ifequal(1,1,ok,$nope())",
        "$if3(%missing%,%title%,$nope())",
    ];
    for template in templates {
        let (_, markers) = formatter.format_collecting(template, &track()).unwrap();
        assert!(markers.is_empty(), "{template}: {markers:?}");
    }
    let (atom, _) = formatter
        .format_collecting("$if(%title%,ok,$nope())", &track())
        .unwrap();
    assert_eq!(atom.as_str(), "ok");
}

#[test]
fn eval_markers_in_taken_branches_are_collected() {
    let formatter = Formatter::new();
    let (atom, markers) = formatter
        .format_collecting("$if(%missing%,ok,$nope()) $upper($if(x))", &track())
        .unwrap();
    assert_eq!(atom.as_str(), "[UNKNOWN FUNCTION] [INVALID $IF SYNTAX]");
    assert_eq!(
        markers,
        vec![
            Marker::UnknownFunction {
                name: "nope".into(),
                arity: 0
            },
            Marker::InvalidSyntax {
                function: "IF",
                arity: 1
            },
        ]
    );
}

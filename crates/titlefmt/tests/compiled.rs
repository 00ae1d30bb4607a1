//! Integration tests for compiled templates, the template cache, and the
//! formatter entry point.

use std::sync::Arc;
use std::thread;

use titlefmt::parser::parse_template;
use titlefmt::{
    CompiledTemplate, EvalContext, Formatter, Options, ParseError, TemplateCache, TrackFields,
    fields,
};

const TEMPLATES: &[&str] = &[
    "",
    "plain text",
    "%artist% - %title%",
    "[%tracknumber%. ][%artist% - ]%title%",
    "$if2(%album%,'(no album)') $upper($left(%title%,3))",
    "$muldiv(5,3,2) $hex(-1,) $nope(1)",
    "*[%missing% - ]*",
    "$if($strcmp(%artist%,%album artist%),same,$lower(%artist%))",
];

fn tracks() -> Vec<TrackFields> {
    vec![
        TrackFields::new(),
        fields! { "ARTIST" => "Collective Soul", "TITLE" => "This" },
        fields! {
            "ALBUM ARTIST" => "Various",
            "TITLE" => "Intro",
            "TRACKNUMBER" => "1/9",
            "ALBUM" => "Mix",
        },
    ]
}

// =============================================================================
// Compile equivalence
// =============================================================================

#[test]
fn compiled_apply_matches_direct_format() {
    for template in TEMPLATES {
        let compiled = titlefmt::compile(template).unwrap();
        for track in &tracks() {
            assert_eq!(
                compiled.apply(track),
                titlefmt::format(template, track).unwrap(),
                "{template}"
            );
        }
    }
}

#[test]
fn compiled_apply_matches_manual_evaluation() {
    let options = Options::default();
    for template in TEMPLATES {
        let tree = parse_template(template).unwrap();
        let compiled = CompiledTemplate::compile(template).unwrap();
        assert_eq!(compiled.template(), &tree);
        assert_eq!(compiled.source(), *template);
        for track in &tracks() {
            let mut ctx = EvalContext::new(track, &options);
            let direct = titlefmt::interpreter::eval_template(&tree, &mut ctx);
            assert_eq!(compiled.apply_with(track, &options), direct);
        }
    }
}

#[test]
fn compile_reports_the_same_errors_as_format() {
    let track = TrackFields::new();
    for template in ["[abc", "abc]", "%x", "$f(", "'q", "$a.b()"] {
        let compiled = titlefmt::compile(template).unwrap_err();
        let formatted = titlefmt::format(template, &track).unwrap_err();
        assert_eq!(compiled, formatted, "{template}");
    }
}

#[test]
fn compile_respects_depth_limit() {
    let options = Options::builder().max_depth(2).build();
    assert!(CompiledTemplate::compile_with("[[x]]", &options).is_ok());
    let err = CompiledTemplate::compile_with("[[[x]]]", &options).unwrap_err();
    assert!(matches!(err, ParseError::DepthExceeded { max_depth: 2, .. }));
}

// =============================================================================
// Template cache
// =============================================================================

#[test]
fn cache_reuses_compiled_templates() {
    let cache = TemplateCache::new();
    let options = Options::default();
    let first = cache.get_or_compile("%title%", &options).unwrap();
    let second = cache.get_or_compile("%title%", &options).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    cache.get_or_compile("%artist%", &options).unwrap();
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn cache_does_not_keep_parse_errors() {
    let cache = TemplateCache::new();
    assert!(cache.get_or_compile("[oops", &Options::default()).is_err());
    assert!(cache.is_empty());
}

#[test]
fn cache_is_shared_across_threads() {
    let formatter = Formatter::new();
    let track = fields! { "TITLE" => "This" };
    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let atom = formatter.format("$upper(%title%)", &track).unwrap();
                assert_eq!(atom.as_str(), "THIS");
            });
        }
    });
    assert_eq!(formatter.cache().len(), 1);
}

// =============================================================================
// Formatter
// =============================================================================

#[test]
fn formatter_applies_its_options() {
    let track = fields! { "ALBUM ARTIST" => "AA" };

    let formatter = Formatter::new();
    assert_eq!(formatter.format("%artist%", &track).unwrap().as_str(), "AA");

    let formatter = Formatter::builder()
        .options(Options::builder().magic(false).build())
        .build();
    assert!(!formatter.options().magic);
    assert_eq!(formatter.format("%artist%", &track).unwrap().as_str(), "");
}

#[test]
fn formatter_compile_uses_the_cache() {
    let formatter = Formatter::new();
    let compiled = formatter.compile("%title%").unwrap();
    let again = formatter.compile("%title%").unwrap();
    assert!(Arc::ptr_eq(&compiled, &again));
}

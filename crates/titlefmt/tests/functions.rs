//! Integration tests for the built-in function library.

use titlefmt::{Atom, TrackFields, fields};

fn track() -> TrackFields {
    fields! {
        "ARTIST" => "Collective Soul",
        "TITLE" => "This",
        "COMMENT" => "line one\nline two",
    }
}

fn eval(template: &str) -> Atom {
    titlefmt::format(template, &track()).unwrap()
}

fn text(template: &str) -> String {
    eval(template).into_string()
}

// =============================================================================
// Control flow
// =============================================================================

#[test]
fn if_picks_branch_by_truth() {
    assert_eq!(text("$if(%title%,yes,no)"), "yes");
    assert_eq!(text("$if(%missing%,yes,no)"), "no");
    assert_eq!(eval("$if(%missing%,yes)"), Atom::absent());
}

#[test]
fn if_returns_branch_atom_unchanged() {
    let atom = eval("$if(%title%,%artist%)");
    assert_eq!(atom, Atom::found("Collective Soul"));
    let atom = eval("$if(%title%,literal)");
    assert_eq!(atom, Atom::literal("literal"));
}

#[test]
fn if2_falls_back_when_false() {
    assert_eq!(text("$if2(%missing%,fallback)"), "fallback");
    assert_eq!(text("$if2(%title%,fallback)"), "This");
}

#[test]
fn if3_returns_first_true_argument() {
    assert_eq!(text("$if3(%a%,%b%,%title%,none)"), "This");
    assert_eq!(text("$if3(%a%,%b%,none)"), "none");
    assert_eq!(text("$if3(%title%)"), "This");
    assert_eq!(eval("$if3(%a%)"), Atom::absent());
}

#[test]
fn numeric_and_length_comparisons() {
    assert_eq!(text("$ifequal(1,01,same,diff)"), "same");
    assert_eq!(text("$ifequal(1,2,same,diff)"), "diff");
    assert_eq!(text("$ifgreater(10,9,gt,le)"), "gt");
    assert_eq!(text("$ifgreater(9,9,gt,le)"), "le");
    assert_eq!(text("$iflonger(%title%,3,long,short)"), "long");
    assert_eq!(text("$iflonger(%title%,4,long,short)"), "short");
}

#[test]
fn select_is_one_based() {
    assert_eq!(text("$select(2,a,b,c)"), "b");
    assert_eq!(eval("$select(5,a,b)"), Atom::absent());
    assert_eq!(eval("$select(0,a,b)"), Atom::absent());
}

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn arithmetic_folds_left() {
    assert_eq!(text("$sub(10,3,2)"), "5");
    assert_eq!(text("$mul(2,3,4)"), "24");
    assert_eq!(text("$div(100,5,2)"), "10");
    assert_eq!(text("$mod(17,5)"), "2");
}

#[test]
fn arithmetic_identities_for_no_arguments() {
    assert_eq!(text("$add()"), "0");
    assert_eq!(text("$mul()"), "1");
    assert_eq!(eval("$max()"), Atom::absent());
    assert_eq!(eval("$sub()"), Atom::absent());
}

#[test]
fn division_by_zero_keeps_dividend() {
    assert_eq!(text("$div(7,0)"), "7");
    assert_eq!(text("$mod(7,0)"), "7");
}

#[test]
fn division_truncates() {
    assert_eq!(text("$div(7,2)"), "3");
    assert_eq!(text("$div(-7,2)"), "-3");
}

#[test]
fn min_and_max() {
    assert_eq!(text("$min(3,1,2)"), "1");
    assert_eq!(text("$max(3,-1,2)"), "3");
}

#[test]
fn arithmetic_results_are_true() {
    assert_eq!(eval("$add(1,2)"), Atom::found("3"));
}

#[test]
fn non_numeric_text_coerces_to_zero() {
    assert_eq!(text("$add(abc,3)"), "3");
    assert_eq!(text("$add(12kg,1)"), "13");
}

#[test]
fn greater_is_a_pure_truth_value() {
    assert_eq!(eval("$greater(2,1)"), Atom::found(""));
    assert_eq!(eval("$greater(1,2)"), Atom::absent());
    assert_eq!(text("[$greater(2,1)x]"), "x");
    assert_eq!(text("[$greater(1,2)x]"), "");
}

#[test]
fn rand_yields_a_number() {
    let value = text("$rand()");
    assert!(value.parse::<i64>().is_ok_and(|n| n >= 0), "{value}");
}

// =============================================================================
// Boolean
// =============================================================================

#[test]
fn boolean_functions() {
    assert_eq!(text("$if($and(%title%,%artist%),y,n)"), "y");
    assert_eq!(text("$if($and(%title%,%missing%),y,n)"), "n");
    assert_eq!(text("$if($or(%missing%,%title%),y,n)"), "y");
    assert_eq!(text("$if($not(%missing%),y,n)"), "y");
    assert_eq!(text("$if($xor(%title%,%artist%),y,n)"), "n");
    assert_eq!(text("$if($xor(%title%,%missing%),y,n)"), "y");
}

#[test]
fn boolean_functions_render_no_text() {
    assert_eq!(text("<$and(%title%)>"), "<>");
    assert_eq!(text("<$or(%missing%)>"), "<>");
}

// =============================================================================
// Case and abbreviation
// =============================================================================

#[test]
fn case_mapping() {
    assert_eq!(text("$upper(%title%)"), "THIS");
    assert_eq!(text("$lower(%artist%)"), "collective soul");
    assert_eq!(text("$upper(straße)"), "STRASSE");
    assert_eq!(text("$lower(ÀÉÎ)"), "àéî");
}

#[test]
fn capitalization() {
    assert_eq!(text("$caps(hELLO wORLD)"), "Hello World");
    assert_eq!(text("$caps2(hELLO wORLD)"), "HELLO WORLD");
    assert_eq!(text("$caps(élan vital)"), "Élan Vital");
    assert_eq!(text("$caps2(song '['live']')"), "Song [Live]");
}

#[test]
fn abbreviation() {
    assert_eq!(text("$abbr(This is a Test)"), "TiaT");
    assert_eq!(text("$abbr(Live '('at Wembley')')"), "L(aW)");
    assert_eq!(text("$abbr(Short,10)"), "Short");
    assert_eq!(text("$abbr(Not So Short,5)"), "NSS");
    assert_eq!(
        text("$abbr('This is a Long Title (12-inch version)')"),
        "TiaLT(1v)"
    );
}

// =============================================================================
// Slicing and measuring
// =============================================================================

#[test]
fn left_right_and_cut() {
    assert_eq!(text("$left(abcdef,3)"), "abc");
    assert_eq!(text("$cut(abcdef,3)"), "abc");
    assert_eq!(text("$right(abcdef,2)"), "ef");
    assert_eq!(text("$right(ab,5)"), "ab");
    assert_eq!(text("$left(日本語,2)"), "日本");
}

#[test]
fn insert_and_substr() {
    assert_eq!(text("$insert(abef,cd,2)"), "abcdef");
    assert_eq!(text("$insert(ab,cd,9)"), "abcd");
    assert_eq!(text("$substr(abcdef,2,4)"), "bcd");
    assert_eq!(text("$substr(abcdef,4,2)"), "");
}

#[test]
fn lengths() {
    assert_eq!(text("$len(日本語)"), "3");
    assert_eq!(text("$len2(日本語)"), "6");
    assert_eq!(text("$len2(abc)"), "3");
}

#[test]
fn longer_longest_shortest() {
    assert_eq!(text("$if($longer(abc,ab),y,n)"), "y");
    assert_eq!(text("$if($longer(ab,ab),y,n)"), "n");
    assert_eq!(text("$longest(a,abc,xyz)"), "abc");
    assert_eq!(text("$shortest(abc,a,b)"), "a");
}

#[test]
fn searching() {
    assert_eq!(text("$strchr(abcabc,b)"), "2");
    assert_eq!(text("$strrchr(abcabc,b)"), "5");
    assert_eq!(text("$strstr(abcabc,ca)"), "3");
    assert_eq!(text("$strstr(abc,x)"), "0");
    assert_eq!(text("$strchr(日本語,語)"), "3");
}

#[test]
fn comparing() {
    assert_eq!(text("$if($strcmp(abc,abc),y,n)"), "y");
    assert_eq!(text("$if($strcmp(ABC,abc),y,n)"), "n");
    assert_eq!(text("$if($stricmp(ÄBC,äbc),y,n)"), "y");
}

// =============================================================================
// Padding and generation
// =============================================================================

#[test]
fn numbers_are_zero_padded() {
    assert_eq!(text("$num(7,3)"), "007");
    assert_eq!(text("$num(1234,2)"), "1234");
    assert_eq!(text("$num(-7,3)"), "-07");
}

#[test]
fn padding() {
    assert_eq!(text("$pad(ab,4)"), "ab  ");
    assert_eq!(text("$pad(ab,4,-)"), "ab--");
    assert_eq!(text("$pad_right(ab,4,0)"), "00ab");
    assert_eq!(text("$pad(abcdef,3)"), "abcdef");
    assert_eq!(text("$padcut(abcdef,3)"), "abc");
    assert_eq!(text("$padcut(ab,3)"), "ab ");
    assert_eq!(text("$padcut_right(ab,3)"), " ab");
    assert_eq!(text("$padcut_right(abcdef,3)"), "abc");
}

#[test]
fn repeat_and_replace() {
    assert_eq!(text("$repeat(ab,3)"), "ababab");
    assert_eq!(text("$replace(a-b-c,-,+)"), "a+b+c");
    assert_eq!(text("$replace(abc,a,1,b,2)"), "12c");
}

#[test]
fn roman_numerals() {
    assert_eq!(text("$roman(1994)"), "MCMXCIV");
    assert_eq!(text("$roman(4)"), "IV");
    assert_eq!(eval("$roman(0)"), Atom::absent());
}

#[test]
fn rot13_round_trips() {
    assert_eq!(text("$rot13(Hello)"), "Uryyb");
    assert_eq!(text("$rot13($rot13('Hello, World!'))"), "Hello, World!");
}

#[test]
fn prefixes() {
    assert_eq!(text("$stripprefix(The Beatles)"), "Beatles");
    assert_eq!(text("$stripprefix(Theatre of Tragedy)"), "Theatre of Tragedy");
    assert_eq!(text("$stripprefix(Die Ärzte,Die)"), "Ärzte");
    assert_eq!(text("$swapprefix(The Beatles)"), "Beatles, The");
    assert_eq!(text("$swapprefix(a tribe called quest)"), "tribe called quest, a");
}

#[test]
fn whitespace_and_line_endings() {
    assert_eq!(text("$trim(  x  )"), "x");
    assert_eq!(text("$fix_eol(%comment%)"), "line one (...)");
    assert_eq!(text("$fix_eol(%comment%,~)"), "line one~");
    assert_eq!(text("$fix_eol(%title%)"), "This");
    assert_eq!(text("$crlf()"), "\r\n");
    assert_eq!(text("$tab()"), "\t");
    assert_eq!(text("$tab(2)"), "\t\t");
}

#[test]
fn char_from_code_point() {
    assert_eq!(eval("$char(65)"), Atom::literal("A"));
    assert_eq!(text("$char(9835)"), "♫");
    assert_eq!(eval("$char(-1)"), Atom::absent());
}

// =============================================================================
// Absence and truth propagation
// =============================================================================

#[test]
fn text_functions_propagate_absence() {
    assert_eq!(eval("$upper(%missing%)"), Atom::absent());
    assert_eq!(text("[$upper(%missing%) - ]x"), "x");
}

#[test]
fn text_functions_keep_operand_truth() {
    assert!(eval("$upper(%title%)").truth);
    assert!(!eval("$upper(abc)").truth);
}

// =============================================================================
// Paths and misc
// =============================================================================

#[test]
fn path_components() {
    assert_eq!(text(r"$directory(C:\Music\Artist\Album\01.flac)"), "Album");
    assert_eq!(text(r"$directory(C:\Music\Artist\Album\01.flac,2)"), "Artist");
    assert_eq!(text("$directory_path(/a/b/c.mp3)"), "/a/b");
    assert_eq!(text("$filename(/a/b/c.d.mp3)"), "c.d");
    assert_eq!(text("$ext(/a/b/c.d.mp3)"), "mp3");
    assert_eq!(text("$ext(a|b.ogg)"), "ogg");
}

#[test]
fn checksum_and_hex() {
    assert_eq!(text("$crc32(123456789)"), "3421780262");
    assert_eq!(text("$hex(255)"), "FF");
    assert_eq!(text("$hex(255,4)"), "00FF");
}

#[test]
fn progress_bars() {
    assert_eq!(text("$progress(5,10,5,#,-)"), "--#--");
    assert_eq!(text("$progress2(3,10,10,#,-)"), "###-------");
    assert_eq!(text("$progress2(3,0,4,#,-)"), "----");
}

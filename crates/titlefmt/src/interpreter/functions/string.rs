//! Text functions.
//!
//! Lengths and positions count Unicode scalar values. Case mapping is
//! locale-independent and covers non-ASCII scripts.

use std::iter::repeat_n;

use icu_casemap::CaseMapper;
use icu_locale_core::langid;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::interpreter::Atom;

use super::{Arg, MAX_WIDTH, map_text};

/// Prefixes handled by `$stripprefix` and `$swapprefix` when none are given.
const DEFAULT_PREFIXES: [&str; 2] = ["A", "The"];

const NUMERALS: [(i64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

pub(super) fn to_upper(text: &str) -> String {
    CaseMapper::new()
        .uppercase_to_string(text, &langid!("und"))
        .to_string()
}

pub(super) fn to_lower(text: &str) -> String {
    CaseMapper::new()
        .lowercase_to_string(text, &langid!("und"))
        .to_string()
}

fn char_count(arg: &Arg) -> usize {
    arg.text().chars().count()
}

/// `$abbr(x)`, `$abbr(x,len)`: first letter of each word. With `len`, text
/// of at most `len` characters is returned unchanged.
pub fn abbr(args: &[Arg]) -> Atom {
    let Some((text, rest)) = args.split_first() else {
        return Atom::absent();
    };
    if let [limit] = rest
        && char_count(text) <= limit.count()
    {
        return text.atom.clone();
    }
    map_text(text, abbreviate)
}

fn abbreviate(text: &str) -> String {
    let mut out = String::new();
    let mut word_start = true;
    for c in text.chars() {
        if matches!(c, '(' | ')' | '[' | ']' | '{' | '}') {
            out.push(c);
            word_start = true;
        } else if c.is_whitespace()
            || matches!(
                c,
                '/' | '\\' | '.' | ',' | '_' | ':' | ';' | '!' | '?' | '&' | '+' | '"'
            )
        {
            word_start = true;
        } else if word_start {
            out.push(c);
            word_start = false;
        }
    }
    out
}

/// `$caps(x)`: first letter of each word upper-case, the rest lower-case.
pub fn caps(args: &[Arg]) -> Atom {
    map_text(&args[0], |t| capitalize(t, true))
}

/// `$caps2(x)`: first letter of each word upper-case, the rest untouched.
pub fn caps2(args: &[Arg]) -> Atom {
    map_text(&args[0], |t| capitalize(t, false))
}

fn capitalize(text: &str, lower_rest: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for grapheme in text.graphemes(true) {
        if grapheme.chars().all(is_word_separator) {
            out.push_str(grapheme);
            word_start = true;
        } else if word_start {
            out.push_str(&to_upper(grapheme));
            word_start = false;
        } else if lower_rest {
            out.push_str(&to_lower(grapheme));
        } else {
            out.push_str(grapheme);
        }
    }
    out
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | '[' | '{' | '/' | '"')
}

/// `$left(a,len)` and `$cut(a,len)`
pub fn left(args: &[Arg]) -> Atom {
    let n = args[1].count();
    map_text(&args[0], |t| t.chars().take(n).collect())
}

/// `$right(a,len)`
pub fn right(args: &[Arg]) -> Atom {
    let n = args[1].count();
    map_text(&args[0], |t| {
        let skip = t.chars().count().saturating_sub(n);
        t.chars().skip(skip).collect()
    })
}

/// `$insert(a,b,n)`: `b` inserted after the first `n` characters of `a`.
pub fn insert(args: &[Arg]) -> Atom {
    let insertion = args[1].text();
    let n = args[2].count();
    map_text(&args[0], |t| {
        let split = t.char_indices().nth(n).map_or(t.len(), |(i, _)| i);
        format!("{}{insertion}{}", &t[..split], &t[split..])
    })
}

/// `$len(a)`
pub fn len(args: &[Arg]) -> Atom {
    map_text(&args[0], |t| t.chars().count().to_string())
}

/// `$len2(a)`: display width, counting wide characters twice.
pub fn len2(args: &[Arg]) -> Atom {
    map_text(&args[0], |t| t.width().to_string())
}

/// `$longer(a,b)`: true when `a` has more characters than `b`.
pub fn longer(args: &[Arg]) -> Atom {
    Atom::boolean(char_count(&args[0]) > char_count(&args[1]))
}

/// `$longest(a,...)`: the first of the longest arguments.
pub fn longest(args: &[Arg]) -> Atom {
    pick_by_length(args, |candidate, best| candidate > best)
}

/// `$shortest(a,...)`: the first of the shortest arguments.
pub fn shortest(args: &[Arg]) -> Atom {
    pick_by_length(args, |candidate, best| candidate < best)
}

fn pick_by_length(args: &[Arg], better: impl Fn(usize, usize) -> bool) -> Atom {
    let Some((first, rest)) = args.split_first() else {
        return Atom::absent();
    };
    let mut best = first;
    for arg in rest {
        if better(char_count(arg), char_count(best)) {
            best = arg;
        }
    }
    best.atom.clone()
}

/// `$lower(a)`
pub fn lower(args: &[Arg]) -> Atom {
    map_text(&args[0], to_lower)
}

/// `$upper(a)`
pub fn upper(args: &[Arg]) -> Atom {
    map_text(&args[0], to_upper)
}

/// `$num(n,len)`: `n` zero-padded to `len` digits.
pub fn num(args: &[Arg]) -> Atom {
    let width = args[1].count().min(MAX_WIDTH);
    Atom::found(format!("{:0width$}", args[0].number()))
}

/// `$pad(x,len)`, `$pad(x,len,char)`: pad on the right up to `len`.
pub fn pad(args: &[Arg]) -> Atom {
    let (width, fill) = pad_spec(args);
    map_text(&args[0], |t| pad_end(t, width, fill))
}

/// `$pad_right(x,len)`, `$pad_right(x,len,char)`: pad on the left up to `len`.
pub fn pad_right(args: &[Arg]) -> Atom {
    let (width, fill) = pad_spec(args);
    map_text(&args[0], |t| pad_start(t, width, fill))
}

/// `$padcut(x,len)`: pad on the right or cut, to exactly `len`.
pub fn padcut(args: &[Arg]) -> Atom {
    let (width, fill) = pad_spec(args);
    map_text(&args[0], |t| pad_end(t, width, fill).chars().take(width).collect())
}

/// `$padcut_right(x,len)`: pad on the left or cut, to exactly `len`.
pub fn padcut_right(args: &[Arg]) -> Atom {
    let (width, fill) = pad_spec(args);
    map_text(&args[0], |t| pad_start(t, width, fill).chars().take(width).collect())
}

fn pad_spec(args: &[Arg]) -> (usize, char) {
    let width = args[1].count().min(MAX_WIDTH);
    let fill = args
        .get(2)
        .and_then(|a| a.text().chars().next())
        .unwrap_or(' ');
    (width, fill)
}

fn pad_end(text: &str, width: usize, fill: char) -> String {
    let missing = width.saturating_sub(text.chars().count());
    let mut out = text.to_string();
    out.extend(repeat_n(fill, missing));
    out
}

fn pad_start(text: &str, width: usize, fill: char) -> String {
    let missing = width.saturating_sub(text.chars().count());
    let mut out: String = repeat_n(fill, missing).collect();
    out.push_str(text);
    out
}

/// `$repeat(a,n)`
pub fn repeat(args: &[Arg]) -> Atom {
    let n = args[1].count().min(MAX_WIDTH);
    map_text(&args[0], |t| t.repeat(n))
}

/// `$replace(a,b1,c1,b2,c2,...)`: every `b` replaced by its `c`, pair by
/// pair. An unpaired trailing argument is ignored.
pub fn replace(args: &[Arg]) -> Atom {
    map_text(&args[0], |t| {
        let mut out = t.to_string();
        for pair in args[1..].chunks_exact(2) {
            let from = pair[0].text();
            if !from.is_empty() {
                out = out.replace(from, pair[1].text());
            }
        }
        out
    })
}

/// `$roman(n)`: Roman numerals for 1 to 100000.
pub fn roman(args: &[Arg]) -> Atom {
    let n = args[0].number();
    if !(1..=100_000).contains(&n) {
        return Atom::absent();
    }
    let mut rest = n;
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while rest >= value {
            out.push_str(numeral);
            rest -= value;
        }
    }
    Atom::found(out)
}

/// `$rot13(a)`
pub fn rot13(args: &[Arg]) -> Atom {
    map_text(&args[0], |t| {
        t.chars()
            .map(|c| match c {
                'a'..='m' | 'A'..='M' => char::from(c as u8 + 13),
                'n'..='z' | 'N'..='Z' => char::from(c as u8 - 13),
                _ => c,
            })
            .collect()
    })
}

/// `$strchr(s,c)`: 1-based position of the first `c` in `s`, or 0.
pub fn strchr(args: &[Arg]) -> Atom {
    let needle = args[1].text().chars().next();
    position(args[0].text().chars().position(|c| Some(c) == needle))
}

/// `$strrchr(s,c)`: 1-based position of the last `c` in `s`, or 0.
pub fn strrchr(args: &[Arg]) -> Atom {
    let needle = args[1].text().chars().next();
    position(
        args[0]
            .text()
            .chars()
            .enumerate()
            .filter(|&(_, c)| Some(c) == needle)
            .last()
            .map(|(i, _)| i),
    )
}

/// `$strstr(s1,s2)`: 1-based position of `s2` in `s1`, or 0.
pub fn strstr(args: &[Arg]) -> Atom {
    let haystack = args[0].text();
    let needle = args[1].text();
    if needle.is_empty() {
        return position(None);
    }
    position(haystack.find(needle).map(|i| haystack[..i].chars().count()))
}

fn position(index: Option<usize>) -> Atom {
    match index {
        Some(i) => Atom::found((i + 1).to_string()),
        None => Atom::literal("0"),
    }
}

/// `$strcmp(a,b)`: true when equal.
pub fn strcmp(args: &[Arg]) -> Atom {
    Atom::boolean(args[0].text() == args[1].text())
}

/// `$stricmp(a,b)`: true when equal ignoring case.
pub fn stricmp(args: &[Arg]) -> Atom {
    Atom::boolean(to_lower(args[0].text()) == to_lower(args[1].text()))
}

/// `$substr(s,m,n)`: characters `m` through `n`, 1-based and inclusive.
pub fn substr(args: &[Arg]) -> Atom {
    let start = usize::try_from(args[1].number().max(1) - 1).unwrap_or(0);
    let end = args[2].count();
    map_text(&args[0], |t| {
        t.chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    })
}

/// `$stripprefix(x)`, `$stripprefix(x,prefix,...)`: drop a leading article.
pub fn stripprefix(args: &[Arg]) -> Atom {
    let prefixes = prefixes(&args[1..]);
    map_text(&args[0], |t| match split_prefix(t, &prefixes) {
        Some((_, rest)) => rest.to_string(),
        None => t.to_string(),
    })
}

/// `$swapprefix(x)`, `$swapprefix(x,prefix,...)`: move a leading article to
/// the end, so `The Beatles` becomes `Beatles, The`.
pub fn swapprefix(args: &[Arg]) -> Atom {
    let prefixes = prefixes(&args[1..]);
    map_text(&args[0], |t| match split_prefix(t, &prefixes) {
        Some((head, rest)) => format!("{rest}, {head}"),
        None => t.to_string(),
    })
}

fn prefixes(args: &[Arg]) -> Vec<&str> {
    if args.is_empty() {
        DEFAULT_PREFIXES.to_vec()
    } else {
        args.iter().map(Arg::text).collect()
    }
}

/// Split `text` into a matching prefix and the rest after its space.
fn split_prefix<'t>(text: &'t str, prefixes: &[&str]) -> Option<(&'t str, &'t str)> {
    prefixes.iter().find_map(|prefix| {
        let head = text.get(..prefix.len())?;
        let rest = text[prefix.len()..].strip_prefix(' ')?;
        (!prefix.is_empty() && !rest.is_empty() && to_lower(head) == to_lower(prefix))
            .then_some((head, rest))
    })
}

/// `$trim(s)`
pub fn trim(args: &[Arg]) -> Atom {
    map_text(&args[0], |t| t.trim().to_string())
}

/// `$fix_eol(x)`, `$fix_eol(x,indicator)`: cut at the first line break and
/// append the indicator (` (...)` by default).
pub fn fix_eol(args: &[Arg]) -> Atom {
    let indicator = args.get(1).map_or(" (...)", Arg::text);
    map_text(&args[0], |t| match t.find(['\r', '\n']) {
        Some(i) => format!("{}{indicator}", &t[..i]),
        None => t.to_string(),
    })
}

/// `$tab()`, `$tab(n)`
pub fn tab(args: &[Arg]) -> Atom {
    let n = args.first().map_or(1, |a| a.count().min(MAX_WIDTH));
    Atom::literal("\t".repeat(n))
}

/// `$char(n)`: the character with code point `n`.
pub fn code_point(args: &[Arg]) -> Atom {
    u32::try_from(args[0].number())
        .ok()
        .and_then(char::from_u32)
        .map_or_else(Atom::absent, |c| Atom::literal(c.to_string()))
}

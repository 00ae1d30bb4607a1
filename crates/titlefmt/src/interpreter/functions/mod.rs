//! Built-in function catalog and dispatch.
//!
//! Every built-in is one [`Builtin`] variant listed in a static table with
//! the argument counts it accepts. Dispatch looks for an entry taking exactly
//! the given number of arguments first, then for one whose range or variadic
//! bucket covers it. A name with no matching entry renders an
//! unknown-function marker instead of failing the template.

mod arithmetic;
mod boolean;
mod control;
mod misc;
mod path;
mod string;

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use tracing::debug;

use crate::interpreter::Atom;
use crate::interpreter::error::Marker;
use crate::interpreter::numeric;

use self::Arity::{AtLeast, Exact, Range};

/// Upper bound on generated widths and repeat counts.
const MAX_WIDTH: usize = 1 << 16;

/// An evaluated argument, plus what the parser knew about its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub atom: Atom,
    /// The argument's source began with a quote.
    pub quoted: bool,
}

impl Arg {
    pub fn new(atom: Atom, quoted: bool) -> Self {
        Self { atom, quoted }
    }

    /// Rendered text, empty when absent.
    pub fn text(&self) -> &str {
        self.atom.as_str()
    }

    pub fn truth(&self) -> bool {
        self.atom.truth
    }

    /// The argument coerced to an integer.
    pub fn number(&self) -> i64 {
        if self.quoted {
            numeric::coerce_unsigned(self.text())
        } else {
            numeric::coerce(self.text())
        }
    }

    /// The argument coerced to an integer modulo 2^32.
    pub fn wrapped_u32(&self) -> u32 {
        numeric::coerce_wrapping(self.text(), !self.quoted)
    }

    /// The argument as a count: negative numbers clamp to zero.
    pub fn count(&self) -> usize {
        usize::try_from(self.number()).unwrap_or(0)
    }
}

impl From<Atom> for Arg {
    fn from(atom: Atom) -> Self {
        Arg::new(atom, false)
    }
}

/// How many arguments an entry accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Arity {
    Exact(usize),
    Range(usize, usize),
    /// The variadic bucket: `n` or more.
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::Range(lo, hi) => (lo..=hi).contains(&count),
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::Range(lo, hi) => write!(f, "{lo}-{hi}"),
            Arity::AtLeast(n) => write!(f, "{n}+"),
        }
    }
}

/// Function families, for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Family {
    Control,
    Arithmetic,
    Boolean,
    String,
    Path,
    Encoding,
    Misc,
}

/// Every built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    If,
    If2,
    If3,
    IfEqual,
    IfGreater,
    IfLonger,
    Select,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    MulDiv,
    Min,
    Max,
    Greater,
    Rand,
    And,
    Or,
    Not,
    Xor,
    Abbr,
    Caps,
    Caps2,
    Cut,
    Left,
    Right,
    Insert,
    Len,
    Len2,
    Longer,
    Longest,
    Shortest,
    Lower,
    Upper,
    Num,
    Pad,
    PadRight,
    PadCut,
    PadCutRight,
    Repeat,
    Replace,
    Roman,
    Rot13,
    StrChr,
    StrRChr,
    StrStr,
    StrCmp,
    StriCmp,
    Substr,
    StripPrefix,
    SwapPrefix,
    Trim,
    FixEol,
    Crlf,
    Tab,
    Char,
    Directory,
    DirectoryPath,
    Filename,
    Ext,
    Ansi,
    Ascii,
    Crc32,
    Hex,
    Progress,
    Progress2,
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FunctionEntry {
    pub name: &'static str,
    #[serde(skip)]
    pub builtin: Builtin,
    pub arity: Arity,
    pub family: Family,
}

const fn entry(
    name: &'static str,
    builtin: Builtin,
    arity: Arity,
    family: Family,
) -> FunctionEntry {
    FunctionEntry {
        name,
        builtin,
        arity,
        family,
    }
}

/// The dispatch table. Control-flow functions take any number of arguments
/// and check their own arity so they can report invalid syntax.
pub static FUNCTIONS: &[FunctionEntry] = &[
    entry("if", Builtin::If, AtLeast(0), Family::Control),
    entry("if2", Builtin::If2, AtLeast(0), Family::Control),
    entry("if3", Builtin::If3, AtLeast(0), Family::Control),
    entry("ifequal", Builtin::IfEqual, AtLeast(0), Family::Control),
    entry("ifgreater", Builtin::IfGreater, AtLeast(0), Family::Control),
    entry("iflonger", Builtin::IfLonger, AtLeast(0), Family::Control),
    entry("select", Builtin::Select, AtLeast(0), Family::Control),
    entry("add", Builtin::Add, AtLeast(0), Family::Arithmetic),
    entry("sub", Builtin::Sub, AtLeast(0), Family::Arithmetic),
    entry("mul", Builtin::Mul, AtLeast(0), Family::Arithmetic),
    entry("div", Builtin::Div, AtLeast(0), Family::Arithmetic),
    entry("mod", Builtin::Mod, AtLeast(0), Family::Arithmetic),
    entry("muldiv", Builtin::MulDiv, Exact(3), Family::Arithmetic),
    entry("min", Builtin::Min, AtLeast(0), Family::Arithmetic),
    entry("max", Builtin::Max, AtLeast(0), Family::Arithmetic),
    entry("greater", Builtin::Greater, Exact(2), Family::Arithmetic),
    entry("rand", Builtin::Rand, Exact(0), Family::Arithmetic),
    entry("and", Builtin::And, AtLeast(0), Family::Boolean),
    entry("or", Builtin::Or, AtLeast(0), Family::Boolean),
    entry("not", Builtin::Not, Exact(1), Family::Boolean),
    entry("xor", Builtin::Xor, AtLeast(0), Family::Boolean),
    entry("abbr", Builtin::Abbr, Range(1, 2), Family::String),
    entry("caps", Builtin::Caps, Exact(1), Family::String),
    entry("caps2", Builtin::Caps2, Exact(1), Family::String),
    entry("cut", Builtin::Cut, Exact(2), Family::String),
    entry("left", Builtin::Left, Exact(2), Family::String),
    entry("right", Builtin::Right, Exact(2), Family::String),
    entry("insert", Builtin::Insert, Exact(3), Family::String),
    entry("len", Builtin::Len, Exact(1), Family::String),
    entry("len2", Builtin::Len2, Exact(1), Family::String),
    entry("longer", Builtin::Longer, Exact(2), Family::String),
    entry("longest", Builtin::Longest, AtLeast(1), Family::String),
    entry("shortest", Builtin::Shortest, AtLeast(1), Family::String),
    entry("lower", Builtin::Lower, Exact(1), Family::String),
    entry("upper", Builtin::Upper, Exact(1), Family::String),
    entry("num", Builtin::Num, Exact(2), Family::String),
    entry("pad", Builtin::Pad, Range(2, 3), Family::String),
    entry("pad_right", Builtin::PadRight, Range(2, 3), Family::String),
    entry("padcut", Builtin::PadCut, Exact(2), Family::String),
    entry("padcut_right", Builtin::PadCutRight, Exact(2), Family::String),
    entry("repeat", Builtin::Repeat, Exact(2), Family::String),
    entry("replace", Builtin::Replace, AtLeast(3), Family::String),
    entry("roman", Builtin::Roman, Exact(1), Family::String),
    entry("rot13", Builtin::Rot13, Exact(1), Family::String),
    entry("strchr", Builtin::StrChr, Exact(2), Family::String),
    entry("strrchr", Builtin::StrRChr, Exact(2), Family::String),
    entry("strstr", Builtin::StrStr, Exact(2), Family::String),
    entry("strcmp", Builtin::StrCmp, Exact(2), Family::String),
    entry("stricmp", Builtin::StriCmp, Exact(2), Family::String),
    entry("substr", Builtin::Substr, Exact(3), Family::String),
    entry("stripprefix", Builtin::StripPrefix, AtLeast(1), Family::String),
    entry("swapprefix", Builtin::SwapPrefix, AtLeast(1), Family::String),
    entry("trim", Builtin::Trim, Exact(1), Family::String),
    entry("fix_eol", Builtin::FixEol, Range(1, 2), Family::String),
    entry("crlf", Builtin::Crlf, Exact(0), Family::String),
    entry("tab", Builtin::Tab, Range(0, 1), Family::String),
    entry("char", Builtin::Char, Exact(1), Family::String),
    entry("directory", Builtin::Directory, Range(1, 2), Family::Path),
    entry("directory_path", Builtin::DirectoryPath, Exact(1), Family::Path),
    entry("filename", Builtin::Filename, Exact(1), Family::Path),
    entry("ext", Builtin::Ext, Exact(1), Family::Path),
    entry("ansi", Builtin::Ansi, Exact(1), Family::Encoding),
    entry("ascii", Builtin::Ascii, Exact(1), Family::Encoding),
    entry("crc32", Builtin::Crc32, Exact(1), Family::Misc),
    entry("hex", Builtin::Hex, Range(1, 2), Family::Misc),
    entry("progress", Builtin::Progress, Exact(5), Family::Misc),
    entry("progress2", Builtin::Progress2, Exact(5), Family::Misc),
];

/// Find the entry for a call: exact arity first, then ranges and variadic
/// buckets. Names are case-insensitive.
pub fn lookup(name: &str, arity: usize) -> Option<&'static FunctionEntry> {
    let lowered = name.to_ascii_lowercase();
    let name = lowered.as_str();
    let named = || FUNCTIONS.iter().filter(move |e| e.name == name);
    named()
        .find(|e| e.arity == Exact(arity))
        .or_else(|| named().find(|e| e.arity.accepts(arity)))
}

/// Returns true if any entry has this name, whatever its arity.
pub fn is_known(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    FUNCTIONS.iter().any(|e| e.name == name)
}

/// Names of all built-ins, in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS.iter().map(|e| e.name)
}

/// Which evaluated arguments reach a call's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The value is computed from the arguments.
    All,
    /// The value is this argument, passed through unchanged.
    Arg(usize),
    /// No argument reaches the value.
    Nothing,
}

/// Call a function by name with evaluated arguments.
///
/// Unknown names, arities no entry accepts, and invalid control-flow syntax
/// all come back as a [`Marker`] for the caller to render inline.
pub fn invoke(name: &str, args: &[Arg]) -> Result<(Atom, Source), Marker> {
    let Some(entry) = lookup(name, args.len()) else {
        debug!(name, arity = args.len(), "unknown function");
        return Err(Marker::UnknownFunction {
            name: name.to_string(),
            arity: args.len(),
        });
    };
    entry.builtin.call(args)
}

/// The atom of the chosen argument, or nothing when no branch was taken.
fn chosen(args: &[Arg], index: Option<usize>) -> (Atom, Source) {
    match index.and_then(|i| args.get(i).map(|arg| (i, arg))) {
        Some((i, arg)) => (arg.atom.clone(), Source::Arg(i)),
        None => (Atom::absent(), Source::Nothing),
    }
}

impl Builtin {
    /// Run the built-in. Arity has already been checked against the table.
    pub fn call(self, args: &[Arg]) -> Result<(Atom, Source), Marker> {
        let atom = match self {
            Builtin::If => return control::if_(args).map(|i| chosen(args, i)),
            Builtin::If2 => return control::if2(args).map(|i| chosen(args, i)),
            Builtin::If3 => return Ok(chosen(args, control::if3(args))),
            Builtin::IfEqual => return control::ifequal(args).map(|i| chosen(args, i)),
            Builtin::IfGreater => return control::ifgreater(args).map(|i| chosen(args, i)),
            Builtin::IfLonger => return control::iflonger(args).map(|i| chosen(args, i)),
            Builtin::Select => return Ok(chosen(args, control::select(args))),
            Builtin::Add => arithmetic::add(args),
            Builtin::Sub => arithmetic::sub(args),
            Builtin::Mul => arithmetic::mul(args),
            Builtin::Div => arithmetic::div(args),
            Builtin::Mod => arithmetic::modulo(args),
            Builtin::MulDiv => arithmetic::muldiv(args),
            Builtin::Min => arithmetic::min(args),
            Builtin::Max => arithmetic::max(args),
            Builtin::Greater => arithmetic::greater(args),
            Builtin::Rand => arithmetic::rand(),
            Builtin::And => boolean::and(args),
            Builtin::Or => boolean::or(args),
            Builtin::Not => boolean::not(args),
            Builtin::Xor => boolean::xor(args),
            Builtin::Abbr => string::abbr(args),
            Builtin::Caps => string::caps(args),
            Builtin::Caps2 => string::caps2(args),
            Builtin::Cut | Builtin::Left => string::left(args),
            Builtin::Right => string::right(args),
            Builtin::Insert => string::insert(args),
            Builtin::Len => string::len(args),
            Builtin::Len2 => string::len2(args),
            Builtin::Longer => string::longer(args),
            Builtin::Longest => string::longest(args),
            Builtin::Shortest => string::shortest(args),
            Builtin::Lower => string::lower(args),
            Builtin::Upper => string::upper(args),
            Builtin::Num => string::num(args),
            Builtin::Pad => string::pad(args),
            Builtin::PadRight => string::pad_right(args),
            Builtin::PadCut => string::padcut(args),
            Builtin::PadCutRight => string::padcut_right(args),
            Builtin::Repeat => string::repeat(args),
            Builtin::Replace => string::replace(args),
            Builtin::Roman => string::roman(args),
            Builtin::Rot13 => string::rot13(args),
            Builtin::StrChr => string::strchr(args),
            Builtin::StrRChr => string::strrchr(args),
            Builtin::StrStr => string::strstr(args),
            Builtin::StrCmp => string::strcmp(args),
            Builtin::StriCmp => string::stricmp(args),
            Builtin::Substr => string::substr(args),
            Builtin::StripPrefix => string::stripprefix(args),
            Builtin::SwapPrefix => string::swapprefix(args),
            Builtin::Trim => string::trim(args),
            Builtin::FixEol => string::fix_eol(args),
            Builtin::Crlf => Atom::literal("\r\n"),
            Builtin::Tab => string::tab(args),
            Builtin::Char => string::code_point(args),
            Builtin::Directory => path::directory(args),
            Builtin::DirectoryPath => path::directory_path(args),
            Builtin::Filename => path::filename(args),
            Builtin::Ext => path::ext(args),
            Builtin::Ansi => misc::ansi(args),
            Builtin::Ascii => misc::ascii(args),
            Builtin::Crc32 => misc::crc32(args),
            Builtin::Hex => misc::hex(args),
            Builtin::Progress => misc::progress(args),
            Builtin::Progress2 => misc::progress2(args),
        };
        Ok((atom, Source::All))
    }
}

/// Apply `f` to the text of a primary operand, keeping its truth.
///
/// An absent operand stays absent, so `[$upper(%missing%) - ]` disappears
/// just like `[%missing% - ]`.
fn map_text(arg: &Arg, f: impl FnOnce(&str) -> String) -> Atom {
    match &arg.atom.value {
        Some(text) => Atom::new(f(text), arg.atom.truth),
        None => Atom::absent(),
    }
}

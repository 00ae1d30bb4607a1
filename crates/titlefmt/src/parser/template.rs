//! Template string parser.
//!
//! A character-level state machine that turns a template string into a
//! [`Template`] tree. Handles:
//! - Plain text and `'...'` literal blocks, with `''` as an escaped quote
//! - `%name%` variable references
//! - `$name(arg, ...)` function calls, each argument a full sub-template
//! - `[...]` conditional blocks
//!
//! Conditional bodies and function arguments are parsed by recursing into the
//! same machine. The recursion carries the nesting depth, and every position
//! is absolute within the outermost template.

use std::mem;

use super::ast::{Segment, Template};
use super::error::ParseError;

/// Default limit on nested conditionals and function arguments.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parse a template string into a tree.
pub fn parse_template(input: &str) -> Result<Template, ParseError> {
    parse_template_with_depth(input, DEFAULT_MAX_DEPTH)
}

/// Parse a template string, failing once nesting goes deeper than `max_depth`.
pub fn parse_template_with_depth(input: &str, max_depth: usize) -> Result<Template, ParseError> {
    let mut scanner = Scanner::new(input, max_depth);
    let (template, _) = scanner.sequence(Scope::Root, 0)?;
    Ok(template)
}

/// Scanner states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outputting,
    Literal,
    ParsingVariable,
    ParsingFunctionName,
    ParsingFunctionArgs,
    ParsingConditional,
}

/// The construct a sub-template belongs to.
#[derive(Debug, Clone, Copy)]
enum Scope<'n> {
    Root,
    Conditional { open: usize },
    Argument { call: usize, name: &'n str },
}

impl Scope<'_> {
    fn opener(self) -> usize {
        match self {
            Scope::Root => 0,
            Scope::Conditional { open } => open,
            Scope::Argument { call, .. } => call,
        }
    }

    fn is_argument(self) -> bool {
        matches!(self, Scope::Argument { .. })
    }
}

/// What ended a sub-template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    End,
    Bracket,
    Comma,
    Paren,
}

/// Accumulates segments, merging adjacent text of the same kind.
#[derive(Default)]
struct Segments {
    segments: Vec<Segment>,
    text: String,
}

impl Segments {
    fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    fn push_quoted(&mut self, text: String) {
        self.flush();
        if let Some(Segment::Quoted(prev)) = self.segments.last_mut() {
            prev.push_str(&text);
        } else {
            self.segments.push(Segment::Quoted(text));
        }
    }

    fn push(&mut self, segment: Segment) {
        self.flush();
        self.segments.push(segment);
    }

    fn flush(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = mem::take(&mut self.text);
        if let Some(Segment::Literal(prev)) = self.segments.last_mut() {
            prev.push_str(&text);
        } else {
            self.segments.push(Segment::Literal(text));
        }
    }

    fn finish(mut self) -> Template {
        self.flush();
        Template::new(self.segments)
    }
}

struct Scanner<'a> {
    source: &'a str,
    /// Byte offset and character, indexed by absolute char position.
    chars: Vec<(usize, char)>,
    pos: usize,
    max_depth: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str, max_depth: usize) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn offset(&self, position: usize) -> usize {
        self.chars
            .get(position)
            .map_or(self.source.len(), |&(offset, _)| offset)
    }

    fn char_at(&self, position: usize) -> char {
        self.chars.get(position).map_or('\0', |&(_, c)| c)
    }

    /// Scan one sub-template until the end of input or the closing delimiter
    /// of `scope`.
    fn sequence(&mut self, scope: Scope<'_>, depth: usize) -> Result<(Template, Stop), ParseError> {
        if depth > self.max_depth {
            let position = scope.opener();
            return Err(ParseError::DepthExceeded {
                character: self.char_at(position),
                max_depth: self.max_depth,
                position,
                offset: self.offset(position),
            });
        }

        let mut out = Segments::default();
        let mut state = State::Outputting;
        // Position of the character that opened the token being scanned.
        let mut start = self.pos;
        let mut name = String::new();
        let mut quoted = String::new();
        let mut invalid = None;
        let mut parens = 0usize;

        loop {
            match state {
                State::ParsingFunctionArgs => {
                    let args = self.arguments(&name, start, depth)?;
                    out.push(Segment::Call {
                        name: mem::take(&mut name),
                        args,
                        position: start,
                    });
                    state = State::Outputting;
                    continue;
                }
                State::ParsingConditional => {
                    let (body, _) = self.sequence(Scope::Conditional { open: start }, depth + 1)?;
                    out.push(Segment::Conditional(body));
                    state = State::Outputting;
                    continue;
                }
                State::Outputting
                | State::Literal
                | State::ParsingVariable
                | State::ParsingFunctionName => {}
            }

            let Some(c) = self.bump() else {
                self.end_of_input(state, scope, start, &name, invalid)?;
                return Ok((out.finish(), Stop::End));
            };
            let here = self.pos - 1;

            match state {
                State::Outputting => match c {
                    '\'' if self.peek() == Some('\'') => {
                        self.pos += 1;
                        out.push_quoted("'".to_string());
                    }
                    '\'' => {
                        start = here;
                        state = State::Literal;
                    }
                    '%' => {
                        start = here;
                        invalid = None;
                        state = State::ParsingVariable;
                    }
                    '$' => {
                        start = here;
                        state = State::ParsingFunctionName;
                    }
                    '[' => {
                        start = here;
                        state = State::ParsingConditional;
                    }
                    ']' => {
                        if matches!(scope, Scope::Conditional { .. }) {
                            return Ok((out.finish(), Stop::Bracket));
                        }
                        return Err(ParseError::UnmatchedBracket {
                            position: here,
                            offset: self.offset(here),
                        });
                    }
                    ',' if parens == 0 && scope.is_argument() => {
                        return Ok((out.finish(), Stop::Comma));
                    }
                    ')' if parens == 0 && scope.is_argument() => {
                        return Ok((out.finish(), Stop::Paren));
                    }
                    '(' if scope.is_argument() => {
                        parens += 1;
                        out.push_char(c);
                    }
                    ')' if scope.is_argument() => {
                        parens -= 1;
                        out.push_char(c);
                    }
                    _ => out.push_char(c),
                },
                State::Literal => {
                    if c != '\'' {
                        quoted.push(c);
                    } else if self.peek() == Some('\'') {
                        self.pos += 1;
                        quoted.push('\'');
                    } else {
                        out.push_quoted(mem::take(&mut quoted));
                        state = State::Outputting;
                    }
                }
                State::ParsingVariable => {
                    if c == '%' {
                        out.push(Segment::Variable(mem::take(&mut name)));
                        state = State::Outputting;
                    } else {
                        if invalid.is_none() && !is_variable_char(c) {
                            invalid = Some(c);
                        }
                        name.push(c);
                    }
                }
                State::ParsingFunctionName => {
                    if c == '(' && !name.is_empty() {
                        state = State::ParsingFunctionArgs;
                    } else if is_function_char(c) {
                        name.push(c);
                    } else {
                        return Err(ParseError::InvalidFunctionName {
                            character: c,
                            position: here,
                            offset: self.offset(here),
                        });
                    }
                }
                // Both recurse before a character is read.
                State::ParsingFunctionArgs | State::ParsingConditional => {}
            }
        }
    }

    /// Scan comma-separated arguments up to and including the closing `)`.
    fn arguments(
        &mut self,
        name: &str,
        call: usize,
        depth: usize,
    ) -> Result<Vec<Template>, ParseError> {
        let mut args = Vec::new();
        loop {
            let (arg, stop) = self.sequence(Scope::Argument { call, name }, depth + 1)?;
            args.push(arg);
            if stop == Stop::Paren {
                break;
            }
        }
        // `$name()` takes no arguments rather than one empty one.
        if let [only] = args.as_slice()
            && only.is_empty()
        {
            args.clear();
        }
        Ok(args)
    }

    fn end_of_input(
        &self,
        state: State,
        scope: Scope<'_>,
        start: usize,
        name: &str,
        invalid: Option<char>,
    ) -> Result<(), ParseError> {
        match state {
            State::Literal => Err(ParseError::UnterminatedLiteral {
                position: start,
                offset: self.offset(start),
            }),
            State::ParsingVariable => Err(ParseError::UnterminatedVariable {
                position: start,
                offset: self.offset(start),
                invalid,
            }),
            State::ParsingFunctionName | State::ParsingFunctionArgs => {
                Err(ParseError::UnterminatedFunction {
                    name: name.to_string(),
                    position: start,
                    offset: self.offset(start),
                })
            }
            State::ParsingConditional => Err(ParseError::UnterminatedConditional {
                position: start,
                offset: self.offset(start),
            }),
            State::Outputting => match scope {
                Scope::Root => Ok(()),
                Scope::Conditional { open } => Err(ParseError::UnterminatedConditional {
                    position: open,
                    offset: self.offset(open),
                }),
                Scope::Argument { call, name } => Err(ParseError::UnterminatedFunction {
                    name: name.to_string(),
                    position: call,
                    offset: self.offset(call),
                }),
            },
        }
    }
}

/// Characters that form a well-behaved variable name.
fn is_variable_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, ' ' | '@' | '_' | '-')
}

/// Characters allowed in a function name.
fn is_function_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

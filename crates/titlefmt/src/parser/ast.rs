//! Public tree types for parsed title-formatting templates.
//!
//! These types are public to enable external tooling (linters, formatters, etc.).

/// A parsed template: segments evaluated left to right and concatenated.
///
/// Function arguments and conditional bodies are themselves templates, so the
/// tree nests exactly as the source does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text outside of quotes.
    Literal(String),
    /// Text from a `'...'` block (or a bare `''`), with doubled quotes
    /// already collapsed.
    Quoted(String),
    /// A field reference: `%name%`.
    Variable(String),
    /// A function call: `$name(arg, ...)`.
    Call {
        name: String,
        args: Vec<Template>,
        /// Absolute char position of the `$` in the outermost template.
        position: usize,
    },
    /// A conditional block: `[...]`.
    Conditional(Template),
}

impl Template {
    /// Create a template from segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Returns true if the template has no segments at all.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if the template source began with a quote character.
    ///
    /// Such arguments are pure text for numeric coercion: a leading `-`
    /// inside them is never read as a sign.
    pub fn starts_quoted(&self) -> bool {
        matches!(self.segments.first(), Some(Segment::Quoted(_)))
    }

    /// Returns true if the template contains only literal text.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_) | Segment::Quoted(_)))
    }

    /// Visit every function call in the tree, depth first, outer calls first.
    pub fn walk_calls<'a>(&'a self, visit: &mut impl FnMut(&'a str, &'a [Template], usize)) {
        for segment in &self.segments {
            match segment {
                Segment::Call {
                    name,
                    args,
                    position,
                } => {
                    visit(name, args, *position);
                    for arg in args {
                        arg.walk_calls(visit);
                    }
                }
                Segment::Conditional(body) => body.walk_calls(visit),
                Segment::Literal(_) | Segment::Quoted(_) | Segment::Variable(_) => {}
            }
        }
    }
}

pub mod formatter;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use formatter::Formatter;
pub use interpreter::{
    Atom, CompiledTemplate, EvalContext, LintWarning, Marker, Options, TemplateCache,
    compute_suggestions, lint_source, lint_template,
};
pub use parser::{ParseError, Template};
pub use types::{Track, TrackFields};

/// Format one track with default options.
///
/// Equivalent to compiling `source` and applying it to `track`.
///
/// # Example
///
/// ```
/// use titlefmt::fields;
///
/// let track = fields! { "ARTIST" => "Kraftwerk", "TITLE" => "Computerwelt" };
/// let atom = titlefmt::format("[%artist% - ]%title%", &track).unwrap();
/// assert_eq!(atom.as_str(), "Kraftwerk - Computerwelt");
/// assert!(atom.truth);
/// ```
pub fn format(source: &str, track: &dyn Track) -> Result<Atom, ParseError> {
    Ok(compile(source)?.apply(track))
}

/// Compile a template with default options.
pub fn compile(source: &str) -> Result<CompiledTemplate, ParseError> {
    CompiledTemplate::compile(source)
}

/// Creates a [`TrackFields`] from name-value pairs.
///
/// Names are used as given, so write them upper-cased for the default
/// case-insensitive lookup.
///
/// # Example
///
/// ```
/// use titlefmt::{Track, fields};
///
/// let track = fields! { "TITLE" => "Intro", "TRACKNUMBER" => 1 };
/// assert_eq!(track.len(), 2);
/// assert_eq!(track.get("TRACKNUMBER").as_deref(), Some("1"));
/// ```
#[macro_export]
macro_rules! fields {
    {} => {
        $crate::TrackFields::new()
    };
    { $($name:expr => $value:expr),+ $(,)? } => {
        {
            let mut fields = $crate::TrackFields::new();
            $(
                fields.insert($name, ::std::string::ToString::to_string(&$value));
            )+
            fields
        }
    };
}

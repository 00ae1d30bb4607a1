//! The main entry point: options plus a cache of compiled templates.

use std::sync::Arc;

use bon::Builder;

use crate::interpreter::{Atom, CompiledTemplate, Marker, Options, TemplateCache};
use crate::parser::ParseError;
use crate::types::Track;

/// Formats tracks with a fixed set of options, compiling each distinct
/// template once.
///
/// # Example
///
/// ```
/// use titlefmt::{Formatter, Options, TrackFields};
///
/// let formatter = Formatter::builder()
///     .options(Options::builder().magic(false).build())
///     .build();
///
/// let track = TrackFields::new().with("ALBUM ARTIST", "Various");
/// let atom = formatter.format("%artist%", &track).unwrap();
/// assert!(!atom.is_present());
/// assert_eq!(formatter.cache().len(), 1);
/// ```
#[derive(Debug, Default, Builder)]
pub struct Formatter {
    #[builder(default)]
    options: Options,

    #[builder(skip)]
    cache: TemplateCache,
}

impl Formatter {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Compile `source`, or fetch it from the cache.
    pub fn compile(&self, source: &str) -> Result<Arc<CompiledTemplate>, ParseError> {
        self.cache.get_or_compile(source, &self.options)
    }

    /// Format one track.
    ///
    /// Only structural problems fail; unknown functions and invalid control
    /// flow render inline markers.
    pub fn format(&self, source: &str, track: &dyn Track) -> Result<Atom, ParseError> {
        Ok(self.compile(source)?.apply_with(track, &self.options))
    }

    /// Format one track, also returning the markers substituted into it.
    pub fn format_collecting(
        &self,
        source: &str,
        track: &dyn Track,
    ) -> Result<(Atom, Vec<Marker>), ParseError> {
        Ok(self
            .compile(source)?
            .apply_collecting(track, &self.options))
    }
}

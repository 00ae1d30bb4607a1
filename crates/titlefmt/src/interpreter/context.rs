//! Evaluation options and per-evaluation state.

use std::mem;

use bon::Builder;

use crate::interpreter::error::Marker;
use crate::parser::DEFAULT_MAX_DEPTH;
use crate::types::Track;

/// Settings consumed by the parser and evaluator.
///
/// # Example
///
/// ```
/// use titlefmt::Options;
///
/// let options = Options::builder().case_sensitive(true).build();
/// assert!(options.case_sensitive);
/// assert!(options.magic);
/// assert_eq!(options.max_depth, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct Options {
    /// Look fields up by their exact name instead of upper-casing it.
    #[builder(default)]
    pub case_sensitive: bool,

    /// Consult the fallback table (`%artist%` falling back to `ALBUM ARTIST`,
    /// and so on) before looking a field up directly.
    #[builder(default = true)]
    pub magic: bool,

    /// Deepest allowed nesting of conditionals and function arguments.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options::builder().build()
    }
}

/// State carried through one evaluation of a template against a track.
///
/// The context holds:
/// - The track being formatted
/// - The active options
/// - Inline markers substituted so far, for callers that want to report them
pub struct EvalContext<'a> {
    track: &'a dyn Track,
    options: &'a Options,
    markers: Vec<Marker>,
}

impl<'a> EvalContext<'a> {
    /// Create a context for one track.
    pub fn new(track: &'a dyn Track, options: &'a Options) -> Self {
        Self {
            track,
            options,
            markers: Vec::new(),
        }
    }

    pub fn track(&self) -> &'a dyn Track {
        self.track
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// Record a marker substituted into the output.
    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Markers recorded so far.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Remove and return the markers recorded after the first `len`.
    pub(crate) fn split_markers(&mut self, len: usize) -> Vec<Marker> {
        self.markers.split_off(len.min(self.markers.len()))
    }

    /// Record markers from an argument that reached the output.
    pub(crate) fn extend_markers(&mut self, markers: Vec<Marker>) {
        self.markers.extend(markers);
    }

    /// Drain all recorded markers.
    pub fn take_markers(&mut self) -> Vec<Marker> {
        mem::take(&mut self.markers)
    }
}

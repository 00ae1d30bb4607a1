//! Compiled templates and the per-run compilation cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::interpreter::error::Marker;
use crate::interpreter::evaluator::eval_template;
use crate::interpreter::{Atom, EvalContext, Options};
use crate::parser::ast::Template;
use crate::parser::{ParseError, parse_template_with_depth};
use crate::types::Track;

/// A parsed template, ready to be applied to any number of tracks.
///
/// Applying a compiled template gives exactly the result of formatting its
/// source directly.
///
/// # Example
///
/// ```
/// use titlefmt::{CompiledTemplate, TrackFields};
///
/// let compiled = CompiledTemplate::compile("[%artist% - ]%title%").unwrap();
/// let track = TrackFields::new().with("TITLE", "Intro");
/// assert_eq!(compiled.apply(&track).as_str(), "Intro");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    source: String,
    template: Template,
}

impl CompiledTemplate {
    /// Compile with the default nesting limit.
    pub fn compile(source: &str) -> Result<Self, ParseError> {
        Self::compile_with(source, &Options::default())
    }

    /// Compile with the nesting limit from `options`.
    pub fn compile_with(source: &str, options: &Options) -> Result<Self, ParseError> {
        let template = parse_template_with_depth(source, options.max_depth)?;
        Ok(Self {
            source: source.to_string(),
            template,
        })
    }

    /// Apply to a track with default options.
    pub fn apply(&self, track: &dyn Track) -> Atom {
        self.apply_with(track, &Options::default())
    }

    pub fn apply_with(&self, track: &dyn Track, options: &Options) -> Atom {
        self.apply_collecting(track, options).0
    }

    /// Apply to a track, also returning the markers substituted into it.
    ///
    /// Markers in branches that were not taken are not returned. Markers in
    /// the arguments of a computing function such as `$upper` are, since the
    /// function consumed their text.
    pub fn apply_collecting(&self, track: &dyn Track, options: &Options) -> (Atom, Vec<Marker>) {
        let mut ctx = EvalContext::new(track, options);
        let atom = eval_template(&self.template, &mut ctx);
        (atom, ctx.take_markers())
    }

    /// The template text this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed tree.
    pub fn template(&self) -> &Template {
        &self.template
    }
}

/// Compiled templates keyed by their source text.
///
/// Safe to share across threads. Entries are compiled with the options of
/// the call that first saw them, so one cache should serve one nesting limit.
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: RwLock<HashMap<String, Arc<CompiledTemplate>>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached compilation of `source`, compiling it on a miss.
    ///
    /// Parse errors are not cached.
    pub fn get_or_compile(
        &self,
        source: &str,
        options: &Options,
    ) -> Result<Arc<CompiledTemplate>, ParseError> {
        if let Some(compiled) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
        {
            trace!(source, "template cache hit");
            return Ok(Arc::clone(compiled));
        }

        debug!(source, "compiling template");
        let compiled = Arc::new(CompiledTemplate::compile_with(source, options)?);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            entries.entry(source.to_string()).or_insert(compiled),
        ))
    }

    /// Number of cached templates.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

//! Variable resolution against a track.

use tracing::trace;

use crate::interpreter::Atom;
use crate::interpreter::context::Options;
use crate::interpreter::magic;
use crate::types::Track;

/// Resolve `%name%` against a track.
///
/// Resolution order:
/// 1. The fallback table, keyed by the lower-cased name (when `magic` is on)
/// 2. A direct lookup of the name, upper-cased unless running case-sensitive
///
/// A missing field is absent and false, never an error.
pub fn resolve(track: &dyn Track, name: &str, options: &Options) -> Atom {
    if options.magic
        && let Some(rule) = magic::lookup(&name.to_lowercase())
    {
        let atom = rule.apply(track, options);
        if atom.is_present() {
            return atom;
        }
        trace!(name, "no fallback candidate present");
    }

    let key = if options.case_sensitive {
        name.to_string()
    } else {
        name.to_uppercase()
    };
    match track.get(&key) {
        Some(value) => Atom::found(value),
        None => Atom::absent(),
    }
}

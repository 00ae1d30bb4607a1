//! Fallback rules for well-known variable names.
//!
//! `%artist%` on a track without an `ARTIST` field falls back to `ALBUM
//! ARTIST`, then `COMPOSER`, then `PERFORMER`. The table is keyed by the
//! lower-cased variable name.

use tracing::trace;

use crate::interpreter::Atom;
use crate::interpreter::context::Options;
use crate::types::Track;

/// How a well-known name resolves.
#[derive(Clone, Copy)]
pub enum MagicRule {
    /// Candidate fields tried in order; the first present one wins.
    Candidates(&'static [&'static str]),
    /// A custom resolution procedure.
    Procedure(fn(&dyn Track, &Options) -> Atom),
}

static MAGIC: &[(&str, MagicRule)] = &[
    (
        "artist",
        MagicRule::Candidates(&["ARTIST", "ALBUM ARTIST", "COMPOSER", "PERFORMER"]),
    ),
    (
        "album artist",
        MagicRule::Candidates(&["ALBUM ARTIST", "ARTIST", "COMPOSER", "PERFORMER"]),
    ),
    ("track artist", MagicRule::Procedure(track_artist)),
    ("album", MagicRule::Candidates(&["ALBUM", "VENUE"])),
    ("title", MagicRule::Candidates(&["TITLE"])),
    ("date", MagicRule::Candidates(&["DATE", "YEAR"])),
    ("discnumber", MagicRule::Candidates(&["DISCNUMBER", "DISC"])),
    ("totaldiscs", MagicRule::Candidates(&["TOTALDISCS", "DISCTOTAL"])),
    ("tracknumber", MagicRule::Procedure(track_number)),
    ("totaltracks", MagicRule::Candidates(&["TOTALTRACKS", "TRACKTOTAL"])),
];

/// Find the rule for a lower-cased variable name.
pub fn lookup(name: &str) -> Option<MagicRule> {
    MAGIC
        .iter()
        .find(|(key, _)| *key == name)
        .map(|&(_, rule)| rule)
}

/// Names that have a fallback rule.
pub fn names() -> impl Iterator<Item = &'static str> {
    MAGIC.iter().map(|&(key, _)| key)
}

impl MagicRule {
    pub fn apply(self, track: &dyn Track, options: &Options) -> Atom {
        match self {
            MagicRule::Candidates(candidates) => first_present(track, candidates, options)
                .map(|(_, value)| Atom::found(value))
                .unwrap_or_default(),
            MagicRule::Procedure(procedure) => procedure(track, options),
        }
    }
}

/// Fetch a field by its canonical upper-case name.
///
/// When running case-sensitive the name is also tried in lower case.
pub fn fetch(track: &dyn Track, name: &str, options: &Options) -> Option<String> {
    if let Some(value) = track.get(name) {
        return Some(value.into_owned());
    }
    if options.case_sensitive {
        let lower = name.to_lowercase();
        if track.contains(&lower) {
            return track.get(&lower).map(|v| v.into_owned());
        }
    }
    None
}

fn first_present(
    track: &dyn Track,
    candidates: &[&'static str],
    options: &Options,
) -> Option<(&'static str, String)> {
    candidates.iter().find_map(|&candidate| {
        let value = fetch(track, candidate, options)?;
        trace!(candidate, "magic candidate matched");
        Some((candidate, value))
    })
}

/// `ARTIST`, but only when it differs from `ALBUM ARTIST`.
fn track_artist(track: &dyn Track, options: &Options) -> Atom {
    let Some(artist) = fetch(track, "ARTIST", options) else {
        return Atom::absent();
    };
    match fetch(track, "ALBUM ARTIST", options) {
        Some(album_artist) if album_artist == artist => Atom::absent(),
        _ => Atom::found(artist),
    }
}

/// `TRACKNUMBER` or `TRACK`, without any `/total` suffix, zero-padded to two
/// digits when numeric.
fn track_number(track: &dyn Track, options: &Options) -> Atom {
    let Some((_, raw)) = first_present(track, &["TRACKNUMBER", "TRACK"], options) else {
        return Atom::absent();
    };
    let number = raw.split('/').next().unwrap_or_default().trim();
    if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) && number.len() < 2 {
        Atom::found(format!("0{number}"))
    } else {
        Atom::found(number)
    }
}

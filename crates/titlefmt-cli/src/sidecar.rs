//! Tag sidecar files: per-track field values stored as JSON.
//!
//! A sidecar is an array with one object per track, in order:
//!
//! ```json
//! [
//!   { "artist": "Collective Soul", "album": "Disciplined Breakdown", "title": "Precious Declaration" },
//!   { "title": "Listen" },
//!   { "title": "Maybe", "album": [] }
//! ]
//! ```
//!
//! Values carry over: a field set on one track stays set on the tracks that
//! follow until it is overridden. An empty array or `null` erases the field
//! from that track on. Arrays of values are joined with `", "`.

use std::fs::read_to_string;
use std::io;
use std::path::Path;

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;
use titlefmt::TrackFields;
use tracing::debug;

/// Errors from reading a tag sidecar.
#[derive(Debug, Error, Diagnostic)]
pub enum SidecarError {
    #[error("cannot read tag file {path}")]
    #[diagnostic(code(titlefmt::sidecar::io))]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("tag file {path} is not valid JSON")]
    #[diagnostic(code(titlefmt::sidecar::syntax))]
    Syntax {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("tag file {path} must contain an array of tracks")]
    #[diagnostic(code(titlefmt::sidecar::shape))]
    NotAnArray { path: String },

    #[error("track {track} in {path} is not an object")]
    #[diagnostic(code(titlefmt::sidecar::shape))]
    NotAnObject { path: String, track: usize },

    #[error("field '{field}' of track {track} in {path} has an unsupported value")]
    #[diagnostic(
        code(titlefmt::sidecar::value),
        help("use a string, number, boolean, null, or an array of those")
    )]
    UnsupportedValue {
        path: String,
        track: usize,
        field: String,
    },
}

/// How one sidecar entry changes a field.
enum FieldUpdate {
    Set(String),
    Erase,
}

/// Normalize a field name for lookup: upper-cased unless case-sensitive.
pub fn normalize_name(name: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        name.to_string()
    } else {
        name.to_uppercase()
    }
}

/// Read a sidecar file into one field set per track.
pub fn load_sidecar(path: &Path, case_sensitive: bool) -> Result<Vec<TrackFields>, SidecarError> {
    let name = path.display().to_string();
    let content = read_to_string(path).map_err(|source| SidecarError::Io {
        path: name.clone(),
        source,
    })?;
    parse_sidecar(&content, &name, case_sensitive)
}

/// Parse sidecar text. `name` identifies the source in errors.
pub fn parse_sidecar(
    content: &str,
    name: &str,
    case_sensitive: bool,
) -> Result<Vec<TrackFields>, SidecarError> {
    let value: Value = serde_json::from_str(content).map_err(|source| SidecarError::Syntax {
        path: name.to_string(),
        source,
    })?;
    let Value::Array(entries) = value else {
        return Err(SidecarError::NotAnArray {
            path: name.to_string(),
        });
    };

    let mut current = TrackFields::new();
    let mut tracks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let track = index + 1;
        let Value::Object(fields) = entry else {
            return Err(SidecarError::NotAnObject {
                path: name.to_string(),
                track,
            });
        };
        for (field, value) in fields {
            let key = normalize_name(&field, case_sensitive);
            match field_update(value) {
                Some(FieldUpdate::Set(text)) => current.insert(key, text),
                Some(FieldUpdate::Erase) => {
                    debug!(track, field = %key, "erasing field");
                    current.remove(&key);
                }
                None => {
                    return Err(SidecarError::UnsupportedValue {
                        path: name.to_string(),
                        track,
                        field,
                    });
                }
            }
        }
        tracks.push(current.clone());
    }
    debug!(path = name, tracks = tracks.len(), "loaded tag sidecar");
    Ok(tracks)
}

fn field_update(value: Value) -> Option<FieldUpdate> {
    match value {
        Value::Null => Some(FieldUpdate::Erase),
        Value::Array(items) if items.is_empty() => Some(FieldUpdate::Erase),
        Value::Array(items) => items
            .into_iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(|values| FieldUpdate::Set(values.join(", "))),
        Value::Object(_) => None,
        scalar => scalar_text(scalar).map(FieldUpdate::Set),
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

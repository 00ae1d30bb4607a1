use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read access to one track's metadata fields.
///
/// Field names reach a track already normalized: upper-cased unless the
/// formatter runs case-sensitive. A track must not change while a template
/// is being evaluated against it.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use titlefmt::Track;
///
/// let fields = HashMap::from([("TITLE".to_string(), "This".to_string())]);
/// assert!(fields.contains("TITLE"));
/// assert_eq!(Track::get(&fields, "TITLE").as_deref(), Some("This"));
/// assert_eq!(Track::get(&fields, "ARTIST"), None);
/// ```
pub trait Track {
    /// Returns true if the field exists, even with an empty value.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the field's value, if present.
    fn get(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<S: BuildHasher> Track for HashMap<String, String, S> {
    fn contains(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        HashMap::get(self, name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl Track for BTreeMap<String, String> {
    fn contains(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        BTreeMap::get(self, name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl<T: Track + ?Sized> Track for &T {
    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }

    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).get(name)
    }
}

/// An insertion-ordered set of fields for one track.
///
/// Setting an existing field replaces its value in place, so the original
/// order is kept.
///
/// # Example
///
/// ```
/// use titlefmt::{Track, TrackFields};
///
/// let track = TrackFields::new()
///     .with("ARTIST", "Collective Soul")
///     .with("TITLE", "This");
/// assert_eq!(track.get("ARTIST").as_deref(), Some("Collective Soul"));
/// assert_eq!(track.names().collect::<Vec<_>>(), ["ARTIST", "TITLE"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackFields {
    fields: Vec<(String, String)>,
}

impl TrackFields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Remove a field, returning its value if it was set.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(index).1)
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Track for TrackFields {
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| Cow::Borrowed(v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TrackFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = TrackFields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

use std::fmt::{Display, Formatter, Result as FmtResult};

/// The result of every evaluation step: a value paired with a truth flag.
///
/// Truth is independent of the value's text. A field that exists with an
/// empty value is `Some("")` and true, literal text is present and false, and
/// a missing field is absent and false.
///
/// # Example
///
/// ```
/// use titlefmt::Atom;
///
/// let field = Atom::found("");
/// assert!(field.truth);
/// assert!(field.is_present());
///
/// let missing = Atom::absent();
/// assert!(!missing.truth);
/// assert_eq!(missing.as_str(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Atom {
    /// The rendered text, or `None` when nothing was produced.
    pub value: Option<String>,
    /// Whether the step counts as true for conditional functions.
    pub truth: bool,
}

impl Atom {
    /// Create an atom from its parts.
    pub fn new(value: impl Into<String>, truth: bool) -> Self {
        Self {
            value: Some(value.into()),
            truth,
        }
    }

    /// Nothing produced, false.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Literal text: present and false.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::new(value, false)
    }

    /// A found field or computed result: present and true.
    pub fn found(value: impl Into<String>) -> Self {
        Self::new(value, true)
    }

    /// A pure truth value that renders as empty text.
    ///
    /// True is an empty present value, false is absent, so a false test
    /// never keeps a surrounding conditional block alive.
    pub fn boolean(truth: bool) -> Self {
        if truth { Self::found("") } else { Self::absent() }
    }

    /// Returns true if a value was produced.
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// The rendered text, empty when absent.
    pub fn as_str(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// Consume the atom, returning its rendered text.
    pub fn into_string(self) -> String {
        self.value.unwrap_or_default()
    }

    /// Replace the value, keeping presence and truth.
    pub fn map_value(self, f: impl FnOnce(String) -> String) -> Self {
        Self {
            value: self.value.map(f),
            truth: self.truth,
        }
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

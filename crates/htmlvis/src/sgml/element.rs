//! Tokens, elements and their attributes.

/// Insertion-ordered attribute mapping of an SGML element.
///
/// Order matters: value-triggered directives pick the first attribute whose
/// value matches. Re-inserting an existing name keeps its position and
/// replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Find the first attribute carrying `value`, returning its name.
    #[must_use]
    pub fn find_value(&self, value: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| v == value)
            .map(|(n, _)| n.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Keep only the attributes for which `keep` returns true.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|(n, _)| keep(n));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Attributes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A non-tag line of the document.
///
/// `text` starts out as the raw line and is rewritten in place while
/// directives are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    /// 0-based position among the document's tokens.
    pub position: usize,
    /// Current text of the token slot.
    pub text: String,
}

impl Token {
    #[must_use]
    pub fn new(position: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}

/// A closed SGML element spanning the tokens `open..=close`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attributes in source order.
    pub attrs: Attributes,
    /// Position of the first covered token.
    pub open: usize,
    /// Position of the last covered token.
    pub close: usize,
}

impl Element {
    /// Create an element covering `open..=close`.
    #[must_use]
    pub fn new(name: impl Into<String>, attrs: Attributes, open: usize, close: usize) -> Self {
        debug_assert!(open <= close, "element span must not be inverted");
        Self {
            name: name.into(),
            attrs,
            open,
            close,
        }
    }

    /// Number of token positions between the opening and closing slot.
    #[must_use]
    pub fn span_len(&self) -> usize {
        self.close - self.open
    }

    /// Value of the attribute named like the element itself.
    #[must_use]
    pub fn own_value(&self) -> Option<&str> {
        self.attrs.get(&self.name)
    }
}

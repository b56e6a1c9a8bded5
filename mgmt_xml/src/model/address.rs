//! Management tree addresses
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// One `key=value` segment of a management address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathElement {
    pub key: String,
    pub value: String,
}

impl PathElement {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl Serialize for PathElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// Immutable sequence of path elements
///
/// Every mutator returns a new address, so an address handed to a child
/// translator can never be changed underneath its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathAddress {
    elements: Vec<PathElement>,
}

impl PathAddress {
    /// The root address (no segments)
    pub fn root() -> Self {
        Self::default()
    }

    /// New address with one more segment
    pub fn append(&self, key: &str, value: &str) -> Self {
        let mut elements = self.elements.clone();
        elements.push(PathElement::new(key, value));
        Self { elements }
    }

    /// `owner` followed by this address's segments, in order
    pub fn prefixed_by(&self, owner: &PathAddress) -> Self {
        let mut elements = Vec::with_capacity(owner.len() + self.len());
        elements.extend(owner.elements.iter().cloned());
        elements.extend(self.elements.iter().cloned());
        Self { elements }
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// True when `self` is a proper ancestor of `other`
    pub fn is_strict_prefix_of(&self, other: &PathAddress) -> bool {
        self.len() < other.len() && other.elements[..self.len()] == self.elements[..]
    }
}

impl fmt::Display for PathAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return f.write_str("/");
        }
        for element in &self.elements {
            write!(f, "/{}", element)?;
        }
        Ok(())
    }
}

impl Serialize for PathAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.elements.len()))?;
        for element in &self.elements {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

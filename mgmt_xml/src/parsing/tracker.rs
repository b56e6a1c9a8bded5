//! Per-scope cardinality tracking
//!
//! Both trackers live on the stack frame of the translator for one scope and
//! are dropped when that scope closes.

use super::error::{ParseError, ParseResult};
use crate::grammar::Element;
use crate::utils::Position;
use std::collections::HashSet;

/// Small set of element kinds, one bit per [`Element`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementSet(u64);

impl ElementSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn of(elements: &[Element]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < elements.len() {
            bits |= 1u64 << elements[i].index();
            i += 1;
        }
        Self(bits)
    }

    /// Add `element`, returning false when it was already present
    pub fn insert(&mut self, element: Element) -> bool {
        let bit = 1u64 << element.index();
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    pub fn contains(&self, element: Element) -> bool {
        self.0 & (1u64 << element.index()) != 0
    }

    pub fn intersects(&self, other: ElementSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Record a singleton child, failing on its second occurrence
    pub fn require_once(&mut self, element: Element, position: Position) -> ParseResult<()> {
        if self.insert(element) {
            Ok(())
        } else {
            Err(ParseError::duplicate_element(element.local_name(), position))
        }
    }

    /// Record a member of an exclusive group.
    ///
    /// Fails when any member of `group` was seen before, naming the whole group.
    pub fn require_exclusive(
        &mut self,
        element: Element,
        group: &[Element],
        position: Position,
    ) -> ParseResult<()> {
        if self.intersects(ElementSet::of(group)) {
            let names: Vec<&str> = group.iter().map(|e| e.local_name()).collect();
            return Err(ParseError::exclusive_violation(
                element.local_name(),
                &names,
                position,
            ));
        }
        self.insert(element);
        Ok(())
    }
}

/// Discriminator values already used within one list scope
#[derive(Debug, Default)]
pub struct NameSet {
    names: HashSet<String>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, element: Element, name: &str, position: Position) -> ParseResult<()> {
        if self.names.insert(name.to_string()) {
            Ok(())
        } else {
            Err(ParseError::duplicate_name(element.local_name(), name, position))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SOURCES: &[Element] = &[
        Element::Jaas,
        Element::Ldap,
        Element::Properties,
        Element::Users,
        Element::PlugIn,
    ];

    #[test]
    fn test_insert_and_contains() {
        let mut set = ElementSet::empty();
        assert!(set.is_empty());
        assert!(set.insert(Element::Cache));
        assert!(!set.insert(Element::Cache));
        assert!(set.contains(Element::Cache));
        assert!(!set.contains(Element::Keytab));
    }

    #[test]
    fn test_require_once() {
        let mut set = ElementSet::empty();
        set.require_once(Element::Truststore, Position::start()).unwrap();
        assert_matches!(
            set.require_once(Element::Truststore, Position::start()),
            Err(ParseError::DuplicateElement { ref element, .. }) if element == "truststore"
        );
    }

    #[test]
    fn test_exclusive_group_names_every_alternative() {
        let mut set = ElementSet::empty();
        set.require_once(Element::Local, Position::start()).unwrap();
        set.require_exclusive(Element::Users, SOURCES, Position::start())
            .unwrap();

        let err = set
            .require_exclusive(Element::Jaas, SOURCES, Position::start())
            .unwrap_err();
        assert_matches!(err, ParseError::ExclusiveViolation { element, alternatives, .. } => {
            assert_eq!(element, "jaas");
            assert_eq!(alternatives, vec!["jaas", "ldap", "properties", "users", "plug-in"]);
        });
    }

    #[test]
    fn test_name_set() {
        let mut names = NameSet::new();
        names.claim(Element::User, "admin", Position::start()).unwrap();
        names.claim(Element::User, "guest", Position::start()).unwrap();
        assert_matches!(
            names.claim(Element::User, "admin", Position::start()),
            Err(ParseError::DuplicateName { .. })
        );
    }
}

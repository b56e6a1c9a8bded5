//! Grammar versions understood by the translator
use serde::{Deserialize, Serialize};
use std::fmt;

/// Management grammar namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    Domain4_0,
    Domain4_1,
    Domain4_2,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [Self::Domain4_0, Self::Domain4_1, Self::Domain4_2];

    pub const fn uri(self) -> &'static str {
        match self {
            Self::Domain4_0 => "urn:jboss:domain:4.0",
            Self::Domain4_1 => "urn:jboss:domain:4.1",
            Self::Domain4_2 => "urn:jboss:domain:4.2",
        }
    }

    pub fn for_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:jboss:domain:4.0" => Some(Self::Domain4_0),
            "urn:jboss:domain:4.1" => Some(Self::Domain4_1),
            "urn:jboss:domain:4.2" => Some(Self::Domain4_2),
            _ => None,
        }
    }

    /// Major and minor schema version
    pub const fn version(self) -> (u32, u32) {
        match self {
            Self::Domain4_0 => (4, 0),
            Self::Domain4_1 => (4, 1),
            Self::Domain4_2 => (4, 2),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_lookup() {
        for namespace in Namespace::ALL {
            assert_eq!(Namespace::for_uri(namespace.uri()), Some(namespace));
            assert_eq!(namespace.version().0, 4);
        }
        assert_eq!(Namespace::for_uri("urn:jboss:domain:3.0"), None);
        assert_eq!(Namespace::for_uri("urn:jboss:domain:5.0"), None);
    }
}

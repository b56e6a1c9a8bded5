//! Element names of the management grammar
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Element {
    // === DOCUMENT ROOTS ===
    Server,
    Host,
    Domain,
    Management,

    // === MANAGEMENT CATEGORIES ===
    SecurityRealms,
    OutboundConnections,
    ManagementInterfaces,
    AuditLog,
    AccessControl,
    ConfigurationChanges,

    // === REALM STRUCTURE ===
    SecurityRealm,
    PlugIns,
    PlugIn,
    ServerIdentities,
    Secret,
    Ssl,
    Engine,
    Keystore,
    Kerberos,
    Keytab,
    Authentication,
    Authorization,

    // === AUTHENTICATION SOURCES ===
    Truststore,
    Local,
    Jaas,
    Ldap,
    Properties,
    Property,
    Users,
    User,
    Password,

    // === LDAP SEARCHES ===
    Cache,
    AdvancedFilter,
    UsernameFilter,
    UsernameIsDn,
    UsernameToDn,
    GroupSearch,
    GroupToPrincipal,
    PrincipalToGroup,
    MembershipFilter,

    Unknown,
}

impl Element {
    pub const fn local_name(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Host => "host",
            Self::Domain => "domain",
            Self::Management => "management",
            Self::SecurityRealms => "security-realms",
            Self::OutboundConnections => "outbound-connections",
            Self::ManagementInterfaces => "management-interfaces",
            Self::AuditLog => "audit-log",
            Self::AccessControl => "access-control",
            Self::ConfigurationChanges => "configuration-changes",
            Self::SecurityRealm => "security-realm",
            Self::PlugIns => "plug-ins",
            Self::PlugIn => "plug-in",
            Self::ServerIdentities => "server-identities",
            Self::Secret => "secret",
            Self::Ssl => "ssl",
            Self::Engine => "engine",
            Self::Keystore => "keystore",
            Self::Kerberos => "kerberos",
            Self::Keytab => "keytab",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::Truststore => "truststore",
            Self::Local => "local",
            Self::Jaas => "jaas",
            Self::Ldap => "ldap",
            Self::Properties => "properties",
            Self::Property => "property",
            Self::Users => "users",
            Self::User => "user",
            Self::Password => "password",
            Self::Cache => "cache",
            Self::AdvancedFilter => "advanced-filter",
            Self::UsernameFilter => "username-filter",
            Self::UsernameIsDn => "username-is-dn",
            Self::UsernameToDn => "username-to-dn",
            Self::GroupSearch => "group-search",
            Self::GroupToPrincipal => "group-to-principal",
            Self::PrincipalToGroup => "principal-to-group",
            Self::MembershipFilter => "membership-filter",
            Self::Unknown => "unknown",
        }
    }

    /// Look up an element by local name; unrecognized names map to `Unknown`
    pub fn for_name(name: &str) -> Self {
        match name {
            "server" => Self::Server,
            "host" => Self::Host,
            "domain" => Self::Domain,
            "management" => Self::Management,
            "security-realms" => Self::SecurityRealms,
            "outbound-connections" => Self::OutboundConnections,
            "management-interfaces" => Self::ManagementInterfaces,
            "audit-log" => Self::AuditLog,
            "access-control" => Self::AccessControl,
            "configuration-changes" => Self::ConfigurationChanges,
            "security-realm" => Self::SecurityRealm,
            "plug-ins" => Self::PlugIns,
            "plug-in" => Self::PlugIn,
            "server-identities" => Self::ServerIdentities,
            "secret" => Self::Secret,
            "ssl" => Self::Ssl,
            "engine" => Self::Engine,
            "keystore" => Self::Keystore,
            "kerberos" => Self::Kerberos,
            "keytab" => Self::Keytab,
            "authentication" => Self::Authentication,
            "authorization" => Self::Authorization,
            "truststore" => Self::Truststore,
            "local" => Self::Local,
            "jaas" => Self::Jaas,
            "ldap" => Self::Ldap,
            "properties" => Self::Properties,
            "property" => Self::Property,
            "users" => Self::Users,
            "user" => Self::User,
            "password" => Self::Password,
            "cache" => Self::Cache,
            "advanced-filter" => Self::AdvancedFilter,
            "username-filter" => Self::UsernameFilter,
            "username-is-dn" => Self::UsernameIsDn,
            "username-to-dn" => Self::UsernameToDn,
            "group-search" => Self::GroupSearch,
            "group-to-principal" => Self::GroupToPrincipal,
            "principal-to-group" => Self::PrincipalToGroup,
            "membership-filter" => Self::MembershipFilter,
            _ => Self::Unknown,
        }
    }

    /// Bit index used by per-scope element sets
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Documents may wrap the management element in one of these roots
    pub const fn is_document_root(self) -> bool {
        matches!(self, Self::Server | Self::Host | Self::Domain)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        let names = [
            "management",
            "security-realm",
            "outbound-connections",
            "username-is-dn",
            "membership-filter",
            "password",
        ];
        for name in names {
            assert_eq!(Element::for_name(name).local_name(), name);
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(Element::for_name("bogus"), Element::Unknown);
        assert_eq!(Element::for_name("Security-Realm"), Element::Unknown);
        assert_eq!(Element::for_name(""), Element::Unknown);
    }

    #[test]
    fn test_indices_fit_in_a_word() {
        assert!(Element::Unknown.index() < 64);
    }
}

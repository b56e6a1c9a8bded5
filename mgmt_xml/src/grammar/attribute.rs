//! Attribute names of the management grammar
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    // === COMMON ===
    Name,
    Value,
    Path,
    RelativeTo,
    Module,

    // === CONFIGURATION CHANGES ===
    MaxHistory,

    // === OUTBOUND CONNECTIONS ===
    Url,
    SearchDn,
    SearchCredential,
    SecurityRealm,
    InitialContextFactory,
    Referrals,
    HandlesReferralsFor,

    // === SERVER IDENTITIES ===
    Protocol,
    EnabledCipherSuites,
    EnabledProtocols,
    Provider,
    KeystorePassword,
    Alias,
    KeyPassword,
    GenerateSelfSignedCertificateHost,
    Principal,
    ForHosts,
    Debug,

    // === AUTHENTICATION ===
    RemoveRealm,
    AssignGroups,
    Connection,
    BaseDn,
    Recursive,
    UserDn,
    AllowEmptyPasswords,
    UsernameLoad,
    Filter,
    Attribute,
    DefaultUser,
    AllowedUsers,
    SkipGroupLoading,
    PlainText,
    Username,
    Mechanism,

    // === CACHE ===
    Type,
    EvictionTime,
    CacheFailures,
    MaxCacheSize,

    // === AUTHORIZATION ===
    MapGroupsToRoles,
    Force,
    UserDnAttribute,
    GroupName,
    Iterative,
    GroupDnAttribute,
    GroupNameAttribute,
    SearchBy,
    PreferOriginalConnection,
    PrincipalAttribute,
    GroupAttribute,
    SkipMissingGroups,

    Unknown,
}

impl Attribute {
    pub const fn local_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Value => "value",
            Self::Path => "path",
            Self::RelativeTo => "relative-to",
            Self::Module => "module",
            Self::MaxHistory => "max-history",
            Self::Url => "url",
            Self::SearchDn => "search-dn",
            Self::SearchCredential => "search-credential",
            Self::SecurityRealm => "security-realm",
            Self::InitialContextFactory => "initial-context-factory",
            Self::Referrals => "referrals",
            Self::HandlesReferralsFor => "handles-referrals-for",
            Self::Protocol => "protocol",
            Self::EnabledCipherSuites => "enabled-cipher-suites",
            Self::EnabledProtocols => "enabled-protocols",
            Self::Provider => "provider",
            Self::KeystorePassword => "keystore-password",
            Self::Alias => "alias",
            Self::KeyPassword => "key-password",
            Self::GenerateSelfSignedCertificateHost => "generate-self-signed-certificate-host",
            Self::Principal => "principal",
            Self::ForHosts => "for-hosts",
            Self::Debug => "debug",
            Self::RemoveRealm => "remove-realm",
            Self::AssignGroups => "assign-groups",
            Self::Connection => "connection",
            Self::BaseDn => "base-dn",
            Self::Recursive => "recursive",
            Self::UserDn => "user-dn",
            Self::AllowEmptyPasswords => "allow-empty-passwords",
            Self::UsernameLoad => "username-load",
            Self::Filter => "filter",
            Self::Attribute => "attribute",
            Self::DefaultUser => "default-user",
            Self::AllowedUsers => "allowed-users",
            Self::SkipGroupLoading => "skip-group-loading",
            Self::PlainText => "plain-text",
            Self::Username => "username",
            Self::Mechanism => "mechanism",
            Self::Type => "type",
            Self::EvictionTime => "eviction-time",
            Self::CacheFailures => "cache-failures",
            Self::MaxCacheSize => "max-cache-size",
            Self::MapGroupsToRoles => "map-groups-to-roles",
            Self::Force => "force",
            Self::UserDnAttribute => "user-dn-attribute",
            Self::GroupName => "group-name",
            Self::Iterative => "iterative",
            Self::GroupDnAttribute => "group-dn-attribute",
            Self::GroupNameAttribute => "group-name-attribute",
            Self::SearchBy => "search-by",
            Self::PreferOriginalConnection => "prefer-original-connection",
            Self::PrincipalAttribute => "principal-attribute",
            Self::GroupAttribute => "group-attribute",
            Self::SkipMissingGroups => "skip-missing-groups",
            Self::Unknown => "unknown",
        }
    }

    /// Look up an attribute by local name; unrecognized names map to `Unknown`
    pub fn for_name(name: &str) -> Self {
        match name {
            "name" => Self::Name,
            "value" => Self::Value,
            "path" => Self::Path,
            "relative-to" => Self::RelativeTo,
            "module" => Self::Module,
            "max-history" => Self::MaxHistory,
            "url" => Self::Url,
            "search-dn" => Self::SearchDn,
            "search-credential" => Self::SearchCredential,
            "security-realm" => Self::SecurityRealm,
            "initial-context-factory" => Self::InitialContextFactory,
            "referrals" => Self::Referrals,
            "handles-referrals-for" => Self::HandlesReferralsFor,
            "protocol" => Self::Protocol,
            "enabled-cipher-suites" => Self::EnabledCipherSuites,
            "enabled-protocols" => Self::EnabledProtocols,
            "provider" => Self::Provider,
            "keystore-password" => Self::KeystorePassword,
            "alias" => Self::Alias,
            "key-password" => Self::KeyPassword,
            "generate-self-signed-certificate-host" => Self::GenerateSelfSignedCertificateHost,
            "principal" => Self::Principal,
            "for-hosts" => Self::ForHosts,
            "debug" => Self::Debug,
            "remove-realm" => Self::RemoveRealm,
            "assign-groups" => Self::AssignGroups,
            "connection" => Self::Connection,
            "base-dn" => Self::BaseDn,
            "recursive" => Self::Recursive,
            "user-dn" => Self::UserDn,
            "allow-empty-passwords" => Self::AllowEmptyPasswords,
            "username-load" => Self::UsernameLoad,
            "filter" => Self::Filter,
            "attribute" => Self::Attribute,
            "default-user" => Self::DefaultUser,
            "allowed-users" => Self::AllowedUsers,
            "skip-group-loading" => Self::SkipGroupLoading,
            "plain-text" => Self::PlainText,
            "username" => Self::Username,
            "mechanism" => Self::Mechanism,
            "type" => Self::Type,
            "eviction-time" => Self::EvictionTime,
            "cache-failures" => Self::CacheFailures,
            "max-cache-size" => Self::MaxCacheSize,
            "map-groups-to-roles" => Self::MapGroupsToRoles,
            "force" => Self::Force,
            "user-dn-attribute" => Self::UserDnAttribute,
            "group-name" => Self::GroupName,
            "iterative" => Self::Iterative,
            "group-dn-attribute" => Self::GroupDnAttribute,
            "group-name-attribute" => Self::GroupNameAttribute,
            "search-by" => Self::SearchBy,
            "prefer-original-connection" => Self::PreferOriginalConnection,
            "principal-attribute" => Self::PrincipalAttribute,
            "group-attribute" => Self::GroupAttribute,
            "skip-missing-groups" => Self::SkipMissingGroups,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Attribute {
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
            "name",
            "handles-referrals-for",
            "generate-self-signed-certificate-host",
            "map-groups-to-roles",
            "skip-missing-groups",
        ];
        for name in names {
            assert_eq!(Attribute::for_name(name).local_name(), name);
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(Attribute::for_name("bogus"), Attribute::Unknown);
        assert_eq!(Attribute::for_name("NAME"), Attribute::Unknown);
    }
}

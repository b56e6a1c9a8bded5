//! Management tree addresses and the add commands produced for them

pub mod address;
pub mod list;
pub mod operation;

pub use address::{PathAddress, PathElement};
pub use list::{CapacityError, OperationList};
pub use operation::{Operation, ParamValue, Parameters, PendingOperation, ADD};

/// Well-known address keys and values
pub mod keys {
    pub const HOST: &str = "host";
    pub const CORE_SERVICE: &str = "core-service";
    pub const MANAGEMENT: &str = "management";
    pub const SERVICE: &str = "service";
    pub const CONFIGURATION_CHANGES: &str = "configuration-changes";
    pub const LDAP_CONNECTION: &str = "ldap-connection";
    pub const PROPERTY: &str = "property";
    pub const SECURITY_REALM: &str = "security-realm";
    pub const PLUG_IN: &str = "plug-in";
    pub const SERVER_IDENTITY: &str = "server-identity";
    pub const SECRET: &str = "secret";
    pub const SSL: &str = "ssl";
    pub const KERBEROS: &str = "kerberos";
    pub const KEYTAB: &str = "keytab";
    pub const AUTHENTICATION: &str = "authentication";
    pub const AUTHORIZATION: &str = "authorization";
    pub const TRUSTSTORE: &str = "truststore";
    pub const LOCAL: &str = "local";
    pub const JAAS: &str = "jaas";
    pub const LDAP: &str = "ldap";
    pub const PROPERTIES: &str = "properties";
    pub const USERS: &str = "users";
    pub const USER: &str = "user";
    pub const USERNAME_TO_DN: &str = "username-to-dn";
    pub const USERNAME_IS_DN: &str = "username-is-dn";
    pub const USERNAME_FILTER: &str = "username-filter";
    pub const ADVANCED_FILTER: &str = "advanced-filter";
    pub const GROUP_SEARCH: &str = "group-search";
    pub const GROUP_TO_PRINCIPAL: &str = "group-to-principal";
    pub const PRINCIPAL_TO_GROUP: &str = "principal-to-group";
    pub const CACHE: &str = "cache";
    pub const BY_SEARCH_TIME: &str = "by-search-time";
    pub const BY_ACCESS_TIME: &str = "by-access-time";
}

//! Naming contexts that seed the directory tree.

use std::fmt;

/// The well-known partitions under a domain root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingContext {
    /// The domain partition itself.
    Domain,
    /// `CN=Configuration`
    Configuration,
    /// `CN=Schema,CN=Configuration`
    Schema,
    /// `DC=DomainDnsZones`
    DomainDnsZones,
    /// `DC=ForestDnsZones`
    ForestDnsZones,
}

impl NamingContext {
    /// All contexts in the order roots are displayed.
    #[must_use]
    pub const fn all() -> &'static [NamingContext] {
        &[
            NamingContext::Domain,
            NamingContext::Configuration,
            NamingContext::Schema,
            NamingContext::DomainDnsZones,
            NamingContext::ForestDnsZones,
        ]
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            NamingContext::Domain => "domain",
            NamingContext::Configuration => "configuration",
            NamingContext::Schema => "schema",
            NamingContext::DomainDnsZones => "domain-dns-zones",
            NamingContext::ForestDnsZones => "forest-dns-zones",
        }
    }

    /// RDNs placed in front of the domain root, if any.
    #[must_use]
    pub const fn prefix(&self) -> Option<&'static str> {
        match self {
            NamingContext::Domain => None,
            NamingContext::Configuration => Some("CN=Configuration"),
            NamingContext::Schema => Some("CN=Schema,CN=Configuration"),
            NamingContext::DomainDnsZones => Some("DC=DomainDnsZones"),
            NamingContext::ForestDnsZones => Some("DC=ForestDnsZones"),
        }
    }

    /// DN of this context under `root_dn`.
    ///
    /// The root is used exactly as the backend reported it, so the searchbase
    /// always matches the backend's own spelling.
    #[must_use]
    pub fn dn_for(&self, root_dn: &str) -> String {
        match self.prefix() {
            Some(prefix) => format!("{prefix},{root_dn}"),
            None => root_dn.to_string(),
        }
    }
}

impl fmt::Display for NamingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

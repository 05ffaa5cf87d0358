//! Backend API endpoints consumed by the console.

/// Endpoints exposed by the console backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
    /// Domain root DN and names
    DomainInfo,
    /// Directory object query
    DomainObject,
    /// Backend connection status
    Status,
    /// Command log feed
    Logs,
}

impl ApiEndpoint {
    /// Returns the endpoint name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DomainInfo => "domaininfo",
            Self::DomainObject => "domainobject",
            Self::Status => "status",
            Self::Logs => "logs",
        }
    }

    /// Path relative to the console base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::DomainInfo => "api/get/domaininfo",
            Self::DomainObject => "api/get/domainobject",
            Self::Status => "api/status",
            Self::Logs => "api/logs",
        }
    }

    /// Returns true if the endpoint is called with a JSON POST body.
    #[must_use]
    pub const fn is_post(&self) -> bool {
        matches!(self, Self::DomainObject)
    }
}

impl std::fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

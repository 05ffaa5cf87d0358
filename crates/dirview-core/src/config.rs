//! Console configuration.
//!
//! Controls where the console backend lives, how the HTTP transport is set up,
//! how often the background pollers run, and how long banners stay visible.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default status poll interval in seconds.
pub const DEFAULT_STATUS_INTERVAL_SECS: u64 = 30;

/// Default incremental log poll interval in seconds.
pub const DEFAULT_LOGS_INTERVAL_SECS: u64 = 10;

/// Default time before an alert banner hides itself, in seconds.
pub const DEFAULT_ALERT_DISMISS_SECS: u64 = 5;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration for a console instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConsoleConfig {
    /// Base URL of the console backend (the `/api/...` routes hang off it)
    #[validate(url)]
    pub api_url: String,

    /// Optional whole-request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Connect timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Log every request at info level (debug otherwise)
    #[serde(default = "default_log_requests")]
    pub log_requests: bool,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<std::path::PathBuf>,

    /// Seconds before a success/error banner hides itself
    #[validate(range(min = 1, max = 60))]
    #[serde(default = "default_alert_dismiss_secs")]
    pub alert_dismiss_secs: u64,

    /// Background polling configuration
    #[validate(nested)]
    #[serde(default)]
    pub polling: PollingConfig,
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

const fn default_log_requests() -> bool {
    true
}

const fn default_alert_dismiss_secs() -> u64 {
    DEFAULT_ALERT_DISMISS_SECS
}

impl ConsoleConfig {
    /// Create a new configuration for the given backend URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(api_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            api_url: api_url.into(),
            ..Self::default()
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Parse a JSON configuration document and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or fails validation.
    pub fn from_json(document: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(document)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration document: {e}")))?;
        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;
        Ok(config)
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = Some(seconds);
        self
    }

    /// Set connect timeout in seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout_secs = seconds;
        self
    }

    /// Log requests at info level, or at debug level when disabled.
    #[must_use]
    pub const fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: std::path::PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set how long banners stay visible.
    #[must_use]
    pub const fn with_alert_dismiss(mut self, seconds: u64) -> Self {
        self.alert_dismiss_secs = seconds;
        self
    }

    /// Set polling configuration.
    #[must_use]
    pub const fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    /// Get the request timeout as a Duration, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Get the banner dismissal delay as a Duration.
    #[must_use]
    pub const fn alert_dismiss(&self) -> Duration {
        Duration::from_secs(self.alert_dismiss_secs)
    }

    /// Get the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Parse and validate the backend URL.
    ///
    /// The returned URL always ends with `/` so relative API paths join under it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_api_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| Error::ConfigError(format!("Invalid API URL: {e}")))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            request_timeout_secs: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            log_requests: default_log_requests(),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            alert_dismiss_secs: default_alert_dismiss_secs(),
            polling: PollingConfig::default(),
        }
    }
}

/// Configuration for the background pollers.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PollingConfig {
    /// Whether the pollers run at all
    #[serde(default = "default_polling_enabled")]
    pub enabled: bool,

    /// Status poll interval in seconds
    #[validate(range(min = 1, max = 3600))]
    #[serde(default = "default_status_interval_secs")]
    pub status_interval_secs: u64,

    /// Incremental log poll interval in seconds
    #[validate(range(min = 1, max = 3600))]
    #[serde(default = "default_logs_interval_secs")]
    pub logs_interval_secs: u64,
}

const fn default_polling_enabled() -> bool {
    true
}

const fn default_status_interval_secs() -> u64 {
    DEFAULT_STATUS_INTERVAL_SECS
}

const fn default_logs_interval_secs() -> u64 {
    DEFAULT_LOGS_INTERVAL_SECS
}

impl PollingConfig {
    /// Create a polling configuration with defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: default_polling_enabled(),
            status_interval_secs: default_status_interval_secs(),
            logs_interval_secs: default_logs_interval_secs(),
        }
    }

    /// Disable background polling.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Set the status poll interval in seconds.
    #[must_use]
    pub const fn with_status_interval(mut self, seconds: u64) -> Self {
        self.status_interval_secs = seconds;
        self
    }

    /// Set the log poll interval in seconds.
    #[must_use]
    pub const fn with_logs_interval(mut self, seconds: u64) -> Self {
        self.logs_interval_secs = seconds;
        self
    }

    /// Status poll interval as a Duration.
    #[must_use]
    pub const fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs)
    }

    /// Log poll interval as a Duration.
    #[must_use]
    pub const fn logs_interval(&self) -> Duration {
        Duration::from_secs(self.logs_interval_secs)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self::new()
    }
}

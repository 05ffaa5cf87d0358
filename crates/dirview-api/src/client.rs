//! Asynchronous console backend client.

use crate::models::{
    parse_object_response, ConnectionStatus, DirectoryObject, DomainInfo, ErrorBody, LogEntry,
    LogQuery, LogsResponse, ObjectQuery,
};
use crate::Result;
use async_trait::async_trait;
use dirview_core::config::ConsoleConfig;
use dirview_core::types::ApiEndpoint;
use dirview_core::Error;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str = concat!("dirview/", env!("CARGO_PKG_VERSION"));

/// Operations the console needs from its backend.
///
/// [`ConsoleApiClient`] is the HTTP implementation; tests substitute fakes.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    /// Fetch the domain root DN and names.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a bad body.
    async fn domain_info(&self) -> Result<DomainInfo>;

    /// Run a directory object query. An empty vector means nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a body that is
    /// neither an array nor an object.
    async fn query_objects(&self, query: &ObjectQuery) -> Result<Vec<DirectoryObject>>;

    /// Fetch the backend connection status.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a bad body.
    async fn connection_status(&self) -> Result<ConnectionStatus>;

    /// Fetch command log entries.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status (carrying the
    /// body's `error` message), or a bad body.
    async fn logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>>;
}

/// Builder for [`ConsoleApiClient`].
#[derive(Debug, Clone)]
pub struct ConsoleApiClientBuilder {
    config: ConsoleConfig,
}

impl ConsoleApiClientBuilder {
    /// Create a new builder from a [`ConsoleConfig`].
    #[must_use]
    pub fn new(config: ConsoleConfig) -> Self {
        Self { config }
    }

    /// Finalise the builder and create the [`ConsoleApiClient`].
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, the CA certificate cannot
    /// be loaded, or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ConsoleApiClient> {
        let base_url = self.config.parse_api_url()?;

        let mut builder = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .connect_timeout(self.config.connect_timeout())
            .gzip(true);

        if let Some(timeout) = self.config.timeout() {
            builder = builder.timeout(timeout);
        }

        if !self.config.tls_verify {
            warn!("TLS verification disabled for console API client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert) = &self.config.tls_ca_cert {
            debug!("loading console CA certificate from {}", ca_cert.display());
            let bytes = std::fs::read(ca_cert).map_err(|err| {
                Error::ConfigError(format!(
                    "Failed to read CA certificate {}: {err}",
                    ca_cert.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&bytes)
                .map_err(|err| Error::ConfigError(format!("Invalid CA certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(ConsoleApiClient {
            http,
            base_url,
            log_requests: self.config.log_requests,
        })
    }
}

/// Asynchronous client for the console backend.
#[derive(Clone)]
pub struct ConsoleApiClient {
    http: Client,
    base_url: Url,
    log_requests: bool,
}

impl ConsoleApiClient {
    /// Construct a client for the given backend URL with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        ConsoleApiClientBuilder::new(ConsoleConfig::new(api_url)?).build()
    }

    /// Construct a client directly from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot produce a client.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        ConsoleApiClientBuilder::new(config.clone()).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: ConsoleConfig) -> ConsoleApiClientBuilder {
        ConsoleApiClientBuilder::new(config)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, endpoint: ApiEndpoint) -> Result<Url> {
        self.base_url.join(endpoint.path()).map_err(|err| {
            Error::InvalidEndpoint(format!("Invalid path for `{endpoint}`: {err}"))
        })
    }

    /// Sends one request and returns the body of a 2xx response.
    async fn send(
        &self,
        endpoint: ApiEndpoint,
        params: &[(&'static str, String)],
        body: Option<&ObjectQuery>,
    ) -> Result<String> {
        let url = self.build_url(endpoint)?;
        let mut request = if endpoint.is_post() {
            self.http.post(url)
        } else {
            self.http.get(url)
        };

        if !params.is_empty() {
            request = request.query(params);
        }
        request = request.header("Accept", "application/json");
        if let Some(payload) = body {
            request = request.json(payload);
        }

        if self.log_requests {
            info!(endpoint = %endpoint, ?params, "Sending console API request");
        } else {
            debug!(endpoint = %endpoint, ?params, "Sending console API request");
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await;

        if status.is_success() {
            return text.map_err(Error::from);
        }

        let message = text.unwrap_or_else(|_| "Unknown error".to_string());
        Err(map_status_to_error(status, &message))
    }

    async fn get_json<T>(&self, endpoint: ApiEndpoint, params: &[(&'static str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.send(endpoint, params, None).await?;
        serde_json::from_str(&body).map_err(|err| {
            Error::ParseError(format!("Failed to parse `{endpoint}` response: {err}"))
        })
    }
}

#[async_trait]
impl ConsoleApi for ConsoleApiClient {
    async fn domain_info(&self) -> Result<DomainInfo> {
        self.get_json(ApiEndpoint::DomainInfo, &[]).await
    }

    async fn query_objects(&self, query: &ObjectQuery) -> Result<Vec<DirectoryObject>> {
        let body = self
            .send(ApiEndpoint::DomainObject, &[], Some(query))
            .await?;
        parse_object_response(&body)
    }

    async fn connection_status(&self) -> Result<ConnectionStatus> {
        self.get_json(ApiEndpoint::Status, &[]).await
    }

    async fn logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>> {
        let response: LogsResponse = self.get_json(ApiEndpoint::Logs, &query.to_params()).await?;
        Ok(response.logs)
    }
}

/// Pulls the `error` field out of a JSON error body, if there is one.
fn error_body_message(text: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(text)
        .ok()
        .and_then(|body| body.error)
}

fn map_status_to_error(status: StatusCode, text: &str) -> Error {
    match status {
        StatusCode::BAD_REQUEST => Error::BadRequest(error_body_message(text).unwrap_or_default()),
        StatusCode::NOT_FOUND => Error::NotFound(text.to_string()),
        _ => Error::UnexpectedStatus {
            status: status.as_u16(),
            message: error_body_message(text).unwrap_or_else(|| text.to_string()),
        },
    }
}

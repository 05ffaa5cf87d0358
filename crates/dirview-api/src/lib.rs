//! Console backend client and data models.
//!
//! Provides typed structures and an asynchronous client for the JSON HTTP API
//! behind the directory console: domain info, directory object queries,
//! connection status, and the command log feed.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{ConsoleApi, ConsoleApiClient, ConsoleApiClientBuilder};
pub use models::{
    parse_object_response, AttributeValue, Attributes, ConnectionStatus, DirectoryObject,
    DomainInfo, ErrorBody, LogEntry, LogQuery, LogType, LogsResponse, ObjectQuery, SearchScope,
};

/// Convenient result alias that reuses the shared console error type.
pub type Result<T> = dirview_core::Result<T>;

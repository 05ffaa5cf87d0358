//! # dirview-core
//!
//! Core types and utilities shared by the dirview directory console crates.
//!
//! This crate provides the common error type, console configuration, and the
//! catalogue of backend endpoints the console talks to.
//!
//! ## Modules
//!
//! - [`error`] - Error type and HTTP status / alert message mapping
//! - [`types`] - Backend API endpoint enumeration
//! - [`config`] - Console configuration (endpoint, transport, polling, alerts)

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};

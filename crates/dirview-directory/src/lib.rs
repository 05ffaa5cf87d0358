//! Directory browsing primitives for the dirview console.
//!
//! This crate provides the well-known naming contexts a domain tree is seeded
//! from and the fetcher that wraps the backend's object query with silent
//! degradation.

#![deny(missing_docs)]

mod contexts;
mod fetcher;

pub use contexts::NamingContext;
pub use fetcher::DirectoryFetcher;

/// Convenient result alias that reuses the core error type.
pub type Result<T> = dirview_core::Result<T>;

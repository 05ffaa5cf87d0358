//! Directory Fetcher.
//!
//! Thin wrapper over the object query that never fails its caller: every
//! transport, status, or payload problem is logged and turned into an empty
//! answer, so a broken branch simply does not render.

use std::sync::Arc;

use dirview_api::{ConsoleApi, DirectoryObject, ObjectQuery, SearchScope};
use dirview_core::Error;
use tracing::{debug, error, warn};

use crate::contexts::NamingContext;

/// Fetches directory objects for the tree and panels.
#[derive(Clone)]
pub struct DirectoryFetcher {
    api: Arc<dyn ConsoleApi>,
}

impl DirectoryFetcher {
    /// Create a fetcher over the given backend.
    #[must_use]
    pub fn new(api: Arc<dyn ConsoleApi>) -> Self {
        Self { api }
    }

    /// Returns true if a BASE query for `dn` finds anything.
    pub async fn exists_at(&self, dn: &str) -> bool {
        self.query(dn, SearchScope::Base)
            .await
            .is_some_and(|objects| !objects.is_empty())
    }

    /// First object of the query, or `None` on failure or empty answer.
    pub async fn fetch_one(&self, dn: &str, scope: SearchScope) -> Option<DirectoryObject> {
        self.query(dn, scope).await?.into_iter().next()
    }

    /// Children of `dn`. `Some(vec![])` is a successful empty level; `None`
    /// means the level could not be fetched.
    pub async fn fetch_level(&self, dn: &str) -> Option<Vec<DirectoryObject>> {
        self.query(dn, SearchScope::Level).await
    }

    /// Naming contexts under `root_dn` that exist, in display order.
    pub async fn existing_roots(&self, root_dn: &str) -> Vec<String> {
        let mut roots = Vec::new();
        for context in NamingContext::all() {
            let dn = context.dn_for(root_dn);
            if self.exists_at(&dn).await {
                roots.push(dn);
            } else {
                debug!(context = %context, dn = %dn, "naming context not present");
            }
        }
        roots
    }

    async fn query(&self, dn: &str, scope: SearchScope) -> Option<Vec<DirectoryObject>> {
        match self.api.query_objects(&ObjectQuery::new(dn, scope)).await {
            Ok(objects) => Some(objects),
            Err(err) => {
                report(dn, scope, &err);
                None
            }
        }
    }
}

fn report(dn: &str, scope: SearchScope, err: &Error) {
    if err.should_log() {
        error!(dn, %scope, code = err.error_code(), "directory query failed: {err}");
    } else {
        warn!(dn, %scope, code = err.error_code(), "directory query failed: {err}");
    }
}

//! The console context.
//!
//! One [`ConsoleContext`] drives a page: it owns the view state, the backend
//! client, the two pollers and the alert timers. View state sits behind a
//! single mutex that is only taken for short synchronous updates, never across
//! an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{Datelike, Local};
use dirview_api::{ConsoleApi, ConsoleApiClient, LogQuery, SearchScope};
use dirview_core::config::ConsoleConfig;
use dirview_core::Error;
use dirview_directory::DirectoryFetcher;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::alerts::AlertKind;
use crate::logs::failure_message;
use crate::page::Page;
use crate::sequence::RequestSequencer;
use crate::status::ConnectionState;
use crate::tree::{ClickAction, NodePath};
use crate::Result;

/// Result of [`ConsoleContext::click_node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Node fetched, results panel updated, subtree attached.
    Expanded,
    /// Subtree removed.
    Collapsed,
    /// The click cancelled an expansion in flight.
    Cancelled,
    /// A fetch failed; the node stays collapsed.
    NotExpanded,
    /// The expansion was cancelled or replaced while its fetches ran.
    Discarded,
    /// No node at that path.
    Missing,
}

struct ConsoleState {
    api: Arc<dyn ConsoleApi>,
    fetcher: DirectoryFetcher,
    sequencer: RequestSequencer,
    page: Mutex<Page>,
}

impl ConsoleState {
    fn page(&self) -> MutexGuard<'_, Page> {
        lock(&self.page)
    }

    async fn refresh_status(&self) -> ConnectionState {
        let result = self.api.connection_status().await;
        if let Err(err) = &result {
            warn!(code = err.error_code(), "connection status check failed: {err}");
        }

        let mut page = self.page();
        page.status.apply(&result);
        page.status.state()
    }

    async fn poll_latest_log(&self) -> usize {
        match self.api.logs(&LogQuery::latest()).await {
            Ok(logs) => {
                let added = self.page().logs.prepend_new(logs);
                if added > 0 {
                    debug!(added, "new command log entries");
                }
                added
            }
            Err(err) => {
                warn!("failed to fetch latest command log: {}", failure_message(&err));
                0
            }
        }
    }
}

/// Owns everything one console page needs.
pub struct ConsoleContext {
    state: Arc<ConsoleState>,
    config: ConsoleConfig,
    pollers: Mutex<Vec<JoinHandle<()>>>,
    timers: Mutex<Vec<JoinHandle<()>>>,
}

impl ConsoleContext {
    /// Create a context over any backend implementation.
    #[must_use]
    pub fn new(api: Arc<dyn ConsoleApi>, config: ConsoleConfig) -> Self {
        Self {
            state: Arc::new(ConsoleState {
                fetcher: DirectoryFetcher::new(Arc::clone(&api)),
                api,
                sequencer: RequestSequencer::new(),
                page: Mutex::new(Page::new()),
            }),
            config,
            pollers: Mutex::new(Vec::new()),
            timers: Mutex::new(Vec::new()),
        }
    }

    /// Create a context with an HTTP client built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built from the configuration.
    pub fn connect(config: ConsoleConfig) -> Result<Self> {
        let api = ConsoleApiClient::from_config(&config)?;
        Ok(Self::new(Arc::new(api), config))
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Start the status poller (immediately, then every status interval) and
    /// the log poller (first run one logs interval from now). Calling it again
    /// while running does nothing. Must be called inside a Tokio runtime.
    pub fn start(&self) {
        let polling = &self.config.polling;
        if !polling.enabled {
            debug!("polling disabled");
            return;
        }

        let mut pollers = lock(&self.pollers);
        if !pollers.is_empty() {
            return;
        }

        let state = Arc::clone(&self.state);
        let period = polling.status_interval();
        pollers.push(tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                state.refresh_status().await;
            }
        }));

        let state = Arc::clone(&self.state);
        let period = polling.logs_interval();
        pollers.push(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                state.poll_latest_log().await;
            }
        }));

        info!(
            status_interval = ?polling.status_interval(),
            logs_interval = ?polling.logs_interval(),
            "console pollers started"
        );
    }

    /// Load domain info, set the domain name and footer year, and seed the
    /// tree with the naming contexts that exist.
    ///
    /// # Errors
    ///
    /// Returns an error if domain info cannot be fetched. The rest of the
    /// console keeps working.
    pub async fn initialize(&self) -> Result<()> {
        self.state.page().footer_year = Some(Local::now().year());

        let info = match self.state.api.domain_info().await {
            Ok(info) => info,
            Err(err) => {
                if err.should_log() {
                    error!(code = err.error_code(), "failed to load domain info: {err}");
                } else {
                    warn!(code = err.error_code(), "failed to load domain info: {err}");
                }
                return Err(err);
            }
        };
        self.state.page().domain_name = Some(info.flat_name.clone());

        let roots = self.state.fetcher.existing_roots(&info.root_dn).await;
        info!(domain = %info.domain, roots = roots.len(), "console initialized");

        self.state.page().tree.set_roots(roots);
        Ok(())
    }

    /// Click on the tree row at `path`.
    pub async fn click_node(&self, path: &NodePath) -> ClickOutcome {
        let token = self.state.sequencer.issue();
        let dn = {
            let mut page = self.state.page();
            match page.tree.click(path, token) {
                ClickAction::Expand(dn) => {
                    page.results_slot.claim(token);
                    dn
                }
                ClickAction::Collapsed => return ClickOutcome::Collapsed,
                ClickAction::Cancelled => return ClickOutcome::Cancelled,
                ClickAction::Missing => return ClickOutcome::Missing,
            }
        };
        debug!(path = %path, dn = %dn, "expanding tree node");

        let Some(object) = self.state.fetcher.fetch_one(&dn, SearchScope::Base).await else {
            self.state.page().tree.abort_expand(path, token);
            return ClickOutcome::NotExpanded;
        };

        {
            let mut page = self.state.page();
            if !page.tree.is_expanding(path, token) {
                return ClickOutcome::Discarded;
            }
            if page.results_slot.is_latest(token) {
                page.results.show(object);
            }
        }

        let children = self.state.fetcher.fetch_level(&dn).await;
        let mut page = self.state.page();
        match children {
            Some(children) if page.tree.finish_expand(path, token, &children) => {
                ClickOutcome::Expanded
            }
            Some(_) => ClickOutcome::Discarded,
            None => {
                page.tree.abort_expand(path, token);
                ClickOutcome::NotExpanded
            }
        }
    }

    /// Follow a reference link of the results panel into the details panel.
    /// Returns true if the details panel was updated by this request.
    pub async fn follow_reference(&self, identity: &str) -> bool {
        let token = self.state.sequencer.issue();
        {
            let mut page = self.state.page();
            if !page.results.has_link(identity) {
                debug!(identity, "ignoring link not present in the results panel");
                return false;
            }
            page.details.open();
            page.logs.hide();
            page.details_slot.claim(token);
        }

        let object = self
            .state
            .fetcher
            .fetch_one(identity, SearchScope::Base)
            .await;

        let mut page = self.state.page();
        if !page.details_slot.is_latest(token) {
            debug!(identity, "discarding superseded details response");
            return false;
        }
        match object {
            Some(object) => {
                page.details.show(object);
                true
            }
            None => false,
        }
    }

    /// Hide the details panel.
    pub fn close_details(&self) {
        self.state.page().details.close();
    }

    /// Open the command history (hiding details and reloading all entries),
    /// or hide it if it is open. Returns true if the panel is now visible.
    pub async fn toggle_command_history(&self) -> bool {
        {
            let mut page = self.state.page();
            if page.logs.is_visible() {
                page.logs.hide();
                return false;
            }
            page.logs.show();
            page.details.close();
        }
        self.refresh_logs().await;
        true
    }

    /// Hide the command history panel.
    pub fn close_command_history(&self) {
        self.state.page().logs.hide();
    }

    /// Replace the command history with every log entry, oldest first.
    /// Returns the number of entries rendered, or `None` if nothing changed.
    pub async fn refresh_logs(&self) -> Option<usize> {
        let token = self.state.sequencer.issue();
        self.state.page().logs_slot.claim(token);

        match self.state.api.logs(&LogQuery::new()).await {
            Ok(logs) => {
                let mut page = self.state.page();
                if !page.logs_slot.is_latest(token) {
                    return None;
                }
                let count = logs.len();
                page.logs.replace_all(logs);
                Some(count)
            }
            Err(err) => {
                warn!("failed to fetch command logs: {}", failure_message(&err));
                None
            }
        }
    }

    /// Run one status poll now.
    pub async fn refresh_status(&self) -> ConnectionState {
        self.state.refresh_status().await
    }

    /// Run one incremental log poll now; returns the number of new entries.
    pub async fn poll_latest_log(&self) -> usize {
        self.state.poll_latest_log().await
    }

    /// Show the success banner.
    pub fn show_success(&self, message: impl Into<String>) {
        self.show_alert(AlertKind::Success, message.into());
    }

    /// Show the error banner.
    pub fn show_error(&self, message: impl Into<String>) {
        self.show_alert(AlertKind::Error, message.into());
    }

    /// Show the error banner for a failed request.
    pub fn report_error(&self, err: &Error) {
        self.show_error(err.alert_message());
    }

    fn show_alert(&self, kind: AlertKind, message: String) {
        let generation = self.state.page().alert_mut(kind).show(message);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(kind = kind.as_str(), "no runtime; alert will not auto-dismiss");
            return;
        };
        let state = Arc::clone(&self.state);
        let delay: Duration = self.config.alert_dismiss();
        let timer = runtime.spawn(async move {
            time::sleep(delay).await;
            state.page().alert_mut(kind).dismiss(generation);
        });

        let mut timers = lock(&self.timers);
        timers.retain(|handle| !handle.is_finished());
        timers.push(timer);
    }

    /// Copy of the current view state.
    #[must_use]
    pub fn snapshot(&self) -> Page {
        self.state.page().clone()
    }

    /// Current page as HTML.
    #[must_use]
    pub fn render_page(&self) -> String {
        self.state.page().render().render()
    }

    /// Stop both pollers and any pending alert timers.
    pub fn teardown(&self) {
        let pollers: Vec<_> = lock(&self.pollers).drain(..).collect();
        let timers: Vec<_> = lock(&self.timers).drain(..).collect();
        if pollers.is_empty() && timers.is_empty() {
            return;
        }
        for handle in pollers.into_iter().chain(timers) {
            handle.abort();
        }
        debug!("console torn down");
    }
}

impl Drop for ConsoleContext {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

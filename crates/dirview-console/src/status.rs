//! Connection status indicator.

use dirview_api::ConnectionStatus;

use crate::dom::Element;

/// What the indicator shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No poll has completed yet.
    #[default]
    Unknown,
    /// Backend reported `OK`.
    Ok,
    /// Backend reported anything else, or could not be reached.
    Ko,
}

/// The `#connection-status` element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusIndicator {
    state: ConnectionState,
}

impl StatusIndicator {
    /// Indicator before the first poll.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the result of one status poll.
    pub fn apply<E>(&mut self, result: &Result<ConnectionStatus, E>) {
        self.state = match result {
            Ok(status) if status.is_ok() => ConnectionState::Ok,
            _ => ConnectionState::Ko,
        };
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Indicator text.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        match self.state {
            ConnectionState::Unknown => "Connection Status: ...",
            ConnectionState::Ok => "Connection Status: OK",
            ConnectionState::Ko => "Connection Status: KO",
        }
    }

    const fn color(&self) -> &'static str {
        match self.state {
            ConnectionState::Unknown => "text-neutral-500",
            ConnectionState::Ok => "text-green-500",
            ConnectionState::Ko => "text-red-500",
        }
    }

    /// Render `#connection-status`.
    #[must_use]
    pub fn render(&self) -> Element {
        Element::new("span")
            .with_id("connection-status")
            .with_class("text-sm font-medium")
            .with_class(self.color())
            .with_text(self.text())
    }
}

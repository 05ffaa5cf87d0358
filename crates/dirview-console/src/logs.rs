//! Command history panel and its log feed.

use chrono::{DateTime, NaiveDateTime};
use dirview_api::{LogEntry, LogType};
use dirview_core::Error;

use crate::dom::{Element, HIDDEN_CLASS};
use crate::panels::close_icon;

/// Badge classes for one log type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeRule {
    /// Wire name of the log type.
    pub log_type: &'static str,
    /// Classes added to the badge.
    pub classes: &'static str,
}

/// Evaluated in order; unknown types get [`DEFAULT_BADGE`].
pub const BADGE_RULES: &[BadgeRule] = &[
    BadgeRule {
        log_type: "INFO",
        classes: "bg-blue-100 text-blue-800 dark:bg-blue-900/50 dark:text-blue-300",
    },
    BadgeRule {
        log_type: "WARNING",
        classes: "bg-yellow-100 text-yellow-800 dark:bg-yellow-900/50 dark:text-yellow-300",
    },
    BadgeRule {
        log_type: "SUCCESS",
        classes: "bg-green-100 text-green-800 dark:bg-green-900/50 dark:text-green-300",
    },
    BadgeRule {
        log_type: "ERROR",
        classes: "bg-red-100 text-red-800 dark:bg-red-900/50 dark:text-red-300",
    },
];

/// Gray badge for any other type.
pub const DEFAULT_BADGE: BadgeRule = BadgeRule {
    log_type: "",
    classes: "bg-gray-100 text-gray-800 dark:bg-gray-900/50 dark:text-gray-300",
};

const TIMESTAMP_CLASSES: &str = "text-sm text-neutral-500 dark:text-neutral-400";
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Badge rule for a log type.
#[must_use]
pub fn badge_for(log_type: &LogType) -> &'static BadgeRule {
    BADGE_RULES
        .iter()
        .find(|rule| rule.log_type == log_type.as_str())
        .unwrap_or(&DEFAULT_BADGE)
}

/// Text logged for a failed log fetch: the body's `error`, or `Unknown error`.
#[must_use]
pub fn failure_message(err: &Error) -> String {
    match err {
        Error::BadRequest(message)
        | Error::NotFound(message)
        | Error::UnexpectedStatus { message, .. } => {
            if message.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                message.clone()
            }
        }
        other => other.to_string(),
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Render one entry: timestamp, badge, message.
#[must_use]
pub fn entry_element(entry: &LogEntry) -> Element {
    let badge = badge_for(&entry.log_type);
    let header = Element::new("div")
        .with_class("flex items-center justify-between mb-1")
        .with_child(
            Element::new("span")
                .with_class(TIMESTAMP_CLASSES)
                .with_text(entry.timestamp.clone()),
        )
        .with_child(
            Element::new("span")
                .with_class("text-sm px-2 py-0.5 rounded-full")
                .with_class(badge.classes)
                .with_text(entry.log_type.as_str()),
        );

    let command = Element::new("div")
        .with_class("flex items-center gap-2")
        .with_child(
            Element::new("code")
                .with_class("text-sm font-mono text-neutral-700 dark:text-neutral-300 flex-1")
                .with_text(entry.debug_message.clone()),
        );

    Element::new("div")
        .with_class("p-4 hover:bg-neutral-50 dark:hover:bg-neutral-800 cursor-pointer group")
        .with_child(header)
        .with_child(command)
}

/// The `#command-history-panel` and its entries, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFeed {
    visible: bool,
    entries: Vec<LogEntry>,
}

impl LogFeed {
    /// Hidden, empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while the panel is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the panel.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the panel.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Rendered entries, top first.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Replace everything with `logs`, oldest first. Timestamps that do not
    /// parse sort before parsed ones, by text.
    pub fn replace_all(&mut self, mut logs: Vec<LogEntry>) {
        logs.sort_by_cached_key(|entry| (parse_timestamp(&entry.timestamp), entry.timestamp.clone()));
        self.entries = logs;
    }

    /// Returns true if an entry with the same timestamp and message text is
    /// already rendered.
    #[must_use]
    pub fn is_rendered(&self, entry: &LogEntry) -> bool {
        self.entries.iter().any(|existing| {
            existing.timestamp == entry.timestamp && existing.debug_message == entry.debug_message
        })
    }

    /// Prepend entries not already rendered; returns how many were added.
    pub fn prepend_new(&mut self, logs: Vec<LogEntry>) -> usize {
        let mut added = 0;
        for entry in logs {
            if !self.is_rendered(&entry) {
                self.entries.insert(0, entry);
                added += 1;
            }
        }
        added
    }

    /// Render `#command-history-panel`.
    #[must_use]
    pub fn render(&self) -> Element {
        let mut panel = Element::new("div")
            .with_id("command-history-panel")
            .with_class("w-96 border-l overflow-auto transition-transform");
        if !self.visible {
            panel.add_class(HIDDEN_CLASS);
            panel.add_class("translate-x-full");
        }

        panel
            .with_child(
                Element::new("div")
                    .with_class("flex items-center justify-between p-4 border-b")
                    .with_child(
                        Element::new("h2")
                            .with_class("text-lg font-semibold")
                            .with_text("Command History"),
                    )
                    .with_child(
                        Element::new("button")
                            .with_id("close-command-history-panel")
                            .with_class("text-gray-500 hover:text-gray-700")
                            .with_child(close_icon()),
                    ),
            )
            .with_child(
                Element::new("div")
                    .with_id("command-history-entries")
                    .with_class("divide-y")
                    .with_children(self.entries.iter().map(entry_element)),
            )
    }
}

//! View state of the whole console page.

use crate::alerts::{AlertBanner, AlertKind};
use crate::dom::Element;
use crate::logs::LogFeed;
use crate::panels::{DetailsPanel, ResultsPanel};
use crate::sequence::RequestSlot;
use crate::status::StatusIndicator;
use crate::tree::TreeView;

/// Everything the console renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// `span#domain-name` text, once domain info has loaded.
    pub domain_name: Option<String>,
    /// `#footer-year` text.
    pub footer_year: Option<i32>,
    /// `#tree-view`.
    pub tree: TreeView,
    /// `#results-panel`.
    pub results: ResultsPanel,
    /// `#details-panel`.
    pub details: DetailsPanel,
    /// `#connection-status`.
    pub status: StatusIndicator,
    /// `#command-history-panel`.
    pub logs: LogFeed,
    /// `div[role="alert-success"]`.
    pub success_alert: AlertBanner,
    /// `div[role="alert-error"]`.
    pub error_alert: AlertBanner,
    pub(crate) results_slot: RequestSlot,
    pub(crate) details_slot: RequestSlot,
    pub(crate) logs_slot: RequestSlot,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Page before any data has loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            domain_name: None,
            footer_year: None,
            tree: TreeView::new(),
            results: ResultsPanel::new(),
            details: DetailsPanel::new(),
            status: StatusIndicator::new(),
            logs: LogFeed::new(),
            success_alert: AlertBanner::new(AlertKind::Success),
            error_alert: AlertBanner::new(AlertKind::Error),
            results_slot: RequestSlot::default(),
            details_slot: RequestSlot::default(),
            logs_slot: RequestSlot::default(),
        }
    }

    /// Banner of the given kind.
    pub fn alert_mut(&mut self, kind: AlertKind) -> &mut AlertBanner {
        match kind {
            AlertKind::Success => &mut self.success_alert,
            AlertKind::Error => &mut self.error_alert,
        }
    }

    /// Render the whole page body.
    #[must_use]
    pub fn render(&self) -> Element {
        let header = Element::new("header")
            .with_class("flex items-center justify-between px-4 py-2 border-b")
            .with_child(
                Element::new("span")
                    .with_id("domain-name")
                    .with_class("font-semibold")
                    .with_text(self.domain_name.clone().unwrap_or_default()),
            )
            .with_child(
                Element::new("button")
                    .with_id("toggle-command-history")
                    .with_class("text-sm text-neutral-600 hover:text-neutral-900")
                    .with_text("Command History"),
            )
            .with_child(self.status.render());

        let main = Element::new("main")
            .with_class("flex flex-1 gap-4 p-4 overflow-hidden")
            .with_child(
                Element::new("aside")
                    .with_class("w-80 overflow-auto border rounded")
                    .with_child(self.tree.render()),
            )
            .with_child(self.results.render())
            .with_child(self.details.render())
            .with_child(self.logs.render());

        let footer = Element::new("footer")
            .with_class("px-4 py-2 text-xs text-neutral-500")
            .with_child(
                Element::new("span")
                    .with_id("footer-year")
                    .with_text(self.footer_year.map(|year| year.to_string()).unwrap_or_default()),
            );

        Element::new("div")
            .with_id("console")
            .with_class("flex h-screen flex-col")
            .with_child(header)
            .with_child(
                Element::new("div")
                    .with_class("fixed top-4 right-4 z-50 flex flex-col gap-2")
                    .with_child(self.success_alert.render())
                    .with_child(self.error_alert.render()),
            )
            .with_child(main)
            .with_child(footer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_page_has_every_anchor() {
        let page = Page::new().render();
        for id in [
            "domain-name",
            "connection-status",
            "tree-view",
            "results-panel",
            "details-panel",
            "command-history-panel",
            "command-history-entries",
            "footer-year",
            "alert-message-success",
            "alert-message-error",
        ] {
            assert!(page.find_by_id(id).is_some(), "missing #{id}");
        }
        assert!(page.find(|e| e.attr("role") == Some("alert-success")).is_some());
        assert!(page.find_by_id("details-panel").unwrap().is_hidden());
        assert!(page.find_by_id("command-history-panel").unwrap().is_hidden());
    }

    #[test]
    fn domain_and_year_render() {
        let mut page = Page::new();
        page.domain_name = Some("CORP".into());
        page.footer_year = Some(2026);
        let rendered = page.render();
        assert_eq!(rendered.find_by_id("domain-name").unwrap().text_content(), "CORP");
        assert_eq!(rendered.find_by_id("footer-year").unwrap().text_content(), "2026");
    }
}

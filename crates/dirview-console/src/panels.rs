//! Results and details panels.

use dirview_api::{AttributeValue, DirectoryObject};

use crate::dom::{Element, HIDDEN_CLASS};

/// Attributes whose values are DNs and render as follow-able links.
pub const REFERENCE_ATTRIBUTES: &[&str] =
    &["member", "memberOf", "objectCategory", "distinguishedName"];

const LINK_CLASSES: &str = "text-blue-400 hover:text-blue-600 ldap-link";

/// Returns true if values of `key` render as links.
#[must_use]
pub fn is_reference_attribute(key: &str) -> bool {
    REFERENCE_ATTRIBUTES.contains(&key)
}

/// The `#results-panel`: the object last selected in the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsPanel {
    object: Option<DirectoryObject>,
    links: Vec<String>,
}

impl ResultsPanel {
    /// Empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the panel content. The link set is rebuilt from the new object.
    pub fn show(&mut self, object: DirectoryObject) {
        self.links = object
            .attributes
            .iter()
            .filter(|(key, _)| is_reference_attribute(key))
            .flat_map(|(_, value)| value.iter().map(str::to_string))
            .collect();
        self.object = Some(object);
    }

    /// Object currently shown.
    #[must_use]
    pub fn object(&self) -> Option<&DirectoryObject> {
        self.object.as_ref()
    }

    /// Identities of the links currently rendered.
    #[must_use]
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Returns true if a link with this identity is rendered.
    #[must_use]
    pub fn has_link(&self, identity: &str) -> bool {
        self.links.iter().any(|link| link == identity)
    }

    /// Render `#results-panel`.
    #[must_use]
    pub fn render(&self) -> Element {
        let mut panel = Element::new("div")
            .with_id("results-panel")
            .with_class("flex-1 overflow-auto border rounded");
        let Some(object) = &self.object else {
            return panel;
        };

        panel.push(
            Element::new("div")
                .with_class("bg-gray-50 px-4 py-2 border-b")
                .with_child(
                    Element::new("h3")
                        .with_class("font-medium")
                        .with_text(object.name().unwrap_or("Details")),
                ),
        );

        let rows = object.attributes.iter().map(|(key, value)| {
            Element::new("div")
                .with_child(
                    Element::new("dt")
                        .with_class("text-sm font-medium text-gray-500")
                        .with_text(key),
                )
                .with_child(value_cell(key, value))
        });
        panel.push(
            Element::new("div")
                .with_class("p-4")
                .with_child(
                    Element::new("dl")
                        .with_class("grid grid-cols-2 gap-4")
                        .with_children(rows),
                ),
        );
        panel
    }
}

fn value_cell(key: &str, value: &AttributeValue) -> Element {
    let mut dd = Element::new("dd").with_class("mt-1 text-sm text-gray-900");
    let linked = is_reference_attribute(key);
    for (index, item) in value.iter().enumerate() {
        if index > 0 {
            dd.push(Element::new("br"));
        }
        if linked {
            dd.push(
                Element::new("a")
                    .with_attr("href", "#")
                    .with_class(LINK_CLASSES)
                    .with_attr("data-identity", item)
                    .with_text(item),
            );
        } else {
            dd = dd.with_text(item);
        }
    }
    dd
}

/// The `#details-panel`: the object behind the last followed link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsPanel {
    visible: bool,
    object: Option<DirectoryObject>,
}

impl DetailsPanel {
    /// Hidden, empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the panel visible.
    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Hide the panel.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Replace the content and make the panel visible.
    pub fn show(&mut self, object: DirectoryObject) {
        self.object = Some(object);
        self.visible = true;
    }

    /// Returns true while visible.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Object currently shown.
    #[must_use]
    pub fn object(&self) -> Option<&DirectoryObject> {
        self.object.as_ref()
    }

    /// Render `#details-panel`.
    #[must_use]
    pub fn render(&self) -> Element {
        let mut panel = Element::new("div")
            .with_id("details-panel")
            .with_class("w-96 border-l overflow-auto");
        if !self.visible {
            panel.add_class(HIDDEN_CLASS);
        }
        let Some(object) = &self.object else {
            return panel;
        };

        let header = Element::new("div")
            .with_class("flex items-center justify-between gap-2 p-4 border-b")
            .with_child(
                Element::new("div")
                    .with_class("flex items-center gap-2")
                    .with_child(clock_icon())
                    .with_child(
                        Element::new("h2")
                            .with_class("text-lg font-semibold")
                            .with_text(object.label()),
                    ),
            )
            .with_child(
                Element::new("button")
                    .with_id("close-details-panel")
                    .with_class("text-gray-500 hover:text-gray-700")
                    .with_child(close_icon()),
            );

        let blocks = object.attributes.iter().map(|(key, value)| {
            let block = Element::new("div").with_class("mb-4").with_child(
                Element::new("span")
                    .with_class("text-sm font-medium text-gray-500 block")
                    .with_text(key),
            );
            block.with_children(value.iter().map(|line| {
                Element::new("span")
                    .with_class("text-sm text-gray-900 block")
                    .with_text(line)
            }))
        });

        panel.push(header);
        panel.push(
            Element::new("div")
                .with_class("divide-y")
                .with_child(Element::new("div").with_class("p-4").with_children(blocks)),
        );
        panel
    }
}

fn clock_icon() -> Element {
    Element::new("svg")
        .with_class("w-5 h-5 text-blue-500")
        .with_attr("fill", "none")
        .with_attr("stroke", "currentColor")
        .with_attr("viewBox", "0 0 24 24")
        .with_child(Element::new("path").with_attr("d", "M12 8v4l3 3"))
        .with_child(
            Element::new("circle")
                .with_attr("cx", "12")
                .with_attr("cy", "12")
                .with_attr("r", "10"),
        )
}

/// The "x" glyph shared by panel close buttons.
pub(crate) fn close_icon() -> Element {
    Element::new("svg")
        .with_class("w-4 h-4")
        .with_attr("fill", "none")
        .with_attr("stroke", "currentColor")
        .with_attr("viewBox", "0 0 24 24")
        .with_child(
            Element::new("path")
                .with_attr("stroke-linecap", "round")
                .with_attr("stroke-linejoin", "round")
                .with_attr("stroke-width", "2")
                .with_attr("d", "M6 18L18 6M6 6l12 12"),
        )
}

//! Owned element tree rendered to HTML.
//!
//! Every console component renders into [`Element`]s; the host page swaps the
//! rendered HTML into its anchor points. Text and attribute values are escaped
//! on render, so components never build markup by string concatenation.

use std::fmt;

/// Class that hides panels.
pub const HIDDEN_CLASS: &str = "hidden";

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Escapes text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Text, escaped on render.
    Text(String),
}

/// An HTML element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Append whitespace-separated classes.
    #[must_use]
    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append an element child.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append element children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Classes in order.
    pub fn classes(&self) -> impl Iterator<Item = &str> + '_ {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    /// Returns true if the element carries the class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|candidate| candidate == class)
    }

    /// Add a class unless already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.attr("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr("class", classes);
    }

    /// Remove a class.
    pub fn remove_class(&mut self, class: &str) {
        let classes: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        let classes = classes.join(" ");
        self.set_attr("class", classes);
    }

    /// Returns true if hidden by class or by the `hidden` attribute.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.has_class(HIDDEN_CLASS) || self.attr("hidden").is_some()
    }

    /// Children in order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Element children only.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Append an element child.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Replace all children with one text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// First descendant (or self) matching the predicate, depth first.
    pub fn find(&self, predicate: impl Fn(&Element) -> bool + Copy) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.child_elements()
            .find_map(|child| child.find(predicate))
    }

    /// All descendants (and self) matching the predicate, in document order.
    pub fn find_all(&self, predicate: impl Fn(&Element) -> bool + Copy) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_matching(predicate, &mut found);
        found
    }

    fn collect_matching<'a>(
        &'a self,
        predicate: impl Fn(&Element) -> bool + Copy,
        found: &mut Vec<&'a Element>,
    ) {
        if predicate(self) {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_matching(predicate, found);
        }
    }

    /// Element with the given id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(|element| element.id() == Some(id))
    }

    /// Render to HTML.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, escape_html(value))?;
        }
        f.write_str(">")?;

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return Ok(());
        }

        for child in &self.children {
            match child {
                Node::Text(text) => f.write_str(&escape_html(text))?,
                Node::Element(element) => write!(f, "{element}")?,
            }
        }
        write!(f, "</{}>", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let link = Element::new("a")
            .with_attr("data-identity", "CN=\"x\",DC=a&b")
            .with_text("<script>");
        assert_eq!(
            link.render(),
            "<a data-identity=\"CN=&quot;x&quot;,DC=a&amp;b\">&lt;script&gt;</a>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let dd = Element::new("dd")
            .with_text("a")
            .with_child(Element::new("br"))
            .with_text("b");
        assert_eq!(dd.render(), "<dd>a<br>b</dd>");
        assert_eq!(dd.text_content(), "ab");
    }

    #[test]
    fn class_manipulation() {
        let mut panel = Element::new("div").with_class("w-96 border-l");
        panel.add_class(HIDDEN_CLASS);
        panel.add_class(HIDDEN_CLASS);
        assert_eq!(panel.attr("class"), Some("w-96 border-l hidden"));
        assert!(panel.is_hidden());

        panel.remove_class(HIDDEN_CLASS);
        assert!(!panel.is_hidden());
        assert_eq!(panel.classes().count(), 2);
    }

    #[test]
    fn find_helpers_search_depth_first() {
        let page = Element::new("div")
            .with_child(
                Element::new("section")
                    .with_child(Element::new("span").with_id("inner").with_text("x")),
            )
            .with_child(Element::new("span").with_class("note"));

        assert_eq!(page.find_by_id("inner").map(Element::text_content), Some("x".into()));
        assert_eq!(page.find_all(|e| e.tag() == "span").len(), 2);
        assert!(page.find_by_id("missing").is_none());
    }
}

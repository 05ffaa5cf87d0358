//! Directory tree.
//!
//! A node is `Collapsed`, `Expanding` while its fetches are in flight, or
//! `Expanded` with exactly one subtree of children. Children live inside the
//! node, so a row can never be followed by more than one subtree container.

use std::fmt;
use std::str::FromStr;

use dirview_api::DirectoryObject;
use dirview_core::Error;
use tracing::debug;

use crate::alerts::spinner;
use crate::dom::{Element, HIDDEN_CLASS};
use crate::icons::{object_icon, root_folder_icon};
use crate::sequence::RequestToken;

const ROW_CLASSES: &str = "flex items-center gap-1 p-1 hover:bg-gray-100 rounded cursor-pointer";

/// Position of a node: child indexes from the roots down.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of a root row.
    #[must_use]
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of this node's `index`-th child.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indexes = self.0.clone();
        indexes.push(index);
        Self(indexes)
    }

    /// Indexes from the root down.
    #[must_use]
    pub fn indexes(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

impl FromStr for NodePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let indexes = s
            .split('.')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|_| Error::InvalidRequest(format!("invalid tree path: {s}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(indexes))
    }
}

/// Expansion state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// No subtree.
    Collapsed,
    /// Fetches for this token are in flight.
    Expanding(RequestToken),
    /// Subtree shown.
    Expanded,
}

/// What a click on a node did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Node entered `Expanding`; fetch this DN.
    Expand(String),
    /// Subtree removed.
    Collapsed,
    /// In-flight expansion abandoned.
    Cancelled,
    /// No node at that path.
    Missing,
}

/// One row of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    dn: String,
    label: String,
    icon: Element,
    state: NodeState,
    children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Naming-context row: amber folder, DN as label.
    #[must_use]
    pub fn root(dn: impl Into<String>) -> Self {
        let dn = dn.into();
        Self {
            label: dn.clone(),
            dn,
            icon: root_folder_icon(),
            state: NodeState::Collapsed,
            children: None,
        }
    }

    /// Child row built from a fetched object.
    #[must_use]
    pub fn from_object(object: &DirectoryObject) -> Self {
        Self {
            dn: object.dn.clone(),
            label: object.label().to_string(),
            icon: object_icon(object),
            state: NodeState::Collapsed,
            children: None,
        }
    }

    /// DN bound to this row.
    #[must_use]
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// Row label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Row icon.
    #[must_use]
    pub fn icon(&self) -> &Element {
        &self.icon
    }

    /// Expansion state.
    #[must_use]
    pub const fn state(&self) -> NodeState {
        self.state
    }

    /// Children, present only while expanded.
    #[must_use]
    pub fn children(&self) -> Option<&[TreeNode]> {
        self.children.as_deref()
    }

    fn render_into(&self, path: &NodePath, out: &mut Element) {
        let mut row = Element::new("div")
            .with_class(ROW_CLASSES)
            .with_attr("data-path", path.to_string())
            .with_attr("data-dn", self.dn.clone())
            .with_child(self.icon.clone())
            .with_child(Element::new("span").with_text(self.label.clone()));

        if matches!(self.state, NodeState::Expanding(_)) {
            let mut busy = spinner(&format!("tree-{path}"), None);
            busy.remove_class(HIDDEN_CLASS);
            row.push(busy);
        }
        out.push(row);

        if let Some(children) = &self.children {
            let mut subtree = Element::new("div").with_class("ml-6 subtree");
            for (index, child) in children.iter().enumerate() {
                child.render_into(&path.child(index), &mut subtree);
            }
            out.push(subtree);
        }
    }
}

/// The `#tree-view` pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeView {
    roots: Vec<TreeNode>,
}

impl TreeView {
    /// Empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the root rows.
    pub fn set_roots(&mut self, dns: impl IntoIterator<Item = String>) {
        self.roots = dns.into_iter().map(TreeNode::root).collect();
    }

    /// Root rows.
    #[must_use]
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Node at `path`.
    #[must_use]
    pub fn node(&self, path: &NodePath) -> Option<&TreeNode> {
        let (first, rest) = path.indexes().split_first()?;
        rest.iter().try_fold(self.roots.get(*first)?, |node, index| {
            node.children.as_ref()?.get(*index)
        })
    }

    fn node_mut(&mut self, path: &NodePath) -> Option<&mut TreeNode> {
        let (first, rest) = path.indexes().split_first()?;
        let mut node = self.roots.get_mut(*first)?;
        for index in rest {
            node = node.children.as_mut()?.get_mut(*index)?;
        }
        Some(node)
    }

    /// Apply a click. A collapsed node starts expanding under `token`, an
    /// expanded one collapses, an expanding one is cancelled.
    pub fn click(&mut self, path: &NodePath, token: RequestToken) -> ClickAction {
        let Some(node) = self.node_mut(path) else {
            return ClickAction::Missing;
        };

        match node.state {
            NodeState::Collapsed => {
                node.state = NodeState::Expanding(token);
                ClickAction::Expand(node.dn.clone())
            }
            NodeState::Expanded => {
                node.children = None;
                node.state = NodeState::Collapsed;
                ClickAction::Collapsed
            }
            NodeState::Expanding(_) => {
                node.state = NodeState::Collapsed;
                ClickAction::Cancelled
            }
        }
    }

    /// Returns true if the node at `path` is still expanding under `token`.
    #[must_use]
    pub fn is_expanding(&self, path: &NodePath, token: RequestToken) -> bool {
        self.node(path)
            .is_some_and(|node| node.state == NodeState::Expanding(token))
    }

    /// Attach fetched children if `token` is still current.
    pub fn finish_expand(
        &mut self,
        path: &NodePath,
        token: RequestToken,
        children: &[DirectoryObject],
    ) -> bool {
        if !self.is_expanding(path, token) {
            debug!(path = %path, "discarding stale subtree");
            return false;
        }
        let Some(node) = self.node_mut(path) else {
            return false;
        };
        node.children = Some(children.iter().map(TreeNode::from_object).collect());
        node.state = NodeState::Expanded;
        true
    }

    /// Return the node to `Collapsed` if `token` is still current.
    pub fn abort_expand(&mut self, path: &NodePath, token: RequestToken) -> bool {
        if !self.is_expanding(path, token) {
            return false;
        }
        match self.node_mut(path) {
            Some(node) => {
                node.state = NodeState::Collapsed;
                true
            }
            None => false,
        }
    }

    /// Render `#tree-view`.
    #[must_use]
    pub fn render(&self) -> Element {
        let mut view = Element::new("div").with_id("tree-view").with_class("p-2");
        for (index, root) in self.roots.iter().enumerate() {
            root.render_into(&NodePath::root(index), &mut view);
        }
        view
    }
}

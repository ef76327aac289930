use super::node::{Node, NodeId, NodeKind, PINNED_NAME};
use super::sort::sibling_order;
use crate::services::time_source::{SharedClock, SystemClock};
use std::collections::HashMap;
use thiserror::Error;

/// Expected, reportable failures of editor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("node not found")]
    NodeNotFound,
    #[error("not a folder")]
    NotAFolder,
    #[error("name cannot be empty")]
    EmptyName,
    #[error("duplicate name in directory")]
    DuplicateName,
    #[error("unreadable entries cannot be edited")]
    NotEditable,
}

/// Editable tree of nodes
///
/// Nodes live in an arena keyed by id, with parent pointers for O(1)
/// parent lookup. The root always exists, always has `NodeId::ROOT`, and
/// is always a folder; deleting it clears its children instead of
/// removing it. Ids come from a per-store counter, so two stores in the
/// same process never share id spaces.
#[derive(Debug)]
pub struct TreeStore {
    /// All nodes indexed by ID
    nodes: HashMap<NodeId, Node>,
    /// Next node ID to assign
    next_id: u64,
    /// Source of pinned-order keys
    clock: SharedClock,
}

impl TreeStore {
    /// Create a store containing only a root folder with the given name.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self::with_clock(root_name, SystemClock::shared())
    }

    /// Create a store with an explicit clock (tests use a controllable one).
    pub fn with_clock(root_name: impl Into<String>, clock: SharedClock) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            NodeId::ROOT,
            Node::new(NodeId::ROOT, root_name, NodeKind::Folder, None),
        );

        Self {
            nodes,
            next_id: 1,
            clock,
        }
    }

    /// Get the root node ID
    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Parent of a node.
    ///
    /// Returns None both for the root and for unknown ids; callers that
    /// need to distinguish also check `get`.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id)?.parent
    }

    /// Number of nodes currently in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has no children (a scanned-and-empty result)
    pub fn is_empty(&self) -> bool {
        self.nodes
            .get(&NodeId::ROOT)
            .map(|root| root.children.is_empty())
            .unwrap_or(true)
    }

    /// Get all nodes
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// A node's children in display order
    pub fn sorted_children(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.get(id) else {
            return Vec::new();
        };

        let mut ids: Vec<NodeId> = node
            .children
            .iter()
            .copied()
            .filter(|child| self.nodes.contains_key(child))
            .collect();
        ids.sort_by(|a, b| sibling_order(&self.nodes[a], &self.nodes[b]));
        ids
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a node under a parent without sibling-name validation.
    ///
    /// This is the bulk-load path used by scans and snapshot loads;
    /// editor inserts go through `insert_child`.
    pub(crate) fn attach_child(
        &mut self,
        parent_id: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
    ) -> NodeId {
        let id = self.alloc_id();
        self.nodes
            .insert(id, Node::new(id, name, kind, Some(parent_id)));

        if let Some(parent) = self.get_mut(parent_id) {
            parent.children.push(id);
        }

        id
    }

    pub(crate) fn set_pinned_order(&mut self, id: NodeId, value: Option<u64>) {
        if let Some(node) = self.get_mut(id) {
            node.pinned_order = value;
        }
    }

    /// Turn a folder that could not be listed into an error placeholder.
    pub(crate) fn demote_to_error(&mut self, id: NodeId) {
        let children: Vec<NodeId> = self
            .get(id)
            .map(|node| node.children.clone())
            .unwrap_or_default();
        for child in children {
            self.remove_subtree(child);
        }

        if let Some(node) = self.get_mut(id) {
            node.kind = NodeKind::Error;
            node.children.clear();
            node.collapsed = false;
        }
    }

    /// Insert a new folder or file under a parent.
    ///
    /// The new node gets the first free default name among same-kind
    /// siblings (`new_folder`, `new_folder_1`, …), and the parent is
    /// expanded so the result is visible. Returns the new node's id; the
    /// caller's view typically marks it pending rename.
    pub fn insert_child(&mut self, parent_id: NodeId, kind: NodeKind) -> Result<NodeId, EditError> {
        if kind.is_error() {
            return Err(EditError::NotEditable);
        }

        let parent = self.get(parent_id).ok_or(EditError::NodeNotFound)?;
        if !parent.is_folder() {
            return Err(EditError::NotAFolder);
        }

        let base = if kind.is_folder() {
            "new_folder"
        } else {
            "new_file.txt"
        };
        let name = self.unique_sibling_name(parent_id, kind, base);

        if let Some(parent) = self.get_mut(parent_id) {
            parent.collapsed = false;
        }

        Ok(self.attach_child(parent_id, name, kind))
    }

    /// Rename a node.
    ///
    /// The name is trimmed before use. Renaming to the sentinel `"..."`
    /// assigns a pinned-order key from the clock; renaming away removes
    /// it. Renaming a node to its current name is a no-op success (and
    /// keeps an existing pinned key).
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<(), EditError> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(EditError::EmptyName);
        }

        let node = self.get(id).ok_or(EditError::NodeNotFound)?;
        if node.is_error() {
            return Err(EditError::NotEditable);
        }
        let (kind, parent) = (node.kind, node.parent);

        if trimmed == node.name {
            return Ok(());
        }

        if let Some(parent_id) = parent {
            if self.sibling_name_taken(parent_id, kind, trimmed, Some(id)) {
                return Err(EditError::DuplicateName);
            }
        }

        let pinned = if trimmed == PINNED_NAME {
            Some(self.clock.now_millis())
        } else {
            None
        };

        if let Some(node) = self.get_mut(id) {
            node.name = trimmed.to_string();
            node.pinned_order = pinned;
        }

        Ok(())
    }

    /// Delete a node and its subtree.
    ///
    /// The root is never removed: deleting it clears its children
    /// instead. Confirmation prompts are the caller's concern.
    pub fn delete(&mut self, id: NodeId) -> Result<(), EditError> {
        if self.get(id).is_none() {
            return Err(EditError::NodeNotFound);
        }

        if id == NodeId::ROOT {
            let children: Vec<NodeId> = self
                .get(NodeId::ROOT)
                .map(|root| root.children.clone())
                .unwrap_or_default();
            for child in children {
                self.remove_subtree(child);
            }
            if let Some(root) = self.get_mut(NodeId::ROOT) {
                root.children.clear();
            }
            return Ok(());
        }

        if let Some(parent_id) = self.parent_of(id) {
            if let Some(parent) = self.get_mut(parent_id) {
                parent.children.retain(|child| *child != id);
            }
        }
        self.remove_subtree(id);

        Ok(())
    }

    /// Flip a folder's collapsed flag; no-op for files and error nodes.
    pub fn toggle_collapse(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            if node.is_folder() {
                node.collapsed = !node.collapsed;
            }
        }
    }

    fn unique_sibling_name(&self, parent_id: NodeId, kind: NodeKind, base: &str) -> String {
        if !self.sibling_name_taken(parent_id, kind, base, None) {
            return base.to_string();
        }

        let mut n = 1u32;
        loop {
            let candidate = format!("{base}_{n}");
            if !self.sibling_name_taken(parent_id, kind, &candidate, None) {
                return candidate;
            }
            n += 1;
        }
    }

    fn sibling_name_taken(
        &self,
        parent_id: NodeId,
        kind: NodeKind,
        name: &str,
        exclude: Option<NodeId>,
    ) -> bool {
        let Some(parent) = self.get(parent_id) else {
            return false;
        };

        parent.children.iter().any(|child_id| {
            if Some(*child_id) == exclude {
                return false;
            }
            self.get(*child_id)
                .is_some_and(|child| child.kind == kind && child.name == name)
        })
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }
}

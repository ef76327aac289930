//! Editor-session state for interactive tree views.
//!
//! Selection and rename focus belong to the view, not to the nodes: a
//! `TreeView` owns them, so the core tree model stays free of editing
//! state and several views could track the same store independently.

use super::node::{NodeId, NodeKind};
use super::store::{EditError, TreeStore};

/// View state for tree navigation and editing focus
#[derive(Debug, Default)]
pub struct TreeView {
    /// Currently selected node
    selected: Option<NodeId>,
    /// Node whose name is being edited (e.g. freshly inserted)
    pending_rename: Option<NodeId>,
}

impl TreeView {
    /// Create a view with the root selected
    pub fn new() -> Self {
        Self {
            selected: Some(NodeId::ROOT),
            pending_rename: None,
        }
    }

    /// Rows to display: `(id, depth)` pairs in display order, skipping
    /// the subtrees of collapsed folders.
    pub fn display_rows(&self, store: &TreeStore) -> Vec<(NodeId, usize)> {
        let mut rows = Vec::new();
        collect_rows(store, store.root_id(), 0, &mut rows);
        rows
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn set_selected(&mut self, id: Option<NodeId>) {
        self.selected = id;
    }

    /// Select the next visible row
    pub fn select_next(&mut self, store: &TreeStore) {
        self.select_offset(store, 1);
    }

    /// Select the previous visible row
    pub fn select_prev(&mut self, store: &TreeStore) {
        self.select_offset(store, -1);
    }

    fn select_offset(&mut self, store: &TreeStore, delta: isize) {
        let rows = self.display_rows(store);
        if rows.is_empty() {
            self.selected = None;
            return;
        }

        let position = self
            .selected
            .and_then(|current| rows.iter().position(|(id, _)| *id == current));

        self.selected = Some(match position {
            Some(pos) => {
                let next = pos.saturating_add_signed(delta).min(rows.len() - 1);
                rows[next].0
            }
            None => rows[0].0,
        });
    }

    /// Select the parent of the current selection
    pub fn select_parent(&mut self, store: &TreeStore) {
        if let Some(current) = self.selected {
            if let Some(parent) = store.parent_of(current) {
                self.selected = Some(parent);
            }
        }
    }

    /// The node currently awaiting a rename, if any
    pub fn pending_rename(&self) -> Option<NodeId> {
        self.pending_rename
    }

    pub fn begin_rename(&mut self, id: NodeId) {
        self.pending_rename = Some(id);
    }

    pub fn finish_rename(&mut self) {
        self.pending_rename = None;
    }

    /// Insert a node and focus it for renaming.
    ///
    /// The new node is selected and marked pending rename, matching the
    /// create-then-name editing flow.
    pub fn insert_and_edit(
        &mut self,
        store: &mut TreeStore,
        parent: NodeId,
        kind: NodeKind,
    ) -> Result<NodeId, EditError> {
        let id = store.insert_child(parent, kind)?;
        self.selected = Some(id);
        self.pending_rename = Some(id);
        Ok(id)
    }

    /// Drop selection and rename focus that point at removed nodes.
    pub fn prune(&mut self, store: &TreeStore) {
        if self.selected.is_some_and(|id| store.get(id).is_none()) {
            self.selected = Some(store.root_id());
        }
        if self
            .pending_rename
            .is_some_and(|id| store.get(id).is_none())
        {
            self.pending_rename = None;
        }
    }
}

fn collect_rows(store: &TreeStore, id: NodeId, depth: usize, rows: &mut Vec<(NodeId, usize)>) {
    let Some(node) = store.get(id) else {
        return;
    };
    rows.push((id, depth));

    if node.is_folder() && !node.collapsed {
        for child in store.sorted_children(id) {
            collect_rows(store, child, depth + 1, rows);
        }
    }
}

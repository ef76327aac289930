//! Snapshot serialization for saving and loading trees.
//!
//! A tree persists as nested JSON objects with `name`, `type`
//! (`"folder"`/`"file"`), `children` (folders only) and `pinnedOrder`.
//! Editor-only state (`id`, `collapsed`) is never written; ids are
//! reassigned on load with the root forced to the reserved id.

use super::node::{Node, NodeId, NodeKind, PINNED_NAME};
use super::store::TreeStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default name for a loaded root that has none
const DEFAULT_ROOT_NAME: &str = "root";

/// Load failures: malformed JSON text, or JSON that is not tree-shaped.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not a tree: {0}")]
    InvalidShape(String),
}

/// Persisted kind tag. Error placeholders save as plain files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavedKind {
    Folder,
    File,
}

/// One node of a persisted tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedNode {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SavedKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SavedNode>>,
    #[serde(rename = "pinnedOrder", default, skip_serializing_if = "Option::is_none")]
    pub pinned_order: Option<u64>,
}

/// Snapshot a store for saving.
///
/// Children keep their storage order; display order is recomputed on
/// render, so it is not a persisted property.
pub fn to_snapshot(store: &TreeStore) -> SavedNode {
    saved_node(store, store.root_id())
        // The root always exists in a store
        .unwrap_or(SavedNode {
            name: DEFAULT_ROOT_NAME.to_string(),
            kind: SavedKind::Folder,
            children: Some(Vec::new()),
            pinned_order: None,
        })
}

fn saved_node(store: &TreeStore, id: NodeId) -> Option<SavedNode> {
    let node = store.get(id)?;

    let children = if node.is_folder() {
        Some(
            node.children
                .iter()
                .filter_map(|child| saved_node(store, *child))
                .collect(),
        )
    } else {
        None
    };

    Some(SavedNode {
        name: node.name.clone(),
        kind: saved_kind(node),
        children,
        pinned_order: node.pinned_order,
    })
}

fn saved_kind(node: &Node) -> SavedKind {
    if node.is_folder() {
        SavedKind::Folder
    } else {
        SavedKind::File
    }
}

/// Validate and parse a JSON value into a snapshot.
///
/// The candidate must be an object whose `children` is an array, whose
/// `name` (when present) is a string, and whose `type` tags are known —
/// anything else is rejected before it can replace a live tree.
pub fn snapshot_from_value(value: serde_json::Value) -> Result<SavedNode, LoadError> {
    let children_ok = value
        .as_object()
        .and_then(|obj| obj.get("children"))
        .map(|children| children.is_array())
        .unwrap_or(false);
    if !children_ok {
        return Err(LoadError::InvalidShape(
            "root must be an object with an array of children".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| LoadError::InvalidShape(e.to_string()))
}

/// Parse persisted JSON text into a snapshot.
pub fn from_json_str(text: &str) -> Result<SavedNode, LoadError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    snapshot_from_value(value)
}

/// Rebuild a live store from a snapshot.
///
/// Fresh ids are assigned (root forced to the reserved id), `collapsed`
/// defaults to false everywhere, and the root is always a folder. A
/// persisted `pinnedOrder` is honored only on nodes carrying the pinned
/// sentinel name, preserving the pinned invariant.
pub fn from_snapshot(saved: &SavedNode) -> TreeStore {
    let root_name = if saved.name.trim().is_empty() {
        DEFAULT_ROOT_NAME
    } else {
        saved.name.as_str()
    };

    let mut store = TreeStore::new(root_name);
    if let Some(children) = &saved.children {
        for child in children {
            load_node(&mut store, NodeId::ROOT, child);
        }
    }

    store
}

fn load_node(store: &mut TreeStore, parent: NodeId, saved: &SavedNode) {
    let kind = match saved.kind {
        SavedKind::Folder => NodeKind::Folder,
        SavedKind::File => NodeKind::File,
    };

    let id = store.attach_child(parent, saved.name.clone(), kind);

    if saved.name == PINNED_NAME {
        store.set_pinned_order(id, saved.pinned_order);
    }

    if kind.is_folder() {
        if let Some(children) = &saved.children {
            for child in children {
                load_node(store, id, child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_source::TestClock;
    use crate::tree::render::to_ascii_tree;

    fn sample_store() -> TreeStore {
        let mut store = TreeStore::new("myproj");
        let src = store.attach_child(NodeId::ROOT, "src", NodeKind::Folder);
        store.attach_child(src, "main.ext", NodeKind::File);
        store.attach_child(NodeId::ROOT, "readme.ext", NodeKind::File);
        store
    }

    #[test]
    fn test_snapshot_shape() {
        let snapshot = to_snapshot(&sample_store());

        assert_eq!(snapshot.name, "myproj");
        assert_eq!(snapshot.kind, SavedKind::Folder);
        let children = snapshot.children.as_ref().unwrap();
        assert_eq!(children.len(), 2);

        let src = &children[0];
        assert_eq!(src.name, "src");
        assert_eq!(src.kind, SavedKind::Folder);
        assert_eq!(src.children.as_ref().unwrap().len(), 1);

        let readme = &children[1];
        assert_eq!(readme.kind, SavedKind::File);
        assert_eq!(readme.children, None);
    }

    #[test]
    fn test_json_strips_editor_fields_keeps_pinned_order() {
        let clock = TestClock::shared();
        let mut store = TreeStore::with_clock("root", clock.clone());
        let file = store.insert_child(NodeId::ROOT, NodeKind::File).unwrap();
        clock.set(77);
        store.rename(file, "...").unwrap();
        store.toggle_collapse(NodeId::ROOT);

        let json = serde_json::to_value(to_snapshot(&store)).unwrap();

        assert_eq!(json["type"], "folder");
        assert!(json.get("id").is_none());
        assert!(json.get("collapsed").is_none());
        assert_eq!(json["children"][0]["name"], "...");
        assert_eq!(json["children"][0]["pinnedOrder"], 77);
        assert!(json["children"][0].get("pinnedOrder").is_some());
    }

    #[test]
    fn test_error_nodes_save_as_files() {
        let mut store = TreeStore::new("root");
        let folder = store.attach_child(NodeId::ROOT, "locked", NodeKind::Folder);
        store.demote_to_error(folder);

        let snapshot = to_snapshot(&store);
        let child = &snapshot.children.as_ref().unwrap()[0];
        assert_eq!(child.kind, SavedKind::File);
        assert_eq!(child.children, None);
    }

    #[test]
    fn test_round_trip_preserves_rendering() {
        let store = sample_store();
        let before = to_ascii_tree(&store, store.root_id());

        let text = serde_json::to_string(&to_snapshot(&store)).unwrap();
        let loaded = from_snapshot(&from_json_str(&text).unwrap());
        let after = to_ascii_tree(&loaded, loaded.root_id());

        assert_eq!(before, after);
    }

    #[test]
    fn test_round_trip_preserves_pinned_order() {
        let clock = TestClock::shared();
        let mut store = TreeStore::with_clock("root", clock.clone());
        let file = store.insert_child(NodeId::ROOT, NodeKind::File).unwrap();
        clock.set(123);
        store.rename(file, "...").unwrap();

        let text = serde_json::to_string(&to_snapshot(&store)).unwrap();
        let loaded = from_snapshot(&from_json_str(&text).unwrap());

        let pinned = loaded
            .all_nodes()
            .find(|node| node.name == "...")
            .unwrap();
        assert_eq!(pinned.pinned_order, Some(123));
    }

    #[test]
    fn test_load_reassigns_ids_and_defaults_collapsed() {
        let mut store = TreeStore::new("root");
        let folder = store.attach_child(NodeId::ROOT, "sub", NodeKind::Folder);
        store.toggle_collapse(folder);

        let loaded = from_snapshot(&to_snapshot(&store));

        assert_eq!(loaded.root_id(), NodeId::ROOT);
        let sub = loaded.all_nodes().find(|node| node.name == "sub").unwrap();
        assert!(!sub.collapsed);
        assert_eq!(sub.parent, Some(NodeId::ROOT));
    }

    #[test]
    fn test_load_defaults_missing_root_name() {
        let saved = from_json_str(r#"{"type": "folder", "children": []}"#).unwrap();
        let store = from_snapshot(&saved);

        assert_eq!(store.get(store.root_id()).unwrap().name, "root");
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = from_json_str("{not json");
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn test_shape_validation_rejects_non_trees() {
        // Not an object
        assert!(matches!(
            from_json_str("[1, 2, 3]"),
            Err(LoadError::InvalidShape(_))
        ));
        // Missing children
        assert!(matches!(
            from_json_str(r#"{"name": "x", "type": "folder"}"#),
            Err(LoadError::InvalidShape(_))
        ));
        // children not an array
        assert!(matches!(
            from_json_str(r#"{"name": "x", "type": "folder", "children": 5}"#),
            Err(LoadError::InvalidShape(_))
        ));
        // Unknown kind tag
        assert!(matches!(
            from_json_str(r#"{"name": "x", "type": "symlink", "children": []}"#),
            Err(LoadError::InvalidShape(_))
        ));
        // Non-string name
        assert!(matches!(
            from_json_str(r#"{"name": 3, "type": "folder", "children": []}"#),
            Err(LoadError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_pinned_order_dropped_on_non_sentinel_names() {
        let saved = from_json_str(
            r#"{"type": "folder", "children": [
                {"name": "a.txt", "type": "file", "pinnedOrder": 9}
            ]}"#,
        )
        .unwrap();
        let store = from_snapshot(&saved);

        let node = store.all_nodes().find(|n| n.name == "a.txt").unwrap();
        assert_eq!(node.pinned_order, None);
    }

    #[test]
    fn test_folder_with_absent_children_loads_empty() {
        let saved = from_json_str(
            r#"{"type": "folder", "children": [
                {"name": "sub", "type": "folder"}
            ]}"#,
        )
        .unwrap();
        let store = from_snapshot(&saved);

        let sub = store.all_nodes().find(|n| n.name == "sub").unwrap();
        assert!(sub.is_folder());
        assert!(sub.children.is_empty());
    }
}

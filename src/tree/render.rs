//! Pure text rendering of a tree.
//!
//! Both formats walk the full subtree depth-first in display order,
//! regardless of collapsed state (collapsing is an editor-view concern,
//! see `tree::view`). Two calls on an unmodified tree always produce
//! identical strings: siblings are re-sorted at every level, so arena
//! insertion order never shows through.

use super::node::NodeId;
use super::store::TreeStore;

/// Render a subtree as ASCII art.
///
/// The node passed in is rendered as a bare name line; every descendant
/// gets a `├── `/`└── ` connector and inherits `│   ` or four spaces of
/// indent from its parent.
pub fn to_ascii_tree(store: &TreeStore, id: NodeId) -> String {
    let mut out = String::new();

    let Some(node) = store.get(id) else {
        return out;
    };
    out.push_str(&node.name);
    out.push('\n');

    let children = store.sorted_children(id);
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        ascii_subtree(store, child, "", i + 1 == count, &mut out);
    }

    out
}

fn ascii_subtree(store: &TreeStore, id: NodeId, indent: &str, is_last: bool, out: &mut String) {
    let Some(node) = store.get(id) else {
        return;
    };

    let connector = if is_last { "└── " } else { "├── " };
    out.push_str(indent);
    out.push_str(connector);
    out.push_str(&node.name);
    out.push('\n');

    let child_indent = format!("{indent}{}", if is_last { "    " } else { "│   " });
    let children = store.sorted_children(id);
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        ascii_subtree(store, child, &child_indent, i + 1 == count, out);
    }
}

/// Render a subtree as list markup.
///
/// Each node becomes `<2*level spaces>- <name>`, with the node passed in
/// at level 0. Same display order as the ASCII format.
pub fn to_list_tree(store: &TreeStore, id: NodeId) -> String {
    let mut out = String::new();
    list_subtree(store, id, 0, &mut out);
    out
}

fn list_subtree(store: &TreeStore, id: NodeId, level: usize, out: &mut String) {
    let Some(node) = store.get(id) else {
        return;
    };

    for _ in 0..level {
        out.push_str("  ");
    }
    out.push_str("- ");
    out.push_str(&node.name);
    out.push('\n');

    for child in store.sorted_children(id) {
        list_subtree(store, child, level + 1, out);
    }
}

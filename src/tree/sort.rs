//! Sibling ordering shared by rendering and the editor view.
//!
//! The order is total: folders before files (error placeholders bucket
//! with files), unpinned entries before pinned ones, pinned entries by
//! ascending key, and names compared case-insensitively otherwise.

use super::node::Node;
use std::cmp::Ordering;

/// Compare two sibling nodes for display order.
///
/// Recomputed on every render; never persisted as storage order.
pub fn sibling_order(a: &Node, b: &Node) -> Ordering {
    match (a.is_folder(), b.is_folder()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    match (a.pinned_order, b.pinned_order) {
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| name_order(a, b)),
        (None, None) => name_order(a, b),
    }
}

fn name_order(a: &Node, b: &Node) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

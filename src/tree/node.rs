use std::fmt;

/// Name that pins a node to the end of its sibling group when sorting.
pub const PINNED_NAME: &str = "...";

/// Unique identifier for a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    /// The root node of a store always has this id
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// The kind of a node in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A directory - can have children
    Folder,
    /// A regular file - no children
    File,
    /// Placeholder for a path that could not be read. No children,
    /// not a valid target for inserts.
    Error,
}

impl NodeKind {
    pub const fn is_folder(self) -> bool {
        matches!(self, NodeKind::Folder)
    }

    pub const fn is_file(self) -> bool {
        matches!(self, NodeKind::File)
    }

    pub const fn is_error(self) -> bool {
        matches!(self, NodeKind::Error)
    }
}

/// A single node in the editable tree
///
/// Nodes live in an arena owned by `TreeStore` and reference each other
/// by id. `collapsed` is editor-view state and is meaningful only for
/// folders; `pinned_order` is present exactly while the node carries the
/// pinned sentinel name.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier within the owning store
    pub id: NodeId,
    /// Display name (basename for filesystem-derived nodes)
    pub name: String,
    pub kind: NodeKind,
    /// Parent node id (None for the root)
    pub parent: Option<NodeId>,
    /// Child node ids, in storage order (rendering re-sorts)
    pub children: Vec<NodeId>,
    /// Whether an editor view hides this folder's subtree
    pub collapsed: bool,
    /// Sort key forcing the node after unpinned same-kind siblings
    pub pinned_order: Option<u64>,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            parent,
            children: Vec::new(),
            collapsed: false,
            pinned_order: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_order.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new(NodeId(3), "file.txt", NodeKind::File, Some(NodeId::ROOT));

        assert_eq!(node.id, NodeId(3));
        assert_eq!(node.name, "file.txt");
        assert_eq!(node.parent, Some(NodeId::ROOT));
        assert!(node.is_file());
        assert!(!node.is_folder());
        assert!(node.children.is_empty());
        assert!(!node.collapsed);
        assert!(!node.is_pinned());
    }

    #[test]
    fn test_root_id_is_reserved() {
        assert_eq!(NodeId::ROOT, NodeId(0));
        assert_eq!(NodeId::ROOT.to_string(), "Node(0)");
    }

    #[test]
    fn test_kind_predicates() {
        assert!(NodeKind::Folder.is_folder());
        assert!(!NodeKind::Folder.is_file());
        assert!(NodeKind::File.is_file());
        assert!(NodeKind::Error.is_error());
        assert!(!NodeKind::Error.is_folder());
    }
}

//! End-to-end: scan a real directory, edit the tree, render it, and
//! round-trip it through the persisted JSON form.

use std::fs;
use tempfile::TempDir;
use treescribe::services::fs::LocalFsBackend;
use treescribe::tree::{self, NodeKind, ScanOptions, TreeView};

/// myproj/
///   src/ -> main.ext, util.ext
///   readme.ext
///   dist/            (explicitly ignored)
fn make_fixture() -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("myproj");

    fs::create_dir(&root).unwrap();
    fs::create_dir(root.join("src")).unwrap();
    fs::write(root.join("src/main.ext"), "").unwrap();
    fs::write(root.join("src/util.ext"), "").unwrap();
    fs::write(root.join("readme.ext"), "").unwrap();
    fs::create_dir(root.join("dist")).unwrap();

    (temp, root)
}

fn scan_options() -> ScanOptions {
    ScanOptions {
        ignore_names: ["dist".to_string()].into_iter().collect(),
        use_ignore_file: true,
    }
}

#[tokio::test]
async fn scan_and_render_expected_ascii() {
    let (_temp, root) = make_fixture();
    let backend = LocalFsBackend::new();

    let store = tree::build(&backend, &root, &scan_options()).await.unwrap();

    let expected = "\
myproj
├── src
│   ├── main.ext
│   └── util.ext
└── readme.ext
";
    assert_eq!(tree::to_ascii_tree(&store, store.root_id()), expected);
}

#[tokio::test]
async fn scan_edit_save_load_preserves_rendering() {
    let (_temp, root) = make_fixture();
    let backend = LocalFsBackend::new();

    let mut store = tree::build(&backend, &root, &scan_options()).await.unwrap();

    // Edit: add a folder, name it, pin a file to the end
    let root = store.root_id();
    let mut view = TreeView::new();
    let docs = view
        .insert_and_edit(&mut store, root, NodeKind::Folder)
        .unwrap();
    store.rename(docs, "docs").unwrap();
    view.finish_rename();

    let notes = store
        .insert_child(store.root_id(), NodeKind::File)
        .unwrap();
    store.rename(notes, "...").unwrap();

    let before = tree::to_ascii_tree(&store, store.root_id());
    // Folders sort first, the pinned file last
    assert!(before.starts_with("myproj\n├── "));
    assert!(before.ends_with("└── ...\n"));

    // Round-trip through the persisted JSON form
    let json = serde_json::to_string_pretty(&tree::to_snapshot(&store)).unwrap();
    let loaded = tree::from_snapshot(&tree::from_json_str(&json).unwrap());
    let after = tree::to_ascii_tree(&loaded, loaded.root_id());

    assert_eq!(before, after);
}

#[tokio::test]
async fn list_format_matches_structure() {
    let (_temp, root) = make_fixture();
    let backend = LocalFsBackend::new();

    let store = tree::build(&backend, &root, &scan_options()).await.unwrap();

    let expected = "\
- myproj
  - src
    - main.ext
    - util.ext
  - readme.ext
";
    assert_eq!(tree::to_list_tree(&store, store.root_id()), expected);
}

//! Internal node tests against a file-backed page store.

use bplus_node::storage::DiskManager;
use bplus_node::{Error, InternalNode, PageId, PageStore, INTERNAL_MAX_KEYS};
use tempfile::tempdir;

fn create_dm() -> (DiskManager, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.idx");
    let dm = DiskManager::create(&path).unwrap();
    (dm, dir)
}

/// Full node with keys 1..=N and child i at `PageId(1000 + i)`.
fn full_node() -> InternalNode {
    let mut node = InternalNode::new();
    node.initialize_root(PageId::new(1000), 1, PageId::new(1001))
        .unwrap();
    for k in 2..=INTERNAL_MAX_KEYS as i32 {
        node.insert(k, PageId::new(1000 + k as u32)).unwrap();
    }
    node
}

// ============================================================================
// Round-trip
// ============================================================================

#[test]
fn test_write_read_roundtrip() {
    let (mut dm, _dir) = create_dm();
    let pid = dm.allocate_page().unwrap();

    let node = full_node();
    node.write(pid, &mut dm).unwrap();

    let mut loaded = InternalNode::new();
    loaded.read(pid, &mut dm).unwrap();

    assert_eq!(loaded.key_count(), INTERNAL_MAX_KEYS);
    for i in 0..INTERNAL_MAX_KEYS {
        assert_eq!(loaded.key_at(i).unwrap(), node.key_at(i).unwrap());
    }
    for i in 0..=INTERNAL_MAX_KEYS {
        assert_eq!(loaded.child_at(i).unwrap(), node.child_at(i).unwrap());
    }
}

/// Routing survives persistence.
#[test]
fn test_routing_after_reload() {
    let (mut dm, _dir) = create_dm();
    let pid = dm.allocate_page().unwrap();

    let (a, b, c) = (PageId::new(1), PageId::new(2), PageId::new(3));
    let mut root = InternalNode::new();
    root.initialize_root(a, 10, b).unwrap();
    root.insert(20, c).unwrap();
    root.write(pid, &mut dm).unwrap();

    let mut loaded = InternalNode::new();
    loaded.read(pid, &mut dm).unwrap();

    assert_eq!(loaded.locate_child_ptr(5).unwrap(), a);
    assert_eq!(loaded.locate_child_ptr(15).unwrap(), b);
    assert_eq!(loaded.locate_child_ptr(20).unwrap(), c);
    assert_eq!(loaded.locate_child_ptr(25).unwrap(), c);
}

// ============================================================================
// Split
// ============================================================================

/// Push-up split of a full node, persisted and reloaded.
#[test]
fn test_split_full_node_on_disk() {
    let (mut dm, _dir) = create_dm();
    let left_pid = dm.allocate_page().unwrap();
    let right_pid = dm.allocate_page().unwrap();

    let mut left = full_node();
    let mut right = InternalNode::new();

    // New key past the end with child 9999
    let new_key = INTERNAL_MAX_KEYS as i32 + 1;
    let mid = left
        .insert_and_split(new_key, PageId::new(9999), &mut right)
        .unwrap();

    left.write(left_pid, &mut dm).unwrap();
    right.write(right_pid, &mut dm).unwrap();

    let mut left = InternalNode::new();
    let mut right = InternalNode::new();
    left.read(left_pid, &mut dm).unwrap();
    right.read(right_pid, &mut dm).unwrap();

    // 127 keys in total: 63 | mid | 63
    assert_eq!(left.key_count(), 63);
    assert_eq!(right.key_count(), 63);
    assert_eq!(mid, 64);

    // The middle key's right child leads the sibling
    assert_eq!(right.child_at(0).unwrap(), PageId::new(1000 + 64));
    assert_eq!(left.child_at(63).unwrap(), PageId::new(1000 + 63));
    assert_eq!(right.child_at(63).unwrap(), PageId::new(9999));

    for i in 0..left.key_count() {
        assert_ne!(left.key_at(i).unwrap(), mid);
    }
    for i in 0..right.key_count() {
        assert_ne!(right.key_at(i).unwrap(), mid);
    }

    assert!(left.is_split_pending());
    assert!(right.is_split_pending());
}

/// Reading a leaf page as an internal node is refused.
#[test]
fn test_kind_mismatch() {
    let (mut dm, _dir) = create_dm();
    let pid = dm.allocate_page().unwrap();
    bplus_node::LeafNode::new().write(pid, &mut dm).unwrap();

    let mut node = InternalNode::new();
    assert!(matches!(
        node.read(pid, &mut dm),
        Err(Error::PageTypeMismatch { .. })
    ));
}

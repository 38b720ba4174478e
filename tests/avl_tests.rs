//! AVL multiset and the plain BST underneath it

use prim_mst::avl::AvlTree;
use prim_mst::bst::Bst;

fn ascending(n: i32) -> AvlTree<i32> {
    let mut tree = AvlTree::new();
    for v in 0..n {
        tree.insert(v);
    }
    tree
}

#[test]
fn empty_tree() {
    let tree: AvlTree<i32> = AvlTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.find(&1), None);
    assert_eq!(tree.to_string(), "EMPTY");
    assert_eq!(
        tree.statistics().to_string(),
        "Duplicates: 0\nNodes: 0\nMinimum depth: -1\nMaximum depth: -1"
    );
    tree.check_invariants().unwrap();
}

#[test]
fn sorted_inserts_stay_balanced() {
    let tree = ascending(1023);
    tree.check_invariants().unwrap();
    let stats = tree.statistics();
    assert_eq!(stats.tree.nodes, 1023);
    // a perfect tree of 1023 nodes has depth 9; AVL stays within 1.44 log n
    assert!(stats.tree.max_depth <= 14, "max depth {}", stats.tree.max_depth);
    assert!(stats.tree.min_depth >= 5);
}

#[test]
fn duplicates_are_counted_not_stored() {
    let mut tree = AvlTree::new();
    for v in [5, 3, 5, 5, 8, 3] {
        tree.insert(v);
    }
    assert_eq!(tree.size(), 3);
    assert_eq!(tree.total(), 6);
    assert_eq!(tree.duplicate_count(), 3);
    assert_eq!(tree.find_count(&5), 3);
    assert_eq!(tree.find_count(&3), 2);
    assert_eq!(tree.find_count(&4), 0);

    let contents: Vec<_> = tree.iter().map(|(&v, c)| (v, c)).collect();
    assert_eq!(contents, vec![(3, 2), (5, 3), (8, 1)]);
}

#[test]
fn delete_decrements_before_pruning() {
    let mut tree = AvlTree::new();
    tree.insert(4);
    tree.insert(4);
    tree.insert(2);

    assert_eq!(tree.delete(4), Some(4));
    assert!(tree.contains(&4));
    assert_eq!(tree.size(), 2);

    assert_eq!(tree.delete(4), Some(4));
    assert!(!tree.contains(&4));
    assert_eq!(tree.size(), 1);

    assert_eq!(tree.delete(4), None);
    assert_eq!(tree.total(), 1);
    tree.check_invariants().unwrap();
}

#[test]
fn delete_returns_stored_value_on_last_copy() {
    // ordering looks at the key only, so the stored pair can be told apart
    #[derive(Debug)]
    struct Keyed(i32, &'static str);
    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }
    impl Eq for Keyed {}
    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Keyed {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.0.cmp(&other.0)
        }
    }

    let mut tree = AvlTree::new();
    tree.insert(Keyed(1, "stored"));
    tree.insert(Keyed(1, "second"));

    let first = tree.delete(Keyed(1, "probe")).unwrap();
    assert_eq!(first.1, "probe");
    let last = tree.delete(Keyed(1, "probe")).unwrap();
    assert_eq!(last.1, "stored");
    assert!(tree.is_empty());
}

#[test]
fn interleaved_deletes_keep_invariants() {
    let mut tree = ascending(200);
    for v in (0..200).step_by(3) {
        assert_eq!(tree.delete(v), Some(v));
        tree.check_invariants().unwrap();
    }
    for v in (0..200).rev().filter(|v| v % 3 != 0) {
        assert_eq!(tree.delete(v), Some(v));
        tree.check_invariants().unwrap();
    }
    assert!(tree.is_empty());
}

#[test]
fn borrowed_lookup() {
    let mut tree = AvlTree::new();
    tree.insert(String::from("beta"));
    tree.insert(String::from("alpha"));
    assert_eq!(tree.find("alpha").map(String::as_str), Some("alpha"));
    assert!(tree.contains("beta"));
    assert!(!tree.contains("gamma"));
}

#[test]
fn decorated_display_after_rotation() {
    let mut tree = AvlTree::new();
    for v in [1, 2, 3, 3] {
        tree.insert(v);
    }
    assert_eq!(tree.to_string(), "0: 2(2)X\n1: =1(2)L =3[2](2)R");

    tree.insert(4);
    assert_eq!(tree.display_decorated(), "0: 2-(2-)X\n1: =1(2-)L 3[2]-(2-)R\n2: =4(3[2]-)R");
}

#[test]
fn statistics_report_depths() {
    let mut tree = ascending(7);
    tree.insert(3);
    assert_eq!(
        tree.statistics().to_string(),
        "Duplicates: 1\nNodes: 7\nMinimum depth: 2\nMaximum depth: 2"
    );
}

#[test]
fn plain_bst_semantics() {
    let mut bst = Bst::new();
    for v in [5, 2, 8, 5, 1] {
        bst.insert(v);
    }
    // equal values are stored again, in the right subtree
    assert_eq!(bst.len(), 5);
    let sorted: Vec<_> = bst.iter().copied().collect();
    assert_eq!(sorted, vec![1, 2, 5, 5, 8]);

    assert_eq!(bst.delete(&5), Some(5));
    assert_eq!(bst.delete(&5), Some(5));
    assert_eq!(bst.delete(&5), None);
    assert_eq!(bst.iter().copied().collect::<Vec<_>>(), vec![1, 2, 8]);

    let root = bst.root().unwrap();
    assert!(bst.is_root(root));
    assert_eq!(bst.depth(root), 0);
}

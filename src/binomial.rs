//! Binomial Heap implementation
//!
//! A binomial heap is a forest of heap-ordered binomial trees with:
//! - O(log n) insert, delete_min and decrease_key
//! - O(log(n + m)) union
//!
//! # Algorithm Overview
//!
//! **Binomial Tree Bₖ**: B₀ is a single node; Bₖ is two B_{k-1} trees where
//! one root becomes the last child of the other. Bₖ has exactly 2ᵏ nodes and
//! its root has k children.
//!
//! **Root list**: after every public operation the root list holds at most
//! one tree per degree, like the set bits of the element count.
//!
//! **Key Operations**:
//! - **Insert**: append a B₀ root, then consolidate
//! - **Consolidate**: drain the root list into a degree-indexed array; a
//!   collision links the two trees and retries one slot higher, exactly like
//!   carry propagation in binary addition. The root list is rebuilt from the
//!   array and the minimum root (the *extreme*) is recomputed.
//! - **Delete-min**: unlink the extreme root, promote its children to roots,
//!   consolidate
//! - **Decrease-key**: overwrite the priority and bubble it up by swapping
//!   *values* with the parent, never tree links
//! - **Union**: concatenate root lists, consolidate
//!
//! # Handles
//!
//! Because decrease-key moves values between nodes, a handle names an
//! *entry* rather than a node. Every value swap rewrites the entry → node
//! table, so a handle keeps following its value wherever bubbling puts it.
//! Both arenas are [`SlotMap`]s; a handle whose entry has been popped is
//! detected by its stale generation and rejected with
//! [`HeapError::InvalidHandle`].
//!
//! # Equal priorities
//!
//! When two roots of the same degree have equal priority, the root already
//! sitting in the consolidation array stays on top.

use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::fmt;
use std::mem;
use tracing::trace;

new_key_type! {
    /// Arena key of a tree node
    struct NodeKey;

    /// Arena key of a stored entry
    struct EntryKey;
}

/// Handle to an entry in a [`BinomialHeap`]
///
/// Stays valid until the entry is popped or deleted, regardless of how the
/// heap reshapes itself in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinomialHandle {
    entry: EntryKey,
}

impl Handle for BinomialHandle {}

/// Internal node structure
///
/// `owner` is the node's position inside the list that holds it: the root
/// list for roots, the parent's `children` otherwise. It lets a root be
/// unlinked without searching for it.
struct Node<T, P> {
    priority: P,
    item: T,
    /// Entry currently stored in this node
    entry: EntryKey,
    /// `None` for roots
    parent: Option<NodeKey>,
    /// Children in link order; the length is the degree
    children: SmallVec<[NodeKey; 4]>,
    owner: usize,
}

/// Binomial Heap
///
/// # Example
///
/// ```rust
/// use prim_mst::binomial::BinomialHeap;
///
/// let mut heap = BinomialHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.insert(3, "other");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Some((&1, &"item")));
/// assert_eq!(heap.delete_min(), Some((1, "item")));
/// assert_eq!(heap.len(), 1);
/// ```
pub struct BinomialHeap<T, P> {
    nodes: SlotMap<NodeKey, Node<T, P>>,
    /// Entry → node currently holding it
    entries: SlotMap<EntryKey, NodeKey>,
    roots: Vec<NodeKey>,
    /// Minimum root, `Some` whenever the heap is non-empty
    extreme: Option<NodeKey>,
}

/// Summary returned by [`BinomialHeap::statistics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStatistics<'a, P> {
    /// Number of entries
    pub size: usize,
    /// Number of trees in the root list
    pub root_count: usize,
    /// Minimum priority, if any
    pub extreme: Option<&'a P>,
}

impl<P: fmt::Display> fmt::Display for HeapStatistics<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "size: {}\nrootlist size: {}", self.size, self.root_count)?;
        if let Some(extreme) = self.extreme {
            write!(f, "\nextreme: {extreme}")?;
        }
        Ok(())
    }
}

impl<T, P: Ord> Default for BinomialHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> BinomialHeap<T, P> {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            entries: SlotMap::with_key(),
            roots: Vec::new(),
            extreme: None,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the heap holds no entries
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts an item and returns a handle to it
    ///
    /// **Time Complexity**: O(log n)
    pub fn insert(&mut self, priority: P, item: T) -> BinomialHandle {
        let entry = self.entries.insert(NodeKey::default());
        let node = self.nodes.insert(Node {
            priority,
            item,
            entry,
            parent: None,
            children: SmallVec::new(),
            owner: self.roots.len(),
        });
        self.entries[entry] = node;
        self.roots.push(node);
        self.consolidate();
        BinomialHandle { entry }
    }

    /// Minimum priority and its item
    ///
    /// **Time Complexity**: O(1)
    pub fn find_min(&self) -> Option<(&P, &T)> {
        let node = &self.nodes[self.extreme?];
        Some((&node.priority, &node.item))
    }

    /// Removes and returns the minimum entry
    ///
    /// **Time Complexity**: O(log n)
    pub fn delete_min(&mut self) -> Option<(P, T)> {
        let extreme = self.extreme?;
        Some(self.remove_root(extreme))
    }

    /// Priority and item of the entry named by `handle`
    pub fn get(&self, handle: &BinomialHandle) -> Option<(&P, &T)> {
        let node = &self.nodes[*self.entries.get(handle.entry)?];
        Some((&node.priority, &node.item))
    }

    /// Returns true if `handle` still names a live entry
    pub fn contains(&self, handle: &BinomialHandle) -> bool {
        self.entries.contains_key(handle.entry)
    }

    /// Lowers the priority of an entry
    ///
    /// **Time Complexity**: O(log n)
    ///
    /// The node's priority is overwritten and then bubbled toward the root by
    /// swapping values with the parent while it compares smaller. An equal
    /// priority is a no-op.
    ///
    /// A greater priority is rejected with [`HeapError::PriorityNotDecreased`]
    /// and the entry keeps its old priority instead of being overwritten; a
    /// raised priority would have to sift down, which this heap never does.
    pub fn decrease_key(
        &mut self,
        handle: &BinomialHandle,
        new_priority: P,
    ) -> Result<(), HeapError> {
        let node = *self
            .entries
            .get(handle.entry)
            .ok_or(HeapError::InvalidHandle)?;

        if new_priority > self.nodes[node].priority {
            return Err(HeapError::PriorityNotDecreased);
        }
        if new_priority == self.nodes[node].priority {
            return Ok(());
        }

        self.nodes[node].priority = new_priority;
        let top = self.bubble_up(node, false);
        let is_new_extreme = match self.extreme {
            Some(extreme) => self.nodes[top].priority < self.nodes[extreme].priority,
            None => true,
        };
        if self.nodes[top].parent.is_none() && is_new_extreme {
            self.extreme = Some(top);
        }
        Ok(())
    }

    /// Removes an arbitrary entry
    ///
    /// Equivalent to decreasing the entry to minus infinity and extracting
    /// the minimum: the value is bubbled all the way to its root and that root
    /// is removed.
    pub fn delete(&mut self, handle: &BinomialHandle) -> Option<(P, T)> {
        let node = *self.entries.get(handle.entry)?;
        let root = self.bubble_up(node, true);
        Some(self.remove_root(root))
    }

    /// Moves every entry of `other` into this heap
    ///
    /// Handles issued by `other` do not carry over; the returned map
    /// translates each of them to its handle in `self`.
    ///
    /// **Time Complexity**: O(m) to move `other`'s nodes, then O(log(n + m))
    /// for the consolidation.
    pub fn union(&mut self, other: Self) -> FxHashMap<BinomialHandle, BinomialHandle> {
        let BinomialHeap {
            nodes: mut donor_nodes,
            roots: donor_roots,
            ..
        } = other;

        let mut handles = FxHashMap::default();
        let mut moved: FxHashMap<NodeKey, NodeKey> = FxHashMap::default();
        moved.reserve(donor_nodes.len());

        for (old_key, node) in donor_nodes.drain() {
            let entry = self.entries.insert(NodeKey::default());
            handles.insert(
                BinomialHandle { entry: node.entry },
                BinomialHandle { entry },
            );
            let new_key = self.nodes.insert(Node { entry, ..node });
            self.entries[entry] = new_key;
            moved.insert(old_key, new_key);
        }

        for &new_key in moved.values() {
            let node = &mut self.nodes[new_key];
            node.parent = node.parent.map(|p| moved[&p]);
            for child in node.children.iter_mut() {
                *child = moved[&*child];
            }
        }

        for old_root in donor_roots {
            let root = moved[&old_root];
            self.nodes[root].owner = self.roots.len();
            self.roots.push(root);
        }

        self.consolidate();
        handles
    }

    /// Degrees of the trees in the root list, ascending
    pub fn root_degrees(&self) -> Vec<usize> {
        self.roots
            .iter()
            .map(|&root| self.nodes[root].children.len())
            .collect()
    }

    /// Entry count, root count and minimum priority
    pub fn statistics(&self) -> HeapStatistics<'_, P> {
        HeapStatistics {
            size: self.len(),
            root_count: self.roots.len(),
            extreme: self.find_min().map(|(p, _)| p),
        }
    }

    /// Verifies heap order, binomial shape, link consistency and the extreme
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut seen_degrees = Vec::new();
        let mut counted = 0;

        for (position, &root) in self.roots.iter().enumerate() {
            let node = &self.nodes[root];
            if node.parent.is_some() {
                return Err("root with a parent link".to_string());
            }
            if node.owner != position {
                return Err(format!("root at {position} records owner {}", node.owner));
            }

            let degree = node.children.len();
            if seen_degrees.contains(&degree) {
                return Err(format!("two roots of degree {degree}"));
            }
            seen_degrees.push(degree);

            let size = self.check_tree(root)?;
            if size != 1 << degree {
                return Err(format!("tree of degree {degree} has {size} nodes"));
            }
            counted += size;
        }

        if counted != self.len() {
            return Err(format!("forest holds {counted} nodes, heap reports {}", self.len()));
        }
        if self.entries.len() != self.nodes.len() {
            return Err("entry table out of step with node arena".to_string());
        }
        for (entry, &node) in self.entries.iter() {
            if self.nodes.get(node).map(|n| n.entry) != Some(entry) {
                return Err("entry table points at the wrong node".to_string());
            }
        }

        match self.extreme {
            None if !self.is_empty() => Err("non-empty heap without an extreme".to_string()),
            None => Ok(()),
            Some(extreme) => {
                let min = &self.nodes[extreme].priority;
                if self.nodes[extreme].parent.is_some() {
                    Err("extreme is not a root".to_string())
                } else if self.roots.iter().any(|&r| self.nodes[r].priority < *min) {
                    Err("extreme is not the minimum root".to_string())
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Returns the number of nodes in the tree rooted at `key`
    fn check_tree(&self, key: NodeKey) -> Result<usize, String> {
        let node = &self.nodes[key];
        let mut size = 1;
        for (position, &child) in node.children.iter().enumerate() {
            let child_node = &self.nodes[child];
            if child_node.parent != Some(key) {
                return Err("child does not point back at its parent".to_string());
            }
            if child_node.owner != position {
                return Err("child records the wrong owner position".to_string());
            }
            if child_node.priority < node.priority {
                return Err("heap order violated".to_string());
            }
            size += self.check_tree(child)?;
        }
        Ok(size)
    }

    /// Unlinks a root, promotes its children and consolidates
    fn remove_root(&mut self, root: NodeKey) -> (P, T) {
        debug_assert!(self.nodes[root].parent.is_none(), "remove_root on a non-root");

        let position = self.nodes[root].owner;
        self.roots.swap_remove(position);
        if let Some(&moved) = self.roots.get(position) {
            self.nodes[moved].owner = position;
        }

        let node = self
            .nodes
            .remove(root)
            .expect("root key belongs to this heap");
        self.entries.remove(node.entry);

        for child in node.children {
            let child_node = &mut self.nodes[child];
            child_node.parent = None;
            child_node.owner = self.roots.len();
            self.roots.push(child);
        }

        self.consolidate();
        (node.priority, node.item)
    }

    /// Rebuilds the root list with at most one tree per degree
    fn consolidate(&mut self) {
        // floor(log2(n)) + 1 covers every reachable degree; one spare slot
        let slots = (usize::BITS - self.nodes.len().leading_zeros()) as usize + 1;
        let mut by_degree: Vec<Option<NodeKey>> = vec![None; slots];

        for root in mem::take(&mut self.roots) {
            self.update_consolidation_array(&mut by_degree, root);
        }

        self.extreme = None;
        for root in by_degree.into_iter().flatten() {
            self.nodes[root].owner = self.roots.len();
            self.roots.push(root);
            let is_smaller = match self.extreme {
                Some(extreme) => self.nodes[root].priority < self.nodes[extreme].priority,
                None => true,
            };
            if is_smaller {
                self.extreme = Some(root);
            }
        }
        trace!(size = self.nodes.len(), roots = self.roots.len(), "consolidated");
    }

    fn update_consolidation_array(&mut self, by_degree: &mut [Option<NodeKey>], root: NodeKey) {
        let mut spot = root;
        let mut degree = self.nodes[spot].children.len();
        while let Some(resident) = by_degree[degree].take() {
            spot = self.combine(spot, resident);
            degree += 1;
        }
        by_degree[degree] = Some(spot);
    }

    /// Links two roots of equal degree; the smaller priority stays on top
    fn combine(&mut self, x: NodeKey, y: NodeKey) -> NodeKey {
        let (parent, child) = if self.nodes[x].priority < self.nodes[y].priority {
            (x, y)
        } else {
            (y, x)
        };
        let position = self.nodes[parent].children.len();
        self.nodes[parent].children.push(child);
        let child_node = &mut self.nodes[child];
        child_node.parent = Some(parent);
        child_node.owner = position;
        parent
    }

    /// Swaps values upward while the node beats its parent
    ///
    /// With `force` the value rises to the root unconditionally, which is how
    /// [`delete`](Self::delete) treats it as minus infinity. Returns the node
    /// that ends up holding the value.
    fn bubble_up(&mut self, mut node: NodeKey, force: bool) -> NodeKey {
        while let Some(parent) = self.nodes[node].parent {
            if !force && self.nodes[node].priority >= self.nodes[parent].priority {
                break;
            }
            self.swap_values(node, parent);
            node = parent;
        }
        node
    }

    fn swap_values(&mut self, a: NodeKey, b: NodeKey) {
        let [x, y] = self
            .nodes
            .get_disjoint_mut([a, b])
            .expect("swap partners are distinct live nodes");
        mem::swap(&mut x.priority, &mut y.priority);
        mem::swap(&mut x.item, &mut y.item);
        mem::swap(&mut x.entry, &mut y.entry);
        let (entry_a, entry_b) = (x.entry, y.entry);
        self.entries[entry_a] = a;
        self.entries[entry_b] = b;
    }
}

impl<T, P: Ord + fmt::Display> BinomialHeap<T, P> {
    /// Root list by degree, `NULL` for missing degrees and `*` on the extreme
    pub fn display_roots(&self) -> String {
        let mut out = String::from("rootlist:");
        let mut roots = self.roots.iter().peekable();
        let mut degree = 0;
        while let Some(&&root) = roots.peek() {
            let node = &self.nodes[root];
            if node.children.len() > degree {
                out.push_str(" NULL");
            } else {
                out.push_str(&format!(" {}", node.priority));
                if self.extreme == Some(root) {
                    out.push('*');
                }
                roots.next();
            }
            degree += 1;
        }
        out
    }
}

impl<T, P: Ord> Heap<T, P> for BinomialHeap<T, P> {
    fn new() -> Self {
        BinomialHeap::new()
    }

    fn is_empty(&self) -> bool {
        BinomialHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        BinomialHeap::len(self)
    }

    fn push(&mut self, priority: P, item: T) {
        self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.find_min()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.delete_min()
    }

    fn merge(&mut self, other: Self) {
        self.union(other);
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for BinomialHeap<T, P> {
    type Handle = BinomialHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.insert(priority, item)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        BinomialHeap::decrease_key(self, handle, new_priority)
    }
}

impl<T, P: Ord + fmt::Debug> fmt::Debug for BinomialHeap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialHeap")
            .field("len", &self.len())
            .field("root_degrees", &self.root_degrees())
            .field("min", &self.find_min().map(|(p, _)| p))
            .finish()
    }
}

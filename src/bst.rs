//! Unbalanced binary search tree over an arena of nodes
//!
//! This is the ordered container underneath [`crate::avl::AvlTree`]. It knows
//! nothing about balance: it places values by `Ord`, hands out [`NodeId`]s,
//! and exposes the parent/left/right links so that a balancing layer can
//! rotate nodes without going through the search path again.
//!
//! Nodes live in a [`SlotMap`], so ids are generational and a pruned node's
//! id can never alias a later one.
//!
//! Equal values are placed in the right subtree. Callers that want set
//! semantics (the AVL layer) look the value up before inserting.

use slotmap::{new_key_type, SlotMap};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::mem;

new_key_type! {
    /// Arena handle for a tree node
    pub struct NodeId;
}

struct Node<V> {
    value: V,
    /// `None` for the root
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Shape summary of a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BstStatistics {
    /// Number of nodes
    pub nodes: usize,
    /// Depth of the shallowest node missing at least one child (-1 if empty)
    pub min_depth: isize,
    /// Depth of the deepest node (-1 if empty)
    pub max_depth: isize,
}

impl fmt::Display for BstStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes: {}", self.nodes)?;
        writeln!(f, "Minimum depth: {}", self.min_depth)?;
        write!(f, "Maximum depth: {}", self.max_depth)
    }
}

/// Binary search tree with arena-allocated nodes
///
/// # Example
///
/// ```rust
/// use prim_mst::bst::Bst;
///
/// let mut tree = Bst::new();
/// for v in [5, 3, 8, 1] {
///     tree.insert(v);
/// }
/// assert!(tree.find(&3).is_some());
/// assert_eq!(tree.delete(&5), Some(5));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 8]);
/// ```
pub struct Bst<V> {
    nodes: SlotMap<NodeId, Node<V>>,
    root: Option<NodeId>,
}

impl<V> Default for Bst<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Bst<V> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node, if any
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    fn node(&self, id: NodeId) -> &Node<V> {
        self.nodes.get(id).expect("node id belongs to this tree")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<V> {
        self.nodes.get_mut(id).expect("node id belongs to this tree")
    }

    /// Value stored at `id`
    pub fn value(&self, id: NodeId) -> &V {
        &self.node(id).value
    }

    /// Mutable access to the value at `id`
    ///
    /// Changing the value's ordering key breaks the search invariant.
    pub fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.node_mut(id).value
    }

    /// Parent of `id`, `None` for the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Left child of `id`
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    /// Right child of `id`
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.node_mut(id).parent = parent;
    }

    pub(crate) fn set_left(&mut self, id: NodeId, left: Option<NodeId>) {
        self.node_mut(id).left = left;
    }

    pub(crate) fn set_right(&mut self, id: NodeId, right: Option<NodeId>) {
        self.node_mut(id).right = right;
    }

    /// Returns true if `id` is the root of the tree
    pub fn is_root(&self, id: NodeId) -> bool {
        self.root == Some(id)
    }

    /// Returns true if `id` has no children
    pub fn is_leaf(&self, id: NodeId) -> bool {
        let node = self.node(id);
        node.left.is_none() && node.right.is_none()
    }

    /// The other child of `id`'s parent
    pub fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        if self.left(parent) == Some(id) {
            self.right(parent)
        } else {
            self.left(parent)
        }
    }

    /// Moves the value at `id` down to a leaf and returns that leaf
    ///
    /// While the node has children, its value is exchanged with its in-order
    /// predecessor (or successor when there is no left subtree). `swap` decides
    /// what an exchange moves; the default [`Bst::delete`] swaps whole values,
    /// the AVL layer keeps per-position height bookkeeping in place.
    pub fn swap_to_leaf<F>(&mut self, id: NodeId, mut swap: F) -> NodeId
    where
        F: FnMut(&mut V, &mut V),
    {
        let mut current = id;
        loop {
            let next = match (self.left(current), self.right(current)) {
                (None, None) => return current,
                (Some(left), _) => self.rightmost(left),
                (None, Some(right)) => self.leftmost(right),
            };
            let [a, b] = self
                .nodes
                .get_disjoint_mut([current, next])
                .expect("swap partners are distinct live nodes");
            swap(&mut a.value, &mut b.value);
            current = next;
        }
    }

    /// Detaches a leaf from the tree and returns its value
    pub fn prune_leaf(&mut self, id: NodeId) -> V {
        debug_assert!(self.is_leaf(id), "prune_leaf called on an interior node");
        match self.parent(id) {
            None => self.root = None,
            Some(parent) => {
                if self.left(parent) == Some(id) {
                    self.set_left(parent, None);
                } else {
                    self.set_right(parent, None);
                }
            }
        }
        self.nodes
            .remove(id)
            .expect("node id belongs to this tree")
            .value
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.left(id) {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.right(id) {
            id = right;
        }
        id
    }

    /// Depth of `id` (the root has depth 0)
    pub fn depth(&self, mut id: NodeId) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.parent(id) {
            depth += 1;
            id = parent;
        }
        depth
    }

    /// Node ids grouped by depth, left to right
    pub fn levels(&self) -> Vec<Vec<NodeId>> {
        let mut levels = Vec::new();
        let mut queue: VecDeque<(NodeId, usize)> = self.root.into_iter().map(|r| (r, 0)).collect();
        while let Some((id, depth)) = queue.pop_front() {
            if levels.len() == depth {
                levels.push(Vec::new());
            }
            levels[depth].push(id);
            if let Some(left) = self.left(id) {
                queue.push_back((left, depth + 1));
            }
            if let Some(right) = self.right(id) {
                queue.push_back((right, depth + 1));
            }
        }
        levels
    }

    /// Node count and depth extremes
    pub fn statistics(&self) -> BstStatistics {
        let mut stats = BstStatistics {
            nodes: self.len(),
            min_depth: -1,
            max_depth: -1,
        };
        for (depth, level) in self.levels().iter().enumerate() {
            let depth = depth as isize;
            stats.max_depth = depth;
            let has_gap = level
                .iter()
                .any(|&id| self.left(id).is_none() || self.right(id).is_none());
            if has_gap && stats.min_depth < 0 {
                stats.min_depth = depth;
            }
        }
        stats
    }

    /// In-order iterator over the stored values
    pub fn iter(&self) -> Iter<'_, V> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// In-order iterator over node ids
    pub(crate) fn ids(&self) -> Ids<'_, V> {
        let mut ids = Ids {
            tree: self,
            stack: Vec::new(),
        };
        ids.push_left_spine(self.root);
        ids
    }

    /// Level-order rendering with a caller-supplied value writer
    ///
    /// Each line is `depth: ` followed by the nodes at that depth. A node is
    /// written as `=` (leaves only), the value, `(parent)`, and `X`, `L` or `R`
    /// for root, left child or right child. An empty tree renders `EMPTY`.
    pub fn fmt_levels<W>(&self, f: &mut fmt::Formatter<'_>, write_value: W) -> fmt::Result
    where
        W: Fn(&V, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        let levels = self.levels();
        if levels.is_empty() {
            return write!(f, "EMPTY");
        }
        for (depth, level) in levels.iter().enumerate() {
            if depth > 0 {
                writeln!(f)?;
            }
            write!(f, "{depth}: ")?;
            for (i, &id) in level.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                if self.is_leaf(id) {
                    write!(f, "=")?;
                }
                write_value(self.value(id), f)?;
                write!(f, "(")?;
                match self.parent(id) {
                    None => {
                        write_value(self.value(id), f)?;
                        write!(f, ")X")?;
                    }
                    Some(parent) => {
                        write_value(self.value(parent), f)?;
                        let side = if self.left(parent) == Some(id) { 'L' } else { 'R' };
                        write!(f, "){side}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl<V: Ord> Bst<V> {
    /// Finds the node holding a value equal to `key`
    pub fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            current = match key.cmp(self.value(id).borrow()) {
                Ordering::Less => self.left(id),
                Ordering::Greater => self.right(id),
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Inserts `value` as a new leaf and returns its node
    pub fn insert(&mut self, value: V) -> NodeId {
        let mut parent = None;
        let mut go_left = false;
        let mut current = self.root;
        while let Some(id) = current {
            parent = Some(id);
            go_left = value < *self.value(id);
            current = if go_left { self.left(id) } else { self.right(id) };
        }

        let id = self.nodes.insert(Node {
            value,
            parent,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(id),
            Some(p) if go_left => self.set_left(p, Some(id)),
            Some(p) => self.set_right(p, Some(id)),
        }
        id
    }

    /// Removes one value equal to `key` without rebalancing
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key)?;
        let leaf = self.swap_to_leaf(id, mem::swap);
        Some(self.prune_leaf(leaf))
    }
}

impl<V: fmt::Display> fmt::Display for Bst<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_levels(f, |v, f| write!(f, "{v}"))
    }
}

/// In-order iterator returned by [`Bst::iter`]
pub struct Iter<'a, V> {
    tree: &'a Bst<V>,
    stack: Vec<NodeId>,
}

impl<V> Iter<'_, V> {
    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.tree.left(id);
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.tree.right(id));
        Some(self.tree.value(id))
    }
}

pub(crate) struct Ids<'a, V> {
    tree: &'a Bst<V>,
    stack: Vec<NodeId>,
}

impl<V> Ids<'_, V> {
    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.tree.left(id);
        }
    }
}

impl<V> Iterator for Ids<'_, V> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.tree.right(id));
        Some(id)
    }
}

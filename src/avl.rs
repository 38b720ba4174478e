//! AVL multiset
//!
//! A height-balanced search tree built on [`Bst`](crate::bst::Bst). Every
//! distinct value occupies one node carrying a duplicate counter; inserting an
//! equal value bumps the counter instead of growing the tree.
//!
//! # Algorithm Overview
//!
//! Each node caches the heights of its two subtrees. The *balance* is
//! `left_height - right_height` and must stay within `-1..=1`. The child on
//! the heavier side is the node's *favorite*; a balanced node has none.
//!
//! **Insertion fixup** walks up from the new leaf and stops after at most one
//! restructuring:
//! - parent favored the sibling: the parent is now balanced, stop
//! - parent was balanced: it grew, continue from the parent
//! - parent favored this side: rotate once (linear chain) or twice
//!   (zig-zag), then stop
//!
//! **Deletion fixup** walks up from the leaf about to be pruned and may
//! rotate at every level up to the root:
//! - leaf side was the favorite: the parent shrank, continue
//! - parent was balanced: it now leans away, stop
//! - parent favored the sibling: rotate, and continue unless the rotation
//!   preserved the subtree height
//!
//! A chain grandchild-child-parent is *linear* when both steps descend on the
//! same side (single rotation) and *zig-zag* otherwise (double rotation).

use crate::bst::{Bst, BstStatistics, NodeId};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

/// A stored value with its multiplicity and balance bookkeeping
///
/// Ordering and equality look only at the value, so a bare `T` can be used to
/// probe the tree through [`Borrow`].
struct AvlValue<T> {
    value: T,
    count: usize,
    left_height: usize,
    right_height: usize,
    height: usize,
}

impl<T> AvlValue<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            count: 1,
            left_height: 0,
            right_height: 0,
            height: 1,
        }
    }

    fn balance(&self) -> isize {
        self.left_height as isize - self.right_height as isize
    }

    fn set_heights(&mut self, left: usize, right: usize) {
        self.left_height = left;
        self.right_height = right;
        self.height = left.max(right) + 1;
    }
}

impl<T: Ord> PartialEq for AvlValue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Ord> Eq for AvlValue<T> {}

impl<T: Ord> PartialOrd for AvlValue<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for AvlValue<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Borrow<T> for AvlValue<T> {
    fn borrow(&self) -> &T {
        &self.value
    }
}

/// Moves value and multiplicity between positions; heights stay put
fn swap_payload<T>(a: &mut AvlValue<T>, b: &mut AvlValue<T>) {
    mem::swap(&mut a.value, &mut b.value);
    mem::swap(&mut a.count, &mut b.count);
}

/// Shape summary of an [`AvlTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvlStatistics {
    /// Inserts that landed on an existing value
    pub duplicates: usize,
    /// Shape of the underlying tree
    pub tree: BstStatistics,
}

impl fmt::Display for AvlStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Duplicates: {}", self.duplicates)?;
        write!(f, "{}", self.tree)
    }
}

/// Height-balanced multiset
///
/// # Example
///
/// ```rust
/// use prim_mst::avl::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(7);
/// tree.insert(7);
/// tree.insert(3);
///
/// assert_eq!(tree.find_count(&7), 2);
/// assert_eq!(tree.size(), 2);
/// assert_eq!(tree.duplicate_count(), 1);
///
/// assert_eq!(tree.delete(7), Some(7));
/// assert_eq!(tree.find_count(&7), 1);
/// ```
pub struct AvlTree<T> {
    store: Bst<AvlValue<T>>,
    /// Total number of inserted copies, duplicates included
    total: usize,
}

impl<T: Ord> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> AvlTree<T> {
    /// Creates an empty multiset
    pub fn new() -> Self {
        Self {
            store: Bst::new(),
            total: 0,
        }
    }

    /// Number of distinct values
    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Number of stored copies, duplicates included
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of copies beyond the first of each distinct value
    pub fn duplicate_count(&self) -> usize {
        self.total - self.store.len()
    }

    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Inserts one copy of `value`
    ///
    /// If an equal value is already present its counter is incremented and
    /// `value` is dropped.
    pub fn insert(&mut self, value: T) {
        self.total += 1;
        if let Some(id) = self.store.find(&value) {
            self.store.value_mut(id).count += 1;
            return;
        }
        let id = self.store.insert(AvlValue::new(value));
        self.insertion_fixup(id);
    }

    /// Returns the stored value equal to `key`
    pub fn find<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_node(key)?;
        Some(&self.store.value(id).value)
    }

    /// Number of copies of `key` currently stored
    pub fn find_count<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key)
            .map_or(0, |id| self.store.value(id).count)
    }

    /// Returns true if at least one copy of `key` is stored
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Removes one copy of `value`
    ///
    /// Returns `None` if no equal value is stored. When other copies remain,
    /// the counter is decremented and the argument itself is handed back;
    /// when the last copy goes, the node is pruned and the stored value is
    /// returned.
    pub fn delete(&mut self, value: T) -> Option<T> {
        let id = self.store.find(&value)?;
        self.total -= 1;

        if self.store.value(id).count > 1 {
            self.store.value_mut(id).count -= 1;
            return Some(value);
        }

        let leaf = self.store.swap_to_leaf(id, swap_payload);
        let parent = self.store.parent(leaf);
        self.deletion_fixup(leaf);
        let removed = self.store.prune_leaf(leaf);
        if let Some(parent) = parent {
            // the fixup already counted the leaf as height 0, so this only
            // refreshes the parent's cache after the link is gone
            self.set_balance(parent);
        }
        Some(removed.value)
    }

    /// In-order iterator over `(value, count)`
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.store.iter().map(|v| (&v.value, v.count))
    }

    /// Duplicate total plus tree shape
    pub fn statistics(&self) -> AvlStatistics {
        AvlStatistics {
            duplicates: self.duplicate_count(),
            tree: self.store.statistics(),
        }
    }

    /// Checks ordering, parent links, cached heights and the balance bound
    pub fn check_invariants(&self) -> Result<(), String> {
        if let Some(root) = self.store.root() {
            if self.store.parent(root).is_some() {
                return Err("root has a parent".to_string());
            }
            self.check_subtree(root)?;
        }

        let mut previous: Option<&T> = None;
        let mut copies = 0;
        for id in self.store.ids() {
            let node = self.store.value(id);
            if node.count == 0 {
                return Err("node with zero count".to_string());
            }
            copies += node.count;
            if let Some(prev) = previous {
                if prev >= &node.value {
                    return Err("in-order traversal is not strictly increasing".to_string());
                }
            }
            previous = Some(&node.value);
        }
        if copies != self.total {
            return Err(format!("counted {copies} copies, expected {}", self.total));
        }
        Ok(())
    }

    /// Returns the true height of the subtree at `id`
    fn check_subtree(&self, id: NodeId) -> Result<usize, String> {
        let mut heights = [0usize; 2];
        for (slot, child) in [self.store.left(id), self.store.right(id)].into_iter().enumerate() {
            if let Some(child) = child {
                if self.store.parent(child) != Some(id) {
                    return Err("child does not point back at its parent".to_string());
                }
                heights[slot] = self.check_subtree(child)?;
            }
        }

        let node = self.store.value(id);
        let [left, right] = heights;
        if node.left_height != left || node.right_height != right {
            return Err(format!(
                "cached heights ({}, {}) differ from actual ({left}, {right})",
                node.left_height, node.right_height
            ));
        }
        if left.abs_diff(right) > 1 {
            return Err(format!("node is out of balance: {left} vs {right}"));
        }
        Ok(left.max(right) + 1)
    }
}

impl<T> AvlTree<T> {
    fn find_node<Q>(&self, key: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.store.root();
        while let Some(id) = current {
            current = match key.cmp(self.store.value(id).value.borrow()) {
                Ordering::Less => self.store.left(id),
                Ordering::Greater => self.store.right(id),
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    fn height(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self.store.value(id).height)
    }

    /// Recomputes the cached heights of `id` from its children
    fn set_balance(&mut self, id: NodeId) {
        let left = self.height(self.store.left(id));
        let right = self.height(self.store.right(id));
        self.store.value_mut(id).set_heights(left, right);
    }

    fn favorite_child(&self, id: NodeId) -> Option<NodeId> {
        match self.store.value(id).balance() {
            1 => self.store.left(id),
            -1 => self.store.right(id),
            _ => None,
        }
    }

    fn is_linear(&self, child: NodeId, parent: NodeId, grandparent: NodeId) -> bool {
        let left_left =
            self.store.left(grandparent) == Some(parent) && self.store.left(parent) == Some(child);
        let right_right =
            self.store.right(grandparent) == Some(parent) && self.store.right(parent) == Some(child);
        left_left || right_right
    }

    /// Rotates `child` up into the position of its parent `parent`
    fn rotate_to(&mut self, child: NodeId, parent: NodeId) {
        let grandparent = self.store.parent(parent);
        if self.store.left(parent) == Some(child) {
            // right rotation
            let inner = self.store.right(child);
            self.store.set_left(parent, inner);
            if let Some(inner) = inner {
                self.store.set_parent(inner, Some(parent));
            }
            self.store.set_right(child, Some(parent));
        } else {
            // left rotation
            let inner = self.store.left(child);
            self.store.set_right(parent, inner);
            if let Some(inner) = inner {
                self.store.set_parent(inner, Some(parent));
            }
            self.store.set_left(child, Some(parent));
        }
        self.store.set_parent(parent, Some(child));
        self.store.set_parent(child, grandparent);

        match grandparent {
            None => self.store.set_root(Some(child)),
            Some(gp) if self.store.left(gp) == Some(parent) => self.store.set_left(gp, Some(child)),
            Some(gp) => self.store.set_right(gp, Some(child)),
        }
    }

    fn insertion_fixup(&mut self, mut x: NodeId) {
        while let Some(p) = self.store.parent(x) {
            let favorite = self.favorite_child(p);
            let sibling = self.store.sibling(x);

            if sibling.is_some() && sibling == favorite {
                self.set_balance(p);
                return;
            }
            if favorite.is_none() {
                self.set_balance(p);
                x = p;
                continue;
            }

            match self.favorite_child(x) {
                Some(y) if !self.is_linear(y, x, p) => {
                    self.rotate_to(y, x);
                    self.rotate_to(y, p);
                    self.set_balance(x);
                    self.set_balance(p);
                    self.set_balance(y);
                }
                _ => {
                    self.rotate_to(x, p);
                    self.set_balance(p);
                    self.set_balance(x);
                }
            }
            return;
        }
    }

    fn deletion_fixup(&mut self, leaf: NodeId) {
        {
            let node = self.store.value_mut(leaf);
            node.height = 0;
        }

        let mut x = leaf;
        while let Some(p) = self.store.parent(x) {
            let favorite = self.favorite_child(p);

            if favorite == Some(x) {
                self.set_balance(p);
                x = p;
                continue;
            }
            if favorite.is_none() {
                self.set_balance(p);
                return;
            }

            let z = self
                .store
                .sibling(x)
                .expect("a parent leaning away from x has a child on the other side");
            match self.favorite_child(z) {
                Some(y) if !self.is_linear(y, z, p) => {
                    self.rotate_to(y, z);
                    self.rotate_to(y, p);
                    self.set_balance(p);
                    self.set_balance(z);
                    self.set_balance(y);
                    x = y;
                }
                y => {
                    self.rotate_to(z, p);
                    self.set_balance(p);
                    self.set_balance(z);
                    if y.is_none() {
                        // subtree height unchanged
                        return;
                    }
                    x = z;
                }
            }
        }
    }
}

impl<T: fmt::Display> AvlTree<T> {
    /// Level-order rendering with multiplicities and balance marks
    ///
    /// Values appear as `value[count]` when duplicated, followed by `+` for a
    /// left-leaning node or `-` for a right-leaning one.
    pub fn display_decorated(&self) -> String {
        self.to_string()
    }
}

impl<T: fmt::Display> fmt::Display for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.store.fmt_levels(f, |node, f| {
            write!(f, "{}", node.value)?;
            if node.count > 1 {
                write!(f, "[{}]", node.count)?;
            }
            match node.balance() {
                1 => write!(f, "+"),
                -1 => write!(f, "-"),
                _ => Ok(()),
            }
        })
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.store.iter().map(|v| (&v.value, v.count)))
            .finish()
    }
}

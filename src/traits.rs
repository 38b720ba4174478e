//! Priority queue traits shared by the heap and the MST driver
//!
//! Two tiers, so that code which never needs to re-prioritise an entry can be
//! written against the smaller interface:
//!
//! - [`Heap`]: push / peek / pop / merge over `(priority, item)` pairs
//! - [`DecreaseKeyHeap`]: adds stable handles and `decrease_key`, which is what
//!   Prim's algorithm needs to relax a vertex that is already queued

use thiserror::Error;

/// Error type for handle-based heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The new priority is greater than the current priority
    #[error("new priority is greater than the current priority")]
    PriorityNotDecreased,
    /// The handle no longer names a live entry (it was popped or deleted)
    #[error("handle is no longer valid (entry was removed)")]
    InvalidHandle,
}

/// A handle to an entry in a heap
///
/// Handles name the stored value rather than a tree position, so they stay
/// valid while the heap reshapes itself underneath them.
pub trait Handle: Copy + PartialEq + Eq + std::fmt::Debug {}

/// Base trait for min-heaps of `(priority, item)` pairs
///
/// # Example
///
/// ```rust
/// use prim_mst::Heap;
/// use prim_mst::binomial::BinomialHeap;
///
/// let mut heap = BinomialHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// assert_eq!(heap.len(), 2);
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of entries in the heap
    fn len(&self) -> usize;

    /// Inserts an item with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and its item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and its item
    fn pop(&mut self) -> Option<(P, T)>;

    /// Moves every entry of `other` into this heap
    ///
    /// # Time Complexity
    /// O(log(n + m)) for the binomial heap.
    fn merge(&mut self, other: Self);
}

/// Heap with stable handles and `decrease_key`
///
/// # Example
///
/// ```rust
/// use prim_mst::{DecreaseKeyHeap, Heap};
/// use prim_mst::binomial::BinomialHeap;
///
/// let mut heap = BinomialHeap::new();
/// let far = heap.push_with_handle(10, "far");
/// heap.push(5, "near");
/// heap.decrease_key(&far, 1).unwrap();
/// assert_eq!(heap.peek(), Some((&1, &"far")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// Handle type naming a single entry
    type Handle: Handle;

    /// Inserts an item with the given priority, returning a handle to it
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Lowers the priority of the entry named by `handle`
    ///
    /// An equal priority is accepted and leaves the heap unchanged.
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] if the entry has already been removed
    /// - [`HeapError::PriorityNotDecreased`] if `new_priority` is greater than
    ///   the current priority; the heap is not modified
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;
}

//! Common contract for indexed priority queues
//!
//! This module provides the pieces shared by every queue engine in the crate:
//!
//! - [`IndexedMinPq`]: the operation contract all three engines implement
//! - [`Comparator`] / [`NaturalOrder`]: the ordering seam, an explicit value
//!   stored at construction time
//! - [`PqError`]: the failure taxonomy
//!
//! An indexed priority queue references its elements by dense integer
//! indices in `[0, capacity)` supplied by the caller, rather than by opaque
//! handles. That makes membership and key lookup O(1) by index, and it is
//! what algorithms like Dijkstra's shortest path need: "update the priority
//! of vertex `v`" without holding a handle per vertex.

use std::cmp::Ordering;

use thiserror::Error;

/// Error type for indexed priority queue operations
///
/// Every violation is detected before any structural mutation begins; a
/// rejected operation leaves the queue exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PqError {
    /// The index argument lies outside `[0, capacity)`
    #[error("index {index} out of range for capacity {capacity}")]
    InvalidIndex { index: usize, capacity: usize },
    /// `insert` was called on an index that is already in the queue
    #[error("index {0} is already in the queue")]
    DuplicateIndex(usize),
    /// A per-index operation was called on an index that is not in the queue
    #[error("index {0} is not in the queue")]
    AbsentIndex(usize),
    /// `min_index`, `min_key` or `del_min` was called on an empty queue
    #[error("the queue is empty")]
    EmptyQueue,
    /// `decrease_key` was called with a key not strictly smaller than the current one
    #[error("new key is not strictly smaller than the current key")]
    KeyNotDecreased,
    /// `increase_key` was called with a key not strictly larger than the current one
    #[error("new key is not strictly larger than the current key")]
    KeyNotIncreased,
    /// A d-ary queue was constructed with a branching factor below 2
    #[error("branching factor must be at least 2, got {0}")]
    InvalidArity(usize),
}

/// Ordering seam for queue keys
///
/// A comparator is an explicit value handed to the queue at construction and
/// stored alongside it. [`NaturalOrder`] covers the common `K: Ord` case;
/// any `Fn(&K, &K) -> Ordering` closure works for custom orders:
///
/// ```rust
/// use std::cmp::Ordering;
/// use indexed_heaps::{IndexedMinPq, multiway::MultiwayIndexPq};
///
/// // a max-queue over i32, by reversing the comparison
/// let mut pq = MultiwayIndexPq::with_comparator(4, 2, |a: &i32, b: &i32| b.cmp(a)).unwrap();
/// pq.insert(0, 10).unwrap();
/// pq.insert(1, 30).unwrap();
/// assert_eq!(pq.min_index().unwrap(), 1);
/// ```
pub trait Comparator<K> {
    /// Compares two keys, `Ordering::Less` meaning `a` has higher priority
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The default comparator: the key type's own ascending order
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self)(a, b)
    }
}

/// Contract implemented by all indexed min-priority queue engines
///
/// Each engine owns a fixed index space `[0, capacity)` chosen at
/// construction. An index is either *absent* or *live* with exactly one key;
/// it transitions absent→live via [`insert`](Self::insert), live→live via
/// the key-mutation operations, and live→absent via
/// [`delete`](Self::delete) or [`del_min`](Self::del_min). A removed index
/// may be freely reinserted.
///
/// Index arguments are validated against `[0, capacity)` before any
/// engine-specific logic runs, and a rejected operation has no effect.
///
/// # Time Complexity
///
/// | Operation      | Binomial   | Fibonacci       | d-ary          |
/// |----------------|------------|-----------------|----------------|
/// | `insert`       | O(log n)   | O(1)            | O(log_d n)     |
/// | `contains`     | O(1)       | O(1)            | O(1)           |
/// | `min_index`    | O(log n)   | O(1)            | O(1)           |
/// | `del_min`      | O(log n)   | O(log n) amort. | O(d log_d n)   |
/// | `key_of`       | O(1)       | O(1)            | O(1)           |
/// | `decrease_key` | O(log n)   | O(1) amort.     | O(log_d n)     |
/// | `increase_key` | O(log n)   | O(log n) amort. | O(d log_d n)   |
/// | `delete`       | O(log n)   | O(log n) amort. | O(d log_d n)   |
/// | `len`          | O(log n)   | O(1)            | O(1)           |
///
/// # Example
///
/// ```rust
/// use indexed_heaps::{IndexedMinPq, fibonacci::FibonacciIndexPq};
///
/// let mut pq: FibonacciIndexPq<i32> = FibonacciIndexPq::with_capacity(4);
/// pq.insert(2, 30).unwrap();
/// pq.insert(0, 10).unwrap();
/// pq.decrease_key(2, 5).unwrap();
/// assert_eq!(pq.del_min().unwrap(), 2);
/// assert_eq!(pq.del_min().unwrap(), 0);
/// assert!(pq.is_empty());
/// ```
pub trait IndexedMinPq<K> {
    /// Returns the fixed capacity of the index space
    fn capacity(&self) -> usize;

    /// Returns the number of live indices
    fn len(&self) -> usize;

    /// Returns true if no index is live
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reports whether `index` is live
    ///
    /// # Errors
    /// [`PqError::InvalidIndex`] if `index` is out of range.
    fn contains(&self, index: usize) -> Result<bool, PqError>;

    /// Makes `index` live with the given key
    ///
    /// # Errors
    /// [`PqError::InvalidIndex`] if out of range,
    /// [`PqError::DuplicateIndex`] if `index` is already live.
    fn insert(&mut self, index: usize, key: K) -> Result<(), PqError>;

    /// Returns the index holding the minimum key
    ///
    /// # Errors
    /// [`PqError::EmptyQueue`] if the queue is empty.
    fn min_index(&self) -> Result<usize, PqError>;

    /// Returns the minimum key
    ///
    /// # Errors
    /// [`PqError::EmptyQueue`] if the queue is empty.
    fn min_key(&self) -> Result<&K, PqError>;

    /// Removes the index holding the minimum key and returns it
    ///
    /// # Errors
    /// [`PqError::EmptyQueue`] if the queue is empty.
    fn del_min(&mut self) -> Result<usize, PqError>;

    /// Returns the key currently associated with `index`
    ///
    /// # Errors
    /// [`PqError::InvalidIndex`] / [`PqError::AbsentIndex`].
    fn key_of(&self, index: usize) -> Result<&K, PqError>;

    /// Replaces the key of `index`, dispatching to decrease or increase
    ///
    /// A key equal to the current one is a no-op.
    ///
    /// # Errors
    /// [`PqError::InvalidIndex`] / [`PqError::AbsentIndex`].
    fn change_key(&mut self, index: usize, key: K) -> Result<(), PqError>;

    /// Lowers the key of `index` to a strictly smaller value
    ///
    /// # Errors
    /// [`PqError::InvalidIndex`] / [`PqError::AbsentIndex`], and
    /// [`PqError::KeyNotDecreased`] if `key` is not strictly smaller.
    fn decrease_key(&mut self, index: usize, key: K) -> Result<(), PqError>;

    /// Raises the key of `index` to a strictly larger value
    ///
    /// # Errors
    /// [`PqError::InvalidIndex`] / [`PqError::AbsentIndex`], and
    /// [`PqError::KeyNotIncreased`] if `key` is not strictly larger.
    fn increase_key(&mut self, index: usize, key: K) -> Result<(), PqError>;

    /// Removes `index` from the queue entirely
    ///
    /// # Errors
    /// [`PqError::InvalidIndex`] / [`PqError::AbsentIndex`].
    fn delete(&mut self, index: usize) -> Result<(), PqError>;
}

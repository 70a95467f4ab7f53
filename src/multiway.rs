//! d-ary array heap engine
//!
//! A flat array encoding a complete tree of branching factor `d`:
//! - O(log_d n) insert and decrease_key
//! - O(d log_d n) del_min, delete and increase_key
//! - O(1) min lookup, membership and key lookup
//!
//! Three parallel arrays carry the state: `pq[slot] -> index` (the tree),
//! `qp[index] -> slot` (its inverse) and `keys[index]`. The arrays are
//! sized `capacity + d` with the first `d` physical slots reserved as
//! padding, so the child range `d·i+1 ..= d·i+d` and the parent formula
//! `(i-1)/d` need no special-casing at the root. Restructuring is the
//! classic swim (compare with parent, swap while out of order) and sink
//! (swap with the minimum of up to `d` children and descend).
//!
//! Removal swaps the target slot with the last live slot and shrinks the
//! live count; the displaced element is then both sunk and swum, since the
//! direction of imbalance after the swap is unknown (only one of the two
//! moves it).

use std::cmp::Ordering;

use crate::traits::{Comparator, IndexedMinPq, NaturalOrder, PqError};

/// Indexed min-priority queue backed by a d-ary array heap
///
/// # Example
///
/// ```rust
/// use indexed_heaps::{IndexedMinPq, multiway::MultiwayIndexPq};
///
/// let mut pq = MultiwayIndexPq::with_capacity(8, 4).unwrap();
/// pq.insert(4, 25).unwrap();
/// pq.insert(1, 50).unwrap();
/// pq.decrease_key(1, 10).unwrap();
/// assert_eq!(pq.min_index().unwrap(), 1);
/// assert_eq!(pq.del_min().unwrap(), 1);
/// ```
#[derive(Clone)]
pub struct MultiwayIndexPq<K, C = NaturalOrder> {
    /// Branching factor, at least 2
    d: usize,
    /// Number of live indices
    n: usize,
    /// Physical slot -> index, with `d` leading padding slots
    pq: Vec<usize>,
    /// Index -> logical slot
    qp: Vec<Option<usize>>,
    /// Index -> key, `None` while absent
    keys: Vec<Option<K>>,
    cmp: C,
}

impl<K: Ord> MultiwayIndexPq<K> {
    /// Creates an empty queue over the index space `[0, capacity)` with
    /// branching factor `d`, using the key type's natural ascending order
    ///
    /// # Errors
    /// [`PqError::InvalidArity`] if `d < 2`.
    pub fn with_capacity(capacity: usize, d: usize) -> Result<Self, PqError> {
        Self::with_comparator(capacity, d, NaturalOrder)
    }
}

impl<K, C: Comparator<K>> MultiwayIndexPq<K, C> {
    /// Creates an empty queue over `[0, capacity)` with branching factor
    /// `d` and an explicit comparator
    ///
    /// # Errors
    /// [`PqError::InvalidArity`] if `d < 2`.
    pub fn with_comparator(capacity: usize, d: usize, cmp: C) -> Result<Self, PqError> {
        if d < 2 {
            return Err(PqError::InvalidArity(d));
        }
        Ok(Self {
            d,
            n: 0,
            pq: vec![0; capacity + d],
            qp: vec![None; capacity],
            keys: (0..capacity).map(|_| None).collect(),
            cmp,
        })
    }

    fn check_index(&self, index: usize) -> Result<(), PqError> {
        if index >= self.keys.len() {
            return Err(PqError::InvalidIndex {
                index,
                capacity: self.keys.len(),
            });
        }
        Ok(())
    }

    fn slot_of(&self, index: usize) -> Result<usize, PqError> {
        self.check_index(index)?;
        self.qp[index].ok_or(PqError::AbsentIndex(index))
    }

    /// Index stored at a logical slot
    fn index_at(&self, slot: usize) -> usize {
        self.pq[slot + self.d]
    }

    fn key(&self, index: usize) -> &K {
        self.keys[index].as_ref().expect("index must be live")
    }

    /// Compares two logical slots through the stored keys
    fn greater(&self, a: usize, b: usize) -> bool {
        let (i, j) = (self.index_at(a), self.index_at(b));
        self.cmp.compare(self.key(i), self.key(j)) == Ordering::Greater
    }

    /// Exchanges two logical slots, keeping `qp` the inverse of `pq`
    fn exch(&mut self, a: usize, b: usize) {
        let d = self.d;
        self.pq.swap(a + d, b + d);
        let (i, j) = (self.pq[a + d], self.pq[b + d]);
        self.qp[i] = Some(a);
        self.qp[j] = Some(b);
    }

    fn swim(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / self.d;
            if !self.greater(parent, slot) {
                break;
            }
            self.exch(parent, slot);
            slot = parent;
        }
    }

    fn sink(&mut self, mut slot: usize) {
        loop {
            if self.d * slot + 1 >= self.n {
                break;
            }
            let child = self.min_child(slot);
            if !self.greater(slot, child) {
                break;
            }
            self.exch(slot, child);
            slot = child;
        }
    }

    /// Minimum among the up-to-`d` children of `slot`; the caller has
    /// checked that at least one child exists
    fn min_child(&self, slot: usize) -> usize {
        let lo = self.d * slot + 1;
        let hi = (self.d * slot + self.d).min(self.n - 1);
        let mut min = lo;
        for cur in lo + 1..=hi {
            if self.greater(min, cur) {
                min = cur;
            }
        }
        min
    }

    /// Swaps the target with the last live slot, shrinks the live count and
    /// restores order around the displaced element. Returns the removed index.
    fn remove_at(&mut self, slot: usize) -> usize {
        let last = self.n - 1;
        self.exch(slot, last);
        self.n -= 1;
        if slot < self.n {
            // direction of imbalance is unknown; only one of these moves
            self.sink(slot);
            self.swim(slot);
        }
        let index = self.index_at(self.n);
        self.qp[index] = None;
        self.keys[index] = None;
        index
    }

    /// Lazy ascending iterator over the live indices (see [`Ascending`])
    pub fn iter_ascending(&self) -> Ascending<K, C>
    where
        K: Clone,
        C: Clone,
    {
        Ascending { pq: self.clone() }
    }
}

impl<K, C: Comparator<K>> IndexedMinPq<K> for MultiwayIndexPq<K, C> {
    fn capacity(&self) -> usize {
        self.keys.len()
    }

    fn len(&self) -> usize {
        self.n
    }

    fn contains(&self, index: usize) -> Result<bool, PqError> {
        self.check_index(index)?;
        Ok(self.qp[index].is_some())
    }

    fn insert(&mut self, index: usize, key: K) -> Result<(), PqError> {
        self.check_index(index)?;
        if self.qp[index].is_some() {
            return Err(PqError::DuplicateIndex(index));
        }
        let slot = self.n;
        self.qp[index] = Some(slot);
        self.pq[slot + self.d] = index;
        self.keys[index] = Some(key);
        self.n += 1;
        self.swim(slot);
        Ok(())
    }

    fn min_index(&self) -> Result<usize, PqError> {
        if self.n == 0 {
            return Err(PqError::EmptyQueue);
        }
        Ok(self.index_at(0))
    }

    fn min_key(&self) -> Result<&K, PqError> {
        let index = self.min_index()?;
        Ok(self.key(index))
    }

    fn del_min(&mut self) -> Result<usize, PqError> {
        if self.n == 0 {
            return Err(PqError::EmptyQueue);
        }
        Ok(self.remove_at(0))
    }

    fn key_of(&self, index: usize) -> Result<&K, PqError> {
        self.slot_of(index)?;
        Ok(self.key(index))
    }

    fn change_key(&mut self, index: usize, key: K) -> Result<(), PqError> {
        self.slot_of(index)?;
        match self.cmp.compare(&key, self.key(index)) {
            Ordering::Less => self.decrease_key(index, key),
            Ordering::Greater => self.increase_key(index, key),
            Ordering::Equal => Ok(()),
        }
    }

    fn decrease_key(&mut self, index: usize, key: K) -> Result<(), PqError> {
        let slot = self.slot_of(index)?;
        if self.cmp.compare(&key, self.key(index)) != Ordering::Less {
            return Err(PqError::KeyNotDecreased);
        }
        self.keys[index] = Some(key);
        self.swim(slot);
        Ok(())
    }

    fn increase_key(&mut self, index: usize, key: K) -> Result<(), PqError> {
        let slot = self.slot_of(index)?;
        if self.cmp.compare(&key, self.key(index)) != Ordering::Greater {
            return Err(PqError::KeyNotIncreased);
        }
        self.keys[index] = Some(key);
        self.sink(slot);
        Ok(())
    }

    fn delete(&mut self, index: usize) -> Result<(), PqError> {
        let slot = self.slot_of(index)?;
        self.remove_at(slot);
        Ok(())
    }
}

/// Lazy ascending-order iterator over a snapshot of a [`MultiwayIndexPq`]
///
/// Construction clones the live structure; draining the iterator repeatedly
/// extracts the minimum from the clone, so the source queue is never
/// disturbed and mutations made to it afterwards are not reflected. Once
/// drained the iterator is exhausted; it cannot be restarted.
pub struct Ascending<K, C = NaturalOrder> {
    pq: MultiwayIndexPq<K, C>,
}

impl<K, C: Comparator<K>> Iterator for Ascending<K, C> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.pq.del_min().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.pq.len();
        (n, Some(n))
    }
}

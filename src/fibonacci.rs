//! Fibonacci heap engine
//!
//! A circular root ring of heap-ordered trees built by lazy linking:
//! - O(1) insert and min lookup, O(1) amortized decrease_key
//! - O(log n) amortized del_min, delete and increase_key
//!
//! Insertion just splices a singleton into the root ring; all the
//! restructuring debt is paid during `del_min`, whose **consolidate** pass
//! links same-order roots until the orders on the root ring are pairwise
//! distinct. `decrease_key` cuts a violating node out of its parent's child
//! ring and promotes it to a root; the per-node `mark` bit records a first
//! lost child, and a second loss triggers a cascading cut up the ancestor
//! chain. That one-cut-per-mark discipline is what pays for the amortized
//! O(1) bound.
//!
//! # Representation
//!
//! Nodes live in a contiguous arena with one slot per client index; a node
//! never moves, so the slot number *is* the index. Siblings form circular
//! doubly-linked rings through `prev`/`next` slot numbers. An absent index
//! is a slot whose key is `None`. The consolidate order→root table is a
//! call-scoped scratch vector, never instance state.

use std::cmp::Ordering;
use std::mem;

use crate::traits::{Comparator, IndexedMinPq, NaturalOrder, PqError};

#[derive(Clone)]
struct Node<K> {
    /// `None` while the index is absent
    key: Option<K>,
    parent: Option<usize>,
    /// Any one child; the rest are reached through the child's ring
    child: Option<usize>,
    prev: usize,
    next: usize,
    /// Number of children
    order: usize,
    /// Set when the node loses its first child while not a root
    mark: bool,
}

/// Indexed min-priority queue backed by a Fibonacci heap
///
/// # Example
///
/// ```rust
/// use indexed_heaps::{IndexedMinPq, fibonacci::FibonacciIndexPq};
///
/// let mut pq: FibonacciIndexPq<i32> = FibonacciIndexPq::with_capacity(8);
/// pq.insert(4, 25).unwrap();
/// pq.insert(1, 50).unwrap();
/// pq.decrease_key(1, 10).unwrap();
/// assert_eq!(pq.min_index().unwrap(), 1);
/// assert_eq!(pq.del_min().unwrap(), 1);
/// ```
#[derive(Clone)]
pub struct FibonacciIndexPq<K, C = NaturalOrder> {
    nodes: Vec<Node<K>>,
    /// Cached minimum root
    min: Option<usize>,
    len: usize,
    cmp: C,
}

impl<K: Ord> FibonacciIndexPq<K> {
    /// Creates an empty queue over the index space `[0, capacity)` using
    /// the key type's natural ascending order
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_comparator(capacity, NaturalOrder)
    }
}

impl<K, C: Comparator<K>> FibonacciIndexPq<K, C> {
    /// Creates an empty queue over `[0, capacity)` with an explicit comparator
    pub fn with_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: (0..capacity)
                .map(|i| Node {
                    key: None,
                    parent: None,
                    child: None,
                    prev: i,
                    next: i,
                    order: 0,
                    mark: false,
                })
                .collect(),
            min: None,
            len: 0,
            cmp,
        }
    }

    fn check_index(&self, index: usize) -> Result<(), PqError> {
        if index >= self.nodes.len() {
            return Err(PqError::InvalidIndex {
                index,
                capacity: self.nodes.len(),
            });
        }
        Ok(())
    }

    fn check_live(&self, index: usize) -> Result<(), PqError> {
        self.check_index(index)?;
        if self.nodes[index].key.is_none() {
            return Err(PqError::AbsentIndex(index));
        }
        Ok(())
    }

    fn key(&self, x: usize) -> &K {
        self.nodes[x].key.as_ref().expect("node must be live")
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.cmp.compare(self.key(a), self.key(b)) == Ordering::Less
    }

    /// Splices `x` into the ring right after `anchor`; `x`'s old ring
    /// pointers are overwritten
    fn ring_insert_after(&mut self, anchor: usize, x: usize) {
        let next = self.nodes[anchor].next;
        self.nodes[x].prev = anchor;
        self.nodes[x].next = next;
        self.nodes[anchor].next = x;
        self.nodes[next].prev = x;
    }

    /// Unlinks `x` from its ring, leaving it self-looped
    fn ring_remove(&mut self, x: usize) {
        let (p, n) = (self.nodes[x].prev, self.nodes[x].next);
        self.nodes[p].next = n;
        self.nodes[n].prev = p;
        self.nodes[x].prev = x;
        self.nodes[x].next = x;
    }

    /// Makes `x` a root: clears parent and mark, splices it into the root
    /// ring and advances the cached minimum if it now wins
    fn push_root(&mut self, x: usize) {
        self.nodes[x].parent = None;
        self.nodes[x].mark = false;
        match self.min {
            None => {
                self.nodes[x].prev = x;
                self.nodes[x].next = x;
                self.min = Some(x);
            }
            Some(m) => {
                self.ring_insert_after(m, x);
                if self.less(x, m) {
                    self.min = Some(x);
                }
            }
        }
    }

    /// Removes `x` from its parent's child ring and promotes it to a root
    fn cut(&mut self, x: usize) {
        let p = self.nodes[x].parent.expect("cut requires a parent");
        if self.nodes[p].child == Some(x) {
            let next = self.nodes[x].next;
            self.nodes[p].child = if next == x { None } else { Some(next) };
        }
        self.ring_remove(x);
        self.nodes[p].order -= 1;
        self.push_root(x);
    }

    /// Walks up from a node that just lost a child: an unmarked ancestor is
    /// marked and the walk stops; a marked ancestor is cut and the walk
    /// continues from its own parent
    fn cascading_cut(&mut self, mut x: usize) {
        while let Some(p) = self.nodes[x].parent {
            if !self.nodes[x].mark {
                self.nodes[x].mark = true;
                break;
            }
            self.cut(x);
            x = p;
        }
    }

    /// Links root `y` under root `x` (caller guarantees `x`'s key wins)
    fn link(&mut self, y: usize, x: usize) {
        self.nodes[y].parent = Some(x);
        self.nodes[y].mark = false;
        match self.nodes[x].child {
            None => {
                self.nodes[x].child = Some(y);
                self.nodes[y].prev = y;
                self.nodes[y].next = y;
            }
            Some(c) => self.ring_insert_after(c, y),
        }
        self.nodes[x].order += 1;
    }

    /// Links same-order roots until every root has a distinct order, then
    /// rebuilds the root ring and recomputes the minimum. The root ring is
    /// snapshotted into a scratch vector up front so ring surgery during
    /// linking cannot invalidate the walk.
    fn consolidate(&mut self) {
        let start = self.min.expect("consolidate requires a non-empty root ring");
        let mut roots = Vec::new();
        let mut cur = start;
        loop {
            roots.push(cur);
            cur = self.nodes[cur].next;
            if cur == start {
                break;
            }
        }

        // order -> root scratch table, scoped to this call
        let mut table: Vec<Option<usize>> = Vec::new();
        for mut x in roots {
            let mut order = self.nodes[x].order;
            loop {
                while table.len() <= order {
                    table.push(None);
                }
                match table[order].take() {
                    None => {
                        table[order] = Some(x);
                        break;
                    }
                    Some(mut y) => {
                        if self.less(y, x) {
                            mem::swap(&mut x, &mut y);
                        }
                        self.link(y, x);
                        order += 1;
                    }
                }
            }
        }

        self.min = None;
        for x in table.into_iter().flatten() {
            match self.min {
                None => {
                    self.nodes[x].prev = x;
                    self.nodes[x].next = x;
                    self.min = Some(x);
                }
                Some(m) => {
                    self.ring_insert_after(m, x);
                    if self.less(x, m) {
                        self.min = Some(x);
                    }
                }
            }
        }
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

impl<K, C: Comparator<K>> IndexedMinPq<K> for FibonacciIndexPq<K, C> {
    fn capacity(&self) -> usize {
        self.nodes.len()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn contains(&self, index: usize) -> Result<bool, PqError> {
        self.check_index(index)?;
        Ok(self.nodes[index].key.is_some())
    }

    fn insert(&mut self, index: usize, key: K) -> Result<(), PqError> {
        self.check_index(index)?;
        if self.nodes[index].key.is_some() {
            return Err(PqError::DuplicateIndex(index));
        }
        let node = &mut self.nodes[index];
        node.key = Some(key);
        node.child = None;
        node.order = 0;
        self.push_root(index);
        self.len += 1;
        Ok(())
    }

    fn min_index(&self) -> Result<usize, PqError> {
        self.min.ok_or(PqError::EmptyQueue)
    }

    fn min_key(&self) -> Result<&K, PqError> {
        let m = self.min.ok_or(PqError::EmptyQueue)?;
        Ok(self.key(m))
    }

    /// Splices the minimum's children into the root ring as new roots, then
    /// consolidates
    fn del_min(&mut self) -> Result<usize, PqError> {
        let m = self.min.ok_or(PqError::EmptyQueue)?;

        if let Some(first) = self.nodes[m].child.take() {
            let mut kids = Vec::new();
            let mut c = first;
            loop {
                kids.push(c);
                c = self.nodes[c].next;
                if c == first {
                    break;
                }
            }
            for k in kids {
                self.nodes[k].parent = None;
                self.nodes[k].mark = false;
                self.ring_insert_after(m, k);
            }
        }
        self.nodes[m].order = 0;

        let next = self.nodes[m].next;
        self.ring_remove(m);
        self.nodes[m].key = None;
        self.len -= 1;

        if next == m {
            self.min = None;
        } else {
            self.min = Some(next);
            self.consolidate();
        }
        Ok(m)
    }

    fn key_of(&self, index: usize) -> Result<&K, PqError> {
        self.check_live(index)?;
        Ok(self.key(index))
    }

    fn change_key(&mut self, index: usize, key: K) -> Result<(), PqError> {
        self.check_live(index)?;
        match self.cmp.compare(&key, self.key(index)) {
            Ordering::Less => self.decrease_key(index, key),
            Ordering::Greater => self.increase_key(index, key),
            Ordering::Equal => Ok(()),
        }
    }

    fn decrease_key(&mut self, index: usize, key: K) -> Result<(), PqError> {
        self.check_live(index)?;
        if self.cmp.compare(&key, self.key(index)) != Ordering::Less {
            return Err(PqError::KeyNotDecreased);
        }
        self.nodes[index].key = Some(key);

        if let Some(p) = self.nodes[index].parent {
            if self.less(index, p) {
                self.cut(index);
                self.cascading_cut(p);
            }
        }
        let m = self.min.expect("queue is non-empty here");
        if index != m && self.less(index, m) {
            self.min = Some(index);
        }
        Ok(())
    }

    /// Realized as delete followed by reinsert; raising a key in place
    /// would require sinking through child rings the structure cannot
    /// navigate cheaply
    fn increase_key(&mut self, index: usize, key: K) -> Result<(), PqError> {
        self.check_live(index)?;
        if self.cmp.compare(&key, self.key(index)) != Ordering::Greater {
            return Err(PqError::KeyNotIncreased);
        }
        self.delete(index)?;
        self.insert(index, key)
    }

    /// Cuts the node to the root ring (cascading as needed), then treats it
    /// as the minimum and reuses the `del_min` removal path, which never
    /// compares the removed root's key
    fn delete(&mut self, index: usize) -> Result<(), PqError> {
        self.check_live(index)?;
        if let Some(p) = self.nodes[index].parent {
            self.cut(index);
            self.cascading_cut(p);
        }
        self.min = Some(index);
        self.del_min()?;
        Ok(())
    }
}

/// Lazy ascending-order iterator over a snapshot of a [`FibonacciIndexPq`]
///
/// Construction clones the live structure; draining the iterator repeatedly
/// extracts the minimum from the clone, so the source queue is never
/// disturbed and mutations made to it afterwards are not reflected. Once
/// drained the iterator is exhausted; it cannot be restarted.
pub struct Ascending<K, C = NaturalOrder> {
    pq: FibonacciIndexPq<K, C>,
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

#[cfg(test)]
mod tests {
    use super::*;

    /// Audits the whole structure: ring pointer consistency, heap order on
    /// every parent-child edge, child counts matching `order`, unmarked
    /// roots, the cached minimum actually minimal, and liveness matching
    /// the traversal.
    fn assert_valid(pq: &FibonacciIndexPq<i64>) {
        let mut seen = vec![false; pq.capacity()];
        let mut count = 0;
        if let Some(min) = pq.min {
            let mut roots = Vec::new();
            let mut cur = min;
            loop {
                roots.push(cur);
                assert_eq!(pq.nodes[pq.nodes[cur].next].prev, cur);
                assert!(pq.nodes[cur].parent.is_none());
                assert!(!pq.nodes[cur].mark, "roots are never marked");
                cur = pq.nodes[cur].next;
                if cur == min {
                    break;
                }
            }
            for &r in &roots {
                assert!(pq.key(min) <= pq.key(r), "cached min must be minimal");
                count += check_tree(pq, r, &mut seen);
            }
        }
        assert_eq!(count, pq.len());
        for (index, live) in seen.iter().enumerate() {
            assert_eq!(*live, pq.nodes[index].key.is_some());
        }
    }

    fn check_tree(pq: &FibonacciIndexPq<i64>, root: usize, seen: &mut [bool]) -> usize {
        let mut count = 0;
        let mut stack = vec![root];
        while let Some(x) = stack.pop() {
            assert!(!seen[x], "index {x} appears twice");
            seen[x] = true;
            count += 1;
            match pq.nodes[x].child {
                None => assert_eq!(pq.nodes[x].order, 0),
                Some(first) => {
                    let mut degree = 0;
                    let mut c = first;
                    loop {
                        assert_eq!(pq.nodes[c].parent, Some(x));
                        assert_eq!(pq.nodes[pq.nodes[c].next].prev, c);
                        assert!(pq.key(c) >= pq.key(x), "heap order violated");
                        stack.push(c);
                        degree += 1;
                        c = pq.nodes[c].next;
                        if c == first {
                            break;
                        }
                    }
                    assert_eq!(degree, pq.nodes[x].order);
                }
            }
        }
        count
    }

    #[test]
    fn lazy_insert_then_consolidate() {
        let mut pq = FibonacciIndexPq::with_capacity(32);
        for i in 0..32 {
            pq.insert(i, (7 * i as i64) % 19).unwrap();
            assert_valid(&pq);
        }
        // first extraction pays the consolidation debt
        pq.del_min().unwrap();
        assert_valid(&pq);
        assert_eq!(pq.len(), 31);
    }

    #[test]
    fn decrease_key_cuts_and_cascades() {
        let mut pq = FibonacciIndexPq::with_capacity(64);
        for i in 0..64 {
            pq.insert(i, 1000 + i as i64).unwrap();
        }
        // build tree structure, then repeatedly carve nodes out of it
        pq.del_min().unwrap();
        assert_valid(&pq);
        for i in (8..64).step_by(5) {
            pq.decrease_key(i, -(i as i64)).unwrap();
            assert_valid(&pq);
            assert_eq!(pq.min_index().unwrap(), i);
        }
    }

    #[test]
    fn delete_internal_node() {
        let mut pq = FibonacciIndexPq::with_capacity(16);
        for i in 0..16 {
            pq.insert(i, i as i64).unwrap();
        }
        pq.del_min().unwrap(); // consolidate into trees
        pq.delete(9).unwrap();
        assert_valid(&pq);
        assert!(!pq.contains(9).unwrap());
        assert_eq!(pq.len(), 14);

        pq.insert(9, -3).unwrap();
        assert_valid(&pq);
        assert_eq!(pq.min_index().unwrap(), 9);
    }

    #[test]
    fn increase_key_reinserts() {
        let mut pq = FibonacciIndexPq::with_capacity(8);
        for i in 0..8 {
            pq.insert(i, i as i64).unwrap();
        }
        pq.increase_key(0, 99).unwrap();
        assert_valid(&pq);
        assert_eq!(*pq.key_of(0).unwrap(), 99);
        assert_eq!(pq.min_index().unwrap(), 1);
    }

    #[test]
    fn drain_yields_sorted_keys() {
        let mut pq = FibonacciIndexPq::with_capacity(100);
        for i in 0..100 {
            pq.insert(i, ((i as i64) * 37) % 71).unwrap();
        }
        let mut prev = i64::MIN;
        while !pq.is_empty() {
            let key = *pq.min_key().unwrap();
            assert!(key >= prev);
            prev = key;
            pq.del_min().unwrap();
            assert_valid(&pq);
        }
    }

    #[test]
    fn churn_keeps_marks_consistent() {
        let mut pq = FibonacciIndexPq::with_capacity(40);
        for i in 0..40 {
            pq.insert(i, 100 + i as i64).unwrap();
        }
        pq.del_min().unwrap();
        // alternate cuts and extractions to exercise cascading paths
        let mut next_key = -1i64;
        for i in [5, 17, 29, 33, 11, 23, 37, 7] {
            if pq.contains(i).unwrap() {
                pq.decrease_key(i, next_key).unwrap();
                next_key -= 1;
                assert_valid(&pq);
            }
            pq.del_min().unwrap();
            assert_valid(&pq);
        }
    }
}

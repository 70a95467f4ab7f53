//! Binomial forest engine
//!
//! A forest of binomial trees kept as a root list in increasing order of
//! tree order, merged by carry-propagating links exactly as in binary
//! addition:
//! - O(log n) insert and del_min
//! - O(log n) decrease_key and delete
//!
//! **Binomial Tree Bₖ**: B₀ is a single node; Bₖ is two B_{k-1} trees with
//! one root linked under the other. Bₖ has exactly 2ᵏ nodes and its root
//! has k children of strictly decreasing order k-1, k-2, ..., 0.
//!
//! No cached minimum pointer is kept: the root list has at most
//! O(log n) trees, so `min_index` is a cheap scan and the list never has to
//! be repaired when the minimum moves.
//!
//! # Representation
//!
//! Nodes live in a contiguous arena of `capacity` slots; parent, child and
//! sibling links are slot numbers. Payloads (key plus client index) move
//! between slots during sift-up swaps, and the `node_of` inverse map is
//! updated on every swap so the external index→node mapping stays valid.

use std::cmp::Ordering;
use std::mem;

use crate::traits::{Comparator, IndexedMinPq, NaturalOrder, PqError};

/// Arena node. `child` points at the first (highest-order) child; children
/// are chained through `sibling` in decreasing order.
#[derive(Clone)]
struct Node<K> {
    key: K,
    index: usize,
    order: usize,
    parent: Option<usize>,
    child: Option<usize>,
    sibling: Option<usize>,
}

/// Indexed min-priority queue backed by a binomial forest
///
/// # Example
///
/// ```rust
/// use indexed_heaps::{IndexedMinPq, binomial::BinomialIndexPq};
///
/// let mut pq: BinomialIndexPq<i32> = BinomialIndexPq::with_capacity(8);
/// pq.insert(4, 25).unwrap();
/// pq.insert(1, 50).unwrap();
/// pq.decrease_key(1, 10).unwrap();
/// assert_eq!(pq.min_index().unwrap(), 1);
/// assert_eq!(pq.del_min().unwrap(), 1);
/// ```
#[derive(Clone)]
pub struct BinomialIndexPq<K, C = NaturalOrder> {
    /// Node arena; a `None` slot is free
    slots: Vec<Option<Node<K>>>,
    /// Free slot stack
    free: Vec<usize>,
    /// Inverse map: client index -> arena slot
    node_of: Vec<Option<usize>>,
    /// Head of the root list, chained through `sibling` in increasing order
    head: Option<usize>,
    cmp: C,
}

impl<K: Ord> BinomialIndexPq<K> {
    /// Creates an empty queue over the index space `[0, capacity)` using
    /// the key type's natural ascending order
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_comparator(capacity, NaturalOrder)
    }
}

impl<K, C: Comparator<K>> BinomialIndexPq<K, C> {
    /// Creates an empty queue over `[0, capacity)` with an explicit comparator
    pub fn with_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            free: (0..capacity).rev().collect(),
            node_of: vec![None; capacity],
            head: None,
            cmp,
        }
    }

    fn node(&self, slot: usize) -> &Node<K> {
        self.slots[slot].as_ref().expect("slot must hold a live node")
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<K> {
        self.slots[slot].as_mut().expect("slot must hold a live node")
    }

    fn check_index(&self, index: usize) -> Result<(), PqError> {
        if index >= self.node_of.len() {
            return Err(PqError::InvalidIndex {
                index,
                capacity: self.node_of.len(),
            });
        }
        Ok(())
    }

    fn slot_of(&self, index: usize) -> Result<usize, PqError> {
        self.check_index(index)?;
        self.node_of[index].ok_or(PqError::AbsentIndex(index))
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.cmp.compare(&self.node(a).key, &self.node(b).key) == Ordering::Less
    }

    fn alloc(&mut self, index: usize, key: K) -> usize {
        let slot = self
            .free
            .pop()
            .expect("a free slot exists whenever an index is absent");
        self.slots[slot] = Some(Node {
            key,
            index,
            order: 0,
            parent: None,
            child: None,
            sibling: None,
        });
        self.node_of[index] = Some(slot);
        slot
    }

    fn release(&mut self, slot: usize) -> Node<K> {
        let node = self.slots[slot].take().expect("slot must hold a live node");
        self.node_of[node.index] = None;
        self.free.push(slot);
        node
    }

    /// Interleaves two root lists by increasing tree order, like merging
    /// two sorted lists. Equal-order collisions are left for the carry pass.
    fn merge_root_lists(&mut self, a: Option<usize>, b: Option<usize>) -> Option<usize> {
        let (mut a, mut b) = (a, b);
        let mut head = None;
        let mut tail: Option<usize> = None;
        while let (Some(x), Some(y)) = (a, b) {
            let take = if self.node(x).order <= self.node(y).order {
                a = self.node(x).sibling;
                x
            } else {
                b = self.node(y).sibling;
                y
            };
            match tail {
                None => head = Some(take),
                Some(t) => self.node_mut(t).sibling = Some(take),
            }
            tail = Some(take);
        }
        let rest = a.or(b);
        match tail {
            None => head = rest,
            Some(t) => self.node_mut(t).sibling = rest,
        }
        head
    }

    /// Walks a merged root list left to right, linking consecutive trees of
    /// equal order into one tree of order+1 (carry propagation). When three
    /// equal-order trees meet, the first is skipped and the latter two link.
    fn carry_link(&mut self, head: Option<usize>) -> Option<usize> {
        let mut head = head;
        let mut prev: Option<usize> = None;
        let mut cur = match head {
            Some(h) => h,
            None => return None,
        };
        while let Some(next) = self.node(cur).sibling {
            let cur_order = self.node(cur).order;
            let next_order = self.node(next).order;
            let after = self.node(next).sibling;
            let three_way = after.map_or(false, |a| self.node(a).order == cur_order);
            if cur_order != next_order || three_way {
                prev = Some(cur);
                cur = next;
            } else if !self.less(next, cur) {
                // cur stays in place and absorbs next
                self.node_mut(cur).sibling = after;
                self.link(next, cur);
            } else {
                // next absorbs cur, taking cur's place in the list
                match prev {
                    None => head = Some(next),
                    Some(p) => self.node_mut(p).sibling = Some(next),
                }
                self.link(cur, next);
                cur = next;
            }
        }
        head
    }

    /// Links two trees of equal order, putting `child` under `parent`;
    /// the caller has already ordered them by key
    fn link(&mut self, child: usize, parent: usize) {
        let first_child = self.node(parent).child;
        {
            let c = self.node_mut(child);
            c.parent = Some(parent);
            c.sibling = first_child;
        }
        let p = self.node_mut(parent);
        p.child = Some(child);
        p.order += 1;
    }

    /// Scans the root list for the minimum, returning `(prev, slot)`
    fn min_root(&self) -> Option<(Option<usize>, usize)> {
        let mut best: Option<(Option<usize>, usize)> = None;
        let mut prev: Option<usize> = None;
        let mut cur = self.head;
        while let Some(c) = cur {
            if best.map_or(true, |(_, b)| self.less(c, b)) {
                best = Some((prev, c));
            }
            prev = Some(c);
            cur = self.node(c).sibling;
        }
        best
    }

    fn detach_root(&mut self, prev: Option<usize>, slot: usize) {
        let next = self.node(slot).sibling;
        match prev {
            None => self.head = next,
            Some(p) => self.node_mut(p).sibling = next,
        }
        self.node_mut(slot).sibling = None;
    }

    /// Detaches the children of `slot` and reverses them from decreasing to
    /// increasing order, yielding a well-formed root list
    fn reversed_children(&mut self, slot: usize) -> Option<usize> {
        let mut reversed = None;
        let mut cur = self.node_mut(slot).child.take();
        while let Some(c) = cur {
            let next = self.node(c).sibling;
            let n = self.node_mut(c);
            n.sibling = reversed;
            n.parent = None;
            reversed = Some(c);
            cur = next;
        }
        self.node_mut(slot).order = 0;
        reversed
    }

    /// Removes a root and splices its children back into the forest
    fn remove_root(&mut self, prev: Option<usize>, slot: usize) -> usize {
        self.detach_root(prev, slot);
        let children = self.reversed_children(slot);
        let rest = self.head.take();
        let merged = self.merge_root_lists(children, rest);
        self.head = self.carry_link(merged);
        self.release(slot).index
    }

    /// Sifts the payload at `slot` toward the root by swapping key/index
    /// with the parent. With `to_root` the swaps are unconditional;
    /// otherwise they stop as soon as heap order holds. Returns the slot
    /// the payload ends up in.
    fn swim(&mut self, mut slot: usize, to_root: bool) -> usize {
        while let Some(parent) = self.node(slot).parent {
            if !to_root && !self.less(slot, parent) {
                break;
            }
            self.swap_payload(slot, parent);
            slot = parent;
        }
        slot
    }

    /// Exchanges the payloads of two distinct slots, keeping `node_of` valid
    fn swap_payload(&mut self, a: usize, b: usize) {
        debug_assert_ne!(a, b);
        let (lo, hi) = (a.min(b), a.max(b));
        let (left, right) = self.slots.split_at_mut(hi);
        let x = left[lo].as_mut().expect("slot must hold a live node");
        let y = right[0].as_mut().expect("slot must hold a live node");
        mem::swap(&mut x.key, &mut y.key);
        mem::swap(&mut x.index, &mut y.index);
        let (xi, yi) = (x.index, y.index);
        self.node_of[xi] = Some(lo);
        self.node_of[yi] = Some(hi);
    }

    /// Walks the root list for the predecessor of a known root
    fn root_prev(&self, slot: usize) -> Option<usize> {
        let mut prev = None;
        let mut cur = self.head;
        while let Some(c) = cur {
            if c == slot {
                return prev;
            }
            prev = Some(c);
            cur = self.node(c).sibling;
        }
        unreachable!("slot must be on the root list")
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

impl<K, C: Comparator<K>> IndexedMinPq<K> for BinomialIndexPq<K, C> {
    fn capacity(&self) -> usize {
        self.node_of.len()
    }

    /// Derived from the tree orders present: a root of order k carries
    /// exactly 2ᵏ nodes, so this is an O(log n) walk of the root list
    fn len(&self) -> usize {
        let mut total = 0;
        let mut cur = self.head;
        while let Some(c) = cur {
            total += 1usize << self.node(c).order;
            cur = self.node(c).sibling;
        }
        total
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn contains(&self, index: usize) -> Result<bool, PqError> {
        self.check_index(index)?;
        Ok(self.node_of[index].is_some())
    }

    fn insert(&mut self, index: usize, key: K) -> Result<(), PqError> {
        self.check_index(index)?;
        if self.node_of[index].is_some() {
            return Err(PqError::DuplicateIndex(index));
        }
        let slot = self.alloc(index, key);
        let rest = self.head.take();
        let merged = self.merge_root_lists(Some(slot), rest);
        self.head = self.carry_link(merged);
        Ok(())
    }

    fn min_index(&self) -> Result<usize, PqError> {
        let (_, slot) = self.min_root().ok_or(PqError::EmptyQueue)?;
        Ok(self.node(slot).index)
    }

    fn min_key(&self) -> Result<&K, PqError> {
        let (_, slot) = self.min_root().ok_or(PqError::EmptyQueue)?;
        Ok(&self.node(slot).key)
    }

    fn del_min(&mut self) -> Result<usize, PqError> {
        let (prev, slot) = self.min_root().ok_or(PqError::EmptyQueue)?;
        Ok(self.remove_root(prev, slot))
    }

    fn key_of(&self, index: usize) -> Result<&K, PqError> {
        let slot = self.slot_of(index)?;
        Ok(&self.node(slot).key)
    }

    fn change_key(&mut self, index: usize, key: K) -> Result<(), PqError> {
        let slot = self.slot_of(index)?;
        match self.cmp.compare(&key, &self.node(slot).key) {
            Ordering::Less => self.decrease_key(index, key),
            Ordering::Greater => self.increase_key(index, key),
            Ordering::Equal => Ok(()),
        }
    }

    fn decrease_key(&mut self, index: usize, key: K) -> Result<(), PqError> {
        let slot = self.slot_of(index)?;
        if self.cmp.compare(&key, &self.node(slot).key) != Ordering::Less {
            return Err(PqError::KeyNotDecreased);
        }
        self.node_mut(slot).key = key;
        self.swim(slot, false);
        Ok(())
    }

    /// Realized as delete followed by reinsert; the forest has no cheaper
    /// downward restructuring for an in-tree node
    fn increase_key(&mut self, index: usize, key: K) -> Result<(), PqError> {
        let slot = self.slot_of(index)?;
        if self.cmp.compare(&key, &self.node(slot).key) != Ordering::Greater {
            return Err(PqError::KeyNotIncreased);
        }
        self.delete(index)?;
        self.insert(index, key)
    }

    /// Forces the payload to its tree root by unconditional sift-up swaps,
    /// then removes that root exactly as `del_min` would
    fn delete(&mut self, index: usize) -> Result<(), PqError> {
        let slot = self.slot_of(index)?;
        let root = self.swim(slot, true);
        let prev = self.root_prev(root);
        self.remove_root(prev, root);
        Ok(())
    }
}

/// Lazy ascending-order iterator over a snapshot of a [`BinomialIndexPq`]
///
/// Construction clones the live structure; draining the iterator repeatedly
/// extracts the minimum from the clone, so the source queue is never
/// disturbed and mutations made to it afterwards are not reflected. Once
/// drained the iterator is exhausted; it cannot be restarted.
pub struct Ascending<K, C = NaturalOrder> {
    pq: BinomialIndexPq<K, C>,
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

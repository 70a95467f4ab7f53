//! Indexed Min-Priority Queues for Rust
//!
//! This crate provides three independent engines implementing one abstract
//! contract: a min-priority queue whose elements are referenced by dense
//! integer indices in a fixed range `[0, capacity)`, with insertion,
//! minimum extraction and in-place key mutation (decrease / increase /
//! delete) keyed by index rather than by object identity.
//!
//! # Engines
//!
//! - **Binomial forest** ([`binomial::BinomialIndexPq`]): explicit linked
//!   trees merged by carry-propagating links; O(log n) across the board.
//! - **Fibonacci heap** ([`fibonacci::FibonacciIndexPq`]): lazily
//!   consolidated circular root ring with cascading cuts; O(1) amortized
//!   insert and decrease_key, O(log n) amortized extraction.
//! - **d-ary array heap** ([`multiway::MultiwayIndexPq`]): flat
//!   array-backed complete tree with an inverse index→slot map;
//!   O(log_d n) decrease_key, O(d·log_d n) extraction.
//!
//! All three are single-threaded, purely in-memory structures; callers
//! needing concurrent access must serialize externally. Each engine also
//! offers a lazy ascending iterator over a snapshot of its live indices.
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::{IndexedMinPq, binomial::BinomialIndexPq};
//!
//! let mut pq: BinomialIndexPq<i32> = BinomialIndexPq::with_capacity(5);
//! pq.insert(3, 10).unwrap();
//! pq.insert(1, 20).unwrap();
//! pq.insert(4, 30).unwrap();
//!
//! assert_eq!(pq.min_index().unwrap(), 3);
//! pq.decrease_key(4, 5).unwrap();
//! assert_eq!(pq.del_min().unwrap(), 4);
//! assert_eq!(pq.del_min().unwrap(), 3);
//! ```

pub mod binomial;
pub mod fibonacci;
pub mod multiway;
pub mod traits;

// Re-export the contract pieces for convenience
pub use traits::{Comparator, IndexedMinPq, NaturalOrder, PqError};

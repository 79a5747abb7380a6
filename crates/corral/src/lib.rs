//! Corral - general-purpose in-memory collections
//!
//! This library provides sequence, associative, and set abstractions under
//! one consistent contract:
//! - Sequences: [`Vector`], [`LinkedList`], [`SinglyLinkedList`]
//! - Ordered associative: [`Map`], [`Set`] (comparator-sorted backings)
//! - Hash-keyed: [`HashMap`], [`HashSet`] (insertion-order iteration)
//! - Adapters: [`Stack`], [`Queue`], [`PriorityQueue`]
//!
//! Shared across all of them: negative-index normalization, the
//! [`Comparable`] ordering protocol with binary search over sorted ranges,
//! a single error taxonomy with `try_*` siblings, serde packets, and
//! truncated debug rendering.

/// Corral library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod compare;
pub mod error;
pub mod hash;
pub mod hashmap;
pub mod hashset;
pub mod index;
pub mod linked;
pub mod map;
pub mod priority;
pub mod queue;
pub mod set;
pub mod stack;
pub mod vector;

mod fmt;

// Re-export commonly used types
pub use compare::{
    binary_search, binary_search_by, lower_bound, lower_bound_by, upper_bound, upper_bound_by,
    Comparable, Comparator, SearchOutcome,
};
pub use error::CollectionError;
pub use hash::{compute_hash, HashKey, KeyOf};
pub use hashmap::HashMap;
pub use hashset::HashSet;
pub use linked::{LinkedList, SinglyLinkedList};
pub use map::Map;
pub use priority::PriorityQueue;
pub use queue::Queue;
pub use set::Set;
pub use stack::Stack;
pub use vector::Vector;

//! Linked-list engine
//!
//! Both list variants store their nodes in an arena: a slot vector with a
//! free list, addressed by `u32` handles with `NIL` as the null link. Links
//! are plain indices, so there are no reference-count cycles and no
//! `unsafe`, removal is a pair of index writes, and a deep clone copies the
//! slot vector wholesale — handles (including the internal cursor) stay
//! valid in the clone and land on the corresponding node of the new chain.
//!
//! `LinkedList` maintains back links and resolves indices by walking from
//! whichever end is nearer; `SinglyLinkedList` keeps forward links only and
//! walks from the head.

mod doubly;
mod singly;

pub use doubly::{IntoIter, Iter, LinkedList};
pub use singly::{SinglyIntoIter, SinglyIter, SinglyLinkedList};

/// Null link handle
pub(crate) const NIL: u32 = u32::MAX;

//! This crate provides a doubly-linked ring of owned nodes, with the nodes
//! kept in an arena and addressed by stable handles.
//!
//! The [`List`] allows splicing nodes in and out of the ring at any given
//! position in constant time, and exchanging the positions of any two ring
//! members with [`List::swap`], also in constant time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use ring_list::List;
//!
//! let mut list = List::new();
//! let p1 = list.new_node("P1");
//! let a = list.new_node("A");
//! let b = list.new_node("B");
//!
//! list.push_back(p1).unwrap();
//! list.insert_after(p1, a).unwrap();
//! list.insert_after(a, b).unwrap(); // P1 -> A -> B -> P1
//!
//! list.swap(a, b).unwrap(); // P1 -> B -> A -> P1
//! assert_eq!(format!("{:?}", list), r#"["P1", "B", "A"]"#);
//!
//! list.remove(b).unwrap(); // P1 -> A -> P1, `b` still allocated
//! assert_eq!(list.destroy(b).unwrap(), "B");
//! assert_eq!(list.destroy_all(), 2);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!   slots: ┌────────────┬────────────┬────────────┬────────────┐
//!          │ gen 0      │ gen 1      │ gen 0      │ gen 0      │
//!          │ next: 2    │ (free)     │ next: 3    │ next: 0    │
//!          │ prev: 3    │            │ prev: 0    │ prev: 2    │
//!          │ "P1"       │            │ "A"        │ "B"        │
//!          └────────────┴────────────┴────────────┴────────────┘
//!               ↑              ↑
//!   head ───────┘     free ────┘
//! ```
//! The `List` contains:
//! - the slots, each holding a generation counter and either a node or
//!   nothing;
//! - the stack of free slot indices, reused before the arena grows;
//! - the `head` handle, the conventional start of the ring;
//! - a length field `len` counting the ring members. It can be disabled by
//!   disabling the `length` feature in your `Cargo.toml`:
//! ```text
//! [dependencies]
//! ring_list = { default-features = false }
//! ```
//!
//! Each node holds:
//! - the `next` and `prev` handles of its neighbours in the ring;
//! - whether it is linked into the ring;
//! - the owned `String` payload.
//!
//! A [`NodeId`] is a slot index plus the slot's generation at allocation.
//! Destroying a node bumps the generation, so stale handles are rejected
//! instead of reaching whatever node reuses the slot.
//!
//! # Node Lifecycle
//!
//! - [`new_node`]: allocate a *detached* node, not part of the ring;
//! - [`insert_before`], [`insert_after`], [`push_back`], [`push_front`]:
//!   splice a detached node into the ring;
//! - [`remove`]: unlink a node from the ring without freeing it; if it was
//!   the head, the head moves on to its successor;
//! - [`destroy`]: free a detached node and get its payload back;
//! - [`destroy_all`]: free every ring member.
//!
//! Whatever is still allocated is freed when the `List` is dropped.
//!
//! Contract violations (stale handles, linking a member twice, unlinking a
//! detached node, swapping a node with itself) are reported as [`Error`]s
//! and leave the ring untouched.
//!
//! # Iteration
//!
//! [`Iter`] walks the ring once from a starting member, forward from
//! [`List::iter_from`] or backward from [`List::iter_back_from`]. It is
//! double-ended, fused and non-cyclic.
//!
//! ```
//! use ring_list::List;
//!
//! let list: List = ["P1", "P2", "P3"].iter().copied().collect();
//! let p2 = list.find("P2").unwrap();
//!
//! let forward: Vec<_> = list.iter_from(p2).unwrap().map(|n| n.payload()).collect();
//! assert_eq!(forward, ["P2", "P3", "P1"]);
//!
//! let backward: Vec<_> = list.iter_back_from(p2).unwrap().map(|n| n.payload()).collect();
//! assert_eq!(backward, ["P2", "P1", "P3"]);
//! ```
//!
//! # Logging
//!
//! Splices are logged at `trace` level and swaps, teardowns and rejected
//! calls at `debug` level, through the [`log`] facade.
//!
//! [`new_node`]: crate::List::new_node
//! [`insert_before`]: crate::List::insert_before
//! [`insert_after`]: crate::List::insert_after
//! [`push_back`]: crate::List::push_back
//! [`push_front`]: crate::List::push_front
//! [`remove`]: crate::List::remove
//! [`destroy`]: crate::List::destroy
//! [`destroy_all`]: crate::List::destroy_all
//! [`log`]: https://docs.rs/log

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use list::algorithms::Adjacency;
#[doc(inline)]
pub use list::dump::Dump;
#[doc(inline)]
pub use list::iterator::{Iter, NodeRef};
#[doc(inline)]
pub use list::{List, NodeId};

pub mod list;

mod error;

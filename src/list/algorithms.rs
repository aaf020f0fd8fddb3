use log::debug;

use crate::error::{Error, Result};
use crate::list::{List, NodeId};

/// How the two nodes of a [`List::swap`] were placed relative to each other.
///
/// It only tells which branch of the swap ran; the resulting ring is the
/// same for every branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjacency {
    /// `i1.next == i2`.
    Forward,
    /// `i2.next == i1`.
    Backward,
    /// Neither node is the successor of the other.
    Apart,
}

impl PartialEq for List {
    /// Two lists are equal if their rings hold equal payloads in the same
    /// order, starting from their heads.
    fn eq(&self, other: &Self) -> bool {
        self.iter()
            .map(|node| node.payload())
            .eq(other.iter().map(|node| node.payload()))
    }
}

impl Eq for List {}

impl List {
    /// Returns `true` if some ring member holds a payload equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list: List = ["P1", "P2"].iter().copied().collect();
    /// list.new_node("detached");
    ///
    /// assert!(list.contains("P2"));
    /// assert!(!list.contains("detached"));
    /// ```
    pub fn contains(&self, value: &str) -> bool {
        self.iter().any(|node| node.payload() == value)
    }

    /// Returns the first ring member, from the head, holding `value`.
    pub fn find(&self, value: &str) -> Option<NodeId> {
        self.iter()
            .find(|node| node.payload() == value)
            .map(|node| node.id())
    }

    /// Exchange the ring positions of the two distinct members `i1` and `i2`.
    ///
    /// The nodes may be in any order and at any distance, including adjacent
    /// across the end of the ring. Every other member keeps its place. The
    /// nodes are moved with [`remove`](List::remove)-style unlinking and
    /// re-insertion, never reallocated, and the head is kept valid the same
    /// way `remove` keeps it.
    ///
    /// The placement of the pair selects one of three splices:
    /// - `i1.next == i2`: unlink `i1`, re-insert it after `i2`;
    /// - `i2.next == i1`: unlink `i2`, re-insert it after `i1`;
    /// - otherwise: take `p1 = i1.prev` and `p3 = i2.next` first, unlink both
    ///   nodes, insert `i2` after `p1` and `i1` before `p3`.
    ///
    /// A ring of two members always takes one of the adjacent branches.
    ///
    /// Calling `swap` twice with the same arguments restores the ring.
    ///
    /// # Errors
    ///
    /// [`Error::SelfSwap`] if `i1 == i2`, [`Error::StaleNode`] or
    /// [`Error::Detached`] if either node is not a live ring member. The ring
    /// is left untouched on error.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{Adjacency, List};
    ///
    /// let mut list: List = ["P1", "P2", "A", "P3", "B"].iter().copied().collect();
    /// let a = list.find("A").unwrap();
    /// let b = list.find("B").unwrap();
    ///
    /// assert_eq!(list.swap(a, b), Ok(Adjacency::Apart));
    ///
    /// let expected: List = ["P1", "P2", "B", "P3", "A"].iter().copied().collect();
    /// assert_eq!(list, expected);
    /// ```
    pub fn swap(&mut self, i1: NodeId, i2: NodeId) -> Result<Adjacency> {
        if i1 == i2 {
            debug!("rejected: swap of {} with itself", i1);
            return Err(Error::SelfSwap(i1));
        }
        let (p1, n1) = {
            let node = self.linked_node(i1)?;
            (node.prev, node.next)
        };
        let n2 = self.linked_node(i2)?.next;

        let adjacency = if n1 == i2 {
            Adjacency::Forward
        } else if n2 == i1 {
            Adjacency::Backward
        } else {
            Adjacency::Apart
        };
        debug!("swapping {} and {} ({:?})", i1, i2, adjacency);

        match adjacency {
            Adjacency::Forward => {
                self.detach_node(i1);
                self.attach_after(i2, i1);
            }
            Adjacency::Backward => {
                self.detach_node(i2);
                self.attach_after(i1, i2);
            }
            Adjacency::Apart => {
                // Both anchors are read before any unlinking. They are
                // neither `i1` nor `i2`, since the nodes are not adjacent.
                let p3 = n2;
                debug_assert!(p1 != i2 && p3 != i1);
                self.detach_node(i1);
                self.detach_node(i2);
                self.attach_after(p1, i2);
                self.attach_before(p3, i1);
            }
        }
        Ok(adjacency)
    }
}

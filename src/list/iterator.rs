use std::fmt;
use std::iter::{FusedIterator, Rev};

use crate::error::Result;
use crate::list::{List, Node, NodeId};

/// A view of one node: its handle, payload and links.
///
/// A detached node links to itself.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    id: NodeId,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(id: NodeId, node: &'a Node) -> Self {
        Self { id, node }
    }

    /// Returns the handle of the node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the payload of the node.
    pub fn payload(&self) -> &'a str {
        &self.node.payload
    }

    /// Returns the successor, or the node itself if it is detached.
    pub fn next(&self) -> NodeId {
        self.node.next
    }

    /// Returns the predecessor, or the node itself if it is detached.
    pub fn prev(&self) -> NodeId {
        self.node.prev
    }

    /// Returns `true` if the node is a ring member.
    pub fn is_linked(&self) -> bool {
        self.node.linked
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("prev", &self.node.prev)
            .field("next", &self.node.next)
            .field("payload", &self.node.payload)
            .finish()
    }
}

/// An iterator over the members of a ring.
///
/// It uses a pair of nodes `front..=back` to represent the members not yet
/// visited, both inclusive. Iterating forward from `start` sets `back` to
/// `start.prev`, so every member is yielded exactly once and the iterator
/// stops instead of going around again.
///
/// The iterator is `Clone`, so a traversal can be restarted from a saved
/// copy.
///
/// # Examples
///
/// ```compile_fail
/// use ring_list::List;
///
/// let mut list: List = ["P1", "P2"].iter().copied().collect();
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// let a = list.new_node("A");
/// println!("{:?}", iter.next());
/// ```
#[derive(Clone)]
pub struct Iter<'a> {
    list: &'a List,
    range: Option<(NodeId, NodeId)>,
    #[cfg(feature = "length")]
    len: usize,
}

impl<'a> Iter<'a> {
    /// `start` must be a ring member, or `None` for an empty iterator.
    pub(crate) fn new(list: &'a List, start: Option<NodeId>) -> Self {
        let range = start.map(|start| (start, list.raw(start).prev));
        Self::with_range(list, range)
    }

    fn with_range(list: &'a List, range: Option<(NodeId, NodeId)>) -> Self {
        Self {
            list,
            range,
            #[cfg(feature = "length")]
            len: if range.is_some() { list.len() } else { 0 },
        }
    }
}

impl<'a> fmt::Debug for Iter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        for node in self.clone() {
            f.field(&node.payload());
        }
        f.finish()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = NodeRef<'a>;

    /// Return `front` and shrink the range to `(front.next)..=back`, or
    /// return `None` once `front` and `back` have met.
    fn next(&mut self) -> Option<Self::Item> {
        let (front, back) = self.range?;
        let list = self.list;
        let node = list.raw(front);
        self.range = if front == back {
            None
        } else {
            Some((node.next, back))
        };
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        Some(NodeRef::new(front, node))
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    /// Return `back` and shrink the range to `front..=(back.prev)`, or
    /// return `None` once `front` and `back` have met.
    fn next_back(&mut self) -> Option<Self::Item> {
        let (front, back) = self.range?;
        let list = self.list;
        let node = list.raw(back);
        self.range = if front == back {
            None
        } else {
            Some((front, node.prev))
        };
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        Some(NodeRef::new(back, node))
    }
}

#[cfg(feature = "length")]
impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl List {
    /// Provides an iterator over the ring starting at the member `start`,
    /// following `next` links. It yields every member exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let list: List = ["P1", "P2", "P3"].iter().copied().collect();
    /// let p2 = list.next(list.head().unwrap()).unwrap();
    ///
    /// let payloads: Vec<_> = list.iter_from(p2).unwrap().map(|n| n.payload()).collect();
    /// assert_eq!(payloads, ["P2", "P3", "P1"]);
    /// ```
    pub fn iter_from(&self, start: NodeId) -> Result<Iter<'_>> {
        self.linked_node(start)?;
        Ok(Iter::new(self, Some(start)))
    }

    /// Provides an iterator over the ring starting at the member `start`,
    /// following `prev` links. It yields every member exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let list: List = ["P1", "P2", "P3"].iter().copied().collect();
    /// let p1 = list.head().unwrap();
    ///
    /// let payloads: Vec<_> = list.iter_back_from(p1).unwrap().map(|n| n.payload()).collect();
    /// assert_eq!(payloads, ["P1", "P3", "P2"]);
    /// ```
    pub fn iter_back_from(&self, start: NodeId) -> Result<Rev<Iter<'_>>> {
        let next = self.linked_node(start)?.next;
        Ok(Iter::with_range(self, Some((next, start))).rev())
    }

    /// Apply `visitor` to every member, walking forward from `start`.
    pub fn visit_forward<'a, F>(&'a self, start: NodeId, visitor: F) -> Result<()>
    where
        F: FnMut(NodeRef<'a>),
    {
        self.iter_from(start)?.for_each(visitor);
        Ok(())
    }

    /// Apply `visitor` to every member, walking backward from `start`.
    pub fn visit_backward<'a, F>(&'a self, start: NodeId, visitor: F) -> Result<()>
    where
        F: FnMut(NodeRef<'a>),
    {
        self.iter_back_from(start)?.for_each(visitor);
        Ok(())
    }
}

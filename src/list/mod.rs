use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicU32, Ordering};

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::list::iterator::{Iter, NodeRef};

pub mod algorithms;
pub mod dump;
pub mod iterator;

mod splice;

/// The `List` is a doubly-linked ring of owned nodes with a floating head.
///
/// Every node lives in an arena owned by the list and is addressed by a
/// [`NodeId`]. A node is either *linked* (a member of the ring) or *detached*
/// (allocated, but not a member). New nodes start detached; they join the
/// ring through [`insert_before`], [`insert_after`], [`push_back`] or
/// [`push_front`], and leave it through [`remove`] without being freed.
/// Only a detached node can be [`destroy`]ed.
///
/// The head is only a starting point for iteration and printing. Removing the
/// head node advances the head to its successor.
///
/// The `List` contains:
/// - an owner tag, stamped into every [`NodeId`] it hands out, so handles
///   of another list are rejected;
/// - the node arena, with a stack of free slots for reuse;
/// - the head handle, `None` when the ring is empty;
/// - a length field `len` counting the ring members. It can be disabled by
///   disabling the `length` feature in your `Cargo.toml`:
/// ```text
/// [dependencies]
/// ring_list = { default-features = false }
/// ```
///
/// [`insert_before`]: List::insert_before
/// [`insert_after`]: List::insert_after
/// [`push_back`]: List::push_back
/// [`push_front`]: List::push_front
/// [`remove`]: List::remove
/// [`destroy`]: List::destroy
#[derive(Clone)]
pub struct List {
    owner: u32,
    slots: Vec<Slot>,
    free: Vec<u32>,
    pub(crate) head: Option<NodeId>,
    #[cfg(feature = "length")]
    /// the number of ring members
    pub(crate) len: usize,
}

/// A stable handle to a node of a [`List`].
///
/// Handles stay valid while the node is moved around the ring. Once the node
/// is destroyed its slot is given a new generation, so the old handle is
/// rejected with [`Error::StaleNode`] even if the slot is reused.
///
/// A handle also remembers the list that created it, and every other list
/// rejects it with [`Error::StaleNode`]. A clone of a list shares the tag
/// of the original, so the original's handles address the matching nodes
/// of the clone.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
    owner: u32,
}

/// Source of owner tags. Tags wrap after `u32::MAX` lists.
static NEXT_OWNER: AtomicU32 = AtomicU32::new(0);

#[derive(Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) next: NodeId,
    pub(crate) prev: NodeId,
    pub(crate) linked: bool,
    pub(crate) payload: String,
}

impl NodeId {
    /// Packs the handle into a single integer, unique among the live nodes of
    /// a list. Used as the opaque node identity in diagnostic dumps.
    pub fn to_bits(self) -> u64 {
        (u64::from(self.generation) << 32) | u64::from(self.index)
    }
}

impl Debug for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

impl fmt::UpperHex for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.to_bits(), f)
    }
}

impl Node {
    /// Create a detached node, linked to itself.
    fn new_detached(id: NodeId, payload: String) -> Self {
        Self {
            next: id,
            prev: id,
            linked: false,
            payload,
        }
    }
}

// private methods
impl List {
    fn slot_node(&self, id: NodeId) -> Option<&Node> {
        if id.owner != self.owner {
            return None;
        }
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn slot_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.owner != self.owner {
            return None;
        }
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Look up a live node, or report the handle as stale.
    pub(crate) fn node(&self, id: NodeId) -> Result<&Node> {
        self.slot_node(id).ok_or_else(|| rejected(Error::StaleNode(id)))
    }

    /// Look up a live node that must be a ring member.
    pub(crate) fn linked_node(&self, id: NodeId) -> Result<&Node> {
        let node = self.node(id)?;
        if !node.linked {
            return Err(rejected(Error::Detached(id)));
        }
        Ok(node)
    }

    /// Look up a live node that must be detached.
    pub(crate) fn detached_node(&self, id: NodeId) -> Result<&Node> {
        let node = self.node(id)?;
        if node.linked {
            return Err(rejected(Error::Linked(id)));
        }
        Ok(node)
    }

    /// Access a node that is known to be live, e.g. through a link of
    /// another live node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale, which means the ring is corrupted.
    #[track_caller]
    pub(crate) fn raw(&self, id: NodeId) -> &Node {
        match self.slot_node(id) {
            Some(node) => node,
            None => broken_link(id),
        }
    }

    /// Mutable version of [`List::raw`].
    #[track_caller]
    pub(crate) fn raw_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slot_node_mut(id) {
            Some(node) => node,
            None => broken_link(id),
        }
    }

    /// Release the slot of `id` and hand back its payload.
    ///
    /// The caller is responsible for `id` being live and no longer reachable
    /// from the ring (or for the whole ring being torn down).
    fn free_slot(&mut self, id: NodeId) -> String {
        let slot = &mut self.slots[id.index as usize];
        let node = match slot.node.take() {
            Some(node) => node,
            None => broken_link(id),
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        node.payload
    }
}

impl List {
    /// Create an empty `List`.
    ///
    /// # Examples
    /// ```
    /// use ring_list::List;
    /// let list = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            #[cfg(feature = "length")]
            len: 0,
        }
    }

    /// Allocate a detached node holding a copy of `value`.
    ///
    /// The node is not part of the ring until it is inserted. Freed slots
    /// are reused before the arena grows.
    ///
    /// # Panics
    ///
    /// Panics if the list would hold more than `u32::MAX` slots. Running out
    /// of memory aborts the process.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// let a = list.new_node("A");
    /// assert_eq!(list.get(a), Some("A"));
    /// assert!(!list.is_linked(a));
    /// assert!(list.is_empty());
    /// ```
    pub fn new_node(&mut self, value: impl Into<String>) -> NodeId {
        let payload = value.into();
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                let id = NodeId {
                    index,
                    generation: slot.generation,
                    owner: self.owner,
                };
                slot.node = Some(Node::new_detached(id, payload));
                id
            }
            None => {
                let index =
                    u32::try_from(self.slots.len()).unwrap_or_else(|_| capacity_overflow());
                let id = NodeId {
                    index,
                    generation: 0,
                    owner: self.owner,
                };
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(Node::new_detached(id, payload)),
                });
                id
            }
        };
        trace!("allocated node {}", id);
        id
    }

    /// Free a detached node and return its payload.
    ///
    /// A linked node must be [`remove`](List::remove)d first. After this call
    /// `id` is stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// let a = list.new_node("A");
    /// list.push_back(a).unwrap();
    /// assert_eq!(list.destroy(a), Err(Error::Linked(a)));
    ///
    /// list.remove(a).unwrap();
    /// assert_eq!(list.destroy(a).as_deref(), Ok("A"));
    /// assert_eq!(list.destroy(a), Err(Error::StaleNode(a)));
    /// ```
    pub fn destroy(&mut self, id: NodeId) -> Result<String> {
        self.detached_node(id)?;
        trace!("destroying node {}", id);
        Ok(self.free_slot(id))
    }

    /// Destroy every ring member, walking forward from the head.
    ///
    /// The number of steps is fixed before the first node is freed, and the
    /// successor of each node is read before the node itself is freed.
    /// Detached nodes are left alone. Returns the number of destroyed nodes.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list: List = ["P1", "P2", "P3"].iter().copied().collect();
    /// let spare = list.new_node("spare");
    ///
    /// assert_eq!(list.destroy_all(), 3);
    /// assert!(list.is_empty());
    /// assert_eq!(list.node_count(), 1);
    /// assert_eq!(list.get(spare), Some("spare"));
    /// ```
    pub fn destroy_all(&mut self) -> usize {
        let start = match self.head {
            Some(start) => start,
            None => return 0,
        };
        let count = self.len();
        let mut current = start;
        for _ in 0..count {
            let next = self.raw(current).next;
            self.free_slot(current);
            current = next;
        }
        self.head = None;
        #[cfg(feature = "length")]
        {
            self.len = 0;
        }
        debug!("destroyed {} ring nodes", count);
        count
    }

    /// Returns `true` if the ring has no members.
    ///
    /// Detached nodes do not count.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of ring members. Detached nodes do not count.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// let a = list.new_node("A");
    /// assert_eq!(list.len(), 0);
    ///
    /// list.push_back(a).unwrap();
    /// assert_eq!(list.len(), 1);
    /// ```
    #[cfg(feature = "length")]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of ring members. Detached nodes do not count.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[cfg(not(feature = "length"))]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns the number of allocated nodes, linked or detached.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Returns the head of the ring, or `None` if the ring is empty.
    #[inline]
    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Make the ring member `id` the new head.
    pub fn set_head(&mut self, id: NodeId) -> Result<()> {
        self.linked_node(id)?;
        self.head = Some(id);
        Ok(())
    }

    /// Returns the successor of the ring member `id`.
    pub fn next(&self, id: NodeId) -> Result<NodeId> {
        Ok(self.linked_node(id)?.next)
    }

    /// Returns the predecessor of the ring member `id`.
    pub fn prev(&self, id: NodeId) -> Result<NodeId> {
        Ok(self.linked_node(id)?.prev)
    }

    /// Returns the payload of `id`, or `None` if the handle is stale.
    pub fn get(&self, id: NodeId) -> Option<&str> {
        self.slot_node(id).map(|node| node.payload.as_str())
    }

    /// Returns the payload of `id` for modification, or `None` if the handle
    /// is stale.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut String> {
        self.slot_node_mut(id).map(|node| &mut node.payload)
    }

    /// Returns a view of the node `id`, linked or detached.
    pub fn node_ref(&self, id: NodeId) -> Result<NodeRef<'_>> {
        self.node(id).map(|node| NodeRef::new(id, node))
    }

    /// Returns `true` if `id` refers to a live node of this list.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.slot_node(id).is_some()
    }

    /// Returns `true` if `id` refers to a live ring member.
    pub fn is_linked(&self, id: NodeId) -> bool {
        self.slot_node(id).map_or(false, |node| node.linked)
    }

    /// Audit the ring structure.
    ///
    /// Checks that every member satisfies `n.next.prev == n` and
    /// `n.prev.next == n`, that walking from the head visits every member
    /// exactly once before returning to it, and that detached nodes link only
    /// to themselves.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn is_well_formed(&self) -> bool {
        let mut members = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            let node = match &slot.node {
                Some(node) => node,
                None => continue,
            };
            if node.linked {
                members += 1;
                continue;
            }
            let id = NodeId {
                index: index as u32,
                generation: slot.generation,
                owner: self.owner,
            };
            if node.next != id || node.prev != id {
                return false;
            }
        }

        let head = match self.head {
            Some(head) => head,
            None => return members == 0,
        };
        let mut current = head;
        let mut seen = 0;
        loop {
            let node = match self.slot_node(current) {
                Some(node) if node.linked => node,
                _ => return false,
            };
            let forward = self.slot_node(node.next).map_or(false, |n| n.prev == current);
            let backward = self.slot_node(node.prev).map_or(false, |n| n.next == current);
            if !forward || !backward {
                return false;
            }
            seen += 1;
            if seen > members {
                return false;
            }
            current = node.next;
            if current == head {
                break;
            }
        }
        #[cfg(feature = "length")]
        if self.len != seen {
            return false;
        }
        seen == members
    }

    /// Provides a forward iterator over the ring, starting from the head.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let list: List = ["P1", "P2", "P3"].iter().copied().collect();
    /// let payloads: Vec<_> = list.iter().map(|node| node.payload()).collect();
    /// assert_eq!(payloads, ["P1", "P2", "P3"]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self, self.head)
    }
}

impl Debug for List {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|node| node.payload()))
            .finish()
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Into<String>> Extend<S> for List {
    /// Append each value as a new node at the end of the ring.
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for value in iter {
            let id = self.new_node(value);
            self.link_back(id);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for List {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

fn rejected(err: Error) -> Error {
    debug!("rejected: {}", err);
    err
}

#[cold]
#[track_caller]
fn broken_link(id: NodeId) -> ! {
    panic!("ring is corrupted: node {} is not live", id)
}

#[cold]
fn capacity_overflow() -> ! {
    panic!("node arena capacity overflow")
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::list::List;

    fn payloads(list: &List) -> Vec<&str> {
        list.iter().map(|node| node.payload()).collect()
    }

    #[test]
    fn list_create() {
        let mut list = List::new();
        assert!(list.is_empty());
        let a = list.new_node("A");
        assert!(list.is_empty());
        list.push_back(a).unwrap();
        assert!(!list.is_empty());
        assert_eq!(list.head(), Some(a));
        list.remove(a).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.destroy(a).unwrap(), "A");
        assert_eq!(list.node_count(), 0);
    }

    #[test]
    fn new_node_is_self_linked() {
        let mut list = List::new();
        let a = list.new_node("A");
        let node = list.node_ref(a).unwrap();
        assert_eq!(node.next(), a);
        assert_eq!(node.prev(), a);
        assert!(!node.is_linked());
        assert_eq!(list.next(a), Err(Error::Detached(a)));
        assert!(list.is_well_formed());
    }

    #[test]
    fn payload_is_copied() {
        let mut list = List::new();
        let mut source = String::from("P1");
        let a = list.new_node(source.as_str());
        source.push('!');
        assert_eq!(list.get(a), Some("P1"));
        list.get_mut(a).unwrap().push_str("-edited");
        assert_eq!(list.get(a), Some("P1-edited"));
    }

    #[test]
    fn stale_handles_are_rejected() {
        let mut list = List::new();
        let a = list.new_node("A");
        list.destroy(a).unwrap();

        // The slot is reused, but the old handle must not alias the new node.
        let b = list.new_node("B");
        assert_ne!(a, b);
        assert_eq!(list.get(a), None);
        assert_eq!(list.get(b), Some("B"));
        assert_eq!(list.push_back(a), Err(Error::StaleNode(a)));
        assert_eq!(list.destroy(a), Err(Error::StaleNode(a)));
        assert!(!list.contains_node(a));
        assert!(list.contains_node(b));
        assert_eq!(list.node_count(), 1);
    }

    #[test]
    fn handles_from_another_list_are_rejected() {
        let mut list: List = ["P1", "P2", "P3"].iter().copied().collect();
        let mut other: List = ["Q1", "Q2", "Q3"].iter().copied().collect();
        let spare = list.new_node("spare");
        let q1 = other.head().unwrap();
        let q2 = other.next(q1).unwrap();
        let loose = other.new_node("loose");

        // Same slots as live nodes of `list`, but a different owner.
        assert_eq!(list.swap(q1, q2), Err(Error::StaleNode(q1)));
        assert_eq!(list.remove(q1), Err(Error::StaleNode(q1)));
        assert_eq!(list.insert_after(q1, spare), Err(Error::StaleNode(q1)));
        assert_eq!(list.push_back(loose), Err(Error::StaleNode(loose)));
        assert_eq!(list.destroy(loose), Err(Error::StaleNode(loose)));
        assert_eq!(list.set_head(q2), Err(Error::StaleNode(q2)));
        assert_eq!(list.next(q1), Err(Error::StaleNode(q1)));
        assert_eq!(list.get(q1), None);
        assert!(!list.contains_node(q1));
        assert!(!list.is_linked(q1));

        assert_eq!(payloads(&list), ["P1", "P2", "P3"]);
        assert_eq!(list.node_count(), 4);
        assert!(list.is_well_formed());
        assert_eq!(payloads(&other), ["Q1", "Q2", "Q3"]);
        assert!(other.is_well_formed());
    }

    #[test]
    fn clone_accepts_handles_of_the_original() {
        let list: List = ["P1", "P2", "P3"].iter().copied().collect();
        let p1 = list.head().unwrap();
        let p2 = list.next(p1).unwrap();

        let mut copy = list.clone();
        copy.swap(p1, p2).unwrap();
        assert_eq!(payloads(&copy), ["P2", "P1", "P3"]);
        assert_eq!(payloads(&list), ["P1", "P2", "P3"]);
    }

    #[test]
    fn set_head_requires_member() {
        let mut list: List = ["P1", "P2", "P3"].iter().copied().collect();
        let detached = list.new_node("X");
        assert_eq!(list.set_head(detached), Err(Error::Detached(detached)));

        let p2 = list.next(list.head().unwrap()).unwrap();
        list.set_head(p2).unwrap();
        assert_eq!(payloads(&list), ["P2", "P3", "P1"]);
    }

    #[test]
    fn destroy_all_counts_every_member() {
        let mut list: List = (0..10).map(|i| i.to_string()).collect();
        let spare = list.new_node("spare");
        assert_eq!(list.node_count(), 11);

        assert_eq!(list.destroy_all(), 10);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.node_count(), 1);
        assert!(list.is_well_formed());
        assert_eq!(list.destroy(spare).unwrap(), "spare");
        assert_eq!(list.node_count(), 0);

        assert_eq!(list.destroy_all(), 0);
    }

    #[test]
    fn destroy_all_single_member() {
        let mut list: List = Some("only").into_iter().collect();
        assert_eq!(list.destroy_all(), 1);
        assert_eq!(list.node_count(), 0);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut list: List = ["P1", "P2", "P3"].iter().copied().collect();
        list.destroy_all();
        for value in ["A", "B", "C"].iter() {
            let id = list.new_node(*value);
            list.push_back(id).unwrap();
        }
        assert_eq!(list.node_count(), 3);
        assert_eq!(payloads(&list), ["A", "B", "C"]);
        assert!(list.is_well_formed());
    }

    #[test]
    fn list_debug() {
        let list: List = ["P1", "A"].iter().copied().collect();
        assert_eq!(format!("{:?}", list), r#"["P1", "A"]"#);
        assert_eq!(format!("{:?}", List::new()), "[]");
    }

    #[test]
    fn node_id_formatting() {
        let mut list = List::new();
        let a = list.new_node("A");
        let b = list.new_node("B");
        assert_eq!(a.to_string(), "0v0");
        assert_eq!(format!("{:?}", b), "NodeId(1v0)");
        assert_eq!(format!("{:08X}", b), "00000001");
        list.destroy(a).unwrap();
        let c = list.new_node("C");
        assert_eq!(c.to_string(), "0v1");
        assert_eq!(c.to_bits(), 1 << 32);
    }

    #[cfg(feature = "length")]
    #[test]
    fn list_len() {
        let mut list = List::new();
        assert_eq!(list.len(), 0);
        list.extend(["P1", "P2"].iter().copied());
        assert_eq!(list.len(), 2);
        let a = list.new_node("A");
        assert_eq!(list.len(), 2);
        list.insert_after(list.head().unwrap(), a).unwrap();
        assert_eq!(list.len(), 3);
        list.remove(a).unwrap();
        assert_eq!(list.len(), 2);
        list.destroy_all();
        assert_eq!(list.len(), 0);
    }
}

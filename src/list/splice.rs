use log::trace;

use crate::error::Result;
use crate::list::{List, NodeId};

// Link surgery on nodes whose state has already been checked.
impl List {
    fn connect(&mut self, prev: NodeId, next: NodeId) {
        self.raw_mut(prev).next = next;
        self.raw_mut(next).prev = prev;
    }

    /// Attach the detached node `node` to the ring, between `prev` and `next`.
    ///
    /// It does not check whether `prev` and `next` are ring members, or
    /// whether they are adjacent (only in `#[cfg(debug_assertions)]`).
    pub(crate) fn attach_node(&mut self, prev: NodeId, next: NodeId, node: NodeId) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.connect(prev, node);
        self.connect(node, next);
        self.raw_mut(node).linked = true;
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
        trace!("attached {} between {} and {}", node, prev, next);
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, node);
            self.assert_adjacent(node, next);
        }
    }

    /// Attach the detached node `node` right after the member `position`.
    pub(crate) fn attach_after(&mut self, position: NodeId, node: NodeId) {
        let next = self.raw(position).next;
        self.attach_node(position, next, node);
    }

    /// Attach the detached node `node` right before the member `position`.
    pub(crate) fn attach_before(&mut self, position: NodeId, node: NodeId) {
        let prev = self.raw(position).prev;
        self.attach_node(prev, position, node);
    }

    /// Detach the member `node` from the ring, connecting its neighbours to
    /// each other. The node is left self-linked and stays allocated.
    ///
    /// If the head is `node`, the head moves to its former successor, or the
    /// ring becomes empty if `node` was its only member.
    pub(crate) fn detach_node(&mut self, node: NodeId) {
        let (prev, next) = {
            let current = self.raw(node);
            (current.prev, current.next)
        };
        if next == node {
            self.head = None;
        } else if self.head == Some(node) {
            self.head = Some(next);
        }
        self.connect(prev, next);
        let current = self.raw_mut(node);
        current.prev = node;
        current.next = node;
        current.linked = false;
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        trace!("detached {} from between {} and {}", node, prev, next);
    }

    /// Link the detached node `node` as the last member, i.e. right before
    /// the head. In an empty ring it becomes the only member and the head.
    pub(crate) fn link_back(&mut self, node: NodeId) {
        match self.head {
            Some(head) => self.attach_before(head, node),
            None => {
                // A detached node is already self-linked.
                self.raw_mut(node).linked = true;
                self.head = Some(node);
                #[cfg(feature = "length")]
                {
                    self.len += 1;
                }
                trace!("attached {} as the only member", node);
            }
        }
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: NodeId, next: NodeId) {
        assert_eq!(self.raw(prev).next, next);
        assert_eq!(self.raw(next).prev, prev);
    }
}

impl List {
    /// Splice the detached node `item` into the ring right before the member
    /// `position`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// let p1 = list.new_node("P1");
    /// let a = list.new_node("A");
    /// list.push_back(p1).unwrap();
    ///
    /// list.insert_before(p1, a).unwrap();
    /// assert_eq!(list.prev(p1), Ok(a));
    /// assert_eq!(list.next(p1), Ok(a));
    ///
    /// // `a` is already a member
    /// assert_eq!(list.insert_before(p1, a), Err(Error::Linked(a)));
    /// ```
    pub fn insert_before(&mut self, position: NodeId, item: NodeId) -> Result<()> {
        self.linked_node(position)?;
        self.detached_node(item)?;
        self.attach_before(position, item);
        Ok(())
    }

    /// Splice the detached node `item` into the ring right after the member
    /// `position`.
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
    /// let mut list: List = ["P1", "P2"].iter().copied().collect();
    /// let a = list.new_node("A");
    /// let p1 = list.head().unwrap();
    ///
    /// list.insert_after(p1, a).unwrap();
    /// assert_eq!(format!("{:?}", list), r#"["P1", "A", "P2"]"#);
    /// ```
    pub fn insert_after(&mut self, position: NodeId, item: NodeId) -> Result<()> {
        self.linked_node(position)?;
        self.detached_node(item)?;
        self.attach_after(position, item);
        Ok(())
    }

    /// Unlink the member `item` from the ring without freeing it.
    ///
    /// The neighbours of `item` become adjacent. If `item` is the head, the
    /// head advances to its former successor so the rest of the ring stays
    /// reachable. Afterwards `item` is detached and may be inserted again or
    /// destroyed.
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
    /// let mut list: List = ["P1", "P2", "P3"].iter().copied().collect();
    /// let p1 = list.head().unwrap();
    ///
    /// list.remove(p1).unwrap();
    /// assert_eq!(format!("{:?}", list), r#"["P2", "P3"]"#);
    /// assert!(!list.is_linked(p1));
    /// assert_eq!(list.get(p1), Some("P1"));
    /// ```
    pub fn remove(&mut self, item: NodeId) -> Result<()> {
        self.linked_node(item)?;
        self.detach_node(item);
        Ok(())
    }

    /// Link the detached node `item` as the last member of the ring, right
    /// before the head. Into an empty ring, `item` becomes the head.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// let p1 = list.new_node("P1");
    /// let p2 = list.new_node("P2");
    /// list.push_back(p1).unwrap();
    /// list.push_back(p2).unwrap();
    ///
    /// assert_eq!(list.head(), Some(p1));
    /// assert_eq!(format!("{:?}", list), r#"["P1", "P2"]"#);
    /// ```
    pub fn push_back(&mut self, item: NodeId) -> Result<()> {
        self.detached_node(item)?;
        self.link_back(item);
        Ok(())
    }

    /// Link the detached node `item` as the first member of the ring, and
    /// make it the head.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list: List = ["P2"].iter().copied().collect();
    /// let p1 = list.new_node("P1");
    /// list.push_front(p1).unwrap();
    ///
    /// assert_eq!(list.head(), Some(p1));
    /// assert_eq!(format!("{:?}", list), r#"["P1", "P2"]"#);
    /// ```
    pub fn push_front(&mut self, item: NodeId) -> Result<()> {
        self.detached_node(item)?;
        self.link_back(item);
        self.head = Some(item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::list::{List, NodeId};

    fn ring_of(values: &[&str]) -> (List, Vec<NodeId>) {
        let mut list = List::new();
        let ids = values
            .iter()
            .map(|value| {
                let id = list.new_node(*value);
                list.push_back(id).unwrap();
                id
            })
            .collect();
        (list, ids)
    }

    fn payloads(list: &List) -> Vec<&str> {
        list.iter().map(|node| node.payload()).collect()
    }

    #[test]
    fn single_member_links_to_itself() {
        let (list, ids) = ring_of(&["P1"]);
        assert_eq!(list.next(ids[0]), Ok(ids[0]));
        assert_eq!(list.prev(ids[0]), Ok(ids[0]));
        assert!(list.is_well_formed());
    }

    #[test]
    fn insert_before_and_after() {
        let (mut list, ids) = ring_of(&["P1", "P3"]);
        let p2 = list.new_node("P2");
        let p4 = list.new_node("P4");
        list.insert_before(ids[1], p2).unwrap();
        list.insert_after(ids[1], p4).unwrap();
        assert_eq!(payloads(&list), ["P1", "P2", "P3", "P4"]);
        assert_eq!(list.prev(ids[0]), Ok(p4));
        assert!(list.is_well_formed());

        // Inserting before the head appends at the end of the ring.
        let p5 = list.new_node("P5");
        list.insert_before(ids[0], p5).unwrap();
        assert_eq!(payloads(&list), ["P1", "P2", "P3", "P4", "P5"]);
        assert_eq!(list.head(), Some(ids[0]));
    }

    #[test]
    fn insert_rejects_bad_arguments() {
        let (mut list, ids) = ring_of(&["P1", "P2"]);
        let a = list.new_node("A");
        let b = list.new_node("B");

        assert_eq!(list.insert_after(a, b), Err(Error::Detached(a)));
        assert_eq!(list.insert_after(ids[0], ids[1]), Err(Error::Linked(ids[1])));
        assert_eq!(list.push_back(ids[0]), Err(Error::Linked(ids[0])));
        assert_eq!(list.push_front(ids[1]), Err(Error::Linked(ids[1])));

        list.destroy(b).unwrap();
        assert_eq!(list.insert_before(ids[0], b), Err(Error::StaleNode(b)));

        // Nothing was touched by the rejected calls.
        assert_eq!(payloads(&list), ["P1", "P2"]);
        assert!(!list.is_linked(a));
        assert!(list.is_well_formed());
    }

    #[test]
    fn remove_advances_head() {
        let (mut list, ids) = ring_of(&["P1", "P2", "P3"]);
        list.remove(ids[0]).unwrap();
        assert_eq!(list.head(), Some(ids[1]));
        assert_eq!(payloads(&list), ["P2", "P3"]);

        list.remove(ids[2]).unwrap();
        assert_eq!(list.head(), Some(ids[1]));
        assert_eq!(list.next(ids[1]), Ok(ids[1]));

        list.remove(ids[1]).unwrap();
        assert_eq!(list.head(), None);
        assert!(list.is_empty());
        assert!(list.is_well_formed());
        assert_eq!(list.node_count(), 3);
    }

    #[test]
    fn remove_rejects_detached() {
        let (mut list, ids) = ring_of(&["P1"]);
        list.remove(ids[0]).unwrap();
        assert_eq!(list.remove(ids[0]), Err(Error::Detached(ids[0])));
    }

    #[test]
    fn remove_then_reinsert_restores_ring() {
        let (mut list, ids) = ring_of(&["P1", "P2", "A", "P3", "B"]);
        let snapshot = list.clone();
        for &id in &ids {
            let prev = list.prev(id).unwrap();
            list.remove(id).unwrap();
            list.insert_after(prev, id).unwrap();
            for &other in &ids {
                assert_eq!(list.next(other), snapshot.next(other));
                assert_eq!(list.prev(other), snapshot.prev(other));
            }
            assert!(list.is_well_formed());
        }
    }

    #[test]
    fn push_front_moves_head() {
        let mut list = List::new();
        let b = list.new_node("B");
        let a = list.new_node("A");
        list.push_front(b).unwrap();
        list.push_front(a).unwrap();
        assert_eq!(list.head(), Some(a));
        assert_eq!(payloads(&list), ["A", "B"]);
        assert!(list.is_well_formed());
    }
}

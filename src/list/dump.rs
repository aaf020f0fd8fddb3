//! Diagnostic text dump of a ring.
//!
//! The dump starts with a header line naming the dump and the head, then has
//! one line per member, in ring order from the head:
//!
//! ```text
//! List: <tag> (0x<head>)
//! P = 0x<prev>, N = 0x<next>: <payload>
//! ```
//!
//! Node identities are the packed [`NodeId`] handles in hexadecimal. They are
//! opaque: only good for telling nodes apart.

use std::fmt;
use std::io;

use crate::list::iterator::NodeRef;
use crate::list::{List, NodeId};

/// A [`Display`](fmt::Display) adapter printing the whole ring, created by
/// [`List::dump`].
pub struct Dump<'a> {
    list: &'a List,
    tag: &'a str,
}

struct Identity(Option<NodeId>);

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "0x{:08X}", id),
            None => f.write_str("0x--------"),
        }
    }
}

/// One dump line: the neighbour identities and the payload of the node.
impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P = {}, N = {}: {}",
            Identity(Some(self.prev())),
            Identity(Some(self.next())),
            self.payload()
        )
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "List: {} ({})", self.tag, Identity(self.list.head()))?;
        self.list
            .iter()
            .try_for_each(|node| writeln!(f, "{}", node))
    }
}

impl List {
    /// Returns a [`Display`](fmt::Display) adapter dumping the ring under the
    /// name `tag`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let list: List = ["P1", "P2"].iter().copied().collect();
    /// assert_eq!(
    ///     list.dump("demo").to_string(),
    ///     "List: demo (0x00000000)\n\
    ///      P = 0x00000001, N = 0x00000001: P1\n\
    ///      P = 0x00000000, N = 0x00000000: P2\n"
    /// );
    /// ```
    pub fn dump<'a>(&'a self, tag: &'a str) -> Dump<'a> {
        Dump { list: self, tag }
    }

    /// Write the dump of the ring to `writer`.
    pub fn print_all<W: io::Write>(&self, writer: &mut W, tag: &str) -> io::Result<()> {
        write!(writer, "{}", self.dump(tag))
    }
}

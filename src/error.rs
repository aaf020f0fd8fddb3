use crate::list::NodeId;

/// Contract violations reported by the list operations.
///
/// An operation that returns an error has not touched any link, so the ring
/// is still in the state it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// The handle does not refer to a live node of this list, either because
    /// the node was destroyed or because another list created the handle.
    #[error("node {0} is stale or does not belong to this list")]
    StaleNode(NodeId),
    /// The node is required to be a ring member, but it is detached.
    #[error("node {0} is not linked into the ring")]
    Detached(NodeId),
    /// The node is required to be detached, but it is a ring member.
    #[error("node {0} is still linked into the ring")]
    Linked(NodeId),
    /// Both arguments of a swap refer to the same node.
    #[error("cannot swap node {0} with itself")]
    SelfSwap(NodeId),
}

pub type Result<T> = std::result::Result<T, Error>;

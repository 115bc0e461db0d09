//! Node arena types.

/// Index of a node inside a [`BehaviorTree`](crate::BehaviorTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the tree. Composite nodes refer to their children by id.
///
/// Children are always allocated before their parent, so the arena is acyclic
/// by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<L> {
    /// OR: first child that does not fail decides the result.
    Selector { children: Vec<NodeId> },
    /// AND: children run in order, resuming at the remembered cursor.
    Sequence { label: String, children: Vec<NodeId> },
    /// Swaps Success and Failure of its child.
    Inverter { child: NodeId },
    Leaf(L),
}

impl<L> Node<L> {
    /// Child ids in evaluation order (empty for leaves).
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Selector { children } | Node::Sequence { children, .. } => children,
            Node::Inverter { child } => std::slice::from_ref(child),
            Node::Leaf(_) => &[],
        }
    }
}

//! Builder for assembling a behavior tree arena.
//!
//! Nodes are added bottom-up: leaves first, then the composites that refer to
//! them. Each call returns the [`NodeId`] of the new node.
//!
//! ```
//! use behavior_tree::{Behavior, LeafState, Status, TreeBuilder};
//!
//! struct Done;
//! impl Behavior<()> for Done {
//!     fn tick(&self, _state: &mut LeafState, _ctx: &mut ()) -> Status {
//!         Status::Success
//!     }
//! }
//!
//! let mut builder = TreeBuilder::new();
//! let a = builder.leaf(Done);
//! let b = builder.leaf(Done);
//! let root = builder.sequence("both", vec![a, b]);
//! let mut tree = builder.build(root);
//! assert_eq!(tree.tick(&mut ()), Status::Success);
//! ```

use crate::{BehaviorTree, Node, NodeId};

pub struct TreeBuilder<L> {
    nodes: Vec<Node<L>>,
}

impl<L> Default for TreeBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> TreeBuilder<L> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a leaf node.
    pub fn leaf(&mut self, leaf: L) -> NodeId {
        self.push(Node::Leaf(leaf))
    }

    /// Adds a sequence node.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty or refers to a node not yet added. Both
    /// indicate a programming error in tree construction.
    pub fn sequence(&mut self, label: impl Into<String>, children: Vec<NodeId>) -> NodeId {
        self.check_children(&children, "Sequence");
        self.push(Node::Sequence {
            label: label.into(),
            children,
        })
    }

    /// Adds a selector node.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty or refers to a node not yet added.
    pub fn selector(&mut self, children: Vec<NodeId>) -> NodeId {
        self.check_children(&children, "Selector");
        self.push(Node::Selector { children })
    }

    /// Adds an inverter around `child`.
    pub fn inverter(&mut self, child: NodeId) -> NodeId {
        self.check_children(std::slice::from_ref(&child), "Inverter");
        self.push(Node::Inverter { child })
    }

    /// Finishes the arena with `root` as the entry point.
    pub fn build(self, root: NodeId) -> BehaviorTree<L> {
        assert!(root.index() < self.nodes.len(), "root must be a built node");
        BehaviorTree::from_arena(self.nodes, root)
    }

    fn push(&mut self, node: Node<L>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn check_children(&self, children: &[NodeId], kind: &str) {
        assert!(!children.is_empty(), "{kind} must have at least one child");
        assert!(
            children.iter().all(|c| c.index() < self.nodes.len()),
            "{kind} child must be added before its parent"
        );
    }
}

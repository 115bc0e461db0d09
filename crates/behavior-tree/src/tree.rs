//! The behavior tree arena and its tick loop.

use crate::composite;
use crate::decorator;
use crate::{Behavior, LeafState, Node, NodeId, Status, TreeObserver};

/// Mutable progress for one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct NodeMemory {
    /// Next child to evaluate (sequences only).
    cursor: usize,
    /// Progress flags (leaves only).
    leaf: LeafState,
}

/// A behavior tree: an immutable node arena plus per-node memory.
///
/// The tree is generic over the leaf payload `L`; any context type `C` for
/// which `L: Behavior<C>` can drive it.
#[derive(Debug, Clone)]
pub struct BehaviorTree<L> {
    nodes: Vec<Node<L>>,
    memory: Vec<NodeMemory>,
    root: NodeId,
}

impl<L> BehaviorTree<L> {
    pub(crate) fn from_arena(nodes: Vec<Node<L>>, root: NodeId) -> Self {
        let memory = vec![NodeMemory::default(); nodes.len()];
        Self {
            nodes,
            memory,
            root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<L>> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current cursor of a sequence node, `None` for other node kinds.
    pub fn sequence_cursor(&self, id: NodeId) -> Option<usize> {
        match self.nodes.get(id.index())? {
            Node::Sequence { .. } => Some(self.memory[id.index()].cursor),
            _ => None,
        }
    }

    /// Clears every cursor and leaf flag.
    pub fn reset(&mut self) {
        self.memory.fill(NodeMemory::default());
    }

    /// Evaluates the tree once from the root.
    pub fn tick<C>(&mut self, ctx: &mut C) -> Status
    where
        L: Behavior<C>,
    {
        self.tick_observed(ctx, &mut ())
    }

    /// Evaluates the tree once, reporting activity to `observer`.
    pub fn tick_observed<C, O>(&mut self, ctx: &mut C, observer: &mut O) -> Status
    where
        L: Behavior<C>,
        O: TreeObserver + ?Sized,
    {
        evaluate(&self.nodes, &mut self.memory, self.root, ctx, observer)
    }
}

fn evaluate<L, C, O>(
    nodes: &[Node<L>],
    memory: &mut [NodeMemory],
    id: NodeId,
    ctx: &mut C,
    observer: &mut O,
) -> Status
where
    L: Behavior<C>,
    O: TreeObserver + ?Sized,
{
    match &nodes[id.index()] {
        Node::Selector { children } => composite::select(children, |child| {
            evaluate(nodes, memory, child, ctx, observer)
        }),
        Node::Sequence { label, children } => {
            observer.sequence_ticked(label);
            let mut cursor = memory[id.index()].cursor;
            let status = composite::sequence(children, &mut cursor, |child| {
                evaluate(nodes, memory, child, ctx, observer)
            });
            memory[id.index()].cursor = cursor;
            status
        }
        Node::Inverter { child } => {
            decorator::invert(*child, |child| evaluate(nodes, memory, child, ctx, observer))
        }
        Node::Leaf(leaf) => {
            let state = &mut memory[id.index()].leaf;
            let status = leaf.tick(state, ctx);
            if status.is_terminal() {
                state.reset();
            }
            observer.leaf_ticked(leaf.name(), status);
            status
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeBuilder;

    #[derive(Default)]
    struct TestContext {
        value: i32,
        pending: u32,
    }

    enum TestLeaf {
        Increment,
        Decrement,
        FailAlways,
        /// Running for three ticks, then Success.
        Slow,
    }

    impl Behavior<TestContext> for TestLeaf {
        fn tick(&self, state: &mut LeafState, ctx: &mut TestContext) -> Status {
            match self {
                TestLeaf::Increment => {
                    ctx.value += 1;
                    Status::Success
                }
                TestLeaf::Decrement => {
                    ctx.value -= 1;
                    Status::Success
                }
                TestLeaf::FailAlways => Status::Failure,
                TestLeaf::Slow => {
                    if state.begin() {
                        ctx.pending = 2;
                        Status::Running
                    } else if ctx.pending > 0 {
                        ctx.pending -= 1;
                        Status::Running
                    } else {
                        Status::Success
                    }
                }
            }
        }

        fn name(&self) -> &str {
            match self {
                TestLeaf::Increment => "increment",
                TestLeaf::Decrement => "decrement",
                TestLeaf::FailAlways => "fail",
                TestLeaf::Slow => "slow",
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        sequences: Vec<String>,
        leaves: Vec<(String, Status)>,
    }

    impl TreeObserver for Recorder {
        fn sequence_ticked(&mut self, label: &str) {
            self.sequences.push(label.to_string());
        }

        fn leaf_ticked(&mut self, name: &str, status: Status) {
            self.leaves.push((name.to_string(), status));
        }
    }

    #[test]
    fn sequence_waits_on_running_child() {
        let mut builder = TreeBuilder::new();
        let first = builder.leaf(TestLeaf::Increment);
        let slow = builder.leaf(TestLeaf::Slow);
        let last = builder.leaf(TestLeaf::Increment);
        let root = builder.sequence("main", vec![first, slow, last]);
        let mut tree = builder.build(root);

        let mut ctx = TestContext::default();
        for _ in 0..3 {
            assert_eq!(tree.tick(&mut ctx), Status::Running);
            assert_eq!(tree.sequence_cursor(root), Some(1));
            // The first leaf is not re-run and the last is not reached.
            assert_eq!(ctx.value, 1);
        }

        assert_eq!(tree.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 2);
        assert_eq!(tree.sequence_cursor(root), Some(0));
    }

    #[test]
    fn selector_short_circuits_on_success() {
        let mut builder = TreeBuilder::new();
        let fail = builder.leaf(TestLeaf::FailAlways);
        let inc = builder.leaf(TestLeaf::Increment);
        let dec = builder.leaf(TestLeaf::Decrement);
        let root = builder.selector(vec![fail, inc, dec]);
        let mut tree = builder.build(root);

        let mut ctx = TestContext::default();
        assert_eq!(tree.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let mut builder = TreeBuilder::new();
        let a = builder.leaf(TestLeaf::FailAlways);
        let b = builder.leaf(TestLeaf::FailAlways);
        let root = builder.selector(vec![a, b]);
        let mut tree = builder.build(root);

        assert_eq!(tree.tick(&mut TestContext::default()), Status::Failure);
    }

    #[test]
    fn sequence_fails_on_first_failure() {
        let mut builder = TreeBuilder::new();
        let inc = builder.leaf(TestLeaf::Increment);
        let fail = builder.leaf(TestLeaf::FailAlways);
        let inc2 = builder.leaf(TestLeaf::Increment);
        let root = builder.sequence("guarded", vec![inc, fail, inc2]);
        let mut tree = builder.build(root);

        let mut ctx = TestContext::default();
        assert_eq!(tree.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.value, 1);
        assert_eq!(tree.sequence_cursor(root), Some(0));
    }

    #[test]
    fn running_sequence_under_selector_resumes() {
        let mut builder = TreeBuilder::new();
        let gate = builder.leaf(TestLeaf::FailAlways);
        let guard = builder.inverter(gate);
        let slow = builder.leaf(TestLeaf::Slow);
        let busy = builder.sequence("busy", vec![guard, slow]);
        let fallback = builder.leaf(TestLeaf::Decrement);
        let root = builder.selector(vec![busy, fallback]);
        let mut tree = builder.build(root);

        let mut ctx = TestContext::default();
        assert_eq!(tree.tick(&mut ctx), Status::Running);
        assert_eq!(tree.sequence_cursor(busy), Some(1));
        assert_eq!(tree.tick(&mut ctx), Status::Running);
        assert_eq!(tree.tick(&mut ctx), Status::Running);
        assert_eq!(tree.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 0);
    }

    #[test]
    fn leaf_state_resets_after_terminal_status() {
        let mut builder = TreeBuilder::new();
        let slow = builder.leaf(TestLeaf::Slow);
        let mut tree = builder.build(slow);

        let mut ctx = TestContext::default();
        while tree.tick(&mut ctx).is_running() {}

        // A fresh run starts over with the initiating tick.
        assert_eq!(tree.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.pending, 2);
    }

    #[test]
    fn reset_clears_cursors() {
        let mut builder = TreeBuilder::new();
        let inc = builder.leaf(TestLeaf::Increment);
        let slow = builder.leaf(TestLeaf::Slow);
        let root = builder.sequence("main", vec![inc, slow]);
        let mut tree = builder.build(root);

        let mut ctx = TestContext::default();
        tree.tick(&mut ctx);
        assert_eq!(tree.sequence_cursor(root), Some(1));

        tree.reset();
        assert_eq!(tree.sequence_cursor(root), Some(0));
        tree.tick(&mut ctx);
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn observer_sees_sequences_and_leaves() {
        let mut builder = TreeBuilder::new();
        let fail = builder.leaf(TestLeaf::FailAlways);
        let first = builder.sequence("first", vec![fail]);
        let inc = builder.leaf(TestLeaf::Increment);
        let second = builder.sequence("second", vec![inc]);
        let root = builder.selector(vec![first, second]);
        let mut tree = builder.build(root);

        let mut recorder = Recorder::default();
        let status = tree.tick_observed(&mut TestContext::default(), &mut recorder);

        assert_eq!(status, Status::Success);
        assert_eq!(recorder.sequences, vec!["first", "second"]);
        assert_eq!(
            recorder.leaves,
            vec![
                ("fail".to_string(), Status::Failure),
                ("increment".to_string(), Status::Success)
            ]
        );
    }

    #[test]
    #[should_panic(expected = "Sequence must have at least one child")]
    fn empty_sequence_panics() {
        let mut builder: TreeBuilder<TestLeaf> = TreeBuilder::new();
        builder.sequence("empty", Vec::new());
    }
}

//! Ready-made trees.
//!
//! ```text
//! Selector
//!   ├─ Retreat Sequence: CheckRetreatDesirability → MoveToSafeSpace
//!   ├─ Fort Sequence:    CheckFortDesirability → MoveToFort
//!   ├─ Attack Sequence:  CheckAttackDesirability → MoveToAttackPosition → AttackTarget
//!   ├─ Wait Sequence:    CheckWaitDesirability → Wait
//!   └─ Default Sequence: Default
//! ```

use behavior_tree::{BehaviorTree, TreeBuilder};

use super::nodes::AiLeaf;
use super::types::AiAction;

pub type AiTree = BehaviorTree<AiLeaf>;

/// The standard enemy tree: one branch per scored action plus a fallback.
pub fn enemy_tree() -> AiTree {
    let mut b = TreeBuilder::new();

    let check = b.leaf(AiLeaf::Check(AiAction::Retreat));
    let flee = b.leaf(AiLeaf::MoveToSafeSpace);
    let retreat = b.sequence("Retreat Sequence", vec![check, flee]);

    let check = b.leaf(AiLeaf::Check(AiAction::Fort));
    let walk = b.leaf(AiLeaf::MoveToFort);
    let fort = b.sequence("Fort Sequence", vec![check, walk]);

    let check = b.leaf(AiLeaf::Check(AiAction::Attack));
    let approach = b.leaf(AiLeaf::MoveToAttackPosition);
    let strike = b.leaf(AiLeaf::AttackTarget);
    let attack = b.sequence("Attack Sequence", vec![check, approach, strike]);

    let check = b.leaf(AiLeaf::Check(AiAction::Wait));
    let idle = b.leaf(AiLeaf::Wait);
    let wait = b.sequence("Wait Sequence", vec![check, idle]);

    let fallback = b.leaf(AiLeaf::Default);
    let default = b.sequence("Default Sequence", vec![fallback]);

    let root = b.selector(vec![retreat, fort, attack, wait, default]);
    b.build(root)
}

//! Decorator evaluation rules.
//!
//! Decorator nodes wrap a single child and modify its result.

use crate::{NodeId, Status};

/// Inverts the child's result: Success becomes Failure and vice versa.
///
/// `Running` passes through, so an inverted long action still suspends the
/// tree until it finishes.
pub fn invert(child: NodeId, mut eval: impl FnMut(NodeId) -> Status) -> Status {
    eval(child).invert()
}

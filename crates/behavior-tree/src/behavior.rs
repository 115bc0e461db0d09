//! Leaf behavior trait.
//!
//! This module defines the [`Behavior`] trait implemented by leaf payloads.
//! The trait is generic over a context type `C`, allowing leaves to read and
//! mutate game state. Progress that spans ticks is kept in a [`LeafState`]
//! owned by the tree, so leaf values themselves stay immutable.

use crate::Status;

/// Per-leaf progress record that persists between ticks.
///
/// The tree clears it whenever the leaf returns a terminal status, so a leaf
/// always starts fresh the next time it is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeafState {
    initiated: bool,
}

impl LeafState {
    /// Marks the leaf as initiated.
    ///
    /// Returns `true` only on the first call since the last reset, which is the
    /// tick on which a long-running action should be started.
    #[inline]
    pub fn begin(&mut self) -> bool {
        !std::mem::replace(&mut self.initiated, true)
    }

    #[inline]
    pub fn is_initiated(&self) -> bool {
        self.initiated
    }

    #[inline]
    pub fn reset(&mut self) {
        self.initiated = false;
    }
}

/// A leaf node that can be evaluated against a context.
pub trait Behavior<C> {
    /// Evaluate this leaf for one tick.
    ///
    /// # Arguments
    ///
    /// * `state` - Progress flags kept by the tree for this leaf.
    /// * `ctx` - Mutable reference to the context/blackboard.
    ///
    /// # Returns
    ///
    /// - `Status::Running` if the action is still in progress
    /// - `Status::Success` if the behavior succeeded
    /// - `Status::Failure` if the behavior failed
    fn tick(&self, state: &mut LeafState, ctx: &mut C) -> Status;

    /// Human-readable name, reported to observers.
    fn name(&self) -> &str {
        "leaf"
    }
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to be used as a leaf payload, enabling
/// heterogeneous leaves in a single tree.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, state: &mut LeafState, ctx: &mut C) -> Status {
        (**self).tick(state, ctx)
    }

    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }
}

//! Hooks for watching tree activity.
//!
//! Observers are how presentation layers learn which sequence and which action
//! are active without the tree depending on them. Every method has an empty
//! default, and `()` is the no-op observer.

use crate::Status;

pub trait TreeObserver {
    /// A sequence node is about to evaluate its children.
    fn sequence_ticked(&mut self, _label: &str) {}

    /// A leaf returned `status` this tick.
    fn leaf_ticked(&mut self, _name: &str, _status: Status) {}
}

impl TreeObserver for () {}

//! Composite evaluation rules.
//!
//! Composite nodes control the execution flow of multiple children. The rules
//! here are written against an evaluation callback so that the tree can keep
//! node memory outside of the node values: [`select`] is a stateless OR and
//! [`sequence`] is an AND that resumes from a stored cursor.

use crate::{NodeId, Status};

/// Evaluates children left to right until one does not fail.
///
/// # Semantics
///
/// - `Running` or `Success` from a child is returned immediately; later
///   children are not evaluated in this call
/// - If all children return `Failure`, the selector returns `Failure`
///
/// Nothing is remembered between ticks.
pub fn select(children: &[NodeId], mut eval: impl FnMut(NodeId) -> Status) -> Status {
    for &child in children {
        match eval(child) {
            Status::Failure => continue,
            status => return status,
        }
    }
    Status::Failure
}

/// Evaluates children in order starting at `cursor`.
///
/// # Semantics
///
/// - `Success` advances the cursor and the next child runs in the same call
/// - `Running` returns `Running` and leaves the cursor on that child
/// - `Failure` resets the cursor to 0 and returns `Failure`
/// - When every remaining child succeeds the cursor resets to 0 and the
///   sequence returns `Success`
pub fn sequence(
    children: &[NodeId],
    cursor: &mut usize,
    mut eval: impl FnMut(NodeId) -> Status,
) -> Status {
    while let Some(&child) = children.get(*cursor) {
        match eval(child) {
            Status::Success => *cursor += 1,
            Status::Running => return Status::Running,
            Status::Failure => {
                *cursor = 0;
                return Status::Failure;
            }
        }
    }
    *cursor = 0;
    Status::Success
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<NodeId> {
        (0..n).map(NodeId).collect()
    }

    #[test]
    fn select_returns_first_non_failure() {
        let outcomes = [Status::Failure, Status::Success, Status::Success];
        let mut visited = Vec::new();

        let status = select(&ids(3), |id| {
            visited.push(id.index());
            outcomes[id.index()]
        });

        assert_eq!(status, Status::Success);
        assert_eq!(visited, vec![0, 1]);
    }

    #[test]
    fn select_propagates_running() {
        let outcomes = [Status::Failure, Status::Running, Status::Success];
        let status = select(&ids(3), |id| outcomes[id.index()]);
        assert_eq!(status, Status::Running);
    }

    #[test]
    fn select_fails_when_all_fail() {
        let status = select(&ids(2), |_| Status::Failure);
        assert_eq!(status, Status::Failure);
    }

    #[test]
    fn sequence_runs_to_completion_in_one_call() {
        let mut cursor = 0;
        let mut count = 0;
        let status = sequence(&ids(3), &mut cursor, |_| {
            count += 1;
            Status::Success
        });

        assert_eq!(status, Status::Success);
        assert_eq!(count, 3);
        assert_eq!(cursor, 0);
    }

    #[test]
    fn sequence_keeps_cursor_while_running() {
        let mut cursor = 0;
        let status = sequence(&ids(3), &mut cursor, |id| {
            if id.index() == 1 {
                Status::Running
            } else {
                Status::Success
            }
        });

        assert_eq!(status, Status::Running);
        assert_eq!(cursor, 1);
    }

    #[test]
    fn sequence_resets_cursor_on_failure() {
        let mut cursor = 2;
        let status = sequence(&ids(3), &mut cursor, |_| Status::Failure);

        assert_eq!(status, Status::Failure);
        assert_eq!(cursor, 0);
    }

    #[test]
    fn sequence_resumes_from_cursor() {
        let mut cursor = 2;
        let mut visited = Vec::new();
        let status = sequence(&ids(3), &mut cursor, |id| {
            visited.push(id.index());
            Status::Success
        });

        assert_eq!(status, Status::Success);
        assert_eq!(visited, vec![2]);
    }
}

use crate::state::NodeId;

/// Walks `predecessor` back from `target` to `start` and returns the path in
/// travel order, both ends inclusive.
///
/// Returns an empty path when `target` was never reached from `start`, or when
/// the walk exceeds `cap` hops. The latter only happens with a corrupted
/// (cyclic) table and is logged as such.
pub fn reconstruct_path(
    predecessor: &[Option<NodeId>],
    start: NodeId,
    target: NodeId,
    cap: usize,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = target;

    loop {
        if current == start {
            path.push(start);
            path.reverse();
            return path;
        }
        if path.len() >= cap {
            tracing::warn!(
                %start,
                %target,
                cap,
                "path reconstruction exceeded hop cap; predecessor chain is corrupted"
            );
            return Vec::new();
        }
        path.push(current);

        match predecessor.get(current.index()).copied().flatten() {
            Some(previous) => current = previous,
            None => {
                tracing::debug!(%start, %target, "target not reachable from start");
                return Vec::new();
            }
        }
    }
}

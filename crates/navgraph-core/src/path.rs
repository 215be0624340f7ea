use crate::field::NodeField;
use crate::graph::NeighborGraph;

pub const DEFAULT_STEP_CAP: usize = 20;

/// Greedy walk from `start` toward `target` over the neighbour graph.
///
/// Each step moves to the unvisited neighbour closest to the target and
/// stops when no neighbour is strictly closer than the current node, when
/// the target is reached, or after `cap` steps. The result always begins
/// with `start` and holds at most `cap + 1` nodes.
pub fn greedy_path(
    field: &NodeField,
    graph: &NeighborGraph,
    start: usize,
    target: usize,
    cap: usize,
) -> Vec<usize> {
    let mut path = vec![start];
    if start >= field.len() || target >= field.len() {
        return path;
    }

    let goal = field.position(target);
    let mut curr = start;

    for _ in 0..cap {
        if curr == target {
            break;
        }

        let mut best = curr;
        let mut best_dist = field.position(curr).distance(goal);
        for &n in graph.neighbors(curr) {
            if path.contains(&n) {
                continue;
            }
            let d = field.position(n).distance(goal);
            if d < best_dist {
                best = n;
                best_dist = d;
            }
        }

        if best == curr {
            break;
        }
        curr = best;
        path.push(curr);
    }

    path
}

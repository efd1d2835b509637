//! Single-augmenting-path unit-capacity max-flow, ported from
//! `edmond_karp.h`'s `compute_maximum_unit_flow_using_edmond_karp`. Repeated
//! BFS for an augmenting path, one unit pushed at a time; used to validate a
//! cutter's terminal flow against a from-scratch computation, not on the
//! cutter's hot path.

use crate::graph::NodeId;
use crate::index::InvertedIndex;

/// Returns a bit per arc: `true` iff that arc carries one unit of flow.
/// `flow[a]` and `flow[back_arc[a]]` are never both set.
pub fn compute_maximum_unit_flow(out_arc: &InvertedIndex, head: &[NodeId], back_arc: &[u32], source_list: &[NodeId], target_list: &[NodeId]) -> Vec<bool> {
    let n = head.iter().chain(source_list.iter()).chain(target_list.iter()).map(|&x| x as usize + 1).max().unwrap_or(0);
    let arc_count = head.len();

    let mut is_target = vec![false; n];
    for &t in target_list {
        is_target[t as usize] = true;
    }
    let mut is_source = vec![false; n];
    for &s in source_list {
        is_source[s as usize] = true;
    }

    let mut flow = vec![false; arc_count];

    let find_augmenting_path = |s: usize, flow: &[bool]| -> Option<(usize, Vec<(usize, usize)>)> {
        let mut was_pushed = vec![false; n];
        let mut pred: Vec<Option<(usize, usize)>> = vec![None; n];
        let mut queue = std::collections::VecDeque::new();
        was_pushed[s] = true;
        queue.push_back(s);
        while let Some(x) = queue.pop_front() {
            for xy in out_arc.range(x) {
                if !flow[xy] {
                    let y = head[xy] as usize;
                    if !was_pushed[y] && !is_source[y] {
                        pred[y] = Some((x, xy));
                        if is_target[y] {
                            let mut path = Vec::new();
                            let mut cur = y;
                            while cur != s {
                                let (px, pa) = pred[cur].unwrap();
                                path.push((px, pa));
                                cur = px;
                            }
                            return Some((y, path));
                        }
                        was_pushed[y] = true;
                        queue.push_back(y);
                    }
                }
            }
        }
        None
    };

    for &s in source_list {
        while let Some((_t, path)) = find_augmenting_path(s as usize, &flow) {
            for (_x, xy) in path {
                let yx = back_arc[xy] as usize;
                debug_assert!(!flow[xy]);
                if flow[yx] {
                    flow[yx] = false;
                } else {
                    flow[xy] = true;
                }
            }
        }
    }
    flow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn single_bridge_caps_flow_at_one() {
        // two triangles joined by a bridge 2-3; max flow from {0} to {5} is 1.
        let pairs = [(0u32, 1u32), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)];
        let mut tail = Vec::new();
        let mut head = Vec::new();
        for &(a, b) in &pairs {
            tail.push(a);
            head.push(b);
            tail.push(b);
            head.push(a);
        }
        let g = Graph::new(tail, head, None, None).make_simple().unwrap();
        let back_arc = g.compute_back_arc_permutation().unwrap();
        let out_arc = g.out_arc_ranges();
        let flow = compute_maximum_unit_flow(&out_arc, g.head(), &back_arc, &[0], &[5]);
        let units: usize = (0..g.num_arcs()).filter(|&a| flow[a]).count();
        assert_eq!(units, 1);
    }
}

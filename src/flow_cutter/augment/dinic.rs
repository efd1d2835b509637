//! Blocking-flow unit-capacity max-flow, ported from `dinic.h`'s
//! `UnitDinicAlgo`. Each phase does one level-BFS from all sources to find
//! the "blocked" frontier, then greedily saturates every non-blocked
//! source-to-target path with a DFS-style walk that backtracks by marking
//! arcs blocked, repeating until a phase reaches no target. Kept as a
//! standalone validation routine, separate from the cutter's incremental
//! pierce loop.

use crate::graph::NodeId;
use crate::index::InvertedIndex;

pub struct Dinic<'g> {
    out_arc: &'g InvertedIndex,
    head: &'g [NodeId],
    back_arc: &'g [u32],
    source_list: Vec<usize>,
    target_list: Vec<usize>,
    is_target: Vec<bool>,
    is_saturated: Vec<bool>,
    is_blocked: Vec<bool>,
    flow_intensity: usize,
    finished: bool,
}

impl<'g> Dinic<'g> {
    pub fn new(out_arc: &'g InvertedIndex, head: &'g [NodeId], back_arc: &'g [u32], source_list: &[NodeId], target_list: &[NodeId]) -> Self {
        let n = head.iter().chain(source_list.iter()).chain(target_list.iter()).map(|&x| x as usize + 1).max().unwrap_or(0);
        let mut is_target = vec![false; n];
        for &t in target_list {
            is_target[t as usize] = true;
        }
        Dinic {
            out_arc,
            head,
            back_arc,
            source_list: source_list.iter().map(|&x| x as usize).collect(),
            target_list: target_list.iter().map(|&x| x as usize).collect(),
            is_target,
            is_saturated: vec![false; head.len()],
            is_blocked: vec![false; head.len()],
            flow_intensity: 0,
            finished: false,
        }
    }

    /// Level-BFS from every source over non-saturated, non-same-level arcs;
    /// marks every arc that cannot lie on a shortest augmenting path as
    /// blocked. Returns whether any target was reached at all.
    fn compute_blocking_flow(&mut self) -> bool {
        let n = self.is_target.len();
        let mut target_reachable = false;
        self.is_blocked.fill(false);
        let mut is_on_same_level_or_lower = vec![false; n];
        let mut was_pushed = vec![false; n];
        let mut queue: Vec<usize> = self.source_list.clone();
        for &s in &queue {
            was_pushed[s] = true;
        }
        let mut queue_begin = 0;
        let mut queue_current_level_end = queue.len();

        while queue_begin != queue_current_level_end {
            for i in queue_begin..queue_current_level_end {
                is_on_same_level_or_lower[queue[i]] = true;
            }
            for i in queue_begin..queue_current_level_end {
                let x = queue[i];
                for xy in self.out_arc.range(x) {
                    if self.is_saturated[xy] {
                        self.is_blocked[xy] = true;
                    } else {
                        let y = self.head[xy] as usize;
                        if is_on_same_level_or_lower[y] {
                            self.is_blocked[xy] = true;
                        } else if self.is_target[y] {
                            target_reachable = true;
                        } else if !was_pushed[y] {
                            queue.push(y);
                            was_pushed[y] = true;
                        }
                    }
                }
            }
            queue_begin = queue_current_level_end;
            queue_current_level_end = queue.len();
        }
        target_reachable
    }

    fn find_first_non_blocked_out_arc(&self, x: usize) -> Option<usize> {
        self.out_arc.range(x).find(|&xy| !self.is_blocked[xy])
    }

    /// Greedily drains every non-blocked path from each source, pushing one
    /// unit of flow per path reaching a target; backtracks by blocking dead
    /// ends, so this finds a maximal (not just maximum-per-path) set of
    /// vertex-disjoint-in-arcs augmenting paths per phase.
    fn augment_all_non_blocked_paths(&mut self) {
        for i in 0..self.source_list.len() {
            let mut path_node = vec![self.source_list[i]];
            let mut path_arc: Vec<usize> = Vec::new();
            loop {
                let x = *path_node.last().unwrap();
                match self.find_first_non_blocked_out_arc(x) {
                    None => {
                        if path_arc.is_empty() {
                            break;
                        }
                        let dead = path_arc.pop().unwrap();
                        path_node.pop();
                        self.is_blocked[dead] = true;
                    }
                    Some(xy) => {
                        let y = self.head[xy] as usize;
                        path_arc.push(xy);
                        path_node.push(y);
                        if self.is_target[y] {
                            for &a in &path_arc {
                                self.is_blocked[a] = true;
                                let b = self.back_arc[a] as usize;
                                if self.is_saturated[b] {
                                    self.is_saturated[b] = false;
                                } else {
                                    self.is_saturated[a] = true;
                                }
                            }
                            self.flow_intensity += 1;
                            path_arc.clear();
                            path_node.truncate(1);
                        }
                    }
                }
            }
        }
    }

    pub fn advance(&mut self) {
        if !self.finished && self.compute_blocking_flow() {
            self.augment_all_non_blocked_paths();
        } else {
            self.finished = true;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_flow_intensity(&self) -> usize {
        self.flow_intensity
    }

    pub fn saturated_flags(&self) -> &[bool] {
        &self.is_saturated
    }
}

pub fn compute_maximum_unit_flow(out_arc: &InvertedIndex, head: &[NodeId], back_arc: &[u32], source_list: &[NodeId], target_list: &[NodeId]) -> Vec<bool> {
    let mut algo = Dinic::new(out_arc, head, back_arc, source_list, target_list);
    while !algo.is_finished() {
        algo.advance();
    }
    algo.saturated_flags().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn single_bridge_caps_flow_at_one() {
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

    #[test]
    fn agrees_with_edmond_karp_on_k4_pair() {
        use super::super::edmond_karp;
        // two K4's joined by a bridge: max flow 1 regardless of algorithm.
        let mut tail = Vec::new();
        let mut head = Vec::new();
        let mut push = |a: u32, b: u32| {
            tail.push(a);
            head.push(b);
            tail.push(b);
            head.push(a);
        };
        for &(a, b) in &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
            push(a, b);
        }
        for &(a, b) in &[(4, 5), (4, 6), (4, 7), (5, 6), (5, 7), (6, 7)] {
            push(a, b);
        }
        push(3, 4);
        let g = Graph::new(tail, head, None, None).make_simple().unwrap();
        let back_arc = g.compute_back_arc_permutation().unwrap();
        let out_arc = g.out_arc_ranges();
        let dinic_flow = compute_maximum_unit_flow(&out_arc, g.head(), &back_arc, &[0], &[7]);
        let ek_flow = edmond_karp::compute_maximum_unit_flow(&out_arc, g.head(), &back_arc, &[0], &[7]);
        let dinic_units = (0..g.num_arcs()).filter(|&a| dinic_flow[a]).count();
        let ek_units = (0..g.num_arcs()).filter(|&a| ek_flow[a]).count();
        assert_eq!(dinic_units, ek_units);
        assert_eq!(dinic_units, 1);
    }
}

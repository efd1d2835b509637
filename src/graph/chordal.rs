//! Fill-in computation via the elimination game, ported from the ring/union-
//! find contraction graph. Callers
//! must already have relabeled nodes so that node id order *is* the
//! elimination order (node `0` eliminated first); [`crate::elimination`]
//! does that relabeling before calling in here.
//!
//! The trick avoided by the ring representation: eliminating node `v`
//! removes it from the graph and turns its remaining neighbors into a
//! clique (the "fill-in"). Doing this by explicitly materializing adjacency
//! lists costs `O(degree^2)` per elimination. Here, neighbors of an already
//! eliminated node are instead "absorbed" into whichever not-yet-eliminated
//! node representative they point to, using a union-find over nodes plus a
//! circular linked list ("ring") of each union-find class's remaining
//! out-arc segments, so a class's combined adjacency is swept in one pass.

use super::NodeId;

struct EdgeContractionGraph {
    next_adjacency_in_ring: Vec<usize>,
    union_find_parent: Vec<usize>,
    out_arc_begin: Vec<usize>,
    out_arc_end: Vec<usize>,
    arc_head: Vec<usize>,
    in_neighborhood: Vec<bool>,
    neighborhood: Vec<usize>,
    neighborhood_size: usize,
}

impl EdgeContractionGraph {
    fn new(tail: &[NodeId], head: &[NodeId], n: usize) -> Self {
        let m = tail.len();
        let mut out_arc_end = vec![0usize; n];
        for &t in tail {
            out_arc_end[t as usize] += 1;
        }
        let mut out_arc_begin = vec![0usize; n];
        for i in 1..n {
            out_arc_begin[i] = out_arc_end[i - 1];
            out_arc_end[i] += out_arc_begin[i];
        }

        let mut cursor = out_arc_begin.clone();
        let mut arc_head = vec![0usize; m];
        for i in 0..m {
            let t = tail[i] as usize;
            arc_head[cursor[t]] = head[i] as usize;
            cursor[t] += 1;
        }

        EdgeContractionGraph {
            next_adjacency_in_ring: (0..n).collect(),
            union_find_parent: (0..n).collect(),
            out_arc_begin,
            out_arc_end,
            arc_head,
            in_neighborhood: vec![false; n],
            neighborhood: vec![0; n],
            neighborhood_size: 0,
        }
    }

    /// Splice `v`'s remaining ring segment into `u`'s, after `v` has been
    /// absorbed into the union-find class represented by `u`.
    fn rewire_arcs_from_second_to_first(&mut self, u: usize, v: usize) {
        self.union_find_parent[v] = u;
        self.next_adjacency_in_ring.swap(u, v);
    }

    /// Recompute `v`'s deduplicated, loop-free, representative-resolved
    /// neighborhood by sweeping every adjacency segment still on `v`'s ring.
    /// Arc heads are compacted in place to drop loops and already-seen
    /// duplicates, and empty segments are unlinked from the ring so future
    /// sweeps skip them.
    fn compute_neighborhood_of(&mut self, v: usize) {
        for i in 0..self.neighborhood_size {
            self.in_neighborhood[self.neighborhood[i]] = false;
        }
        self.neighborhood_size = 0;

        if self.union_find_parent[v] != v {
            return;
        }

        let initial_adjacency = v;
        let mut current_adjacency = v;
        loop {
            let arc_in_end = self.out_arc_end[current_adjacency];
            let mut arc_in = self.out_arc_begin[current_adjacency];
            let mut arc_out = arc_in;

            while arc_in != arc_in_end {
                let mut x = self.arc_head[arc_in];
                while self.union_find_parent[x] != x {
                    x = self.union_find_parent[x];
                }
                let mut y = self.arc_head[arc_in];
                while self.union_find_parent[y] != y {
                    let z = self.union_find_parent[y];
                    self.union_find_parent[y] = x;
                    y = z;
                }
                self.arc_head[arc_in] = x;

                if !self.in_neighborhood[x] && x != v {
                    self.arc_head[arc_out] = x;
                    arc_out += 1;
                    self.in_neighborhood[x] = true;
                    self.neighborhood[self.neighborhood_size] = x;
                    self.neighborhood_size += 1;
                }
                arc_in += 1;
            }
            self.out_arc_end[current_adjacency] = arc_out;

            let mut next_adjacency = self.next_adjacency_in_ring[current_adjacency];
            while self.out_arc_begin[next_adjacency] == self.out_arc_end[next_adjacency] && next_adjacency != initial_adjacency {
                next_adjacency = self.next_adjacency_in_ring[next_adjacency];
            }
            self.next_adjacency_in_ring[current_adjacency] = next_adjacency;
            current_adjacency = next_adjacency;
            if current_adjacency == initial_adjacency {
                break;
            }
        }
    }

    fn last_computed_neighborhood(&self) -> &[usize] {
        &self.neighborhood[..self.neighborhood_size]
    }
}

/// Wraps [`EdgeContractionGraph`] with an `is_virtual` flag per node so the
/// elimination game can distinguish "node has already been eliminated, but
/// its ring is still absorbing later contractions" from "still active".
struct NodeContractionGraph {
    g: EdgeContractionGraph,
    is_virtual: Vec<bool>,
}

impl NodeContractionGraph {
    fn new(tail: &[NodeId], head: &[NodeId], n: usize) -> Self {
        NodeContractionGraph {
            g: EdgeContractionGraph::new(tail, head, n),
            is_virtual: vec![false; n],
        }
    }

    /// Eliminate `v`: first absorb the rings of any already-eliminated
    /// neighbors into `v`'s own ring, mark `v` virtual, then recompute the
    /// neighborhood one more time to get `v`'s upward (fill-in) edges and
    /// hand them to `on_upward_edge`.
    fn forall_neighbors_then_contract_node(&mut self, v: usize, mut on_upward_edge: impl FnMut(usize)) {
        self.g.compute_neighborhood_of(v);
        for i in 0..self.g.last_computed_neighborhood().len() {
            let u = self.g.neighborhood[i];
            if self.is_virtual[u] {
                self.g.rewire_arcs_from_second_to_first(v, u);
            }
        }
        self.is_virtual[v] = true;
        self.g.compute_neighborhood_of(v);
        for i in 0..self.g.last_computed_neighborhood().len() {
            on_upward_edge(self.g.neighborhood[i]);
        }
    }
}

/// Eliminate nodes `0..n-1` in order, emitting every fill-in arc `(x, y)`
/// where `y` is a still-active neighbor of `x` at the moment `x` is
/// eliminated (`y`'s id is necessarily `> x` since lower ids are eliminated
/// first). The highest-numbered node is never eliminated (nothing is left
/// to fill in around it). Returns the maximum upward degree seen, i.e. the
/// width of the elimination order (treewidth upper bound is `width`, not
/// `width - 1`, since the supergraph itself is not counted as a clique of
/// size `width + 1` here).
pub fn compute_chordal_supergraph(tail: &[NodeId], head: &[NodeId], n: usize, mut on_new_arc: impl FnMut(NodeId, NodeId)) -> usize {
    let mut g = NodeContractionGraph::new(tail, head, n);
    let mut max_upward_degree = 0;
    for x in 0..n.saturating_sub(1) {
        let mut upward_degree = 0;
        g.forall_neighbors_then_contract_node(x, |y| {
            on_new_arc(x as NodeId, y as NodeId);
            upward_degree += 1;
        });
        max_upward_degree = max_upward_degree.max(upward_degree);
    }
    max_upward_degree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn symmetric(pairs: &[(u32, u32)]) -> (Vec<u32>, Vec<u32>) {
        let mut tail = Vec::new();
        let mut head = Vec::new();
        for &(a, b) in pairs {
            tail.push(a);
            head.push(b);
            tail.push(b);
            head.push(a);
        }
        (tail, head)
    }

    #[test]
    fn path_order_has_no_fill_in() {
        // 0-1-2-3 eliminated in id order: each elimination only ever has one
        // still-active neighbor, so no fill-in edges are introduced.
        let (tail, head) = symmetric(&[(0, 1), (1, 2), (2, 3)]);
        let g = Graph::new(tail, head, None, None).make_simple().unwrap();
        let mut fill = Vec::new();
        let width = compute_chordal_supergraph(g.tail(), g.head(), g.num_nodes(), |x, y| fill.push((x, y)));
        assert_eq!(width, 1);
        assert_eq!(fill, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn star_center_eliminated_last_has_no_fill_in() {
        // center is node 3, leaves 0,1,2: eliminating leaves first never
        // creates fill edges among them since they share only the center.
        let (tail, head) = symmetric(&[(0, 3), (1, 3), (2, 3)]);
        let g = Graph::new(tail, head, None, None).make_simple().unwrap();
        let mut fill = Vec::new();
        let width = compute_chordal_supergraph(g.tail(), g.head(), g.num_nodes(), |x, y| fill.push((x, y)));
        assert_eq!(width, 1);
        assert_eq!(fill.len(), 3);
    }

    #[test]
    fn eliminating_a_4_cycle_diagonal_first_fills_in_the_other_diagonal() {
        // cycle 0-1-2-3-0; eliminating node 0 first connects its two
        // surviving neighbors 1 and 3, which were not adjacent before.
        let (tail, head) = symmetric(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let g = Graph::new(tail, head, None, None).make_simple().unwrap();
        let mut fill = Vec::new();
        compute_chordal_supergraph(g.tail(), g.head(), g.num_nodes(), |x, y| fill.push((x, y)));
        assert!(fill.contains(&(0, 1)));
        assert!(fill.contains(&(0, 3)));
        // 1 and 3 are now joined through the fill-in clique around node 0
        assert!(fill.contains(&(1, 3)) || fill.contains(&(3, 1)));
    }
}

//! Node-capacitated expansion: split each node into `v_in`/`v_out` joined by
//! a capacity-1 internal arc, so FlowCutter's edge-cut core can be reused
//! unchanged to produce *vertex* separators. `v_in = 2v`,
//! `v_out = 2v+1`; every original arc `(u, v)` becomes `(u_out, v_in)` with
//! capacity [`crate::graph::INFINITY`].

use crate::graph::{EdgeId, Graph, NodeId, Weight, INFINITY};

pub fn node_in(v: NodeId) -> NodeId {
    2 * v
}
pub fn node_out(v: NodeId) -> NodeId {
    2 * v + 1
}
pub fn original_of(x: NodeId) -> NodeId {
    x / 2
}
pub fn is_in_node(x: NodeId) -> bool {
    x % 2 == 0
}

/// A node-capacitated expansion of some original graph. Capacity is carried
/// in the expanded graph's `arc_weight` field so it doubles as the
/// `capacity` argument [`crate::flow_cutter::Cutter::new`] expects.
pub struct ExpandedGraph {
    pub graph: Graph,
    pub original_node_count: usize,
}

impl ExpandedGraph {
    pub fn build(original: &Graph) -> ExpandedGraph {
        let n = original.num_nodes();
        let m = original.num_arcs();
        let mut tail = Vec::with_capacity(2 * n + m);
        let mut head = Vec::with_capacity(2 * n + m);
        let mut capacity = Vec::with_capacity(2 * n + m);

        for v in 0..n as NodeId {
            tail.push(node_in(v));
            head.push(node_out(v));
            capacity.push(1);
            tail.push(node_out(v));
            head.push(node_in(v));
            capacity.push(1);
        }
        for a in 0..m {
            tail.push(node_out(original.tail()[a]));
            head.push(node_in(original.head()[a]));
            capacity.push(INFINITY);
        }

        let graph = Graph::new(tail, head, None, Some(capacity));
        debug_assert!(graph.is_symmetric());
        ExpandedGraph { graph, original_node_count: n }
    }

    /// Original source/target node lists map to their `_out`/`_in` halves
    /// respectively, so flow must cross every split node fully before
    /// reaching the other terminal.
    pub fn expand_terminals(sources: &[NodeId], targets: &[NodeId]) -> (Vec<NodeId>, Vec<NodeId>) {
        (sources.iter().map(|&s| node_out(s)).collect(), targets.iter().map(|&t| node_in(t)).collect())
    }

    /// Original nodes whose internal arc lies on `cut` — the vertex
    /// separator. A cut's arc list only
    /// ever contains finite-capacity arcs (by construction every internal
    /// arc has capacity 1 and every original arc has capacity `INFINITY`),
    /// so every entry here already is an internal arc.
    pub fn separator_of_cut(&self, cut_arcs: &[EdgeId]) -> Vec<NodeId> {
        let mut sep: Vec<NodeId> = cut_arcs.iter().map(|&a| original_of(self.graph.tail()[a as usize])).collect();
        sep.sort_unstable();
        sep.dedup();
        sep
    }

    /// Original nodes on the smaller side: those whose `v_out` is
    /// source-reachable and whose internal arc is not itself cut.
    pub fn smaller_side_original_nodes(&self, smaller_side: &[NodeId], separator: &[NodeId]) -> Vec<NodeId> {
        let in_smaller: Vec<bool> = {
            let mut mask = vec![false; self.graph.num_nodes()];
            for &x in smaller_side {
                mask[x as usize] = true;
            }
            mask
        };
        let in_separator: Vec<bool> = {
            let mut mask = vec![false; self.original_node_count];
            for &v in separator {
                mask[v as usize] = true;
            }
            mask
        };
        (0..self.original_node_count as NodeId)
            .filter(|&v| !in_separator[v as usize] && in_smaller[node_out(v) as usize])
            .collect()
    }
}

//! Cheap order-determining rules applied before nested dissection ever runs
//! a cutter, ported from `cch_order`'s trivial-graph check,
//! preorder/component split, degree-2 chain elimination, biconnected
//! decomposition, and simplicial elimination.
//!
//! Every rule operates on a [`Piece`]: a relabeled subgraph plus the map
//! back to whatever ids the caller cares about (`input_node_id`), mirroring
//! the `(tail, head, input_node_id)` triple threaded through the original's
//! template chain.

pub mod biconnected;
pub mod degree2;
pub mod simplicial;
pub mod trivial;

use crate::graph::components::compute_connected_components;
use crate::graph::{Graph, NodeId, Weight};

/// A subgraph view: local node ids `[0, node_count())`, each mapped back to
/// a caller-meaningful id via `input_node_id`.
#[derive(Debug, Clone)]
pub struct Piece {
    pub tail: Vec<NodeId>,
    pub head: Vec<NodeId>,
    pub arc_weight: Vec<Weight>,
    pub input_node_id: Vec<NodeId>,
}

impl Piece {
    pub fn whole(graph: &Graph) -> Piece {
        Piece {
            tail: graph.tail().to_vec(),
            head: graph.head().to_vec(),
            arc_weight: graph.arc_weight().to_vec(),
            input_node_id: (0..graph.num_nodes() as NodeId).collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.input_node_id.len()
    }

    pub fn arc_count(&self) -> usize {
        self.tail.len()
    }

    pub fn to_graph(&self) -> Graph {
        Graph::new(self.tail.clone(), self.head.clone(), None, Some(self.arc_weight.clone()))
    }
}

/// Split `piece` into connected components, recursively order each one
/// (after checking triviality) via `order_component`, and concatenate:
/// components for which `place_at_end` holds go after everything else.
/// Ports `cch_order`'s
/// `reorder_nodes_in_preorder_and_compute_unconnected_graph_order_if_component_is_non_trivial`,
/// using direct component grouping instead of the original's preorder +
/// contiguous-array-range trick (simpler in a language without that array
/// convention, see DESIGN.md).
pub fn split_by_component_and_order(piece: &Piece, order_component: &dyn Fn(&Piece) -> Vec<NodeId>, place_at_end: &dyn Fn(NodeId) -> bool) -> Vec<NodeId> {
    let n = piece.node_count();
    if n == 0 {
        return Vec::new();
    }
    let graph = piece.to_graph();
    let comp = compute_connected_components(&graph);
    let num_components = comp.iter().copied().max().map_or(0, |m| m + 1);

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); num_components];
    for (local, &c) in comp.iter().enumerate() {
        members[c].push(local);
    }

    let mut front = Vec::new();
    let mut back = Vec::new();
    for group in &members {
        if group.is_empty() {
            continue;
        }
        let mut local_of = vec![0usize; n];
        for (new_local, &old_local) in group.iter().enumerate() {
            local_of[old_local] = new_local;
        }
        let in_group = {
            let mut mask = vec![false; n];
            for &l in group {
                mask[l] = true;
            }
            mask
        };

        let mut sub_tail = Vec::new();
        let mut sub_head = Vec::new();
        let mut sub_weight = Vec::new();
        for i in 0..piece.arc_count() {
            let (t, h) = (piece.tail[i] as usize, piece.head[i] as usize);
            if in_group[t] && in_group[h] {
                sub_tail.push(local_of[t] as NodeId);
                sub_head.push(local_of[h] as NodeId);
                sub_weight.push(piece.arc_weight[i]);
            }
        }
        let sub_input_node_id: Vec<NodeId> = group.iter().map(|&l| piece.input_node_id[l]).collect();
        let sub_piece = Piece {
            tail: sub_tail,
            head: sub_head,
            arc_weight: sub_weight,
            input_node_id: sub_input_node_id,
        };

        let ordered = trivial::order_if_trivial(&sub_piece).unwrap_or_else(|| order_component(&sub_piece));

        if place_at_end(piece.input_node_id[group[0]]) {
            back.extend(ordered);
        } else {
            front.extend(ordered);
        }
    }

    front.extend(back);
    front
}

/// The sub-[`Piece`] induced by `members` (local node ids into `piece`),
/// relabeled to a dense `[0, members.len())` domain.
pub fn induced_subpiece(piece: &Piece, members: &[usize]) -> Piece {
    let n = piece.node_count();
    let mut local_of = vec![0usize; n];
    for (new_local, &old) in members.iter().enumerate() {
        local_of[old] = new_local;
    }
    let in_members = {
        let mut mask = vec![false; n];
        for &m in members {
            mask[m] = true;
        }
        mask
    };
    let mut tail = Vec::new();
    let mut head = Vec::new();
    let mut weight = Vec::new();
    for i in 0..piece.arc_count() {
        let (t, h) = (piece.tail[i] as usize, piece.head[i] as usize);
        if in_members[t] && in_members[h] {
            tail.push(local_of[t] as NodeId);
            head.push(local_of[h] as NodeId);
            weight.push(piece.arc_weight[i]);
        }
    }
    Piece {
        tail,
        head,
        arc_weight: weight,
        input_node_id: members.iter().map(|&l| piece.input_node_id[l]).collect(),
    }
}

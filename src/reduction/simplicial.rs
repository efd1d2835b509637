//! Simplicial-node elimination, ported from
//! `small_tree_width_order::eliminate_simplicial_nodes`: a node whose live
//! neighbors already form a clique (degree <= 1 trivially qualifies) can be
//! eliminated without ever creating fill-in, so it is peeled off and placed
//! at the front of the order. Eliminating it may turn one of its neighbors
//! simplicial in turn, so the check restarts from every affected neighbor
//! until nothing more can be removed; whatever core remains falls back to
//! `order_component`.

use crate::graph::NodeId;
use crate::reduction::{induced_subpiece, Piece};
use std::collections::HashSet;

pub fn order_with_simplicial_nodes_first(piece: &Piece, order_component: &dyn Fn(&Piece) -> Vec<NodeId>) -> Vec<NodeId> {
    let n = piece.node_count();
    let mut adjacency: Vec<HashSet<usize>> = vec![HashSet::new(); n];
    for i in 0..piece.arc_count() {
        adjacency[piece.tail[i] as usize].insert(piece.head[i] as usize);
    }

    let mut eliminated = vec![false; n];
    let mut order = Vec::new();
    let mut stack: Vec<usize> = (0..n).collect();

    while let Some(v) = stack.pop() {
        if eliminated[v] {
            continue;
        }
        let live: Vec<usize> = adjacency[v].iter().copied().filter(|&u| !eliminated[u]).collect();
        if !is_simplicial(&live, &adjacency) {
            continue;
        }

        eliminated[v] = true;
        order.push(piece.input_node_id[v]);
        for &u in &live {
            adjacency[u].remove(&v);
            stack.push(u);
        }
    }

    let core_nodes: Vec<usize> = (0..n).filter(|&x| !eliminated[x]).collect();
    if core_nodes.is_empty() {
        return order;
    }
    if core_nodes.len() == n {
        // nothing was simplicial at all; recursing here would just call
        // straight back into us, so hand off to the fallback directly.
        return order_component(piece);
    }

    let core_piece = induced_subpiece(piece, &core_nodes);
    let core_order = crate::reduction::trivial::order_if_trivial(&core_piece).unwrap_or_else(|| order_component(&core_piece));
    order.extend(core_order);
    order
}

fn is_simplicial(live_neighbors: &[usize], adjacency: &[HashSet<usize>]) -> bool {
    if live_neighbors.len() <= 1 {
        return true;
    }
    for i in 0..live_neighbors.len() {
        for j in i + 1..live_neighbors.len() {
            let (a, b) = (live_neighbors[i], live_neighbors[j]);
            if !adjacency[a].contains(&b) {
                return false;
            }
        }
    }
    true
}

//! Degree-2 chain elimination, ported from
//! `cch_order::compute_graph_order_with_degree_two_chain_at_the_begin`:
//! every maximal chain of degree-<=2 nodes between two "core" (degree > 2)
//! nodes is replaced by one direct shortcut arc; a chain ending in a
//! degree-1 dead end is dropped entirely, since it can never separate two
//! core nodes from each other.

use crate::graph::{NodeId, Weight};
use crate::reduction::Piece;

/// The core subgraph (degree > 2 nodes plus shortcut arcs) and a mask,
/// indexed by `piece`'s local node ids, marking which nodes survived into
/// the core (the rest are chain nodes, to be placed before the core in the
/// final order).
pub struct Reduced {
    pub core: Piece,
    pub is_core: Vec<bool>,
}

pub fn reduce(piece: &Piece) -> Reduced {
    let n = piece.node_count();
    let mut degree = vec![0usize; n];
    for &t in &piece.tail {
        degree[t as usize] += 1;
    }
    let is_core: Vec<bool> = (0..n).map(|x| degree[x] > 2).collect();

    let mut adj: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n]; // (neighbor, arc_index)
    for (i, (&t, &h)) in piece.tail.iter().zip(piece.head.iter()).enumerate() {
        adj[t as usize].push((h as usize, i));
    }

    let mut keep = vec![true; piece.arc_count()];
    let mut shortcut_head: Vec<Option<(usize, Weight)>> = vec![None; piece.arc_count()];

    for first_arc in 0..piece.arc_count() {
        let chain_begin = piece.tail[first_arc] as usize;
        let mut chain_prev = chain_begin;
        let mut chain_now = piece.head[first_arc] as usize;
        if !(is_core[chain_begin] && !is_core[chain_now]) {
            continue;
        }

        let mut chain_weight = piece.arc_weight[first_arc];
        let mut last_arc = first_arc;
        while !is_core[chain_now] {
            let mut advanced = false;
            for &(next, arc_idx) in &adj[chain_now] {
                if next != chain_prev {
                    chain_weight += piece.arc_weight[arc_idx];
                    chain_prev = chain_now;
                    chain_now = next;
                    last_arc = arc_idx;
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                // degree-1 dead end with no way forward: stop here.
                break;
            }
        }

        let chain_end = chain_now;
        if !is_core[chain_end] {
            // dead end: the whole chain is pruned from the core graph.
            keep[first_arc] = false;
            if let Some(&(_, back)) = adj[piece.head[first_arc] as usize].iter().find(|&&(y, _)| y == chain_begin) {
                keep[back] = false;
            }
        } else if chain_begin == chain_end {
            keep[first_arc] = false;
            keep[last_arc] = false;
        } else {
            shortcut_head[first_arc] = Some((chain_end, chain_weight));
            keep[last_arc] = false;
        }
    }

    let mut core_tail = Vec::new();
    let mut core_head = Vec::new();
    let mut core_weight = Vec::new();
    for i in 0..piece.arc_count() {
        if !keep[i] {
            continue;
        }
        if !is_core[piece.tail[i] as usize] || !is_core[piece.head[i] as usize] {
            continue;
        }
        let (h, w) = shortcut_head[i].unwrap_or((piece.head[i] as usize, piece.arc_weight[i]));
        core_tail.push(piece.tail[i]);
        core_head.push(h as NodeId);
        core_weight.push(w);
    }

    // drop duplicate (tail, head) pairs left by shortcutting parallel chains
    let mut seen = std::collections::HashSet::new();
    let mut dedup_tail = Vec::new();
    let mut dedup_head = Vec::new();
    let mut dedup_weight = Vec::new();
    for i in 0..core_tail.len() {
        if seen.insert((core_tail[i], core_head[i])) {
            dedup_tail.push(core_tail[i]);
            dedup_head.push(core_head[i]);
            dedup_weight.push(core_weight[i]);
        }
    }

    let core_nodes: Vec<usize> = (0..n).filter(|&x| is_core[x]).collect();
    let mut local_of = vec![0usize; n];
    for (new_local, &old) in core_nodes.iter().enumerate() {
        local_of[old] = new_local;
    }
    let core = Piece {
        tail: dedup_tail.iter().map(|&t| local_of[t as usize] as NodeId).collect(),
        head: dedup_head.iter().map(|&h| local_of[h as usize] as NodeId).collect(),
        arc_weight: dedup_weight,
        input_node_id: core_nodes.iter().map(|&l| piece.input_node_id[l]).collect(),
    };

    Reduced { core, is_core }
}

//! Elimination-tree/tree-width utilities and cut post-processing, layered
//! on top of [`crate::graph::chordal`]'s fill-in computation.

use crate::graph::{EdgeId, Graph, NodeId};

/// Each node's parent in the elimination tree (its smallest higher-numbered
/// neighbor in the chordal supergraph built by eliminating nodes in id
/// order), plus the tree-width estimate (max upward degree seen).
pub struct EliminationTree {
    pub parent: Vec<Option<NodeId>>,
    pub tree_width: usize,
}

/// `tail`/`head` must already be relabeled so that node id order *is* the
/// elimination order (lowest id eliminated first), matching
/// [`crate::graph::chordal::compute_chordal_supergraph`]'s contract.
pub fn build_elimination_tree(tail: &[NodeId], head: &[NodeId], n: usize) -> EliminationTree {
    let mut parent: Vec<Option<NodeId>> = vec![None; n];
    let tree_width = crate::graph::chordal::compute_chordal_supergraph(tail, head, n, |x, y| {
        let x = x as usize;
        parent[x] = Some(match parent[x] {
            Some(p) if p < y => p,
            _ => y,
        });
    });
    EliminationTree { parent, tree_width }
}

/// Try to shrink a cut by flipping one node off each side without changing
/// which side is smaller, ported from `refine_cut.h`'s `cycle_refine_cut`:
/// find a node on each side whose arcs mostly cross the cut (positive
/// "move score"), swap the two, recompute. Requires a simple symmetric
/// graph; `cut` is a set of arc ids, one direction per undirected edge is
/// enough (the back-arc is found and added automatically).
pub fn cycle_refine(graph: &Graph, cut: &[EdgeId]) -> Vec<EdgeId> {
    let n = graph.num_nodes();
    let m = graph.num_arcs();
    if n == 0 {
        return Vec::new();
    }

    let mut adj: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n]; // (neighbor, arc_index)
    for i in 0..m {
        adj[graph.tail()[i] as usize].push((graph.head()[i] as usize, i));
    }

    let mut in_cut = vec![false; m];
    for &a in cut {
        in_cut[a as usize] = true;
        let (x, y) = (graph.tail()[a as usize] as usize, graph.head()[a as usize]);
        if let Some(&(_, back)) = adj[y as usize].iter().find(|&&(z, _)| z == x) {
            in_cut[back] = true;
        }
    }

    // side 0 is whatever's reachable from node 0 without crossing the cut.
    let mut side = vec![0u8; n];
    let mut visited = vec![false; n];
    let mut stack = vec![0usize];
    visited[0] = true;
    while let Some(x) = stack.pop() {
        for &(y, xy) in &adj[x] {
            if !in_cut[xy] && !visited[y] {
                visited[y] = true;
                side[y] = 0;
                stack.push(y);
            }
        }
    }
    for x in 0..n {
        if !visited[x] {
            side[x] = 1;
        }
    }

    let mut move_score = vec![0i64; n];
    for i in 0..m {
        let (x, y) = (graph.tail()[i] as usize, graph.head()[i] as usize);
        if in_cut[i] {
            move_score[x] += 1;
        } else {
            move_score[x] -= 1;
        }
    }

    let mut side0_cand = None;
    let mut side1_cand = None;
    for x in 0..n {
        if move_score[x] > 0 {
            if side[x] == 0 && side0_cand.is_none() {
                side0_cand = Some(x);
            } else if side[x] == 1 && side1_cand.is_none() {
                side1_cand = Some(x);
            }
        }
        if side0_cand.is_some() && side1_cand.is_some() {
            break;
        }
    }

    if let (Some(a), Some(b)) = (side0_cand, side1_cand) {
        side[a] = 1;
        side[b] = 0;
    }

    (0..m).filter(|&i| side[graph.tail()[i] as usize] != side[graph.head()[i] as usize]).map(|i| i as EdgeId).collect()
}

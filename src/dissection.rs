//! The nested-dissection driver: `compute_nested_dissection_order`
//! (cheap reduction rules, then recursive separator splitting) and
//! `compute_cch_graph_order` (the same thing with road-network-specific
//! reductions layered in front, per `cch_order::compute_cch_graph_order`).
//!
//! The separator-splitting recursion is run from an explicit work-stack
//! rather than true call-stack recursion: a path-like graph keeps
//! re-splitting into two barely-smaller halves, which would otherwise chain
//! arbitrarily deep. The cheap reduction rules ([`crate::reduction`]) stay
//! ordinary recursive closures — they either terminate in one step or
//! shrink the instance enough that their own nesting never gets deep.

use crate::error::Result;
use crate::graph::components::is_connected;
use crate::graph::{Graph, NodeId};
use crate::reduction::{biconnected, degree2, induced_subpiece, simplicial, split_by_component_and_order, trivial, Piece};
use crate::separator::choose_separator;
use crate::flow_cutter::Config;

/// `compute_nested_dissection_graph_order`: trivial check,
/// connected-component split, simplicial-node peeling, then separator-based
/// recursion for whatever core remains.
pub fn compute_nested_dissection_order(graph: &Graph, config: &Config) -> Vec<NodeId> {
    order_piece(&Piece::whole(graph), config)
}

/// `compute_cch_graph_order`: layers biconnected decomposition
/// and degree-2 chain elimination in front of nested dissection, matching
/// `cch_order::compute_cch_graph_order`'s extra road-network-shaped
/// reductions.
pub fn compute_cch_order(graph: &Graph, config: &Config) -> Vec<NodeId> {
    cch_order_piece(&Piece::whole(graph), config)
}

fn order_piece(piece: &Piece, config: &Config) -> Vec<NodeId> {
    if let Some(o) = trivial::order_if_trivial(piece) {
        return o;
    }
    let graph = piece.to_graph();
    if !is_connected(&graph) {
        return split_by_component_and_order(piece, &|p| order_piece(p, config), &|_| false);
    }
    simplicial::order_with_simplicial_nodes_first(piece, &|core| separator_dissect(core, config))
}

fn cch_order_piece(piece: &Piece, config: &Config) -> Vec<NodeId> {
    if let Some(o) = trivial::order_if_trivial(piece) {
        return o;
    }
    let graph = piece.to_graph();
    if !is_connected(&graph) {
        return split_by_component_and_order(piece, &|p| cch_order_piece(p, config), &|_| false);
    }
    if let Some(order) = biconnected::order_with_largest_biconnected_component_at_end(piece, &|core| cch_order_piece(core, config)) {
        return order;
    }

    let reduced = degree2::reduce(piece);
    if reduced.core.node_count() == piece.node_count() {
        // degree-2 chain elimination made no progress; fall through to
        // plain nested dissection on this piece to avoid calling ourselves
        // again with an unchanged instance.
        return order_piece(piece, config);
    }
    let chain_nodes: Vec<NodeId> = (0..piece.node_count()).filter(|&x| !reduced.is_core[x]).map(|x| piece.input_node_id[x]).collect();
    let mut order = chain_nodes;
    order.extend(cch_order_piece(&reduced.core, config));
    order
}

/// Separator-based recursion over `piece`'s core (what's left after the
/// cheap reduction rules), run from an explicit stack: `π = concat(smaller,
/// larger, separator)` at every level.
fn separator_dissect(piece: &Piece, config: &Config) -> Vec<NodeId> {
    enum Work {
        Expand { piece: Piece, slot: usize },
        Combine { slot: usize, smaller: usize, larger: usize, separator_order: Vec<NodeId> },
    }

    let mut results: Vec<Option<Vec<NodeId>>> = vec![None];
    let mut stack = vec![Work::Expand { piece: piece.clone(), slot: 0 }];

    while let Some(work) = stack.pop() {
        match work {
            Work::Expand { piece, slot } => {
                if let Some(o) = trivial::order_if_trivial(&piece) {
                    results[slot] = Some(o);
                    continue;
                }
                let sub_graph = piece.to_graph();
                if !is_connected(&sub_graph) {
                    results[slot] = Some(split_by_component_and_order(&piece, &|p| order_piece(p, config), &|_| false));
                    continue;
                }

                // `choose_separator` needs sorted tails (out-arc-range
                // inversion); induced sub-pieces don't keep that invariant
                // automatically, so re-establish it at every recursion level.
                let simple_graph = match sub_graph.make_simple() {
                    Ok(g) => g,
                    Err(_) => {
                        results[slot] = Some(piece.input_node_id.clone());
                        continue;
                    }
                };
                let sep = match choose_separator(&simple_graph, config) {
                    Ok(s) => s,
                    Err(_) => {
                        results[slot] = Some(piece.input_node_id.clone());
                        continue;
                    }
                };
                if sep.smaller_side.is_empty() || sep.larger_side.is_empty() {
                    // no progress possible (e.g. every cutter ran out without
                    // finding a balanced cut); emit the residual as-is.
                    results[slot] = Some(piece.input_node_id.clone());
                    continue;
                }

                let smaller_piece = induced_subpiece(&piece, &sep.smaller_side.iter().map(|&v| v as usize).collect::<Vec<_>>());
                let larger_piece = induced_subpiece(&piece, &sep.larger_side.iter().map(|&v| v as usize).collect::<Vec<_>>());
                let separator_order: Vec<NodeId> = sep.separator.iter().map(|&v| piece.input_node_id[v as usize]).collect();

                let smaller_slot = results.len();
                results.push(None);
                let larger_slot = results.len();
                results.push(None);

                stack.push(Work::Combine {
                    slot,
                    smaller: smaller_slot,
                    larger: larger_slot,
                    separator_order,
                });
                stack.push(Work::Expand { piece: larger_piece, slot: larger_slot });
                stack.push(Work::Expand { piece: smaller_piece, slot: smaller_slot });
            }
            Work::Combine { slot, smaller, larger, separator_order } => {
                let mut out = results[smaller].take().expect("smaller side ordered before combine");
                out.extend(results[larger].take().expect("larger side ordered before combine"));
                out.extend(separator_order);
                results[slot] = Some(out);
            }
        }
    }

    results[0].take().expect("root slot always filled")
}

/// `fix_order_and_build`'s result: the elimination order plus its inverse
/// (rank) and the chordal-supergraph tree-width it realizes.
pub struct CCH {
    pub order: Vec<NodeId>,
    pub rank: Vec<usize>,
    pub tree_width: usize,
}

impl CCH {
    /// Build a [`CCH`] from an unordered `graph` and a precomputed
    /// elimination `order` (e.g. from [`compute_cch_order`]): computes the
    /// rank permutation, relabels arcs into rank space, and runs the
    /// chordal-supergraph elimination game to report the realized
    /// tree-width. Named after the upstream driver step that takes a raw
    /// separator-derived order and turns it into a ready-to-customize CCH.
    pub fn fix_order_and_build(graph: &Graph, order: Vec<NodeId>) -> Result<CCH> {
        let n = graph.num_nodes();
        debug_assert_eq!(order.len(), n);
        let mut rank = vec![0usize; n];
        for (pos, &v) in order.iter().enumerate() {
            rank[v as usize] = pos;
        }

        let ranked_tail: Vec<NodeId> = graph.tail().iter().map(|&t| rank[t as usize] as NodeId).collect();
        let ranked_head: Vec<NodeId> = graph.head().iter().map(|&h| rank[h as usize] as NodeId).collect();
        let tree = crate::elimination::build_elimination_tree(&ranked_tail, &ranked_head, n);

        Ok(CCH {
            order,
            rank,
            tree_width: tree.tree_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn push_sym(tail: &mut Vec<u32>, head: &mut Vec<u32>, a: u32, b: u32) {
        tail.push(a);
        head.push(b);
        tail.push(b);
        head.push(a);
    }

    fn path_graph(n: u32) -> Graph {
        let mut tail = Vec::new();
        let mut head = Vec::new();
        for i in 0..n - 1 {
            push_sym(&mut tail, &mut head, i, i + 1);
        }
        Graph::new(tail, head, None, None).make_simple().unwrap()
    }

    fn grid4x4() -> Graph {
        let idx = |r: u32, c: u32| r * 4 + c;
        let mut tail = Vec::new();
        let mut head = Vec::new();
        for r in 0..4u32 {
            for c in 0..4u32 {
                if c + 1 < 4 {
                    push_sym(&mut tail, &mut head, idx(r, c), idx(r, c + 1));
                }
                if r + 1 < 4 {
                    push_sym(&mut tail, &mut head, idx(r, c), idx(r + 1, c));
                }
            }
        }
        Graph::new(tail, head, None, None).make_simple().unwrap()
    }

    fn is_permutation_of_0_n(order: &[NodeId], n: usize) -> bool {
        let mut seen = vec![false; n];
        for &v in order {
            if v as usize >= n || seen[v as usize] {
                return false;
            }
            seen[v as usize] = true;
        }
        seen.into_iter().all(|b| b)
    }

    #[test]
    fn seven_node_path_matches_the_literal_tree_order() {
        let g = path_graph(7);
        let config = Config::default();
        let order = compute_nested_dissection_order(&g, &config);
        assert_eq!(order, vec![3, 1, 5, 0, 2, 4, 6]);
    }

    #[test]
    fn grid_order_is_a_permutation_with_small_tree_width() {
        let g = grid4x4();
        let mut config = Config::default();
        config.max_imbalance = 0.2;
        config.random_seed = 5489;
        let order = compute_cch_order(&g, &config);
        assert!(is_permutation_of_0_n(&order, 16));
        let cch = CCH::fix_order_and_build(&g, order).unwrap();
        assert!(cch.tree_width <= 10);
    }

    #[test]
    fn k5_has_no_separator_and_keeps_its_tree_width_at_n_minus_one() {
        let mut tail = Vec::new();
        let mut head = Vec::new();
        for i in 0..5u32 {
            for j in i + 1..5u32 {
                push_sym(&mut tail, &mut head, i, j);
            }
        }
        let g = Graph::new(tail, head, None, None).make_simple().unwrap();
        let config = Config::default();
        let order = compute_nested_dissection_order(&g, &config);
        assert!(is_permutation_of_0_n(&order, 5));
        let cch = CCH::fix_order_and_build(&g, order).unwrap();
        assert_eq!(cch.tree_width, 4);
    }

    #[test]
    fn two_disjoint_triangles_are_grouped_contiguously() {
        let mut tail = Vec::new();
        let mut head = Vec::new();
        for &(a, b) in &[(0u32, 1u32), (1, 2), (2, 0)] {
            push_sym(&mut tail, &mut head, a, b);
        }
        for &(a, b) in &[(3u32, 4u32), (4, 5), (5, 3)] {
            push_sym(&mut tail, &mut head, a, b);
        }
        let g = Graph::new(tail, head, None, None).make_simple().unwrap();
        let config = Config::default();
        let order = compute_nested_dissection_order(&g, &config);
        assert!(is_permutation_of_0_n(&order, 6));
        let first_group: std::collections::HashSet<_> = order[..3].iter().copied().collect();
        assert!(first_group == [0, 1, 2].into_iter().collect() || first_group == [3, 4, 5].into_iter().collect());
        let cch = CCH::fix_order_and_build(&g, order).unwrap();
        assert_eq!(cch.tree_width, 2);
    }
}

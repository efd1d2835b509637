//! Largest-biconnected-component-last decomposition, ported from
//! `cch_order::compute_graph_order_with_largest_biconnected_component_at_the_end`:
//! the private (non-articulation) nodes of the largest biconnected component
//! are peeled off and ordered last, while the rest of the graph — including
//! the articulation points that connect it to that component — is ordered
//! first by whatever strategy the caller supplies.

use crate::graph::components::largest_biconnected_component_mask;
use crate::graph::NodeId;
use crate::reduction::{induced_subpiece, Piece};

/// `None` if the decomposition makes no progress (the graph has no arcs, or
/// is itself one biconnected component with no articulation points to peel
/// around) — the caller should fall back to another strategy.
pub fn order_with_largest_biconnected_component_at_end(piece: &Piece, order_component: &dyn Fn(&Piece) -> Vec<NodeId>) -> Option<Vec<NodeId>> {
    let n = piece.node_count();
    if n == 0 || piece.arc_count() == 0 {
        return None;
    }
    let graph = piece.to_graph();
    let mask = largest_biconnected_component_mask(&graph);

    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..piece.arc_count() {
        adj[piece.tail[i] as usize].push(piece.head[i] as usize);
    }

    let articulation: Vec<bool> = (0..n).map(|x| mask[x] && adj[x].iter().any(|&y| !mask[y])).collect();
    let private: Vec<bool> = (0..n).map(|x| mask[x] && !articulation[x]).collect();

    if !private.iter().any(|&p| p) {
        // the whole graph is one biconnected block with no exclusive part
        // to peel off (no articulation points at all).
        return None;
    }

    let rest_nodes: Vec<usize> = (0..n).filter(|&x| !private[x]).collect();
    let private_nodes: Vec<usize> = (0..n).filter(|&x| private[x]).collect();
    if rest_nodes.is_empty() {
        return None;
    }

    let rest_piece = induced_subpiece(piece, &rest_nodes);
    let bcc_piece = induced_subpiece(piece, &private_nodes);

    let mut order = order_sub_piece(&rest_piece, order_component);
    order.extend(order_sub_piece(&bcc_piece, order_component));
    Some(order)
}

fn order_sub_piece(sub: &Piece, order_component: &dyn Fn(&Piece) -> Vec<NodeId>) -> Vec<NodeId> {
    crate::reduction::trivial::order_if_trivial(sub).unwrap_or_else(|| order_component(sub))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two triangles {0,1,2} and {2,3,4} sharing the articulation point 2.
    fn bowtie() -> Piece {
        let pairs = [(0u32, 1u32), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)];
        let mut tail = Vec::new();
        let mut head = Vec::new();
        for &(a, b) in &pairs {
            tail.push(a);
            head.push(b);
            tail.push(b);
            head.push(a);
        }
        Piece {
            arc_weight: vec![1; tail.len()],
            tail,
            head,
            input_node_id: (0..5).collect(),
        }
    }

    #[test]
    fn bowtie_peels_one_triangle_off_leaving_the_articulation_point_in_the_rest() {
        let piece = bowtie();
        let order = order_with_largest_biconnected_component_at_end(&piece, &|p| p.input_node_id.clone()).unwrap();
        assert_eq!(order.len(), 5);
        let last_two: std::collections::HashSet<_> = order[3..].iter().copied().collect();
        assert!(last_two == [0, 1].into_iter().collect() || last_two == [3, 4].into_iter().collect());
    }

    #[test]
    fn single_triangle_has_no_articulation_points_and_returns_none() {
        let pairs = [(0u32, 1u32), (1, 2), (2, 0)];
        let mut tail = Vec::new();
        let mut head = Vec::new();
        for &(a, b) in &pairs {
            tail.push(a);
            head.push(b);
            tail.push(b);
            head.push(a);
        }
        let piece = Piece {
            arc_weight: vec![1; tail.len()],
            tail,
            head,
            input_node_id: (0..3).collect(),
        };
        assert!(order_with_largest_biconnected_component_at_end(&piece, &|p| p.input_node_id.clone()).is_none());
    }
}

//! Short-circuits for cliques, edgeless graphs, and trees, ported from `cch_order::compute_trivial_graph_order_if_graph_is_trivial`
//! and `compute_tree_graph_order`.

use crate::graph::NodeId;
use crate::reduction::Piece;

/// `Some(order)` if `piece` is a clique, has no arcs, or is a tree;
/// `None` otherwise (caller falls through to a non-trivial strategy).
pub fn order_if_trivial(piece: &Piece) -> Option<Vec<NodeId>> {
    let n = piece.node_count();
    let m = piece.arc_count();
    if n == 0 {
        return Some(Vec::new());
    }
    let is_clique = (n as u64) * (n as u64 - 1) == m as u64;
    let has_no_arcs = m == 0;
    let is_tree = n >= 1 && m == 2 * (n - 1);

    if is_clique || has_no_arcs {
        Some(piece.input_node_id.clone())
    } else if is_tree {
        Some(tree_order(piece))
    } else {
        None
    }
}

/// Order a tree by recursive centroid decomposition, read level by level
/// (the centroid first, then the centroids of each remaining branch, then
/// their children, ...). For the 7-node path `0-1-2-3-4-5-6` this produces
/// `[3, 1, 5, 0, 2, 4, 6]`: the midpoint first, then each half's midpoint,
/// then the leaves.
fn tree_order(piece: &Piece) -> Vec<NodeId> {
    let levels = centroid_levels(piece);
    levels.into_iter().flatten().collect()
}

fn centroid_levels(piece: &Piece) -> Vec<Vec<NodeId>> {
    let n = piece.node_count();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![vec![piece.input_node_id[0]]];
    }

    let mut adj = vec![Vec::new(); n];
    for i in 0..piece.arc_count() {
        adj[piece.tail[i] as usize].push(piece.head[i] as usize);
    }
    let centroid = find_tree_centroid(&adj, n);

    let mut component_of = vec![usize::MAX; n];
    let mut num_components = 0;
    for &nb in &adj[centroid] {
        if component_of[nb] == usize::MAX {
            flood_fill_excluding(&adj, nb, centroid, num_components, &mut component_of);
            num_components += 1;
        }
    }

    let mut sub_levels: Vec<Vec<Vec<NodeId>>> = Vec::with_capacity(num_components);
    for c in 0..num_components {
        let members: Vec<usize> = (0..n).filter(|&v| component_of[v] == c).collect();
        let mut local_of = vec![0usize; n];
        for (new_local, &old) in members.iter().enumerate() {
            local_of[old] = new_local;
        }
        let in_component = {
            let mut mask = vec![false; n];
            for &v in &members {
                mask[v] = true;
            }
            mask
        };
        let mut sub_tail = Vec::new();
        let mut sub_head = Vec::new();
        for i in 0..piece.arc_count() {
            let (t, h) = (piece.tail[i] as usize, piece.head[i] as usize);
            if in_component[t] && in_component[h] {
                sub_tail.push(local_of[t] as NodeId);
                sub_head.push(local_of[h] as NodeId);
            }
        }
        let sub_piece = Piece {
            arc_weight: vec![1; sub_tail.len()],
            tail: sub_tail,
            head: sub_head,
            input_node_id: members.iter().map(|&l| piece.input_node_id[l]).collect(),
        };
        sub_levels.push(centroid_levels(&sub_piece));
    }

    let max_depth = sub_levels.iter().map(|l| l.len()).max().unwrap_or(0);
    let mut result = vec![vec![piece.input_node_id[centroid]]];
    for depth in 0..max_depth {
        let mut level = Vec::new();
        for sl in &sub_levels {
            if depth < sl.len() {
                level.extend(sl[depth].iter().copied());
            }
        }
        result.push(level);
    }
    result
}

fn flood_fill_excluding(adj: &[Vec<usize>], start: usize, excluded: usize, label: usize, component_of: &mut [usize]) {
    let mut stack = vec![start];
    component_of[start] = label;
    while let Some(x) = stack.pop() {
        for &y in &adj[x] {
            if y != excluded && component_of[y] == usize::MAX {
                component_of[y] = label;
                stack.push(y);
            }
        }
    }
}

/// The node whose removal minimizes the largest resulting branch, found via
/// one subtree-size pass from an arbitrary root.
fn find_tree_centroid(adj: &[Vec<usize>], n: usize) -> usize {
    let mut parent = vec![usize::MAX; n];
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut stack = vec![0usize];
    visited[0] = true;
    while let Some(x) = stack.pop() {
        order.push(x);
        for &y in &adj[x] {
            if !visited[y] {
                visited[y] = true;
                parent[y] = x;
                stack.push(y);
            }
        }
    }

    let mut size = vec![1usize; n];
    for &x in order.iter().rev() {
        if parent[x] != usize::MAX {
            size[parent[x]] += size[x];
        }
    }

    let mut best = 0;
    let mut best_val = usize::MAX;
    for x in 0..n {
        let mut max_branch = 0;
        for &y in &adj[x] {
            let branch = if y == parent[x] { n - size[x] } else { size[y] };
            max_branch = max_branch.max(branch);
        }
        if max_branch < best_val {
            best_val = max_branch;
            best = x;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_piece(n: u32) -> Piece {
        let mut tail = Vec::new();
        let mut head = Vec::new();
        for i in 0..n - 1 {
            tail.push(i);
            head.push(i + 1);
            tail.push(i + 1);
            head.push(i);
        }
        Piece {
            arc_weight: vec![1; tail.len()],
            tail,
            head,
            input_node_id: (0..n).collect(),
        }
    }

    #[test]
    fn seven_node_path_matches_the_documented_level_order() {
        let piece = path_piece(7);
        let order = order_if_trivial(&piece).unwrap();
        assert_eq!(order, vec![3, 1, 5, 0, 2, 4, 6]);
    }

    #[test]
    fn clique_order_is_identity() {
        let mut tail = Vec::new();
        let mut head = Vec::new();
        for i in 0..4u32 {
            for j in 0..4u32 {
                if i != j {
                    tail.push(i);
                    head.push(j);
                }
            }
        }
        let piece = Piece {
            arc_weight: vec![1; tail.len()],
            tail,
            head,
            input_node_id: (0..4).collect(),
        };
        assert_eq!(order_if_trivial(&piece).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn non_trivial_graph_returns_none() {
        // a 4-cycle: not a clique, not a tree (m = 8, n = 4, 2*(n-1) = 6)
        let tail = vec![0, 1, 1, 2, 2, 3, 3, 0];
        let head = vec![1, 0, 2, 1, 3, 2, 0, 3];
        let piece = Piece {
            arc_weight: vec![1; tail.len()],
            tail,
            head,
            input_node_id: (0..4).collect(),
        };
        assert!(order_if_trivial(&piece).is_none());
    }
}

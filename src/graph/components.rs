//! Connected, strongly connected, and biconnected components.

use super::{EdgeId, Graph, NodeId};
use crate::union_find::UnionFind;

/// Union-find over arcs; returns a node id -> dense component id map.
pub fn compute_connected_components(graph: &Graph) -> Vec<usize> {
    let n = graph.num_nodes();
    let mut uf = UnionFind::new(n);
    for i in 0..graph.num_arcs() {
        uf.unite(graph.tail()[i] as usize, graph.head()[i] as usize);
    }
    let mut component_of_rep = vec![usize::MAX; n];
    let mut next_id = 0;
    let mut result = vec![0usize; n];
    for x in 0..n {
        let r = uf.find(x);
        if component_of_rep[r] == usize::MAX {
            component_of_rep[r] = next_id;
            next_id += 1;
        }
        result[x] = component_of_rep[r];
    }
    result
}

pub fn is_connected(graph: &Graph) -> bool {
    let n = graph.num_nodes();
    if n == 0 {
        return true;
    }
    let mut uf = UnionFind::new(n);
    for i in 0..graph.num_arcs() {
        uf.unite(graph.tail()[i] as usize, graph.head()[i] as usize);
    }
    uf.component_size(0) == n
}

/// Iterative Tarjan SCC over a directed successor list (`out_arc` ranges +
/// `head`), with an explicit stack to avoid recursion depth issues on
/// adversarial inputs.
pub fn compute_strongly_connected_components(graph: &Graph) -> Vec<usize> {
    let n = graph.num_nodes();
    let out_arc = graph.out_arc_ranges();

    let mut dfs_stack: Vec<usize> = Vec::with_capacity(n);
    let mut scc_stack: Vec<usize> = Vec::with_capacity(n);
    let mut in_scc_stack = vec![false; n];
    let mut next_out: Vec<usize> = (0..n).map(|x| out_arc.range(x).start).collect();
    let mut dfs_pos = vec![-1i64; n];
    let mut low_link = vec![0i64; n];
    let mut component_of = vec![usize::MAX; n];
    let mut next_preorder_id = 0i64;
    let mut next_component_id = 0usize;

    for r in 0..n {
        if component_of[r] != usize::MAX {
            continue;
        }
        dfs_stack.push(r);
        while let Some(&x) = dfs_stack.last() {
            if dfs_pos[x] == -1 {
                dfs_pos[x] = next_preorder_id;
                low_link[x] = next_preorder_id;
                next_preorder_id += 1;
                in_scc_stack[x] = true;
                scc_stack.push(x);
            }

            let end = out_arc.range(x).end;
            let mut advanced = false;
            while next_out[x] < end {
                let y = graph.head()[next_out[x]] as usize;
                if dfs_pos[y] == -1 {
                    next_out[x] += 1;
                    dfs_stack.push(y);
                    advanced = true;
                    break;
                }
                if in_scc_stack[y] {
                    low_link[x] = low_link[x].min(low_link[y]);
                }
                next_out[x] += 1;
            }
            if advanced {
                continue;
            }

            dfs_stack.pop();
            if let Some(&parent) = dfs_stack.last() {
                low_link[parent] = low_link[parent].min(low_link[x]);
            }
            if dfs_pos[x] == low_link[x] {
                loop {
                    let z = scc_stack.pop().unwrap();
                    in_scc_stack[z] = false;
                    component_of[z] = next_component_id;
                    if z == x {
                        break;
                    }
                }
                next_component_id += 1;
            }
        }
    }
    component_of
}

/// One event stream from a symmetric (undirected) iterative DFS, as used by
/// [`compute_biconnected_components`].
trait BiconnectedVisitor {
    fn on_root_first_visit(&mut self, x: usize);
    fn on_tree_down_arc(&mut self, x: usize, xy: usize, y: usize);
    fn on_tree_up_arc(&mut self, x: usize, xy: usize, y: usize);
    fn on_non_tree_arc(&mut self, x: usize, xy: usize, y: usize);
}

fn symmetric_depth_first_search<V: BiconnectedVisitor>(graph: &Graph, visitor: &mut V) {
    let n = graph.num_nodes();
    let out_arc = graph.out_arc_ranges();

    let mut dfs_stack: Vec<usize> = Vec::with_capacity(n);
    // `return_arc[x]`: the arc from x back to its parent, discovered while
    // scanning x's own adjacency list (not the descending arc into x, which
    // is a different directed arc of the same undirected edge). -2 marks
    // the root (no parent), -1 means "not yet discovered".
    let mut return_arc = vec![-1i64; n];
    let mut parent_node = vec![-1i64; n];
    let mut next_out: Vec<usize> = (0..n).map(|x| out_arc.range(x).start).collect();

    for r in 0..n {
        if parent_node[r] != -1 {
            continue;
        }
        return_arc[r] = -2;
        parent_node[r] = -2;
        visitor.on_root_first_visit(r);

        let mut x = r;
        loop {
            let end = out_arc.range(x).end;
            if next_out[x] == end {
                if return_arc[x] == -2 {
                    break;
                }
                let px = dfs_stack.pop().unwrap();
                visitor.on_tree_up_arc(x, return_arc[x] as usize, parent_node[x] as usize);
                x = px;
            } else {
                let xy = next_out[x];
                next_out[x] += 1;
                let y = graph.head()[xy] as usize;
                if y as i64 == parent_node[x] && return_arc[x] == -1 {
                    // first time x's adjacency list exposes the arc back to
                    // its own parent; record it for the eventual up-visit.
                    return_arc[x] = xy as i64;
                } else if parent_node[y] == -1 {
                    dfs_stack.push(x);
                    parent_node[y] = x as i64;
                    visitor.on_tree_down_arc(x, xy, y);
                    x = y;
                } else {
                    visitor.on_non_tree_arc(x, xy, y);
                }
            }
        }
    }
}

/// Symmetric iterative DFS with events {first-visit-root, tree-down,
/// tree-up, non-tree}; maintains an arc stack and low-reach depths, and
/// pops a new bicomponent on tree-up whenever `min_reach(x) >= depth(y)`.
/// Returns an arc id -> dense bicomponent id map.
pub fn compute_biconnected_components(graph: &Graph) -> Vec<usize> {
    struct Visitor<'g> {
        graph: &'g Graph,
        back_arc: Vec<EdgeId>,
        arc_stack: Vec<usize>,
        arc_component: Vec<i64>,
        depth: Vec<i64>,
        min_succ_depth: Vec<i64>,
        next_component_id: usize,
    }

    impl<'g> BiconnectedVisitor for Visitor<'g> {
        fn on_root_first_visit(&mut self, x: usize) {
            self.depth[x] = 0;
        }

        fn on_tree_down_arc(&mut self, _x: usize, xy: usize, y: usize) {
            self.arc_stack.push(xy);
            self.min_succ_depth[y] = i64::MAX;
            self.depth[y] = self.depth[self.graph.tail()[xy] as usize] + 1;
        }

        fn on_tree_up_arc(&mut self, x: usize, xy: usize, y: usize) {
            self.arc_stack.push(xy);
            self.min_succ_depth[y] = self.min_succ_depth[y].min(self.min_succ_depth[x]).min(self.depth[x]);

            if self.min_succ_depth[x] >= self.depth[y] {
                let new_component_id = self.next_component_id;
                self.next_component_id += 1;
                while let Some(ab) = self.arc_stack.pop() {
                    let ba = self.back_arc[ab] as usize;
                    if self.arc_component[ba] == -1 {
                        self.arc_component[ab] = new_component_id as i64;
                        self.arc_component[ba] = new_component_id as i64;
                    }
                    if ba == xy {
                        break;
                    }
                }
            }
        }

        fn on_non_tree_arc(&mut self, x: usize, xy: usize, y: usize) {
            self.arc_stack.push(xy);
            self.min_succ_depth[x] = self.min_succ_depth[x].min(self.depth[y]);
        }
    }

    let n = graph.num_nodes();
    let m = graph.num_arcs();
    let back_arc = graph.compute_back_arc_permutation().expect("biconnected components require a symmetric graph");
    let mut visitor = Visitor {
        graph,
        back_arc,
        arc_stack: Vec::with_capacity(m),
        arc_component: vec![-1; m],
        depth: vec![0; n],
        min_succ_depth: vec![0; n],
        next_component_id: 0,
    };
    symmetric_depth_first_search(graph, &mut visitor);
    debug_assert!(visitor.arc_component.iter().all(|&c| c != -1));
    visitor.arc_component.into_iter().map(|c| c as usize).collect()
}

pub fn is_biconnected(graph: &Graph) -> bool {
    if graph.num_arcs() == 0 {
        return graph.num_nodes() <= 1;
    }
    let components = compute_biconnected_components(graph);
    components.iter().max().map_or(0, |&m| m + 1) <= 1
}

/// Largest biconnected component's node set, as a boolean mask over nodes.
pub fn largest_biconnected_component_mask(graph: &Graph) -> Vec<bool> {
    let n = graph.num_nodes();
    if graph.num_arcs() == 0 {
        let mut mask = vec![false; n];
        if n > 0 {
            mask[0] = true;
        }
        return mask;
    }
    let arc_component = compute_biconnected_components(graph);
    let num_components = arc_component.iter().max().map_or(0, |&m| m + 1);
    let mut nodes_of: Vec<Vec<usize>> = vec![Vec::new(); num_components];
    for a in 0..graph.num_arcs() {
        let comp = arc_component[a];
        nodes_of[comp].push(graph.tail()[a] as usize);
        nodes_of[comp].push(graph.head()[a] as usize);
    }
    for nodes in &mut nodes_of {
        nodes.sort_unstable();
        nodes.dedup();
    }
    let best = (0..num_components).max_by_key(|&c| nodes_of[c].len()).unwrap_or(0);
    let mut mask = vec![false; n];
    for &v in &nodes_of[best] {
        mask[v] = true;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn two_triangles() -> Graph {
        // {0,1,2} and {3,4,5}, each a triangle
        let pairs = [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)];
        let mut tail = Vec::new();
        let mut head = Vec::new();
        for &(a, b) in &pairs {
            tail.push(a);
            head.push(b);
            tail.push(b);
            head.push(a);
        }
        Graph::new(tail, head, None, None).make_simple().unwrap()
    }

    #[test]
    fn connected_components_splits_two_triangles() {
        let g = two_triangles();
        let comp = compute_connected_components(&g);
        assert_eq!(comp[0], comp[1]);
        assert_eq!(comp[1], comp[2]);
        assert_eq!(comp[3], comp[4]);
        assert_eq!(comp[4], comp[5]);
        assert_ne!(comp[0], comp[3]);
    }

    #[test]
    fn path_is_not_biconnected_but_triangle_is() {
        let tail = vec![0, 1, 1, 2];
        let head = vec![1, 0, 2, 1];
        let path = Graph::new(tail, head, None, None).make_simple().unwrap();
        assert!(!is_biconnected(&path));

        let triangle = {
            let pairs = [(0u32, 1u32), (1, 2), (2, 0)];
            let mut tail = Vec::new();
            let mut head = Vec::new();
            for &(a, b) in &pairs {
                tail.push(a);
                head.push(b);
                tail.push(b);
                head.push(a);
            }
            Graph::new(tail, head, None, None).make_simple().unwrap()
        };
        assert!(is_biconnected(&triangle));
    }

    #[test]
    fn scc_of_symmetric_graph_is_one_component_per_connected_component() {
        let g = two_triangles();
        let scc = compute_strongly_connected_components(&g);
        assert_eq!(scc[0], scc[1]);
        assert_eq!(scc[1], scc[2]);
        assert_ne!(scc[0], scc[3]);
    }
}

//! The separator chooser: runs `cutter_count` randomized
//! FlowCutter instances — over the node-capacitated expansion for the two
//! `*_expansion` modes, over the plain graph for the two `*_first` modes —
//! and keeps whichever cut scores best, subject to a balance threshold.

use crate::error::Result;
use crate::expanded_graph::ExpandedGraph;
use crate::flow_cutter::{Config, Cutter, SeparatorSelection};
use crate::graph::{EdgeId, Graph, NodeId};
use crate::prng::Prng;

#[derive(Debug, Clone)]
pub struct SeparatorResult {
    /// Vertex separator; empty for the two edge-cut modes.
    pub separator: Vec<NodeId>,
    /// The cut's arc list, in the space it was computed (expanded graph for
    /// node modes, original graph for edge modes).
    pub cut_arcs: Vec<EdgeId>,
    pub smaller_side: Vec<NodeId>,
    pub larger_side: Vec<NodeId>,
    pub score: f64,
}

pub fn select_random_source_target_pairs(n: usize, config: &Config) -> Vec<(NodeId, NodeId)> {
    let mut rng = Prng::new(config.random_seed as u64);
    let count = config.cutter_count.max(1) as usize;

    if config.source >= 0 && config.target >= 0 {
        return vec![(config.source as NodeId, config.target as NodeId); count];
    }
    if n < 2 {
        return vec![(0, 0); count];
    }

    if config.source >= 0 {
        let s = config.source as NodeId;
        let others: Vec<usize> = (0..n).filter(|&x| x as NodeId != s).collect();
        return (0..count).map(|_| (s, others[rng.below(others.len())] as NodeId)).collect();
    }
    if config.target >= 0 {
        let t = config.target as NodeId;
        let others: Vec<usize> = (0..n).filter(|&x| x as NodeId != t).collect();
        return (0..count).map(|_| (others[rng.below(others.len())] as NodeId, t)).collect();
    }

    let picks = rng.sample_without_replacement(n, (2 * count).min(n));
    let mut pairs = Vec::with_capacity(count);
    for i in 0..count {
        let a = picks[(2 * i) % picks.len()];
        let mut b = picks[(2 * i + 1) % picks.len()];
        if b == a {
            b = picks[(2 * i + 2) % picks.len()];
        }
        pairs.push((a as NodeId, b as NodeId));
    }
    pairs
}

/// The larger side's node count given `n`, the smaller side's size, and (for
/// vertex separators) the separator size removed from both.
pub fn determine_largest_part_size(n: usize, smaller_side_size: usize, separator_size: usize) -> usize {
    n.saturating_sub(smaller_side_size).saturating_sub(separator_size)
}

fn score(cut_size: usize, smaller_side_size: usize, n: usize, max_imbalance: f32) -> f64 {
    let threshold = (max_imbalance as f64) * (n as f64);
    let base = cut_size as f64 / (smaller_side_size.max(1) as f64);
    if (smaller_side_size as f64) < threshold {
        base + 1e6 * (threshold - smaller_side_size as f64)
    } else {
        base
    }
}

fn is_balanced(smaller_side_size: usize, n: usize, max_imbalance: f32) -> bool {
    (smaller_side_size as f64) >= (max_imbalance as f64) * (n as f64)
}

pub fn choose_separator(graph: &Graph, config: &Config) -> Result<SeparatorResult> {
    match config.separator_selection {
        SeparatorSelection::NodeMinExpansion | SeparatorSelection::NodeFirst => choose_node_separator(graph, config),
        SeparatorSelection::EdgeMinExpansion | SeparatorSelection::EdgeFirst => choose_edge_cut(graph, config),
    }
}

fn choose_node_separator(graph: &Graph, config: &Config) -> Result<SeparatorResult> {
    let n = graph.num_nodes();
    let expanded = ExpandedGraph::build(graph);
    let out_arc = expanded.graph.out_arc_ranges();
    let back_arc = expanded.graph.compute_back_arc_permutation()?;
    let capacity = expanded.graph.arc_weight().to_vec();
    let pairs = select_random_source_target_pairs(n, config);
    let want_first_balanced = matches!(config.separator_selection, SeparatorSelection::NodeFirst);

    let mut best: Option<SeparatorResult> = None;
    'cutters: for (s, t) in pairs {
        let (sources, targets) = ExpandedGraph::expand_terminals(&[s], &[t]);
        let mut cutter = Cutter::new(&out_arc, expanded.graph.head(), &back_arc, &capacity, expanded.graph.arc_weight(), &sources, &targets, *config)?;
        while cutter.advance() {
            let cut = cutter.current_cut();
            if cut.arcs.len() as i32 > config.max_cut_size {
                break;
            }
            let separator = expanded.separator_of_cut(&cut.arcs);
            let smaller_side = expanded.smaller_side_original_nodes(&cut.smaller_side, &separator);
            let sc = score(separator.len(), smaller_side.len(), n, config.max_imbalance);
            let balanced = is_balanced(smaller_side.len(), n, config.max_imbalance);

            if balanced && want_first_balanced {
                let larger_side = determine_largest_part_size(n, smaller_side.len(), separator.len());
                best = Some(SeparatorResult {
                    separator,
                    cut_arcs: cut.arcs.clone(),
                    smaller_side,
                    larger_side: Vec::with_capacity(larger_side),
                    score: sc,
                });
                break 'cutters;
            }

            if best.as_ref().map_or(true, |b| sc < b.score) {
                best = Some(SeparatorResult {
                    separator: separator.clone(),
                    cut_arcs: cut.arcs.clone(),
                    smaller_side: smaller_side.clone(),
                    larger_side: Vec::new(),
                    score: sc,
                });
            }
            // monotonicity pruning: separator size is non-decreasing as the
            // cutter advances, so once even a one-node-larger separator at
            // perfect balance couldn't beat the current best, stop early.
            if let Some(b) = &best {
                if balanced && score(separator.len() + 1, n / 2, n, config.max_imbalance) >= b.score {
                    break;
                }
            }
        }
    }

    let mut result = best.unwrap_or(SeparatorResult {
        separator: Vec::new(),
        cut_arcs: Vec::new(),
        smaller_side: Vec::new(),
        larger_side: Vec::new(),
        score: f64::INFINITY,
    });
    let in_smaller_or_sep: Vec<bool> = {
        let mut mask = vec![false; n];
        for &v in &result.smaller_side {
            mask[v as usize] = true;
        }
        for &v in &result.separator {
            mask[v as usize] = true;
        }
        mask
    };
    result.larger_side = (0..n as NodeId).filter(|&v| !in_smaller_or_sep[v as usize]).collect();
    Ok(result)
}

fn choose_edge_cut(graph: &Graph, config: &Config) -> Result<SeparatorResult> {
    let n = graph.num_nodes();
    let out_arc = graph.out_arc_ranges();
    let back_arc = graph.compute_back_arc_permutation()?;
    let capacity: Vec<u32> = graph.arc_weight().to_vec();
    let pairs = select_random_source_target_pairs(n, config);
    let want_first_balanced = matches!(config.separator_selection, SeparatorSelection::EdgeFirst);

    let mut best: Option<SeparatorResult> = None;
    'cutters: for (s, t) in pairs {
        let mut cutter = Cutter::new(&out_arc, graph.head(), &back_arc, &capacity, graph.arc_weight(), &[s], &[t], *config)?;
        while cutter.advance() {
            let cut = cutter.current_cut();
            if cut.arcs.len() as i32 > config.max_cut_size {
                break;
            }
            let sc = score(cut.arcs.len(), cut.smaller_side.len(), n, config.max_imbalance);
            let balanced = is_balanced(cut.smaller_side.len(), n, config.max_imbalance);

            if balanced && want_first_balanced {
                best = Some(SeparatorResult {
                    separator: Vec::new(),
                    cut_arcs: cut.arcs.clone(),
                    smaller_side: cut.smaller_side.clone(),
                    larger_side: Vec::new(),
                    score: sc,
                });
                break 'cutters;
            }
            if best.as_ref().map_or(true, |b| sc < b.score) {
                best = Some(SeparatorResult {
                    separator: Vec::new(),
                    cut_arcs: cut.arcs.clone(),
                    smaller_side: cut.smaller_side.clone(),
                    larger_side: Vec::new(),
                    score: sc,
                });
            }
        }
    }

    let mut result = best.unwrap_or(SeparatorResult {
        separator: Vec::new(),
        cut_arcs: Vec::new(),
        smaller_side: Vec::new(),
        larger_side: Vec::new(),
        score: f64::INFINITY,
    });
    let in_smaller: Vec<bool> = {
        let mut mask = vec![false; n];
        for &v in &result.smaller_side {
            mask[v as usize] = true;
        }
        mask
    };
    result.larger_side = (0..n as NodeId).filter(|&v| !in_smaller[v as usize]).collect();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow_cutter::Config;

    fn grid4x4() -> Graph {
        let idx = |r: u32, c: u32| r * 4 + c;
        let mut tail = Vec::new();
        let mut head = Vec::new();
        let mut push = |a: u32, b: u32| {
            tail.push(a);
            head.push(b);
            tail.push(b);
            head.push(a);
        };
        for r in 0..4u32 {
            for c in 0..4u32 {
                if c + 1 < 4 {
                    push(idx(r, c), idx(r, c + 1));
                }
                if r + 1 < 4 {
                    push(idx(r, c), idx(r + 1, c));
                }
            }
        }
        Graph::new(tail, head, None, None).make_simple().unwrap()
    }

    #[test]
    fn grid_separator_is_small_and_balanced() {
        let g = grid4x4();
        let mut config = Config::default();
        config.max_imbalance = 0.2;
        config.random_seed = 5489;
        let result = choose_separator(&g, &config).unwrap();
        assert!(!result.separator.is_empty());
        assert!(result.separator.len() <= 4);
        assert!(result.smaller_side.len() + result.larger_side.len() + result.separator.len() == 16);
    }

    #[test]
    fn select_pairs_respects_fixed_source() {
        let mut config = Config::default();
        config.source = 2;
        config.cutter_count = 4;
        let pairs = select_random_source_target_pairs(10, &config);
        assert!(pairs.iter().all(|&(s, _)| s == 2));
    }
}

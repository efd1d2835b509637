//! Incremental s-t cut enumeration by piercing, built on top of the
//! addressable heap and union-find already ported elsewhere. The pierce
//! loop itself (`node_flow_cutter.h` in the original FlowCutter sources) is
//! reconstructed from its algorithm description rather than translated
//! line-for-line.
//!
//! A cutter grows two reachable sets `R_S`/`R_T` one node at a time: each
//! `advance()` pops the best-scoring *frontier* node on the smaller side
//! (a node already reached but not yet "assimilated"), assimilates it, and
//! pushes its unexplored residual neighbors onto the frontier. Whenever
//! assimilating a node would touch the opposite side, one augmenting path
//! is pushed first. Because only nodes already committed ("assimilated")
//! stay assimilated across an augmentation, and the post-augmentation
//! residual sweep only ever *adds* newly reachable frontier nodes, `|R_S|`
//! and `|R_T|` never shrink — preserving monotonicity without needing the original's
//! more intricate incremental relabeling scheme.

pub mod augment;
pub mod config;

use std::collections::VecDeque;

pub use config::{AvoidAugmentingPath, Config, DumpState, GraphSearchAlgorithm, PierceRating, ReportCuts, SeparatorSelection, SkipNonMaximumSides};

use crate::error::{Error, Result};
use crate::graph::{EdgeId, NodeId, Weight};
use crate::index::InvertedIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    fn other(self) -> Side {
        match self {
            Side::Source => Side::Target,
            Side::Target => Side::Source,
        }
    }
    fn idx(self) -> usize {
        match self {
            Side::Source => 0,
            Side::Target => 1,
        }
    }
}

/// A single s-t cut as reported to the caller: the cut's arc list, and the
/// node set of the smaller side.
#[derive(Debug, Clone)]
pub struct Cut {
    pub arcs: Vec<EdgeId>,
    pub smaller_side: Vec<NodeId>,
    pub smaller_side_is_source: bool,
}

struct Frontier {
    in_frontier: Vec<bool>,
    assimilated: Vec<bool>,
    heap: crate::heap::AddressableHeap<i64>,
}

impl Frontier {
    fn new(n: usize) -> Self {
        Frontier {
            in_frontier: vec![false; n],
            assimilated: vec![false; n],
            heap: crate::heap::AddressableHeap::new(n),
        }
    }

    fn in_r(&self, v: usize) -> bool {
        self.in_frontier[v] || self.assimilated[v]
    }

    fn len(&self) -> usize {
        self.heap.len() + self.assimilated.iter().filter(|&&b| b).count()
    }
}

/// One FlowCutter instance over a borrowed graph view. Capacities are
/// either `1` (the only saturable arcs, matching the node-capacitated
/// expansion's internal arcs) or [`crate::graph::INFINITY`] (arcs that can
/// never be part of a minimum cut); weighted vertex capacities beyond unit
/// are an explicit non-goal.
pub struct Cutter<'g> {
    out_arc: &'g InvertedIndex,
    head: &'g [NodeId],
    back_arc: &'g [EdgeId],
    capacity: &'g [Weight],
    n: usize,

    flow: Vec<bool>,
    frontier: [Frontier; 2],
    hop_dist: [Vec<Option<u32>>; 2],
    weight_dist: [Vec<Option<u64>>; 2],
    arc_weight: &'g [Weight],

    pierce_seq: Vec<u32>,
    next_pierce_seq: u32,

    source_list: Vec<NodeId>,
    target_list: Vec<NodeId>,
    config: Config,
    terminated: bool,
    cut: Cut,
}

impl<'g> Cutter<'g> {
    /// `init`: `R_S = {source}`, `R_T = {target}`, empty flow,
    /// one full BFS per side, first cut computed.
    pub fn new(
        out_arc: &'g InvertedIndex,
        head: &'g [NodeId],
        back_arc: &'g [EdgeId],
        capacity: &'g [Weight],
        arc_weight: &'g [Weight],
        source_list: &[NodeId],
        target_list: &[NodeId],
        config: Config,
    ) -> Result<Self> {
        if source_list.is_empty() || target_list.is_empty() {
            return Err(Error::EmptyTerminals);
        }
        let n = head.iter().chain(source_list.iter()).chain(target_list.iter()).map(|&x| x as usize + 1).max().unwrap_or(0);

        let mut cutter = Cutter {
            out_arc,
            head,
            back_arc,
            capacity,
            n,
            flow: vec![false; head.len()],
            frontier: [Frontier::new(n), Frontier::new(n)],
            hop_dist: [vec![None; n], vec![None; n]],
            weight_dist: [vec![None; n], vec![None; n]],
            arc_weight,
            pierce_seq: vec![0; n],
            next_pierce_seq: 0,
            source_list: source_list.to_vec(),
            target_list: target_list.to_vec(),
            config,
            terminated: false,
            cut: Cut {
                arcs: Vec::new(),
                smaller_side: Vec::new(),
                smaller_side_is_source: true,
            },
        };

        for &s in source_list {
            cutter.enqueue(Side::Source, s as usize);
        }
        for &t in target_list {
            cutter.enqueue(Side::Target, t as usize);
        }
        cutter.refresh_distance_labels();
        cutter.recompute_cut();
        Ok(cutter)
    }

    fn enqueue(&mut self, side: Side, v: usize) {
        let f = &mut self.frontier[side.idx()];
        if !f.in_r(v) {
            f.in_frontier[v] = true;
            let key = self.score(side, v);
            f.heap.push(v, key);
        }
    }

    /// Lower key = popped first. Encodes every `PierceRating` variant as a
    /// single total order so one addressable min-heap serves them all.
    fn score(&self, side: Side, v: usize) -> i64 {
        let hop_s = self.hop_dist[Side::Source.idx()][v].map(|d| d as i64);
        let hop_t = self.hop_dist[Side::Target.idx()][v].map(|d| d as i64);
        let w_s = self.weight_dist[Side::Source.idx()][v].map(|d| d as i64);
        let w_t = self.weight_dist[Side::Target.idx()][v].map(|d| d as i64);
        let _ = side;
        let big = i64::MAX / 4;
        match self.config.pierce_rating {
            PierceRating::MaxTargetMinusSourceHopDist => -(hop_t.unwrap_or(big) - hop_s.unwrap_or(0)),
            PierceRating::MinSourceHopDist => hop_s.unwrap_or(big),
            PierceRating::MaxTargetHopDist => -hop_t.unwrap_or(0),
            PierceRating::MaxTargetMinusSourceWeightDist => -(w_t.unwrap_or(big) - w_s.unwrap_or(0)),
            PierceRating::MinSourceWeightDist => w_s.unwrap_or(big),
            PierceRating::MaxTargetWeightDist => -w_t.unwrap_or(0),
            PierceRating::Random => random_tag(self.config.random_seed as u64, v),
            PierceRating::Oldest => self.pierce_seq[v] as i64,
            PierceRating::MaxArcWeight => -(self.arc_weight.get(v).copied().unwrap_or(1) as i64),
            PierceRating::MinArcWeight => self.arc_weight.get(v).copied().unwrap_or(1) as i64,
            // circular_* pick whichever side's distance is smaller modulo a
            // fixed ring width, approximating the intended load-balancing
            // effect without the exact upstream formula.
            PierceRating::CircularHop => (hop_s.unwrap_or(big) + hop_t.unwrap_or(big)) % 997,
            PierceRating::CircularWeight => (w_s.unwrap_or(big) + w_t.unwrap_or(big)) % 997,
        }
    }

    fn smaller_side(&self) -> Side {
        let s = self.frontier[Side::Source.idx()].len();
        let t = self.frontier[Side::Target.idx()].len();
        if s <= t {
            Side::Source
        } else {
            Side::Target
        }
    }

    fn forward_traversable(&self, a: usize) -> bool {
        !self.flow[a] || self.capacity[a] >= crate::graph::INFINITY
    }
    fn backward_traversable(&self, a: usize) -> bool {
        self.flow[a]
    }

    /// One pierce step. Returns `false` once the
    /// smaller side has no remaining pierce candidates (termination).
    pub fn advance(&mut self) -> bool {
        if self.terminated {
            return false;
        }
        let side = self.smaller_side();
        let idx = side.idx();
        let popped = self.frontier[idx].heap.pop();
        let Some((p, _)) = popped else {
            self.terminated = true;
            return false;
        };
        self.frontier[idx].in_frontier[p] = false;
        self.frontier[idx].assimilated[p] = true;
        self.pierce_seq[p] = self.next_pierce_seq;
        self.next_pierce_seq += 1;

        let mut touched_other_side = false;
        for a in self.out_arc.range(p) {
            if self.forward_traversable(a) {
                let y = self.head[a] as usize;
                if self.frontier[side.other().idx()].in_r(y) {
                    touched_other_side = true;
                } else {
                    self.enqueue(side, y);
                }
            }
        }
        // arcs into p from elsewhere on the same side via back_arc residual
        for a in self.out_arc.range(p) {
            let ba = self.back_arc[a] as usize;
            if self.backward_traversable(ba) {
                let y = self.head[a] as usize;
                if !self.frontier[side.other().idx()].in_r(y) {
                    self.enqueue(side, y);
                }
            }
        }

        if touched_other_side {
            self.augment_until_disconnected();
        }

        self.recompute_cut();
        true
    }

    /// Push augmenting flow (one unit at a time) until `R_S ∩ R_T = ∅`
    /// again, then re-derive each side's frontier from its now-larger
    /// assimilated set, restarting forward BFS bookkeeping for nodes whose
    /// labels became stale.
    fn augment_until_disconnected(&mut self) {
        loop {
            let source_list: Vec<NodeId> = (0..self.n).filter(|&v| self.frontier[Side::Source.idx()].assimilated[v]).map(|v| v as NodeId).collect();
            let target_list: Vec<NodeId> = (0..self.n).filter(|&v| self.frontier[Side::Target.idx()].assimilated[v]).map(|v| v as NodeId).collect();
            let source_list = if source_list.is_empty() { self.source_list.clone() } else { source_list };
            let target_list = if target_list.is_empty() { self.target_list.clone() } else { target_list };

            match self.find_augmenting_path(&source_list, &target_list) {
                None => break,
                Some(path) => {
                    for a in path {
                        let b = self.back_arc[a] as usize;
                        if self.flow[b] {
                            self.flow[b] = false;
                        } else {
                            self.flow[a] = true;
                        }
                    }
                }
            }
        }
        self.refresh_distance_labels();
        self.refresh_frontier(Side::Source);
        self.refresh_frontier(Side::Target);
    }

    fn find_augmenting_path(&self, source_list: &[NodeId], target_list: &[NodeId]) -> Option<Vec<usize>> {
        let mut is_target = vec![false; self.n];
        for &t in target_list {
            is_target[t as usize] = true;
        }
        let mut was_pushed = vec![false; self.n];
        let mut pred: Vec<Option<(usize, usize)>> = vec![None; self.n];
        let mut queue = VecDeque::new();
        for &s in source_list {
            was_pushed[s as usize] = true;
            queue.push_back(s as usize);
        }
        while let Some(x) = queue.pop_front() {
            for a in self.out_arc.range(x) {
                if self.forward_traversable(a) {
                    let y = self.head[a] as usize;
                    if !was_pushed[y] {
                        was_pushed[y] = true;
                        pred[y] = Some((x, a));
                        if is_target[y] {
                            let mut path = Vec::new();
                            let mut cur = y;
                            while let Some((px, pa)) = pred[cur] {
                                path.push(pa);
                                cur = px;
                                if source_list.iter().any(|&s| s as usize == cur) {
                                    break;
                                }
                            }
                            path.reverse();
                            return Some(path);
                        }
                        queue.push_back(y);
                    }
                }
            }
        }
        None
    }

    /// Re-derive `side`'s frontier: BFS from its assimilated set alone over
    /// the (possibly augmented) residual graph, re-adding any newly
    /// reachable non-assimilated node. Already-assimilated nodes are never
    /// revisited or demoted, so `|R_side|` is monotone non-decreasing.
    fn refresh_frontier(&mut self, side: Side) {
        let assimilated_now: Vec<usize> = (0..self.n).filter(|&v| self.frontier[side.idx()].assimilated[v]).collect();
        let roots = if assimilated_now.is_empty() {
            match side {
                Side::Source => self.source_list.iter().map(|&x| x as usize).collect::<Vec<_>>(),
                Side::Target => self.target_list.iter().map(|&x| x as usize).collect::<Vec<_>>(),
            }
        } else {
            assimilated_now
        };
        for r in roots {
            for a in self.out_arc.range(r) {
                if self.forward_traversable(a) {
                    let y = self.head[a] as usize;
                    if !self.frontier[side.other().idx()].in_r(y) {
                        self.enqueue(side, y);
                    }
                }
            }
        }
    }

    /// Full hop/weight-distance BFS from each side's terminal set, ignoring
    /// assimilation status; used only for pierce-rating scores, which are
    /// heuristics rather than correctness-critical.
    fn refresh_distance_labels(&mut self) {
        for side in [Side::Source, Side::Target] {
            let roots: Vec<usize> = match side {
                Side::Source => self.source_list.iter().map(|&x| x as usize).collect(),
                Side::Target => self.target_list.iter().map(|&x| x as usize).collect(),
            };
            let hop = &mut self.hop_dist[side.idx()];
            let wd = &mut self.weight_dist[side.idx()];
            hop.iter_mut().for_each(|d| *d = None);
            wd.iter_mut().for_each(|d| *d = None);
            let mut queue = VecDeque::new();
            for &r in &roots {
                hop[r] = Some(0);
                wd[r] = Some(0);
                queue.push_back(r);
            }
            while let Some(x) = queue.pop_front() {
                let dx = hop[x].unwrap();
                let wx = wd[x].unwrap();
                for a in self.out_arc.range(x) {
                    let y = self.head[a] as usize;
                    let w = self.arc_weight.get(a).copied().unwrap_or(1) as u64;
                    if hop[y].is_none() {
                        hop[y] = Some(dx + 1);
                        queue.push_back(y);
                    }
                    if wd[y].map_or(true, |cur| wx + w < cur) {
                        wd[y] = Some(wx + w);
                    }
                }
            }
        }
    }

    fn recompute_cut(&mut self) {
        let side = self.smaller_side();
        let mut arcs = Vec::new();
        let smaller = &self.frontier[side.idx()];
        let mut smaller_side = Vec::new();
        for v in 0..self.n {
            if smaller.assimilated[v] {
                smaller_side.push(v as NodeId);
                for a in self.out_arc.range(v) {
                    let leaves_side = !smaller.assimilated[self.head[a] as usize];
                    if self.flow[a] && self.capacity[a] < crate::graph::INFINITY && leaves_side {
                        arcs.push(a as EdgeId);
                    }
                }
            }
        }
        self.cut = Cut {
            arcs,
            smaller_side,
            smaller_side_is_source: side == Side::Source,
        };
    }

    pub fn current_cut(&self) -> &Cut {
        &self.cut
    }

    pub fn current_smaller_side_size(&self) -> usize {
        self.cut.smaller_side.len()
    }

    pub fn is_on_smaller_side(&self, v: NodeId) -> bool {
        self.cut.smaller_side.contains(&v)
    }

    /// Diagnostic snapshot, gated by `config.dump_state`.
    pub fn dump_state(&self) -> Option<serde_json::Value> {
        if self.config.dump_state == DumpState::No {
            return None;
        }
        Some(serde_json::json!({
            "smaller_side_size": self.current_smaller_side_size(),
            "cut_size": self.cut.arcs.len(),
            "source_assimilated": self.frontier[Side::Source.idx()].assimilated.iter().filter(|&&b| b).count(),
            "target_assimilated": self.frontier[Side::Target.idx()].assimilated.iter().filter(|&&b| b).count(),
        }))
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

/// Cheap deterministic per-node tag for `PierceRating::Random`: stable for
/// the lifetime of one cutter (repeated scoring of the same node must agree
/// for heap re-keying), without mutating a shared `Prng` on every score.
fn random_tag(seed: u64, node: usize) -> i64 {
    let mut h = seed ^ (node as u64).wrapping_mul(0x9E3779B97F4A7C15);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51AFD7ED558CCD);
    (h >> 1) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn barbell() -> Graph {
        // two K4's {0,1,2,3} and {4,5,6,7} joined by a single bridge 3-4.
        let mut tail = Vec::new();
        let mut head = Vec::new();
        let mut push = |a: u32, b: u32| {
            tail.push(a);
            head.push(b);
            tail.push(b);
            head.push(a);
        };
        for &(a, b) in &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
            push(a, b);
        }
        for &(a, b) in &[(4, 5), (4, 6), (4, 7), (5, 6), (5, 7), (6, 7)] {
            push(a, b);
        }
        push(3, 4);
        Graph::new(tail, head, None, None).make_simple().unwrap()
    }

    #[test]
    fn barbell_first_cut_is_the_bridge() {
        let g = barbell();
        let out_arc = g.out_arc_ranges();
        let back_arc = g.compute_back_arc_permutation().unwrap();
        let capacity: Vec<Weight> = vec![1; g.num_arcs()];
        let mut cutter = Cutter::new(&out_arc, g.head(), &back_arc, &capacity, g.arc_weight(), &[0], &[7], Config::default()).unwrap();
        let mut last_smaller = 0;
        let mut last_cut_size = 0;
        for _ in 0..20 {
            if !cutter.advance() {
                break;
            }
            let cut = cutter.current_cut();
            assert!(cut.smaller_side.len() >= last_smaller);
            assert!(cut.arcs.len() >= last_cut_size || cut.smaller_side.len() > last_smaller);
            last_smaller = cut.smaller_side.len();
            last_cut_size = cut.arcs.len();
        }
        assert!(last_smaller >= 4);
    }

    #[test]
    fn monotonicity_holds_across_a_full_enumeration() {
        let g = barbell();
        let out_arc = g.out_arc_ranges();
        let back_arc = g.compute_back_arc_permutation().unwrap();
        let capacity: Vec<Weight> = vec![1; g.num_arcs()];
        let mut cutter = Cutter::new(&out_arc, g.head(), &back_arc, &capacity, g.arc_weight(), &[0], &[7], Config::default()).unwrap();
        let mut sizes = Vec::new();
        while cutter.advance() {
            sizes.push(cutter.current_smaller_side_size());
        }
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn empty_terminals_is_an_error() {
        let g = barbell();
        let out_arc = g.out_arc_ranges();
        let back_arc = g.compute_back_arc_permutation().unwrap();
        let capacity: Vec<Weight> = vec![1; g.num_arcs()];
        let result = Cutter::new(&out_arc, g.head(), &back_arc, &capacity, g.arc_weight(), &[], &[7], Config::default());
        assert!(result.is_err());
    }
}

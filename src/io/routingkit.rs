//! The RoutingKit on-disk layout: a directory of raw
//! little-endian vectors, one file per array — `first_out` (length `N+1`),
//! `head` (length `M`), and optionally `travel_time`/`geo_distance` (`u32`)
//! and `longitude`/`latitude` (`f32`).

use super::{Load, Store};
use crate::error::Result;
use crate::graph::{Graph, NodeId, Weight};
use std::path::Path;

pub struct RoutingKitGraph {
    pub first_out: Vec<u32>,
    pub head: Vec<NodeId>,
    pub travel_time: Option<Vec<Weight>>,
    pub geo_distance: Option<Vec<Weight>>,
    pub longitude: Option<Vec<f32>>,
    pub latitude: Option<Vec<f32>>,
}

impl RoutingKitGraph {
    pub fn num_nodes(&self) -> usize {
        self.first_out.len().saturating_sub(1)
    }

    pub fn to_graph(&self) -> Graph {
        let n = self.num_nodes();
        let m = self.head.len();
        let mut tail = Vec::with_capacity(m);
        for node in 0..n {
            let (from, to) = (self.first_out[node] as usize, self.first_out[node + 1] as usize);
            for _ in from..to {
                tail.push(node as NodeId);
            }
        }
        let arc_weight = self.travel_time.clone().or_else(|| self.geo_distance.clone());
        Graph::new(tail, self.head.clone(), Some(vec![1; n]), arc_weight)
    }
}

fn load_optional<T: Copy + Default>(dir: &Path, name: &str) -> Result<Option<Vec<T>>> {
    let path = dir.join(name);
    if path.exists() {
        Ok(Some(Vec::load_from(path)?))
    } else {
        Ok(None)
    }
}

pub fn load<P: AsRef<Path>>(dir: P) -> Result<RoutingKitGraph> {
    let dir = dir.as_ref();
    let first_out: Vec<u32> = Vec::load_from(dir.join("first_out"))?;
    let head: Vec<NodeId> = Vec::load_from(dir.join("head"))?;
    let travel_time = load_optional(dir, "travel_time")?;
    let geo_distance = load_optional(dir, "geo_distance")?;
    let longitude = load_optional(dir, "longitude")?;
    let latitude = load_optional(dir, "latitude")?;
    Ok(RoutingKitGraph { first_out, head, travel_time, geo_distance, longitude, latitude })
}

pub fn save<P: AsRef<Path>>(g: &RoutingKitGraph, dir: P) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    g.first_out.write_to(dir.join("first_out"))?;
    g.head.write_to(dir.join("head"))?;
    if let Some(v) = &g.travel_time {
        v.write_to(dir.join("travel_time"))?;
    }
    if let Some(v) = &g.geo_distance {
        v.write_to(dir.join("geo_distance"))?;
    }
    if let Some(v) = &g.longitude {
        v.write_to(dir.join("longitude"))?;
    }
    if let Some(v) = &g.latitude {
        v.write_to(dir.join("latitude"))?;
    }
    Ok(())
}

/// Build a [`RoutingKitGraph`]'s `first_out`/`head` from an already
/// tail-sorted [`Graph`] (per `Graph::make_simple`).
pub fn from_graph(graph: &Graph) -> RoutingKitGraph {
    let ranges = graph.out_arc_ranges();
    let mut first_out = vec![0u32; graph.num_nodes() + 1];
    for node in 0..graph.num_nodes() {
        first_out[node] = ranges.range(node).start as u32;
    }
    first_out[graph.num_nodes()] = graph.num_arcs() as u32;
    RoutingKitGraph {
        first_out,
        head: graph.head().to_vec(),
        travel_time: Some(graph.arc_weight().to_vec()),
        geo_distance: None,
        longitude: None,
        latitude: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn push_sym(tail: &mut Vec<u32>, head: &mut Vec<u32>, a: u32, b: u32) {
        tail.push(a);
        head.push(b);
        tail.push(b);
        head.push(a);
    }

    #[test]
    fn round_trips_first_out_and_head_through_a_directory() {
        let mut tail = Vec::new();
        let mut head = Vec::new();
        push_sym(&mut tail, &mut head, 0, 1);
        push_sym(&mut tail, &mut head, 1, 2);
        let g = Graph::new(tail, head, None, None).make_simple().unwrap();
        let rk = from_graph(&g);

        let dir = temp_dir().join("flow_cutter_order_test_routingkit_dir");
        save(&rk, &dir).unwrap();
        let loaded = load(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(loaded.first_out, rk.first_out);
        assert_eq!(loaded.head, rk.head);
        assert_eq!(loaded.num_nodes(), 3);
        assert!(loaded.geo_distance.is_none());
    }

    #[test]
    fn to_graph_reconstructs_the_same_arc_set() {
        let mut tail = Vec::new();
        let mut head = Vec::new();
        push_sym(&mut tail, &mut head, 0, 1);
        push_sym(&mut tail, &mut head, 1, 2);
        let g = Graph::new(tail, head, None, None).make_simple().unwrap();
        let rk = from_graph(&g);
        let rebuilt = rk.to_graph();
        assert_eq!(rebuilt.tail(), g.tail());
        assert_eq!(rebuilt.head(), g.head());
    }
}

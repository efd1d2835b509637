//! DIMACS text formats: the shortest-path graph/coordinate pair
//! (`p sp`/`p aux sp co`, 1-based, weighted) and the color/edge graph
//! (`p edge`, 1-based, unweighted) used by the DIMACS graph-coloring and
//! treewidth challenges this crate's separator work descends from.

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, Weight};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// `p sp N M` + `a t h w` (1-based endpoints, arc weight).
pub fn load_shortest_path<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut node_count = None;
    let mut tail = Vec::new();
    let mut head = Vec::new();
    let mut arc_weight = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("p") => {
                if fields.next() != Some("sp") {
                    return Err(Error::invalid_input("expected 'p sp' problem line"));
                }
                let n: usize = parse_field(fields.next())?;
                node_count = Some(n);
            }
            Some("a") => {
                let t: NodeId = parse_field(fields.next())?;
                let h: NodeId = parse_field(fields.next())?;
                let w: Weight = parse_field(fields.next())?;
                if t == 0 || h == 0 {
                    return Err(Error::invalid_input("DIMACS node ids are 1-based"));
                }
                tail.push(t - 1);
                head.push(h - 1);
                arc_weight.push(w);
            }
            _ => continue,
        }
    }

    let node_count = node_count.ok_or_else(|| Error::invalid_input("missing 'p sp' problem line"))?;
    for &v in tail.iter().chain(head.iter()) {
        if v as usize >= node_count {
            return Err(Error::invalid_input(format!("node id {} out of range for N={}", v + 1, node_count)));
        }
    }
    Ok(Graph::new(tail, head, Some(vec![1; node_count]), Some(arc_weight)))
}

pub fn save_shortest_path<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "p sp {} {}", graph.num_nodes(), graph.num_arcs())?;
    for i in 0..graph.num_arcs() {
        writeln!(file, "a {} {} {}", graph.tail()[i] + 1, graph.head()[i] + 1, graph.arc_weight()[i])?;
    }
    Ok(())
}

/// `p aux sp co` + `v id lon lat`, lon/lat scaled by 10^6 fixed point.
pub fn load_coordinates<P: AsRef<Path>>(path: P) -> Result<Vec<(f64, f64)>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut coords: Vec<(f64, f64)> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') || line.starts_with('p') {
            continue;
        }
        let mut fields = line.split_whitespace();
        if fields.next() != Some("v") {
            continue;
        }
        let id: usize = parse_field(fields.next())?;
        let lon: i64 = parse_field(fields.next())?;
        let lat: i64 = parse_field(fields.next())?;
        if id == 0 {
            return Err(Error::invalid_input("DIMACS coordinate ids are 1-based"));
        }
        if coords.len() < id {
            coords.resize(id, (0.0, 0.0));
        }
        coords[id - 1] = (lon as f64 / 1_000_000.0, lat as f64 / 1_000_000.0);
    }
    Ok(coords)
}

/// `p edge N M` + `e t h` (1-based, unweighted, undirected).
pub fn load_color_edge<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut node_count = None;
    let mut tail = Vec::new();
    let mut head = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("p") => {
                if fields.next() != Some("edge") {
                    return Err(Error::invalid_input("expected 'p edge' problem line"));
                }
                let n: usize = parse_field(fields.next())?;
                node_count = Some(n);
            }
            Some("e") => {
                let t: NodeId = parse_field(fields.next())?;
                let h: NodeId = parse_field(fields.next())?;
                if t == 0 || h == 0 {
                    return Err(Error::invalid_input("DIMACS node ids are 1-based"));
                }
                tail.push(t - 1);
                head.push(h - 1);
                tail.push(h - 1);
                head.push(t - 1);
            }
            _ => continue,
        }
    }

    let node_count = node_count.ok_or_else(|| Error::invalid_input("missing 'p edge' problem line"))?;
    for &v in tail.iter().chain(head.iter()) {
        if v as usize >= node_count {
            return Err(Error::invalid_input(format!("node id {} out of range for N={}", v + 1, node_count)));
        }
    }
    Ok(Graph::new(tail, head, Some(vec![1; node_count]), None))
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>) -> Result<T> {
    field
        .ok_or_else(|| Error::invalid_input("line has too few fields"))?
        .parse()
        .map_err(|_| Error::invalid_input("field is not a valid integer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn a_weighted_triangle_round_trips_through_the_shortest_path_format() {
        let path = temp_dir().join("flow_cutter_order_test_dimacs_sp.gr");
        std::fs::write(&path, "c a comment\np sp 3 6\na 1 2 5\na 2 1 5\na 2 3 7\na 3 2 7\na 3 1 9\na 1 3 9\n").unwrap();
        let g = load_shortest_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_arcs(), 6);
        assert_eq!(g.arc_weight()[0], 5);
    }

    #[test]
    fn coordinates_are_scaled_down_from_fixed_point_microdegrees() {
        let path = temp_dir().join("flow_cutter_order_test_dimacs_co.co");
        std::fs::write(&path, "p aux sp co 2\nv 1 8682000 49012000\nv 2 8683000 49013000\n").unwrap();
        let coords = load_coordinates(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(coords.len(), 2);
        assert!((coords[0].0 - 8.682).abs() < 1e-9);
        assert!((coords[0].1 - 49.012).abs() < 1e-9);
    }

    #[test]
    fn a_color_edge_file_produces_a_symmetric_unweighted_graph() {
        let path = temp_dir().join("flow_cutter_order_test_dimacs_col.col");
        std::fs::write(&path, "c comment\np edge 3 3\ne 1 2\ne 2 3\ne 3 1\n").unwrap();
        let g = load_color_edge(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_arcs(), 6);
    }

    #[test]
    fn a_zero_based_node_id_is_rejected() {
        let path = temp_dir().join("flow_cutter_order_test_dimacs_bad.gr");
        std::fs::write(&path, "p sp 2 1\na 0 1 1\n").unwrap();
        let result = load_shortest_path(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}

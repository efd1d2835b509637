//! The METIS graph format: a header line `N HalfM [fmt]`
//! followed by one line per node listing its 1-based neighbors (and, per
//! `fmt`, node/arc weights). `fmt` is a 3-digit flag read as `{node_weight,
//! arc_weight, unused}`: `0`/absent means unweighted, `001` arc-weighted,
//! `010` node-weighted, `011` both.

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, Weight};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

struct Format {
    has_node_weight: bool,
    has_arc_weight: bool,
}

fn parse_format(raw: Option<&str>) -> Result<Format> {
    match raw {
        None | Some("0") => Ok(Format { has_node_weight: false, has_arc_weight: false }),
        Some("001") => Ok(Format { has_node_weight: false, has_arc_weight: true }),
        Some("010") => Ok(Format { has_node_weight: true, has_arc_weight: false }),
        Some("011") => Ok(Format { has_node_weight: true, has_arc_weight: true }),
        Some(other) => Err(Error::invalid_input(format!("unsupported METIS fmt {:?}", other))),
    }
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = loop {
        let line = lines.next().ok_or_else(|| Error::invalid_input("empty METIS file"))??;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        break trimmed.to_string();
    };
    let mut header_fields = header.split_whitespace();
    let node_count: usize = header_fields
        .next()
        .ok_or_else(|| Error::invalid_input("missing node count in METIS header"))?
        .parse()
        .map_err(|_| Error::invalid_input("node count is not an integer"))?;
    let _half_m: usize = header_fields
        .next()
        .ok_or_else(|| Error::invalid_input("missing arc count in METIS header"))?
        .parse()
        .map_err(|_| Error::invalid_input("arc count is not an integer"))?;
    let fmt = parse_format(header_fields.next())?;

    let mut tail = Vec::new();
    let mut head = Vec::new();
    let mut arc_weight = Vec::new();
    let mut node_weight = Vec::with_capacity(node_count);

    let mut node = 0usize;
    while node < node_count {
        let line = lines.next().ok_or_else(|| Error::invalid_input("METIS file ended before all nodes were read"))??;
        let trimmed = line.trim();
        if trimmed.is_empty() && node_count > 0 {
            // blank adjacency line: an isolated node.
            node_weight.push(1);
            node += 1;
            continue;
        }
        let mut fields = trimmed.split_whitespace();

        if fmt.has_node_weight {
            let w: Weight = fields
                .next()
                .ok_or_else(|| Error::invalid_input("missing node weight"))?
                .parse()
                .map_err(|_| Error::invalid_input("node weight is not an integer"))?;
            node_weight.push(w);
        } else {
            node_weight.push(1);
        }

        while let Some(neighbor_field) = fields.next() {
            let neighbor: NodeId = neighbor_field.parse().map_err(|_| Error::invalid_input("neighbor id is not an integer"))?;
            if neighbor == 0 {
                return Err(Error::invalid_input("METIS neighbor ids are 1-based"));
            }
            let w = if fmt.has_arc_weight {
                fields
                    .next()
                    .ok_or_else(|| Error::invalid_input("missing arc weight"))?
                    .parse()
                    .map_err(|_| Error::invalid_input("arc weight is not an integer"))?
            } else {
                1
            };
            tail.push(node as NodeId);
            head.push(neighbor - 1);
            arc_weight.push(w);
        }
        node += 1;
    }

    for &h in &head {
        if h as usize >= node_count {
            return Err(Error::invalid_input(format!("neighbor id {} out of range for N={}", h + 1, node_count)));
        }
    }

    Ok(Graph::new(tail, head, Some(node_weight), Some(arc_weight)))
}

/// Requires `graph` to already be symmetric (arcs come in `(t,h)`/`(h,t)`
/// pairs) and sorted by tail, as every non-trivial graph in this crate is
/// after `Graph::make_simple`.
pub fn save<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "{} {} 011", graph.num_nodes(), graph.num_arcs() / 2)?;

    let ranges = graph.out_arc_ranges();
    for node in 0..graph.num_nodes() {
        write!(file, "{}", graph.node_weight()[node])?;
        for i in ranges.range(node) {
            write!(file, " {} {}", graph.head()[i] + 1, graph.arc_weight()[i])?;
        }
        writeln!(file)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn an_unweighted_triangle_loads_with_uniform_weights() {
        let path = temp_dir().join("flow_cutter_order_test_metis_triangle.graph");
        std::fs::write(&path, "3 3\n2 3\n1 3\n1 2\n").unwrap();
        let g = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_arcs(), 6);
        assert!(g.arc_weight().iter().all(|&w| w == 1));
    }

    #[test]
    fn node_and_arc_weights_are_read_when_fmt_is_011() {
        let path = temp_dir().join("flow_cutter_order_test_metis_weighted.graph");
        std::fs::write(&path, "2 1 011\n10 2 7\n20 1 7\n").unwrap();
        let g = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(g.node_weight(), &[10, 20]);
        assert_eq!(g.arc_weight(), &[7, 7]);
    }

    #[test]
    fn a_zero_based_neighbor_id_is_rejected() {
        let path = temp_dir().join("flow_cutter_order_test_metis_bad.graph");
        std::fs::write(&path, "2 1\n0\n1\n").unwrap();
        let result = load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}

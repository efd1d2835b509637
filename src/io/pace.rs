//! The PACE 2016 treewidth-track format: `p tw N M` followed by
//! `M` lines `t h` (1-based, undirected, unweighted).

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

pub fn load<P: AsRef<Path>>(path: P) -> Result<Graph> {
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
                if fields.next() != Some("tw") {
                    return Err(Error::invalid_input("expected 'p tw' problem line"));
                }
                let n: usize = fields
                    .next()
                    .ok_or_else(|| Error::invalid_input("missing node count"))?
                    .parse()
                    .map_err(|_| Error::invalid_input("node count is not an integer"))?;
                node_count = Some(n);
            }
            Some(t_field) => {
                let t: NodeId = t_field.parse().map_err(|_| Error::invalid_input("endpoint is not an integer"))?;
                let h: NodeId = fields
                    .next()
                    .ok_or_else(|| Error::invalid_input("edge line has only one endpoint"))?
                    .parse()
                    .map_err(|_| Error::invalid_input("endpoint is not an integer"))?;
                if t == 0 || h == 0 {
                    return Err(Error::invalid_input("PACE node ids are 1-based"));
                }
                tail.push(t - 1);
                head.push(h - 1);
                tail.push(h - 1);
                head.push(t - 1);
            }
            None => continue,
        }
    }

    let node_count = node_count.ok_or_else(|| Error::invalid_input("missing 'p tw' problem line"))?;
    for &v in tail.iter().chain(head.iter()) {
        if v as usize >= node_count {
            return Err(Error::invalid_input(format!("node id {} out of range for N={}", v + 1, node_count)));
        }
    }
    Ok(Graph::new(tail, head, Some(vec![1; node_count]), None))
}

pub fn save<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "p tw {} {}", graph.num_nodes(), graph.num_arcs() / 2)?;
    for i in 0..graph.num_arcs() {
        let (t, h) = (graph.tail()[i], graph.head()[i]);
        if t < h {
            writeln!(file, "{} {}", t + 1, h + 1)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn a_four_cycle_loads_with_unit_weights() {
        let path = temp_dir().join("flow_cutter_order_test_pace_cycle.gr");
        std::fs::write(&path, "c header comment\np tw 4 4\n1 2\n2 3\n3 4\n4 1\n").unwrap();
        let g = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_arcs(), 8);
        assert!(g.arc_weight().iter().all(|&w| w == 1));
    }

    #[test]
    fn a_zero_based_endpoint_is_rejected() {
        let path = temp_dir().join("flow_cutter_order_test_pace_bad.gr");
        std::fs::write(&path, "p tw 2 1\n0 1\n").unwrap();
        let result = load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}

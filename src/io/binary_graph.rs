//! The little-endian binary graph format: a header of
//! two `int32`s (`node_count`, `arc_count`) followed by `tail`/`head`/
//! `arc_weight` (arc-length) and `node_weight` (node-length) `int32` arrays.

use super::DataBytes;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, Weight};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub fn load<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 8];
    file.read_exact(&mut header)?;
    let node_count = i32::from_le_bytes(header[0..4].try_into().unwrap());
    let arc_count = i32::from_le_bytes(header[4..8].try_into().unwrap());
    if node_count < 0 || arc_count < 0 {
        return Err(Error::invalid_input("negative node_count or arc_count in binary graph header"));
    }
    let (node_count, arc_count) = (node_count as usize, arc_count as usize);

    let mut rest = Vec::new();
    file.read_to_end(&mut rest)?;
    let expected_len = (3 * arc_count + node_count) * std::mem::size_of::<i32>();
    if rest.len() != expected_len {
        return Err(Error::invalid_input(format!(
            "binary graph body has {} bytes, expected {} for {} arcs and {} nodes",
            rest.len(),
            expected_len,
            arc_count,
            node_count
        )));
    }

    let mut cursor = &rest[..];
    let tail = read_u32_array(&mut cursor, arc_count);
    let head = read_u32_array(&mut cursor, arc_count);
    let arc_weight = read_u32_array(&mut cursor, arc_count);
    let node_weight = read_u32_array(&mut cursor, node_count);

    for &t in tail.iter().chain(head.iter()) {
        if t as usize >= node_count {
            return Err(Error::invalid_input(format!("node id {} out of range for node_count {}", t, node_count)));
        }
    }

    Ok(Graph::new(tail, head, Some(node_weight), Some(arc_weight)))
}

pub fn save<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(&(graph.num_nodes() as i32).to_le_bytes())?;
    file.write_all(&(graph.num_arcs() as i32).to_le_bytes())?;
    file.write_all(graph.tail().data_bytes())?;
    file.write_all(graph.head().data_bytes())?;
    file.write_all(graph.arc_weight().data_bytes())?;
    file.write_all(graph.node_weight().data_bytes())?;
    Ok(())
}

fn read_u32_array(cursor: &mut &[u8], count: usize) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let (chunk, rest) = cursor.split_at(4);
        out.push(Weight::from_le_bytes(chunk.try_into().unwrap()));
        *cursor = rest;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn round_trips_a_small_weighted_graph() {
        let tail = vec![0, 1, 1, 2];
        let head = vec![1, 0, 2, 1];
        let g = Graph::new(tail, head, Some(vec![10, 20, 30]), Some(vec![1, 1, 2, 2]));
        let path = temp_dir().join("flow_cutter_order_test_binary_graph_roundtrip.bin");
        save(&g, &path).unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.tail(), g.tail());
        assert_eq!(loaded.head(), g.head());
        assert_eq!(loaded.arc_weight(), g.arc_weight());
        assert_eq!(loaded.node_weight(), g.node_weight());
    }

    #[test]
    fn rejects_an_out_of_range_node_id() {
        let mut file = File::create(temp_dir().join("flow_cutter_order_test_binary_graph_bad.bin")).unwrap();
        let path = temp_dir().join("flow_cutter_order_test_binary_graph_bad.bin");
        file.write_all(&2i32.to_le_bytes()).unwrap(); // node_count = 2
        file.write_all(&1i32.to_le_bytes()).unwrap(); // arc_count = 1
        file.write_all(&0i32.to_le_bytes()).unwrap(); // tail[0]
        file.write_all(&5i32.to_le_bytes()).unwrap(); // head[0], out of range
        file.write_all(&1i32.to_le_bytes()).unwrap(); // arc_weight[0]
        file.write_all(&1i32.to_le_bytes()).unwrap(); // node_weight[0]
        file.write_all(&1i32.to_le_bytes()).unwrap(); // node_weight[1]
        drop(file);
        assert!(load(&path).is_err());
        std::fs::remove_file(&path).unwrap();
    }
}

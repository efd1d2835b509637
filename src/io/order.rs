//! The persisted elimination order format: a text file of `N`
//! integers, one per line, where the `i`-th line is the position at which
//! original node `i` is eliminated (`pos[i]`). A binary cache of the same
//! `pos` array, as raw little-endian `int32`, is accepted alongside it.

use super::{Load, Store};
use crate::error::{Error, Result};
use crate::graph::NodeId;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Read a text order file into `pos[]` (`pos[i]` = elimination rank of node
/// `i`).
pub fn load_text<P: AsRef<Path>>(path: P) -> Result<Vec<NodeId>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut pos = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: NodeId = line
            .parse()
            .map_err(|_| Error::invalid_input(format!("order file line {:?} is not a non-negative integer", line)))?;
        pos.push(value);
    }
    Ok(pos)
}

pub fn save_text<P: AsRef<Path>>(pos: &[NodeId], path: P) -> Result<()> {
    let mut file = File::create(path)?;
    for &p in pos {
        writeln!(file, "{}", p)?;
    }
    Ok(())
}

/// Read the raw `int32` binary cache variant.
pub fn load_binary<P: AsRef<Path>>(path: P) -> Result<Vec<NodeId>> {
    Ok(Vec::load_from(path)?)
}

pub fn save_binary<P: AsRef<Path>>(pos: &[NodeId], path: P) -> Result<()> {
    Ok(pos.to_vec().write_to(path)?)
}

/// Recover the permutation `π` from an elimination-position array `pos`,
/// i.e. `π[pos[i]] = i`.
pub fn permutation_from_positions(pos: &[NodeId]) -> Vec<NodeId> {
    let n = pos.len();
    let mut order = vec![0; n];
    for (i, &p) in pos.iter().enumerate() {
        order[p as usize] = i as NodeId;
    }
    order
}

/// The inverse: elimination positions from an order/permutation `π`.
pub fn positions_from_permutation(order: &[NodeId]) -> Vec<NodeId> {
    let n = order.len();
    let mut pos = vec![0; n];
    for (rank, &v) in order.iter().enumerate() {
        pos[v as usize] = rank as NodeId;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn text_round_trip_recovers_the_same_positions() {
        let pos = vec![2, 0, 3, 1];
        let path = temp_dir().join("flow_cutter_order_test_order_text_roundtrip.txt");
        save_text(&pos, &path).unwrap();
        let loaded = load_text(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(pos, loaded);
    }

    #[test]
    fn binary_round_trip_recovers_the_same_positions() {
        let pos = vec![2, 0, 3, 1];
        let path = temp_dir().join("flow_cutter_order_test_order_binary_roundtrip.bin");
        save_binary(&pos, &path).unwrap();
        let loaded = load_binary(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(pos, loaded);
    }

    #[test]
    fn permutation_and_positions_are_mutual_inverses() {
        let order = vec![3, 1, 2, 0];
        let pos = positions_from_permutation(&order);
        assert_eq!(permutation_from_positions(&pos), order);
    }

    #[test]
    fn a_non_numeric_line_is_an_invalid_input_error() {
        let path = temp_dir().join("flow_cutter_order_test_order_garbage.txt");
        std::fs::write(&path, "1\nnot a number\n3\n").unwrap();
        let result = load_text(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}

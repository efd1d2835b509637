//! FlowCutter-based vertex separators and nested-dissection elimination
//! orderings: given a graph, produce an elimination order with small
//! induced tree-width, suitable as input to a customizable contraction
//! hierarchy.
//!
//! [`dissection::compute_nested_dissection_order`] is the general entry
//! point; [`dissection::compute_cch_order`] layers road-network-specific
//! reduction rules in front of the same recursive separator splitting.
//! [`separator::choose_separator`] and the [`flow_cutter`] module
//! underneath it do the actual cut search; [`reduction`] holds the cheap
//! rules ([`reduction::trivial`], [`reduction::degree2`],
//! [`reduction::biconnected`], [`reduction::simplicial`]) tried before any
//! cutter runs.

pub mod dissection;
pub mod elimination;
pub mod error;
pub mod expanded_graph;
pub mod flow_cutter;
pub mod graph;
pub mod heap;
pub mod index;
pub mod io;
pub mod prng;
pub mod reduction;
pub mod report;
pub mod separator;
pub mod union_find;

pub use error::{Error, Result};

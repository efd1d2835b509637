//! Standalone unit-capacity max-flow solvers, kept apart from the cutter's
//! incremental pierce loop.
//! These exist to cross-check a cutter's final flow against a from-scratch
//! computation, not to run on the hot path.

pub mod dinic;
pub mod edmond_karp;

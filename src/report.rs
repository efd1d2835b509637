//! Structured, nestable reporting of timings and statistics.
//!
//! Reporting is a zero-cost no-op unless the `report-to-stderr` feature is enabled, so the
//! core algorithms never pay for it in embedded use, while a CLI binary
//! built with the default features gets a nested JSON trace of every
//! `measure`d block for free.

use std::cell::RefCell;
use std::time::Instant;

use serde::Serialize;
use serde_json::{Map, Value};

/// One reported block: its name, wall-clock duration in milliseconds, and
/// any key/value stats attached via [`report`] while it was the current
/// innermost block.
#[derive(Debug, Serialize)]
struct Block {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    running_time_ms: Option<f64>,
    #[serde(flatten)]
    stats: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Block>,
}

impl Block {
    fn new(name: &str) -> Self {
        Block {
            name: name.to_string(),
            running_time_ms: None,
            stats: Map::new(),
            children: Vec::new(),
        }
    }
}

scoped_tls::scoped_thread_local!(static CONTEXT: RefCell<Vec<Block>>);

/// While true, [`measure`]/[`report`] are no-ops; set by [`block_reporting`]
/// guards so that inner, uninteresting detail can be silenced without
/// touching call sites (used e.g. while rebuilding the CCH for separator
/// reordering — see `dissection::CCH::fix_order_and_build` upstream).
thread_local!(static SUPPRESSED: RefCell<u32> = RefCell::new(0));

fn suppressed() -> bool {
    SUPPRESSED.with(|s| *s.borrow() > 0)
}

/// RAII guard returned by [`block_reporting`]; reporting resumes when dropped.
pub struct SuppressReporting(());

impl Drop for SuppressReporting {
    fn drop(&mut self) {
        SUPPRESSED.with(|s| *s.borrow_mut() -= 1);
    }
}

/// Suppress all reporting for as long as the returned guard is alive.
pub fn block_reporting() -> SuppressReporting {
    SUPPRESSED.with(|s| *s.borrow_mut() += 1);
    SuppressReporting(())
}

/// Attach a key/value stat to the currently running [`measure`]d block.
/// No-op outside of a `measure` call or while reporting is suppressed.
pub fn report(key: &str, value: impl Into<Value>) {
    if !cfg!(feature = "report-to-stderr") || suppressed() || !CONTEXT.is_set() {
        return;
    }
    CONTEXT.with(|stack| {
        if let Some(top) = stack.borrow_mut().last_mut() {
            top.stats.insert(key.to_string(), value.into());
        }
    });
}

/// Run `f` inside a named, timed reporting block, nesting under whatever
/// block is currently running. Returns `f`'s result unchanged.
pub fn measure<Out>(name: &str, f: impl FnOnce() -> Out) -> Out {
    if !cfg!(feature = "report-to-stderr") || suppressed() {
        return f();
    }

    let push = |stack: &RefCell<Vec<Block>>| stack.borrow_mut().push(Block::new(name));

    if CONTEXT.is_set() {
        CONTEXT.with(push);
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;
        CONTEXT.with(|stack| {
            let mut finished = stack.borrow_mut().pop().unwrap();
            finished.running_time_ms = Some(elapsed);
            if let Some(parent) = stack.borrow_mut().last_mut() {
                parent.children.push(finished);
            } else {
                emit(&finished);
            }
        });
        result
    } else {
        let stack = RefCell::new(vec![Block::new(name)]);
        let result = CONTEXT.set(&stack, || {
            let start = Instant::now();
            let out = f();
            let elapsed = start.elapsed().as_secs_f64() * 1000.0;
            CONTEXT.with(|s| s.borrow_mut().last_mut().unwrap().running_time_ms = Some(elapsed));
            out
        });
        emit(&stack.into_inner().pop().unwrap());
        result
    }
}

fn emit(block: &Block) {
    if cfg!(feature = "report-to-stderr") {
        if let Ok(line) = serde_json::to_string(block) {
            eprintln!("{}", line);
        }
    }
}

/// Simple stopwatch for ad-hoc timings outside of a `measure` block.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Timer {
        Timer { start: Instant::now() }
    }

    pub fn restart(&mut self) {
        self.start = Instant::now();
    }

    pub fn get_passed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn report_passed_ms(&self) {
        eprintln!("{}ms", self.get_passed_ms());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_returns_inner_value() {
        let x = measure("test-block", || {
            report("answer", 42);
            2 + 2
        });
        assert_eq!(x, 4);
    }

    #[test]
    fn suppressed_block_still_runs_closure() {
        let _guard = block_reporting();
        let x = measure("suppressed", || 7);
        assert_eq!(x, 7);
    }
}

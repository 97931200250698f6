//! Step executors
//!
//! An executor maps elapsed run time onto the step list: which steps are
//! active, how far along each one is, and which lifecycle hooks fire. The
//! sequential executor plays steps one after another; the parallel one gives
//! every step its own delay-relative timeline.

use crate::error::Result;
use crate::parallel::ParallelExecutor;
use crate::sequential::SequentialExecutor;
use crate::step::Step;
use crate::transform::TransformSink;

/// Position of a run after an executor has processed one elapsed time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Advance {
    pub current_step_index: usize,
    /// Run-level progress (0.0 to 1.0)
    pub progress: f32,
    /// Every step has completed
    pub finished: bool,
}

pub trait StepExecutor {
    /// Total run duration in milliseconds
    fn total_duration_ms(&self) -> f64;

    /// Forget all per-step bookkeeping (new run or loop restart)
    fn reset(&mut self);

    /// Move bookkeeping to `elapsed_ms` without firing any hook
    fn seek(&mut self, steps: &[Step], elapsed_ms: f64) -> Advance;

    /// Process one frame: fire transition hooks, then render active steps
    fn advance(
        &mut self,
        steps: &mut [Step],
        elapsed_ms: f64,
        sink: &mut dyn TransformSink,
    ) -> Result<Advance>;
}

/// Build the executor selected by the run configuration
pub fn executor_for(steps: &[Step], parallel: bool) -> Box<dyn StepExecutor> {
    if parallel {
        Box::new(ParallelExecutor::new(steps))
    } else {
        Box::new(SequentialExecutor::new(steps))
    }
}

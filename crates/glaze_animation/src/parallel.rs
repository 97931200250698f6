//! Parallel execution: every step runs on its own timeline
//!
//! All steps share the run's elapsed time; a step becomes active once its
//! delay has passed and finishes after its own duration. "Parallel" refers
//! to overlapping logical timelines inside one frame, not to threads.

use smallvec::{smallvec, SmallVec};

use crate::error::Result;
use crate::executor::{Advance, StepExecutor};
use crate::step::Step;
use crate::transform::TransformSink;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Timeline {
    started: bool,
    completed: bool,
}

#[derive(Clone, Debug)]
pub struct ParallelExecutor {
    total_ms: f64,
    timelines: SmallVec<[Timeline; 8]>,
}

impl ParallelExecutor {
    pub fn new(steps: &[Step]) -> Self {
        Self {
            total_ms: steps.iter().map(Step::span_ms).fold(0.0, f64::max),
            timelines: smallvec![Timeline::default(); steps.len()],
        }
    }

    /// Number of steps whose `on_complete` has fired this run
    pub fn completed_count(&self) -> usize {
        self.timelines.iter().filter(|t| t.completed).count()
    }

    /// First step still running, or the last step once all have completed
    fn current_step_index(&self) -> usize {
        self.timelines
            .iter()
            .position(|t| !t.completed)
            .unwrap_or(self.timelines.len().saturating_sub(1))
    }
}

impl StepExecutor for ParallelExecutor {
    fn total_duration_ms(&self) -> f64 {
        self.total_ms
    }

    fn reset(&mut self) {
        self.timelines.fill(Timeline::default());
    }

    fn seek(&mut self, steps: &[Step], elapsed_ms: f64) -> Advance {
        let mut progress: f32 = 0.0;
        for (step, timeline) in steps.iter().zip(self.timelines.iter_mut()) {
            let local = step.local_progress(elapsed_ms);
            timeline.started = elapsed_ms >= f64::from(step.delay_ms());
            timeline.completed = timeline.started && local >= 1.0;
            progress = progress.max(local);
        }

        Advance {
            current_step_index: self.current_step_index(),
            progress,
            finished: false,
        }
    }

    fn advance(
        &mut self,
        steps: &mut [Step],
        elapsed_ms: f64,
        sink: &mut dyn TransformSink,
    ) -> Result<Advance> {
        let mut progress: f32 = 0.0;

        for (step, timeline) in steps.iter_mut().zip(self.timelines.iter_mut()) {
            if elapsed_ms < f64::from(step.delay_ms()) {
                continue;
            }

            if !timeline.started {
                timeline.started = true;
                step.fire_start()?;
            }

            let local = step.local_progress(elapsed_ms);
            progress = progress.max(local);
            if timeline.completed {
                continue;
            }

            step.render(local, sink)?;
            if local >= 1.0 {
                timeline.completed = true;
                step.fire_complete()?;
            }
        }

        let finished = self.timelines.iter().all(|t| t.completed);
        Ok(Advance {
            current_step_index: self.current_step_index(),
            progress: if finished { 1.0 } else { progress },
            finished,
        })
    }
}

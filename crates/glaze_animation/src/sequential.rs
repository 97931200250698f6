//! Sequential execution: steps play one after another

use crate::error::Result;
use crate::executor::{Advance, StepExecutor};
use crate::step::Step;
use crate::transform::TransformSink;

/// Plays steps back to back; each step's slot is its delay plus duration.
#[derive(Clone, Debug)]
pub struct SequentialExecutor {
    total_ms: f64,
    /// Step active on the last processed frame (`None` before the first)
    previous_step_index: Option<usize>,
    /// Final `on_complete` already fired for this run
    finished: bool,
}

impl SequentialExecutor {
    pub fn new(steps: &[Step]) -> Self {
        Self {
            total_ms: steps.iter().map(Step::span_ms).sum(),
            previous_step_index: None,
            finished: false,
        }
    }

    /// Active step index and the offset into its slot at `elapsed_ms`.
    ///
    /// `None` once `elapsed_ms` reaches the end of the last slot.
    pub fn locate(steps: &[Step], elapsed_ms: f64) -> Option<(usize, f64)> {
        let mut slot_start = 0.0;
        for (index, step) in steps.iter().enumerate() {
            let slot_end = slot_start + step.span_ms();
            if elapsed_ms < slot_end {
                return Some((index, elapsed_ms - slot_start));
            }
            slot_start = slot_end;
        }
        None
    }

    pub fn previous_step_index(&self) -> Option<usize> {
        self.previous_step_index
    }

    fn run_progress(&self, elapsed_ms: f64) -> f32 {
        if self.total_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.total_ms).clamp(0.0, 1.0) as f32
    }

    /// Fire the complete/start pairs between the previous step and `index`.
    ///
    /// Moving backwards (only possible after a seek) fires nothing.
    fn enter(&mut self, steps: &mut [Step], index: usize) -> Result<()> {
        let mut current = match self.previous_step_index {
            Some(previous) => previous,
            None => {
                steps[0].fire_start()?;
                self.previous_step_index = Some(0);
                0
            }
        };

        while current < index {
            steps[current].fire_complete()?;
            current += 1;
            self.previous_step_index = Some(current);
            steps[current].fire_start()?;
        }

        self.previous_step_index = Some(index);
        Ok(())
    }
}

impl StepExecutor for SequentialExecutor {
    fn total_duration_ms(&self) -> f64 {
        self.total_ms
    }

    fn reset(&mut self) {
        self.previous_step_index = None;
        self.finished = false;
    }

    fn seek(&mut self, steps: &[Step], elapsed_ms: f64) -> Advance {
        self.finished = false;
        if steps.is_empty() {
            self.previous_step_index = None;
            return Advance {
                current_step_index: 0,
                progress: 0.0,
                finished: false,
            };
        }

        let index = Self::locate(steps, elapsed_ms)
            .map(|(index, _)| index)
            .unwrap_or(steps.len() - 1);
        self.previous_step_index = Some(index);

        Advance {
            current_step_index: index,
            progress: self.run_progress(elapsed_ms),
            finished: false,
        }
    }

    fn advance(
        &mut self,
        steps: &mut [Step],
        elapsed_ms: f64,
        sink: &mut dyn TransformSink,
    ) -> Result<Advance> {
        let Some(last) = steps.len().checked_sub(1) else {
            return Ok(Advance {
                current_step_index: 0,
                progress: 1.0,
                finished: true,
            });
        };

        if let Some((index, offset)) = Self::locate(steps, elapsed_ms) {
            self.enter(steps, index)?;
            let step = &mut steps[index];
            let local = step.local_progress(offset);
            step.render(local, sink)?;

            return Ok(Advance {
                current_step_index: index,
                progress: self.run_progress(elapsed_ms),
                finished: false,
            });
        }

        self.enter(steps, last)?;
        steps[last].render(1.0, sink)?;
        if !self.finished {
            self.finished = true;
            steps[last].fire_complete()?;
        }

        Ok(Advance {
            current_step_index: last,
            progress: 1.0,
            finished: true,
        })
    }
}

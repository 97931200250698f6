//! Animation presets and step-list builders
//!
//! Pure data constructors: nothing here runs on its own. Presets return
//! single [`Step`]s or whole [`Sequence`]s that callers hand to an
//! [`OrchestratorBuilder`].
//!
//! Step targets are deltas from the element's resting state, so presets
//! describe "move by", "fade to" and "scale to" rather than "from" motions.

use crate::config::RunConfig;
use crate::controller::OrchestratorBuilder;
use crate::easing::Easing;
use crate::step::Step;
use crate::transform::TransformTarget;

/// A step list together with the config it is meant to run with
#[derive(Debug, Default)]
pub struct Sequence {
    pub steps: Vec<Step>,
    pub config: RunConfig,
}

impl Sequence {
    pub fn new(steps: Vec<Step>, config: RunConfig) -> Self {
        Self { steps, config }
    }

    /// Total duration the sequence will report once built
    pub fn total_duration_ms(&self) -> f64 {
        let spans = self.steps.iter().map(Step::span_ms);
        if self.config.parallel {
            spans.fold(0.0, f64::max)
        } else {
            spans.sum()
        }
    }
}

impl From<Sequence> for OrchestratorBuilder {
    fn from(sequence: Sequence) -> Self {
        OrchestratorBuilder::new(sequence.steps).config(sequence.config)
    }
}

/// Pre-built steps for common patterns
pub struct AnimationPreset;

impl AnimationPreset {
    // ========================================================================
    // Fade / scale
    // ========================================================================

    /// Fade from transparent to opaque
    pub fn fade_in(id: &str, duration_ms: u32) -> Step {
        Step::new(id, duration_ms)
            .easing(Easing::EaseOut)
            .transform(TransformTarget::opacity(1.0))
    }

    /// Grow from the resting size to `factor`
    pub fn scale_to(id: &str, duration_ms: u32, factor: f32) -> Step {
        Step::new(id, duration_ms)
            .easing(Easing::EaseOutCubic)
            .transform(TransformTarget::scale(factor))
    }

    /// Scale up with a slight overshoot past 1.1 before settling
    pub fn pop(id: &str, duration_ms: u32) -> Step {
        Step::new(id, duration_ms)
            .easing(Easing::CubicBezier(0.0, 1.4, 1.1, 1.0))
            .transform(TransformTarget::scale(1.1).with_opacity(1.0))
    }

    /// Gentle swell toward `factor`; pair with a looped config for a heartbeat
    pub fn pulse(id: &str, duration_ms: u32, factor: f32) -> Step {
        Step::new(id, duration_ms)
            .easing(Easing::EaseInOut)
            .transform(TransformTarget::scale(factor))
    }

    // ========================================================================
    // Motion
    // ========================================================================

    /// Move by (dx, dy)
    pub fn slide(id: &str, duration_ms: u32, dx: f32, dy: f32) -> Step {
        Step::new(id, duration_ms)
            .easing(Easing::EaseOutCubic)
            .transform(TransformTarget::translate(dx, dy))
    }

    /// Rise by `distance` while fading in (card entrance)
    pub fn lift_in(id: &str, duration_ms: u32, distance: f32) -> Step {
        Step::new(id, duration_ms)
            .easing(Easing::EaseOut)
            .transform(TransformTarget::translate(0.0, -distance).with_opacity(1.0))
    }

    /// Fall by `distance` while fading in
    pub fn drop_in(id: &str, duration_ms: u32, distance: f32) -> Step {
        Step::new(id, duration_ms)
            .easing(Easing::EaseInOut)
            .transform(TransformTarget::translate(0.0, distance).with_opacity(1.0))
    }

    /// One full turn
    pub fn spin(id: &str, duration_ms: u32) -> Step {
        Step::new(id, duration_ms).transform(TransformTarget::rotation(360.0))
    }

    // ========================================================================
    // Canned sequences
    // ========================================================================

    /// Lift every id in, each starting `stagger_ms` after the previous one
    pub fn entrance_cascade(ids: &[&str], duration_ms: u32, stagger_ms: u32) -> Sequence {
        let steps = ids
            .iter()
            .map(|id| Self::lift_in(id, duration_ms, 16.0))
            .collect();
        in_parallel(staggered(steps, stagger_ms))
    }

    /// Alternating horizontal nudges of decreasing amplitude
    pub fn attention_shake(id: &str, intensity: f32) -> Sequence {
        let steps = [1.0_f32, -1.0, 0.6, -0.6, 0.2]
            .into_iter()
            .enumerate()
            .map(|(n, factor)| {
                Step::new(format!("{id}-shake-{n}"), 60)
                    .easing(Easing::EaseInOut)
                    .transform(TransformTarget::translate(intensity * factor, 0.0))
            })
            .collect();
        Sequence::new(steps, RunConfig::default())
    }

    /// A slow, endless rotation (loading indicators)
    pub fn spinner(id: &str, period_ms: u32) -> Sequence {
        Sequence::new(
            vec![Self::spin(id, period_ms)],
            RunConfig::default().auto_play().looped(),
        )
    }
}

/// Offset each step's delay by `index * stagger_ms`
pub fn staggered(steps: Vec<Step>, stagger_ms: u32) -> Vec<Step> {
    steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| {
            let offset = stagger_ms.saturating_mul(index as u32);
            let delay = step.delay_ms().saturating_add(offset);
            step.delay(delay)
        })
        .collect()
}

/// Insert `gap_ms` of extra delay before every step but the first
pub fn sequenced(steps: Vec<Step>, gap_ms: u32) -> Sequence {
    let steps = steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| match index {
            0 => step,
            _ => {
                let delay = step.delay_ms().saturating_add(gap_ms);
                step.delay(delay)
            }
        })
        .collect();
    Sequence::new(steps, RunConfig::default())
}

/// Wrap steps into a sequence that runs them on parallel timelines
pub fn in_parallel(steps: Vec<Step>) -> Sequence {
    Sequence::new(steps, RunConfig::default().parallel())
}

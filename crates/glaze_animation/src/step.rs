//! Animation steps
//!
//! A [`Step`] is one timed unit of a run: it waits `delay_ms`, then moves its
//! [`TransformTarget`] from zero to full progress over `duration_ms`.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::easing::Easing;
use crate::error::{AnimationError, HookKind, Result};
use crate::transform::{StyleOverrides, TransformSink, TransformTarget};

/// Lifecycle hook without arguments (`on_start`, `on_complete`)
pub type Hook = Box<dyn FnMut() -> anyhow::Result<()>>;

/// Per-frame hook receiving the eased step progress
pub type UpdateHook = Box<dyn FnMut(f32) -> anyhow::Result<()>>;

/// One timed unit of animation
pub struct Step {
    id: String,
    duration_ms: u32,
    delay_ms: u32,
    easing: Easing,
    transform: TransformTarget,
    style: StyleOverrides,
    on_start: Option<Hook>,
    on_update: Option<UpdateHook>,
    on_complete: Option<Hook>,
}

impl Step {
    /// Create a step with linear easing, no delay and no target
    pub fn new(id: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            id: id.into(),
            duration_ms,
            delay_ms: 0,
            easing: Easing::Linear,
            transform: TransformTarget::default(),
            style: StyleOverrides::new(),
            on_start: None,
            on_update: None,
            on_complete: None,
        }
    }

    /// Set delay before the step starts moving
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the easing curve (accepts an [`Easing`] or a spec string)
    pub fn easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    /// Set the target transform
    pub fn transform(mut self, transform: TransformTarget) -> Self {
        self.transform = transform;
        self
    }

    /// Add a style override applied at full progress
    pub fn style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// Replace all style overrides
    pub fn styles(mut self, style: StyleOverrides) -> Self {
        self.style = style;
        self
    }

    pub fn on_start<F: FnMut() -> anyhow::Result<()> + 'static>(mut self, hook: F) -> Self {
        self.on_start = Some(Box::new(hook));
        self
    }

    pub fn on_update<F: FnMut(f32) -> anyhow::Result<()> + 'static>(mut self, hook: F) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn on_complete<F: FnMut() -> anyhow::Result<()> + 'static>(mut self, hook: F) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn easing_curve(&self) -> Easing {
        self.easing
    }

    pub fn target(&self) -> &TransformTarget {
        &self.transform
    }

    pub fn style_overrides(&self) -> &StyleOverrides {
        &self.style
    }

    /// Delay plus duration, in milliseconds
    pub fn span_ms(&self) -> f64 {
        f64::from(self.delay_ms) + f64::from(self.duration_ms)
    }

    /// Raw progress `offset_ms` into this step's own timeline.
    ///
    /// Zero for the whole delay window, then 0 → 1 over the duration.
    pub fn local_progress(&self, offset_ms: f64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let moving = offset_ms - f64::from(self.delay_ms);
        (moving / f64::from(self.duration_ms)).clamp(0.0, 1.0) as f32
    }

    pub(crate) fn fire_start(&mut self) -> Result<()> {
        tracing::trace!(step = %self.id, "step started");
        match self.on_start.as_mut() {
            Some(hook) => hook().map_err(|source| self.hook_error(HookKind::Start, source)),
            None => Ok(()),
        }
    }

    pub(crate) fn fire_complete(&mut self) -> Result<()> {
        tracing::trace!(step = %self.id, "step completed");
        match self.on_complete.as_mut() {
            Some(hook) => hook().map_err(|source| self.hook_error(HookKind::Complete, source)),
            None => Ok(()),
        }
    }

    /// Ease `progress`, notify `on_update` and hand the snapshot to the sink.
    pub(crate) fn render(&mut self, progress: f32, sink: &mut dyn TransformSink) -> Result<()> {
        let eased = self.easing.apply(progress);
        if let Some(hook) = self.on_update.as_mut() {
            hook(eased).map_err(|source| self.hook_error(HookKind::Update, source))?;
        }

        let style = (progress >= 1.0).then_some(&self.style);
        sink.apply_transform(&self.id, &self.transform.interpolate(eased), style);
        Ok(())
    }

    fn hook_error(&self, hook: HookKind, source: anyhow::Error) -> AnimationError {
        AnimationError::Hook {
            step: self.id.clone(),
            hook,
            source,
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("duration_ms", &self.duration_ms)
            .field("delay_ms", &self.delay_ms)
            .field("easing", &self.easing)
            .field("transform", &self.transform)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Reject zero durations and duplicate ids
pub(crate) fn validate(steps: &[Step]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for step in steps {
        if step.duration_ms == 0 {
            return Err(AnimationError::InvalidDuration {
                id: step.id.clone(),
            });
        }
        if !seen.insert(step.id.as_str()) {
            return Err(AnimationError::DuplicateStepId(step.id.clone()));
        }
    }
    Ok(())
}

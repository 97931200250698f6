//! Playback controller
//!
//! [`Orchestrator`] owns the step list, the [`Clock`] and the selected
//! executor, and exposes play/pause/stop/seek. Playback states follow a
//! small statechart:
//!
//! ```text
//!            play              pause
//!   Idle ──────────▶ Playing ◀────────▶ Paused
//!    ▲                │  ▲      play
//!    │           finish  │ loop / play
//!    │ stop           ▼  │
//!    └────────────── Completed
//! ```
//!
//! `stop` returns to `Idle` from every state.
//!
//! The host drives time by calling [`Orchestrator::tick`] from its frame
//! callback. Within a tick all step hooks fire before the [`RunState`]
//! snapshot is published to observers. Hook errors are not caught: they
//! propagate out of `tick`, and the run is left wherever the failing hook
//! interrupted it.
//!
//! `seek` moves the run without replaying the `on_start`/`on_complete` hooks
//! of the steps it skips over.

use glaze_core::fsm::StateMachine;

use crate::clock::{Clock, FrameSource, ManualFrames};
use crate::config::{validate_speed, RunConfig};
use crate::error::Result;
use crate::executor::{executor_for, Advance, StepExecutor};
use crate::step::{self, Step};
use crate::transform::{NullSink, TransformSink};

/// Playback states of an orchestrator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
    Completed,
}

/// Events driving [`PlaybackState`] transitions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    Play,
    Pause,
    Finish,
    Loop,
    Stop,
}

/// Observable snapshot of a run, refreshed every tick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunState {
    pub is_playing: bool,
    pub is_paused: bool,
    pub current_step_index: usize,
    pub total_steps: usize,
    /// Run-level progress (0.0 to 1.0)
    pub progress: f32,
    pub elapsed_ms: f64,
    pub total_duration_ms: f64,
}

/// Callback receiving the published [`RunState`]
pub type StateObserver = Box<dyn FnMut(&RunState)>;

fn playback_machine() -> StateMachine<PlaybackState, PlaybackEvent> {
    use PlaybackEvent::*;
    use PlaybackState::*;

    StateMachine::builder(Idle)
        .on_any(&[Idle, Paused, Completed], Play, Playing)
        .on(Playing, Pause, Paused)
        .on(Playing, Finish, Completed)
        .on(Completed, Loop, Playing)
        .on_any(&[Idle, Playing, Paused, Completed], Stop, Idle)
        .build()
}

/// Builder for [`Orchestrator`]
///
/// # Example
///
/// ```
/// use glaze_animation::{OrchestratorBuilder, RunConfig, Step, TransformTarget};
///
/// let mut orchestrator = OrchestratorBuilder::new(vec![
///     Step::new("fade", 300).transform(TransformTarget::opacity(1.0)),
///     Step::new("lift", 200).easing("ease-out"),
/// ])
/// .config(RunConfig::new().auto_play())
/// .build()
/// .unwrap();
///
/// orchestrator.tick(0.0).unwrap();
/// let state = orchestrator.tick(400.0).unwrap();
/// assert_eq!(state.current_step_index, 1);
/// ```
pub struct OrchestratorBuilder {
    steps: Vec<Step>,
    config: RunConfig,
    sink: Option<Box<dyn TransformSink>>,
    frames: Option<Box<dyn FrameSource>>,
}

impl OrchestratorBuilder {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            config: RunConfig::default(),
            sink: None,
            frames: None,
        }
    }

    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Capability that paints transforms. Defaults to [`NullSink`].
    pub fn sink(mut self, sink: impl TransformSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Frame registration capability. Defaults to a private [`ManualFrames`].
    pub fn frames(mut self, frames: impl FrameSource + 'static) -> Self {
        self.frames = Some(Box::new(frames));
        self
    }

    /// Validate the steps and config, then start playing if `auto_play` is
    /// set and `paused` is not.
    pub fn build(self) -> Result<Orchestrator> {
        step::validate(&self.steps)?;
        self.config.validate()?;

        if self.config.reverse {
            tracing::warn!("reverse playback is reserved and has no effect");
        }

        let executor = executor_for(&self.steps, self.config.parallel);
        let frames = self
            .frames
            .unwrap_or_else(|| Box::new(ManualFrames::new()));
        let state = RunState {
            total_steps: self.steps.len(),
            total_duration_ms: executor.total_duration_ms(),
            ..Default::default()
        };

        let mut orchestrator = Orchestrator {
            clock: Clock::new(frames, self.config.speed),
            steps: self.steps,
            config: self.config,
            executor,
            sink: self.sink.unwrap_or_else(|| Box::new(NullSink)),
            machine: playback_machine(),
            state,
            observers: Vec::new(),
        };

        tracing::debug!(
            steps = orchestrator.state.total_steps,
            total_ms = orchestrator.state.total_duration_ms,
            parallel = orchestrator.config.parallel,
            "orchestrator built"
        );

        if orchestrator.config.auto_play && !orchestrator.config.paused {
            orchestrator.play();
        }

        Ok(orchestrator)
    }
}

/// Plays a step list against a host clock
pub struct Orchestrator {
    steps: Vec<Step>,
    config: RunConfig,
    clock: Clock,
    executor: Box<dyn StepExecutor>,
    sink: Box<dyn TransformSink>,
    machine: StateMachine<PlaybackState, PlaybackEvent>,
    state: RunState,
    observers: Vec<StateObserver>,
}

impl Orchestrator {
    pub fn builder(steps: Vec<Step>) -> OrchestratorBuilder {
        OrchestratorBuilder::new(steps)
    }

    /// Start or resume playback.
    ///
    /// From `Paused` the run continues where it stopped. From `Idle` or
    /// `Completed` per-step bookkeeping is reset and the run starts at the
    /// current position (zero unless a seek moved it), or from zero if that
    /// position is the end. No-op while playing.
    pub fn play(&mut self) {
        let from = self.machine.current_state();
        match from {
            PlaybackState::Playing => return,
            PlaybackState::Paused => {
                self.machine.send(PlaybackEvent::Play);
                self.clock.resume();
            }
            PlaybackState::Idle | PlaybackState::Completed => {
                self.machine.send(PlaybackEvent::Play);
                self.executor.reset();
                self.clock.start();

                let total = self.executor.total_duration_ms();
                let resume_at = self.state.elapsed_ms;
                if resume_at > 0.0 && resume_at < total {
                    self.reposition(resume_at);
                } else {
                    self.rewind();
                }
            }
        }

        self.config.paused = false;
        self.sync_flags();
        tracing::debug!(?from, elapsed_ms = self.state.elapsed_ms, "play");
    }

    /// Freeze playback, keeping elapsed time. No-op unless playing.
    pub fn pause(&mut self) {
        if !self.machine.is_in(PlaybackState::Playing) {
            return;
        }
        self.machine.send(PlaybackEvent::Pause);
        self.clock.pause();
        self.sync_flags();
        tracing::debug!(elapsed_ms = self.state.elapsed_ms, "pause");
    }

    /// Cancel the run, rewind to zero and re-apply the first step's
    /// zero-progress transform.
    pub fn stop(&mut self) {
        self.machine.send(PlaybackEvent::Stop);
        self.clock.reset();
        self.executor.reset();
        self.rewind();
        self.sync_flags();

        if let Some(first) = self.steps.first() {
            let initial = first.target().interpolate(first.easing_curve().apply(0.0));
            self.sink.apply_transform(first.id(), &initial, None);
        }
        tracing::debug!("stop");
    }

    /// Jump to `progress` (clamped to 0.0..=1.0) of the total duration.
    ///
    /// Lifecycle hooks of skipped steps are not replayed; the step containing
    /// the new position is treated as already started.
    pub fn seek(&mut self, progress: f32) {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let elapsed = f64::from(progress) * self.executor.total_duration_ms();
        self.reposition(elapsed);
        tracing::debug!(progress, elapsed_ms = elapsed, "seek");
    }

    /// Process one host frame at `timestamp_ms`.
    ///
    /// Frames delivered while no frame is registered (idle, paused, stopped
    /// or completed) are ignored and return the current snapshot.
    pub fn tick(&mut self, timestamp_ms: f64) -> Result<&RunState> {
        if !self.clock.take_frame() || !self.machine.is_in(PlaybackState::Playing) {
            return Ok(&self.state);
        }

        if self.config.paused {
            self.pause();
            self.publish();
            return Ok(&self.state);
        }

        self.clock.request_frame();
        self.clock.set_speed(self.config.speed);

        let total = self.executor.total_duration_ms();
        let elapsed = self.clock.tick(timestamp_ms).min(total);
        let advance = self
            .executor
            .advance(&mut self.steps, elapsed, self.sink.as_mut())?;

        self.state.elapsed_ms = elapsed;
        self.apply_position(advance);

        if advance.finished {
            self.finish(timestamp_ms);
        }

        self.sync_flags();
        tracing::trace!(
            elapsed_ms = self.state.elapsed_ms,
            progress = self.state.progress,
            step = self.state.current_step_index,
            "tick"
        );

        self.publish();
        Ok(&self.state)
    }

    /// Register an observer called with the snapshot after every tick
    pub fn subscribe<F: FnMut(&RunState) + 'static>(&mut self, observer: F) {
        self.observers.push(Box::new(observer));
    }

    /// Change the speed multiplier; takes effect on the next tick
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        validate_speed(speed)?;
        self.config.speed = speed;
        Ok(())
    }

    /// Request a pause (applied on the next tick) or resume a paused run
    pub fn set_paused(&mut self, paused: bool) {
        self.config.paused = paused;
        if !paused && self.machine.is_in(PlaybackState::Paused) {
            self.play();
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.machine.current_state()
    }

    /// Playback transitions taken so far
    pub fn transitions(&self) -> &[(PlaybackState, PlaybackEvent, PlaybackState)] {
        self.machine.history()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn total_duration_ms(&self) -> f64 {
        self.executor.total_duration_ms()
    }

    /// Whether the orchestrator is waiting for a frame
    pub fn wants_frame(&self) -> bool {
        self.clock.has_pending_frame()
    }

    fn finish(&mut self, timestamp_ms: f64) {
        self.machine.send(PlaybackEvent::Finish);

        if self.config.looping && self.executor.total_duration_ms() > 0.0 {
            self.machine.send(PlaybackEvent::Loop);
            self.executor.reset();
            self.clock.restart_at(timestamp_ms);
            self.rewind();
            tracing::debug!("run looped");
        } else {
            self.clock.pause();
            tracing::debug!(elapsed_ms = self.state.elapsed_ms, "run completed");
        }
    }

    fn reposition(&mut self, elapsed_ms: f64) {
        self.clock.seek(elapsed_ms);
        let position = self.executor.seek(&self.steps, elapsed_ms);
        self.state.elapsed_ms = elapsed_ms;
        self.apply_position(position);
    }

    fn rewind(&mut self) {
        self.state.elapsed_ms = 0.0;
        self.state.progress = 0.0;
        self.state.current_step_index = 0;
    }

    fn apply_position(&mut self, position: Advance) {
        self.state.progress = position.progress;
        self.state.current_step_index = position.current_step_index;
    }

    fn publish(&mut self) {
        for observer in &mut self.observers {
            observer(&self.state);
        }
    }

    fn sync_flags(&mut self) {
        self.state.is_playing = self.machine.is_in(PlaybackState::Playing);
        self.state.is_paused = self.machine.is_in(PlaybackState::Paused);
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("steps", &self.steps)
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("playback", &self.machine.current_state())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

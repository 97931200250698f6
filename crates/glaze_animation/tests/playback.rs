//! Integration tests for orchestrator playback
//!
//! These drive an [`Orchestrator`] the way a host would: a shared
//! [`ManualFrames`] stands in for the frame loop and a recording sink stands
//! in for the element being painted.

use glaze_animation::{
    AnimationError, HookKind, ManualFrames, Orchestrator, PlaybackEvent, PlaybackState, RunConfig,
    Step, StyleOverrides, TransformSink, TransformSnapshot, TransformTarget,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug)]
struct Applied {
    step: String,
    transform: TransformSnapshot,
    styled: bool,
}

#[derive(Clone, Default)]
struct Recorder {
    applied: Rc<RefCell<Vec<Applied>>>,
}

impl Recorder {
    fn len(&self) -> usize {
        self.applied.borrow().len()
    }

    fn last(&self) -> Applied {
        self.applied.borrow().last().cloned().unwrap()
    }

    fn for_step(&self, step: &str) -> Vec<Applied> {
        self.applied
            .borrow()
            .iter()
            .filter(|a| a.step == step)
            .cloned()
            .collect()
    }
}

impl TransformSink for Recorder {
    fn apply_transform(
        &mut self,
        step_id: &str,
        transform: &TransformSnapshot,
        style: Option<&StyleOverrides>,
    ) {
        self.applied.borrow_mut().push(Applied {
            step: step_id.to_string(),
            transform: *transform,
            styled: style.is_some(),
        });
    }
}

type Log = Rc<RefCell<Vec<String>>>;

fn lifecycle_step(id: &str, duration_ms: u32, log: &Log) -> Step {
    let (start, complete) = (log.clone(), log.clone());
    let (s, c) = (id.to_string(), id.to_string());
    Step::new(id, duration_ms)
        .on_start(move || {
            start.borrow_mut().push(format!("start:{s}"));
            Ok(())
        })
        .on_complete(move || {
            complete.borrow_mut().push(format!("complete:{c}"));
            Ok(())
        })
}

fn single(duration_ms: u32, config: RunConfig) -> Orchestrator {
    Orchestrator::builder(vec![Step::new("only", duration_ms)])
        .config(config)
        .build()
        .unwrap()
}

/// Three back-to-back steps: halfway through the run is halfway through the
/// second step
#[test]
fn test_sequential_midpoint_lands_in_second_step() {
    let recorder = Recorder::default();
    let slide = TransformTarget::translate(100.0, 0.0);
    let mut orchestrator = Orchestrator::builder(vec![
        Step::new("a", 300).transform(slide),
        Step::new("b", 300).transform(slide),
        Step::new("c", 300).transform(slide),
    ])
    .config(RunConfig::new().auto_play())
    .sink(recorder.clone())
    .build()
    .unwrap();

    assert_eq!(orchestrator.total_duration_ms(), 900.0);

    orchestrator.tick(0.0).unwrap();
    let state = orchestrator.tick(450.0).unwrap().clone();

    assert_eq!(state.current_step_index, 1);
    assert_eq!(state.progress, 0.5);
    assert_eq!(state.elapsed_ms, 450.0);
    assert!(state.is_playing);

    let last = recorder.last();
    assert_eq!(last.step, "b");
    assert_eq!(last.transform.resolved_translate(), (50.0, 0.0));
    assert!(!last.styled);
}

/// A delayed parallel step stays untouched during its delay window
#[test]
fn test_parallel_delay_window() {
    let recorder = Recorder::default();
    let slide = TransformTarget::translate(100.0, 0.0);
    let mut orchestrator = Orchestrator::builder(vec![
        Step::new("a", 500).transform(slide),
        Step::new("b", 500).delay(200).transform(slide),
    ])
    .config(RunConfig::new().auto_play().parallel())
    .sink(recorder.clone())
    .build()
    .unwrap();

    assert_eq!(orchestrator.total_duration_ms(), 700.0);

    orchestrator.tick(0.0).unwrap();
    orchestrator.tick(150.0).unwrap();
    assert!(recorder.for_step("b").is_empty());

    let state = orchestrator.tick(250.0).unwrap().clone();
    assert_eq!(state.progress, 0.5);
    assert_eq!(state.current_step_index, 0);

    let a = recorder.for_step("a");
    assert_eq!(a.last().unwrap().transform.resolved_translate(), (50.0, 0.0));
    let b = recorder.for_step("b");
    assert_eq!(b.len(), 1);
    assert!((b[0].transform.resolved_translate().0 - 10.0).abs() < 1e-3);

    orchestrator.tick(700.0).unwrap();
    assert_eq!(orchestrator.playback_state(), PlaybackState::Completed);
    assert_eq!(orchestrator.state().progress, 1.0);
}

/// An empty step list completes on the first frame without touching anything
#[test]
fn test_empty_run_completes_immediately() {
    let recorder = Recorder::default();
    let mut orchestrator = Orchestrator::builder(Vec::new())
        .config(RunConfig::new().auto_play().looped())
        .sink(recorder.clone())
        .build()
        .unwrap();

    assert_eq!(orchestrator.total_duration_ms(), 0.0);

    let state = orchestrator.tick(0.0).unwrap().clone();
    assert!(!state.is_playing);
    assert_eq!(state.total_duration_ms, 0.0);
    assert_eq!(state.progress, 1.0);
    assert_eq!(orchestrator.playback_state(), PlaybackState::Completed);
    assert!(!orchestrator.wants_frame());
    assert_eq!(recorder.len(), 0);
}

#[test]
fn test_loop_restarts_from_zero() {
    let log = Log::default();
    let mut orchestrator = Orchestrator::builder(vec![lifecycle_step("spin", 100, &log)])
        .config(RunConfig::new().auto_play().looped())
        .build()
        .unwrap();

    orchestrator.tick(0.0).unwrap();
    let state = orchestrator.tick(100.0).unwrap().clone();
    assert!(state.is_playing);
    assert_eq!(state.elapsed_ms, 0.0);
    assert_eq!(state.current_step_index, 0);
    assert!(orchestrator.wants_frame());

    let state = orchestrator.tick(150.0).unwrap().clone();
    assert_eq!(state.elapsed_ms, 50.0);
    assert_eq!(
        *log.borrow(),
        vec!["start:spin", "complete:spin", "start:spin"]
    );

    let history = orchestrator.transitions();
    assert!(history.contains(&(
        PlaybackState::Playing,
        PlaybackEvent::Finish,
        PlaybackState::Completed
    )));
    assert!(history.contains(&(
        PlaybackState::Completed,
        PlaybackEvent::Loop,
        PlaybackState::Playing
    )));
}

#[test]
fn test_pause_is_idempotent_and_resume_keeps_elapsed() {
    let frames = ManualFrames::new();
    let mut orchestrator = Orchestrator::builder(vec![Step::new("only", 1000)])
        .config(RunConfig::new().auto_play())
        .frames(frames.clone())
        .build()
        .unwrap();

    orchestrator.tick(0.0).unwrap();
    orchestrator.tick(100.0).unwrap();

    orchestrator.pause();
    let after_first = orchestrator.state().clone();
    orchestrator.pause();
    assert_eq!(*orchestrator.state(), after_first);
    assert_eq!(orchestrator.playback_state(), PlaybackState::Paused);
    assert!(orchestrator.state().is_paused);
    assert!(!orchestrator.state().is_playing);
    assert_eq!(frames.pending_count(), 0);
    assert_eq!(frames.cancelled_count(), 1);

    // Frames arriving while paused are ignored
    orchestrator.tick(500.0).unwrap();
    assert_eq!(orchestrator.state().elapsed_ms, 100.0);

    orchestrator.play();
    assert_eq!(frames.pending_count(), 1);
    assert_eq!(orchestrator.tick(600.0).unwrap().elapsed_ms, 100.0);
    assert_eq!(orchestrator.tick(700.0).unwrap().elapsed_ms, 200.0);
}

#[test]
fn test_stop_rewinds_and_reapplies_initial_transform() {
    let recorder = Recorder::default();
    let frames = ManualFrames::new();
    let mut orchestrator = Orchestrator::builder(vec![
        Step::new("fade", 300).transform(TransformTarget::opacity(1.0)),
        Step::new("grow", 300).transform(TransformTarget::scale(1.2)),
    ])
    .config(RunConfig::new().auto_play())
    .sink(recorder.clone())
    .frames(frames.clone())
    .build()
    .unwrap();

    orchestrator.tick(0.0).unwrap();
    orchestrator.tick(450.0).unwrap();
    assert_eq!(recorder.last().step, "grow");

    orchestrator.stop();
    let state = orchestrator.state();
    assert_eq!(orchestrator.playback_state(), PlaybackState::Idle);
    assert!(!state.is_playing && !state.is_paused);
    assert_eq!(state.elapsed_ms, 0.0);
    assert_eq!(state.current_step_index, 0);
    assert_eq!(frames.pending_count(), 0);

    let reset = recorder.last();
    assert_eq!(reset.step, "fade");
    assert_eq!(reset.transform.opacity, Some(0.0));

    // No frame is registered after stop
    let painted = recorder.len();
    orchestrator.tick(500.0).unwrap();
    assert_eq!(recorder.len(), painted);
    assert_eq!(orchestrator.state().elapsed_ms, 0.0);
}

#[test]
fn test_idle_orchestrator_ignores_frames() {
    let log = Log::default();
    let recorder = Recorder::default();
    let mut orchestrator = Orchestrator::builder(vec![lifecycle_step("a", 100, &log)])
        .sink(recorder.clone())
        .build()
        .unwrap();

    assert_eq!(orchestrator.playback_state(), PlaybackState::Idle);
    assert!(!orchestrator.wants_frame());

    orchestrator.tick(0.0).unwrap();
    orchestrator.tick(50.0).unwrap();
    assert!(log.borrow().is_empty());
    assert_eq!(recorder.len(), 0);
}

#[test]
fn test_observers_see_state_after_hooks() {
    let log = Log::default();
    let mut orchestrator = Orchestrator::builder(vec![
        lifecycle_step("a", 100, &log),
        lifecycle_step("b", 100, &log),
    ])
    .config(RunConfig::new().auto_play())
    .build()
    .unwrap();

    let observed = log.clone();
    orchestrator.subscribe(move |state| {
        observed
            .borrow_mut()
            .push(format!("state:{}", state.current_step_index));
    });

    orchestrator.tick(0.0).unwrap();
    orchestrator.tick(150.0).unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["start:a", "state:0", "complete:a", "start:b", "state:1"]
    );
}

/// Seeking does not replay the lifecycle hooks of the steps it skips
#[test]
fn test_seek_skips_lifecycle_hooks() {
    let log = Log::default();
    let mut orchestrator = Orchestrator::builder(vec![
        lifecycle_step("a", 300, &log),
        lifecycle_step("b", 300, &log),
        lifecycle_step("c", 300, &log),
    ])
    .build()
    .unwrap();

    orchestrator.seek(0.5);
    assert_eq!(orchestrator.state().elapsed_ms, 450.0);
    assert_eq!(orchestrator.state().current_step_index, 1);

    orchestrator.play();
    assert_eq!(orchestrator.tick(1000.0).unwrap().elapsed_ms, 450.0);
    assert!(log.borrow().is_empty());

    orchestrator.tick(1150.0).unwrap();
    assert_eq!(*log.borrow(), vec!["complete:b", "start:c"]);
}

#[test]
fn test_seek_clamps_progress() {
    let mut orchestrator = single(400, RunConfig::new());

    orchestrator.seek(2.0);
    assert_eq!(orchestrator.state().elapsed_ms, 400.0);
    orchestrator.seek(-1.0);
    assert_eq!(orchestrator.state().elapsed_ms, 0.0);
    orchestrator.seek(f32::NAN);
    assert_eq!(orchestrator.state().progress, 0.0);
}

#[test]
fn test_speed_change_keeps_elapsed_continuous() {
    let mut orchestrator = single(1000, RunConfig::new().auto_play());

    orchestrator.tick(0.0).unwrap();
    orchestrator.tick(100.0).unwrap();
    orchestrator.set_speed(2.0).unwrap();
    assert_eq!(orchestrator.tick(200.0).unwrap().elapsed_ms, 300.0);

    assert!(matches!(
        orchestrator.set_speed(-1.0),
        Err(AnimationError::InvalidSpeed(_))
    ));
    assert_eq!(orchestrator.config().speed, 2.0);
}

#[test]
fn test_set_paused_applies_on_next_frame() {
    let mut orchestrator = single(1000, RunConfig::new().auto_play());

    orchestrator.tick(0.0).unwrap();
    orchestrator.tick(100.0).unwrap();

    orchestrator.set_paused(true);
    assert_eq!(orchestrator.playback_state(), PlaybackState::Playing);

    let state = orchestrator.tick(200.0).unwrap().clone();
    assert!(state.is_paused);
    assert_eq!(state.elapsed_ms, 100.0);
    assert!(!orchestrator.wants_frame());

    orchestrator.set_paused(false);
    assert_eq!(orchestrator.playback_state(), PlaybackState::Playing);
    orchestrator.tick(300.0).unwrap();
    assert_eq!(orchestrator.tick(400.0).unwrap().elapsed_ms, 200.0);
}

#[test]
fn test_observers_see_pause_applied_on_tick() {
    let mut orchestrator = single(1000, RunConfig::new().auto_play());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let observed = seen.clone();
    orchestrator.subscribe(move |state| observed.borrow_mut().push(state.is_paused));

    orchestrator.tick(0.0).unwrap();
    orchestrator.tick(100.0).unwrap();
    orchestrator.set_paused(true);
    let state = orchestrator.tick(200.0).unwrap().clone();

    assert!(state.is_paused);
    assert_eq!(*seen.borrow(), vec![false, false, true]);

    // Ignored frames publish nothing
    orchestrator.tick(300.0).unwrap();
    assert_eq!(seen.borrow().len(), 3);
}

/// Looping a parallel run restarts every step's timeline together
#[test]
fn test_parallel_loop_restarts_all_timelines() {
    let log = Log::default();
    let mut orchestrator = Orchestrator::builder(vec![
        lifecycle_step("a", 500, &log),
        lifecycle_step("b", 500, &log).delay(200),
    ])
    .config(RunConfig::new().auto_play().parallel().looped())
    .build()
    .unwrap();

    orchestrator.tick(0.0).unwrap();
    orchestrator.tick(250.0).unwrap();

    let state = orchestrator.tick(700.0).unwrap().clone();
    assert!(state.is_playing);
    assert_eq!(state.elapsed_ms, 0.0);
    assert_eq!(state.progress, 0.0);

    let state = orchestrator.tick(800.0).unwrap().clone();
    assert_eq!(state.elapsed_ms, 100.0);
    assert_eq!(state.progress, 0.2);
    assert_eq!(
        *log.borrow(),
        vec!["start:a", "start:b", "complete:a", "complete:b", "start:a"]
    );
}

#[test]
fn test_paused_config_suppresses_auto_play() {
    let mut orchestrator = single(100, RunConfig::new().auto_play().paused());
    assert_eq!(orchestrator.playback_state(), PlaybackState::Idle);
    assert!(!orchestrator.wants_frame());

    orchestrator.play();
    assert!(!orchestrator.config().paused);
    assert!(orchestrator.state().is_playing);
}

#[test]
fn test_play_after_completion_restarts() {
    let log = Log::default();
    let mut orchestrator = Orchestrator::builder(vec![lifecycle_step("once", 100, &log)])
        .config(RunConfig::new().auto_play())
        .build()
        .unwrap();

    orchestrator.tick(0.0).unwrap();
    orchestrator.tick(120.0).unwrap();
    assert_eq!(orchestrator.playback_state(), PlaybackState::Completed);
    assert_eq!(orchestrator.state().elapsed_ms, 100.0);
    assert!(!orchestrator.wants_frame());

    orchestrator.play();
    assert_eq!(orchestrator.state().elapsed_ms, 0.0);
    orchestrator.tick(500.0).unwrap();
    assert_eq!(
        *log.borrow(),
        vec!["start:once", "complete:once", "start:once"]
    );
}

#[test]
fn test_style_overrides_only_at_full_progress() {
    let recorder = Recorder::default();
    let mut orchestrator = Orchestrator::builder(vec![Step::new("glass", 100)
        .transform(TransformTarget::opacity(1.0))
        .style("backdrop-filter", "blur(8px)")])
    .config(RunConfig::new().auto_play())
    .sink(recorder.clone())
    .build()
    .unwrap();

    orchestrator.tick(0.0).unwrap();
    orchestrator.tick(50.0).unwrap();
    assert!(!recorder.last().styled);

    orchestrator.tick(100.0).unwrap();
    assert!(recorder.last().styled);
}

#[test]
fn test_hook_error_propagates_out_of_tick() {
    let mut orchestrator = Orchestrator::builder(vec![
        Step::new("bad", 100).on_start(|| anyhow::bail!("element detached"))
    ])
    .config(RunConfig::new().auto_play())
    .build()
    .unwrap();

    let err = orchestrator.tick(0.0).unwrap_err();
    match &err {
        AnimationError::Hook { step, hook, .. } => {
            assert_eq!(step, "bad");
            assert_eq!(*hook, HookKind::Start);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "on_start hook of step `bad` failed");

    // The next frame is still registered
    assert!(orchestrator.wants_frame());
}

#[test]
fn test_build_rejects_invalid_runs() {
    let zero = Orchestrator::builder(vec![Step::new("empty", 0)]).build();
    assert!(matches!(zero, Err(AnimationError::InvalidDuration { .. })));

    let duplicate =
        Orchestrator::builder(vec![Step::new("same", 100), Step::new("same", 100)]).build();
    assert!(matches!(duplicate, Err(AnimationError::DuplicateStepId(id)) if id == "same"));

    let speed = Orchestrator::builder(vec![Step::new("a", 100)])
        .config(RunConfig::new().speed(f64::NAN))
        .build();
    assert!(matches!(speed, Err(AnimationError::InvalidSpeed(_))));
}

#[test]
fn test_reverse_is_accepted_but_ignored() {
    let mut orchestrator = single(200, RunConfig::new().auto_play().reverse());
    assert!(orchestrator.config().reverse);

    orchestrator.tick(0.0).unwrap();
    let state = orchestrator.tick(50.0).unwrap();
    assert_eq!(state.progress, 0.25);
}

//! Glaze Animation System
//!
//! Step sequencing, easing, and playback orchestration for element transforms.
//!
//! # Features
//!
//! - **Easing**: Named curves and `cubic-bezier(...)` parsing
//! - **Steps**: Timed transform targets with delay, easing, style overrides and hooks
//! - **Executors**: Play steps back to back or on independent parallel timelines
//! - **Playback**: Play, pause, stop, seek, speed and looping over a frame clock
//! - **Presets**: Canned steps and sequences, also loadable from TOML

pub mod clock;
pub mod config;
pub mod controller;
pub mod definition;
pub mod easing;
pub mod error;
pub mod executor;
pub mod parallel;
pub mod presets;
pub mod scheduler;
pub mod sequential;
pub mod step;
pub mod transform;

pub use clock::{Clock, FrameSource, FrameToken, ManualFrames};
pub use config::RunConfig;
pub use controller::{
    Orchestrator, OrchestratorBuilder, PlaybackEvent, PlaybackState, RunState, StateObserver,
};
pub use definition::{SequenceDefinition, StepDefinition};
pub use easing::{ease, Easing};
pub use error::{AnimationError, HookKind, Result};
pub use executor::{Advance, StepExecutor};
pub use parallel::ParallelExecutor;
pub use presets::{in_parallel, sequenced, staggered, AnimationPreset, Sequence};
pub use scheduler::{AnimationScheduler, OrchestratorId};
pub use sequential::SequentialExecutor;
pub use step::Step;
pub use transform::{NullSink, StyleOverrides, TransformSink, TransformSnapshot, TransformTarget};

//! Error types for the animation system

use std::fmt;
use thiserror::Error;

/// Lifecycle hook that raised an error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookKind {
    Start,
    Update,
    Complete,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HookKind::Start => "on_start",
            HookKind::Update => "on_update",
            HookKind::Complete => "on_complete",
        })
    }
}

/// Errors produced while building or driving an orchestrator
#[derive(Debug, Error)]
pub enum AnimationError {
    /// A step with a zero duration
    #[error("step `{id}` must have a duration greater than zero")]
    InvalidDuration { id: String },

    /// Two steps of one run share an id
    #[error("duplicate step id `{0}`")]
    DuplicateStepId(String),

    /// Speed multiplier that is negative or not finite
    #[error("invalid speed multiplier: {0}")]
    InvalidSpeed(f64),

    /// Sequence definition could not be parsed
    #[error("invalid sequence definition: {0}")]
    Definition(#[from] toml::de::Error),

    /// A user hook failed; the run may be left mid-transition
    #[error("{hook} hook of step `{step}` failed")]
    Hook {
        step: String,
        hook: HookKind,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T, E = AnimationError> = std::result::Result<T, E>;

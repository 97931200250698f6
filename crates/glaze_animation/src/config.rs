//! Run configuration

use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};

/// Options of one orchestrator run.
///
/// Every field has a default, so partial TOML tables deserialize:
///
/// ```
/// use glaze_animation::RunConfig;
///
/// let config: RunConfig = toml::from_str("loop = true\nspeed = 2.0").unwrap();
/// assert!(config.looping);
/// assert_eq!(config.speed, 2.0);
/// assert!(!config.parallel);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Start playing as soon as the orchestrator is built
    pub auto_play: bool,
    /// Restart from the beginning on completion
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Reserved. Accepted but has no effect on scheduling.
    pub reverse: bool,
    /// Elapsed-time multiplier
    pub speed: f64,
    /// Hold playback; suppresses `auto_play`
    pub paused: bool,
    /// Give every step its own timeline instead of playing them in order
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            auto_play: false,
            looping: false,
            reverse: false,
            speed: 1.0,
            paused: false,
            parallel: false,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: start on build
    pub fn auto_play(mut self) -> Self {
        self.auto_play = true;
        self
    }

    /// Builder: loop forever
    pub fn looped(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Builder: set speed multiplier
    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Builder: start paused
    pub fn paused(mut self) -> Self {
        self.paused = true;
        self
    }

    /// Builder: run all steps in parallel
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Builder: request reverse playback (reserved, ignored)
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Reject speed multipliers that are negative or not finite
    pub fn validate(&self) -> Result<()> {
        validate_speed(self.speed)
    }
}

pub(crate) fn validate_speed(speed: f64) -> Result<()> {
    if speed.is_finite() && speed >= 0.0 {
        Ok(())
    } else {
        Err(AnimationError::InvalidSpeed(speed))
    }
}

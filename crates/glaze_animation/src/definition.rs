//! Declarative sequence definitions
//!
//! Sequences can be described in TOML instead of code. Hooks cannot be
//! expressed declaratively; attach them to the built steps if needed.
//!
//! ```toml
//! [config]
//! loop = true
//!
//! [[step]]
//! id = "card"
//! duration_ms = 300
//! easing = "ease-out"
//! transform = { translate_y = -20.0, opacity = 1.0 }
//! style = { backdrop-filter = "blur(12px)" }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::easing::Easing;
use crate::error::Result;
use crate::presets::Sequence;
use crate::step::Step;
use crate::transform::{StyleOverrides, TransformTarget};

/// Serializable form of a [`Step`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub id: String,
    pub duration_ms: u32,
    #[serde(default)]
    pub delay_ms: u32,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub transform: TransformTarget,
    #[serde(default)]
    pub style: StyleOverrides,
}

impl From<StepDefinition> for Step {
    fn from(definition: StepDefinition) -> Self {
        Step::new(definition.id, definition.duration_ms)
            .delay(definition.delay_ms)
            .easing(definition.easing)
            .transform(definition.transform)
            .styles(definition.style)
    }
}

/// Serializable form of a [`Sequence`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceDefinition {
    #[serde(default)]
    pub config: RunConfig,
    #[serde(default, rename = "step")]
    pub steps: Vec<StepDefinition>,
}

impl SequenceDefinition {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn into_sequence(self) -> Sequence {
        Sequence::new(
            self.steps.into_iter().map(Step::from).collect(),
            self.config,
        )
    }
}

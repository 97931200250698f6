//! Transform interpolation
//!
//! A step describes where an element should end up as a set of optional
//! deltas ([`TransformTarget`]). Each frame the target is combined with the
//! eased step progress into a [`TransformSnapshot`], which the host applies
//! through a [`TransformSink`]. Nothing in this module touches a visual
//! element directly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Opaque style key/value pairs handed to the host verbatim.
pub type StyleOverrides = IndexMap<String, String>;

/// Target deltas of a step. Unset fields are left untouched by the step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformTarget {
    /// Translation X in pixels
    pub translate_x: Option<f32>,
    /// Translation Y in pixels
    pub translate_y: Option<f32>,
    /// Uniform scale factor
    pub scale: Option<f32>,
    /// Rotation in degrees
    pub rotation: Option<f32>,
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
}

impl TransformTarget {
    /// Create a target with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Create a target with uniform scale
    pub fn scale(value: f32) -> Self {
        Self {
            scale: Some(value),
            ..Default::default()
        }
    }

    /// Create a target with translation
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: Some(x),
            translate_y: Some(y),
            ..Default::default()
        }
    }

    /// Create a target with rotation
    pub fn rotation(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    /// Builder: set translation
    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate_x = Some(x);
        self.translate_y = Some(y);
        self
    }

    /// Builder: set rotation
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Combine the target with eased progress `t`.
    ///
    /// Translation, rotation and opacity scale linearly from zero; scale
    /// moves from the identity (1.0) toward the target.
    pub fn interpolate(&self, t: f32) -> TransformSnapshot {
        TransformSnapshot {
            translate_x: self.translate_x.map(|v| v * t),
            translate_y: self.translate_y.map(|v| v * t),
            scale: self.scale.map(|v| 1.0 + (v - 1.0) * t),
            rotation: self.rotation.map(|v| v * t),
            opacity: self.opacity.map(|v| v * t),
        }
    }
}

/// Concrete transform values for one step at one instant
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformSnapshot {
    pub translate_x: Option<f32>,
    pub translate_y: Option<f32>,
    pub scale: Option<f32>,
    pub rotation: Option<f32>,
    pub opacity: Option<f32>,
}

impl TransformSnapshot {
    /// Get the resolved translation (defaults to 0.0 if not set)
    pub fn resolved_translate(&self) -> (f32, f32) {
        (
            self.translate_x.unwrap_or(0.0),
            self.translate_y.unwrap_or(0.0),
        )
    }

    /// Get the resolved scale (defaults to 1.0 if not set)
    pub fn resolved_scale(&self) -> f32 {
        self.scale.unwrap_or(1.0)
    }

    /// Get the resolved rotation (defaults to 0.0 if not set)
    pub fn resolved_rotation(&self) -> f32 {
        self.rotation.unwrap_or(0.0)
    }

    /// Get the resolved opacity (defaults to 1.0 if not set)
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }
}

/// Host capability that paints a transform onto the element behind `step_id`.
///
/// `style` is `Some` only on frames where the step is at full progress.
pub trait TransformSink {
    fn apply_transform(
        &mut self,
        step_id: &str,
        transform: &TransformSnapshot,
        style: Option<&StyleOverrides>,
    );
}

impl<F> TransformSink for F
where
    F: FnMut(&str, &TransformSnapshot, Option<&StyleOverrides>),
{
    fn apply_transform(
        &mut self,
        step_id: &str,
        transform: &TransformSnapshot,
        style: Option<&StyleOverrides>,
    ) {
        self(step_id, transform, style)
    }
}

/// Sink that discards every transform
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TransformSink for NullSink {
    fn apply_transform(&mut self, _: &str, _: &TransformSnapshot, _: Option<&StyleOverrides>) {}
}

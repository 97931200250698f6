//! Easing functions for animations
//!
//! Easing curves are usually written as CSS-like strings in step
//! definitions (`"ease-out"`, `"cubic-bezier(0, 0.2, 0.9, 1)"`). Parsing never
//! fails: an unknown or malformed spec degrades to [`Easing::Linear`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    /// Four control values blended with the cubic Bernstein basis.
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::CubicBezier(p0, p1, p2, p3) => bernstein_blend(t, *p0, *p1, *p2, *p3),
        }
    }

    /// Parse an easing spec, falling back to linear on anything unrecognized.
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        match spec {
            "linear" => Easing::Linear,
            "ease-in" => Easing::EaseIn,
            "ease-out" => Easing::EaseOut,
            "ease-in-out" => Easing::EaseInOut,
            "ease-in-cubic" => Easing::EaseInCubic,
            "ease-out-cubic" => Easing::EaseOutCubic,
            "ease-in-out-cubic" => Easing::EaseInOutCubic,
            _ => parse_cubic_bezier(spec).unwrap_or_else(|| {
                tracing::debug!(spec, "unrecognized easing, falling back to linear");
                Easing::Linear
            }),
        }
    }
}

/// Evaluate a named or parameterized easing spec at `t`.
///
/// ```
/// use glaze_animation::easing::ease;
///
/// assert_eq!(ease(0.5, "ease-in"), 0.25);
/// assert_eq!(ease(0.5, "wobble"), 0.5);
/// ```
pub fn ease(t: f32, spec: &str) -> f32 {
    Easing::parse(spec).apply(t)
}

/// Cubic Bernstein blend of four control values:
/// B(t) = (1-t)³·p0 + 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³·p3
///
/// This is not the CSS `cubic-bezier()` timing function (no solve for the
/// x parameter); the control values are blended directly against `t`.
#[inline]
fn bernstein_blend(t: f32, p0: f32, p1: f32, p2: f32, p3: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

fn parse_cubic_bezier(spec: &str) -> Option<Easing> {
    let args = spec
        .strip_prefix("cubic-bezier(")?
        .strip_suffix(')')?
        .split(',')
        .map(|arg| arg.trim().parse::<f32>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<_>>>()?;

    match args[..] {
        [p0, p1, p2, p3] => Some(Easing::CubicBezier(p0, p1, p2, p3)),
        _ => None,
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::EaseIn => f.write_str("ease-in"),
            Easing::EaseOut => f.write_str("ease-out"),
            Easing::EaseInOut => f.write_str("ease-in-out"),
            Easing::EaseInCubic => f.write_str("ease-in-cubic"),
            Easing::EaseOutCubic => f.write_str("ease-out-cubic"),
            Easing::EaseInOutCubic => f.write_str("ease-in-out-cubic"),
            Easing::CubicBezier(p0, p1, p2, p3) => {
                write!(f, "cubic-bezier({p0}, {p1}, {p2}, {p3})")
            }
        }
    }
}

impl From<&str> for Easing {
    fn from(spec: &str) -> Self {
        Easing::parse(spec)
    }
}

impl From<String> for Easing {
    fn from(spec: String) -> Self {
        Easing::parse(&spec)
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_string()
    }
}

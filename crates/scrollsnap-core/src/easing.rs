//! Easing curves for snap animations
//!
//! Named curves map normalized time in [0, 1] to progress in [0, 1] and can be
//! picked from configuration. Hosts can also supply their own function; those
//! are trusted as-is and not range checked.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Curves selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump straight to the end on the last frame
    None,
    Linear,
    /// Quadratic ease-in-out
    #[default]
    EaseInOutQuad,
    /// Cubic ease-out
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

impl EasingType {
    /// Apply the curve to a progress value
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::EaseInOutQuad => ease_in_out_quad(t),
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::Quintic => quintic_ease_out(t),
            EasingType::EaseOut => exponential_ease_out(t),
        }
    }
}

/// Quadratic ease-in-out: 2t² for the first half, -1 + (4 - 2t)t after
#[inline]
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv.powi(5)
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

pub type EasingFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// The curve an animation actually runs with
#[derive(Clone)]
pub enum Easing {
    Named(EasingType),
    Custom(EasingFn),
}

impl Easing {
    pub fn custom(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Easing::Custom(Arc::new(f))
    }

    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Named(kind) => kind.apply(t),
            Easing::Custom(f) => f(t),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Named(EasingType::default())
    }
}

impl From<EasingType> for Easing {
    fn from(kind: EasingType) -> Self {
        Easing::Named(kind)
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Named(kind) => f.debug_tuple("Named").field(kind).finish(),
            Easing::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

//! Snap length declarations and their resolution to pixels

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::container::ScrollContainer;
use crate::geometry::{Axis, AxisPair};

/// Unit a snap length is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LengthUnit {
    #[default]
    Pixel,
    Percent,
    ViewportWidth,
    ViewportHeight,
}

impl LengthUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "px" => Some(LengthUnit::Pixel),
            "%" => Some(LengthUnit::Percent),
            "vw" => Some(LengthUnit::ViewportWidth),
            "vh" => Some(LengthUnit::ViewportHeight),
            _ => None,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Pixel => "px",
            LengthUnit::Percent => "%",
            LengthUnit::ViewportWidth => "vw",
            LengthUnit::ViewportHeight => "vh",
        }
    }
}

/// Distance between two snap points, as declared
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapLength {
    pub value: f64,
    pub unit: LengthUnit,
}

impl SnapLength {
    pub const ZERO: SnapLength = SnapLength {
        value: 0.0,
        unit: LengthUnit::Pixel,
    };

    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn pixels(value: f64) -> Self {
        Self::new(value, LengthUnit::Pixel)
    }

    /// Parse a declaration such as `"100%"`, `"50vh"` or `"-2.5e2px"`
    ///
    /// The first number-with-unit found in the string wins. Anything that
    /// does not match falls back to zero pixels.
    pub fn parse(declaration: &str) -> Self {
        let Some(caps) = length_pattern().captures(declaration) else {
            return Self::ZERO;
        };

        let value = caps[1].parse::<f64>().ok();
        let unit = LengthUnit::from_suffix(&caps[2]);

        match (value, unit) {
            (Some(value), Some(unit)) => Self::new(value, unit),
            _ => Self::ZERO,
        }
    }

    /// Whether this declaration can never produce a usable snap length
    pub fn is_zero(&self) -> bool {
        self.value == 0.0 || !self.value.is_finite()
    }
}

impl fmt::Display for SnapLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

fn length_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)(px|%|vw|vh)")
            .expect("snap length pattern is a valid regex")
    })
}

/// A snap destination as written in configuration: a bare number of pixels
/// or a string with a unit suffix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapDestination {
    Pixels(f64),
    Declaration(String),
}

impl SnapDestination {
    pub fn to_length(&self) -> SnapLength {
        match self {
            SnapDestination::Pixels(value) => SnapLength::pixels(*value),
            SnapDestination::Declaration(text) => SnapLength::parse(text),
        }
    }
}

impl From<f64> for SnapDestination {
    fn from(value: f64) -> Self {
        SnapDestination::Pixels(value)
    }
}

impl From<&str> for SnapDestination {
    fn from(value: &str) -> Self {
        SnapDestination::Declaration(value.to_string())
    }
}

/// Parse both axes independently; a malformed or missing axis becomes zero
/// without affecting the other one
pub fn parse_snap_lengths(
    x: Option<&SnapDestination>,
    y: Option<&SnapDestination>,
) -> AxisPair<SnapLength> {
    AxisPair::new(
        x.map(SnapDestination::to_length).unwrap_or_default(),
        y.map(SnapDestination::to_length).unwrap_or_default(),
    )
}

/// Resolve a declaration to absolute pixels for one axis of a container
pub fn resolve_axis_length<C>(container: &C, axis: Axis, declaration: &SnapLength) -> f64
where
    C: ScrollContainer + ?Sized,
{
    match declaration.unit {
        LengthUnit::Percent => container.client_size(axis) / 100.0 * declaration.value,
        LengthUnit::ViewportHeight => {
            container.viewport().extent(Axis::Y) / 100.0 * declaration.value
        }
        LengthUnit::ViewportWidth => {
            container.viewport().extent(Axis::X) / 100.0 * declaration.value
        }
        LengthUnit::Pixel => declaration.value,
    }
}

/// Resolve and round to whole pixels, returning `None` when the axis has no
/// usable snap length (zero, negative or NaN)
pub fn snap_length_px<C>(container: &C, axis: Axis, declaration: &SnapLength) -> Option<f64>
where
    C: ScrollContainer + ?Sized,
{
    let length = resolve_axis_length(container, axis, declaration).round();
    (length.is_finite() && length > 0.0).then_some(length)
}

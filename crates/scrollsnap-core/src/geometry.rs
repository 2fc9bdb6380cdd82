//! Axis-level value types shared by every part of the engine

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the two scroll axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    /// The other axis
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// A value held once per axis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisPair<T> {
    pub x: T,
    pub y: T,
}

impl<T> AxisPair<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn map<U>(self, mut f: impl FnMut(Axis, T) -> U) -> AxisPair<U> {
        AxisPair {
            x: f(Axis::X, self.x),
            y: f(Axis::Y, self.y),
        }
    }
}

impl<T: Clone> AxisPair<T> {
    pub fn splat(value: T) -> Self {
        Self {
            x: value.clone(),
            y: value,
        }
    }
}

impl<T> Index<Axis> for AxisPair<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl<T> IndexMut<Axis> for AxisPair<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

/// Sparse pair of per-axis values; `None` means the axis takes no part
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinates {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Coordinates {
    pub fn new(x: Option<f64>, y: Option<f64>) -> Self {
        Self { x, y }
    }

    pub fn x(x: f64) -> Self {
        Self { x: Some(x), y: None }
    }

    pub fn y(y: f64) -> Self {
        Self { x: None, y: Some(y) }
    }

    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
        .filter(|v| v.is_finite())
    }
}

/// Signed direction of travel along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    Backward,
    #[default]
    Still,
    Forward,
}

impl Heading {
    /// Sign of a scroll delta
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Heading::Forward
        } else if delta < 0.0 {
            Heading::Backward
        } else {
            Heading::Still
        }
    }

    pub fn signum(self) -> f64 {
        match self {
            Heading::Backward => -1.0,
            Heading::Still => 0.0,
            Heading::Forward => 1.0,
        }
    }

    #[inline]
    pub fn is_still(self) -> bool {
        self == Heading::Still
    }
}

/// A named one-cell step request, as issued by arrows and the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Y,
            Direction::Left | Direction::Right => Axis::X,
        }
    }

    pub fn heading(self) -> Heading {
        match self {
            Direction::Up | Direction::Left => Heading::Backward,
            Direction::Down | Direction::Right => Heading::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_from_delta() {
        assert_eq!(Heading::from_delta(12.5), Heading::Forward);
        assert_eq!(Heading::from_delta(-0.1), Heading::Backward);
        assert_eq!(Heading::from_delta(0.0), Heading::Still);
        assert_eq!(Heading::from_delta(f64::NAN), Heading::Still);
    }

    #[test]
    fn test_direction_axis_and_heading() {
        assert_eq!(Direction::Up.axis(), Axis::Y);
        assert_eq!(Direction::Right.axis(), Axis::X);
        assert_eq!(Direction::Up.heading(), Heading::Backward);
        assert_eq!(Direction::Down.heading(), Heading::Forward);
        assert_eq!(Direction::Left.heading().signum(), -1.0);
    }

    #[test]
    fn test_coordinates_ignore_non_finite() {
        let coords = Coordinates::new(Some(f64::NAN), Some(40.0));
        assert_eq!(coords.get(Axis::X), None);
        assert_eq!(coords.get(Axis::Y), Some(40.0));
    }

    #[test]
    fn test_axis_pair_index() {
        let mut pair = AxisPair::splat(0);
        pair[Axis::Y] = 3;
        assert_eq!(pair.x, 0);
        assert_eq!(pair[Axis::Y], 3);
    }
}

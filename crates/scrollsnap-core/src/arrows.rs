//! Directional arrow affordances
//!
//! Arrows sit just inside the edges of the container, are shown only in the
//! directions the container can still scroll, and pick a light or dark style
//! from the container background. Clicking one is a programmatic one-cell
//! step ([`crate::ScrollSnap::scroll_to_direction`]).
//!
//! Only one container shows arrows at a time; hosts hand that right around
//! with an [`ArrowRegistry`].

use serde::{Deserialize, Serialize};

use crate::container::ScrollContainer;
use crate::geometry::{Axis, Direction};

/// Opacity of visible arrows while the pointer is over the container
pub const OPACITY_CONTAINER_HOVER: f64 = 0.6;
/// Opacity of the arrow under the pointer
pub const OPACITY_ARROW_HOVER: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness in [0, 255]
    pub fn brightness(self) -> f64 {
        (self.r as f64 * 299.0 + self.g as f64 * 587.0 + self.b as f64 * 114.0) / 1000.0
    }
}

/// Arrow style, chosen to contrast with the container background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowTheme {
    Light,
    Dark,
}

impl ArrowTheme {
    pub fn from_background(background: Rgb) -> Self {
        if background.brightness() > 128.0 {
            ArrowTheme::Light
        } else {
            ArrowTheme::Dark
        }
    }

    pub fn icon_color(self) -> Rgb {
        match self {
            ArrowTheme::Light => Rgb::new(0x1a, 0x1a, 0x1a),
            ArrowTheme::Dark => Rgb::new(0xff, 0xff, 0xff),
        }
    }

    /// Badge color and its alpha
    pub fn background(self) -> (Rgb, f64) {
        match self {
            ArrowTheme::Light => (Rgb::new(255, 255, 255), 0.8),
            ArrowTheme::Dark => (Rgb::new(0, 0, 0), 0.8),
        }
    }
}

/// Axis-aligned rectangle in host coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

/// Arrow size and distance from the container edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowMetrics {
    pub padding: f64,
    pub size: f64,
}

impl Default for ArrowMetrics {
    fn default() -> Self {
        Self {
            padding: 16.0,
            size: 40.0,
        }
    }
}

/// Where the pointer is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Hover {
    #[default]
    Outside,
    Container,
    Arrow(Direction),
}

/// Whether the container can still scroll in `direction`
pub fn arrow_visible<C>(container: &C, direction: Direction) -> bool
where
    C: ScrollContainer + ?Sized,
{
    let axis = direction.axis();
    let offset = container.scroll_offset(axis);
    match direction {
        Direction::Up | Direction::Left => offset > 0.0,
        Direction::Down | Direction::Right => offset < container.max_scroll(axis),
    }
}

/// Position of one arrow relative to the container rectangle
pub fn arrow_rect(container: Rect, direction: Direction, metrics: ArrowMetrics) -> Rect {
    let half = metrics.size / 2.0;
    let center_x = container.left + container.width / 2.0 - half;
    let center_y = container.top + container.height / 2.0 - half;

    let (left, top) = match direction {
        Direction::Up => (center_x, container.top + metrics.padding),
        Direction::Down => (center_x, container.bottom() - metrics.padding - metrics.size),
        Direction::Left => (container.left + metrics.padding, center_y),
        Direction::Right => (container.right() - metrics.padding - metrics.size, center_y),
    };
    Rect::new(left, top, metrics.size, metrics.size)
}

/// Opacity of a visible arrow for the current hover state
pub fn arrow_opacity(direction: Direction, hover: Hover) -> f64 {
    match hover {
        Hover::Outside => 0.0,
        Hover::Container => OPACITY_CONTAINER_HOVER,
        Hover::Arrow(hovered) if hovered == direction => OPACITY_ARROW_HOVER,
        Hover::Arrow(_) => OPACITY_CONTAINER_HOVER,
    }
}

/// Render state of one arrow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub direction: Direction,
    pub visible: bool,
    pub rect: Rect,
    pub opacity: f64,
}

/// The four arrows of one container
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowSet {
    pub theme: ArrowTheme,
    arrows: [Arrow; 4],
}

impl ArrowSet {
    pub fn compute<C>(
        container: &C,
        rect: Rect,
        theme: ArrowTheme,
        hover: Hover,
        metrics: ArrowMetrics,
    ) -> Self
    where
        C: ScrollContainer + ?Sized,
    {
        let arrows = Direction::ALL.map(|direction| {
            let visible = arrow_visible(container, direction);
            Arrow {
                direction,
                visible,
                rect: arrow_rect(rect, direction, metrics),
                opacity: if visible { arrow_opacity(direction, hover) } else { 0.0 },
            }
        });
        Self { theme, arrows }
    }

    pub fn get(&self, direction: Direction) -> &Arrow {
        &self.arrows[Direction::ALL
            .iter()
            .position(|&d| d == direction)
            .unwrap_or_default()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arrow> {
        self.arrows.iter()
    }

    /// Visible arrow under a point, if any
    pub fn hit_test(&self, x: f64, y: f64) -> Option<Direction> {
        self.arrows
            .iter()
            .find(|arrow| arrow.visible && arrow.rect.contains(x, y))
            .map(|arrow| arrow.direction)
    }

    /// Whether any arrow on `axis` is showing
    pub fn any_visible(&self, axis: Axis) -> bool {
        self.arrows
            .iter()
            .any(|arrow| arrow.visible && arrow.direction.axis() == axis)
    }
}

/// Token naming one container in an [`ArrowRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrowOwner(u64);

/// Decides which container's arrows are on screen
///
/// The most recently registered container wins. Releasing the current owner
/// hides arrows until someone registers again.
#[derive(Debug, Default)]
pub struct ArrowRegistry {
    issued: u64,
    owner: Option<ArrowOwner>,
}

impl ArrowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> ArrowOwner {
        self.issued += 1;
        let owner = ArrowOwner(self.issued);
        self.owner = Some(owner);
        owner
    }

    /// Give up the arrows; returns false for a token that no longer owns them
    pub fn release(&mut self, owner: ArrowOwner) -> bool {
        if self.owner == Some(owner) {
            self.owner = None;
            true
        } else {
            false
        }
    }

    pub fn is_visible_for(&self, owner: ArrowOwner) -> bool {
        self.owner == Some(owner)
    }

    pub fn owner(&self) -> Option<ArrowOwner> {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::testing::MockContainer;

    #[test]
    fn test_brightness_picks_theme() {
        assert_eq!(ArrowTheme::from_background(Rgb::new(255, 255, 255)), ArrowTheme::Light);
        assert_eq!(ArrowTheme::from_background(Rgb::new(0, 0, 0)), ArrowTheme::Dark);
        // 128 exactly is still dark
        assert_eq!(ArrowTheme::from_background(Rgb::new(128, 128, 128)), ArrowTheme::Dark);
        assert_eq!(ArrowTheme::from_background(Rgb::new(129, 129, 129)), ArrowTheme::Light);
        assert_eq!(ArrowTheme::Light.icon_color(), Rgb::new(0x1a, 0x1a, 0x1a));
    }

    #[test]
    fn test_visibility_follows_scroll_position() {
        let container = MockContainer::square();
        assert!(!arrow_visible(&container, Direction::Up));
        assert!(arrow_visible(&container, Direction::Down));
        assert!(!arrow_visible(&container, Direction::Left));
        assert!(arrow_visible(&container, Direction::Right));

        let container = MockContainer::square().with_offset(Axis::Y, 4000.0);
        assert!(arrow_visible(&container, Direction::Up));
        assert!(!arrow_visible(&container, Direction::Down));
    }

    #[test]
    fn test_layout_centres_on_cross_axis() {
        let rect = Rect::new(100.0, 50.0, 800.0, 600.0);
        let metrics = ArrowMetrics::default();

        assert_eq!(arrow_rect(rect, Direction::Up, metrics), Rect::new(480.0, 66.0, 40.0, 40.0));
        assert_eq!(arrow_rect(rect, Direction::Down, metrics), Rect::new(480.0, 594.0, 40.0, 40.0));
        assert_eq!(arrow_rect(rect, Direction::Left, metrics), Rect::new(116.0, 330.0, 40.0, 40.0));
        assert_eq!(arrow_rect(rect, Direction::Right, metrics), Rect::new(844.0, 330.0, 40.0, 40.0));
    }

    #[test]
    fn test_hover_opacity() {
        assert_eq!(arrow_opacity(Direction::Up, Hover::Outside), 0.0);
        assert_eq!(arrow_opacity(Direction::Up, Hover::Container), 0.6);
        assert_eq!(arrow_opacity(Direction::Up, Hover::Arrow(Direction::Up)), 0.95);
        assert_eq!(arrow_opacity(Direction::Up, Hover::Arrow(Direction::Down)), 0.6);
    }

    #[test]
    fn test_hidden_arrows_are_not_hit() {
        let container = MockContainer::square();
        let set = ArrowSet::compute(
            &container,
            Rect::new(0.0, 0.0, 1000.0, 1000.0),
            ArrowTheme::Dark,
            Hover::Container,
            ArrowMetrics::default(),
        );
        assert_eq!(set.get(Direction::Up).opacity, 0.0);
        assert_eq!(set.get(Direction::Down).opacity, 0.6);
        assert_eq!(set.hit_test(500.0, 20.0), None);
        assert_eq!(set.hit_test(500.0, 960.0), Some(Direction::Down));
        assert!(set.any_visible(Axis::X));
    }

    #[test]
    fn test_registry_single_owner() {
        let mut registry = ArrowRegistry::new();
        let first = registry.register();
        let second = registry.register();
        assert!(!registry.is_visible_for(first));
        assert!(registry.is_visible_for(second));

        assert!(!registry.release(first));
        assert!(registry.release(second));
        assert_eq!(registry.owner(), None);
    }
}

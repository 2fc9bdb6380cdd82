pub mod animation;
pub mod arrows;
pub mod bounds;
pub mod config;
pub mod container;
pub mod decision;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod snap;
pub mod timing;
pub mod units;

pub use animation::{AnimationTicket, AxisAnimator, ScrollTicket, TicketState};
pub use arrows::{ArrowRegistry, ArrowSet, ArrowTheme, Hover};
pub use config::{AppConfig, Settings, SnapConfig};
pub use container::{ScrollContainer, Viewport};
pub use easing::{Easing, EasingType};
pub use error::{Error, Result};
pub use geometry::{Axis, AxisPair, Coordinates, Direction, Heading};
pub use snap::{ScrollSnap, SnapEvent, SnapPhase};
pub use units::{LengthUnit, SnapDestination, SnapLength};

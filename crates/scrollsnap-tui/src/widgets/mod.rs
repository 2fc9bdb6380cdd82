mod arrows;
mod board;
mod status_bar;

pub use arrows::ArrowsWidget;
pub use board::BoardWidget;
pub use status_bar::StatusBarWidget;

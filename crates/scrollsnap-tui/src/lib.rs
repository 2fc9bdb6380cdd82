pub mod app;
pub mod event;
pub mod grid;
pub mod input;
pub mod keymap;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::{load_theme, Theme};

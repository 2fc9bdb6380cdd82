use ratatui::style::Color;
use scrollsnap_core::arrows::{ArrowTheme, Rgb};
use tracing::warn;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey0: Color,
    pub grey2: Color,

    // Board cells alternate between these
    pub cell_even: Color,
    pub cell_odd: Color,

    // Semantic colors
    pub border: Color,
    pub accent: Color,
    pub settling: Color,
    pub snapping: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}

impl Theme {
    pub fn gruvbox_dark() -> Self {
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            cell_even: Color::Rgb(0x32, 0x30, 0x2f),
            cell_odd: Color::Rgb(0x3c, 0x38, 0x36),
            border: Color::Rgb(0x7c, 0x6f, 0x64),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            settling: Color::Rgb(0xd8, 0xa6, 0x57),
            snapping: Color::Rgb(0x7d, 0xae, 0xa3),
        }
    }

    pub fn gruvbox_light() -> Self {
        Self {
            bg0: Color::Rgb(0xfb, 0xf1, 0xc7),
            bg1: Color::Rgb(0xf4, 0xe8, 0xbe),
            bg2: Color::Rgb(0xeb, 0xdb, 0xb2),
            fg0: Color::Rgb(0x65, 0x47, 0x35),
            grey0: Color::Rgb(0xa8, 0x99, 0x84),
            grey2: Color::Rgb(0x7c, 0x6f, 0x64),
            cell_even: Color::Rgb(0xf4, 0xe8, 0xbe),
            cell_odd: Color::Rgb(0xf2, 0xe5, 0xbc),
            border: Color::Rgb(0xa8, 0x99, 0x84),
            accent: Color::Rgb(0x6c, 0x78, 0x2e),
            settling: Color::Rgb(0xb4, 0x71, 0x09),
            snapping: Color::Rgb(0x45, 0x70, 0x7a),
        }
    }

    /// Arrow style that contrasts with the board background
    pub fn arrow_theme(&self) -> ArrowTheme {
        match to_rgb(self.cell_even) {
            Some(rgb) => ArrowTheme::from_background(rgb),
            None => ArrowTheme::Dark,
        }
    }
}

/// Load a theme by name, falling back to the default
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" | "dark" => Theme::gruvbox_dark(),
        "gruvbox-light" | "light" => Theme::gruvbox_light(),
        other => {
            warn!("Unknown theme '{}', using gruvbox-dark", other);
            Theme::default()
        }
    }
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "gruvbox-light"]
}

pub fn to_rgb(color: Color) -> Option<Rgb> {
    match color {
        Color::Rgb(r, g, b) => Some(Rgb::new(r, g, b)),
        Color::Black => Some(Rgb::new(0, 0, 0)),
        Color::White => Some(Rgb::new(255, 255, 255)),
        _ => None,
    }
}

pub fn from_rgb(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

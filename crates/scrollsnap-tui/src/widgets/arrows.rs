use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    Frame,
};
use scrollsnap_core::arrows::{OPACITY_ARROW_HOVER, OPACITY_CONTAINER_HOVER};
use scrollsnap_core::Direction;

use crate::app::App;
use crate::theme::from_rgb;

pub struct ArrowsWidget;

impl ArrowsWidget {
    pub fn render(frame: &mut Frame, app: &App) {
        let Some(set) = app.arrow_set() else {
            return;
        };
        let icon = from_rgb(set.theme.icon_color());
        let (background, _) = set.theme.background();
        let background = from_rgb(background);
        let screen = frame.area();
        let buf = frame.buffer_mut();

        for arrow in set.iter().filter(|a| a.visible && a.opacity > 0.0) {
            let area = Rect::new(
                arrow.rect.left.round() as u16,
                arrow.rect.top.round() as u16,
                arrow.rect.width as u16,
                arrow.rect.height as u16,
            )
            .intersection(screen);
            if area.is_empty() {
                continue;
            }

            let mut style = Style::default().fg(icon).bg(background);
            if arrow.opacity >= OPACITY_ARROW_HOVER {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            } else if arrow.opacity <= OPACITY_CONTAINER_HOVER {
                style = style.add_modifier(Modifier::DIM);
            }

            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    buf[(x, y)].set_char(' ').set_style(style);
                }
            }
            let center = (area.x + area.width / 2, area.y + area.height / 2);
            buf[center].set_char(glyph(arrow.direction)).set_style(style);
        }
    }
}

fn glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => '▲',
        Direction::Down => '▼',
        Direction::Left => '◀',
        Direction::Right => '▶',
    }
}

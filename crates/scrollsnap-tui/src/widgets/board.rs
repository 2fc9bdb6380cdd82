use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use scrollsnap_core::{Axis, ScrollContainer};

use crate::app::App;

pub struct BoardWidget;

impl BoardWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let grid = app.snap.container();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" scrollsnap {}x{} ", grid.columns(), grid.rows()))
            .title_style(Style::default().fg(theme.accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let offset_x = grid.scroll_offset(Axis::X).round();
        let offset_y = grid.scroll_offset(Axis::Y).round();
        let pane_w = grid.pane(Axis::X);
        let pane_h = grid.pane(Axis::Y);
        let buf = frame.buffer_mut();

        for y in 0..inner.height {
            for x in 0..inner.width {
                let content_x = offset_x + x as f64;
                let content_y = offset_y + y as f64;
                let Some((column, row)) = grid.cell_at(content_x, content_y) else {
                    continue;
                };

                let bg = if (column + row) % 2 == 0 {
                    theme.cell_even
                } else {
                    theme.cell_odd
                };

                // Label centred in its cell, clipped by the pane
                let label = format!("{},{}", column, row);
                let label_row = (row as f64 * pane_h + pane_h / 2.0).floor();
                let label_start = (column as f64 * pane_w + (pane_w - label.len() as f64) / 2.0).floor();
                let glyph = if content_y == label_row && content_x >= label_start {
                    label.chars().nth((content_x - label_start) as usize)
                } else {
                    None
                };

                let cell = &mut buf[(inner.x + x, inner.y + y)];
                match glyph {
                    Some(c) => {
                        cell.set_char(c)
                            .set_style(Style::default().fg(theme.fg0).bg(bg).add_modifier(Modifier::BOLD));
                    }
                    None => {
                        cell.set_char(' ').set_style(Style::default().bg(bg));
                    }
                }
            }
        }
    }
}

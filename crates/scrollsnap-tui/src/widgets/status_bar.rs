use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use scrollsnap_core::{Axis, ScrollContainer, SnapPhase};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let phase = app.snap.phase();
        let phase_color = match phase {
            SnapPhase::Settling => theme.settling,
            SnapPhase::Snapping => theme.snapping,
            SnapPhase::Idle | SnapPhase::Unbound => theme.accent,
        };

        let grid = app.snap.container();
        let (offset_x, offset_y) = app.offset();
        let (column, row) = grid.current_cell();

        let status_text = match &app.status_message {
            Some(msg) => format!(" {} ", msg),
            None => format!(
                " x {}/{} | y {}/{} | cell ({}, {}) | snaps: {} | arrows: {} ",
                offset_x,
                grid.max_scroll(Axis::X).round(),
                offset_y,
                grid.max_scroll(Axis::Y).round(),
                column,
                row,
                app.snap.snaps_completed(),
                if app.arrows_shown() { "on" } else { "off" },
            ),
        };

        let phase_text = format!(" {} ", phase.to_string().to_uppercase());
        let help_hint = " q:quit hjkl/arrows:step wheel:scroll a:arrows ";
        let used = phase_text.chars().count() + status_text.chars().count() + help_hint.len();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                phase_text,
                Style::default()
                    .fg(theme.bg0)
                    .bg(phase_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use scrollsnap_core::AppConfig;
use scrollsnap_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event, Action},
    load_theme,
    widgets::{ArrowsWidget, BoardWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("scrollsnap"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Arc<AppConfig>,
) -> Result<()> {
    let theme = load_theme(&config.ui.theme);
    let size = terminal.size()?;
    let area = ratatui::layout::Rect::new(0, 0, size.width, size.height);
    let mut app = App::new(config.clone(), theme, area)?;
    info!(
        columns = config.ui.grid_columns,
        rows = config.ui.grid_rows,
        "Playground started"
    );

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| {
            app.fit(frame.area());
            BoardWidget::render(frame, app.layout.board, &app);
            ArrowsWidget::render(frame, &app);
            StatusBarWidget::render(frame, app.layout.status, &app);
        })?;

        // Poll at frame rate while settling or animating
        let event = if app.needs_fast_update() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        let action = match event {
            Some(AppEvent::Key(key)) => handle_key_event(key, &app.keymap),
            Some(AppEvent::Mouse(mouse)) => handle_mouse_event(mouse),
            // The next draw picks up the new size
            Some(AppEvent::Resize(_, _)) | Some(AppEvent::Tick) | None => Action::None,
        };
        app.handle_action(action, Instant::now());

        if app.should_quit {
            info!(snaps = app.snap.snaps_completed(), "Playground closed");
            break;
        }
    }

    Ok(())
}

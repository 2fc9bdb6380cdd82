use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout, Rect};
use scrollsnap_core::arrows::{self, ArrowMetrics, ArrowOwner};
use scrollsnap_core::{
    AppConfig, ArrowRegistry, ArrowSet, Direction, Hover, ScrollContainer, ScrollSnap,
    SnapDestination, SnapEvent, SnapPhase,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::grid::GridContainer;
use crate::input::Action;
use crate::keymap::Keymap;
use crate::theme::Theme;

/// Arrow badges in terminal cells
const ARROW_METRICS: ArrowMetrics = ArrowMetrics {
    padding: 1.0,
    size: 3.0,
};

/// Screen areas of the playground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Bordered board block
    pub board: Rect,
    /// Scrolling pane inside the board border
    pub pane: Rect,
    pub status: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);
        let board = chunks[0];
        let pane = Rect::new(
            board.x.saturating_add(1),
            board.y.saturating_add(1),
            board.width.saturating_sub(2),
            board.height.saturating_sub(2),
        );
        Self {
            board,
            pane,
            status: chunks[1],
        }
    }
}

pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub keymap: Keymap,
    pub snap: ScrollSnap<GridContainer>,
    pub layout: AppLayout,
    pub hover: Hover,
    pub status_message: Option<String>,
    pub should_quit: bool,
    events: mpsc::UnboundedReceiver<SnapEvent>,
    registry: ArrowRegistry,
    arrow_owner: Option<ArrowOwner>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme, area: Rect) -> Result<Self> {
        let mut snap_config = config.snap.clone();
        // A board without snap lengths would never snap, so default to one
        // pane per cell
        if snap_config.snap_destination_x.is_none() && snap_config.snap_destination_y.is_none() {
            info!("No snap destination configured, snapping to whole panes");
            snap_config.snap_destination_x = Some(SnapDestination::from("100%"));
            snap_config.snap_destination_y = Some(SnapDestination::from("100%"));
        }
        let settings = snap_config.validate()?;

        let layout = AppLayout::new(area);
        let mut grid = GridContainer::new(config.ui.grid_columns, config.ui.grid_rows);
        grid.resize(layout.pane.width, layout.pane.height, area.width, area.height);

        let (tx, events) = mpsc::unbounded_channel();
        let show_arrows = settings.show_arrows;
        let mut snap = ScrollSnap::new(grid, settings).with_event_sender(tx);
        snap.bind();

        let mut registry = ArrowRegistry::new();
        let arrow_owner = show_arrows.then(|| registry.register());

        Ok(Self {
            keymap: Keymap::from_config(&config.keymap),
            config,
            theme,
            snap,
            layout,
            hover: Hover::Outside,
            status_message: None,
            should_quit: false,
            events,
            registry,
            arrow_owner,
        })
    }

    /// Adapt to the terminal size; a changed pane is reported as a resize
    pub fn fit(&mut self, area: Rect) {
        let layout = AppLayout::new(area);
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        let changed = self.snap.container_mut().resize(
            layout.pane.width,
            layout.pane.height,
            area.width,
            area.height,
        );
        if changed {
            debug!(width = layout.pane.width, height = layout.pane.height, "Board resized");
            self.snap.on_resize();
        }
    }

    /// Advance timers and animations, then collect what the engine reported
    pub fn tick(&mut self, now: Instant) {
        self.snap.tick(now);
        while let Ok(event) = self.events.try_recv() {
            self.handle_snap_event(event);
        }
    }

    fn handle_snap_event(&mut self, event: SnapEvent) {
        match event {
            SnapEvent::SnapStarted { .. } | SnapEvent::AxisSettled { .. } => {}
            SnapEvent::SnapEnded { .. } => {
                let (column, row) = self.snap.container().current_cell();
                self.set_status(format!("Snapped to cell ({}, {})", column, row));
            }
        }
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Step(direction) => {
                if !self.snap.settings().enable_keyboard {
                    self.set_status("Keyboard navigation is disabled");
                } else if self.snap.on_arrow_key(direction).is_none() {
                    debug!(%direction, "Step ignored");
                }
            }
            Action::Wheel { axis, notches } => {
                self.clear_status();
                let delta = notches as f64 * self.config.ui.wheel_step as f64;
                self.snap.scroll_by(axis, delta, now);
            }
            Action::Hover { column, row } => {
                self.hover = self.hover_at(column, row);
            }
            Action::Click { column, row } => {
                if let Some(direction) = self.arrow_at(column, row) {
                    self.snap.scroll_to_direction(direction);
                }
            }
            Action::ToggleArrows => self.toggle_arrows(),
            Action::None => {}
        }
    }

    /// Whether the host loop should poll at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.snap.needs_frames() || self.snap.phase() != SnapPhase::Idle
    }

    pub fn arrows_shown(&self) -> bool {
        self.arrow_owner
            .is_some_and(|owner| self.registry.is_visible_for(owner))
    }

    pub fn toggle_arrows(&mut self) {
        match self.arrow_owner.take() {
            Some(owner) => {
                self.registry.release(owner);
                self.set_status("Arrows hidden");
            }
            None => {
                self.arrow_owner = Some(self.registry.register());
                self.set_status("Arrows shown");
            }
        }
    }

    /// Arrow render state for the current frame
    pub fn arrow_set(&self) -> Option<ArrowSet> {
        if !self.arrows_shown() {
            return None;
        }
        Some(ArrowSet::compute(
            self.snap.container(),
            pane_rect(self.layout.pane),
            self.theme.arrow_theme(),
            self.hover,
            ARROW_METRICS,
        ))
    }

    fn arrow_at(&self, column: u16, row: u16) -> Option<Direction> {
        self.arrow_set()?
            .hit_test(column as f64, row as f64)
    }

    fn hover_at(&self, column: u16, row: u16) -> Hover {
        if let Some(direction) = self.arrow_at(column, row) {
            return Hover::Arrow(direction);
        }
        if pane_rect(self.layout.pane).contains(column as f64, row as f64) {
            Hover::Container
        } else {
            Hover::Outside
        }
    }

    /// Content offset of the pane, in whole terminal cells
    pub fn offset(&self) -> (u16, u16) {
        let container = self.snap.container();
        (
            container.scroll_offset(scrollsnap_core::Axis::X).round() as u16,
            container.scroll_offset(scrollsnap_core::Axis::Y).round() as u16,
        )
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

fn pane_rect(area: Rect) -> arrows::Rect {
    arrows::Rect::new(area.x as f64, area.y as f64, area.width as f64, area.height as f64)
}

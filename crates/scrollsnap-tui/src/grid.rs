use scrollsnap_core::{Axis, AxisPair, ScrollContainer, Viewport};

/// A scrollable board of `columns x rows` cells, each the size of the pane
/// that shows it
///
/// Sizes and offsets are measured in terminal cells.
#[derive(Debug, Clone)]
pub struct GridContainer {
    columns: u16,
    rows: u16,
    /// Visible pane size
    pane: AxisPair<f64>,
    offset: AxisPair<f64>,
    terminal: Viewport,
}

impl GridContainer {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
            pane: AxisPair::splat(0.0),
            offset: AxisPair::splat(0.0),
            terminal: Viewport::default(),
        }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Update the pane and terminal dimensions; returns true if either changed
    pub fn resize(&mut self, pane_width: u16, pane_height: u16, term_width: u16, term_height: u16) -> bool {
        let pane = AxisPair::new(pane_width as f64, pane_height as f64);
        let terminal = Viewport::new(term_width as f64, term_height as f64);
        if pane == self.pane && terminal == self.terminal {
            return false;
        }
        self.pane = pane;
        self.terminal = terminal;
        true
    }

    pub fn pane(&self, axis: Axis) -> f64 {
        self.pane[axis]
    }

    /// Board cell (column, row) containing a content position
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if self.pane.x <= 0.0 || self.pane.y <= 0.0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let column = (x / self.pane.x).floor() as u16;
        let row = (y / self.pane.y).floor() as u16;
        (column < self.columns && row < self.rows).then_some((column, row))
    }

    /// Cell whose top-left corner is nearest to the current offset
    pub fn current_cell(&self) -> (u16, u16) {
        let nearest = |axis: Axis, count: u16| {
            if self.pane[axis] <= 0.0 {
                return 0;
            }
            let cell = (self.offset[axis] / self.pane[axis]).round() as u16;
            cell.min(count.saturating_sub(1))
        };
        (nearest(Axis::X, self.columns), nearest(Axis::Y, self.rows))
    }
}

impl ScrollContainer for GridContainer {
    fn scroll_offset(&self, axis: Axis) -> f64 {
        self.offset[axis]
    }

    fn set_scroll_offset(&mut self, axis: Axis, value: f64) {
        self.offset[axis] = value.clamp(0.0, self.max_scroll(axis));
    }

    fn client_size(&self, axis: Axis) -> f64 {
        self.pane[axis]
    }

    fn scroll_size(&self, axis: Axis) -> f64 {
        let count = match axis {
            Axis::X => self.columns,
            Axis::Y => self.rows,
        };
        self.pane[axis] * count as f64
    }

    fn viewport(&self) -> Viewport {
        self.terminal
    }
}

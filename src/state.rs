use crate::figure::{Figure, Series};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full window state, independent of rendering.
pub struct ViewerState {
    /// The figure being displayed.
    pub figure: Figure,

    /// Per-series visibility, parallel to `figure.series`.
    pub visible: Vec<bool>,

    /// Number of rows in the combined table.
    pub row_count: usize,

    /// Number of input files the table was built from.
    pub file_count: usize,
}

impl ViewerState {
    pub fn new(figure: Figure, row_count: usize, file_count: usize) -> Self {
        let visible = vec![true; figure.series.len()];
        Self {
            figure,
            visible,
            row_count,
            file_count,
        }
    }

    /// Series currently drawn, in figure order.
    pub fn visible_series(&self) -> impl Iterator<Item = &Series> {
        self.figure
            .series
            .iter()
            .zip(&self.visible)
            .filter(|(_, shown)| **shown)
            .map(|(s, _)| s)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    /// Toggle a single series on or off.
    pub fn toggle(&mut self, index: usize) {
        if let Some(v) = self.visible.get_mut(index) {
            *v = !*v;
        }
    }

    pub fn set_all(&mut self, shown: bool) {
        self.visible.fill(shown);
    }
}

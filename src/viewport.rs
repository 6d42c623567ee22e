use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rows shown by a freshly-initialized viewport (one trading year).
pub const DEFAULT_INITIAL_WINDOW: usize = 252;
/// Rows a single zoom step adds or removes on each side.
pub const DEFAULT_ZOOM_STEP: usize = 50;

fn default_initial_window() -> usize {
    DEFAULT_INITIAL_WINDOW
}

fn default_zoom_step() -> usize {
    DEFAULT_ZOOM_STEP
}

/// Viewport sizing supplied by the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_initial_window")]
    pub initial_window: usize,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            initial_window: DEFAULT_INITIAL_WINDOW,
            zoom_step: DEFAULT_ZOOM_STEP,
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_window == 0 {
            return Err("initial_window must be positive".to_string());
        }
        if self.zoom_step == 0 {
            return Err("zoom_step must be positive".to_string());
        }
        Ok(())
    }
}

/// The visible `[start, end)` row range of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub start: usize,
    pub end: usize,
}

/// Clamped, steppable window over an enriched series.
///
/// One tracker belongs to one (ticker, date-range) selection; a new
/// selection replaces the tracker wholesale so the remembered length can
/// never go stale against a different series. Every operation re-establishes
/// `0 <= start <= end <= length` by clamping, never by failing, and is a
/// no-op at its own fixed point (fully zoomed in, fully zoomed out, reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportTracker {
    start: usize,
    end: usize,
    length: usize,
    zoom_step: usize,
}

impl ViewportTracker {
    /// Track a series of `series_length` rows, initially showing the most
    /// recent `initial_window` rows (default 252), or everything if shorter.
    pub fn new(series_length: usize) -> Self {
        Self::with_config(series_length, ViewportConfig::default())
    }

    pub fn with_config(series_length: usize, config: ViewportConfig) -> Self {
        let tracker = Self {
            start: series_length.saturating_sub(config.initial_window),
            end: series_length,
            length: series_length,
            zoom_step: config.zoom_step.max(1),
        };
        debug!(
            "Viewport initialized: [{}, {}) of {}",
            tracker.start, tracker.end, tracker.length
        );
        tracker
    }

    /// Rebuild a tracker from persisted parts (e.g. a UI store), clamping
    /// them back into a valid state.
    pub fn from_parts(start: usize, end: usize, series_length: usize, zoom_step: usize) -> Self {
        let end = end.min(series_length);
        Self {
            start: start.min(end),
            end,
            length: series_length,
            zoom_step: zoom_step.max(1),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn span(&self) -> usize {
        self.end - self.start
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            start: self.start,
            end: self.end,
        }
    }

    /// Narrow the window by one step on each side, keeping it anchored near
    /// its center and never letting it collapse below two steps in width.
    /// A window already at (or below) minimum width is left untouched.
    pub fn zoom_in(&mut self) {
        let unit = self.zoom_step;
        if self.span() > 2 * unit {
            let new_start = (self.end - 2 * unit).min(self.start + unit);
            let new_end = (self.start + 2 * unit).max(self.end - unit);
            self.start = new_start;
            self.end = new_end;
        }
    }

    /// Widen the window by one step on each side, clamped to the series
    /// boundaries. A no-op once the full series is visible.
    pub fn zoom_out(&mut self) {
        self.start = self.start.saturating_sub(self.zoom_step);
        self.end = (self.end + self.zoom_step).min(self.length);
    }

    /// Show the full series.
    pub fn reset(&mut self) {
        self.start = 0;
        self.end = self.length;
    }

    /// The visible slice of a series, clamped to its actual bounds.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let end = self.end.min(rows.len());
        let start = self.start.min(end);
        &rows[start..end]
    }
}

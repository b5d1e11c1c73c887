//! Window parameters and the half-open window type.

use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// Default window width in minutes of total daily activity.
pub const DEFAULT_WINDOW_WIDTH: f64 = 150.0;

/// Default step between consecutive window starts.
pub const DEFAULT_OFFSET: f64 = 20.0;

/// Sliding-window parameters for curve aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowParams {
    /// Width of each window, in minutes of total activity
    #[serde(default = "default_window_width")]
    pub window_width: f64,
    /// Step between consecutive window starts
    #[serde(default = "default_offset")]
    pub offset: f64,
}

fn default_window_width() -> f64 {
    DEFAULT_WINDOW_WIDTH
}
fn default_offset() -> f64 {
    DEFAULT_OFFSET
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl WindowParams {
    pub fn new(window_width: f64, offset: f64) -> Self {
        Self {
            window_width,
            offset,
        }
    }

    /// Reject non-positive or NaN width and offset.
    ///
    /// An infinite width is accepted and yields no windows. The offset must
    /// be finite.
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.window_width != f64::INFINITY {
            CurveError::ensure_positive("window_width", self.window_width)?;
        }
        CurveError::ensure_positive("offset", self.offset)?;
        Ok(())
    }

    /// Window starts `t_min + k * offset` up to `t_max - window_width` inclusive.
    ///
    /// Starts are computed from `k` rather than accumulated so that long runs
    /// do not drift. Yields nothing when the width exceeds the total range.
    pub fn window_starts(&self, t_min: f64, t_max: f64) -> impl Iterator<Item = f64> {
        let last_start = t_max - self.window_width;
        let offset = self.offset;
        (0u64..)
            .map(move |k| t_min + k as f64 * offset)
            .take_while(move |&s| s <= last_start)
    }

    /// The window beginning at `start`.
    pub fn window_at(&self, start: f64) -> Window {
        Window::new(start, start + self.window_width)
    }
}

/// Half-open interval `[start, end)` over total daily activity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

impl Window {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Lower bound inclusive, upper bound exclusive.
    pub fn contains(&self, total: f64) -> bool {
        total >= self.start && total < self.end
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// How day membership is computed for each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStrategy {
    /// Fresh linear scan of every day per window
    #[default]
    FullScan,
    /// Binary search over pre-sorted totals; identical output
    SortedIndex,
}

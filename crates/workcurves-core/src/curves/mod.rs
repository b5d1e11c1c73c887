//! Work curve aggregation.
//!
//! This module turns a dataset of daily activity profiles into curves binned
//! by total daily activity, ordered from the least to the most active window.

mod aggregator;
mod collection;
mod params;

pub use aggregator::{aggregate, CurveAggregator};
pub use collection::{Curve, CurveBundle, CurveCollection};
pub use params::{ScanStrategy, Window, WindowParams, DEFAULT_OFFSET, DEFAULT_WINDOW_WIDTH};

//! # Workcurves Core Library
//!
//! This library computes "work curves": mean hourly activity profiles of days
//! grouped by how active they were overall. A window of fixed width slides
//! over total daily activity, and every non-empty window yields one curve plus
//! the mean self-report of its days.
//!
//! ## Architecture
//!
//! The pipeline is a linear batch sequence of separate calls over immutable
//! values: generate (or load) a dataset, aggregate it, report on the curves.
//!
//! - **Dataset**: day records and the `data`/`self_reports` JSON bundle
//! - **Curves**: the windowed aggregator and the `C`/`C_reports` bundle
//! - **Synthetic**: seeded generator of plausible datasets
//! - **Report**: surface export, color scale, ASCII chart, verification
//! - **Storage**: TOML configuration
//!
//! ## Key Components
//!
//! - [`CurveAggregator`]: Windowed curve aggregation
//! - [`Dataset`]: Immutable day records
//! - [`SyntheticGenerator`]: Synthetic dataset provider
//! - [`Config`]: Application configuration management

pub mod curves;
pub mod dataset;
pub mod error;
pub mod report;
pub mod storage;
pub mod synthetic;

pub use curves::{aggregate, Curve, CurveAggregator, CurveBundle, CurveCollection, ScanStrategy, Window, WindowParams};
pub use dataset::{Dataset, DatasetBundle, DayRecord, HOURS_PER_DAY};
pub use error::{ConfigError, CoreError, CurveError};
pub use report::{render_ascii, surface, verify_curves, LevelAxis, SurfacePoint, VerificationReport};
pub use storage::Config;
pub use synthetic::{SyntheticConfig, SyntheticGenerator};

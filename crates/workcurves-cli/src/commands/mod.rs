pub mod aggregate;
pub mod config;
pub mod generate;
pub mod report;
pub mod run;

use std::path::Path;

use clap::ValueEnum;
use workcurves_core::{Config, LevelAxis, ScanStrategy};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Load the config from `path`, or from the default location.
///
/// An explicit path must exist. A missing default file is created with
/// defaults; a malformed one is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!(
        "Config: window width {}, offset {}, strategy {:?}",
        config.aggregation.window_width,
        config.aggregation.offset,
        config.aggregation.strategy
    );
    Ok(config)
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Fresh linear scan per window
    Scan,
    /// Binary search over sorted totals
    Sorted,
}

impl From<StrategyArg> for ScanStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Scan => ScanStrategy::FullScan,
            StrategyArg::Sorted => ScanStrategy::SortedIndex,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AxisArg {
    /// Window midpoint
    Midpoint,
    /// Sum of the curve's mean profile
    Total,
}

impl From<AxisArg> for LevelAxis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::Midpoint => LevelAxis::WindowMidpoint,
            AxisArg::Total => LevelAxis::CurveTotal,
        }
    }
}

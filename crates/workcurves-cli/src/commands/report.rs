//! Curve report command: ASCII chart or surface export.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use workcurves_core::{render_ascii, surface, CurveCollection, LevelAxis};

use super::{load_config, AxisArg, CmdResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Shaded terminal chart
    Ascii,
    /// Surface points (hour, level, activity, color) as JSON
    Json,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Curve bundle to report on
    #[arg(long)]
    pub curves: PathBuf,
    #[arg(long, value_enum, default_value = "ascii")]
    pub format: ReportFormat,
    /// Activity-level axis (default from config)
    #[arg(long, value_enum)]
    pub axis: Option<AxisArg>,
}

pub fn run(args: ReportArgs, config_path: Option<&Path>) -> CmdResult {
    let config = load_config(config_path)?;
    let axis: LevelAxis = args.axis.map(Into::into).unwrap_or(config.report.level_axis);

    let curves = CurveCollection::load_json(&args.curves)?;
    print!("{}", render(&curves, args.format, axis)?);
    Ok(())
}

pub fn render(
    curves: &CurveCollection,
    format: ReportFormat,
    axis: LevelAxis,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        ReportFormat::Ascii => render_ascii(curves, axis),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(&surface(curves, axis))?;
            json.push('\n');
            json
        }
    })
}

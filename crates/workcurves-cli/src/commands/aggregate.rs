//! Curve aggregation command.

use std::path::{Path, PathBuf};

use clap::Args;
use workcurves_core::{verify_curves, CurveAggregator, Dataset, ScanStrategy, WindowParams};

use super::{load_config, CmdResult, StrategyArg};

#[derive(Args)]
pub struct AggregateArgs {
    /// Input dataset bundle (JSON with `data` and `self_reports`)
    #[arg(long)]
    pub input: PathBuf,
    /// Output curve bundle (JSON with `C` and `C_reports`)
    #[arg(long)]
    pub out: PathBuf,
    /// Window width in minutes (default from config)
    #[arg(long)]
    pub window_width: Option<f64>,
    /// Step between window starts (default from config)
    #[arg(long)]
    pub offset: Option<f64>,
    /// Window membership strategy (default from config)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
    /// Recompute every curve independently and fail on mismatch
    #[arg(long)]
    pub verify: bool,
}

pub fn run(args: AggregateArgs, config_path: Option<&Path>) -> CmdResult {
    let config = load_config(config_path)?;

    let params = WindowParams::new(
        args.window_width.unwrap_or(config.aggregation.window_width),
        args.offset.unwrap_or(config.aggregation.offset),
    );
    let strategy: ScanStrategy = args
        .strategy
        .map(Into::into)
        .unwrap_or(config.aggregation.strategy);

    let dataset = Dataset::load_json(&args.input)?;
    let curves = CurveAggregator::new(params)
        .with_strategy(strategy)
        .aggregate(&dataset)?;

    if args.verify {
        let report = verify_curves(&dataset, &curves, config.report.verify_tolerance);
        if !report.passed() {
            return Err(format!(
                "verification failed: {} membership mismatches, max deviation {:e}",
                report.membership_mismatches.len(),
                report.max_profile_deviation.max(report.max_report_deviation)
            )
            .into());
        }
        println!("Verified {} curves", report.curves_checked);
    }

    curves.save_json(&args.out)?;

    println!("Curves aggregated!");
    println!("  Days: {}", dataset.len());
    println!(
        "  Window: width {}, offset {}",
        params.window_width, params.offset
    );
    println!(
        "  Curves: {} ({} windows attempted)",
        curves.len(),
        curves.windows_attempted()
    );
    println!("  Saved to: {}", args.out.display());
    Ok(())
}

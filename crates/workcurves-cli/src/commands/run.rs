//! Full pipeline command: generate -> aggregate -> report.

use std::path::{Path, PathBuf};

use clap::Args;
use workcurves_core::{render_ascii, surface, verify_curves, CurveAggregator, SyntheticGenerator};

use super::{load_config, CmdResult};

#[derive(Args)]
pub struct RunArgs {
    /// Directory for dataset.json, curves.json and surface.json
    #[arg(long)]
    pub out_dir: PathBuf,
    /// Number of days (default from config)
    #[arg(long)]
    pub days: Option<usize>,
    /// Random seed (default from config, else random)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: RunArgs, config_path: Option<&Path>) -> CmdResult {
    let config = load_config(config_path)?;
    config.validate()?;

    let mut synthetic = config.synthetic.clone();
    if let Some(days) = args.days {
        synthetic.days = days;
    }
    if args.seed.is_some() {
        synthetic.seed = args.seed;
    }

    std::fs::create_dir_all(&args.out_dir)?;
    let dataset_path = args.out_dir.join("dataset.json");
    let curves_path = args.out_dir.join("curves.json");
    let surface_path = args.out_dir.join("surface.json");

    let dataset = SyntheticGenerator::with_config(synthetic).generate()?;
    dataset.save_json(&dataset_path)?;

    let curves = CurveAggregator::new(config.aggregation.params())
        .with_strategy(config.aggregation.strategy)
        .aggregate(&dataset)?;
    curves.save_json(&curves_path)?;

    let verification = verify_curves(&dataset, &curves, config.report.verify_tolerance);
    if !verification.passed() {
        return Err("curve verification failed".into());
    }

    let axis = config.report.level_axis;
    std::fs::write(
        &surface_path,
        serde_json::to_string_pretty(&surface(&curves, axis))?,
    )?;

    print!("{}", render_ascii(&curves, axis));
    println!("\nPipeline complete!");
    println!("  Dataset: {} ({} days)", dataset_path.display(), dataset.len());
    println!("  Curves: {} ({} curves)", curves_path.display(), curves.len());
    println!("  Surface: {}", surface_path.display());
    Ok(())
}

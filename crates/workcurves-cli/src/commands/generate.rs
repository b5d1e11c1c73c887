//! Synthetic dataset generation command.

use std::path::{Path, PathBuf};

use clap::Args;
use workcurves_core::SyntheticGenerator;

use super::{load_config, CmdResult};

#[derive(Args)]
pub struct GenerateArgs {
    /// Output dataset bundle (JSON)
    #[arg(long)]
    pub out: PathBuf,
    /// Number of days (default from config)
    #[arg(long)]
    pub days: Option<usize>,
    /// Random seed (default from config, else random)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: GenerateArgs, config_path: Option<&Path>) -> CmdResult {
    let mut synthetic = load_config(config_path)?.synthetic;
    if let Some(days) = args.days {
        synthetic.days = days;
    }
    if args.seed.is_some() {
        synthetic.seed = args.seed;
    }

    let dataset = SyntheticGenerator::with_config(synthetic).generate()?;
    dataset.save_json(&args.out)?;

    let (lo, hi) = dataset.total_range().unwrap_or((0.0, 0.0));
    println!("Dataset generated!");
    println!("  Days: {}", dataset.len());
    println!("  Total activity range: {:.1} - {:.1} min", lo, hi);
    println!("  Saved to: {}", args.out.display());
    Ok(())
}

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "workcurves", version, about = "Work curve aggregation CLI")]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Config file (default: ~/.config/workcurves/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic dataset
    Generate(commands::generate::GenerateArgs),
    /// Aggregate a dataset into work curves
    Aggregate(commands::aggregate::AggregateArgs),
    /// Render or export a curve collection
    Report(commands::report::ReportArgs),
    /// Generate, aggregate and report in one go
    Run(commands::run::RunArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(args, config),
        Commands::Aggregate(args) => commands::aggregate::run(args, config),
        Commands::Report(args) => commands::report::run(args, config),
        Commands::Run(args) => commands::run::run(args, config),
        Commands::Config { action } => commands::config::run(action, config),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "workcurves", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

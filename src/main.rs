use clap::{Parser, Subcommand};
use rankviz::tasks::dual_heatmap::{DualHeatmap, DualHeatmapArgs};
use rankviz::tasks::heatmap::{Heatmap, HeatmapArgs};
use rankviz::tasks::scaling::{Scaling, ScalingArgs};

/// Runs relaxation benchmark sweeps and plots their rank-error output.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    // The plot task to execute
    #[clap(subcommand)]
    task: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sweep operations and prefill for one heuristic and draw a heatmap
    Heatmap(HeatmapArgs),

    /// Run the same sweep for both heuristics and draw side-by-side
    /// heatmaps over a shared color scale
    DualHeatmap(DualHeatmapArgs),

    /// Sweep the number of partial or sub-queues and draw a log-log
    /// scaling curve
    Scaling(ScalingArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match &cli.task {
        Command::Heatmap(args) => Heatmap::run(args),
        Command::DualHeatmap(args) => DualHeatmap::run(args),
        Command::Scaling(args) => Scaling::run(args),
    }
}

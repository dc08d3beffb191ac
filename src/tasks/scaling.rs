use crate::matrix::{scaling_series, AxisComponent};
use crate::plot::{self, ScalingOptions};
use crate::results::ResultSet;
use crate::sweep::{AxisArg, FixedArg, Heuristic, Readout, SweepKind, SweepRunner, SweepSpec};
use crate::tasks::{resolve_save_path, run_and_load};
use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ScalingArgs {
    /// List with number of partial queues to sweep
    #[arg(short, long, num_args = 1.., conflicts_with = "subqueues")]
    partials: Vec<u64>,

    /// List with number of sub-queues to sweep
    #[arg(short, long, num_args = 1..)]
    subqueues: Vec<u64>,

    /// Number of operations to run
    #[arg(short, long)]
    operations: Option<u64>,

    /// Number of items to insert before test start
    #[arg(short = 'i', long)]
    prefill: Option<u64>,

    /// The number of runs to do for each data point
    #[arg(short, long, default_value = "1")]
    runs: u32,

    #[arg(long, value_enum, default_value_t = Heuristic::Operation)]
    heuristic: Heuristic,

    /// How to read out the error from each simulation
    #[arg(long, value_enum, default_value_t = Readout::Average)]
    readout: Readout,

    /// Path to an earlier artifact, plotting it without re-running the sweep
    #[arg(long)]
    old_json: Option<PathBuf>,

    /// Saves the graph to this path if supplied
    #[arg(long)]
    save_path: Option<PathBuf>,

    /// The title of the graph
    #[arg(long, default_value = "Operation Heuristic Scalability")]
    title: String,

    /// Command used to launch the benchmark binary
    #[arg(long, default_value = "cargo run -r --")]
    bench_cmd: String,
}

/// Sweeps one queue dimension and draws the rank error against it on
/// log-log axes.
#[derive(Debug)]
pub struct Scaling {}

impl Scaling {
    fn sweep_spec(args: &ScalingArgs) -> Result<SweepSpec> {
        let (kind, axis) = match (args.partials.is_empty(), args.subqueues.is_empty()) {
            (false, true) => (
                SweepKind::PartialsAndPrefill,
                AxisArg {
                    flag: "-p",
                    values: args.partials.clone(),
                },
            ),
            (true, false) => (
                SweepKind::SubqueuesAndPrefill,
                AxisArg {
                    flag: "-s",
                    values: args.subqueues.clone(),
                },
            ),
            _ => bail!("provide exactly one of --partials or --subqueues, or --old-json"),
        };

        let (Some(operations), Some(prefill)) = (args.operations, args.prefill) else {
            bail!("provide --operations and --prefill, or --old-json");
        };

        Ok(SweepSpec {
            kind,
            axes: vec![axis],
            fixed: vec![
                FixedArg {
                    flag: "-o",
                    value: operations,
                },
                FixedArg {
                    flag: "-i",
                    value: prefill,
                },
            ],
            runs: args.runs,
            heuristic: args.heuristic,
            readout: args.readout,
        })
    }

    pub fn run(args: &ScalingArgs) -> Result<()> {
        let set = match &args.old_json {
            Some(path) => ResultSet::from_path(path)?,
            None => {
                let spec = Self::sweep_spec(args)?;
                let runner = SweepRunner::new(&args.bench_cmd)?;
                run_and_load(&runner, &spec)?
            }
        };

        // Keys are (count, operations) pairs: the swept count is the first
        // component regardless of which dimension it belongs to.
        let series = scaling_series(&set, AxisComponent::First);

        let x_label = if !args.subqueues.is_empty() {
            "sub-queues"
        } else {
            "partial queues"
        };
        let color_label = match args.heuristic {
            Heuristic::Length => "dark-orange",
            Heuristic::Operation => "dark-blue",
        };

        let save_path = resolve_save_path(args.save_path.as_deref(), "scaling.svg")?;
        plot::render_scaling(
            &save_path,
            &series,
            &ScalingOptions {
                title: &args.title,
                x_label,
                value_label: args.readout.value_label(),
                color_label,
            },
        )?;
        plot::report_plot_written(&save_path);

        Ok(())
    }
}

use crate::matrix::{assemble, shared_axes};
use crate::plot::{self, HeatmapOptions, HeatmapPanel, ScaleKind};
use crate::results::ResultSet;
use crate::sweep::{Heuristic, Readout, SweepRunner};
use crate::tasks::heatmap::{grid_sweep_spec, HeatmapGrid};
use crate::tasks::{color_bounds, resolve_save_path, run_and_load};
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct DualHeatmapArgs {
    /// Which parameter grid to sweep
    #[arg(long, value_enum, default_value_t = HeatmapGrid::OpsAndPrefill)]
    grid: HeatmapGrid,

    /// Operation counts: the swept list on the ops-and-prefill grid, a
    /// single fixed count on the partials-and-prefill one
    #[arg(short, long, num_args = 1.., value_name = "OPS")]
    operations: Vec<u64>,

    /// Prefill list (swept axis on either grid)
    #[arg(short = 'i', long, num_args = 1.., value_name = "PREFILL")]
    prefill: Vec<u64>,

    /// Partial queue counts: a single fixed count on the ops-and-prefill
    /// grid, the swept list on the partials-and-prefill one
    #[arg(short, long, num_args = 1.., value_name = "PARTIALS")]
    partials: Vec<u64>,

    /// The number of runs to do for each data point
    #[arg(short, long, default_value = "1")]
    runs: u32,

    /// How to read out the error from each simulation
    #[arg(long, value_enum, default_value_t = Readout::Average)]
    readout: Readout,

    /// Saved artifact for the length heuristic, bypassing its invocation
    #[arg(long)]
    length_json: Option<PathBuf>,

    /// Saved artifact for the operation heuristic, bypassing its invocation
    #[arg(long)]
    operation_json: Option<PathBuf>,

    /// Saves the heatmaps to this path if supplied
    #[arg(short, long)]
    save_path: Option<PathBuf>,

    /// Puts explicit bounds on the shared color-bar
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    color_bounds: Option<Vec<f64>>,

    /// Linear color scale instead of the default logarithmic one
    #[arg(long)]
    linear_scale: bool,

    /// Command used to launch the benchmark binary
    #[arg(long, default_value = "cargo run -r --")]
    bench_cmd: String,
}

/// Runs the same sweep once per heuristic and renders both result sets side
/// by side over one shared color scale, so the panels stay comparable.
#[derive(Debug)]
pub struct DualHeatmap {}

impl DualHeatmap {
    fn resolve_set(
        args: &DualHeatmapArgs,
        runner: &SweepRunner,
        heuristic: Heuristic,
        saved: Option<&Path>,
    ) -> Result<ResultSet> {
        if let Some(path) = saved {
            return Ok(ResultSet::from_path(path)?);
        }

        let spec = grid_sweep_spec(
            args.grid,
            &args.operations,
            &args.prefill,
            &args.partials,
            None,
            args.runs,
            heuristic,
            args.readout,
        )?;
        run_and_load(runner, &spec)
    }

    pub fn run(args: &DualHeatmapArgs) -> Result<()> {
        let runner = SweepRunner::new(&args.bench_cmd)?;

        // The two invocations are independent; sequential execution is fine.
        let length_set =
            Self::resolve_set(args, &runner, Heuristic::Length, args.length_json.as_deref())?;
        let operation_set = Self::resolve_set(
            args,
            &runner,
            Heuristic::Operation,
            args.operation_json.as_deref(),
        )?;

        let (axis1, axis2) = shared_axes(&[&length_set, &operation_set]);
        let length_matrix = assemble(&length_set, &axis1, &axis2)?;
        let operation_matrix = assemble(&operation_set, &axis1, &axis2)?;

        let bounds = color_bounds(
            args.color_bounds.as_deref(),
            &[&length_set, &operation_set],
        )?;

        let save_path = resolve_save_path(args.save_path.as_deref(), "dual-heatmap.svg")?;
        let panels = [
            HeatmapPanel {
                matrix: &length_matrix,
                title: Some("length heuristic"),
            },
            HeatmapPanel {
                matrix: &operation_matrix,
                title: Some("operation heuristic"),
            },
        ];
        plot::render_heatmaps(
            &save_path,
            &panels,
            &axis1,
            &axis2,
            &HeatmapOptions {
                bounds,
                scale: if args.linear_scale {
                    ScaleKind::Linear
                } else {
                    ScaleKind::Log
                },
                show_colorbar: true,
                x_label: args.grid.x_label(),
                y_label: args.grid.y_label(),
                value_label: args.readout.value_label(),
            },
        )?;
        plot::report_plot_written(&save_path);

        Ok(())
    }
}

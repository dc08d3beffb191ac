use crate::matrix::{assemble, shared_axes};
use crate::plot::{self, HeatmapOptions, HeatmapPanel, ScaleKind};
use crate::results::ResultSet;
use crate::sweep::{AxisArg, FixedArg, Heuristic, Readout, SweepKind, SweepRunner, SweepSpec};
use crate::tasks::{color_bounds, resolve_save_path, run_and_load};
use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use std::fmt;
use std::path::PathBuf;

/// Which parameter grid the heatmap covers. The grid decides which flags are
/// swept lists and which are fixed scalars, and how the axes are labelled.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum HeatmapGrid {
    /// operations x prefill, with a fixed queue count
    OpsAndPrefill,
    /// partial queues x prefill, with a fixed operation count
    PartialsAndPrefill,
}

impl fmt::Display for HeatmapGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeatmapGrid::OpsAndPrefill => write!(f, "ops-and-prefill"),
            HeatmapGrid::PartialsAndPrefill => write!(f, "partials-and-prefill"),
        }
    }
}

impl HeatmapGrid {
    /// Key order follows the sweep, so axis 1 (x) is the first tuple
    /// component of the artifact keys.
    pub fn x_label(&self) -> &'static str {
        match self {
            HeatmapGrid::OpsAndPrefill => "prefill",
            HeatmapGrid::PartialsAndPrefill => "partials",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            HeatmapGrid::OpsAndPrefill => "operations",
            HeatmapGrid::PartialsAndPrefill => "prefill",
        }
    }
}

/// Build the benchmark invocation for one heatmap grid out of the shared
/// flag set. Which of `operations` and `partials` is the swept list and
/// which the fixed scalar depends on the grid.
#[allow(clippy::too_many_arguments)]
pub(crate) fn grid_sweep_spec(
    grid: HeatmapGrid,
    operations: &[u64],
    prefill: &[u64],
    partials: &[u64],
    subqueues: Option<u64>,
    runs: u32,
    heuristic: Heuristic,
    readout: Readout,
) -> Result<SweepSpec> {
    let (kind, axes, fixed) = match grid {
        HeatmapGrid::OpsAndPrefill => {
            if operations.is_empty() || prefill.is_empty() {
                bail!("the {grid} grid needs --operations and --prefill lists");
            }
            let fixed = match (partials, subqueues) {
                ([partials], None) => FixedArg {
                    flag: "-p",
                    value: *partials,
                },
                ([], Some(subqueues)) => FixedArg {
                    flag: "-s",
                    value: subqueues,
                },
                _ => bail!(
                    "the {grid} grid needs exactly one fixed queue count: \
                     a single --partials value or --subqueues"
                ),
            };
            (
                SweepKind::OpsAndPrefill,
                vec![
                    AxisArg {
                        flag: "-o",
                        values: operations.to_vec(),
                    },
                    AxisArg {
                        flag: "-i",
                        values: prefill.to_vec(),
                    },
                ],
                fixed,
            )
        }
        HeatmapGrid::PartialsAndPrefill => {
            if partials.is_empty() || prefill.is_empty() {
                bail!("the {grid} grid needs --partials and --prefill lists");
            }
            let [operations] = operations else {
                bail!("the {grid} grid needs a single fixed --operations count");
            };
            if subqueues.is_some() {
                bail!("--subqueues does not apply to the {grid} grid");
            }
            (
                SweepKind::PartialsAndPrefill,
                vec![
                    AxisArg {
                        flag: "-p",
                        values: partials.to_vec(),
                    },
                    AxisArg {
                        flag: "-i",
                        values: prefill.to_vec(),
                    },
                ],
                FixedArg {
                    flag: "-o",
                    value: *operations,
                },
            )
        }
    };

    Ok(SweepSpec {
        kind,
        axes,
        fixed: vec![fixed],
        runs,
        heuristic,
        readout,
    })
}

#[derive(Debug, Args)]
pub struct HeatmapArgs {
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
    #[arg(short, long, num_args = 1.., value_name = "PARTIALS", conflicts_with = "subqueues")]
    partials: Vec<u64>,

    /// Fixed number of sub-queues (ops-and-prefill grid only)
    #[arg(short, long)]
    subqueues: Option<u64>,

    /// The number of runs to do for each data point
    #[arg(short, long, default_value = "1")]
    runs: u32,

    #[arg(long, value_enum, default_value_t = Heuristic::Length)]
    heuristic: Heuristic,

    /// How to read out the error from each simulation
    #[arg(long, value_enum, default_value_t = Readout::Average)]
    readout: Readout,

    /// Path to an earlier artifact, plotting it without re-running the sweep
    #[arg(long)]
    earlier_json: Option<PathBuf>,

    /// Saves the heatmap to this path if supplied
    #[arg(long)]
    save_path: Option<PathBuf>,

    /// The title of the heatmap, defaults to no title
    #[arg(long)]
    title: Option<String>,

    /// Puts explicit bounds on the heatmap color-bar
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    color_bounds: Option<Vec<f64>>,

    /// Hides the color bar of the heatmap
    #[arg(long)]
    hide_colorbar: bool,

    /// Linear color scale instead of the default logarithmic one
    #[arg(long)]
    linear_scale: bool,

    /// Command used to launch the benchmark binary
    #[arg(long, default_value = "cargo run -r --")]
    bench_cmd: String,
}

#[derive(Debug)]
pub struct Heatmap {}

impl Heatmap {
    fn sweep_spec(args: &HeatmapArgs) -> Result<SweepSpec> {
        grid_sweep_spec(
            args.grid,
            &args.operations,
            &args.prefill,
            &args.partials,
            args.subqueues,
            args.runs,
            args.heuristic,
            args.readout,
        )
    }

    pub fn run(args: &HeatmapArgs) -> Result<()> {
        let set = match &args.earlier_json {
            Some(path) => ResultSet::from_path(path)?,
            None => {
                let spec = Self::sweep_spec(args)?;
                let runner = SweepRunner::new(&args.bench_cmd)?;
                run_and_load(&runner, &spec)?
            }
        };

        // Axis 1 holds the first key component on x: prefill on the ops
        // grid, partial queues on the partials grid.
        let (axis1, axis2) = shared_axes(&[&set]);
        let matrix = assemble(&set, &axis1, &axis2)?;
        let bounds = color_bounds(args.color_bounds.as_deref(), &[&set])?;

        let save_path = resolve_save_path(args.save_path.as_deref(), "heatmap.svg")?;
        let panels = [HeatmapPanel {
            matrix: &matrix,
            title: args.title.as_deref(),
        }];
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
                show_colorbar: !args.hide_colorbar,
                x_label: args.grid.x_label(),
                y_label: args.grid.y_label(),
                value_label: args.readout.value_label(),
            },
        )?;
        plot::report_plot_written(&save_path);

        Ok(())
    }
}

pub mod dual_heatmap;
pub mod heatmap;
pub mod scaling;

use crate::bounds::Bounds;
use crate::env::Env;
use crate::results::{extract_output_path, ResultSet};
use crate::sweep::{SweepRunner, SweepSpec};
use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Invoke the benchmark once and load the artifact it announces on stdout.
pub(crate) fn run_and_load(runner: &SweepRunner, spec: &SweepSpec) -> Result<ResultSet> {
    let stdout = runner.run(spec)?;

    // Echo the benchmark's own report before parsing it
    print!("{stdout}");

    let path = extract_output_path(&stdout)?;
    Ok(ResultSet::from_path(&path)?)
}

/// Figure placement: an explicit path, or `plots/<name>` under the current
/// directory. The parent directory is created either way.
pub(crate) fn resolve_save_path(save_path: Option<&Path>, default_name: &str) -> Result<PathBuf> {
    let path = match save_path {
        Some(path) => path.to_path_buf(),
        None => Env::plots_root().join(default_name),
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(path)
}

/// Colorbar bounds: explicit `--color-bounds MIN MAX` if given, otherwise
/// computed over every result set so all panels share one scale.
pub(crate) fn color_bounds(explicit: Option<&[f64]>, sets: &[&ResultSet]) -> Result<Bounds> {
    match explicit {
        Some([min, max]) => Ok(Bounds::new(*min, *max)?),
        Some(other) => bail!(
            "--color-bounds takes exactly two values, got {}",
            other.len()
        ),
        None => {
            let bounds = Bounds::from_result_sets(sets)?;
            println!(
                "{}: using colorbar bounds {} and {}",
                Env::SYS_NAME,
                bounds.min(),
                bounds.max()
            );
            Ok(bounds)
        }
    }
}

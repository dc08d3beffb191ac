use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between launching the benchmark and handing
/// assembled data to the renderer. All of these are terminal for the current
/// sweep: there is no partial-result recovery.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed coordinate key: {0:?}")]
    KeyDecode(String),

    #[error("no 'Writing output to:' line found in benchmark output")]
    MissingOutputMarker,

    #[error("found {0} 'Writing output to:' lines in benchmark output, expected exactly one")]
    AmbiguousOutputMarker(usize),

    #[error("malformed result artifact {}: {reason}", path.display())]
    Artifact { path: PathBuf, reason: String },

    #[error("benchmark invocation failed (exit code {status:?}): {stderr}")]
    Invocation { status: Option<i32>, stderr: String },

    #[error("malformed benchmark launcher command: {0}")]
    Launcher(String),

    #[error("coordinate {0} has no position in the axis indices")]
    UnmappedCoordinate(String),

    #[error("cannot compute bounds over an empty result set")]
    EmptyResultSet,

    #[error("non-finite metric value {0} in result set")]
    NonFiniteValue(f64),

    #[error("invalid bounds: min {min} > max {max}")]
    InvalidBounds { min: f64, max: f64 },

    #[error("logarithmic scale requires strictly positive bounds, got min {0}")]
    LogScale(f64),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

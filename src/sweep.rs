use crate::env::Env;
use crate::error::{Error, Result};
use clap::ValueEnum;
use log::{debug, error};
use std::fmt;
use std::process::Command;

/// Sampling heuristic of the relaxed queue under test. Two variants of the
/// same sweep are compared by invoking the benchmark once per heuristic.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
pub enum Heuristic {
    Length,
    Operation,
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Length => write!(f, "length"),
            Heuristic::Operation => write!(f, "operation"),
        }
    }
}

/// How the benchmark reduces repeated runs into one metric per coordinate.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum Readout {
    Average,
    WorstOnePercent,
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readout::Average => write!(f, "average"),
            Readout::WorstOnePercent => write!(f, "worst-one-percent"),
        }
    }
}

impl Readout {
    pub fn value_label(&self) -> &'static str {
        match self {
            Readout::Average => "Average Rank Error",
            Readout::WorstOnePercent => "Worst 1% point Rank Error",
        }
    }
}

/// The benchmark subcommand selecting which parameter grid is swept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepKind {
    OpsAndPrefill,
    PartialsAndPrefill,
    SubqueuesAndPrefill,
}

impl fmt::Display for SweepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepKind::OpsAndPrefill => write!(f, "ops-and-prefill"),
            SweepKind::PartialsAndPrefill => write!(f, "partials-and-prefill"),
            SweepKind::SubqueuesAndPrefill => write!(f, "subqueues-and-prefill"),
        }
    }
}

/// A swept (list-valued) benchmark flag, serialized as one value per argv
/// entry after its flag.
#[derive(Clone, Debug)]
pub struct AxisArg {
    pub flag: &'static str,
    pub values: Vec<u64>,
}

/// A fixed scalar benchmark flag.
#[derive(Clone, Copy, Debug)]
pub struct FixedArg {
    pub flag: &'static str,
    pub value: u64,
}

/// One full benchmark invocation: the parameter grid for one variant.
#[derive(Clone, Debug)]
pub struct SweepSpec {
    pub kind: SweepKind,
    pub axes: Vec<AxisArg>,
    pub fixed: Vec<FixedArg>,
    pub runs: u32,
    pub heuristic: Heuristic,
    pub readout: Readout,
}

impl SweepSpec {
    /// Serialize to the benchmark's argv, after the launcher tokens.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![self.kind.to_string()];

        for axis in &self.axes {
            args.push(axis.flag.to_string());
            args.extend(axis.values.iter().map(|value| value.to_string()));
        }
        for fixed in &self.fixed {
            args.push(fixed.flag.to_string());
            args.push(fixed.value.to_string());
        }

        args.push("-r".to_string());
        args.push(self.runs.to_string());
        args.push("--heuristic".to_string());
        args.push(self.heuristic.to_string());
        args.push("--readout".to_string());
        args.push(self.readout.to_string());

        args
    }
}

/// Executes benchmark invocations through a configurable launcher command
/// (by default `cargo run -r --`, run from the benchmark's own checkout).
#[derive(Debug)]
pub struct SweepRunner {
    launcher: Vec<String>,
}

impl SweepRunner {
    pub fn new(bench_cmd: &str) -> Result<SweepRunner> {
        let launcher =
            shell_words::split(bench_cmd).map_err(|_| Error::Launcher(bench_cmd.to_string()))?;
        if launcher.is_empty() {
            return Err(Error::Launcher(bench_cmd.to_string()));
        }
        Ok(SweepRunner { launcher })
    }

    /// Run one invocation to completion and return its captured stdout.
    ///
    /// A nonzero exit status is fatal for the whole sweep: the captured
    /// stderr is reported and the error propagates. Not retried.
    pub fn run(&self, spec: &SweepSpec) -> Result<String> {
        let args = spec.to_args();
        debug!(
            "{}(sweep): running: {} {}",
            Env::SYS_NAME,
            shell_words::join(&self.launcher),
            shell_words::join(&args)
        );

        let output = Command::new(&self.launcher[0])
            .args(&self.launcher[1..])
            .args(&args)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!(
                "{}(sweep): benchmark invocation failed:\n{stderr}",
                Env::SYS_NAME
            );
            return Err(Error::Invocation {
                status: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

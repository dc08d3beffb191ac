//! Sweep orchestration and plotting for the relaxed-queue rank-error
//! benchmark.
//!
//! The pipeline invokes the external benchmark binary over a parameter
//! grid, follows the artifact path it announces on stdout, decodes the
//! sparse key-encoded JSON it writes, reshapes the samples into dense
//! matrices or ordered series, and renders heatmaps and scaling curves.

pub mod bounds;
pub mod color;
pub mod env;
pub mod error;
pub mod key;
pub mod matrix;
pub mod plot;
pub mod results;
pub mod sweep;
pub mod tasks;

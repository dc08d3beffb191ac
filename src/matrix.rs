use crate::env::Env;
use crate::error::{Error, Result};
use crate::results::ResultSet;
use log::debug;

/// Which component of a coordinate a transform reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisComponent {
    First,
    Second,
}

impl AxisComponent {
    fn of(&self, coord: &crate::key::Coord) -> f64 {
        match self {
            AxisComponent::First => coord.first,
            AxisComponent::Second => coord.second,
        }
    }
}

/// Sorted-unique axis values mapped to dense positions `0..k-1`.
///
/// Built per result set, or from an explicit union of sets when panels need
/// to share axes. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisIndex {
    values: Vec<f64>,
}

impl AxisIndex {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> AxisIndex {
        let mut values: Vec<f64> = values.into_iter().collect();
        values.sort_by(f64::total_cmp);
        values.dedup_by(|a, b| a == b);
        AxisIndex { values }
    }

    pub fn position(&self, value: f64) -> Option<usize> {
        self.values.binary_search_by(|v| v.total_cmp(&value)).ok()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A zero-filled 2-D array sized by the two axis cardinalities. Cells with
/// no sample keep the default; sparse grids are possible if the sweep was
/// irregular.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl DenseMatrix {
    pub fn zeros(rows: usize, cols: usize) -> DenseMatrix {
        DenseMatrix {
            rows,
            cols,
            cells: vec![0.0; rows * cols],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.cells[row * self.cols + col] = value;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// Build the two axis indices covering every coordinate in the given sets.
/// Axis 1 collects first components, axis 2 second components.
pub fn shared_axes(sets: &[&ResultSet]) -> (AxisIndex, AxisIndex) {
    let axis1 = AxisIndex::from_values(
        sets.iter()
            .flat_map(|set| set.samples().iter().map(|s| s.coord.first)),
    );
    let axis2 = AxisIndex::from_values(
        sets.iter()
            .flat_map(|set| set.samples().iter().map(|s| s.coord.second)),
    );
    (axis1, axis2)
}

/// Write every sample into a dense `(|axis1|, |axis2|)` matrix at the cell
/// its coordinate maps to.
///
/// Duplicate coordinates silently overwrite in iteration order (last write
/// wins), matching the benchmark's own artifact semantics; the overwrite is
/// logged at debug level.
pub fn assemble(set: &ResultSet, axis1: &AxisIndex, axis2: &AxisIndex) -> Result<DenseMatrix> {
    let mut matrix = DenseMatrix::zeros(axis1.len(), axis2.len());
    let mut written = vec![false; axis1.len() * axis2.len()];

    for sample in set.samples() {
        let row = axis1
            .position(sample.coord.first)
            .ok_or_else(|| Error::UnmappedCoordinate(sample.coord.to_string()))?;
        let col = axis2
            .position(sample.coord.second)
            .ok_or_else(|| Error::UnmappedCoordinate(sample.coord.to_string()))?;

        if written[row * axis2.len() + col] {
            debug!(
                "{}(matrix): duplicate coordinate {}, keeping later value",
                Env::SYS_NAME,
                sample.coord
            );
        }
        written[row * axis2.len() + col] = true;
        matrix.set(row, col, sample.value);
    }

    Ok(matrix)
}

/// The 1-D variant used for scaling curves: (axis value, metric value)
/// pairs sorted ascending by the designated coordinate component.
pub fn scaling_series(set: &ResultSet, component: AxisComponent) -> Vec<(f64, f64)> {
    let mut series: Vec<(f64, f64)> = set
        .samples()
        .iter()
        .map(|sample| (component.of(&sample.coord), sample.value))
        .collect();
    series.sort_by(|a, b| a.0.total_cmp(&b.0));
    series
}

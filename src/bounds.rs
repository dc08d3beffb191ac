use crate::error::{Error, Result};
use crate::results::ResultSet;

/// Shared normalization bounds for comparative rendering: one (min, max)
/// pair over the union of all panels' values, so side-by-side heatmaps use
/// one color scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Result<Bounds> {
        if !min.is_finite() {
            return Err(Error::NonFiniteValue(min));
        }
        if !max.is_finite() {
            return Err(Error::NonFiniteValue(max));
        }
        if min > max {
            return Err(Error::InvalidBounds { min, max });
        }
        Ok(Bounds { min, max })
    }

    /// Compute bounds over every value of one or more result sets.
    ///
    /// All-equal values yield a zero-width range (min == max); renderers
    /// must handle that without dividing by zero.
    pub fn from_result_sets(sets: &[&ResultSet]) -> Result<Bounds> {
        Self::from_values(sets.iter().flat_map(|set| set.values()))
    }

    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Result<Bounds> {
        let mut bounds: Option<(f64, f64)> = None;

        for value in values {
            if !value.is_finite() {
                return Err(Error::NonFiniteValue(value));
            }
            bounds = Some(match bounds {
                None => (value, value),
                Some((min, max)) => (min.min(value), max.max(value)),
            });
        }

        let (min, max) = bounds.ok_or(Error::EmptyResultSet)?;
        Ok(Bounds { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Logarithmic scaling needs strictly positive bounds.
    pub fn log_safe(&self) -> bool {
        self.min > 0.0
    }

    /// Map a value to [0, 1] within the bounds, optionally through a log
    /// transform. A zero-width range maps everything to the middle.
    pub fn normalize(&self, value: f64, log: bool) -> f64 {
        let (lo, hi, v) = if log {
            (self.min.ln(), self.max.ln(), value.ln())
        } else {
            (self.min, self.max, value)
        };

        if hi == lo {
            return 0.5;
        }
        ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Coord;
    use crate::results::Sample;

    fn set(values: &[f64]) -> ResultSet {
        ResultSet::from_samples(
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| Sample {
                    coord: Coord::new(i as f64, 0.0),
                    value,
                })
                .collect(),
        )
    }

    #[test]
    fn shared_bounds_span_all_sets() {
        let a = set(&[0.1, 0.5]);
        let b = set(&[0.2, 0.9]);
        let bounds = Bounds::from_result_sets(&[&a, &b]).unwrap();

        assert_eq!((bounds.min(), bounds.max()), (0.1, 0.9));
        for value in a.values().chain(b.values()) {
            assert!(value >= bounds.min() && value <= bounds.max());
        }
    }

    #[test]
    fn all_equal_values_give_zero_width_bounds() {
        let bounds = Bounds::from_result_sets(&[&set(&[3.0, 3.0])]).unwrap();
        assert_eq!((bounds.min(), bounds.max()), (3.0, 3.0));
        assert_eq!(bounds.normalize(3.0, false), 0.5);
        assert_eq!(bounds.normalize(3.0, true), 0.5);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            Bounds::from_result_sets(&[&set(&[])]),
            Err(Error::EmptyResultSet)
        ));
        assert!(matches!(
            Bounds::from_result_sets(&[]),
            Err(Error::EmptyResultSet)
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(matches!(
            Bounds::from_result_sets(&[&set(&[0.1, f64::NAN])]),
            Err(Error::NonFiniteValue(_))
        ));
        assert!(Bounds::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn inverted_explicit_bounds_are_rejected() {
        assert!(matches!(
            Bounds::new(2.0, 1.0),
            Err(Error::InvalidBounds { .. })
        ));
    }

    #[test]
    fn log_safety_requires_positive_min() {
        assert!(Bounds::new(0.1, 10.0).unwrap().log_safe());
        assert!(!Bounds::new(0.0, 10.0).unwrap().log_safe());
        assert!(!Bounds::new(-1.0, 10.0).unwrap().log_safe());
    }

    #[test]
    fn normalize_is_clamped_and_monotonic() {
        let bounds = Bounds::new(1.0, 100.0).unwrap();
        assert_eq!(bounds.normalize(0.5, false), 0.0);
        assert_eq!(bounds.normalize(200.0, false), 1.0);
        assert!(bounds.normalize(10.0, true) > bounds.normalize(2.0, true));
        // Log midpoint of [1, 100] is 10.
        assert!((bounds.normalize(10.0, true) - 0.5).abs() < 1e-12);
    }
}

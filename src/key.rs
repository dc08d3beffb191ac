use crate::error::{Error, Result};
use std::fmt;

/// A swept configuration point, decoded from the benchmark's textual key
/// format, e.g. `"(128, 4096)"`.
///
/// The codec is order-preserving and axis-agnostic: the first element is
/// sometimes the first swept axis and sometimes the second, so callers fix
/// the mapping. Only the fixed 2-tuple-of-numbers grammar is accepted; the
/// key is never evaluated as code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub first: f64,
    pub second: f64,
}

impl Coord {
    pub fn new(first: f64, second: f64) -> Self {
        Coord { first, second }
    }

    /// Parse a `( number , number )` literal. Anything else, including
    /// tuples of other arities or non-finite numbers, is a decode error.
    pub fn decode(text: &str) -> Result<Coord> {
        let malformed = || Error::KeyDecode(text.to_string());

        let inner = text
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;

        let mut parts = inner.splitn(2, ',');
        let first = parts.next().ok_or_else(malformed)?;
        let second = parts.next().ok_or_else(malformed)?;

        let first: f64 = first.trim().parse().map_err(|_| malformed())?;
        let second: f64 = second.trim().parse().map_err(|_| malformed())?;

        if !first.is_finite() || !second.is_finite() {
            return Err(malformed());
        }

        Ok(Coord { first, second })
    }

    /// Inverse of [`Coord::decode`]: integral values render without a
    /// fractional part, matching how the benchmark writes its keys.
    pub fn encode(&self) -> String {
        format!(
            "({}, {})",
            fmt_axis_value(self.first),
            fmt_axis_value(self.second)
        )
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// Render an axis value the way the sweep grids declare them: `128` rather
/// than `128.0` for whole numbers.
pub fn fmt_axis_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

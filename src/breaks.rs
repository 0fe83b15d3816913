//! Breakpoints, the boundary sequence derived from them, and the intervals
//! that boundary sequence describes.

use std::fmt;

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{BinsError, Result};

/// Which edge of every interval is inclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Closed {
    /// `[a, b)`
    #[default]
    Left,
    /// `(a, b]`
    Right,
}

/// A single bin. The outermost bins of a boundary sequence have an infinite
/// `lower` or `upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
    pub closed: Closed,
}

impl Interval {
    pub fn new(lower: f64, upper: f64, closed: Closed) -> Self {
        Self { lower, upper, closed }
    }

    pub fn contains(&self, value: f64) -> bool {
        match self.closed {
            Closed::Left => self.lower <= value && value < self.upper,
            Closed::Right => self.lower < value && value <= self.upper,
        }
    }

    /// True for the zero-width bins produced by duplicate breakpoints.
    pub fn is_empty(&self) -> bool {
        self.lower >= self.upper
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.closed {
            Closed::Left => write!(f, "[{}, {})", self.lower, self.upper),
            Closed::Right => write!(f, "({}, {}]", self.lower, self.upper),
        }
    }
}

/// Build the full boundary sequence: the breakpoints plus `-inf` and `inf`,
/// sorted ascending.
///
/// Breakpoints need not be sorted or unique. Duplicates are kept, so the
/// result always has `breaks.len() + 2` entries. A NaN breakpoint cannot be
/// ordered and is rejected.
pub fn boundaries(breaks: &[f64]) -> Result<Vec<f64>> {
    if let Some(pos) = breaks.iter().position(|b| b.is_nan()) {
        return Err(BinsError::InvalidArgument(format!(
            "breakpoint at position {} is NaN",
            pos
        )));
    }

    let mut bounds = Vec::with_capacity(breaks.len() + 2);
    bounds.push(f64::NEG_INFINITY);
    bounds.extend_from_slice(breaks);
    bounds.push(f64::INFINITY);
    bounds.sort_by(f64::total_cmp);
    Ok(bounds)
}

/// Parse breakpoints given as text, e.g. on the command line.
///
/// Only a bracketed list is accepted: `[3, 5, 6, 10]`, or `[]` for no
/// breakpoints. Anything else, a bare `3` included, is not a list.
pub fn parse_breaks(text: &str) -> Result<Vec<f64>> {
    let text = text.trim();
    let inner = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| {
            BinsError::InvalidArgument(format!("breaks are not a list: `{}`", text))
        })?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(str::trim)
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                BinsError::InvalidArgument(format!("breakpoint `{}` is not a number", token))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_boundaries_adds_sentinels_and_sorts() {
        let bounds = boundaries(&[10.0, 3.0, 6.0, 5.0]).unwrap();
        assert_eq!(bounds, vec![f64::NEG_INFINITY, 3.0, 5.0, 6.0, 10.0, f64::INFINITY]);
    }

    #[test]
    fn test_boundaries_empty() {
        let bounds = boundaries(&[]).unwrap();
        assert_eq!(bounds, vec![f64::NEG_INFINITY, f64::INFINITY]);
    }

    #[test]
    fn test_boundaries_keep_duplicates() {
        let bounds = boundaries(&[3.0, 3.0]).unwrap();
        assert_eq!(bounds.len(), 4);
    }

    #[test]
    fn test_boundaries_reject_nan() {
        let err = boundaries(&[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, BinsError::InvalidArgument(_)));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_breaks("[3, 5, 6, 10]").unwrap(), vec![3.0, 5.0, 6.0, 10.0]);
        assert_eq!(parse_breaks("  [-1.5,2e1] ").unwrap(), vec![-1.5, 20.0]);
        assert!(parse_breaks("[]").unwrap().is_empty());
        assert!(parse_breaks("[  ]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_scalar_is_not_a_list() {
        let err = parse_breaks("3").unwrap_err();
        assert!(matches!(err, BinsError::InvalidArgument(_)));
        assert!(err.to_string().contains("not a list"));
        assert!(parse_breaks("(3, 5)").is_err());
        assert!(parse_breaks("{3, 5}").is_err());
    }

    #[test]
    fn test_parse_non_numeric_entry() {
        let err = parse_breaks("[3, five]").unwrap_err();
        assert!(err.to_string().contains("five"));
    }

    #[test]
    fn test_interval_contains() {
        let left = Interval::new(3.0, 5.0, Closed::Left);
        assert!(left.contains(3.0));
        assert!(left.contains(4.999));
        assert!(!left.contains(5.0));

        let right = Interval::new(3.0, 5.0, Closed::Right);
        assert!(!right.contains(3.0));
        assert!(right.contains(5.0));
    }

    #[test]
    fn test_interval_display() {
        assert_eq!(Interval::new(f64::NEG_INFINITY, 3.0, Closed::Left).to_string(), "[-inf, 3)");
        assert_eq!(Interval::new(2.5, f64::INFINITY, Closed::Right).to_string(), "(2.5, inf]");
    }

    #[test]
    fn test_closed_names() {
        let names: Vec<String> = Closed::iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["left", "right"]);
        assert_eq!(Closed::from_str("right").unwrap(), Closed::Right);
        assert_eq!(Closed::default(), Closed::Left);
    }
}

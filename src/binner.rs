//! Assigning values to the intervals of a boundary sequence.

use log::{debug, warn};

use crate::breaks::{Closed, Interval, boundaries};
use crate::error::Result;

/// Bins values against a fixed, sorted boundary sequence.
///
/// The boundary sequence always starts at `-inf` and ends at `inf`, so every
/// finite value lands in exactly one of the `num_bins()` intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct Binner {
    bounds: Vec<f64>,
    closed: Closed,
}

impl Binner {
    /// Create a left-closed binner from interior breakpoints.
    pub fn new(breaks: &[f64]) -> Result<Self> {
        let bounds = boundaries(breaks)?;
        debug!("binner with {} breakpoints, boundaries {:?}", breaks.len(), bounds);
        Ok(Self {
            bounds,
            closed: Closed::default(),
        })
    }

    pub fn with_closed(mut self, closed: Closed) -> Self {
        self.closed = closed;
        self
    }

    pub fn closed(&self) -> Closed {
        self.closed
    }

    /// The full boundary sequence, sentinels included.
    pub fn boundaries(&self) -> &[f64] {
        &self.bounds
    }

    pub fn num_bins(&self) -> usize {
        self.bounds.len() - 1
    }

    /// The bins in label order.
    pub fn intervals(&self) -> Vec<Interval> {
        self.bounds
            .windows(2)
            .map(|w| Interval::new(w[0], w[1], self.closed))
            .collect()
    }

    /// Label of the interval containing `value`.
    ///
    /// Returns `None` for NaN and for the infinity excluded by the open outer
    /// edge (`inf` when left-closed, `-inf` when right-closed).
    pub fn bin(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        // index of the first boundary that closes the value's interval
        let upper = match self.closed {
            Closed::Left => self.bounds.partition_point(|&b| b <= value),
            Closed::Right => self.bounds.partition_point(|&b| b < value),
        };
        let label = upper.checked_sub(1)?;
        (label < self.num_bins()).then_some(label)
    }

    /// Label every value, keeping input order.
    pub fn assign(&self, values: &[f64]) -> Bins {
        self.assign_iter(values.iter().copied().map(Some))
    }

    /// Label a sequence of optional values; `None` stays unlabeled.
    pub(crate) fn assign_iter<I>(&self, values: I) -> Bins
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let labels: Vec<Option<usize>> = values
            .into_iter()
            .map(|v| v.and_then(|v| self.bin(v)))
            .collect();

        let bins = Bins {
            categories: self.intervals(),
            labels,
        };
        debug!(
            "assigned {} values to {} bins",
            bins.len(),
            bins.num_categories()
        );
        if bins.missing() > 0 {
            warn!("{} of {} values fall outside every bin", bins.missing(), bins.len());
        }
        bins
    }
}

/// Categorical result of binning: one optional label per input value plus
/// the ordered set of categories the labels index into.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    categories: Vec<Interval>,
    labels: Vec<Option<usize>>,
}

impl Bins {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Option<usize>] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<usize> {
        self.labels.get(index).copied().flatten()
    }

    pub fn categories(&self) -> &[Interval] {
        &self.categories
    }

    pub fn num_categories(&self) -> usize {
        self.categories.len()
    }

    /// Interval of the value at `index`, if it was labeled.
    pub fn interval_of(&self, index: usize) -> Option<&Interval> {
        self.label(index).map(|l| &self.categories[l])
    }

    /// Number of values in each category.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.categories.len()];
        for label in self.labels.iter().flatten() {
            counts[*label] += 1;
        }
        counts
    }

    /// Number of values that received no label.
    pub fn missing(&self) -> usize {
        self.labels.iter().filter(|l| l.is_none()).count()
    }
}

/// Bin `values` into the intervals cut by `breaks`, closed on the left.
///
/// `breaks` holds interior cut points only; `-inf` and `inf` are added and
/// the sequence is sorted, giving `breaks.len() + 1` categories.
///
/// ```
/// let bins = binst::create_bins(&[0.0, 3.0, 7.0], &[3.0, 5.0]).unwrap();
/// assert_eq!(bins.labels(), &[Some(0), Some(1), Some(2)]);
/// ```
pub fn create_bins(values: &[f64], breaks: &[f64]) -> Result<Bins> {
    Ok(Binner::new(breaks)?.assign(values))
}

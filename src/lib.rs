//! Binning of numeric values into intervals cut by a list of breakpoints.
//!
//! The breakpoints are extended with `-inf` and `inf` and sorted, so the
//! resulting bins cover the whole real line. Each value receives the label of
//! the interval it falls in, closed on the left by default.

pub mod binner;
pub mod breaks;
pub mod columnar;
pub mod error;
pub mod source;
pub mod split;

pub use binner::{Binner, Bins, create_bins};
pub use breaks::{Closed, Interval, boundaries, parse_breaks};
pub use columnar::{bin_array, write_parquet};
pub use error::{BinsError, Result};
pub use source::ValueFile;
pub use split::split_at_indices;

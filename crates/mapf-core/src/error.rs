//! Error types for grid construction.

use thiserror::Error;

/// Errors arising from [`Domain`](crate::Domain) construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The flat cell buffer does not hold `width * height` entries.
    #[error("cell buffer holds {actual} cells, expected {width}x{height} = {expected}")]
    ShapeMismatch {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// A row of a nested grid has a different length from the first row.
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
    /// A dimension does not fit the `i32` coordinate range.
    #[error("{name} {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
        /// The requested size.
        value: usize,
        /// The maximum supported size.
        max: usize,
    },
}

//! Parse errors. Line numbers are 1-based.

use mapf_core::DomainError;
use thiserror::Error;

/// A malformed `.map` or `.scen` file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// The input ended before a required section.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// What was being read.
        expected: &'static str,
    },
    /// A header line is missing its value or names an unknown key.
    #[error("line {line}: malformed header '{text}'")]
    BadHeader {
        /// Line number.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// A required header key never appeared.
    #[error("map header is missing '{key}'")]
    MissingHeader {
        /// The absent key.
        key: &'static str,
    },
    /// A numeric field failed to parse.
    #[error("line {line}: {field} '{value}' is not a valid number")]
    BadNumber {
        /// Line number.
        line: usize,
        /// Field name.
        field: &'static str,
        /// The text that failed to parse.
        value: String,
    },
    /// A grid row is shorter or longer than the declared width.
    #[error("line {line}: grid row has {actual} cells, expected {expected}")]
    RowWidth {
        /// Line number.
        line: usize,
        /// Declared width.
        expected: usize,
        /// Cells on the line.
        actual: usize,
    },
    /// A scenario row has too few columns.
    #[error("line {line}: expected {expected} columns, found {actual}")]
    Columns {
        /// Line number.
        line: usize,
        /// Required column count.
        expected: usize,
        /// Columns on the line.
        actual: usize,
    },
    /// Scenario rows disagree on the map size, or it differs from the map.
    #[error("line {line}: map size {found_width}x{found_height} differs from {width}x{height}")]
    SizeMismatch {
        /// Line number, or 0 when comparing against a parsed map.
        line: usize,
        /// Expected width.
        width: usize,
        /// Expected height.
        height: usize,
        /// Width found.
        found_width: usize,
        /// Height found.
        found_height: usize,
    },
    /// The grid could not form a domain.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

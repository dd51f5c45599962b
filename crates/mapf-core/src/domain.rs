//! The static grid map agents move on.

use crate::error::DomainError;
use crate::point::Point;

/// A rectangular grid with a per-cell obstacle flag.
///
/// Cells are stored row-major: the cell at `(x, y)` lives at index
/// `y * width + x`, and `true` marks an obstacle. Construction guarantees the
/// buffer holds exactly `width * height` cells.
///
/// Bounds and obstacles are separate questions. [`is_obstacle`] answers
/// `false` for points off the grid so that an out-of-bounds agent is reported
/// once, by the bounds check, rather than twice.
///
/// [`is_obstacle`]: Domain::is_obstacle
///
/// # Examples
///
/// ```
/// use mapf_core::{Domain, Point};
///
/// let domain = Domain::from_rows(vec![
///     vec![false, true],
///     vec![false, false],
/// ]).unwrap();
/// assert!(domain.is_obstacle(Point::new(1, 0)));
/// assert!(domain.is_free(Point::new(0, 1)));
/// assert!(!domain.contains(Point::new(2, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Domain {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: usize = i32::MAX as usize;

    /// Create a domain from a flat row-major obstacle buffer.
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, DomainError> {
        check_dim("width", width)?;
        check_dim("height", height)?;
        let expected = width.checked_mul(height).ok_or(DomainError::DimensionTooLarge {
            name: "height",
            value: height,
            max: Self::MAX_DIM / width.max(1),
        })?;
        if cells.len() != expected {
            return Err(DomainError::ShapeMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Create a domain from nested rows, `rows[y][x]`.
    ///
    /// Every row must have the width of the first one. An empty vector
    /// yields a zero-sized domain.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, DomainError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for (row, r) in rows.into_iter().enumerate() {
            if r.len() != width {
                return Err(DomainError::RaggedRow {
                    row,
                    expected: width,
                    actual: r.len(),
                });
            }
            cells.extend(r);
        }
        Self::new(width, height, cells)
    }

    /// Create an obstacle-free domain.
    pub fn open(width: usize, height: usize) -> Result<Self, DomainError> {
        let len = width.saturating_mul(height);
        Self::new(width, height, vec![false; len])
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `p` satisfies `0 <= x < width` and `0 <= y < height`.
    pub fn contains(&self, p: Point) -> bool {
        self.index(p).is_some()
    }

    /// Whether `p` is an in-bounds obstacle cell.
    pub fn is_obstacle(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.cells[i])
    }

    /// Whether `p` is an in-bounds free cell.
    pub fn is_free(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| !self.cells[i])
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn index(&self, p: Point) -> Option<usize> {
        let x = usize::try_from(p.x).ok()?;
        let y = usize::try_from(p.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

fn check_dim(name: &'static str, value: usize) -> Result<(), DomainError> {
    if value > Domain::MAX_DIM {
        return Err(DomainError::DimensionTooLarge {
            name,
            value,
            max: Domain::MAX_DIM,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_half_open() {
        let d = Domain::open(5, 3).unwrap();
        assert!(d.contains(Point::new(0, 0)));
        assert!(d.contains(Point::new(4, 2)));
        assert!(!d.contains(Point::new(5, 0)));
        assert!(!d.contains(Point::new(0, 3)));
        assert!(!d.contains(Point::new(-1, 0)));
        assert!(!d.contains(Point::new(0, -1)));
    }

    #[test]
    fn obstacle_lookup_is_row_major() {
        let d = Domain::from_rows(vec![vec![false, false, true], vec![true, false, false]])
            .unwrap();
        assert_eq!(d.width(), 3);
        assert_eq!(d.height(), 2);
        assert!(d.is_obstacle(Point::new(2, 0)));
        assert!(d.is_obstacle(Point::new(0, 1)));
        assert!(d.is_free(Point::new(1, 1)));
        assert_eq!(d.obstacle_count(), 2);
    }

    #[test]
    fn out_of_bounds_is_neither_free_nor_obstacle() {
        let d = Domain::from_rows(vec![vec![true]]).unwrap();
        assert!(!d.is_obstacle(Point::new(1, 0)));
        assert!(!d.is_free(Point::new(1, 0)));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Domain::from_rows(vec![vec![false, false], vec![false]]).unwrap_err();
        assert_eq!(
            err,
            DomainError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn shape_mismatch_rejected() {
        let err = Domain::new(2, 2, vec![false; 3]).unwrap_err();
        assert!(matches!(
            err,
            DomainError::ShapeMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn empty_rows_make_empty_domain() {
        let d = Domain::from_rows(Vec::new()).unwrap();
        assert_eq!(d.cell_count(), 0);
        assert!(!d.contains(Point::new(0, 0)));
    }
}

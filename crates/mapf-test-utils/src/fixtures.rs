//! Reusable grid and record fixtures.
//!
//! - [`open_domain`] — obstacle-free grid of a given size.
//! - [`ascii_domain`] — grid drawn with `.` (free) and `@` (obstacle).
//! - [`walk`] — reference (non-streaming) position trace for a record.

use mapf_core::{Domain, Point};

/// Shorthand for [`Point::new`].
pub fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// An obstacle-free `width x height` domain.
pub fn open_domain(width: usize, height: usize) -> Domain {
    Domain::open(width, height).expect("fixture dimensions are valid")
}

/// Build a domain from ASCII rows; `@` marks obstacles, anything else is free.
///
/// ```
/// let d = mapf_test_utils::ascii_domain(&[
///     "..@",
///     "...",
/// ]);
/// assert!(d.is_obstacle(mapf_test_utils::p(2, 0)));
/// ```
pub fn ascii_domain(rows: &[&str]) -> Domain {
    Domain::from_rows(
        rows.iter()
            .map(|r| r.bytes().map(|b| b == b'@').collect())
            .collect(),
    )
    .expect("fixture rows must have equal width")
}

/// Reference decoder: every position an agent occupies, starting at `source`.
///
/// Expands the whole record eagerly, so it is only suitable as an oracle for
/// the streaming implementation in tests.
pub fn walk(source: Point, record: &str) -> Vec<Point> {
    let mut out = vec![source];
    let mut pos = source;
    let mut count: Option<u64> = None;
    for b in record.bytes() {
        if b.is_ascii_digit() {
            count = Some(count.unwrap_or(0) * 10 + u64::from(b - b'0'));
            continue;
        }
        let (dx, dy) = match b {
            b'u' => (0, -1),
            b'd' => (0, 1),
            b'l' => (-1, 0),
            b'r' => (1, 0),
            _ => (0, 0),
        };
        for _ in 0..count.take().unwrap_or(1) {
            pos = pos.offset(dx, dy);
            out.push(pos);
        }
    }
    out
}

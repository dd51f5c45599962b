//! The [`Point`] coordinate type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D integer grid coordinate.
///
/// `x` is the column and `y` the row; `y` grows downwards, matching the
/// row order of map files. Points outside a [`Domain`](crate::Domain) are
/// representable on purpose: an agent walking off the map must still have a
/// position so the bounds check can report it.
///
/// # Examples
///
/// ```
/// use mapf_core::Point;
///
/// let p = Point::new(2, 3);
/// assert_eq!(p.offset(1, -1), Point::new(3, 2));
/// assert_eq!(p.to_string(), "(2, 3)");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Create a point at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`, saturating at the `i32` range.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn offset_saturates() {
        let p = Point::new(i32::MAX, i32::MIN);
        assert_eq!(p.offset(1, -1), p);
    }

    #[test]
    fn serde_shape_is_xy_object() {
        let json = serde_json::to_string(&Point::new(4, 7)).unwrap();
        assert_eq!(json, r#"{"x":4,"y":7}"#);
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Point::new(4, 7));
    }

    proptest! {
        #[test]
        fn offset_is_undone_by_its_inverse(x in -1000i32..1000, y in -1000i32..1000,
                                           dx in -50i32..50, dy in -50i32..50) {
            let a = Point::new(x, y);
            prop_assert_eq!(a.offset(dx, dy).offset(-dx, -dy), a);
        }
    }
}

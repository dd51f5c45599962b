//! MovingAI `.map` grids.
//!
//! ```text
//! type octile
//! height 4
//! width 6
//! map
//! ..@@..
//! ...
//! ```
//!
//! `.`, `G` and `S` are passable; every other cell character (`@`, `O`,
//! `T`, `W`, ...) is an obstacle.

use std::str::FromStr;

use mapf_core::Domain;

use crate::error::ScenarioError;

/// Whether a grid character is passable terrain.
pub fn is_passable(cell: char) -> bool {
    matches!(cell, '.' | 'G' | 'S')
}

/// Parse a complete `.map` file: header lines up to `map`, then `height`
/// rows of exactly `width` cells. Lines after the grid are ignored.
pub fn parse_map(text: &str) -> Result<Domain, ScenarioError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end()));

    let mut height: Option<usize> = None;
    let mut width: Option<usize> = None;
    loop {
        let (line, l) = lines.next().ok_or(ScenarioError::UnexpectedEof {
            expected: "map header",
        })?;
        let mut parts = l.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (None, _, _) => {}
            (Some("map"), None, _) => break,
            (Some("type"), Some(_), None) => {}
            (Some("height"), Some(v), None) => height = Some(number(line, "height", v)?),
            (Some("width"), Some(v), None) => width = Some(number(line, "width", v)?),
            _ => {
                return Err(ScenarioError::BadHeader {
                    line,
                    text: l.to_string(),
                })
            }
        }
    }
    let height = height.ok_or(ScenarioError::MissingHeader { key: "height" })?;
    let width = width.ok_or(ScenarioError::MissingHeader { key: "width" })?;

    let mut cells = Vec::with_capacity(width.saturating_mul(height).min(text.len()));
    for _ in 0..height {
        let (line, row) = lines.next().ok_or(ScenarioError::UnexpectedEof {
            expected: "grid row",
        })?;
        let actual = row.chars().count();
        if actual != width {
            return Err(ScenarioError::RowWidth {
                line,
                expected: width,
                actual,
            });
        }
        cells.extend(row.chars().map(|c| !is_passable(c)));
    }
    Ok(Domain::new(width, height, cells)?)
}

/// Parse a bare grid with no header; every non-empty line is a row.
pub fn parse_grid(text: &str) -> Result<Domain, ScenarioError> {
    let rows = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(|l| l.chars().map(|c| !is_passable(c)).collect())
        .collect();
    Ok(Domain::from_rows(rows)?)
}

pub(crate) fn number<T: FromStr>(
    line: usize,
    field: &'static str,
    value: &str,
) -> Result<T, ScenarioError> {
    value.parse().map_err(|_| ScenarioError::BadNumber {
        line,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapf_core::{DomainError, Point};

    const SAMPLE: &str = "type octile\nheight 3\nwidth 4\nmap\n.@..\n..T.\nGS.W\n";

    #[test]
    fn sample_map_parses() {
        let d = parse_map(SAMPLE).unwrap();
        assert_eq!((d.width(), d.height()), (4, 3));
        assert!(d.is_obstacle(Point::new(1, 0)));
        assert!(d.is_obstacle(Point::new(2, 1)));
        assert!(d.is_obstacle(Point::new(3, 2)));
        assert!(d.is_free(Point::new(0, 2)));
        assert!(d.is_free(Point::new(1, 2)));
        assert_eq!(d.obstacle_count(), 3);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let d = parse_map(&SAMPLE.replace('\n', "\r\n")).unwrap();
        assert_eq!(d.obstacle_count(), 3);
    }

    #[test]
    fn header_order_is_free() {
        let d = parse_map("width 2\ntype octile\nheight 1\nmap\n.@\n").unwrap();
        assert_eq!((d.width(), d.height()), (2, 1));
    }

    #[test]
    fn missing_width_is_reported() {
        let err = parse_map("type octile\nheight 1\nmap\n..\n").unwrap_err();
        assert_eq!(err, ScenarioError::MissingHeader { key: "width" });
    }

    #[test]
    fn short_row_is_reported_with_line() {
        let err = parse_map("height 2\nwidth 3\nmap\n...\n..\n").unwrap_err();
        assert_eq!(
            err,
            ScenarioError::RowWidth {
                line: 5,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn truncated_grid_is_eof() {
        let err = parse_map("height 3\nwidth 1\nmap\n.\n").unwrap_err();
        assert!(matches!(err, ScenarioError::UnexpectedEof { .. }));
    }

    #[test]
    fn bad_number_is_reported() {
        let err = parse_map("height ten\nwidth 1\nmap\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: height 'ten' is not a valid number");
    }

    #[test]
    fn unknown_header_is_rejected() {
        let err = parse_map("depth 3\nmap\n").unwrap_err();
        assert!(matches!(err, ScenarioError::BadHeader { line: 1, .. }));
    }

    #[test]
    fn bare_grid_rejects_ragged_rows() {
        let err = parse_grid("...\n..\n").unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Domain(DomainError::RaggedRow { row: 1, .. })
        ));
    }
}

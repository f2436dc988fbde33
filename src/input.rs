//! Parsing of typed coordinates (`A4`) and ship placements (`A1-A5`).
//!
//! The column letter is x and the row number is y. Input is forgiving:
//! case, surrounding whitespace and spaces between the parts are ignored.

use alloc::string::String;
use core::fmt;

use crate::codec::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    /// Column letter or row number missing.
    TooShort,
    BadColumn(char),
    BadRow(String),
    /// Parsed, but outside the `size`×`size` grid.
    OutOfGrid { size: u8 },
    /// Placement needs two cells separated by `-`.
    MissingSeparator,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "Empty input"),
            InputError::TooShort => {
                write!(f, "Too short - need column letter and row number (e.g. A4)")
            }
            InputError::BadColumn(c) => write!(f, "Invalid column '{}'", c),
            InputError::BadRow(r) => write!(f, "Invalid row '{}'", r),
            InputError::OutOfGrid { size } => {
                let last = (b'A' + size.saturating_sub(1)) as char;
                write!(f, "Out of bounds - columns A-{}, rows 0-{}", last, size.saturating_sub(1))
            }
            InputError::MissingSeparator => write!(f, "Expected two cells like A1-A5"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}

fn squeeze(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Parse one cell of a `size`×`size` grid.
pub fn parse_target(input: &str, size: u8) -> Result<Coordinate, InputError> {
    let s = squeeze(input);
    let mut chars = s.chars();
    let col = chars.next().ok_or(InputError::Empty)?;
    let row: String = chars.collect();
    if row.is_empty() {
        return Err(InputError::TooShort);
    }
    if !col.is_ascii_uppercase() {
        return Err(InputError::BadColumn(col));
    }
    let x = col as u8 - b'A';
    let y: u8 = row.parse().map_err(|_| InputError::BadRow(row.clone()))?;
    if x >= size || y >= size {
        return Err(InputError::OutOfGrid { size });
    }
    Coordinate::new(x, y).map_err(|_| InputError::OutOfGrid { size })
}

/// Parse the two end cells of a ship, e.g. `A1-A5` or `c7 - c8`.
pub fn parse_placement(input: &str, size: u8) -> Result<(Coordinate, Coordinate), InputError> {
    let s = squeeze(input);
    if s.is_empty() {
        return Err(InputError::Empty);
    }
    let (a, b) = s.split_once('-').ok_or(InputError::MissingSeparator)?;
    Ok((parse_target(a, size)?, parse_target(b, size)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: u8, y: u8) -> Coordinate {
        Coordinate::new(x, y).unwrap()
    }

    #[test]
    fn parses_letter_then_row() {
        assert_eq!(parse_target("A4", 10).unwrap(), c(0, 4));
        assert_eq!(parse_target(" j 9 ", 10).unwrap(), c(9, 9));
    }

    #[test]
    fn rejects_bad_targets() {
        assert_eq!(parse_target("", 10), Err(InputError::Empty));
        assert_eq!(parse_target("A", 10), Err(InputError::TooShort));
        assert_eq!(parse_target("4A", 10), Err(InputError::BadColumn('4')));
        assert_eq!(parse_target("Ax", 10), Err(InputError::BadRow("X".into())));
        assert_eq!(parse_target("K1", 10), Err(InputError::OutOfGrid { size: 10 }));
        assert_eq!(parse_target("A10", 10), Err(InputError::OutOfGrid { size: 10 }));
    }

    #[test]
    fn parses_placements() {
        assert_eq!(parse_placement("A1-A5", 10).unwrap(), (c(0, 1), c(0, 5)));
        assert_eq!(parse_placement("c7 - b7", 10).unwrap(), (c(2, 7), c(1, 7)));
        assert_eq!(parse_placement("A1A5", 10), Err(InputError::MissingSeparator));
        assert_eq!(parse_placement("   ", 10), Err(InputError::Empty));
    }
}

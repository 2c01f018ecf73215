//! Coordinates for addressing rows in a sectioned data source.
//!
//! A `Coordinate` is a plain `(section, row)` pair, zero-based, counted over
//! the *visible* sections and items of a data source.

use std::fmt;

/// Represents a row position within a `TableDataSource`.
///
/// Coordinates should be used immediately and not stored long-term.
/// After insertions, removals or visibility changes, a previously obtained
/// coordinate may point at a different row.
///
/// # Example
///
/// ```
/// use gridbind::model::Coordinate;
///
/// let coord = Coordinate::new(1, 4);
/// assert_eq!(coord.section, 1);
/// assert_eq!(coord.row, 4);
/// assert_eq!(coord.with_row(0), Coordinate::new(1, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Index of the section among visible sections.
    pub section: usize,
    /// Index of the row among the visible items of its section.
    pub row: usize,
}

impl Coordinate {
    /// Creates a coordinate from a section and row.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Returns a coordinate in the same section at a different row.
    #[inline]
    pub const fn with_row(self, row: usize) -> Self {
        Self { row, ..self }
    }

    /// Returns a coordinate at the same row in a different section.
    #[inline]
    pub const fn with_section(self, section: usize) -> Self {
        Self { section, ..self }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_section_major() {
        let a = Coordinate::new(0, 5);
        let b = Coordinate::new(1, 0);
        let c = Coordinate::new(1, 2);

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_from_tuple_and_display() {
        let coord: Coordinate = (2, 3).into();
        assert_eq!(coord, Coordinate::new(2, 3));
        assert_eq!(coord.to_string(), "(2, 3)");
    }

    #[test]
    fn test_siblings() {
        let coord = Coordinate::new(3, 1);
        assert_eq!(coord.with_section(0), Coordinate::new(0, 1));
        assert_eq!(coord.with_row(9), Coordinate::new(3, 9));
    }
}

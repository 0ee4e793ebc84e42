use derive_more::Display;
use serde::Serialize;
use std::fmt::{self, Debug, Formatter};

/// Position inside a source text. Lines and columns are 1-based, the offset is a 0-based byte
/// offset into the normalized source.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[display("{line}:{column}")]
pub struct Location {
    /// Line number, starting with 1
    pub line: usize,
    /// Column number (in characters), starting with 1
    pub column: usize,
    /// Byte offset, starting with 0
    pub offset: usize,
}

impl Default for Location {
    /// Default to line 1, column 1
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Location {
    /// Create a new Location
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Returns true when this location lies before `other` in (line, column) order
    pub fn is_before(&self, other: &Location) -> bool {
        (self.line, self.column) < (other.line, other.column)
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.line, self.column)
    }
}

/// The distance between two locations, used to move previously recorded positions to the place
/// where the same source text is found now.
///
/// Columns are only shifted for positions on `anchor_line`: anything on a later line keeps its
/// column because the text before it on that line did not move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionDelta {
    pub anchor_line: usize,
    pub lines: isize,
    pub columns: isize,
    pub offset: isize,
}

impl PositionDelta {
    /// Returns the delta that moves `from` onto `to`
    pub fn between(from: Location, to: Location) -> Self {
        Self {
            anchor_line: from.line,
            lines: to.line as isize - from.line as isize,
            columns: to.column as isize - from.column as isize,
            offset: to.offset as isize - from.offset as isize,
        }
    }

    /// A delta of zero does not move anything
    pub fn is_empty(&self) -> bool {
        self.lines == 0 && self.columns == 0 && self.offset == 0
    }
}

/// Implemented by everything that carries source positions, so that cached parse results can be
/// replayed at a different place in the document.
pub trait ShiftPosition {
    fn shift_position(&mut self, delta: &PositionDelta);
}

impl ShiftPosition for Location {
    fn shift_position(&mut self, delta: &PositionDelta) {
        if self.line == delta.anchor_line {
            self.column = self.column.saturating_add_signed(delta.columns);
        }
        self.line = self.line.saturating_add_signed(delta.lines);
        self.offset = self.offset.saturating_add_signed(delta.offset);
    }
}

impl<T: ShiftPosition> ShiftPosition for Vec<T> {
    fn shift_position(&mut self, delta: &PositionDelta) {
        for item in self.iter_mut() {
            item.shift_position(delta);
        }
    }
}

impl<T: ShiftPosition> ShiftPosition for Option<T> {
    fn shift_position(&mut self, delta: &PositionDelta) {
        if let Some(item) = self {
            item.shift_position(delta);
        }
    }
}

impl<T: ShiftPosition> ShiftPosition for Box<T> {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.as_mut().shift_position(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_debug() {
        let loc = Location::new(3, 7, 40);
        assert_eq!(loc.to_string(), "3:7");
        assert_eq!(format!("{:?}", loc), "(3:7)");
        assert_eq!(Location::default(), Location::new(1, 1, 0));
    }

    #[test]
    fn shift_on_anchor_line() {
        let delta = PositionDelta::between(Location::new(1, 1, 0), Location::new(1, 12, 11));
        let mut loc = Location::new(1, 5, 4);
        loc.shift_position(&delta);
        assert_eq!(loc, Location::new(1, 16, 15));
    }

    #[test]
    fn shift_keeps_columns_on_later_lines() {
        let delta = PositionDelta::between(Location::new(2, 3, 10), Location::new(4, 1, 20));
        let mut locs = vec![Location::new(2, 8, 15), Location::new(3, 5, 30)];
        locs.shift_position(&delta);
        assert_eq!(locs[0], Location::new(4, 6, 25));
        assert_eq!(locs[1], Location::new(5, 5, 40));
    }

    #[test]
    fn ordering() {
        assert!(Location::new(1, 9, 8).is_before(&Location::new(2, 1, 10)));
        assert!(!Location::new(2, 1, 10).is_before(&Location::new(2, 1, 10)));
    }
}

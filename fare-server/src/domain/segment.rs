//! Route segment type.

use super::{LineId, StationId};

/// A directed traversal of one line between two stations.
///
/// A segment says nothing about whether `begin` and `end` really lie on
/// `line`; that is checked against reference data by
/// [`Route::is_valid`](crate::route::Route::is_valid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub begin: StationId,
    pub line: LineId,
    pub end: StationId,
}

impl Segment {
    pub fn new(begin: StationId, line: LineId, end: StationId) -> Self {
        Self { begin, line, end }
    }

    /// Returns true if the segment starts and ends at the same station.
    pub fn is_degenerate(&self) -> bool {
        self.begin == self.end
    }

    /// Returns true if `next` continues from where this segment ends.
    pub fn connects_to(&self, next: &Segment) -> bool {
        self.end == next.begin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(begin: u32, line: u32, end: u32) -> Segment {
        Segment::new(StationId::new(begin), LineId::new(line), StationId::new(end))
    }

    #[test]
    fn connects_to() {
        assert!(seg(1, 0, 2).connects_to(&seg(2, 1, 3)));
        assert!(!seg(1, 0, 2).connects_to(&seg(3, 1, 4)));
    }

    #[test]
    fn degenerate() {
        assert!(seg(4, 0, 4).is_degenerate());
        assert!(!seg(4, 0, 5).is_degenerate());
    }
}

//! Source location spans.

use std::fmt;

/// Error when creating a span from a range that does not fit in `u32`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    #[error("span start {0} (0x{0:X}) exceeds u32::MAX")]
    StartTooLarge(usize),
    #[error("span end {0} (0x{0:X}) exceeds u32::MAX")]
    EndTooLarge(usize),
}

/// Byte range `[start, end)` into a source text.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span for nodes with no source location.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Span { start, end }
    }

    /// Span starting at `start` covering `len` bytes.
    #[inline]
    pub const fn at(start: u32, len: u32) -> Self {
        Span {
            start,
            end: start + len,
        }
    }

    /// Zero-length span.
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub fn try_from_range(range: std::ops::Range<usize>) -> Result<Self, SpanError> {
        let start =
            u32::try_from(range.start).map_err(|_| SpanError::StartTooLarge(range.start))?;
        let end = u32::try_from(range.end).map_err(|_| SpanError::EndTooLarge(range.end))?;
        Ok(Span { start, end })
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `offset` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    #[inline]
    pub fn contains_span(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Spans share at least one position, touching ends included.
    ///
    /// `[0, 5)` intersects `[5, 8)`: an empty target span at an element
    /// boundary still selects the element.
    #[inline]
    pub fn intersects(&self, other: Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Spans share at least one byte.
    #[inline]
    pub fn overlaps(&self, other: Span) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Move the span by `delta` bytes. Saturates at zero.
    #[inline]
    #[must_use]
    pub fn shift(self, delta: i64) -> Span {
        let move_by = |offset: u32| {
            let shifted = (i64::from(offset) + delta).clamp(0, i64::from(u32::MAX));
            u32::try_from(shifted).unwrap_or(u32::MAX)
        };
        Span {
            start: move_by(self.start),
            end: move_by(self.end),
        }
    }

    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Span;
    crate::static_assert_size!(Span, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_queries() {
        let span = Span::new(10, 20);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert!(span.contains(10));
        assert!(span.contains(19));
        assert!(!span.contains(20));
    }

    #[test]
    fn intersects_includes_touching_ends() {
        let span = Span::new(0, 5);
        assert!(span.intersects(Span::new(5, 8)));
        assert!(span.intersects(Span::point(0)));
        assert!(!span.intersects(Span::new(6, 8)));
        assert!(!span.overlaps(Span::new(5, 8)));
        assert!(span.overlaps(Span::new(4, 8)));
    }

    #[test]
    fn shift_saturates() {
        assert_eq!(Span::new(10, 20).shift(5), Span::new(15, 25));
        assert_eq!(Span::new(10, 20).shift(-15), Span::new(0, 5));
    }

    #[test]
    fn try_from_range_rejects_large_offsets() {
        let large = u32::MAX as usize + 1;
        assert!(matches!(
            Span::try_from_range(large..large + 1),
            Err(SpanError::StartTooLarge(_))
        ));
        assert!(matches!(
            Span::try_from_range(0..large),
            Err(SpanError::EndTooLarge(_))
        ));
        assert_eq!(Span::try_from_range(3..7), Ok(Span::new(3, 7)));
    }

    #[test]
    fn merge_covers_both() {
        assert_eq!(Span::new(20, 30).merge(Span::new(10, 25)), Span::new(10, 30));
    }

    #[test]
    fn debug_and_display() {
        let span = Span::at(100, 5);
        assert_eq!(format!("{span:?}"), "100..105");
        assert_eq!(format!("{span}"), "[100..105)");
    }
}

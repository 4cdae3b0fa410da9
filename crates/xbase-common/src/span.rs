//! Byte-offset source spans.

use serde::Serialize;

/// A half-open byte range `[start, start + length)` in a source file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: u32,
    pub length: u32,
}

impl Span {
    /// Span used for synthesized nodes that have no source text.
    pub const DUMMY: Span = Span {
        start: 0,
        length: 0,
    };

    #[inline]
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    #[inline]
    pub const fn end(self) -> u32 {
        self.start + self.length
    }

    #[inline]
    pub const fn is_dummy(self) -> bool {
        self.start == 0 && self.length == 0
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        Span::new(start, end - start)
    }
}

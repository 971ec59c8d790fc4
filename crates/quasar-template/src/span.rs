//! Byte spans into template source.

use std::ops::Range;

/// A half-open byte range `[start, end)` in the original `.vue` source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `offset`.
    #[inline]
    pub const fn at(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Move the span right by `delta` bytes.
    ///
    /// Used to rebase spans produced while parsing the inner template
    /// content onto offsets of the whole file.
    #[inline]
    pub const fn shift(self, delta: u32) -> Span {
        Span {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// 1-based line and column of the span start.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = (self.start as usize).min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let col = before
            .rfind('\n')
            .map_or(before.chars().count(), |nl| before[nl + 1..].chars().count())
            + 1;
        (line, col)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start as u32, range.end as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let source = "<template>\n  <div>\n</template>";
        let span = Span::new(13, 18);
        assert_eq!(span.line_col(source), (2, 3));
        assert_eq!(Span::at(0).line_col(source), (1, 1));
    }

    #[test]
    fn test_shift() {
        assert_eq!(Span::new(2, 5).shift(10), Span::new(12, 15));
        assert_eq!(Span::new(2, 5).len(), 3);
    }
}

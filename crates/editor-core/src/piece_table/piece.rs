/// A span of whole lines inside one backing buffer.
///
/// Pieces are never mutated after creation; edits replace them in the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub buf_kind: crate::enums::BufferKind,
    pub range: std::ops::Range<u64>,
    /// Lines this piece contributes to the document.
    pub line_count: usize,
}

impl Piece {
    #[inline]
    #[must_use]
    pub fn new(
        buf_kind: crate::enums::BufferKind,
        range: std::ops::Range<u64>,
        line_count: usize,
    ) -> Self {
        Self {
            buf_kind,
            range,
            line_count,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> u64 {
        self.range.end - self.range.start
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.start == self.range.end
    }

    /// The span as native indices into its source.
    ///
    /// # Errors
    ///
    /// Returns an error if an offset does not fit in `usize`.
    #[inline]
    pub fn byte_range(&self) -> Result<std::ops::Range<usize>, crate::enums::MathError> {
        let start = <u64 as TryInto<usize>>::try_into(self.range.start)?;
        let end = <u64 as TryInto<usize>>::try_into(self.range.end)?;

        Ok(start..end)
    }
}

/// Lines contained in `bytes`, counting a final unterminated line.
#[inline]
#[must_use]
pub fn count_lines(bytes: &[u8]) -> usize {
    crate::line_index::count_terminators(bytes)
        + usize::from(!bytes.is_empty() && !crate::line_index::is_terminated(bytes))
}

#[cfg(test)]
mod piece_tests {
    #[test]
    fn count_lines_cases() {
        assert_eq!(super::count_lines(b""), 0);
        assert_eq!(super::count_lines(b"a"), 1);
        assert_eq!(super::count_lines(b"a\n"), 1);
        assert_eq!(super::count_lines(b"a\nb"), 2);
        assert_eq!(super::count_lines(b"\n\n"), 2);
        assert_eq!(super::count_lines(b"a\r\nb\r\n"), 2);
        assert_eq!(super::count_lines(b"a\rb\rc\n"), 3);
        assert_eq!(super::count_lines(b"a\rb"), 2);
        assert_eq!(super::count_lines(b"TWO\r"), 1);
        assert_eq!(super::count_lines(b"\r\n\r"), 2);
    }

    #[test]
    fn len_and_range() {
        let piece = super::Piece::new(crate::enums::BufferKind::Add, 4..10, 2);

        assert_eq!(piece.len(), 6);
        assert!(!piece.is_empty());
        assert_eq!(piece.byte_range().unwrap(), 4..10);
    }
}

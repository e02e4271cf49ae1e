/// Sparse, sorted line-start offsets over the original file.
///
/// `checkpoints[i]` is the byte offset where line `i * stride` starts. Any
/// other line is found by walking at most `stride - 1` separators forward
/// from the nearest checkpoint. With `stride == 1` this is a dense index.
///
/// The index does not own the bytes it describes; callers pass the same
/// slice it was built from.
#[derive(Debug, Clone)]
pub struct LineIndex {
    checkpoints: Vec<usize>,
    stride: usize,
    line_count: usize,
    byte_len: usize,
}

impl LineIndex {
    pub(crate) fn from_parts(
        checkpoints: Vec<usize>,
        stride: usize,
        line_count: usize,
        byte_len: usize,
    ) -> Self {
        debug_assert!(checkpoints.first() == Some(&0));
        debug_assert!(checkpoints.windows(2).all(|w| w[0] < w[1]));

        Self {
            checkpoints,
            stride,
            line_count,
            byte_len,
        }
    }
}

/*

==========================
===== INLINE METHODS =====
==========================

*/

impl LineIndex {
    /// Number of lines in the original file.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    #[inline]
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    #[inline]
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    #[must_use]
    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }
}

/*

===================
===== LOOKUPS =====
===================

*/

impl LineIndex {
    /// Byte offset where `line` starts. Lines at or past the end resolve to
    /// the end of the file.
    #[must_use]
    pub fn line_start(&self, bytes: &[u8], line: usize) -> usize {
        debug_assert_eq!(bytes.len(), self.byte_len);

        if line >= self.line_count {
            return self.byte_len;
        }

        let base = self.checkpoints[line / self.stride];
        let skip = line % self.stride;

        if skip == 0 {
            return base;
        }

        crate::line_index::line_ends(bytes, base..self.byte_len)
            .nth(skip - 1)
            .unwrap_or(self.byte_len)
    }

    /// Line containing the byte at `offset` (or the line that would start
    /// there, for offsets sitting right after a terminator). The `\n` of a
    /// `\r\n` belongs to the line the `\r` ends.
    #[must_use]
    pub fn line_of_offset(&self, bytes: &[u8], offset: usize) -> usize {
        debug_assert_eq!(bytes.len(), self.byte_len);

        let offset = offset.min(self.byte_len);
        let cp = self
            .checkpoints
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let base = self.checkpoints[cp];

        cp * self.stride
            + crate::line_index::line_ends(bytes, base..offset).count()
    }

    /// Byte range covering `count` lines starting at `first`, separators included.
    #[must_use]
    pub fn line_range(&self, bytes: &[u8], first: usize, count: usize) -> std::ops::Range<usize> {
        let start = self.line_start(bytes, first);
        let end = self.line_start(bytes, first.saturating_add(count));

        start..end
    }
}

#[cfg(test)]
mod index_tests {
    fn index_of(bytes: &[u8], stride: usize) -> super::LineIndex {
        let config = crate::config::EngineConfig::default()
            .with_index_chunk_size(4)
            .with_index_stride(stride);

        crate::line_index::builder::build(bytes, &config, &crate::pool::WorkerPool::default())
            .unwrap()
    }

    #[test]
    fn line_start_past_end_clamps() {
        let text = b"ab\ncd";
        let index = index_of(text, 1);

        assert_eq!(index.line_start(text, 1), 3);
        assert_eq!(index.line_start(text, 2), 5);
        assert_eq!(index.line_start(text, 99), 5);
    }

    #[test]
    fn line_of_offset_inside_lines() {
        let text = b"ab\ncd\nef\n";
        let index = index_of(text, 2);

        assert_eq!(index.line_of_offset(text, 0), 0);
        assert_eq!(index.line_of_offset(text, 2), 0);
        assert_eq!(index.line_of_offset(text, 3), 1);
        assert_eq!(index.line_of_offset(text, 7), 2);
        assert_eq!(index.line_of_offset(text, 9), 3);
    }

    #[test]
    fn lone_carriage_return_lookups() {
        let text = b"a\rb\r\nc\rd";
        let index = index_of(text, 2);

        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_start(text, 1), 2);
        assert_eq!(index.line_start(text, 2), 5);
        assert_eq!(index.line_start(text, 3), 7);
        assert_eq!(index.line_of_offset(text, 3), 1);
        assert_eq!(index.line_of_offset(text, 4), 1);
        assert_eq!(index.line_of_offset(text, 5), 2);
        assert_eq!(&text[index.line_range(text, 1, 1)], b"b\r\n");
    }

    #[test]
    fn line_range_includes_separators() {
        let text = b"one\r\ntwo\nthree";
        let index = index_of(text, 1);

        assert_eq!(&text[index.line_range(text, 0, 1)], b"one\r\n");
        assert_eq!(&text[index.line_range(text, 1, 2)], b"two\nthree");
        assert_eq!(&text[index.line_range(text, 2, 10)], b"three");
    }
}

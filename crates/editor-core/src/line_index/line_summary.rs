/// Line count and byte length of one contiguous byte range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineSummary {
    /// Number of line terminators ending inside the range.
    pub line_count: usize,
    pub byte_len: u64,
}

impl LineSummary {
    /// Summarizes `bytes[range]`, peeking past its end so a `\r\n` split
    /// between two ranges is only counted by the second.
    #[must_use]
    pub fn of(bytes: &[u8], range: std::ops::Range<usize>) -> Self {
        Self {
            byte_len: range.len() as u64,
            line_count: crate::line_index::line_ends(bytes, range).count(),
        }
    }

    pub fn add(&mut self, other: &LineSummary) {
        self.line_count += other.line_count;
        self.byte_len += other.byte_len;
    }
}

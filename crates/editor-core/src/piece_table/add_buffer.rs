/// Append-only store for inserted text.
///
/// Bytes are never rewritten or removed, so every range handed out stays
/// valid for the life of the buffer.
#[derive(Debug, Default)]
pub struct AddBuffer {
    buf: Vec<u8>,
}

impl AddBuffer {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends `text` as whole lines and returns the range now holding it.
    ///
    /// The stored span always ends in `\n`: one is appended when `text`
    /// does not end with it. A trailing lone `\r` already ends the last line,
    /// so it becomes `\r\n` and cannot pair up with a `\n` that follows the
    /// span in the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length does not fit in `u64`.
    pub fn append_lines(&mut self, text: &[u8]) -> Result<std::ops::Range<u64>, crate::enums::MathError> {
        let start = <usize as TryInto<u64>>::try_into(self.buf.len())?;

        self.buf.extend_from_slice(text);

        if text.last() != Some(&crate::line_index::SEPARATOR) {
            self.buf.push(crate::line_index::SEPARATOR);
        }

        let end = <usize as TryInto<u64>>::try_into(self.buf.len())?;

        Ok(start..end)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, range: std::ops::Range<usize>) -> Option<&[u8]> {
        self.buf.get(range)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}

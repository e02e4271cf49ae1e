/// A bounded window of materialized lines over one engine.
///
/// Only `window_size` lines starting at `offset` are ever held in memory.
/// Every local change is forwarded to the engine as one `apply_edit`, after
/// which the window is re-read.
#[derive(Debug)]
pub struct Document {
    engine: editor_core::Engine,
    /// First document line currently materialized.
    offset: usize,
    window_size: usize,
    lines: Vec<String>,
    total_lines: usize,
}

impl Document {
    #[must_use]
    pub fn new(engine: editor_core::Engine, window_size: usize) -> Self {
        let mut document = Self {
            engine,
            offset: 0,
            window_size: window_size.max(1),
            lines: Vec::new(),
            total_lines: 0,
        };

        document.refresh();

        document
    }

    /// Re-reads the window from the engine.
    pub fn refresh(&mut self) {
        self.total_lines = self.engine.total_lines();
        self.offset = self.offset.min(self.max_offset());

        let block = self.engine.get_block(self.offset, self.window_size);

        // copy out before the next engine call reuses the buffer
        self.lines = editor_core::query::block_lines(block)
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect();
    }

    #[inline]
    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.window_size)
    }
}

/*

==========================
===== INLINE METHODS =====
==========================

*/

impl Document {
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Total lines as of the last refresh.
    #[inline]
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.engine.is_dirty()
    }

    #[inline]
    #[must_use]
    pub fn line_at(&self, local_line: usize) -> Option<&str> {
        self.lines.get(local_line).map(String::as_str)
    }

    /// Window-relative index of a document line, if it is materialized.
    #[inline]
    #[must_use]
    pub fn to_local(&self, line: usize) -> Option<usize> {
        line.checked_sub(self.offset)
            .filter(|&local| local < self.lines.len())
    }

    #[must_use]
    pub fn into_engine(self) -> editor_core::Engine {
        self.engine
    }
}

/*

======================
===== NAVIGATION =====
======================

*/

impl Document {
    /// Makes `line` visible. The window only moves when `line` falls outside
    /// it, and then re-centres on it. Returns whether the window moved.
    pub fn scroll_to(&mut self, line: usize) -> bool {
        let line = line.min(self.total_lines.saturating_sub(1));

        if line >= self.offset && line < self.offset + self.window_size {
            return false;
        }

        let target = line
            .saturating_sub(self.window_size / 2)
            .min(self.max_offset());

        if target == self.offset {
            return false;
        }

        self.offset = target;
        self.refresh();

        true
    }

    /// Next line at or after window line `from_local` containing `query`;
    /// scrolls to it when found.
    pub fn find_next(&mut self, query: &str, from_local: usize) -> Option<usize> {
        let hit = self
            .engine
            .search(query.as_bytes(), self.offset + from_local)?;

        self.scroll_to(hit);

        Some(hit)
    }

    /// Previous line at or before window line `from_local` containing `query`.
    pub fn find_prev(&mut self, query: &str, from_local: usize) -> Option<usize> {
        let hit = self
            .engine
            .search_backward(query.as_bytes(), self.offset + from_local)?;

        self.scroll_to(hit);

        Some(hit)
    }
}

/*

===================
===== EDITING =====
===================

*/

impl Document {
    /// Replaces `deleted` lines at window line `local_line` with `text`.
    ///
    /// # Errors
    ///
    /// Propagates engine errors; the window is left as it was.
    pub fn edit(
        &mut self,
        local_line: usize,
        deleted: usize,
        text: &str,
    ) -> editor_core::EngineResult<()> {
        self.engine
            .apply_edit(self.offset + local_line, deleted, text.as_bytes())?;
        self.refresh();

        Ok(())
    }

    /// Saves through the engine; `false` on any I/O failure.
    pub fn save_as(&mut self, path: impl AsRef<std::path::Path>) -> bool {
        self.engine.save(path)
    }
}

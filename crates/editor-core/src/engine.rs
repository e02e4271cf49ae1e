/// One open large file: its mapping, line index, add buffer and piece table.
///
/// # The contract
///
/// - Synchronous: every call runs to completion before returning. Parallel
///   sections (indexing at open, large searches) are joined inside the call.
/// - Line-based: callers speak in line numbers only. Out-of-range line
///   arguments clamp instead of failing.
/// - Single owner: one caller drives one engine. `close` consumes it.
#[derive(Debug)]
pub struct Engine {
    piece_table: crate::piece_table::table::PieceTable,
    config: crate::config::EngineConfig,
    pool: crate::pool::WorkerPool,

    /// Scratch space `get_block` hands out; reused across calls.
    block: Vec<u8>,

    /// Tracks if the document has edits not yet saved.
    is_dirty: bool,
}

/*

==================================
===== CREATION, OPEN, & SAVE =====
==================================

*/

impl Engine {
    /// Opens a file with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, lacks read permissions,
    /// is not a regular file, or if the memory mapping operation fails.
    pub fn open(path: impl AsRef<std::path::Path>) -> crate::errors::EngineResult<Self> {
        Self::open_with_config(path, crate::config::EngineConfig::default())
    }

    /// Opens a file, maps it into memory, and builds the line index.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::open`], plus failure to start a dedicated worker pool.
    pub fn open_with_config(
        path: impl AsRef<std::path::Path>,
        config: crate::config::EngineConfig,
    ) -> crate::errors::EngineResult<Self> {
        let started = std::time::Instant::now();
        let pool = crate::pool::WorkerPool::new(config.worker_threads)?;
        // The OS sets up the page tables but doesn't read the whole file into RAM yet.
        let mmap_file = io::mmap::MmapFile::open(path.as_ref())?;

        mmap_file.advise_sequential();
        let line_index =
            crate::line_index::builder::build(mmap_file.as_slice(), &config, &pool)?;
        mmap_file.advise_random();

        let piece_table = crate::piece_table::table::PieceTable::new(
            mmap_file,
            line_index,
            config.add_buffer_capacity,
        )?;

        tracing::debug!(
            path = %path.as_ref().display(),
            lines = piece_table.total_lines(),
            workers = pool.threads(),
            elapsed_ms = started.elapsed().as_millis(),
            "opened document"
        );

        Ok(Self {
            piece_table,
            config,
            pool,
            block: Vec::new(),
            is_dirty: false,
        })
    }

    /// Writes the document to `path`. Returns `false` (after logging why) on
    /// any I/O failure; the engine state is unchanged either way.
    #[must_use]
    pub fn save(&mut self, path: impl AsRef<std::path::Path>) -> bool {
        let path = path.as_ref();

        match self.piece_table.save_to(path) {
            Ok(bytes) => {
                tracing::info!(path = %path.display(), bytes, lines = self.total_lines(), "saved document");
                self.is_dirty = false;

                true
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "save failed");

                false
            }
        }
    }

    /// Releases the mapping, add buffer and piece table.
    pub fn close(self) {
        tracing::debug!(path = %self.path().display(), "closed document");
    }
}

/*

==========================
===== INLINE METHODS =====
==========================

*/

impl Engine {
    /// Number of lines in the document. O(1).
    #[inline]
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.piece_table.total_lines()
    }

    /// Document size in bytes as currently stored.
    #[inline]
    #[must_use]
    pub fn byte_len(&self) -> u64 {
        self.piece_table.len()
    }

    #[inline]
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.piece_table.pieces().len()
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Path of the file the engine was opened on.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        self.piece_table.original().path()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &crate::config::EngineConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn piece_table(&self) -> &crate::piece_table::table::PieceTable {
        &self.piece_table
    }

    /// Full consistency check of the piece table (full scan; tests and debugging only).
    #[must_use]
    pub fn verify(&self) -> bool {
        self.piece_table.verify()
    }
}

/*

===========================
========= GETTERS =========
===========================

*/

impl Engine {
    /// Lines `[start_line, start_line + num_lines)` as one contiguous,
    /// separator-terminated buffer.
    ///
    /// The slice borrows the engine's scratch buffer, so it must be consumed
    /// before the next call on this engine. Short (or empty) when the range
    /// runs past the end.
    pub fn get_block(&mut self, start_line: usize, num_lines: usize) -> &[u8] {
        self.piece_table
            .read_lines_into(start_line, num_lines, &mut self.block);

        &self.block
    }

    /// Owned, lossily decoded lines without separators.
    #[must_use]
    pub fn get_lines(&self, start_line: usize, num_lines: usize) -> Vec<String> {
        let mut block = Vec::new();

        self.piece_table
            .read_lines_into(start_line, num_lines, &mut block);

        crate::query::block_lines(&block)
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }

    /// First line at or after `start_line` containing `query`.
    #[must_use]
    pub fn search(&self, query: &[u8], start_line: usize) -> Option<usize> {
        self.piece_table.search(
            query,
            start_line,
            crate::enums::Direction::Forward,
            &self.config,
            &self.pool,
        )
    }

    /// Last line at or before `start_line` containing `query`.
    #[must_use]
    pub fn search_backward(&self, query: &[u8], start_line: usize) -> Option<usize> {
        self.piece_table.search(
            query,
            start_line,
            crate::enums::Direction::Backward,
            &self.config,
            &self.pool,
        )
    }
}

/*

===================
===== EDITING =====
===================

*/

impl Engine {
    /// Deletes `num_deleted` lines at `start_line`, then inserts `new_text`
    /// there. Re-read [`Engine::total_lines`] afterwards.
    ///
    /// Lines in `new_text` may end in `\n`, `\r\n` or a lone `\r`. Its last
    /// line always ends up terminated: a missing terminator becomes `\n`, and
    /// a trailing lone `\r` is stored as `\r\n`. Either way the terminator is
    /// not content, so `b"TWO\r"` reads back as the line `TWO`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the add buffer outgrows `u64` offsets.
    pub fn apply_edit(
        &mut self,
        start_line: usize,
        num_deleted: usize,
        new_text: &[u8],
    ) -> crate::errors::EngineResult<()> {
        let before = self.total_lines();
        let inserted = self
            .piece_table
            .apply_edit(start_line, num_deleted, new_text)?;

        if inserted > 0 || self.total_lines() != before {
            self.is_dirty = true;
        }

        Ok(())
    }
}

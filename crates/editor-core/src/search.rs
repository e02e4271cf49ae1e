use rayon::prelude::*;

/// A compiled byte-exact substring query, usable in either direction.
#[derive(Debug)]
pub struct Query<'q> {
    forward: memchr::memmem::Finder<'q>,
    backward: memchr::memmem::FinderRev<'q>,
}

impl<'q> Query<'q> {
    /// Returns `None` for queries that can never match inside a single
    /// line: the empty query and anything holding a `\n` or `\r`.
    #[must_use]
    pub fn new(needle: &'q [u8]) -> Option<Self> {
        if needle.is_empty()
            || memchr::memchr2(crate::line_index::SEPARATOR, crate::line_index::CARRIAGE_RETURN, needle)
                .is_some()
        {
            return None;
        }

        Some(Self {
            forward: memchr::memmem::Finder::new(needle),
            backward: memchr::memmem::FinderRev::new(needle),
        })
    }

    /// Byte position of the first hit in a run of whole lines.
    #[inline]
    #[must_use]
    pub fn find_first(&self, haystack: &[u8]) -> Option<usize> {
        self.forward.find(haystack)
    }

    /// Byte position of the last hit in a run of whole lines.
    #[inline]
    #[must_use]
    pub fn find_last(&self, haystack: &[u8]) -> Option<usize> {
        self.backward.rfind(haystack)
    }

    #[must_use]
    pub fn find(&self, haystack: &[u8], direction: crate::enums::Direction) -> Option<usize> {
        match direction {
            crate::enums::Direction::Forward => self.find_first(haystack),
            crate::enums::Direction::Backward => self.find_last(haystack),
        }
    }
}

/// Cuts `bytes` into roughly `chunk_size` pieces, each ending right after a
/// `\n` or `\r` (or at the end), so no line content straddles two chunks.
fn line_aligned_chunks(bytes: &[u8], chunk_size: usize) -> Vec<std::ops::Range<usize>> {
    let mut chunks = Vec::with_capacity(bytes.len() / chunk_size.max(1) + 1);
    let mut start = 0;

    while start < bytes.len() {
        let cut_from = start.saturating_add(chunk_size.max(1)).min(bytes.len());
        let end = memchr::memchr2(
            crate::line_index::SEPARATOR,
            crate::line_index::CARRIAGE_RETURN,
            &bytes[cut_from - 1..],
        )
        .map_or(bytes.len(), |pos| cut_from + pos);

        chunks.push(start..end);
        start = end;
    }

    chunks
}

/*

==================
===== SEARCH =====
==================

*/

impl crate::piece_table::table::PieceTable {
    /// Finds the first line at or after `start_line` (forward) or at or
    /// before it (backward) whose content contains `query`.
    ///
    /// Original-file spans larger than the configured threshold are split
    /// into line-aligned chunks and scanned on the worker pool; the call
    /// still returns only after every chunk has been joined.
    #[must_use]
    pub fn search(
        &self,
        query: &[u8],
        start_line: usize,
        direction: crate::enums::Direction,
        config: &crate::config::EngineConfig,
        pool: &crate::pool::WorkerPool,
    ) -> Option<usize> {
        let query = Query::new(query)?;

        if self.total_lines == 0 {
            return None;
        }

        match direction {
            crate::enums::Direction::Forward => {
                if start_line >= self.total_lines {
                    return None;
                }

                let (mut piece_idx, mut offset) = self.locate(start_line);
                let mut piece_first_line = start_line - offset;

                while piece_idx < self.pieces.len() {
                    let piece = &self.pieces[piece_idx];
                    let count = piece.line_count - offset;

                    if let Some(line) = self.search_piece(piece, offset, count, &query, direction, config, pool) {
                        return Some(piece_first_line + offset + line);
                    }

                    piece_first_line += piece.line_count;
                    offset = 0;
                    piece_idx += 1;
                }

                None
            }
            crate::enums::Direction::Backward => {
                let start_line = start_line.min(self.total_lines - 1);
                let (mut piece_idx, mut offset) = self.locate(start_line);
                let mut piece_first_line = start_line - offset;

                // walking backwards through pieces, from line 0 up to `offset` inclusive
                loop {
                    let piece = &self.pieces[piece_idx];

                    if let Some(line) = self.search_piece(piece, 0, offset + 1, &query, direction, config, pool) {
                        return Some(piece_first_line + line);
                    }

                    if piece_idx == 0 {
                        return None;
                    }

                    piece_idx -= 1;
                    offset = self.pieces[piece_idx].line_count - 1;
                    piece_first_line -= self.pieces[piece_idx].line_count;
                }
            }
        }
    }

    /// Searches lines `[first, first + count)` of one piece and returns the
    /// matching line relative to `first`.
    #[allow(clippy::too_many_arguments)]
    fn search_piece(
        &self,
        piece: &crate::piece_table::piece::Piece,
        first: usize,
        count: usize,
        query: &Query<'_>,
        direction: crate::enums::Direction,
        config: &crate::config::EngineConfig,
        pool: &crate::pool::WorkerPool,
    ) -> Option<usize> {
        let span_start = self.line_offset_in_piece(piece, first);
        let span = self.piece_lines(piece, first, count);

        match piece.buf_kind {
            crate::enums::BufferKind::Original => {
                let pos = if span.len() >= config.parallel_search_threshold {
                    let chunks = line_aligned_chunks(span, config.search_chunk_size);

                    pool.install(|| {
                        let hit = |range: &std::ops::Range<usize>| {
                            query
                                .find(&span[range.clone()], direction)
                                .map(|pos| range.start + pos)
                        };

                        match direction {
                            crate::enums::Direction::Forward => chunks.par_iter().find_map_first(hit),
                            crate::enums::Direction::Backward => chunks.par_iter().find_map_last(hit),
                        }
                    })
                } else {
                    query.find(span, direction)
                }?;

                let source = self.original.as_slice();
                let abs_span_start = piece
                    .byte_range()
                    .expect("piece offsets exceed the address space")
                    .start
                    + span_start;

                Some(
                    self.line_index.line_of_offset(source, abs_span_start + pos)
                        - self.line_index.line_of_offset(source, abs_span_start),
                )
            }
            crate::enums::BufferKind::Add => {
                let pos = query.find(span, direction)?;

                Some(crate::line_index::count_terminators(&span[..pos]))
            }
        }
    }
}

#[derive(Debug)]
pub struct PieceTable {
    /// Original unchanged file content (zero-copy).
    pub(crate) original: io::mmap::MmapFile,
    /// Line starts of `original`, used to split original pieces on line boundaries.
    pub(crate) line_index: crate::line_index::index::LineIndex,
    /// Append-only buffer storing inserted lines.
    pub(crate) add: crate::piece_table::add_buffer::AddBuffer,
    /// Ordered list of pieces describing the visible document.
    pub(crate) pieces: Vec<crate::piece_table::piece::Piece>,
    /// Running `sum(piece.line_count)`, maintained incrementally by edits.
    pub(crate) total_lines: usize,
}

/*

====================================
========= CREATION METHOD ==========
====================================

*/

impl PieceTable {
    /// Wraps `original` in a table holding one piece that spans the whole file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file length does not fit in `u64`.
    pub fn new(
        original: io::mmap::MmapFile,
        line_index: crate::line_index::index::LineIndex,
        add_capacity: usize,
    ) -> Result<Self, crate::enums::MathError> {
        let mut pieces = Vec::new();
        let total_lines = line_index.line_count();

        if !original.is_empty() {
            pieces.push(crate::piece_table::piece::Piece::new(
                crate::enums::BufferKind::Original,
                0..<usize as TryInto<u64>>::try_into(original.len())?,
                total_lines,
            ));
        }

        Ok(Self {
            original,
            line_index,
            add: crate::piece_table::add_buffer::AddBuffer::with_capacity(add_capacity),
            pieces,
            total_lines,
        })
    }
}

/*

====================================
========= INLINE METHODS  ==========
====================================

*/

impl PieceTable {
    #[inline]
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Total document length in bytes, not counting canonical separators
    /// emitted after an unterminated final original line.
    #[inline]
    #[must_use]
    pub fn len(&self) -> u64 {
        self.pieces.iter().map(crate::piece_table::piece::Piece::len).sum()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_lines == 0
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self) -> &[crate::piece_table::piece::Piece] {
        &self.pieces
    }

    #[inline]
    #[must_use]
    pub fn original(&self) -> &io::mmap::MmapFile {
        &self.original
    }

    #[inline]
    #[must_use]
    pub fn line_index(&self) -> &crate::line_index::index::LineIndex {
        &self.line_index
    }

    #[inline]
    #[must_use]
    pub fn add_buffer(&self) -> &crate::piece_table::add_buffer::AddBuffer {
        &self.add
    }

    /// Returns `(piece_index, line_offset_inside_piece)` for a document line.
    /// Lines at or past the end map to `(pieces.len(), 0)`.
    #[inline]
    #[must_use]
    pub fn locate(&self, line: usize) -> (usize, usize) {
        let mut first_line = 0;

        for (idx, piece) in self.pieces.iter().enumerate() {
            if line < first_line + piece.line_count {
                return (idx, line - first_line);
            }

            first_line += piece.line_count;
        }

        (self.pieces.len(), 0)
    }
}

/*

=============================
========= SLICING  ==========
=============================

*/

impl PieceTable {
    /// Bytes of a whole piece.
    ///
    /// # Panics
    ///
    /// Panics if the piece points outside its source. That can only happen if
    /// the table itself is corrupt.
    #[inline]
    #[must_use]
    pub fn bytes_of(&self, piece: &crate::piece_table::piece::Piece) -> &[u8] {
        let range = piece
            .byte_range()
            .expect("piece offsets exceed the address space");

        let bytes = match piece.buf_kind {
            crate::enums::BufferKind::Original => {
                self.original.get_bytes_exact(range.start, range.len())
            }
            crate::enums::BufferKind::Add => self.add.get(range),
        };

        bytes.unwrap_or_else(|| panic!("piece {piece:?} points outside its source"))
    }

    /// Byte offset, relative to the piece start, where line `line` of the
    /// piece begins. `line >= piece.line_count` resolves to the piece end.
    #[must_use]
    pub fn line_offset_in_piece(&self, piece: &crate::piece_table::piece::Piece, line: usize) -> usize {
        let bytes = self.bytes_of(piece);

        if line == 0 {
            return 0;
        }

        if line >= piece.line_count {
            return bytes.len();
        }

        match piece.buf_kind {
            crate::enums::BufferKind::Original => {
                let source = self.original.as_slice();
                let piece_start = piece
                    .byte_range()
                    .expect("piece offsets exceed the address space")
                    .start;
                let first = self.line_index.line_of_offset(source, piece_start);

                self.line_index.line_start(source, first + line) - piece_start
            }
            crate::enums::BufferKind::Add => {
                crate::line_index::line_ends(bytes, 0..bytes.len())
                    .nth(line - 1)
                    .unwrap_or(bytes.len())
            }
        }
    }

    /// Bytes of `count` lines of `piece`, starting at its line `first`.
    #[must_use]
    pub fn piece_lines(
        &self,
        piece: &crate::piece_table::piece::Piece,
        first: usize,
        count: usize,
    ) -> &[u8] {
        let bytes = self.bytes_of(piece);
        let start = self.line_offset_in_piece(piece, first);
        let end = self.line_offset_in_piece(piece, first.saturating_add(count));

        &bytes[start..end]
    }

    /// Returns an iterator that yields sequential zero-copy byte slices
    /// representing the fully evaluated document, one terminated stream.
    ///
    /// A canonical `\n` is emitted after a piece whose last line is
    /// unterminated, and after a piece ending in a lone `\r` when the next
    /// piece starts with `\n`.
    pub fn iter_bytes(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.pieces.iter().enumerate().flat_map(move |(idx, piece)| {
            let bytes = self.bytes_of(piece);
            let next = self
                .pieces
                .get(idx + 1)
                .and_then(|next| self.bytes_of(next).first().copied());
            let joint: &[u8] = if crate::line_index::needs_separator(bytes, next) {
                b"\n"
            } else {
                &[]
            };

            [bytes, joint].into_iter().filter(|chunk| !chunk.is_empty())
        })
    }
}

/*

===============================
========= STRUCTURE  ==========
===============================

*/

impl PieceTable {
    /// Splits piece `idx` so that its line `line` starts a new piece.
    /// Both halves keep referencing the same source.
    fn split_piece(&mut self, idx: usize, line: usize) {
        let piece = self.pieces[idx].clone();

        if line == 0 || line >= piece.line_count {
            return;
        }

        let cut = piece.range.start + self.line_offset_in_piece(&piece, line) as u64;

        assert!(
            piece.range.start < cut && cut < piece.range.end,
            "split of {piece:?} at line {line} landed outside the piece"
        );

        self.pieces.splice(
            idx..=idx,
            [
                crate::piece_table::piece::Piece::new(piece.buf_kind, piece.range.start..cut, line),
                crate::piece_table::piece::Piece::new(
                    piece.buf_kind,
                    cut..piece.range.end,
                    piece.line_count - line,
                ),
            ],
        );
    }

    /// Makes sure a piece boundary sits right before document line `line`
    /// and returns the index of the piece starting there (`pieces.len()` at
    /// the end of the document).
    pub(crate) fn boundary_at(&mut self, line: usize) -> usize {
        let (idx, offset) = self.locate(line);

        if idx == self.pieces.len() || offset == 0 {
            return idx;
        }

        self.split_piece(idx, offset);

        idx + 1
    }

    /// Inserts `piece` at `idx`, coalescing it into the previous piece when
    /// both are adjacent in the add buffer.
    pub(crate) fn insert_piece(&mut self, idx: usize, piece: crate::piece_table::piece::Piece) {
        if let Some(prev) = idx.checked_sub(1).and_then(|i| self.pieces.get(i))
            && prev.buf_kind == piece.buf_kind
            && piece.buf_kind == crate::enums::BufferKind::Add
            && prev.range.end == piece.range.start
        {
            let merged = crate::piece_table::piece::Piece::new(
                prev.buf_kind,
                prev.range.start..piece.range.end,
                prev.line_count + piece.line_count,
            );

            self.pieces[idx - 1] = merged;

            return;
        }

        self.pieces.insert(idx, piece);
    }

    /// Recomputes every cached count from the bytes and checks the table's
    /// structural invariants. This is a full scan; it is meant for tests and
    /// debugging, never for the edit path.
    #[must_use]
    pub fn verify(&self) -> bool {
        let mut total = 0;

        for piece in &self.pieces {
            let Ok(range) = piece.byte_range() else {
                return false;
            };

            let bytes = match piece.buf_kind {
                crate::enums::BufferKind::Original => {
                    self.original.get_bytes_exact(range.start, range.len())
                }
                crate::enums::BufferKind::Add => self.add.get(range.clone()),
            };

            let Some(bytes) = bytes else {
                return false;
            };

            if bytes.is_empty() || crate::piece_table::piece::count_lines(bytes) != piece.line_count {
                return false;
            }

            let ends_original = piece.buf_kind == crate::enums::BufferKind::Original
                && range.end == self.original.len();

            if !crate::line_index::is_terminated(bytes) && !ends_original {
                return false;
            }

            match piece.buf_kind {
                // never cut between the `\r` and `\n` of one terminator
                crate::enums::BufferKind::Original => {
                    let source = self.original.as_slice();

                    if !crate::line_index::is_line_start(source, range.start)
                        || (!ends_original && !crate::line_index::is_line_start(source, range.end))
                    {
                        return false;
                    }
                }
                crate::enums::BufferKind::Add => {
                    if bytes.last() != Some(&crate::line_index::SEPARATOR) {
                        return false;
                    }
                }
            }

            total += piece.line_count;
        }

        total == self.total_lines
    }
}

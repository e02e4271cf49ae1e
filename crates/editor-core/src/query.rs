/*

========================
===== LINE QUERIES =====
========================

*/

impl crate::piece_table::table::PieceTable {
    /// Copies lines `[start_line, start_line + num_lines)` into `out`, each
    /// terminated by its original terminator (or a canonical `\n` for an
    /// unterminated final line). `out` is cleared first.
    ///
    /// Where a lone `\r` from one piece meets a `\n` from the next, a `\n`
    /// is inserted between them so the two lines stay apart.
    ///
    /// Returns the number of lines written, which is short when the range
    /// runs past the end of the document and zero when it starts past it.
    pub fn read_lines_into(&self, start_line: usize, num_lines: usize, out: &mut Vec<u8>) -> usize {
        out.clear();

        if num_lines == 0 || start_line >= self.total_lines {
            return 0;
        }

        let (mut piece_idx, mut offset) = self.locate(start_line);
        let mut emitted = 0;

        // stitch together pieces until the requested line count is satisfied
        while emitted < num_lines && piece_idx < self.pieces.len() {
            let piece = &self.pieces[piece_idx];
            let take = (piece.line_count - offset).min(num_lines - emitted);
            let bytes = self.piece_lines(piece, offset, take);

            if crate::line_index::needs_separator(out.as_slice(), bytes.first().copied()) {
                out.push(crate::line_index::SEPARATOR);
            }

            out.extend_from_slice(bytes);

            if !crate::line_index::is_terminated(bytes) {
                out.push(crate::line_index::SEPARATOR);
            }

            emitted += take;
            offset = 0;
            piece_idx += 1;
        }

        emitted
    }

    /// Content of one line without its separator.
    #[must_use]
    pub fn line_content(&self, line: usize) -> Option<Vec<u8>> {
        let mut out = Vec::new();

        if self.read_lines_into(line, 1, &mut out) == 0 {
            return None;
        }

        Some(strip_separator(&out).to_vec())
    }
}

/// `line` without a trailing `\n`, `\r\n` or `\r`.
#[inline]
#[must_use]
pub fn strip_separator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);

    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Splits a terminated block into line contents. Bytes after the last
/// terminator are ignored; blocks read from a table never have any.
pub fn block_lines(block: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut start = 0;

    crate::line_index::line_ends(block, 0..block.len()).map(move |end| {
        let line = strip_separator(&block[start..end]);
        start = end;

        line
    })
}

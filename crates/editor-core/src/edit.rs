/*

=================
===== EDITS =====
=================

*/

impl crate::piece_table::table::PieceTable {
    /// Deletes `num_deleted` lines starting at `start_line`, then inserts
    /// `new_text` (lines ended by `\n`, `\r\n` or `\r`, last terminator
    /// optional) there.
    ///
    /// Out-of-range arguments clamp to the document. Returns the number of
    /// lines inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the add buffer outgrows `u64` offsets.
    ///
    /// # Panics
    ///
    /// Panics if the removed pieces do not cover exactly the deleted lines,
    /// which means the table was already corrupt.
    pub fn apply_edit(
        &mut self,
        start_line: usize,
        num_deleted: usize,
        new_text: &[u8],
    ) -> Result<usize, crate::enums::MathError> {
        let start = start_line.min(self.total_lines);
        let deleted = num_deleted.min(self.total_lines - start);

        if deleted == 0 && new_text.is_empty() {
            return Ok(0);
        }

        let first = self.boundary_at(start);
        let last = self.boundary_at(start + deleted);
        let removed: usize = self.pieces[first..last].iter().map(|p| p.line_count).sum();

        assert_eq!(
            removed, deleted,
            "pieces {first}..{last} hold {removed} lines, expected {deleted}"
        );

        self.pieces.drain(first..last);

        let inserted = if new_text.is_empty() {
            0
        } else {
            let range = self.add.append_lines(new_text)?;
            let line_count = crate::piece_table::piece::count_lines(new_text);

            self.insert_piece(
                first,
                crate::piece_table::piece::Piece::new(
                    crate::enums::BufferKind::Add,
                    range,
                    line_count,
                ),
            );

            line_count
        };

        self.total_lines = self.total_lines - deleted + inserted;

        debug_assert_eq!(
            self.total_lines,
            self.pieces.iter().map(|p| p.line_count).sum::<usize>()
        );

        tracing::trace!(
            start,
            deleted,
            inserted,
            total_lines = self.total_lines,
            pieces = self.pieces.len(),
            "applied edit"
        );

        Ok(inserted)
    }
}

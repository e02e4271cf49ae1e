use std::io::Write;

/*

=======================
===== PERSISTENCE =====
=======================

*/

impl crate::piece_table::table::PieceTable {
    /// Streams the document, piece by piece, into `writer`. Returns the
    /// number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<u64> {
        let mut written = 0u64;

        for chunk in self.iter_bytes() {
            writer.write_all(chunk)?;
            written += chunk.len() as u64;
        }

        writer.flush()?;

        Ok(written)
    }

    /// Writes the document to `path`.
    ///
    /// The bytes go to a temporary file in the destination directory first,
    /// which is then renamed over `path`, so a failed save never leaves a
    /// truncated destination behind. Saving over the file this table maps is
    /// fine: the mapping keeps the old inode alive.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp file cannot be created or written, or if
    /// the final rename fails.
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<u64> {
        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => std::path::Path::new("."),
        };
        let temp_save_file = tempfile::Builder::new()
            .prefix(".bigedit_save_")
            .tempfile_in(parent_dir)?;

        let mut writer = std::io::BufWriter::new(temp_save_file);
        let written = self.write_to(&mut writer)?;
        let temp_save_file = writer.into_inner().map_err(std::io::IntoInnerError::into_error)?;

        temp_save_file.as_file().sync_all()?;
        temp_save_file.persist(path).map_err(|e| e.error)?;

        Ok(written)
    }
}

#[cfg(test)]
mod persist_tests {
    use crate::test_support::pt_from_str;

    #[test]
    fn write_to_streams_all_pieces() {
        let mut pt = pt_from_str("alpha\nbeta\ngamma\n", 1);

        pt.apply_edit(1, 1, b"BETA").unwrap();

        let mut out = Vec::new();
        let written = pt.write_to(&mut out).unwrap();

        assert_eq!(out, b"alpha\nBETA\ngamma\n");
        assert_eq!(written, out.len() as u64);
    }

    #[test]
    fn save_normalizes_missing_trailing_separator() {
        let pt = pt_from_str("one\ntwo", 1);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");

        pt.save_to(&target).unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"one\ntwo\n");
    }

    #[test]
    fn save_keeps_crlf_bytes_around_edits() {
        let mut pt = pt_from_str("alpha\r\nbeta\r\ngamma\r\ndelta", 1);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("crlf.txt");

        pt.save_to(&target).unwrap();
        assert_eq!(
            std::fs::read(&target).unwrap(),
            b"alpha\r\nbeta\r\ngamma\r\ndelta\n"
        );

        pt.apply_edit(1, 1, b"BETA\r\n").unwrap();
        pt.save_to(&target).unwrap();
        assert_eq!(
            std::fs::read(&target).unwrap(),
            b"alpha\r\nBETA\r\ngamma\r\ndelta\n"
        );
    }

    #[test]
    fn save_keeps_lone_carriage_return_apart_from_next_line() {
        let mut pt = pt_from_str("a\rskip\n\nb\n", 1);

        pt.apply_edit(1, 1, b"").unwrap();

        let mut out = Vec::new();
        pt.write_to(&mut out).unwrap();

        assert_eq!(out, b"a\r\n\nb\n");
        assert_eq!(crate::line_index::count_terminators(&out), 3);
    }

    #[test]
    fn save_into_missing_directory_fails_without_creating_file() {
        let pt = pt_from_str("one\n", 1);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.txt");

        assert!(pt.save_to(&target).is_err());
        assert!(!target.exists());
    }

    #[test]
    fn save_leaves_no_temp_files_behind() {
        let pt = pt_from_str("x\n", 1);
        let dir = tempfile::tempdir().unwrap();

        pt.save_to(&dir.path().join("a.txt")).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("a.txt")]);
    }
}

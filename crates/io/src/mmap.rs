/// A read-only memory map over one regular file.
///
/// The mapping is created once and never remapped, so every slice handed out
/// stays valid for as long as the `MmapFile` lives.
#[derive(Debug)]
pub struct MmapFile {
    _file: std::fs::File,
    mmap: memmap2::Mmap,
    path: std::path::PathBuf,
}

impl MmapFile {
    /// # Errors
    ///
    /// - `std::io::Error` if the file cannot be opened or mapped.
    /// - `ErrorKind::InvalidInput` if the path is not a regular file.
    pub fn open(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let file = std::fs::File::open(&path_buf)?;
        let metadata = file.metadata()?;

        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path_buf.display()),
            ));
        }

        // SAFETY:
        // - File is opened read-only
        // - We keep the file handle alive in struct
        // - Caller only gets immutable &[u8]
        let mmap = unsafe { memmap2::Mmap::map(&file)? };

        tracing::debug!(path = %path_buf.display(), bytes = mmap.len(), "mapped file");

        Ok(Self {
            _file: file,
            mmap,
            path: path_buf,
        })
    }

    /// STRICT: Gets an exact slice of bytes.
    /// Returns `None` if the requested range goes out of bounds or overflows.
    #[inline]
    #[must_use]
    pub fn get_bytes_exact(&self, start: usize, length: usize) -> Option<&[u8]> {
        let end = start.checked_add(length)?;

        self.mmap.get(start..end)
    }

    /// FORGIVING: Gets bytes starting at `start`, up to `length`.
    /// If `length` goes past the end of the file, it just returns the rest of the file.
    /// If `start` is past the end of the file, it returns an empty slice.
    #[inline]
    #[must_use]
    pub fn get_bytes_clamped(&self, start: usize, length: usize) -> &[u8] {
        if start >= self.len() {
            return &[];
        }

        let end = std::cmp::min(start.saturating_add(length), self.len());

        &self.mmap[start..end]
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.mmap
    }

    /// File length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Whether file is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path of mapped file.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

/*

===============================
===== ACCESS PATTERN HINTS ====
===============================

*/

impl MmapFile {
    /// Tells the kernel the whole mapping is about to be read front to back.
    /// Failures are logged and otherwise ignored; the hint is advisory.
    pub fn advise_sequential(&self) {
        #[cfg(unix)]
        self.advise(memmap2::Advice::Sequential);
    }

    /// Tells the kernel later access will jump around (windowed queries).
    pub fn advise_random(&self) {
        #[cfg(unix)]
        self.advise(memmap2::Advice::Random);
    }

    #[cfg(unix)]
    fn advise(&self, advice: memmap2::Advice) {
        if self.is_empty() {
            return;
        }

        if let Err(err) = self.mmap.advise(advice) {
            tracing::debug!(path = %self.path.display(), ?advice, %err, "madvise failed");
        }
    }
}

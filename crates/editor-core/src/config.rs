/// Tuning knobs for one engine handle.
///
/// Nothing here changes results, only how the work is split up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Bytes per chunk when counting lines in parallel at open.
    pub index_chunk_size: usize,
    /// Keep one line-start checkpoint every `index_stride` lines. `1` keeps every line start.
    pub index_stride: usize,
    /// Size of the dedicated worker pool. `0` uses rayon's global pool.
    pub worker_threads: usize,
    /// Original-file spans at least this long are searched in parallel.
    pub parallel_search_threshold: usize,
    /// Bytes per chunk when a search fans out.
    pub search_chunk_size: usize,
    /// Initial reservation for inserted text.
    pub add_buffer_capacity: usize,
}

pub const DEFAULT_INDEX_CHUNK_SIZE: usize = 4 * 1024 * 1024;
pub const DEFAULT_INDEX_STRIDE: usize = 256;
pub const DEFAULT_PARALLEL_SEARCH_THRESHOLD: usize = 8 * 1024 * 1024;
pub const DEFAULT_SEARCH_CHUNK_SIZE: usize = 2 * 1024 * 1024;
pub const DEFAULT_ADD_BUFFER_CAPACITY: usize = 64 * 1024;

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_chunk_size: DEFAULT_INDEX_CHUNK_SIZE,
            index_stride: DEFAULT_INDEX_STRIDE,
            worker_threads: 0,
            parallel_search_threshold: DEFAULT_PARALLEL_SEARCH_THRESHOLD,
            search_chunk_size: DEFAULT_SEARCH_CHUNK_SIZE,
            add_buffer_capacity: DEFAULT_ADD_BUFFER_CAPACITY,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_index_chunk_size(mut self, bytes: usize) -> Self {
        self.index_chunk_size = bytes.max(1);
        self
    }

    #[must_use]
    pub fn with_index_stride(mut self, lines: usize) -> Self {
        self.index_stride = lines.max(1);
        self
    }

    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    #[must_use]
    pub fn with_parallel_search_threshold(mut self, bytes: usize) -> Self {
        self.parallel_search_threshold = bytes;
        self
    }

    #[must_use]
    pub fn with_search_chunk_size(mut self, bytes: usize) -> Self {
        self.search_chunk_size = bytes.max(1);
        self
    }

    #[must_use]
    pub fn with_add_buffer_capacity(mut self, bytes: usize) -> Self {
        self.add_buffer_capacity = bytes;
        self
    }
}

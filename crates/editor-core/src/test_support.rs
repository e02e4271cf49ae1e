use std::io::Write;

/// Writes `content` to a fresh temp file and keeps the file alive alongside
/// whatever maps it.
pub(crate) fn temp_file_with(content: &[u8]) -> tempfile::NamedTempFile {
    let mut temp = tempfile::NamedTempFile::new().expect("could not create temp file");

    temp.write_all(content).expect("could not write");
    temp.as_file().sync_all().expect("could not sync");

    temp
}

/// Small chunks and a custom stride so tests cross chunk and checkpoint
/// boundaries even on tiny inputs.
pub(crate) fn tiny_config(stride: usize) -> crate::config::EngineConfig {
    crate::config::EngineConfig::default()
        .with_index_chunk_size(3)
        .with_index_stride(stride)
        .with_parallel_search_threshold(8)
        .with_search_chunk_size(5)
        .with_add_buffer_capacity(16)
}

pub(crate) fn pt_from_str(s: &str, stride: usize) -> crate::piece_table::table::PieceTable {
    let temp = temp_file_with(s.as_bytes());
    let path = temp.into_temp_path();
    let mmap = io::mmap::MmapFile::open(&path).unwrap();
    let config = tiny_config(stride);
    let index = crate::line_index::builder::build(
        mmap.as_slice(),
        &config,
        &crate::pool::WorkerPool::default(),
    )
    .unwrap();

    crate::piece_table::table::PieceTable::new(mmap, index, config.add_buffer_capacity).unwrap()
}

pub(crate) fn table_lines(pt: &crate::piece_table::table::PieceTable) -> Vec<String> {
    let bytes: Vec<u8> = pt.iter_bytes().flatten().copied().collect();

    crate::query::block_lines(&bytes)
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect()
}

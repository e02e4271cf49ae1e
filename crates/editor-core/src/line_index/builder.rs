use rayon::prelude::*;

/*

====================
===== CREATION =====
====================

*/

/// Builds a [`LineIndex`](crate::line_index::index::LineIndex) over `bytes`.
///
/// 1. PASS ONE: split the range into `index_chunk_size` chunks and count the
///    line terminators of every chunk concurrently. A `\r\n` cut by a chunk
///    boundary is credited to the chunk holding the `\n`.
/// 2. A prefix sum over the chunk counts gives the global number of the first
///    terminator inside each chunk.
/// 3. PASS TWO: every chunk concurrently collects the start offsets of the
///    lines whose number is a multiple of `index_stride`; the chunk-local lists
///    are concatenated in chunk order, which keeps them sorted.
///
/// # Errors
///
/// Returns an error if a chunk length does not fit in `u64`.
pub fn build(
    bytes: &[u8],
    config: &crate::config::EngineConfig,
    pool: &crate::pool::WorkerPool,
) -> Result<crate::line_index::index::LineIndex, crate::enums::MathError> {
    let started = std::time::Instant::now();
    let chunk_size = config.index_chunk_size.max(1);
    let stride = config.index_stride.max(1);

    let summaries: Vec<crate::line_index::line_summary::LineSummary> = pool.install(|| {
        bytes
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(chunk_idx, chunk)| {
                let base = chunk_idx * chunk_size;

                crate::line_index::line_summary::LineSummary::of(bytes, base..base + chunk.len())
            })
            .collect()
    });

    let mut separators_before = Vec::with_capacity(summaries.len());
    let mut total = crate::line_index::line_summary::LineSummary::default();

    for summary in &summaries {
        separators_before.push(total.line_count);
        total.add(summary);
    }

    if total.byte_len != <usize as TryInto<u64>>::try_into(bytes.len())? {
        return Err(crate::enums::MathError::Overflow);
    }

    let local_checkpoints: Vec<Vec<usize>> = pool.install(|| {
        bytes
            .par_chunks(chunk_size)
            .zip(separators_before.par_iter())
            .enumerate()
            .map(|(chunk_idx, (chunk, &before))| {
                let base = chunk_idx * chunk_size;

                crate::line_index::line_ends(bytes, base..base + chunk.len())
                    .enumerate()
                    .filter_map(|(nth, start)| {
                        // The k-th terminator (0-based) starts line k + 1.
                        let line = before + nth + 1;

                        (line % stride == 0 && start < bytes.len()).then_some(start)
                    })
                    .collect()
            })
            .collect()
    });

    let mut checkpoints = Vec::with_capacity(1 + local_checkpoints.iter().map(Vec::len).sum::<usize>());
    checkpoints.push(0);

    for local in local_checkpoints {
        checkpoints.extend(local);
    }

    let line_count =
        total.line_count + usize::from(!bytes.is_empty() && !crate::line_index::is_terminated(bytes));

    tracing::debug!(
        bytes = bytes.len(),
        lines = line_count,
        chunks = summaries.len(),
        checkpoints = checkpoints.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "built line index"
    );

    Ok(crate::line_index::index::LineIndex::from_parts(
        checkpoints,
        stride,
        line_count,
        bytes.len(),
    ))
}

//! C ABI over [`editor_core::Engine`] for hosts that load the engine as a
//! shared library.
//!
//! Handles are opaque heap pointers created by [`bigedit_open`] and released
//! by [`bigedit_free`]. Every entry point accepts a null handle and answers
//! with its failure sentinel (null, `0`, `false` or `-1`).

use std::ffi::c_char;

/// Borrows a NUL-terminated C string as bytes.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn c_bytes<'a>(ptr: *const c_char) -> Option<&'a [u8]> {
    if ptr.is_null() {
        return None;
    }

    // SAFETY: non-null and NUL-terminated per the caller's contract.
    Some(unsafe { std::ffi::CStr::from_ptr(ptr) }.to_bytes())
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> std::path::PathBuf {
    use std::os::unix::ffi::OsStrExt;

    std::path::PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> std::path::PathBuf {
    std::path::PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

#[inline]
fn line_or_sentinel(line: Option<usize>) -> isize {
    line.and_then(|line| isize::try_from(line).ok()).unwrap_or(-1)
}

/*

===========================
===== HANDLE LIFETIME =====
===========================

*/

/// Opens `path` and returns a new handle, or null on any failure.
///
/// # Safety
///
/// `path` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bigedit_open(path: *const c_char) -> *mut editor_core::Engine {
    // SAFETY: forwarded from this function's contract.
    let Some(bytes) = (unsafe { c_bytes(path) }) else {
        return std::ptr::null_mut();
    };
    let path = bytes_to_path(bytes);

    match editor_core::Engine::open(&path) {
        Ok(engine) => Box::into_raw(Box::new(engine)),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "open failed");

            std::ptr::null_mut()
        }
    }
}

/// Releases a handle. Null is ignored.
///
/// # Safety
///
/// `engine` must be null or a handle from [`bigedit_open`] that has not been
/// freed yet. It must not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bigedit_free(engine: *mut editor_core::Engine) {
    if engine.is_null() {
        return;
    }

    // SAFETY: the pointer came from `Box::into_raw` in `bigedit_open`.
    unsafe { Box::from_raw(engine) }.close();
}

/*

===================
===== QUERIES =====
===================

*/

/// Number of lines in the document, or `0` for a null handle.
///
/// # Safety
///
/// `engine` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bigedit_total_lines(engine: *const editor_core::Engine) -> usize {
    // SAFETY: null or live per the contract.
    unsafe { engine.as_ref() }.map_or(0, editor_core::Engine::total_lines)
}

/// Reads `num_lines` lines from `start_line` into the handle's scratch buffer
/// and returns a pointer to it, writing its length to `out_len`.
///
/// The buffer stays valid until the next call on the same handle.
///
/// # Safety
///
/// `engine` must be null or a live handle; `out_len` must be null or
/// writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bigedit_get_block(
    engine: *mut editor_core::Engine,
    start_line: usize,
    num_lines: usize,
    out_len: *mut usize,
) -> *const u8 {
    // SAFETY: null or live and exclusively borrowed for this call.
    let Some(engine) = (unsafe { engine.as_mut() }) else {
        // SAFETY: null or writable per the contract.
        if let Some(out_len) = unsafe { out_len.as_mut() } {
            *out_len = 0;
        }

        return std::ptr::null();
    };
    let block = engine.get_block(start_line, num_lines);

    // SAFETY: null or writable per the contract.
    if let Some(out_len) = unsafe { out_len.as_mut() } {
        *out_len = block.len();
    }

    block.as_ptr()
}

/// First line at or after `start_line` containing `query`, or `-1`.
///
/// # Safety
///
/// `engine` must be null or a live handle; `query` must be null or a valid
/// NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bigedit_search(
    engine: *const editor_core::Engine,
    query: *const c_char,
    start_line: usize,
) -> isize {
    // SAFETY: forwarded from this function's contract.
    let (Some(engine), Some(query)) = (unsafe { engine.as_ref() }, unsafe { c_bytes(query) })
    else {
        return -1;
    };

    line_or_sentinel(engine.search(query, start_line))
}

/// Last line at or before `start_line` containing `query`, or `-1`.
///
/// # Safety
///
/// Same as [`bigedit_search`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bigedit_search_backward(
    engine: *const editor_core::Engine,
    query: *const c_char,
    start_line: usize,
) -> isize {
    // SAFETY: forwarded from this function's contract.
    let (Some(engine), Some(query)) = (unsafe { engine.as_ref() }, unsafe { c_bytes(query) })
    else {
        return -1;
    };

    line_or_sentinel(engine.search_backward(query, start_line))
}

/*

===================
===== EDITING =====
===================

*/

/// Replaces `num_deleted` lines at `start_line` with `new_text`. A null
/// `new_text` is a pure deletion. Returns `false` on failure.
///
/// # Safety
///
/// `engine` must be null or a live handle; `new_text` must be null or a
/// valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bigedit_apply_edit(
    engine: *mut editor_core::Engine,
    start_line: usize,
    num_deleted: usize,
    new_text: *const c_char,
) -> bool {
    // SAFETY: null or live and exclusively borrowed for this call.
    let Some(engine) = (unsafe { engine.as_mut() }) else {
        return false;
    };
    // SAFETY: forwarded from this function's contract.
    let text = unsafe { c_bytes(new_text) }.unwrap_or_default();

    match engine.apply_edit(start_line, num_deleted, text) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(%err, start_line, num_deleted, "edit failed");

            false
        }
    }
}

/// Writes the document to `path`. Returns `false` on failure.
///
/// # Safety
///
/// `engine` must be null or a live handle; `path` must be null or a valid
/// NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bigedit_save(
    engine: *mut editor_core::Engine,
    path: *const c_char,
) -> bool {
    // SAFETY: forwarded from this function's contract.
    let (Some(engine), Some(path)) = (unsafe { engine.as_mut() }, unsafe { c_bytes(path) }) else {
        return false;
    };

    engine.save(bytes_to_path(path))
}

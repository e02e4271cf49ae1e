/// # IO Module.
///
/// Read-only, zero-copy access to files on disk.
pub mod mmap;

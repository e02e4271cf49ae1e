/// # Piece Table Module.
///
/// Contains mod files for handling `piece_table` data.
/// The document is an ordered list of pieces, each spanning whole lines of
/// either the original memory-mapped file or the append-only add buffer.
pub mod add_buffer;
pub mod piece;
pub mod table;

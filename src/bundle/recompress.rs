//! # Bundle Recompressor
//!
//! Packs an edited table back into a zstd frame and checks it against the
//! budget left by the original frame. The container cannot grow, so an
//! oversized result is an error and nothing is written.

use tracing::debug;

use crate::error::{PatchError, Result};

/// zstd's maximum compression level. Fixed so output only depends on input.
pub const COMPRESSION_LEVEL: i32 = 22;

/// Compress `table` as a single zstd frame at [`COMPRESSION_LEVEL`].
pub fn compress_table(table: &[u8]) -> Result<Vec<u8>> {
    Ok(zstd::bulk::compress(table, COMPRESSION_LEVEL)?)
}

/// Compress `table` and reject the result if it exceeds `budget` bytes.
pub fn recompress(table: &[u8], budget: usize) -> Result<Vec<u8>> {
    let compressed = compress_table(table)?;
    debug!(
        table_len = table.len(),
        compressed = compressed.len(),
        budget,
        "table recompressed"
    );
    if compressed.len() > budget {
        return Err(PatchError::BundleTooLarge {
            compressed: compressed.len(),
            budget,
        });
    }
    Ok(compressed)
}

/// Overwrite `buffer[offset..offset + stream.len()]` with `stream`.
///
/// Only `stream.len()` bytes are written. When the new stream is shorter than
/// the old one, the rest of the old region keeps its original bytes; the
/// decoder stops at the end of the new frame, but whether the host binary
/// tolerates the stale tail is up to the host's own layout.
///
/// A stream that would run past the end of `buffer` is rejected with
/// [`PatchError::BundleTooLarge`], its budget being the room left at `offset`.
pub fn splice(buffer: &mut [u8], offset: usize, stream: &[u8]) -> Result<()> {
    let room = buffer.len().saturating_sub(offset);
    // After `recompress` this can't trip: a located budget never runs past
    // the end of the buffer. Only direct callers can get here.
    if stream.len() > room {
        return Err(PatchError::BundleTooLarge {
            compressed: stream.len(),
            budget: room,
        });
    }
    buffer[offset..offset + stream.len()].copy_from_slice(stream);
    Ok(())
}

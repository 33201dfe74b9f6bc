//! # Patch Orchestration
//!
//! Drives the pipeline over one exclusively borrowed buffer:
//!
//! ```text
//! buffer ─→ locate ─→ (offset, table, budget)
//!                          │
//!            rasterize + pack into table[cp*32..]
//!                          │
//!                     recompress ─→ bounds check ─→ splice into buffer
//! ```
//!
//! The buffer is only written once every earlier stage has succeeded, so a
//! failing run leaves it byte-for-byte unchanged.

use tracing::{debug, info};

use crate::bundle::{self, BundleLocation, TABLE_SIZE, ZSTD_MAGIC};
use crate::error::Result;
use crate::glyph::{self, GlyphSource};
use crate::lang::CodepointRange;

/// What a successful patch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchReport {
    /// Where the bundle's stream starts in the host buffer.
    pub offset: usize,
    /// Bytes available to the stream at `offset`.
    pub budget: usize,
    /// Length of the stream that was written.
    pub compressed_len: usize,
    /// Number of glyph slots repainted.
    pub glyphs: usize,
}

/// Repaint every codepoint of `ranges` in a decompressed table.
///
/// Codepoints that are not Unicode scalar values (surrogates) are skipped
/// and their slots left as they were. Returns the number of slots written.
pub fn patch_table<S: GlyphSource + ?Sized>(
    table: &mut [u8],
    ranges: &[CodepointRange],
    source: &S,
) -> usize {
    let mut written = 0;
    for range in ranges {
        for cp in range.codepoints() {
            let Some(ch) = char::from_u32(cp) else {
                debug!(codepoint = cp, "skipping non-scalar codepoint");
                continue;
            };
            let Some(slot) = bundle::glyph_slot_mut(table, cp) else {
                continue;
            };
            *slot = glyph::pack(&glyph::rasterize(ch, source));
            written += 1;
        }
    }
    written
}

/// Locate the glyph bundle in `buffer`, repaint `ranges`, and write the
/// recompressed bundle back in place.
pub fn patch_buffer<S: GlyphSource + ?Sized>(
    buffer: &mut [u8],
    ranges: &[CodepointRange],
    source: &S,
) -> Result<PatchReport> {
    let location = bundle::locate(buffer, &ZSTD_MAGIC, TABLE_SIZE)?;
    info!(offset = location.offset, budget = location.budget, "found font bundle");
    patch_located(buffer, location, ranges, source)
}

/// Second half of [`patch_buffer`], for callers that located the bundle
/// themselves.
pub fn patch_located<S: GlyphSource + ?Sized>(
    buffer: &mut [u8],
    location: BundleLocation,
    ranges: &[CodepointRange],
    source: &S,
) -> Result<PatchReport> {
    let BundleLocation {
        offset,
        mut table,
        budget,
    } = location;

    let glyphs = patch_table(&mut table, ranges, source);
    info!(glyphs, "glyphs rasterized");

    let compressed = bundle::recompress(&table, budget)?;
    bundle::splice(buffer, offset, &compressed)?;
    info!(
        compressed = compressed.len(),
        budget,
        slack = budget - compressed.len(),
        "bundle written"
    );

    Ok(PatchReport {
        offset,
        budget,
        compressed_len: compressed.len(),
        glyphs,
    })
}

//! # Glyph Bundle
//!
//! The host binary carries its glyph table as a single zstd frame. Once
//! decompressed, the table is a flat array of 65,536 glyphs, one per BMP
//! codepoint, each 16 rows of two bytes:
//!
//! ```text
//! table[cp * 32 .. cp * 32 + 32]
//!   row 0: lo hi      (u16 little-endian, bit 15 = leftmost pixel)
//!   row 1: lo hi
//!   ...
//!   row 15: lo hi
//! ```
//!
//! [`locate`] finds the frame, [`recompress`] packs an edited table back
//! under the byte budget the original frame left, and [`splice`] writes it.

pub mod locate;
pub mod recompress;

pub use locate::{locate, MagicScanner};
pub use recompress::{compress_table, recompress, splice};

/// zstd frame magic number, as it appears on disk.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

pub const GLYPH_W: usize = 16;
pub const GLYPH_H: usize = 16;
pub const BYTES_PER_ROW: usize = 2;
pub const BYTES_PER_GLYPH: usize = GLYPH_H * BYTES_PER_ROW;

/// Number of glyph slots: every codepoint of the Basic Multilingual Plane.
pub const GLYPH_COUNT: usize = 0x10000;

/// Exact size of the decompressed glyph table (2,097,152 bytes).
pub const TABLE_SIZE: usize = GLYPH_COUNT * BYTES_PER_GLYPH;

/// A validated bundle: where its stream starts, the decompressed table,
/// and how many bytes a replacement stream may occupy at that offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLocation {
    pub offset: usize,
    pub table: Vec<u8>,
    pub budget: usize,
}

/// Byte range of the glyph for `codepoint` inside a table.
///
/// Returns `None` outside the BMP.
pub fn glyph_range(codepoint: u32) -> Option<std::ops::Range<usize>> {
    let cp = codepoint as usize;
    if cp >= GLYPH_COUNT {
        return None;
    }
    let start = cp * BYTES_PER_GLYPH;
    Some(start..start + BYTES_PER_GLYPH)
}

/// The 32 packed bytes of `codepoint` in `table`.
pub fn glyph_slot(table: &[u8], codepoint: u32) -> Option<&[u8; BYTES_PER_GLYPH]> {
    let range = glyph_range(codepoint)?;
    table.get(range)?.try_into().ok()
}

/// Mutable view of the 32 packed bytes of `codepoint` in `table`.
pub fn glyph_slot_mut(table: &mut [u8], codepoint: u32) -> Option<&mut [u8; BYTES_PER_GLYPH]> {
    let range = glyph_range(codepoint)?;
    table.get_mut(range)?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size_constant() {
        assert_eq!(TABLE_SIZE, 2_097_152);
        assert_eq!(BYTES_PER_GLYPH, 32);
    }

    #[test]
    fn test_glyph_range_formula() {
        assert_eq!(glyph_range(0), Some(0..32));
        assert_eq!(glyph_range(0xAC00), Some(0xAC00 * 32..0xAC00 * 32 + 32));
        assert_eq!(glyph_range(0xFFFF), Some(TABLE_SIZE - 32..TABLE_SIZE));
        assert_eq!(glyph_range(0x10000), None);
    }

    #[test]
    fn test_glyph_slot_mut_writes_in_place() {
        let mut table = vec![0u8; 4 * BYTES_PER_GLYPH];
        glyph_slot_mut(&mut table, 2).unwrap().fill(0xAB);
        assert!(table[64..96].iter().all(|&b| b == 0xAB));
        assert!(table[..64].iter().all(|&b| b == 0));
        assert!(table[96..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_glyph_slot_short_table() {
        let table = vec![0u8; 40];
        assert!(glyph_slot(&table, 0).is_some());
        assert!(glyph_slot(&table, 1).is_none());
    }
}

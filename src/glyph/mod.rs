//! # Glyph Bitmaps
//!
//! A glyph is a 16x16 grid of on/off pixels. On disk each row is a `u16`
//! whose bit 15 is the leftmost column, stored low byte first.

pub mod raster;
pub mod truetype;

pub use raster::{placement, rasterize, GlyphPlacement, GlyphSource, VerticalMetrics};
pub use truetype::TrueTypeFace;

use image::GrayImage;

use crate::bundle::{BYTES_PER_GLYPH, BYTES_PER_ROW, GLYPH_H, GLYPH_W};

/// Luminance above which a rendered pixel counts as ink.
pub const INK_THRESHOLD: u8 = 128;

/// A 16x16 monochrome glyph, indexed `[row][column]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlyphBitmap {
    rows: [[bool; GLYPH_W]; GLYPH_H],
}

impl GlyphBitmap {
    pub fn new(rows: [[bool; GLYPH_W]; GLYPH_H]) -> Self {
        Self { rows }
    }

    /// Binarize a grayscale canvas: a pixel is on iff its luminance is
    /// strictly greater than [`INK_THRESHOLD`]. Pixels outside the canvas
    /// are off.
    pub fn from_luma(canvas: &GrayImage) -> Self {
        let mut rows = [[false; GLYPH_W]; GLYPH_H];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, px) in row.iter_mut().enumerate() {
                let (x, y) = (x as u32, y as u32);
                if x < canvas.width() && y < canvas.height() {
                    *px = canvas.get_pixel(x, y).0[0] > INK_THRESHOLD;
                }
            }
        }
        Self { rows }
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, on: bool) {
        self.rows[row][col] = on;
    }

    pub fn rows(&self) -> &[[bool; GLYPH_W]; GLYPH_H] {
        &self.rows
    }

    /// Row `row` as its on-disk 16-bit value.
    pub fn row_bits(&self, row: usize) -> u16 {
        let mut v = 0u16;
        for (col, &on) in self.rows[row].iter().enumerate() {
            if on {
                v |= 1 << (15 - col);
            }
        }
        v
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().flatten().all(|&on| !on)
    }
}

/// Encode a bitmap into its 32-byte on-disk form.
pub fn pack(bitmap: &GlyphBitmap) -> [u8; BYTES_PER_GLYPH] {
    let mut out = [0u8; BYTES_PER_GLYPH];
    for (row, pair) in out.chunks_exact_mut(BYTES_PER_ROW).enumerate() {
        pair.copy_from_slice(&bitmap.row_bits(row).to_le_bytes());
    }
    out
}

/// Decode 32 on-disk bytes back into a bitmap. Exact inverse of [`pack`].
pub fn unpack(bytes: &[u8; BYTES_PER_GLYPH]) -> GlyphBitmap {
    let mut rows = [[false; GLYPH_W]; GLYPH_H];
    for (row, pair) in rows.iter_mut().zip(bytes.chunks_exact(BYTES_PER_ROW)) {
        let v = u16::from_le_bytes([pair[0], pair[1]]);
        for (col, px) in row.iter_mut().enumerate() {
            *px = v & (1 << (15 - col)) != 0;
        }
    }
    GlyphBitmap { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn pseudo_random_bitmap(seed: u64) -> GlyphBitmap {
        let mut state = seed | 1;
        let mut bitmap = GlyphBitmap::default();
        for row in 0..GLYPH_H {
            for col in 0..GLYPH_W {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                bitmap.set(row, col, state & 1 == 1);
            }
        }
        bitmap
    }

    #[test]
    fn test_leftmost_pixel_is_bit_15() {
        let mut bitmap = GlyphBitmap::default();
        bitmap.set(0, 0, true);
        let bytes = pack(&bitmap);
        assert_eq!(bytes[0], 0x00);
        assert_eq!(bytes[1], 0x80);
        assert!(bytes[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rightmost_pixel_is_bit_0() {
        let mut bitmap = GlyphBitmap::default();
        bitmap.set(15, 15, true);
        let bytes = pack(&bitmap);
        assert_eq!(bytes[30], 0x01);
        assert_eq!(bytes[31], 0x00);
    }

    #[test]
    fn test_row_is_little_endian() {
        let mut bitmap = GlyphBitmap::default();
        // columns 0..4 and 12..16 -> 0xF00F
        for col in (0..4).chain(12..16) {
            bitmap.set(3, col, true);
        }
        assert_eq!(bitmap.row_bits(3), 0xF00F);
        let bytes = pack(&bitmap);
        assert_eq!(&bytes[6..8], &[0x0F, 0xF0]);
    }

    #[test]
    fn test_every_row_value_round_trips() {
        for v in 0..=u16::MAX {
            let mut bytes = [0u8; BYTES_PER_GLYPH];
            bytes[10..12].copy_from_slice(&v.to_le_bytes());
            bytes[30..32].copy_from_slice(&(!v).to_le_bytes());
            assert_eq!(pack(&unpack(&bytes)), bytes);
        }
    }

    #[test]
    fn test_random_bitmaps_round_trip() {
        for seed in 0..2000u64 {
            let bitmap = pseudo_random_bitmap(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
            assert_eq!(unpack(&pack(&bitmap)), bitmap);
        }
    }

    #[test]
    fn test_full_and_empty() {
        let full = GlyphBitmap::new([[true; GLYPH_W]; GLYPH_H]);
        assert_eq!(pack(&full), [0xFF; BYTES_PER_GLYPH]);
        assert!(GlyphBitmap::default().is_blank());
        assert_eq!(pack(&GlyphBitmap::default()), [0u8; BYTES_PER_GLYPH]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut canvas = GrayImage::new(16, 16);
        canvas.put_pixel(0, 0, Luma([128]));
        canvas.put_pixel(1, 0, Luma([129]));
        canvas.put_pixel(2, 5, Luma([255]));
        let bitmap = GlyphBitmap::from_luma(&canvas);
        assert!(!bitmap.get(0, 0));
        assert!(bitmap.get(0, 1));
        assert!(bitmap.get(5, 2));
    }

    #[test]
    fn test_small_canvas_pads_with_off() {
        let canvas = GrayImage::from_pixel(4, 4, Luma([255]));
        let bitmap = GlyphBitmap::from_luma(&canvas);
        assert!(bitmap.get(3, 3));
        assert!(!bitmap.get(4, 0));
        assert!(!bitmap.get(0, 4));
    }
}

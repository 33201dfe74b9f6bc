//! # Glyph Rasterization
//!
//! Turns one character into a [`GlyphBitmap`]. The font itself is opaque:
//! anything that can report an advance width, vertical metrics, and render
//! a grayscale mask at a given pen position can be used, which lets tests
//! substitute a synthetic source for a real font file.

use image::GrayImage;

use super::GlyphBitmap;
use crate::bundle::{GLYPH_H, GLYPH_W};

/// Width assumed for centering when a glyph's advance can't be measured.
pub const DEFAULT_ADVANCE: u32 = 8;

/// Font ascent and descent in pixels. Both are distances from the
/// baseline, so `descent` is positive for a font that dips below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalMetrics {
    pub ascent: i32,
    pub descent: i32,
}

/// Where the pen sits on the 16x16 canvas when the glyph is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPlacement {
    /// Left edge of the advance box.
    pub pen_x: i32,
    /// Row of the baseline, counted down from the top edge.
    pub baseline: i32,
}

/// Minimal font capability needed to paint glyphs.
pub trait GlyphSource {
    /// Advance width of `ch` in pixels, or `None` if it can't be measured.
    fn advance(&self, ch: char) -> Option<u32>;

    fn metrics(&self) -> VerticalMetrics;

    /// Render `ch` onto a blank `GLYPH_W x GLYPH_H` canvas with the pen at
    /// `at`. Luminance is ink coverage, 0 for background.
    fn render_mask(&self, ch: char, at: GlyphPlacement) -> GrayImage;
}

impl<S: GlyphSource + ?Sized> GlyphSource for &S {
    fn advance(&self, ch: char) -> Option<u32> {
        (**self).advance(ch)
    }

    fn metrics(&self) -> VerticalMetrics {
        (**self).metrics()
    }

    fn render_mask(&self, ch: char, at: GlyphPlacement) -> GrayImage {
        (**self).render_mask(ch, at)
    }
}

/// Center `ch` horizontally by its advance and vertically by the font's
/// ascent + descent.
pub fn placement<S: GlyphSource + ?Sized>(ch: char, source: &S) -> GlyphPlacement {
    let width = source.advance(ch).unwrap_or(DEFAULT_ADVANCE) as i32;
    let VerticalMetrics { ascent, descent } = source.metrics();
    GlyphPlacement {
        pen_x: (GLYPH_W as i32 - width).div_euclid(2).max(0),
        baseline: (GLYPH_H as i32 - (ascent + descent)).div_euclid(2) + ascent,
    }
}

/// Render and binarize one character.
pub fn rasterize<S: GlyphSource + ?Sized>(ch: char, source: &S) -> GlyphBitmap {
    let mask = source.render_mask(ch, placement(ch, source));
    GlyphBitmap::from_luma(&mask)
}

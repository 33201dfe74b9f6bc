//! TrueType/OpenType glyph source: ttf-parser outlines filled by tiny-skia.

use image::{GrayImage, Luma};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use super::raster::{GlyphPlacement, GlyphSource, VerticalMetrics};
use crate::bundle::{GLYPH_H, GLYPH_W};

/// Pixel size glyphs are rendered at: the full glyph height.
pub const GLYPH_PIXEL_SIZE: f32 = GLYPH_H as f32;

/// A parsed font face scaled to [`GLYPH_PIXEL_SIZE`].
pub struct TrueTypeFace<'a> {
    face: Face<'a>,
    scale: f32,
}

impl<'a> TrueTypeFace<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self, ttf_parser::FaceParsingError> {
        let face = Face::parse(data, 0)?;
        let scale = GLYPH_PIXEL_SIZE / face.units_per_em() as f32;
        Ok(Self { face, scale })
    }

    /// Glyph for `ch`, falling back to `.notdef` like a normal text renderer.
    fn glyph(&self, ch: char) -> GlyphId {
        self.face.glyph_index(ch).unwrap_or(GlyphId(0))
    }
}

impl GlyphSource for TrueTypeFace<'_> {
    fn advance(&self, ch: char) -> Option<u32> {
        let units = self.face.glyph_hor_advance(self.glyph(ch))?;
        Some((units as f32 * self.scale).round() as u32)
    }

    fn metrics(&self) -> VerticalMetrics {
        VerticalMetrics {
            ascent: (self.face.ascender() as f32 * self.scale).round() as i32,
            descent: (-(self.face.descender() as f32) * self.scale).round() as i32,
        }
    }

    fn render_mask(&self, ch: char, at: GlyphPlacement) -> GrayImage {
        let mut canvas = GrayImage::new(GLYPH_W as u32, GLYPH_H as u32);
        let Some(mut pixmap) = tiny_skia::Pixmap::new(GLYPH_W as u32, GLYPH_H as u32) else {
            return canvas;
        };

        let mut outline = CanvasPath {
            builder: tiny_skia::PathBuilder::new(),
            scale: self.scale,
            origin_x: at.pen_x as f32,
            baseline: at.baseline as f32,
        };
        // Whitespace has no outline.
        if self.face.outline_glyph(self.glyph(ch), &mut outline).is_none() {
            return canvas;
        }
        let Some(path) = outline.builder.finish() else {
            return canvas;
        };

        let mut paint = tiny_skia::Paint::default();
        paint.set_color(tiny_skia::Color::WHITE);
        paint.anti_alias = true;
        pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );

        // White ink on an empty canvas: coverage is the luminance.
        for (x, y, px) in canvas.enumerate_pixels_mut() {
            *px = Luma([pixmap.pixel(x, y).map(|c| c.alpha()).unwrap_or(0)]);
        }
        canvas
    }
}

/// Maps font units (y up, origin on the baseline) to canvas pixels.
struct CanvasPath {
    builder: tiny_skia::PathBuilder,
    scale: f32,
    origin_x: f32,
    baseline: f32,
}

impl CanvasPath {
    fn x(&self, x: f32) -> f32 {
        self.origin_x + x * self.scale
    }

    fn y(&self, y: f32) -> f32 {
        self.baseline - y * self.scale
    }
}

impl OutlineBuilder for CanvasPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.x(x), self.y(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.x(x), self.y(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(self.x(x1), self.y(y1), self.x(x), self.y(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.x(x1),
            self.y(y1),
            self.x(x2),
            self.y(y2),
            self.x(x),
            self.y(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

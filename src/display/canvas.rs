//! Pixel storage behind a surface.
//!
//! A `PixelBuffer` has two planes: a flat pixel plane for fills and rules, and
//! a glyph plane holding the text stamped at pixel origins. Rasterizing glyphs
//! is left to whoever presents the buffer. Fills drop the glyphs they cover, and
//! region copies and vertical blits carry glyph stamps with their pixels.
//! `paint` is the one pixel-only operation.

use super::color::Rgb;
use super::geom::PixelRect;
use crate::error::{CoreError, Result};
use compact_str::CompactString;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphStamp {
    pub text: CompactString,
    pub color: Rgb,
    pub bold: bool,
    /// Width in cells (1 for narrow, 2 for wide glyphs).
    pub cells: u8,
}

/// Glyphs of one pixel row, ordered by x so column ranges split cheaply.
type GlyphRow = BTreeMap<u32, GlyphStamp>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    /// Indexed by pixel row.
    glyphs: Vec<GlyphRow>,
}

impl PixelBuffer {
    pub const MAX_PIXELS: u64 = 1 << 26;

    pub fn new(width: u32, height: u32, fill: Rgb) -> Result<Self> {
        let len = width as u64 * height as u64;
        if len > Self::MAX_PIXELS {
            return Err(CoreError::Rendering(format!(
                "{}x{} px buffer exceeds the {} px limit",
                width,
                height,
                Self::MAX_PIXELS
            )));
        }
        let len = len as usize;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|e| CoreError::Rendering(format!("allocating {}x{} px: {}", width, height, e)))?;
        pixels.resize(len, fill);
        let mut glyphs = Vec::new();
        glyphs
            .try_reserve_exact(height as usize)
            .map_err(|e| CoreError::Rendering(format!("allocating {} glyph rows: {}", height, e)))?;
        glyphs.resize_with(height as usize, GlyphRow::new);
        Ok(Self {
            width,
            height,
            pixels,
            glyphs,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let idx = self.idx(x, y)?;
        self.pixels.get(idx).copied()
    }

    pub fn glyph_at(&self, x: u32, y: u32) -> Option<&GlyphStamp> {
        self.glyphs.get(y as usize)?.get(&x)
    }

    pub fn glyph_at_mut(&mut self, x: u32, y: u32) -> Option<&mut GlyphStamp> {
        self.glyphs.get_mut(y as usize)?.get_mut(&x)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.iter().map(BTreeMap::len).sum()
    }

    /// Paints `rect` (clipped to the buffer) and drops the glyphs it covers.
    pub fn fill(&mut self, rect: PixelRect, color: Rgb) {
        let rect = self.clip(rect);
        self.paint(rect, color);
        self.clear_glyphs(rect);
    }

    /// Paints `rect` without touching the glyph plane.
    pub fn paint(&mut self, rect: PixelRect, color: Rgb) {
        let rect = self.clip(rect);
        if rect.is_empty() {
            return;
        }
        for y in rect.y..rect.bottom() {
            let start = self.row_start(y) + rect.x as usize;
            self.pixels[start..start + rect.w as usize].fill(color);
        }
    }

    /// One pixel tall horizontal rule.
    pub fn hline(&mut self, x: u32, y: u32, len: u32, color: Rgb) {
        if y >= self.height || x >= self.width || len == 0 {
            return;
        }
        let len = len.min(self.width - x);
        let start = self.row_start(y) + x as usize;
        self.pixels[start..start + len as usize].fill(color);
    }

    /// Anchors a glyph at a pixel origin. Origins outside the buffer are
    /// dropped.
    pub fn stamp(&mut self, x: u32, y: u32, glyph: GlyphStamp) {
        if x < self.width {
            if let Some(row) = self.glyphs.get_mut(y as usize) {
                row.insert(x, glyph);
            }
        }
    }

    /// Copies `rect` from an equally sized buffer.
    pub fn copy_from(&mut self, src: &PixelBuffer, rect: PixelRect) {
        let rect = self.clip(src.clip(rect));
        if rect.is_empty() || src.width != self.width {
            return;
        }
        for y in rect.y..rect.bottom() {
            let start = self.row_start(y) + rect.x as usize;
            let end = start + rect.w as usize;
            self.pixels[start..end].copy_from_slice(&src.pixels[start..end]);

            let row = &mut self.glyphs[y as usize];
            drop_span(row, rect.x, rect.right());
            row.extend(
                src.glyphs[y as usize]
                    .range(rect.x..rect.right())
                    .map(|(&x, g)| (x, g.clone())),
            );
        }
    }

    /// Moves the full-width band of `rows` pixel rows starting at `src_y` so it
    /// starts at `dst_y`. Rows uncovered by the move keep their old content.
    pub fn shift_rows(&mut self, src_y: u32, dst_y: u32, rows: u32) {
        let rows = rows
            .min(self.height.saturating_sub(src_y))
            .min(self.height.saturating_sub(dst_y));
        if rows == 0 || src_y == dst_y {
            return;
        }
        let src = self.row_start(src_y)..self.row_start(src_y) + rows as usize * self.width as usize;
        let dst = self.row_start(dst_y);
        self.pixels.copy_within(src, dst);

        let (src_y, dst_y, rows) = (src_y as usize, dst_y as usize, rows as usize);
        let moved: Vec<GlyphRow> = self.glyphs[src_y..src_y + rows].to_vec();
        for (row, glyphs) in self.glyphs[dst_y..dst_y + rows].iter_mut().zip(moved) {
            *row = glyphs;
        }
    }

    fn clear_glyphs(&mut self, rect: PixelRect) {
        if rect.is_empty() {
            return;
        }
        for row in &mut self.glyphs[rect.y as usize..rect.bottom() as usize] {
            drop_span(row, rect.x, rect.right());
        }
    }

    fn clip(&self, rect: PixelRect) -> PixelRect {
        PixelRect::clipped(
            rect.x as i64,
            rect.y as i64,
            rect.w as i64,
            rect.h as i64,
            self.width,
            self.height,
        )
    }

    fn row_start(&self, y: u32) -> usize {
        y as usize * self.width as usize
    }

    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.row_start(y) + x as usize)
    }
}

/// Drops the glyphs with origins in `x0..x1`.
fn drop_span(row: &mut GlyphRow, x0: u32, x1: u32) {
    if row.is_empty() {
        return;
    }
    let mut span = row.split_off(&x0);
    let mut tail = span.split_off(&x1);
    row.append(&mut tail);
}

#[cfg(test)]
#[path = "../../tests/unit/display/canvas.rs"]
mod tests;

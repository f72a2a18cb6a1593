//! Double-buffered, cell-addressed drawing target.
//!
//! Every draw primitive paints the back buffer and appends exactly one dirty
//! region (in cells). Nothing becomes visible until [`Surface::flush`] copies
//! the dirty regions, in submission order, to the front buffer. This is what
//! lets the editor core batch a frame's worth of edits into one update.

use super::canvas::{GlyphStamp, PixelBuffer};
use super::color::{parse_color, Palette, Rgb};
use super::geom::{CellPos, CellRect, PixelRect};
use super::metrics::GlyphMetrics;
use crate::error::{CoreError, Result};
use compact_str::CompactString;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::sync::Arc;

/// One glyph cell group: `width` cells wide, showing `text`.
///
/// On the wire a run is a flat array `[width, utf8 byte, utf8 byte, ...]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRun {
    pub width: u8,
    pub text: CompactString,
}

impl GlyphRun {
    pub fn new(width: u8, text: &str) -> Self {
        Self {
            width,
            text: CompactString::new(text),
        }
    }
}

impl<'de> Deserialize<'de> for GlyphRun {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RunVisitor;

        impl<'de> Visitor<'de> for RunVisitor {
            type Value = GlyphRun;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an array of a cell width followed by utf-8 bytes")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<GlyphRun, A::Error> {
                let width: u8 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(4));
                while let Some(b) = seq.next_element::<u8>()? {
                    bytes.push(b);
                }
                let text = String::from_utf8_lossy(&bytes);
                Ok(GlyphRun::new(width, &text))
            }
        }

        deserializer.deserialize_seq(RunVisitor)
    }
}

/// Total cell width of a sequence of runs.
pub fn cells_of(runs: &[GlyphRun]) -> i32 {
    runs.iter().map(|r| r.width as i32).sum()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Underline {
    #[default]
    None,
    /// Underline in the resolved foreground color.
    Foreground,
    Color(Rgb),
}

/// Display attributes attached to a `put`. Absent fields inherit the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Attribute {
    #[serde(default, deserialize_with = "optional_color")]
    pub foreground: Option<Rgb>,
    #[serde(default, deserialize_with = "optional_color")]
    pub background: Option<Rgb>,
    #[serde(default, deserialize_with = "flag")]
    pub bold: bool,
    #[serde(default, deserialize_with = "flag")]
    pub reverse: bool,
    #[serde(default, deserialize_with = "underline")]
    pub underline: Underline,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FontFace {
    pub bold: bool,
}

impl FontFace {
    pub const REGULAR: Self = Self { bold: false };
    pub const BOLD: Self = Self { bold: true };
}

/// Concrete colors for one `put`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub foreground: Rgb,
    pub background: Rgb,
    pub face: FontFace,
    pub underline: Option<Rgb>,
}

impl Attribute {
    pub fn resolve(&self, palette: &Palette) -> TextStyle {
        let mut foreground = self.foreground.unwrap_or(palette.foreground);
        let mut background = self.background.unwrap_or(palette.background);
        if self.reverse {
            std::mem::swap(&mut foreground, &mut background);
        }
        let underline = match self.underline {
            Underline::None => None,
            Underline::Foreground => Some(foreground),
            Underline::Color(c) => Some(c),
        };
        TextStyle {
            foreground,
            background,
            face: if self.bold {
                FontFace::BOLD
            } else {
                FontFace::REGULAR
            },
            underline,
        }
    }
}

impl TextStyle {
    pub fn plain(palette: &Palette) -> Self {
        Self {
            foreground: palette.foreground,
            background: palette.background,
            face: FontFace::REGULAR,
            underline: None,
        }
    }
}

fn optional_color<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<Rgb>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => {
            let color = parse_color(s);
            if color.is_none() {
                tracing::debug!(color = s, "unrecognized attribute color, inheriting default");
            }
            Ok(color)
        }
    }
}

fn flag<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(d)?.unwrap_or(false))
}

fn underline<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Underline, D::Error> {
    let raw = serde_json::Value::deserialize(d)?;
    match raw {
        serde_json::Value::Null | serde_json::Value::Bool(false) => Ok(Underline::None),
        serde_json::Value::Bool(true) => Ok(Underline::Foreground),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(Underline::None),
        serde_json::Value::String(s) => Ok(match parse_color(&s) {
            Some(color) => Underline::Color(color),
            None => {
                tracing::debug!(color = %s, "unrecognized underline color, using foreground");
                Underline::Foreground
            }
        }),
        other => Err(de::Error::custom(format!("invalid underline `{}`", other))),
    }
}

#[derive(Debug)]
pub struct Surface {
    pos: CellPos,
    width: i32,
    height: i32,
    z: i32,
    metrics: Arc<GlyphMetrics>,
    back: PixelBuffer,
    front: PixelBuffer,
    dirty: Vec<CellRect>,
}

impl Surface {
    pub fn new(
        pos: CellPos,
        width: i32,
        height: i32,
        z: i32,
        metrics: Arc<GlyphMetrics>,
        fill: Rgb,
    ) -> Result<Self> {
        let width = width.max(0);
        let height = height.max(0);
        let (back, front) = allocate(width, height, &metrics, fill)?;
        Ok(Self {
            pos,
            width,
            height,
            z,
            metrics,
            back,
            front,
            dirty: Vec::new(),
        })
    }

    pub fn position(&self) -> CellPos {
        self.pos
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn z_index(&self) -> i32 {
        self.z
    }

    pub fn metrics(&self) -> &GlyphMetrics {
        &self.metrics
    }

    pub fn back(&self) -> &PixelBuffer {
        &self.back
    }

    pub fn front(&self) -> &PixelBuffer {
        &self.front
    }

    pub fn dirty_regions(&self) -> &[CellRect] {
        &self.dirty
    }

    /// On-screen pixel position of the top-left corner.
    pub fn pixel_origin(&self) -> (i64, i64) {
        (
            self.pos.x as i64 * self.metrics.cell_width_px as i64,
            self.pos.y as i64 * self.metrics.cell_height_px as i64,
        )
    }

    /// Fills a cell rectangle. The pixel fill is one device pixel wider than
    /// the cells so adjacent blocks never leave a seam.
    pub fn draw_block(&mut self, rect: CellRect, color: Rgb) {
        self.dirty.push(rect);
        if rect.is_empty() {
            return;
        }
        let (cw, ch) = self.cell_px();
        let (left, top) = (rect.x as i64 * cw, rect.y as i64 * ch);
        let (w, h) = (rect.w as i64 * cw, rect.h as i64 * ch);
        let (bw, bh) = (self.back.width(), self.back.height());
        self.back
            .fill(PixelRect::clipped(left, top, w, h, bw, bh), color);
        // The seam column belongs to the next cell; its glyph survives.
        self.back
            .paint(PixelRect::clipped(left + w, top, 1, h, bw, bh), color);
    }

    /// Stamps runs left to right from `(x, y)`, advancing `width` cells per run.
    /// Returns the column after the last run.
    pub fn draw_text(&mut self, x: i32, y: i32, runs: &[GlyphRun], face: FontFace, color: Rgb) -> i32 {
        let cells = cells_of(runs);
        self.dirty.push(CellRect::new(x, y, cells, 1));

        let (cw, ch) = self.cell_px();
        let top = y as i64 * ch;
        let mut col = x;
        let mut last: Option<(u32, u32)> = None;
        for run in runs {
            let left = col as i64 * cw;
            if run.width == 0 {
                // Zero-width runs combine with the glyph before them.
                if let Some(glyph) = last.and_then(|(lx, ly)| self.back.glyph_at_mut(lx, ly)) {
                    glyph.text.push_str(&run.text);
                }
                continue;
            }
            if left >= 0 && top >= 0 && left <= u32::MAX as i64 && top <= u32::MAX as i64 {
                let origin = (left as u32, top as u32);
                self.back.stamp(
                    origin.0,
                    origin.1,
                    GlyphStamp {
                        text: run.text.clone(),
                        color,
                        bold: face.bold,
                        cells: run.width,
                    },
                );
                last = Some(origin);
            } else {
                last = None;
            }
            col = col.saturating_add(run.width as i32);
        }
        col
    }

    /// One-pixel rule 3 px above the bottom edge of row `y`.
    pub fn draw_underline(&mut self, x: i32, y: i32, length: i32, color: Rgb) {
        self.dirty.push(CellRect::new(x, y, length, 1));
        if length <= 0 {
            return;
        }
        let (cw, ch) = self.cell_px();
        let row = (y as i64 + 1) * ch - 3;
        let px = PixelRect::clipped(
            x as i64 * cw,
            row,
            length as i64 * cw,
            1,
            self.back.width(),
            self.back.height(),
        );
        if !px.is_empty() {
            self.back.hline(px.x, px.y, px.w, color);
        }
    }

    /// Background first, then glyphs, then the underline, so text is never
    /// hidden by its own fill. Returns the column after the last run.
    pub fn put(
        &mut self,
        x: i32,
        y: i32,
        runs: &[GlyphRun],
        attribute: Option<&Attribute>,
        palette: &Palette,
    ) -> i32 {
        let style = match attribute {
            Some(attr) => attr.resolve(palette),
            None => TextStyle::plain(palette),
        };
        let cells = cells_of(runs);
        self.draw_block(CellRect::new(x, y, cells, 1), style.background);
        let end = self.draw_text(x, y, runs, style.face, style.foreground);
        if let Some(color) = style.underline {
            self.draw_underline(x, y, cells, color);
        }
        end
    }

    /// Copies the dirty regions to the front buffer in submission order.
    pub fn flush(&mut self) {
        let (cw, ch) = self.cell_px();
        for rect in self.dirty.drain(..) {
            if rect.is_empty() {
                continue;
            }
            let px = PixelRect::clipped(
                rect.x as i64 * cw,
                rect.y as i64 * ch,
                rect.w as i64 * cw,
                rect.h as i64 * ch,
                self.front.width(),
                self.front.height(),
            );
            self.front.copy_from(&self.back, px);
        }
    }

    /// Shifts content by `n` rows: up for positive `n`, down for negative.
    ///
    /// Scrolling up leaves the exposed bottom rows stale; the editor core
    /// redraws them. Scrolling down clears the exposed top rows with `fill`.
    pub fn scroll(&mut self, n: i32, fill: Rgb) {
        if n == 0 || n.unsigned_abs() >= self.height as u32 {
            if n != 0 {
                tracing::debug!(n, height = self.height, "scroll past surface height ignored");
            }
            return;
        }
        let ch = self.metrics.cell_height_px;
        let kept = (self.height - n.abs()) as u32 * ch;
        let shift = n.unsigned_abs() * ch;
        if n > 0 {
            self.back.shift_rows(shift, 0, kept);
            self.dirty.push(CellRect::new(0, 0, self.width, self.height - n));
        } else {
            self.back.shift_rows(0, shift, kept);
            let band = PixelRect::new(0, 0, self.back.width(), shift);
            self.back.fill(band, fill);
            self.dirty.push(CellRect::new(0, 0, self.width, self.height));
        }
    }

    /// Reallocates both buffers, cleared to `fill`, at the size implied by
    /// `metrics`. Pending dirty regions are discarded with the old content.
    pub fn resize(&mut self, width: i32, height: i32, metrics: Arc<GlyphMetrics>, fill: Rgb) -> Result<()> {
        let width = width.max(0);
        let height = height.max(0);
        let (back, front) = allocate(width, height, &metrics, fill)?;
        self.width = width;
        self.height = height;
        self.metrics = metrics;
        self.back = back;
        self.front = front;
        self.dirty.clear();
        Ok(())
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.pos = CellPos::new(x, y);
    }

    fn cell_px(&self) -> (i64, i64) {
        (
            self.metrics.cell_width_px as i64,
            self.metrics.cell_height_px as i64,
        )
    }
}

fn allocate(width: i32, height: i32, metrics: &GlyphMetrics, fill: Rgb) -> Result<(PixelBuffer, PixelBuffer)> {
    let w = pixel_extent(width, metrics.cell_width_px)?;
    let h = pixel_extent(height, metrics.cell_height_px)?;
    Ok((PixelBuffer::new(w, h, fill)?, PixelBuffer::new(w, h, fill)?))
}

fn pixel_extent(cells: i32, cell_px: u32) -> Result<u32> {
    (cells.max(0) as u32)
        .checked_mul(cell_px)
        .ok_or_else(|| CoreError::Rendering(format!("{} cells of {} px overflow", cells, cell_px)))
}

#[cfg(test)]
#[path = "../../tests/unit/display/surface.rs"]
mod tests;

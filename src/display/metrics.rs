//! Fixed-cell font metrics.
//!
//! Text layout never goes beyond fixed-width cells, so all that matters about a
//! font is the pixel size of one cell. Measuring a real font is the host's job
//! (see [`FontMeasure`]); everything downstream works from the resulting
//! [`GlyphMetrics`] snapshot.

use serde::{Deserialize, Serialize};

/// Measures the advance and line height of a font, in pixels.
pub trait FontMeasure {
    fn cell_size(&self, family: &str, size: f32) -> (f32, f32);
}

/// Estimate for monospace faces when no rasterizer is around: the advance is a
/// fixed fraction of the font size and the line height is the size plus 2 px of
/// leading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceEstimate {
    pub advance_ratio: f32,
}

impl Default for MonospaceEstimate {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl FontMeasure for MonospaceEstimate {
    fn cell_size(&self, _family: &str, size: f32) -> (f32, f32) {
        (size * self.advance_ratio, size + 2.0)
    }
}

/// Immutable snapshot of the active font's cell geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphMetrics {
    pub family: String,
    pub size_pt: f32,
    pub cell_width_px: u32,
    pub cell_height_px: u32,
}

impl GlyphMetrics {
    /// Returns `None` for sizes that cannot describe a font (non-finite, zero or
    /// negative).
    pub fn measure(family: &str, size: f32, measure: &dyn FontMeasure) -> Option<Self> {
        if !size.is_finite() || size <= 0.0 {
            return None;
        }
        let (w, h) = measure.cell_size(family, size);
        if !w.is_finite() || !h.is_finite() {
            return None;
        }
        Some(Self::fixed(family, size, whole_px(w), whole_px(h)))
    }

    /// Cell sizes are clamped to at least one pixel.
    pub fn fixed(family: &str, size: f32, cell_width_px: u32, cell_height_px: u32) -> Self {
        Self {
            family: family.to_string(),
            size_pt: size,
            cell_width_px: cell_width_px.max(1),
            cell_height_px: cell_height_px.max(1),
        }
    }

    pub fn cols_for_px(&self, width_px: u32, tweak: CellTweak) -> u32 {
        (width_px / self.cell_width_px).saturating_sub(tweak.cols)
    }

    pub fn rows_for_px(&self, height_px: u32, tweak: CellTweak) -> u32 {
        (height_px / self.cell_height_px).saturating_sub(tweak.rows)
    }
}

/// Rounds up to whole pixels after snapping to 1/64 px, so float noise in a
/// measured advance never adds a pixel.
fn whole_px(v: f32) -> u32 {
    let units = (v.max(0.0) as f64 * 64.0).round();
    (units / 64.0).ceil() as u32
}

/// Cells subtracted from a window's raw cell count to leave room for window
/// chrome the host cannot draw into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTweak {
    pub cols: u32,
    pub rows: u32,
}

impl CellTweak {
    pub const NONE: Self = Self { cols: 0, rows: 0 };

    pub fn for_platform() -> Self {
        if cfg!(target_os = "windows") {
            Self { cols: 2, rows: 3 }
        } else if cfg!(any(target_os = "macos", target_os = "linux")) {
            Self { cols: 1, rows: 1 }
        } else {
            Self::NONE
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/metrics.rs"]
mod tests;

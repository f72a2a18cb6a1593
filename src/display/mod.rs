//! Screen state driven by the editor core: views, their surfaces, the active
//! palette and font metrics, and the optional side pane.

pub mod canvas;
pub mod color;
pub mod geom;
pub mod metrics;
pub mod pane;
pub mod registry;
pub mod surface;
pub mod view;

pub use canvas::{GlyphStamp, PixelBuffer};
pub use color::{parse_color, Palette, Rgb};
pub use geom::{CellPos, CellRect, PixelRect};
pub use metrics::{CellTweak, FontMeasure, GlyphMetrics, MonospaceEstimate};
pub use pane::SidePane;
pub use registry::{ViewRegistry, ViewSpec};
pub use surface::{Attribute, FontFace, GlyphRun, Surface, TextStyle, Underline};
pub use view::{Cursor, View, ViewId, ViewKind};

use crate::error::Result;
use std::sync::Arc;

/// Everything the presenter needs to composite one frame.
#[derive(Debug)]
pub struct Screen {
    registry: ViewRegistry,
    palette: Palette,
    metrics: Arc<GlyphMetrics>,
    pane: Option<SidePane>,
    focus: Option<ViewId>,
}

impl Screen {
    pub fn new(palette: Palette, metrics: GlyphMetrics) -> Self {
        Self {
            registry: ViewRegistry::new(),
            palette,
            metrics: Arc::new(metrics),
            pane: None,
            focus: None,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_foreground(&mut self, color: Rgb) {
        self.palette.foreground = color;
    }

    pub fn set_background(&mut self, color: Rgb) {
        self.palette.background = color;
    }

    /// Active metrics. Views created from now on use them; existing views keep
    /// theirs until they are resized.
    pub fn metrics(&self) -> &Arc<GlyphMetrics> {
        &self.metrics
    }

    pub fn set_metrics(&mut self, metrics: GlyphMetrics) {
        self.metrics = Arc::new(metrics);
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn view(&self, id: ViewId) -> Result<&View> {
        self.registry.get(id)
    }

    pub fn make_view(&mut self, spec: ViewSpec) -> Result<()> {
        self.registry.create(spec, &self.metrics, &self.palette)?;
        Ok(())
    }

    pub fn delete_view(&mut self, id: ViewId) -> Result<()> {
        self.registry.destroy(id)?;
        if self.focus == Some(id) {
            self.focus = None;
        }
        Ok(())
    }

    pub fn resize_view(&mut self, id: ViewId, width: i32, height: i32) -> Result<()> {
        let view = self.registry.get_mut(id)?;
        view.resize(width, height, &self.metrics, &self.palette)
    }

    pub fn move_view(&mut self, id: ViewId, x: i32, y: i32) -> Result<()> {
        self.registry.get_mut(id)?.move_to(x, y);
        Ok(())
    }

    pub fn clear(&mut self, id: ViewId) -> Result<()> {
        self.registry.get_mut(id)?.clear(&self.palette);
        Ok(())
    }

    pub fn clear_eol(&mut self, id: ViewId, x: i32, y: i32) -> Result<()> {
        self.registry
            .get_mut(id)?
            .clear_to_end_of_line(x, y, &self.palette);
        Ok(())
    }

    pub fn clear_eob(&mut self, id: ViewId, x: i32, y: i32) -> Result<()> {
        self.registry
            .get_mut(id)?
            .clear_to_end_of_buffer(x, y, &self.palette);
        Ok(())
    }

    pub fn put(
        &mut self,
        id: ViewId,
        x: i32,
        y: i32,
        runs: &[GlyphRun],
        attribute: Option<&Attribute>,
    ) -> Result<()> {
        self.registry
            .get_mut(id)?
            .put(x, y, runs, attribute, &self.palette);
        Ok(())
    }

    pub fn modeline_put(
        &mut self,
        id: ViewId,
        x: i32,
        runs: &[GlyphRun],
        attribute: Option<&Attribute>,
    ) -> Result<()> {
        self.registry
            .get_mut(id)?
            .modeline_put(x, runs, attribute, &self.palette);
        Ok(())
    }

    pub fn touch(&mut self, id: ViewId) -> Result<()> {
        self.registry.get_mut(id)?.touch();
        Ok(())
    }

    pub fn scroll(&mut self, id: ViewId, n: i32) -> Result<()> {
        self.registry.get_mut(id)?.scroll(n, &self.palette);
        Ok(())
    }

    /// Places the caret and makes `id` the view that owns it. Returns the
    /// caret cell in screen coordinates.
    pub fn move_cursor(&mut self, id: ViewId, x: i32, y: i32) -> Result<CellPos> {
        let view = self.registry.get_mut(id)?;
        view.set_cursor(x, y);
        self.focus = Some(id);
        Ok(view.position().offset(x, y))
    }

    /// Screen cell and color of the visible caret, if any view owns one.
    pub fn caret(&self) -> Option<(CellPos, Rgb)> {
        let view = self.registry.get(self.focus?).ok()?;
        let cursor = view.cursor()?;
        Some((view.position().offset(cursor.x, cursor.y), cursor.color))
    }

    pub fn pane(&self) -> Option<&SidePane> {
        self.pane.as_ref()
    }

    pub fn has_pane(&self) -> bool {
        self.pane.is_some()
    }

    /// Appends an entry, creating the pane if needed. Returns true when the
    /// pane was created by this call.
    pub fn set_pane(&mut self, html: &[u8]) -> Result<bool> {
        let mut created = false;
        let pane = self.pane.get_or_insert_with(|| {
            created = true;
            SidePane::new()
        });
        if let Err(e) = pane.push_html(html) {
            if created {
                self.pane = None;
            }
            return Err(e);
        }
        Ok(created)
    }

    /// Returns true when a pane existed.
    pub fn delete_pane(&mut self) -> bool {
        self.pane.take().is_some()
    }

    /// Width of the editor area for a window `window_width` units wide. The
    /// side pane takes the other half.
    pub fn editor_width(&self, window_width: u32) -> u32 {
        if self.pane.is_some() {
            window_width / 2
        } else {
            window_width
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/mod.rs"]
mod tests;

use super::color::{Palette, Rgb};
use super::geom::{CellPos, CellRect};
use super::metrics::GlyphMetrics;
use super::surface::{Attribute, GlyphRun, Surface};
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Handle assigned by the editor core; unique while the view is alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub u64);

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewKind {
    #[default]
    Plain,
    Minibuffer,
    Popup,
}

impl ViewKind {
    /// Unknown kinds are plain views.
    pub fn from_name(name: &str) -> Self {
        match name {
            "minibuffer" => ViewKind::Minibuffer,
            "popup" => ViewKind::Popup,
            _ => ViewKind::Plain,
        }
    }

    pub fn z_index(self) -> i32 {
        match self {
            ViewKind::Plain | ViewKind::Minibuffer => 0,
            ViewKind::Popup => 2,
        }
    }
}

impl<'de> Deserialize<'de> for ViewKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name: Option<String> = Option::deserialize(deserializer)?;
        Ok(name.as_deref().map(ViewKind::from_name).unwrap_or_default())
    }
}

/// Modelines stack above plain views and below popups.
pub const MODELINE_Z: i32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub x: i32,
    pub y: i32,
    pub color: Rgb,
}

/// An edit surface plus an optional one-row modeline locked directly below it.
#[derive(Debug)]
pub struct View {
    id: ViewId,
    kind: ViewKind,
    pos: CellPos,
    width: i32,
    height: i32,
    edit: Surface,
    modeline: Option<Surface>,
    cursor: Option<Cursor>,
    cursor_color: Rgb,
}

impl View {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ViewId,
        kind: ViewKind,
        pos: CellPos,
        width: i32,
        height: i32,
        use_modeline: bool,
        metrics: &Arc<GlyphMetrics>,
        palette: &Palette,
    ) -> Result<Self> {
        let width = width.max(0);
        let height = height.max(0);
        let edit = Surface::new(
            pos,
            width,
            height,
            kind.z_index(),
            metrics.clone(),
            palette.background,
        )?;
        let modeline = if use_modeline {
            Some(Surface::new(
                pos.offset(0, height),
                width,
                1,
                MODELINE_Z,
                metrics.clone(),
                palette.background,
            )?)
        } else {
            None
        };
        Ok(Self {
            id,
            kind,
            pos,
            width,
            height,
            edit,
            modeline,
            cursor: None,
            cursor_color: palette.foreground,
        })
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
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

    pub fn edit_surface(&self) -> &Surface {
        &self.edit
    }

    pub fn modeline_surface(&self) -> Option<&Surface> {
        self.modeline.as_ref()
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        std::iter::once(&self.edit).chain(self.modeline.as_ref())
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Cursor cell in screen coordinates.
    pub fn cursor_screen_pos(&self) -> Option<CellPos> {
        self.cursor.map(|c| self.pos.offset(c.x, c.y))
    }

    pub fn clear(&mut self, palette: &Palette) {
        self.edit.draw_block(
            CellRect::new(0, 0, self.width, self.height),
            palette.background,
        );
    }

    pub fn clear_to_end_of_line(&mut self, x: i32, y: i32, palette: &Palette) {
        self.edit
            .draw_block(CellRect::new(x, y, self.width - x, 1), palette.background);
    }

    pub fn clear_to_end_of_buffer(&mut self, x: i32, y: i32, palette: &Palette) {
        self.clear_to_end_of_line(x, y, palette);
        self.edit.draw_block(
            CellRect::new(0, y + 1, self.width, self.height - y - 1),
            palette.background,
        );
    }

    pub fn put(
        &mut self,
        x: i32,
        y: i32,
        runs: &[GlyphRun],
        attribute: Option<&Attribute>,
        palette: &Palette,
    ) -> i32 {
        self.edit.put(x, y, runs, attribute, palette)
    }

    /// Views without a modeline ignore modeline output.
    pub fn modeline_put(
        &mut self,
        x: i32,
        runs: &[GlyphRun],
        attribute: Option<&Attribute>,
        palette: &Palette,
    ) {
        if let Some(modeline) = self.modeline.as_mut() {
            modeline.put(x, 0, runs, attribute, palette);
        }
    }

    pub fn touch(&mut self) {
        self.edit.flush();
        if let Some(modeline) = self.modeline.as_mut() {
            modeline.flush();
        }
    }

    /// Records the caret cell. The caret is an overlay, so nothing is drawn.
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Some(Cursor {
            x,
            y,
            color: self.cursor_color,
        });
    }

    pub fn scroll(&mut self, n: i32, palette: &Palette) {
        self.edit.scroll(n, palette.background);
    }

    pub fn resize(
        &mut self,
        width: i32,
        height: i32,
        metrics: &Arc<GlyphMetrics>,
        palette: &Palette,
    ) -> Result<()> {
        let width = width.max(0);
        let height = height.max(0);
        self.edit
            .resize(width, height, metrics.clone(), palette.background)?;
        self.width = width;
        self.height = height;
        if let Some(modeline) = self.modeline.as_mut() {
            modeline.move_to(self.pos.x, self.pos.y + self.edit.height());
            modeline.resize(width, 1, metrics.clone(), palette.background)?;
        }
        Ok(())
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.pos = CellPos::new(x, y);
        self.edit.move_to(x, y);
        if let Some(modeline) = self.modeline.as_mut() {
            modeline.move_to(x, y + self.height);
        }
    }

    /// Tears the view down. Its surfaces leave the compositing order with it.
    pub fn delete(self) {
        tracing::debug!(
            view = %self.id,
            surfaces = self.surfaces().count(),
            "view deleted"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/view.rs"]
mod tests;

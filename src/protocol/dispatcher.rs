//! Applies inbound notifications to the screen, one at a time, in arrival
//! order. A notification that fails is logged and dropped; it never stops the
//! ones after it.

use super::message::{decode, Notification};
use crate::display::{CellPos, FontMeasure, GlyphMetrics, MonospaceEstimate, Palette, Screen};
use crate::error::{CoreError, Result};
use rustc_hash::FxHashMap;
use serde_json::Value;

/// What the session has to do after a notification was applied.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// The caret moved to this screen cell.
    CaretMoved(CellPos),
    /// The editor area changed size; the core needs a fresh resize.
    LayoutChanged,
    PaletteChanged(Palette),
    FontChanged,
    Exit,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub applied: u64,
    pub dropped: u64,
    /// Dropped notifications by error kind.
    pub errors: FxHashMap<&'static str, u64>,
}

pub struct Dispatcher {
    measure: Box<dyn FontMeasure + Send>,
    stats: DispatchStats,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Box::new(MonospaceEstimate::default()))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(measure: Box<dyn FontMeasure + Send>) -> Self {
        Self {
            measure,
            stats: DispatchStats::default(),
        }
    }

    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    /// Decodes and applies one raw notification.
    pub fn dispatch(&mut self, screen: &mut Screen, method: &str, params: Value) -> Option<Effect> {
        let result = decode(method, params).and_then(|msg| self.apply(screen, msg));
        self.record(method, result)
    }

    /// Applies an already decoded notification.
    pub fn dispatch_decoded(&mut self, screen: &mut Screen, msg: Notification) -> Option<Effect> {
        let method = msg.method();
        let result = self.apply(screen, msg);
        self.record(method, result)
    }

    fn record(&mut self, method: &str, result: Result<Option<Effect>>) -> Option<Effect> {
        match result {
            Ok(effect) => {
                self.stats.applied += 1;
                effect
            }
            Err(e) => {
                self.stats.dropped += 1;
                *self.stats.errors.entry(e.kind()).or_default() += 1;
                tracing::warn!(method = %method, kind = e.kind(), error = %e, "notification dropped");
                None
            }
        }
    }

    fn apply(&mut self, screen: &mut Screen, msg: Notification) -> Result<Option<Effect>> {
        tracing::trace!(method = msg.method(), view = ?msg.view(), "apply");
        let effect = match msg {
            Notification::UpdateForeground(color) => {
                screen.set_foreground(color);
                Some(Effect::PaletteChanged(*screen.palette()))
            }
            Notification::UpdateBackground(color) => {
                screen.set_background(color);
                Some(Effect::PaletteChanged(*screen.palette()))
            }
            Notification::MakeView(spec) => {
                screen.make_view(spec)?;
                None
            }
            Notification::DeleteView(id) => {
                screen.delete_view(id)?;
                None
            }
            Notification::ResizeView { id, width, height } => {
                screen.resize_view(id, width, height)?;
                None
            }
            Notification::MoveView { id, x, y } => {
                screen.move_view(id, x, y)?;
                None
            }
            Notification::Clear(id) => {
                screen.clear(id)?;
                None
            }
            Notification::ClearEol { id, x, y } => {
                screen.clear_eol(id, x, y)?;
                None
            }
            Notification::ClearEob { id, x, y } => {
                screen.clear_eob(id, x, y)?;
                None
            }
            Notification::Put {
                id,
                x,
                y,
                chars,
                attribute,
            } => {
                screen.put(id, x, y, &chars, attribute.as_ref())?;
                None
            }
            Notification::ModelinePut {
                id,
                x,
                chars,
                attribute,
            } => {
                screen.modeline_put(id, x, &chars, attribute.as_ref())?;
                None
            }
            Notification::Touch(id) => {
                screen.touch(id)?;
                None
            }
            Notification::MoveCursor { id, x, y } => {
                let pos = screen.move_cursor(id, x, y)?;
                Some(Effect::CaretMoved(pos))
            }
            Notification::Scroll { id, n } => {
                screen.scroll(id, n)?;
                None
            }
            Notification::SetFont { name, size } => {
                let metrics = GlyphMetrics::measure(&name, size, self.measure.as_ref())
                    .ok_or_else(|| CoreError::malformed("set-font", format!("unusable font size {}", size)))?;
                tracing::info!(
                    family = %metrics.family,
                    cell_width = metrics.cell_width_px,
                    cell_height = metrics.cell_height_px,
                    "font changed"
                );
                screen.set_metrics(metrics);
                Some(Effect::FontChanged)
            }
            Notification::SetPane(html) => {
                let created = screen.set_pane(&html)?;
                created.then_some(Effect::LayoutChanged)
            }
            Notification::DeletePane => screen.delete_pane().then_some(Effect::LayoutChanged),
            Notification::UpdateDisplay => None,
            Notification::Exit => Some(Effect::Exit),
        };
        Ok(effect)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/protocol/dispatcher.rs"]
mod tests;

//! Keyboard and IME composition handling.
//!
//! Raw keys go out one event per keydown, but only while no composition is in
//! progress. A composition is delivered as a single text insertion when it
//! ends, so the core never sees the keystrokes that assembled it.

use super::key::KeyInput;
use crate::display::{CellPos, Palette, Rgb};
use crate::protocol::outbound::InputEvent;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Destination of the events the composer produces.
pub trait InputSink {
    fn emit(&mut self, event: InputEvent);
}

impl InputSink for Vec<InputEvent> {
    fn emit(&mut self, event: InputEvent) {
        self.push(event);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComposeState {
    #[default]
    Idle,
    Composing,
}

/// Preedit text drawn at the caret while a composition is in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositionOverlay {
    pub anchor: CellPos,
    pub text: String,
    pub foreground: Rgb,
    pub background: Rgb,
}

impl CompositionOverlay {
    /// Grapheme clusters with their display width in cells.
    pub fn segments(&self) -> impl Iterator<Item = (&str, usize)> {
        self.text.graphemes(true).map(|g| (g, g.width()))
    }

    pub fn width(&self) -> usize {
        self.segments().map(|(_, w)| w).sum()
    }
}

#[derive(Debug, Default)]
pub struct InputComposer {
    state: ComposeState,
    pending: String,
    caret_anchor: Option<CellPos>,
    palette: Palette,
}

impl InputComposer {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    pub fn state(&self) -> ComposeState {
        self.state
    }

    pub fn is_composing(&self) -> bool {
        self.state == ComposeState::Composing
    }

    pub fn pending_text(&self) -> &str {
        &self.pending
    }

    /// Forwards the key unless a composition owns it. Returns whether an event
    /// was emitted.
    pub fn key_down(&mut self, key: KeyInput, sink: &mut dyn InputSink) -> bool {
        if self.is_composing() {
            tracing::trace!(key = %key.key, "key swallowed by composition");
            return false;
        }
        sink.emit(InputEvent::Key(key));
        true
    }

    pub fn composition_start(&mut self) {
        self.state = ComposeState::Composing;
        self.pending.clear();
    }

    pub fn composition_update(&mut self, text: &str) {
        if !self.is_composing() {
            tracing::debug!("composition update outside a composition ignored");
            return;
        }
        self.pending.clear();
        self.pending.push_str(text);
    }

    /// Ends the composition, emitting its text as one insertion. `committed`,
    /// when the host reports it, takes precedence over the last update.
    pub fn composition_end(&mut self, committed: Option<&str>, sink: &mut dyn InputSink) {
        if !self.is_composing() {
            tracing::debug!("composition end outside a composition ignored");
            return;
        }
        self.state = ComposeState::Idle;
        let text = match committed {
            Some(text) => text.to_string(),
            None => std::mem::take(&mut self.pending),
        };
        self.pending.clear();
        if !text.is_empty() {
            sink.emit(InputEvent::InsertText(text));
        }
    }

    /// Pasted text goes out as one insertion. Ignored mid-composition.
    pub fn paste(&mut self, text: &str, sink: &mut dyn InputSink) -> bool {
        if self.is_composing() || text.is_empty() {
            return false;
        }
        sink.emit(InputEvent::InsertText(text.to_string()));
        true
    }

    pub fn set_caret_anchor(&mut self, pos: CellPos) {
        self.caret_anchor = Some(pos);
    }

    pub fn caret_anchor(&self) -> Option<CellPos> {
        self.caret_anchor
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn overlay(&self) -> Option<CompositionOverlay> {
        if !self.is_composing() || self.pending.is_empty() {
            return None;
        }
        Some(CompositionOverlay {
            anchor: self.caret_anchor.unwrap_or_default(),
            text: self.pending.clone(),
            foreground: self.palette.foreground,
            background: self.palette.background,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/composer.rs"]
mod tests;

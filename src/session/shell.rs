//! Session glue: feeds core notifications to the dispatcher, host input to the
//! composer, and keeps the core informed about the editor area's size.

use super::debounce::ResizeDebounce;
use super::event::SessionEvent;
use crate::display::{CellTweak, GlyphMetrics, Palette, Screen};
use crate::input::{InputComposer, InputSink, KeyInput};
use crate::protocol::{Dispatcher, Effect, InputEvent, ReadyParams};
use serde_json::Value;
use std::time::{Duration, Instant};

/// Where the session's outbound traffic goes.
pub trait Outbound: InputSink {
    fn ready(&mut self, params: ReadyParams);
}

#[derive(Clone, Debug)]
pub struct ShellOptions {
    pub palette: Palette,
    pub metrics: GlyphMetrics,
    pub tweak: CellTweak,
    pub resize_quiet: Duration,
}

pub struct SessionShell<O: Outbound> {
    screen: Screen,
    dispatcher: Dispatcher,
    composer: InputComposer,
    outbound: O,
    tweak: CellTweak,
    debounce: ResizeDebounce,
    /// Window size in pixels, as last applied.
    window: (u32, u32),
    ready_sent: bool,
    running: bool,
}

impl<O: Outbound> SessionShell<O> {
    pub fn new(options: ShellOptions, outbound: O, window: (u32, u32)) -> Self {
        Self {
            screen: Screen::new(options.palette, options.metrics),
            dispatcher: Dispatcher::default(),
            composer: InputComposer::new(options.palette),
            outbound,
            tweak: options.tweak,
            debounce: ResizeDebounce::new(options.resize_quiet),
            window,
            ready_sent: false,
            running: true,
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn composer(&self) -> &InputComposer {
        &self.composer
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn outbound(&self) -> &O {
        &self.outbound
    }

    pub fn outbound_mut(&mut self) -> &mut O {
        &mut self.outbound
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Editor-area size in cells for the current window and layout.
    pub fn cell_size(&self) -> (u32, u32) {
        let metrics = self.screen.metrics();
        let width = self.screen.editor_width(self.window.0);
        (
            metrics.cols_for_px(width, self.tweak),
            metrics.rows_for_px(self.window.1, self.tweak),
        )
    }

    /// Sends the startup handshake. Later calls do nothing.
    pub fn start(&mut self) {
        if self.ready_sent {
            return;
        }
        self.ready_sent = true;
        let (width, height) = self.cell_size();
        tracing::info!(width, height, "session ready");
        self.outbound
            .ready(ReadyParams::new(width, height, self.screen.palette()));
    }

    /// Handles one event. Returns false once the session is over.
    pub fn handle(&mut self, event: SessionEvent, now: Instant) -> bool {
        match event {
            SessionEvent::CoreNotification { method, params } => self.on_core(&method, params),
            SessionEvent::CoreClosed => {
                tracing::info!("editor core disconnected");
                self.running = false;
            }
            SessionEvent::Key(key) => self.key_down(key),
            SessionEvent::CompositionStart => self.composer.composition_start(),
            SessionEvent::CompositionUpdate(text) => self.composer.composition_update(&text),
            SessionEvent::CompositionEnd(committed) => {
                self.composer
                    .composition_end(committed.as_deref(), &mut self.outbound)
            }
            SessionEvent::Paste(text) => {
                self.composer.paste(&text, &mut self.outbound);
            }
            SessionEvent::WindowResized { width, height } => {
                self.debounce.schedule(width, height, now);
            }
            SessionEvent::HostCommand(value) => self.send_command(value),
            SessionEvent::Shutdown => {
                tracing::info!("session shutdown requested");
                self.running = false;
            }
        }
        self.running
    }

    pub fn on_core(&mut self, method: &str, params: Value) {
        if let Some(effect) = self.dispatcher.dispatch(&mut self.screen, method, params) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::CaretMoved(pos) => self.composer.set_caret_anchor(pos),
            Effect::LayoutChanged => self.send_resize(),
            Effect::PaletteChanged(palette) => self.composer.set_palette(palette),
            Effect::FontChanged => {}
            Effect::Exit => {
                tracing::info!("editor core requested exit");
                self.running = false;
            }
        }
    }

    pub fn key_down(&mut self, key: KeyInput) {
        self.composer.key_down(key, &mut self.outbound);
    }

    /// How long the loop may block before a debounced resize is due.
    pub fn poll_timeout(&self, now: Instant) -> Option<Duration> {
        self.debounce.timeout(now)
    }

    /// Sends the debounced resize if its quiet period is over.
    pub fn tick(&mut self, now: Instant) {
        if let Some(size) = self.debounce.take_due(now) {
            self.window = size;
            self.send_resize();
        }
    }

    pub fn send_resize(&mut self) {
        let (width, height) = self.cell_size();
        tracing::debug!(width, height, pane = self.screen.has_pane(), "resize");
        self.outbound.emit(InputEvent::Resize { width, height });
    }

    pub fn send_command(&mut self, value: Value) {
        self.outbound.emit(InputEvent::Command(value));
    }

    pub fn send_method(&mut self, method: &str, params: Value) {
        self.outbound.emit(InputEvent::Method {
            method: method.to_string(),
            params,
        });
    }

    pub fn abort(&mut self) {
        self.outbound.emit(InputEvent::Abort);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/shell.rs"]
mod tests;

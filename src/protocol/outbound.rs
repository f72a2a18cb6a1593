//! Events sent from the display client to the editor core.
//!
//! Everything except the startup handshake travels as notification `input`
//! with params `{"kind": <number>, "value": <payload>}`.

use crate::display::Palette;
use crate::input::KeyInput;
use lsp_server::{Message, Notification, Request, RequestId};
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

pub const INPUT_METHOD: &str = "input";
pub const READY_METHOD: &str = "ready";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Abort,
    KeyEvent,
    Resize,
    Command,
    Method,
}

impl InputKind {
    pub fn code(self) -> u8 {
        match self {
            InputKind::Abort => 0,
            InputKind::KeyEvent => 1,
            InputKind::Resize => 2,
            InputKind::Command => 3,
            InputKind::Method => 4,
        }
    }
}

impl Serialize for InputKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Abort,
    Key(KeyInput),
    Resize { width: u32, height: u32 },
    Command(Value),
    Method { method: String, params: Value },
    /// Composed or pasted text, delivered as one `input-string` command.
    InsertText(String),
}

impl InputEvent {
    pub fn kind(&self) -> InputKind {
        match self {
            InputEvent::Abort => InputKind::Abort,
            InputEvent::Key(_) => InputKind::KeyEvent,
            InputEvent::Resize { .. } => InputKind::Resize,
            InputEvent::Command(_) | InputEvent::InsertText(_) => InputKind::Command,
            InputEvent::Method { .. } => InputKind::Method,
        }
    }

    pub fn value(&self) -> Value {
        match self {
            InputEvent::Abort => Value::Null,
            InputEvent::Key(key) => serde_json::to_value(key).unwrap_or(Value::Null),
            InputEvent::Resize { width, height } => json!({ "width": width, "height": height }),
            InputEvent::Command(value) => value.clone(),
            InputEvent::Method { method, params } => json!({ "method": method, "params": params }),
            InputEvent::InsertText(text) => json!(["input-string", utf8_chars(text)]),
        }
    }

    pub fn params(&self) -> Value {
        json!({ "kind": self.kind(), "value": self.value() })
    }

    pub fn to_message(&self) -> Message {
        Message::Notification(Notification::new(INPUT_METHOD.to_string(), self.params()))
    }
}

/// Each character as its own array of UTF-8 bytes.
fn utf8_chars(text: &str) -> Vec<Vec<u8>> {
    let mut buf = [0u8; 4];
    text.chars()
        .map(|c| c.encode_utf8(&mut buf).as_bytes().to_vec())
        .collect()
}

/// Startup handshake payload, in cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReadyParams {
    pub width: u32,
    pub height: u32,
    pub foreground: String,
    pub background: String,
}

impl ReadyParams {
    pub fn new(width: u32, height: u32, palette: &Palette) -> Self {
        Self {
            width,
            height,
            foreground: palette.foreground.to_hex(),
            background: palette.background.to_hex(),
        }
    }

    pub fn to_message(&self) -> Message {
        Message::Request(Request::new(
            RequestId::from(0),
            READY_METHOD.to_string(),
            self,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/protocol/outbound.rs"]
mod tests;

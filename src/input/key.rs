use compact_str::CompactString;
use serde::Serialize;

/// One keystroke as the editor core expects it: a DOM-style key name plus
/// modifier flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyInput {
    pub key: CompactString,
    pub ctrl: bool,
    pub meta: bool,
    #[serde(rename = "super")]
    pub super_key: bool,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: &str) -> Self {
        Self {
            key: CompactString::new(key),
            ctrl: false,
            meta: false,
            super_key: false,
            shift: false,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn super_key(mut self) -> Self {
        self.super_key = true;
        self
    }
}

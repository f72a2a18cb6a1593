//! crossterm events to session events.

use super::present::CELL_PX;
use crate::input::KeyInput;
use crate::session::SessionEvent;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn into_session_event(event: Event) -> Option<SessionEvent> {
    match event {
        Event::Key(key) => into_key_input(key).map(SessionEvent::Key),
        Event::Paste(text) => Some(SessionEvent::Paste(text)),
        Event::Resize(cols, rows) => {
            let (width, height) = window_px(cols, rows);
            Some(SessionEvent::WindowResized { width, height })
        }
        Event::Mouse(_) | Event::FocusGained | Event::FocusLost => None,
    }
}

/// Terminal size in the pixel units the session measures windows in.
pub fn window_px(cols: u16, rows: u16) -> (u32, u32) {
    (cols as u32 * CELL_PX.0, rows as u32 * CELL_PX.1)
}

/// Key releases and keys without a DOM name are dropped.
pub fn into_key_input(event: KeyEvent) -> Option<KeyInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let mods = event.modifiers;
    let mut shift = mods.contains(KeyModifiers::SHIFT);
    let mut ctrl = mods.contains(KeyModifiers::CONTROL);
    let name = match event.code {
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Null => {
            ctrl = true;
            " ".to_string()
        }
        KeyCode::BackTab => {
            shift = true;
            "Tab".to_string()
        }
        KeyCode::F(n) => format!("F{}", n),
        code => dom_key_name(code)?.to_string(),
    };
    let mut key = KeyInput::new(&name);
    key.ctrl = ctrl;
    key.shift = shift;
    key.meta = mods.contains(KeyModifiers::ALT) || mods.contains(KeyModifiers::META);
    key.super_key = mods.contains(KeyModifiers::SUPER);
    Some(key)
}

fn dom_key_name(code: KeyCode) -> Option<&'static str> {
    let name = match code {
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        KeyCode::Esc => "Escape",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::CapsLock => "CapsLock",
        KeyCode::Menu => "ContextMenu",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
#[path = "../../tests/unit/tui/crossterm.rs"]
mod tests;

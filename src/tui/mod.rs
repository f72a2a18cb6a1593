//! Terminal host (crossterm + ratatui).
//!
//! Kept behind the `tui` feature so the display core builds without terminal
//! crates.

pub mod crossterm;
pub mod present;
pub mod terminal_guard;

use crate::session::SessionEvent;
use terminal_guard::TerminationSignal;

impl From<TerminationSignal> for SessionEvent {
    fn from(_: TerminationSignal) -> Self {
        SessionEvent::Shutdown
    }
}

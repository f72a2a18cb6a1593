pub mod debounce;
pub mod event;
pub mod shell;

pub use debounce::ResizeDebounce;
pub use event::SessionEvent;
pub use shell::{Outbound, SessionShell, ShellOptions};

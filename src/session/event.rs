use crate::input::KeyInput;
use crate::protocol::Incoming;
use serde_json::Value;

/// Everything the session loop reacts to, fed through one FIFO channel by the
/// core reader and the host input thread.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    CoreNotification { method: String, params: Value },
    CoreClosed,
    Key(KeyInput),
    CompositionStart,
    CompositionUpdate(String),
    CompositionEnd(Option<String>),
    Paste(String),
    /// New window size in pixels.
    WindowResized { width: u32, height: u32 },
    /// A command raised by the host (menus, IPC), forwarded verbatim.
    HostCommand(Value),
    /// The host wants the session to end (signal, lost terminal).
    Shutdown,
}

impl From<Incoming> for SessionEvent {
    fn from(incoming: Incoming) -> Self {
        match incoming {
            Incoming::Notification { method, params } => {
                SessionEvent::CoreNotification { method, params }
            }
            Incoming::Closed => SessionEvent::CoreClosed,
        }
    }
}

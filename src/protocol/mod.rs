pub mod dispatcher;
pub mod message;
pub mod outbound;
pub mod transport;

pub use dispatcher::{DispatchStats, Dispatcher, Effect};
pub use message::{decode, Notification};
pub use outbound::{InputEvent, InputKind, ReadyParams};
pub use transport::{CoreConnection, Incoming, OutboundSender};

pub mod composer;
pub mod key;

pub use composer::{ComposeState, CompositionOverlay, InputComposer, InputSink};
pub use key::KeyInput;

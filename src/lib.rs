//! cellview - a display client for the lem editor core.
//!
//! Modules:
//! - display: cell-grid surfaces, views and their composition
//! - input: key input and text composition
//! - protocol: the JSON-RPC conversation with the core
//! - session: the event loop glue between host, screen and core
//! - config: user settings
//! - tui: the terminal host (feature `tui`)

pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod protocol;
pub mod session;
#[cfg(feature = "tui")]
pub mod tui;

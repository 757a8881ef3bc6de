//! User-facing commands registered with the host.

mod connect;

pub use connect::{ConnectCommand, PathPrompt};

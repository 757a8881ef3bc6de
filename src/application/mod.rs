//! Terminal host: activates the browser, connects the requested paths and
//! prints the tree.

mod application;
pub mod data;
mod runtime_config;
mod terminal_shell;
mod tree_printer;

pub use application::{Application, ApplicationError};
pub use runtime_config::RuntimeConfig;
pub use terminal_shell::{ArgumentPrompt, TerminalShell};
pub use tree_printer::TreePrinter;

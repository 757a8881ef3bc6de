//! Configuration of the terminal host, read from `hdfs-browser.yaml`.

mod browser_config;
mod connection_options;

pub use browser_config::{BrowserConfig, BrowserConfigCreationError};
pub use connection_options::{ConnectionOptions, DEFAULT_HOST, DEFAULT_PORT};

use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Browse an HDFS namespace as a lazily expanded tree.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Base paths to connect to, in order
    pub paths: Vec<String>,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// The directory holding hdfs-browser.yaml
    #[clap(long, short, default_value = ".")]
    pub root: PathBuf,

    /// How many levels below each connection to expand
    #[clap(long, short, default_value_t = 1)]
    pub depth: usize,

    /// Never colorize the output
    #[clap(long)]
    pub no_color: bool,
}

use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub paths: Vec<String>,
    pub depth: usize,
    pub colorize: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        let colorize = !cli.no_color && supports_color::on(supports_color::Stream::Stdout).is_some();
        Self {
            root: cli.root,
            paths: cli.paths,
            depth: cli.depth,
            colorize,
        }
    }
}

use std::rc::Rc;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::{ArgumentPrompt, RuntimeConfig, TerminalShell, TreePrinter};
use crate::config::{BrowserConfig, BrowserConfigCreationError};
use crate::host::activate;
use crate::listing::HdfsListingSourceFactory;

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        for line in Self::render(runtime_config).await? {
            println!("{line}");
        }
        Ok(())
    }

    /// Connects every requested path and renders the resulting tree.
    pub async fn render(
        runtime_config: impl Into<RuntimeConfig>,
    ) -> Result<Vec<String>, ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let config = BrowserConfig::read(&runtime_config.root)
            .await
            .context(BrowserConfigSnafu)?;
        debug!("Loaded config: {:?}", config);

        let factory = Rc::new(HdfsListingSourceFactory::new(Rc::new(config.to_client())));
        let mut shell = TerminalShell::default();
        activate(&mut shell, factory, config.connection().clone());
        let command = shell.command().context(NotRegisteredSnafu {
            what: "connect command",
        })?;
        let provider = shell.provider().context(NotRegisteredSnafu {
            what: "tree data provider",
        })?;

        let mut changes = provider.subscribe();
        let prompt = ArgumentPrompt::new(runtime_config.paths.iter().cloned());
        while prompt.remaining() > 0 {
            command.run(&prompt).await;
        }

        let mut refreshes = 0;
        while let Ok(Some(())) = changes.try_next() {
            refreshes += 1;
        }
        info!(
            "Connected {} paths ({} tree refreshes)",
            provider.connections().len(),
            refreshes
        );

        Ok(TreePrinter::new(runtime_config.depth, runtime_config.colorize)
            .render(&provider)
            .await)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    BrowserConfigError { source: BrowserConfigCreationError },
    #[snafu(display("Activation did not register a {}", what))]
    NotRegisteredError { what: String },
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    const CONFIG: &str = r#"
connection:
  host: namenode
namespace:
  /user:
    - { pathSuffix: alice, type: DIRECTORY }
    - { pathSuffix: readme.md, type: FILE }
  /user/alice:
    - { pathSuffix: notes.txt, type: FILE }
failures:
  /secret: "Permission denied: user=dr.who, access=READ_EXECUTE"
"#;

    fn write_config(root: &Path) {
        let mut file = std::fs::File::create(root.join("hdfs-browser.yaml"))
            .expect("Failed to create config file");
        write!(file, "{CONFIG}").expect("Failed to write config file");
    }

    fn runtime_config(root: &Path, paths: &[&str], depth: usize) -> RuntimeConfig {
        RuntimeConfig {
            root: root.to_path_buf(),
            paths: paths.iter().map(|path| path.to_string()).collect(),
            depth,
            colorize: false,
        }
    }

    #[compio::test]
    async fn renders_connected_paths() {
        let root = TempDir::new().expect("Failed to create temp directory");
        write_config(root.path());

        let lines = Application::render(runtime_config(root.path(), &["user", "/secret"], 2))
            .await
            .expect("Failed to render");

        assert_eq!(
            lines,
            vec![
                "▾ /user",
                "  ▾ alice",
                "      notes.txt",
                "    readme.md",
                "▾ /secret",
                "    error: Permission denied: user=dr.who, access=READ_EXECUTE",
            ]
        );
    }

    #[compio::test]
    async fn renders_placeholder_without_paths() {
        let root = TempDir::new().expect("Failed to create temp directory");
        write_config(root.path());

        let lines = Application::render(runtime_config(root.path(), &[], 1))
            .await
            .expect("Failed to render");

        assert_eq!(lines, vec!["  No HDFS connections"]);
    }

    #[compio::test]
    async fn missing_config_is_reported() {
        let root = TempDir::new().expect("Failed to create temp directory");

        let result = Application::render(runtime_config(root.path(), &["/user"], 1)).await;

        assert!(matches!(
            result,
            Err(ApplicationError::BrowserConfigError { .. })
        ));
    }
}

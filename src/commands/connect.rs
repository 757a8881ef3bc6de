use std::rc::Rc;

use futures::future::LocalBoxFuture;
use tracing::{debug, info};

use crate::config::ConnectionOptions;
use crate::listing::ListingSourceFactory;
use crate::tree::{Node, TreeProvider};

const SEPARATOR: char = '/';

/// Asks the user for the base path of a new connection.
///
/// `None` means the prompt was dismissed.
pub trait PathPrompt {
    fn prompt_base_path(&self) -> LocalBoxFuture<'_, Option<String>>;
}

/// The "connect" command: prompts for a base path and adds it as a root
/// connection.
pub struct ConnectCommand {
    provider: Rc<TreeProvider>,
    factory: Rc<dyn ListingSourceFactory>,
    options: ConnectionOptions,
}

impl ConnectCommand {
    pub fn new(
        provider: Rc<TreeProvider>,
        factory: Rc<dyn ListingSourceFactory>,
        options: ConnectionOptions,
    ) -> Self {
        Self {
            provider,
            factory,
            options,
        }
    }

    /// Returns the new connection node, or `None` when nothing was entered.
    pub async fn run(&self, prompt: &dyn PathPrompt) -> Option<Node> {
        let Some(answer) = prompt.prompt_base_path().await else {
            debug!("Connect prompt dismissed");
            return None;
        };
        let Some(base_path) = Self::normalize_base_path(&answer) else {
            debug!("Connect prompt answered with a blank path");
            return None;
        };

        info!("Connecting to '{}' on {}", base_path, self.options);
        let source = self.factory.create(&self.options);
        Some(self.provider.add_connection(base_path, source))
    }

    /// Trims the answer and makes it start with a separator.
    fn normalize_base_path(answer: &str) -> Option<String> {
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with(SEPARATOR) {
            Some(trimmed.to_string())
        } else {
            Some(format!("{SEPARATOR}{trimmed}"))
        }
    }
}

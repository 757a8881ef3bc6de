//! Activation against a host shell.
//!
//! The host owns command palettes and tree widgets; this crate only hands it
//! one command and one tree data provider.

use std::rc::Rc;

use tracing::debug;

use crate::commands::ConnectCommand;
use crate::config::ConnectionOptions;
use crate::listing::ListingSourceFactory;
use crate::tree::TreeProvider;

pub const CONNECT_COMMAND_ID: &str = "extension.connectHdfs";
pub const TREE_VIEW_ID: &str = "hdfsFiles";

/// Registration surface of the host editor.
pub trait HostShell {
    fn register_command(&mut self, command_id: &'static str, command: Rc<ConnectCommand>);
    fn register_tree_data_provider(&mut self, view_id: &'static str, provider: Rc<TreeProvider>);
}

/// Creates the tree provider and registers it, with the connect command,
/// on `shell`.
pub fn activate(
    shell: &mut dyn HostShell,
    factory: Rc<dyn ListingSourceFactory>,
    options: ConnectionOptions,
) -> Rc<TreeProvider> {
    let provider = Rc::new(TreeProvider::new());
    let command = Rc::new(ConnectCommand::new(provider.clone(), factory, options));

    shell.register_command(CONNECT_COMMAND_ID, command);
    shell.register_tree_data_provider(TREE_VIEW_ID, provider.clone());
    debug!(
        "Registered '{}' and tree view '{}'",
        CONNECT_COMMAND_ID, TREE_VIEW_ID
    );

    provider
}

//! Lazily expanded tree over remote listings.
//!
//! The host asks a [`TreeProvider`] for the children of a node (or of the
//! root) and for the [`DisplayItem`] of a node. Folder children are listed
//! once, on first request, and cached inside the folder node.

mod folder;
mod node;
mod provider;

pub use folder::FolderNode;
pub use node::{CollapsibleState, DisplayItem, FileNode, MessageNode, Node, NodeKind};
pub use provider::{NO_CONNECTIONS_MESSAGE, TreeProvider};

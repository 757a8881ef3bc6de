use std::rc::Rc;

use derive_more::{Display, From};
use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::listing::{ListingError, basename};
use crate::tree::FolderNode;

/// Whether the host should draw an expansion marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollapsibleState {
    None,
    Collapsed,
}

/// Kind tag handed to the host, e.g. to pick context menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NodeKind {
    #[display("connection")]
    Connection,
    #[display("folder")]
    Folder,
    #[display("file")]
    File,
    #[display("message")]
    Message,
}

/// What the host renders for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub label: String,
    pub collapsible_state: CollapsibleState,
    pub tooltip: Option<String>,
    pub context: NodeKind,
}

impl DisplayItem {
    pub fn is_expandable(&self) -> bool {
        self.collapsible_state == CollapsibleState::Collapsed
    }
}

/// A remote file. Never has children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    path: String,
}

impl FileNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Placeholder text shown in place of real nodes.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub struct MessageNode {
    text: String,
}

impl MessageNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A tree element exposed to the host.
///
/// Cloning is cheap; clones of a folder share its children cache.
#[derive(Debug, Clone)]
pub enum Node {
    /// Root of one connection, labelled with its full path.
    Connection(Rc<FolderNode>),
    Folder(Rc<FolderNode>),
    File(FileNode),
    Message(MessageNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Connection(_) => NodeKind::Connection,
            Node::Folder(_) => NodeKind::Folder,
            Node::File(_) => NodeKind::File,
            Node::Message(_) => NodeKind::Message,
        }
    }

    /// Remote path of the node, if it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Node::Connection(folder) | Node::Folder(folder) => Some(folder.path()),
            Node::File(file) => Some(file.path()),
            Node::Message(_) => None,
        }
    }

    pub fn display_item(&self) -> DisplayItem {
        let (label, collapsible_state) = match self {
            Node::Connection(folder) => (folder.path().to_string(), CollapsibleState::Collapsed),
            Node::Folder(folder) => (
                basename(folder.path()).to_string(),
                CollapsibleState::Collapsed,
            ),
            Node::File(file) => (basename(file.path()).to_string(), CollapsibleState::None),
            Node::Message(message) => (message.text().to_string(), CollapsibleState::None),
        };

        DisplayItem {
            label,
            collapsible_state,
            tooltip: self.path().map(str::to_string),
            context: self.kind(),
        }
    }

    /// Children of the node. Files and messages resolve immediately.
    pub fn children(&self) -> LocalBoxFuture<'_, Result<Rc<[Node]>, ListingError>> {
        match self {
            Node::Connection(folder) | Node::Folder(folder) => folder.children().boxed_local(),
            Node::File(_) | Node::Message(_) => {
                let empty: Rc<[Node]> = Rc::from(Vec::new());
                futures::future::ready(Ok::<_, ListingError>(empty)).boxed_local()
            }
        }
    }

    /// True when both handles point at the same node instance.
    pub fn same_node(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Connection(a), Node::Connection(b)) | (Node::Folder(a), Node::Folder(b)) => {
                Rc::ptr_eq(a, b)
            }
            (Node::File(a), Node::File(b)) => a == b,
            (Node::Message(a), Node::Message(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionOptions;
    use crate::listing::{HdfsListingSource, InMemoryClient};

    fn folder(path: &str) -> Rc<FolderNode> {
        let source = HdfsListingSource::new(
            Rc::new(InMemoryClient::new()),
            ConnectionOptions::default(),
        );
        Rc::new(FolderNode::new(path, Rc::new(source)))
    }

    #[test]
    fn connection_label_is_full_path() {
        let item = Node::Connection(folder("/user/alice")).display_item();

        assert_eq!(item.label, "/user/alice");
        assert!(item.is_expandable());
        assert_eq!(item.context, NodeKind::Connection);
    }

    #[test]
    fn folder_label_is_basename() {
        let item = Node::Folder(folder("/user/alice")).display_item();

        assert_eq!(item.label, "alice");
        assert_eq!(item.collapsible_state, CollapsibleState::Collapsed);
        assert_eq!(item.tooltip.as_deref(), Some("/user/alice"));
    }

    #[test]
    fn file_is_not_expandable() {
        let item = Node::File(FileNode::new("/user/alice/notes.txt")).display_item();

        assert_eq!(item.label, "notes.txt");
        assert!(!item.is_expandable());
        assert_eq!(item.context.to_string(), "file");
    }

    #[test]
    fn message_shows_its_text() {
        let item = Node::Message(MessageNode::new("No HDFS connections")).display_item();

        assert_eq!(item.label, "No HDFS connections");
        assert!(!item.is_expandable());
        assert_eq!(item.tooltip, None);
    }

    #[test]
    fn leaves_resolve_to_no_children() {
        futures::executor::block_on(async {
            let file = Node::File(FileNode::new("/f"));
            let message = Node::Message(MessageNode::from("nothing".to_string()));

            assert!(file.children().await.unwrap().is_empty());
            assert!(message.children().await.unwrap().is_empty());
        });
    }

    #[test]
    fn clones_are_the_same_node() {
        let node = Node::Folder(folder("/a"));
        let other = Node::Folder(folder("/a"));

        assert!(node.same_node(&node.clone()));
        assert!(!node.same_node(&other));
    }
}

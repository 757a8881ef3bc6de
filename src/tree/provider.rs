use std::cell::RefCell;
use std::rc::Rc;

use futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::listing::{ListingError, ListingSource};
use crate::tree::{DisplayItem, FolderNode, MessageNode, Node};

/// Placeholder shown at the root while no connection exists.
pub const NO_CONNECTIONS_MESSAGE: &str = "No HDFS connections";

/// Zero-payload "tree data changed" signal.
#[derive(Debug, Default)]
struct ChangeNotifier {
    subscribers: RefCell<Vec<UnboundedSender<()>>>,
}

impl ChangeNotifier {
    fn subscribe(&self) -> UnboundedReceiver<()> {
        let (sender, receiver) = mpsc::unbounded();
        self.subscribers.borrow_mut().push(sender);
        receiver
    }

    fn notify(&self) {
        self.subscribers.borrow_mut().retain(|sender| {
            if let Err(send_err) = sender.unbounded_send(()) {
                debug!("Dropping closed change subscriber: {}", send_err);
                return false;
            }
            true
        });
    }
}

/// Source of truth for root connections and the query surface polled by
/// the host.
#[derive(Debug, Default)]
pub struct TreeProvider {
    connections: RefCell<Vec<Node>>,
    changes: ChangeNotifier,
}

impl TreeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Children of `node`, or the root level when `node` is `None`.
    ///
    /// The root level is the connection list, or a single message node
    /// when there are no connections.
    pub async fn children(&self, node: Option<&Node>) -> Result<Rc<[Node]>, ListingError> {
        match node {
            Some(node) => node.children().await,
            None => {
                let connections = self.connections.borrow();
                if connections.is_empty() {
                    return Ok(Rc::from(vec![Node::Message(MessageNode::new(
                        NO_CONNECTIONS_MESSAGE,
                    ))]));
                }
                Ok(Rc::from(connections.as_slice()))
            }
        }
    }

    pub fn display_item(&self, node: &Node) -> DisplayItem {
        node.display_item()
    }

    /// Appends a new root connection and notifies subscribers.
    ///
    /// Adding a path twice yields two independent connections.
    pub fn add_connection(&self, path: impl Into<String>, source: Rc<dyn ListingSource>) -> Node {
        let node = Node::Connection(Rc::new(FolderNode::new(path, source)));
        self.connections.borrow_mut().push(node.clone());
        info!(
            "Added connection '{}' ({} total)",
            node.path().unwrap_or_default(),
            self.connections.borrow().len()
        );
        self.changes.notify();
        node
    }

    pub fn connections(&self) -> Vec<Node> {
        self.connections.borrow().clone()
    }

    /// Receives one `()` per change of the root level.
    pub fn subscribe(&self) -> UnboundedReceiver<()> {
        self.changes.subscribe()
    }
}

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use tracing::{debug, warn};

use crate::listing::{Entry, ListingError, ListingSource};
use crate::tree::{FileNode, Node};

type ChildrenResult = Result<Rc<[Node]>, ListingError>;
type PendingChildren = Shared<LocalBoxFuture<'static, ChildrenResult>>;

/// Expansion state of a folder's children.
enum ChildrenCache {
    NotFetched,
    Fetching(PendingChildren),
    Fetched(Rc<[Node]>),
}

/// A remote directory whose children are listed on first request and then
/// kept for the lifetime of the node.
pub struct FolderNode {
    path: String,
    source: Rc<dyn ListingSource>,
    children: RefCell<ChildrenCache>,
}

impl FolderNode {
    pub fn new(path: impl Into<String>, source: Rc<dyn ListingSource>) -> Self {
        Self {
            path: path.into(),
            source,
            children: RefCell::new(ChildrenCache::NotFetched),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_expanded(&self) -> bool {
        matches!(*self.children.borrow(), ChildrenCache::Fetched(_))
    }

    /// Returns the cached children, or lists them from the source.
    ///
    /// Concurrent callers share one in-flight listing. A failed listing
    /// leaves nothing cached so the next call lists again.
    pub async fn children(&self) -> ChildrenResult {
        let pending = {
            let mut cache = self.children.borrow_mut();
            match &*cache {
                ChildrenCache::Fetched(children) => {
                    debug!("Serving cached children of '{}'", self.path);
                    return Ok(children.clone());
                }
                ChildrenCache::Fetching(pending) => {
                    debug!("Joining in-flight listing of '{}'", self.path);
                    pending.clone()
                }
                ChildrenCache::NotFetched => {
                    let pending = Self::fetch(self.path.clone(), self.source.clone())
                        .boxed_local()
                        .shared();
                    *cache = ChildrenCache::Fetching(pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;
        self.commit(&pending, &result);
        result
    }

    fn commit(&self, pending: &PendingChildren, result: &ChildrenResult) {
        let mut cache = self.children.borrow_mut();
        let ChildrenCache::Fetching(current) = &*cache else {
            return;
        };
        if !current.ptr_eq(pending) {
            return;
        }
        *cache = match result {
            Ok(children) => ChildrenCache::Fetched(children.clone()),
            Err(_) => ChildrenCache::NotFetched,
        };
    }

    async fn fetch(path: String, source: Rc<dyn ListingSource>) -> ChildrenResult {
        debug!("Expanding '{}'", path);
        let entries = source.enumerate_files(&path).await.inspect_err(|error| {
            warn!("Failed to expand '{}': {}", path, error);
        })?;

        Ok(entries
            .into_iter()
            .map(|entry| Self::child_node(entry, &source))
            .collect())
    }

    fn child_node(entry: Entry, source: &Rc<dyn ListingSource>) -> Node {
        if entry.is_directory() {
            Node::Folder(Rc::new(FolderNode::new(entry.path(), source.clone())))
        } else {
            Node::File(FileNode::new(entry.path()))
        }
    }
}

impl fmt::Debug for FolderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FolderNode")
            .field("path", &self.path)
            .field("expanded", &self.is_expanded())
            .finish()
    }
}

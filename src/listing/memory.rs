use std::cell::Cell;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use hashlink::LinkedHashMap;
use tracing::debug;

use crate::listing::{ClientError, FileStatus, HdfsClient, normalize_path};

/// [`HdfsClient`] serving a fixed namespace from memory.
///
/// Listings come back in insertion order. A path registered as a failure
/// fails even if it also has a listing.
#[derive(Debug, Default)]
pub struct InMemoryClient {
    namespace: LinkedHashMap<String, Vec<FileStatus>>,
    failures: LinkedHashMap<String, String>,
    readdir_calls: Cell<usize>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, path: &str, statuses: Vec<FileStatus>) -> Self {
        self.insert_listing(path, statuses);
        self
    }

    pub fn with_failure(mut self, path: &str, message: impl Into<String>) -> Self {
        self.insert_failure(path, message);
        self
    }

    pub fn insert_listing(&mut self, path: &str, statuses: Vec<FileStatus>) {
        self.namespace.insert(normalize_path(path), statuses);
    }

    pub fn insert_failure(&mut self, path: &str, message: impl Into<String>) {
        self.failures.insert(normalize_path(path), message.into());
    }

    /// Number of `readdir` requests served so far, failed ones included.
    pub fn readdir_calls(&self) -> usize {
        self.readdir_calls.get()
    }

    fn lookup(&self, path: &str) -> Result<Vec<FileStatus>, ClientError> {
        let key = normalize_path(path);
        if let Some(message) = self.failures.get(&key) {
            return Err(ClientError::Remote {
                message: message.clone(),
            });
        }
        self.namespace
            .get(&key)
            .cloned()
            .ok_or(ClientError::NotFound { path: key })
    }
}

impl HdfsClient for InMemoryClient {
    fn readdir<'a>(
        &'a self,
        path: &'a str,
    ) -> LocalBoxFuture<'a, Result<Vec<FileStatus>, ClientError>> {
        self.readdir_calls.set(self.readdir_calls.get() + 1);
        debug!("In-memory readdir of '{}'", path);
        futures::future::ready(self.lookup(path)).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_normalizes_paths() {
        let client = InMemoryClient::new().with_listing("/user/", vec![FileStatus::file("a")]);

        let listing = futures::executor::block_on(client.readdir("//user"));

        assert_eq!(listing, Ok(vec![FileStatus::file("a")]));
        assert_eq!(client.readdir_calls(), 1);
    }

    #[test]
    fn failure_wins_over_listing() {
        let client = InMemoryClient::new()
            .with_listing("/secret", vec![FileStatus::file("a")])
            .with_failure("/secret", "Permission denied");

        let listing = futures::executor::block_on(client.readdir("/secret"));

        assert_eq!(
            listing,
            Err(ClientError::Remote {
                message: "Permission denied".to_string()
            })
        );
    }

    #[test]
    fn unknown_path_is_not_found() {
        let client = InMemoryClient::new();

        let listing = futures::executor::block_on(client.readdir("/missing/"));

        assert_eq!(
            listing,
            Err(ClientError::NotFound {
                path: "/missing".to_string()
            })
        );
    }
}

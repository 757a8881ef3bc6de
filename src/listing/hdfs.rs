//! Adapter between the raw HDFS directory client and [`ListingSource`].
//!
//! The client contract mirrors a WebHDFS `LISTSTATUS` call: each raw status
//! carries a `pathSuffix` relative to the listed directory and a `type` of
//! `FILE`, `DIRECTORY` or `SYMLINK`.

use std::rc::Rc;

use derive_more::Display;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use snafu::Snafu;
use tracing::{debug, warn};

use crate::config::ConnectionOptions;
use crate::listing::{Entry, ListingError, ListingSource, ListingSourceFactory, join_path};

/// Wire-level type of a raw directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FileType {
    #[display("FILE")]
    File,
    #[display("DIRECTORY")]
    Directory,
    #[display("SYMLINK")]
    Symlink,
    #[display("UNKNOWN")]
    Unknown,
}

impl FileType {
    /// Parses the wire spelling. Anything unrecognized is tolerated as
    /// [`FileType::Unknown`].
    pub fn from_wire(value: &str) -> Self {
        match value {
            "FILE" => FileType::File,
            "DIRECTORY" => FileType::Directory,
            "SYMLINK" => FileType::Symlink,
            _ => FileType::Unknown,
        }
    }
}

/// One raw entry as returned by the remote client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub path_suffix: String,
    pub file_type: FileType,
}

impl FileStatus {
    pub fn new(path_suffix: impl Into<String>, file_type: FileType) -> Self {
        Self {
            path_suffix: path_suffix.into(),
            file_type,
        }
    }

    pub fn directory(path_suffix: impl Into<String>) -> Self {
        Self::new(path_suffix, FileType::Directory)
    }

    pub fn file(path_suffix: impl Into<String>) -> Self {
        Self::new(path_suffix, FileType::File)
    }
}

/// The remote directory client the listing adapter sits on.
pub trait HdfsClient {
    fn readdir<'a>(
        &'a self,
        path: &'a str,
    ) -> LocalBoxFuture<'a, Result<Vec<FileStatus>, ClientError>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ClientError {
    #[snafu(display("File {} does not exist.", path))]
    NotFound { path: String },
    #[snafu(display("{message}"))]
    Remote { message: String },
}

/// [`ListingSource`] backed by an [`HdfsClient`].
pub struct HdfsListingSource<C> {
    client: Rc<C>,
    options: ConnectionOptions,
}

impl<C: HdfsClient> HdfsListingSource<C> {
    pub fn new(client: Rc<C>, options: ConnectionOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    fn to_entries(path: &str, statuses: Vec<FileStatus>) -> Vec<Entry> {
        statuses
            .into_iter()
            .filter_map(|status| {
                if status.path_suffix.is_empty() {
                    // WebHDFS answers a listing of a file with the file's own status
                    debug!("Skipping self status returned for '{}'", path);
                    return None;
                }
                let child = join_path(path, &status.path_suffix);
                Some(Entry::new(child, status.file_type == FileType::Directory))
            })
            .collect()
    }
}

impl<C: HdfsClient> ListingSource for HdfsListingSource<C> {
    fn enumerate_files<'a>(
        &'a self,
        path: &'a str,
    ) -> LocalBoxFuture<'a, Result<Vec<Entry>, ListingError>> {
        async move {
            debug!("Listing '{}' on {}", path, self.options.base_url());
            match self.client.readdir(path).await {
                Ok(statuses) => {
                    let entries = Self::to_entries(path, statuses);
                    debug!("Listed {} entries under '{}'", entries.len(), path);
                    Ok(entries)
                }
                Err(error) => {
                    warn!("Listing '{}' failed: {}", path, error);
                    Err(ListingError::Remote {
                        path: path.to_string(),
                        message: error.to_string(),
                    })
                }
            }
        }
        .boxed_local()
    }
}

/// Builds [`HdfsListingSource`]s that share one client.
pub struct HdfsListingSourceFactory<C> {
    client: Rc<C>,
}

impl<C> HdfsListingSourceFactory<C> {
    pub fn new(client: Rc<C>) -> Self {
        Self { client }
    }
}

impl<C: HdfsClient + 'static> ListingSourceFactory for HdfsListingSourceFactory<C> {
    fn create(&self, options: &ConnectionOptions) -> Rc<dyn ListingSource> {
        Rc::new(HdfsListingSource::new(self.client.clone(), options.clone()))
    }
}

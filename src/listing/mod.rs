//! Remote directory listing.
//!
//! A [`ListingSource`] turns a remote path into the [`Entry`] values
//! directly below it. The HDFS flavour adapts a raw [`HdfsClient`], whose
//! statuses carry a relative `pathSuffix` and a wire `type`.

mod entry;
mod hdfs;
mod memory;
mod source;

pub use entry::{Entry, basename, join_path, normalize_path};
pub use hdfs::{
    ClientError, FileStatus, FileType, HdfsClient, HdfsListingSource, HdfsListingSourceFactory,
};
pub use memory::InMemoryClient;
pub use source::{ListingError, ListingSource, ListingSourceFactory};

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use snafu::Snafu;

use crate::config::ConnectionOptions;
use crate::listing::Entry;

/// Asynchronous, non-recursive directory enumeration.
///
/// Implementations return the immediate children of `path` in whatever
/// order the backing store produces them. A failed listing never yields
/// partial results.
pub trait ListingSource {
    fn enumerate_files<'a>(
        &'a self,
        path: &'a str,
    ) -> LocalBoxFuture<'a, Result<Vec<Entry>, ListingError>>;
}

/// Creates listing sources bound to a set of connection options.
pub trait ListingSourceFactory {
    fn create(&self, options: &ConnectionOptions) -> Rc<dyn ListingSource>;
}

impl<F> ListingSourceFactory for F
where
    F: Fn(&ConnectionOptions) -> Rc<dyn ListingSource>,
{
    fn create(&self, options: &ConnectionOptions) -> Rc<dyn ListingSource> {
        self(options)
    }
}

/// Failure of a single listing request.
///
/// Clonable because one in-flight listing can be awaited by several callers.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ListingError {
    #[snafu(display("{message}"))]
    Remote { path: String, message: String },
}

impl ListingError {
    pub fn path(&self) -> &str {
        match self {
            ListingError::Remote { path, .. } => path,
        }
    }
}

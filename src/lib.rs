//! HDFS namespaces as a lazily expanded tree for an editor sidebar.
//!
//! A [`tree::TreeProvider`] holds root connections, each a folder node bound
//! to a [`listing::ListingSource`]. Folder children are listed on first
//! request and cached; hosts wire the provider and the connect command in
//! through [`host::activate`].
#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod cli;
pub mod commands;
pub mod config;
mod ext;
pub mod host;
pub mod listing;
pub mod tree;

//! Client for a content-addressed metadata store.
//!
//! Inputs (text, files or existing SHA-256 digests) are reduced to a digest,
//! and metadata documents are fetched, replaced or removed under that digest.

pub mod cli;
pub mod commands;
pub mod domain;
pub mod services;

pub use domain::models::{BatchSummary, Document, HashKind, HashRecord, RunOptions};
pub use services::batch::{BatchMode, BatchProcessor};
pub use services::classify::classify;
pub use services::client::{ClientError, MetadataClient, MetadataStore};
pub use services::config::Config;
pub use services::hashing::compute;

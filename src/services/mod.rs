//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `hashing.rs`: SHA-256 digests of byte content.
//! - `classify.rs`: file / hash / text decision for a CLI input.
//! - `collect.rs`: intrinsic metadata (size, permission, length, timestamp).
//! - `metadata.rs`: metadata files, merge precedence, empty-value stripping.
//! - `client.rs`: HTTP protocol with the hashref store.
//! - `batch.rs`: per-input orchestration, dedup and aggregate outcome.
//! - `config.rs`: config file, defaults and environment overrides.
//! - `prompt.rs`: yes/no confirmation.
//! - `output.rs`: status line / JSON output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod batch;
pub mod classify;
pub mod client;
pub mod collect;
pub mod config;
pub mod hashing;
pub mod metadata;
pub mod output;
pub mod prompt;

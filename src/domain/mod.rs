//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep the classification, document and report types in one place.
//! - Avoid cyclic imports between services and command handlers.
//!
//! ## Files
//! - `models.rs`: hash kinds, records, documents, run options and batch summaries.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `HashKind` labels and the `Document` shape travel over the wire to the
//! hashref server. Renaming a label changes what existing records look like.

pub mod models;

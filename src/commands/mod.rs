//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs`: config generation and self-record management.
//! - `runtime.rs`: get/set/remove over the input list.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep status lines and exit codes stable.

pub mod admin;
pub mod runtime;

pub use admin::{handle_generate, handle_self};
pub use runtime::handle_runtime_commands;

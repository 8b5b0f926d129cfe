//! RPC credential provisioning for blockchain node config files.
//!
//! Generates a salted HMAC-SHA256 credential (or a plain user/password pair)
//! and inserts it into a node's config exactly once.
//!
//! ## Modules
//! - `cli` — Command-line handlers
//! - `core` — Credential derivation, dialects, config mutation
//! - `models` — Data structures
//! - `util` — Filesystem and journald helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod util;

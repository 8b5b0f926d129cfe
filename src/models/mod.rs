//! Data structures shared by the CLI and core.

pub mod credential;
pub mod policy;
pub mod settings;

//! Core business logic modules.

pub mod credential;
pub mod dialect;
pub mod document;
pub mod file_lock;
pub mod mutator;
pub mod provision;
pub mod settings;
pub mod target;

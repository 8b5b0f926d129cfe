//! Utility modules for filesystem and journald operations.

pub mod fs;
pub mod journald;

//! Advisory flock(2) on the target config for the read-check-write window.

use crate::error::{ProvisionError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// An exclusive lock on an existing file. Released on drop.
pub struct FileLock {
    _file: File,
}

impl FileLock {
    /// Try to lock `path` without blocking.
    /// Returns `Ok(None)` if another process already holds it.
    ///
    /// The file is opened read-only and never created.
    pub fn try_exclusive(path: &Path) -> Result<Option<Self>> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|source| ProvisionError::ConfigUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { _file: file })),
            Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            // fs2 on Linux may return Other instead of WouldBlock
            Err(ref e) if e.raw_os_error() == Some(11) => Ok(None), // EAGAIN
            Err(source) => Err(ProvisionError::ConfigUnreadable {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Lock `path` or fail with `ConfigLocked`.
    pub fn acquire(path: &Path) -> Result<Self> {
        Self::try_exclusive(path)?.ok_or_else(|| ProvisionError::ConfigLocked {
            path: path.to_path_buf(),
        })
    }
}

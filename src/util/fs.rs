use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Replace `path` with `content` via a sibling temp file and rename,
/// keeping the original permissions. Readers see the old or the new
/// file, never a truncated one.
pub fn replace_contents(path: &Path, content: &str) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let perm = fs::metadata(path)?.permissions();

    let mut tmp = tempfile::Builder::new()
        .prefix(".node-rpcauth-")
        .tempfile_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file().set_permissions(perm)?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_replace_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rippled.conf");
        fs::write(&path, "old\n").unwrap();
        replace_contents(&path, "new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_replace_contents_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rippled.conf");
        fs::write(&path, "old\n").unwrap();
        replace_contents(&path, "new\n").unwrap();
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("rippled.conf")]);
    }

    #[test]
    fn test_replace_contents_missing_target() {
        let dir = TempDir::new().unwrap();
        assert!(replace_contents(&dir.path().join("nope.conf"), "x").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_replace_contents_keeps_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rippled.conf");
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        replace_contents(&path, "new\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }
}

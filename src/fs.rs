//! Interact with the filesystem, write avatars and their options to it.
use std::{
    fs::File,
    io::prelude::*,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::error::AvatarError;

fn filesystem(action: &'static str, path: &Path, source: std::io::Error) -> AvatarError {
    AvatarError::Filesystem {
        action,
        path: path.to_path_buf(),
        source,
    }
}

/// Makes sure `directory` exists, creating it and its parents if needed.
///
/// Calling this on a directory that already exists does nothing.
pub fn ensure_dir(directory: &Path) -> Result<(), AvatarError> {
    debug!("ensuring `{:?}` exists", directory);
    std::fs::create_dir_all(directory).map_err(|e| filesystem("create directory", directory, e))
}

/// Dumps raw bytes to the disk.
///
/// - `bytes` will be written as is to `directory/filename`
/// - any existing file with the same name will be overwritten
///
/// This function will return the path of the file the bytes have been
/// dumped to.
pub fn dump(bytes: &[u8], directory: &Path, filename: &str) -> Result<PathBuf, AvatarError> {
    let dump_path = directory.join(filename);

    info!("dumping {} bytes into `{:?}`", bytes.len(), dump_path);
    let mut file =
        File::create(&dump_path).map_err(|e| filesystem("create file", &dump_path, e))?;
    file.write_all(bytes).map_err(|e| filesystem("write to", &dump_path, e))?;

    Ok(dump_path)
}

#[cfg(test)]
mod tests {
    use super::{dump, ensure_dir};
    use crate::error::AvatarError;

    #[test]
    fn ensure_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let directory = tmp.path().join("a").join("b");

        ensure_dir(&directory).unwrap();
        assert!(directory.is_dir());
        ensure_dir(&directory).unwrap();
        assert!(directory.is_dir());
    }

    #[test]
    fn ensure_dir_fails_on_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = dump(b"not a directory", tmp.path(), "file").unwrap();

        match ensure_dir(&file.join("sub")) {
            Err(AvatarError::Filesystem { action, .. }) => assert_eq!(action, "create directory"),
            other => panic!("expected a filesystem error, found {:?}", other),
        }
    }

    #[test]
    fn dump_overwrites() {
        let tmp = tempfile::tempdir().unwrap();

        let path = dump(b"first version", tmp.path(), "0.json").unwrap();
        assert_eq!(path, tmp.path().join("0.json"));
        assert_eq!(std::fs::read(&path).unwrap(), b"first version");

        dump(b"second", tmp.path(), "0.json").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn dump_into_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let result = dump(b"", &tmp.path().join("missing"), "0.png");
        assert!(matches!(
            result,
            Err(AvatarError::Filesystem {
                action: "create file",
                ..
            })
        ));
    }
}

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::Constants;
use crate::error::{Error, FsContext, Result};

/// Exclusive marker guarding updates to a single file.
///
/// The marker is `{target}.lock`, created with create-exclusive semantics so at most one writer,
/// across processes, holds it. New contents are written to the marker and `commit` renames it over
/// the target in one step. Dropping an uncommitted lock removes the marker.
#[derive(Debug)]
pub struct Lockfile {
    target: PathBuf,
    lock_path: PathBuf,
    file: Option<File>,
    held: bool,
}

impl Lockfile {
    /// Creates the lock marker for `target`, without waiting or retrying.
    ///
    /// # Errors
    ///
    /// - `Error::Locked` if the marker already exists.
    /// - `Error::Fs` if it could not be created for any other reason.
    pub fn acquire(target: &Path) -> Result<Self> {
        let lock_path = lock_path_for(target);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => Error::Locked {
                    path: lock_path.clone(),
                },
                _ => Error::fs(&lock_path, e),
            })?;

        log::debug!("acquired lock {:?}", lock_path);
        Ok(Self {
            target: target.to_path_buf(),
            lock_path,
            file: Some(file),
            held: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.lock_path
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        match self.file.as_mut() {
            Some(file) => file.write_all(data).at_path(&self.lock_path),
            None => Err(Error::fs(
                &self.lock_path,
                std::io::Error::other("lock file was already closed"),
            )),
        }
    }

    /// Flushes the written contents and renames the marker over the target.
    ///
    /// # Errors
    ///
    /// Fails if the contents could not be synced or the rename failed, the marker is removed in
    /// that case and the target keeps its previous contents.
    pub fn commit(mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            file.sync_all().at_path(&self.lock_path)?;
        }
        fs::rename(&self.lock_path, &self.target).at_path(&self.target)?;
        self.held = false;

        log::debug!("released lock {:?}", self.lock_path);
        Ok(())
    }
}

impl Drop for Lockfile {
    fn drop(&mut self) {
        if !self.held {
            return;
        }
        drop(self.file.take());
        if let Err(e) = fs::remove_file(&self.lock_path) {
            log::warn!("could not remove lock file {:?}: {}", self.lock_path, e);
        }
    }
}

fn lock_path_for(target: &Path) -> PathBuf {
    let mut path = OsString::from(target.as_os_str());
    path.push(Constants::LOCK_EXTENSION);
    PathBuf::from(path)
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_path() {
        assert_eq!(
            lock_path_for(Path::new(".git/HEAD")),
            PathBuf::from(".git/HEAD.lock")
        );
    }

    #[test]
    fn test_commit_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("HEAD");
        fs::write(&target, b"old\n").unwrap();

        let mut lock = Lockfile::acquire(&target).unwrap();
        assert!(lock.path().exists());
        lock.write_all(b"new\n").unwrap();
        // readers still see the old value until the commit
        assert_eq!(fs::read(&target).unwrap(), b"old\n");
        lock.commit().unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new\n");
        assert!(!lock_path_for(&target).exists());
    }

    #[test]
    fn test_second_acquire_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("HEAD");

        let _held = Lockfile::acquire(&target).unwrap();
        let second = Lockfile::acquire(&target);
        assert!(matches!(second, Err(Error::Locked { .. })));
    }

    #[test]
    fn test_drop_removes_marker() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("HEAD");
        {
            let mut lock = Lockfile::acquire(&target).unwrap();
            lock.write_all(b"abandoned\n").unwrap();
        }
        assert!(!lock_path_for(&target).exists());
        assert!(!target.exists());
        assert!(Lockfile::acquire(&target).is_ok());
    }

    #[test]
    fn test_failed_acquire_keeps_foreign_marker() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("HEAD");
        fs::write(lock_path_for(&target), b"").unwrap();

        assert!(Lockfile::acquire(&target).is_err());
        assert!(lock_path_for(&target).exists());
    }

    #[test]
    fn test_missing_directory_is_fs_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("HEAD");
        assert!(matches!(
            Lockfile::acquire(&target),
            Err(Error::Fs { .. })
        ));
    }
}

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::hashing::Hash;

use super::Lockfile;

const EMPTY_HEAD: &str = "(none)";

/// Owner of the HEAD file, which holds the hash of the latest commit or nothing at all before the
/// first commit.
#[derive(Debug, Clone)]
pub struct RefStore {
    path: PathBuf,
}

impl RefStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the commit HEAD points to, or `None` if there are no commits yet.
    ///
    /// # Errors
    ///
    /// This function will fail if HEAD exists but could not be read, or its first line is not a
    /// valid hash.
    pub fn read(&self) -> Result<Option<Hash>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::fs(&self.path, e)),
        };

        let line = content.lines().next().unwrap_or("").trim();
        if line.is_empty() {
            return Ok(None);
        }
        Hash::from_str(line)
            .map(Some)
            .map_err(|_| Error::CorruptHead(line.to_owned()))
    }

    /// Points HEAD at `new`, through the lock-write-rename sequence.
    ///
    /// # Errors
    ///
    /// Fails with `Error::Locked` if another update is in progress, or with `Error::Fs` if the lock
    /// could not be written or renamed. HEAD is left unchanged on failure.
    pub fn advance(&self, new: &Hash) -> Result<()> {
        let mut lock = Lockfile::acquire(&self.path)?;
        lock.write_all(format!("{}\n", new).as_bytes())?;
        lock.commit()?;

        log::info!("HEAD advanced to {}", new);
        Ok(())
    }

    /// Same as `advance`, but only moves HEAD if it still points at `expected` once the lock is
    /// held, so a commit built on a stale parent is never published.
    ///
    /// # Errors
    ///
    /// Besides the errors from `advance`, this fails with `Error::HeadMoved` if HEAD changed.
    pub fn advance_from(&self, expected: Option<&Hash>, new: &Hash) -> Result<()> {
        let mut lock = Lockfile::acquire(&self.path)?;

        let found = self.read()?;
        if found.as_ref() != expected {
            let describe = |h: Option<&Hash>| h.map_or(EMPTY_HEAD.to_owned(), Hash::to_string);
            return Err(Error::HeadMoved {
                expected: describe(expected),
                found: describe(found.as_ref()),
            });
        }

        lock.write_all(format!("{}\n", new).as_bytes())?;
        lock.commit()?;

        log::info!("HEAD advanced to {}", new);
        Ok(())
    }
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Constants;

    fn temp_refs() -> (tempfile::TempDir, RefStore) {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let refs = RefStore::new(dir.path().join(Constants::HEAD_FILE_NAME));
        (dir, refs)
    }

    fn lock_marker(refs: &RefStore) -> PathBuf {
        let mut name = refs.path().as_os_str().to_owned();
        name.push(Constants::LOCK_EXTENSION);
        PathBuf::from(name)
    }

    #[test]
    fn test_read_missing_head_is_empty() {
        let (_dir, refs) = temp_refs();
        assert_eq!(refs.read().unwrap(), None);
    }

    #[test]
    fn test_read_blank_head_is_empty() {
        let (_dir, refs) = temp_refs();
        fs::write(refs.path(), b"\n").unwrap();
        assert_eq!(refs.read().unwrap(), None);
    }

    #[test]
    fn test_advance_writes_hash_and_newline() {
        let (_dir, refs) = temp_refs();
        let hash = Hash::compute(b"first");
        refs.advance(&hash).unwrap();

        assert_eq!(
            fs::read_to_string(refs.path()).unwrap(),
            format!("{}\n", hash)
        );
        assert_eq!(refs.read().unwrap(), Some(hash));
        assert!(!lock_marker(&refs).exists());
    }

    #[test]
    fn test_advance_overwrites_previous_value() {
        let (_dir, refs) = temp_refs();
        let first = Hash::compute(b"first");
        let second = Hash::compute(b"second");
        refs.advance(&first).unwrap();
        refs.advance(&second).unwrap();
        assert_eq!(refs.read().unwrap(), Some(second));
    }

    #[test]
    fn test_corrupt_head() {
        let (_dir, refs) = temp_refs();
        fs::write(refs.path(), b"ref: refs/heads/main\n").unwrap();
        assert!(matches!(refs.read(), Err(Error::CorruptHead(_))));
    }

    #[test]
    fn test_locked_head_fails_fast_and_keeps_value() {
        let (_dir, refs) = temp_refs();
        let first = Hash::compute(b"first");
        refs.advance(&first).unwrap();

        fs::write(lock_marker(&refs), b"").unwrap();
        let result = refs.advance(&Hash::compute(b"second"));
        assert!(matches!(result, Err(Error::Locked { .. })));
        assert_eq!(refs.read().unwrap(), Some(first));
        // the marker belongs to someone else and must survive the failure
        assert!(lock_marker(&refs).exists());
    }

    #[test]
    fn test_exactly_one_concurrent_writer_wins() {
        let (_dir, refs) = temp_refs();
        let winner_hash = Hash::compute(b"winner");
        let loser_hash = Hash::compute(b"loser");

        // the winner is mid-update, holding the marker
        let mut winner = Lockfile::acquire(refs.path()).unwrap();

        let loser = refs.advance(&loser_hash);
        assert!(matches!(loser, Err(Error::Locked { .. })));

        winner
            .write_all(format!("{}\n", winner_hash).as_bytes())
            .unwrap();
        winner.commit().unwrap();

        assert_eq!(refs.read().unwrap(), Some(winner_hash));
        assert!(!lock_marker(&refs).exists());
    }

    #[test]
    fn test_advance_from_detects_moved_head() {
        let (_dir, refs) = temp_refs();
        let first = Hash::compute(b"first");
        let second = Hash::compute(b"second");

        refs.advance_from(None, &first).unwrap();
        let result = refs.advance_from(None, &second);
        assert!(matches!(result, Err(Error::HeadMoved { .. })));
        assert_eq!(refs.read().unwrap(), Some(first));
        assert!(!lock_marker(&refs).exists());

        refs.advance_from(Some(&first), &second).unwrap();
        assert_eq!(refs.read().unwrap(), Some(second));
    }
}

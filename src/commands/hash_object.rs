use std::path::Path;

use anyhow::{Context, Result};

use crate::object::{ObjectKind, encode};
use crate::repository::Repository;

/// Returns the hash of `file` as a blob, storing it in the repository at `root` if `write` is set.
///
/// # Errors
///
/// This function will fail if the file could not be read, or when writing, if there is no
/// repository or the blob could not be stored.
pub fn hash_object(root: &Path, file: &Path, write: bool) -> Result<String> {
    let path = root.join(file);
    let content = std::fs::read(&path).with_context(|| format!("could not read {:?}", path))?;

    let hash = if write {
        Repository::open(root)
            .context("could not open repository")?
            .write_blob(&content)
            .context("could not write blob")?
    } else {
        encode(ObjectKind::Blob, &content).hash
    };

    Ok(hash.to_string())
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();

        let hash = hash_object(dir.path(), Path::new("a.txt"), false).unwrap();
        assert_eq!(hash, "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0");
        assert!(!dir.path().join(".git").exists());
    }

    #[test]
    fn test_hash_and_write() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();

        let hash = hash_object(dir.path(), Path::new("a.txt"), true).unwrap();
        assert!(repo.objects().contains(&hash.parse().unwrap()));
    }

    #[test]
    fn test_write_requires_repository() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();
        assert!(hash_object(dir.path(), Path::new("a.txt"), true).is_err());
    }
}

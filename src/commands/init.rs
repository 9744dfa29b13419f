use std::ffi::OsStr;
use std::path::Path;

use anyhow::{Context, Result};

use crate::Constants;
use crate::repository::Repository;

/// Creates a new repository in `root`, or inside `root/folder_name` if a folder name is provided.
///
/// # Errors
///
/// This function will fail if any of the directories could not be created.
pub fn init(root: &Path, folder_name: Option<&OsStr>) -> Result<String> {
    let path = match folder_name {
        Some(name) => root.join(name),
        None => root.to_path_buf(),
    };

    if Repository::exists(&path) {
        return Ok("The directory is already a git repository".into());
    }

    Repository::init(&path).context("could not create repository directories when initializing")?;

    Ok(format!(
        "Initialized empty repository in {}",
        Constants::repository_path(&path).display()
    ))
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_in_named_folder() {
        let dir = tempfile::tempdir().unwrap();
        let message = init(dir.path(), Some(OsStr::new("project"))).unwrap();
        assert!(message.starts_with("Initialized empty repository"));
        assert!(Repository::exists(&dir.path().join("project")));
        assert!(!Repository::exists(dir.path()));
    }

    #[test]
    fn test_init_twice() {
        let dir = tempfile::tempdir().unwrap();
        init(dir.path(), None).unwrap();
        assert_eq!(
            init(dir.path(), None).unwrap(),
            "The directory is already a git repository"
        );
    }
}

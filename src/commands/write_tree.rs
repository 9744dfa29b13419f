use std::path::Path;

use anyhow::{Context, Result};

use crate::repository::Repository;
use crate::workspace;

/// Stores the working tree at `root` as blobs and trees, returning the root tree hash.
pub fn write_tree(root: &Path) -> Result<String> {
    let repo = Repository::open(root).context("could not open repository")?;
    let entries = workspace::snapshot(root).context("could not read working tree")?;
    let tree = repo
        .write_tree(&entries)
        .context("could not write tree objects")?;
    Ok(tree.to_string())
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_tree_ignores_repository_folder() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();

        let first = write_tree(dir.path()).unwrap();
        assert_eq!(first, "65829399355e5929e44741d637d52c614ac21bc3");
        // the objects written by the first run must not end up in the second tree
        assert_eq!(write_tree(dir.path()).unwrap(), first);
    }
}

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::Constants;

const COMMENT_PREFIX: &str = "#";

/// Reads the .gitignore file inside of `root`, returning a HashSet with every path listed (one per
/// line), relative to `root`.
///
/// Blank lines and lines starting with `#` are skipped. The repository folder is always ignored,
/// whether or not a .gitignore file exists.
///
/// # Errors
///
/// This function will fail if the .gitignore file exists but could not be read.
pub fn read_gitignore(root: &Path) -> Result<HashSet<PathBuf>> {
    let mut set: HashSet<PathBuf> = HashSet::new();
    set.insert(PathBuf::from(Constants::REPOSITORY_FOLDER_NAME));

    let gitignore_path = root.join(Constants::GITIGNORE_FILE_NAME);
    if !std::fs::exists(&gitignore_path).context("could not check gitignore file existence")? {
        return Ok(set);
    }

    let gitignore = File::open(&gitignore_path)
        .with_context(|| format!("could not open gitignore file {:?}", gitignore_path))?;

    for line in BufReader::new(gitignore).lines() {
        let line = line.context("could not read line from gitignore file")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }
        set.insert(clean_path(line));
    }

    Ok(set)
}

/// Normalizes a gitignore line into a path relative to the repository root.
fn clean_path(line: &str) -> PathBuf {
    let cleaned = path_clean::clean(line);
    match cleaned.strip_prefix("/") {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => cleaned,
    }
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_folder_always_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let ignored = read_gitignore(dir.path()).unwrap();
        assert!(ignored.contains(Path::new(".git")));
        assert_eq!(ignored.len(), 1);
    }

    #[test]
    fn test_read_gitignore() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".gitignore"),
            "# build output\ntarget/\n./notes.txt\n\n/docs/draft.md\n",
        )
        .unwrap();

        let ignored = read_gitignore(dir.path()).unwrap();
        assert!(ignored.contains(Path::new("target")));
        assert!(ignored.contains(Path::new("notes.txt")));
        assert!(ignored.contains(Path::new("docs/draft.md")));
        assert!(!ignored.contains(Path::new("# build output")));
        assert_eq!(ignored.len(), 4);
    }
}

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::Constants;
use crate::gitignore;

/// A file of the working tree, as it will be recorded in a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// Relative to the repository root, always separated by forward slashes.
    pub path: String,
    pub content: Vec<u8>,
    pub executable: bool,
}

/// Reads every file inside of `root`, entering subdirectories recursively, sorted by path.
///
/// Files listed in the root .gitignore and the repository folder are skipped, and so are symbolic
/// links.
///
/// # Errors
///
/// This function will fail if a directory or file could not be read, or a path is not valid UTF-8.
pub fn snapshot(root: &Path) -> Result<Vec<SnapshotEntry>> {
    let ignored = gitignore::read_gitignore(root).context("could not get ignored files")?;

    let mut paths = Vec::new();
    collect_paths(root, root, &ignored, &mut paths)
        .with_context(|| format!("could not get paths in {:?}", root))?;

    let mut entries = Vec::with_capacity(paths.len());
    for relative in paths {
        entries.push(read_entry(root, &relative)?);
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(entries)
}

/// Reads a single file, `relative` being its path inside of `root`.
///
/// # Errors
///
/// This function will fail if the file could not be read or its path is not valid UTF-8.
pub fn read_entry(root: &Path, relative: &Path) -> Result<SnapshotEntry> {
    let full_path = root.join(relative);
    let metadata = fs::metadata(&full_path)
        .with_context(|| format!("could not get metadata of {:?}", full_path))?;
    let content = fs::read(&full_path).with_context(|| format!("could not read {:?}", full_path))?;

    Ok(SnapshotEntry {
        path: repository_path(relative)?,
        content,
        executable: is_executable(&metadata),
    })
}

fn collect_paths(
    root: &Path,
    dir: &Path,
    ignored: &HashSet<PathBuf>,
    paths: &mut Vec<PathBuf>,
) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("could not read directory {:?}", dir))?;

    for direntry in entries {
        let direntry = direntry.context("could not get dir entry")?;
        let path = direntry.path();
        let relative = path
            .strip_prefix(root)
            .context("walked outside of the working tree")?
            .to_path_buf();

        if ignored.contains(&relative)
            || direntry.file_name() == Constants::REPOSITORY_FOLDER_NAME
        {
            log::debug!("skipping {:?}", relative);
            continue;
        }

        let file_type = direntry
            .file_type()
            .with_context(|| format!("could not get file type of {:?}", path))?;
        if file_type.is_dir() {
            collect_paths(root, &path, ignored, paths)?;
        } else if file_type.is_file() {
            paths.push(relative);
        } else {
            log::warn!("skipping {:?}, only regular files are recorded", relative);
        }
    }

    Ok(())
}

/// Returns `relative` divided by forward slashes.
fn repository_path(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(
                part.to_str()
                    .with_context(|| format!("path {:?} is not valid UTF-8", relative))?,
            ),
            _ => bail!("path {:?} is not relative to the working tree", relative),
        }
    }
    Ok(parts.join("/"))
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;

    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    false
}

// Tests

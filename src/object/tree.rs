use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::hashing::Hash;
use crate::store::ObjectStore;

use super::{NULL_BYTE, Object, SPACE_BYTE};

const PATH_SEPARATOR: char = '/';

/// Permission string stored in front of every tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Regular,
    Executable,
    Directory,
}

impl FileMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileMode::Regular => "100644",
            FileMode::Executable => "100755",
            FileMode::Directory => "40000",
        }
    }
}

impl Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Struct that represents a single tree entry in a tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub name: String,
    pub hash: Hash,
}

impl TreeEntry {
    /// Subtrees are ordered as if their name had a trailing slash.
    fn sort_key(&self) -> impl Iterator<Item = u8> + '_ {
        let suffix = (self.mode == FileMode::Directory).then_some(PATH_SEPARATOR as u8);
        self.name.bytes().chain(suffix)
    }

    fn cmp_canonical(&self, other: &TreeEntry) -> Ordering {
        self.sort_key().cmp(other.sort_key())
    }
}

/// Encodes the tree entries, sorted byte-wise by name, to the payload of a tree object. Every
/// entry has this format:
///
/// "`{mode} {name}\0{hash}`"
///
/// Where `hash` is the raw 20 byte digest, not its hex representation.
pub fn as_bytes(entries: &[TreeEntry]) -> Vec<u8> {
    let mut sorted: Vec<&TreeEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.cmp_canonical(b));

    let mut bytes = Vec::new();
    for e in sorted {
        bytes.extend_from_slice(e.mode.as_str().as_bytes());
        bytes.push(SPACE_BYTE);
        bytes.extend_from_slice(e.name.as_bytes());
        bytes.push(NULL_BYTE);
        bytes.extend_from_slice(e.hash.as_ref());
    }
    bytes
}

fn check_entry_name(name: &str, full_path: &str) -> Result<()> {
    if name.is_empty() || name.contains(NULL_BYTE as char) {
        return Err(Error::InvalidPath(full_path.to_owned()));
    }
    Ok(())
}

/// Writes a single tree holding one regular file entry per `(path, hex_hash)` pair and returns
/// its hash. Paths are stored as given, without splitting them into subtrees.
///
/// # Errors
///
/// Every entry is validated before anything is written, this function fails if:
/// - A hash is not a 40 character hex string.
/// - A path is empty, contains a null byte or appears more than once.
/// - The tree object could not be written.
pub fn write_flat_tree<P, H>(store: &ObjectStore, entries: &[(P, H)]) -> Result<Hash>
where
    P: AsRef<str>,
    H: AsRef<str>,
{
    let mut tree_entries: Vec<TreeEntry> = Vec::with_capacity(entries.len());
    for (path, hash) in entries {
        let path = path.as_ref();
        check_entry_name(path, path)?;
        if tree_entries.iter().any(|e| e.name == path) {
            return Err(Error::InvalidPath(path.to_owned()));
        }
        tree_entries.push(TreeEntry {
            mode: FileMode::Regular,
            name: path.to_owned(),
            hash: Hash::from_str(hash.as_ref())?,
        });
    }

    store.store(&Object::Tree {
        entries: tree_entries,
    })
}

/// Collects slash separated paths into a root tree and the subtrees below it.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    entries: Vec<TreeEntry>,
    /// Keyed by the directory name, relative to this tree.
    subtrees: BTreeMap<String, TreeBuilder>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file to the tree, creating the subtrees needed for every directory in `path`.
    ///
    /// # Errors
    ///
    /// Fails with `Error::InvalidPath` if a component of `path` is empty, `.` or `..`, or if the
    /// path was already added or conflicts with a directory (or file) of the same name.
    pub fn add(&mut self, path: &str, mode: FileMode, hash: Hash) -> Result<()> {
        for component in path.split(PATH_SEPARATOR) {
            check_entry_name(component, path)?;
            if component == "." || component == ".." {
                return Err(Error::InvalidPath(path.to_owned()));
            }
        }
        self.insert(path, path, mode, hash)
    }

    fn insert(&mut self, rest: &str, full_path: &str, mode: FileMode, hash: Hash) -> Result<()> {
        match rest.split_once(PATH_SEPARATOR) {
            Some((dir, sub_path)) => {
                if self.entries.iter().any(|e| e.name == dir) {
                    return Err(Error::InvalidPath(full_path.to_owned()));
                }
                self.subtrees
                    .entry(dir.to_owned())
                    .or_default()
                    .insert(sub_path, full_path, mode, hash)
            }
            None => {
                if self.subtrees.contains_key(rest) || self.entries.iter().any(|e| e.name == rest)
                {
                    return Err(Error::InvalidPath(full_path.to_owned()));
                }
                self.entries.push(TreeEntry {
                    mode,
                    name: rest.to_owned(),
                    hash,
                });
                Ok(())
            }
        }
    }

    /// Writes every subtree bottom-up and then this tree, returning the hash of the root tree.
    ///
    /// # Errors
    ///
    /// This function fails if any of the tree objects could not be written.
    pub fn write(mut self, store: &ObjectStore) -> Result<Hash> {
        for (name, subtree) in std::mem::take(&mut self.subtrees) {
            let hash = subtree.write(store)?;
            self.entries.push(TreeEntry {
                mode: FileMode::Directory,
                name,
                hash,
            });
        }

        store.store(&Object::Tree {
            entries: self.entries,
        })
    }
}

// Tests

use std::fs;
use std::path::Path;

use crate::Constants;
use crate::error::{Error, FsContext, Result};
use crate::hashing::Hash;
use crate::object::{Object, ObjectKind, encode};
use crate::object::commit::CommitBuilder;
use crate::object::tree::{FileMode, TreeBuilder};
use crate::store::{ObjectStore, RefStore};
use crate::workspace::SnapshotEntry;

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub hash: Hash,
    pub tree: Hash,
    pub parent: Option<Hash>,
}

impl CommitSummary {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A repository on disk: the object store and the HEAD file under `{root}/.git`.
#[derive(Debug, Clone)]
pub struct Repository {
    objects: ObjectStore,
    head: RefStore,
}

impl Repository {
    fn at(root: &Path) -> Self {
        Self {
            objects: ObjectStore::new(Constants::objects_path(root)),
            head: RefStore::new(Constants::head_path(root)),
        }
    }

    /// Returns true if `root` already contains a repository folder.
    pub fn exists(root: &Path) -> bool {
        Constants::repository_path(root).is_dir()
    }

    /// Creates the repository folder and its subdirectories inside `root`. Folders that already
    /// exist are left as they are.
    ///
    /// # Errors
    ///
    /// This function will fail if any of the directories could not be created.
    pub fn init(root: &Path) -> Result<Self> {
        for p in [
            Constants::repository_path(root),
            Constants::objects_path(root),
            Constants::refs_path(root),
        ] {
            fs::create_dir_all(&p).at_path(&p)?;
        }
        Ok(Self::at(root))
    }

    /// Opens the repository inside `root`.
    ///
    /// # Errors
    ///
    /// Fails with `Error::NotARepository` if `root` has no repository folder.
    pub fn open(root: &Path) -> Result<Self> {
        if !Repository::exists(root) {
            return Err(Error::NotARepository(root.to_path_buf()));
        }
        Ok(Self::at(root))
    }

    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    pub fn head(&self) -> &RefStore {
        &self.head
    }

    pub fn write_blob(&self, content: &[u8]) -> Result<Hash> {
        self.objects.store(&Object::Blob {
            data: content.to_vec(),
        })
    }

    /// Stores a blob for every entry and the trees holding them, returning the root tree hash.
    ///
    /// Paths are validated before any blob is written.
    ///
    /// # Errors
    ///
    /// This function will fail if a path is not valid or any object could not be written.
    pub fn write_tree(&self, entries: &[SnapshotEntry]) -> Result<Hash> {
        let mut builder = TreeBuilder::new();
        let mut blobs = Vec::with_capacity(entries.len());
        for entry in entries {
            let blob = encode(ObjectKind::Blob, &entry.content);
            let mode = if entry.executable {
                FileMode::Executable
            } else {
                FileMode::Regular
            };
            builder.add(&entry.path, mode, blob.hash)?;
            blobs.push(blob);
        }

        for blob in blobs {
            self.objects.write(&blob.hash, &blob.bytes)?;
        }
        builder.write(&self.objects)
    }

    /// Records `entries` as a new commit on top of HEAD and advances HEAD to it.
    ///
    /// Every object is written before HEAD is touched, so a failure at any point leaves HEAD on
    /// the previous commit.
    ///
    /// # Errors
    ///
    /// This function will fail if:
    /// - HEAD could not be read.
    /// - Any object could not be written.
    /// - HEAD is locked by another writer, or moved since it was read.
    pub fn commit(
        &self,
        entries: &[SnapshotEntry],
        author: &str,
        committer: &str,
        message: &str,
    ) -> Result<CommitSummary> {
        let parent = self.head.read()?;
        let tree = self.write_tree(entries)?;

        let hash = CommitBuilder::new(tree, author, message)
            .committer(committer)
            .parent(parent)
            .write(&self.objects)?;

        self.head.advance_from(parent.as_ref(), &hash)?;

        Ok(CommitSummary { hash, tree, parent })
    }
}

// Tests

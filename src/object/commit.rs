use crate::error::{Error, Result};
use crate::hashing::Hash;
use crate::store::ObjectStore;

use super::Object;

pub const TREE_STR: &str = "tree";
pub const PARENT_STR: &str = "parent";
pub const AUTHOR_STR: &str = "author";
pub const COMMITTER_STR: &str = "committer";

/// Returns the commit payload as the bytes of a string with the following format:
///
/// tree {`tree_hash`}
/// parent {`parent_hash`}
/// author {`author`}
/// committer {`committer`}
///
/// {`message`}
///
/// The parent line is left out for root commits.
pub fn as_bytes(
    tree_hash: &Hash,
    parent: Option<&Hash>,
    author: &str,
    committer: &str,
    message: &str,
) -> Vec<u8> {
    let mut file = format!("{} {}\n", TREE_STR, tree_hash);
    if let Some(parent_hash) = parent {
        file.push_str(&format!("{} {}\n", PARENT_STR, parent_hash));
    }
    file.push_str(&format!("{} {}\n", AUTHOR_STR, author));
    file.push_str(&format!("{} {}\n", COMMITTER_STR, committer));
    file.push_str(&format!("\n{}", message));

    file.into_bytes()
}

/// Assembles a commit object pointing to an already stored tree.
#[derive(Debug)]
pub struct CommitBuilder {
    tree: Hash,
    parent: Option<Hash>,
    author: String,
    committer: Option<String>,
    message: String,
}

impl CommitBuilder {
    /// `author` is the preformatted identity line (`Name <email> epoch ±HHMM`) and is used as is.
    pub fn new(tree: Hash, author: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tree,
            parent: None,
            author: author.into(),
            committer: None,
            message: message.into(),
        }
    }

    pub fn parent(mut self, parent: Option<Hash>) -> Self {
        self.parent = parent;
        self
    }

    /// Sets a committer line different from the author's.
    pub fn committer(mut self, committer: impl Into<String>) -> Self {
        self.committer = Some(committer.into());
        self
    }

    pub fn build(self) -> Object {
        let committer = self.committer.unwrap_or_else(|| self.author.clone());
        Object::Commit {
            tree: self.tree,
            parent: self.parent,
            author: self.author,
            committer,
            message: self.message,
        }
    }

    /// Writes the commit to `store`, returning its hash.
    ///
    /// # Errors
    ///
    /// This function will fail if:
    /// - The tree, or the parent when there is one, is not in the store.
    /// - The commit object could not be written.
    pub fn write(self, store: &ObjectStore) -> Result<Hash> {
        if !store.contains(&self.tree) {
            return Err(Error::MissingObject(self.tree));
        }
        if let Some(parent) = self.parent.filter(|p| !store.contains(p)) {
            return Err(Error::MissingObject(parent));
        }

        store.store(&self.build())
    }
}

// Tests

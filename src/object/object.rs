use std::borrow::Cow;

use crate::hashing::Hash;

use super::tree::TreeEntry;
use super::{NULL_BYTE, ObjectKind, SPACE_BYTE};

/// An object in its canonical form together with the hash of that form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub kind: ObjectKind,
    pub bytes: Vec<u8>,
    pub hash: Hash,
}

/// Returns the canonical encoding of a payload and its hash, following the next format:
///
/// `{kind} {payload_length}\0{payload}`
///
/// The hash is computed over exactly these bytes, before any compression takes place.
pub fn encode(kind: ObjectKind, payload: &[u8]) -> Encoded {
    let len = payload.len().to_string();
    let mut bytes = Vec::with_capacity(kind.as_str().len() + len.len() + 2 + payload.len());
    bytes.extend_from_slice(kind.as_str().as_bytes());
    bytes.push(SPACE_BYTE);
    bytes.extend_from_slice(len.as_bytes());
    bytes.push(NULL_BYTE);
    bytes.extend_from_slice(payload);

    let hash = Hash::compute(&bytes);
    Encoded { kind, bytes, hash }
}

/// Represents the different type of objects there can be: Blobs, Trees and Commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob {
        data: Vec<u8>,
    },
    Tree {
        entries: Vec<TreeEntry>,
    },
    Commit {
        tree: Hash,
        parent: Option<Hash>,
        author: String,
        committer: String,
        message: String,
    },
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Blob { .. } => ObjectKind::Blob,
            Object::Tree { .. } => ObjectKind::Tree,
            Object::Commit { .. } => ObjectKind::Commit,
        }
    }

    /// The object content without the `{kind} {len}\0` header.
    pub fn payload(&self) -> Cow<'_, [u8]> {
        match self {
            Object::Blob { data } => Cow::Borrowed(data.as_slice()),
            Object::Tree { entries } => Cow::Owned(super::tree::as_bytes(entries)),
            Object::Commit {
                tree,
                parent,
                author,
                committer,
                message,
            } => Cow::Owned(super::commit::as_bytes(
                tree,
                parent.as_ref(),
                author,
                committer,
                message,
            )),
        }
    }

    pub fn encode(&self) -> Encoded {
        encode(self.kind(), &self.payload())
    }
}

impl std::fmt::Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind().as_str())
    }
}

// Tests

use std::fmt::Display;

/// The three kinds of objects the store knows how to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    pub const BLOB_STRING: &'static str = "blob";
    pub const TREE_STRING: &'static str = "tree";
    pub const COMMIT_STRING: &'static str = "commit";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => ObjectKind::BLOB_STRING,
            Self::Tree => ObjectKind::TREE_STRING,
            Self::Commit => ObjectKind::COMMIT_STRING,
        }
    }
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::path::PathBuf;

use crate::hashing::Hash;

/// Enum intended to represent all the different error types the object and ref stores can return.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(
        "unable to lock {path:?}: the lock file already exists, another process may be committing \
         (if a previous commit crashed, remove it and try again)"
    )]
    Locked { path: PathBuf },
    #[error("filesystem operation on {path:?} failed: {source}")]
    Fs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("i/o operation error: {0:?}")]
    IO(#[from] std::io::Error),
    #[error("{0:?} is not a valid object hash")]
    InvalidHash(String),
    #[error("{0:?} is not a valid tree entry path")]
    InvalidPath(String),
    #[error("object {0} does not exist in the object store")]
    MissingObject(Hash),
    #[error("HEAD moved while committing: expected {expected}, found {found}")]
    HeadMoved { expected: String, found: String },
    #[error("HEAD contents are corrupt: {0:?}")]
    CorruptHead(String),
    #[error("identity is incomplete: {0} is not set or is not valid")]
    MissingIdentity(&'static str),
    #[error("could not format timestamp: {0}")]
    TimeFormat(#[from] time::error::Format),
    #[error("{0:?} is not a repository (or any of the parent directories)")]
    NotARepository(PathBuf),
}

impl Error {
    /// Wraps an i/o error together with the path that caused it.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Fs {
            path: path.into(),
            source,
        }
    }
}

/// Abstraction of the result type where the error is always an Error from this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Adds the failing path to an i/o result.
pub trait FsContext<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> FsContext<T> for std::io::Result<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| Error::fs(path, e))
    }
}

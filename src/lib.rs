//! Content addressed object store and commit history writer, compatible with the on-disk format of
//! git objects.

#![allow(clippy::uninlined_format_args)]

pub mod args;
pub mod commands;
mod constants;
pub mod error;
pub mod gitignore;
pub mod hashing;
pub mod identity;
pub mod object;
pub mod repository;
pub mod store;
pub mod utils;
pub mod workspace;

pub use constants::*;
pub use error::{Error, Result};

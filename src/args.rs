use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Contains the commands passed to the program
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// A list of subcommands the program can perform
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Creates a new repository
    Init {
        /// If set, creates a new folder with the given name and initializes the empty repository
        /// in that folder.
        #[arg(long = "name")]
        folder_name: Option<OsString>,
    },

    /// Records every file in the working tree as a new commit and moves HEAD to it
    Commit {
        /// Commit message, read from the first line of stdin when not given
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Prints the object hash a file would have as a blob
    HashObject {
        /// Also write the blob to the object store
        #[arg(short, long)]
        write: bool,
        /// File to hash
        file: PathBuf,
    },

    /// Stores the trees of the current working tree and prints the root tree hash
    WriteTree,
}

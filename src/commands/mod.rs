mod commit;
mod hash_object;
mod init;
mod write_tree;

use std::path::Path;

use anyhow::Result;

use commit::commit;
use hash_object::hash_object;
use init::init;
use write_tree::write_tree;

use crate::args::Command;

/// Calls the corresponding function to perform every command variant, `root` being the working
/// tree the command runs in.
///
/// # Return
///
/// The success message
///
/// # Errors
///
/// This function will fail if any of the executed commands return an error.
pub fn execute_command(command: &Command, root: &Path) -> Result<String> {
    match command {
        Command::Init { folder_name } => init(root, folder_name.as_deref()),
        Command::Commit { message } => commit(root, message.as_deref()),
        Command::HashObject { write, file } => hash_object(root, file, *write),
        Command::WriteTree => write_tree(root),
    }
}

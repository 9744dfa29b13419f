use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::identity::{self, Identity};
use crate::repository::{CommitSummary, Repository};
use crate::workspace;

/// Records the working tree at `root` as a new commit on top of HEAD.
///
/// The message is read from the first line of stdin when `message` is `None`, and the author and
/// committer come from the environment.
///
/// # Errors
///
/// This function will fail if the message is empty, the identity is incomplete, or the commit
/// could not be recorded.
pub fn commit(root: &Path, message: Option<&str>) -> Result<String> {
    let message = match message {
        Some(m) => m.to_owned(),
        None => read_message(std::io::stdin().lock()).context("could not read commit message")?,
    };

    let (author, committer) =
        Identity::from_env().context("could not determine who is committing")?;
    let at = identity::now();

    commit_as(
        root,
        &message,
        &author.line(at).context("could not format author")?,
        &committer.line(at).context("could not format committer")?,
    )
}

/// Records the working tree using already formatted identity lines.
fn commit_as(root: &Path, message: &str, author: &str, committer: &str) -> Result<String> {
    let message = normalize_message(message)?;

    let repo = Repository::open(root).context("could not open repository")?;
    let entries = workspace::snapshot(root).context("could not read working tree")?;

    let summary = repo
        .commit(&entries, author, committer, &message)
        .context("could not create commit")?;

    Ok(format_summary(&summary, &message))
}

fn read_message(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line)
}

/// Ensures the message is not blank and ends with a single newline.
fn normalize_message(message: &str) -> Result<String> {
    let trimmed = message.trim_end_matches(['\n', '\r']);
    if trimmed.trim().is_empty() {
        bail!("aborting commit due to empty commit message")
    }
    Ok(format!("{}\n", trimmed))
}

fn format_summary(summary: &CommitSummary, message: &str) -> String {
    let subject = message.lines().next().unwrap_or_default();
    let prefix = if summary.is_root() {
        format!("(root-commit) {}", summary.hash.short())
    } else {
        summary.hash.short()
    };
    format!("[{}] {}", prefix.yellow(), subject.bold())
}

// Tests

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const AUTHOR: &str = "Jane <j@x.com> 1700000000 +0000";

    #[test]
    fn test_read_message_takes_first_line() {
        let input = b"first line\nsecond line\n";
        assert_eq!(read_message(&input[..]).unwrap(), "first line\n");
    }

    #[test]
    fn test_normalize_message() {
        assert_eq!(normalize_message("first").unwrap(), "first\n");
        assert_eq!(normalize_message("first\n").unwrap(), "first\n");
        assert_eq!(normalize_message("first\r\n").unwrap(), "first\n");
        assert_eq!(normalize_message("a\n\nbody\n").unwrap(), "a\n\nbody\n");
        assert!(normalize_message("").is_err());
        assert!(normalize_message("  \n").is_err());
    }

    #[test]
    fn test_commit_as_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hello").unwrap();

        let output = commit_as(dir.path(), "first", AUTHOR, AUTHOR).unwrap();
        assert!(output.contains("root-commit"));
        assert!(output.contains("c28f787"));
        assert!(output.contains("first"));
        assert_eq!(
            repo.head().read().unwrap().unwrap().to_string(),
            "c28f787ee8fc55574b149be7b776b2eb274df002"
        );

        fs::write(dir.path().join("b.txt"), b"world").unwrap();
        let output = commit_as(dir.path(), "second\n", AUTHOR, AUTHOR).unwrap();
        assert!(!output.contains("root-commit"));
        assert_ne!(
            repo.head().read().unwrap().unwrap().to_string(),
            "c28f787ee8fc55574b149be7b776b2eb274df002"
        );
    }

    #[test]
    fn test_commit_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        assert!(commit_as(dir.path(), "first", AUTHOR, AUTHOR).is_err());
    }
}

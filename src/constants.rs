use std::path::{Path, PathBuf};

pub struct Constants;

impl Constants {
    pub const REPOSITORY_FOLDER_NAME: &'static str = ".git";
    pub const OBJECTS_FOLDER_NAME: &'static str = "objects";
    pub const REFS_FOLDER_NAME: &'static str = "refs";
    pub const HEAD_FILE_NAME: &'static str = "HEAD";
    pub const LOCK_EXTENSION: &'static str = ".lock";
    pub const GITIGNORE_FILE_NAME: &'static str = ".gitignore";

    pub const AUTHOR_NAME_VAR: &'static str = "GIT_AUTHOR_NAME";
    pub const AUTHOR_EMAIL_VAR: &'static str = "GIT_AUTHOR_EMAIL";
    pub const COMMITTER_NAME_VAR: &'static str = "GIT_COMMITTER_NAME";
    pub const COMMITTER_EMAIL_VAR: &'static str = "GIT_COMMITTER_EMAIL";

    /// The location of the .git folder inside `root`
    pub fn repository_path(root: &Path) -> PathBuf {
        root.join(Constants::REPOSITORY_FOLDER_NAME)
    }

    pub fn objects_path(root: &Path) -> PathBuf {
        Constants::repository_path(root).join(Constants::OBJECTS_FOLDER_NAME)
    }

    pub fn refs_path(root: &Path) -> PathBuf {
        Constants::repository_path(root).join(Constants::REFS_FOLDER_NAME)
    }

    pub fn head_path(root: &Path) -> PathBuf {
        Constants::repository_path(root).join(Constants::HEAD_FILE_NAME)
    }
}

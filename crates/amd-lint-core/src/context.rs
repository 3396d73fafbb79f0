//! The file a rule is currently looking at.

use std::path::{Path, PathBuf};

/// One JavaScript file as seen by a [`crate::Rule`].
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path the file was read from.
    pub path: &'a Path,
    /// Source text, used for allow directives.
    pub content: &'a str,
    /// Path relative to the project root, used in reported locations.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Describes `path` with `content`, relative to the analysis `root`.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }
}

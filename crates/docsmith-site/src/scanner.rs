//! Markdown source discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SiteError;

/// Collects Markdown sources below a root directory.
///
/// Directories are visited depth-first. Entries within a directory are
/// visited in lexical order of their names so the result does not depend on
/// the order the filesystem lists them in.
pub struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    /// Create a scanner rooted at `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// Walk the tree and return every `.md` file.
    ///
    /// # Errors
    ///
    /// Fails if any directory cannot be listed or any entry cannot be
    /// inspected. A broken source tree aborts the scan rather than yielding a
    /// partial list.
    pub fn scan(&self) -> Result<Vec<PathBuf>, SiteError> {
        let mut files = Vec::new();
        scan_directory(&self.source_dir, &mut files)?;
        Ok(files)
    }
}

/// Collect every `.md` file below `dir`.
///
/// # Errors
///
/// See [`Scanner::scan`].
pub fn collect_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    Scanner::new(dir).scan()
}

fn scan_directory(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), SiteError> {
    let read_dir_err = |source| SiteError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_dir_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_err)?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    for path in entries {
        // Follows symlinks, so a link to a directory is walked like one.
        let metadata = fs::metadata(&path).map_err(|source| SiteError::Stat {
            path: path.clone(),
            source,
        })?;

        if metadata.is_dir() {
            scan_directory(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            debug!(path = %path.display(), "collected entry");
            files.push(path);
        }
    }

    Ok(())
}

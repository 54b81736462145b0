//! Site generation errors.

use std::path::PathBuf;

use docsmith_template::TemplateError;

/// Error returned while collecting, building or rendering pages.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A directory could not be listed.
    #[error("failed to list directory {}: {source}", path.display())]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A directory entry could not be inspected.
    #[error("failed to stat {}: {source}", path.display())]
    Stat {
        /// Entry being inspected.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        /// Source file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// An output directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A rendered page could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Output file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A template failed to parse or render.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

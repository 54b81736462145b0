//! Writing rendered pages to disk.

use std::io::Write;
use std::path::Path;

use docsmith_template::TemplateSet;
use tempfile::NamedTempFile;
use tracing::info;

use crate::entry::Entry;
use crate::error::SiteError;

/// Render an entry's template against the entry and write it to `file_name`.
///
/// The page is fully rendered before anything is written, then persisted
/// through a temporary file in the destination directory. A failed render
/// leaves any previous output untouched.
///
/// # Errors
///
/// Returns [`SiteError::Template`] if rendering fails and [`SiteError::Write`]
/// if the page cannot be written.
pub fn render_entry(templates: &TemplateSet, entry: &Entry) -> Result<(), SiteError> {
    let page = templates.render(&entry.template, entry)?;
    write_page(Path::new(&entry.file_name), &page)?;
    info!(output = %entry.file_name, "rendered entry");
    Ok(())
}

/// Atomically replace `path` with `contents`.
pub(crate) fn write_page(path: &Path, contents: &str) -> Result<(), SiteError> {
    let write_err = |source| SiteError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

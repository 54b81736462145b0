//! Output file names, titles and URLs derived from source paths.
//!
//! All functions here are textual: they never touch the filesystem and
//! `dir` arguments are used as plain string prefixes, so callers pass
//! directories with a trailing separator.

use std::path::Path;

use docsmith_template::title_case;

/// Output file name for a title or command path.
///
/// Lower-cases `s`, turns spaces into underscores and appends `.md`.
///
/// ```
/// use docsmith_site::generate_file_name;
///
/// assert_eq!(generate_file_name("out/", "My Title"), "out/my_title.md");
/// ```
pub fn generate_file_name(dir: &str, s: &str) -> String {
    format!("{dir}{}.md", s.to_lowercase().replace(' ', "_"))
}

/// Human-readable title for a Markdown file name.
///
/// Underscores and hyphens become spaces, the first `.md` is dropped and every
/// word is capitalized. Lossy: the original file name cannot be recovered.
///
/// ```
/// use docsmith_site::generate_title_from_file_name;
///
/// assert_eq!(generate_title_from_file_name("my_title.md"), "My Title");
/// ```
pub fn generate_title_from_file_name(file: &str) -> String {
    let spaced = file.replace(['_', '-'], " ");
    title_case(&spaced.replacen(".md", "", 1))
}

/// Output file name for a collected source path.
///
/// Keeps only the base name of `s`, turning spaces into underscores. Unlike
/// [`generate_file_name`], the case of the name is preserved.
pub fn generate_file_name_from_glob(dir: &str, s: &str) -> String {
    let base = Path::new(s)
        .file_name()
        .map_or_else(|| s.to_owned(), |name| name.to_string_lossy().into_owned());
    format!("{dir}{}", base.replace(' ', "_"))
}

/// Published route for an output file name.
///
/// ```
/// use docsmith_site::generate_url_from_file_name;
///
/// assert_eq!(generate_url_from_file_name("./a/b.md"), "/a/b/");
/// ```
pub fn generate_url_from_file_name(s: &str) -> String {
    s.replacen("./", "/", 1).replace(".md", "/")
}

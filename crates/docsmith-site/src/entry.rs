//! Documentation entries built from Markdown sources.

use std::fs;
use std::path::Path;

use docsmith_template::TemplateSet;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::SiteError;
use crate::naming::{
    generate_file_name_from_glob, generate_title_from_file_name, generate_url_from_file_name,
};
use crate::scanner::collect_entries;

/// One documentation page: its metadata plus a handle to its parsed template.
///
/// Serialized as the context of its own page template, so every field except
/// `template` is visible to the page body. The title is exposed as `name`,
/// leaving `title` to the word-capitalizing helper.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Entry {
    /// Title derived from the source file name.
    #[serde(rename = "name")]
    pub title: String,
    /// Description shared by every page of a run.
    pub description: String,
    /// Name of the parsed page template in the [`TemplateSet`].
    #[serde(skip)]
    pub template: String,
    /// Related specification pages, attached by the caller.
    pub specifications: Vec<Entry>,
    /// Related example pages, attached by the caller.
    pub examples: Vec<Entry>,
    /// Output path.
    pub file_name: String,
    /// Command page this entry links to; empty when there is none.
    pub cmd_entry_point: String,
    /// Published route, derived from `file_name`.
    pub url: String,
    /// Prefix for generated relative links.
    pub base_url: String,
}

impl Entry {
    /// Set the command page this entry links to.
    #[must_use]
    pub fn with_cmd_entry_point(mut self, cmd_entry_point: impl Into<String>) -> Self {
        self.cmd_entry_point = cmd_entry_point.into();
        self
    }

    /// Set the prefix for generated links.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Build the entry for one source file and parse its template into `templates`.
///
/// The template is registered under the source path, so two sources that map
/// to the same output file still keep their own templates.
///
/// # Errors
///
/// Returns [`SiteError::ReadFile`] if the source cannot be read and
/// [`SiteError::Template`] if it fails to parse.
pub fn generate_entry(
    templates: &mut TemplateSet,
    file: &Path,
    render_dir: &str,
    description: &str,
) -> Result<Entry, SiteError> {
    let source_path = file.to_string_lossy();
    let file_name = generate_file_name_from_glob(render_dir, &source_path);
    let base_name = file
        .file_name()
        .map_or_else(|| source_path.to_string(), |n| n.to_string_lossy().into_owned());

    let text = fs::read_to_string(file).map_err(|source| SiteError::ReadFile {
        path: file.to_path_buf(),
        source,
    })?;
    templates.add_entry(&source_path, &text)?;

    debug!(source = %source_path, output = %file_name, "built entry");

    Ok(Entry {
        title: generate_title_from_file_name(&base_name),
        description: description.to_owned(),
        template: source_path.into_owned(),
        url: generate_url_from_file_name(&file_name),
        file_name,
        ..Entry::default()
    })
}

/// Build entries for every Markdown file below `dir`.
///
/// Creates `render_dir` when it does not exist. Stops at the first failure.
///
/// # Errors
///
/// Propagates collection, directory creation, read and parse errors.
pub fn generate_entries(
    templates: &mut TemplateSet,
    dir: &Path,
    render_dir: &str,
    description: &str,
) -> Result<Vec<Entry>, SiteError> {
    let render_path = Path::new(render_dir);
    if !render_path.as_os_str().is_empty() && !render_path.exists() {
        fs::create_dir_all(render_path).map_err(|source| SiteError::CreateDir {
            path: render_path.to_path_buf(),
            source,
        })?;
    }

    let files = collect_entries(dir)?;
    let mut entries: Vec<Entry> = Vec::with_capacity(files.len());
    for file in &files {
        let entry = generate_entry(templates, file, render_dir, description)?;
        if entries.iter().any(|e| e.file_name == entry.file_name) {
            warn!(
                source = %file.display(),
                output = %entry.file_name,
                "another entry already renders to this file; the later one wins"
            );
        }
        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsmith_template::DirectiveContext;

    fn templates() -> TemplateSet {
        TemplateSet::new(DirectiveContext::new()).unwrap()
    }

    #[test]
    fn test_generate_entry_derives_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("getting_started.md");
        fs::write(&source, "Hello").unwrap();

        let mut templates = templates();
        let entry = generate_entry(&mut templates, &source, "./site/", "My Tool").unwrap();

        assert_eq!(entry.title, "Getting Started");
        assert_eq!(entry.description, "My Tool");
        assert_eq!(entry.file_name, "./site/getting_started.md");
        assert_eq!(entry.url, "/site/getting_started/");
        assert!(entry.examples.is_empty());
        assert!(entry.specifications.is_empty());
        assert!(entry.cmd_entry_point.is_empty());
        assert!(templates.contains(&entry.template));
    }

    #[test]
    fn test_generate_entry_keeps_case_and_replaces_spaces() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("Wire Format.md");
        fs::write(&source, "").unwrap();

        let entry = generate_entry(&mut templates(), &source, "out/", "d").unwrap();
        assert_eq!(entry.file_name, "out/Wire_Format.md");
        assert_eq!(entry.title, "Wire Format");
    }

    #[test]
    fn test_generate_entry_missing_source() {
        let err = generate_entry(
            &mut templates(),
            Path::new("/nonexistent/page.md"),
            "out/",
            "d",
        )
        .unwrap_err();
        assert!(matches!(err, SiteError::ReadFile { .. }));
    }

    #[test]
    fn test_generate_entry_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("bad.md");
        fs::write(&source, "{{ unclosed").unwrap();

        let err = generate_entry(&mut templates(), &source, "out/", "d").unwrap_err();
        assert!(matches!(err, SiteError::Template(_)));
    }

    #[test]
    fn test_generate_entries_creates_render_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source_dir = temp_dir.path().join("src");
        fs::create_dir_all(source_dir.join("nested")).unwrap();
        fs::write(source_dir.join("a.md"), "A").unwrap();
        fs::write(source_dir.join("nested/b.md"), "B").unwrap();
        fs::write(source_dir.join("skip.txt"), "").unwrap();

        let render_dir = format!("{}/out/specs/", temp_dir.path().display());
        let entries =
            generate_entries(&mut templates(), &source_dir, &render_dir, "d").unwrap();

        assert!(Path::new(&render_dir).is_dir());
        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
        assert_eq!(entries[1].file_name, format!("{render_dir}b.md"));
    }

    #[test]
    fn test_generate_entries_aborts_on_first_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("a.md"), "{% if %}").unwrap();
        fs::write(temp_dir.path().join("b.md"), "fine").unwrap();
        let render_dir = format!("{}/out/", temp_dir.path().display());

        let result = generate_entries(&mut templates(), temp_dir.path(), &render_dir, "d");
        assert!(matches!(result, Err(SiteError::Template(_))));
    }

    #[test]
    fn test_entry_serializes_without_template_name() {
        let entry = Entry {
            title: "T".to_owned(),
            template: "secret/path.md".to_owned(),
            ..Entry::default()
        }
        .with_cmd_entry_point("tool")
        .with_base_url("/docs/");

        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("template").is_none());
        assert!(value.get("title").is_none());
        assert_eq!(value["name"], "T");
        assert_eq!(value["cmd_entry_point"], "tool");
        assert_eq!(value["base_url"], "/docs/");
    }
}

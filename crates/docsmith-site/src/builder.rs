//! Whole-site builds: sections of entries plus the command reference.

use std::fs;
use std::path::{Path, PathBuf};

use docsmith_template::{DirectiveContext, TemplateSet};
use tracing::{info, warn};

use crate::commands::{CommandDoc, render_command_tree};
use crate::entry::{Entry, generate_entries};
use crate::error::SiteError;
use crate::renderer::render_entry;

/// Default directory of the specifications section, relative to the source directory.
pub const DEFAULT_SPECIFICATIONS_DIR: &str = "specifications";

/// Default directory of the examples section, relative to the source directory.
pub const DEFAULT_EXAMPLES_DIR: &str = "examples";

/// Configuration for [`SiteBuilder`].
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Root directory holding the section directories.
    pub source_dir: PathBuf,
    /// Output root. Used verbatim as the prefix of every output path and URL.
    pub render_dir: String,
    /// Description shown in every page title.
    pub description: String,
    /// Prefix for generated links.
    pub base_url: String,
    /// Command page every entry links to.
    pub cmd_entry_point: String,
    /// Specifications section directory, relative to `source_dir`.
    pub specifications_dir: PathBuf,
    /// Examples section directory, relative to `source_dir`.
    pub examples_dir: PathBuf,
    /// Where directives look for their files.
    pub directives: DirectiveContext,
}

impl BuildConfig {
    /// Configuration with default sections and directive directories.
    #[must_use]
    pub fn new(
        source_dir: impl Into<PathBuf>,
        render_dir: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            render_dir: render_dir.into(),
            description: description.into(),
            base_url: String::new(),
            cmd_entry_point: String::new(),
            specifications_dir: PathBuf::from(DEFAULT_SPECIFICATIONS_DIR),
            examples_dir: PathBuf::from(DEFAULT_EXAMPLES_DIR),
            directives: DirectiveContext::new(),
        }
    }

    /// Render directory with a trailing separator, ready to prefix file names.
    fn render_prefix(&self) -> String {
        dir_prefix(&self.render_dir)
    }
}

/// Page counts of a finished build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Rendered specification pages.
    pub specifications: usize,
    /// Rendered example pages.
    pub examples: usize,
    /// Rendered command reference pages.
    pub commands: usize,
}

impl BuildReport {
    /// Total number of pages written.
    #[must_use]
    pub fn total(&self) -> usize {
        self.specifications + self.examples + self.commands
    }
}

/// Builds a documentation site from a source tree and an optional command tree.
///
/// # Example
///
/// ```no_run
/// use docsmith_site::{BuildConfig, SiteBuilder};
///
/// let config = BuildConfig::new("docs", "site/", "My Tool");
/// let report = SiteBuilder::new(config)?.build(None)?;
/// println!("{} pages", report.total());
/// # Ok::<(), docsmith_site::SiteError>(())
/// ```
#[derive(Debug)]
pub struct SiteBuilder {
    config: BuildConfig,
    templates: TemplateSet,
}

impl SiteBuilder {
    /// Create a builder.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Template`] if the built-in layouts fail to parse.
    pub fn new(config: BuildConfig) -> Result<Self, SiteError> {
        let templates = TemplateSet::new(config.directives.clone())?;
        Ok(Self { config, templates })
    }

    /// Render every section, then the command tree when one is given.
    ///
    /// Missing section directories are skipped. The build stops at the
    /// first failure; pages rendered before it stay on disk.
    ///
    /// # Errors
    ///
    /// Propagates directory, read, parse, render and write errors.
    pub fn build(&mut self, commands: Option<&CommandDoc>) -> Result<BuildReport, SiteError> {
        let render_dir = self.config.render_prefix();
        create_dir(Path::new(&render_dir))?;

        let specifications_dir = self.config.specifications_dir.clone();
        let examples_dir = self.config.examples_dir.clone();
        let specifications = self.build_section("specifications", &specifications_dir)?;
        let examples = self.build_section("examples", &examples_dir)?;

        let mut report = BuildReport {
            specifications: specifications.len(),
            examples: examples.len(),
            commands: 0,
        };

        if let Some(root) = commands {
            let entry = Entry {
                description: self.config.description.clone(),
                specifications,
                examples,
                ..Entry::default()
            }
            .with_cmd_entry_point(self.config.cmd_entry_point.clone())
            .with_base_url(self.config.base_url.clone());

            report.commands =
                render_command_tree(&self.templates, root, &entry, &render_dir)?.len();
        }

        info!(
            specifications = report.specifications,
            examples = report.examples,
            commands = report.commands,
            "build finished"
        );
        Ok(report)
    }

    /// Build and render one section into `<render_dir><name>/`.
    fn build_section(&mut self, name: &str, dir: &Path) -> Result<Vec<Entry>, SiteError> {
        let source = self.config.source_dir.join(dir);
        if !source.is_dir() {
            warn!(
                section = name,
                path = %source.display(),
                "section directory not found, skipping"
            );
            return Ok(Vec::new());
        }

        let render_dir = format!("{}{name}/", self.config.render_prefix());
        let entries = generate_entries(
            &mut self.templates,
            &source,
            &render_dir,
            &self.config.description,
        )?;

        let entries: Vec<Entry> = entries
            .into_iter()
            .map(|entry| {
                entry
                    .with_cmd_entry_point(self.config.cmd_entry_point.clone())
                    .with_base_url(self.config.base_url.clone())
            })
            .collect();

        for entry in &entries {
            render_entry(&self.templates, entry)?;
        }

        info!(section = name, pages = entries.len(), "rendered section");
        Ok(entries)
    }
}

/// Ensure a non-empty directory string ends with `/`.
fn dir_prefix(dir: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') {
        dir.to_owned()
    } else {
        format!("{dir}/")
    }
}

fn create_dir(path: &Path) -> Result<(), SiteError> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|source| SiteError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

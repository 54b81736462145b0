//! Directive context.
//!
//! Holds the fixed directories that directives read from.

use std::path::PathBuf;

/// Default directory holding source files for `insert_definition`.
pub const DEFAULT_DEFINITIONS_DIR: &str = "definitions";

/// Default directory holding fixtures for `insert_file` and `insert_bash_lines`.
pub const DEFAULT_FIXTURES_DIR: &str = "docs/tests";

/// Default fence language for extracted definitions.
pub const DEFAULT_DEFINITION_LANG: &str = "go";

/// Locations and settings shared by every directive invocation.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use docsmith_template::DirectiveContext;
///
/// let ctx = DirectiveContext::new().with_fixtures_dir("fixtures");
/// assert_eq!(ctx.resolve_fixture("run.sh"), Path::new("fixtures/run.sh"));
/// ```
#[derive(Debug, Clone)]
pub struct DirectiveContext {
    /// Directory searched by `insert_definition`.
    pub definitions_dir: PathBuf,
    /// Directory searched by `insert_file` and `insert_bash_lines`.
    pub fixtures_dir: PathBuf,
    /// Language tag used to fence extracted definitions.
    pub definition_lang: String,
}

impl Default for DirectiveContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveContext {
    /// Create a context with the default directories.
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions_dir: PathBuf::from(DEFAULT_DEFINITIONS_DIR),
            fixtures_dir: PathBuf::from(DEFAULT_FIXTURES_DIR),
            definition_lang: DEFAULT_DEFINITION_LANG.to_owned(),
        }
    }

    /// Set the definitions directory.
    #[must_use]
    pub fn with_definitions_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.definitions_dir = dir.into();
        self
    }

    /// Set the fixtures directory.
    #[must_use]
    pub fn with_fixtures_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixtures_dir = dir.into();
        self
    }

    /// Set the fence language for extracted definitions.
    #[must_use]
    pub fn with_definition_lang(mut self, lang: impl Into<String>) -> Self {
        self.definition_lang = lang.into();
        self
    }

    /// Resolve a file name against the definitions directory.
    #[must_use]
    pub fn resolve_definition(&self, file: &str) -> PathBuf {
        self.definitions_dir.join(file)
    }

    /// Resolve a file name against the fixtures directory.
    #[must_use]
    pub fn resolve_fixture(&self, file: &str) -> PathBuf {
        self.fixtures_dir.join(file)
    }

    /// Whether both directive directories exist on disk.
    #[must_use]
    pub fn dirs_exist(&self) -> bool {
        self.definitions_dir.is_dir() && self.fixtures_dir.is_dir()
    }
}

//! Configuration management for docsmith.
//!
//! Parses `docsmith.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.description`
//! - `docs.base_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub render_dir: Option<String>,
    /// Override the description shown in page titles.
    pub description: Option<String>,
    /// Override the link prefix.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docsmith.toml";

const DEFAULT_SOURCE_DIR: &str = "docs";
const DEFAULT_RENDER_DIR: &str = "site/";
const DEFAULT_SPECIFICATIONS_DIR: &str = "specifications";
const DEFAULT_EXAMPLES_DIR: &str = "examples";
const DEFAULT_DEFINITIONS_DIR: &str = "definitions";
const DEFAULT_FIXTURES_DIR: &str = "docs/tests";
const DEFAULT_DEFINITION_LANG: &str = "go";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Directive configuration (paths are relative strings from TOML).
    directives: DirectivesConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved directive configuration (set after loading).
    #[serde(skip)]
    pub directives_resolved: DirectivesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    render_dir: Option<String>,
    description: Option<String>,
    base_url: Option<String>,
    cmd_entry_point: Option<String>,
    sections: SectionsConfigRaw,
}

/// Raw section directories, relative to the source directory.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SectionsConfigRaw {
    specifications: Option<String>,
    examples: Option<String>,
}

/// Raw directive configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DirectivesConfigRaw {
    definitions_dir: Option<String>,
    fixtures_dir: Option<String>,
    definition_lang: Option<String>,
}

/// Resolved documentation configuration.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Root directory holding the sections.
    pub source_dir: PathBuf,
    /// Output root, kept as written: it also prefixes every generated URL.
    pub render_dir: String,
    /// Description shown in every page title.
    pub description: String,
    /// Prefix for generated links.
    pub base_url: String,
    /// Command page every entry links to; empty when unset.
    pub cmd_entry_point: String,
    /// Specifications section, relative to `source_dir`.
    pub specifications_dir: PathBuf,
    /// Examples section, relative to `source_dir`.
    pub examples_dir: PathBuf,
}

/// Resolved directive configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DirectivesConfig {
    /// Directory searched by `insert_definition`.
    pub definitions_dir: PathBuf,
    /// Directory searched by `insert_file` and `insert_bash_lines`.
    pub fixtures_dir: PathBuf,
    /// Fence language for extracted definitions.
    pub definition_lang: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.description`").
        field: String,
        /// Error message (e.g., "${`TOOL_NAME`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docsmith.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// CLI settings are applied after loading and path resolution, and the
    /// result is validated last, so a CLI value can fill in a field the file
    /// leaves empty.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(render_dir) = &settings.render_dir {
            self.docs_resolved.render_dir.clone_from(render_dir);
        }
        if let Some(description) = &settings.description {
            self.docs_resolved.description.clone_from(description);
        }
        if let Some(base_url) = &settings.base_url {
            self.docs_resolved.base_url.clone_from(base_url);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self::default();
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand before resolution so resolved values see the final strings
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically at the end of [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;
        require_non_empty(&docs.description, "docs.description")?;
        require_non_empty(
            &self.directives_resolved.definition_lang,
            "directives.definition_lang",
        )?;

        if same_dir(Path::new(&docs.render_dir), &docs.source_dir) {
            return Err(ConfigError::Validation(
                "docs.render_dir must differ from docs.source_dir".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref description) = self.docs.description {
            self.docs.description = Some(expand::expand_env(description, "docs.description")?);
        }
        if let Some(ref base_url) = self.docs.base_url {
            self.docs.base_url = Some(expand::expand_env(base_url, "docs.base_url")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    ///
    /// `render_dir` and the section directories are kept as written.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));
        let docs = &self.docs;

        self.docs_resolved = DocsConfig {
            source_dir: resolve(docs.source_dir.as_deref(), DEFAULT_SOURCE_DIR),
            render_dir: docs
                .render_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_RENDER_DIR.to_owned()),
            description: docs.description.clone().unwrap_or_default(),
            base_url: docs.base_url.clone().unwrap_or_default(),
            cmd_entry_point: docs.cmd_entry_point.clone().unwrap_or_default(),
            specifications_dir: PathBuf::from(
                docs.sections
                    .specifications
                    .as_deref()
                    .unwrap_or(DEFAULT_SPECIFICATIONS_DIR),
            ),
            examples_dir: PathBuf::from(
                docs.sections
                    .examples
                    .as_deref()
                    .unwrap_or(DEFAULT_EXAMPLES_DIR),
            ),
        };

        let directives = &self.directives;
        self.directives_resolved = DirectivesConfig {
            definitions_dir: resolve(
                directives.definitions_dir.as_deref(),
                DEFAULT_DEFINITIONS_DIR,
            ),
            fixtures_dir: resolve(directives.fixtures_dir.as_deref(), DEFAULT_FIXTURES_DIR),
            definition_lang: directives
                .definition_lang
                .clone()
                .unwrap_or_else(|| DEFAULT_DEFINITION_LANG.to_owned()),
        };
    }
}

/// Whether two directory paths name the same place once made absolute.
fn same_dir(a: &Path, b: &Path) -> bool {
    match (std::path::absolute(a), std::path::absolute(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    fn valid_config() -> Config {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.description = "Tool".to_owned();
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        let docs = &config.docs_resolved;
        assert_eq!(docs.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(docs.render_dir, "site/");
        assert_eq!(docs.description, "");
        assert_eq!(docs.specifications_dir, PathBuf::from("specifications"));
        assert_eq!(docs.examples_dir, PathBuf::from("examples"));

        let directives = &config.directives_resolved;
        assert_eq!(directives.definitions_dir, PathBuf::from("/test/definitions"));
        assert_eq!(directives.fixtures_dir, PathBuf::from("/test/docs/tests"));
        assert_eq!(directives.definition_lang, "go");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "documentation"
render_dir = "public/docs"
description = "My Tool"
base_url = "/docs/"
cmd_entry_point = "tool"

[docs.sections]
specifications = "specs"
examples = "howto"

[directives]
definitions_dir = "src/types"
fixtures_dir = "fixtures"
definition_lang = "golang"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        let docs = &config.docs_resolved;
        assert_eq!(docs.source_dir, PathBuf::from("/project/documentation"));
        assert_eq!(docs.render_dir, "public/docs");
        assert_eq!(docs.description, "My Tool");
        assert_eq!(docs.base_url, "/docs/");
        assert_eq!(docs.cmd_entry_point, "tool");
        assert_eq!(docs.specifications_dir, PathBuf::from("specs"));
        assert_eq!(docs.examples_dir, PathBuf::from("howto"));

        let directives = &config.directives_resolved;
        assert_eq!(
            directives.definitions_dir,
            PathBuf::from("/project/src/types")
        );
        assert_eq!(directives.fixtures_dir, PathBuf::from("/project/fixtures"));
        assert_eq!(directives.definition_lang, "golang");
    }

    #[test]
    fn test_unknown_field_type_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[docs]\nsource_dir = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[docs]\ndescription = \"${DOCSMITH_TEST_LOAD_DESC:-Fallback}\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.description, "Fallback");
        assert_eq!(config.docs_resolved.source_dir, temp_dir.path().join("docs"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/docsmith.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_missing_env_var() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("DOCSMITH_TEST_LOAD_MISSING");
        }
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[docs]\ndescription = \"x\"\nbase_url = \"${DOCSMITH_TEST_LOAD_MISSING}\"\n",
        )
        .unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "docs.base_url"));
    }

    #[test]
    fn test_cli_settings_fill_in_description() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("docs.description"));

        let settings = CliSettings {
            description: Some("From CLI".to_owned()),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.docs_resolved.description, "From CLI");
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = valid_config();
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            render_dir: Some("out".to_owned()),
            base_url: Some("/ref/".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        let docs = &config.docs_resolved;
        assert_eq!(docs.source_dir, PathBuf::from("/custom/docs"));
        assert_eq!(docs.render_dir, "out");
        assert_eq!(docs.base_url, "/ref/");
        assert_eq!(docs.description, "Tool"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = valid_config();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.docs_resolved.render_dir, "site/");
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
    }

    #[test]
    fn test_validate_default_config_with_description_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_description_empty() {
        let mut config = valid_config();
        config.docs_resolved.description = "  ".to_owned();
        assert_validation_error(&config, &["docs.description", "empty"]);
    }

    #[test]
    fn test_validate_definition_lang_empty() {
        let mut config = valid_config();
        config.directives_resolved.definition_lang = String::new();
        assert_validation_error(&config, &["definition_lang", "empty"]);
    }

    #[test]
    fn test_validate_render_dir_equals_source_dir() {
        let mut config = valid_config();
        config.docs_resolved.render_dir = "/test/docs/".to_owned();
        assert_validation_error(&config, &["render_dir", "source_dir"]);
    }
}

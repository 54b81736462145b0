//! `docsmith build` command implementation.

use std::path::PathBuf;

use clap::{Args, Command};
use docsmith_config::{CliSettings, Config};
use docsmith_site::{BuildConfig, CommandDoc, SiteBuilder};
use docsmith_template::DirectiveContext;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover docsmith.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory, also the prefix of generated URLs (overrides config).
    #[arg(short = 'o', long)]
    render_dir: Option<String>,

    /// Description shown in every page title (overrides config).
    #[arg(long, env = "DOCSMITH_DESCRIPTION")]
    description: Option<String>,

    /// Prefix for generated links (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Skip the command reference pages.
    #[arg(long)]
    no_cli_reference: bool,

    /// Enable verbose output (log every collected and rendered page).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command, documenting `cli` as the command reference.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any page fails to build.
    pub(crate) fn execute(self, cli: &Command) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            render_dir: self.render_dir,
            description: self.description,
            base_url: self.base_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;
        let directives = &config.directives_resolved;

        output.field("Source", docs.source_dir.display());
        output.field("Output", &docs.render_dir);
        if let Some(path) = &config.config_path {
            output.field("Config", path.display());
        }

        let directive_ctx = DirectiveContext::new()
            .with_definitions_dir(&directives.definitions_dir)
            .with_fixtures_dir(&directives.fixtures_dir)
            .with_definition_lang(&directives.definition_lang);
        if !directive_ctx.dirs_exist() {
            output.warning(&format!(
                "Directive directories missing ({} or {}); pages using them will fail",
                directives.definitions_dir.display(),
                directives.fixtures_dir.display()
            ));
        }

        let commands = (!self.no_cli_reference).then(|| CommandDoc::from_clap(cli));
        let cmd_entry_point = match (&commands, docs.cmd_entry_point.is_empty()) {
            (Some(root), true) => root.name.clone(),
            _ => docs.cmd_entry_point.clone(),
        };

        let build_config = BuildConfig {
            source_dir: docs.source_dir.clone(),
            render_dir: docs.render_dir.clone(),
            description: docs.description.clone(),
            base_url: docs.base_url.clone(),
            cmd_entry_point,
            specifications_dir: docs.specifications_dir.clone(),
            examples_dir: docs.examples_dir.clone(),
            directives: directive_ctx,
        };

        let report = SiteBuilder::new(build_config)?.build(commands.as_ref())?;

        output.success(&format!(
            "Built {} pages ({} specifications, {} examples, {} commands) into {}",
            report.total(),
            report.specifications,
            report.examples,
            report.commands,
            docs.render_dir
        ));
        Ok(())
    }
}

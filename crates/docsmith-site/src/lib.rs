//! Static documentation sites from Markdown sources and CLI command trees.
//!
//! A build collects the Markdown files of each section, parses them as page
//! templates, renders them under the output directory and finally renders one
//! reference page per command of a [`CommandDoc`] tree.
//!
//! ```no_run
//! use docsmith_site::{BuildConfig, CommandDoc, SiteBuilder};
//!
//! let cli = clap::Command::new("tool").subcommand(clap::Command::new("serve"));
//! let mut builder = SiteBuilder::new(BuildConfig::new("docs", "site/", "Tool"))?;
//! builder.build(Some(&CommandDoc::from_clap(&cli)))?;
//! # Ok::<(), docsmith_site::SiteError>(())
//! ```

mod builder;
mod commands;
mod entry;
mod error;
mod naming;
mod renderer;
mod scanner;

pub use builder::{
    BuildConfig, BuildReport, DEFAULT_EXAMPLES_DIR, DEFAULT_SPECIFICATIONS_DIR, SiteBuilder,
};
pub use commands::{
    CommandDoc, CommandLink, FlagDoc, flag_usages, render_command_page, render_command_tree,
};
pub use entry::{Entry, generate_entries, generate_entry};
pub use error::SiteError;
pub use naming::{
    generate_file_name, generate_file_name_from_glob, generate_title_from_file_name,
    generate_url_from_file_name,
};
pub use renderer::render_entry;
pub use scanner::{Scanner, collect_entries};

//! Template dialect for docsmith pages.
//!
//! Pages are Jinja-flavoured templates rendered with `minijinja`. On top of the
//! engine's built-ins, every template can call:
//!
//! - string helpers: `title`, `replace`, `chomp`, `handle_file`, `handle_link`
//!   (available both as functions and as filters)
//! - directives that splice external files into the page: `insert_definition`,
//!   `insert_bash_lines`, `insert_file`
//!
//! Directives read from the directories held by a [`DirectiveContext`], which
//! is passed explicitly to [`TemplateSet::new`].
//!
//! # Example
//!
//! ```
//! use docsmith_template::{DirectiveContext, TemplateSet};
//!
//! let mut templates = TemplateSet::new(DirectiveContext::new()).unwrap();
//! templates
//!     .add_raw("link", "{{ 'tool serve' | handle_file | handle_link }}")
//!     .unwrap();
//! assert_eq!(templates.render("link", ()).unwrap(), "tool_serve/");
//! ```

mod context;
mod directives;
mod error;
mod functions;
mod pages;
mod template_set;

pub use context::{
    DEFAULT_DEFINITION_LANG, DEFAULT_DEFINITIONS_DIR, DEFAULT_FIXTURES_DIR, DirectiveContext,
};
pub use directives::{insert_bash_lines, insert_definition, insert_file};
pub use error::{DirectiveError, TemplateError};
pub use functions::{chomp, handle_file, handle_link, replace_n, title_case};
pub use pages::{COMMAND_TEMPLATE_NAME, FRONT_MATTER};
pub use template_set::TemplateSet;

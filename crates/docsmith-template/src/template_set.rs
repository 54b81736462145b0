//! Parsed page templates sharing one configured environment.

use std::collections::HashMap;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use crate::context::DirectiveContext;
use crate::error::TemplateError;
use crate::pages::{COMMAND_TEMPLATE_NAME, command_page, entry_page, entry_source_offset};
use crate::{directives, functions};

/// A set of parsed templates plus the helpers and directives they may call.
///
/// Helpers and directives are registered explicitly from the
/// [`DirectiveContext`] handed to [`TemplateSet::new`]; nothing is global.
/// Templates are parsed when added, so syntax errors surface before any page
/// is rendered.
///
/// # Example
///
/// ```
/// use docsmith_template::{DirectiveContext, TemplateSet};
///
/// let mut templates = TemplateSet::new(DirectiveContext::new()).unwrap();
/// templates.add_raw("hello", "{{ 'hello world' | title }}").unwrap();
/// assert_eq!(templates.render("hello", ()).unwrap(), "Hello World");
/// ```
pub struct TemplateSet {
    env: Environment<'static>,
    /// Layout lines preceding the author's source, per entry template.
    offsets: HashMap<String, usize>,
}

impl TemplateSet {
    /// Create a template set with the helpers, directives and command page layout.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Parse`] if the built-in command layout fails to parse.
    pub fn new(ctx: DirectiveContext) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        functions::register(&mut env);
        directives::register(&mut env, &ctx);

        let mut set = Self {
            env,
            offsets: HashMap::new(),
        };
        set.add_raw(COMMAND_TEMPLATE_NAME, command_page())?;
        Ok(set)
    }

    /// Parse an entry's Markdown source, wrapped in the entry page layout.
    ///
    /// The page renders against an entry whose title is bound to `name`.
    /// Errors report lines relative to `source`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Parse`] on template syntax errors.
    pub fn add_entry(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        self.add(name.to_owned(), entry_page(source), entry_source_offset())
    }

    /// Parse a template as-is.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Parse`] on template syntax errors.
    pub fn add_raw(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), TemplateError> {
        self.add(name.into(), source.into(), 0)
    }

    fn add(&mut self, name: String, source: String, offset: usize) -> Result<(), TemplateError> {
        self.env
            .add_template_owned(name.clone(), source)
            .map_err(|err| TemplateError::Parse {
                name: name.clone(),
                offset,
                source: err,
            })?;
        if offset > 0 {
            self.offsets.insert(name, offset);
        } else {
            self.offsets.remove(&name);
        }
        Ok(())
    }

    /// Whether a template with this name has been added.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Render a template against a serializable context.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if the template is unknown, references
    /// a missing value, or a directive fails.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, TemplateError> {
        let render_err = |source| TemplateError::Render {
            name: name.to_owned(),
            offset: self.offsets.get(name).copied().unwrap_or_default(),
            source,
        };
        let template = self.env.get_template(name).map_err(render_err)?;
        template.render(ctx).map_err(render_err)
    }

    /// Render the command reference layout.
    ///
    /// # Errors
    ///
    /// See [`TemplateSet::render`].
    pub fn render_command<S: Serialize>(&self, ctx: S) -> Result<String, TemplateError> {
        self.render(COMMAND_TEMPLATE_NAME, ctx)
    }
}

impl std::fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSet").finish_non_exhaustive()
    }
}

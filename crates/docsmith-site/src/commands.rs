//! Command reference pages generated from a CLI command tree.
//!
//! The tree is described by [`CommandDoc`], which can be built from a
//! `clap::Command` with [`CommandDoc::from_clap`] or assembled by hand for
//! other CLI frameworks.

use std::path::PathBuf;

use clap::{Arg, Command};
use docsmith_template::TemplateSet;
use serde::Serialize;
use tracing::info;

use crate::entry::Entry;
use crate::error::SiteError;
use crate::naming::generate_file_name;
use crate::renderer::write_page;

/// One option of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagDoc {
    /// Single-letter form, without the dash.
    pub short: Option<char>,
    /// Long form, without the dashes.
    pub long: Option<String>,
    /// Placeholder for the value, when the option takes one.
    pub value_name: Option<String>,
    /// One-line help text.
    pub help: String,
    /// Default value, when there is one.
    pub default: Option<String>,
}

impl FlagDoc {
    fn from_arg(arg: &Arg) -> Self {
        let value_name = arg.get_action().takes_values().then(|| {
            arg.get_value_names()
                .and_then(|names| names.first())
                .map_or_else(|| arg.get_id().as_str().to_uppercase(), ToString::to_string)
        });
        let defaults: Vec<_> = arg
            .get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect();

        Self {
            short: arg.get_short(),
            long: arg.get_long().map(str::to_owned),
            value_name,
            help: arg.get_help().map(ToString::to_string).unwrap_or_default(),
            default: (!defaults.is_empty()).then(|| defaults.join(",")),
        }
    }

    /// Left column of the usage line, e.g. `-o, --output <DIR>`.
    fn usage(&self) -> String {
        let mut usage = match (self.short, &self.long) {
            (Some(short), Some(long)) => format!("-{short}, --{long}"),
            (Some(short), None) => format!("-{short}"),
            (None, Some(long)) => format!("    --{long}"),
            (None, None) => String::new(),
        };
        if let Some(value_name) = &self.value_name {
            usage.push_str(&format!(" <{value_name}>"));
        }
        usage
    }
}

/// Aligned usage block for a set of options, one option per line.
///
/// ```
/// use docsmith_site::{FlagDoc, flag_usages};
///
/// let flags = [FlagDoc {
///     short: Some('v'),
///     long: Some("verbose".to_owned()),
///     help: "Print more".to_owned(),
///     ..FlagDoc::default()
/// }];
/// assert_eq!(flag_usages(&flags), "  -v, --verbose   Print more\n");
/// ```
pub fn flag_usages(flags: &[FlagDoc]) -> String {
    let usages: Vec<String> = flags.iter().map(FlagDoc::usage).collect();
    let width = usages.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for (flag, usage) in flags.iter().zip(&usages) {
        out.push_str(&format!("  {usage:<width$}   {}", flag.help));
        if let Some(default) = &flag.default {
            out.push_str(&format!(" (default \"{default}\")"));
        }
        out.push('\n');
    }
    out
}

/// Reference to a related command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandLink {
    /// Command name.
    pub name: String,
    /// Full path from the root command.
    pub command_path: String,
    /// One-line description.
    pub short: String,
}

/// A command and its subcommands, as documented on reference pages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandDoc {
    /// Command name.
    pub name: String,
    /// Full path from the root command, space separated.
    pub command_path: String,
    /// One-line description.
    pub short: String,
    /// Long description; empty when there is none.
    pub long: String,
    /// Usage line.
    pub use_line: String,
    /// Whether the command does something when invoked on its own.
    pub runnable: bool,
    /// Options defined on this command.
    pub flags: Vec<FlagDoc>,
    /// Options inherited from ancestors.
    pub inherited_flags: Vec<FlagDoc>,
    /// Example invocations; empty when there are none.
    pub example: String,
    /// Parent command, absent for the root.
    pub parent: Option<CommandLink>,
    /// Subcommands.
    pub commands: Vec<CommandDoc>,
}

impl CommandDoc {
    /// Describe a clap command tree.
    ///
    /// Hidden commands and arguments are skipped. Arguments marked global are
    /// listed as own options on the command defining them and as inherited
    /// options on every descendant. The text after the help (`after_help`) is
    /// used as the example block.
    pub fn from_clap(cmd: &Command) -> Self {
        Self::from_clap_in(cmd, None, &[])
    }

    fn from_clap_in(cmd: &Command, parent: Option<CommandLink>, inherited: &[FlagDoc]) -> Self {
        let name = cmd.get_name().to_owned();
        let command_path = match &parent {
            Some(parent) => format!("{} {name}", parent.command_path),
            None => name.clone(),
        };

        let mut flags = Vec::new();
        let mut globals = Vec::new();
        let mut positionals = Vec::new();
        for arg in cmd.get_arguments().filter(|a| !a.is_hide_set()) {
            if arg.is_positional() {
                positionals.push(positional_usage(arg));
                continue;
            }
            let flag = FlagDoc::from_arg(arg);
            if inherited.contains(&flag) {
                continue;
            }
            if arg.is_global_set() {
                globals.push(flag.clone());
            }
            flags.push(flag);
        }

        let mut use_line = command_path.clone();
        for positional in &positionals {
            use_line.push(' ');
            use_line.push_str(positional);
        }
        if !flags.is_empty() || !inherited.is_empty() {
            use_line.push_str(" [flags]");
        }

        let short = cmd.get_about().map(ToString::to_string).unwrap_or_default();
        let link = CommandLink {
            name: name.clone(),
            command_path: command_path.clone(),
            short: short.clone(),
        };
        let mut child_inherited = inherited.to_vec();
        child_inherited.extend(globals);

        let commands = cmd
            .get_subcommands()
            .filter(|c| !c.is_hide_set())
            .map(|c| Self::from_clap_in(c, Some(link.clone()), &child_inherited))
            .collect();

        Self {
            name,
            command_path,
            short,
            long: cmd
                .get_long_about()
                .map(ToString::to_string)
                .unwrap_or_default(),
            use_line,
            runnable: !cmd.is_subcommand_required_set(),
            flags,
            inherited_flags: inherited.to_vec(),
            example: cmd
                .get_after_help()
                .map(ToString::to_string)
                .unwrap_or_default(),
            parent,
            commands,
        }
    }

    /// Visit this command and all descendants, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a CommandDoc)) {
        visit(self);
        for child in &self.commands {
            child.walk(visit);
        }
    }

    fn link(&self) -> CommandLink {
        CommandLink {
            name: self.name.clone(),
            command_path: self.command_path.clone(),
            short: self.short.clone(),
        }
    }
}

fn positional_usage(arg: &Arg) -> String {
    let name = arg
        .get_value_names()
        .and_then(|names| names.first())
        .map_or_else(|| arg.get_id().as_str().to_uppercase(), ToString::to_string);
    if arg.is_required_set() {
        format!("<{name}>")
    } else {
        format!("[{name}]")
    }
}

/// The command as seen by the page template.
#[derive(Serialize)]
struct CommandView<'a> {
    name: &'a str,
    command_path: &'a str,
    short: &'a str,
    long: &'a str,
    use_line: &'a str,
    runnable: bool,
    flags: &'a [FlagDoc],
    inherited_flags: &'a [FlagDoc],
    flag_usages: String,
    inherited_flag_usages: String,
    example: &'a str,
    parent: Option<&'a CommandLink>,
    commands: Vec<CommandLink>,
}

impl<'a> From<&'a CommandDoc> for CommandView<'a> {
    fn from(cmd: &'a CommandDoc) -> Self {
        Self {
            name: &cmd.name,
            command_path: &cmd.command_path,
            short: &cmd.short,
            long: &cmd.long,
            use_line: &cmd.use_line,
            runnable: cmd.runnable,
            flags: &cmd.flags,
            inherited_flags: &cmd.inherited_flags,
            flag_usages: flag_usages(&cmd.flags),
            inherited_flag_usages: flag_usages(&cmd.inherited_flags),
            example: &cmd.example,
            parent: cmd.parent.as_ref(),
            commands: cmd.commands.iter().map(CommandDoc::link).collect(),
        }
    }
}

#[derive(Serialize)]
struct CommandPageContext<'a> {
    description: &'a str,
    command: CommandView<'a>,
    entry: &'a Entry,
}

/// Render the reference page for a single command.
///
/// `entry` supplies the description, the link prefix and the example and
/// specification pages listed at the bottom.
///
/// # Errors
///
/// Returns [`SiteError::Template`] if rendering fails.
pub fn render_command_page(
    templates: &TemplateSet,
    command: &CommandDoc,
    entry: &Entry,
) -> Result<String, SiteError> {
    let ctx = CommandPageContext {
        description: &entry.description,
        command: CommandView::from(command),
        entry,
    };
    Ok(templates.render_command(ctx)?)
}

/// Render a page for every command in the tree into `render_dir`.
///
/// Pages are named after the command path (`tool serve` becomes
/// `tool_serve.md`). Returns the written paths in visiting order.
///
/// # Errors
///
/// Stops at the first render or write failure.
pub fn render_command_tree(
    templates: &TemplateSet,
    root: &CommandDoc,
    entry: &Entry,
    render_dir: &str,
) -> Result<Vec<PathBuf>, SiteError> {
    let mut commands = Vec::new();
    root.walk(&mut |cmd| commands.push(cmd));

    let mut written = Vec::with_capacity(commands.len());
    for command in commands {
        let page = render_command_page(templates, command, entry)?;
        let path = PathBuf::from(generate_file_name(render_dir, &command.command_path));
        write_page(&path, &page)?;
        info!(command = %command.command_path, output = %path.display(), "rendered command page");
        written.push(path);
    }

    Ok(written)
}

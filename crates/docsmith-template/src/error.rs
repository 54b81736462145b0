//! Template and directive error types.

use std::path::PathBuf;

/// Error raised by a directive while splicing external content.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    /// The referenced file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File the directive tried to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A line range was neither `N` nor `N-M`.
    #[error("invalid line range '{0}': expected \"start\" or \"start-stop\"")]
    LineRange(String),
    /// The definition pattern did not compile.
    #[error("invalid definition pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl From<DirectiveError> for minijinja::Error {
    fn from(err: DirectiveError) -> Self {
        Self::new(minijinja::ErrorKind::InvalidOperation, err.to_string()).with_source(err)
    }
}

/// Error raised while parsing or rendering a template.
///
/// Entry pages carry a layout header above the author's source, so the
/// engine's line numbers are shifted by `offset`. [`TemplateError::source_line`]
/// undoes that shift.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The template source failed to parse.
    #[error("failed to parse template '{name}'{}: {source}", at_line(.source, .offset))]
    Parse {
        /// Template name.
        name: String,
        /// Template lines preceding the author's source.
        offset: usize,
        /// Underlying template engine error.
        source: minijinja::Error,
    },
    /// Rendering failed, including failures raised by directives.
    #[error("failed to render template '{name}'{}: {source}", at_line(.source, .offset))]
    Render {
        /// Template name.
        name: String,
        /// Template lines preceding the author's source.
        offset: usize,
        /// Underlying template engine error.
        source: minijinja::Error,
    },
}

impl TemplateError {
    /// Line of the failure within the author's source, if the engine reported
    /// one inside it.
    #[must_use]
    pub fn source_line(&self) -> Option<usize> {
        let (Self::Parse { offset, source, .. } | Self::Render { offset, source, .. }) = self;
        source_line(source, *offset)
    }
}

fn source_line(source: &minijinja::Error, offset: usize) -> Option<usize> {
    source
        .line()
        .and_then(|line| line.checked_sub(offset))
        .filter(|line| *line > 0)
}

fn at_line(source: &minijinja::Error, offset: &usize) -> String {
    match source_line(source, *offset) {
        Some(line) if *offset > 0 => format!(" at source line {line}"),
        _ => String::new(),
    }
}

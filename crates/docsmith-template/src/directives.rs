//! Directives that splice external files into rendered pages.
//!
//! Directives run while a page renders. Any failure aborts the render: a
//! directive pointing at a missing file or carrying a malformed argument is a
//! broken build input, never something to paper over.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use minijinja::Environment;
use regex::RegexBuilder;

use crate::context::DirectiveContext;
use crate::error::DirectiveError;

/// Extract a struct definition from a file in the definitions directory.
///
/// Matches `type <name> struct {` at the start of a line up to the first `}`
/// that also starts a line, and fences the match with the context's
/// definition language. When nothing matches the fence is empty.
///
/// This is a textual heuristic: the definition must start in column 0 and
/// end with a closing brace alone in column 0. A nested brace at column 0
/// inside the definition ends the match early.
pub fn insert_definition(
    ctx: &DirectiveContext,
    file: &str,
    struct_name: &str,
) -> Result<String, DirectiveError> {
    let path = ctx.resolve_definition(file);
    let text = read(&path)?;

    let pattern = format!(r"^type {} struct \{{.*?^\}}", regex::escape(struct_name));
    let finder = RegexBuilder::new(&pattern)
        .multi_line(true)
        .dot_matches_new_line(true)
        .build()?;
    let found = finder.find(&text).map_or("", |m| m.as_str());

    Ok(format!("```{}\n{found}\n```", ctx.definition_lang))
}

/// Extract an inclusive, 1-indexed line range from a fixture file.
///
/// `range` is either `"N"` or `"N-M"`. Lines past the end of the file are
/// simply absent, so a range beyond the file yields an empty fence. A final
/// line without a terminating newline counts as end of file.
pub fn insert_bash_lines(
    ctx: &DirectiveContext,
    file: &str,
    range: &str,
) -> Result<String, DirectiveError> {
    let path = ctx.resolve_fixture(file);
    let (start, stop) = parse_line_range(range)?;

    let handle = File::open(&path).map_err(|source| DirectiveError::Read {
        path: path.clone(),
        source,
    })?;
    let mut reader = BufReader::new(handle);

    let mut lines = String::new();
    let mut buf = Vec::new();
    for number in 1.. {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| DirectiveError::Read {
                path: path.clone(),
                source,
            })?;
        if read == 0 || buf.last() != Some(&b'\n') {
            break;
        }
        if (start..=stop).contains(&number) {
            lines.push_str(&String::from_utf8_lossy(&buf));
        }
        if number >= stop {
            break;
        }
    }

    Ok(format!("```bash\n{lines}```"))
}

/// Fence a whole fixture file, tagging it with a language from its extension.
pub fn insert_file(ctx: &DirectiveContext, file: &str) -> Result<String, DirectiveError> {
    let path = ctx.resolve_fixture(file);
    let lang = fence_language(&path);

    let mut text = read(&path)?;
    if !text.ends_with('\n') {
        text.push('\n');
    }

    Ok(format!("```{lang}\n{text}```"))
}

/// Parse `"N"` or `"N-M"` into an inclusive range.
///
/// Whitespace anywhere in the range is rejected.
fn parse_line_range(range: &str) -> Result<(usize, usize), DirectiveError> {
    let invalid = || DirectiveError::LineRange(range.to_owned());
    let parse = |s: &str| s.parse::<usize>().map_err(|_| invalid());

    match range.split_once('-') {
        Some((start, stop)) => Ok((parse(start)?, parse(stop)?)),
        None => {
            let line = parse(range)?;
            Ok((line, line))
        }
    }
}

/// Map a file extension to a fence language.
fn fence_language(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some("sol") => "javascript".to_owned(),
        Some("yml") => "yaml".to_owned(),
        Some(ext) => ext.to_owned(),
        None => String::new(),
    }
}

fn read(path: &Path) -> Result<String, DirectiveError> {
    fs::read_to_string(path).map_err(|source| DirectiveError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Register the directives on `env`, each bound to its own copy of `ctx`.
pub(crate) fn register(env: &mut Environment<'static>, ctx: &DirectiveContext) {
    let definition_ctx = ctx.clone();
    env.add_function(
        "insert_definition",
        move |file: String, struct_name: String| -> Result<String, minijinja::Error> {
            Ok(insert_definition(&definition_ctx, &file, &struct_name)?)
        },
    );

    let lines_ctx = ctx.clone();
    env.add_function(
        "insert_bash_lines",
        move |file: String, range: String| -> Result<String, minijinja::Error> {
            Ok(insert_bash_lines(&lines_ctx, &file, &range)?)
        },
    );

    let file_ctx = ctx.clone();
    env.add_function(
        "insert_file",
        move |file: String| -> Result<String, minijinja::Error> {
            Ok(insert_file(&file_ctx, &file)?)
        },
    );
}

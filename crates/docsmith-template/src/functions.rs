//! String helpers exposed to page templates.
//!
//! Each helper is a plain function so the naming utilities in `docsmith-site`
//! can share it; [`register`] binds them onto a template environment both as
//! functions and as filters.

use minijinja::Environment;

/// Upper-case the first letter of every word, leaving the rest untouched.
///
/// A word starts after whitespace or ASCII punctuation. Underscores, letters
/// and digits do not break words, so `my_title` becomes `My_title` while
/// `hello-world` becomes `Hello-World`.
///
/// # Example
///
/// ```
/// use docsmith_template::title_case;
///
/// assert_eq!(title_case("my title"), "My Title");
/// assert_eq!(title_case("hello-world"), "Hello-World");
/// ```
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_separator = true;
    for c in s.chars() {
        if prev_is_separator {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_separator = is_separator(c);
    }
    out
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}

/// Replace `old` with `new` at most `count` times; a negative count replaces all.
#[must_use]
pub fn replace_n(s: &str, old: &str, new: &str, count: i64) -> String {
    match usize::try_from(count) {
        Ok(n) => s.replacen(old, new, n),
        Err(_) => s.replace(old, new),
    }
}

/// Trim leading and trailing whitespace.
#[must_use]
pub fn chomp(s: &str) -> String {
    s.trim().to_owned()
}

/// Build a sibling page file name from a title or command path.
///
/// `handle_file("my cmd", None)` is `my_cmd.md`; a non-empty second part is
/// joined with a space first, so `handle_file("tool", Some("build"))` is
/// `tool_build.md`.
#[must_use]
pub fn handle_file(s1: &str, s2: Option<&str>) -> String {
    let joined = match s2 {
        Some(s2) if !s2.is_empty() => format!("{s1} {s2}.md"),
        _ => format!("{s1}.md"),
    };
    joined.replace(' ', "_")
}

/// Turn a `.md` file reference into its directory-style URL.
#[must_use]
pub fn handle_link(s: &str) -> String {
    s.replace(".md", "/")
}

/// Register the string helpers as both functions and filters.
pub(crate) fn register(env: &mut Environment<'static>) {
    env.add_function("title", |s: String| title_case(&s));
    env.add_filter("title", |s: String| title_case(&s));

    env.add_function(
        "replace",
        |s: String, old: String, new: String, count: Option<i64>| {
            replace_n(&s, &old, &new, count.unwrap_or(-1))
        },
    );
    env.add_filter(
        "replace",
        |s: String, old: String, new: String, count: Option<i64>| {
            replace_n(&s, &old, &new, count.unwrap_or(-1))
        },
    );

    env.add_function("chomp", |s: String| chomp(&s));
    env.add_filter("chomp", |s: String| chomp(&s));

    env.add_function("handle_file", |s1: String, s2: Option<String>| {
        handle_file(&s1, s2.as_deref())
    });
    env.add_filter("handle_file", |s1: String, s2: Option<String>| {
        handle_file(&s1, s2.as_deref())
    });

    env.add_function("handle_link", |s: String| handle_link(&s));
    env.add_filter("handle_link", |s: String| handle_link(&s));
}

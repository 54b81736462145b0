//! Fixed page layouts.
//!
//! Every rendered page starts with the same front matter. Entry pages wrap the
//! author's Markdown between that header and a footer of cross-links; command
//! pages use a fixed layout driven entirely by the command tree.

/// Front matter prepended to every page.
///
/// Expects `description` and `name` to be in scope. Entry pages bind their
/// title to `name` so the `title` helper stays callable from page sources.
pub const FRONT_MATTER: &str = r#"---

layout: single
type: docs
title: "Documentation | {{ description }} | {{ name }}"

---"#;

const ENTRY_FOOTER: &str = r"

## Commands

* [{{ cmd_entry_point }}]({{ base_url }}{{ cmd_entry_point | handle_file | handle_link }})

{% if examples %}# Examples
{% for example in examples %}
* [{{ example.name | title }}]({{ example.url }})
{%- endfor %}
{% endif %}

{% if specifications %}# Specifications
{% for spec in specifications %}
* [{{ spec.name | title }}]({{ spec.url }})
{%- endfor %}
{% endif %}
";

/// Name of the command page template inside a template set.
pub const COMMAND_TEMPLATE_NAME: &str = "docsmith/command.md";

/// Body of a command reference page, following the front matter.
///
/// Rendered against `{ description, command, entry }`.
const COMMAND_BODY: &str = r#"

# {{ name }}

{{ command.short | title }}

{% if command.runnable %}## Usage

```bash
{{ command.use_line }}
```{% endif %}

{% if command.long != "" %}## Synopsis

{{ command.long }}
{% endif %}
{% if command.flags %}## Options

```bash
  {{ command.flag_usages | chomp }}
```{% endif %}
{% if command.inherited_flags %}## Options inherited from parent commands

```bash
  {{ command.inherited_flag_usages | chomp }}
```{% endif %}

{% if command.commands %}# Subcommands
{% for sub in command.commands %}
* [{{ name }} {{ sub.name }}]({{ entry.base_url }}{{ name | handle_file(sub.name) | handle_link }}) - {{ sub.short }}
{%- endfor %}
{% endif %}

{% if command.parent %}## See Also

* [{{ command.parent.command_path }}]({{ entry.base_url }}{{ command.parent.command_path | handle_file | handle_link }}) - {{ command.parent.short }}
{% endif %}

{% if command.example != "" %}# Quick Tips

```bash
{{ command.example }}
```{% endif %}

{% if entry.examples %}# Examples
{% for example in entry.examples %}
* [{{ example.name | title }}]({{ example.url }})
{%- endfor %}
{% endif %}

{% if entry.specifications %}# Specifications
{% for spec in entry.specifications %}
* [{{ spec.name | title }}]({{ spec.url }})
{%- endfor %}
{% endif %}
"#;

/// The complete command reference page template.
#[must_use]
pub fn command_page() -> String {
    format!("{{%- set name = command.command_path -%}}{FRONT_MATTER}{COMMAND_BODY}")
}

/// Separator between the front matter and an entry's source.
const ENTRY_SEPARATOR: &str = "\n\n";

/// Number of template lines preceding an entry's source in [`entry_page`].
#[must_use]
pub fn entry_source_offset() -> usize {
    FRONT_MATTER.matches('\n').count() + ENTRY_SEPARATOR.matches('\n').count()
}

/// Wrap an entry's Markdown source into a complete page template.
///
/// Rendered against an entry whose title is bound to `name`.
#[must_use]
pub fn entry_page(source: &str) -> String {
    let mut page = String::with_capacity(
        FRONT_MATTER.len() + ENTRY_SEPARATOR.len() + source.len() + ENTRY_FOOTER.len(),
    );
    page.push_str(FRONT_MATTER);
    page.push_str(ENTRY_SEPARATOR);
    page.push_str(source);
    page.push_str(ENTRY_FOOTER);
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_page_embeds_source() {
        let page = entry_page("# Hello\n\n{{ insert_file('a.yml') }}");
        assert!(page.starts_with("---\n\nlayout: single"));
        assert!(page.contains("# Hello\n\n{{ insert_file('a.yml') }}"));
        assert!(page.contains("## Commands"));
    }

    #[test]
    fn test_entry_source_offset_matches_layout() {
        let page = entry_page("SOURCE");
        let line = page.lines().position(|l| l == "SOURCE").unwrap();
        assert_eq!(entry_source_offset(), line);
        assert_eq!(entry_source_offset(), 8);
    }

    #[test]
    fn test_command_page_starts_with_front_matter() {
        let page = command_page();
        assert!(page.starts_with("{%- set name = command.command_path -%}---\n\nlayout: single"));
        assert!(page.contains("# Subcommands"));
    }
}

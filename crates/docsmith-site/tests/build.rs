//! End-to-end build of a small documentation tree.

use std::fs;
use std::path::Path;

use clap::{Arg, ArgAction, Command};
use docsmith_site::{BuildConfig, CommandDoc, SiteBuilder};
use docsmith_template::DirectiveContext;
use pretty_assertions::assert_eq;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn cli() -> Command {
    Command::new("tool")
        .about("manage things")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print more"),
        )
        .subcommand(
            Command::new("serve")
                .about("start the server")
                .after_help("tool serve --port 8080")
                .arg(
                    Arg::new("port")
                        .long("port")
                        .value_name("PORT")
                        .help("Port to bind"),
                ),
        )
}

#[test]
fn builds_sections_and_command_reference() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();

    write(
        &root.join("definitions/types.go"),
        "package types\n\ntype Server struct {\n Port int\n}\n",
    );
    write(&root.join("fixtures/run.sh"), "#!/bin/sh\ntool serve\necho done\n");
    write(&root.join("fixtures/config.yml"), "port: 8080");
    write(
        &root.join("docs/specifications/server_config.md"),
        "# Server\n\n{{ insert_definition('types.go', 'Server') }}\n\n{{ insert_file('config.yml') }}",
    );
    write(
        &root.join("docs/examples/quick-start.md"),
        "{{ insert_bash_lines('run.sh', '2') }}\n\nSee {{ 'tool serve' | handle_file | handle_link }}.",
    );

    let mut config = BuildConfig::new(root.join("docs"), format!("{}/site", root.display()), "Tool");
    config.cmd_entry_point = "tool".to_owned();
    config.base_url = "/docs/".to_owned();
    config.directives = DirectiveContext::new()
        .with_definitions_dir(root.join("definitions"))
        .with_fixtures_dir(root.join("fixtures"));

    let report = SiteBuilder::new(config)
        .unwrap()
        .build(Some(&CommandDoc::from_clap(&cli())))
        .unwrap();
    assert_eq!(report.total(), 4);

    let spec = fs::read_to_string(root.join("site/specifications/server_config.md")).unwrap();
    assert_eq!(
        spec,
        "---\n\nlayout: single\ntype: docs\ntitle: \"Documentation | Tool | Server Config\"\n\n---\n\n\
         # Server\n\n```go\ntype Server struct {\n Port int\n}\n```\n\n```yaml\nport: 8080\n```\n\n\
         ## Commands\n\n* [tool](/docs/tool/)\n\n\n\n\n"
    );

    let example = fs::read_to_string(root.join("site/examples/quick-start.md")).unwrap();
    assert!(example.contains("title: \"Documentation | Tool | Quick Start\""));
    assert!(example.contains("```bash\ntool serve\n```\n\nSee tool_serve/."));

    let tool = fs::read_to_string(root.join("site/tool.md")).unwrap();
    let site = format!("{}/site", root.display());
    assert!(tool.contains("title: \"Documentation | Tool | tool\""));
    assert!(tool.contains("* [tool serve](/docs/tool_serve/) - start the server"));
    assert!(tool.contains(&format!(
        "# Examples\n\n* [Quick Start]({site}/examples/quick-start/)\n"
    )));
    assert!(tool.contains(&format!(
        "# Specifications\n\n* [Server Config]({site}/specifications/server_config/)\n"
    )));

    let serve = fs::read_to_string(root.join("site/tool_serve.md")).unwrap();
    assert!(serve.contains("## Usage\n\n```bash\ntool serve [flags]\n```"));
    assert!(serve.contains("## Options\n\n```bash\n  --port <PORT>   Port to bind\n```"));
    assert!(serve.contains("## See Also\n\n* [tool](/docs/tool/) - manage things"));
    assert!(serve.contains("# Quick Tips\n\n```bash\ntool serve --port 8080\n```"));
}

#[test]
fn missing_fixture_aborts_build() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write(
        &root.join("docs/examples/broken.md"),
        "{{ insert_bash_lines('missing.sh', '1-2') }}",
    );

    let mut config = BuildConfig::new(root.join("docs"), format!("{}/site", root.display()), "Tool");
    config.directives = DirectiveContext::new().with_fixtures_dir(root.join("fixtures"));

    let err = SiteBuilder::new(config).unwrap().build(None).unwrap_err();
    assert!(err.to_string().contains("broken.md"));
}

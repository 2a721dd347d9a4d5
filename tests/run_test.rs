use std::collections::HashMap;
use std::fs;

use envp::config::{Config, OutputTarget};
use envp::env::EnvAccessor;
use envp::error::Error;
use envp::{render, run};
use tempfile::TempDir;

fn config(input: &std::path::Path, glob: bool, output: OutputTarget) -> Config {
    Config { input: input.to_path_buf(), glob, output, debug: false }
}

fn no_vars() -> EnvAccessor {
    EnvAccessor::new(HashMap::<String, String>::new())
}

#[test]
fn test_single_file_hello_world() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("hello.gohtml");
    fs::write(&file, "Hello World").unwrap();

    let rendered = render(&config(&file, false, OutputTarget::Stdout), no_vars()).unwrap();
    assert_eq!(rendered, "Hello World");
}

#[test]
fn test_single_file_is_root_even_with_other_name() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("app.conf.gohtml");
    fs::write(&file, "{{ templateExists('app.conf.gohtml') }}").unwrap();

    let rendered = render(&config(&file, false, OutputTarget::Stdout), no_vars()).unwrap();
    assert_eq!(rendered, "true");
}

#[test]
fn test_directory_uses_base_and_partials() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("base.gohtml"),
        "upstream {\n{{ indentedTemplate('servers.gohtml', 2) }}\n}\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("servers.gohtml"),
        "\n        server {{ env('backend') }};\n        server backup;\n",
    )
    .unwrap();

    let vars: HashMap<String, String> =
        [("BACKEND".to_string(), "app:8080".to_string())].into_iter().collect();
    let rendered = render(
        &config(temp_dir.path(), true, OutputTarget::Stdout),
        EnvAccessor::new(vars),
    )
    .unwrap();

    assert_eq!(rendered, "upstream {\n  server app:8080;\n  server backup;\n}\n");
}

#[test]
fn test_directory_falls_back_to_first_name() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("b.gohtml"), "b").unwrap();
    fs::write(temp_dir.path().join("a.gohtml"), "a").unwrap();

    let rendered =
        render(&config(temp_dir.path(), true, OutputTarget::Stdout), no_vars()).unwrap();
    assert_eq!(rendered, "a");
}

#[test]
fn test_parse_error_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("broken.gohtml");
    fs::write(&file, "{% for %}").unwrap();

    let result = render(&config(&file, false, OutputTarget::Stdout), no_vars());
    assert!(matches!(result, Err(Error::MinijinjaError(_))));
}

#[test]
fn test_run_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("hello.gohtml");
    fs::write(&file, "Hello World").unwrap();
    let output = temp_dir.path().join("out/hello.conf");

    run(&config(&file, false, OutputTarget::File(output.clone()))).unwrap();

    assert_eq!(fs::read_to_string(output).unwrap(), "Hello World");
}

#[test]
fn test_run_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.conf");

    let result = run(&config(
        &temp_dir.path().join("missing.gohtml"),
        false,
        OutputTarget::File(output.clone()),
    ));

    assert!(matches!(result, Err(Error::TemplateDoesNotExist { .. })));
    assert!(!output.exists());
}

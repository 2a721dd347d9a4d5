use envp::cli::{long_flags, Args};
use envp::config::{Config, OutputTarget};
use envp::error::Error;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("envp")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["--file", "./templates/app.gohtml", "--output", "./app.conf"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.file, PathBuf::from("./templates/app.gohtml"));
    assert_eq!(parsed.output, Some(PathBuf::from("./app.conf")));
    assert!(!parsed.glob);
    assert!(!parsed.stdout);
    assert!(!parsed.debug);
}

#[test]
fn test_all_flags() {
    let args = make_args(&["--file", "./templates", "--glob", "--stdout", "--debug"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.glob);
    assert!(parsed.stdout);
    assert!(parsed.debug);
    assert_eq!(parsed.output, None);
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-f", "./templates", "-g", "-s", "-d", "-o", "out"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.glob);
    assert!(parsed.stdout);
    assert!(parsed.debug);
    assert_eq!(parsed.output, Some(PathBuf::from("out")));
}

#[test]
fn test_single_dash_long_flags() {
    let args = long_flags(["envp", "-file", "x.gohtml", "-stdout"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.file, PathBuf::from("x.gohtml"));
    assert!(parsed.stdout);
    assert!(!parsed.glob);

    let args = ["envp", "-file=./templates", "-glob", "-output", "out", "-debug"];
    let parsed = Args::try_parse_from(long_flags(args)).unwrap();

    assert_eq!(parsed.file, PathBuf::from("./templates"));
    assert!(parsed.glob);
    assert!(parsed.debug);
    assert_eq!(parsed.output, Some(PathBuf::from("out")));
}

#[test]
fn test_long_flags_leaves_other_args() {
    let rewritten = long_flags(["envp", "-f", "-stdout", "--debug", "-sd", "--", "-file"]);

    assert_eq!(
        rewritten,
        make_args(&["-f", "--stdout", "--debug", "-sd", "--", "-file"])
    );
}

#[test]
fn test_missing_file() {
    let args = make_args(&["--stdout"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_unknown_arg() {
    let args = make_args(&["--file", "a", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_config_stdout_wins() {
    let args = make_args(&["-f", "a.gohtml", "-o", "out.conf", "-s", "-d"]);
    let config = Config::from_args(&Args::try_parse_from(args).unwrap()).unwrap();

    assert_eq!(config.output, OutputTarget::Stdout);
    assert!(config.input.is_absolute());
    assert!(config.pad_output());
}

#[test]
fn test_config_output_file() {
    let args = make_args(&["-f", "a.gohtml", "-o", "/tmp/out.conf", "-d"]);
    let config = Config::from_args(&Args::try_parse_from(args).unwrap()).unwrap();

    assert_eq!(config.output, OutputTarget::File(PathBuf::from("/tmp/out.conf")));
    assert!(!config.pad_output());
}

#[test]
fn test_config_needs_a_destination() {
    let args = make_args(&["-f", "a.gohtml"]);
    let result = Config::from_args(&Args::try_parse_from(args).unwrap());

    assert!(matches!(result, Err(Error::ConfigError(_))));
}

//! Command-line interface implementation for envp.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that are also accepted with a single dash, as in `-file x -stdout`.
const SINGLE_DASH_FLAGS: [&str; 5] = ["file", "glob", "output", "stdout", "debug"];

/// Command-line arguments structure for envp.
#[derive(Parser, Debug)]
#[command(
    name = "envp",
    author,
    version,
    about = "envp: build your configuration files from templates and the environment",
    long_about = "Build your configuration files with helpers, and access to the current \
                  env, so that you can shim configuration files in a Docker image when \
                  they do not support such mechanisms."
)]
pub struct Args {
    /// The template file, or a directory of *.gohtml templates
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,

    /// Treat --file as a directory and use every *.gohtml inside it
    #[arg(short, long)]
    pub glob: bool,

    /// The file to write to
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of --output
    #[arg(short, long)]
    pub stdout: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

/// Rewrites single-dash long flags such as `-file x` or `-output=x` to their
/// `--` form, so clap does not read them as bundled short flags.
///
/// Arguments after `--` are left alone.
pub fn long_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            let Some(rest) = text.strip_prefix('-').filter(|rest| !rest.starts_with('-')) else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if SINGLE_DASH_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse_from(long_flags(std::env::args_os())) {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

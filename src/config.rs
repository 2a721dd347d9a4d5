//! Run configuration for envp.
//! Turns parsed command line arguments into one explicit value that is built
//! at startup and handed to every step of the run.

use crate::cli::Args;
use crate::error::{Error, Result};
use crate::loader::absolute_path;
use std::path::PathBuf;

/// Destination of the rendered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Everything a run needs to know, resolved from the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Template file or directory, made absolute
    pub input: PathBuf,
    /// Whether `input` must be globbed as a directory
    pub glob: bool,
    pub output: OutputTarget,
    /// Debug logging, plus blank-line padding in stdout mode
    pub debug: bool,
}

impl Config {
    /// Builds the configuration from parsed arguments.
    ///
    /// `--stdout` wins over `--output`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if neither `--output` nor `--stdout` is given
    pub fn from_args(args: &Args) -> Result<Self> {
        let output = match (&args.output, args.stdout) {
            (_, true) => OutputTarget::Stdout,
            (Some(path), false) => OutputTarget::File(absolute_path(path)),
            (None, false) => {
                return Err(Error::ConfigError(
                    "nowhere to write, pass --output or --stdout".to_string(),
                ))
            }
        };

        Ok(Self {
            input: absolute_path(&args.file),
            glob: args.glob,
            output,
            debug: args.debug,
        })
    }

    /// Whether the debug padding goes ahead of the output.
    pub fn pad_output(&self) -> bool {
        self.debug && self.output == OutputTarget::Stdout
    }
}

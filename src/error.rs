//! Error handling for envp.
//! Defines the error type and result alias used throughout the application.

use std::io;
use thiserror::Error;

/// Errors that can stop an envp run.
///
/// Everything outside of [`crate::normalize`] and [`crate::env`] is fallible and
/// reports through this type. Only `main` turns it into a process exit.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading a template or writing the output failed
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Template parsing or rendering failed
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// The template glob could not be compiled
    #[error("Glob error: {0}.")]
    GlobError(#[from] globset::Error),

    #[error("Template path '{path}' does not exist.")]
    TemplateDoesNotExist { path: String },

    #[error("Template path '{path}' is not a directory, cannot glob it.")]
    NotADirectory { path: String },

    #[error("No templates matching '{pattern}' found in '{dir}'.")]
    NoTemplatesFound { dir: String, pattern: String },

    /// An explicitly requested template was never registered
    #[error("Unable to find template '{name}'.")]
    TemplateNotFound { name: String },

    #[error("No template found to use as the root.")]
    NoRootTemplate,

    /// The flag set can not produce a run
    #[error("Configuration error: {0}.")]
    ConfigError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}

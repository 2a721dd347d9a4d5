//! envp builds configuration files from templates and the environment.
//! It loads one or more templates, gives them helpers for environment
//! access and whitespace cleanup, renders a root template and writes the
//! result to a file or stdout.

/// Command-line interface module for the envp application
pub mod cli;

/// Run configuration built from the command line
pub mod config;

/// Common constants used throughout envp
pub mod constants;

/// Environment variable access for templates
pub mod env;

/// Error types and handling for the envp application
pub mod error;

/// Helper functions registered into the template engine
pub mod helpers;

/// Reading template files from a file or directory
pub mod loader;

/// Logger setup
pub mod logger;

/// Whitespace and indentation normalization of rendered text
pub mod normalize;

/// Output sink for the rendered result
pub mod output;

/// Template registry, root selection and rendering
pub mod template;

use crate::config::Config;
use crate::env::EnvAccessor;
use crate::error::Result;
use crate::loader::load_templates;
use crate::output::{write_output, OutputSink};
use crate::template::TemplateRegistry;

/// Renders the templates named by `config` into a string.
///
/// # Flow
/// 1. Loads the template file, or every `*.gohtml` in the directory
/// 2. Parses them into a registry with the helpers registered
/// 3. Uses the single template when only one was loaded
/// 4. Executes the root template
pub fn render(config: &Config, accessor: EnvAccessor) -> Result<String> {
    let sources = load_templates(&config.input, config.glob)?;
    let mut registry = TemplateRegistry::new(accessor);
    registry.parse_all(&sources)?;

    if let [source] = sources.as_slice() {
        registry.use_template(source.name.as_str());
    }

    registry.execute()
}

/// Renders the templates named by `config` and writes the result.
pub fn run(config: &Config) -> Result<()> {
    let rendered = render(config, EnvAccessor::from_process())?;

    let mut sink = OutputSink::open(&config.output)?;
    let written = write_output(&mut sink, &rendered, config.pad_output());
    let closed = sink.close();
    written?;
    closed
}

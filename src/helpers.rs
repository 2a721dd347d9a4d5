//! Helper functions exposed to template source.
//!
//! Registered once on every [`Environment`] created by
//! [`crate::template::TemplateRegistry`] and never changed afterwards.
//!
//! | Function | Result |
//! |----------|--------|
//! | `env(name)` | value of the upper-cased variable, or `""` |
//! | `envExists(name)` | whether the variable is set |
//! | `boolEnv(name)`, `bool_env(name)` | the variable read as a boolean |
//! | `trim(s[, chars])`, `chomp(s[, chars])` | `s` without surrounding whitespace (or `chars`) |
//! | `split(s, sep)` | list of the parts of `s` |
//! | `strip(text)`, `trimEmpty(text)`, `trimEdges(text)` | see [`crate::normalize`] |
//! | `reindent(text)`, `fixIndentation(text)` | `text` moved to column zero |
//! | `indent(text, width)` | `text` moved to column `width` |
//! | `addSpace(text, n)`, `space(text, n)` | trimmed `text` after `n` spaces |
//! | `templateString(name)` | the named template rendered to a string |
//! | `strippedTemplate(name)`, `trimmedTemplate(name)` | rendered and stripped |
//! | `indentedTemplate(name[, width])` | rendered, stripped and reindented |
//! | `fixIndentedTemplate(name)` | rendered and reindented |
//! | `templateWithNewline(name)` | `fixIndentedTemplate` after a newline, unless empty |
//! | `indentedTemplateWithNewline(name, width)` | `indentedTemplate` after a newline, unless empty |
//! | `templateExists(name)` | whether the template is registered |
//! | `random_password(size)` | `size` random ASCII letters and digits |
//!
//! `strip`, `trimEmpty`, `trimEdges`, `reindent` and `addSpace` are filters
//! too. `indent` is left to the builtin filter of the same name.

use std::cell::Cell;

use log::debug;
use minijinja::{context, Environment, Error, ErrorKind, State};
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::constants::MAX_TEMPLATE_DEPTH;
use crate::env::EnvAccessor;
use crate::normalize;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Counts one level of template-in-template rendering for as long as it lives.
///
/// Every capture renders in a fresh MiniJinja state, so the engine's own
/// recursion limit never sees the chain.
struct DepthGuard;

impl DepthGuard {
    fn enter(name: &str) -> Result<Self, Error> {
        DEPTH.with(|depth| {
            if depth.get() >= MAX_TEMPLATE_DEPTH {
                return Err(Error::new(
                    ErrorKind::InvalidOperation,
                    format!(
                        "template '{name}' is nested more than {MAX_TEMPLATE_DEPTH} levels deep"
                    ),
                ));
            }
            depth.set(depth.get() + 1);
            Ok(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

fn template_string(state: &State, name: &str) -> Result<String, Error> {
    let _guard = DepthGuard::enter(name)?;
    state.env().get_template(name)?.render(context! {})
}

fn stripped_template(state: &State, name: &str) -> Result<String, Error> {
    template_string(state, name).map(|out| normalize::strip(&out))
}

fn indented_template(
    state: &State,
    name: &str,
    width: Option<usize>,
) -> Result<String, Error> {
    let stripped = stripped_template(state, name)?;
    Ok(match width {
        Some(width) => normalize::indent(&stripped, width),
        None => normalize::reindent(&stripped),
    })
}

fn fix_indented_template(state: &State, name: &str) -> Result<String, Error> {
    template_string(state, name).map(|out| normalize::reindent(&out))
}

fn with_newline(out: String) -> String {
    if out.is_empty() {
        out
    } else {
        format!("\n{out}")
    }
}

fn template_with_newline(state: &State, name: &str) -> Result<String, Error> {
    fix_indented_template(state, name).map(with_newline)
}

fn indented_template_with_newline(
    state: &State,
    name: &str,
    width: usize,
) -> Result<String, Error> {
    indented_template(state, name, Some(width)).map(with_newline)
}

fn template_exists(state: &State, name: &str) -> bool {
    debug!("Looking for template '{}'.", name);
    state.env().get_template(name).is_ok()
}

/// Draws from the thread-local generator, which is a CSPRNG seeded by the OS.
fn random_password(size: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .map(char::from)
        .collect()
}

fn trim(value: &str, chars: Option<&str>) -> String {
    match chars {
        Some(chars) => value.trim_matches(|c: char| chars.contains(c)).to_string(),
        None => value.trim().to_string(),
    }
}

fn split(value: &str, sep: &str) -> Vec<String> {
    value.split(sep).map(str::to_string).collect()
}

/// Registers every helper function and filter on `environment`.
///
/// # Arguments
/// * `environment` - The MiniJinja environment to register on
/// * `accessor` - Environment variable access shared by the `env*` helpers
pub fn register_helpers(environment: &mut Environment<'static>, accessor: EnvAccessor) {
    debug!("Registering template helpers.");

    let vars = accessor.clone();
    environment.add_function("env", move |name: String| vars.get(&name));
    let vars = accessor.clone();
    environment.add_function("envExists", move |name: String| vars.exists(&name));
    for name in ["boolEnv", "bool_env"] {
        let vars = accessor.clone();
        environment.add_function(name, move |key: String| vars.get_bool(&key));
    }

    environment.add_function("trim", trim);
    environment.add_function("chomp", trim);
    environment.add_function("split", split);

    environment.add_function("strip", normalize::strip);
    environment.add_function("trimEmpty", normalize::trim_empty);
    environment.add_function("trimEdges", normalize::trim_edges);
    environment.add_function("reindent", normalize::reindent);
    environment.add_function("fixIndentation", normalize::reindent);
    environment.add_function("indent", normalize::indent);
    environment.add_function("addSpace", normalize::add_space);
    environment.add_function("space", normalize::add_space);

    environment.add_function("templateString", template_string);
    environment.add_function("strippedTemplate", stripped_template);
    environment.add_function("trimmedTemplate", stripped_template);
    environment.add_function("indentedTemplate", indented_template);
    environment.add_function("fixIndentedTemplate", fix_indented_template);
    environment.add_function("templateWithNewline", template_with_newline);
    environment.add_function("indentedTemplateWithNewline", indented_template_with_newline);
    environment.add_function("templateExists", template_exists);
    environment.add_function("random_password", random_password);

    environment.add_filter("strip", normalize::strip);
    environment.add_filter("trimEmpty", normalize::trim_empty);
    environment.add_filter("trimEdges", normalize::trim_edges);
    environment.add_filter("reindent", normalize::reindent);
    environment.add_filter("addSpace", normalize::add_space);
}

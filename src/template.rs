//! Template registry and rendering.
//! Wraps a MiniJinja environment holding every loaded template, with the
//! helper functions registered, and decides which template is the root.

use indexmap::IndexSet;
use log::{debug, warn};
use std::fmt::Write;

use minijinja::value::{Value, ValueKind};
use minijinja::{
    context, escape_formatter, AutoEscape, Environment, ErrorKind, Output, State, Template,
};

use crate::constants::ROOT_TEMPLATES;
use crate::env::EnvAccessor;
use crate::error::{Error, Result};
use crate::helpers::register_helpers;
use crate::loader::TemplateSource;

/// Writes booleans as `true`/`false` so they are valid in TOML, JSON and YAML.
fn format_value(
    out: &mut Output,
    state: &State,
    value: &Value,
) -> std::result::Result<(), minijinja::Error> {
    if value.kind() != ValueKind::Bool {
        return escape_formatter(out, state, value);
    }
    let text = if value.is_true() { "true" } else { "false" };
    out.write_str(text)
        .map_err(|_| minijinja::Error::new(ErrorKind::WriteFailure, "could not write boolean"))
}

/// Named templates plus the environment they render in.
pub struct TemplateRegistry {
    /// MiniJinja environment instance
    env: Environment<'static>,
    /// Template names in the order they were registered
    names: IndexSet<String>,
    /// Root requested through [`TemplateRegistry::use_template`]
    selected: Option<String>,
}

impl TemplateRegistry {
    /// Creates an empty registry whose helpers read variables through `accessor`.
    pub fn new(accessor: EnvAccessor) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_formatter(format_value);
        register_helpers(&mut env, accessor);
        Self { env, names: IndexSet::new(), selected: None }
    }

    /// Compiles `source` and registers it as `name`.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the source does not parse
    pub fn add_template<N, S>(&mut self, name: N, source: S) -> Result<()>
    where
        N: Into<String>,
        S: Into<String>,
    {
        let name = name.into();
        debug!("Parsing template '{}'.", name);
        self.env.add_template_owned(name.clone(), source.into())?;
        self.names.insert(name);
        Ok(())
    }

    /// Registers a loaded file under its base file name.
    pub fn parse(&mut self, source: &TemplateSource) -> Result<()> {
        self.add_template(source.name.as_str(), source.content.as_str())
    }

    /// Registers every source, stopping at the first parse error.
    pub fn parse_all(&mut self, sources: &[TemplateSource]) -> Result<()> {
        sources.iter().try_for_each(|source| self.parse(source))
    }

    /// Looks up a template by name, `None` when it was never registered.
    pub fn lookup(&self, name: &str) -> Option<Template<'_, '_>> {
        self.env.get_template(name).ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Registered template names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Renders the named template against an empty context.
    pub fn render(&self, name: &str) -> Result<String> {
        let template = self
            .lookup(name)
            .ok_or_else(|| Error::TemplateNotFound { name: name.to_string() })?;
        Ok(template.render(context! {})?)
    }

    /// Requests `name` as the root template for [`TemplateRegistry::execute`].
    pub fn use_template<S: Into<String>>(&mut self, name: S) {
        self.selected = Some(name.into());
    }

    /// Picks the template to execute.
    ///
    /// # Flow
    /// 1. The name given to `use_template`, which must exist
    /// 2. The first registered of `base.gohtml`, `root.gohtml`
    /// 3. The first template in registration order
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the requested template is missing
    /// * `Error::NoRootTemplate` if nothing is registered
    pub fn select_root(&self) -> Result<String> {
        if let Some(name) = &self.selected {
            debug!("Using requested template '{}'.", name);
            if !self.contains(name) {
                return Err(Error::TemplateNotFound { name: name.clone() });
            }
            return Ok(name.clone());
        }

        if let Some(name) = ROOT_TEMPLATES.iter().find(|name| self.contains(name)) {
            debug!("Using conventional root '{}'.", name);
            return Ok(name.to_string());
        }

        let first = self.names.first().ok_or(Error::NoRootTemplate)?;
        if self.names.len() > 1 {
            warn!(
                "No {} found, falling back to the first template '{}'.",
                ROOT_TEMPLATES.join(" or "),
                first
            );
        }
        Ok(first.clone())
    }

    /// Renders the root template.
    pub fn execute(&self) -> Result<String> {
        let root = self.select_root()?;
        debug!("Executing '{}'.", root);
        self.render(&root)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        TemplateRegistry::new(EnvAccessor::from_process())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn registry() -> TemplateRegistry {
        TemplateRegistry::new(EnvAccessor::new(HashMap::<String, String>::new()))
    }

    #[test]
    fn test_names_keep_registration_order() {
        let mut registry = registry();
        registry.add_template("b.gohtml", "b").unwrap();
        registry.add_template("a.gohtml", "a").unwrap();
        registry.add_template("b.gohtml", "b2").unwrap();

        assert_eq!(registry.names().collect::<Vec<_>>(), ["b.gohtml", "a.gohtml"]);
        assert_eq!(registry.render("b.gohtml").unwrap(), "b2");
    }

    #[test]
    fn test_booleans_render_lowercase() {
        let mut registry = registry();
        registry
            .add_template("t", "{{ true }} {{ 1 == 2 }} {{ [true] | first }} {{ 'True' }}")
            .unwrap();

        assert_eq!(registry.render("t").unwrap(), "true false true True");
    }

    #[test]
    fn test_empty_registry_has_no_root() {
        assert!(matches!(registry().select_root(), Err(Error::NoRootTemplate)));
    }
}

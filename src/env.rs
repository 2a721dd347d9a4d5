//! Environment variable access for templates.
//!
//! Names are upper-cased before every lookup so templates can write
//! `env("home")`. The environment itself is never modified.

use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

/// A source of environment variables.
pub trait EnvSource: Send + Sync {
    /// Returns the value of `key`, or `None` when it is not set.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Reads variables from the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Parses a boolean the way `strconv.ParseBool` style flags are written.
///
/// Accepts `1 t T true TRUE True` and `0 f F false FALSE False`; anything
/// else is `None`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Case-insensitive, never failing access to an [`EnvSource`].
#[derive(Clone)]
pub struct EnvAccessor {
    source: Arc<dyn EnvSource>,
}

impl EnvAccessor {
    pub fn new<S: EnvSource + 'static>(source: S) -> Self {
        Self { source: Arc::new(source) }
    }

    /// An accessor over the variables of the running process.
    pub fn from_process() -> Self {
        Self::new(ProcessEnv)
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.source.lookup(&name.to_uppercase())
    }

    /// True when the variable is set, even if it is set to `""`.
    pub fn exists(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// The raw value, or `""` when the variable is unset.
    pub fn get(&self, name: &str) -> String {
        self.lookup(name).unwrap_or_default()
    }

    /// The value read as a boolean. Unset, empty and unparseable values are
    /// all `false`.
    pub fn get_bool(&self, name: &str) -> bool {
        let value = self.get(name);
        if value.is_empty() {
            return false;
        }
        parse_bool(&value).unwrap_or_else(|| {
            warn!("{} is not a boolean: '{}'", name.to_uppercase(), value);
            false
        })
    }
}

impl Default for EnvAccessor {
    fn default() -> Self {
        EnvAccessor::from_process()
    }
}

impl std::fmt::Debug for EnvAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvAccessor").finish_non_exhaustive()
    }
}

//! Template loading for envp.
//! Resolves the `--file` argument to the template files it names and reads
//! them into memory.
use crate::constants::TEMPLATE_GLOB;
use crate::error::{Error, Result};
use globset::Glob;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A template file read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Base file name, used as the template name
    pub name: String,
    /// Absolute path the content was read from
    pub path: PathBuf,
    pub content: String,
}

impl TemplateSource {
    /// Reads `path`, naming the template after its base file name.
    ///
    /// # Errors
    /// * `Error::IoError` if the file can not be read
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening a reader to '{}'.", path.display());
        let content = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self { name, path: path.to_path_buf(), content })
    }
}

/// Makes `path` absolute against the current directory.
pub fn absolute_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    }
}

/// Lists the `*.gohtml` files directly inside `dir`, sorted by file name.
///
/// # Errors
/// * `Error::NoTemplatesFound` if nothing matches
pub fn glob_templates<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    debug!("Looking for {} in '{}'.", TEMPLATE_GLOB, dir.display());
    let matcher = Glob::new(TEMPLATE_GLOB)?.compile_matcher();

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        if entry.file_type().is_file() && matcher.is_match(entry.file_name()) {
            paths.push(entry.into_path());
        }
    }

    if paths.is_empty() {
        return Err(Error::NoTemplatesFound {
            dir: dir.display().to_string(),
            pattern: TEMPLATE_GLOB.to_string(),
        });
    }
    Ok(paths)
}

/// Resolves the `--file` argument to the template files to read.
///
/// A directory is always globbed. With `glob` set the path must be one.
///
/// # Errors
/// * `Error::TemplateDoesNotExist` if the path is missing
/// * `Error::NotADirectory` if `glob` is set on a file
pub fn resolve_inputs<P: AsRef<Path>>(path: P, glob: bool) -> Result<Vec<PathBuf>> {
    let path = absolute_path(path);
    if !path.exists() {
        return Err(Error::TemplateDoesNotExist { path: path.display().to_string() });
    }

    match (path.is_dir(), glob) {
        (true, _) => glob_templates(&path),
        (false, true) => Err(Error::NotADirectory { path: path.display().to_string() }),
        (false, false) => Ok(vec![path]),
    }
}

/// Reads every template named by the `--file` argument.
pub fn load_templates<P: AsRef<Path>>(path: P, glob: bool) -> Result<Vec<TemplateSource>> {
    resolve_inputs(path, glob)?.iter().map(TemplateSource::read).collect()
}

//! Output sink for the rendered template.
use crate::config::OutputTarget;
use crate::error::Result;
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;

/// Blank lines printed ahead of stdout output in debug mode, to separate it
/// from the log lines.
const DEBUG_PADDING: &str = "\n\n\n\n\n\n";

/// Where the rendered text goes.
#[derive(Debug)]
pub enum OutputSink {
    Stdout(Stdout),
    File { path: PathBuf, writer: BufWriter<File> },
}

impl OutputSink {
    /// Opens the sink for `target`, creating parent directories of a file.
    ///
    /// # Errors
    /// * `Error::IoError` if the directory or the file can not be created
    pub fn open(target: &OutputTarget) -> Result<Self> {
        match target {
            OutputTarget::Stdout => {
                debug!("Using stdout.");
                Ok(Self::Stdout(io::stdout()))
            }
            OutputTarget::File(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                debug!("Opening a writer to '{}'.", path.display());
                let file = File::create(path)?;
                Ok(Self::File { path: path.clone(), writer: BufWriter::new(file) })
            }
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, Self::Stdout(_))
    }

    /// Flushes and releases the sink. Stdout is flushed but stays open.
    pub fn close(mut self) -> Result<()> {
        self.flush()?;
        if let Self::File { path, writer } = self {
            debug!("Closing '{}'.", path.display());
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        }
        Ok(())
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(stdout) => stdout.write(buf),
            Self::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(stdout) => stdout.flush(),
            Self::File { writer, .. } => writer.flush(),
        }
    }
}

/// Writes `content` unchanged, optionally preceded by debug padding.
///
/// # Returns
/// * `Result<usize>` - Number of bytes of `content` written
pub fn write_output<W: Write>(writer: &mut W, content: &str, padding: bool) -> Result<usize> {
    if padding {
        writer.write_all(DEBUG_PADDING.as_bytes())?;
    }
    writer.write_all(content.as_bytes())?;
    Ok(content.len())
}

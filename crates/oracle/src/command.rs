//! External command plumbing: prechecks, verifiers and the
//! command-backed transform.
//!
//! Candidates are materialized into per-invocation temp files, so the
//! original artifact on disk is never touched. Commands are run to
//! completion with no timeout; an operator-imposed ceiling (e.g.
//! `timeout(1)`) is recommended for oracles that can hang.

use crate::{Applied, Error, Result, Transform, TransformError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;
use tracing::debug;

fn materialize(text: &str) -> Result<NamedTempFile> {
    let file = NamedTempFile::new().map_err(Error::Materialize)?;
    fs::write(file.path(), text).map_err(Error::Materialize)?;
    Ok(file)
}

/// An external check program, invoked with the candidate's materialized
/// file path as its only argument and judged by exit code (0 = pass).
#[derive(Debug, Clone)]
pub struct ExternalCheck {
    program: PathBuf,
}

impl ExternalCheck {
    /// Wraps a check program path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs the check against `text`. Spawn failure is fatal; a nonzero
    /// exit is just a failed check.
    pub fn run(&self, text: &str) -> Result<bool> {
        let file = materialize(text)?;
        let status = Command::new(&self.program)
            .arg(file.path())
            .stdin(Stdio::null())
            .status()
            .map_err(|source| Error::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;
        debug!(program = %self.program.display(), ?status, "external check finished");
        Ok(status.success())
    }
}

/// [`Transform`] backed by an external program.
///
/// The candidate is written to a temp file; the program is invoked as
/// `program <file> [rule...]` and is expected to rewrite the file in
/// place. A nonzero exit becomes a [`TransformError`] carrying the exit
/// status and stderr so it can be matched against an expected-error
/// pattern. Reading the file back and comparing decides
/// [`Applied::Unchanged`].
pub struct CommandTransform {
    program: PathBuf,
    name: String,
}

impl CommandTransform {
    /// Wraps a transform program path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.display().to_string());
        Self { program, name }
    }

    /// The wrapped program path.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Transform for CommandTransform {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, text: &str, rules: &[String]) -> std::result::Result<Applied, TransformError> {
        let file = materialize(text)
            .map_err(|e| TransformError::new(format!("cannot materialize candidate: {e}")))?;
        let output = Command::new(&self.program)
            .arg(file.path())
            .args(rules)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                TransformError::new(format!("cannot run '{}': {e}", self.program.display()))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TransformError::new(format!(
                "'{}' failed with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        let transformed = fs::read_to_string(file.path())
            .map_err(|e| TransformError::new(format!("cannot read back candidate: {e}")))?;
        if transformed == text {
            Ok(Applied::Unchanged)
        } else {
            Ok(Applied::Changed(transformed))
        }
    }
}

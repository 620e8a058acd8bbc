pub mod types;

pub use types::{DiagnosticsDump, ScanSummary};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("{} not found. Run Biome diagnostics first.", .0.display())]
    Missing(PathBuf),

    #[error("Failed to read diagnostics file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse diagnostics JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read and deserialize a diagnostics dump from disk.
///
/// A file that does not exist is reported as `InputError::Missing`; any
/// other I/O failure (permissions, a directory in its place) as `InputError::Read`.
#[instrument]
pub fn load(path: &Path) -> Result<DiagnosticsDump, InputError> {
    let contents = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => InputError::Missing(path.to_path_buf()),
        _ => InputError::Read(err),
    })?;
    debug!(bytes = contents.len(), "read diagnostics file");
    parse(&contents)
}

/// Deserialize a diagnostics dump from an in-memory JSON document.
pub fn parse(json: &str) -> Result<DiagnosticsDump, InputError> {
    let dump: DiagnosticsDump = serde_json::from_str(json)?;
    debug!(diagnostics = dump.diagnostics.len(), "parsed diagnostics dump");
    Ok(dump)
}

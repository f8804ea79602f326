pub mod format;
pub mod lister;
pub mod rewrite;

pub use format::{format_bytes, BinaryPrefix, FormattedField, PrefixTable};
pub use lister::{ps_argument, ProcessLister, PsCommand};
pub use rewrite::{ColumnLocator, ColumnPositions, LineRewriter, RewriteConfig, SubstitutionMode};

use std::process::ExitStatus;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum HrpsError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    ListerFailed { program: String, status: ExitStatus },

    #[error("Listing ended before a complete header line")]
    MissingHeader,

    #[error("Column {0} not found in header")]
    MissingColumn(String),

    #[error("Line {line} has {fields} fields, {column} expected at position {position}")]
    ShortLine {
        line: usize,
        column: String,
        position: usize,
        fields: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HrpsError>;

/// Captures a listing from `lister` for `args` and rewrites its size columns.
/// Nothing is returned unless the whole listing was rewritten.
pub fn run<S: AsRef<str>>(
    lister: &dyn ProcessLister,
    args: &[S],
    config: RewriteConfig,
) -> Result<String> {
    let argument = ps_argument(args);
    let raw = lister.capture(&argument)?;
    let text = String::from_utf8_lossy(&raw);

    debug!(
        "Rewriting {} bytes with {} substitution",
        text.len(),
        config.substitution
    );
    LineRewriter::new(config).rewrite(&text)
}

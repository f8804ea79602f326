use crate::{HrpsError, Result};
use std::process::{Command, Stdio};
use tracing::debug;

/// Source of a raw process listing.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessLister {
    /// Runs the listing with a single argument and returns its stdout.
    fn capture(&self, argument: &str) -> Result<Vec<u8>>;
}

/// Builds the listing argument: the `u` flag followed by every user
/// argument joined with no separator, so `["a", "x"]` becomes `uax`.
pub fn ps_argument<S: AsRef<str>>(args: &[S]) -> String {
    let mut argument = String::from("u");
    for arg in args {
        argument.push_str(arg.as_ref());
    }
    argument
}

/// Runs an external `ps`-compatible program.
#[derive(Debug, Clone)]
pub struct PsCommand {
    program: String,
}

impl PsCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for PsCommand {
    fn default() -> Self {
        Self::new("ps")
    }
}

impl ProcessLister for PsCommand {
    fn capture(&self, argument: &str) -> Result<Vec<u8>> {
        debug!("Running {} {}", self.program, argument);

        let output = Command::new(&self.program)
            .arg(argument)
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| HrpsError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(HrpsError::ListerFailed {
                program: self.program.clone(),
                status: output.status,
            });
        }

        debug!("Captured {} bytes from {}", output.stdout.len(), self.program);
        Ok(output.stdout)
    }
}

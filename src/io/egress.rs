//! Result egress - writes the simulation result
//!
//! The result JSON goes either to stdout or to a file. A file is replaced
//! on every run; missing parent directories are created.

use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::output::OutputData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EgressTarget {
    Stdout,
    File(PathBuf),
}

/// Egress writer for simulation results
pub struct Egress {
    target: EgressTarget,
    pretty: bool,
}

impl Egress {
    pub fn new(target: EgressTarget, pretty: bool) -> Self {
        Self { target, pretty }
    }

    pub fn target(&self) -> &EgressTarget {
        &self.target
    }

    /// Serialize and write the result
    pub fn write_output(&self, output: &OutputData) -> anyhow::Result<()> {
        let json = output.to_json(self.pretty).context("Failed to serialize simulation output")?;

        match &self.target {
            EgressTarget::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "{}", json).context("Failed to write output to stdout")?;
                debug!(bytes = %json.len(), "output_written_stdout");
            }
            EgressTarget::File(path) => {
                Self::write_file(path, &json)
                    .with_context(|| format!("Failed to write output file {}", path.display()))?;
                info!(file = %path.display(), bytes = %json.len(), "output_written");
            }
        }
        Ok(())
    }

    fn write_file(path: &Path, json: &str) -> std::io::Result<()> {
        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = fs::File::create(path)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }
}

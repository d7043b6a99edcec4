//! Simulation input loading
//!
//! The input JSON arrives either inline (first positional CLI argument) or
//! from a file. Which one it was also decides where the result goes.

use anyhow::Context;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::domain::input::SimulationInput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Inline(String),
    File(PathBuf),
}

impl InputSource {
    /// Inline JSON wins over the configured file
    pub fn resolve(inline: Option<String>, file: &str) -> Self {
        match inline {
            Some(json) => InputSource::Inline(json),
            None => InputSource::File(PathBuf::from(file)),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, InputSource::Inline(_))
    }

    pub fn load(&self) -> anyhow::Result<SimulationInput> {
        match self {
            InputSource::Inline(json) => {
                SimulationInput::from_json(json).context("Failed to parse simulation input argument")
            }
            InputSource::File(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read input file {}", path.display()))?;
                let input = SimulationInput::from_json(&content)
                    .with_context(|| format!("Failed to parse input file {}", path.display()))?;
                info!(file = %path.display(), bytes = %content.len(), "input_loaded");
                Ok(input)
            }
        }
    }
}

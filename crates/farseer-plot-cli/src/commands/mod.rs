//! CLI command implementations.

pub mod bar;
pub mod config;
pub mod evolution;
pub mod threshold;
pub mod ticks;
pub mod wet;

use std::path::Path;

use anyhow::{Context, Result};
use farseer_plot::config::load_overrides;
use farseer_plot::{StringTable, TitrationTable};
use serde_json::{Map, Value};

pub(crate) fn read_values(path: &Path) -> Result<TitrationTable> {
    TitrationTable::from_csv(path)
        .with_context(|| format!("Failed to read table from {}", path.display()))
}

pub(crate) fn read_strings(path: &Path) -> Result<StringTable> {
    StringTable::from_csv(path)
        .with_context(|| format!("Failed to read table from {}", path.display()))
}

/// Overrides from `path`, or none.
pub(crate) fn read_overrides(path: Option<&Path>) -> Result<Map<String, Value>> {
    match path {
        Some(path) => load_overrides(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(Map::new()),
    }
}

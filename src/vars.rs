//! Variable table handling for the importer.
//! The source tree may ship a key/value document supplying substitution
//! values for its templates. The importer consumes it as opaque data: it
//! is loaded by file extension (TOML, YAML or JSON), kept in declaration
//! order, and re-emitted at the destination root in dotforge's own
//! convention. Absence of the file is not an error.

use crate::constants::VARS_FILE_NAME;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::path::{Path, PathBuf};

/// Ordered top-level table of variable names to values.
pub type VariableTable = IndexMap<String, serde_json::Value>;

/// Loads a variable table, dispatching on the file extension.
///
/// # Errors
/// * `Error::VarsError` for an unsupported extension or a document that
///   does not parse as a top-level table
pub fn load_vars<P: AsRef<Path>>(path: P) -> Result<VariableTable> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let table: VariableTable = match extension {
        "toml" => toml::from_str(&content)
            .map_err(|e| Error::VarsError(format!("'{}': {}", path.display(), e)))?,
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .map_err(|e| Error::VarsError(format!("'{}': {}", path.display(), e)))?,
        "json" => serde_json::from_str(&content)
            .map_err(|e| Error::VarsError(format!("'{}': {}", path.display(), e)))?,
        other => {
            return Err(Error::VarsError(format!(
                "unsupported variable table format '{}' (expected toml, yaml or json)",
                other
            )))
        }
    };

    debug!("loaded {} variables from '{}'", table.len(), path.display());
    Ok(table)
}

/// Writes the variable table at the destination root as TOML.
///
/// The emitted file is dotforge configuration, not part of the mirrored
/// tree, so it contributes nothing to the walk counters.
pub fn write_vars(table: &VariableTable, destination_root: &Path) -> Result<PathBuf> {
    let path = destination_root.join(VARS_FILE_NAME);
    let rendered = toml::to_string_pretty(table)
        .map_err(|e| Error::VarsError(format!("cannot encode '{}': {}", path.display(), e)))?;
    std::fs::write(&path, rendered)?;
    Ok(path)
}

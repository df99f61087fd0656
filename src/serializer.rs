//! Serialization of the client specification document.
//!
//! JSON is the primary format (pretty-printed, suitable for review and
//! version control); YAML is available for consumers that prefer it. Writing
//! to disk creates missing parent directories.

use crate::error::Result;
use crate::model::ApiSpec;
use log::debug;
use std::fs;
use std::path::Path;

/// Serialize a specification document to pretty-printed JSON.
pub fn serialize_json(spec: &ApiSpec) -> Result<String> {
    debug!("serializing specification {:?} to JSON", spec.name);
    Ok(serde_json::to_string_pretty(spec)?)
}

/// Serialize a specification document to YAML.
pub fn serialize_yaml(spec: &ApiSpec) -> Result<String> {
    debug!("serializing specification {:?} to YAML", spec.name);
    Ok(serde_yaml::to_string(spec)?)
}

/// Write serialized content to a file, creating parent directories as needed.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    Ok(())
}

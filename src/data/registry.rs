//! Data registry: provenance for each generated dataset.
//! Written by the generator; read back by the API health payload.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetEntry {
    pub source: String,
    pub record_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub path: String,
}

pub type Registry = BTreeMap<String, DataSetEntry>;

/// Registry file that sits next to a dataset (`<dir>/registry.json`).
pub fn registry_path_for(dataset: &Path) -> std::path::PathBuf {
    dataset
        .parent()
        .map(|dir| dir.join("registry.json"))
        .unwrap_or_else(|| "registry.json".into())
}

pub fn load_registry(path: impl AsRef<Path>) -> Option<Registry> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

/// Insert or replace one entry, keeping the others.
pub fn record_dataset(path: impl AsRef<Path>, name: &str, entry: DataSetEntry) -> Result<()> {
    let path = path.as_ref();
    let mut registry = load_registry(path).unwrap_or_default();
    registry.insert(name.to_string(), entry);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&registry)?)?;
    Ok(())
}

pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

use std::fs;
use std::path::Path;

use crate::data::hero::Hero;
use crate::error::Result;

/// Load the typed dataset (full JSON array).
pub fn load_heroes(path: impl AsRef<Path>) -> Result<Vec<Hero>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write the dataset as a pretty-printed JSON array, creating parent directories.
pub fn save_heroes(path: impl AsRef<Path>, heroes: &[Hero]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(heroes)?)?;
    Ok(())
}

pub fn find_hero(heroes: &[Hero], id: u32) -> Option<&Hero> {
    heroes.iter().find(|hero| hero.id == id)
}

//! Runtime configuration: file locations and bind address.
//!
//! Resolution order, later wins:
//! 1. built-in defaults (repo-relative `data/` layout)
//! 2. YAML file (`herorank.yaml`, or the path in `HERORANK_CONFIG`)
//! 3. `HERORANK_*` environment variables
//! 4. CLI flags (applied by [crate::cli])

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_CONFIG_PATH: &str = "herorank.yaml";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
pub const DEFAULT_DATASET_PATH: &str = "data/superheroes.json";
pub const DEFAULT_MARVEL_RAW_PATH: &str = "data/sources/marvel-raw.json";
pub const DEFAULT_DC_ROSTER_PATH: &str = "data/sources/dc-roster.yaml";
pub const DEFAULT_CORRECTIONS_PATH: &str = "data/corrections/power-corrections.json";
pub const DEFAULT_DESCRIPTIONS_PATH: &str = "data/corrections/descriptions.json";
pub const DEFAULT_BATTLE_HISTORY_PATH: &str = "data/battle-history.json";
pub const DEFAULT_FRONTEND_DIST: &str = "frontend/dist";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind: String,
    pub dataset: PathBuf,
    pub marvel_raw: PathBuf,
    pub dc_roster: PathBuf,
    pub corrections: PathBuf,
    pub descriptions: PathBuf,
    pub battle_history: PathBuf,
    pub frontend_dist: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDR.to_string(),
            dataset: PathBuf::from(DEFAULT_DATASET_PATH),
            marvel_raw: PathBuf::from(DEFAULT_MARVEL_RAW_PATH),
            dc_roster: PathBuf::from(DEFAULT_DC_ROSTER_PATH),
            corrections: PathBuf::from(DEFAULT_CORRECTIONS_PATH),
            descriptions: PathBuf::from(DEFAULT_DESCRIPTIONS_PATH),
            battle_history: PathBuf::from(DEFAULT_BATTLE_HISTORY_PATH),
            frontend_dist: PathBuf::from(DEFAULT_FRONTEND_DIST),
        }
    }
}

impl AppConfig {
    /// Defaults, then the YAML file if one exists, then environment overrides.
    pub fn load() -> Result<Self> {
        let path = env::var("HERORANK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = if Path::new(&path).exists() {
            tracing::debug!(path = %path, "loading config file");
            Self::from_yaml_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Apply `HERORANK_*` overrides. The lookup is injected so tests need not touch the process env.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("HERORANK_BIND") {
            self.bind = v;
        }
        let paths: [(&str, &mut PathBuf); 7] = [
            ("HERORANK_DATA", &mut self.dataset),
            ("HERORANK_MARVEL_RAW", &mut self.marvel_raw),
            ("HERORANK_DC_ROSTER", &mut self.dc_roster),
            ("HERORANK_CORRECTIONS", &mut self.corrections),
            ("HERORANK_DESCRIPTIONS", &mut self.descriptions),
            ("HERORANK_BATTLE_HISTORY", &mut self.battle_history),
            ("HERORANK_FRONTEND_DIST", &mut self.frontend_dist),
        ];
        for (key, slot) in paths {
            if let Some(v) = lookup(key) {
                *slot = PathBuf::from(v);
            }
        }
    }

    /// Config rooted at `dir`: every data path is joined onto it. Used by tests and `--data-dir`.
    pub fn rooted_at(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let defaults = Self::default();
        Self {
            bind: defaults.bind,
            dataset: dir.join(defaults.dataset),
            marvel_raw: dir.join(defaults.marvel_raw),
            dc_roster: dir.join(defaults.dc_roster),
            corrections: dir.join(defaults.corrections),
            descriptions: dir.join(defaults.descriptions),
            battle_history: dir.join(defaults.battle_history),
            frontend_dist: dir.join(defaults.frontend_dist),
        }
    }
}

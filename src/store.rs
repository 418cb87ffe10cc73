//! Flat-file hero store behind the admin API.
//!
//! Every operation reads the whole JSON array, changes it in memory and writes
//! the whole array back. There is no locking: two overlapping writers can each
//! read the same snapshot and the later write silently drops the earlier one's
//! change. Records are kept as raw JSON objects, so fields this crate does not
//! know about survive a round trip.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data::hero::{Hero, HeroStats, Tier, Universe, MAX_ABILITIES, STAT_MAX};
use crate::error::{Error, Result};

/// Partial update. Absent fields are left alone; `id` is never patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universe: Option<Universe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<HeroStats>,
}

impl HeroPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reject values the dataset cannot hold. Types are already enforced by serde.
    pub fn validate(&self) -> Result<()> {
        if let Some(power) = self.power.filter(|&p| p > STAT_MAX) {
            return Err(Error::InvalidPayload(format!("power {power} is outside 0..=100")));
        }
        if let Some(stats) = &self.stats {
            if let Some(v) = stats.values().into_iter().find(|&v| v > STAT_MAX) {
                return Err(Error::InvalidPayload(format!("stat value {v} is outside 0..=100")));
            }
        }
        if let Some(abilities) = &self.abilities {
            if abilities.len() > MAX_ABILITIES {
                return Err(Error::InvalidPayload(format!(
                    "at most {MAX_ABILITIES} abilities allowed (got {})",
                    abilities.len()
                )));
            }
        }
        Ok(())
    }

    /// Shallow merge onto a raw record: each present field replaces the stored one.
    pub fn apply_to(&self, record: &mut Map<String, Value>) -> Result<()> {
        let Value::Object(fields) = serde_json::to_value(self)? else {
            return Err(Error::InvalidPayload("patch did not serialize to an object".to_string()));
        };
        for (key, value) in fields {
            record.insert(key, value);
        }
        Ok(())
    }
}

/// One entry of a bulk update: `{ "id": 3, ...patch }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdate {
    pub id: u32,
    #[serde(flatten)]
    pub patch: HeroPatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    pub requested: usize,
    pub applied: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total: usize,
    pub by_universe: BTreeMap<&'static str, usize>,
    pub by_tier: BTreeMap<&'static str, usize>,
}

pub fn record_id(record: &Value) -> Option<u64> {
    record.get("id").and_then(Value::as_u64)
}

fn has_id(record: &Value, id: u32) -> bool {
    record_id(record) == Some(u64::from(id))
}

#[derive(Debug, Clone)]
pub struct HeroStore {
    path: PathBuf,
}

impl HeroStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_all(&self) -> Result<Vec<Value>> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_all(&self, records: &[Value]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(records)?)?;
        Ok(())
    }

    pub fn get(&self, id: u32) -> Result<Option<Value>> {
        Ok(self.read_all()?.into_iter().find(|record| has_id(record, id)))
    }

    /// Merge `patch` into the record with `id`. `None` if no such record.
    pub fn update(&self, id: u32, patch: &HeroPatch) -> Result<Option<Value>> {
        let mut records = self.read_all()?;
        let Some(record) = records.iter_mut().find(|record| has_id(record, id)) else {
            return Ok(None);
        };
        let Value::Object(fields) = record else {
            return Err(Error::InvalidPayload(format!("stored hero {id} is not an object")));
        };
        patch.apply_to(fields)?;
        let updated = record.clone();
        self.write_all(&records)?;
        Ok(Some(updated))
    }

    /// Append `hero` with the next free id (max + 1, or 1 for an empty store).
    pub fn create(&self, hero: Value) -> Result<Value> {
        let Value::Object(mut fields) = hero else {
            return Err(Error::InvalidPayload("hero must be a JSON object".to_string()));
        };
        let mut records = self.read_all()?;
        let next_id = records.iter().filter_map(record_id).max().map_or(1, |max| max + 1);
        fields.insert("id".to_string(), Value::from(next_id));
        let created = Value::Object(fields);
        records.push(created.clone());
        self.write_all(&records)?;
        Ok(created)
    }

    /// `false` if nothing had that id; the file is then left untouched.
    pub fn delete(&self, id: u32) -> Result<bool> {
        let mut records = self.read_all()?;
        let Some(index) = records.iter().position(|record| has_id(record, id)) else {
            return Ok(false);
        };
        records.remove(index);
        self.write_all(&records)?;
        Ok(true)
    }

    /// Apply every update whose id exists; unknown ids are skipped silently.
    pub fn bulk_update(&self, updates: &[BulkUpdate]) -> Result<BulkOutcome> {
        let mut records = self.read_all()?;
        let mut applied = 0;
        for update in updates {
            let target = records
                .iter_mut()
                .find(|record| has_id(record, update.id))
                .and_then(Value::as_object_mut);
            if let Some(fields) = target {
                update.patch.apply_to(fields)?;
                applied += 1;
            }
        }
        self.write_all(&records)?;
        Ok(BulkOutcome {
            requested: updates.len(),
            applied,
        })
    }

    /// Replace the whole dataset.
    pub fn replace_all(&self, records: &[Value]) -> Result<usize> {
        self.write_all(records)?;
        Ok(records.len())
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let records = self.read_all()?;
        let mut stats = StoreStats {
            total: records.len(),
            by_universe: Universe::ALL.iter().map(|u| (u.as_str(), 0)).collect(),
            by_tier: Tier::ALL.iter().map(|t| (t.as_str(), 0)).collect(),
        };
        for record in &records {
            if let Some(universe) = record.get("universe").and_then(Value::as_str) {
                if let Some(count) = stats.by_universe.get_mut(universe) {
                    *count += 1;
                }
            }
            if let Some(tier) = record.get("tier").and_then(Value::as_str) {
                if let Some(count) = stats.by_tier.get_mut(tier) {
                    *count += 1;
                }
            }
        }
        Ok(stats)
    }

    /// Records that parse as [`Hero`]; anything else is logged and skipped.
    pub fn heroes(&self) -> Result<Vec<Hero>> {
        let records = self.read_all()?;
        let mut heroes = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Hero>(record) {
                Ok(hero) => heroes.push(hero),
                Err(err) => tracing::warn!(index, %err, "skipping store record that is not a full hero"),
            }
        }
        Ok(heroes)
    }
}

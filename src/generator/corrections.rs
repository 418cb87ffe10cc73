//! Hand-maintained override tables: per-hero tier/power/reason corrections and
//! manual descriptions. Both are loaded once and passed to the generator read-only.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::hero::{Tier, Universe};
use crate::error::Result;
use crate::generator::scoring::{round_half_up, tier_for_power};

/// Lookup order for correction categories. The first category containing the
/// hero's exact name wins.
pub const CATEGORY_ORDER: [&str; 7] = ["Cosmic", "S", "A", "B", "C", "D", "downgrade"];
pub const DOWNGRADE: &str = "downgrade";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Correction {
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub power: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A correction with its tier and power fully decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCorrection {
    pub category: &'static str,
    pub tier: Tier,
    pub power: u8,
    pub reason: Option<String>,
    pub description: Option<String>,
}

/// universe -> category -> hero name -> correction
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorrectionTables {
    #[serde(default)]
    pub corrections: HashMap<String, HashMap<String, HashMap<String, Correction>>>,
}

impl CorrectionTables {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn len(&self) -> usize {
        self.corrections
            .values()
            .flat_map(HashMap::values)
            .map(HashMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw lookup: the first category (in [`CATEGORY_ORDER`]) listing `name`.
    pub fn find(&self, universe: Universe, name: &str) -> Option<(&'static str, &Correction)> {
        let by_category = self.corrections.get(universe.as_str())?;
        CATEGORY_ORDER.iter().find_map(|category| {
            by_category
                .get(*category)
                .and_then(|names| names.get(name))
                .map(|correction| (*category, correction))
        })
    }

    /// Lookup plus tier/power resolution.
    ///
    /// Tier: the correction's own `tier` if it parses, else the category key. A
    /// `downgrade` entry without a tier gets the tier its power implies.
    /// Power: the correction's value, else `fallback_power`.
    pub fn resolve(&self, universe: Universe, name: &str, fallback_power: u8) -> Option<ResolvedCorrection> {
        let (category, correction) = self.find(universe, name)?;
        let power = correction
            .power
            .filter(|p| p.is_finite())
            .map(|p| round_half_up(p).clamp(0, 100) as u8)
            .unwrap_or(fallback_power);

        let explicit = correction.tier.as_deref().and_then(|raw| match raw.parse::<Tier>() {
            Ok(tier) => Some(tier),
            Err(err) => {
                tracing::warn!(hero = name, %err, "ignoring unparseable correction tier");
                None
            }
        });
        let tier = explicit.unwrap_or_else(|| {
            if category == DOWNGRADE {
                tier_for_power(power)
            } else {
                category.parse().unwrap_or_else(|_| tier_for_power(power))
            }
        });

        Some(ResolvedCorrection {
            category,
            tier,
            power,
            reason: correction.reason.clone(),
            description: correction.description.clone(),
        })
    }
}

/// universe -> hero name -> description
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct DescriptionTables {
    pub by_universe: BTreeMap<String, HashMap<String, String>>,
}

impl DescriptionTables {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn get(&self, universe: Universe, name: &str) -> Option<&str> {
        self.by_universe
            .get(universe.as_str())
            .and_then(|names| names.get(name))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }
}

//! Compound hero filter: text search AND category selections AND inclusive stat
//! ranges, plus per-category counts over whatever survives.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::classify::{EnrichedHero, HeroClass, PowerType};
use crate::data::hero::{StatKind, Tier, Universe, STAT_MAX};

/// `"all"` or one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: FromStr<Err = String>> FromStr for Selection<T> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: FromStr<Err = String>> Deserialize<'de> for Selection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

pub type StatRange = [u8; 2];
pub const FULL_RANGE: StatRange = [0, STAT_MAX];

/// Which slider a range belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKey {
    Power,
    Stat(StatKind),
}

impl FromStr for RangeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if key == "power" {
            return Ok(Self::Power);
        }
        StatKind::ALL
            .into_iter()
            .find(|stat| stat.as_str() == key)
            .map(Self::Stat)
            .ok_or_else(|| format!("unknown range '{key}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatRanges {
    pub power: StatRange,
    pub strength: StatRange,
    pub speed: StatRange,
    pub durability: StatRange,
    pub intelligence: StatRange,
    pub combat: StatRange,
}

impl Default for StatRanges {
    fn default() -> Self {
        Self {
            power: FULL_RANGE,
            strength: FULL_RANGE,
            speed: FULL_RANGE,
            durability: FULL_RANGE,
            intelligence: FULL_RANGE,
            combat: FULL_RANGE,
        }
    }
}

impl StatRanges {
    pub fn get(&self, key: RangeKey) -> StatRange {
        match key {
            RangeKey::Power => self.power,
            RangeKey::Stat(StatKind::Strength) => self.strength,
            RangeKey::Stat(StatKind::Speed) => self.speed,
            RangeKey::Stat(StatKind::Durability) => self.durability,
            RangeKey::Stat(StatKind::Intelligence) => self.intelligence,
            RangeKey::Stat(StatKind::Combat) => self.combat,
        }
    }

    fn slot(&mut self, key: RangeKey) -> &mut StatRange {
        match key {
            RangeKey::Power => &mut self.power,
            RangeKey::Stat(StatKind::Strength) => &mut self.strength,
            RangeKey::Stat(StatKind::Speed) => &mut self.speed,
            RangeKey::Stat(StatKind::Durability) => &mut self.durability,
            RangeKey::Stat(StatKind::Intelligence) => &mut self.intelligence,
            RangeKey::Stat(StatKind::Combat) => &mut self.combat,
        }
    }

    fn all(&self) -> [StatRange; 6] {
        [
            self.power,
            self.strength,
            self.speed,
            self.durability,
            self.intelligence,
            self.combat,
        ]
    }
}

fn within(value: u8, range: StatRange) -> bool {
    value >= range[0] && value <= range[1]
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search_term: String,
    pub universe_filter: Selection<Universe>,
    pub tier_filter: Selection<Tier>,
    pub hero_class_filter: Selection<HeroClass>,
    pub power_type_filter: Selection<PowerType>,
    pub stat_ranges: StatRanges,
}

impl FilterState {
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_universe(&mut self, universe: Selection<Universe>) {
        self.universe_filter = universe;
    }

    pub fn set_tier(&mut self, tier: Selection<Tier>) {
        self.tier_filter = tier;
    }

    pub fn set_hero_class(&mut self, hero_class: Selection<HeroClass>) {
        self.hero_class_filter = hero_class;
    }

    pub fn set_power_type(&mut self, power_type: Selection<PowerType>) {
        self.power_type_filter = power_type;
    }

    /// Clamp both ends into 0..=100 and swap them if given in the wrong order.
    pub fn set_stat_range(&mut self, key: RangeKey, lo: i64, hi: i64) {
        let clamp = |v: i64| v.clamp(0, i64::from(STAT_MAX)) as u8;
        let (lo, hi) = (clamp(lo), clamp(hi));
        *self.stat_ranges.slot(key) = [lo.min(hi), lo.max(hi)];
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True iff any field differs from the default state.
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty()
            || !self.universe_filter.is_all()
            || !self.tier_filter.is_all()
            || !self.hero_class_filter.is_all()
            || !self.power_type_filter.is_all()
            || self.stat_ranges.all().iter().any(|range| *range != FULL_RANGE)
    }

    pub fn matches(&self, hero: &EnrichedHero) -> bool {
        let needle = self.search_term.trim().to_lowercase();
        self.matches_with_needle(hero, &needle)
    }

    fn matches_with_needle(&self, enriched: &EnrichedHero, needle: &str) -> bool {
        let hero = &enriched.hero;
        if !needle.is_empty() && !hero.name.to_lowercase().contains(needle) {
            return false;
        }
        if !self.universe_filter.admits(&hero.universe)
            || !self.tier_filter.admits(&hero.tier)
            || !self.hero_class_filter.admits(&enriched.hero_class)
        {
            return false;
        }
        if let Selection::Only(wanted) = self.power_type_filter {
            if !enriched.power_types.contains(&wanted) {
                return false;
            }
        }

        let ranges = &self.stat_ranges;
        within(hero.power, ranges.power)
            && StatKind::ALL
                .into_iter()
                .all(|stat| within(hero.stats.get(stat), ranges.get(RangeKey::Stat(stat))))
    }
}

/// Counts over the filtered set. Every category key is present, zeros included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    pub total: usize,
    pub filtered: usize,
    pub by_universe: BTreeMap<&'static str, usize>,
    pub by_tier: BTreeMap<&'static str, usize>,
    pub by_hero_class: BTreeMap<&'static str, usize>,
    pub by_power_type: BTreeMap<&'static str, usize>,
}

impl FilterStats {
    pub fn empty(total: usize) -> Self {
        Self {
            total,
            filtered: 0,
            by_universe: Universe::ALL.iter().map(|u| (u.as_str(), 0)).collect(),
            by_tier: Tier::ALL.iter().map(|t| (t.as_str(), 0)).collect(),
            by_hero_class: HeroClass::ALL.iter().map(|c| (c.as_str(), 0)).collect(),
            by_power_type: PowerType::ALL.iter().map(|p| (p.as_str(), 0)).collect(),
        }
    }

    fn count(&mut self, hero: &EnrichedHero) {
        self.filtered += 1;
        *self.by_universe.entry(hero.hero.universe.as_str()).or_default() += 1;
        *self.by_tier.entry(hero.hero.tier.as_str()).or_default() += 1;
        *self.by_hero_class.entry(hero.hero_class.as_str()).or_default() += 1;
        for power_type in &hero.power_types {
            *self.by_power_type.entry(power_type.as_str()).or_default() += 1;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOutcome {
    pub heroes: Vec<EnrichedHero>,
    pub stats: FilterStats,
    pub has_active_filters: bool,
}

/// Heroes passing every predicate, in input order.
pub fn filter_heroes<'a>(heroes: &'a [EnrichedHero], state: &FilterState) -> Vec<&'a EnrichedHero> {
    let needle = state.search_term.trim().to_lowercase();
    heroes
        .iter()
        .filter(|hero| state.matches_with_needle(hero, &needle))
        .collect()
}

pub fn filter_stats(total: usize, filtered: &[&EnrichedHero]) -> FilterStats {
    let mut stats = FilterStats::empty(total);
    for hero in filtered {
        stats.count(hero);
    }
    stats
}

pub fn apply_filter(heroes: &[EnrichedHero], state: &FilterState) -> FilterOutcome {
    let filtered = filter_heroes(heroes, state);
    let stats = filter_stats(heroes.len(), &filtered);
    FilterOutcome {
        heroes: filtered.into_iter().cloned().collect(),
        stats,
        has_active_filters: state.has_active_filters(),
    }
}

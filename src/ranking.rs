use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classify::EnrichedHero;
use crate::data::hero::{StatKind, STAT_MAX};
use crate::error::{Error, Result};

pub const MAX_COMPARE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Power,
    Strength,
    Speed,
    Durability,
    Intelligence,
    Combat,
    Average,
}

impl SortBy {
    pub const ALL: [SortBy; 7] = [
        SortBy::Power,
        SortBy::Strength,
        SortBy::Speed,
        SortBy::Durability,
        SortBy::Intelligence,
        SortBy::Combat,
        SortBy::Average,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Strength => "strength",
            Self::Speed => "speed",
            Self::Durability => "durability",
            Self::Intelligence => "intelligence",
            Self::Combat => "combat",
            Self::Average => "average",
        }
    }

    pub fn key(&self, hero: &EnrichedHero) -> u8 {
        match self {
            Self::Power => hero.hero.power,
            Self::Average => hero.avg_stats,
            Self::Strength => hero.hero.stats.get(StatKind::Strength),
            Self::Speed => hero.hero.stats.get(StatKind::Speed),
            Self::Durability => hero.hero.stats.get(StatKind::Durability),
            Self::Intelligence => hero.hero.stats.get(StatKind::Intelligence),
            Self::Combat => hero.hero.stats.get(StatKind::Combat),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown sort key '{trimmed}'"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedHero {
    pub rank: usize,
    pub value: u8,
    #[serde(flatten)]
    pub hero: EnrichedHero,
}

/// Stable descending sort by `sort`, ranks 1..N. Ties keep input order.
pub fn rank_heroes(heroes: &[EnrichedHero], sort: SortBy, limit: Option<usize>) -> Vec<RankedHero> {
    let mut ordered: Vec<&EnrichedHero> = heroes.iter().collect();
    ordered.sort_by(|left, right| sort.key(right).cmp(&sort.key(left)));

    ordered
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(idx, hero)| RankedHero {
            rank: idx + 1,
            value: sort.key(hero),
            hero: hero.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatComparison {
    pub stat: StatKind,
    pub max: u8,
    /// Every hero sharing the maximum.
    pub leader_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparedHero {
    pub id: u32,
    pub name: String,
    pub total: u32,
    pub average: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub heroes: Vec<ComparedHero>,
    pub stats: Vec<StatComparison>,
}

/// Side-by-side view of up to [`MAX_COMPARE`] heroes. An empty selection
/// reports the scale maximum with no leaders.
pub fn compare_heroes(heroes: &[&EnrichedHero]) -> Result<Comparison> {
    if heroes.len() > MAX_COMPARE {
        return Err(Error::TooManyHeroes {
            max: MAX_COMPARE,
            got: heroes.len(),
        });
    }

    let stats = StatKind::ALL
        .into_iter()
        .map(|stat| {
            let max = heroes
                .iter()
                .map(|h| h.hero.stats.get(stat))
                .max()
                .unwrap_or(STAT_MAX);
            let leader_ids = heroes
                .iter()
                .filter(|h| h.hero.stats.get(stat) == max)
                .map(|h| h.hero.id)
                .collect();
            StatComparison {
                stat,
                max,
                leader_ids,
            }
        })
        .collect();

    let heroes = heroes
        .iter()
        .map(|h| ComparedHero {
            id: h.hero.id,
            name: h.hero.name.clone(),
            total: h.hero.stats.values().iter().map(|&v| u32::from(v)).sum(),
            average: h.avg_stats,
        })
        .collect();

    Ok(Comparison { heroes, stats })
}

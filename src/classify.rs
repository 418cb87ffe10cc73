//! Derived categories: role (`heroClass`), power-type tags, stat rank and average.
//! Pure functions of a hero; [`EnrichedIndex`] holds one full pass for reuse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::hero::{Hero, HeroStats, Tier};
use crate::generator::scoring::round_half_up;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeroClass {
    Cosmic,
    Tank,
    Bruiser,
    Speedster,
    Controller,
    Assassin,
    Blaster,
}

impl HeroClass {
    pub const ALL: [HeroClass; 7] = [
        HeroClass::Cosmic,
        HeroClass::Tank,
        HeroClass::Bruiser,
        HeroClass::Speedster,
        HeroClass::Controller,
        HeroClass::Assassin,
        HeroClass::Blaster,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosmic => "Cosmic",
            Self::Tank => "Tank",
            Self::Bruiser => "Bruiser",
            Self::Speedster => "Speedster",
            Self::Controller => "Controller",
            Self::Assassin => "Assassin",
            Self::Blaster => "Blaster",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerType {
    Physical,
    Energy,
    Magic,
    Cosmic,
    Tech,
    Psionic,
    Elemental,
    Nature,
    Mystic,
}

impl PowerType {
    pub const ALL: [PowerType; 9] = [
        PowerType::Physical,
        PowerType::Energy,
        PowerType::Magic,
        PowerType::Cosmic,
        PowerType::Tech,
        PowerType::Psionic,
        PowerType::Elemental,
        PowerType::Nature,
        PowerType::Mystic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "Physical",
            Self::Energy => "Energy",
            Self::Magic => "Magic",
            Self::Cosmic => "Cosmic",
            Self::Tech => "Tech",
            Self::Psionic => "Psionic",
            Self::Elemental => "Elemental",
            Self::Nature => "Nature",
            Self::Mystic => "Mystic",
        }
    }

    /// Ability keywords, matched case-insensitively as substrings.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Physical => &["Superstärke", "Kampfkunst", "Meisterkämpfer", "Training", "Martial", "Stärke", "Nahkampf", "Kraft"],
            Self::Energy => &["Energieprojektion", "Strahlen", "Laser", "Energie", "Licht", "Plasma", "Hitze"],
            Self::Magic => &["Magie", "Zauber", "mystisch", "Hexerei", "Zauberei", "Arkan", "Beschwörung"],
            Self::Cosmic => &["Kosmisch", "Realitätskontrolle", "Omnipotenz", "Multiversum", "Universum", "Allwissen", "Göttliche Macht"],
            Self::Tech => &["Ausrüstung", "Gadgets", "Technologie", "Rüstung", "Tech", "Cyborg", "Roboter", "Mechanisch"],
            Self::Psionic => &["Telepathie", "Telekinese", "Gedankenkontrolle", "mental", "psychisch", "Gedanken", "Psionik"],
            Self::Elemental => &["Feuer", "Eis", "Wetter", "Blitz", "Wasser", "Erde", "Wind", "Elektrizität", "Frost"],
            Self::Nature => &["Tier", "Verwandlung", "Formwandel", "wild", "Natur", "Bestie", "Instinkt", "Animal"],
            Self::Mystic => &["Göttlich", "Dämonisch", "Unsterblichkeit", "Engel", "Gott", "Heilig", "Übernatürlich", "Jenseitig"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatRank {
    Elite,
    Champion,
    Skilled,
    Standard,
    Rookie,
}

impl StatRank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elite => "Elite",
            Self::Champion => "Champion",
            Self::Skilled => "Skilled",
            Self::Standard => "Standard",
            Self::Rookie => "Rookie",
        }
    }
}

macro_rules! label_enum_traits {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| format!(concat!("unknown ", $what, " '{}'"), trimmed))
            }
        }
    };
}

label_enum_traits!(HeroClass, "hero class");
label_enum_traits!(PowerType, "power type");

impl fmt::Display for StatRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role by ordered rules; the first that matches wins. No stats means Blaster.
pub fn hero_class(tier: Tier, stats: Option<&HeroStats>) -> HeroClass {
    let Some(stats) = stats else {
        return HeroClass::Blaster;
    };
    let avg = stats.mean();
    let [strength, speed, durability, intelligence, combat] = stats.values().map(f64::from);

    if tier == Tier::Cosmic || avg >= 90.0 {
        HeroClass::Cosmic
    } else if speed >= avg + 20.0 && speed >= 70.0 {
        HeroClass::Speedster
    } else if durability >= avg + 15.0 && durability >= 70.0 && durability > strength {
        HeroClass::Tank
    } else if strength >= 70.0 && durability >= 60.0 && strength >= durability {
        HeroClass::Bruiser
    } else if combat >= 70.0 && speed >= 60.0 && durability < 50.0 {
        HeroClass::Assassin
    } else if intelligence >= avg + 15.0 && intelligence >= 70.0 {
        HeroClass::Controller
    } else {
        HeroClass::Blaster
    }
}

/// Keyword tags in table order; falls back to a stat-based tag so the result is never empty.
pub fn power_types(abilities: &[String], stats: &HeroStats) -> Vec<PowerType> {
    let text = abilities.join(" ").to_lowercase();
    let mut types: Vec<PowerType> = PowerType::ALL
        .into_iter()
        .filter(|ty| ty.keywords().iter().any(|kw| text.contains(&kw.to_lowercase())))
        .collect();

    if types.is_empty() {
        types.push(if stats.strength >= 70 {
            PowerType::Physical
        } else if stats.intelligence >= 70 {
            PowerType::Psionic
        } else {
            PowerType::Physical
        });
    }
    types
}

/// Rounded mean of the five stats (half up).
pub fn average_stats(stats: &HeroStats) -> u8 {
    round_half_up(stats.mean()).clamp(0, 100) as u8
}

pub fn stat_rank(avg_stats: u8) -> StatRank {
    match avg_stats {
        a if a >= 90 => StatRank::Elite,
        a if a >= 70 => StatRank::Champion,
        a if a >= 50 => StatRank::Skilled,
        a if a >= 30 => StatRank::Standard,
        _ => StatRank::Rookie,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedHero {
    #[serde(flatten)]
    pub hero: Hero,
    pub hero_class: HeroClass,
    pub power_types: Vec<PowerType>,
    pub stat_rank: StatRank,
    pub avg_stats: u8,
}

pub fn enrich_hero(hero: &Hero) -> EnrichedHero {
    let avg_stats = average_stats(&hero.stats);
    EnrichedHero {
        hero_class: hero_class(hero.tier, Some(&hero.stats)),
        power_types: power_types(&hero.abilities, &hero.stats),
        stat_rank: stat_rank(avg_stats),
        avg_stats,
        hero: hero.clone(),
    }
}

pub fn enrich_heroes(heroes: &[Hero]) -> Vec<EnrichedHero> {
    heroes.iter().map(enrich_hero).collect()
}

/// One enrichment pass over a dataset, owned by whoever filters it repeatedly.
#[derive(Debug, Clone, Default)]
pub struct EnrichedIndex {
    heroes: Vec<EnrichedHero>,
}

impl EnrichedIndex {
    pub fn new(heroes: &[Hero]) -> Self {
        Self {
            heroes: enrich_heroes(heroes),
        }
    }

    pub fn heroes(&self) -> &[EnrichedHero] {
        &self.heroes
    }

    pub fn get(&self, id: u32) -> Option<&EnrichedHero> {
        self.heroes.iter().find(|h| h.hero.id == id)
    }
}

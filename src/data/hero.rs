//! Hero record as persisted in the dataset file and served by the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const STAT_MAX: u8 = 100;
pub const MAX_ABILITIES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Universe {
    Marvel,
    #[serde(rename = "DC")]
    Dc,
}

impl Universe {
    pub const ALL: [Universe; 2] = [Universe::Marvel, Universe::Dc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marvel => "Marvel",
            Self::Dc => "DC",
        }
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Universe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marvel" => Ok(Self::Marvel),
            "dc" => Ok(Self::Dc),
            other => Err(format!("unknown universe '{other}'")),
        }
    }
}

/// Coarse ranking bucket. Declaration order is strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Cosmic,
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    pub const ALL: [Tier; 6] = [Tier::Cosmic, Tier::S, Tier::A, Tier::B, Tier::C, Tier::D];

    /// Sort key, Cosmic = 0 through D = 5.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Cosmic => 0,
            Self::S => 1,
            Self::A => 2,
            Self::B => 3,
            Self::C => 4,
            Self::D => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosmic => "Cosmic",
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown tier '{trimmed}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeroStats {
    pub strength: u8,
    pub speed: u8,
    pub durability: u8,
    pub intelligence: u8,
    pub combat: u8,
}

impl HeroStats {
    pub const fn new(strength: u8, speed: u8, durability: u8, intelligence: u8, combat: u8) -> Self {
        Self {
            strength,
            speed,
            durability,
            intelligence,
            combat,
        }
    }

    /// Build from untrusted numbers, clamping each into 0..=100.
    pub fn clamped(strength: i64, speed: i64, durability: i64, intelligence: i64, combat: i64) -> Self {
        let c = |v: i64| v.clamp(0, i64::from(STAT_MAX)) as u8;
        Self::new(c(strength), c(speed), c(durability), c(intelligence), c(combat))
    }

    pub fn values(&self) -> [u8; 5] {
        [
            self.strength,
            self.speed,
            self.durability,
            self.intelligence,
            self.combat,
        ]
    }

    /// Unrounded arithmetic mean of the five stats.
    pub fn mean(&self) -> f64 {
        self.values().iter().map(|&v| f64::from(v)).sum::<f64>() / 5.0
    }

    pub fn is_all_max(&self) -> bool {
        self.values().iter().all(|&v| v == STAT_MAX)
    }

    pub fn get(&self, stat: StatKind) -> u8 {
        match stat {
            StatKind::Strength => self.strength,
            StatKind::Speed => self.speed,
            StatKind::Durability => self.durability,
            StatKind::Intelligence => self.intelligence,
            StatKind::Combat => self.combat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Strength,
    Speed,
    Durability,
    Intelligence,
    Combat,
}

impl StatKind {
    pub const ALL: [StatKind; 5] = [
        StatKind::Strength,
        StatKind::Speed,
        StatKind::Durability,
        StatKind::Intelligence,
        StatKind::Combat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Speed => "speed",
            Self::Durability => "durability",
            Self::Intelligence => "intelligence",
            Self::Combat => "combat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u32,
    pub name: String,
    pub universe: Universe,
    pub tier: Tier,
    pub power: u8,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reason: String,
    pub stats: HeroStats,
}

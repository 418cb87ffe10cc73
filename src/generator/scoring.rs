//! Power score, tier thresholds and the stat-block repair used when a raw record
//! is missing or obviously broken.

use crate::data::hero::{HeroStats, Tier};

/// Stats used when a record has none or its race matches no entry below.
pub const GENERIC_STATS: HeroStats = HeroStats::new(45, 40, 45, 45, 45);

/// Case-insensitive substring match, first entry wins. Order matters:
/// "inhuman" contains "human", so an Inhuman resolves to the human block.
pub const RACE_DEFAULTS: [(&str, HeroStats); 11] = [
    ("human", HeroStats::new(30, 30, 30, 50, 50)),
    ("mutant", HeroStats::new(50, 45, 50, 55, 60)),
    ("inhuman", HeroStats::new(55, 50, 55, 50, 55)),
    ("asgardian", HeroStats::new(75, 60, 80, 60, 75)),
    ("eternal", HeroStats::new(70, 65, 75, 70, 65)),
    ("demon", HeroStats::new(65, 50, 70, 55, 60)),
    ("vampire", HeroStats::new(55, 50, 60, 50, 60)),
    ("alien", HeroStats::new(55, 50, 55, 55, 50)),
    ("robot", HeroStats::new(60, 45, 70, 60, 50)),
    ("symbiote", HeroStats::new(65, 55, 60, 40, 65)),
    ("god", HeroStats::new(80, 70, 85, 70, 75)),
];

pub const S_THRESHOLD: u8 = 90;
pub const A_THRESHOLD: u8 = 75;
pub const B_THRESHOLD: u8 = 55;
pub const C_THRESHOLD: u8 = 40;

/// Round to nearest, ties toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Weighted power score, 0..=100.
pub fn compute_power(stats: &HeroStats) -> u8 {
    let raw = f64::from(stats.strength) * 0.25
        + f64::from(stats.speed) * 0.15
        + f64::from(stats.durability) * 0.25
        + f64::from(stats.intelligence) * 0.15
        + f64::from(stats.combat) * 0.2;
    round_half_up(raw).clamp(0, 100) as u8
}

/// Tier for a computed power. Never yields Cosmic; that tier only comes from corrections.
pub fn tier_for_power(power: u8) -> Tier {
    match power {
        p if p >= S_THRESHOLD => Tier::S,
        p if p >= A_THRESHOLD => Tier::A,
        p if p >= B_THRESHOLD => Tier::B,
        p if p >= C_THRESHOLD => Tier::C,
        _ => Tier::D,
    }
}

pub fn default_stats_for_race(race: &str) -> HeroStats {
    let race = race.to_lowercase();
    RACE_DEFAULTS
        .iter()
        .find(|(key, _)| race.contains(key))
        .map(|(_, stats)| *stats)
        .unwrap_or(GENERIC_STATS)
}

/// An all-100 block is a known export artifact, not a real hero.
pub fn needs_repair(stats: &HeroStats) -> bool {
    stats.is_all_max()
}

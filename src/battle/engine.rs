//! Turn-based auto battle between two heroes.
//!
//! Each round hero A acts, then hero B (if still standing). A fighter counts as
//! defending from the moment it picks Defense until its next action.

use serde::Serialize;

use crate::battle::rng::Rng;
use crate::data::hero::Hero;
use crate::generator::scoring::round_half_up;

pub const MIN_HP: i64 = 100;
pub const MAX_HP: i64 = 250;
pub const MAX_ENERGY: u8 = 100;
pub const MAX_ROUNDS: u32 = 50;
pub const MIN_BASE_DAMAGE: f64 = 10.0;
/// Floor on any hit, as a share of the defender's max HP.
pub const MIN_DAMAGE_SHARE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Attack,
    Tactics,
    Ultimate,
    Defense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    Off,
    #[default]
    Events,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleConfig {
    pub seed: u64,
    pub max_rounds: u32,
    pub trace_mode: TraceMode,
}

impl BattleConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            max_rounds: MAX_ROUNDS,
            trace_mode: TraceMode::Events,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleEvent {
    pub round: u32,
    pub actor_id: u32,
    pub action: Action,
    pub damage: u32,
    pub target_hp: u32,
    pub actor_energy: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResult {
    pub winner_id: u32,
    pub loser_id: u32,
    pub winner_name: String,
    pub loser_name: String,
    pub rounds: u32,
    pub winner_by_round_limit: bool,
    /// Remaining HP of hero A and hero B.
    pub final_hp: [u32; 2],
    pub max_hp: [u32; 2],
    pub log: Vec<BattleEvent>,
}

impl BattleResult {
    pub fn hero1_won(&self, hero1_id: u32) -> bool {
        self.winner_id == hero1_id
    }
}

/// A zero stat is treated as missing and replaced by `fallback`.
fn stat_or(value: u8, fallback: u8) -> f64 {
    f64::from(if value == 0 { fallback } else { value })
}

pub fn max_hp(hero: &Hero) -> i64 {
    let durability = stat_or(hero.stats.durability, 10);
    let base = MIN_HP + round_half_up(durability * 1.2 + f64::from(hero.power) * 0.5);
    base.clamp(MIN_HP, MAX_HP)
}

fn attack_damage(hero: &Hero) -> f64 {
    stat_or(hero.stats.strength, 50) * 0.4 + f64::from(hero.power) * 0.15
}

pub fn base_damage(attacker: &Hero, action: Action) -> f64 {
    match action {
        Action::Attack => attack_damage(attacker),
        Action::Tactics => stat_or(attacker.stats.intelligence, 50) * 0.3 + f64::from(attacker.power) * 0.12,
        Action::Ultimate => attack_damage(attacker) * 3.0,
        Action::Defense => 0.0,
    }
}

pub fn damage(attacker: &Hero, defender: &Hero, action: Action, defender_defending: bool) -> i64 {
    if action == Action::Defense {
        return 0;
    }
    let defense = stat_or(defender.stats.durability, 50) * 0.15;
    let mut dealt = (base_damage(attacker, action) - defense).max(MIN_BASE_DAMAGE);
    if defender_defending {
        dealt *= 0.5;
    }
    let floor = max_hp(defender) as f64 * MIN_DAMAGE_SHARE;
    round_half_up(dealt.max(floor))
}

pub fn next_energy(energy: u8, action: Action) -> u8 {
    match action {
        Action::Ultimate => 0,
        Action::Tactics => energy.saturating_add(30).min(MAX_ENERGY),
        Action::Attack | Action::Defense => energy.saturating_add(20).min(MAX_ENERGY),
    }
}

/// AI policy: ultimate when charged, turtle more when low, otherwise lean aggressive.
pub fn choose_action(hp: i64, max_hp: i64, energy: u8, rng: &mut Rng) -> Action {
    if energy >= MAX_ENERGY {
        return Action::Ultimate;
    }
    let hp_percent = hp as f64 / max_hp.max(1) as f64 * 100.0;

    if hp_percent < 30.0 && rng.next_f64() < 0.6 {
        return Action::Defense;
    }

    let roll = rng.next_f64();
    if hp_percent < 60.0 {
        if roll < 0.4 {
            Action::Attack
        } else if roll < 0.7 {
            Action::Tactics
        } else {
            Action::Defense
        }
    } else if roll < 0.5 {
        Action::Attack
    } else if roll < 0.85 {
        Action::Tactics
    } else {
        Action::Defense
    }
}

#[derive(Debug, Clone, Copy)]
struct Fighter<'h> {
    hero: &'h Hero,
    hp: i64,
    max_hp: i64,
    energy: u8,
    defending: bool,
}

impl<'h> Fighter<'h> {
    fn new(hero: &'h Hero) -> Self {
        let max_hp = max_hp(hero);
        Self {
            hero,
            hp: max_hp,
            max_hp,
            energy: 0,
            defending: false,
        }
    }

    fn hp_fraction(&self) -> f64 {
        self.hp as f64 / self.max_hp as f64
    }
}

/// One action by `actor` against `target`. Returns true if the target dropped.
fn take_turn(
    round: u32,
    actor: &mut Fighter<'_>,
    target: &mut Fighter<'_>,
    rng: &mut Rng,
    log: Option<&mut Vec<BattleEvent>>,
) -> bool {
    let action = choose_action(actor.hp, actor.max_hp, actor.energy, rng);
    let dealt = damage(actor.hero, target.hero, action, target.defending);
    target.hp = (target.hp - dealt).max(0);
    actor.energy = next_energy(actor.energy, action);
    actor.defending = action == Action::Defense;

    if let Some(log) = log {
        log.push(BattleEvent {
            round,
            actor_id: actor.hero.id,
            action,
            damage: dealt as u32,
            target_hp: target.hp as u32,
            actor_energy: actor.energy,
        });
    }
    target.hp == 0
}

pub fn simulate_battle(hero1: &Hero, hero2: &Hero, seed: u64) -> BattleResult {
    run_battle(hero1, hero2, BattleConfig::seeded(seed))
}

pub fn run_battle(hero1: &Hero, hero2: &Hero, config: BattleConfig) -> BattleResult {
    let mut rng = Rng::new(config.seed);
    let mut a = Fighter::new(hero1);
    let mut b = Fighter::new(hero2);
    let mut log = Vec::new();
    let tracing_events = config.trace_mode == TraceMode::Events;

    let mut rounds = 0;
    let mut knockout = false;
    while rounds < config.max_rounds.max(1) {
        rounds += 1;
        if take_turn(rounds, &mut a, &mut b, &mut rng, tracing_events.then_some(&mut log)) {
            knockout = true;
            break;
        }
        if take_turn(rounds, &mut b, &mut a, &mut rng, tracing_events.then_some(&mut log)) {
            knockout = true;
            break;
        }
    }

    // On the round limit: higher HP share, then higher power, then hero A.
    let a_wins = if knockout {
        b.hp == 0
    } else {
        a.hp_fraction()
            .total_cmp(&b.hp_fraction())
            .then_with(|| hero1.power.cmp(&hero2.power))
            .is_ge()
    };
    let (winner, loser) = if a_wins { (hero1, hero2) } else { (hero2, hero1) };

    BattleResult {
        winner_id: winner.id,
        loser_id: loser.id,
        winner_name: winner.name.clone(),
        loser_name: loser.name.clone(),
        rounds,
        winner_by_round_limit: !knockout,
        final_hp: [a.hp as u32, b.hp as u32],
        max_hp: [a.max_hp as u32, b.max_hp as u32],
        log,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::hero::{HeroStats, Tier, Universe};

    fn hero(id: u32, power: u8, stats: HeroStats) -> Hero {
        Hero {
            id,
            name: format!("Hero {id}"),
            universe: Universe::Marvel,
            tier: Tier::B,
            power,
            image: String::new(),
            color: String::new(),
            abilities: vec![],
            description: String::new(),
            reason: String::new(),
            stats,
        }
    }

    #[test]
    fn max_hp_is_clamped() {
        // 100 + round(60 + 25) = 185
        assert_eq!(max_hp(&hero(1, 50, HeroStats::new(50, 50, 50, 50, 50))), 185);
        // 100 + round(120 + 50) = 270 -> 250
        assert_eq!(max_hp(&hero(1, 100, HeroStats::new(100, 100, 100, 100, 100))), 250);
        // zero durability counts as 10: 100 + round(12 + 0) = 112
        assert_eq!(max_hp(&hero(1, 0, HeroStats::new(0, 0, 0, 0, 0))), 112);
    }

    #[test]
    fn damage_follows_formula() {
        let attacker = hero(1, 80, HeroStats::new(90, 50, 50, 60, 50));
        let defender = hero(2, 40, HeroStats::new(50, 50, 40, 50, 50));
        // defender max hp = 100 + round(48 + 20) = 168, floor 16.8
        // attack: 36 + 12 = 48, minus 6 = 42
        assert_eq!(damage(&attacker, &defender, Action::Attack, false), 42);
        // defending halves: 21
        assert_eq!(damage(&attacker, &defender, Action::Attack, true), 21);
        // tactics: 18 + 9.6 = 27.6 - 6 = 21.6, halved 10.8 -> floor 16.8 -> 17
        assert_eq!(damage(&attacker, &defender, Action::Tactics, true), 17);
        // ultimate: 144 - 6 = 138
        assert_eq!(damage(&attacker, &defender, Action::Ultimate, false), 138);
        assert_eq!(damage(&attacker, &defender, Action::Defense, false), 0);
    }

    #[test]
    fn zero_stats_count_as_fifty_for_damage() {
        let zero = hero(1, 0, HeroStats::new(0, 0, 0, 0, 0));
        let fifty = hero(1, 0, HeroStats::new(50, 0, 50, 50, 0));
        let target = hero(2, 0, HeroStats::new(0, 0, 0, 0, 0));
        assert_eq!(
            damage(&zero, &target, Action::Attack, false),
            damage(&fifty, &target, Action::Attack, false)
        );
    }

    #[test]
    fn energy_rules() {
        assert_eq!(next_energy(90, Action::Tactics), 100);
        assert_eq!(next_energy(10, Action::Attack), 30);
        assert_eq!(next_energy(10, Action::Defense), 30);
        assert_eq!(next_energy(100, Action::Ultimate), 0);
    }

    #[test]
    fn charged_fighter_always_uses_ultimate() {
        let mut rng = Rng::new(3);
        for _ in 0..50 {
            assert_eq!(choose_action(10, 200, 100, &mut rng), Action::Ultimate);
        }
    }

    #[test]
    fn healthy_fighter_never_defends_more_than_expected() {
        let mut rng = Rng::new(11);
        let defends = (0..10_000)
            .filter(|_| choose_action(200, 200, 0, &mut rng) == Action::Defense)
            .count();
        // 15 % expected
        assert!((1_000..2_000).contains(&defends), "{defends}");
    }

    #[test]
    fn battle_is_deterministic_per_seed() {
        let a = hero(1, 90, HeroStats::new(90, 80, 85, 70, 80));
        let b = hero(2, 60, HeroStats::new(60, 60, 60, 60, 60));
        let first = simulate_battle(&a, &b, 42);
        let second = simulate_battle(&a, &b, 42);
        assert_eq!(first, second);
        assert!(first.rounds >= 1 && first.rounds <= MAX_ROUNDS);
        assert!(!first.log.is_empty());
        assert_eq!(first.log[0].actor_id, 1);
    }

    #[test]
    fn loser_ends_at_zero_on_knockout() {
        let a = hero(1, 100, HeroStats::new(100, 100, 100, 100, 100));
        let b = hero(2, 5, HeroStats::new(5, 5, 5, 5, 5));
        let result = simulate_battle(&a, &b, 1);
        assert_eq!(result.winner_id, 1);
        assert!(!result.winner_by_round_limit);
        assert_eq!(result.final_hp[1], 0);
    }

    #[test]
    fn round_limit_uses_hp_share_then_power() {
        let a = hero(1, 50, HeroStats::new(50, 50, 50, 50, 50));
        let b = hero(2, 60, HeroStats::new(50, 50, 50, 50, 50));
        let result = run_battle(
            &a,
            &b,
            BattleConfig {
                seed: 5,
                max_rounds: 1,
                trace_mode: TraceMode::Off,
            },
        );
        assert!(result.log.is_empty());
        assert_eq!(result.rounds, 1);
        assert!(result.winner_by_round_limit);
        let share_a = f64::from(result.final_hp[0]) / f64::from(result.max_hp[0]);
        let share_b = f64::from(result.final_hp[1]) / f64::from(result.max_hp[1]);
        let expected = if share_a > share_b {
            1
        } else if share_b > share_a {
            2
        } else {
            2 // equal share, b has more power
        };
        assert_eq!(result.winner_id, expected);
    }
}

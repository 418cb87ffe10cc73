use rayon::prelude::*;
use serde::Serialize;

use crate::battle::engine::{run_battle, BattleConfig, TraceMode, MAX_ROUNDS};
use crate::battle::rng::Rng;
use crate::data::hero::Hero;

pub const DEFAULT_SIMULATIONS: usize = 1_000;
pub const MAX_SIMULATIONS: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupOdds {
    pub hero1_id: u32,
    pub hero2_id: u32,
    pub simulations: usize,
    pub hero1_wins: usize,
    pub hero2_wins: usize,
    pub hero1_win_rate: f64,
    pub hero2_win_rate: f64,
    pub avg_rounds: f64,
    pub round_limit_finishes: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    hero1_wins: usize,
    rounds: u64,
    round_limit: usize,
}

impl Tally {
    fn merge(self, other: Self) -> Self {
        Self {
            hero1_wins: self.hero1_wins + other.hero1_wins,
            rounds: self.rounds + other.rounds,
            round_limit: self.round_limit + other.round_limit,
        }
    }
}

/// Win rates over `simulations` seeded battles, run across all cores.
/// Battle `i` draws its seed from stream `i` of `seed`, so the result is
/// independent of thread count.
pub fn matchup_odds(hero1: &Hero, hero2: &Hero, simulations: usize, seed: u64) -> MatchupOdds {
    let simulations = simulations.clamp(1, MAX_SIMULATIONS);

    let tally = (0..simulations)
        .into_par_iter()
        .map(|iteration| {
            let result = run_battle(
                hero1,
                hero2,
                BattleConfig {
                    seed: Rng::fork(seed, iteration as u64).next_u64(),
                    max_rounds: MAX_ROUNDS,
                    trace_mode: TraceMode::Off,
                },
            );
            Tally {
                hero1_wins: usize::from(result.hero1_won(hero1.id)),
                rounds: u64::from(result.rounds),
                round_limit: usize::from(result.winner_by_round_limit),
            }
        })
        .reduce(Tally::default, Tally::merge);

    let hero2_wins = simulations - tally.hero1_wins;
    tracing::debug!(
        hero1 = hero1.id,
        hero2 = hero2.id,
        simulations,
        hero1_wins = tally.hero1_wins,
        "matchup odds computed"
    );

    MatchupOdds {
        hero1_id: hero1.id,
        hero2_id: hero2.id,
        simulations,
        hero1_wins: tally.hero1_wins,
        hero2_wins,
        hero1_win_rate: tally.hero1_wins as f64 / simulations as f64,
        hero2_win_rate: hero2_wins as f64 / simulations as f64,
        avg_rounds: tally.rounds as f64 / simulations as f64,
        round_limit_finishes: tally.round_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::engine::simulate_battle;
    use crate::data::hero::{HeroStats, Tier, Universe};

    fn hero(id: u32, power: u8, stats: HeroStats) -> Hero {
        Hero {
            id,
            name: format!("Hero {id}"),
            universe: Universe::Dc,
            tier: Tier::A,
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
    fn odds_are_deterministic_for_a_seed() {
        let a = hero(1, 85, HeroStats::new(85, 70, 80, 60, 75));
        let b = hero(2, 80, HeroStats::new(80, 75, 75, 70, 70));
        let first = matchup_odds(&a, &b, 500, 9);
        let second = matchup_odds(&a, &b, 500, 9);
        assert_eq!(first, second);
        assert_eq!(first.hero1_wins + first.hero2_wins, 500);
        assert!((first.hero1_win_rate + first.hero2_win_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn stronger_hero_is_favoured() {
        let strong = hero(1, 100, HeroStats::new(100, 90, 100, 90, 90));
        let weak = hero(2, 20, HeroStats::new(20, 20, 20, 20, 20));
        let odds = matchup_odds(&strong, &weak, 200, 1);
        assert!(odds.hero1_win_rate > 0.95, "{odds:?}");
    }

    #[test]
    fn single_simulation_uses_the_first_forked_stream() {
        let a = hero(1, 70, HeroStats::new(70, 60, 70, 60, 60));
        let b = hero(2, 68, HeroStats::new(65, 70, 60, 70, 65));
        let odds = matchup_odds(&a, &b, 1, 21);
        let battle = simulate_battle(&a, &b, Rng::fork(21, 0).next_u64());
        assert_eq!(odds.hero1_wins, usize::from(battle.hero1_won(a.id)));
        assert_eq!(odds.avg_rounds, f64::from(battle.rounds));
    }

    #[test]
    fn zero_simulations_still_runs_one() {
        let a = hero(1, 50, HeroStats::new(50, 50, 50, 50, 50));
        let odds = matchup_odds(&a, &a.clone(), 0, 3);
        assert_eq!(odds.simulations, 1);
    }
}

pub mod engine;
pub mod history;
pub mod odds;
pub mod rng;

pub use engine::{
    choose_action, damage, max_hp, next_energy, run_battle, simulate_battle, Action, BattleConfig,
    BattleEvent, BattleResult, TraceMode, MAX_ROUNDS,
};
pub use history::{win_counts, BattleHistory, BattleRecord, HistorySummary, HISTORY_LIMIT};
pub use odds::{matchup_odds, MatchupOdds, DEFAULT_SIMULATIONS};
pub use rng::Rng;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use crate::battle::{matchup_odds, simulate_battle, BattleHistory, BattleRecord, Rng};
use crate::classify::{enrich_heroes, EnrichedIndex, HeroClass, PowerType};
use crate::config::AppConfig;
use crate::data::dataset::find_hero;
use crate::data::hero::{Tier, Universe};
use crate::data::validate::{validate_hero_dataset, ValidationSeverity};
use crate::filter::{apply_filter, FilterState, RangeKey, Selection};
use crate::generator::run_generation;
use crate::ranking::{compare_heroes, rank_heroes, SortBy};
use crate::server;
use crate::store::HeroStore;

#[derive(Debug, Parser)]
#[command(name = "herorank", version, about = "Superhero tier list: generate, query and battle")]
pub struct Cli {
    /// YAML config file (defaults to herorank.yaml or HERORANK_CONFIG).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Resolve every data path relative to this directory.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API (and front-end, when built).
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
    /// Rebuild the hero dataset from the source files.
    Generate,
    /// Check a dataset file for schema and consistency problems.
    Validate { path: Option<PathBuf> },
    /// Filter the dataset and print matches plus category counts.
    Filter(FilterArgs),
    /// Rank heroes by power, a stat, or the stat average.
    Rank {
        #[arg(long, default_value = "power")]
        sort: SortBy,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        table: bool,
    },
    /// Compare up to four heroes stat by stat.
    Compare { ids: Vec<u32> },
    /// Simulate one battle, or estimate odds with --odds.
    Battle {
        hero1: u32,
        hero2: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Number of simulations for a win-rate estimate instead of a single fight.
        #[arg(long)]
        odds: Option<usize>,
        /// Do not append the fight to the battle history.
        #[arg(long)]
        no_record: bool,
    },
    /// Show recorded battles and win counts.
    Battles,
    /// Dataset totals by universe and tier.
    Stats,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = "all")]
    pub universe: Selection<Universe>,
    #[arg(long, default_value = "all")]
    pub tier: Selection<Tier>,
    #[arg(long = "class", default_value = "all")]
    pub hero_class: Selection<HeroClass>,
    #[arg(long, default_value = "all")]
    pub power_type: Selection<PowerType>,
    /// `KEY=LO..HI`, e.g. `power=75..100` or `speed=50..`. Repeatable.
    #[arg(long = "range", value_parser = parse_range)]
    pub ranges: Vec<(RangeKey, i64, i64)>,
    #[arg(long)]
    pub table: bool,
}

impl FilterArgs {
    pub fn to_state(&self) -> FilterState {
        let mut state = FilterState::default();
        state.set_search_term(self.search.clone());
        state.set_universe(self.universe);
        state.set_tier(self.tier);
        state.set_hero_class(self.hero_class);
        state.set_power_type(self.power_type);
        for &(key, lo, hi) in &self.ranges {
            state.set_stat_range(key, lo, hi);
        }
        state
    }
}

pub fn parse_range(raw: &str) -> Result<(RangeKey, i64, i64), String> {
    let (key, bounds) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=LO..HI, got '{raw}'"))?;
    let key: RangeKey = key.parse()?;
    let (lo, hi) = bounds
        .split_once("..")
        .ok_or_else(|| format!("expected LO..HI, got '{bounds}'"))?;
    let bound = |v: &str, default: i64| -> Result<i64, String> {
        let v = v.trim();
        if v.is_empty() {
            Ok(default)
        } else {
            v.parse().map_err(|_| format!("invalid bound '{v}'"))
        }
    };
    Ok((key, bound(lo, 0)?, bound(hi, 100)?))
}

/// Parse and run. 0 on success, 1 on failure, 2 on usage errors.
pub fn run_with_args(args: &[String]) -> i32 {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 2 } else { 0 };
            let _ = err.print();
            return code;
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    }
}

pub fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = AppConfig::from_yaml_file(path)
                .with_context(|| format!("loading config '{}'", path.display()))?;
            config.apply_env(|key| std::env::var(key).ok());
            config
        }
        None => AppConfig::load().context("loading config")?,
    };
    if let Some(dir) = &cli.data_dir {
        let bind = config.bind;
        config = AppConfig {
            bind,
            ..AppConfig::rooted_at(dir)
        };
    }
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = resolve_config(&cli)?;
    match cli.command {
        Command::Serve { bind } => {
            let mut config = config;
            if let Some(bind) = bind {
                config.bind = bind;
            }
            server::run_server(&config).context("server error")?;
            Ok(0)
        }
        Command::Generate => handle_generate(&config),
        Command::Validate { path } => handle_validate(path.unwrap_or(config.dataset)),
        Command::Filter(args) => handle_filter(&config, &args),
        Command::Rank { sort, limit, table } => handle_rank(&config, sort, limit, table),
        Command::Compare { ids } => handle_compare(&config, &ids),
        Command::Battle {
            hero1,
            hero2,
            seed,
            odds,
            no_record,
        } => handle_battle(&config, hero1, hero2, seed, odds, no_record),
        Command::Battles => print_json(&BattleHistory::new(&config.battle_history).summary()),
        Command::Stats => print_json(&HeroStore::new(&config.dataset).stats()?),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<i32> {
    println!("{}", serde_json::to_string_pretty(value).context("serializing output")?);
    Ok(0)
}

fn load_index(config: &AppConfig) -> anyhow::Result<EnrichedIndex> {
    let heroes = HeroStore::new(&config.dataset)
        .heroes()
        .with_context(|| format!("reading dataset '{}'", config.dataset.display()))?;
    Ok(EnrichedIndex::new(&heroes))
}

fn handle_generate(config: &AppConfig) -> anyhow::Result<i32> {
    let report = run_generation(config).context("generation failed")?;
    println!(
        "generated {} heroes into '{}' (duplicates dropped: {}, corrections: {}, stats repaired: {})",
        report.total,
        config.dataset.display(),
        report.duplicates_dropped,
        report.corrections_applied,
        report.stats_repaired
    );
    Ok(0)
}

fn handle_validate(path: PathBuf) -> anyhow::Result<i32> {
    let report = validate_hero_dataset(&path).with_context(|| format!("cannot validate {}", path.display()))?;
    for diag in &report.diagnostics {
        eprintln!("[{}] {}: {}", diag.severity, diag.context, diag.message);
    }
    if report.has_errors() {
        eprintln!(
            "validation failed: {} error(s), {} warning(s)",
            report.count(ValidationSeverity::Error),
            report.count(ValidationSeverity::Warning)
        );
        return Ok(1);
    }
    println!(
        "validation passed: {} ({} warning(s), {} note(s))",
        path.display(),
        report.count(ValidationSeverity::Warning),
        report.count(ValidationSeverity::Info)
    );
    Ok(0)
}

fn handle_filter(config: &AppConfig, args: &FilterArgs) -> anyhow::Result<i32> {
    let index = load_index(config)?;
    let outcome = apply_filter(index.heroes(), &args.to_state());
    if !args.table {
        return print_json(&outcome);
    }
    println!("id\tname\tuniverse\ttier\tpower\tclass\tavg");
    for hero in &outcome.heroes {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            hero.hero.id,
            hero.hero.name,
            hero.hero.universe,
            hero.hero.tier,
            hero.hero.power,
            hero.hero_class,
            hero.avg_stats
        );
    }
    println!("# {} of {} heroes", outcome.stats.filtered, outcome.stats.total);
    Ok(0)
}

fn handle_rank(config: &AppConfig, sort: SortBy, limit: Option<usize>, table: bool) -> anyhow::Result<i32> {
    let heroes = HeroStore::new(&config.dataset).heroes()?;
    let ranked = rank_heroes(&enrich_heroes(&heroes), sort, limit);
    if !table {
        return print_json(&ranked);
    }
    println!("rank\t{sort}\tname\ttier");
    for entry in &ranked {
        println!(
            "{}\t{}\t{}\t{}",
            entry.rank, entry.value, entry.hero.hero.name, entry.hero.hero.tier
        );
    }
    Ok(0)
}

fn handle_compare(config: &AppConfig, ids: &[u32]) -> anyhow::Result<i32> {
    let index = load_index(config)?;
    let mut selected = Vec::with_capacity(ids.len());
    for &id in ids {
        match index.get(id) {
            Some(hero) => selected.push(hero),
            None => bail!("hero {id} not found"),
        }
    }
    print_json(&compare_heroes(&selected)?)
}

fn handle_battle(
    config: &AppConfig,
    hero1: u32,
    hero2: u32,
    seed: Option<u64>,
    odds: Option<usize>,
    no_record: bool,
) -> anyhow::Result<i32> {
    if hero1 == hero2 {
        bail!("a hero cannot battle itself");
    }
    let heroes = HeroStore::new(&config.dataset).heroes()?;
    let find = |id: u32| find_hero(&heroes, id).with_context(|| format!("hero {id} not found"));
    let (a, b) = (find(hero1)?, find(hero2)?);
    let seed = seed.unwrap_or_else(|| Rng::from_entropy().next_u64());

    if let Some(simulations) = odds {
        return print_json(&matchup_odds(a, b, simulations, seed));
    }

    let result = simulate_battle(a, b, seed);
    if !no_record {
        BattleHistory::new(&config.battle_history)
            .record(BattleRecord::from_result(&result))
            .context("recording battle")?;
    }
    eprintln!("seed {seed}");
    print_json(&result)
}

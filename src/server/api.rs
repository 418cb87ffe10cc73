use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::battle::{
    matchup_odds, simulate_battle, BattleHistory, BattleRecord, BattleResult, Rng, DEFAULT_SIMULATIONS,
};
use crate::classify::{enrich_heroes, EnrichedHero, EnrichedIndex};
use crate::config::AppConfig;
use crate::data::dataset::find_hero;
use crate::data::hero::Hero;
use crate::data::registry::{load_registry, registry_path_for};
use crate::error::Error;
use crate::filter::{apply_filter, FilterState};
use crate::generator::DATASET_NAME;
use crate::ranking::{compare_heroes, rank_heroes, SortBy};
use crate::store::{BulkUpdate, HeroPatch, HeroStore};

pub const EXPORT_FILENAME: &str = "superheroes-export.json";

/// Files every request works against. Cheap to clone; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct ApiContext {
    pub store: HeroStore,
    pub history: BattleHistory,
}

impl ApiContext {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            store: HeroStore::new(&config.dataset),
            history: BattleHistory::new(&config.battle_history),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Internal(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::HeroNotFound(_) => Self::NotFound(err.to_string()),
            Error::InvalidPayload(_) | Error::TooManyHeroes { .. } => Self::BadRequest(err.to_string()),
            other => {
                tracing::error!(error = %other, "request failed");
                Self::Internal(other.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

pub type ApiResult = Result<String, ApiError>;

fn parse_body<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::BadRequest(format!("Invalid request body: {err}")))
}

fn hero_not_found() -> ApiError {
    ApiError::NotFound("Hero not found".to_string())
}

fn message(text: String) -> ApiResult {
    Ok(serde_json::to_string_pretty(&serde_json::json!({ "message": text }))?)
}

/// First value of `key` in the query string of `path`.
pub fn query_param<'a>(path: &'a str, key: &str) -> Option<&'a str> {
    let query = path.split_once('?')?.1;
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (k.trim() == key).then(|| v.trim())
    })
}

pub fn parse_hero_id(raw: &str) -> Result<u32, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid hero id '{raw}'")))
}

/// Liveness plus the dataset's registry entry, when the generator has written one.
pub fn health_payload(ctx: &ApiContext) -> ApiResult {
    let dataset = load_registry(registry_path_for(ctx.store.path()))
        .and_then(|mut registry| registry.remove(DATASET_NAME));
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "herorank-api",
        "version": env!("CARGO_PKG_VERSION"),
        "dataset": dataset,
    }))?)
}

pub fn heroes_payload(ctx: &ApiContext) -> ApiResult {
    Ok(serde_json::to_string_pretty(&ctx.store.read_all()?)?)
}

pub fn hero_payload(ctx: &ApiContext, id: u32) -> ApiResult {
    let hero = ctx.store.get(id)?.ok_or_else(hero_not_found)?;
    Ok(serde_json::to_string_pretty(&hero)?)
}

pub fn update_hero_payload(ctx: &ApiContext, id: u32, body: &str) -> ApiResult {
    let patch: HeroPatch = parse_body(body)?;
    patch.validate()?;
    let updated = ctx.store.update(id, &patch)?.ok_or_else(hero_not_found)?;
    tracing::info!(id, "hero updated");
    Ok(serde_json::to_string_pretty(&updated)?)
}

pub fn create_hero_payload(ctx: &ApiContext, body: &str) -> ApiResult {
    let hero: Value = parse_body(body)?;
    let created = ctx.store.create(hero)?;
    tracing::info!(id = ?created.get("id"), "hero created");
    Ok(serde_json::to_string_pretty(&created)?)
}

pub fn delete_hero_payload(ctx: &ApiContext, id: u32) -> ApiResult {
    if !ctx.store.delete(id)? {
        return Err(hero_not_found());
    }
    tracing::info!(id, "hero deleted");
    message("Hero deleted".to_string())
}

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub updates: Vec<BulkUpdate>,
}

pub fn bulk_update_payload(ctx: &ApiContext, body: &str) -> ApiResult {
    let request: BulkRequest = parse_body(body)?;
    for update in &request.updates {
        update.patch.validate()?;
    }
    let outcome = ctx.store.bulk_update(&request.updates)?;
    tracing::info!(requested = outcome.requested, applied = outcome.applied, "bulk update");
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "message": format!("Updated {} heroes", outcome.requested),
        "requested": outcome.requested,
        "applied": outcome.applied,
    }))?)
}

pub fn export_payload(ctx: &ApiContext) -> ApiResult {
    heroes_payload(ctx)
}

/// `{ "heroes": [...] }`. Anything but an array is refused before the file is touched.
pub fn import_payload(ctx: &ApiContext, body: &str) -> ApiResult {
    let request: Value = parse_body(body)?;
    let Some(heroes) = request.get("heroes").and_then(Value::as_array) else {
        return Err(ApiError::BadRequest("Invalid data format".to_string()));
    };
    let count = ctx.store.replace_all(heroes)?;
    tracing::info!(count, "dataset imported");
    message(format!("Imported {count} heroes"))
}

pub fn stats_payload(ctx: &ApiContext) -> ApiResult {
    Ok(serde_json::to_string_pretty(&ctx.store.stats()?)?)
}

fn enriched(ctx: &ApiContext) -> Result<Vec<EnrichedHero>, ApiError> {
    Ok(enrich_heroes(&ctx.store.heroes()?))
}

/// Empty body means "no filters".
pub fn filter_payload(ctx: &ApiContext, body: &str) -> ApiResult {
    let state: FilterState = if body.trim().is_empty() {
        FilterState::default()
    } else {
        parse_body(body)?
    };
    let outcome = apply_filter(&enriched(ctx)?, &state);
    Ok(serde_json::to_string_pretty(&outcome)?)
}

pub fn rankings_payload(ctx: &ApiContext, path: &str) -> ApiResult {
    let sort = match query_param(path, "sort").filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse::<SortBy>().map_err(ApiError::BadRequest)?,
        None => SortBy::default(),
    };
    let limit = match query_param(path, "limit").filter(|v| !v.is_empty()) {
        Some(raw) => Some(
            raw.parse::<usize>()
                .map_err(|_| ApiError::BadRequest(format!("Invalid limit '{raw}'")))?,
        ),
        None => None,
    };
    let ranked = rank_heroes(&enriched(ctx)?, sort, limit);
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "sort": sort,
        "heroes": ranked,
    }))?)
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub ids: Vec<u32>,
}

pub fn compare_payload(ctx: &ApiContext, body: &str) -> ApiResult {
    let request: CompareRequest = parse_body(body)?;
    let index = EnrichedIndex::new(&ctx.store.heroes()?);
    let selected = request
        .ids
        .iter()
        .map(|&id| index.get(id).ok_or(Error::HeroNotFound(id)))
        .collect::<Result<Vec<_>, _>>()?;
    let comparison = compare_heroes(&selected)?;
    Ok(serde_json::to_string_pretty(&comparison)?)
}

#[derive(Debug, Deserialize)]
pub struct BattleRequest {
    pub hero1: u32,
    pub hero2: u32,
    pub seed: Option<u64>,
    pub sims: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResponse {
    pub seed: u64,
    pub result: BattleResult,
    pub record: BattleRecord,
}

fn battle_pair(ctx: &ApiContext, request: &BattleRequest) -> Result<(Hero, Hero), ApiError> {
    if request.hero1 == request.hero2 {
        return Err(ApiError::BadRequest("A hero cannot battle itself".to_string()));
    }
    let heroes = ctx.store.heroes()?;
    let find = |id: u32| find_hero(&heroes, id).cloned().ok_or(Error::HeroNotFound(id));
    Ok((find(request.hero1)?, find(request.hero2)?))
}

pub fn battle_payload(ctx: &ApiContext, body: &str) -> ApiResult {
    let request: BattleRequest = parse_body(body)?;
    let (hero1, hero2) = battle_pair(ctx, &request)?;
    let seed = request.seed.unwrap_or_else(|| Rng::from_entropy().next_u64());
    let result = simulate_battle(&hero1, &hero2, seed);
    let record = BattleRecord::from_result(&result);
    ctx.history.record(record.clone())?;
    tracing::info!(
        winner = %result.winner_name,
        loser = %result.loser_name,
        rounds = result.rounds,
        seed,
        "battle recorded"
    );
    Ok(serde_json::to_string_pretty(&BattleResponse { seed, result, record })?)
}

pub fn battle_odds_payload(ctx: &ApiContext, body: &str) -> ApiResult {
    let request: BattleRequest = parse_body(body)?;
    let (hero1, hero2) = battle_pair(ctx, &request)?;
    let seed = request.seed.unwrap_or_else(|| Rng::from_entropy().next_u64());
    let odds = matchup_odds(&hero1, &hero2, request.sims.unwrap_or(DEFAULT_SIMULATIONS), seed);
    Ok(serde_json::to_string_pretty(&odds)?)
}

pub fn battles_payload(ctx: &ApiContext) -> ApiResult {
    Ok(serde_json::to_string_pretty(&ctx.history.summary())?)
}

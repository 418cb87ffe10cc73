//! Filter engine throughput over a synthetic roster.
//!
//! Run with: `cargo bench --bench filter`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use herorank::classify::{enrich_heroes, PowerType};
use herorank::data::hero::{Hero, HeroStats, Tier, Universe};
use herorank::filter::{apply_filter, filter_heroes, FilterState, RangeKey, Selection};
use herorank::generator::{synthesize_stats, tier_color};
use herorank::generator::scoring::{compute_power, tier_for_power};

const ABILITY_POOL: [&str; 6] = [
    "Superstärke",
    "Energieprojektion",
    "Magie",
    "Technologie",
    "Telepathie",
    "Kampfkunst",
];

fn synthetic_roster(size: u32) -> Vec<Hero> {
    (1..=size)
        .map(|id| {
            let name = format!("Hero {id}");
            let stats: HeroStats = synthesize_stats(&name, (id % 100) as u8);
            let power = compute_power(&stats);
            let tier = tier_for_power(power);
            Hero {
                id,
                name,
                universe: if id % 3 == 0 { Universe::Dc } else { Universe::Marvel },
                tier,
                power,
                image: String::new(),
                color: tier_color(tier).to_string(),
                abilities: vec![
                    ABILITY_POOL[id as usize % ABILITY_POOL.len()].to_string(),
                    ABILITY_POOL[(id as usize / 7) % ABILITY_POOL.len()].to_string(),
                ],
                description: String::new(),
                reason: String::new(),
                stats,
            }
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let heroes = enrich_heroes(&synthetic_roster(2_000));

    let mut state = FilterState::default();
    state.set_search_term("1");
    state.set_universe(Selection::Only(Universe::Marvel));
    state.set_power_type(Selection::Only(PowerType::Energy));
    state.set_stat_range(RangeKey::Power, 30, 90);

    let mut group = c.benchmark_group("filter");
    group.throughput(Throughput::Elements(heroes.len() as u64));

    group.bench_function("predicates_only", |b| {
        b.iter(|| black_box(filter_heroes(black_box(&heroes), black_box(&state)).len()))
    });

    group.bench_function("with_stats", |b| {
        b.iter(|| black_box(apply_filter(black_box(&heroes), black_box(&state))))
    });

    let tier_only = FilterState {
        tier_filter: Selection::Only(Tier::A),
        ..FilterState::default()
    };
    group.bench_function("tier_only", |b| {
        b.iter(|| black_box(apply_filter(black_box(&heroes), black_box(&tier_only))))
    });

    group.finish();
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);

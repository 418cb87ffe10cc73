use herorank::classify::{enrich_hero, hero_class, HeroClass};
use herorank::data::hero::{Hero, HeroStats, Tier, Universe};
use herorank::data::sources::{DcBaseRecord, DcExtraRecord, DcRoster, MarvelRawRecord, RawStats};
use herorank::filter::{filter_heroes, FilterState, RangeKey, Selection};
use herorank::generator::corrections::{CorrectionTables, DescriptionTables};
use herorank::generator::scoring::{compute_power, tier_for_power};
use herorank::generator::{assign_ids, finalize_order, generate, GeneratorInputs};

fn marvel(name: &str, race: &str, stats: HeroStats) -> MarvelRawRecord {
    MarvelRawRecord {
        name: name.to_string(),
        race: Some(race.to_string()),
        stats: Some(RawStats::from(stats)),
        ..MarvelRawRecord::default()
    }
}

fn dc_base(name: &str, power: f64) -> DcBaseRecord {
    DcBaseRecord {
        name: name.to_string(),
        race: None,
        tier: None,
        power: Some(power),
        abilities: Some(vec!["Flug".to_string()]),
        description: None,
        reason: None,
        stats: Some(RawStats::from(HeroStats::new(70, 70, 70, 70, 70))),
        image: None,
        color: None,
    }
}

fn dc_extra(name: &str, power: f64) -> DcExtraRecord {
    DcExtraRecord {
        name: name.to_string(),
        tier: None,
        power: Some(power),
        image: None,
        abilities: vec![],
    }
}

fn mixed_inputs() -> (Vec<MarvelRawRecord>, DcRoster) {
    let marvel = vec![
        marvel("Captain Example", "Human", HeroStats::new(100, 90, 95, 70, 80)),
        marvel("Mutie", "mutant", HeroStats::new(100, 100, 100, 100, 100)),
        marvel("Shadow", "Unknown", HeroStats::new(5, 5, 5, 5, 5)),
    ];
    let dc = DcRoster {
        base: vec![dc_base("shadow", 99.0), dc_base("Night Owl", 61.0)],
        extras: vec![dc_extra("NIGHT OWL", 95.0), dc_extra("Sparrow", 33.0)],
    };
    (marvel, dc)
}

fn generated() -> Vec<Hero> {
    let (marvel, dc) = mixed_inputs();
    let corrections = CorrectionTables::default();
    let descriptions = DescriptionTables::default();
    generate(GeneratorInputs {
        marvel: &marvel,
        dc: &dc,
        corrections: &corrections,
        descriptions: &descriptions,
    })
    .heroes
}

#[test]
fn power_and_stats_stay_on_scale() {
    for hero in generated() {
        assert!(hero.power <= 100, "{}", hero.name);
        assert!(hero.stats.values().iter().all(|&v| v <= 100), "{}", hero.name);
    }
}

#[test]
fn uncorrected_tiers_follow_thresholds() {
    for hero in generated() {
        assert_eq!(hero.tier, tier_for_power(hero.power), "{}", hero.name);
        assert_ne!(hero.tier, Tier::Cosmic);
    }
}

#[test]
fn worked_examples() {
    let example = HeroStats::new(100, 90, 95, 70, 80);
    assert_eq!(compute_power(&example), 89);
    assert_eq!(tier_for_power(89), Tier::A);

    let heroes = generated();
    let mutie = heroes.iter().find(|h| h.name == "Mutie").expect("generated");
    assert_eq!(mutie.stats, HeroStats::new(50, 45, 50, 55, 60));
    assert_eq!((mutie.power, mutie.tier), (52, Tier::C));
}

#[test]
fn dedup_keeps_earlier_source() {
    let heroes = generated();
    let shadows: Vec<&Hero> = heroes.iter().filter(|h| h.name.eq_ignore_ascii_case("shadow")).collect();
    assert_eq!(shadows.len(), 1);
    assert_eq!(shadows[0].universe, Universe::Marvel);

    let owls: Vec<&Hero> = heroes.iter().filter(|h| h.name.eq_ignore_ascii_case("night owl")).collect();
    assert_eq!(owls.len(), 1);
    assert_eq!(owls[0].power, 61, "DC base wins over the synthesized extra");
    assert_eq!(heroes.len(), 5);
}

#[test]
fn id_assignment_is_idempotent() {
    let heroes = generated();
    let mut again = finalize_order(heroes.clone());
    assert_eq!(again, heroes);
    assign_ids(&mut again);
    assert_eq!(again, heroes);
}

#[test]
fn speedster_rule_precedes_tank_rule() {
    // speed 90 satisfies Speedster; durability 90 with strength 85 satisfies Tank.
    let stats = HeroStats::new(85, 90, 90, 40, 40);
    assert_eq!(hero_class(Tier::A, Some(&stats)), HeroClass::Speedster);
}

#[test]
fn filter_predicates_are_conjunctive() {
    let hero = Hero {
        id: 1,
        name: "Solo".to_string(),
        universe: Universe::Marvel,
        tier: Tier::S,
        power: 95,
        image: String::new(),
        color: String::new(),
        abilities: vec![],
        description: String::new(),
        reason: String::new(),
        stats: HeroStats::new(90, 90, 90, 90, 90),
    };
    let heroes = vec![enrich_hero(&hero)];

    let mut state = FilterState::default();
    state.set_universe(Selection::Only(Universe::Marvel));
    state.set_tier(Selection::Only(Tier::S));
    assert_eq!(filter_heroes(&heroes, &state).len(), 1);

    state.set_stat_range(RangeKey::Power, 0, 90);
    assert!(filter_heroes(&heroes, &state).is_empty());
}

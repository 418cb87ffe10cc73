use crate::data::hero::{HeroStats, MAX_ABILITIES};

pub const FALLBACK_ABILITY: &str = "Spezielle Fähigkeiten";

/// First key that is a substring of the lowercased race wins.
pub const ABILITY_TEMPLATES: [(&str, &[&str]); 20] = [
    ("mutant", &["Mutantenkraft", "Genetische Besonderheit", "X-Gen"]),
    ("human", &["Menschliche Fähigkeiten", "Training", "Ausrüstung"]),
    ("asgardian", &["Göttliche Kraft", "Langlebigkeit", "Asgardische Magie"]),
    ("kree", &["Kree-Physiologie", "Übermenschliche Stärke", "Kampftraining"]),
    ("skrull", &["Formwandlung", "Infiltration", "Skrull-Technologie"]),
    ("inhuman", &["Terrigenese", "Inhuman-Kraft", "Genetische Mutation"]),
    ("eternal", &["Kosmische Energie", "Unsterblichkeit", "Molekularmanipulation"]),
    ("deviant", &["Deviant-Mutation", "Monströse Kraft", "Genetische Instabilität"]),
    ("god", &["Göttliche Macht", "Unsterblichkeit", "Realitätskontrolle"]),
    ("demon", &["Höllische Kräfte", "Dämonische Magie", "Seelenmanipulation"]),
    ("vampire", &["Vampirstärke", "Regeneration", "Hypnose", "Unsterblichkeit"]),
    ("robot", &["Mechanische Stärke", "Computerintelligenz", "Waffensysteme"]),
    ("android", &["Synthetische Kraft", "KI", "Anpassungsfähigkeit"]),
    ("synthezoid", &["Dichtemanipulation", "Energieprojektion", "Flug"]),
    ("cyborg", &["Kybernetische Verbesserungen", "Waffenintegration", "Enhanced Senses"]),
    ("alien", &["Außerirdische Physiologie", "Fremde Technologie"]),
    ("construct", &["Konstruierte Existenz", "Energiebasiert"]),
    ("abstract", &["Kosmisches Wesen", "Realitätsmanipulation", "Omnipräsenz"]),
    ("symbiote", &["Symbiotenbindung", "Formwandlung", "Organische Waffen"]),
    ("clone", &["Genetische Replikation", "Übernommene Kräfte"]),
];

pub const ENERGY_PROJECTION_THRESHOLD: f64 = 50.0;
pub const STAT_BONUS_THRESHOLD: u8 = 80;

pub fn template_for_race(race: &str) -> Vec<String> {
    let race = race.to_lowercase();
    ABILITY_TEMPLATES
        .iter()
        .find(|(key, _)| race.contains(key))
        .map(|(_, abilities)| abilities.iter().map(|a| a.to_string()).collect())
        .unwrap_or_else(|| vec![FALLBACK_ABILITY.to_string()])
}

/// Race template plus stat bonuses, deduplicated (first occurrence kept) and
/// truncated to [`MAX_ABILITIES`].
pub fn derive_abilities(race: &str, stats: &HeroStats, energy_projection: Option<f64>) -> Vec<String> {
    let mut abilities = template_for_race(race);

    if energy_projection.is_some_and(|e| e >= ENERGY_PROJECTION_THRESHOLD) {
        abilities.push("Energieprojektion".to_string());
    }
    let bonuses = [
        (stats.strength, "Superstärke"),
        (stats.speed, "Supergeschwindigkeit"),
        (stats.durability, "Unverwundbarkeit"),
        (stats.intelligence, "Genius-Intellekt"),
        (stats.combat, "Meisterkämpfer"),
    ];
    for (value, ability) in bonuses {
        if value >= STAT_BONUS_THRESHOLD {
            abilities.push(ability.to_string());
        }
    }

    normalize_abilities(abilities)
}

/// Drop blanks and duplicates, keep order, cap the length.
pub fn normalize_abilities(abilities: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(abilities.len().min(MAX_ABILITIES));
    for ability in abilities {
        let ability = ability.trim();
        if ability.is_empty() || out.iter().any(|seen| seen == ability) {
            continue;
        }
        out.push(ability.to_string());
        if out.len() == MAX_ABILITIES {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_race_gets_generic_ability() {
        let abilities = derive_abilities("Unknown", &HeroStats::new(10, 10, 10, 10, 10), None);
        assert_eq!(abilities, vec![FALLBACK_ABILITY.to_string()]);
    }

    #[test]
    fn template_order_decides_ambiguous_races() {
        // "inhuman" contains "human"; human is earlier in the table
        assert_eq!(template_for_race("Inhuman")[0], "Menschliche Fähigkeiten");
        assert_eq!(template_for_race("Human/Kree Hybrid")[0], "Menschliche Fähigkeiten");
        assert_eq!(template_for_race("KREE")[0], "Kree-Physiologie");
    }

    #[test]
    fn synthezoid_energy_projection_is_not_duplicated() {
        let abilities = derive_abilities("Synthezoid", &HeroStats::new(50, 50, 50, 50, 50), Some(70.0));
        assert_eq!(abilities, vec!["Dichtemanipulation", "Energieprojektion", "Flug"]);
    }

    #[test]
    fn bonuses_are_capped_at_six() {
        let abilities = derive_abilities("Mutant", &HeroStats::new(90, 90, 90, 90, 90), Some(90.0));
        assert_eq!(abilities.len(), MAX_ABILITIES);
        assert_eq!(
            abilities,
            vec![
                "Mutantenkraft",
                "Genetische Besonderheit",
                "X-Gen",
                "Energieprojektion",
                "Superstärke",
                "Supergeschwindigkeit",
            ]
        );
    }

    #[test]
    fn energy_projection_threshold_is_inclusive() {
        let stats = HeroStats::new(0, 0, 0, 0, 0);
        assert!(derive_abilities("x", &stats, Some(50.0)).contains(&"Energieprojektion".to_string()));
        assert!(!derive_abilities("x", &stats, Some(49.9)).contains(&"Energieprojektion".to_string()));
    }
}

//! Generated flavour text: four description variants and one reason per tier.
//! Templates use `{name}` and `{race}` placeholders.

use crate::data::hero::Tier;

const COSMIC: [&str; 4] = [
    "{name} ist eine omnipotente kosmische Entität. Als {race} existiert dieses Wesen jenseits der normalen Realität und besitzt nahezu unbegrenzte Macht.",
    "{name} verkörpert kosmische Macht in ihrer reinsten Form. Diese {race}-Entität beeinflusst das Schicksal ganzer Universen.",
    "Als {race} transzendiert {name} die Grenzen der Sterblichkeit. Kosmische Energien fließen durch dieses allmächtige Wesen.",
    "{name} steht an der Spitze der kosmischen Hierarchie. Die Macht dieser {race}-Entität reicht über alle bekannten Dimensionen.",
];

const S: [&str; 4] = [
    "{name} ist einer der mächtigsten Wesen des Universums. Als {race} besitzt er/sie nahezu gottgleiche Kräfte.",
    "Die Macht von {name} ist legendär. Dieser {race} kann ganze Zivilisationen retten oder zerstören.",
    "{name} gehört zur absoluten Elite der Überwesen. Als {race} sind seine/ihre Fähigkeiten weltbewegend.",
    "Wenige können es mit {name} aufnehmen. Diese {race}-Macht erstreckt sich über planetare Grenzen hinaus.",
];

const A: [&str; 4] = [
    "{name} gehört zu den stärksten Helden/Schurken. Als {race} verfügt er/sie über außergewöhnliche Fähigkeiten.",
    "Die Fähigkeiten von {name} sind beeindruckend. Dieser {race} hat sich als mächtiger Verbündeter oder Feind erwiesen.",
    "{name} zählt zu den gefährlichsten Kämpfern. Als {race} ist er/sie ein Gegner, den man nicht unterschätzen sollte.",
    "Mit überragenden Kräften macht {name} sich einen Namen. Dieser {race} hat in zahllosen Schlachten seine Stärke bewiesen.",
];

const B: [&str; 4] = [
    "{name} ist ein bedeutender Charakter mit übermenschlichen Kräften. Als {race} ist er/sie ein formidabler Kämpfer.",
    "{name} hat sich einen Namen als fähiger Held/Schurke gemacht. Dieser {race} ist in seiner Liga gefürchtet und respektiert.",
    "Die Fähigkeiten von {name} übertreffen die normaler Menschen deutlich. Als {race} stellt er/sie eine ernste Bedrohung dar.",
    "{name} operiert auf übermenschlichem Niveau. Dieser {race} ist ein Gegner, mit dem zu rechnen ist.",
];

const C: [&str; 4] = [
    "{name} ist ein fähiger Held/Schurke mit besonderen Fähigkeiten. Als {race} hat er/sie seinen/ihren Platz im Universum.",
    "{name} verfügt über Fähigkeiten, die ihn/sie von normalen Menschen abheben. Dieser {race} ist ein kompetenter Kämpfer.",
    "Mit speziellen Kräften ausgestattet, ist {name} mehr als ein gewöhnlicher Gegner. Als {race} meistert er/sie seinen Bereich.",
    "{name} nutzt seine besonderen Fähigkeiten effektiv. Dieser {race} hat sich in vielen Situationen bewährt.",
];

const D: [&str; 4] = [
    "{name} kämpft auf Straßenebene mit besonderen Fähigkeiten. Als {race} ist er/sie in seinem Bereich effektiv.",
    "Trotz begrenzter Kräfte macht {name} das Beste aus seinen Fähigkeiten. Dieser {race} ist nicht zu unterschätzen.",
    "{name} operiert im Straßenlevel-Bereich. Als {race} hat er/sie einen Platz im größeren Geschehen.",
    "{name} mag keine kosmischen Kräfte haben, ist aber in seinem Element gefährlich. Dieser {race} kennt seine Stärken.",
];

/// Race label used for DC records, which carry no race.
pub const DC_RACE_LABEL: &str = "DC-Charakter";

fn variations(tier: Tier) -> &'static [&'static str; 4] {
    match tier {
        Tier::Cosmic => &COSMIC,
        Tier::S => &S,
        Tier::A => &A,
        Tier::B => &B,
        Tier::C => &C,
        Tier::D => &D,
    }
}

pub fn reason_template(tier: Tier) -> &'static str {
    match tier {
        Tier::Cosmic => "Omnipotente Entität mit Macht über Realität und Existenz selbst.",
        Tier::S => "Kosmische oder gottgleiche Kräfte, die das Universum beeinflussen können.",
        Tier::A => "Omega-Level Fähigkeiten mit erheblichem Zerstörungspotential.",
        Tier::B => "Übermenschliche Kräfte, die weit über normale Menschen hinausgehen.",
        Tier::C => "Verbesserte Fähigkeiten oder spezielle Kräfte auf mittlerem Niveau.",
        Tier::D => "Menschliche Spitzenleistung oder begrenzte übermenschliche Fähigkeiten.",
    }
}

/// Sum of the UTF-16 code units of `name`. Stable across runs and platforms.
pub fn name_hash(name: &str) -> u64 {
    name.encode_utf16().map(u64::from).sum()
}

pub fn template_description(name: &str, race: &str, tier: Tier) -> String {
    let options = variations(tier);
    let index = (name_hash(name) % options.len() as u64) as usize;
    options[index].replace("{name}", name).replace("{race}", race)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_sums_utf16_units() {
        assert_eq!(name_hash("A"), 65);
        assert_eq!(name_hash("AB"), 131);
        // U+1F9B8 is a surrogate pair: 0xD83E + 0xDDB8
        assert_eq!(name_hash("🦸"), 0xD83E + 0xDDB8);
        assert_eq!(name_hash(""), 0);
    }

    #[test]
    fn description_variant_is_chosen_by_hash() {
        // "A" = 65, 65 % 4 == 1
        let text = template_description("A", "Mutant", Tier::B);
        assert_eq!(
            text,
            "A hat sich einen Namen als fähiger Held/Schurke gemacht. Dieser Mutant ist in seiner Liga gefürchtet und respektiert."
        );
        // "D" = 68, 68 % 4 == 0
        assert!(template_description("D", "Human", Tier::D).starts_with("D kämpft auf Straßenebene"));
    }

    #[test]
    fn description_is_deterministic() {
        let a = template_description("Wolverine", "Mutant", Tier::A);
        let b = template_description("Wolverine", "Mutant", Tier::A);
        assert_eq!(a, b);
        assert!(a.contains("Wolverine"));
        assert!(a.contains("Mutant"));
    }

    #[test]
    fn every_tier_has_a_reason() {
        for tier in Tier::ALL {
            assert!(!reason_template(tier).is_empty());
        }
    }
}

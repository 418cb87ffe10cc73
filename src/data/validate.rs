use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::data::hero::{StatKind, Tier, Universe, MAX_ABILITIES, STAT_MAX};
use crate::error::{Error, Result};
use crate::generator::scoring::tier_for_power;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

pub fn validate_hero_dataset(path: impl AsRef<Path>) -> Result<ValidationReport> {
    let payload: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    validate_hero_values(&payload)
}

/// Check a dataset already parsed as JSON. Works on raw values so that a single
/// malformed record yields a diagnostic instead of a parse failure.
pub fn validate_hero_values(payload: &Value) -> Result<ValidationReport> {
    let entries = payload
        .as_array()
        .ok_or_else(|| Error::InvalidPayload("expected top-level JSON array of heroes".to_string()))?;

    let mut report = ValidationReport::default();
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();
    let mut previous_power: Option<i64> = None;

    for (index, entry) in entries.iter().enumerate() {
        let base_context = format!("entry[{index}]");
        let Some(object) = entry.as_object() else {
            report.push(
                ValidationSeverity::Error,
                base_context,
                "entry is not an object",
            );
            continue;
        };

        match object.get("id").and_then(Value::as_u64) {
            Some(id) => {
                if !seen_ids.insert(id) {
                    report.push(
                        ValidationSeverity::Error,
                        format!("{base_context}.id"),
                        format!("duplicate id {id}"),
                    );
                }
            }
            None => report.push(
                ValidationSeverity::Error,
                format!("{base_context}.id"),
                "missing numeric 'id'",
            ),
        }

        let name = match object.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => {
                if !seen_names.insert(name.to_lowercase()) {
                    report.push(
                        ValidationSeverity::Error,
                        format!("{base_context}.name"),
                        format!("duplicate name '{name}' (case-insensitive)"),
                    );
                }
                name.to_string()
            }
            _ => {
                report.push(
                    ValidationSeverity::Error,
                    format!("{base_context}.name"),
                    "missing non-empty 'name'",
                );
                "<missing-name>".to_string()
            }
        };
        let context = format!("{base_context} name='{name}'");

        match object.get("universe").and_then(Value::as_str) {
            Some(u) if Universe::ALL.iter().any(|known| known.as_str() == u) => {}
            other => report.push(
                ValidationSeverity::Error,
                format!("{context}.universe"),
                format!("unknown universe {other:?}"),
            ),
        }

        let tier = object
            .get("tier")
            .and_then(Value::as_str)
            .and_then(|t| Tier::ALL.into_iter().find(|known| known.as_str() == t));
        if tier.is_none() {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.tier"),
                format!("unknown tier {:?}", object.get("tier")),
            );
        }

        let power = object.get("power").and_then(Value::as_i64);
        match power {
            Some(p) if (0..=i64::from(STAT_MAX)).contains(&p) => {
                if let Some(prev) = previous_power {
                    if p > prev {
                        report.push(
                            ValidationSeverity::Warning,
                            format!("{context}.power"),
                            format!("dataset not sorted by power ({p} after {prev})"),
                        );
                    }
                }
                previous_power = Some(p);
            }
            other => report.push(
                ValidationSeverity::Error,
                format!("{context}.power"),
                format!("power must be an integer in 0..=100, got {other:?}"),
            ),
        }

        if let (Some(tier), Some(p)) = (tier, power) {
            validate_tier_consistency(&mut report, &context, tier, p);
        }

        validate_stats(&mut report, object, &context);
        validate_abilities(&mut report, object, &context);

        for field in ["description", "reason", "image", "color"] {
            if !object.get(field).is_some_and(Value::is_string) {
                report.push(
                    ValidationSeverity::Warning,
                    format!("{context}.{field}"),
                    format!("missing string '{field}'"),
                );
            }
        }
    }

    Ok(report)
}

/// Corrected heroes may sit in a tier their power would not give them; that is
/// informational only.
fn validate_tier_consistency(report: &mut ValidationReport, context: &str, tier: Tier, power: i64) {
    if tier == Tier::Cosmic {
        return;
    }
    let clamped = power.clamp(0, i64::from(STAT_MAX)) as u8;
    let computed = tier_for_power(clamped);
    if computed != tier {
        report.push(
            ValidationSeverity::Info,
            format!("{context}.tier"),
            format!("tier {tier} differs from power-derived tier {computed} (power {power})"),
        );
    }
}

fn validate_stats(report: &mut ValidationReport, object: &Map<String, Value>, context: &str) {
    let Some(stats) = object.get("stats").and_then(Value::as_object) else {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.stats"),
            "missing 'stats' object",
        );
        return;
    };

    for stat in StatKind::ALL {
        match stats.get(stat.as_str()).and_then(Value::as_i64) {
            Some(v) if (0..=i64::from(STAT_MAX)).contains(&v) => {}
            other => report.push(
                ValidationSeverity::Error,
                format!("{context}.stats.{}", stat.as_str()),
                format!("stat must be an integer in 0..=100, got {other:?}"),
            ),
        }
    }
}

fn validate_abilities(report: &mut ValidationReport, object: &Map<String, Value>, context: &str) {
    let context = format!("{context}.abilities");
    let Some(abilities) = object.get("abilities") else {
        report.push(
            ValidationSeverity::Error,
            context,
            "missing 'abilities' array",
        );
        return;
    };

    let Some(abilities) = abilities.as_array() else {
        report.push(ValidationSeverity::Error, context, "expected array");
        return;
    };

    if abilities.len() > MAX_ABILITIES {
        report.push(
            ValidationSeverity::Error,
            context.clone(),
            format!("{} abilities, at most {MAX_ABILITIES} allowed", abilities.len()),
        );
    }

    let mut seen = HashSet::new();
    for (ability_index, ability) in abilities.iter().enumerate() {
        let ability_context = format!("{context}[{ability_index}]");
        match ability.as_str() {
            Some(text) if !text.trim().is_empty() => {
                if !seen.insert(text) {
                    report.push(
                        ValidationSeverity::Error,
                        ability_context,
                        format!("duplicate ability '{text}'"),
                    );
                }
            }
            _ => report.push(
                ValidationSeverity::Error,
                ability_context,
                "ability is not a non-empty string",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hero(id: u64, name: &str, tier: &str, power: i64) -> Value {
        json!({
            "id": id, "name": name, "universe": "Marvel", "tier": tier, "power": power,
            "image": "x", "color": "#fff", "description": "d", "reason": "r",
            "abilities": ["Training"],
            "stats": {"strength": 50, "speed": 50, "durability": 50, "intelligence": 50, "combat": 50}
        })
    }

    #[test]
    fn clean_dataset_has_no_errors() {
        let payload = json!([hero(1, "Thor", "S", 95), hero(2, "Loki", "A", 80)]);
        let report = validate_hero_values(&payload).unwrap();
        assert!(!report.has_errors(), "{:?}", report.diagnostics);
        assert_eq!(report.count(ValidationSeverity::Warning), 0);
    }

    #[test]
    fn duplicate_names_are_case_insensitive_errors() {
        let payload = json!([hero(1, "Thor", "S", 95), hero(2, "THOR", "S", 95)]);
        let report = validate_hero_values(&payload).unwrap();
        assert!(report.has_errors());
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.message.contains("duplicate name")));
    }

    #[test]
    fn unsorted_power_is_a_warning_and_tier_mismatch_is_info() {
        let payload = json!([hero(1, "Hawkeye", "C", 45), hero(2, "Hulk", "C", 88)]);
        let report = validate_hero_values(&payload).unwrap();
        assert!(!report.has_errors());
        assert_eq!(report.count(ValidationSeverity::Warning), 1);
        assert_eq!(report.count(ValidationSeverity::Info), 1);
    }

    #[test]
    fn bad_stats_and_abilities_are_errors() {
        let mut bad = hero(1, "Broken", "D", 10);
        bad["stats"]["speed"] = json!(130);
        bad["abilities"] = json!(["a", "a", "b", "c", "d", "e", "f"]);
        let report = validate_hero_values(&json!([bad])).unwrap();
        let messages: Vec<&str> = report.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("stat must be")));
        assert!(messages.iter().any(|m| m.contains("at most 6")));
        assert!(messages.iter().any(|m| m.contains("duplicate ability")));
    }

    #[test]
    fn non_array_payload_is_rejected() {
        assert!(matches!(
            validate_hero_values(&json!({"heroes": []})),
            Err(Error::InvalidPayload(_))
        ));
    }

    #[test]
    fn unreadable_dataset_surfaces_crate_errors() {
        let missing = std::env::temp_dir().join("herorank-validate-missing/none.json");
        assert!(matches!(validate_hero_dataset(&missing), Err(Error::Io(_))));
    }
}

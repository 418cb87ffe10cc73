//! Raw generator inputs: the tabular Marvel export and the hand-authored DC roster.
//!
//! Raw records are deliberately loose (optional fields, floats, tier as text) so a
//! single malformed entry degrades to defaults in the generator instead of failing
//! the whole file. A field of the wrong type reads as absent. Entries that cannot
//! even be read as a record (e.g. no name) are skipped and counted.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use calamine::Reader;
use serde::{Deserialize, Serialize};

use crate::data::hero::HeroStats;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStats {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub durability: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub combat: Option<f64>,
}

impl RawStats {
    /// All five values present -> rounded and clamped stats; otherwise `None`.
    pub fn to_stats(&self) -> Option<HeroStats> {
        let r = |v: Option<f64>| v.filter(|x| x.is_finite()).map(|x| x.round() as i64);
        Some(HeroStats::clamped(
            r(self.strength)?,
            r(self.speed)?,
            r(self.durability)?,
            r(self.intelligence)?,
            r(self.combat)?,
        ))
    }
}

impl From<HeroStats> for RawStats {
    fn from(stats: HeroStats) -> Self {
        Self {
            strength: Some(f64::from(stats.strength)),
            speed: Some(f64::from(stats.speed)),
            durability: Some(f64::from(stats.durability)),
            intelligence: Some(f64::from(stats.intelligence)),
            combat: Some(f64::from(stats.combat)),
        }
    }
}

/// Field readers that turn a wrongly typed value into `None` instead of an error.
mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    use super::RawStats;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum List {
        Items(Vec<Scalar>),
        Other(IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Block {
        Stats(RawStats),
        Other(IgnoredAny),
    }

    /// Numbers, or text that parses as one (`"85"`).
    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = match Scalar::deserialize(deserializer)? {
            Scalar::Number(n) => Some(n),
            Scalar::Text(t) => t.trim().parse().ok(),
            Scalar::Other(_) => None,
        };
        Ok(value.filter(|n: &f64| n.is_finite()))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Scalar::deserialize(deserializer)? {
            Scalar::Text(t) => Some(t),
            Scalar::Number(_) | Scalar::Other(_) => None,
        })
    }

    /// String items of a list; non-strings inside it are dropped.
    pub fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<String>>, D::Error> {
        Ok(match List::deserialize(deserializer)? {
            List::Items(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Scalar::Text(t) => Some(t),
                        Scalar::Number(_) | Scalar::Other(_) => None,
                    })
                    .collect(),
            ),
            List::Other(_) => None,
        })
    }

    pub fn text_list_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(text_list(deserializer)?.unwrap_or_default())
    }

    pub fn stats<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<RawStats>, D::Error> {
        Ok(match Block::deserialize(deserializer)? {
            Block::Stats(stats) => Some(stats),
            Block::Other(_) => None,
        })
    }
}

/// One row of the Marvel export (`marvel-raw.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarvelRawRecord {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, deserialize_with = "lenient::stats", skip_serializing_if = "Option::is_none")]
    pub stats: Option<RawStats>,
    #[serde(
        default,
        alias = "energy_projection",
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub energy_projection: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Fully hand-authored DC entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DcBaseRecord {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub race: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tier: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub power: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub abilities: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "lenient::stats")]
    pub stats: Option<RawStats>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color: Option<String>,
}

/// Short DC entry; stats are synthesized from power by the generator.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DcExtraRecord {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tier: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub power: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list_or_empty")]
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DcRoster {
    pub base: Vec<DcBaseRecord>,
    pub extras: Vec<DcExtraRecord>,
}

/// Records read from a source plus how many entries had to be dropped.
#[derive(Debug, Clone, Default)]
pub struct Loaded<T> {
    pub records: T,
    pub skipped: usize,
}

pub fn load_marvel_raw(path: impl AsRef<Path>) -> Result<Loaded<Vec<MarvelRawRecord>>> {
    let raw = fs::read_to_string(path.as_ref())?;
    parse_marvel_raw(&raw)
}

pub fn parse_marvel_raw(raw: &str) -> Result<Loaded<Vec<MarvelRawRecord>>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let mut loaded: Loaded<Vec<MarvelRawRecord>> = Loaded::default();
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<MarvelRawRecord>(value) {
            Ok(record) if !record.name.trim().is_empty() => loaded.records.push(record),
            Ok(_) => {
                tracing::warn!(index, "marvel record without name skipped");
                loaded.skipped += 1;
            }
            Err(err) => {
                tracing::warn!(index, %err, "unreadable marvel record skipped");
                loaded.skipped += 1;
            }
        }
    }
    Ok(loaded)
}

pub fn write_marvel_raw(path: impl AsRef<Path>, records: &[MarvelRawRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(records)?)?;
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
struct DcRosterFile {
    #[serde(default)]
    base: Vec<serde_yaml::Value>,
    #[serde(default)]
    extras: Vec<serde_yaml::Value>,
}

pub fn load_dc_roster(path: impl AsRef<Path>) -> Result<Loaded<DcRoster>> {
    let raw = fs::read_to_string(path.as_ref())?;
    parse_dc_roster(&raw)
}

pub fn parse_dc_roster(raw: &str) -> Result<Loaded<DcRoster>> {
    let file: DcRosterFile = serde_yaml::from_str(raw)?;
    let mut skipped = 0usize;
    let base = collect_yaml_records::<DcBaseRecord>(file.base, "dc base", &mut skipped, |r| &r.name);
    let extras =
        collect_yaml_records::<DcExtraRecord>(file.extras, "dc extra", &mut skipped, |r| &r.name);
    Ok(Loaded {
        records: DcRoster { base, extras },
        skipped,
    })
}

fn collect_yaml_records<T>(
    values: Vec<serde_yaml::Value>,
    kind: &str,
    skipped: &mut usize,
    name_of: impl Fn(&T) -> &String,
) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    let mut out = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_yaml::from_value::<T>(value) {
            Ok(record) if !name_of(&record).trim().is_empty() => out.push(record),
            Ok(_) => {
                tracing::warn!(index, kind, "record without name skipped");
                *skipped += 1;
            }
            Err(err) => {
                tracing::warn!(index, kind, %err, "unreadable record skipped");
                *skipped += 1;
            }
        }
    }
    out
}

// ----- Tabular Marvel export (CSV / XLSX) -----

/// Map a header cell to the canonical column name.
fn canonical_column(header: &str) -> Option<&'static str> {
    let key: String = header
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    match key.as_str() {
        "name" | "character" => Some("name"),
        "race" | "species" => Some("race"),
        "strength" => Some("strength"),
        "speed" => Some("speed"),
        "durability" => Some("durability"),
        "intelligence" => Some("intelligence"),
        "combat" | "fighting" | "fightingskills" => Some("combat"),
        "energyprojection" | "energy" => Some("energy_projection"),
        "image" | "icon" => Some("image"),
        "color" | "colour" => Some("color"),
        _ => None,
    }
}

fn column_index(headers: &[String]) -> HashMap<&'static str, usize> {
    let mut index = HashMap::new();
    for (i, header) in headers.iter().enumerate() {
        if let Some(col) = canonical_column(header) {
            index.entry(col).or_insert(i);
        }
    }
    index
}

fn record_from_cells(columns: &HashMap<&'static str, usize>, cells: &[String]) -> Option<MarvelRawRecord> {
    let text = |col: &str| {
        columns
            .get(col)
            .and_then(|&i| cells.get(i))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    };
    let number = |col: &str| text(col).and_then(|s| s.replace(',', ".").parse::<f64>().ok());

    let name = text("name")?.to_string();
    let stats = RawStats {
        strength: number("strength"),
        speed: number("speed"),
        durability: number("durability"),
        intelligence: number("intelligence"),
        combat: number("combat"),
    };
    let has_stats = stats != RawStats::default();
    Some(MarvelRawRecord {
        name,
        race: text("race").map(str::to_string),
        stats: has_stats.then_some(stats),
        energy_projection: number("energy_projection"),
        image: text("image").map(str::to_string),
        color: text("color").map(str::to_string),
    })
}

pub fn read_marvel_csv<R: Read>(reader: R) -> Result<Loaded<Vec<MarvelRawRecord>>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let columns = column_index(&headers);
    if !columns.contains_key("name") {
        return Err(Error::InvalidPayload("CSV has no name column".to_string()));
    }

    let mut loaded: Loaded<Vec<MarvelRawRecord>> = Loaded::default();
    for row in csv_reader.records() {
        let row = row?;
        let cells: Vec<String> = row.iter().map(str::to_string).collect();
        match record_from_cells(&columns, &cells) {
            Some(record) => loaded.records.push(record),
            None => loaded.skipped += 1,
        }
    }
    Ok(loaded)
}

fn cell_text(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::Empty => String::new(),
        calamine::Data::String(s) => s.clone(),
        calamine::Data::Float(f) => f.to_string(),
        calamine::Data::Int(i) => i.to_string(),
        calamine::Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Read the first worksheet of an XLSX/XLS/ODS workbook.
pub fn read_marvel_sheet(path: impl AsRef<Path>) -> Result<Loaded<Vec<MarvelRawRecord>>> {
    let mut workbook = calamine::open_workbook_auto(path.as_ref())?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::Sheet("workbook has no sheets".to_string()))?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Loaded::default());
    };
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();
    let columns = column_index(&headers);
    if !columns.contains_key("name") {
        return Err(Error::Sheet(format!("sheet '{sheet}' has no name column")));
    }

    let mut loaded: Loaded<Vec<MarvelRawRecord>> = Loaded::default();
    for row in rows {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        match record_from_cells(&columns, &cells) {
            Some(record) => loaded.records.push(record),
            None => loaded.skipped += 1,
        }
    }
    Ok(loaded)
}

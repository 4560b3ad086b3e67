//! JSON and CSV export of the store, and loading it back from JSON.

use crate::area::Area;
use crate::areas::Areas;
use crate::error::Result;
use crate::measure::Measure;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// JSON shape of one area: `{"names": {...}, "measures": {codename: {year: value}}}`.
#[derive(Debug, Serialize, Deserialize)]
struct AreaRecord {
    #[serde(default)]
    names: BTreeMap<String, String>,
    #[serde(default)]
    measures: BTreeMap<String, BTreeMap<i32, f64>>,
}

impl From<&Area> for AreaRecord {
    fn from(area: &Area) -> Self {
        Self {
            names: area.names().clone(),
            measures: area
                .measures()
                .map(|m| (m.codename().to_string(), m.series().clone()))
                .collect(),
        }
    }
}

/// Serialize the store as a JSON object keyed by area code.
///
/// Years become string keys; an empty store is `{}`.
pub fn to_json(areas: &Areas) -> Result<String> {
    let doc: BTreeMap<&str, AreaRecord> = areas
        .iter()
        .map(|(code, area)| (code, AreaRecord::from(area)))
        .collect();
    Ok(serde_json::to_string(&doc)?)
}

/// Rebuild a store from the output of [`to_json`].
///
/// The export carries no measure labels, so each label is set to its codename.
pub fn from_json(text: &str) -> Result<Areas> {
    let doc: BTreeMap<String, AreaRecord> = serde_json::from_str(text)?;
    let mut areas = Areas::new();
    for (code, record) in doc {
        let mut area = Area::new(code.clone());
        for (lang, name) in record.names {
            area.set_name(&lang, name)?;
        }
        for (codename, series) in record.measures {
            let mut measure = Measure::new(&codename, codename.clone());
            for (year, value) in series {
                measure.set_value(year, value);
            }
            area.set_measure(&codename, measure);
        }
        areas.set_area(&code, area);
    }
    Ok(areas)
}

/// Save the store as JSON.
pub fn save_json<P: AsRef<Path>>(areas: &Areas, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    f.write_all(to_json(areas)?.as_bytes())?;
    Ok(())
}

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn sanitize(cell: &str) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{cell}"),
        _ => cell.to_string(),
    }
}

/// Save the store as tidy CSV, one row per (area, measure, year).
pub fn save_csv<P: AsRef<Path>>(areas: &Areas, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record([
        "area_code",
        "name_eng",
        "name_cym",
        "measure",
        "label",
        "year",
        "value",
    ])?;
    for (code, area) in areas.iter() {
        let eng = sanitize(area.name("eng").unwrap_or_default());
        let cym = sanitize(area.name("cym").unwrap_or_default());
        for measure in area.measures() {
            for (year, value) in measure.series() {
                wtr.serialize((
                    sanitize(code),
                    &eng,
                    &cym,
                    sanitize(measure.codename()),
                    sanitize(measure.label()),
                    year,
                    value,
                ))?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}

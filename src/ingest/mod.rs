//! Format-specific readers that turn an input stream into staged [`Area`]s.
//!
//! Every reader parses the whole stream before returning anything. The caller
//! merges the staged areas into the store only once the read has succeeded,
//! so a malformed file never leaves half of itself behind.
//!
//! ### Formats
//! - [`authority_codes`]: reference CSV of codes and English/Welsh names.
//! - [`welsh_stats_json`]: StatsWales JSON, one record per area/measure/year.
//! - [`authority_by_year`]: CSV with one row per area and one column per year.

pub mod authority_by_year;
pub mod authority_codes;
pub mod welsh_stats_json;

use crate::area::Area;
use crate::datasets::{SourceColumnMapping, SourceDataType};
use crate::error::{Error, Result};
use crate::filters::Filters;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::io::Read;

/// Read `input` as `kind`, applying `filters`, and return the areas it describes.
pub fn read<R: Read>(
    mut input: R,
    kind: SourceDataType,
    cols: &SourceColumnMapping,
    filters: &Filters,
) -> Result<Vec<Area>> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    if text.trim().is_empty() {
        warn!("{kind}: input is empty, nothing to import");
        // Still reject a bad mapping so the caller hears about it.
        crate::datasets::check_columns(kind, cols)?;
        return Ok(Vec::new());
    }
    match kind {
        SourceDataType::AuthorityCodeCsv => authority_codes::read(&text, cols, filters),
        SourceDataType::WelshStatsJson => welsh_stats_json::read(&text, cols, filters),
        SourceDataType::AuthorityByYearCsv => authority_by_year::read(&text, cols, filters),
    }
}

/// Areas collected during one read, already combined per code.
#[derive(Debug, Default)]
pub(crate) struct Staged {
    areas: BTreeMap<String, Area>,
}

impl Staged {
    pub(crate) fn push(&mut self, area: Area) {
        match self.areas.entry(area.code().to_string()) {
            Entry::Occupied(mut slot) => slot.get_mut().merge(area),
            Entry::Vacant(slot) => {
                slot.insert(area);
            }
        }
    }

    pub(crate) fn into_areas(self) -> Vec<Area> {
        self.areas.into_values().collect()
    }
}

pub(crate) fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes())
}

/// Position of `name` in the header row.
pub(crate) fn header_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::MissingHeader(name.to_string()))
}

/// Field `index` of data row `row` (1-based, header excluded).
pub(crate) fn cell<'r>(
    record: &'r StringRecord,
    index: usize,
    headers: &StringRecord,
    row: usize,
) -> Result<&'r str> {
    record.get(index).ok_or_else(|| Error::MissingField {
        record: row,
        column: headers.get(index).unwrap_or_default().to_string(),
    })
}

pub(crate) fn parse_year(text: &str, context: impl Into<String>) -> Result<i32> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| Error::parse(context, text, "year"))
}

pub(crate) fn parse_value(text: &str, context: impl Into<String>) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::parse(context, text, "number")),
    }
}

//! Reader for StatsWales JSON exports.
//!
//! The export is an object whose `value` array holds one record per
//! (area, measure, year). Column names differ between datasets, so every
//! field is looked up through the column mapping.
//!
//! Some datasets hold a single measure and carry no measure columns at all.
//! Their mapping supplies `SingleMeasureCode`/`SingleMeasureName` instead,
//! and those literal values are used for every record.
//!
//! Exports are not consistent about types: `Year_Code` may be a string or a
//! number, and `Data` is a number in most files but a string in some.

use super::Staged;
use crate::area::Area;
use crate::datasets::{SourceColumn, SourceColumnMapping, SourceDataType, check_columns, column};
use crate::error::{Error, Result};
use crate::filters::Filters;
use crate::measure::Measure;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "odata.metadata", default)]
    metadata: Option<String>,
    #[serde(default)]
    value: Vec<Map<String, Value>>,
}

/// Where a record's measure code and label come from.
enum MeasureSource<'c> {
    PerRecord { code: &'c str, label: &'c str },
    Fixed { code: &'c str, label: &'c str },
}

impl<'c> MeasureSource<'c> {
    fn from_cols(cols: &'c SourceColumnMapping) -> Result<Self> {
        if cols.contains_key(&SourceColumn::MeasureCode) {
            Ok(MeasureSource::PerRecord {
                code: column(cols, SourceColumn::MeasureCode)?,
                label: column(cols, SourceColumn::MeasureName)?,
            })
        } else if cols.contains_key(&SourceColumn::SingleMeasureCode) {
            Ok(MeasureSource::Fixed {
                code: column(cols, SourceColumn::SingleMeasureCode)?,
                label: column(cols, SourceColumn::SingleMeasureName)?,
            })
        } else {
            Err(Error::MissingColumn(SourceColumn::MeasureCode))
        }
    }

    fn resolve(&self, record: &Map<String, Value>, index: usize) -> Result<(String, String)> {
        match *self {
            MeasureSource::PerRecord { code, label } => {
                Ok((text(record, code, index)?, text(record, label, index)?))
            }
            MeasureSource::Fixed { code, label } => Ok((code.to_string(), label.to_string())),
        }
    }
}

fn field<'r>(record: &'r Map<String, Value>, name: &str, index: usize) -> Result<&'r Value> {
    match record.get(name) {
        Some(Value::Null) | None => Err(Error::MissingField {
            record: index,
            column: name.to_string(),
        }),
        Some(v) => Ok(v),
    }
}

/// A field as text; numbers are accepted and printed.
fn text(record: &Map<String, Value>, name: &str, index: usize) -> Result<String> {
    match field(record, name, index)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::parse(
            format!("record {index}, field {name:?}"),
            &other.to_string(),
            "text",
        )),
    }
}

fn year(record: &Map<String, Value>, name: &str, index: usize) -> Result<i32> {
    let context = || format!("record {index}, field {name:?}");
    match field(record, name, index)? {
        Value::String(s) => super::parse_year(s, context()),
        Value::Number(n) => n
            .as_i64()
            .and_then(|y| i32::try_from(y).ok())
            .ok_or_else(|| Error::parse(context(), &n.to_string(), "year")),
        other => Err(Error::parse(context(), &other.to_string(), "year")),
    }
}

fn value(record: &Map<String, Value>, name: &str, index: usize) -> Result<f64> {
    let context = || format!("record {index}, field {name:?}");
    match field(record, name, index)? {
        Value::String(s) => super::parse_value(s, context()),
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::parse(context(), &n.to_string(), "number")),
        other => Err(Error::parse(context(), &other.to_string(), "number")),
    }
}

pub fn read(text_in: &str, cols: &SourceColumnMapping, filters: &Filters) -> Result<Vec<Area>> {
    check_columns(SourceDataType::WelshStatsJson, cols)?;

    let code_col = column(cols, SourceColumn::AuthCode)?;
    let eng_col = column(cols, SourceColumn::AuthNameEng)?;
    let year_col = column(cols, SourceColumn::Year)?;
    let value_col = column(cols, SourceColumn::Value)?;
    let measures = MeasureSource::from_cols(cols)?;

    let doc: Document = serde_json::from_str(text_in)?;
    if let Some(meta) = &doc.metadata {
        debug!("welsh stats json: {meta}, {} records", doc.value.len());
    }

    let mut staged = Staged::default();
    let mut kept = 0usize;
    for (index, record) in doc.value.iter().enumerate() {
        let code = text(record, code_col, index)?.to_uppercase();
        let name = text(record, eng_col, index)?;
        let (measure_code, label) = measures.resolve(record, index)?;
        let measure_code = measure_code.to_lowercase();
        let year = year(record, year_col, index)?;
        let value = value(record, value_col, index)?;

        if !(filters.area_allowed(&code)
            && filters.measure_allowed(&measure_code)
            && filters.year_allowed(year))
        {
            continue;
        }

        let mut measure = Measure::new(&measure_code, label);
        measure.set_value(year, value);
        let mut area = Area::new(code);
        area.set_name("eng", name)?;
        area.set_measure(&measure_code, measure);
        staged.push(area);
        kept += 1;
    }
    debug!(
        "welsh stats json: kept {kept} of {} records",
        doc.value.len()
    );
    Ok(staged.into_areas())
}

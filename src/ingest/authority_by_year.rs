//! Reader for "complete" CSV exports: one row per area, one column per year.
//!
//! ```text
//! AuthorityCode,1991,1992,1993
//! W06000001,69123,69012,68915
//! ```
//!
//! The whole file is a single measure whose code and label come from the
//! column mapping. The run of year columns is whatever the header declares.

use super::{Staged, cell, csv_reader, header_index, parse_value, parse_year};
use crate::area::Area;
use crate::datasets::{SourceColumn, SourceColumnMapping, SourceDataType, check_columns, column};
use crate::error::Result;
use crate::filters::Filters;
use crate::measure::Measure;
use log::debug;

pub fn read(text: &str, cols: &SourceColumnMapping, filters: &Filters) -> Result<Vec<Area>> {
    check_columns(SourceDataType::AuthorityByYearCsv, cols)?;
    let measure_code = column(cols, SourceColumn::SingleMeasureCode)?.to_lowercase();
    let label = column(cols, SourceColumn::SingleMeasureName)?;

    let mut rdr = csv_reader(text);
    let headers = rdr.headers()?.clone();
    let code_idx = header_index(&headers, column(cols, SourceColumn::AuthCode)?)?;

    // (column index, year) for every year column in the header.
    let mut years = Vec::with_capacity(headers.len().saturating_sub(1));
    for (idx, header) in headers.iter().enumerate() {
        if idx == code_idx {
            continue;
        }
        years.push((idx, parse_year(header, format!("header column {}", idx + 1))?));
    }

    let mut staged = Staged::default();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let code = cell(&record, code_idx, &headers, row)?;
        if !filters.area_allowed(code) {
            continue;
        }

        let mut measure = Measure::new(&measure_code, label);
        for &(idx, year) in &years {
            if !filters.year_allowed(year) {
                continue;
            }
            let raw = cell(&record, idx, &headers, row)?;
            measure.set_value(year, parse_value(raw, format!("row {row}, column {year}"))?);
        }
        if measure.is_empty() {
            continue;
        }

        let mut area = Area::new(code);
        area.set_measure(&measure_code, measure);
        staged.push(area);
    }

    if !filters.measure_allowed(&measure_code) {
        debug!("authority by year: measure {measure_code} not selected, nothing imported");
        return Ok(Vec::new());
    }
    Ok(staged.into_areas())
}

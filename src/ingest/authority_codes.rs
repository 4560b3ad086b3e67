//! Reader for the reference table of authority codes and names.
//!
//! ```text
//! Local authority code,Name (eng),Name (cym)
//! W06000001,Isle of Anglesey,Ynys Môn
//! ```

use super::{Staged, cell, csv_reader, header_index};
use crate::area::Area;
use crate::datasets::{SourceColumn, SourceColumnMapping, SourceDataType, check_columns, column};
use crate::error::Result;
use crate::filters::Filters;
use log::debug;

pub fn read(text: &str, cols: &SourceColumnMapping, filters: &Filters) -> Result<Vec<Area>> {
    check_columns(SourceDataType::AuthorityCodeCsv, cols)?;

    let mut rdr = csv_reader(text);
    let headers = rdr.headers()?.clone();
    let code_idx = header_index(&headers, column(cols, SourceColumn::AuthCode)?)?;
    let eng_idx = header_index(&headers, column(cols, SourceColumn::AuthNameEng)?)?;
    let cym_idx = header_index(&headers, column(cols, SourceColumn::AuthNameCym)?)?;

    let mut staged = Staged::default();
    let mut skipped = 0usize;
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let code = cell(&record, code_idx, &headers, row)?;
        if !filters.area_allowed(code) {
            skipped += 1;
            continue;
        }
        let mut area = Area::new(code);
        area.set_name("eng", cell(&record, eng_idx, &headers, row)?)?;
        area.set_name("cym", cell(&record, cym_idx, &headers, row)?)?;
        staged.push(area);
    }
    debug!("authority codes: {skipped} rows filtered out");
    Ok(staged.into_areas())
}

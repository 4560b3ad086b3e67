//! Source formats, logical column roles, and the catalogue of known input files.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The structural format of an input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceDataType {
    /// CSV of authority code plus English and Welsh names.
    AuthorityCodeCsv,
    /// StatsWales JSON export, one record per area/measure/year.
    WelshStatsJson,
    /// CSV with one row per area and one column per year, single measure.
    AuthorityByYearCsv,
}

impl SourceDataType {
    /// How many entries a column mapping for this format must carry.
    pub fn expected_columns(self) -> usize {
        match self {
            SourceDataType::AuthorityCodeCsv => 3,
            SourceDataType::WelshStatsJson => 6,
            SourceDataType::AuthorityByYearCsv => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceDataType::AuthorityCodeCsv => "authority-code-csv",
            SourceDataType::WelshStatsJson => "welsh-stats-json",
            SourceDataType::AuthorityByYearCsv => "authority-by-year-csv",
        }
    }
}

impl fmt::Display for SourceDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceDataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "authority-code-csv" | "authoritycodecsv" => Ok(SourceDataType::AuthorityCodeCsv),
            "welsh-stats-json" | "welshstatsjson" => Ok(SourceDataType::WelshStatsJson),
            "authority-by-year-csv" | "authoritybyyearcsv" => {
                Ok(SourceDataType::AuthorityByYearCsv)
            }
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Logical role of a column in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceColumn {
    AuthCode,
    AuthNameEng,
    AuthNameCym,
    MeasureCode,
    MeasureName,
    /// Fixed measure code for files that hold only one measure.
    SingleMeasureCode,
    /// Fixed measure label for files that hold only one measure.
    SingleMeasureName,
    Year,
    Value,
}

/// Logical column role → literal header (or, for the single-measure roles, the literal value).
pub type SourceColumnMapping = BTreeMap<SourceColumn, String>;

/// Look up a required role in a mapping.
pub fn column(cols: &SourceColumnMapping, role: SourceColumn) -> Result<&str> {
    cols.get(&role)
        .map(String::as_str)
        .ok_or(Error::MissingColumn(role))
}

/// Fail unless `cols` has exactly as many entries as `kind` needs.
pub fn check_columns(kind: SourceDataType, cols: &SourceColumnMapping) -> Result<()> {
    let expected = kind.expected_columns();
    if cols.len() != expected {
        return Err(Error::ColumnCount {
            expected,
            found: cols.len(),
        });
    }
    Ok(())
}

/// A known input file and how to read it.
#[derive(Debug, Clone, Copy)]
pub struct InputFileSource {
    pub name: &'static str,
    pub file: &'static str,
    pub code: &'static str,
    pub parser: SourceDataType,
    cols: &'static [(SourceColumn, &'static str)],
}

impl InputFileSource {
    pub fn cols(&self) -> SourceColumnMapping {
        self.cols
            .iter()
            .map(|(role, header)| (*role, (*header).to_string()))
            .collect()
    }
}

use SourceColumn::{
    AuthCode, AuthNameCym, AuthNameEng, MeasureCode, MeasureName, SingleMeasureCode,
    SingleMeasureName, Value, Year,
};

/// The reference table of area codes and names, always imported first.
pub const AREAS: InputFileSource = InputFileSource {
    name: "Areas",
    file: "areas.csv",
    code: "areas",
    parser: SourceDataType::AuthorityCodeCsv,
    cols: &[
        (AuthCode, "Local authority code"),
        (AuthNameEng, "Name (eng)"),
        (AuthNameCym, "Name (cym)"),
    ],
};

/// Every importable dataset, in import order.
pub const DATASETS: &[InputFileSource] = &[
    InputFileSource {
        name: "Population density",
        file: "popu1009.json",
        code: "popden",
        parser: SourceDataType::WelshStatsJson,
        cols: &[
            (AuthCode, "Localauthority_Code"),
            (AuthNameEng, "Localauthority_ItemName_ENG"),
            (MeasureCode, "Measure_Code"),
            (MeasureName, "Measure_ItemName_ENG"),
            (Year, "Year_Code"),
            (Value, "Data"),
        ],
    },
    InputFileSource {
        name: "Active Businesses",
        file: "econ0080.json",
        code: "biz",
        parser: SourceDataType::WelshStatsJson,
        cols: &[
            (AuthCode, "Area_Code"),
            (AuthNameEng, "Area_ItemName_ENG"),
            (MeasureCode, "Variable_Code"),
            (MeasureName, "Variable_ItemName_ENG"),
            (Year, "Year_Code"),
            (Value, "Data"),
        ],
    },
    InputFileSource {
        name: "Air Quality Indicators",
        file: "envi0201.json",
        code: "aqi",
        parser: SourceDataType::WelshStatsJson,
        cols: &[
            (AuthCode, "Area_Code"),
            (AuthNameEng, "Area_ItemName_ENG"),
            (MeasureCode, "Pollutant_ItemName_ENG"),
            (MeasureName, "Pollutant_ItemName_ENG"),
            (Year, "Year_Code"),
            (Value, "Data"),
        ],
    },
    InputFileSource {
        name: "Rail passenger journeys",
        file: "tran0152.json",
        code: "trains",
        parser: SourceDataType::WelshStatsJson,
        cols: &[
            (AuthCode, "LocalAuthority_Code"),
            (AuthNameEng, "LocalAuthority_ItemName_ENG"),
            (SingleMeasureCode, "rail"),
            (SingleMeasureName, "Rail passenger journeys"),
            (Year, "Year_Code"),
            (Value, "Data"),
        ],
    },
    InputFileSource {
        name: "Population density",
        file: "complete-popu1009-popden.csv",
        code: "complete-popden",
        parser: SourceDataType::AuthorityByYearCsv,
        cols: &[
            (AuthCode, "AuthorityCode"),
            (SingleMeasureCode, "dens"),
            (SingleMeasureName, "Population density"),
        ],
    },
    InputFileSource {
        name: "Population",
        file: "complete-popu1009-pop.csv",
        code: "complete-pop",
        parser: SourceDataType::AuthorityByYearCsv,
        cols: &[
            (AuthCode, "AuthorityCode"),
            (SingleMeasureCode, "pop"),
            (SingleMeasureName, "Population"),
        ],
    },
    InputFileSource {
        name: "Land area",
        file: "complete-popu1009-area.csv",
        code: "complete-area",
        parser: SourceDataType::AuthorityByYearCsv,
        cols: &[
            (AuthCode, "AuthorityCode"),
            (SingleMeasureCode, "area"),
            (SingleMeasureName, "Land area"),
        ],
    },
];

/// Find a dataset by its short code (e.g. `popden`).
pub fn find(code: &str) -> Option<&'static InputFileSource> {
    DATASETS.iter().find(|d| d.code == code)
}

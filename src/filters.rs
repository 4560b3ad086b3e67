//! Import filters: which areas, measures, and years to keep.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive range of years to import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn single(year: i32) -> Self {
        Self::new(year, year)
    }

    /// Build from a `(start, end)` pair where `(0, 0)` means "all years".
    pub fn from_bounds(start: i32, end: i32) -> Option<Self> {
        if start == 0 && end == 0 {
            None
        } else {
            Some(Self::new(start, end))
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// What an import should keep. Empty sets and a missing range mean "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Area codes, matched exactly.
    pub areas: BTreeSet<String>,
    /// Measure codes, matched case-insensitively.
    pub measures: BTreeSet<String>,
    pub years: Option<YearRange>,
}

impl Filters {
    /// No filtering at all.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.areas = areas.into_iter().map(Into::into).collect();
        self
    }

    /// Measure codes are stored lowercase.
    pub fn with_measures<I, S>(mut self, measures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.measures = measures
            .into_iter()
            .map(|m| m.as_ref().to_lowercase())
            .collect();
        self
    }

    pub fn with_years(mut self, years: Option<YearRange>) -> Self {
        self.years = years;
        self
    }

    pub fn area_allowed(&self, code: &str) -> bool {
        self.areas.is_empty() || self.areas.contains(code)
    }

    pub fn measure_allowed(&self, codename: &str) -> bool {
        let codename = codename.to_lowercase();
        self.measures.is_empty() || self.measures.iter().any(|m| m.to_lowercase() == codename)
    }

    pub fn year_allowed(&self, year: i32) -> bool {
        self.years.is_none_or(|range| range.contains(year))
    }
}

//! A single named statistical series attached to an area.

use crate::error::{Error, Result};
use crate::stats;
use std::collections::BTreeMap;

/// One measure: a lowercase codename, a display label, and values keyed by year.
///
/// Years are held in a `BTreeMap`, so iteration is always chronological no
/// matter the order values were set in.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    codename: String,
    label: String,
    series: BTreeMap<i32, f64>,
}

impl Measure {
    /// Create an empty measure. The codename is stored lowercase.
    pub fn new(codename: &str, label: impl Into<String>) -> Self {
        Self {
            codename: codename.to_lowercase(),
            label: label.into(),
            series: BTreeMap::new(),
        }
    }

    pub fn codename(&self) -> &str {
        &self.codename
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Insert or overwrite the value for `year`.
    pub fn set_value(&mut self, year: i32, value: f64) {
        self.series.insert(year, value);
    }

    pub fn value(&self, year: i32) -> Result<f64> {
        self.series.get(&year).copied().ok_or(Error::NoValue(year))
    }

    /// Year → value, in chronological order.
    pub fn series(&self) -> &BTreeMap<i32, f64> {
        &self.series
    }

    /// Number of years with a value.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Take the incoming label and every incoming (year, value) pair.
    ///
    /// Years only present in `self` are kept.
    pub fn merge(&mut self, incoming: Measure) {
        self.label = incoming.label;
        self.series.extend(incoming.series);
    }

    pub fn average(&self) -> f64 {
        stats::mean(&self.series)
    }

    pub fn difference(&self) -> f64 {
        stats::difference(&self.series)
    }

    pub fn difference_as_percentage(&self) -> f64 {
        stats::percent_difference(&self.series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codename_is_lowercased() {
        let m = Measure::new("POP", "Population");
        assert_eq!(m.codename(), "pop");
        assert_eq!(m.label(), "Population");
    }

    #[test]
    fn merge_keeps_years_missing_from_incoming() {
        let mut existing = Measure::new("pop", "Old");
        existing.set_value(1991, 1.0);
        existing.set_value(1992, 2.0);

        let mut incoming = Measure::new("pop", "New");
        incoming.set_value(1992, 20.0);
        incoming.set_value(1993, 30.0);

        existing.merge(incoming);
        assert_eq!(existing.label(), "New");
        assert_eq!(existing.value(1991).unwrap(), 1.0);
        assert_eq!(existing.value(1992).unwrap(), 20.0);
        assert_eq!(existing.value(1993).unwrap(), 30.0);
    }
}

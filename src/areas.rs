//! The top-level store of every imported area.

use crate::area::Area;
use crate::datasets::{SourceColumnMapping, SourceDataType};
use crate::error::{Error, Result};
use crate::filters::Filters;
use crate::ingest;
use log::info;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::io::Read;

/// All areas, keyed by authority code.
///
/// Inserting an area whose code is already present merges the two rather
/// than replacing the stored one, so repeated and partial imports accumulate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Areas {
    areas: BTreeMap<String, Area>,
}

impl Areas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `area` under `code`, or merge it into the area already stored there.
    ///
    /// Incoming names, labels, and year values overwrite matching keys.
    /// Names, measures, and years only held by the stored area are kept.
    /// The stored area always carries `code`, whatever code `area` was built with.
    pub fn set_area(&mut self, code: &str, area: Area) {
        match self.areas.entry(code.to_string()) {
            Entry::Occupied(mut slot) => slot.get_mut().merge(area),
            Entry::Vacant(slot) => {
                let mut area = area;
                if area.code() != code {
                    area.set_code(code);
                }
                slot.insert(area);
            }
        }
    }

    pub fn area(&self, code: &str) -> Result<&Area> {
        self.areas
            .get(code)
            .ok_or_else(|| Error::NoArea(code.to_string()))
    }

    pub fn area_mut(&mut self, code: &str) -> Result<&mut Area> {
        self.areas
            .get_mut(code)
            .ok_or_else(|| Error::NoArea(code.to_string()))
    }

    /// Number of distinct areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Areas in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Area)> {
        self.areas.iter().map(|(code, area)| (code.as_str(), area))
    }

    /// Import one stream of format `kind` and merge the result.
    ///
    /// The stream is parsed completely before anything is merged, so an
    /// error leaves the store exactly as it was. Returns the number of
    /// areas that were merged in.
    pub fn populate<R: Read>(
        &mut self,
        input: R,
        kind: SourceDataType,
        cols: &SourceColumnMapping,
        filters: &Filters,
    ) -> Result<usize> {
        let staged = ingest::read(input, kind, cols, filters)?;
        let count = staged.len();
        for area in staged {
            let code = area.code().to_string();
            self.set_area(&code, area);
        }
        info!("{kind}: merged {count} areas, store now holds {}", self.len());
        Ok(count)
    }

    /// Like [`Areas::populate`], with the format given as a tag such as `welsh-stats-json`.
    pub fn populate_tagged<R: Read>(
        &mut self,
        input: R,
        tag: &str,
        cols: &SourceColumnMapping,
        filters: &Filters,
    ) -> Result<usize> {
        let kind: SourceDataType = tag.parse()?;
        self.populate(input, kind, cols, filters)
    }

    /// Import without filters. Only the reference table can be read this way.
    pub fn populate_unfiltered<R: Read>(
        &mut self,
        input: R,
        kind: SourceDataType,
        cols: &SourceColumnMapping,
    ) -> Result<usize> {
        if kind != SourceDataType::AuthorityCodeCsv {
            return Err(Error::UnknownFormat(kind.to_string()));
        }
        self.populate(input, kind, cols, &Filters::all())
    }
}

impl<'a> IntoIterator for &'a Areas {
    type Item = (&'a String, &'a Area);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Area>;

    fn into_iter(self) -> Self::IntoIter {
        self.areas.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Measure;

    #[test]
    fn set_area_twice_keeps_one_entry() {
        let mut areas = Areas::new();
        areas.set_area("W06000011", Area::new("W06000011"));
        areas.set_area("W06000011", Area::new("W06000011"));
        assert_eq!(areas.len(), 1);
    }

    #[test]
    fn area_mut_allows_in_place_edits() {
        let mut areas = Areas::new();
        areas.set_area("W06000011", Area::new("W06000011"));
        let mut m = Measure::new("pop", "Population");
        m.set_value(2000, 1.0);
        areas.area_mut("W06000011").unwrap().set_measure("pop", m);
        assert_eq!(areas.area("W06000011").unwrap().len(), 1);
        assert!(matches!(areas.area("W06000099"), Err(Error::NoArea(_))));
    }
}

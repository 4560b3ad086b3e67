//! A local authority area: its code, localised names, and measures.

use crate::error::{Error, Result};
use crate::measure::Measure;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// One geographic unit, identified by its authority code.
///
/// Names are keyed by a lowercase three-letter language code (`eng`, `cym`).
/// Measures are keyed by lowercase codename, which keeps them unique and
/// sorted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    code: String,
    names: BTreeMap<String, String>,
    measures: BTreeMap<String, Measure>,
}

fn is_valid_lang(lang: &str) -> bool {
    lang.len() == 3 && lang.chars().all(|c| c.is_ascii_alphabetic())
}

impl Area {
    /// Create an area with no names and no measures. The code is kept as given.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            names: BTreeMap::new(),
            measures: BTreeMap::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub(crate) fn set_code(&mut self, code: &str) {
        self.code = code.to_string();
    }

    /// Store `name` for `lang`, replacing any previous name in that language.
    pub fn set_name(&mut self, lang: &str, name: impl Into<String>) -> Result<()> {
        if !is_valid_lang(lang) {
            return Err(Error::InvalidLangCode(lang.to_string()));
        }
        self.names.insert(lang.to_ascii_lowercase(), name.into());
        Ok(())
    }

    pub fn name(&self, lang: &str) -> Result<&str> {
        if !is_valid_lang(lang) {
            return Err(Error::InvalidLangCode(lang.to_string()));
        }
        self.names
            .get(&lang.to_ascii_lowercase())
            .map(String::as_str)
            .ok_or_else(|| Error::NoName(lang.to_string()))
    }

    /// Language code → name, sorted by language code.
    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// Add `measure` under `codename`, or merge it into the one already there.
    ///
    /// On merge the incoming label wins and incoming years overwrite; years
    /// only held by the existing measure survive.
    pub fn set_measure(&mut self, codename: &str, measure: Measure) {
        let key = codename.to_lowercase();
        match self.measures.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().merge(measure),
            Entry::Vacant(slot) => {
                let mut measure = measure;
                if measure.codename() != slot.key().as_str() {
                    measure = rekey(measure, slot.key());
                }
                slot.insert(measure);
            }
        }
    }

    /// Case-insensitive lookup by codename.
    pub fn measure(&self, codename: &str) -> Result<&Measure> {
        self.measures
            .get(&codename.to_lowercase())
            .ok_or_else(|| Error::NoMeasure(codename.to_string()))
    }

    pub fn measure_mut(&mut self, codename: &str) -> Result<&mut Measure> {
        self.measures
            .get_mut(&codename.to_lowercase())
            .ok_or_else(|| Error::NoMeasure(codename.to_string()))
    }

    /// Measures in ascending codename order.
    pub fn measures(&self) -> impl Iterator<Item = &Measure> {
        self.measures.values()
    }

    /// Number of distinct measures.
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Fold `incoming` (the same area from another import) into `self`.
    ///
    /// Incoming names and measures overwrite matching keys; nothing present
    /// only in `self` is removed.
    pub fn merge(&mut self, incoming: Area) {
        // Keys in `names` were validated when they were set.
        self.names.extend(incoming.names);
        for (codename, measure) in incoming.measures {
            self.set_measure(&codename, measure);
        }
    }
}

/// Copy a measure under a different (already lowercase) codename.
fn rekey(measure: Measure, codename: &str) -> Measure {
    let mut out = Measure::new(codename, measure.label());
    for (&year, &value) in measure.series() {
        out.set_value(year, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_name_normalises_and_validates_lang() {
        let mut area = Area::new("W06000011");
        area.set_name("ENG", "Swansea").unwrap();
        assert_eq!(area.name("eng").unwrap(), "Swansea");
        assert_eq!(area.names().keys().collect::<Vec<_>>(), vec!["eng"]);

        assert!(matches!(
            area.set_name("en", "Swansea"),
            Err(Error::InvalidLangCode(_))
        ));
        assert!(matches!(
            area.set_name("e1g", "Swansea"),
            Err(Error::InvalidLangCode(_))
        ));
    }

    #[test]
    fn name_distinguishes_bad_code_from_missing_name() {
        let area = Area::new("W06000011");
        assert!(matches!(area.name("cy"), Err(Error::InvalidLangCode(_))));
        assert!(matches!(area.name("cym"), Err(Error::NoName(_))));
    }

    #[test]
    fn set_measure_under_a_different_key_uses_that_key() {
        let mut area = Area::new("W06000011");
        let mut m = Measure::new("x", "Population");
        m.set_value(2000, 1.0);
        area.set_measure("POP", m);

        let stored = area.measure("pop").unwrap();
        assert_eq!(stored.codename(), "pop");
        assert_eq!(stored.value(2000).unwrap(), 1.0);
        assert!(area.measure("x").is_err());
    }
}

//! Series statistics and per-area, per-measure summaries.

use crate::areas::Areas;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Arithmetic mean of the series, or 0 when it is empty.
pub fn mean(series: &BTreeMap<i32, f64>) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.values().sum::<f64>() / series.len() as f64
}

/// First and last values in chronological order, if at least two years exist.
fn endpoints(series: &BTreeMap<i32, f64>) -> Option<(f64, f64)> {
    if series.len() < 2 {
        return None;
    }
    let first = *series.values().next()?;
    let last = *series.values().next_back()?;
    Some((first, last))
}

/// `last - first`, or 0 with fewer than two years.
pub fn difference(series: &BTreeMap<i32, f64>) -> f64 {
    endpoints(series).map_or(0.0, |(first, last)| last - first)
}

/// Difference relative to the larger-magnitude endpoint, as a percentage.
///
/// The denominator is `max(|first|, |last|)`. Equal endpoints, a zero
/// denominator, or fewer than two years all yield 0.
pub fn percent_difference(series: &BTreeMap<i32, f64>) -> f64 {
    let Some((first, last)) = endpoints(series) else {
        return 0.0;
    };
    if first == last {
        return 0.0;
    }
    let denominator = first.abs().max(last.abs());
    if denominator == 0.0 {
        return 0.0;
    }
    (last - first) / denominator * 100.0
}

/// Summary statistics for one measure of one area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub area_code: String,
    pub measure: String,
    pub count: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: f64,
    pub difference: f64,
    pub percent_difference: f64,
}

/// Compute statistics for every (area code, measure codename) pair, ordered by both.
pub fn grouped_summary(areas: &Areas) -> Vec<Summary> {
    let mut out = Vec::new();
    for (code, area) in areas.iter() {
        for measure in area.measures() {
            let series = measure.series();
            let min = series.values().copied().reduce(f64::min);
            let max = series.values().copied().reduce(f64::max);
            out.push(Summary {
                area_code: code.to_string(),
                measure: measure.codename().to_string(),
                count: series.len(),
                first_year: series.keys().next().copied(),
                last_year: series.keys().next_back().copied(),
                min,
                max,
                mean: mean(series),
                difference: difference(series),
                percent_difference: percent_difference(series),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(i32, f64)]) -> BTreeMap<i32, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn percent_difference_uses_larger_magnitude() {
        // Falling series: the first value is the larger magnitude.
        let s = series(&[(2000, 20.0), (2010, 10.0)]);
        assert_eq!(difference(&s), -10.0);
        assert_eq!(percent_difference(&s), -50.0);

        // Negative endpoint dominates by magnitude.
        let s = series(&[(2000, -40.0), (2010, 10.0)]);
        assert_eq!(percent_difference(&s), 50.0 / 40.0 * 100.0);
    }

    #[test]
    fn flat_and_single_year_series_are_zero() {
        let s = series(&[(2000, 7.0), (2005, 3.0), (2010, 7.0)]);
        assert_eq!(difference(&s), 0.0);
        assert_eq!(percent_difference(&s), 0.0);

        let s = series(&[(2000, 7.0)]);
        assert_eq!(mean(&s), 7.0);
        assert_eq!(difference(&s), 0.0);
        assert_eq!(percent_difference(&s), 0.0);
    }
}

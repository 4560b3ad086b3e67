use bethyw::{Error, Measure};

fn measure(pairs: &[(i32, f64)]) -> Measure {
    let mut m = Measure::new("pop", "Population");
    for &(year, value) in pairs {
        m.set_value(year, value);
    }
    m
}

#[test]
fn two_year_series_average_and_differences() {
    let m = measure(&[(1999, 10.0), (2001, 20.0)]);
    assert_eq!(m.average(), 15.0);
    assert_eq!(m.difference(), 10.0);
    assert_eq!(m.difference_as_percentage(), 50.0);
}

#[test]
fn empty_series_is_all_zero() {
    let m = measure(&[]);
    assert_eq!(m.average(), 0.0);
    assert_eq!(m.difference(), 0.0);
    assert_eq!(m.difference_as_percentage(), 0.0);
}

#[test]
fn endpoints_follow_chronology_not_insertion_order() {
    // Inserted out of order: 2010 first, then 1990, then 2000.
    let m = measure(&[(2010, 40.0), (1990, 10.0), (2000, 25.0)]);
    assert_eq!(m.series().keys().copied().collect::<Vec<_>>(), vec![1990, 2000, 2010]);
    assert_eq!(m.difference(), 30.0);
    assert_eq!(m.difference_as_percentage(), 75.0);
    assert!((m.average() - 25.0).abs() < 1e-9);
}

#[test]
fn set_value_overwrites_and_get_value_misses_are_lookups() {
    let mut m = measure(&[(1991, 1.0)]);
    m.set_value(1991, 2.0);
    assert_eq!(m.value(1991).unwrap(), 2.0);
    assert_eq!(m.len(), 1);

    let err = m.value(1850).unwrap_err();
    assert!(matches!(err, Error::NoValue(1850)));
    assert_eq!(err.kind(), bethyw::ErrorKind::Lookup);
}

#[test]
fn equal_endpoints_give_zero_percentage() {
    let m = measure(&[(2000, -5.0), (2001, 100.0), (2002, -5.0)]);
    assert_eq!(m.difference(), 0.0);
    assert_eq!(m.difference_as_percentage(), 0.0);
}

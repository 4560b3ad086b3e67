use bethyw::{Area, Areas, Measure, stats, storage};

fn populated() -> Areas {
    let mut areas = Areas::new();
    for (code, eng, base) in [("W06000002", "Gwynedd", 100.0), ("W06000001", "Isle of Anglesey", 50.0)] {
        let mut a = Area::new(code);
        a.set_name("eng", eng).unwrap();
        let mut m = Measure::new("pop", "Population");
        m.set_value(1991, base);
        m.set_value(1992, base * 2.0);
        a.set_measure("pop", m);
        areas.set_area(code, a);
    }
    areas
}

#[test]
fn json_shape_is_nested_by_code() {
    let json = storage::to_json(&populated()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["W06000001"]["names"]["eng"], "Isle of Anglesey");
    assert_eq!(v["W06000001"]["measures"]["pop"]["1991"], 50.0);
    assert_eq!(v["W06000002"]["measures"]["pop"]["1992"], 200.0);
    assert!(json.find("W06000001").unwrap() < json.find("W06000002").unwrap());
}

#[test]
fn json_round_trip_keeps_names_measures_and_values() {
    let original = populated();
    let rebuilt = storage::from_json(&storage::to_json(&original).unwrap()).unwrap();
    assert_eq!(rebuilt.len(), original.len());
    for (code, area) in original.iter() {
        let other = rebuilt.area(code).unwrap();
        assert_eq!(other.names(), area.names());
        for m in area.measures() {
            assert_eq!(other.measure(m.codename()).unwrap().series(), m.series());
        }
    }
}

#[test]
fn empty_store_serializes_to_empty_object() {
    assert_eq!(storage::to_json(&Areas::new()).unwrap(), "{}");
}

#[test]
fn csv_export_is_tidy_and_sanitized() {
    let mut areas = populated();
    let mut a = Area::new("W06000003");
    a.set_name("eng", "=HYPERLINK(\"http://evil\")").unwrap();
    let mut m = Measure::new("dens", "+SUM(A1:A9)");
    m.set_value(2000, -1.5);
    a.set_measure("dens", m);
    areas.set_area("W06000003", a);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    storage::save_csv(&areas, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["area_code", "name_eng", "name_cym", "measure", "label", "year", "value"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);
    let evil = rows.iter().find(|r| &r[0] == "W06000003").unwrap();
    assert!(evil[1].starts_with("'="));
    assert!(evil[4].starts_with("'+"));
    assert_eq!(&evil[6], "-1.5");
}

#[test]
fn grouped_summary_covers_each_area_measure() {
    let summaries = stats::grouped_summary(&populated());
    assert_eq!(summaries.len(), 2);
    let s = &summaries[0];
    assert_eq!(s.area_code, "W06000001");
    assert_eq!(s.measure, "pop");
    assert_eq!(s.count, 2);
    assert_eq!(s.first_year, Some(1991));
    assert_eq!(s.min, Some(50.0));
    assert_eq!(s.max, Some(100.0));
    assert_eq!(s.mean, 75.0);
    assert_eq!(s.difference, 50.0);
    assert_eq!(s.percent_difference, 50.0);
}

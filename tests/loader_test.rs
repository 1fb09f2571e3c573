use std::io::Write;

use camino::Utf8PathBuf;
use nalgebra::Vector3;

use rategrid::{AxisSpec, GridSpec, IndexTriple, InitError, LazyTable, TableLoader, TextTableLoader};

fn spec_3x3x2() -> GridSpec {
    GridSpec::new(
        AxisSpec::new(0.0, 1.0, 3).unwrap(),
        AxisSpec::new(0.0, 1.0, 3).unwrap(),
        AxisSpec::new(0.0, 1.0, 2).unwrap(),
    )
}

#[test]
fn test_fixture_file_loads_fully_populated() {
    let loader = TextTableLoader::new("tests/data/heating_3x3x2.tab", spec_3x3x2());
    let table = loader.load().unwrap();

    assert_eq!(table.dims(), [3, 3, 2]);
    assert_eq!(table.values().len(), 18);
    assert_eq!(
        table.get(IndexTriple { i: 0, j: 0, k: 0 }).unwrap().heating,
        1.0
    );
    assert_eq!(
        table.get(IndexTriple { i: 1, j: 0, k: 0 }).unwrap().heating,
        3.0
    );
}

#[test]
fn test_fixture_file_is_bit_identical_across_loads() {
    let loader = TextTableLoader::new("tests/data/heating_3x3x2.tab", spec_3x3x2());
    let first = loader.load().unwrap();
    let second = loader.load().unwrap();
    assert_eq!(first.content_hash(), second.content_hash());
    assert_eq!(first, second);
}

#[test]
fn test_lazy_table_over_fixture_file() {
    let loader = TextTableLoader::new("tests/data/heating_3x3x2.tab", spec_3x3x2());
    let lazy = LazyTable::new();

    let handle = lazy.get_or_load(&loader).unwrap();
    let midpoint = handle.interpolate(&Vector3::new(0.5, 0.0, 0.0));
    assert_eq!(midpoint.heating, 2.0);
}

#[test]
fn test_wrong_geometry_against_real_file_is_malformed() {
    // the fixture holds 18 pairs; a 4x4x4 grid wants 64
    let axis = AxisSpec::new(0.0, 1.0, 4).unwrap();
    let loader = TextTableLoader::new(
        "tests/data/heating_3x3x2.tab",
        GridSpec::new(axis, axis, axis),
    );
    assert!(matches!(loader.load(), Err(InitError::MalformedData(_))));
}

#[test]
fn test_missing_source_reports_the_path() {
    let loader = TextTableLoader::new("tests/data/no_such_table.tab", spec_3x3x2());
    match loader.load() {
        Err(InitError::NotFound(message)) => assert!(message.contains("no_such_table.tab")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_irregular_whitespace_is_accepted() {
    // the format is token-separated, not line-oriented
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("ragged.tab")).unwrap();
    let mut file = std::fs::File::create(&path).unwrap();
    let tokens: String = (0..36).map(|n| {
        let sep = if n % 5 == 0 { "\n\t" } else { "   " };
        format!("{}.0{sep}", n)
    }).collect();
    file.write_all(tokens.as_bytes()).unwrap();

    let table = TextTableLoader::new(path, spec_3x3x2()).load().unwrap();
    assert_eq!(table.values().len(), 18);
    assert_eq!(
        *table.get(IndexTriple { i: 2, j: 2, k: 1 }).unwrap(),
        rategrid::RatePair {
            heating: 34.0,
            cooling: 35.0
        }
    );
}

use cityscan::{CityLoader, Config, Error, QueryEngine, StrategyKind, load_cities};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const BELGIUM: &str = "\
name,latitude,longitude
Liège,50.6326,5.5797
Brussels,50.8503,4.3517
Antwerp,51.2194,4.4025
Arlon,49.6833,5.8167
# not Belgium
Sydney,-33.8688,151.2093
";

#[test]
fn test_load_text_file_and_query() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(BELGIUM.as_bytes()).unwrap();

    let cities = load_cities(file.path()).unwrap();
    assert_eq!(cities.len(), 5);

    // Arlon sits exactly on the southern edge
    let bounds = cityscan::BoundingBox::new(49.6833, 51.0, 4.0, 6.0);
    for kind in StrategyKind::ALL {
        let engine = QueryEngine::new(Config::default().with_strategy(kind));
        let mut names: Vec<&str> = engine
            .find_cities(&cities, &bounds)
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Arlon", "Brussels", "Liège"], "strategy {}", kind);
    }
}

#[test]
fn test_load_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cities.json");
    std::fs::write(
        &path,
        r#"[{"name": "Liège", "latitude": 50.6326, "longitude": 5.5797}]"#,
    )
    .unwrap();

    let cities = load_cities(&path).unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].longitude, 5.5797);
}

#[test]
fn test_load_reports_bad_line() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Liège,50.6326,5.5797").unwrap();
    writeln!(file, "Atlantis,123.0,5.0").unwrap();

    match load_cities(file.path()) {
        Err(Error::Parse { line, reason }) => {
            assert_eq!(line, 2);
            assert!(reason.contains("Latitude"));
        }
        other => panic!("expected parse error, got {:?}", other),
    }

    let lenient = CityLoader::from_config(&Config::default().with_validate_cities(false));
    assert_eq!(lenient.load(file.path()).unwrap().len(), 2);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        load_cities(dir.path().join("absent.txt")),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cityscan.json");
    std::fs::write(&path, r#"{"strategy": "z_order", "validate_bounds": false}"#).unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.strategy, StrategyKind::ZOrder);
    assert!(!config.validate_bounds);

    let unknown = dir.path().join("cityscan.ini");
    std::fs::write(&unknown, "strategy=z_order").unwrap();
    assert!(Config::from_file(&unknown).is_err());
}

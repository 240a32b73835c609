//! Integration tests for loading configuration files.

use grotto::pathfinding::PathfindingConfig;
use grotto::{generate_cave, CaveConfig, Coord2, GrottoError};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_cave_config_roundtrip_through_file() {
    let mut config = CaveConfig::for_testing("file");
    config.smooths = 5;

    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(config.to_json().expect("serializable").as_bytes())
        .expect("write config");

    let loaded = CaveConfig::from_json_file(file.path()).expect("load config");
    assert_eq!(loaded, config);

    let a = generate_cave::<Coord2>(&config).expect("generation failed");
    let b = generate_cave::<Coord2>(&loaded).expect("generation failed");
    assert_eq!(a.grid, b.grid);
}

#[test]
fn test_partial_file_uses_defaults() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, r#"{{ "seed": "sparse", "width": 40 }}"#).expect("write config");

    let loaded = CaveConfig::from_json_file(file.path()).expect("load config");
    assert_eq!(loaded.width, 40);
    assert_eq!(loaded.height, CaveConfig::default().height);
    assert_eq!(loaded.seed, "sparse");
}

#[test]
fn test_bad_files_are_errors() {
    let missing = CaveConfig::from_json_file("/definitely/not/here.json");
    assert!(matches!(missing, Err(GrottoError::Io(_))));

    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{{ not json").expect("write config");
    assert!(matches!(
        CaveConfig::from_json_file(file.path()),
        Err(GrottoError::Serde(_))
    ));

    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "fill": 2.0 }}"#).expect("write config");
    assert!(matches!(
        CaveConfig::from_json_file(file.path()),
        Err(GrottoError::InvalidConfig(_))
    ));
}

#[test]
fn test_pathfinding_config_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "agent_size": 3, "max_steps": 500 }}"#).expect("write config");

    let loaded = PathfindingConfig::from_json_file(file.path()).expect("load config");
    assert_eq!(loaded.agent_size, 3);
    assert_eq!(loaded.max_steps, Some(500));
    assert!(!loaded.allow_partial_path);
}

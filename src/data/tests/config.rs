use std::path::PathBuf;

use crate::data::{DataConfig, DataError, default_data_dir};

#[test]
fn test_config_defaults() {
    let config = DataConfig::default();
    assert_eq!(config.batch_size, 1);
    assert_eq!(config.test_batch_size, 1);
    assert_eq!(config.crop_size, 256);
    assert_eq!(config.prefetch, 0);
    assert_eq!(config.mnist_data_path, default_data_dir().join("mnist"));
    assert_eq!(
        config.pix2pix_maps_data_path,
        default_data_dir().join("pix2pix").join("maps")
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_partial_json() {
    let config = DataConfig::from_json_str(
        r#"{
            "batch_size": 8,
            "crop_size": 128,
            "pix2pix_maps_data_path": "/data/maps",
            "learning_rate": 0.0002,
            "generator": { "ngf": 64 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.batch_size, 8);
    assert_eq!(config.crop_size, 128);
    assert_eq!(config.pix2pix_maps_data_path, PathBuf::from("/data/maps"));
    // 未给出的字段取默认值
    assert_eq!(config.test_batch_size, 1);
    assert_eq!(config.mnist_data_path, DataConfig::default().mnist_data_path);
}

#[test]
fn test_config_rejects_zero_sizes() {
    for json in [
        r#"{"batch_size": 0}"#,
        r#"{"test_batch_size": 0}"#,
        r#"{"crop_size": 0}"#,
    ] {
        let err = DataConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, DataError::Config(_)), "{json}: {err:?}");
    }
}

#[test]
fn test_config_invalid_json() {
    let err = DataConfig::from_json_str(r#"{"batch_size": "eight"}"#).unwrap_err();
    assert!(matches!(err, DataError::Json(_)));
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("train.json");
    std::fs::write(&path, r#"{"test_batch_size": 4, "prefetch": 2}"#).unwrap();

    let config = DataConfig::from_json_file(&path).unwrap();
    assert_eq!(config.test_batch_size, 4);
    assert_eq!(config.prefetch, 2);

    let missing = dir.path().join("missing.json");
    let err = DataConfig::from_json_file(&missing).unwrap_err();
    assert!(matches!(err, DataError::FileNotFound(p) if p == missing));
}

#[test]
fn test_config_json_roundtrip() {
    let config = DataConfig {
        batch_size: 16,
        ..DataConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(DataConfig::from_json_str(&json).unwrap(), config);
}

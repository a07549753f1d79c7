use std::io::Write;

use flatsearch::{DistanceMetric, FlatIndex, FlatIndexConfig, FlatSearchError, LabelMode};
use tempfile::NamedTempFile;

#[test]
fn test_index_from_json_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "dimension": 3,
            "metric": "cosine",
            "mode": "multi",
            "initial_capacity": 10,
            "block_size": 4,
            "num_threads": 2
        }}"#
    )
    .unwrap();

    let config = FlatIndexConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.dimension, 3);
    assert_eq!(config.metric, DistanceMetric::Cosine);
    assert_eq!(config.mode, LabelMode::Multi);
    assert_eq!(config.block_size, 4);
    assert_eq!(config.scan_threads(), 2);

    let index = FlatIndex::new(config).unwrap();
    for i in 0..9u64 {
        index.add_vector(&[1.0, i as f32, 0.0], i % 3).unwrap();
    }
    assert_eq!(index.info().block_count, 3);
    assert_eq!(index.label_count(), 3);
    assert_eq!(index.knn_query(&[1.0, 0.0, 0.0], 10).unwrap().labels()[0], 0);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");

    let config = FlatIndexConfig::builder()
        .dimension(64)
        .metric(DistanceMetric::L2)
        .initial_capacity(1_000)
        .build()
        .unwrap();
    std::fs::write(&path, config.to_json().unwrap()).unwrap();

    assert_eq!(FlatIndexConfig::from_json_file(&path).unwrap(), config);
}

#[test]
fn test_minimal_json_uses_defaults() {
    let config = FlatIndexConfig::from_json_str(r#"{ "dimension": 5 }"#).unwrap();
    assert_eq!(config.metric, DistanceMetric::L2);
    assert_eq!(config.mode, LabelMode::Single);
    assert_eq!(config.block_size, flatsearch::vector::index::DEFAULT_BLOCK_SIZE);
    assert_eq!(config.num_threads, None);

    let euclidean = FlatIndexConfig::from_json_str(r#"{ "dimension": 5, "metric": "euclidean" }"#)
        .unwrap();
    assert_eq!(euclidean.metric, DistanceMetric::L2);
}

#[test]
fn test_invalid_config_files() {
    assert!(matches!(
        FlatIndexConfig::from_json_file("/nonexistent/flatsearch/index.json"),
        Err(FlatSearchError::Io(_))
    ));

    assert!(matches!(
        FlatIndexConfig::from_json_str("{ not json"),
        Err(FlatSearchError::Json(_))
    ));
    assert!(matches!(
        FlatIndexConfig::from_json_str(r#"{ "dimension": 4, "metric": "hamming" }"#),
        Err(FlatSearchError::Json(_))
    ));
    assert!(matches!(
        FlatIndexConfig::from_json_str(r#"{ "dimension": 4, "block_size": 0 }"#),
        Err(FlatSearchError::InvalidConfig(_))
    ));
    assert!(matches!(
        FlatIndexConfig::from_json_str(r#"{ "dimension": 0 }"#),
        Err(FlatSearchError::InvalidArgument(_))
    ));
}

#[test]
fn test_metric_names() {
    assert_eq!("L2".parse::<DistanceMetric>().unwrap(), DistanceMetric::L2);
    assert_eq!("cosine".parse::<DistanceMetric>().unwrap(), DistanceMetric::Cosine);
    assert!("dot".parse::<DistanceMetric>().is_err());
    assert_eq!(DistanceMetric::Cosine.to_string(), "cosine");
}

#[test]
fn test_size_estimates_grow_with_dimension() {
    let small = FlatIndexConfig::new(8, DistanceMetric::L2);
    let large = FlatIndexConfig::new(512, DistanceMetric::L2);
    assert!(large.estimated_element_size() > small.estimated_element_size());
    assert_eq!(
        large.estimated_element_size() - small.estimated_element_size(),
        (512 - 8) * std::mem::size_of::<f32>()
    );
}

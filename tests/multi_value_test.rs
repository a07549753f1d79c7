mod common;

use std::collections::HashMap;

use common::{EPSILON, assert_ascending, assert_unique, build_index, random_vector, random_vectors, reference_distance};
use flatsearch::{DistanceMetric, LabelMode, ResultOrder};

/// 600 vectors spread over 50 labels, 12 vectors each.
fn grouped_data(dim: usize) -> Vec<(u64, Vec<f32>)> {
    random_vectors(77, 600, dim)
        .into_iter()
        .enumerate()
        .map(|(i, v)| ((i % 50) as u64, v))
        .collect()
}

fn per_label_minimum(
    metric: DistanceMetric,
    data: &[(u64, Vec<f32>)],
    query: &[f32],
) -> HashMap<u64, f32> {
    let mut best: HashMap<u64, f32> = HashMap::new();
    for (label, vector) in data {
        let d = reference_distance(metric, query, vector);
        best.entry(*label)
            .and_modify(|current| *current = current.min(d))
            .or_insert(d);
    }
    best
}

#[test]
fn test_label_reports_closest_vector() {
    let index = build_index(
        1,
        DistanceMetric::L2,
        LabelMode::Multi,
        &[
            (1, vec![10.0]),
            (1, vec![2.0]),
            (2, vec![3.0]),
            (1, vec![7.0]),
            (2, vec![-4.0]),
        ],
    );
    assert_eq!(index.index_size(), 5);
    assert_eq!(index.label_count(), 2);

    let result = index.knn_query(&[0.0], 10).unwrap();
    assert_eq!(result.labels(), vec![1, 2]);
    assert_eq!(result.distances(), vec![4.0, 9.0]);

    assert_eq!(index.distance_from(1, &[0.0]).unwrap(), Some(4.0));
    assert_eq!(index.get_vectors(1).unwrap().len(), 3);
}

#[test]
fn test_knn_over_labels_matches_reference() {
    let dim = 10;
    for metric in [DistanceMetric::L2, DistanceMetric::Cosine] {
        let data = grouped_data(dim);
        let index = build_index(dim, metric, LabelMode::Multi, &data);
        let query = random_vector(8, dim);
        let reference = per_label_minimum(metric, &data, &query);

        let result = index.knn_query(&query, 20).unwrap();
        assert_eq!(result.len(), 20);
        assert_unique(&result.labels());
        assert_ascending(&result.distances());
        for entry in result.iter() {
            assert!((reference[&entry.label] - entry.distance).abs() < EPSILON);
        }

        // k beyond the label count returns every label once.
        let all = index.knn_query(&query, 1_000).unwrap();
        assert_eq!(all.len(), 50);
        assert_unique(&all.labels());
    }
}

#[test]
fn test_range_over_labels() {
    let dim = 10;
    let data = grouped_data(dim);
    let index = build_index(dim, DistanceMetric::L2, LabelMode::Multi, &data);
    let query = random_vector(9, dim);

    let full = index.knn_query(&query, 50).unwrap();
    let radius = full.distances()[24];

    let result = index.range_query(&query, radius).unwrap();
    assert_unique(&result.labels());
    assert_ascending(&result.distances());
    assert!(result.len() >= 25);
    let expected: Vec<u64> = full
        .iter()
        .filter(|e| e.distance <= radius)
        .map(|e| e.label)
        .collect();
    assert_eq!(result.labels(), expected);
}

#[test]
fn test_batch_iterator_serves_each_label_once() {
    let dim = 10;
    let data = grouped_data(dim);
    let index = build_index(dim, DistanceMetric::Cosine, LabelMode::Multi, &data);
    let query = random_vector(10, dim);

    let mut it = index.create_batch_iterator(&query).unwrap();
    assert_eq!(it.len(), 50);

    let mut served = Vec::new();
    let mut iterations = 0;
    while it.has_next() {
        served.extend(it.get_next_results(15, ResultOrder::ById).unwrap().labels());
        iterations += 1;
    }
    assert_eq!(iterations, 4);
    assert_eq!(served.len(), 50);
    assert_unique(&served);
}

#[test]
fn test_multi_value_above_parallel_threshold() {
    let dim = 4;
    let count = flatsearch::vector::index::PARALLEL_SCAN_THRESHOLD + 500;
    let data: Vec<(u64, Vec<f32>)> = random_vectors(31, count, dim)
        .into_iter()
        .enumerate()
        .map(|(i, v)| ((i % 1_000) as u64, v))
        .collect();
    let index = build_index(dim, DistanceMetric::L2, LabelMode::Multi, &data);
    let query = random_vector(32, dim);
    let reference = per_label_minimum(DistanceMetric::L2, &data, &query);

    let result = index.knn_query(&query, 25).unwrap();
    assert_unique(&result.labels());
    for entry in result.iter() {
        assert!((reference[&entry.label] - entry.distance).abs() < EPSILON);
    }

    let mut expected: Vec<f32> = reference.values().copied().collect();
    expected.sort_by(f32::total_cmp);
    for (got, want) in result.distances().iter().zip(&expected) {
        assert!((got - want).abs() < EPSILON);
    }
}

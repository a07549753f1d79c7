#![allow(dead_code)]

use flatsearch::{DistanceMetric, FlatIndex, FlatIndexConfig, LabelMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const EPSILON: f32 = 1e-4;

pub fn random_vectors(seed: u64, count: usize, dim: usize) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (0..dim).map(|_| rng.random::<f32>()).collect())
        .collect()
}

pub fn random_vector(seed: u64, dim: usize) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..dim).map(|_| rng.random::<f32>()).collect()
}

/// Reference distance computed in f64, independent of the crate's kernels.
pub fn reference_distance(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f32 {
    match metric {
        DistanceMetric::L2 => a
            .iter()
            .zip(b)
            .map(|(x, y)| {
                let d = *x as f64 - *y as f64;
                d * d
            })
            .sum::<f64>() as f32,
        DistanceMetric::Cosine => {
            let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
            let na: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
            let nb: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
            if na == 0.0 || nb == 0.0 {
                1.0
            } else {
                (1.0 - dot / (na * nb)) as f32
            }
        }
    }
}

pub fn build_index(
    dim: usize,
    metric: DistanceMetric,
    mode: LabelMode,
    vectors: &[(u64, Vec<f32>)],
) -> FlatIndex {
    let config = FlatIndexConfig::builder()
        .dimension(dim)
        .metric(metric)
        .mode(mode)
        .initial_capacity(vectors.len())
        .block_size(256)
        .build()
        .unwrap();
    let index = FlatIndex::new(config).unwrap();
    for (label, vector) in vectors {
        index.add_vector(vector, *label).unwrap();
    }
    index
}

pub fn assert_ascending(distances: &[f32]) {
    for pair in distances.windows(2) {
        assert!(pair[0] <= pair[1], "not ascending: {} > {}", pair[0], pair[1]);
    }
}

pub fn assert_unique(labels: &[u64]) {
    let mut sorted = labels.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), labels.len(), "duplicate labels in {labels:?}");
}

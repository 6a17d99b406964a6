//! Build-once Euclidean nearest-neighbor index.
//!
//! The index is populated exactly once from the corpus embeddings and never
//! mutated afterward, so it can be shared read-only across sessions without
//! locking. Vector position i corresponds to knowledge chunk i.
//!
//! Building from an empty vector set is allowed; queries against an empty
//! index return an empty result set rather than erroring, so an empty
//! corpus degrades to "no grounding context".

use crate::error::{MiPracticeError, Result};

/// A single nearest-neighbor match.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// Position of the stored vector (= chunk index).
    pub position: usize,
    /// Euclidean distance to the query vector.
    pub distance: f32,
}

/// Flat Euclidean-distance vector index.
pub struct VectorIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Build an index from a fixed set of vectors, order preserved.
    ///
    /// Every vector must have the configured dimension.
    pub fn build(dimension: usize, vectors: Vec<Vec<f32>>) -> Result<Self> {
        for vector in &vectors {
            if vector.len() != dimension {
                return Err(MiPracticeError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
        }

        Ok(Self { dimension, vectors })
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Configured vector dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Return the `k` stored positions nearest to `query`, nearest-first,
    /// with their Euclidean distances.
    ///
    /// If `k` exceeds the number of stored vectors, all of them are
    /// returned.
    pub fn query(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dimension {
            return Err(MiPracticeError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| Neighbor {
                position,
                distance: euclidean_distance(query, vector),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.position.cmp(&b.position))
        });
        neighbors.truncate(k);

        Ok(neighbors)
    }
}

fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> VectorIndex {
        VectorIndex::build(
            3,
            vec![
                vec![0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![0.0, 3.0, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_self_retrieval_is_nearest() {
        let index = sample_index();

        for position in 0..index.len() {
            let stored = match position {
                0 => vec![0.0, 0.0, 0.0],
                1 => vec![1.0, 0.0, 0.0],
                _ => vec![0.0, 3.0, 0.0],
            };
            let neighbors = index.query(&stored, 1).unwrap();
            assert_eq!(neighbors[0].position, position);
            assert_eq!(neighbors[0].distance, 0.0);
        }
    }

    #[test]
    fn test_results_sorted_and_distinct() {
        let index = sample_index();
        let neighbors = index.query(&[0.9, 0.0, 0.0], 3).unwrap();

        assert_eq!(neighbors.len(), 3);
        for pair in neighbors.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
            assert_ne!(pair[0].position, pair[1].position);
        }
        assert_eq!(neighbors[0].position, 1);
    }

    #[test]
    fn test_k_larger_than_index_returns_all() {
        let index = sample_index();
        let neighbors = index.query(&[0.0, 0.0, 0.0], 10).unwrap();
        assert_eq!(neighbors.len(), 3);
    }

    #[test]
    fn test_empty_index_returns_no_neighbors() {
        let index = VectorIndex::build(3, Vec::new()).unwrap();
        assert!(index.is_empty());
        let neighbors = index.query(&[0.0, 0.0, 0.0], 2).unwrap();
        assert!(neighbors.is_empty());
    }

    #[test]
    fn test_build_rejects_mismatched_dimension() {
        let result = VectorIndex::build(3, vec![vec![1.0, 2.0]]);
        assert!(matches!(
            result,
            Err(MiPracticeError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_query_rejects_mismatched_dimension() {
        let index = sample_index();
        let result = index.query(&[1.0, 2.0], 1);
        assert!(matches!(
            result,
            Err(MiPracticeError::DimensionMismatch { .. })
        ));
    }
}

use hashbrown::HashMap;

use crate::error::{RecommendError, Result};
use crate::similarity::matrix::SimilarityMatrix;

/// One similarity notion and the weight it carries in the composite score.
#[derive(Debug, Clone)]
pub struct WeightedSignal {
    pub name: String,
    pub weight: f64,
    pub matrix: SimilarityMatrix,
}

impl WeightedSignal {
    pub fn new(name: &str, weight: f64, matrix: SimilarityMatrix) -> Self {
        WeightedSignal {
            name: name.to_string(),
            weight,
            matrix,
        }
    }
}

/// Weighted sum of aligned similarity matrices. Only the rows that are asked
/// for are ever materialised.
#[derive(Debug)]
pub struct CompositeSimilarity {
    keys: Vec<String>,
    key_to_index: HashMap<String, usize>,
    signals: Vec<WeightedSignal>,
}

impl CompositeSimilarity {
    pub fn new(signals: Vec<WeightedSignal>) -> Result<Self> {
        let first = signals.first().ok_or_else(|| {
            RecommendError::InvalidArgument("at least one similarity signal is required".into())
        })?;
        let keys = first.matrix.keys().to_vec();

        for signal in signals.iter() {
            if !signal.weight.is_finite() || signal.weight < 0.0 {
                return Err(RecommendError::InvalidArgument(format!(
                    "weight of signal '{}' must be a non-negative number, got {}",
                    signal.name, signal.weight
                )));
            }
            if signal.matrix.dim() != keys.len() {
                return Err(RecommendError::ShapeMismatch(format!(
                    "signal '{}' is {}x{}, signal '{}' is {}x{}",
                    signal.name,
                    signal.matrix.dim(),
                    signal.matrix.dim(),
                    first.name,
                    keys.len(),
                    keys.len()
                )));
            }
            if signal.matrix.keys() != keys.as_slice() {
                return Err(RecommendError::ShapeMismatch(format!(
                    "signal '{}' orders its keys differently from signal '{}'",
                    signal.name, first.name
                )));
            }
        }

        let mut key_to_index = HashMap::with_capacity(keys.len());
        for (index, key) in keys.iter().enumerate() {
            if key_to_index.insert(key.clone(), index).is_some() {
                return Err(RecommendError::ShapeMismatch(format!(
                    "duplicate property key '{}'",
                    key
                )));
            }
        }

        Ok(CompositeSimilarity {
            keys,
            key_to_index,
            signals,
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn signals(&self) -> &[WeightedSignal] {
        &self.signals
    }

    pub fn index_of(&self, key: &str) -> Result<usize> {
        self.key_to_index
            .get(key)
            .copied()
            .ok_or_else(|| RecommendError::property_not_found(key))
    }

    /// Row `index` of `Σ weight * matrix`, summed in signal order.
    pub fn row(&self, index: usize) -> Vec<f64> {
        let mut composite = vec![0.0; self.len()];
        for signal in self.signals.iter() {
            for (cell, similarity) in composite.iter_mut().zip(signal.matrix.row(index)) {
                *cell += signal.weight * similarity;
            }
        }
        composite
    }
}

#[cfg(test)]
mod composite_test {
    use float_cmp::approx_eq;

    use super::*;

    fn matrix(names: &[&str], rows: Vec<Vec<f64>>) -> SimilarityMatrix {
        let keys = names.iter().map(|name| name.to_string()).collect();
        SimilarityMatrix::from_rows(keys, rows).unwrap()
    }

    #[test]
    fn should_combine_three_signals() {
        let names = ["A", "B", "C"];
        let location = matrix(&names, vec![vec![1.0, 0.5, 0.1], vec![0.5, 1.0, 0.2], vec![0.1, 0.2, 1.0]]);
        let amenities = matrix(&names, vec![vec![1.0, 0.2, 0.4], vec![0.2, 1.0, 0.3], vec![0.4, 0.3, 1.0]]);
        let pricing = matrix(&names, vec![vec![1.0, 0.9, 0.0], vec![0.9, 1.0, 0.6], vec![0.0, 0.6, 1.0]]);

        let composite = CompositeSimilarity::new(vec![
            WeightedSignal::new("location", 30.0, location),
            WeightedSignal::new("amenities", 20.0, amenities),
            WeightedSignal::new("pricing", 8.0, pricing),
        ])
        .unwrap();

        let row = composite.row(0);
        assert!(approx_eq!(f64, 58.0, row[0], epsilon = 1e-9));
        assert!(approx_eq!(f64, 15.0 + 4.0 + 7.2, row[1], epsilon = 1e-9));
        assert!(approx_eq!(f64, 3.0 + 8.0, row[2], epsilon = 1e-9));
    }

    #[test]
    fn should_reject_dimension_mismatch() {
        let small = matrix(&["A"], vec![vec![1.0]]);
        let large = matrix(&["A", "B"], vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let result = CompositeSimilarity::new(vec![
            WeightedSignal::new("small", 1.0, small),
            WeightedSignal::new("large", 1.0, large),
        ]);
        assert!(matches!(result, Err(RecommendError::ShapeMismatch(_))));
    }

    #[test]
    fn should_reject_reordered_keys() {
        let ab = matrix(&["A", "B"], vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let ba = matrix(&["B", "A"], vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let result = CompositeSimilarity::new(vec![
            WeightedSignal::new("ab", 1.0, ab),
            WeightedSignal::new("ba", 1.0, ba),
        ]);
        assert!(matches!(result, Err(RecommendError::ShapeMismatch(_))));
    }

    #[test]
    fn should_reject_negative_weight() {
        let single = matrix(&["A"], vec![vec![1.0]]);
        let result = CompositeSimilarity::new(vec![WeightedSignal::new("single", -1.0, single)]);
        assert!(matches!(result, Err(RecommendError::InvalidArgument(_))));
    }

    #[test]
    fn should_reject_duplicate_property_key() {
        let twice = matrix(&["A", "A"], vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let result = CompositeSimilarity::new(vec![WeightedSignal::new("twice", 1.0, twice)]);
        assert!(matches!(result, Err(RecommendError::ShapeMismatch(_))));
    }

    #[test]
    fn should_reject_empty_signal_list() {
        let result = CompositeSimilarity::new(vec![]);
        assert!(matches!(result, Err(RecommendError::InvalidArgument(_))));
    }

    #[test]
    fn should_report_unknown_key() {
        let single = matrix(&["A"], vec![vec![1.0]]);
        let composite =
            CompositeSimilarity::new(vec![WeightedSignal::new("single", 1.0, single)]).unwrap();
        assert_eq!(0, composite.index_of("A").unwrap());
        assert!(matches!(
            composite.index_of("Z"),
            Err(RecommendError::NotFound { kind: "property", .. })
        ));
    }
}

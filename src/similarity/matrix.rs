use crate::error::{RecommendError, Result};

/// A square pairwise-similarity matrix whose rows and columns are both
/// indexed by `keys`. Values are stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    keys: Vec<String>,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn new(keys: Vec<String>, values: Vec<f64>) -> Result<Self> {
        let dim = keys.len();
        if values.len() != dim * dim {
            return Err(RecommendError::ShapeMismatch(format!(
                "{} keys require {} values, got {}",
                dim,
                dim * dim,
                values.len()
            )));
        }
        if let Some(position) = values.iter().position(|value| !value.is_finite()) {
            return Err(RecommendError::InvalidArgument(format!(
                "non-finite similarity at row {} column {}",
                position / dim,
                position % dim
            )));
        }
        Ok(SimilarityMatrix { keys, values })
    }

    pub fn from_rows(keys: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.len() != keys.len() {
            return Err(RecommendError::ShapeMismatch(format!(
                "{} keys but {} rows",
                keys.len(),
                rows.len()
            )));
        }
        let mut values = Vec::with_capacity(keys.len() * keys.len());
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != keys.len() {
                return Err(RecommendError::ShapeMismatch(format!(
                    "row {} has {} columns, expected {}",
                    row_index,
                    row.len(),
                    keys.len()
                )));
            }
            values.extend(row);
        }
        SimilarityMatrix::new(keys, values)
    }

    pub fn dim(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn row(&self, index: usize) -> &[f64] {
        let dim = self.dim();
        &self.values[index * dim..(index + 1) * dim]
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.dim() + column]
    }
}

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde_derive::Serialize;

use crate::catalog::{Link, PropertyCatalog};
use crate::error::{RecommendError, Result};

pub mod composite;
pub mod matrix;

pub use composite::{CompositeSimilarity, WeightedSignal};
pub use matrix::SimilarityMatrix;

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct PropertyScore {
    pub index: usize,
    pub score: f64,
}

impl PropertyScore {
    fn new(index: usize, score: f64) -> Self {
        PropertyScore { index, score }
    }
}

impl PartialEq for PropertyScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PropertyScore {}

impl Ord for PropertyScore {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse order by score, then by position in the key index
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for PropertyScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub property: String,
    pub score: f64,
    pub link: Link,
}

/// Ranks every other property by composite similarity to `query_key` and
/// returns the best `top_n`, highest score first. Equal scores keep the order
/// of the key index.
pub fn recommend(
    composite: &CompositeSimilarity,
    catalog: &PropertyCatalog,
    query_key: &str,
    top_n: usize,
) -> Result<Vec<Recommendation>> {
    if top_n == 0 {
        return Err(RecommendError::InvalidArgument(
            "top_n must be a positive integer".into(),
        ));
    }
    let query_index = composite.index_of(query_key)?;
    let composite_row = composite.row(query_index);

    let how_many = top_n.min(composite.len().saturating_sub(1));
    let mut top_properties: BinaryHeap<PropertyScore> = BinaryHeap::with_capacity(how_many);
    for (index, score) in composite_row.into_iter().enumerate() {
        if index == query_index {
            continue;
        }
        let scored = PropertyScore::new(index, score);
        if top_properties.len() < how_many {
            top_properties.push(scored);
        } else if let Some(mut bottom) = top_properties.peek_mut() {
            // the heap top is the weakest candidate kept so far
            if scored < *bottom {
                *bottom = scored;
            }
        }
    }

    let keys = composite.keys();
    let recommendations = top_properties
        .into_sorted_vec()
        .into_iter()
        .map(|scored| {
            let property = keys[scored.index].clone();
            let link = catalog.link_for(&property);
            Recommendation {
                property,
                score: scored.score,
                link,
            }
        })
        .collect();

    Ok(recommendations)
}

use hashbrown::HashMap;
use itertools::Itertools;
use serde_derive::Serialize;

use crate::error::{RecommendError, Result};

pub const MIN_RADIUS_KM: u32 = 1;
pub const MAX_RADIUS_KM: u32 = 1000;
pub const DEFAULT_RADIUS_KM: u32 = 5;

/// Distances in metres from every property (rows) to every named location
/// (columns).
#[derive(Debug)]
pub struct DistanceMatrix {
    properties: Vec<String>,
    locations: Vec<String>,
    location_to_column: HashMap<String, usize>,
    metres: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyProperty {
    pub property: String,
    pub distance_m: f64,
    pub label: String,
}

impl NearbyProperty {
    fn new(property: &str, distance_m: f64) -> Self {
        // rounds half to even
        let kms = (distance_m / 1000.0).round_ties_even() as i64;
        NearbyProperty {
            property: property.to_string(),
            distance_m,
            label: format!("{} : {} kms", property, kms),
        }
    }
}

impl DistanceMatrix {
    pub fn from_rows(
        locations: Vec<String>,
        rows: Vec<(String, Vec<f64>)>,
    ) -> Result<Self> {
        let mut location_to_column = HashMap::with_capacity(locations.len());
        for (column, location) in locations.iter().enumerate() {
            if location_to_column.insert(location.clone(), column).is_some() {
                return Err(RecommendError::ShapeMismatch(format!(
                    "duplicate location '{}'",
                    location
                )));
            }
        }

        let mut properties = Vec::with_capacity(rows.len());
        let mut metres = Vec::with_capacity(rows.len() * locations.len());
        for (property, distances) in rows {
            if distances.len() != locations.len() {
                return Err(RecommendError::ShapeMismatch(format!(
                    "property '{}' has {} distances for {} locations",
                    property,
                    distances.len(),
                    locations.len()
                )));
            }
            if distances.iter().any(|distance| distance.is_nan()) {
                return Err(RecommendError::InvalidArgument(format!(
                    "property '{}' has an undefined distance",
                    property
                )));
            }
            properties.push(property);
            metres.extend(distances);
        }

        Ok(DistanceMatrix {
            properties,
            locations,
            location_to_column,
            metres,
        })
    }

    pub fn qty_properties(&self) -> usize {
        self.properties.len()
    }

    pub fn qty_locations(&self) -> usize {
        self.locations.len()
    }

    /// Location names in alphabetical order.
    pub fn locations(&self) -> Vec<&str> {
        self.locations.iter().map(String::as_str).sorted().collect()
    }

    /// Properties within `radius_km` of `location`, nearest first.
    pub fn nearby(&self, location: &str, radius_km: u32) -> Result<Vec<NearbyProperty>> {
        if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&radius_km) {
            return Err(RecommendError::InvalidArgument(format!(
                "radius must be between {} and {} km, got {}",
                MIN_RADIUS_KM, MAX_RADIUS_KM, radius_km
            )));
        }
        let column = *self
            .location_to_column
            .get(location)
            .ok_or_else(|| RecommendError::location_not_found(location))?;
        let max_metres = f64::from(radius_km) * 1000.0;
        let qty_locations = self.locations.len();

        let hits = self
            .properties
            .iter()
            .enumerate()
            .map(|(row, property)| (property, self.metres[row * qty_locations + column]))
            .filter(|(_, distance)| *distance <= max_metres)
            // stable, so equal distances keep row order
            .sorted_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(property, distance)| NearbyProperty::new(property, distance))
            .collect();

        Ok(hits)
    }
}

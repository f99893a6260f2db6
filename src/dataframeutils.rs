use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDateTime, Utc};
use log::info;

use crate::catalog::PropertyCatalog;
use crate::config::AppConfig;
use crate::error::Result;
use crate::io::{read_distance_matrix, read_property_table, read_similarity_matrix};
use crate::nearby::DistanceMatrix;
use crate::similarity::{CompositeSimilarity, WeightedSignal};

/// Read-only handles shared by every request for the lifetime of the process.
#[derive(Clone)]
pub struct SharedHandlesAndConfig {
    pub composite: Arc<CompositeSimilarity>,
    pub catalog: Arc<PropertyCatalog>,
    pub distances: Arc<DistanceMatrix>,
    pub artifact_stats: Arc<ArtifactStats>,
    pub default_top_n: usize,
    pub default_radius_km: u32,
    pub qty_workers: usize,
}

pub struct ArtifactStats {
    pub qty_properties: usize,
    pub qty_signals: usize,
    pub qty_locations: usize,
    pub qty_listed_properties: usize,
    pub qty_listed_with_link: usize,
    pub loaded_at: NaiveDateTime,
    pub load_duration_millis: u128,
}

pub fn determine_artifact_statistics(
    composite: &CompositeSimilarity,
    catalog: &PropertyCatalog,
    distances: &DistanceMatrix,
    started: Instant,
) -> ArtifactStats {
    let stats = ArtifactStats {
        qty_properties: composite.len(),
        qty_signals: composite.signals().len(),
        qty_locations: distances.qty_locations(),
        qty_listed_properties: catalog.len(),
        qty_listed_with_link: catalog.qty_with_link(),
        loaded_at: Utc::now().naive_utc(),
        load_duration_millis: started.elapsed().as_millis(),
    };

    info!("Loaded artifacts in {} ms", stats.load_duration_millis);
    info!("\tProperties: {}", stats.qty_properties);
    for signal in composite.signals() {
        info!("\tSignal {}: weight {}", signal.name, signal.weight);
    }
    info!("\tLocations: {}", stats.qty_locations);
    info!(
        "\tListed properties: {} ({} with link)",
        stats.qty_listed_properties, stats.qty_listed_with_link
    );
    stats
}

/// Loads every artifact named in the config and checks they line up.
pub fn load_shared_handles(config: &AppConfig) -> Result<SharedHandlesAndConfig> {
    let started = Instant::now();

    let mut signals = Vec::new();
    for source in config.signals() {
        info!("reading similarity matrix {} from {}", source.name, source.path);
        let matrix = read_similarity_matrix(source.path)?;
        signals.push(WeightedSignal::new(source.name, source.weight, matrix));
    }
    let composite = CompositeSimilarity::new(signals)?;

    info!("reading distance matrix {}", &config.data.distance_matrix_path);
    let distances = read_distance_matrix(&config.data.distance_matrix_path)?;

    info!("reading property table {}", &config.data.property_table_path);
    let catalog = read_property_table(&config.data.property_table_path)?;

    let artifact_stats = determine_artifact_statistics(&composite, &catalog, &distances, started);

    Ok(SharedHandlesAndConfig {
        composite: Arc::new(composite),
        catalog: Arc::new(catalog),
        distances: Arc::new(distances),
        artifact_stats: Arc::new(artifact_stats),
        default_top_n: config.model.default_top_n,
        default_radius_km: config.search.default_radius_km,
        qty_workers: config.server.num_workers,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::io::{parse_distance_matrix, parse_property_table, parse_similarity_matrix};

    /// Small in-memory artifact set used by the endpoint tests.
    pub fn shared_handles() -> SharedHandlesAndConfig {
        let started = Instant::now();
        let location = ",A,B,C,D\nA,1,0.7,0.5,0.1\nB,0.7,1,0.2,0.3\nC,0.5,0.2,1,0.4\nD,0.1,0.3,0.4,1\n";
        let amenities = ",A,B,C,D\nA,1,0,0,0\nB,0,1,0,0\nC,0,0,1,0\nD,0,0,0,1\n";
        let signals = vec![
            WeightedSignal::new(
                "similarity_1",
                100.0,
                parse_similarity_matrix(location.as_bytes(), "location").unwrap(),
            ),
            WeightedSignal::new(
                "similarity_2",
                20.0,
                parse_similarity_matrix(amenities.as_bytes(), "amenities").unwrap(),
            ),
        ];
        let composite = CompositeSimilarity::new(signals).unwrap();
        let distances = parse_distance_matrix(
            ",Sector 45,IFFCO Chowk\nA,4600,12000\nB,2500,3500\nC,9000,800\nD,2500,40000\n".as_bytes(),
            "distances",
        )
        .unwrap();
        let catalog = parse_property_table(
            "PropertyName,Link\nB,https://example.org/b\nC,\n".as_bytes(),
            "properties",
        )
        .unwrap();
        let artifact_stats = determine_artifact_statistics(&composite, &catalog, &distances, started);

        SharedHandlesAndConfig {
            composite: Arc::new(composite),
            catalog: Arc::new(catalog),
            distances: Arc::new(distances),
            artifact_stats: Arc::new(artifact_stats),
            default_top_n: 5,
            default_radius_km: 5,
            qty_workers: 1,
        }
    }

    #[test]
    fn should_collect_statistics() {
        let handles = shared_handles();
        assert_eq!(4, handles.artifact_stats.qty_properties);
        assert_eq!(2, handles.artifact_stats.qty_signals);
        assert_eq!(2, handles.artifact_stats.qty_locations);
        assert_eq!(2, handles.artifact_stats.qty_listed_properties);
        assert_eq!(1, handles.artifact_stats.qty_listed_with_link);
    }
}

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_derive::Deserialize;

use crate::catalog::PropertyCatalog;
use crate::error::{RecommendError, Result};
use crate::nearby::DistanceMatrix;
use crate::similarity::SimilarityMatrix;

/// A matrix CSV whose header row names the columns and whose first column
/// names the rows: `,c1,c2\nr1,v11,v12\n...`.
struct LabelledMatrix {
    columns: Vec<String>,
    rows: Vec<(String, Vec<f64>)>,
}

#[derive(Debug, Deserialize)]
struct PropertyRecord {
    #[serde(rename = "PropertyName", alias = "Property Name")]
    name: String,
    #[serde(rename = "Link", default)]
    link: Option<String>,
}

fn open(path: &str) -> Result<File> {
    File::open(Path::new(path)).map_err(|source| RecommendError::Io {
        path: path.to_string(),
        source,
    })
}

fn read_labelled_matrix<R: Read>(reader: R, source_name: &str) -> Result<LabelledMatrix> {
    // ragged rows are reported as a shape problem below rather than a csv error
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = csv_reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(|source| RecommendError::Csv {
            path: source_name.to_string(),
            source,
        })?,
        None => {
            return Err(RecommendError::Parse {
                path: source_name.to_string(),
                message: "empty matrix file".into(),
            })
        }
    };
    let columns: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

    let mut rows = Vec::with_capacity(columns.len());
    for (line, record) in records.enumerate() {
        let record = record.map_err(|source| RecommendError::Csv {
            path: source_name.to_string(),
            source,
        })?;
        let label = record.get(0).unwrap_or_default().to_string();
        if record.len() != header.len() {
            return Err(RecommendError::ShapeMismatch(format!(
                "{}: row {} ('{}') has {} fields, header has {}",
                source_name,
                line + 1,
                label,
                record.len(),
                header.len()
            )));
        }
        let values = record
            .iter()
            .skip(1)
            .map(|cell| match cell.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(RecommendError::Parse {
                    path: source_name.to_string(),
                    message: format!(
                        "row {} ('{}'): '{}' is not a finite number",
                        line + 1,
                        label,
                        cell
                    ),
                }),
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push((label, values));
    }

    Ok(LabelledMatrix { columns, rows })
}

pub fn parse_similarity_matrix<R: Read>(reader: R, source_name: &str) -> Result<SimilarityMatrix> {
    let LabelledMatrix { columns, rows } = read_labelled_matrix(reader, source_name)?;
    if rows.len() != columns.len() {
        return Err(RecommendError::ShapeMismatch(format!(
            "{}: {} columns but {} rows",
            source_name,
            columns.len(),
            rows.len()
        )));
    }
    let mut ordered_rows = Vec::with_capacity(rows.len());
    for ((row_key, row), column_key) in rows.into_iter().zip(columns.iter()) {
        if &row_key != column_key {
            return Err(RecommendError::ShapeMismatch(format!(
                "{}: row '{}' does not match column '{}'",
                source_name, row_key, column_key
            )));
        }
        ordered_rows.push(row);
    }
    SimilarityMatrix::from_rows(columns, ordered_rows)
}

pub fn read_similarity_matrix(path: &str) -> Result<SimilarityMatrix> {
    parse_similarity_matrix(open(path)?, path)
}

pub fn parse_distance_matrix<R: Read>(reader: R, source_name: &str) -> Result<DistanceMatrix> {
    let LabelledMatrix { columns, rows } = read_labelled_matrix(reader, source_name)?;
    DistanceMatrix::from_rows(columns, rows)
}

pub fn read_distance_matrix(path: &str) -> Result<DistanceMatrix> {
    parse_distance_matrix(open(path)?, path)
}

pub fn parse_property_table<R: Read>(reader: R, source_name: &str) -> Result<PropertyCatalog> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let records = csv_reader
        .deserialize::<PropertyRecord>()
        .map(|record| {
            record
                .map(|record| (record.name, record.link))
                .map_err(|source| RecommendError::Csv {
                    path: source_name.to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(PropertyCatalog::from_records(records))
}

pub fn read_property_table(path: &str) -> Result<PropertyCatalog> {
    parse_property_table(open(path)?, path)
}

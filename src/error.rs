use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommendError>;

/// Everything that can go wrong while loading artifacts or answering a query.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// A property or location key that is absent from the loaded index.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// Matrices, key index or table disagree in size or ordering.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: {message}")]
    Parse { path: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl RecommendError {
    pub fn property_not_found(key: &str) -> Self {
        RecommendError::NotFound {
            kind: "property",
            key: key.to_string(),
        }
    }

    pub fn location_not_found(key: &str) -> Self {
        RecommendError::NotFound {
            kind: "location",
            key: key.to_string(),
        }
    }
}

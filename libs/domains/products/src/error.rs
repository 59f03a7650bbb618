use thiserror::Error;

/// Failures surfaced by every layer of the catalog pipeline.
///
/// The provider produces `DataLoading` and `Decoding`; the data source adds
/// `NotFound`. Upper layers pass them through untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("Failed to load catalog data: {0}")]
    DataLoading(String),

    #[error("Failed to decode catalog data: {0}")]
    Decoding(String),

    #[error("Product not found: {0}")]
    NotFound(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Stable short name, used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match self {
            ProductError::DataLoading(_) => "data_loading",
            ProductError::Decoding(_) => "decoding",
            ProductError::NotFound(_) => "not_found",
        }
    }
}

impl From<serde_json::Error> for ProductError {
    fn from(err: serde_json::Error) -> Self {
        ProductError::Decoding(err.to_string())
    }
}

impl From<std::io::Error> for ProductError {
    fn from(err: std::io::Error) -> Self {
        ProductError::DataLoading(err.to_string())
    }
}

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Chart {0} was not found.")]
    ChartNotFound(Uuid),

    #[error("Data point {0} was not found.")]
    DataPointNotFound(Uuid),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
}

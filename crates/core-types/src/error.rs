use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

impl CoreError {
    /// Shorthand for building an `InvalidInput` error for a named field.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidInput(field.to_string(), message.into())
    }

    /// The name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            CoreError::InvalidInput(field, _) => field,
        }
    }
}

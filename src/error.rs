//! Error types for counter loading and model evaluation

use thiserror::Error;

/// Errors raised while loading counter tables or evaluating the model
#[derive(Error, Debug)]
pub enum ModelError {
    /// Input could not be parsed as a rectangular counter table, or a
    /// counter value is negative/non-finite
    #[error("Malformed input{}: column '{column}': {message}", row_suffix(.row))]
    MalformedInput {
        /// 1-based row in the source table, when known
        row: Option<usize>,
        column: String,
        message: String,
    },

    #[error("Empty input: no ranks to evaluate")]
    EmptyInput,

    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(row) => format!(" at row {}", row),
        None => String::new(),
    }
}

impl ModelError {
    pub(crate) fn malformed(
        row: Option<usize>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ModelError::MalformedInput {
            row,
            column: column.into(),
            message: message.into(),
        }
    }
}

/// Result type for loading and evaluation
pub type Result<T> = std::result::Result<T, ModelError>;

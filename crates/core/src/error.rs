use serde::Serialize;

/// A single rejected search field (or pair of fields) with a readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub fields: Vec<&'static str>,
    pub message: String,
}

impl FieldError {
    pub fn new(fields: &[&'static str], message: impl Into<String>) -> Self {
        Self {
            fields: fields.to_vec(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Search criteria rejected before any query runs.
    #[error("Invalid search criteria: {}", join_messages(.0))]
    InvalidCriteria(Vec<FieldError>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

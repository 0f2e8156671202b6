//! Error types

use serde::Serialize;
use thiserror::Error;

/// Failure to turn the `number` query parameter into a classifiable value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Missing, empty, non-integer, or outside the `i64` range
    #[error("invalid number input: '{raw}'")]
    InvalidNumberInput { raw: String },
}

impl ClassifyError {
    /// Client-facing 400 payload
    pub fn to_body(&self) -> ErrorBody<'_> {
        match self {
            Self::InvalidNumberInput { raw } => ErrorBody {
                number: raw,
                error: true,
            },
        }
    }
}

/// `{"number": "<raw input>", "error": true}`
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub number: &'a str,
    pub error: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let err = ClassifyError::InvalidNumberInput {
            raw: "abc".to_string(),
        };
        let json = serde_json::to_string(&err.to_body()).unwrap();
        assert_eq!(json, r#"{"number":"abc","error":true}"#);
    }

    #[test]
    fn test_error_display() {
        let err = ClassifyError::InvalidNumberInput { raw: String::new() };
        assert_eq!(err.to_string(), "invalid number input: ''");
    }
}

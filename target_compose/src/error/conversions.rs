//! Trait-based conversions between external error types and `ComposeError`.

use figment::Error as FigmentError;

use super::ComposeError;

impl From<serde_json::Error> for ComposeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(Box::new(e))
    }
}

impl From<FigmentError> for ComposeError {
    fn from(e: FigmentError) -> Self {
        Self::Options(Box::new(e))
    }
}

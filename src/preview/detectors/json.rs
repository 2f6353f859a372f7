//! JSON detection: valid JSON documents only.

use crate::preview::traits::ContentDetector;
use crate::preview::types::{ContentTypeResult, InferredContentType};

/// Detects content that parses as a JSON object or array.
pub struct JsonDetector;

impl ContentDetector for JsonDetector {
    fn content_type(&self) -> InferredContentType {
        InferredContentType::Json
    }

    fn display_name(&self) -> &str {
        "JSON"
    }

    fn detect(&self, content: &str) -> ContentTypeResult {
        let trimmed = content.trim();
        if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
            return ContentTypeResult::none(InferredContentType::Json);
        }
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(_) => ContentTypeResult::new(InferredContentType::Json, 1.0),
            Err(_) => ContentTypeResult::none(InferredContentType::Json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_and_array() {
        assert_eq!(JsonDetector.detect(r#" {"a": [1, 2]} "#).confidence, 1.0);
        assert_eq!(JsonDetector.detect("[true, null]").confidence, 1.0);
    }

    #[test]
    fn test_scalars_are_rejected() {
        assert_eq!(JsonDetector.detect("42").confidence, 0.0);
        assert_eq!(JsonDetector.detect(r#""str""#).confidence, 0.0);
    }

    #[test]
    fn test_invalid() {
        assert_eq!(JsonDetector.detect("{a: 1}").confidence, 0.0);
        assert_eq!(JsonDetector.detect("[1, 2,]").confidence, 0.0);
    }
}

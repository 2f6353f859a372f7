//! Built-in content type detectors.
//!
//! Evaluation order is fixed: HTML, Markdown, JSON, CSS, JavaScript, React.
//! On equal confidence the earlier detector wins.

pub mod css;
pub mod html;
pub mod javascript;
pub mod json;
pub mod markdown;
pub mod react;

use super::traits::ContentDetector;

pub use css::create_css_detector;
pub use html::HtmlDetector;
pub use javascript::create_javascript_detector;
pub use json::JsonDetector;
pub use markdown::create_markdown_detector;
pub use react::create_react_detector;

/// All built-in detectors in evaluation order.
pub fn default_detectors() -> Vec<Box<dyn ContentDetector>> {
    vec![
        Box::new(HtmlDetector),
        Box::new(create_markdown_detector()),
        Box::new(JsonDetector),
        Box::new(create_css_detector()),
        Box::new(create_javascript_detector()),
        Box::new(create_react_detector()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::types::InferredContentType;

    #[test]
    fn test_detector_order() {
        let order: Vec<InferredContentType> = default_detectors()
            .iter()
            .map(|d| d.content_type())
            .collect();
        assert_eq!(order, &InferredContentType::ALL[..6]);
    }
}

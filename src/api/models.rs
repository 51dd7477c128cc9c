//! Wire types for the extraction backend
//!
//! Shapes mirror the server's JSON exactly. Every array is defaulted so a
//! response with missing fields deserializes to empty lists rather than
//! failing the whole action.

use serde::{Deserialize, Serialize};

/// Structured content extracted from a fetched web page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The URL that was fetched
    #[serde(default)]
    pub url: String,
    /// Page `<title>` content
    #[serde(default)]
    pub title: String,
    /// Main text of the page, whitespace-collapsed
    #[serde(default)]
    pub text: String,
    /// h1-h3 heading texts, in document order
    #[serde(default)]
    pub headings: Vec<String>,
    /// Deduplicated link targets
    #[serde(default)]
    pub links: Vec<String>,
    /// Price-looking strings found in the text
    #[serde(default)]
    pub prices: Vec<String>,
}

impl ExtractionResult {
    /// The `{url, title}` projection shown in the metadata region
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            url: self.url.clone(),
            title: self.title.clone(),
        }
    }
}

/// Minimal page identity, rendered as pretty-printed JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    pub url: String,
    pub title: String,
}

/// Response of the combined autopilot operation
///
/// Both fields are optional; each is rendered independently when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutopilotResponse {
    /// Extraction result, when the fetch half succeeded
    pub meta: Option<ExtractionResult>,
    /// Summary lines, when the summarize half succeeded
    pub summary: Option<Vec<String>>,
}

/// Response of the summarize operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Ordered summary lines; absent means "no summary", rendered empty
    pub summary: Option<Vec<String>>,
}

/// Request body for the autopilot operation
#[derive(Debug, Clone, Serialize)]
pub struct AutopilotRequest {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_missing_arrays_default_to_empty() {
        let parsed: ExtractionResult =
            serde_json::from_str(r#"{"url":"https://a","title":"T","text":"hi"}"#).unwrap();
        assert_eq!(parsed.url, "https://a");
        assert!(parsed.headings.is_empty());
        assert!(parsed.links.is_empty());
        assert!(parsed.prices.is_empty());
    }

    #[test]
    fn autopilot_fields_are_independent() {
        let only_summary: AutopilotResponse =
            serde_json::from_str(r#"{"summary":["a","b"]}"#).unwrap();
        assert!(only_summary.meta.is_none());
        assert_eq!(only_summary.summary.unwrap(), vec!["a", "b"]);

        let only_meta: AutopilotResponse =
            serde_json::from_str(r#"{"meta":{"url":"u","title":"t","text":""}}"#).unwrap();
        assert!(only_meta.summary.is_none());
        assert_eq!(only_meta.meta.unwrap().url, "u");
    }

    #[test]
    fn summary_response_may_omit_field() {
        let parsed: SummaryResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.summary.is_none());
    }

    #[test]
    fn meta_projection_keeps_only_url_and_title() {
        let result = ExtractionResult {
            url: "https://a".into(),
            title: "T".into(),
            text: "hi".into(),
            headings: vec!["H1".into()],
            ..Default::default()
        };
        let json = serde_json::to_value(result.meta()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "https://a", "title": "T"})
        );
    }
}

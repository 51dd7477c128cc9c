//! View state for the content regions
//!
//! [`Panels`] is the projection target for backend responses. It owns the
//! six display regions and the two render rules (extraction, summary), and
//! has no terminal dependency, so the projection logic is testable on its
//! own. The app injects it into the renderer each frame.

use crate::api::models::ExtractionResult;

/// A list region: replaced wholesale on every render
#[derive(Debug, Default, Clone)]
pub struct ListPanel {
    items: Vec<String>,
}

impl ListPanel {
    /// Replace all items, verbatim, in order
    pub fn replace<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = entries.into_iter().map(Into::into).collect();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The six content regions of the extraction view
#[derive(Debug, Clone)]
pub struct Panels {
    /// Pretty-printed `{url, title}` JSON
    pub meta: String,
    /// Extracted page text; user-editable, overwritten on each extraction
    pub text: String,
    pub headings: ListPanel,
    pub links: ListPanel,
    pub prices: ListPanel,
    pub summary: ListPanel,
    /// Total links in the last extraction, before truncation
    pub links_total: usize,
    /// Display cap for the links region
    link_cap: usize,
}

impl Panels {
    pub fn new(link_cap: usize) -> Self {
        Self {
            meta: String::new(),
            text: String::new(),
            headings: ListPanel::default(),
            links: ListPanel::default(),
            prices: ListPanel::default(),
            summary: ListPanel::default(),
            links_total: 0,
            link_cap,
        }
    }

    /// Apply an extraction result to the five extraction regions.
    ///
    /// The summary region is untouched; it belongs to the summary
    /// projection. Overwrites any user edits in the text region.
    pub fn apply_extraction(&mut self, result: &ExtractionResult) {
        self.meta = serde_json::to_string_pretty(&result.meta()).unwrap_or_default();
        self.text = result.text.clone();
        self.headings.replace(result.headings.iter().cloned());
        self.links_total = result.links.len();
        self.links
            .replace(result.links.iter().take(self.link_cap).cloned());
        self.prices.replace(result.prices.iter().cloned());
    }

    /// Apply summary lines, replacing any prior content
    pub fn apply_summary(&mut self, lines: &[String]) {
        self.summary.replace(lines.iter().cloned());
    }

    /// Whether the links region is truncated
    pub fn links_truncated(&self) -> bool {
        self.links_total > self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_extraction() -> ExtractionResult {
        ExtractionResult {
            url: "https://a".into(),
            title: "T".into(),
            text: "hi".into(),
            headings: vec!["H1".into()],
            links: vec!["l1".into(), "l2".into()],
            prices: vec!["$1".into()],
        }
    }

    #[test]
    fn extraction_projects_into_all_five_regions() {
        let mut panels = Panels::new(50);
        panels.apply_extraction(&sample_extraction());

        assert_eq!(panels.meta, "{\n  \"url\": \"https://a\",\n  \"title\": \"T\"\n}");
        assert_eq!(panels.text, "hi");
        assert_eq!(panels.headings.items(), ["H1"]);
        assert_eq!(panels.links.items(), ["l1", "l2"]);
        assert_eq!(panels.prices.items(), ["$1"]);
    }

    #[test]
    fn links_are_capped_at_the_display_limit() {
        let mut result = sample_extraction();
        result.links = (0..60).map(|i| format!("link{i}")).collect();

        let mut panels = Panels::new(50);
        panels.apply_extraction(&result);

        assert_eq!(panels.links.len(), 50);
        assert_eq!(panels.links.items()[0], "link0");
        assert_eq!(panels.links.items()[49], "link49");
        assert_eq!(panels.links_total, 60);
        assert!(panels.links_truncated());
    }

    #[test]
    fn missing_arrays_render_as_empty_lists() {
        let mut panels = Panels::new(50);
        panels.apply_extraction(&sample_extraction());
        panels.apply_extraction(&ExtractionResult {
            url: "https://b".into(),
            title: "U".into(),
            ..Default::default()
        });

        assert!(panels.headings.is_empty());
        assert!(panels.links.is_empty());
        assert!(panels.prices.is_empty());
        assert!(!panels.links_truncated());
    }

    #[test]
    fn extraction_overwrites_user_edits_in_text() {
        let mut panels = Panels::new(50);
        panels.text = "user edited this".into();
        panels.apply_extraction(&sample_extraction());
        assert_eq!(panels.text, "hi");
    }

    #[test]
    fn extraction_leaves_summary_untouched() {
        let mut panels = Panels::new(50);
        panels.apply_summary(&["old".into()]);
        panels.apply_extraction(&sample_extraction());
        assert_eq!(panels.summary.items(), ["old"]);
    }

    #[test]
    fn summary_replaces_prior_items_in_order() {
        let mut panels = Panels::new(50);
        panels.apply_summary(&["stale1".into(), "stale2".into(), "stale3".into()]);
        panels.apply_summary(&["a".into(), "b".into()]);
        assert_eq!(panels.summary.items(), ["a", "b"]);
    }

    #[test]
    fn empty_summary_clears_the_region() {
        let mut panels = Panels::new(50);
        panels.apply_summary(&["old".into()]);
        panels.apply_summary(&[]);
        assert!(panels.summary.is_empty());
    }
}

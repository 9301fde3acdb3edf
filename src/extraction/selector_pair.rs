//! Label/value selector pairs and their pairing strategy.
//!
//! Detail pages carry labels and values as parallel flat element lists
//! rather than nested label/value containers, so matches are combined
//! positionally: label N goes with value N. The zip lives behind
//! `Pairing` so a structural strategy could be added without touching
//! the extraction pipeline.

use scraper::{Html, Selector};

use super::element_text;

/// How matched label and value elements are combined into pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    /// Zip by index; the shorter list truncates the longer one.
    Positional,
}

/// One (value-selector, label-selector) extraction rule.
#[derive(Debug, Clone)]
pub struct SelectorPair {
    /// CSS selector matching value elements.
    pub value_selector: &'static str,
    /// CSS selector matching label elements.
    pub label_selector: &'static str,
    pub pairing: Pairing,
}

impl SelectorPair {
    pub const fn positional(value_selector: &'static str, label_selector: &'static str) -> Self {
        Self {
            value_selector,
            label_selector,
            pairing: Pairing::Positional,
        }
    }

    /// Collect (label, value) pairs from the document.
    ///
    /// Label and value lists are paired before empty labels are dropped,
    /// so indices stay aligned with the raw element lists. An unparsable
    /// selector yields no pairs.
    pub fn extract(&self, doc: &Html) -> Vec<(String, String)> {
        let Ok(value_sel) = Selector::parse(self.value_selector) else {
            return Vec::new();
        };
        let Ok(label_sel) = Selector::parse(self.label_selector) else {
            return Vec::new();
        };

        let values: Vec<String> = doc.select(&value_sel).map(element_text).collect();
        let labels: Vec<String> = doc.select(&label_sel).map(element_text).collect();

        match self.pairing {
            Pairing::Positional => labels
                .into_iter()
                .zip(values)
                .filter(|(label, _)| !label.is_empty())
                .collect(),
        }
    }
}

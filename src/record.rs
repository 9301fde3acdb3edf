//! The extracted representation of one convertible bond.

use chrono::Local;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Format of the `fetched_at` stamp (local wall clock).
pub const FETCHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One bond's extracted fields.
///
/// The six optional fields stay `None` when no selector strategy matched;
/// the "unknown" placeholder is applied only while flattening for export,
/// so the not-found signal survives for callers and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    /// Bond code, e.g. `113046`. Supplied by the caller, never the page.
    pub code: String,
    pub name: Option<String>,
    pub stock_name: Option<String>,
    pub industry: Option<String>,
    pub price: Option<String>,
    pub yield_to_maturity: Option<String>,
    pub premium_rate: Option<String>,
    /// Concept tags in page order.
    pub tags: Vec<String>,
    /// Local wall-clock time the page was processed.
    pub fetched_at: String,
    /// Label → value pairs from the generic selector passes. Insertion
    /// order is preserved; re-inserting a label keeps its position and
    /// replaces the value (last write wins).
    pub fields: IndexMap<String, String>,
}

impl BondRecord {
    /// Empty record stamped with the current local time.
    pub fn new(code: &str) -> Self {
        Self::with_timestamp(code, Local::now().format(FETCHED_AT_FORMAT).to_string())
    }

    /// Empty record with an explicit timestamp.
    pub fn with_timestamp(code: &str, fetched_at: String) -> Self {
        Self {
            code: code.to_string(),
            name: None,
            stock_name: None,
            industry: None,
            price: None,
            yield_to_maturity: None,
            premium_rate: None,
            tags: Vec::new(),
            fetched_at,
            fields: IndexMap::new(),
        }
    }

    /// True when every extraction strategy came back empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.stock_name.is_none()
            && self.industry.is_none()
            && self.price.is_none()
            && self.yield_to_maturity.is_none()
            && self.premium_rate.is_none()
            && self.tags.is_empty()
            && self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty() {
        let record = BondRecord::new("113046");
        assert_eq!(record.code, "113046");
        assert!(record.is_empty());
        assert!(!record.fetched_at.is_empty());
    }

    #[test]
    fn test_fields_keep_first_seen_order_and_last_value() {
        let mut record = BondRecord::with_timestamp("113046", "2024-01-01 00:00:00".into());
        record.fields.insert("转股价".into(), "10.00".into());
        record.fields.insert("到期时间".into(), "2027-03-01".into());
        record.fields.insert("转股价".into(), "9.50".into());

        let keys: Vec<&String> = record.fields.keys().collect();
        assert_eq!(keys, ["转股价", "到期时间"]);
        assert_eq!(record.fields["转股价"], "9.50");
    }

    #[test]
    fn test_json_round_trip() {
        let mut record = BondRecord::with_timestamp("113046", "2024-01-01 00:00:00".into());
        record.name = Some("旭升转债".into());
        record.price = Some("105.3".into());
        record.tags = vec!["汽车零部件".into(), "新能源".into()];
        record.fields.insert("转股价".into(), "10.00".into());
        record.fields.insert("回售价".into(), "100.00".into());

        let json = serde_json::to_string_pretty(&record).unwrap();
        let back: BondRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}

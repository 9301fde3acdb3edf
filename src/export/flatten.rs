//! Flattening records into uniform string rows.

use indexmap::IndexMap;

use crate::record::BondRecord;

/// Placeholder for fields no strategy managed to extract.
pub const UNKNOWN: &str = "unknown";

/// Fixed leading columns of every tabular export, in order.
pub const FIXED_COLUMNS: &[&str] = &[
    "code",
    "name",
    "stock_name",
    "industry",
    "price",
    "yield_to_maturity",
    "premium_rate",
    "tags",
    "fetched_at",
];

/// A record reduced to ordered label → string-value pairs.
pub type FlatRow = IndexMap<String, String>;

/// Flatten one record: fixed columns first, dynamic fields after, every
/// value a plain string — "unknown" for absent optionals, comma-joined
/// tags.
pub fn flatten(record: &BondRecord) -> FlatRow {
    let mut row = FlatRow::new();
    row.insert("code".to_string(), record.code.clone());
    row.insert("name".to_string(), or_unknown(&record.name));
    row.insert("stock_name".to_string(), or_unknown(&record.stock_name));
    row.insert("industry".to_string(), or_unknown(&record.industry));
    row.insert("price".to_string(), or_unknown(&record.price));
    row.insert(
        "yield_to_maturity".to_string(),
        or_unknown(&record.yield_to_maturity),
    );
    row.insert("premium_rate".to_string(), or_unknown(&record.premium_rate));
    row.insert("tags".to_string(), record.tags.join(","));
    row.insert("fetched_at".to_string(), record.fetched_at.clone());

    for (label, value) in &record.fields {
        row.insert(label.clone(), value.clone());
    }
    row
}

fn or_unknown(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| UNKNOWN.to_string())
}

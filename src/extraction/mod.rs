//! Heuristic field extraction from detail-page markup.
//!
//! The site's markup differs between bond pages and has shifted over
//! time, so every value is taken by trying a short list of selector
//! shapes in a fixed order. A step that matches nothing leaves its field
//! unset and the pipeline moves on; later steps may overwrite earlier
//! values for the same label.

pub mod selector_pair;

pub use selector_pair::{Pairing, SelectorPair};

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{CrawlError, Result};
use crate::record::BondRecord;

/// `<title>` text reads "NAME - CODE - SITE"; the name is the first segment.
const TITLE_DELIMITER: &str = " - ";
/// Row label marking the bond name in the table fallback.
const NAME_ROW_LABEL: &str = "转债名称";

/// Containers for the single-value lookups.
const STOCK_NAME_BOX: &str = "div.stock-name";
const INDUSTRY_BOX: &str = "div.bond-industry";
/// Shenwan classification link, preferred over the CSRC one.
const INDUSTRY_LINK_PRIMARY: &str = "a#sw_industry";
const INDUSTRY_LINK_FALLBACK: &str = "a#zjh_industry";
const PRICE_CELL_SPAN: &str = "td.bond-price span.strong";
const CONCEPT_BOX: &str = "div.concept-box";
const CONCEPT_ITEM_LINK: &str = "a.item";
const SUMMARY_TABLE: &str = "table.cb-summary";
const SUMMARY_VALUE_SPAN: &str = "span.strong";

/// Generic label/value passes, applied in order (later passes win on
/// label collisions).
const GENERIC_PAIRS: &[SelectorPair] = &[
    SelectorPair::positional("div.item-value", "div.item-label"),
    SelectorPair::positional("span.item-value", "span.item-label"),
];

/// Detail label/value passes, merged after the generic ones.
const DETAIL_PAIRS: &[SelectorPair] = &[
    SelectorPair::positional("div.cb-value", "div.cb-label"),
    SelectorPair::positional("td.cb-value", "td.cb-label"),
];

/// Cell-text markers for the refinement pass over the summary table.
const PRICE_MARKER: &str = "现价";
const YTM_MARKER: &str = "税前收益率";
const PREMIUM_MARKER: &str = "溢价率";

/// Run the full selector pipeline over one page.
///
/// Individual steps are never fatal; the call only fails when the page
/// yields no name, no stock, no generic fields, and no tags at all.
pub fn extract_bond(html: &str, code: &str) -> Result<BondRecord> {
    let doc = Html::parse_document(html);
    let mut record = BondRecord::new(code);

    record.name = bond_name(&doc);
    record.stock_name = stock_name(&doc);
    record.industry = industry(&doc);
    record.price = price_from_cell(&doc);

    for pair in GENERIC_PAIRS {
        for (label, value) in pair.extract(&doc) {
            record.fields.insert(label, value);
        }
    }
    for pair in DETAIL_PAIRS {
        for (label, value) in pair.extract(&doc) {
            record.fields.insert(label, value);
        }
    }
    scan_tables(&doc, &mut record);
    record.tags = concept_tags(&doc);
    refine_from_summary(&doc, &mut record);

    if record.is_empty() {
        return Err(CrawlError::Extract {
            code: code.to_string(),
            reason: "page contains no recognizable bond data".to_string(),
        });
    }

    debug!(
        code,
        fields = record.fields.len(),
        tags = record.tags.len(),
        "extracted bond record"
    );
    Ok(record)
}

/// Text of an element with inner whitespace runs collapsed to single
/// spaces and the ends trimmed.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn select_first_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Bond name: first `<title>` segment, falling back to a labeled table
/// row.
fn bond_name(doc: &Html) -> Option<String> {
    if let Ok(sel) = Selector::parse("title") {
        if let Some(title) = doc.select(&sel).next() {
            let text = element_text(title);
            if text.contains(TITLE_DELIMITER) {
                if let Some(first) = text.split(TITLE_DELIMITER).next() {
                    let first = first.trim();
                    if !first.is_empty() {
                        return Some(first.to_string());
                    }
                }
            }
        }
    }

    // Markup variants without a usable title carry the name in a plain
    // labeled row instead.
    let Ok(row_sel) = Selector::parse("tr") else {
        return None;
    };
    let Ok(cell_sel) = Selector::parse("td, th") else {
        return None;
    };
    for row in doc.select(&row_sel) {
        let cells: Vec<String> = row.select(&cell_sel).map(element_text).collect();
        if cells.len() >= 2 && cells[0] == NAME_ROW_LABEL && !cells[1].is_empty() {
            return Some(cells[1].clone());
        }
    }
    None
}

/// First link inside the stock container.
fn stock_name(doc: &Html) -> Option<String> {
    let box_sel = Selector::parse(STOCK_NAME_BOX).ok()?;
    let link_sel = Selector::parse("a").ok()?;
    let container = doc.select(&box_sel).next()?;
    container
        .select(&link_sel)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Industry link, Shenwan id first, CSRC id as fallback.
fn industry(doc: &Html) -> Option<String> {
    let box_sel = Selector::parse(INDUSTRY_BOX).ok()?;
    let container = doc.select(&box_sel).next()?;
    for link in [INDUSTRY_LINK_PRIMARY, INDUSTRY_LINK_FALLBACK] {
        if let Ok(sel) = Selector::parse(link) {
            if let Some(el) = container.select(&sel).next() {
                let text = element_text(el);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

/// Styled span in the quote-strip price cell.
fn price_from_cell(doc: &Html) -> Option<String> {
    select_first_text(doc, PRICE_CELL_SPAN)
}

/// Every table on the page, every row with at least two cells. Keys carry
/// the table's 1-based ordinal so they cannot collide with selector-pair
/// labels.
fn scan_tables(doc: &Html, record: &mut BondRecord) {
    let Ok(table_sel) = Selector::parse("table") else {
        return;
    };
    let Ok(row_sel) = Selector::parse("tr") else {
        return;
    };
    let Ok(cell_sel) = Selector::parse("td, th") else {
        return;
    };

    for (ordinal, table) in doc.select(&table_sel).enumerate() {
        for row in table.select(&row_sel) {
            let cells: Vec<String> = row.select(&cell_sel).map(element_text).collect();
            if cells.len() >= 2 && !cells[0].is_empty() {
                let key = format!("table{}_{}", ordinal + 1, cells[0]);
                record.fields.insert(key, cells[1].clone());
            }
        }
    }
}

/// Item links under the concept container, in page order.
fn concept_tags(doc: &Html) -> Vec<String> {
    let Ok(box_sel) = Selector::parse(CONCEPT_BOX) else {
        return Vec::new();
    };
    let Ok(item_sel) = Selector::parse(CONCEPT_ITEM_LINK) else {
        return Vec::new();
    };
    let Some(container) = doc.select(&box_sel).next() else {
        return Vec::new();
    };
    container
        .select(&item_sel)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Refine price, yield, and premium from the summary table.
///
/// Cells are matched by substring. Price reads the styled span inside the
/// matched cell; yield and premium strip the matched label from the cell
/// text. Later matches overwrite earlier ones, like every other pass.
fn refine_from_summary(doc: &Html, record: &mut BondRecord) {
    let Ok(table_sel) = Selector::parse(SUMMARY_TABLE) else {
        return;
    };
    let Ok(cell_sel) = Selector::parse("td, th") else {
        return;
    };
    let Ok(span_sel) = Selector::parse(SUMMARY_VALUE_SPAN) else {
        return;
    };

    for table in doc.select(&table_sel) {
        for cell in table.select(&cell_sel) {
            let text = element_text(cell);
            if text.contains(PRICE_MARKER) {
                if let Some(span) = cell.select(&span_sel).next() {
                    let value = element_text(span);
                    if !value.is_empty() {
                        record.price = Some(value);
                    }
                }
            } else if text.contains(YTM_MARKER) {
                if let Some(value) = strip_marker(&text, YTM_MARKER) {
                    record.yield_to_maturity = Some(value);
                }
            } else if text.contains(PREMIUM_MARKER) {
                if let Some(value) = strip_marker(&text, PREMIUM_MARKER) {
                    record.premium_rate = Some(value);
                }
            }
        }
    }
}

/// Drop the matched label plus separating colons and whitespace, keeping
/// whatever remains as the value.
fn strip_marker(text: &str, marker: &str) -> Option<String> {
    let stripped = text.replace(marker, "");
    let value = stripped
        .trim()
        .trim_start_matches([':', '：'])
        .trim()
        .to_string();
    (!value.is_empty()).then_some(value)
}

//! Per-bond and aggregate file output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Local;
use indexmap::IndexSet;
use tracing::info;

use crate::error::Result;
use crate::export::csv::{self, BOM};
use crate::export::flatten::{flatten, FlatRow, FIXED_COLUMNS};
use crate::record::BondRecord;

/// Timestamp suffix on aggregate filenames, one per run.
const AGGREGATE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes export files into one output directory.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    dir: PathBuf,
}

impl ExportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `{dir}/{code}.json`
    pub fn json_path(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{code}.json"))
    }

    /// `{dir}/{code}.csv`
    pub fn csv_path(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{code}.csv"))
    }

    /// Write one record as pretty JSON plus a single-row CSV, overwriting
    /// previous exports for the same code.
    pub fn save_record(&self, record: &BondRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(self.json_path(&record.code), json)?;

        let row = flatten(record);
        let mut out = BufWriter::new(File::create(self.csv_path(&record.code))?);
        out.write_all(BOM.as_bytes())?;
        csv::write_row(&mut out, row.keys())?;
        csv::write_row(&mut out, row.values())?;
        out.flush()?;

        info!(code = record.code.as_str(), "saved per-bond exports");
        Ok(())
    }

    /// Write the batch-wide CSV: fixed columns first, then every dynamic
    /// key in first-seen order; records missing a key render an empty
    /// cell. Returns the timestamped path.
    pub fn save_aggregate(&self, records: &[BondRecord]) -> Result<PathBuf> {
        let rows: Vec<FlatRow> = records.iter().map(flatten).collect();

        let mut header: IndexSet<String> =
            FIXED_COLUMNS.iter().map(|col| col.to_string()).collect();
        for row in &rows {
            for key in row.keys() {
                if !header.contains(key) {
                    header.insert(key.clone());
                }
            }
        }

        let stamp = Local::now().format(AGGREGATE_STAMP_FORMAT);
        let path = self.dir.join(format!("all_bonds_{stamp}.csv"));
        let mut out = BufWriter::new(File::create(&path)?);
        out.write_all(BOM.as_bytes())?;
        csv::write_row(&mut out, header.iter())?;
        for row in &rows {
            let cells: Vec<&str> = header
                .iter()
                .map(|key| row.get(key).map(String::as_str).unwrap_or(""))
                .collect();
            csv::write_row(&mut out, cells)?;
        }
        out.flush()?;

        info!(path = %path.display(), rows = rows.len(), "saved aggregate export");
        Ok(path)
    }
}

//! On-disk cache of raw detail-page markup.
//!
//! Every network fetch writes the page it saw to `{dir}/{code}_debug.html`;
//! local-mode runs read the same path back instead of hitting the site.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{CrawlError, Result};

/// Deterministic store for raw page copies.
#[derive(Debug, Clone)]
pub struct PageStore {
    dir: PathBuf,
}

impl PageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the cached copy for a bond code.
    pub fn page_path(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{code}_debug.html"))
    }

    /// Persist raw markup, overwriting any previous copy.
    pub fn save(&self, code: &str, html: &str) -> Result<PathBuf> {
        let path = self.page_path(code);
        fs::write(&path, html)?;
        Ok(path)
    }

    /// Read a cached copy back.
    pub fn load(&self, code: &str) -> Result<String> {
        let path = self.page_path(code);
        match fs::read_to_string(&path) {
            Ok(html) => Ok(html),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CrawlError::NotFound {
                code: code.to_string(),
                path,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

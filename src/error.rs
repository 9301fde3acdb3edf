//! Error taxonomy for the crawl pipeline.
//!
//! Every variant is scoped to a single bond: the batch runner logs the
//! failure and moves on to the next code. Only startup problems (output
//! directory, HTTP client construction) abort a run, and those are
//! handled at the binary boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CrawlError>;

/// A per-bond failure during fetch, extraction, or persistence.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Network failure or non-2xx status while fetching a detail page.
    #[error("fetching bond {code}: {source}")]
    Fetch {
        code: String,
        #[source]
        source: reqwest::Error,
    },

    /// Local mode asked for a page that was never cached.
    #[error("no cached page for bond {code} at {}", path.display())]
    NotFound { code: String, path: PathBuf },

    /// The markup yielded nothing recognizable as bond data.
    #[error("extracting bond {code}: {reason}")]
    Extract { code: String, reason: String },

    /// Serialization or file I/O failure while persisting output.
    #[error("writing output: {source}")]
    Write {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<std::io::Error> for CrawlError {
    fn from(source: std::io::Error) -> Self {
        CrawlError::Write {
            source: Box::new(source),
        }
    }
}

impl From<serde_json::Error> for CrawlError {
    fn from(source: serde_json::Error) -> Self {
        CrawlError::Write {
            source: Box::new(source),
        }
    }
}

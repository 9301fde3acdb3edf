//! Runtime configuration for a crawl batch.

use std::path::PathBuf;
use std::time::Duration;

/// Production endpoint prefix; the bond code is appended directly.
pub const DEFAULT_BASE_URL: &str = "https://www.jisilu.cn/data/convert_bond_detail/";

/// Default directory for exported files and cached markup.
pub const DEFAULT_OUTPUT_DIR: &str = "./data";

/// Hard cap on each detail-page request.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Where page markup comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// GET the live detail page and cache the raw markup on disk.
    #[default]
    Network,
    /// Re-read a previously cached `{code}_debug.html` copy.
    Local,
}

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Endpoint prefix the bond code is appended to.
    pub base_url: String,
    /// Directory receiving JSON/CSV exports and cached pages.
    pub output_dir: PathBuf,
    /// Network or cached-local fetching.
    pub mode: FetchMode,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            mode: FetchMode::Network,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

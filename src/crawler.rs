//! Sequential batch runner: fetch, extract, save, pause, repeat.

use anyhow::Context;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::acquisition::{BondClient, PageFetcher, PageStore};
use crate::config::CrawlerConfig;
use crate::error::Result;
use crate::export::ExportWriter;
use crate::extraction::extract_bond;
use crate::pacing;
use crate::record::BondRecord;

/// Drives one batch of bond codes through the pipeline.
pub struct Crawler {
    fetcher: PageFetcher,
    writer: ExportWriter,
}

impl Crawler {
    /// Wire up the pipeline and create the output directory. Failure to
    /// set up the directory or the HTTP client aborts the whole run.
    pub fn new(config: &CrawlerConfig) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!(
                "creating output directory {}",
                config.output_dir.display()
            )
        })?;

        let client =
            BondClient::new(&config.base_url, config.timeout).context("building HTTP client")?;
        let store = PageStore::new(&config.output_dir);
        let fetcher = PageFetcher::new(client, store, config.mode);
        let writer = ExportWriter::new(&config.output_dir);

        Ok(Self { fetcher, writer })
    }

    /// Process codes strictly in order. Per-bond failures are logged and
    /// skipped; the returned records are the successes, in input order.
    pub async fn crawl(&self, codes: &[String]) -> Vec<BondRecord> {
        let mut records = Vec::new();

        for (idx, code) in codes.iter().enumerate() {
            match self.process(code).await {
                Ok(record) => {
                    records.push(record);
                    // Pause before the next code, but only between live
                    // fetches.
                    if self.fetcher.is_network() && idx + 1 < codes.len() {
                        pacing::sleep_fetch_pause().await;
                    }
                }
                Err(e) => warn!(code = code.as_str(), "skipping bond: {e}"),
            }
        }

        info!(
            requested = codes.len(),
            succeeded = records.len(),
            "batch finished"
        );
        records
    }

    /// Fetch, extract, and persist one bond.
    async fn process(&self, code: &str) -> Result<BondRecord> {
        let page = self.fetcher.fetch(code).await?;
        let record = extract_bond(&page.html, code)?;
        self.writer.save_record(&record)?;
        Ok(record)
    }

    /// Write the aggregate CSV for a finished batch.
    pub fn save_aggregate(&self, records: &[BondRecord]) -> Result<PathBuf> {
        self.writer.save_aggregate(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchMode;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bond_page(name: &str, code: &str, price: &str) -> String {
        format!(
            r#"<html><head><title>{name} - {code} - 集思录</title></head>
<body>
<table class="cb-summary"><tr>
  <td>现价: <span class="strong">{price}</span></td>
  <td>溢价率: 12.00%</td>
</tr></table>
<div class="item-label">转股价</div><div class="item-value">10.00</div>
</body></html>"#
        )
    }

    fn config(server_uri: &str, dir: &TempDir, mode: FetchMode) -> CrawlerConfig {
        CrawlerConfig {
            base_url: format!("{server_uri}/data/convert_bond_detail/"),
            output_dir: dir.path().to_path_buf(),
            mode,
            timeout: Duration::from_secs(5),
        }
    }

    async fn mount_page(server: &MockServer, code: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(format!("/data/convert_bond_detail/{code}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_batch_writes_per_bond_files_and_aggregate() {
        let server = MockServer::start().await;
        mount_page(&server, "113046", bond_page("旭升转债", "113046", "105.3")).await;
        mount_page(&server, "113566", bond_page("新星转债", "113566", "98.2")).await;

        let dir = TempDir::new().unwrap();
        let crawler = Crawler::new(&config(&server.uri(), &dir, FetchMode::Network)).unwrap();
        let codes = vec!["113046".to_string(), "113566".to_string()];

        let records = crawler.crawl(&codes).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price.as_deref(), Some("105.3"));
        assert_eq!(records[1].price.as_deref(), Some("98.2"));

        for code in ["113046", "113566"] {
            assert!(dir.path().join(format!("{code}.json")).exists());
            assert!(dir.path().join(format!("{code}.csv")).exists());
            assert!(dir.path().join(format!("{code}_debug.html")).exists());
        }

        let aggregate = crawler.save_aggregate(&records).unwrap();
        let content = std::fs::read_to_string(aggregate).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("105.3"));
        assert!(lines[2].contains("98.2"));
    }

    #[tokio::test]
    async fn test_404_code_is_skipped_and_batch_continues() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/convert_bond_detail/999999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        mount_page(&server, "113046", bond_page("旭升转债", "113046", "105.3")).await;

        let dir = TempDir::new().unwrap();
        let crawler = Crawler::new(&config(&server.uri(), &dir, FetchMode::Network)).unwrap();
        let codes = vec!["999999".to_string(), "113046".to_string()];

        let records = crawler.crawl(&codes).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "113046");

        assert!(!dir.path().join("999999.json").exists());
        assert!(!dir.path().join("999999.csv").exists());
        assert!(!dir.path().join("999999_debug.html").exists());

        let aggregate = crawler.save_aggregate(&records).unwrap();
        let content = std::fs::read_to_string(aggregate).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(!content.contains("999999"));
    }

    #[tokio::test]
    async fn test_local_mode_reads_cached_pages() {
        let dir = TempDir::new().unwrap();
        let store = crate::acquisition::PageStore::new(dir.path());
        store
            .save("113046", &bond_page("旭升转债", "113046", "105.3"))
            .unwrap();

        let crawler =
            Crawler::new(&config("http://127.0.0.1:9", &dir, FetchMode::Local)).unwrap();
        let records = crawler.crawl(&["113046".to_string()]).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("旭升转债"));
        assert!(dir.path().join("113046.json").exists());
        assert!(dir.path().join("113046.csv").exists());
    }

    #[tokio::test]
    async fn test_local_mode_missing_cache_is_skipped() {
        let dir = TempDir::new().unwrap();
        let store = crate::acquisition::PageStore::new(dir.path());
        store
            .save("113566", &bond_page("新星转债", "113566", "98.2"))
            .unwrap();

        let crawler =
            Crawler::new(&config("http://127.0.0.1:9", &dir, FetchMode::Local)).unwrap();
        let codes = vec!["113046".to_string(), "113566".to_string()];
        let records = crawler.crawl(&codes).await;

        // Only the cached code survives; the missing one is skipped.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "113566");
        assert!(!dir.path().join("113046.json").exists());
        assert!(dir.path().join("113566.json").exists());
    }
}

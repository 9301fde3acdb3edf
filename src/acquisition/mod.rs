//! Page acquisition: live HTTP fetches and the on-disk page cache.

pub mod client;
pub mod page_store;

pub use client::BondClient;
pub use page_store::PageStore;

use std::path::PathBuf;

use crate::config::FetchMode;
use crate::error::Result;

/// Raw markup for one bond, plus the on-disk copy backing it.
///
/// Network fetches write the copy as part of the fetch; local mode reads
/// from the same deterministic path, so `cache_path` is always set.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    pub cache_path: PathBuf,
}

/// Produces detail pages from the network or the local page store.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: BondClient,
    store: PageStore,
    mode: FetchMode,
}

impl PageFetcher {
    pub fn new(client: BondClient, store: PageStore, mode: FetchMode) -> Self {
        Self {
            client,
            store,
            mode,
        }
    }

    /// True when pages come from the live site.
    pub fn is_network(&self) -> bool {
        self.mode == FetchMode::Network
    }

    /// Raw page for one bond, per the configured mode.
    pub async fn fetch(&self, code: &str) -> Result<FetchedPage> {
        match self.mode {
            FetchMode::Network => {
                let html = self.client.fetch_page(code).await?;
                let cache_path = self.store.save(code, &html)?;
                Ok(FetchedPage { html, cache_path })
            }
            FetchMode::Local => {
                let html = self.store.load(code)?;
                Ok(FetchedPage {
                    html,
                    cache_path: self.store.page_path(code),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_network_fetch_caches_the_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/convert_bond_detail/113046"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>债券</html>"))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let base = format!("{}/data/convert_bond_detail/", server.uri());
        let client = BondClient::new(&base, Duration::from_secs(5)).unwrap();
        let fetcher = PageFetcher::new(client, PageStore::new(dir.path()), FetchMode::Network);

        let page = fetcher.fetch("113046").await.unwrap();
        assert_eq!(page.html, "<html>债券</html>");
        assert_eq!(page.cache_path, dir.path().join("113046_debug.html"));
        assert_eq!(
            std::fs::read_to_string(&page.cache_path).unwrap(),
            "<html>债券</html>"
        );
    }

    #[tokio::test]
    async fn test_local_mode_reads_the_cache_back() {
        let dir = TempDir::new().unwrap();
        let store = PageStore::new(dir.path());
        store.save("113046", "<html>缓存</html>").unwrap();

        // Client points nowhere reachable; local mode must not touch it.
        let client = BondClient::new("http://127.0.0.1:9/", Duration::from_secs(1)).unwrap();
        let fetcher = PageFetcher::new(client, store, FetchMode::Local);

        let page = fetcher.fetch("113046").await.unwrap();
        assert_eq!(page.html, "<html>缓存</html>");
        assert_eq!(page.cache_path, dir.path().join("113046_debug.html"));
    }
}

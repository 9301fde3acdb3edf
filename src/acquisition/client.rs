//! HTTP access to the detail-page endpoint.
//!
//! One pooled client per run, sending a fixed desktop-browser header set.
//! Non-2xx statuses are folded into the fetch error so callers see a
//! single failure shape.

use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, UPGRADE_INSECURE_REQUESTS,
};
use tracing::info;

use crate::error::{CrawlError, Result};

/// Browser profile presented to the site.
pub const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.114 Safari/537.36";
const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// Client for one crawl run. Cheap to clone; reqwest pools internally.
#[derive(Debug, Clone)]
pub struct BondClient {
    http: reqwest::Client,
    base_url: String,
}

impl BondClient {
    /// Build a client with the fixed browser headers and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// URL of one bond's detail page.
    pub fn detail_url(&self, code: &str) -> String {
        format!("{}{}", self.base_url, code)
    }

    /// GET one detail page and return its body.
    pub async fn fetch_page(&self, code: &str) -> Result<String> {
        let url = self.detail_url(code);
        info!(%url, "fetching detail page");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|source| CrawlError::Fetch {
                code: code.to_string(),
                source,
            })?;

        response.text().await.map_err(|source| CrawlError::Fetch {
            code: code.to_string(),
            source,
        })
    }
}

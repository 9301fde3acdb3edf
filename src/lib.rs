//! Crawler for convertible-bond detail pages on jisilu.cn.
//!
//! Fetches one detail page per bond code (or re-reads cached copies),
//! extracts labeled fields with a prioritized list of selector
//! strategies, and exports per-bond JSON/CSV plus an aggregate CSV whose
//! schema is the union of the fields seen in the batch.
//!
//! The pipeline is strictly sequential — fetch, extract, save, one code
//! at a time, with a randomized pause between live fetches.

pub mod acquisition;
pub mod config;
pub mod crawler;
pub mod error;
pub mod export;
pub mod extraction;
pub mod pacing;
pub mod record;

pub use config::{CrawlerConfig, FetchMode};
pub use crawler::Crawler;
pub use error::{CrawlError, Result};
pub use record::BondRecord;

use crate::scrapers::error::ParamsError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Listings LinkedIn returns per results page. Protocol constant of the source.
pub const LINKEDIN_PAGE_SIZE: usize = 25;

pub const DEFAULT_SEARCH_URL: &str =
    "https://www.linkedin.com/jobs/search/?geoId=104170880&keywords=%20&location=Qatar";

/// Search parameters for a job listing scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Search URL, including any query parameters the source understands
    pub base_url: String,
    /// Number of results pages to request
    pub pages: usize,
    /// Offset step between pages
    pub page_increment: usize,
    /// Maximum pages fetched at once
    pub concurrency: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl SearchParams {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject parameters that would make the run meaningless
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.page_increment == 0 {
            return Err(ParamsError::ZeroIncrement);
        }
        if self.concurrency == 0 {
            return Err(ParamsError::ZeroConcurrency);
        }
        url::Url::parse(&self.base_url).map_err(|source| ParamsError::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })?;
        Ok(())
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEARCH_URL.to_string(),
            pages: 40,
            page_increment: LINKEDIN_PAGE_SIZE,
            concurrency: 4,
            timeout_secs: 30,
        }
    }
}

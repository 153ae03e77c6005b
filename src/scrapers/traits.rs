use crate::models::{ListingRecord, PageRequest};
use crate::scrapers::error::{ExtractError, FetchError};
use anyhow::Result;
use async_trait::async_trait;

/// Retrieves the raw document for one results page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a single page. One attempt, bounded by the fetcher's timeout.
    async fn fetch(&self, request: &PageRequest) -> Result<String, FetchError>;

    /// Get the name of the fetcher source, used in log lines
    fn source_name(&self) -> &'static str;
}

/// Turns one page document into listing records
pub trait ListingExtractor: Send + Sync {
    /// Returns every recoverable listing on the page, or an error if the
    /// page cannot be trusted as a whole.
    fn extract(&self, html: &str) -> Result<Vec<ListingRecord>, ExtractError>;
}

/// Receives the final, deduplicated and ordered record set
pub trait ListingSink {
    fn write(&mut self, records: &[ListingRecord]) -> Result<()>;
}

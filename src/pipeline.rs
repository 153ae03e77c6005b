use crate::models::{ListingRecord, PageRequest, PageResult};
use crate::scrapers::linkedin::page_requests;
use crate::scrapers::types::SearchParams;
use crate::scrapers::{ListingExtractor, ListingSink, PageFetcher};
use anyhow::{Context, Result};
use futures::{stream, StreamExt};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// What happened during one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_requested: usize,
    pub pages_fetched: usize,
    /// Indices of pages whose fetch failed
    pub failed_pages: Vec<usize>,
    /// Indices of pages fetched but rejected by the extractor
    pub rejected_pages: Vec<usize>,
    pub records_extracted: usize,
    pub records_written: usize,
}

/// Fetch every page with at most `concurrency` requests in flight.
///
/// Results come back in request order regardless of completion order, since
/// the dedup downstream keeps the first occurrence by page index.
pub async fn fetch_pages<F>(
    fetcher: &F,
    requests: Vec<PageRequest>,
    concurrency: usize,
) -> Vec<PageResult>
where
    F: PageFetcher + ?Sized,
{
    stream::iter(requests)
        .map(|request| async move {
            match fetcher.fetch(&request).await {
                Ok(body) => PageResult::Fetched { request, body },
                Err(cause) => PageResult::Failed { request, cause },
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

/// Extract every fetched page, one list per page in page order.
/// Failed and rejected pages contribute an empty list.
pub fn extract_pages<E>(
    extractor: &E,
    results: Vec<PageResult>,
    summary: &mut RunSummary,
) -> Vec<Vec<ListingRecord>>
where
    E: ListingExtractor + ?Sized,
{
    results
        .into_iter()
        .map(|result| match result {
            PageResult::Fetched { request, body } => {
                summary.pages_fetched += 1;
                match extractor.extract(&body) {
                    Ok(records) => {
                        debug!("Page {} yielded {} listings", request.index, records.len());
                        records
                    }
                    Err(e) => {
                        warn!("Discarding page {} ({}): {}", request.index, request.url, e);
                        summary.rejected_pages.push(request.index);
                        Vec::new()
                    }
                }
            }
            PageResult::Failed { request, cause } => {
                warn!("Skipping page {} ({}): {}", request.index, request.url, cause);
                summary.failed_pages.push(request.index);
                Vec::new()
            }
        })
        .collect()
}

/// Concatenate per-page lists, keeping page order and order within a page
pub fn aggregate(pages: Vec<Vec<ListingRecord>>) -> Vec<ListingRecord> {
    pages.into_iter().flatten().collect()
}

/// Keep the first record seen for each listing id
pub fn dedup_by_id(mut records: Vec<ListingRecord>) -> Vec<ListingRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records.retain(|record| seen.insert(record.id.clone()));
    records
}

/// Newest first. Stable, so equal dates keep their deduplicated order.
///
/// Dates are compared as strings. That is chronological only because LinkedIn
/// emits fixed-width ISO-8601 dates (`YYYY-MM-DD`); the format is not checked.
pub fn sort_by_date_desc(records: &mut [ListingRecord]) {
    records.sort_by(|a, b| b.date_posted.cmp(&a.date_posted));
}

/// Run the whole scrape: generate pages, fetch, extract, merge, dedup, sort, write.
///
/// Only invalid parameters and sink failures are errors; page-level problems
/// are logged and recorded in the returned summary.
pub async fn run<F, E, S>(
    params: &SearchParams,
    fetcher: &F,
    extractor: &E,
    sink: &mut S,
) -> Result<RunSummary>
where
    F: PageFetcher + ?Sized,
    E: ListingExtractor + ?Sized,
    S: ListingSink + ?Sized,
{
    params.validate()?;
    let requests = page_requests(&params.base_url, params.pages, params.page_increment)?;

    let mut summary = RunSummary {
        pages_requested: requests.len(),
        ..RunSummary::default()
    };

    info!(
        "Fetching {} pages from {} ({} at a time)",
        requests.len(),
        fetcher.source_name(),
        params.concurrency
    );
    let results = fetch_pages(fetcher, requests, params.concurrency).await;

    let pages = extract_pages(extractor, results, &mut summary);
    let all = aggregate(pages);
    summary.records_extracted = all.len();

    let mut unique = dedup_by_id(all);
    sort_by_date_desc(&mut unique);
    info!(
        "{} listings extracted, {} unique",
        summary.records_extracted,
        unique.len()
    );

    sink.write(&unique).context("Failed to write listings")?;
    summary.records_written = unique.len();

    Ok(summary)
}

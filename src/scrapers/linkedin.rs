use crate::models::{EasyApply, ListingRecord, PageRequest, NONE, NOT_MENTIONED};
use crate::scrapers::error::{ExtractError, FetchError, ParamsError};
use crate::scrapers::traits::{ListingExtractor, PageFetcher};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Query parameter LinkedIn uses for the result offset
const OFFSET_PARAM: &str = "start";

/// Build the ordered list of results pages: page `k` asks for offset `k * increment`.
///
/// The base URL's own query string is kept as-is and the offset is appended.
pub fn page_requests(
    base_url: &str,
    pages: usize,
    increment: usize,
) -> Result<Vec<PageRequest>, ParamsError> {
    if increment == 0 {
        return Err(ParamsError::ZeroIncrement);
    }
    let base = Url::parse(base_url).map_err(|source| ParamsError::InvalidUrl {
        url: base_url.to_string(),
        source,
    })?;

    Ok((0..pages)
        .map(|index| {
            let mut url = base.clone();
            url.query_pairs_mut()
                .append_pair(OFFSET_PARAM, &(index * increment).to_string());
            PageRequest {
                index,
                url: url.into(),
            }
        })
        .collect())
}

/// Plain HTTP fetcher for LinkedIn's public job search
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<String, FetchError> {
        debug!("Fetching URL: {}", request.url);

        let response = self.client.get(&request.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        debug!("Downloaded {} bytes for page {}", body.len(), request.index);
        Ok(body)
    }

    fn source_name(&self) -> &'static str {
        "LinkedIn"
    }
}

/// Compiled anchors for LinkedIn's job search card markup
pub struct ListingSelectors {
    /// Primary anchor, one per listing: `<a>` carrying the job link and title
    pub listing_link: Selector,
    /// Title label inside the listing link
    pub title: Selector,
    pub company_link: Selector,
    /// Block holding date, salary, location and friends
    pub metadata: Selector,
    pub date: Selector,
    pub salary: Selector,
    pub location: Selector,
    pub easy_apply: Selector,
    pub benefits: Selector,
    pub snippet: Selector,
}

impl ListingSelectors {
    pub fn linkedin() -> Result<Self> {
        Ok(Self {
            listing_link: compile("a.base-card__full-link")?,
            title: compile("span")?,
            company_link: compile("a.hidden-nested-link")?,
            metadata: compile("div.base-search-card__metadata")?,
            date: compile("time")?,
            salary: compile("span.job-search-card__salary-info")?,
            location: compile("span.job-search-card__location")?,
            easy_apply: compile("span.job-search-card__easy-apply-label")?,
            benefits: compile("span.result-benefits__text")?,
            snippet: compile("p.job-search-card__snippet")?,
        })
    }

    /// Anchors that occur at most once per listing and never outside one
    fn aligned(&self) -> [(&'static str, &Selector); 8] {
        [
            ("listing link", &self.listing_link),
            ("company link", &self.company_link),
            ("metadata block", &self.metadata),
            ("salary", &self.salary),
            ("location", &self.location),
            ("easy apply label", &self.easy_apply),
            ("benefits", &self.benefits),
            ("snippet", &self.snippet),
        ]
    }
}

fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector `{}`: {:?}", css, e))
}

/// Trimmed text content of an element
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extracts listings from a LinkedIn search results page.
///
/// Each record is read from its own listing card: the card is the nearest
/// ancestor of the listing link that contains a metadata block, and every
/// other field is looked up inside that card only.
pub struct LinkedInExtractor {
    selectors: ListingSelectors,
    id_pattern: Regex,
}

impl LinkedInExtractor {
    pub fn new() -> Result<Self> {
        Self::with_selectors(ListingSelectors::linkedin()?)
    }

    pub fn with_selectors(selectors: ListingSelectors) -> Result<Self> {
        // ASCII digits immediately before the first '?'
        let id_pattern = Regex::new(r"^[^?]*?([0-9]*)\?").context("Failed to compile job id pattern")?;
        Ok(Self {
            selectors,
            id_pattern,
        })
    }

    /// Listing id from a job URL like `.../jobs/view/engineer-at-acme-3812345678?refId=...`
    pub fn job_id(&self, job_url: &str) -> Option<String> {
        self.id_pattern
            .captures(job_url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    fn container_of<'a>(&self, anchor: ElementRef<'a>) -> Option<ElementRef<'a>> {
        anchor
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.select(&self.selectors.metadata).next().is_some())
    }

    fn check_alignment(
        &self,
        document: &Html,
        containers: &[ElementRef<'_>],
    ) -> Result<(), ExtractError> {
        for (anchor, selector) in self.selectors.aligned() {
            let page_wide = document.select(selector).count();
            let per_listing: Vec<usize> = containers
                .iter()
                .map(|container| container.select(selector).count())
                .collect();
            let attributed: usize = per_listing.iter().sum();

            if attributed != page_wide || per_listing.iter().any(|&n| n > 1) {
                return Err(ExtractError::Misaligned {
                    anchor,
                    page_wide,
                    attributed,
                });
            }
        }
        Ok(())
    }

    fn build_record(
        &self,
        anchor: ElementRef<'_>,
        container: ElementRef<'_>,
    ) -> Result<ListingRecord, &'static str> {
        let s = &self.selectors;

        let job_url = anchor
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .ok_or("missing job link")?
            .to_string();
        let id = self.job_id(&job_url).ok_or("no listing id in job link")?;

        let title = anchor
            .select(&s.title)
            .next()
            .map(text_of)
            .unwrap_or_else(|| text_of(anchor));
        if title.is_empty() {
            return Err("empty title");
        }

        let metadata = container
            .select(&s.metadata)
            .next()
            .ok_or("missing metadata block")?;
        let date_posted = metadata
            .select(&s.date)
            .next()
            .and_then(|time| time.value().attr("datetime"))
            .map(str::trim)
            .filter(|date| !date.is_empty())
            .ok_or("missing posting date")?
            .to_string();

        let company_link = container.select(&s.company_link).next();
        let company = company_link.map(text_of).unwrap_or_default();
        let company_url = company_link
            .and_then(|link| link.value().attr("href"))
            .unwrap_or_default()
            .to_string();

        let meta_text = |selector: &Selector, fallback: &str| {
            metadata
                .select(selector)
                .next()
                .map(text_of)
                .unwrap_or_else(|| fallback.to_string())
        };

        let easy_apply = if metadata.select(&s.easy_apply).next().is_some() {
            EasyApply::Enabled
        } else {
            EasyApply::NotEnabled
        };

        Ok(ListingRecord {
            id,
            title,
            company,
            company_url,
            date_posted,
            salary: meta_text(&s.salary, NOT_MENTIONED),
            location: meta_text(&s.location, NOT_MENTIONED),
            easy_apply,
            hiring_status: meta_text(&s.benefits, NONE),
            job_url,
            snippet: meta_text(&s.snippet, NONE),
        })
    }
}

impl ListingExtractor for LinkedInExtractor {
    fn extract(&self, html: &str) -> Result<Vec<ListingRecord>, ExtractError> {
        let document = Html::parse_document(html);

        let anchors: Vec<ElementRef<'_>> = document.select(&self.selectors.listing_link).collect();
        if anchors.is_empty() {
            return Err(ExtractError::Unrecognized);
        }

        let containers: Vec<ElementRef<'_>> = anchors
            .iter()
            .filter_map(|anchor| self.container_of(*anchor))
            .collect();
        if containers.len() != anchors.len() {
            return Err(ExtractError::Misaligned {
                anchor: "metadata block",
                page_wide: document.select(&self.selectors.metadata).count(),
                attributed: containers.len(),
            });
        }

        self.check_alignment(&document, &containers)?;

        let mut records = Vec::with_capacity(anchors.len());
        for (position, (anchor, container)) in anchors.iter().zip(&containers).enumerate() {
            match self.build_record(*anchor, *container) {
                Ok(record) => records.push(record),
                Err(reason) => debug!("Dropping listing {} on page: {}", position, reason),
            }
        }

        Ok(records)
    }
}

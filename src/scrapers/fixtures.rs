//! Test helpers: LinkedIn-shaped markup and an in-memory fetcher.

use crate::models::PageRequest;
use crate::scrapers::error::FetchError;
use crate::scrapers::traits::PageFetcher;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

pub struct Card<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub date: &'a str,
    /// Extra markup placed inside the metadata block, before the `<time>`
    pub meta: &'a str,
    pub job_url: Option<&'a str>,
}

impl<'a> Card<'a> {
    pub fn new(id: &'a str, title: &'a str, date: &'a str) -> Self {
        Self {
            id,
            title,
            date,
            meta: "",
            job_url: None,
        }
    }
}

pub fn card(c: &Card<'_>) -> String {
    let job_url = c.job_url.map(str::to_string).unwrap_or_else(|| {
        format!(
            "https://qa.linkedin.com/jobs/view/role-{}?refId=abc&amp;trackingId=xyz",
            c.id
        )
    });
    format!(
        r#"<li><div class="base-card relative base-search-card job-search-card">
  <a class="base-card__full-link" href="{job_url}"><span class="sr-only">  {title}  </span></a>
  <div class="base-search-card__info">
    <h3 class="base-search-card__title">{title}</h3>
    <h4 class="base-search-card__subtitle"><a class="hidden-nested-link" href="https://www.linkedin.com/company/acme?trk=public_jobs"> Acme Corp </a></h4>
    <div class="base-search-card__metadata">
      {meta}
      <time class="job-search-card__listdate" datetime="{date}">1 week ago</time>
    </div>
  </div>
</div></li>"#,
        job_url = job_url,
        title = c.title,
        meta = c.meta,
        date = c.date,
    )
}

/// A listing card whose metadata block is missing entirely
pub fn card_without_metadata(id: &str, title: &str) -> String {
    format!(
        r#"<li><div class="base-card job-search-card">
  <a class="base-card__full-link" href="https://qa.linkedin.com/jobs/view/role-{id}?refId=abc"><span>{title}</span></a>
  <div class="base-search-card__info">
    <h4 class="base-search-card__subtitle"><a class="hidden-nested-link" href="https://www.linkedin.com/company/acme">Acme Corp</a></h4>
  </div>
</div></li>"#
    )
}

pub fn page(cards: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><body><ul class=\"jobs-search__results-list\">{}</ul></body></html>",
        cards.concat()
    )
}

/// Serves canned bodies by page index; `None` fails with 502
pub struct FakeFetcher {
    pub pages: Vec<Option<String>>,
    /// Per-page response delay in milliseconds, indexed like `pages`
    pub delays_ms: Vec<u64>,
}

impl FakeFetcher {
    pub fn new(pages: Vec<Option<String>>) -> Self {
        Self {
            pages,
            delays_ms: Vec::new(),
        }
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<String, FetchError> {
        if let Some(ms) = self.delays_ms.get(request.index) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        self.pages
            .get(request.index)
            .cloned()
            .flatten()
            .ok_or(FetchError::Status(StatusCode::BAD_GATEWAY))
    }

    fn source_name(&self) -> &'static str {
        "fake"
    }
}

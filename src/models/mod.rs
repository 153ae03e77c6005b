use crate::scrapers::error::FetchError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for a salary or location the listing does not show
pub const NOT_MENTIONED: &str = "Not mentioned";

/// Placeholder for missing benefits text or snippet
pub const NONE: &str = "None";

/// Whether LinkedIn offers one-click "Easy Apply" for a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EasyApply {
    Enabled,
    NotEnabled,
}

impl fmt::Display for EasyApply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EasyApply::Enabled => f.write_str("Enabled"),
            EasyApply::NotEnabled => f.write_str("Not enabled"),
        }
    }
}

/// One job listing as it appears on a search results page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub company_url: String,
    /// ISO-8601 date from the listing's `<time datetime>` attribute
    pub date_posted: String,
    pub salary: String,
    pub location: String,
    pub easy_apply: EasyApply,
    pub hiring_status: String,
    pub job_url: String,
    pub snippet: String,
}

/// A single results page to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page ordinal; the offset is `index * increment`
    pub index: usize,
    pub url: String,
}

/// Outcome of fetching one page
#[derive(Debug)]
pub enum PageResult {
    Fetched { request: PageRequest, body: String },
    Failed { request: PageRequest, cause: FetchError },
}

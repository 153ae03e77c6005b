use crate::scrapers::types::{SearchParams, DEFAULT_SEARCH_URL, LINKEDIN_PAGE_SIZE};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "job-scout")]
#[command(about = "Scrape LinkedIn job search results into a deduplicated, date-sorted table")]
#[command(version)]
pub struct Args {
    /// Job search URL, with any filters as query parameters
    #[arg(long, default_value = DEFAULT_SEARCH_URL)]
    pub url: String,

    /// Number of results pages to scrape
    #[arg(short, long, default_value_t = 40)]
    pub pages: usize,

    /// Listings per results page
    #[arg(long, default_value_t = LINKEDIN_PAGE_SIZE, hide = true)]
    pub page_increment: usize,

    /// Pages fetched concurrently
    #[arg(short, long, default_value_t = 4)]
    pub concurrency: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Output file
    #[arg(short, long, default_value = "jobs.csv")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Also save every fetched page under this directory
    #[arg(long, value_name = "DIR", conflicts_with = "replay")]
    pub save_pages: Option<PathBuf>,

    /// Read pages saved with --save-pages instead of fetching
    #[arg(long, value_name = "DIR")]
    pub replay: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl Args {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            base_url: self.url.clone(),
            pages: self.pages,
            page_increment: self.page_increment,
            concurrency: self.concurrency,
            timeout_secs: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_search_params() {
        let args = Args::try_parse_from(["job-scout"]).unwrap();
        let params = args.search_params();
        let defaults = SearchParams::default();
        assert_eq!(params.base_url, defaults.base_url);
        assert_eq!(params.pages, defaults.pages);
        assert_eq!(params.page_increment, defaults.page_increment);
        assert_eq!(params.concurrency, defaults.concurrency);
        assert_eq!(params.timeout_secs, defaults.timeout_secs);
        assert_eq!(args.output, PathBuf::from("jobs.csv"));
        assert_eq!(args.format, OutputFormat::Csv);
    }

    #[test]
    fn test_negative_pages_rejected() {
        assert!(Args::try_parse_from(["job-scout", "--pages=-3"]).is_err());
    }

    #[test]
    fn test_save_and_replay_conflict() {
        let result =
            Args::try_parse_from(["job-scout", "--save-pages", "a", "--replay", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_format() {
        let args =
            Args::try_parse_from(["job-scout", "-f", "json", "-o", "jobs.json", "-p", "3"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.pages, 3);
    }
}

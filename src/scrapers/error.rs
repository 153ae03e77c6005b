use reqwest::StatusCode;
use std::path::PathBuf;

/// Why a single page could not be retrieved. Never fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a fetched page yielded no records.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no job listings recognized in page markup")]
    Unrecognized,
    #[error("anchor `{anchor}` misaligned: {page_wide} on page, {attributed} attributed to listings")]
    Misaligned {
        anchor: &'static str,
        page_wide: usize,
        attributed: usize,
    },
}

/// Invalid run parameters, rejected before any request is made.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("page increment must be greater than 0")]
    ZeroIncrement,
    #[error("concurrency must be greater than 0")]
    ZeroConcurrency,
    #[error("invalid search URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

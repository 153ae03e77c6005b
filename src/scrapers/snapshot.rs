use crate::models::PageRequest;
use crate::scrapers::error::FetchError;
use crate::scrapers::traits::PageFetcher;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File a page document is saved under, e.g. `page_007.html`
pub fn snapshot_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("page_{:03}.html", index))
}

/// Wraps another fetcher and saves every document it returns
pub struct RecordingFetcher<F> {
    inner: F,
    dir: PathBuf,
}

impl<F: PageFetcher> RecordingFetcher<F> {
    pub fn new(inner: F, dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create snapshot directory {}", dir.display()))?;
        Ok(Self { inner, dir })
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for RecordingFetcher<F> {
    async fn fetch(&self, request: &PageRequest) -> Result<String, FetchError> {
        let body = self.inner.fetch(request).await?;

        let path = snapshot_path(&self.dir, request.index);
        match tokio::fs::write(&path, &body).await {
            Ok(()) => debug!("Saved page {} to {}", request.index, path.display()),
            // losing a snapshot does not lose the page
            Err(e) => warn!("Could not save page {} to {}: {}", request.index, path.display(), e),
        }

        Ok(body)
    }

    fn source_name(&self) -> &'static str {
        self.inner.source_name()
    }
}

/// Replays documents previously saved by [`RecordingFetcher`]
pub struct SnapshotFetcher {
    dir: PathBuf,
}

impl SnapshotFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl PageFetcher for SnapshotFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<String, FetchError> {
        let path = snapshot_path(&self.dir, request.index);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io { path, source })
    }

    fn source_name(&self) -> &'static str {
        "snapshot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CsvSink;
    use crate::pipeline;
    use crate::scrapers::fixtures::{card, page, Card, FakeFetcher};
    use crate::scrapers::types::SearchParams;
    use crate::scrapers::LinkedInExtractor;

    fn params(pages: usize) -> SearchParams {
        SearchParams {
            base_url: "https://www.linkedin.com/jobs/search/?keywords=rust".to_string(),
            pages,
            ..SearchParams::default()
        }
    }

    #[test]
    fn test_snapshot_path() {
        assert_eq!(
            snapshot_path(Path::new("pages"), 7),
            PathBuf::from("pages/page_007.html")
        );
    }

    #[tokio::test]
    async fn test_recording_then_replay() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = RecordingFetcher::new(
            FakeFetcher::new(vec![Some("<p>zero</p>".to_string()), None]),
            dir.path(),
        )
        .unwrap();

        let requests = crate::scrapers::linkedin::page_requests(&params(2).base_url, 2, 25).unwrap();
        assert_eq!(recorder.fetch(&requests[0]).await.unwrap(), "<p>zero</p>");
        assert!(recorder.fetch(&requests[1]).await.is_err());

        let replay = SnapshotFetcher::new(dir.path());
        assert_eq!(replay.fetch(&requests[0]).await.unwrap(), "<p>zero</p>");
        assert!(matches!(
            replay.fetch(&requests[1]).await,
            Err(FetchError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_replayed_runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            snapshot_path(dir.path(), 0),
            page(&[
                card(&Card::new("1001", "Backend Engineer", "2024-02-10")),
                card(&Card {
                    meta: r#"<span class="job-search-card__salary-info">QAR 12,000, monthly</span>"#,
                    ..Card::new("1002", "Platform Engineer", "2024-03-01")
                }),
            ]),
        )
        .unwrap();
        std::fs::write(
            snapshot_path(dir.path(), 1),
            page(&[
                card(&Card::new("1002", "Platform Engineer", "2024-03-05")),
                card(&Card::new("1003", "SRE", "2024-01-15")),
            ]),
        )
        .unwrap();

        let extractor = LinkedInExtractor::new().unwrap();
        let fetcher = SnapshotFetcher::new(dir.path());

        let mut outputs = Vec::new();
        for _ in 0..2 {
            let mut sink = CsvSink::from_writer(Vec::new());
            let summary = pipeline::run(&params(3), &fetcher, &extractor, &mut sink)
                .await
                .unwrap();
            assert_eq!(summary.failed_pages, vec![2]);
            assert_eq!(summary.records_written, 3);
            outputs.push(sink.into_inner().unwrap());
        }

        assert_eq!(outputs[0], outputs[1]);
        let csv = String::from_utf8(outputs.remove(0)).unwrap();
        let ids: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(ids, vec!["1002", "1001", "1003"]);
    }
}

mod cli;
mod models;
mod output;
mod pipeline;
mod scrapers;

use clap::Parser;
use cli::{Args, OutputFormat};
use output::{CsvSink, JsonSink};
use scrapers::{
    HttpFetcher, LinkedInExtractor, ListingSink, PageFetcher, RecordingFetcher, SnapshotFetcher,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let params = args.search_params();
    params.validate()?;

    info!("💼 Job Scout - LinkedIn job search scraper");

    let fetcher: Box<dyn PageFetcher> = match (&args.replay, &args.save_pages) {
        (Some(dir), _) => {
            info!("Replaying saved pages from {}", dir.display());
            Box::new(SnapshotFetcher::new(dir))
        }
        (None, Some(dir)) => Box::new(RecordingFetcher::new(
            HttpFetcher::new(params.timeout())?,
            dir,
        )?),
        (None, None) => Box::new(HttpFetcher::new(params.timeout())?),
    };
    let extractor = LinkedInExtractor::new()?;

    let mut sink: Box<dyn ListingSink> = match args.format {
        OutputFormat::Csv => Box::new(CsvSink::create(&args.output)?),
        OutputFormat::Json => Box::new(JsonSink::create(&args.output)?),
    };

    let summary = pipeline::run(&params, fetcher.as_ref(), &extractor, sink.as_mut()).await?;

    if !summary.failed_pages.is_empty() {
        info!("{} pages could not be fetched: {:?}", summary.failed_pages.len(), summary.failed_pages);
    }
    if !summary.rejected_pages.is_empty() {
        info!("{} pages had unusable markup: {:?}", summary.rejected_pages.len(), summary.rejected_pages);
    }
    info!(
        "✅ Fetched {}/{} pages, saved {} unique listings to {}",
        summary.pages_fetched,
        summary.pages_requested,
        summary.records_written,
        args.output.display()
    );

    Ok(())
}

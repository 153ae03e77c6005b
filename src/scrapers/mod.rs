pub mod error;
pub mod linkedin;
pub mod snapshot;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use linkedin::{HttpFetcher, LinkedInExtractor};
pub use snapshot::{RecordingFetcher, SnapshotFetcher};
pub use traits::{ListingExtractor, ListingSink, PageFetcher};

use super::error::FetchError;
use super::models::{CollectionListing, Video, VideoListing};
use crate::browse::query::{CollectionQuery, VideoQuery};
use async_trait::async_trait;

/// The three archive operations the browsing controllers depend on.
///
/// Implementations must not retry on their own; a retry is always a fresh,
/// user-initiated request.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Collections matching the query's pattern, one page of
    /// [`COLLECTION_PAGE_SIZE`](crate::browse::query::COLLECTION_PAGE_SIZE) rows.
    async fn list_collections(&self, query: &CollectionQuery)
    -> Result<CollectionListing, FetchError>;

    /// Videos of a single collection.
    async fn list_videos(
        &self,
        collection_id: &str,
        query: &VideoQuery,
    ) -> Result<VideoListing, FetchError>;

    /// Full record of one video, including its playback sources.
    async fn video_detail(&self, identifier: &str) -> Result<Video, FetchError>;
}

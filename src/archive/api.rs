use super::error::FetchError;
use super::models::{CollectionListing, Video, VideoListing};
use super::source::DataSource;
use crate::browse::query::{
    ALL_COLLECTIONS, COLLECTION_PAGE_SIZE, CollectionQuery, SortKey, VIDEO_PAGE_SIZE, VideoQuery,
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base_url: String,
}

/// HTTP client for the archive browsing API (`/explore`, `/collections/{id}`,
/// `/videos/{id}`).
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    inner: Arc<Inner>,
}

impl ArchiveClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000/api/v1";
    const USER_AGENT: &'static str = concat!("arcbrowse/", env!("CARGO_PKG_VERSION"));

    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(Self::USER_AGENT)
            .timeout(timeout)
            .build()
            .context("build reqwest client")?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn explore_url(&self, query: &CollectionQuery) -> String {
        let pattern = query.pattern.as_deref().unwrap_or(ALL_COLLECTIONS);
        format!(
            "{}/explore?collection={}&page={}&rows={}&sort={}",
            self.inner.base_url,
            urlencoding::encode(pattern),
            query.page,
            COLLECTION_PAGE_SIZE,
            urlencoding::encode(query.sort.as_str()),
        )
    }

    pub fn collection_url(&self, collection_id: &str, query: &VideoQuery) -> String {
        format!(
            "{}/collections/{}?film_rows={}&page={}&sort={}",
            self.inner.base_url,
            urlencoding::encode(collection_id),
            VIDEO_PAGE_SIZE,
            query.page,
            urlencoding::encode(query.sort.as_str()),
        )
    }

    pub fn video_url(&self, identifier: &str) -> String {
        format!(
            "{}/videos/{}",
            self.inner.base_url,
            urlencoding::encode(identifier)
        )
    }

    /// Raw `/explore` body, for diagnostics.
    pub async fn explore_raw(&self, query: &CollectionQuery) -> Result<serde_json::Value, FetchError> {
        let body = self.get_body(&self.explore_url(query)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get_body(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url, "GET");
        let resp = self.inner.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await?;
        Ok(body.to_vec())
    }

    async fn get_object<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let body = self.get_body(url).await?;
        decode_object(&body)
    }
}

/// Decode an endpoint body that must be a JSON object.
///
/// Serde would happily read a struct out of a JSON array, so the top-level shape
/// is checked before the typed decode.
pub fn decode_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(FetchError::Malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[async_trait]
impl DataSource for ArchiveClient {
    async fn list_collections(
        &self,
        query: &CollectionQuery,
    ) -> Result<CollectionListing, FetchError> {
        self.get_object(&self.explore_url(query)).await
    }

    async fn list_videos(
        &self,
        collection_id: &str,
        query: &VideoQuery,
    ) -> Result<VideoListing, FetchError> {
        self.get_object(&self.collection_url(collection_id, query)).await
    }

    async fn video_detail(&self, identifier: &str) -> Result<Video, FetchError> {
        self.get_object(&self.video_url(identifier)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::query::{CollectionSort, QueryState, VideoSort};

    fn client() -> ArchiveClient {
        ArchiveClient::new("http://localhost:8000/api/v1/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_explore_url_shape() {
        let mut q = QueryState::collections();
        q.set_filter(crate::browse::query::FilterChange::Sort(CollectionSort::NumReviewsAsc))
            .unwrap();
        assert_eq!(
            client().explore_url(q.query()),
            "http://localhost:8000/api/v1/explore?collection=%2A&page=1&rows=12&sort=num_reviews%20asc"
        );
    }

    #[test]
    fn test_collection_and_video_urls_encode_identifiers() {
        let mut q = QueryState::videos();
        q.set_page(3).unwrap();
        q.set_filter(crate::browse::query::FilterChange::Sort(VideoSort::TitleAsc))
            .unwrap();
        q.set_page(2).unwrap();
        let c = client();
        assert_eq!(
            c.collection_url("TV-FOXNEWSW", q.query()),
            "http://localhost:8000/api/v1/collections/TV-FOXNEWSW?film_rows=5&page=2&sort=title%20asc"
        );
        assert_eq!(
            c.video_url("a b/c"),
            "http://localhost:8000/api/v1/videos/a%20b%2Fc"
        );
    }

    #[test]
    fn test_decode_collection_listing() {
        let body = br#"{"numFound": 37, "start": 0, "rows": 12, "docs": [
            {"identifier": "c1", "title": "One"},
            {"identifier": "c2", "title": ["Two", "Deux"], "stars": 4.5}
        ]}"#;
        let l: CollectionListing = decode_object(body).unwrap();
        assert_eq!(l.num_found, 37);
        assert_eq!(l.docs.len(), 2);
        assert_eq!(l.docs[1].title, "Two\nDeux");
        assert_eq!(l.docs[1].stars, Some(4.5));
    }

    #[test]
    fn test_missing_docs_is_malformed() {
        let err = decode_object::<CollectionListing>(br#"{"numFound": 3}"#).unwrap_err();
        assert!(err.is_malformed(), "{err:?}");
        let err = decode_object::<CollectionListing>(b"<html>oops</html>").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_video_listing_must_be_an_object() {
        let err = decode_object::<VideoListing>(b"[]").unwrap_err();
        assert_eq!(
            err,
            FetchError::Malformed("expected a JSON object, got an array".into())
        );
        let empty: VideoListing = decode_object(b"{}").unwrap();
        assert!(empty.into_videos().is_empty());
    }

    #[test]
    fn test_decode_video_detail() {
        let body = br#"{
            "identifier": "abc123",
            "title": "Evening",
            "date": "2019-04-02T00:00:00Z",
            "subject": ["news", "tv"],
            "playback_urls": [{"format": "MPEG4", "url": "https://archive.org/download/abc123/a.mp4"}],
            "metadata": {"runtime": "00:30:00"}
        }"#;
        let v: Video = decode_object(body).unwrap();
        assert_eq!(v.playback_urls[0].format, "MPEG4");
        assert_eq!(v.metadata["runtime"], "00:30:00");
        assert!(v.published().is_some());
    }
}

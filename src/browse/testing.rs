//! In-memory data sources for controller tests.

use super::query::{CollectionQuery, VideoQuery};
use crate::archive::models::{Collection, CollectionListing, Video, VideoListing};
use crate::archive::{DataSource, FetchError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

pub fn collection(id: &str) -> Collection {
    serde_json::from_value(serde_json::json!({"identifier": id, "title": format!("Title {id}")}))
        .unwrap()
}

pub fn video(id: &str) -> Video {
    serde_json::from_value(serde_json::json!({"identifier": id, "title": format!("Video {id}")}))
        .unwrap()
}

pub fn collections(prefix: &str, n: usize, num_found: u64) -> CollectionListing {
    CollectionListing {
        num_found,
        docs: (0..n).map(|i| collection(&format!("{prefix}{i}"))).collect(),
    }
}

/// Answers immediately from fixed tables keyed by pattern, collection id and
/// video id. Unknown keys answer HTTP 404.
#[derive(Default)]
pub struct StubSource {
    pub collections: HashMap<String, Result<CollectionListing, FetchError>>,
    pub videos: HashMap<String, Result<VideoListing, FetchError>>,
    pub details: HashMap<String, Result<Video, FetchError>>,
    calls: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn not_found<T>() -> Result<T, FetchError> {
    Err(FetchError::Status { status: 404 })
}

#[async_trait]
impl DataSource for StubSource {
    async fn list_collections(
        &self,
        query: &CollectionQuery,
    ) -> Result<CollectionListing, FetchError> {
        let pattern = query.pattern.clone().unwrap_or_default();
        self.record(format!("explore {pattern} page={} sort={}", query.page, query.sort));
        self.collections.get(&pattern).cloned().unwrap_or_else(not_found)
    }

    async fn list_videos(
        &self,
        collection_id: &str,
        query: &VideoQuery,
    ) -> Result<VideoListing, FetchError> {
        self.record(format!(
            "collection {collection_id} page={} sort={}",
            query.page, query.sort
        ));
        self.videos.get(collection_id).cloned().unwrap_or_else(not_found)
    }

    async fn video_detail(&self, identifier: &str) -> Result<Video, FetchError> {
        self.record(format!("video {identifier}"));
        self.details.get(identifier).cloned().unwrap_or_else(not_found)
    }
}

enum Gate {
    Collections {
        pattern: String,
        tx: oneshot::Sender<Result<CollectionListing, FetchError>>,
    },
    Detail {
        identifier: String,
        tx: oneshot::Sender<Result<Video, FetchError>>,
    },
}

/// Holds every call open until the test releases it, so completions can be
/// delivered in any order.
#[derive(Default)]
pub struct GatedSource {
    gates: Mutex<Vec<Gate>>,
}

impl GatedSource {
    pub async fn wait_for_calls(&self, n: usize) {
        while self.gates.lock().unwrap().len() < n {
            tokio::task::yield_now().await;
        }
    }

    pub fn release_collections(&self, pattern: &str, result: Result<CollectionListing, FetchError>) {
        let mut gates = self.gates.lock().unwrap();
        let idx = gates
            .iter()
            .position(|g| matches!(g, Gate::Collections { pattern: p, .. } if p == pattern))
            .expect("no pending explore call for pattern");
        if let Gate::Collections { tx, .. } = gates.remove(idx) {
            let _ = tx.send(result);
        }
    }

    pub fn release_detail(&self, identifier: &str, result: Result<Video, FetchError>) {
        let mut gates = self.gates.lock().unwrap();
        let idx = gates
            .iter()
            .position(|g| matches!(g, Gate::Detail { identifier: i, .. } if i == identifier))
            .expect("no pending detail call for identifier");
        if let Gate::Detail { tx, .. } = gates.remove(idx) {
            let _ = tx.send(result);
        }
    }
}

fn gate_closed<T>(_: oneshot::error::RecvError) -> Result<T, FetchError> {
    Err(FetchError::Transport("gate dropped".into()))
}

#[async_trait]
impl DataSource for GatedSource {
    async fn list_collections(
        &self,
        query: &CollectionQuery,
    ) -> Result<CollectionListing, FetchError> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push(Gate::Collections {
            pattern: query.pattern.clone().unwrap_or_default(),
            tx,
        });
        rx.await.unwrap_or_else(gate_closed)
    }

    async fn list_videos(
        &self,
        _collection_id: &str,
        _query: &VideoQuery,
    ) -> Result<VideoListing, FetchError> {
        Ok(VideoListing::default())
    }

    async fn video_detail(&self, identifier: &str) -> Result<Video, FetchError> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push(Gate::Detail {
            identifier: identifier.to_string(),
            tx,
        });
        rx.await.unwrap_or_else(gate_closed)
    }
}

use super::fetch::RequestSeq;
use super::query::{CollectionQuery, VideoQuery};
use crate::archive::models::{CollectionListing, Video, VideoListing};
use crate::archive::{DataSource, FetchError};

/// A fetch the navigator wants performed. Carries everything needed to run it
/// off the controller and route the answer back.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Collections {
        seq: RequestSeq,
        query: CollectionQuery,
    },
    Videos {
        seq: RequestSeq,
        collection_id: String,
        query: VideoQuery,
    },
    Detail {
        seq: RequestSeq,
        identifier: String,
    },
}

impl Request {
    pub fn seq(&self) -> RequestSeq {
        match self {
            Request::Collections { seq, .. }
            | Request::Videos { seq, .. }
            | Request::Detail { seq, .. } => *seq,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Response {
    Collections {
        seq: RequestSeq,
        result: Result<CollectionListing, FetchError>,
    },
    Videos {
        seq: RequestSeq,
        collection_id: String,
        result: Result<VideoListing, FetchError>,
    },
    Detail {
        seq: RequestSeq,
        identifier: String,
        result: Result<Video, FetchError>,
    },
}

impl Response {
    pub fn seq(&self) -> RequestSeq {
        match self {
            Response::Collections { seq, .. }
            | Response::Videos { seq, .. }
            | Response::Detail { seq, .. } => *seq,
        }
    }
}

/// Run one request against the data source. This is the only place browsing
/// suspends.
pub async fn execute(source: &dyn DataSource, request: Request) -> Response {
    tracing::debug!(seq = request.seq().get(), ?request, "executing request");
    match request {
        Request::Collections { seq, query } => Response::Collections {
            seq,
            result: source.list_collections(&query).await,
        },
        Request::Videos {
            seq,
            collection_id,
            query,
        } => {
            let result = source.list_videos(&collection_id, &query).await;
            Response::Videos {
                seq,
                collection_id,
                result,
            }
        }
        Request::Detail { seq, identifier } => {
            let result = source.video_detail(&identifier).await;
            Response::Detail {
                seq,
                identifier,
                result,
            }
        }
    }
}

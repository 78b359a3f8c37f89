use super::query::total_pages;
use crate::archive::FetchError;
use crate::archive::models::{Collection, CollectionListing, Video, VideoListing};

/// Identity of one issued request.
///
/// Numbers come from a single [`SeqCounter`] so they increase across every
/// context; a completion is applied only while its number is the latest one
/// issued for the context it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct SeqCounter {
    last: u64,
}

impl SeqCounter {
    pub fn next(&mut self) -> RequestSeq {
        self.last += 1;
        RequestSeq(self.last)
    }
}

/// What happened to a completed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Applied,
    /// Superseded or abandoned; dropped without touching state.
    Discarded,
}

/// A successful, non-empty page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    /// Matching items across all pages, when the backend reports it.
    pub total_count: Option<u64>,
    pub page_size: u32,
    pub context_title: Option<String>,
}

impl<T> PageResult<T> {
    /// Without a reported total the listing is treated as a single page.
    pub fn total_pages(&self) -> u32 {
        match self.total_count {
            Some(total) => total_pages(total, self.page_size).max(1),
            None => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Loading,
    Success(PageResult<T>),
    Empty,
    Error(FetchError),
}

impl<T> FetchOutcome<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchOutcome::Loading)
    }

    pub fn items(&self) -> &[T] {
        match self {
            FetchOutcome::Success(page) => &page.items,
            _ => &[],
        }
    }
}

/// A listing as the controllers see it, independent of the endpoint shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total_count: Option<u64>,
    pub title: Option<String>,
}

impl From<CollectionListing> for Listing<Collection> {
    fn from(l: CollectionListing) -> Self {
        Self {
            items: l.docs,
            total_count: Some(l.num_found),
            title: None,
        }
    }
}

impl From<VideoListing> for Listing<Video> {
    fn from(l: VideoListing) -> Self {
        let title = l.title.clone();
        Self {
            items: l.into_videos(),
            // The video endpoint has no reliable total.
            total_count: None,
            title,
        }
    }
}

/// Owns the single authoritative request of one context and the classified
/// outcome it produced.
#[derive(Debug)]
pub struct FetchController<T> {
    label: &'static str,
    page_size: u32,
    latest: Option<RequestSeq>,
    outcome: FetchOutcome<T>,
    context_title: Option<String>,
}

impl<T> FetchController<T> {
    pub fn new(label: &'static str, page_size: u32) -> Self {
        Self {
            label,
            page_size,
            latest: None,
            outcome: FetchOutcome::Loading,
            context_title: None,
        }
    }

    pub fn outcome(&self) -> &FetchOutcome<T> {
        &self.outcome
    }

    /// Title reported by the most recent applied response that carried one.
    pub fn context_title(&self) -> Option<&str> {
        self.context_title.as_deref()
    }

    /// Make `seq` the authoritative request and drop whatever was shown.
    pub fn begin(&mut self, seq: RequestSeq) {
        if let Some(prev) = self.latest
            && self.outcome.is_loading()
        {
            tracing::debug!(context = self.label, superseded = prev.get(), by = seq.get(), "request superseded");
        }
        self.latest = Some(seq);
        self.outcome = FetchOutcome::Loading;
    }

    /// Stop accepting the in-flight request, if any. The current outcome stays.
    pub fn abandon(&mut self) {
        if let Some(seq) = self.latest.take() {
            tracing::debug!(context = self.label, seq = seq.get(), "request abandoned");
        }
    }

    pub fn complete(
        &mut self,
        seq: RequestSeq,
        result: Result<Listing<T>, FetchError>,
    ) -> Disposition {
        if self.latest != Some(seq) {
            tracing::debug!(
                context = self.label,
                seq = seq.get(),
                latest = self.latest.map(RequestSeq::get),
                "discarding stale response"
            );
            return Disposition::Discarded;
        }

        self.outcome = match result {
            Err(e) => {
                if e.is_malformed() {
                    tracing::warn!(context = self.label, kind = "malformed", error = %e, "unexpected response shape");
                } else {
                    tracing::warn!(context = self.label, kind = e.kind(), error = %e, "fetch failed");
                }
                FetchOutcome::Error(e)
            }
            Ok(listing) => {
                if listing.title.is_some() {
                    self.context_title = listing.title;
                }
                if listing.items.is_empty() {
                    FetchOutcome::Empty
                } else {
                    FetchOutcome::Success(PageResult {
                        items: listing.items,
                        total_count: listing.total_count,
                        page_size: self.page_size,
                        context_title: self.context_title.clone(),
                    })
                }
            }
        };
        Disposition::Applied
    }
}

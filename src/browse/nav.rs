use super::detail::{DetailController, DetailState};
use super::fetch::{Disposition, FetchController, FetchOutcome, Listing, SeqCounter};
use super::query::{
    COLLECTION_PAGE_SIZE, CollectionSort, FilterChange, QueryError, QueryState, SortKey,
    VIDEO_PAGE_SIZE, VideoSort,
};
use super::request::{Request, Response, execute};
use crate::archive::DataSource;
use crate::archive::models::{Collection, Video};

pub const DETAIL_ERROR_MESSAGE: &str = "Error loading video details. Please try again later.";

/// A browsing scope. Each owns one query and one fetch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    Root,
    CollectionVideos(String),
}

impl Context {
    pub fn empty_message(&self) -> &'static str {
        match self {
            Context::Root => "No items found for this search",
            Context::CollectionVideos(_) => "No videos found in this collection",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Context::Root => "Error loading collections. Please try again later.",
            Context::CollectionVideos(_) => "Error loading videos. Please try again later.",
        }
    }
}

/// A list item the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Collection(String),
    Video(String),
}

/// A filter edit, typed by the context it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Pattern(String),
    CollectionSort(CollectionSort),
    VideoSort(VideoSort),
}

#[derive(Debug)]
pub struct VideosContext {
    collection_id: String,
    query: QueryState<VideoSort>,
    fetch: FetchController<Video>,
}

impl VideosContext {
    fn new(collection_id: &str) -> Self {
        Self {
            collection_id: collection_id.to_string(),
            query: QueryState::videos(),
            fetch: FetchController::new("videos", VIDEO_PAGE_SIZE),
        }
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub fn query(&self) -> &QueryState<VideoSort> {
        &self.query
    }

    pub fn outcome(&self) -> &FetchOutcome<Video> {
        self.fetch.outcome()
    }

    /// Title reported by the backend, falling back to a generic label.
    pub fn title(&self) -> &str {
        self.fetch.context_title().unwrap_or("Collection")
    }
}

/// Command surface of the browser: every user intent goes through one of these
/// methods, which update state and hand back the request to run.
///
/// Completions come back through [`Navigator::apply`]. Nothing here suspends;
/// the caller decides how requests are executed.
#[derive(Debug)]
pub struct Navigator {
    seqs: SeqCounter,
    root_query: QueryState<CollectionSort>,
    root_fetch: FetchController<Collection>,
    videos: Option<VideosContext>,
    detail: DetailController,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            seqs: SeqCounter::default(),
            root_query: QueryState::collections(),
            root_fetch: FetchController::new("collections", COLLECTION_PAGE_SIZE),
            videos: None,
            detail: DetailController::new(),
        }
    }

    pub fn context(&self) -> Context {
        match &self.videos {
            Some(v) => Context::CollectionVideos(v.collection_id.clone()),
            None => Context::Root,
        }
    }

    pub fn root_query(&self) -> &QueryState<CollectionSort> {
        &self.root_query
    }

    pub fn root_outcome(&self) -> &FetchOutcome<Collection> {
        self.root_fetch.outcome()
    }

    pub fn videos(&self) -> Option<&VideosContext> {
        self.videos.as_ref()
    }

    pub fn detail(&self) -> &DetailState {
        self.detail.state()
    }

    /// User-facing line for the current context's Empty/Error outcome.
    pub fn status_message(&self) -> Option<&'static str> {
        let ctx = self.context();
        let (empty, error) = match &self.videos {
            Some(v) => (
                matches!(v.outcome(), FetchOutcome::Empty),
                matches!(v.outcome(), FetchOutcome::Error(_)),
            ),
            None => (
                matches!(self.root_outcome(), FetchOutcome::Empty),
                matches!(self.root_outcome(), FetchOutcome::Error(_)),
            ),
        };
        if error {
            Some(ctx.error_message())
        } else if empty {
            Some(ctx.empty_message())
        } else {
            None
        }
    }

    /// Initial load of whatever context is current.
    pub fn start(&mut self) -> Request {
        self.issue_current()
    }

    /// Re-issue the current query unchanged.
    pub fn retry(&mut self) -> Request {
        self.issue_current()
    }

    pub fn set_filter(&mut self, filter: Filter) -> Result<Request, QueryError> {
        match (&mut self.videos, filter) {
            (None, Filter::Pattern(p)) => self.root_query.set_filter(FilterChange::Pattern(p))?,
            (None, Filter::CollectionSort(s)) => {
                self.root_query.set_filter(FilterChange::Sort(s))?
            }
            (Some(v), Filter::VideoSort(s)) => v.query.set_filter(FilterChange::Sort(s))?,
            (Some(v), Filter::Pattern(p)) => v.query.set_filter(FilterChange::Pattern(p))?,
            (None, Filter::VideoSort(_)) | (Some(_), Filter::CollectionSort(_)) => {
                return Err(QueryError::SortMismatch);
            }
        }
        Ok(self.issue_current())
    }

    /// Set the sort from its wire value, interpreted for the current context.
    pub fn set_sort(&mut self, raw: &str) -> Result<Request, QueryError> {
        let filter = match self.videos {
            Some(_) => Filter::VideoSort(raw.parse()?),
            None => Filter::CollectionSort(raw.parse()?),
        };
        self.set_filter(filter)
    }

    pub fn cycle_sort(&mut self) -> Request {
        let filter = match &self.videos {
            Some(v) => Filter::VideoSort(v.query.sort().cycle()),
            None => Filter::CollectionSort(self.root_query.sort().cycle()),
        };
        match self.set_filter(filter) {
            Ok(req) => req,
            // A sort matching the context is always accepted.
            Err(_) => self.issue_current(),
        }
    }

    pub fn set_page(&mut self, page: u32) -> Result<Request, QueryError> {
        match &mut self.videos {
            Some(v) => v.query.set_page(page)?,
            None => self.root_query.set_page(page)?,
        }
        Ok(self.issue_current())
    }

    pub fn next_page(&mut self) -> Result<Request, QueryError> {
        match &mut self.videos {
            Some(v) => v.query.next_page()?,
            None => self.root_query.next_page()?,
        }
        Ok(self.issue_current())
    }

    pub fn prev_page(&mut self) -> Result<Request, QueryError> {
        match &mut self.videos {
            Some(v) => v.query.prev_page()?,
            None => self.root_query.prev_page()?,
        }
        Ok(self.issue_current())
    }

    /// Collections switch context; videos open the detail overlay and leave the
    /// list untouched. A selection that does not belong to the current context
    /// is ignored.
    pub fn select(&mut self, selection: Selection) -> Option<Request> {
        match (self.videos.is_some(), selection) {
            (false, Selection::Collection(id)) => Some(self.enter_collection(&id)),
            (true, Selection::Video(id)) => Some(self.open_detail(&id)),
            (_, selection) => {
                tracing::debug!(?selection, context = ?self.context(), "selection ignored");
                None
            }
        }
    }

    /// Switch to a collection's video list with a fresh query.
    pub fn enter_collection(&mut self, collection_id: &str) -> Request {
        self.root_fetch.abandon();
        self.detail.close();
        tracing::info!(collection = collection_id, "entering collection");
        self.videos = Some(VideosContext::new(collection_id));
        self.issue_current()
    }

    /// Back to the collection list with its previous query. `None` when already
    /// there.
    pub fn go_home(&mut self) -> Option<Request> {
        let left = self.videos.take()?;
        self.detail.close();
        tracing::info!(collection = %left.collection_id, "returning to collection list");
        Some(self.issue_current())
    }

    pub fn open_detail(&mut self, identifier: &str) -> Request {
        let seq = self.seqs.next();
        self.detail.open(seq, identifier);
        Request::Detail {
            seq,
            identifier: identifier.to_string(),
        }
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    pub fn apply(&mut self, response: Response) -> Disposition {
        match response {
            Response::Collections { seq, result } => {
                self.root_fetch.complete(seq, result.map(Listing::from))
            }
            Response::Videos {
                seq,
                collection_id,
                result,
            } => match &mut self.videos {
                Some(v) if v.collection_id == collection_id => {
                    v.fetch.complete(seq, result.map(Listing::from))
                }
                _ => {
                    tracing::debug!(
                        seq = seq.get(),
                        collection = %collection_id,
                        "discarding response for a context no longer shown"
                    );
                    Disposition::Discarded
                }
            },
            Response::Detail {
                seq,
                identifier,
                result,
            } => self.detail.complete(seq, &identifier, result),
        }
    }

    /// Run one request to completion and apply it.
    pub async fn dispatch(&mut self, source: &dyn DataSource, request: Request) -> Disposition {
        let response = execute(source, request).await;
        self.apply(response)
    }

    fn issue_current(&mut self) -> Request {
        let seq = self.seqs.next();
        match &mut self.videos {
            Some(v) => {
                v.fetch.begin(seq);
                Request::Videos {
                    seq,
                    collection_id: v.collection_id.clone(),
                    query: v.query.query().clone(),
                }
            }
            None => {
                self.root_fetch.begin(seq);
                Request::Collections {
                    seq,
                    query: self.root_query.query().clone(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::FetchError;
    use crate::archive::models::VideoListing;
    use crate::browse::testing::{GatedSource, StubSource, collections, video};
    use std::sync::Arc;

    fn films(title: &str, ids: &[&str]) -> VideoListing {
        VideoListing {
            title: Some(title.to_string()),
            films: Some(ids.iter().map(|id| video(id)).collect()),
            docs: None,
        }
    }

    #[tokio::test]
    async fn test_root_listing_pages() {
        let mut source = StubSource::default();
        source
            .collections
            .insert("*".into(), Ok(collections("c", 12, 37)));
        let mut nav = Navigator::new();

        let req = nav.start();
        assert!(nav.root_outcome().is_loading());
        assert_eq!(nav.dispatch(&source, req).await, Disposition::Applied);

        match nav.root_outcome() {
            FetchOutcome::Success(page) => {
                assert_eq!(page.items.len(), 12);
                assert_eq!(page.total_pages(), 4);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(source.calls(), vec!["explore * page=1 sort=stars desc"]);
    }

    #[tokio::test]
    async fn test_zero_found_is_empty() {
        let mut source = StubSource::default();
        source
            .collections
            .insert("nothing".into(), Ok(collections("c", 0, 0)));
        let mut nav = Navigator::new();
        let req = nav.set_filter(Filter::Pattern("nothing".into())).unwrap();
        nav.dispatch(&source, req).await;
        assert_eq!(nav.root_outcome(), &FetchOutcome::Empty);
        assert_eq!(nav.status_message(), Some("No items found for this search"));
    }

    #[tokio::test]
    async fn test_select_collection_enters_fresh_context() {
        let mut source = StubSource::default();
        source
            .collections
            .insert("*".into(), Ok(collections("c", 3, 3)));
        source.videos.insert(
            "TV-FOXNEWSW".into(),
            Ok(films("Fox News West", &["v1", "v2", "v3", "v4", "v5"])),
        );
        let mut nav = Navigator::new();
        let req = nav.start();
        nav.dispatch(&source, req).await;

        let req = nav
            .select(Selection::Collection("TV-FOXNEWSW".into()))
            .unwrap();
        assert_eq!(nav.context(), Context::CollectionVideos("TV-FOXNEWSW".into()));
        let videos = nav.videos().unwrap();
        assert_eq!(videos.query().page(), 1);
        assert_eq!(videos.query().sort(), VideoSort::DateDesc);

        nav.dispatch(&source, req).await;
        let videos = nav.videos().unwrap();
        assert_eq!(videos.outcome().items().len(), 5);
        assert_eq!(videos.title(), "Fox News West");
        match videos.outcome() {
            FetchOutcome::Success(page) => assert_eq!(page.total_pages(), 1),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_video_listing_still_sets_title() {
        let mut source = StubSource::default();
        source.videos.insert(
            "X1".into(),
            Ok(VideoListing {
                title: Some("X".into()),
                films: Some(Vec::new()),
                docs: Some(Vec::new()),
            }),
        );
        let mut nav = Navigator::new();
        let req = nav.enter_collection("X1");
        nav.dispatch(&source, req).await;
        let videos = nav.videos().unwrap();
        assert_eq!(videos.outcome(), &FetchOutcome::Empty);
        assert_eq!(videos.title(), "X");
        assert_eq!(
            nav.status_message(),
            Some("No videos found in this collection")
        );
    }

    #[tokio::test]
    async fn test_detail_error_then_success() {
        let mut source = StubSource::default();
        source.details.insert(
            "abc123".into(),
            Err(FetchError::Transport("connection reset".into())),
        );
        source.details.insert("def456".into(), Ok(video("def456")));
        let mut nav = Navigator::new();
        nav.enter_collection("TV-FOXNEWSW");

        let req = nav.select(Selection::Video("abc123".into())).unwrap();
        nav.dispatch(&source, req).await;
        match nav.detail() {
            DetailState::Error { identifier, .. } => assert_eq!(identifier, "abc123"),
            other => panic!("expected error, got {other:?}"),
        }

        let req = nav.select(Selection::Video("def456".into())).unwrap();
        nav.dispatch(&source, req).await;
        assert_eq!(nav.detail(), &DetailState::Ready(video("def456")));
    }

    #[tokio::test]
    async fn test_video_selection_keeps_list_context() {
        let mut source = StubSource::default();
        source
            .videos
            .insert("C".into(), Ok(films("C", &["v1", "v2"])));
        let mut nav = Navigator::new();
        let req = nav.enter_collection("C");
        nav.dispatch(&source, req).await;
        let req = nav.next_page().unwrap();
        nav.dispatch(&source, req).await;

        nav.select(Selection::Video("v1".into())).unwrap();
        assert_eq!(nav.context(), Context::CollectionVideos("C".into()));
        let videos = nav.videos().unwrap();
        assert_eq!(videos.query().page(), 2);
        assert_eq!(videos.outcome().items().len(), 2);
        assert!(nav.detail().is_open());
    }

    #[test]
    fn test_go_home_restores_root_query() {
        let mut nav = Navigator::new();
        nav.set_filter(Filter::Pattern("TV-*".into())).unwrap();
        nav.set_sort("files_count asc").unwrap();
        nav.set_page(3).unwrap();

        nav.enter_collection("TV-FOXNEWSW");
        assert!(nav.select(Selection::Collection("other".into())).is_none());

        let req = nav.go_home().unwrap();
        assert_eq!(nav.context(), Context::Root);
        match req {
            Request::Collections { query, .. } => {
                assert_eq!(query.pattern.as_deref(), Some("TV-*"));
                assert_eq!(query.sort, CollectionSort::FilesCountAsc);
                assert_eq!(query.page, 3);
            }
            other => panic!("expected collections request, got {other:?}"),
        }
        assert!(nav.go_home().is_none());
    }

    #[test]
    fn test_sort_must_match_context() {
        let mut nav = Navigator::new();
        assert_eq!(
            nav.set_filter(Filter::VideoSort(VideoSort::TitleAsc)),
            Err(QueryError::SortMismatch)
        );
        nav.enter_collection("C");
        assert!(matches!(
            nav.set_sort("stars desc"),
            Err(QueryError::UnknownSort(_))
        ));
        assert_eq!(
            nav.set_filter(Filter::Pattern("x".into())),
            Err(QueryError::PatternUnsupported)
        );
        assert!(nav.set_sort("title desc").is_ok());
        assert_eq!(nav.videos().unwrap().query().sort(), VideoSort::TitleDesc);
    }

    #[test]
    fn test_completion_for_left_context_is_discarded() {
        let mut nav = Navigator::new();
        let old = nav.enter_collection("A");
        nav.go_home();
        // Same collection again: a new incarnation with its own sequence numbers.
        nav.enter_collection("A");

        let Request::Videos { seq, collection_id, .. } = old else {
            panic!("expected videos request");
        };
        let disposition = nav.apply(Response::Videos {
            seq,
            collection_id,
            result: Ok(films("stale", &["old"])),
        });
        assert_eq!(disposition, Disposition::Discarded);
        assert!(nav.videos().unwrap().outcome().is_loading());
    }

    #[test]
    fn test_root_completion_after_leaving_is_discarded() {
        let mut nav = Navigator::new();
        let req = nav.start();
        nav.enter_collection("A");
        let disposition = nav.apply(Response::Collections {
            seq: req.seq(),
            result: Ok(collections("c", 2, 2)),
        });
        assert_eq!(disposition, Disposition::Discarded);
    }

    #[tokio::test]
    async fn test_out_of_order_completions_keep_latest_query() {
        let source = Arc::new(GatedSource::default());
        let mut nav = Navigator::new();

        let first = nav.start();
        let second = nav.set_filter(Filter::Pattern("TV-*".into())).unwrap();

        let s1 = source.clone();
        let h1 = tokio::spawn(async move { execute(s1.as_ref(), first).await });
        let s2 = source.clone();
        let h2 = tokio::spawn(async move { execute(s2.as_ref(), second).await });
        source.wait_for_calls(2).await;

        // The later query answers first; the earlier one straggles in after.
        source.release_collections("TV-*", Ok(collections("tv", 2, 2)));
        let late = h2.await.unwrap();
        source.release_collections("*", Ok(collections("all", 12, 500)));
        let early = h1.await.unwrap();

        assert_eq!(nav.apply(late), Disposition::Applied);
        assert_eq!(nav.apply(early), Disposition::Discarded);
        let items = nav.root_outcome().items();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|c| c.identifier.starts_with("tv")));
    }

    #[tokio::test]
    async fn test_second_detail_open_wins() {
        let source = Arc::new(GatedSource::default());
        let mut nav = Navigator::new();
        nav.enter_collection("C");

        let first = nav.select(Selection::Video("one".into())).unwrap();
        let second = nav.select(Selection::Video("two".into())).unwrap();
        let s1 = source.clone();
        let h1 = tokio::spawn(async move { execute(s1.as_ref(), first).await });
        let s2 = source.clone();
        let h2 = tokio::spawn(async move { execute(s2.as_ref(), second).await });
        source.wait_for_calls(2).await;

        source.release_detail("two", Ok(video("two")));
        source.release_detail("one", Ok(video("one")));
        let r2 = h2.await.unwrap();
        let r1 = h1.await.unwrap();

        // Apply in the worst order: the superseded answer last.
        assert_eq!(nav.apply(r2), Disposition::Applied);
        assert_eq!(nav.apply(r1), Disposition::Discarded);
        assert_eq!(nav.detail().identifier(), Some("two"));
    }

    #[tokio::test]
    async fn test_error_message_and_retry() {
        let mut source = StubSource::default();
        let mut nav = Navigator::new();
        let req = nav.start();
        nav.dispatch(&source, req).await;
        assert!(matches!(nav.root_outcome(), FetchOutcome::Error(_)));
        assert_eq!(
            nav.status_message(),
            Some("Error loading collections. Please try again later.")
        );

        source
            .collections
            .insert("*".into(), Ok(collections("c", 1, 1)));
        let req = nav.retry();
        nav.dispatch(&source, req).await;
        assert_eq!(nav.root_outcome().items().len(), 1);
        assert_eq!(nav.status_message(), None);
        assert_eq!(source.calls().len(), 2);
    }
}

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rows requested per collection-list page.
pub const COLLECTION_PAGE_SIZE: u32 = 12;
/// Videos requested per collection page.
pub const VIDEO_PAGE_SIZE: u32 = 5;
/// Collection pattern matching every collection.
pub const ALL_COLLECTIONS: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("page must be 1 or greater (got {0})")]
    InvalidPage(u32),

    #[error("this view is scoped by its collection and has no name filter")]
    PatternUnsupported,

    #[error("sort key does not apply to the current view")]
    SortMismatch,

    #[error("unknown sort key: {0:?}")]
    UnknownSort(String),
}

/// A sort key accepted by one of the listing endpoints.
pub trait SortKey:
    Copy + Default + Eq + fmt::Debug + fmt::Display + FromStr<Err = QueryError> + Send + Sync + 'static
{
    /// Every key, in menu order.
    const ALL: &'static [Self];

    /// Wire value, e.g. `"stars desc"`.
    fn as_str(self) -> &'static str;

    fn label(self) -> &'static str;

    /// Next key in menu order, wrapping around.
    fn cycle(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionSort {
    #[default]
    StarsDesc,
    StarsAsc,
    NumReviewsDesc,
    NumReviewsAsc,
    FilesCountDesc,
    FilesCountAsc,
}

impl SortKey for CollectionSort {
    const ALL: &'static [Self] = &[
        CollectionSort::StarsDesc,
        CollectionSort::StarsAsc,
        CollectionSort::NumReviewsDesc,
        CollectionSort::NumReviewsAsc,
        CollectionSort::FilesCountDesc,
        CollectionSort::FilesCountAsc,
    ];

    fn as_str(self) -> &'static str {
        match self {
            CollectionSort::StarsDesc => "stars desc",
            CollectionSort::StarsAsc => "stars asc",
            CollectionSort::NumReviewsDesc => "num_reviews desc",
            CollectionSort::NumReviewsAsc => "num_reviews asc",
            CollectionSort::FilesCountDesc => "files_count desc",
            CollectionSort::FilesCountAsc => "files_count asc",
        }
    }

    fn label(self) -> &'static str {
        match self {
            CollectionSort::StarsDesc => "Stars Desc",
            CollectionSort::StarsAsc => "Stars Asc",
            CollectionSort::NumReviewsDesc => "Num Reviews Desc",
            CollectionSort::NumReviewsAsc => "Num Reviews Asc",
            CollectionSort::FilesCountDesc => "Files Count Desc",
            CollectionSort::FilesCountAsc => "Files Count Asc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoSort {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey for VideoSort {
    const ALL: &'static [Self] = &[
        VideoSort::DateDesc,
        VideoSort::DateAsc,
        VideoSort::TitleAsc,
        VideoSort::TitleDesc,
    ];

    fn as_str(self) -> &'static str {
        match self {
            VideoSort::DateDesc => "date desc",
            VideoSort::DateAsc => "date asc",
            VideoSort::TitleAsc => "title asc",
            VideoSort::TitleDesc => "title desc",
        }
    }

    fn label(self) -> &'static str {
        match self {
            VideoSort::DateDesc => "Date (Newest)",
            VideoSort::DateAsc => "Date (Oldest)",
            VideoSort::TitleAsc => "Title (A-Z)",
            VideoSort::TitleDesc => "Title (Z-A)",
        }
    }
}

fn parse_sort<S: SortKey>(s: &str) -> Result<S, QueryError> {
    // Accept both "stars desc" and the URL-ish "stars+desc".
    let wanted = s.trim().replace('+', " ");
    S::ALL
        .iter()
        .copied()
        .find(|k| k.as_str().eq_ignore_ascii_case(&wanted))
        .ok_or_else(|| QueryError::UnknownSort(s.to_string()))
}

impl FromStr for CollectionSort {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sort(s)
    }
}

impl FromStr for VideoSort {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sort(s)
    }
}

impl fmt::Display for CollectionSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for VideoSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parameters of one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<S> {
    pub page: u32,
    pub sort: S,
    /// Collection-name pattern; `None` for views scoped by a parent collection.
    pub pattern: Option<String>,
}

pub type CollectionQuery = Query<CollectionSort>;
pub type VideoQuery = Query<VideoSort>;

/// A change to one filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange<S> {
    Pattern(String),
    Sort(S),
}

/// Filter, sort and page for one browsing context.
///
/// Only `set_filter` and `set_page` (and the page helpers built on it) mutate
/// the query; every filter change sends the user back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<S> {
    query: Query<S>,
}

impl QueryState<CollectionSort> {
    /// Root context defaults: every collection, most starred first.
    pub fn collections() -> Self {
        Self::new(Some(ALL_COLLECTIONS.to_string()))
    }
}

impl QueryState<VideoSort> {
    /// Fresh state for a collection's video list: newest first.
    pub fn videos() -> Self {
        Self::new(None)
    }
}

impl<S: SortKey> QueryState<S> {
    fn new(pattern: Option<String>) -> Self {
        Self {
            query: Query {
                page: 1,
                sort: S::default(),
                pattern,
            },
        }
    }

    pub fn query(&self) -> &Query<S> {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    pub fn sort(&self) -> S {
        self.query.sort
    }

    pub fn pattern(&self) -> Option<&str> {
        self.query.pattern.as_deref()
    }

    pub fn set_filter(&mut self, change: FilterChange<S>) -> Result<(), QueryError> {
        match change {
            FilterChange::Pattern(p) => {
                if self.query.pattern.is_none() {
                    return Err(QueryError::PatternUnsupported);
                }
                let p = p.trim();
                let p = if p.is_empty() { ALL_COLLECTIONS } else { p };
                self.query.pattern = Some(p.to_string());
            }
            FilterChange::Sort(s) => self.query.sort = s,
        }
        self.query.page = 1;
        Ok(())
    }

    /// Pages past the end are not rejected here; the backend answers them with
    /// an empty listing.
    pub fn set_page(&mut self, page: u32) -> Result<(), QueryError> {
        if page == 0 {
            return Err(QueryError::InvalidPage(page));
        }
        self.query.page = page;
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<(), QueryError> {
        self.set_page(self.query.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Result<(), QueryError> {
        self.set_page(self.query.page - 1)
    }
}

/// Number of pages needed to show `total` items, `page_size` at a time.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

use super::fetch::{Disposition, RequestSeq};
use crate::archive::FetchError;
use crate::archive::models::Video;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Closed,
    Loading { identifier: String },
    Ready(Video),
    Error { identifier: String, error: FetchError },
}

impl DetailState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DetailState::Closed)
    }

    /// Identifier of the video being shown or fetched.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            DetailState::Closed => None,
            DetailState::Loading { identifier } | DetailState::Error { identifier, .. } => {
                Some(identifier.as_str())
            }
            DetailState::Ready(video) => Some(video.identifier.as_str()),
        }
    }
}

/// Detail overlay for one video. Lives independently of the list contexts:
/// every `open` is a fresh fetch and a later `open` supersedes an earlier one.
#[derive(Debug)]
pub struct DetailController {
    latest: Option<RequestSeq>,
    state: DetailState,
}

impl Default for DetailController {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailController {
    pub fn new() -> Self {
        Self {
            latest: None,
            state: DetailState::Closed,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn open(&mut self, seq: RequestSeq, identifier: &str) {
        self.latest = Some(seq);
        self.state = DetailState::Loading {
            identifier: identifier.to_string(),
        };
    }

    pub fn close(&mut self) {
        self.latest = None;
        self.state = DetailState::Closed;
    }

    pub fn complete(
        &mut self,
        seq: RequestSeq,
        identifier: &str,
        result: Result<Video, FetchError>,
    ) -> Disposition {
        if self.latest != Some(seq) {
            tracing::debug!(seq = seq.get(), identifier, "discarding stale detail response");
            return Disposition::Discarded;
        }
        self.state = match result {
            Ok(video) => DetailState::Ready(video),
            Err(error) => {
                if error.is_malformed() {
                    tracing::warn!(identifier, kind = "malformed", error = %error, "unexpected detail shape");
                } else {
                    tracing::warn!(identifier, kind = error.kind(), error = %error, "detail fetch failed");
                }
                DetailState::Error {
                    identifier: identifier.to_string(),
                    error,
                }
            }
        };
        Disposition::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::fetch::SeqCounter;

    fn video(id: &str) -> Video {
        serde_json::from_value(serde_json::json!({"identifier": id, "title": id})).unwrap()
    }

    #[test]
    fn test_error_then_fresh_open_replaces_cleanly() {
        let mut seqs = SeqCounter::default();
        let mut dc = DetailController::new();

        let s1 = seqs.next();
        dc.open(s1, "abc123");
        assert_eq!(
            dc.state(),
            &DetailState::Loading {
                identifier: "abc123".into()
            }
        );
        dc.complete(s1, "abc123", Err(FetchError::Transport("connection refused".into())));
        match dc.state() {
            DetailState::Error { identifier, .. } => assert_eq!(identifier, "abc123"),
            other => panic!("expected error, got {other:?}"),
        }

        let s2 = seqs.next();
        dc.open(s2, "def456");
        dc.complete(s2, "def456", Ok(video("def456")));
        assert_eq!(dc.state(), &DetailState::Ready(video("def456")));
    }

    #[test]
    fn test_second_open_supersedes_first() {
        let mut seqs = SeqCounter::default();
        let mut dc = DetailController::new();
        let s1 = seqs.next();
        dc.open(s1, "first");
        let s2 = seqs.next();
        dc.open(s2, "second");

        assert_eq!(dc.complete(s2, "second", Ok(video("second"))), Disposition::Applied);
        assert_eq!(
            dc.complete(s1, "first", Ok(video("first"))),
            Disposition::Discarded
        );
        assert_eq!(dc.state().identifier(), Some("second"));
    }

    #[test]
    fn test_close_drops_record_and_pending_fetch() {
        let mut seqs = SeqCounter::default();
        let mut dc = DetailController::new();
        let s1 = seqs.next();
        dc.open(s1, "abc");
        dc.close();
        assert_eq!(dc.complete(s1, "abc", Ok(video("abc"))), Disposition::Discarded);
        assert_eq!(dc.state(), &DetailState::Closed);
        assert!(!dc.state().is_open());
    }
}

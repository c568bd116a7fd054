use crate::backend::TweetSource;
use crate::error::BackendError;
use crate::post::{Post, TweetsResponse};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// A trimmed, non-empty handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| SearchQuery(trimmed.to_string()))
    }

    pub fn handle(&self) -> &str {
        &self.0
    }
}

/// What the backend reported for one successful query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    /// Server order, preserved verbatim.
    pub posts: Vec<Post>,
    /// More posts may show up on a later query.
    pub scanning: bool,
    pub first_time: bool,
    pub status_message: Option<String>,
}

impl From<TweetsResponse> for ScanReport {
    fn from(body: TweetsResponse) -> Self {
        ScanReport {
            posts: body.tweets.unwrap_or_default(),
            scanning: body.is_scanning,
            first_time: body.is_first_time,
            status_message: body.message.filter(|m| !m.is_empty()),
        }
    }
}

/// The state of the current search. Exactly one variant is active.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchResult {
    #[default]
    Idle,
    Loading,
    Failed {
        message: String,
    },
    Ready(ScanReport),
}

impl SearchResult {
    pub fn posts(&self) -> &[Post] {
        match self {
            SearchResult::Ready(report) => &report.posts,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchResult::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchResult::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self, SearchResult::Ready(report) if report.scanning)
    }

    pub fn status_message(&self) -> Option<&str> {
        match self {
            SearchResult::Ready(report) => report.status_message.as_deref(),
            _ => None,
        }
    }
}

/// Owns the lifecycle of one search at a time.
///
/// Every submission takes a generation number in the same critical section
/// that publishes `Loading`. An outcome is only published while its
/// generation is still the newest, so a slow stale response can never
/// overwrite a later search.
pub struct SearchController<S> {
    source: S,
    failure_message: String,
    generation: AtomicU64,
    state: watch::Sender<SearchResult>,
}

impl<S: TweetSource> SearchController<S> {
    pub fn new(source: S, failure_message: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SearchResult::Idle);
        Self {
            source,
            failure_message: failure_message.into(),
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn current(&self) -> SearchResult {
        self.state.borrow().clone()
    }

    /// Observe every transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<SearchResult> {
        self.state.subscribe()
    }

    /// Runs one search and returns the state visible once it settles.
    ///
    /// Blank input is a no-op and returns the current state untouched. A
    /// submission superseded by a newer one while in flight returns whatever
    /// is current at that point instead of its own outcome.
    pub async fn submit(&self, raw: &str) -> SearchResult {
        let Some(query) = SearchQuery::parse(raw) else {
            return self.current();
        };

        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SearchResult::Loading;
        });

        let handle = query.handle();
        let outcome = match self.source.fetch_tweets(handle).await {
            Ok(body) => {
                let report = ScanReport::from(body);
                tracing::info!(
                    handle,
                    posts = report.posts.len(),
                    scanning = report.scanning,
                    first_time = report.first_time,
                    "search finished"
                );
                SearchResult::Ready(report)
            }
            Err(BackendError::Status(status)) => {
                tracing::warn!(handle, status = status.as_u16(), "backend rejected search");
                self.failed()
            }
            Err(e) => {
                tracing::warn!(handle, error = %e, "search failed");
                self.failed()
            }
        };

        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = outcome.clone();
            true
        });

        if published {
            outcome
        } else {
            tracing::debug!(handle, generation, "discarding superseded result");
            self.current()
        }
    }

    fn failed(&self) -> SearchResult {
        SearchResult::Failed {
            message: self.failure_message.clone(),
        }
    }
}

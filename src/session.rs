//! Last-request-wins bookkeeping for repeated extraction runs.
//!
//! Every run takes a [`Ticket`] before it starts fetching. When it finishes,
//! its result is only published if no newer run has started in the meantime;
//! otherwise it is dropped as stale. A failed run that is still the latest
//! clears whatever snapshot was shown before.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use crate::document::DocumentNode;
use crate::error::ErrorPayload;
use crate::pipeline::{self, PipelineOptions, Snapshot};
use crate::Result;

/// Generation number handed out by [`Session::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// What the session currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Ready {
        ticket: Ticket,
        source: String,
        snapshot: Snapshot,
    },
    Failed {
        ticket: Ticket,
        source: String,
        error: ErrorPayload,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The result became the current state.
    Published(SessionState),
    /// A newer run started after this one; the result was discarded.
    Stale { ticket: Ticket, latest: Ticket },
}

#[derive(Debug, Default)]
pub struct Session {
    generation: AtomicU64,
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run; it supersedes every run started before it.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn latest(&self) -> Ticket {
        Ticket(self.generation.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest() == ticket
    }

    pub async fn current(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Publish the outcome of the run identified by `ticket`, unless it is stale.
    pub async fn complete(
        &self,
        ticket: Ticket,
        source: impl Into<String>,
        outcome: Result<Snapshot>,
    ) -> Completion {
        let mut state = self.state.write().await;
        let latest = self.latest();
        if ticket != latest {
            debug!(ticket = ticket.0, latest = latest.0, "discarding stale run");
            return Completion::Stale { ticket, latest };
        }

        let source = source.into();
        *state = match outcome {
            Ok(snapshot) => SessionState::Ready {
                ticket,
                source,
                snapshot,
            },
            Err(err) => SessionState::Failed {
                ticket,
                source,
                error: err.to_payload(),
            },
        };
        Completion::Published(state.clone())
    }

    /// Fetch `source` with `fetch`, run the pipeline and publish the result.
    ///
    /// The ticket is taken when `refresh` is called, not when the returned
    /// future is first polled, so call order decides which run is latest.
    pub fn refresh<'a, F, Fut>(
        &'a self,
        source: &'a str,
        options: &'a PipelineOptions,
        fetch: F,
    ) -> impl Future<Output = Completion> + 'a
    where
        F: FnOnce(String) -> Fut + 'a,
        Fut: Future<Output = Result<DocumentNode>> + 'a,
    {
        let ticket = self.begin();
        self.run_with(ticket, source, options, fetch)
    }

    /// Like [`Session::refresh`], for a ticket the caller already took.
    pub async fn run_with<F, Fut>(
        &self,
        ticket: Ticket,
        source: &str,
        options: &PipelineOptions,
        fetch: F,
    ) -> Completion
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<DocumentNode>>,
    {
        debug!(ticket = ticket.0, source, "run started");
        let outcome = fetch(source.to_string())
            .await
            .map(|document| pipeline::run(&document, options));
        self.complete(ticket, source, outcome).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FttError;
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn swatch_document(r: f64) -> DocumentNode {
        DocumentNode::from(json!({
            "document": {"name": "Colour block", "fills": [{"color": {"r": r, "g": 0, "b": 0}}]}
        }))
    }

    fn first_color(state: &SessionState) -> Option<String> {
        match state {
            SessionState::Ready { snapshot, .. } => {
                snapshot.colors.first().map(|c| c.color.clone())
            }
            _ => None,
        }
    }

    #[test]
    fn tickets_increase() {
        let session = Session::new();
        let a = session.begin();
        let b = session.begin();
        assert!(b > a);
        assert!(session.is_current(b));
        assert!(!session.is_current(a));
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let session = Session::new();
        let older = session.begin();
        let newer = session.begin();

        let published = session
            .complete(newer, "new", Ok(Snapshot::default()))
            .await;
        assert!(matches!(published, Completion::Published(_)));

        let stale = session
            .complete(older, "old", Err(FttError::Config("boom".into())))
            .await;
        assert_eq!(stale, Completion::Stale { ticket: older, latest: newer });

        match session.current().await {
            SessionState::Ready { source, ticket, .. } => {
                assert_eq!(source, "new");
                assert_eq!(ticket, newer);
            }
            other => panic!("expected ready state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_clears_previous_snapshot() {
        let session = Session::new();
        let first = session.begin();
        session.complete(first, "a", Ok(Snapshot::default())).await;

        let second = session.begin();
        session
            .complete(
                second,
                "b",
                Err(FttError::figma_api(None, "File not found")),
            )
            .await;

        match session.current().await {
            SessionState::Failed { error, source, .. } => {
                assert_eq!(source, "b");
                assert!(error.message.contains("File not found"));
            }
            other => panic!("expected failed state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_older_fetch_never_overwrites_newer_result() {
        let session = Session::new();
        let options = PipelineOptions::default();
        let (release_old, wait_old) = oneshot::channel::<()>();

        let old_run = session.refresh("old", &options, |_| async move {
            let _ = wait_old.await;
            Ok(swatch_document(1.0))
        });
        let new_run = async {
            // Let the old run take its ticket first.
            tokio::time::sleep(Duration::from_millis(20)).await;
            let outcome = session
                .refresh("new", &options, |_| async { Ok(swatch_document(0.0)) })
                .await;
            let _ = release_old.send(());
            outcome
        };

        let (old_outcome, new_outcome) = tokio::join!(old_run, new_run);
        assert!(matches!(new_outcome, Completion::Published(_)));
        assert!(matches!(old_outcome, Completion::Stale { .. }));
        assert_eq!(first_color(&session.current().await).as_deref(), Some("#000000"));
    }

    #[tokio::test]
    async fn refresh_orders_runs_by_call_not_by_first_poll() {
        let session = Session::new();
        let options = PipelineOptions::default();

        let first = session.refresh("first", &options, |_| async { Ok(swatch_document(1.0)) });
        let second = session.refresh("second", &options, |_| async { Ok(swatch_document(0.0)) });
        assert_eq!(session.latest().generation(), 2);

        // Poll the later call first; the earlier one must still lose.
        assert!(matches!(second.await, Completion::Published(_)));
        assert!(matches!(first.await, Completion::Stale { .. }));
        assert_eq!(first_color(&session.current().await).as_deref(), Some("#000000"));
    }

    #[tokio::test]
    async fn run_with_honours_a_ticket_taken_earlier() {
        let session = Session::new();
        let options = PipelineOptions::default();
        let early = session.begin();
        let late = session.begin();

        session
            .complete(late, "bad line", Err(FttError::Config("unparseable".into())))
            .await;
        let outcome = session
            .run_with(early, "early", &options, |_| async { Ok(swatch_document(1.0)) })
            .await;

        assert_eq!(outcome, Completion::Stale { ticket: early, latest: late });
        assert!(matches!(session.current().await, SessionState::Failed { .. }));
    }

    #[tokio::test]
    async fn rerun_replaces_output_wholesale() {
        let session = Session::new();
        let options = PipelineOptions::default();
        session
            .refresh("a", &options, |_| async { Ok(swatch_document(1.0)) })
            .await;
        session
            .refresh("b", &options, |_| async { Ok(DocumentNode::from(json!({}))) })
            .await;
        match session.current().await {
            SessionState::Ready { snapshot, .. } => assert!(snapshot.colors.is_empty()),
            other => panic!("expected ready state, got {other:?}"),
        }
    }
}

//! Watch Board use case
//!
//! Follows a live subscription and pushes a fresh [`BoardView`] to the
//! listener on every snapshot. The leaderboard is recomputed from each
//! snapshot in full; nothing is carried over between snapshots.

use super::context::BoardContext;
use crate::ports::board_listener::BoardListener;
use crate::ports::question_store::{QueryEvent, QuestionStore, StoreError};
use askboard_domain::BoardView;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Use case for following the board as it changes
pub struct WatchBoardUseCase {
    store: Arc<dyn QuestionStore>,
}

impl WatchBoardUseCase {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// Runs until `cancel` fires or the store closes the stream.
    ///
    /// Returns the number of boards delivered to the listener.
    pub async fn execute(
        &self,
        ctx: &BoardContext,
        listener: &dyn BoardListener,
        cancel: CancellationToken,
    ) -> Result<usize, StoreError> {
        listener.on_loading();
        let mut subscription = match self.store.subscribe().await {
            Ok(subscription) => subscription,
            Err(e) => {
                listener.on_error(&e.to_string());
                return Err(e);
            }
        };

        let mut delivered = 0;
        loop {
            let event = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Watch cancelled");
                    break;
                }
                event = subscription.next() => event,
            };

            match event {
                Some(QueryEvent::Loading) => listener.on_loading(),
                Some(QueryEvent::Snapshot(questions)) => {
                    let view = BoardView::build(questions, ctx.viewer());
                    listener.on_board(&view);
                    delivered += 1;
                }
                Some(QueryEvent::Error(message)) => {
                    warn!(error = %message, "Subscription error");
                    listener.on_error(&message);
                }
                None => {
                    debug!("Subscription closed by store");
                    break;
                }
            }
        }

        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockStore, RecordingListener, Seen, question};

    #[tokio::test]
    async fn test_delivers_each_snapshot() {
        let store = Arc::new(MockStore::default().with_events(vec![
            QueryEvent::Loading,
            QueryEvent::Snapshot(vec![question("q1", "alice", None)]),
            QueryEvent::Snapshot(vec![
                question("q1", "alice", None),
                question("q2", "alice", None),
            ]),
        ]));
        let listener = RecordingListener::default();

        let delivered = WatchBoardUseCase::new(store)
            .execute(&BoardContext::open(), &listener, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(delivered, 2);
        let seen = listener.seen.lock().unwrap();
        assert_eq!(seen[0], Seen::Loading);
        assert_eq!(seen[1], Seen::Loading);
        let Seen::Board(last) = &seen[3] else {
            panic!("expected a board");
        };
        assert_eq!(last.total, 2);
        assert_eq!(last.leaderboard[0].count, 2);
    }

    #[tokio::test]
    async fn test_error_then_recovery() {
        let store = Arc::new(MockStore::default().with_events(vec![
            QueryEvent::Error("offline".to_string()),
            QueryEvent::Snapshot(vec![]),
        ]));
        let listener = RecordingListener::default();

        let delivered = WatchBoardUseCase::new(store)
            .execute(&BoardContext::open(), &listener, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(delivered, 1);
        let seen = listener.seen.lock().unwrap();
        assert_eq!(seen[1], Seen::Error("offline".to_string()));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let store = Arc::new(
            MockStore::default().with_events(vec![QueryEvent::Snapshot(vec![])]),
        );
        let listener = RecordingListener::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        // Either branch may win the first select; the watch must still end.
        let delivered = WatchBoardUseCase::new(store)
            .execute(&BoardContext::open(), &listener, cancel)
            .await
            .unwrap();
        assert!(delivered <= 1);
    }
}

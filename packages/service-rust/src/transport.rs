//! Transport boundary.

use async_trait::async_trait;
use courtboard_core::ThrownError;
use serde_json::Value;

/// Backend API used by the board and mutation services.
///
/// Implementations own HTTP, auth, retries, and timeouts. Failures are
/// returned as raw [`ThrownError`] values; the services normalize them.
///
/// Used as `Arc<dyn ApiAdapter>`.
#[async_trait]
pub trait ApiAdapter: Send + Sync {
    /// Fetches the raw board response.
    async fn get_board(&self) -> Result<Value, ThrownError>;

    /// Posts a mutation payload to `endpoint` and returns the raw response.
    async fn post(&self, endpoint: &str, payload: Value) -> Result<Value, ThrownError>;
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;
    use serde_json::json;

    use super::*;

    /// In-memory adapter that serves a fixed board and records posts.
    pub(crate) struct FakeAdapter {
        pub(crate) board: Mutex<Result<Value, ThrownError>>,
        pub(crate) response: Mutex<Result<Value, ThrownError>>,
        pub(crate) posts: Mutex<Vec<(String, Value)>>,
        pub(crate) board_fetches: AtomicUsize,
    }

    impl FakeAdapter {
        pub(crate) fn new(board: Value) -> Self {
            Self {
                board: Mutex::new(Ok(board)),
                response: Mutex::new(Ok(json!({"ok": true}))),
                posts: Mutex::new(Vec::new()),
                board_fetches: AtomicUsize::new(0),
            }
        }

        pub(crate) fn fetches(&self) -> usize {
            self.board_fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ApiAdapter for FakeAdapter {
        async fn get_board(&self) -> Result<Value, ThrownError> {
            self.board_fetches.fetch_add(1, Ordering::SeqCst);
            self.board.lock().clone()
        }

        async fn post(&self, endpoint: &str, payload: Value) -> Result<Value, ThrownError> {
            self.posts.lock().push((endpoint.to_string(), payload));
            self.response.lock().clone()
        }
    }

    /// Court 1 free, court 2 occupied by `m1`, one waiting entry `w1`.
    pub(crate) fn board_json() -> Value {
        json!({
            "serverNow": "2025-12-27T23:00:00Z",
            "courts": [
                {"id": "court-1", "number": 1},
                {
                    "id": "court-2",
                    "number": 2,
                    "session_id": "s2",
                    "started_at": "2025-12-27T22:30:00Z",
                    "scheduled_end_at": "2025-12-27T23:30:00Z",
                    "participants": [{"member_id": "m1", "display_name": "Anna Sinner"}]
                }
            ],
            "waitingGroups": [
                {"id": "w1", "position": 1, "joined_at": "2025-12-27T22:40:00Z",
                 "participants": [{"memberId": "m5", "displayName": "Eve"}]}
            ]
        })
    }
}

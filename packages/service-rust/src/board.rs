//! Board read path.

use std::sync::Arc;

use courtboard_core::{ingest_board, normalize_service_error, Board, ErrorContext};
use tracing::{debug, warn};

use crate::cache::BoardCache;
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::transport::ApiAdapter;
use crate::LOG_TARGET;

const GET_BOARD_OP: &str = "getBoard";

/// Fetches, validates, normalizes, and caches the board.
#[derive(Clone)]
pub struct BoardService {
    adapter: Arc<dyn ApiAdapter>,
    cache: Arc<BoardCache>,
    config: Arc<ServiceConfig>,
}

impl BoardService {
    #[must_use]
    pub fn new(adapter: Arc<dyn ApiAdapter>, cache: Arc<BoardCache>, config: Arc<ServiceConfig>) -> Self {
        Self {
            adapter,
            cache,
            config,
        }
    }

    /// Returns the current board, from cache unless `force_refresh`.
    ///
    /// Envelope validation only logs. Domain validation only logs unless
    /// `strict_domain` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] when the transport fails, or
    /// [`ServiceError::InvalidBoard`] in strict mode.
    pub async fn fetch_board(&self, force_refresh: bool) -> Result<Arc<Board>, ServiceError> {
        if !force_refresh {
            if let Some(board) = self.cache.get() {
                debug!(target: LOG_TARGET, "serving board from cache");
                return Ok(board);
            }
        }

        let raw = self.adapter.get_board().await.map_err(|err| {
            let err = normalize_service_error(err, &self.context(GET_BOARD_OP));
            warn!(target: LOG_TARGET, code = %err.code, error = %err, "board fetch failed");
            err
        })?;

        let board = ingest_board(&raw, self.config.strict_domain)?;

        debug!(
            target: LOG_TARGET,
            courts = board.courts.len(),
            waiting = board.waitlist.len(),
            "board refreshed"
        );
        let board = Arc::new(board);
        self.cache.put(Arc::clone(&board));
        Ok(board)
    }

    /// Drops the cached board so the next fetch hits the backend.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    pub(crate) fn adapter(&self) -> &Arc<dyn ApiAdapter> {
        &self.adapter
    }

    pub(crate) fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub(crate) fn context(&self, op: &str) -> ErrorContext {
        ErrorContext::new(&self.config.service_name, op)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use courtboard_core::{ErrorCode, ThrownError};
    use serde_json::json;

    use super::*;
    use crate::transport::fake::{board_json, FakeAdapter};

    fn service(adapter: Arc<FakeAdapter>, config: ServiceConfig) -> BoardService {
        let cache = Arc::new(BoardCache::new(config.board_cache_ttl()));
        BoardService::new(adapter, cache, Arc::new(config))
    }

    #[tokio::test]
    async fn normalizes_and_caches() {
        let adapter = Arc::new(FakeAdapter::new(board_json()));
        let boards = service(Arc::clone(&adapter), ServiceConfig::default());

        let board = boards.fetch_board(false).await.unwrap();
        assert_eq!(board.courts.len(), 2);
        assert!(board.courts[1].is_occupied);
        assert_eq!(board.waitlist[0].id, "w1");

        let again = boards.fetch_board(false).await.unwrap();
        assert!(Arc::ptr_eq(&board, &again));
        assert_eq!(adapter.fetches(), 1);

        boards.fetch_board(true).await.unwrap();
        assert_eq!(adapter.fetches(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let adapter = Arc::new(FakeAdapter::new(board_json()));
        let boards = service(Arc::clone(&adapter), ServiceConfig::default());
        boards.fetch_board(false).await.unwrap();
        boards.invalidate();
        boards.fetch_board(false).await.unwrap();
        assert_eq!(adapter.fetches(), 2);
    }

    #[tokio::test]
    async fn transport_failure_is_normalized() {
        let adapter = Arc::new(FakeAdapter::new(json!({})));
        *adapter.board.lock() = Err(ThrownError::Type("Failed to fetch".to_string()));
        let boards = service(adapter, ServiceConfig::default());

        let Err(ServiceError::Domain(err)) = boards.fetch_board(false).await else {
            panic!("expected a domain error");
        };
        assert_eq!(err.code, ErrorCode::Network);
        assert_eq!(err.message, "Failed to fetch");
        assert_eq!(err.safe_details, ErrorContext::new("courtboard", "getBoard"));
    }

    #[tokio::test]
    async fn strict_mode_rejects_invalid_board() {
        let raw = json!({"serverNow": "2025-12-27T23:00:00Z", "courts": [{"id": "c", "number": 40}]});

        let lenient = service(Arc::new(FakeAdapter::new(raw.clone())), ServiceConfig::default());
        assert_eq!(lenient.fetch_board(false).await.unwrap().courts[0].number, 40);

        let strict = service(
            Arc::new(FakeAdapter::new(raw)),
            ServiceConfig {
                strict_domain: true,
                board_cache_ttl_ms: 0,
                ..ServiceConfig::default()
            },
        );
        assert!(matches!(
            strict.fetch_board(false).await,
            Err(ServiceError::InvalidBoard(_))
        ));
    }

    #[tokio::test]
    async fn zero_ttl_always_refetches() {
        let adapter = Arc::new(FakeAdapter::new(board_json()));
        let boards = service(
            Arc::clone(&adapter),
            ServiceConfig {
                board_cache_ttl_ms: 0,
                ..ServiceConfig::default()
            },
        );
        boards.fetch_board(false).await.unwrap();
        boards.fetch_board(false).await.unwrap();
        assert_eq!(adapter.fetches(), 2);
        assert_eq!(boards.config().board_cache_ttl(), Duration::ZERO);
    }
}

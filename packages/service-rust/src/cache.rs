//! Time-bounded cache for the latest normalized board.

use std::sync::Arc;
use std::time::{Duration, Instant};

use courtboard_core::Board;
use parking_lot::Mutex;

/// Holds at most one board snapshot, served until `ttl` elapses or the cache
/// is invalidated.
#[derive(Debug)]
pub struct BoardCache {
    ttl: Duration,
    slot: Mutex<Option<(Instant, Arc<Board>)>>,
}

impl BoardCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// The cached board, if one is stored and still fresh.
    #[must_use]
    pub fn get(&self) -> Option<Arc<Board>> {
        self.get_at(Instant::now())
    }

    fn get_at(&self, now: Instant) -> Option<Arc<Board>> {
        let slot = self.slot.lock();
        let (stored_at, board) = slot.as_ref()?;
        (now.saturating_duration_since(*stored_at) < self.ttl).then(|| Arc::clone(board))
    }

    pub fn put(&self, board: Arc<Board>) {
        *self.slot.lock() = Some((Instant::now(), board));
    }

    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Arc<Board> {
        Arc::new(Board {
            server_now: "2025-12-27T23:00:00Z".to_string(),
            courts: Vec::new(),
            waitlist: Vec::new(),
        })
    }

    #[test]
    fn serves_until_ttl_elapses() {
        let cache = BoardCache::new(Duration::from_secs(2));
        assert!(cache.get().is_none());
        let stored = board();
        cache.put(Arc::clone(&stored));
        assert!(Arc::ptr_eq(&cache.get().unwrap(), &stored));
        assert!(cache.get_at(Instant::now() + Duration::from_secs(3)).is_none());
    }

    #[test]
    fn invalidate_clears() {
        let cache = BoardCache::new(Duration::from_secs(60));
        cache.put(board());
        cache.invalidate();
        assert!(cache.get().is_none());
    }

    #[test]
    fn zero_ttl_never_serves() {
        let cache = BoardCache::new(Duration::ZERO);
        cache.put(board());
        assert!(cache.get().is_none());
    }
}

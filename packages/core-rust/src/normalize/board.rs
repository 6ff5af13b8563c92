use serde_json::Value;
use tracing::warn;

use super::court::normalize_court;
use super::waitlist::normalize_waitlist_entry;
use super::{describe, LOG_TARGET};
use crate::aliases::{BOARD_COURTS, BOARD_SERVER_NOW, BOARD_WAITLIST};
use crate::clock;
use crate::raw::RawRecord;
use crate::schema::{domain, envelope, BoardAssertionError};
use crate::types::Board;

/// Normalizes a full board response.
///
/// `serverNow` is resolved once and threaded through every court and waitlist
/// entry so all temporal flags agree. Missing `courts` or `waitlist` (also
/// accepted as `waitingGroups`) become empty lists. Null court or entry
/// records are kept as placeholders so list lengths are preserved. The
/// waitlist is stably sorted by `position` as the last step; duplicate
/// positions are kept in input order.
#[must_use]
pub fn normalize_board(raw: &Value) -> Board {
    let record = RawRecord::new(Some(raw));
    if !record.is_object() {
        warn!(target: LOG_TARGET, kind = describe(Some(raw)), "board response is not an object; using empty board");
    }

    let server_now = record
        .string(&BOARD_SERVER_NOW)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            let now = clock::wall_clock_now();
            warn!(target: LOG_TARGET, fallback = %now, "board response has no serverNow; using local clock");
            now
        });

    let courts = record
        .array(&BOARD_COURTS)
        .unwrap_or_default()
        .iter()
        .map(|court| normalize_court(Some(court), &server_now))
        .collect();

    let mut waitlist: Vec<_> = record
        .array(&BOARD_WAITLIST)
        .unwrap_or_default()
        .iter()
        .map(|entry| normalize_waitlist_entry(Some(entry), &server_now))
        .collect();
    waitlist.sort_by_key(|entry| entry.position);

    Board {
        server_now,
        courts,
        waitlist,
    }
}

/// Full read-path pipeline: envelope validation (log-only), normalization,
/// then domain validation.
///
/// Domain validation only logs unless `strict` is set.
///
/// # Errors
///
/// Returns [`BoardAssertionError`] in strict mode when the normalized board
/// violates a domain constraint. Never fails otherwise.
pub fn ingest_board(raw: &Value, strict: bool) -> Result<Board, BoardAssertionError> {
    let _ = envelope::validate_board_response(raw);
    let board = normalize_board(raw);
    if strict {
        domain::assert_valid_board(&board)?;
    } else {
        let _ = domain::validate_board(&board);
    }
    Ok(board)
}

use serde_json::Value;
use tracing::{debug, warn};

use super::block::{block_from_record, FLAT_BLOCK_FIELDS, NESTED_BLOCK_FIELDS};
use super::session::{session_from_record, FLAT_SESSION_FIELDS, NESTED_SESSION_FIELDS};
use super::{describe, LOG_TARGET};
use crate::aliases::{
    COURT_ID, COURT_IS_BLOCKED, COURT_IS_OCCUPIED, COURT_IS_OVERTIME, COURT_IS_TOURNAMENT,
    COURT_NUMBER, COURT_STATUS, FLAT_BLOCK_ID, FLAT_SESSION_ID, NESTED_BLOCK, NESTED_SESSION,
};
use crate::raw::RawRecord;
use crate::types::{Block, Court, CourtStatus, Session};

/// Normalizes one court row.
///
/// Session and block are read nested-first (`session`, `block` objects) and
/// then from flattened RPC columns (`session_id`, `started_at`, ...,
/// `block_id`, `block_starts_at`, ...). Flags come from an explicit `status`
/// when it is recognized, then from explicit `isOccupied`/`isBlocked`/
/// `isOvertime` flags, and only then from the session and block. An overtime
/// court is always occupied. `is_tournament` is taken from the row when
/// present, otherwise from the session. `is_available` is always recomputed
/// from the occupied and blocked flags.
///
/// A null or non-object row yields [`Court::placeholder`].
#[must_use]
pub fn normalize_court(raw: Option<&Value>, server_now: &str) -> Court {
    let record = RawRecord::new(raw);
    if !record.is_object() {
        warn!(target: LOG_TARGET, kind = describe(raw), "court record is not an object; using placeholder");
        return Court::placeholder();
    }

    let number = record
        .integer(&COURT_NUMBER)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or_else(|| {
            warn!(target: LOG_TARGET, "court record has no usable number");
            0
        });
    let id = record.string(&COURT_ID).unwrap_or_else(|| {
        debug!(target: LOG_TARGET, number, "court record has no id");
        String::new()
    });

    let session = court_session(record, number, server_now);
    let block = court_block(record, number, server_now);
    let flags = CourtFlags::resolve(record, number, session.as_ref(), block.as_ref());
    let is_tournament = record
        .boolean(&COURT_IS_TOURNAMENT)
        .unwrap_or_else(|| session.as_ref().is_some_and(|s| s.is_tournament));

    Court {
        id,
        number,
        is_occupied: flags.occupied,
        is_blocked: flags.blocked,
        is_overtime: flags.overtime,
        is_available: !flags.occupied && !flags.blocked,
        is_tournament,
        session,
        block,
    }
}

fn court_session(record: RawRecord<'_>, number: u32, server_now: &str) -> Option<Session> {
    if let Some(nested) = record.object(&NESTED_SESSION) {
        return Some(session_from_record(nested, &NESTED_SESSION_FIELDS, number, server_now));
    }
    record
        .has(&FLAT_SESSION_ID)
        .then(|| session_from_record(record, &FLAT_SESSION_FIELDS, number, server_now))
}

fn court_block(record: RawRecord<'_>, number: u32, server_now: &str) -> Option<Block> {
    if let Some(nested) = record.object(&NESTED_BLOCK) {
        return Some(block_from_record(nested, &NESTED_BLOCK_FIELDS, number, server_now));
    }
    record
        .has(&FLAT_BLOCK_ID)
        .then(|| block_from_record(record, &FLAT_BLOCK_FIELDS, number, server_now))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CourtFlags {
    occupied: bool,
    blocked: bool,
    overtime: bool,
}

impl CourtFlags {
    fn resolve(
        record: RawRecord<'_>,
        number: u32,
        session: Option<&Session>,
        block: Option<&Block>,
    ) -> Self {
        if let Some(tag) = record.string(&COURT_STATUS) {
            match CourtStatus::parse(&tag) {
                Some(status) => return Self::from_status(status),
                None => {
                    warn!(target: LOG_TARGET, number, status = %tag, "unrecognized court status; deriving flags");
                }
            }
        }

        let active_session = session.filter(|s| s.is_active());
        let occupied = record
            .boolean(&COURT_IS_OCCUPIED)
            .unwrap_or(active_session.is_some());
        let blocked = record
            .boolean(&COURT_IS_BLOCKED)
            .unwrap_or_else(|| block.is_some_and(|b| b.is_active));
        let overtime = record
            .boolean(&COURT_IS_OVERTIME)
            .unwrap_or_else(|| active_session.is_some_and(|s| s.is_overtime));
        Self {
            occupied,
            blocked,
            overtime: occupied && overtime,
        }
    }

    fn from_status(status: CourtStatus) -> Self {
        match status {
            CourtStatus::Available => Self {
                occupied: false,
                blocked: false,
                overtime: false,
            },
            CourtStatus::Occupied => Self {
                occupied: true,
                blocked: false,
                overtime: false,
            },
            CourtStatus::Overtime => Self {
                occupied: true,
                blocked: false,
                overtime: true,
            },
            CourtStatus::Blocked => Self {
                occupied: false,
                blocked: true,
                overtime: false,
            },
        }
    }
}

use serde_json::Value;
use tracing::{debug, warn};

use super::group::{group_for_owner, group_from_record, GroupFields, OWNER_GROUP};
use super::{describe, LOG_TARGET};
use crate::aliases::{
    FLAT_SESSION_ACTUAL_END_AT, FLAT_SESSION_END_REASON, FLAT_SESSION_GROUP_ID,
    FLAT_SESSION_GROUP_TYPE, FLAT_SESSION_ID, FLAT_SESSION_IS_TOURNAMENT, FLAT_SESSION_PLAYERS,
    FLAT_SESSION_SCHEDULED_END_AT, FLAT_SESSION_STARTED_AT, SESSION_ACTUAL_END_AT,
    SESSION_COURT_NUMBER, SESSION_END_REASON, SESSION_ID, SESSION_IS_TOURNAMENT,
    SESSION_SCHEDULED_END_AT, SESSION_STARTED_AT,
};
use crate::clock;
use crate::raw::{FieldAliases, RawRecord};
use crate::types::{EndReason, Session};

/// Where session fields live: on a nested `session` object, or flattened onto
/// the court row as RPC-style columns.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionFields {
    id: FieldAliases,
    court_number: Option<FieldAliases>,
    started_at: FieldAliases,
    scheduled_end_at: FieldAliases,
    actual_end_at: FieldAliases,
    end_reason: FieldAliases,
    is_tournament: FieldAliases,
    /// `None` means the group may be nested under `group` or flattened with
    /// the owner-group aliases.
    flat_group: Option<GroupFields>,
}

pub(crate) const NESTED_SESSION_FIELDS: SessionFields = SessionFields {
    id: SESSION_ID,
    court_number: Some(SESSION_COURT_NUMBER),
    started_at: SESSION_STARTED_AT,
    scheduled_end_at: SESSION_SCHEDULED_END_AT,
    actual_end_at: SESSION_ACTUAL_END_AT,
    end_reason: SESSION_END_REASON,
    is_tournament: SESSION_IS_TOURNAMENT,
    flat_group: None,
};

pub(crate) const FLAT_SESSION_FIELDS: SessionFields = SessionFields {
    id: FLAT_SESSION_ID,
    court_number: None,
    started_at: FLAT_SESSION_STARTED_AT,
    scheduled_end_at: FLAT_SESSION_SCHEDULED_END_AT,
    actual_end_at: FLAT_SESSION_ACTUAL_END_AT,
    end_reason: FLAT_SESSION_END_REASON,
    is_tournament: FLAT_SESSION_IS_TOURNAMENT,
    flat_group: Some(GroupFields {
        id: FLAT_SESSION_GROUP_ID,
        players: FLAT_SESSION_PLAYERS,
        group_type: FLAT_SESSION_GROUP_TYPE,
    }),
};

/// Normalizes a nested session object.
///
/// Returns `None` when there is no session object at all. `court_number` is
/// used when the session record does not carry its own.
#[must_use]
pub fn normalize_session(raw: Option<&Value>, court_number: u32, server_now: &str) -> Option<Session> {
    let record = RawRecord::new(raw);
    if !record.is_object() {
        if matches!(raw, Some(v) if !v.is_null()) {
            warn!(target: LOG_TARGET, kind = describe(raw), "session is not an object; ignoring");
        }
        return None;
    }
    Some(session_from_record(record, &NESTED_SESSION_FIELDS, court_number, server_now))
}

pub(crate) fn session_from_record(
    record: RawRecord<'_>,
    fields: &SessionFields,
    court_number: u32,
    server_now: &str,
) -> Session {
    let id = record.string(&fields.id).unwrap_or_else(|| {
        warn!(target: LOG_TARGET, court_number, "session has no id");
        String::new()
    });

    let court_number = fields
        .court_number
        .and_then(|aliases| record.integer(&aliases))
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(court_number);

    let started_at = required_timestamp(record, &fields.started_at, &id);
    let scheduled_end_at = required_timestamp(record, &fields.scheduled_end_at, &id);
    let actual_end_at = record.string(&fields.actual_end_at).filter(|s| !s.is_empty());

    let end_reason = record.string(&fields.end_reason).and_then(|tag| {
        let parsed = EndReason::parse(&tag);
        if parsed.is_none() {
            warn!(target: LOG_TARGET, session_id = %id, tag = %tag, "unrecognized end reason; dropping");
        }
        parsed
    });

    let group = match &fields.flat_group {
        Some(flat) => group_from_record(record, flat),
        None => group_for_owner(record, &OWNER_GROUP),
    };

    let is_overtime = actual_end_at.is_none() && clock::is_before(&scheduled_end_at, server_now);

    Session {
        id,
        court_number,
        group,
        started_at,
        scheduled_end_at,
        actual_end_at,
        end_reason,
        is_overtime,
        is_tournament: record.boolean(&fields.is_tournament).unwrap_or(false),
    }
}

fn required_timestamp(record: RawRecord<'_>, aliases: &FieldAliases, session_id: &str) -> String {
    match record.string(aliases) {
        Some(ts) => {
            if clock::parse_instant(&ts).is_none() {
                debug!(target: LOG_TARGET, session_id, field = aliases.field, value = %ts, "unparseable session timestamp");
            }
            ts
        }
        None => {
            warn!(target: LOG_TARGET, session_id, field = aliases.field, "session timestamp missing");
            String::new()
        }
    }
}

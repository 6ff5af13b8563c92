use serde_json::Value;
use tracing::{debug, warn};

use super::group::{group_for_owner, OWNER_GROUP};
use super::{describe, LOG_TARGET};
use crate::aliases::{
    WAITLIST_DEFERRED, WAITLIST_ESTIMATED_COURT_TIME, WAITLIST_ID, WAITLIST_JOINED_AT,
    WAITLIST_MINUTES_WAITING, WAITLIST_POSITION, WAITLIST_STATUS,
};
use crate::clock;
use crate::raw::RawRecord;
use crate::types::{Group, WaitlistEntry, WaitlistStatus};

/// Normalizes one waiting-group record.
///
/// `minutes_waiting` is taken from the record when present and otherwise
/// derived as whole minutes between `joined_at` and `server_now`, clamped at
/// zero. A missing `joined_at` is treated as joining at `server_now`.
#[must_use]
pub fn normalize_waitlist_entry(raw: Option<&Value>, server_now: &str) -> WaitlistEntry {
    let record = RawRecord::new(raw);
    if !record.is_object() {
        warn!(target: LOG_TARGET, kind = describe(raw), "waitlist entry is not an object; using placeholder");
        return WaitlistEntry {
            id: String::new(),
            position: 0,
            group: Group::empty(),
            joined_at: server_now.to_string(),
            minutes_waiting: 0,
            estimated_court_time: None,
            status: WaitlistStatus::Waiting,
        };
    }

    let id = record.string(&WAITLIST_ID).unwrap_or_else(|| {
        warn!(target: LOG_TARGET, "waitlist entry has no id");
        String::new()
    });
    let position = record.integer(&WAITLIST_POSITION).unwrap_or_else(|| {
        warn!(target: LOG_TARGET, entry_id = %id, "waitlist entry has no position");
        0
    });
    let joined_at = record.string(&WAITLIST_JOINED_AT).unwrap_or_else(|| {
        warn!(target: LOG_TARGET, entry_id = %id, "waitlist entry has no joinedAt; assuming serverNow");
        server_now.to_string()
    });

    let minutes_waiting = match record.integer(&WAITLIST_MINUTES_WAITING) {
        Some(minutes) => minutes,
        None => derive_minutes_waiting(&id, &joined_at, server_now),
    };

    WaitlistEntry {
        group: group_for_owner(record, &OWNER_GROUP),
        estimated_court_time: record.string(&WAITLIST_ESTIMATED_COURT_TIME),
        status: entry_status(record, &id),
        id,
        position,
        joined_at,
        minutes_waiting,
    }
}

fn derive_minutes_waiting(entry_id: &str, joined_at: &str, server_now: &str) -> i64 {
    match clock::minutes_between(joined_at, server_now) {
        Some(minutes) if minutes < 0 => {
            warn!(target: LOG_TARGET, entry_id, joined_at, server_now, "entry joined after serverNow; clamping wait to zero");
            0
        }
        Some(minutes) => minutes,
        None => {
            debug!(target: LOG_TARGET, entry_id, joined_at, "cannot derive minutes waiting");
            0
        }
    }
}

fn entry_status(record: RawRecord<'_>, entry_id: &str) -> WaitlistStatus {
    let status = match record.string(&WAITLIST_STATUS) {
        Some(tag) => WaitlistStatus::parse(&tag).unwrap_or_else(|| {
            warn!(target: LOG_TARGET, entry_id, status = %tag, "unrecognized waitlist status; assuming waiting");
            WaitlistStatus::Waiting
        }),
        None => WaitlistStatus::Waiting,
    };
    if status == WaitlistStatus::Waiting && record.boolean(&WAITLIST_DEFERRED) == Some(true) {
        WaitlistStatus::Deferred
    } else {
        status
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::GroupType;

    const NOW: &str = "2025-12-27T23:00:00Z";

    #[test]
    fn derives_minutes_waiting_from_server_now() {
        let raw = json!({
            "id": "w1",
            "position": 1,
            "joined_at": "2025-12-27T22:30:00Z",
            "participants": [{"memberId": "m2", "displayName": "Borna Coric"}]
        });
        let entry = normalize_waitlist_entry(Some(&raw), NOW);
        assert_eq!(entry.minutes_waiting, 30);
        assert_eq!(entry.group.players[0].display_name, "Borna Coric");
        assert_eq!(entry.group.group_type, GroupType::Singles);
        assert_eq!(entry.status, WaitlistStatus::Waiting);
    }

    #[test]
    fn explicit_minutes_waiting_wins() {
        let raw = json!({"id": "w1", "position": 1, "joinedAt": "2025-12-27T22:30:00Z", "minutesWaiting": 12});
        assert_eq!(normalize_waitlist_entry(Some(&raw), NOW).minutes_waiting, 12);
    }

    #[test]
    fn future_join_clamped_to_zero() {
        let raw = json!({"id": "w1", "position": 1, "joinedAt": "2025-12-27T23:05:00Z"});
        assert_eq!(normalize_waitlist_entry(Some(&raw), NOW).minutes_waiting, 0);
    }

    #[test]
    fn missing_joined_at_assumes_server_now() {
        let raw = json!({"id": "w1", "position": 2});
        let entry = normalize_waitlist_entry(Some(&raw), NOW);
        assert_eq!(entry.joined_at, NOW);
        assert_eq!(entry.minutes_waiting, 0);
    }

    #[test]
    fn deferred_flag_and_status() {
        let raw = json!({"id": "w1", "position": 1, "deferred": true});
        assert_eq!(normalize_waitlist_entry(Some(&raw), NOW).status, WaitlistStatus::Deferred);
        let raw = json!({"id": "w1", "position": 1, "status": "assigned", "deferred": true});
        assert_eq!(normalize_waitlist_entry(Some(&raw), NOW).status, WaitlistStatus::Assigned);
        let raw = json!({"id": "w1", "position": 1, "status": "teleported"});
        assert_eq!(normalize_waitlist_entry(Some(&raw), NOW).status, WaitlistStatus::Waiting);
    }

    #[test]
    fn estimated_court_time_is_optional() {
        let raw = json!({"id": "w1", "position": 1, "estimated_court_time": "2025-12-27T23:40:00Z"});
        assert_eq!(
            normalize_waitlist_entry(Some(&raw), NOW).estimated_court_time.as_deref(),
            Some("2025-12-27T23:40:00Z")
        );
        let raw = json!({"id": "w1", "position": 1, "estimatedCourtTime": null});
        assert!(normalize_waitlist_entry(Some(&raw), NOW).estimated_court_time.is_none());
    }

    #[test]
    fn null_entry_is_placeholder() {
        let entry = normalize_waitlist_entry(Some(&Value::Null), NOW);
        assert_eq!(entry.id, "");
        assert_eq!(entry.position, 0);
        assert!(entry.group.players.is_empty());
    }
}

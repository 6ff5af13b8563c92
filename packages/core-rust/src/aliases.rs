//! Field-alias tables for every normalized entity.
//!
//! camelCase spellings come first unless noted. The one deliberate exception
//! is [`SESSION_IS_TOURNAMENT`], where the snake_case key wins when both are
//! present.

use crate::raw::FieldAliases;

// ---- Member ----

pub const MEMBER_ID: FieldAliases = FieldAliases::new("memberId", &["memberId", "member_id", "id"]);
pub const MEMBER_DISPLAY_NAME: FieldAliases =
    FieldAliases::new("displayName", &["displayName", "display_name", "name"]);
pub const MEMBER_IS_GUEST: FieldAliases = FieldAliases::new("isGuest", &["isGuest", "is_guest"]);

/// Keys accepted on a member record without a drift warning.
pub const MEMBER_FIELDS: &[FieldAliases] = &[
    MEMBER_ID,
    MEMBER_DISPLAY_NAME,
    MEMBER_IS_GUEST,
    FieldAliases::new("accountId", &["accountId", "account_id"]),
    FieldAliases::new("memberNumber", &["memberNumber", "member_number"]),
];

// ---- Group ----

pub const GROUP_ID: FieldAliases = FieldAliases::new("id", &["id", "groupId", "group_id"]);
/// Group id when the group is flattened onto its owner (session or entry),
/// whose own `id` must not be mistaken for the group's.
pub const GROUP_ID_ON_OWNER: FieldAliases = FieldAliases::new("id", &["groupId", "group_id"]);
pub const GROUP_PLAYERS: FieldAliases =
    FieldAliases::new("players", &["players", "participants", "members"]);
pub const GROUP_TYPE: FieldAliases = FieldAliases::new("type", &["type", "groupType", "group_type"]);
pub const GROUP_TYPE_ON_OWNER: FieldAliases =
    FieldAliases::new("type", &["groupType", "group_type"]);
pub const NESTED_GROUP: FieldAliases = FieldAliases::new("group", &["group"]);

// ---- Session ----

pub const SESSION_ID: FieldAliases = FieldAliases::new("id", &["id", "sessionId", "session_id"]);
pub const SESSION_COURT_NUMBER: FieldAliases =
    FieldAliases::new("courtNumber", &["courtNumber", "court_number"]);
pub const SESSION_STARTED_AT: FieldAliases =
    FieldAliases::new("startedAt", &["startedAt", "started_at", "startTime", "start_time"]);
pub const SESSION_SCHEDULED_END_AT: FieldAliases = FieldAliases::new(
    "scheduledEndAt",
    &["scheduledEndAt", "scheduled_end_at", "scheduledEndTime", "scheduled_end_time"],
);
pub const SESSION_ACTUAL_END_AT: FieldAliases =
    FieldAliases::new("actualEndAt", &["actualEndAt", "actual_end_at", "endedAt", "ended_at"]);
pub const SESSION_END_REASON: FieldAliases =
    FieldAliases::new("endReason", &["endReason", "end_reason"]);
/// snake_case wins over camelCase for this field.
pub const SESSION_IS_TOURNAMENT: FieldAliases =
    FieldAliases::new("isTournament", &["is_tournament", "isTournament"]);

// ---- Block ----

pub const BLOCK_ID: FieldAliases = FieldAliases::new("id", &["id", "blockId", "block_id"]);
pub const BLOCK_COURT_NUMBER: FieldAliases =
    FieldAliases::new("courtNumber", &["courtNumber", "court_number"]);
pub const BLOCK_STARTS_AT: FieldAliases =
    FieldAliases::new("startsAt", &["startsAt", "starts_at", "startTime", "start_time"]);
pub const BLOCK_ENDS_AT: FieldAliases =
    FieldAliases::new("endsAt", &["endsAt", "ends_at", "endTime", "end_time"]);
pub const BLOCK_REASON: FieldAliases =
    FieldAliases::new("reason", &["reason", "title", "description"]);

// ---- Court ----

pub const COURT_ID: FieldAliases = FieldAliases::new("id", &["id", "courtId", "court_id"]);
pub const COURT_NUMBER: FieldAliases =
    FieldAliases::new("number", &["number", "courtNumber", "court_number"]);
pub const COURT_STATUS: FieldAliases = FieldAliases::new("status", &["status"]);
pub const COURT_IS_OCCUPIED: FieldAliases =
    FieldAliases::new("isOccupied", &["isOccupied", "is_occupied"]);
pub const COURT_IS_BLOCKED: FieldAliases =
    FieldAliases::new("isBlocked", &["isBlocked", "is_blocked"]);
pub const COURT_IS_OVERTIME: FieldAliases =
    FieldAliases::new("isOvertime", &["isOvertime", "is_overtime"]);
pub const COURT_IS_TOURNAMENT: FieldAliases =
    FieldAliases::new("isTournament", &["isTournament", "is_tournament"]);
pub const NESTED_SESSION: FieldAliases = FieldAliases::new("session", &["session"]);
pub const NESTED_BLOCK: FieldAliases = FieldAliases::new("block", &["block"]);

// ---- Court, flattened (RPC-style) session and block columns ----

pub const FLAT_SESSION_ID: FieldAliases =
    FieldAliases::new("session.id", &["session_id", "sessionId"]);
pub const FLAT_SESSION_STARTED_AT: FieldAliases =
    FieldAliases::new("session.startedAt", &["started_at", "session_started_at"]);
pub const FLAT_SESSION_SCHEDULED_END_AT: FieldAliases = FieldAliases::new(
    "session.scheduledEndAt",
    &["scheduled_end_at", "session_scheduled_end_at"],
);
pub const FLAT_SESSION_ACTUAL_END_AT: FieldAliases =
    FieldAliases::new("session.actualEndAt", &["actual_end_at", "session_actual_end_at"]);
pub const FLAT_SESSION_END_REASON: FieldAliases =
    FieldAliases::new("session.endReason", &["end_reason", "session_end_reason"]);
pub const FLAT_SESSION_IS_TOURNAMENT: FieldAliases =
    FieldAliases::new("session.isTournament", &["is_tournament", "isTournament"]);
pub const FLAT_SESSION_PLAYERS: FieldAliases =
    FieldAliases::new("session.group.players", &["participants", "players"]);
pub const FLAT_SESSION_GROUP_ID: FieldAliases =
    FieldAliases::new("session.group.id", &["group_id", "session_group_id"]);
pub const FLAT_SESSION_GROUP_TYPE: FieldAliases =
    FieldAliases::new("session.group.type", &["group_type", "session_group_type"]);

pub const FLAT_BLOCK_ID: FieldAliases = FieldAliases::new("block.id", &["block_id", "blockId"]);
pub const FLAT_BLOCK_STARTS_AT: FieldAliases =
    FieldAliases::new("block.startsAt", &["block_starts_at", "blockStartsAt"]);
pub const FLAT_BLOCK_ENDS_AT: FieldAliases =
    FieldAliases::new("block.endsAt", &["block_ends_at", "blockEndsAt"]);
pub const FLAT_BLOCK_REASON: FieldAliases =
    FieldAliases::new("block.reason", &["block_reason", "block_title", "blockReason"]);

// ---- Waitlist entry ----

pub const WAITLIST_ID: FieldAliases = FieldAliases::new("id", &["id", "entryId", "entry_id"]);
pub const WAITLIST_POSITION: FieldAliases =
    FieldAliases::new("position", &["position", "queuePosition", "queue_position"]);
pub const WAITLIST_JOINED_AT: FieldAliases =
    FieldAliases::new("joinedAt", &["joinedAt", "joined_at", "createdAt", "created_at"]);
pub const WAITLIST_MINUTES_WAITING: FieldAliases =
    FieldAliases::new("minutesWaiting", &["minutesWaiting", "minutes_waiting"]);
pub const WAITLIST_ESTIMATED_COURT_TIME: FieldAliases =
    FieldAliases::new("estimatedCourtTime", &["estimatedCourtTime", "estimated_court_time"]);
pub const WAITLIST_STATUS: FieldAliases = FieldAliases::new("status", &["status"]);
pub const WAITLIST_DEFERRED: FieldAliases =
    FieldAliases::new("deferred", &["deferred", "isDeferred", "is_deferred"]);

// ---- Board ----

pub const BOARD_SERVER_NOW: FieldAliases =
    FieldAliases::new("serverNow", &["serverNow", "server_now"]);
pub const BOARD_COURTS: FieldAliases = FieldAliases::new("courts", &["courts"]);
pub const BOARD_WAITLIST: FieldAliases =
    FieldAliases::new("waitlist", &["waitlist", "waitingGroups", "waiting_groups"]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tournament_flag_prefers_snake_case() {
        assert_eq!(SESSION_IS_TOURNAMENT.keys[0], "is_tournament");
    }

    #[test]
    fn owner_group_aliases_exclude_plain_id() {
        assert!(!GROUP_ID_ON_OWNER.keys.contains(&"id"));
        assert!(!GROUP_TYPE_ON_OWNER.keys.contains(&"type"));
    }

    #[test]
    fn every_table_has_candidates() {
        for table in MEMBER_FIELDS {
            assert!(!table.keys.is_empty(), "{} has no keys", table.field);
        }
    }
}

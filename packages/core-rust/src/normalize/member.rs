use serde_json::Value;
use tracing::{debug, warn};

use super::{describe, LOG_TARGET};
use crate::aliases::{MEMBER_DISPLAY_NAME, MEMBER_FIELDS, MEMBER_ID, MEMBER_IS_GUEST};
use crate::raw::RawRecord;
use crate::types::Member;

/// Normalizes one participant record.
///
/// Missing or non-object input yields [`Member::unknown`]. Missing fields fall
/// back to the same placeholder values individually.
#[must_use]
pub fn normalize_member(raw: Option<&Value>) -> Member {
    let record = RawRecord::new(raw);
    if !record.is_object() {
        warn!(target: LOG_TARGET, kind = describe(raw), "member record is not an object; using placeholder");
        return Member::unknown();
    }

    let stray = record.unknown_keys(MEMBER_FIELDS);
    if !stray.is_empty() {
        debug!(target: LOG_TARGET, keys = ?stray, "member record has unrecognized keys");
    }

    let placeholder = Member::unknown();
    let member_id = record
        .string(&MEMBER_ID)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| {
            warn!(target: LOG_TARGET, "member record has no id");
            placeholder.member_id
        });
    let display_name = record
        .string(&MEMBER_DISPLAY_NAME)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| {
            debug!(target: LOG_TARGET, member_id = %member_id, "member record has no display name");
            placeholder.display_name
        });

    Member {
        member_id,
        display_name,
        is_guest: record.boolean(&MEMBER_IS_GUEST).unwrap_or(false),
    }
}

/// Normalizes a list of participant records, keeping one member per entry.
pub(crate) fn normalize_members(raw: &[Value]) -> Vec<Member> {
    raw.iter().map(|m| normalize_member(Some(m))).collect()
}

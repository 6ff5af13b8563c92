use serde_json::Value;
use tracing::warn;

use super::{describe, LOG_TARGET};
use crate::aliases::{
    BLOCK_COURT_NUMBER, BLOCK_ENDS_AT, BLOCK_ID, BLOCK_REASON, BLOCK_STARTS_AT,
    FLAT_BLOCK_ENDS_AT, FLAT_BLOCK_ID, FLAT_BLOCK_REASON, FLAT_BLOCK_STARTS_AT,
};
use crate::clock;
use crate::raw::{FieldAliases, RawRecord};
use crate::types::Block;

#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockFields {
    id: FieldAliases,
    court_number: Option<FieldAliases>,
    starts_at: FieldAliases,
    ends_at: FieldAliases,
    reason: FieldAliases,
}

pub(crate) const NESTED_BLOCK_FIELDS: BlockFields = BlockFields {
    id: BLOCK_ID,
    court_number: Some(BLOCK_COURT_NUMBER),
    starts_at: BLOCK_STARTS_AT,
    ends_at: BLOCK_ENDS_AT,
    reason: BLOCK_REASON,
};

pub(crate) const FLAT_BLOCK_FIELDS: BlockFields = BlockFields {
    id: FLAT_BLOCK_ID,
    court_number: None,
    starts_at: FLAT_BLOCK_STARTS_AT,
    ends_at: FLAT_BLOCK_ENDS_AT,
    reason: FLAT_BLOCK_REASON,
};

/// Normalizes a nested block object. Returns `None` when there is no block.
#[must_use]
pub fn normalize_block(raw: Option<&Value>, court_number: u32, server_now: &str) -> Option<Block> {
    let record = RawRecord::new(raw);
    if !record.is_object() {
        if matches!(raw, Some(v) if !v.is_null()) {
            warn!(target: LOG_TARGET, kind = describe(raw), "block is not an object; ignoring");
        }
        return None;
    }
    Some(block_from_record(record, &NESTED_BLOCK_FIELDS, court_number, server_now))
}

pub(crate) fn block_from_record(
    record: RawRecord<'_>,
    fields: &BlockFields,
    court_number: u32,
    server_now: &str,
) -> Block {
    let id = record.string(&fields.id).unwrap_or_default();
    let court_number = fields
        .court_number
        .and_then(|aliases| record.integer(&aliases))
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(court_number);

    let starts_at = record.string(&fields.starts_at).unwrap_or_default();
    let ends_at = record.string(&fields.ends_at).unwrap_or_default();
    if clock::parse_instant(&starts_at).is_none() || clock::parse_instant(&ends_at).is_none() {
        warn!(
            target: LOG_TARGET,
            block_id = %id,
            starts_at = %starts_at,
            ends_at = %ends_at,
            "block window is missing or unparseable; treating as inactive"
        );
    }

    Block {
        is_active: clock::is_within(&starts_at, &ends_at, server_now),
        id,
        court_number,
        starts_at,
        ends_at,
        reason: record.string(&fields.reason).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const NOW: &str = "2025-12-27T10:30:00Z";

    #[test]
    fn active_when_now_inside_window() {
        let raw = json!({
            "id": "b1",
            "startsAt": "2025-12-27T10:00:00Z",
            "endsAt": "2025-12-27T11:00:00Z",
            "reason": "Resurfacing"
        });
        let block = normalize_block(Some(&raw), 5, NOW).unwrap();
        assert!(block.is_active);
        assert_eq!(block.court_number, 5);
        assert_eq!(block.reason, "Resurfacing");
    }

    #[test]
    fn inactive_before_start_and_at_end() {
        let future = json!({"id": "b1", "starts_at": "2025-12-27T11:00:00Z", "ends_at": "2025-12-27T12:00:00Z"});
        assert!(!normalize_block(Some(&future), 1, NOW).unwrap().is_active);
        let ending = json!({"id": "b1", "starts_at": "2025-12-27T10:00:00Z", "ends_at": NOW});
        assert!(!normalize_block(Some(&ending), 1, NOW).unwrap().is_active);
    }

    #[test]
    fn title_accepted_as_reason() {
        let raw = json!({"block_id": "b9", "title": "Junior clinic"});
        let block = normalize_block(Some(&raw), 1, NOW).unwrap();
        assert_eq!(block.id, "b9");
        assert_eq!(block.reason, "Junior clinic");
        assert!(!block.is_active);
    }

    #[test]
    fn flattened_block_columns() {
        let court_row = json!({
            "number": 3,
            "block_id": "b2",
            "block_starts_at": "2025-12-27T10:00:00Z",
            "block_ends_at": "2025-12-27T12:00:00Z",
            "block_title": "League"
        });
        let block = block_from_record(RawRecord::new(Some(&court_row)), &FLAT_BLOCK_FIELDS, 3, NOW);
        assert_eq!(block.id, "b2");
        assert_eq!(block.reason, "League");
        assert!(block.is_active);
    }

    #[test]
    fn null_block_is_none() {
        assert!(normalize_block(None, 1, NOW).is_none());
        assert!(normalize_block(Some(&Value::Null), 1, NOW).is_none());
    }
}

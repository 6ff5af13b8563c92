//! Court block commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::input::CommandInput;
use super::{court_command, CommandValidationError, CourtCommand, Preflight, PreflightResult};
use crate::clock;
use crate::types::Board;

/// Longest accepted block reason, in characters.
pub const MAX_BLOCK_REASON_LEN: usize = 200;

// ---------------------------------------------------------------------------
// CreateBlock
// ---------------------------------------------------------------------------

/// Takes a court out of play for `[starts_at, ends_at)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlockCommand {
    pub command_version: u32,
    pub court_id: String,
    pub starts_at: String,
    pub ends_at: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateBlockPayload {
    pub court_id: String,
    pub starts_at: String,
    pub ends_at: String,
    pub reason: String,
}

/// # Errors
///
/// Returns [`CommandValidationError`] listing every structural violation,
/// including an end time not after the start time.
pub fn build_create_block_command(input: &Value) -> Result<CreateBlockCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    let court_id = input.required_string("courtId");
    let starts_at = input.timestamp("startsAt");
    let ends_at = input.timestamp("endsAt");
    let reason = input.required_string("reason");

    if reason.chars().count() > MAX_BLOCK_REASON_LEN {
        input.issue(
            "reason",
            format!("String must contain at most {MAX_BLOCK_REASON_LEN} character(s)"),
        );
    }
    let times_valid = !input.has_issue_at("startsAt") && !input.has_issue_at("endsAt");
    if times_valid && !clock::is_before(&starts_at, &ends_at) {
        input.issue("endsAt", "End time must be after start time");
    }

    input.finish(
        CreateBlockCommand::NAME,
        CreateBlockCommand {
            command_version,
            court_id,
            starts_at,
            ends_at,
            reason,
        },
    )
}

/// The court must exist and its current block, if any, must not overlap.
pub fn preflight_create_block(command: &CreateBlockCommand, board: &Board) -> PreflightResult {
    let mut preflight = Preflight::new();
    if let Some(court) = preflight.court(board, &command.court_id, "Court") {
        if let Some(block) = &court.block {
            let overlaps = clock::is_before(&block.starts_at, &command.ends_at)
                && clock::is_before(&command.starts_at, &block.ends_at);
            if overlaps {
                preflight.fail(format!(
                    "Court {} already has a block from {} to {}",
                    court.number, block.starts_at, block.ends_at
                ));
            }
        }
    }
    preflight.finish()
}

#[must_use]
pub fn to_create_block_payload(command: &CreateBlockCommand) -> CreateBlockPayload {
    CreateBlockPayload {
        court_id: command.court_id.clone(),
        starts_at: command.starts_at.clone(),
        ends_at: command.ends_at.clone(),
        reason: command.reason.clone(),
    }
}

court_command!(
    CreateBlockCommand,
    CreateBlockPayload,
    "CreateBlockCommand",
    "create-block",
    build_create_block_command,
    preflight_create_block,
    to_create_block_payload
);

// ---------------------------------------------------------------------------
// DeleteBlock
// ---------------------------------------------------------------------------

/// Removes a block. Future blocks are not on the board, so there is no
/// preflight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBlockCommand {
    pub command_version: u32,
    pub block_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteBlockPayload {
    pub block_id: String,
}

/// # Errors
///
/// Returns [`CommandValidationError`] when `blockId` is missing or blank.
pub fn build_delete_block_command(input: &Value) -> Result<DeleteBlockCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    let block_id = input.required_string("blockId");
    input.finish(
        DeleteBlockCommand::NAME,
        DeleteBlockCommand {
            command_version,
            block_id,
        },
    )
}

#[must_use]
pub fn to_delete_block_payload(command: &DeleteBlockCommand) -> DeleteBlockPayload {
    DeleteBlockPayload {
        block_id: command.block_id.clone(),
    }
}

court_command!(
    DeleteBlockCommand,
    DeleteBlockPayload,
    "DeleteBlockCommand",
    "delete-block",
    build_delete_block_command,
    |_, _| PreflightResult::Ok,
    to_delete_block_payload
);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::commands::fixtures;

    fn create(court_id: &str, starts_at: &str, ends_at: &str) -> Result<CreateBlockCommand, CommandValidationError> {
        build_create_block_command(&json!({
            "courtId": court_id,
            "startsAt": starts_at,
            "endsAt": ends_at,
            "reason": "Lesson"
        }))
    }

    #[test]
    fn missing_fields_reported_together() {
        let err = build_create_block_command(&json!({
            "courtId": "court-1",
            "startsAt": "2025-12-28T09:00:00Z"
        }))
        .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Invalid CreateBlockCommand: "));
        assert!(message.contains("endsAt"));
        assert!(message.contains("reason"));
    }

    #[test]
    fn end_must_follow_start() {
        let err = create("court-1", "2025-12-28T10:00:00Z", "2025-12-28T10:00:00Z").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid CreateBlockCommand: endsAt: End time must be after start time"
        );
    }

    #[test]
    fn reason_length_limited() {
        let err = build_create_block_command(&json!({
            "courtId": "court-1",
            "startsAt": "2025-12-28T09:00:00Z",
            "endsAt": "2025-12-28T10:00:00Z",
            "reason": "x".repeat(MAX_BLOCK_REASON_LEN + 1)
        }))
        .unwrap_err();
        assert!(err.issues.touches("reason"));
    }

    #[test]
    fn overlapping_block_rejected() {
        let board = fixtures::board();
        let overlapping = create("court-4", "2025-12-27T23:30:00Z", "2025-12-28T01:00:00Z").unwrap();
        assert_eq!(
            preflight_create_block(&overlapping, &board).errors(),
            ["Court 4 already has a block from 2025-12-27T22:00:00Z to 2025-12-28T00:00:00Z"]
        );
        let adjacent = create("court-4", "2025-12-28T00:00:00Z", "2025-12-28T01:00:00Z").unwrap();
        assert!(preflight_create_block(&adjacent, &board).is_ok());
        let missing = create("court-99", "2025-12-28T00:00:00Z", "2025-12-28T01:00:00Z").unwrap();
        assert_eq!(preflight_create_block(&missing, &board).errors(), ["Court court-99 not found"]);
    }

    #[test]
    fn payloads_are_snake_case() {
        let command = create("court-1", "2025-12-28T09:00:00Z", "2025-12-28T10:00:00Z").unwrap();
        assert_eq!(
            serde_json::to_value(to_create_block_payload(&command)).unwrap(),
            json!({
                "court_id": "court-1",
                "starts_at": "2025-12-28T09:00:00Z",
                "ends_at": "2025-12-28T10:00:00Z",
                "reason": "Lesson"
            })
        );

        let delete = build_delete_block_command(&json!({"blockId": "b4"})).unwrap();
        assert_eq!(
            serde_json::to_value(to_delete_block_payload(&delete)).unwrap(),
            json!({"block_id": "b4"})
        );
        assert!(delete.preflight(&fixtures::board()).is_ok());
    }
}

//! Court commands: assign, end session, move.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::input::CommandInput;
use super::participants::{check_not_playing, read_group, CommandParticipant, ParticipantPayload};
use super::{court_command, CommandValidationError, CourtCommand, Preflight, PreflightResult};
use crate::types::{Board, EndReason, GroupType};

// ---------------------------------------------------------------------------
// AssignCourt
// ---------------------------------------------------------------------------

/// Puts a group on a court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCourtCommand {
    pub command_version: u32,
    pub court_id: String,
    pub participants: Vec<CommandParticipant>,
    pub group_type: GroupType,
    pub add_balls: bool,
    pub split_balls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignCourtPayload {
    pub court_id: String,
    pub group_type: GroupType,
    pub participants: Vec<ParticipantPayload>,
    pub add_balls: bool,
    pub split_balls: bool,
}

/// # Errors
///
/// Returns [`CommandValidationError`] listing every structural violation.
pub fn build_assign_court_command(input: &Value) -> Result<AssignCourtCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    let court_id = input.required_string("courtId");
    let (participants, group_type) = read_group(&mut input);
    let add_balls = input.bool_or("addBalls", false);
    let split_balls = input.bool_or("splitBalls", false);
    input.finish(
        AssignCourtCommand::NAME,
        AssignCourtCommand {
            command_version,
            court_id,
            participants,
            group_type,
            add_balls,
            split_balls,
        },
    )
}

/// The court must exist and be free, or in overtime (takeover). No member may
/// already be playing elsewhere.
pub fn preflight_assign_court(command: &AssignCourtCommand, board: &Board) -> PreflightResult {
    let mut preflight = Preflight::new();
    if let Some(court) = preflight.court(board, &command.court_id, "Court") {
        if court.is_blocked {
            preflight.fail(format!("Court {} is blocked", court.number));
        } else if court.is_occupied && !court.is_overtime {
            preflight.fail(format!("Court {} is not available", court.number));
        }
    }
    check_not_playing(&mut preflight, board, &command.participants);
    preflight.finish()
}

#[must_use]
pub fn to_assign_court_payload(command: &AssignCourtCommand) -> AssignCourtPayload {
    AssignCourtPayload {
        court_id: command.court_id.clone(),
        group_type: command.group_type,
        participants: command.participants.iter().map(ParticipantPayload::from).collect(),
        add_balls: command.add_balls,
        split_balls: command.split_balls,
    }
}

court_command!(
    AssignCourtCommand,
    AssignCourtPayload,
    "AssignCourtCommand",
    "assign-court",
    build_assign_court_command,
    preflight_assign_court,
    to_assign_court_payload
);

// ---------------------------------------------------------------------------
// EndSession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndSessionCommand {
    pub command_version: u32,
    pub court_id: String,
    pub end_reason: EndReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndSessionPayload {
    pub court_id: String,
    pub end_reason: EndReason,
}

/// `endReason` defaults to `cleared`.
///
/// # Errors
///
/// Returns [`CommandValidationError`] listing every structural violation.
pub fn build_end_session_command(input: &Value) -> Result<EndSessionCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    let court_id = input.required_string("courtId");
    let end_reason = input
        .optional_enum("endReason", EndReason::ALL_TAGS, EndReason::parse)
        .unwrap_or(EndReason::Cleared);
    input.finish(
        EndSessionCommand::NAME,
        EndSessionCommand {
            command_version,
            court_id,
            end_reason,
        },
    )
}

pub fn preflight_end_session(command: &EndSessionCommand, board: &Board) -> PreflightResult {
    let mut preflight = Preflight::new();
    if let Some(court) = preflight.court(board, &command.court_id, "Court") {
        if !court.is_occupied {
            preflight.fail(format!("Court {} has no active session", court.number));
        }
    }
    preflight.finish()
}

#[must_use]
pub fn to_end_session_payload(command: &EndSessionCommand) -> EndSessionPayload {
    EndSessionPayload {
        court_id: command.court_id.clone(),
        end_reason: command.end_reason,
    }
}

court_command!(
    EndSessionCommand,
    EndSessionPayload,
    "EndSessionCommand",
    "end-session",
    build_end_session_command,
    preflight_end_session,
    to_end_session_payload
);

// ---------------------------------------------------------------------------
// MoveCourt
// ---------------------------------------------------------------------------

/// Moves the session on one court to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCourtCommand {
    pub command_version: u32,
    pub from_court_id: String,
    pub to_court_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveCourtPayload {
    pub from_court_id: String,
    pub to_court_id: String,
}

/// Source and destination must differ; the check runs only once both ids
/// are individually valid.
///
/// # Errors
///
/// Returns [`CommandValidationError`] listing every structural violation.
pub fn build_move_court_command(input: &Value) -> Result<MoveCourtCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    let from_court_id = input.required_string("fromCourtId");
    let to_court_id = input.required_string("toCourtId");
    if !from_court_id.is_empty() && from_court_id == to_court_id {
        input.issue("toCourtId", "Source and destination court must differ");
    }
    input.finish(
        MoveCourtCommand::NAME,
        MoveCourtCommand {
            command_version,
            from_court_id,
            to_court_id,
        },
    )
}

pub fn preflight_move_court(command: &MoveCourtCommand, board: &Board) -> PreflightResult {
    let mut preflight = Preflight::new();
    if let Some(source) = preflight.court(board, &command.from_court_id, "Source court") {
        if !source.is_occupied {
            preflight.fail(format!("Source court {} has no active session", source.number));
        }
    }
    if let Some(destination) = preflight.court(board, &command.to_court_id, "Destination court") {
        if !destination.is_available {
            preflight.fail(format!(
                "Destination court {} is not available",
                destination.number
            ));
        }
    }
    preflight.finish()
}

#[must_use]
pub fn to_move_court_payload(command: &MoveCourtCommand) -> MoveCourtPayload {
    MoveCourtPayload {
        from_court_id: command.from_court_id.clone(),
        to_court_id: command.to_court_id.clone(),
    }
}

court_command!(
    MoveCourtCommand,
    MoveCourtPayload,
    "MoveCourtCommand",
    "move-court",
    build_move_court_command,
    preflight_move_court,
    to_move_court_payload
);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::commands::fixtures;

    fn assign(court_id: &str, member_id: &str) -> AssignCourtCommand {
        build_assign_court_command(&json!({
            "courtId": court_id,
            "participants": [{"memberId": member_id, "displayName": "Zed"}]
        }))
        .unwrap()
    }

    #[test]
    fn assign_court_builds_and_maps() {
        let command = build_assign_court_command(&json!({
            "courtId": " court-1 ",
            "participants": [
                {"memberId": "m9", "displayName": "Ivy"},
                {"isGuest": true, "displayName": "Visitor", "chargedToMemberId": "m9"}
            ],
            "addBalls": true
        }))
        .unwrap();
        assert_eq!(command.court_id, "court-1");
        assert_eq!(command.group_type, GroupType::Doubles);
        assert_eq!(command.command_version, 1);

        let payload = serde_json::to_value(to_assign_court_payload(&command)).unwrap();
        assert_eq!(
            payload,
            json!({
                "court_id": "court-1",
                "group_type": "doubles",
                "participants": [
                    {"type": "member", "member_id": "m9", "display_name": "Ivy"},
                    {"type": "guest", "display_name": "Visitor", "charged_to_member_id": "m9"}
                ],
                "add_balls": true,
                "split_balls": false
            })
        );
    }

    #[test]
    fn assign_court_reports_all_structural_issues() {
        let err = build_assign_court_command(&json!({"groupType": "mixed"})).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Invalid AssignCourtCommand: "));
        assert!(message.contains("courtId: Required"));
        assert!(message.contains("participants: Required"));
        assert!(message.contains("groupType: Invalid enum value"));
    }

    #[test]
    fn assign_court_preflight() {
        let board = fixtures::board();
        assert!(preflight_assign_court(&assign("court-1", "m9"), &board).is_ok());
        // Overtime courts can be taken over.
        assert!(preflight_assign_court(&assign("court-3", "m9"), &board).is_ok());
        assert_eq!(
            preflight_assign_court(&assign("court-2", "m9"), &board).errors(),
            ["Court 2 is not available"]
        );
        assert_eq!(
            preflight_assign_court(&assign("court-4", "m9"), &board).errors(),
            ["Court 4 is blocked"]
        );
        assert_eq!(
            preflight_assign_court(&assign("court-9", "m1"), &board).errors(),
            ["Court court-9 not found", "Zed is already playing on court 2"]
        );
    }

    #[test]
    fn end_session_defaults_reason() {
        let command = build_end_session_command(&json!({"courtId": "court-2"})).unwrap();
        assert_eq!(command.end_reason, EndReason::Cleared);
        let payload = serde_json::to_value(to_end_session_payload(&command)).unwrap();
        assert_eq!(payload, json!({"court_id": "court-2", "end_reason": "cleared"}));

        let err = build_end_session_command(&json!({"courtId": "court-2", "endReason": "bored"}))
            .unwrap_err();
        assert!(err.issues.touches("endReason"));
    }

    #[test]
    fn end_session_needs_occupied_court() {
        let board = fixtures::board();
        let command = build_end_session_command(&json!({"courtId": "court-3"})).unwrap();
        assert!(preflight_end_session(&command, &board).is_ok());
        let command = build_end_session_command(&json!({"courtId": "court-1"})).unwrap();
        assert_eq!(
            preflight_end_session(&command, &board).errors(),
            ["Court 1 has no active session"]
        );
    }

    #[test]
    fn move_court_rejects_same_court() {
        let err = build_move_court_command(&json!({"fromCourtId": "court-2", "toCourtId": "court-2"}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid MoveCourtCommand: toCourtId: Source and destination court must differ"
        );
    }

    #[test]
    fn move_court_preflight_checks_both_ends() {
        let board = fixtures::board();
        let ok = build_move_court_command(&json!({"fromCourtId": "court-2", "toCourtId": "court-1"}))
            .unwrap();
        assert!(preflight_move_court(&ok, &board).is_ok());

        let bad = build_move_court_command(&json!({"fromCourtId": "court-1", "toCourtId": "court-4"}))
            .unwrap();
        assert_eq!(
            preflight_move_court(&bad, &board).errors(),
            [
                "Source court 1 has no active session",
                "Destination court 4 is not available"
            ]
        );

        let missing = build_move_court_command(&json!({"fromCourtId": "x", "toCourtId": "y"})).unwrap();
        assert_eq!(
            preflight_move_court(&missing, &board).errors(),
            ["Source court x not found", "Destination court y not found"]
        );
    }

    #[test]
    fn trait_dispatch_matches_free_functions() {
        let board = fixtures::board();
        let command = <MoveCourtCommand as CourtCommand>::build(&json!({
            "fromCourtId": "court-2",
            "toCourtId": "court-1"
        }))
        .unwrap();
        assert_eq!(MoveCourtCommand::ENDPOINT, "move-court");
        assert!(command.preflight(&board).is_ok());
        assert_eq!(command.to_payload(), to_move_court_payload(&command));
    }
}

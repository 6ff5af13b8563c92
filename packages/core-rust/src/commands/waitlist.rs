//! Waitlist commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::input::CommandInput;
use super::participants::{
    check_not_playing, check_not_waiting, read_group, CommandParticipant, ParticipantPayload,
};
use super::{court_command, CommandValidationError, CourtCommand, Preflight, PreflightResult};
use crate::types::{Board, GroupType, WaitlistEntry, WaitlistStatus};

/// Looks up an entry, recording an error when it is missing or has left the
/// queue.
fn queued_entry<'b>(preflight: &mut Preflight, board: &'b Board, entry_id: &str) -> Option<&'b WaitlistEntry> {
    let Some(entry) = board.waitlist_entry(entry_id) else {
        preflight.fail(format!("Waitlist entry {entry_id} not found"));
        return None;
    };
    if !entry.status.is_waiting() {
        preflight.fail(format!("Waitlist entry {entry_id} is no longer waiting"));
        return None;
    }
    Some(entry)
}

// ---------------------------------------------------------------------------
// JoinWaitlist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinWaitlistCommand {
    pub command_version: u32,
    pub participants: Vec<CommandParticipant>,
    pub group_type: GroupType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinWaitlistPayload {
    pub group_type: GroupType,
    pub participants: Vec<ParticipantPayload>,
}

/// # Errors
///
/// Returns [`CommandValidationError`] listing every structural violation.
pub fn build_join_waitlist_command(input: &Value) -> Result<JoinWaitlistCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    let (participants, group_type) = read_group(&mut input);
    input.finish(
        JoinWaitlistCommand::NAME,
        JoinWaitlistCommand {
            command_version,
            participants,
            group_type,
        },
    )
}

/// No member may be on a court or already queued.
pub fn preflight_join_waitlist(command: &JoinWaitlistCommand, board: &Board) -> PreflightResult {
    let mut preflight = Preflight::new();
    check_not_playing(&mut preflight, board, &command.participants);
    check_not_waiting(&mut preflight, board, &command.participants);
    preflight.finish()
}

#[must_use]
pub fn to_join_waitlist_payload(command: &JoinWaitlistCommand) -> JoinWaitlistPayload {
    JoinWaitlistPayload {
        group_type: command.group_type,
        participants: command.participants.iter().map(ParticipantPayload::from).collect(),
    }
}

court_command!(
    JoinWaitlistCommand,
    JoinWaitlistPayload,
    "JoinWaitlistCommand",
    "join-waitlist",
    build_join_waitlist_command,
    preflight_join_waitlist,
    to_join_waitlist_payload
);

// ---------------------------------------------------------------------------
// CancelWaitlist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelWaitlistCommand {
    pub command_version: u32,
    pub waitlist_entry_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelWaitlistPayload {
    pub waitlist_entry_id: String,
}

/// # Errors
///
/// Returns [`CommandValidationError`] when `waitlistEntryId` is missing or blank.
pub fn build_cancel_waitlist_command(input: &Value) -> Result<CancelWaitlistCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    let waitlist_entry_id = input.required_string("waitlistEntryId");
    input.finish(
        CancelWaitlistCommand::NAME,
        CancelWaitlistCommand {
            command_version,
            waitlist_entry_id,
        },
    )
}

pub fn preflight_cancel_waitlist(command: &CancelWaitlistCommand, board: &Board) -> PreflightResult {
    let mut preflight = Preflight::new();
    queued_entry(&mut preflight, board, &command.waitlist_entry_id);
    preflight.finish()
}

#[must_use]
pub fn to_cancel_waitlist_payload(command: &CancelWaitlistCommand) -> CancelWaitlistPayload {
    CancelWaitlistPayload {
        waitlist_entry_id: command.waitlist_entry_id.clone(),
    }
}

court_command!(
    CancelWaitlistCommand,
    CancelWaitlistPayload,
    "CancelWaitlistCommand",
    "cancel-waitlist",
    build_cancel_waitlist_command,
    preflight_cancel_waitlist,
    to_cancel_waitlist_payload
);

// ---------------------------------------------------------------------------
// DeferWaitlist
// ---------------------------------------------------------------------------

/// Defers (or, with `deferred: false`, restores) a queued group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferWaitlistCommand {
    pub command_version: u32,
    pub waitlist_entry_id: String,
    pub deferred: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeferWaitlistPayload {
    pub waitlist_entry_id: String,
    pub deferred: bool,
}

/// `deferred` defaults to `true`.
///
/// # Errors
///
/// Returns [`CommandValidationError`] listing every structural violation.
pub fn build_defer_waitlist_command(input: &Value) -> Result<DeferWaitlistCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    let waitlist_entry_id = input.required_string("waitlistEntryId");
    let deferred = input.bool_or("deferred", true);
    input.finish(
        DeferWaitlistCommand::NAME,
        DeferWaitlistCommand {
            command_version,
            waitlist_entry_id,
            deferred,
        },
    )
}

pub fn preflight_defer_waitlist(command: &DeferWaitlistCommand, board: &Board) -> PreflightResult {
    let mut preflight = Preflight::new();
    let id = &command.waitlist_entry_id;
    if let Some(entry) = queued_entry(&mut preflight, board, id) {
        match (command.deferred, entry.status) {
            (true, WaitlistStatus::Deferred) => {
                preflight.fail(format!("Waitlist entry {id} is already deferred"));
            }
            (false, WaitlistStatus::Waiting) => {
                preflight.fail(format!("Waitlist entry {id} is not deferred"));
            }
            _ => {}
        }
    }
    preflight.finish()
}

#[must_use]
pub fn to_defer_waitlist_payload(command: &DeferWaitlistCommand) -> DeferWaitlistPayload {
    DeferWaitlistPayload {
        waitlist_entry_id: command.waitlist_entry_id.clone(),
        deferred: command.deferred,
    }
}

court_command!(
    DeferWaitlistCommand,
    DeferWaitlistPayload,
    "DeferWaitlistCommand",
    "defer-waitlist",
    build_defer_waitlist_command,
    preflight_defer_waitlist,
    to_defer_waitlist_payload
);

// ---------------------------------------------------------------------------
// AssignFromWaitlist
// ---------------------------------------------------------------------------

/// Moves a queued group onto a free court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignFromWaitlistCommand {
    pub command_version: u32,
    pub waitlist_entry_id: String,
    pub court_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignFromWaitlistPayload {
    pub waitlist_entry_id: String,
    pub court_id: String,
}

/// # Errors
///
/// Returns [`CommandValidationError`] listing every structural violation.
pub fn build_assign_from_waitlist_command(
    input: &Value,
) -> Result<AssignFromWaitlistCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    let waitlist_entry_id = input.required_string("waitlistEntryId");
    let court_id = input.required_string("courtId");
    input.finish(
        AssignFromWaitlistCommand::NAME,
        AssignFromWaitlistCommand {
            command_version,
            waitlist_entry_id,
            court_id,
        },
    )
}

/// Entry and court are checked independently; both failures are reported.
pub fn preflight_assign_from_waitlist(command: &AssignFromWaitlistCommand, board: &Board) -> PreflightResult {
    let mut preflight = Preflight::new();
    queued_entry(&mut preflight, board, &command.waitlist_entry_id);
    if let Some(court) = preflight.court(board, &command.court_id, "Target court") {
        if !court.is_available {
            preflight.fail(format!("Target court {} is not available", court.number));
        }
    }
    preflight.finish()
}

#[must_use]
pub fn to_assign_from_waitlist_payload(command: &AssignFromWaitlistCommand) -> AssignFromWaitlistPayload {
    AssignFromWaitlistPayload {
        waitlist_entry_id: command.waitlist_entry_id.clone(),
        court_id: command.court_id.clone(),
    }
}

court_command!(
    AssignFromWaitlistCommand,
    AssignFromWaitlistPayload,
    "AssignFromWaitlistCommand",
    "assign-from-waitlist",
    build_assign_from_waitlist_command,
    preflight_assign_from_waitlist,
    to_assign_from_waitlist_payload
);

// ---------------------------------------------------------------------------
// RemoveFromWaitlist
// ---------------------------------------------------------------------------

/// Administrative removal; unlike cancel it accepts entries in any status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromWaitlistCommand {
    pub command_version: u32,
    pub waitlist_entry_id: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveFromWaitlistPayload {
    pub waitlist_entry_id: String,
    pub reason: Option<String>,
}

/// # Errors
///
/// Returns [`CommandValidationError`] listing every structural violation.
pub fn build_remove_from_waitlist_command(
    input: &Value,
) -> Result<RemoveFromWaitlistCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    let waitlist_entry_id = input.required_string("waitlistEntryId");
    let reason = input.optional_string("reason");
    input.finish(
        RemoveFromWaitlistCommand::NAME,
        RemoveFromWaitlistCommand {
            command_version,
            waitlist_entry_id,
            reason,
        },
    )
}

pub fn preflight_remove_from_waitlist(command: &RemoveFromWaitlistCommand, board: &Board) -> PreflightResult {
    let mut preflight = Preflight::new();
    if board.waitlist_entry(&command.waitlist_entry_id).is_none() {
        preflight.fail(format!("Waitlist entry {} not found", command.waitlist_entry_id));
    }
    preflight.finish()
}

#[must_use]
pub fn to_remove_from_waitlist_payload(command: &RemoveFromWaitlistCommand) -> RemoveFromWaitlistPayload {
    RemoveFromWaitlistPayload {
        waitlist_entry_id: command.waitlist_entry_id.clone(),
        reason: command.reason.clone(),
    }
}

court_command!(
    RemoveFromWaitlistCommand,
    RemoveFromWaitlistPayload,
    "RemoveFromWaitlistCommand",
    "remove-from-waitlist",
    build_remove_from_waitlist_command,
    preflight_remove_from_waitlist,
    to_remove_from_waitlist_payload
);

// ---------------------------------------------------------------------------
// ClearWaitlist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearWaitlistCommand {
    pub command_version: u32,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearWaitlistPayload {}

/// # Errors
///
/// Returns [`CommandValidationError`] when the input is not an object or
/// carries an unsupported `commandVersion`.
pub fn build_clear_waitlist_command(input: &Value) -> Result<ClearWaitlistCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    input.finish(ClearWaitlistCommand::NAME, ClearWaitlistCommand { command_version })
}

pub fn preflight_clear_waitlist(_command: &ClearWaitlistCommand, board: &Board) -> PreflightResult {
    let mut preflight = Preflight::new();
    if !board.waitlist.iter().any(|e| e.status.is_waiting()) {
        preflight.fail("Waitlist is already empty");
    }
    preflight.finish()
}

#[must_use]
pub fn to_clear_waitlist_payload(_command: &ClearWaitlistCommand) -> ClearWaitlistPayload {
    ClearWaitlistPayload {}
}

court_command!(
    ClearWaitlistCommand,
    ClearWaitlistPayload,
    "ClearWaitlistCommand",
    "clear-waitlist",
    build_clear_waitlist_command,
    preflight_clear_waitlist,
    to_clear_waitlist_payload
);

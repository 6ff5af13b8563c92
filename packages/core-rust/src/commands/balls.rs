//! Ball purchases charged against a session.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::input::CommandInput;
use super::{court_command, CommandValidationError, CourtCommand, Preflight, PreflightResult};
use crate::types::Board;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseBallsCommand {
    pub command_version: u32,
    pub session_id: String,
    /// Account charged when the cost is not split.
    pub account_id: String,
    pub split_balls: bool,
    /// Accounts sharing the cost; non-empty exactly when `split_balls`.
    pub split_account_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseBallsPayload {
    pub session_id: String,
    pub account_id: String,
    pub split_balls: bool,
    pub split_account_ids: Vec<String>,
}

/// # Errors
///
/// Returns [`CommandValidationError`] listing every structural violation.
/// Splitting without any `splitAccountIds` is one of them.
pub fn build_purchase_balls_command(input: &Value) -> Result<PurchaseBallsCommand, CommandValidationError> {
    let mut input = CommandInput::new(input);
    let command_version = input.command_version();
    let session_id = input.required_string("sessionId");
    let account_id = input.required_string("accountId");
    let split_balls = input.bool_or("splitBalls", false);
    let split_account_ids = input.string_list("splitAccountIds");
    if split_balls && split_account_ids.is_empty() && !input.has_issue_at("splitAccountIds") {
        input.issue("splitAccountIds", "Required when splitting balls");
    }
    input.finish(
        PurchaseBallsCommand::NAME,
        PurchaseBallsCommand {
            command_version,
            session_id,
            account_id,
            split_balls,
            split_account_ids,
        },
    )
}

/// The session must be on the board and still running.
pub fn preflight_purchase_balls(command: &PurchaseBallsCommand, board: &Board) -> PreflightResult {
    let mut preflight = Preflight::new();
    match board.session_by_id(&command.session_id) {
        None => preflight.fail(format!("Session {} not found", command.session_id)),
        Some((_, session)) if !session.is_active() => {
            preflight.fail(format!("Session {} has already ended", command.session_id));
        }
        Some(_) => {}
    }
    preflight.finish()
}

#[must_use]
pub fn to_purchase_balls_payload(command: &PurchaseBallsCommand) -> PurchaseBallsPayload {
    PurchaseBallsPayload {
        session_id: command.session_id.clone(),
        account_id: command.account_id.clone(),
        split_balls: command.split_balls,
        split_account_ids: command.split_account_ids.clone(),
    }
}

court_command!(
    PurchaseBallsCommand,
    PurchaseBallsPayload,
    "PurchaseBallsCommand",
    "purchase-balls",
    build_purchase_balls_command,
    preflight_purchase_balls,
    to_purchase_balls_payload
);

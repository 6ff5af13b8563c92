//! Outbound mutation commands.
//!
//! Each mutation is modelled three ways:
//!
//! 1. **Builder** (`build_*_command`): raw UI input to a validated command.
//!    Structural problems are collected and returned as one
//!    [`CommandValidationError`].
//! 2. **Preflight** (`preflight_*`): checks a command against the current
//!    [`Board`] for feasibility. Errors accumulate into a [`PreflightResult`].
//! 3. **Wire mapper** (`to_*_payload`): a pure rename of the command into the
//!    snake_case request body.
//!
//! [`CourtCommand`] ties the three together so the service layer can
//! dispatch any command generically.

pub mod balls;
pub mod block;
pub mod court;
mod input;
pub mod participants;
pub mod waitlist;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::schema::Issues;
use crate::types::{Board, Court};

pub use balls::{
    build_purchase_balls_command, preflight_purchase_balls, to_purchase_balls_payload,
    PurchaseBallsCommand, PurchaseBallsPayload,
};
pub use block::{
    build_create_block_command, build_delete_block_command, preflight_create_block,
    to_create_block_payload, to_delete_block_payload, CreateBlockCommand, CreateBlockPayload,
    DeleteBlockCommand, DeleteBlockPayload, MAX_BLOCK_REASON_LEN,
};
pub use court::{
    build_assign_court_command, build_end_session_command, build_move_court_command,
    preflight_assign_court, preflight_end_session, preflight_move_court, to_assign_court_payload,
    to_end_session_payload, to_move_court_payload, AssignCourtCommand, AssignCourtPayload,
    EndSessionCommand, EndSessionPayload, MoveCourtCommand, MoveCourtPayload,
};
pub use participants::{CommandParticipant, ParticipantPayload};
pub use waitlist::{
    build_assign_from_waitlist_command, build_cancel_waitlist_command,
    build_clear_waitlist_command, build_defer_waitlist_command, build_join_waitlist_command,
    build_remove_from_waitlist_command, preflight_assign_from_waitlist, preflight_cancel_waitlist,
    preflight_clear_waitlist, preflight_defer_waitlist, preflight_join_waitlist,
    preflight_remove_from_waitlist, to_assign_from_waitlist_payload, to_cancel_waitlist_payload,
    to_clear_waitlist_payload, to_defer_waitlist_payload, to_join_waitlist_payload,
    to_remove_from_waitlist_payload, AssignFromWaitlistCommand, AssignFromWaitlistPayload,
    CancelWaitlistCommand, CancelWaitlistPayload, ClearWaitlistCommand, ClearWaitlistPayload,
    DeferWaitlistCommand, DeferWaitlistPayload, JoinWaitlistCommand, JoinWaitlistPayload,
    RemoveFromWaitlistCommand, RemoveFromWaitlistPayload,
};

/// Version stamped on every command built by this crate.
pub const COMMAND_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Errors and results
// ---------------------------------------------------------------------------

/// A command failed structural validation. Lists every violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {command}: {issues}")]
pub struct CommandValidationError {
    /// Command type name, e.g. `CreateBlockCommand`.
    pub command: &'static str,
    pub issues: Issues,
}

/// Outcome of a preflight check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum PreflightResult {
    Ok,
    Failed {
        /// Every infeasibility found, in check order.
        errors: Vec<String>,
    },
}

impl PreflightResult {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// The accumulated errors; empty when the check passed.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Ok => &[],
            Self::Failed { errors } => errors,
        }
    }
}

impl fmt::Display for PreflightResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Failed { errors } => f.write_str(&errors.join("; ")),
        }
    }
}

/// Accumulates preflight errors. Checks never short-circuit.
#[derive(Debug, Default)]
pub(crate) struct Preflight {
    errors: Vec<String>,
}

impl Preflight {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Looks up a court by id, recording `"<role> <id> not found"` when absent.
    pub(crate) fn court<'b>(&mut self, board: &'b Board, court_id: &str, role: &str) -> Option<&'b Court> {
        let court = board.court_by_id(court_id);
        if court.is_none() {
            self.fail(format!("{role} {court_id} not found"));
        }
        court
    }

    pub(crate) fn finish(self) -> PreflightResult {
        if self.errors.is_empty() {
            PreflightResult::Ok
        } else {
            PreflightResult::Failed {
                errors: self.errors,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// CourtCommand
// ---------------------------------------------------------------------------

/// A validated mutation that can be preflighted and sent over the wire.
pub trait CourtCommand: Sized + Send + Sync {
    /// Command type name used in error messages and logs.
    const NAME: &'static str;
    /// Endpoint path segment the payload is posted to.
    const ENDPOINT: &'static str;
    /// Snake_case request body.
    type Payload: Serialize;

    /// Validates raw UI input into a command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandValidationError`] listing every structural violation.
    fn build(input: &Value) -> Result<Self, CommandValidationError>;

    /// Checks the command against the current board.
    fn preflight(&self, board: &Board) -> PreflightResult;

    /// Maps the command to its wire payload.
    fn to_payload(&self) -> Self::Payload;
}

/// Implements [`CourtCommand`] by delegating to the free functions.
macro_rules! court_command {
    ($command:ty, $payload:ty, $name:literal, $endpoint:literal, $build:path, $preflight:expr, $to_payload:path) => {
        impl $crate::commands::CourtCommand for $command {
            const NAME: &'static str = $name;
            const ENDPOINT: &'static str = $endpoint;
            type Payload = $payload;

            fn build(
                input: &::serde_json::Value,
            ) -> Result<Self, $crate::commands::CommandValidationError> {
                $build(input)
            }

            fn preflight(&self, board: &$crate::types::Board) -> $crate::commands::PreflightResult {
                let check: fn(&Self, &$crate::types::Board) -> $crate::commands::PreflightResult =
                    $preflight;
                check(self, board)
            }

            fn to_payload(&self) -> Self::Payload {
                $to_payload(self)
            }
        }
    };
}

pub(crate) use court_command;

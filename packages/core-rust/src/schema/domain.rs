//! Strict validation of a normalized [`Board`].
//!
//! Every check here should hold by construction after normalization, so a
//! failure is logged as a normalizer bug. Callers choose between the
//! non-throwing [`validate_board`] and the fail-fast [`assert_valid_board`].

use std::collections::HashSet;

use tracing::error;

use super::{Issues, ValidationResult, LOG_TARGET};
use crate::clock;
use crate::types::{
    is_valid_court_number, Block, Board, Court, Group, Session, WaitlistEntry, COURT_COUNT,
    MAX_GROUP_SIZE,
};

/// Raised by [`assert_valid_board`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid Board domain object: {issues}")]
pub struct BoardAssertionError {
    pub issues: Issues,
}

/// Validates a normalized board, logging any failure as a normalizer bug.
pub fn validate_board(board: &Board) -> ValidationResult<&Board> {
    let mut issues = Issues::new();
    check_board(board, &mut issues);

    if !issues.is_empty() {
        error!(
            target: LOG_TARGET,
            issue_count = issues.len(),
            issues = %issues,
            "normalized board failed domain validation; normalization layer is suspect"
        );
    }
    issues.finish(board)
}

/// Validates a normalized board and fails fast.
///
/// # Errors
///
/// Returns [`BoardAssertionError`] listing every violated constraint.
pub fn assert_valid_board(board: &Board) -> Result<&Board, BoardAssertionError> {
    validate_board(board)
        .into_result()
        .map_err(|issues| BoardAssertionError { issues })
}

fn check_board(board: &Board, issues: &mut Issues) {
    check_timestamp(&board.server_now, "serverNow", issues);

    let mut seen_numbers = HashSet::new();
    for (i, court) in board.courts.iter().enumerate() {
        let path = format!("courts.{i}");
        check_court(court, &path, issues);
        if is_valid_court_number(court.number) && !seen_numbers.insert(court.number) {
            issues.push(format!("{path}.number"), format!("Duplicate court number {}", court.number));
        }
    }

    let mut previous: Option<i64> = None;
    for (i, entry) in board.waitlist.iter().enumerate() {
        let path = format!("waitlist.{i}");
        check_waitlist_entry(entry, &path, issues);
        if previous.is_some_and(|p| p > entry.position) {
            issues.push(format!("{path}.position"), "Waitlist is not sorted by position");
        }
        previous = Some(entry.position);
    }
}

fn check_court(court: &Court, path: &str, issues: &mut Issues) {
    if !is_valid_court_number(court.number) {
        issues.push(
            format!("{path}.number"),
            format!("Court number must be between 1 and {COURT_COUNT}, received {}", court.number),
        );
    }
    if court.is_available != (!court.is_occupied && !court.is_blocked) {
        issues.push(
            format!("{path}.isAvailable"),
            "isAvailable must equal !isOccupied && !isBlocked",
        );
    }
    if court.is_overtime && !court.is_occupied {
        issues.push(format!("{path}.isOvertime"), "Overtime court must be occupied");
    }
    if let Some(session) = &court.session {
        check_session(session, court.number, &format!("{path}.session"), issues);
    }
    if let Some(block) = &court.block {
        check_block(block, court.number, &format!("{path}.block"), issues);
    }
}

fn check_session(session: &Session, court_number: u32, path: &str, issues: &mut Issues) {
    if session.id.is_empty() {
        issues.push(format!("{path}.id"), "Required");
    }
    if session.court_number != court_number {
        issues.push(
            format!("{path}.courtNumber"),
            format!("Session court {} does not match court {court_number}", session.court_number),
        );
    }
    check_timestamp(&session.started_at, &format!("{path}.startedAt"), issues);
    check_timestamp(&session.scheduled_end_at, &format!("{path}.scheduledEndAt"), issues);
    if let Some(actual) = &session.actual_end_at {
        check_timestamp(actual, &format!("{path}.actualEndAt"), issues);
        if session.is_overtime {
            issues.push(format!("{path}.isOvertime"), "Ended session cannot be overtime");
        }
    }
    check_group(&session.group, &format!("{path}.group"), issues);
}

fn check_block(block: &Block, court_number: u32, path: &str, issues: &mut Issues) {
    if block.court_number != court_number {
        issues.push(
            format!("{path}.courtNumber"),
            format!("Block court {} does not match court {court_number}", block.court_number),
        );
    }
    check_timestamp(&block.starts_at, &format!("{path}.startsAt"), issues);
    check_timestamp(&block.ends_at, &format!("{path}.endsAt"), issues);
}

fn check_waitlist_entry(entry: &WaitlistEntry, path: &str, issues: &mut Issues) {
    if entry.id.is_empty() {
        issues.push(format!("{path}.id"), "Required");
    }
    if entry.position < 1 {
        issues.push(format!("{path}.position"), "Number must be greater than or equal to 1");
    }
    if entry.minutes_waiting < 0 {
        issues.push(format!("{path}.minutesWaiting"), "Number must be greater than or equal to 0");
    }
    check_timestamp(&entry.joined_at, &format!("{path}.joinedAt"), issues);
    if let Some(estimate) = &entry.estimated_court_time {
        check_timestamp(estimate, &format!("{path}.estimatedCourtTime"), issues);
    }
    check_group(&entry.group, &format!("{path}.group"), issues);
}

fn check_group(group: &Group, path: &str, issues: &mut Issues) {
    if group.players.len() > MAX_GROUP_SIZE {
        issues.push(
            format!("{path}.players"),
            format!("Array must contain at most {MAX_GROUP_SIZE} element(s)"),
        );
    }
    for (i, member) in group.players.iter().enumerate() {
        if member.member_id.is_empty() {
            issues.push(format!("{path}.players.{i}.memberId"), "Required");
        }
        if member.display_name.is_empty() {
            issues.push(format!("{path}.players.{i}.displayName"), "Required");
        }
    }
}

fn check_timestamp(value: &str, path: &str, issues: &mut Issues) {
    if clock::parse_instant(value).is_none() {
        issues.push(path, "Invalid datetime");
    }
}

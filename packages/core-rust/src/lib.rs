//! Courtboard Core: board normalization, validation, and mutation commands.
//!
//! The read path turns a loosely shaped board response into a canonical
//! [`Board`]: [`validate_board_response`] (log-only), [`normalize_board`],
//! then [`validate_board`] (log-only). The write path builds a validated
//! command from UI input, preflights it against the current board, and maps
//! it to its wire payload. Transport failures are normalized into
//! [`DomainError`].
//!
//! Everything here is synchronous and stateless.

pub mod aliases;
pub mod clock;
pub mod commands;
pub mod error;
pub mod normalize;
pub mod raw;
pub mod schema;
pub mod types;

pub use commands::{CommandValidationError, CourtCommand, PreflightResult, COMMAND_VERSION};
pub use error::{normalize_service_error, DomainError, ErrorCode, ErrorContext, ThrownError};
pub use normalize::{ingest_board, normalize_board};
pub use raw::{FieldAliases, RawRecord};
pub use schema::{
    assert_valid_board, validate_board, validate_board_response, BoardAssertionError,
    BoardEnvelope, Issue, Issues, ValidationResult,
};
pub use types::{
    Block, Board, Court, CourtStatus, EndReason, Group, GroupType, Member, Session, WaitlistEntry,
    WaitlistStatus, COURT_COUNT, MAX_GROUP_SIZE,
};

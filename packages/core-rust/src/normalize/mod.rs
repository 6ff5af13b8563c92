//! Normalizers: raw upstream JSON to the canonical domain model.
//!
//! Every normalizer accepts `Option<&Value>` (`None` is an absent value,
//! `Some(Value::Null)` an explicit null) and always returns a populated
//! domain value. Malformed input is logged under the
//! `courtboard::normalize` target and replaced with a safe default; nothing
//! here panics or returns an error.
//!
//! Normalizers hold no state between calls. Temporal flags are derived from
//! the `server_now` passed in, never from the local clock.

pub mod block;
pub mod board;
pub mod court;
pub mod group;
pub mod member;
pub mod session;
pub mod waitlist;

pub use block::normalize_block;
pub use board::{ingest_board, normalize_board};
pub use court::normalize_court;
pub use group::{is_valid_group, normalize_group};
pub use member::normalize_member;
pub use session::normalize_session;
pub use waitlist::normalize_waitlist_entry;

pub(crate) use crate::raw::json_kind as describe;

pub(crate) const LOG_TARGET: &str = "courtboard::normalize";

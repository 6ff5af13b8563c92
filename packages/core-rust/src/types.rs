//! Canonical domain model for a court board snapshot.
//!
//! Every type here is produced by the normalizers in [`crate::normalize`] and
//! checked by [`crate::schema::domain`]. All structs use
//! `#[serde(rename_all = "camelCase")]` so the serialized shape is the one the
//! courtboard, registration, and admin views read.
//!
//! Timestamps stay ISO-8601 strings; temporal comparisons parse them through
//! [`crate::clock`] against the board's `serverNow`.

use serde::{Deserialize, Serialize};

/// Number of physical courts. Valid court numbers are `1..=COURT_COUNT`.
pub const COURT_COUNT: u32 = 12;

/// Largest group a single court accepts.
pub const MAX_GROUP_SIZE: usize = 4;

/// Returns whether `number` belongs to the fixed set of valid court numbers.
#[must_use]
pub fn is_valid_court_number(number: u32) -> bool {
    (1..=COURT_COUNT).contains(&number)
}

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

/// A single participant (club member or guest).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub member_id: String,
    pub display_name: String,
    pub is_guest: bool,
}

impl Member {
    /// Placeholder used when upstream member data is missing entirely.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            member_id: "unknown".to_string(),
            display_name: "Unknown".to_string(),
            is_guest: false,
        }
    }
}

impl Default for Member {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Group size classification. Lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Singles,
    Doubles,
    Foursome,
}

impl GroupType {
    pub const ALL_TAGS: &'static [&'static str] = &["singles", "doubles", "foursome"];

    /// Parses a wire tag. Unknown tags yield `None`.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "singles" => Some(Self::Singles),
            "doubles" => Some(Self::Doubles),
            "foursome" => Some(Self::Foursome),
            _ => None,
        }
    }

    /// Infers the group type from a player count: up to one player is
    /// singles, two is doubles, anything larger is a foursome.
    #[must_use]
    pub fn for_player_count(count: usize) -> Self {
        match count {
            0 | 1 => Self::Singles,
            2 => Self::Doubles,
            _ => Self::Foursome,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Singles => "singles",
            Self::Doubles => "doubles",
            Self::Foursome => "foursome",
        }
    }
}

/// Players sharing a court session or a waitlist slot.
///
/// An empty `players` list is a valid state (cleared or blocked court).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub players: Vec<Member>,
    #[serde(rename = "type")]
    pub group_type: GroupType,
}

impl Group {
    /// An empty group with no identifier.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            players: Vec::new(),
            group_type: GroupType::Singles,
        }
    }

    /// Ids of non-guest players.
    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.players
            .iter()
            .filter(|m| !m.is_guest && m.member_id != "unknown")
            .map(|m| m.member_id.as_str())
    }
}

// ---------------------------------------------------------------------------
// Sessions and blocks
// ---------------------------------------------------------------------------

/// Why a session ended. Snake case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Cleared,
    ObservedCleared,
    AdminOverride,
    OvertimeTakeover,
    AutoCleared,
}

impl EndReason {
    pub const ALL_TAGS: &'static [&'static str] = &[
        "cleared",
        "observed_cleared",
        "admin_override",
        "overtime_takeover",
        "auto_cleared",
    ];

    /// Parses a wire tag. Unrecognized tags yield `None`.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "cleared" => Some(Self::Cleared),
            "observed_cleared" => Some(Self::ObservedCleared),
            "admin_override" => Some(Self::AdminOverride),
            "overtime_takeover" => Some(Self::OvertimeTakeover),
            "auto_cleared" => Some(Self::AutoCleared),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cleared => "cleared",
            Self::ObservedCleared => "observed_cleared",
            Self::AdminOverride => "admin_override",
            Self::OvertimeTakeover => "overtime_takeover",
            Self::AutoCleared => "auto_cleared",
        }
    }
}

/// A group's occupation of a court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub court_number: u32,
    pub group: Group,
    pub started_at: String,
    pub scheduled_end_at: String,
    pub actual_end_at: Option<String>,
    pub end_reason: Option<EndReason>,
    /// True iff `actual_end_at` is unset and `scheduled_end_at` is before `serverNow`.
    pub is_overtime: bool,
    pub is_tournament: bool,
}

impl Session {
    /// A session still holds its court until an actual end is recorded.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.actual_end_at.is_none()
    }
}

/// A reservation or maintenance window on one court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    pub court_number: u32,
    pub starts_at: String,
    pub ends_at: String,
    pub reason: String,
    /// `starts_at <= serverNow < ends_at`.
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Courts
// ---------------------------------------------------------------------------

/// Explicit court status as sent by the board endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourtStatus {
    Available,
    Occupied,
    Overtime,
    Blocked,
}

impl CourtStatus {
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "available" => Some(Self::Available),
            "occupied" => Some(Self::Occupied),
            "overtime" => Some(Self::Overtime),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

/// One court with its derived state flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Court {
    /// Court UUID. Required by every write command that targets a court.
    pub id: String,
    pub number: u32,
    pub is_occupied: bool,
    pub is_blocked: bool,
    pub is_overtime: bool,
    /// Always `!is_occupied && !is_blocked`.
    pub is_available: bool,
    pub is_tournament: bool,
    pub session: Option<Session>,
    pub block: Option<Block>,
}

impl Court {
    /// Stand-in for a court record that was null or missing upstream.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: String::new(),
            number: 0,
            is_occupied: false,
            is_blocked: false,
            is_overtime: false,
            is_available: true,
            is_tournament: false,
            session: None,
            block: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Waitlist
// ---------------------------------------------------------------------------

/// Lifecycle of a waitlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistStatus {
    #[default]
    Waiting,
    /// Still queued but skipped when the next court frees up.
    Deferred,
    Assigned,
    Cancelled,
}

impl WaitlistStatus {
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "waiting" => Some(Self::Waiting),
            "deferred" => Some(Self::Deferred),
            "assigned" => Some(Self::Assigned),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether the entry is still in the queue (deferred entries included).
    #[must_use]
    pub fn is_waiting(self) -> bool {
        matches!(self, Self::Waiting | Self::Deferred)
    }
}

/// A group waiting for a court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: String,
    pub position: i64,
    pub group: Group,
    pub joined_at: String,
    pub minutes_waiting: i64,
    pub estimated_court_time: Option<String>,
    pub status: WaitlistStatus,
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Immutable snapshot of every court and the waitlist at `server_now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub server_now: String,
    pub courts: Vec<Court>,
    /// Sorted ascending by `position`.
    pub waitlist: Vec<WaitlistEntry>,
}

impl Board {
    #[must_use]
    pub fn court_by_id(&self, id: &str) -> Option<&Court> {
        if id.is_empty() {
            return None;
        }
        self.courts.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn court_by_number(&self, number: u32) -> Option<&Court> {
        self.courts.iter().find(|c| c.number == number)
    }

    #[must_use]
    pub fn waitlist_entry(&self, id: &str) -> Option<&WaitlistEntry> {
        if id.is_empty() {
            return None;
        }
        self.waitlist.iter().find(|e| e.id == id)
    }

    /// Finds a session by id together with the court holding it.
    #[must_use]
    pub fn session_by_id(&self, id: &str) -> Option<(&Court, &Session)> {
        if id.is_empty() {
            return None;
        }
        self.courts.iter().find_map(|court| {
            court
                .session
                .as_ref()
                .filter(|s| s.id == id)
                .map(|s| (court, s))
        })
    }

    /// Court number a member is currently playing on, if any.
    #[must_use]
    pub fn playing_court_of(&self, member_id: &str) -> Option<u32> {
        self.courts.iter().find_map(|court| {
            let session = court.session.as_ref().filter(|s| s.is_active())?;
            session
                .group
                .member_ids()
                .any(|id| id == member_id)
                .then_some(court.number)
        })
    }

    /// Waitlist entry a member is still queued in, if any.
    #[must_use]
    pub fn waiting_entry_of(&self, member_id: &str) -> Option<&WaitlistEntry> {
        self.waitlist
            .iter()
            .filter(|e| e.status.is_waiting())
            .find(|e| e.group.member_ids().any(|id| id == member_id))
    }
}

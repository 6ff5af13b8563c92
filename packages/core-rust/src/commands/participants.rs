//! Participant lists shared by court assignment and waitlist commands.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::input::{CommandInput, ItemInput};
use super::Preflight;
use crate::types::{Board, GroupType, MAX_GROUP_SIZE};

/// A player named in a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandParticipant {
    /// Required for members, absent for guests.
    pub member_id: Option<String>,
    pub display_name: Option<String>,
    pub is_guest: bool,
    /// Member whose account pays the guest fee.
    pub charged_to_member_id: Option<String>,
}

impl CommandParticipant {
    fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.member_id.as_deref())
            .unwrap_or("Guest")
    }
}

/// Wire shape of one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantPayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub member_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub charged_to_member_id: Option<String>,
}

impl From<&CommandParticipant> for ParticipantPayload {
    fn from(p: &CommandParticipant) -> Self {
        Self {
            kind: if p.is_guest { "guest" } else { "member" }.to_string(),
            member_id: p.member_id.clone(),
            display_name: p.display_name.clone(),
            charged_to_member_id: p.charged_to_member_id.clone(),
        }
    }
}

/// Reads `participants` (1..=4 entries) and `groupType` from command input.
///
/// Members need a `memberId`; guests need a `displayName`. A member may
/// appear only once. `groupType` defaults to the size-derived type.
pub(crate) fn read_group(input: &mut CommandInput<'_>) -> (Vec<CommandParticipant>, GroupType) {
    let raw = input.array("participants");
    if !input.has_issue_at("participants") {
        if raw.is_empty() {
            input.issue("participants", "Array must contain at least 1 element(s)");
        } else if raw.len() > MAX_GROUP_SIZE {
            input.issue(
                "participants",
                format!("Array must contain at most {MAX_GROUP_SIZE} element(s)"),
            );
        }
    }

    let mut seen = HashSet::new();
    let mut participants = Vec::with_capacity(raw.len());
    for (i, value) in raw.iter().enumerate() {
        let mut item = ItemInput::new(input, format!("participants.{i}"), value);
        let is_guest = item.bool_or("isGuest", false);
        let member_id = item.optional_string("memberId");
        let display_name = item.optional_string("displayName");
        let charged_to_member_id = item.optional_string("chargedToMemberId");

        if is_guest {
            if display_name.is_none() {
                item.issue("displayName", "Required for guests");
            }
        } else {
            match &member_id {
                None => item.issue("memberId", "Required"),
                Some(id) if !seen.insert(id.clone()) => {
                    item.issue("memberId", format!("Duplicate member {id}"));
                }
                Some(_) => {}
            }
        }

        participants.push(CommandParticipant {
            member_id,
            display_name,
            is_guest,
            charged_to_member_id,
        });
    }

    let group_type = input
        .optional_enum("groupType", GroupType::ALL_TAGS, GroupType::parse)
        .unwrap_or_else(|| GroupType::for_player_count(participants.len()));

    (participants, group_type)
}

/// Members of `participants` already holding a court.
pub(crate) fn check_not_playing(preflight: &mut Preflight, board: &Board, participants: &[CommandParticipant]) {
    for p in participants.iter().filter(|p| !p.is_guest) {
        let Some(id) = p.member_id.as_deref() else { continue };
        if let Some(number) = board.playing_court_of(id) {
            preflight.fail(format!("{} is already playing on court {number}", p.label()));
        }
    }
}

/// Members of `participants` already queued on the waitlist.
pub(crate) fn check_not_waiting(preflight: &mut Preflight, board: &Board, participants: &[CommandParticipant]) {
    for p in participants.iter().filter(|p| !p.is_guest) {
        let Some(id) = p.member_id.as_deref() else { continue };
        if let Some(entry) = board.waiting_entry_of(id) {
            preflight.fail(format!(
                "{} is already on the waitlist at position {}",
                p.label(),
                entry.position
            ));
        }
    }
}
